//! Local demo harness for the Deployable UI library.
//!
//! Two binaries share this crate:
//! - `demo-server` serves the demo page, demo scripts (`/js`), and library
//!   assets (`/static`) over HTTP, plus health/redirect/favicon utility
//!   endpoints.
//! - `launcher` runs the test suite and starts the server only when it
//!   passes.

pub mod config;
pub mod handler;
pub mod http;
pub mod launcher;
pub mod logger;
pub mod paths;
