//! Request handler module
//!
//! Responsible for request routing dispatch and static file serving for the
//! demo page, its scripts, and the library assets.

pub mod router;
pub mod static_files;

// Re-export main entry point
pub use router::handle_request;
