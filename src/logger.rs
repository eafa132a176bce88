//! Logger module
//!
//! Console logging for the demo server: startup banner, access lines with
//! timestamps, warnings and errors to stderr.

use crate::paths::DemoPaths;
use chrono::Local;
use std::net::SocketAddr;

fn timestamp() -> String {
    Local::now().format("%d/%b/%Y:%H:%M:%S %z").to_string()
}

pub fn log_server_start(addr: &SocketAddr, paths: &DemoPaths) {
    println!("======================================");
    println!("Deployable UI demo server started");
    println!("Listening on: http://{addr}");
    println!("Demo dir:   {}", paths.demo_dir.display());
    println!("Static dir: {}", paths.static_dir.display());
    if !paths.index_exists() {
        println!(
            "[WARN] Demo index missing: {} (serving fallback page)",
            paths.index_file.display()
        );
    }
    println!("======================================\n");
}

/// Log one access line per handled request
pub fn log_access(method: &hyper::Method, path: &str, status: u16, bytes: u64) {
    println!("[{}] \"{method} {path}\" {status} {bytes}", timestamp());
}

pub fn log_warning(message: &str) {
    eprintln!("[WARN] {message}");
}

pub fn log_error(message: &str) {
    eprintln!("[ERROR] {message}");
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    eprintln!("[ERROR] Failed to serve connection: {err:?}");
}

pub fn log_shutdown() {
    println!("\n[Shutdown] Interrupt received, stopping accept loop");
}
