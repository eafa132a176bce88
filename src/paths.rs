//! Demo path resolution module
//!
//! Computes the fixed set of filesystem locations the demo server serves
//! from. Resolution is pure and happens once at startup; routes that depend
//! on a missing directory degrade per request instead of failing startup.

use std::path::{Path, PathBuf};

/// Default repository root: the crate manifest directory.
///
/// Running via `cargo run` this is the source checkout, which is where the
/// demo content lives. `--root` overrides it for binaries copied elsewhere.
pub fn default_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

/// Resolved demo locations, fixed for the process lifetime.
#[derive(Debug, Clone)]
pub struct DemoPaths {
    pub root: PathBuf,
    pub demo_dir: PathBuf,
    pub html_dir: PathBuf,
    pub js_dir: PathBuf,
    pub index_file: PathBuf,
    pub static_dir: PathBuf,
}

impl DemoPaths {
    /// Derive all demo locations from the repository root.
    ///
    /// Demo-only content lives under `demo/`, library assets under `ui/`.
    pub fn resolve(root: &Path) -> Self {
        let demo_dir = root.join("demo");
        let html_dir = demo_dir.join("html");
        let js_dir = demo_dir.join("js");
        let index_file = html_dir.join("index.html");
        let static_dir = root.join("ui");
        Self {
            root: root.to_path_buf(),
            demo_dir,
            html_dir,
            js_dir,
            index_file,
            static_dir,
        }
    }

    /// Whether the demo index page exists right now (never cached)
    pub fn index_exists(&self) -> bool {
        self.index_file.is_file()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derived_locations() {
        let paths = DemoPaths::resolve(Path::new("/srv/repo"));
        assert_eq!(paths.demo_dir, Path::new("/srv/repo/demo"));
        assert_eq!(paths.html_dir, Path::new("/srv/repo/demo/html"));
        assert_eq!(paths.js_dir, Path::new("/srv/repo/demo/js"));
        assert_eq!(paths.index_file, Path::new("/srv/repo/demo/html/index.html"));
        assert_eq!(paths.static_dir, Path::new("/srv/repo/ui"));
    }

    #[test]
    fn test_index_exists_tracks_filesystem() {
        let tmp = tempfile::tempdir().unwrap();
        let paths = DemoPaths::resolve(tmp.path());
        assert!(!paths.index_exists());

        std::fs::create_dir_all(&paths.html_dir).unwrap();
        std::fs::write(&paths.index_file, "<html></html>").unwrap();
        assert!(paths.index_exists());
    }

    #[test]
    fn test_default_root_is_crate_dir() {
        assert!(default_root().join("Cargo.toml").is_file());
    }
}
