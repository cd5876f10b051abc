use std::path::{Path, PathBuf};

use tracing::warn;
use training_timer_lib::PathPicker;

/// A "file dialog" that answers with the path given on the command line.
pub struct ArgPath(pub PathBuf);

impl ArgPath {
    fn has_allowed_extension(path: &Path, extensions: &[&str]) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| extensions.iter().any(|allowed| ext.eq_ignore_ascii_case(allowed)))
    }
}

impl PathPicker for ArgPath {
    fn open_path(&self, extensions: &[&str]) -> Option<PathBuf> {
        if Self::has_allowed_extension(&self.0, extensions) {
            Some(self.0.clone())
        } else {
            warn!("{} is not one of: {}", self.0.display(), extensions.join(", "));
            None
        }
    }

    fn save_path(&self, suggested_name: &str, extensions: &[&str]) -> Option<PathBuf> {
        if self.0.is_dir() {
            return Some(self.0.join(suggested_name));
        }

        match (self.0.extension(), extensions.first()) {
            (None, Some(ext)) => Some(self.0.with_extension(ext)),
            _ => self.open_path(extensions),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_open_requires_extension() {
        assert_eq!(
            ArgPath("program.JSON".into()).open_path(&["json"]),
            Some(PathBuf::from("program.JSON"))
        );
        assert_eq!(ArgPath("program.txt".into()).open_path(&["json"]), None);
        assert_eq!(ArgPath("program".into()).open_path(&["json"]), None);
    }

    #[test]
    fn test_save_completes_path() {
        let dir = tempfile::tempdir().unwrap();

        assert_eq!(
            ArgPath(dir.path().to_path_buf()).save_path("kickoffs.json", &["json"]),
            Some(dir.path().join("kickoffs.json"))
        );
        assert_eq!(
            ArgPath("out/kickoffs".into()).save_path("ignored.json", &["json"]),
            Some(PathBuf::from("out/kickoffs.json"))
        );
        assert_eq!(ArgPath("out/kickoffs.txt".into()).save_path("x.json", &["json"]), None);
    }
}
