//! Project directory layout helpers.
//!
//! Every project lives under `<root>/projects/<name>/` with a fixed shape:
//! `config/` for the project configuration and schema script, `db/` for
//! the metadata database. Paths read from configuration resolve relative
//! to the project directory unless absolute.

use std::path::{Path, PathBuf};

/// Resolved paths for one project.
#[derive(Debug, Clone)]
pub struct ProjectLayout {
    project_dir: PathBuf,
}

impl ProjectLayout {
    pub fn new(root: &Path, project: &str) -> Self {
        Self {
            project_dir: root.join("projects").join(project),
        }
    }

    pub fn project_dir(&self) -> &Path {
        &self.project_dir
    }

    pub fn config_file(&self) -> PathBuf {
        self.project_dir.join("config").join("srcsift.toml")
    }

    pub fn schema_file(&self) -> PathBuf {
        self.project_dir.join("config").join("schema.sql")
    }

    /// Resolve a configured path against the project directory.
    pub fn resolve(&self, configured: &str) -> PathBuf {
        let path = Path::new(configured);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.project_dir.join(path)
        }
    }
}

// ── tests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_is_rooted_under_projects() {
        let layout = ProjectLayout::new(Path::new("/work"), "sample");
        assert_eq!(layout.project_dir(), Path::new("/work/projects/sample"));
        assert_eq!(
            layout.config_file(),
            Path::new("/work/projects/sample/config/srcsift.toml")
        );
        assert_eq!(
            layout.schema_file(),
            Path::new("/work/projects/sample/config/schema.sql")
        );
    }

    #[test]
    fn resolve_keeps_absolute_paths() {
        let layout = ProjectLayout::new(Path::new("/work"), "sample");
        assert_eq!(
            layout.resolve("db/metadata.db"),
            Path::new("/work/projects/sample/db/metadata.db")
        );
        assert_eq!(layout.resolve("/abs/meta.db"), Path::new("/abs/meta.db"));
    }
}
