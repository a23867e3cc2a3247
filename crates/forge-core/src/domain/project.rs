use std::path::{Path, PathBuf};

/// A resolved project: where it lives and what it is called.
///
/// Built once by a [`ProjectResolver`](crate::application::ports::ProjectResolver)
/// and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectContext {
    project_root: PathBuf,
    project_name: String,
    package_name: String,
    script_name: String,
}

impl ProjectContext {
    /// The project name defaults to the root directory's file name.
    pub fn new(
        project_root: impl Into<PathBuf>,
        package_name: impl Into<String>,
        script_name: impl Into<String>,
    ) -> Self {
        let project_root = project_root.into();
        let project_name = project_root
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self {
            project_root,
            project_name,
            package_name: package_name.into(),
            script_name: script_name.into(),
        }
    }

    pub fn with_project_name(mut self, name: impl Into<String>) -> Self {
        self.project_name = name.into();
        self
    }

    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    pub fn project_name(&self) -> &str {
        &self.project_name
    }

    pub fn package_name(&self) -> &str {
        &self.package_name
    }

    pub fn script_name(&self) -> &str {
        &self.script_name
    }

    /// `<project_root>/<package_name>`; must exist for the project to be valid.
    pub fn package_dir(&self) -> PathBuf {
        self.project_root.join(&self.package_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn project_name_defaults_to_root_dir_name() {
        let ctx = ProjectContext::new("/work/my-app", "my_app", "my-app");
        assert_eq!(ctx.project_name(), "my-app");
    }

    #[test]
    fn explicit_project_name_wins() {
        let ctx = ProjectContext::new("/work/x", "pkg", "x").with_project_name("Shiny");
        assert_eq!(ctx.project_name(), "Shiny");
    }

    #[test]
    fn package_dir_is_under_root() {
        let ctx = ProjectContext::new("/work/my-app", "my_app", "my-app");
        assert_eq!(ctx.package_dir(), PathBuf::from("/work/my-app/my_app"));
    }
}
