use std::path::{Path, PathBuf};
use xshell::{cmd, Shell};

#[derive(Debug, thiserror::Error)]
#[error("failed to export {} with {}", .file.display(), .exporter.display())]
pub struct ExportError {
    pub exporter: PathBuf,
    pub file: PathBuf,
    #[source]
    pub source: xshell::Error,
}

/// The external utility that renders a generated SVG.
#[derive(Debug, Clone)]
pub struct Exporter {
    path: PathBuf,
}

impl Exporter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Exporter { path: path.into() }
    }

    // bare names go through PATH, anything else is relative to the shell's directory
    fn program(&self, sh: &Shell) -> PathBuf {
        if self.path.is_relative() && self.path.components().count() > 1 {
            sh.current_dir().join(&self.path)
        } else {
            self.path.clone()
        }
    }

    #[tracing::instrument(level = "debug", skip_all, fields(file = %file.display()))]
    pub fn export(&self, sh: &Shell, file: &Path) -> Result<(), ExportError> {
        let program = self.program(sh);
        tracing::debug!(exporter = %program.display(), "running exporter");
        cmd!(sh, "{program} {file}")
            .quiet()
            .run()
            .map_err(|source| ExportError {
                exporter: self.path.clone(),
                file: file.to_owned(),
                source,
            })
    }
}
