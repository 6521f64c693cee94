//! Output destinations for generated files.

use anyhow::{Context, Result};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Where a command writes its document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output {
    Stdout,
    File(PathBuf),
}

impl Output {
    /// `-` selects stdout, anything else a file; `None` uses `default`.
    pub fn resolve(arg: Option<&Path>, default: &Path) -> Self {
        match arg {
            Some(p) if p == Path::new("-") => Output::Stdout,
            Some(p) => Output::File(p.to_path_buf()),
            None => Output::File(default.to_path_buf()),
        }
    }

    /// Write `content`, creating parent directories for files.
    pub fn write(&self, content: &[u8]) -> Result<()> {
        match self {
            Output::Stdout => {
                let mut stdout = std::io::stdout().lock();
                stdout.write_all(content)?;
                stdout.flush()?;
            }
            Output::File(path) => {
                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    std::fs::create_dir_all(parent).with_context(|| {
                        format!("Failed to create directory: {}", parent.display())
                    })?;
                }
                std::fs::write(path, content)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
            }
        }
        Ok(())
    }

    pub fn describe(&self) -> String {
        match self {
            Output::Stdout => "<stdout>".to_string(),
            Output::File(path) => path.display().to_string(),
        }
    }
}
