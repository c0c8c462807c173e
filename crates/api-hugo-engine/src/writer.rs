//! Persists composed pages under the output directory.

use std::fs;
use std::path::{Path, PathBuf};

use relative_path::RelativePath;

use crate::page::PageUnit;

#[derive(Debug, thiserror::Error)]
pub enum WriteError {
    #[error("Failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to clean output directory {path}: {source}")]
    Clean {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to serialize front matter for {page}: {source}")]
    FrontMatter {
        page: String,
        source: toml::ser::Error,
    },
}

/// Line endings of written files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NewlineKind {
    #[default]
    CrLf,
    Lf,
    /// Whatever the current platform uses.
    Os,
}

impl NewlineKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NewlineKind::CrLf => "\r\n",
            NewlineKind::Lf => "\n",
            NewlineKind::Os if cfg!(windows) => "\r\n",
            NewlineKind::Os => "\n",
        }
    }

    /// Converts `\n` separated text to this kind of line ending.
    pub fn convert(&self, content: &str) -> String {
        let normalized = content.replace("\r\n", "\n");
        match self.as_str() {
            "\n" => normalized,
            newline => normalized.replace('\n', newline),
        }
    }
}

pub struct PageWriter {
    output_root: PathBuf,
    newline: NewlineKind,
}

impl PageWriter {
    pub fn new(output_root: impl Into<PathBuf>, newline: NewlineKind) -> Self {
        Self {
            output_root: output_root.into(),
            newline,
        }
    }

    pub fn output_root(&self) -> &Path {
        &self.output_root
    }

    /// Removes everything inside the output directory, keeping the directory itself.
    pub fn clean(&self) -> Result<(), WriteError> {
        let clean_error = |source| WriteError::Clean {
            path: self.output_root.clone(),
            source,
        };
        if !self.output_root.exists() {
            return Ok(());
        }
        for entry in fs::read_dir(&self.output_root).map_err(clean_error)? {
            let path = entry.map_err(clean_error)?.path();
            let removed = if path.is_dir() {
                fs::remove_dir_all(&path)
            } else {
                fs::remove_file(&path)
            };
            removed.map_err(clean_error)?;
        }
        Ok(())
    }

    /// Writes one page and returns the absolute path written.
    pub fn write(&self, page: &PageUnit) -> Result<PathBuf, WriteError> {
        let content = page.render().map_err(|source| WriteError::FrontMatter {
            page: page.name.clone(),
            source,
        })?;
        self.write_file(&page.path, &content)
    }

    fn write_file(&self, relative_path: &RelativePath, content: &str) -> Result<PathBuf, WriteError> {
        let absolute_path = relative_path.to_path(&self.output_root);
        let io_error = |source| WriteError::Io {
            path: absolute_path.clone(),
            source,
        };

        if let Some(parent) = absolute_path.parent() {
            fs::create_dir_all(parent).map_err(io_error)?;
        }
        fs::write(&absolute_path, self.newline.convert(content)).map_err(io_error)?;
        log::debug!("Wrote {}", absolute_path.display());
        Ok(absolute_path)
    }
}
