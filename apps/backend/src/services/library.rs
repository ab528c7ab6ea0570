//! Class card library on the local filesystem.
//!
//! Each registered class owns one YAML card list under the card directory,
//! named after the class (`wizard.yml`, `druid.yml`, ...).

use std::path::{Path, PathBuf};

use cardsheet_core::{CardSource, ClassRegistry};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LibraryError {
    #[error("unknown class: {0}")]
    UnknownClass(String),

    #[error("could not read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Sources read for a class load, plus the classes that could not be read.
#[derive(Debug, Default)]
pub struct LibraryRead {
    pub sources: Vec<CardSource>,
    pub failures: Vec<(String, LibraryError)>,
}

pub struct CardLibrary {
    dir: PathBuf,
}

impl CardLibrary {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Read the card list of a single class.
    pub async fn read_class(&self, registry: &ClassRegistry, class: &str) -> Result<CardSource, LibraryError> {
        let info = registry
            .get(class)
            .ok_or_else(|| LibraryError::UnknownClass(class.to_string()))?;
        let path = self.dir.join(&info.card_file);
        let text = tokio::fs::read_to_string(&path)
            .await
            .map_err(|source| LibraryError::Read {
                path: path.display().to_string(),
                source,
            })?;
        Ok(CardSource::new(info.name.clone(), text))
    }

    /// Read the card lists of several classes in the given order.
    ///
    /// A class that cannot be read is recorded and skipped; the rest still load.
    pub async fn read_classes(&self, registry: &ClassRegistry, classes: &[String]) -> LibraryRead {
        let mut read = LibraryRead::default();
        for class in classes {
            match self.read_class(registry, class).await {
                Ok(source) => read.sources.push(source),
                Err(e) => {
                    tracing::warn!("Skipping class {}: {}", class, e);
                    read.failures.push((class.clone(), e));
                }
            }
        }
        read
    }
}
