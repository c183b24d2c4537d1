use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use crate::config::ExplorerConfig;

use super::error::{LoadError, PipelineError};
use super::model::CleanedTable;
use super::{clean, loader};

/// What identifies one version of the input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileStamp {
    pub path: PathBuf,
    pub len: u64,
    pub modified: Option<SystemTime>,
}

impl FileStamp {
    pub fn of(path: &Path) -> Result<Self, LoadError> {
        let meta = std::fs::metadata(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            len: meta.len(),
            modified: meta.modified().ok(),
        })
    }
}

/// Memoized load + clean of a single input file.
///
/// The cleaned table is shared read-only; it is rebuilt only when the file's
/// stamp changes.
#[derive(Debug, Default)]
pub struct CleanedCache {
    entry: Option<(FileStamp, Arc<CleanedTable>)>,
}

impl CleanedCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_load(
        &mut self,
        path: &Path,
        config: &ExplorerConfig,
    ) -> Result<Arc<CleanedTable>, PipelineError> {
        let stamp = FileStamp::of(path)?;
        if let Some((cached, table)) = &self.entry {
            if *cached == stamp {
                log::debug!("Reusing cleaned table for {}", path.display());
                return Ok(Arc::clone(table));
            }
        }

        log::debug!("Loading {}", path.display());
        let raw = loader::load_file(path)?;
        let cleaned = Arc::new(clean::clean(&raw, config)?);
        self.entry = Some((stamp, Arc::clone(&cleaned)));
        Ok(cleaned)
    }

    /// Whether `path` differs from the cached file (or nothing is cached).
    pub fn is_stale(&self, path: &Path) -> bool {
        match (&self.entry, FileStamp::of(path)) {
            (Some((cached, _)), Ok(stamp)) => *cached != stamp,
            _ => true,
        }
    }

    #[cfg(test)]
    pub fn clear(&mut self) {
        self.entry = None;
    }
}
