use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};

use crate::color::ColorMap;
use crate::config::ExplorerConfig;
use crate::data::aggregate::Summary;
use crate::data::cache::CleanedCache;
use crate::data::export;
use crate::data::filter::{self, FilterState, JournalFilter};
use crate::data::model::CleanedTable;
use crate::data::text::TitleTokenizer;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: ExplorerConfig,

    /// File the current dataset came from.
    pub source_path: Option<PathBuf>,

    /// Memoized cleaned tables, keyed on file version.
    cache: CleanedCache,

    /// Cleaned dataset (None until a file loads).
    pub dataset: Option<Arc<CleanedTable>>,

    /// Current year window and journal selection.
    pub filters: FilterState,

    /// Slider bounds: the dataset's year span or the configured fallback.
    pub year_bounds: (i32, i32),

    /// Journal selector entries, sorted, without the "All" sentinel.
    pub journal_options: Vec<String>,

    /// Rows passing the current filters (cached).
    pub visible: Option<CleanedTable>,

    /// Aggregations over `visible` (cached).
    pub summary: Summary,

    /// Colours for journal bars, stable across filter changes.
    pub journal_colors: ColorMap,

    tokenizer: TitleTokenizer,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: ExplorerConfig) -> Self {
        Self {
            filters: FilterState {
                year_range: config.fallback_year_range,
                journal: JournalFilter::All,
            },
            year_bounds: config.fallback_year_range,
            config,
            source_path: None,
            cache: CleanedCache::new(),
            dataset: None,
            journal_options: Vec::new(),
            visible: None,
            summary: Summary::default(),
            journal_colors: ColorMap::default(),
            tokenizer: TitleTokenizer::default(),
            status_message: None,
        }
    }

    /// Load (or reuse) the cleaned table for `path` and reset the filters.
    ///
    /// Failures are logged and shown in the status line; the previous dataset
    /// stays in place.
    pub fn open(&mut self, path: &Path) {
        match self.cache.get_or_load(path, &self.config) {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} papers with columns {:?}",
                    dataset.len(),
                    dataset.table.columns
                );
                self.source_path = Some(path.to_path_buf());
                self.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("Failed to load {}: {e:#}", path.display());
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    /// Re-read the current file if it changed on disk.
    pub fn reload(&mut self) {
        let Some(path) = self.source_path.clone() else {
            return;
        };
        if self.cache.is_stale(&path) {
            self.open(&path);
        } else {
            self.status_message = Some("File unchanged, nothing to reload.".into());
        }
    }

    /// Ingest a newly cleaned dataset, initialise filters and colours.
    pub fn set_dataset(&mut self, dataset: Arc<CleanedTable>) {
        self.filters = FilterState::for_table(&dataset, self.config.fallback_year_range);
        self.year_bounds = self.filters.year_range;
        self.journal_options = dataset.journal_options();
        self.journal_colors = ColorMap::new(&self.journal_options);

        self.dataset = Some(dataset);
        self.status_message = None;
        self.refilter();
    }

    /// Recompute `visible` and `summary` after a filter change.
    pub fn refilter(&mut self) {
        if let Some(ds) = &self.dataset {
            let visible = filter::apply(ds, &self.filters);
            self.summary = Summary::compute(&visible, &self.tokenizer, &self.config);
            self.visible = Some(visible);
        }
    }

    /// Set the year window, keeping `from <= to`.
    pub fn set_year_range(&mut self, from: i32, to: i32) {
        let range = (from.min(to), from.max(to));
        if range != self.filters.year_range {
            self.filters.year_range = range;
            self.refilter();
        }
    }

    pub fn set_journal(&mut self, journal: JournalFilter) {
        if journal != self.filters.journal {
            self.filters.journal = journal;
            self.refilter();
        }
    }

    pub fn visible_len(&self) -> usize {
        self.visible.as_ref().map_or(0, CleanedTable::len)
    }

    /// Write the currently visible rows to `path`.
    pub fn export_visible(&mut self, path: &Path) -> Result<()> {
        let visible = self.visible.as_ref().context("no dataset loaded")?;
        export::save_csv(visible, path)
            .with_context(|| format!("exporting to {}", path.display()))?;
        self.status_message = Some(format!("Exported {} papers.", visible.len()));
        Ok(())
    }
}
