//! Data layer: table model, cleaning pipeline, aggregation and export.
//!
//! Architecture:
//! ```text
//!  .csv / .tsv / .json
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader  │  parse file → Table
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  clean   │  prune sparse columns / untitled rows, derive year + word count
//!   └──────────┘       (memoized per file version by `cache`)
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  filter  │  year window + journal → filtered CleanedTable
//!   └──────────┘
//!        │
//!        ├──────────────┐
//!        ▼              ▼
//!   ┌───────────┐  ┌──────────┐
//!   │ aggregate │  │  export  │
//!   └───────────┘  └──────────┘
//! ```

pub mod aggregate;
pub mod cache;
pub mod clean;
pub mod error;
pub mod export;
pub mod filter;
pub mod loader;
pub mod model;
pub mod text;
