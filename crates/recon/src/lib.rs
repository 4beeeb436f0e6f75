//! `rosterdiff-recon` — three-source roster reconciliation engine.
//!
//! Pure engine crate: receives pre-loaded cell grids, returns the
//! reconciled report. No CLI or IO dependencies.

pub mod columns;
pub mod config;
pub mod engine;
pub mod error;
pub mod model;
pub mod names;
pub mod normalize;
pub mod table;

pub use config::ReconConfig;
pub use engine::run;
pub use error::ReconError;
pub use model::{RawTable, ReconInput, ReconResult, ReportRow, SourceTag};
