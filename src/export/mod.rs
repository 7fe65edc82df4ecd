//! Session export: rendered report (PDF) and codelabs-style steps.

/// Codelabs-style structured export.
pub mod codelabs;
/// PDF report export.
pub mod pdf;

pub use codelabs::export_codelabs;
pub use pdf::export_pdf;
