//! Results view
//!
//! - [`controller`] - fetch lifecycle, single-flight and stale-response guard
//! - [`render`] - terminal rendering of a report
//! - [`view`] - interactive driver

pub mod controller;
pub mod render;
pub mod view;

pub use controller::{FetchCompletion, FetchState, FetchTicket, MountOutcome, ResultsController};
pub use render::{RiskRow, render_failure, render_report, risk_rows};
pub use view::run_results;
