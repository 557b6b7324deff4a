//! GeoDermal - travel skin and hair environmental-risk questionnaire
//!
//! A four-step wizard collects home and destination cities, the analysis
//! type (skin or hair), a short quiz and the trip length. The answers are
//! handed off through a session slot to the results view, which normalizes
//! them into a backend request, submits it, and renders the classified risk
//! report.
//!
//! # Modules
//!
//! - [`domain`] - answers, requests, reports and the supported city list
//! - [`wizard`] - step state machine, form gating and terminal driver
//! - [`normalize`] - wizard answers to backend request
//! - [`session`] - single-slot handoff between wizard and results
//! - [`client`] - analysis client trait and HTTP implementation
//! - [`results`] - fetch lifecycle and rendering
//! - [`risk`] - score classification
//! - [`config`] - configuration types and loading
//! - [`cli`] - command-line interface

pub mod cli;
pub mod client;
pub mod config;
pub mod domain;
pub mod nav;
pub mod normalize;
pub mod results;
pub mod risk;
pub mod session;
pub mod wizard;

pub use client::{AnalysisClient, AnalysisError, ErrorKind, HttpAnalysisClient};
pub use config::Config;
pub use domain::{AnalysisRequest, AnalysisResult, DurationCategory, WizardAnswers};
pub use nav::Route;
pub use normalize::{NormalizeError, normalize};
pub use results::{FetchState, ResultsController};
pub use risk::{OverallStatus, RiskLevel, classify, overall_status};
pub use session::{FileSessionStore, MemorySessionStore, SessionError, SessionStore};
pub use wizard::WizardController;
