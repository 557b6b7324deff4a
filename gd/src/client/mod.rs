//! Analysis backend client
//!
//! Provides the single analysis call plus the auxiliary health/stats calls.

pub mod traits;
mod error;
mod http;

pub use traits::AnalysisClient;
pub use error::{AnalysisError, ErrorKind, GENERIC_SERVER_MESSAGE, GENERIC_UNKNOWN_MESSAGE, NETWORK_ERROR_MESSAGE};
pub use http::HttpAnalysisClient;
