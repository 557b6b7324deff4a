//! AnalysisClient trait definition

use async_trait::async_trait;

use super::AnalysisError;
use crate::domain::{AnalysisRequest, AnalysisResult};

/// One outbound call per submission; no retries or backoff
///
/// Retrying is the caller's decision: it simply calls `submit` again.
#[async_trait]
pub trait AnalysisClient: Send + Sync {
    async fn submit(&self, request: &AnalysisRequest) -> Result<AnalysisResult, AnalysisError>;
}
