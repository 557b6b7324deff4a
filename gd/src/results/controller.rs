//! Results controller
//!
//! Fetch lifecycle: `Idle → Loading → Success | Failure`, with
//! `Failure → Loading` on retry and `Success | Failure → wizard` on restart.
//!
//! The network call runs outside the controller: `mount`/`retry` hand out a
//! [`FetchTicket`], the caller runs it, and feeds the [`FetchCompletion`]
//! back through `complete`. Every ticket carries the generation it was issued
//! under. Teardown, restart and newer fetches bump the generation, so a
//! completion arriving for an older generation is dropped without touching
//! state.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::client::{AnalysisClient, AnalysisError, ErrorKind};
use crate::domain::{AnalysisRequest, AnalysisResult, WizardAnswers};
use crate::nav::Route;
use crate::normalize::normalize;
use crate::session::{SessionError, SessionStore};

/// Fetch lifecycle state
#[derive(Debug, Clone, PartialEq)]
pub enum FetchState {
    Idle,
    Loading,
    Success(AnalysisResult),
    Failure { kind: ErrorKind, message: String },
}

impl FetchState {
    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::Loading)
    }
}

/// Result of entering the results view
#[derive(Debug)]
pub enum MountOutcome {
    /// No usable session: leave for the given route without fetching
    Redirect(Route),
    /// Session loaded; run this fetch
    Fetch(FetchTicket),
    /// The view was already entered; the session is read once per view
    AlreadyMounted,
}

/// One in-flight analysis request
#[derive(Debug, Clone)]
pub struct FetchTicket {
    generation: u64,
    request: AnalysisRequest,
}

impl FetchTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn request(&self) -> &AnalysisRequest {
        &self.request
    }

    /// Perform the call; holds no reference to the controller
    pub async fn run(self, client: Arc<dyn AnalysisClient>) -> FetchCompletion {
        debug!(generation = self.generation, "FetchTicket::run: called");
        let outcome = client.submit(&self.request).await;
        FetchCompletion {
            generation: self.generation,
            outcome,
        }
    }
}

/// Outcome of a ticket, tagged with its generation
#[derive(Debug)]
pub struct FetchCompletion {
    generation: u64,
    outcome: Result<AnalysisResult, AnalysisError>,
}

impl FetchCompletion {
    pub fn new(generation: u64, outcome: Result<AnalysisResult, AnalysisError>) -> Self {
        Self { generation, outcome }
    }
}

pub struct ResultsController {
    store: Arc<dyn SessionStore>,
    client: Arc<dyn AnalysisClient>,
    state: FetchState,
    answers: Option<WizardAnswers>,
    generation: u64,
    mounted: bool,
    alive: bool,
    retryable: bool,
}

impl ResultsController {
    pub fn new(store: Arc<dyn SessionStore>, client: Arc<dyn AnalysisClient>) -> Self {
        debug!("ResultsController::new: called");
        Self {
            store,
            client,
            state: FetchState::Idle,
            answers: None,
            generation: 0,
            mounted: false,
            alive: true,
            retryable: false,
        }
    }

    pub fn state(&self) -> &FetchState {
        &self.state
    }

    /// Answers loaded from the session on mount
    pub fn answers(&self) -> Option<&WizardAnswers> {
        self.answers.as_ref()
    }

    pub fn client(&self) -> Arc<dyn AnalysisClient> {
        self.client.clone()
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Enter the view: read the session once and start the first fetch
    ///
    /// A missing, corrupt or incomplete session redirects to the wizard
    /// without entering `Loading`. Incomplete covers missing quiz answers or
    /// duration, and quiz answers for the other analysis type.
    pub fn mount(&mut self) -> MountOutcome {
        debug!("mount: called");
        if self.mounted {
            return MountOutcome::AlreadyMounted;
        }
        self.mounted = true;

        let Some(answers) = self.store.load() else {
            info!("No session found, redirecting to wizard");
            return MountOutcome::Redirect(Route::Wizard);
        };
        if !answers.is_complete() {
            info!("Session is incomplete, redirecting to wizard");
            return MountOutcome::Redirect(Route::Wizard);
        }

        self.answers = Some(answers);
        match self.begin_fetch() {
            Some(ticket) => MountOutcome::Fetch(ticket),
            None => MountOutcome::Redirect(Route::Wizard),
        }
    }

    /// Whether the retry action is available
    ///
    /// Only after a failure the error class marks as retryable, and never
    /// while a request is loading.
    pub fn can_retry(&self) -> bool {
        self.alive && self.retryable && matches!(self.state, FetchState::Failure { .. })
    }

    /// Re-issue the request after a failure
    ///
    /// Returns `None` whenever `can_retry` is false, which also keeps a
    /// second request from starting while one is loading.
    pub fn retry(&mut self) -> Option<FetchTicket> {
        debug!(state = ?self.state, "retry: called");
        if !self.can_retry() {
            debug!("retry: not available in current state");
            return None;
        }
        self.begin_fetch()
    }

    /// Normalize afresh and move to `Loading` under a new generation
    fn begin_fetch(&mut self) -> Option<FetchTicket> {
        let answers = self.answers.as_ref()?;
        match normalize(answers) {
            Ok(request) => {
                self.generation += 1;
                self.state = FetchState::Loading;
                info!(generation = self.generation, destination = %request.destination, "Fetching analysis");
                Some(FetchTicket {
                    generation: self.generation,
                    request,
                })
            }
            Err(e) => {
                warn!(error = %e, "begin_fetch: answers no longer normalize");
                None
            }
        }
    }

    /// Apply a finished fetch; returns whether it was accepted
    pub fn complete(&mut self, completion: FetchCompletion) -> bool {
        debug!(generation = completion.generation, current = self.generation, "complete: called");
        if !self.alive || completion.generation != self.generation || !self.state.is_loading() {
            debug!("complete: discarding stale response");
            return false;
        }
        self.state = match completion.outcome {
            Ok(result) => {
                info!(risk_count = result.risks.len(), "Analysis succeeded");
                FetchState::Success(result)
            }
            Err(e) => {
                warn!(kind = ?e.kind(), message = %e, "Analysis failed");
                self.retryable = e.is_retryable();
                FetchState::Failure {
                    kind: e.kind(),
                    message: e.message(),
                }
            }
        };
        true
    }

    /// Start a new analysis: clear the session and leave for the wizard
    ///
    /// Available from `Success` or `Failure`; returns `Ok(None)` otherwise.
    pub fn restart(&mut self) -> Result<Option<Route>, SessionError> {
        debug!(state = ?self.state, "restart: called");
        if !matches!(self.state, FetchState::Success(_) | FetchState::Failure { .. }) {
            return Ok(None);
        }
        self.store.clear()?;
        self.teardown();
        info!("Session cleared, restarting wizard");
        Ok(Some(Route::Wizard))
    }

    /// The view is going away; any response still in flight is dropped on arrival
    pub fn teardown(&mut self) {
        debug!("teardown: called");
        self.alive = false;
        self.generation += 1;
    }

    /// Mount and wait for the first fetch
    ///
    /// Returns the redirect route when there is no session.
    pub async fn load(&mut self) -> Option<Route> {
        match self.mount() {
            MountOutcome::Redirect(route) => Some(route),
            MountOutcome::Fetch(ticket) => {
                let completion = ticket.run(self.client()).await;
                self.complete(completion);
                None
            }
            MountOutcome::AlreadyMounted => None,
        }
    }

    /// Retry and wait; returns whether a fetch was issued
    pub async fn retry_and_wait(&mut self) -> bool {
        let Some(ticket) = self.retry() else {
            return false;
        };
        let completion = ticket.run(self.client()).await;
        self.complete(completion);
        true
    }
}
