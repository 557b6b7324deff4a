//! Step wizard
//!
//! - [`state`] - pure forward-only state machine and step guards
//! - [`controller`] - form state, continue gating and session handoff
//! - [`prompt`] - interactive terminal driver

pub mod controller;
pub mod prompt;
pub mod state;

pub use controller::WizardController;
pub use prompt::{LineReader, RustylineReader, run_wizard};
pub use state::{
    CityForm, DurationForm, HairForm, QuizForm, SkinForm, WizardError, WizardEvent, WizardState, WizardStep,
};
