//! Wizard controller
//!
//! Holds the in-progress form for the current step, exposes `can_advance` so
//! the continue control can be disabled, and commits forms through the pure
//! state machine. Submission writes the answers to the session store exactly
//! once and signals navigation to the results view.

use std::sync::Arc;

use tracing::{debug, info};

use super::state::{CityForm, DurationForm, QuizForm, WizardError, WizardEvent, WizardState, WizardStep};
use crate::domain::{AnalysisType, DurationOption, HairType, Sensitivity, SkinType, Texture, WizardAnswers};
use crate::nav::Route;
use crate::session::SessionStore;

pub struct WizardController {
    store: Arc<dyn SessionStore>,
    state: WizardState,
    cities: CityForm,
    analysis_type: Option<AnalysisType>,
    quiz: Option<QuizForm>,
    duration: DurationForm,
}

impl WizardController {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        debug!("WizardController::new: called");
        Self {
            store,
            state: WizardState::new(),
            cities: CityForm::default(),
            analysis_type: None,
            quiz: None,
            duration: DurationForm::default(),
        }
    }

    pub fn step(&self) -> WizardStep {
        self.state.step
    }

    /// Answers committed so far
    pub fn answers(&self) -> &WizardAnswers {
        &self.state.answers
    }

    /// `(current, total)` progress, shown from step 2 onward
    pub fn progress(&self) -> Option<(u8, u8)> {
        let number = self.state.step.number();
        (number > 1).then_some((number - 1, WizardStep::TOTAL))
    }

    pub fn cities(&self) -> &CityForm {
        &self.cities
    }

    pub fn quiz(&self) -> Option<&QuizForm> {
        self.quiz.as_ref()
    }

    pub fn duration(&self) -> &DurationForm {
        &self.duration
    }

    pub fn select_home_city(&mut self, input: &str) -> bool {
        self.cities.select_home(input)
    }

    pub fn select_destination_city(&mut self, input: &str) -> bool {
        self.cities.select_destination(input)
    }

    pub fn choose_analysis_type(&mut self, analysis_type: AnalysisType) {
        self.analysis_type = Some(analysis_type);
    }

    /// Set the skin type; ignored unless the skin quiz is active
    pub fn set_skin_type(&mut self, skin_type: SkinType) -> bool {
        match self.quiz.as_mut() {
            Some(QuizForm::Skin(form)) => {
                form.skin_type = Some(skin_type);
                true
            }
            _ => false,
        }
    }

    pub fn set_sensitivity(&mut self, sensitivity: Sensitivity) -> bool {
        match self.quiz.as_mut() {
            Some(QuizForm::Skin(form)) => {
                form.sensitivity = Some(sensitivity);
                true
            }
            _ => false,
        }
    }

    /// Set the hair type; ignored unless the hair quiz is active
    pub fn set_hair_type(&mut self, hair_type: HairType) -> bool {
        match self.quiz.as_mut() {
            Some(QuizForm::Hair(form)) => {
                form.hair_type = Some(hair_type);
                true
            }
            _ => false,
        }
    }

    pub fn set_texture(&mut self, texture: Texture) -> bool {
        match self.quiz.as_mut() {
            Some(QuizForm::Hair(form)) => {
                form.texture = Some(texture);
                true
            }
            _ => false,
        }
    }

    pub fn toggle_concern(&mut self, concern: &str) -> bool {
        self.quiz.as_mut().is_some_and(|q| q.toggle_concern(concern))
    }

    pub fn choose_duration(&mut self, option: DurationOption) {
        self.duration.choose(option);
    }

    pub fn set_custom_days(&mut self, days: &str) {
        self.duration.custom_days = days.trim().to_string();
    }

    /// Submit event for the current step built from its form, if the step takes input
    fn pending_event(&self) -> Option<WizardEvent> {
        match self.state.step {
            WizardStep::City => Some(WizardEvent::SubmitCities(self.cities.clone())),
            WizardStep::AnalysisType => Some(WizardEvent::SubmitAnalysisType(self.analysis_type)),
            WizardStep::Quiz => self.quiz.clone().map(WizardEvent::SubmitQuiz),
            WizardStep::Duration => Some(WizardEvent::SubmitDuration(self.duration.clone())),
            WizardStep::Submitted => None,
        }
    }

    /// Whether the continue control for the current step should be enabled
    pub fn can_advance(&self) -> bool {
        self.pending_event().is_some_and(|event| self.state.can_apply(&event))
    }

    /// Commit the current step
    ///
    /// Returns `Some(Route::Results)` when this advance submitted the wizard.
    pub fn advance(&mut self) -> Result<Option<Route>, WizardError> {
        debug!(step = ?self.state.step, "advance: called");
        let event = match self.pending_event() {
            Some(event) => event,
            None if self.state.step == WizardStep::Submitted => return Err(WizardError::AlreadySubmitted),
            None => return Err(WizardError::GuardNotSatisfied(self.state.step)),
        };
        let next = self.state.apply(&event)?;

        if next.step == WizardStep::Submitted {
            // Hand off before committing, so a failed write leaves the wizard on step 4
            self.store.save(&next.answers)?;
            self.state = next;
            info!("Wizard submitted, navigating to results");
            return Ok(Some(Route::Results));
        }

        if next.step == WizardStep::Quiz
            && let Some(chosen) = next.answers.analysis_type
            && self.quiz.as_ref().map(QuizForm::analysis_type) != Some(chosen)
        {
            self.quiz = Some(QuizForm::for_type(chosen));
        }

        info!(step = next.step.number(), "Wizard advanced");
        self.state = next;
        Ok(None)
    }
}
