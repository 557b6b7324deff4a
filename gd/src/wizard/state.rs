//! Wizard finite-state machine
//!
//! Forward-only: `City → AnalysisType → Quiz → Duration → Submitted`. Each
//! transition is driven by the matching submit event and guarded by a pure
//! check over the form contents carried in that event. A failed guard leaves
//! the state untouched.

use thiserror::Error;
use tracing::debug;

use crate::domain::{
    AnalysisType, CityPair, DurationOption, HairAnswers, HairType, Sensitivity, SkinAnswers, SkinType, Texture,
    TypeAnswers, WizardAnswers, resolve_city,
};
use crate::session::SessionError;

/// Wizard position
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum WizardStep {
    City,
    AnalysisType,
    Quiz,
    Duration,
    Submitted,
}

impl WizardStep {
    /// Total number of input steps
    pub const TOTAL: u8 = 4;

    /// 1-based step number; `Submitted` stays on the last step
    pub fn number(&self) -> u8 {
        match self {
            WizardStep::City => 1,
            WizardStep::AnalysisType => 2,
            WizardStep::Quiz => 3,
            WizardStep::Duration | WizardStep::Submitted => 4,
        }
    }

    pub fn next(&self) -> WizardStep {
        match self {
            WizardStep::City => WizardStep::AnalysisType,
            WizardStep::AnalysisType => WizardStep::Quiz,
            WizardStep::Quiz => WizardStep::Duration,
            WizardStep::Duration | WizardStep::Submitted => WizardStep::Submitted,
        }
    }
}

/// Errors raised when an advance is attempted anyway
#[derive(Debug, Error)]
pub enum WizardError {
    #[error("Required answers missing for step {0:?}")]
    GuardNotSatisfied(WizardStep),

    #[error("Event does not apply at step {0:?}")]
    WrongStep(WizardStep),

    #[error("Wizard already submitted")]
    AlreadySubmitted,

    #[error("Failed to hand off answers: {0}")]
    Session(#[from] SessionError),
}

/// Step 1 form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CityForm {
    pub home_city: Option<String>,
    pub destination_city: Option<String>,
}

impl CityForm {
    /// Select the home city; only supported cities are accepted
    pub fn select_home(&mut self, input: &str) -> bool {
        Self::select(&mut self.home_city, input)
    }

    /// Select the destination city; only supported cities are accepted
    pub fn select_destination(&mut self, input: &str) -> bool {
        Self::select(&mut self.destination_city, input)
    }

    fn select(slot: &mut Option<String>, input: &str) -> bool {
        match resolve_city(input) {
            Some(city) => {
                *slot = Some(city.to_string());
                true
            }
            None => false,
        }
    }
}

/// Step 3 form for skin
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkinForm {
    pub skin_type: Option<SkinType>,
    pub sensitivity: Option<Sensitivity>,
    pub concerns: Vec<String>,
}

/// Step 3 form for hair
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HairForm {
    pub hair_type: Option<HairType>,
    pub texture: Option<Texture>,
    pub concerns: Vec<String>,
}

/// Step 3 form, shaped by the analysis type chosen at step 2
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizForm {
    Skin(SkinForm),
    Hair(HairForm),
}

impl QuizForm {
    pub fn for_type(analysis_type: AnalysisType) -> Self {
        match analysis_type {
            AnalysisType::Skin => QuizForm::Skin(SkinForm::default()),
            AnalysisType::Hair => QuizForm::Hair(HairForm::default()),
        }
    }

    pub fn analysis_type(&self) -> AnalysisType {
        match self {
            QuizForm::Skin(_) => AnalysisType::Skin,
            QuizForm::Hair(_) => AnalysisType::Hair,
        }
    }

    pub fn concerns(&self) -> &[String] {
        match self {
            QuizForm::Skin(f) => &f.concerns,
            QuizForm::Hair(f) => &f.concerns,
        }
    }

    /// Toggle a concern on or off; returns whether it is now selected
    ///
    /// Unknown concerns for this analysis type are ignored.
    pub fn toggle_concern(&mut self, concern: &str) -> bool {
        let analysis_type = self.analysis_type();
        let Some(canonical) = analysis_type
            .concern_options()
            .iter()
            .find(|c| c.eq_ignore_ascii_case(concern.trim()))
        else {
            return false;
        };
        let concerns = match self {
            QuizForm::Skin(f) => &mut f.concerns,
            QuizForm::Hair(f) => &mut f.concerns,
        };
        if let Some(pos) = concerns.iter().position(|c| c == canonical) {
            concerns.remove(pos);
            false
        } else {
            concerns.push(canonical.to_string());
            true
        }
    }
}

/// Step 4 form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DurationForm {
    pub option: Option<DurationOption>,
    pub custom_days: String,
}

impl DurationForm {
    /// Pick one of the duration options; leaving `custom` clears the typed day count
    pub fn choose(&mut self, option: DurationOption) {
        self.option = Some(option);
        if option != DurationOption::Custom {
            self.custom_days.clear();
        }
    }

    /// Duration string to store, if the form is complete
    ///
    /// Custom day counts must be a positive whole number; zero and negatives
    /// are refused rather than silently mapped to the shortest bucket.
    pub fn resolve(&self) -> Option<String> {
        match self.option? {
            DurationOption::Custom => {
                let days: u64 = self.custom_days.trim().parse().ok()?;
                (days > 0).then(|| format!("{} days", days))
            }
            fixed => Some(fixed.token().to_string()),
        }
    }
}

/// Submit events, one per step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardEvent {
    SubmitCities(CityForm),
    SubmitAnalysisType(Option<AnalysisType>),
    SubmitQuiz(QuizForm),
    SubmitDuration(DurationForm),
}

impl WizardEvent {
    fn step(&self) -> WizardStep {
        match self {
            WizardEvent::SubmitCities(_) => WizardStep::City,
            WizardEvent::SubmitAnalysisType(_) => WizardStep::AnalysisType,
            WizardEvent::SubmitQuiz(_) => WizardStep::Quiz,
            WizardEvent::SubmitDuration(_) => WizardStep::Duration,
        }
    }
}

/// Step 1 guard: both cities chosen (they may be the same city)
pub fn cities_guard(form: &CityForm) -> Option<CityPair> {
    let pair = CityPair::new(form.home_city.clone()?, form.destination_city.clone()?);
    pair.is_complete().then_some(pair)
}

/// Step 2 guard: an analysis type is chosen
pub fn analysis_type_guard(choice: Option<AnalysisType>) -> Option<AnalysisType> {
    choice
}

/// Step 3 guard: primary fields set for the chosen type; concerns are optional
pub fn quiz_guard(form: &QuizForm, chosen: AnalysisType) -> Option<TypeAnswers> {
    if form.analysis_type() != chosen {
        return None;
    }
    match form {
        QuizForm::Skin(f) => Some(TypeAnswers::Skin(SkinAnswers {
            skin_type: f.skin_type?,
            sensitivity: f.sensitivity?,
            concerns: f.concerns.clone(),
        })),
        QuizForm::Hair(f) => Some(TypeAnswers::Hair(HairAnswers {
            hair_type: f.hair_type?,
            texture: f.texture?,
            concerns: f.concerns.clone(),
        })),
    }
}

/// Step 4 guard: a duration is chosen (custom requires a positive day count)
pub fn duration_guard(form: &DurationForm) -> Option<String> {
    form.resolve()
}

/// Wizard position plus the answers committed so far
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WizardState {
    pub step: WizardStep,
    pub answers: WizardAnswers,
}

impl Default for WizardState {
    fn default() -> Self {
        Self::new()
    }
}

impl WizardState {
    pub fn new() -> Self {
        Self {
            step: WizardStep::City,
            answers: WizardAnswers::default(),
        }
    }

    /// Whether `event` would pass its guard from this state
    pub fn can_apply(&self, event: &WizardEvent) -> bool {
        self.apply(event).is_ok()
    }

    /// Pure transition: the next state, or why the event was refused
    pub fn apply(&self, event: &WizardEvent) -> Result<WizardState, WizardError> {
        debug!(step = ?self.step, ?event, "apply: called");
        if self.step == WizardStep::Submitted {
            return Err(WizardError::AlreadySubmitted);
        }
        if event.step() != self.step {
            return Err(WizardError::WrongStep(self.step));
        }

        let mut answers = self.answers.clone();
        match event {
            WizardEvent::SubmitCities(form) => {
                answers.cities = Some(cities_guard(form).ok_or(WizardError::GuardNotSatisfied(self.step))?);
            }
            WizardEvent::SubmitAnalysisType(choice) => {
                answers.analysis_type =
                    Some(analysis_type_guard(*choice).ok_or(WizardError::GuardNotSatisfied(self.step))?);
            }
            WizardEvent::SubmitQuiz(form) => {
                let chosen = answers
                    .analysis_type
                    .ok_or(WizardError::GuardNotSatisfied(self.step))?;
                answers.type_answers =
                    Some(quiz_guard(form, chosen).ok_or(WizardError::GuardNotSatisfied(self.step))?);
            }
            WizardEvent::SubmitDuration(form) => {
                answers.duration = Some(duration_guard(form).ok_or(WizardError::GuardNotSatisfied(self.step))?);
            }
        }

        let step = self.step.next();
        answers.step = step.number();
        Ok(WizardState { step, answers })
    }
}
