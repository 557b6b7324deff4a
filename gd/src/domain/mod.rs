//! Domain types for the GeoDermal questionnaire
//!
//! - [`answers`] - answers accumulated by the wizard and handed off to the results view
//! - [`request`] - the normalized payload sent to the analysis backend
//! - [`result`] - the environmental-risk report returned by the backend
//! - [`cities`] - the fixed list of supported cities

pub mod answers;
pub mod cities;
pub mod request;
pub mod result;

pub use answers::{
    AnalysisType, CityPair, DurationOption, HairAnswers, HairType, Sensitivity, SkinAnswers, SkinType, Texture,
    TypeAnswers, WizardAnswers,
};
pub use cities::{SUPPORTED_CITIES, resolve_city, suggest_cities};
pub use request::{AnalysisRequest, DurationCategory};
pub use result::{AnalysisResult, Confidence, Coords, EnvReport};
