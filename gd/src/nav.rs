//! Navigation targets signalled by the controllers

use std::fmt;

/// Where control goes next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Wizard entry point (step 1)
    Wizard,
    /// Results view for the handed-off session
    Results,
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Wizard => f.write_str("/analyze"),
            Route::Results => f.write_str("/results"),
        }
    }
}
