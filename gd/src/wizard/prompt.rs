//! Interactive terminal driver for the wizard

use std::io::Write;

use colored::Colorize;
use eyre::Result;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tracing::debug;

use super::controller::WizardController;
use super::state::WizardStep;
use crate::domain::{AnalysisType, DurationOption, HairType, SUPPORTED_CITIES, Sensitivity, SkinType, Texture};
use crate::nav::Route;

/// Source of user input lines
///
/// `Ok(None)` means the user left (EOF or Ctrl-C).
pub trait LineReader {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>>;
}

/// Readline-backed reader with history and line editing
pub struct RustylineReader {
    editor: DefaultEditor,
}

impl RustylineReader {
    pub fn new() -> Result<Self> {
        let editor = DefaultEditor::new().map_err(|e| eyre::eyre!("Failed to initialize readline: {}", e))?;
        Ok(Self { editor })
    }
}

impl LineReader for RustylineReader {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        match self.editor.readline(prompt) {
            Ok(line) => {
                let _ = self.editor.add_history_entry(line.as_str());
                Ok(Some(line))
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => Ok(None),
            Err(err) => Err(eyre::eyre!("Readline error: {}", err)),
        }
    }
}

/// Outcome of reading one answer
enum Answer<T> {
    Value(T),
    Quit,
}

/// Walk the user through every step
///
/// Returns the route to follow on submission, or `None` if the user quit.
pub fn run_wizard(wizard: &mut WizardController, reader: &mut dyn LineReader, out: &mut dyn Write) -> Result<Option<Route>> {
    debug!("run_wizard: called");
    writeln!(out)?;
    writeln!(out, "{}", "GeoDermal Travel Analysis".bright_cyan().bold())?;
    writeln!(out, "Type {} at any prompt to quit", "q".yellow())?;

    loop {
        if let Some((current, total)) = wizard.progress() {
            let percent = u32::from(current) * 100 / u32::from(total);
            writeln!(out)?;
            writeln!(out, "{}", format!("Step {} of {} ({}% complete)", current, total, percent).dimmed())?;
        }

        let answered = match wizard.step() {
            WizardStep::City => ask_cities(wizard, reader, out)?,
            WizardStep::AnalysisType => ask_analysis_type(wizard, reader, out)?,
            WizardStep::Quiz => ask_quiz(wizard, reader, out)?,
            WizardStep::Duration => ask_duration(wizard, reader, out)?,
            WizardStep::Submitted => return Ok(Some(Route::Results)),
        };
        if let Answer::Quit = answered {
            debug!("run_wizard: user quit");
            return Ok(None);
        }

        if !wizard.can_advance() {
            // Prompts only accept valid input, so this means a form was left incomplete
            writeln!(out, "{}", "Please complete this step to continue.".yellow())?;
            continue;
        }
        if let Some(route) = wizard.advance()? {
            return Ok(Some(route));
        }
    }
}

fn read(reader: &mut dyn LineReader, prompt: &str) -> Result<Answer<String>> {
    match reader.read_line(&format!("{} ", prompt.bright_green()))? {
        Some(line) if line.trim().eq_ignore_ascii_case("q") => Ok(Answer::Quit),
        Some(line) => Ok(Answer::Value(line.trim().to_string())),
        None => Ok(Answer::Quit),
    }
}

/// Ask until the input names one of `options` (by 1-based number or by name)
fn choose<T: Copy>(
    reader: &mut dyn LineReader,
    out: &mut dyn Write,
    prompt: &str,
    options: &[(T, &str)],
) -> Result<Answer<T>> {
    for (i, (_, label)) in options.iter().enumerate() {
        writeln!(out, "  {}. {}", i + 1, label)?;
    }
    loop {
        let Answer::Value(input) = read(reader, prompt)? else {
            return Ok(Answer::Quit);
        };
        let by_number = input
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| options.get(i));
        let by_name = options.iter().find(|(_, label)| label.eq_ignore_ascii_case(&input));
        match by_number.or(by_name) {
            Some((value, _)) => return Ok(Answer::Value(*value)),
            None => writeln!(out, "{}", format!("'{}' is not one of the options", input).red())?,
        }
    }
}

fn ask_city(
    reader: &mut dyn LineReader,
    out: &mut dyn Write,
    prompt: &str,
    mut select: impl FnMut(&str) -> bool,
) -> Result<Answer<()>> {
    loop {
        let Answer::Value(input) = read(reader, prompt)? else {
            return Ok(Answer::Quit);
        };
        if select(&input) {
            return Ok(Answer::Value(()));
        }
        let suggestions = crate::domain::suggest_cities(&input);
        if suggestions.is_empty() || input.is_empty() {
            writeln!(out, "{}", format!("'{}' is not a supported city", input).red())?;
        } else {
            writeln!(out, "Did you mean: {}", suggestions.join(", "))?;
        }
    }
}

fn ask_cities(wizard: &mut WizardController, reader: &mut dyn LineReader, out: &mut dyn Write) -> Result<Answer<()>> {
    writeln!(out)?;
    writeln!(out, "{}", "Where Are You Traveling?".bold())?;
    writeln!(out, "Supported cities: {}", SUPPORTED_CITIES.join(", "))?;

    if let Answer::Quit = ask_city(reader, out, "Home city:", |c| wizard.select_home_city(c))? {
        return Ok(Answer::Quit);
    }
    ask_city(reader, out, "Destination city:", |c| wizard.select_destination_city(c))
}

fn ask_analysis_type(
    wizard: &mut WizardController,
    reader: &mut dyn LineReader,
    out: &mut dyn Write,
) -> Result<Answer<()>> {
    writeln!(out)?;
    writeln!(out, "{}", "What would you like to analyze?".bold())?;
    let options: Vec<_> = AnalysisType::ALL.iter().map(|t| (*t, t.as_str())).collect();
    Ok(match choose(reader, out, "Analysis type:", &options)? {
        Answer::Value(t) => {
            wizard.choose_analysis_type(t);
            Answer::Value(())
        }
        Answer::Quit => Answer::Quit,
    })
}

fn ask_quiz(wizard: &mut WizardController, reader: &mut dyn LineReader, out: &mut dyn Write) -> Result<Answer<()>> {
    let Some(analysis_type) = wizard.quiz().map(|q| q.analysis_type()) else {
        return Ok(Answer::Quit);
    };
    writeln!(out)?;
    match analysis_type {
        AnalysisType::Skin => {
            writeln!(out, "{}", "Tell Us About Your Skin".bold())?;
            let types: Vec<_> = SkinType::ALL.iter().map(|t| (*t, t.as_str())).collect();
            let Answer::Value(skin_type) = choose(reader, out, "Skin type:", &types)? else {
                return Ok(Answer::Quit);
            };
            wizard.set_skin_type(skin_type);
            let levels: Vec<_> = Sensitivity::ALL.iter().map(|s| (*s, s.as_str())).collect();
            let Answer::Value(sensitivity) = choose(reader, out, "Sensitivity:", &levels)? else {
                return Ok(Answer::Quit);
            };
            wizard.set_sensitivity(sensitivity);
        }
        AnalysisType::Hair => {
            writeln!(out, "{}", "Tell Us About Your Hair".bold())?;
            let types: Vec<_> = HairType::ALL.iter().map(|t| (*t, t.as_str())).collect();
            let Answer::Value(hair_type) = choose(reader, out, "Hair type:", &types)? else {
                return Ok(Answer::Quit);
            };
            wizard.set_hair_type(hair_type);
            let textures: Vec<_> = Texture::ALL.iter().map(|t| (*t, t.as_str())).collect();
            let Answer::Value(texture) = choose(reader, out, "Texture:", &textures)? else {
                return Ok(Answer::Quit);
            };
            wizard.set_texture(texture);
        }
    }

    writeln!(
        out,
        "Concerns (optional, comma-separated): {}",
        analysis_type.concern_options().join(", ")
    )?;
    let Answer::Value(input) = read(reader, "Concerns:")? else {
        return Ok(Answer::Quit);
    };
    for concern in input.split(',').map(str::trim).filter(|c| !c.is_empty()) {
        if !wizard.toggle_concern(concern) {
            writeln!(out, "{}", format!("Ignoring '{}'", concern).dimmed())?;
        }
    }
    Ok(Answer::Value(()))
}

fn ask_duration(wizard: &mut WizardController, reader: &mut dyn LineReader, out: &mut dyn Write) -> Result<Answer<()>> {
    writeln!(out)?;
    writeln!(out, "{}", "How Long Is Your Trip?".bold())?;
    let options: Vec<_> = DurationOption::ALL.iter().map(|o| (*o, o.label())).collect();
    let Answer::Value(option) = choose(reader, out, "Duration:", &options)? else {
        return Ok(Answer::Quit);
    };
    wizard.choose_duration(option);

    while option == DurationOption::Custom && !wizard.can_advance() {
        let Answer::Value(days) = read(reader, "Number of days:")? else {
            return Ok(Answer::Quit);
        };
        wizard.set_custom_days(&days);
        if !wizard.can_advance() {
            writeln!(out, "{}", "Enter a whole number of days, 1 or more".red())?;
        }
    }
    Ok(Answer::Value(()))
}
