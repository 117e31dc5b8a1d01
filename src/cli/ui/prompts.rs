use dialoguer::{theme::ColorfulTheme, Input, Password};

use crate::cli::ui::menu_renderer::{MenuRenderError, MenuRenderer, MenuUI, MenuUIItem};
use crate::cli::ui::test_mode::{self, TextTestInput};
use crate::errors::WizardError;

pub enum TextPromptResult {
    Value(String),
    Keep,
    Cancel,
}

pub enum ChoicePromptResult {
    Value(String),
    Cancel,
}

/// Reads one field value. An empty answer keeps the current value.
pub fn text_input(
    label: &str,
    current: &str,
    secret: bool,
) -> Result<TextPromptResult, WizardError> {
    if let Some(scripted) = test_mode::next_text_input(label) {
        return Ok(match scripted {
            TextTestInput::Value(value) => TextPromptResult::Value(value),
            TextTestInput::Keep => TextPromptResult::Keep,
            TextTestInput::Cancel => TextPromptResult::Cancel,
        });
    }

    let theme = ColorfulTheme::default();
    let answer = if secret {
        Password::with_theme(&theme)
            .with_prompt(label)
            .allow_empty_password(true)
            .interact()?
    } else {
        Input::<String>::with_theme(&theme)
            .with_prompt(label)
            .with_initial_text(current)
            .allow_empty(true)
            .interact_text()?
    };
    Ok(interpret_answer(answer, current))
}

/// Presents `options` as `(key, label)` pairs and returns the chosen key.
pub fn choice_menu(
    title: &str,
    context: Option<&str>,
    options: &[(String, String)],
    default: Option<&str>,
) -> Result<ChoicePromptResult, WizardError> {
    if options.is_empty() {
        return Ok(ChoicePromptResult::Cancel);
    }

    let items = options
        .iter()
        .map(|(key, label)| MenuUIItem::new(key.clone(), label.clone(), ""))
        .collect();
    let mut menu = MenuUI::new(title, items);
    if let Some(context) = context.filter(|text| !text.trim().is_empty()) {
        menu = menu.with_context(context);
    }
    if let Some(index) = default.and_then(|key| options.iter().position(|(k, _)| k == key)) {
        menu = menu.with_initial_index(index);
    }

    match MenuRenderer::new().show(&menu) {
        Ok(Some(key)) => Ok(ChoicePromptResult::Value(key)),
        Ok(None) | Err(MenuRenderError::Interrupted) | Err(MenuRenderError::EndOfInput) => {
            Ok(ChoicePromptResult::Cancel)
        }
        Err(MenuRenderError::Io(err)) => Err(err.into()),
    }
}

fn interpret_answer(answer: String, current: &str) -> TextPromptResult {
    if answer.trim().is_empty() && !current.is_empty() {
        return TextPromptResult::Keep;
    }
    if answer.trim().eq_ignore_ascii_case(":clear") {
        return TextPromptResult::Value(String::new());
    }
    TextPromptResult::Value(answer.trim().to_string())
}
