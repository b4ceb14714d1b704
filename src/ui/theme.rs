//! Green brand theme for cliclack prompts

use cliclack::ThemeState;
use console::Style;

/// AgrowMart prompt theme
#[derive(Debug, Clone, Default)]
pub struct AgrowTheme;

impl cliclack::Theme for AgrowTheme {
    fn bar_color(&self, state: &ThemeState) -> Style {
        match state {
            ThemeState::Active => Style::new().green(),
            ThemeState::Error(_) => Style::new().red(),
            ThemeState::Cancel => Style::new().dim(),
            ThemeState::Submit => Style::new().green().dim(),
        }
    }

    fn state_symbol_color(&self, state: &ThemeState) -> Style {
        match state {
            ThemeState::Active => Style::new().green(),
            ThemeState::Error(_) => Style::new().red(),
            ThemeState::Cancel => Style::new().dim(),
            ThemeState::Submit => Style::new().green().bold(),
        }
    }
}

/// Install the theme for all prompts in this process
pub fn init_theme() {
    cliclack::set_theme(AgrowTheme);
}
