//! Colours for prompts and product badges

use crate::catalog::ProductKind;
use cliclack::ThemeState;
use console::{style, Style, StyledObject};

/// Prompt theme in the catalog's blue
#[derive(Debug, Clone, Default)]
pub struct RosterTheme;

impl cliclack::Theme for RosterTheme {
    fn bar_color(&self, state: &ThemeState) -> Style {
        match state {
            ThemeState::Active => Style::new().blue(),
            ThemeState::Error(_) => Style::new().red(),
            ThemeState::Cancel => Style::new().dim(),
            ThemeState::Submit => Style::new().blue().dim(),
        }
    }

    fn state_symbol_color(&self, state: &ThemeState) -> Style {
        match state {
            ThemeState::Active => Style::new().blue(),
            ThemeState::Error(_) => Style::new().red(),
            ThemeState::Cancel => Style::new().dim(),
            ThemeState::Submit => Style::new().green(),
        }
    }
}

pub fn init_theme() {
    cliclack::set_theme(RosterTheme);
}

/// Product kind styled the way listings show it
pub fn kind_badge(kind: &str) -> StyledObject<&str> {
    match ProductKind::parse(kind) {
        ProductKind::ConsumerAligned => style(kind).green(),
        ProductKind::SourceAligned => style(kind).blue(),
        ProductKind::Application => style(kind).magenta(),
        ProductKind::DataConsumer => style(kind).yellow(),
        ProductKind::Other => style(kind).dim(),
    }
}
