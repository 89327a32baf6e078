//! Theme CLI commands

use anyhow::Result;
use clap::Subcommand;

use super::output::Output;
use crate::domain::Theme;
use crate::storage::ThemeFile;

#[derive(Subcommand)]
pub enum ThemeCommands {
    /// Show the current theme
    Show,

    /// Switch between dark and light
    Toggle,

    /// Choose a theme explicitly
    Set {
        /// dark or light
        theme: String,
    },
}

pub fn run(cmd: Option<ThemeCommands>, output: &Output, themes: &ThemeFile) -> Result<()> {
    match cmd.unwrap_or(ThemeCommands::Show) {
        ThemeCommands::Show => show(output, themes),
        ThemeCommands::Toggle => {
            let theme = themes.toggle();
            report(output, theme);
            Ok(())
        }
        ThemeCommands::Set { theme } => {
            let theme: Theme = theme.parse()?;
            themes.save(theme);
            report(output, theme);
            Ok(())
        }
    }
}

fn show(output: &Output, themes: &ThemeFile) -> Result<()> {
    let theme = themes.preferred_theme();

    if output.is_json() {
        output.data(&serde_json::json!({
            "theme": theme,
            "explicit": themes.stored().is_some(),
        }));
    } else {
        let source = if themes.stored().is_some() {
            "saved"
        } else {
            "system default"
        };
        output.success(&format!("{} ({})", theme, source));
    }

    Ok(())
}

fn report(output: &Output, theme: Theme) {
    if output.is_json() {
        output.data(&serde_json::json!({ "theme": theme }));
    } else {
        output.success(&format!("Switched to {} theme", theme));
    }
}
