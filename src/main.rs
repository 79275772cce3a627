//! Wastedump: a falling-container puzzle in the terminal.

mod app;
mod game;
mod input;
mod session;
mod theme;
mod ui;

use anyhow::Result;
use app::App;
use clap::{Parser, ValueEnum};

/// Simulation frames per second unless overridden on the command line.
pub const DEFAULT_TICK_RATE: f64 = 60.0;

/// Options derived from CLI that affect game behaviour.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Simulation frames per second; every speed in the game counts frames.
    pub tick_rate: f64,
    /// Fixed seed for the piece generator. Each new game replays the same sequence.
    pub seed: Option<u64>,
    pub skip_intro: bool,
    /// Leave the colour map in place when rows are removed.
    pub mutate_on_clear: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            tick_rate: DEFAULT_TICK_RATE,
            seed: None,
            skip_intro: false,
            mutate_on_clear: false,
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let theme = theme::Theme::load(args.theme.as_deref(), args.palette).unwrap_or_default();
    let config = GameConfig {
        tick_rate: args.tick_rate,
        seed: args.seed,
        skip_intro: args.skip_intro,
        mutate_on_clear: args.mutate_on_clear,
    };
    let mut app = App::new(config, theme)?;
    app.run()?;
    Ok(())
}

/// Falling-container puzzle in the terminal.
#[derive(Debug, Parser)]
#[command(
    name = "wastedump",
    version,
    about = "Stack falling waste containers; never let two of one colour touch, and clear full rows to score.",
    long_about = "Wastedump is a terminal puzzle game.\n\n\
        Single containers of red, blue or yellow waste fall into a 10x19 pit. A container that lands \
        on another slides down a free diagonal. If it ends up touching a container of its own colour \
        the reaction starts: 200 points are lost and the game ends two seconds later. Filled rows \
        are removed and everything above drops by a row; each cleared row makes containers fall faster.\n\n\
        CONTROLS:\n  Left/Right or h/l  Move    Down or j  Fall faster    Up or k  Turn\n  \
        Enter/Space        Confirm  P          Pause          Q / Esc  Quit\n\n\
        Use --theme to load a btop-style theme (e.g. onedark.theme)."
)]
pub struct Args {
    /// Path to theme file (btop-style theme[key]=\"value\"). Uses One Dark if not set.
    #[arg(short, long, value_name = "FILE")]
    pub theme: Option<std::path::PathBuf>,

    /// Colour palette: normal (theme), high-contrast, or colorblind.
    #[arg(long, default_value = "normal")]
    pub palette: Palette,

    /// Simulation frames per second. Gravity, movement and countdowns are counted in frames.
    #[arg(long, default_value_t = DEFAULT_TICK_RATE, value_name = "RATE")]
    pub tick_rate: f64,

    /// Seed the piece generator for a repeatable sequence.
    #[arg(long, value_name = "N")]
    pub seed: Option<u64>,

    /// Skip the title and tutorial screens and start playing immediately.
    #[arg(long)]
    pub skip_intro: bool,

    /// Keep colours in place when rows are removed, so dropped containers may change colour.
    #[arg(long)]
    pub mutate_on_clear: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Palette {
    #[default]
    Normal,

    #[value(alias = "highcontrast", alias = "contrast")]
    HighContrast,

    #[value(alias = "colourblind")]
    Colorblind,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_cli_defaults() {
        let args = Args::try_parse_from(["wastedump"]).unwrap();
        assert_eq!(args.tick_rate, DEFAULT_TICK_RATE);
        assert_eq!(args.palette, Palette::Normal);
        assert!(args.seed.is_none());
        assert!(!args.skip_intro);
        assert!(!args.mutate_on_clear);
    }

    #[test]
    fn test_cli_flags() {
        let args = Args::try_parse_from([
            "wastedump",
            "--seed",
            "12",
            "--palette",
            "colourblind",
            "--skip-intro",
            "--mutate-on-clear",
            "--tick-rate",
            "30",
        ])
        .unwrap();
        assert_eq!(args.seed, Some(12));
        assert_eq!(args.palette, Palette::Colorblind);
        assert!(args.skip_intro);
        assert!(args.mutate_on_clear);
        assert_eq!(args.tick_rate, 30.0);
    }
}
