//! Screens around the game: title, tutorial, play, game over.

use crate::GameConfig;
use crate::game::{GameState, TickInput, TickReport};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    TitleScreen,
    Tutorial,
    Playing,
    GameOver,
}

/// Current screen, the game behind it and the best score this run.
#[derive(Debug, Clone)]
pub struct Session {
    pub screen: Screen,
    pub game: GameState,
    /// Best final score since launch; updated when leaving the game-over screen.
    pub hiscore: i64,
    config: GameConfig,
}

impl Session {
    pub fn new(config: GameConfig) -> Self {
        let screen = if config.skip_intro {
            Screen::Playing
        } else {
            Screen::TitleScreen
        };
        Self {
            screen,
            game: GameState::new(&config),
            hiscore: 0,
            config,
        }
    }

    /// Enter / Space.
    pub fn confirm(&mut self) {
        match self.screen {
            Screen::TitleScreen => self.screen = Screen::Tutorial,
            Screen::Tutorial => self.start_game(),
            Screen::Playing => {}
            Screen::GameOver => {
                self.hiscore = self.hiscore.max(self.game.stats.score);
                self.screen = Screen::TitleScreen;
            }
        }
    }

    pub fn toggle_pause(&mut self) {
        if self.screen == Screen::Playing {
            self.game.paused = !self.game.paused;
        }
    }

    /// One simulation frame; only the play screen runs the game.
    pub fn tick(&mut self, input: &TickInput) -> TickReport {
        if self.screen != Screen::Playing {
            return TickReport::default();
        }
        let report = self.game.tick(input);
        if self.game.is_over() {
            self.screen = Screen::GameOver;
        }
        report
    }

    fn start_game(&mut self) {
        self.game = GameState::new(&self.config);
        self.screen = Screen::Playing;
    }
}
