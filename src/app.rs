//! App: terminal init, fixed-rate frame loop, key handling.

use crate::GameConfig;
use crate::input::{Action, InputState, key_to_action};
use crate::session::{Screen, Session};
use crate::theme::Theme;
use anyhow::{Result, ensure};
use crossterm::event::{self, Event, KeyEvent};
use ratatui::DefaultTerminal;
use std::time::{Duration, Instant};
use tachyonfx::Effect;

/// Whether the loop should keep going after a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

pub struct App {
    session: Session,
    theme: Theme,
    input: InputState,
    tick_interval: Duration,
    last_tick: Instant,
    /// Screen the entrance effect was last started for.
    shown_screen: Option<Screen>,
    screen_effect: Option<Effect>,
    /// Last time we processed the screen effect (for delta).
    screen_effect_process_time: Option<Instant>,
}

impl App {
    pub fn new(config: GameConfig, theme: Theme) -> Result<Self> {
        ensure!(
            config.tick_rate.is_finite() && config.tick_rate > 0.0,
            "tick rate must be a positive number, got {}",
            config.tick_rate
        );
        let tick_interval = Duration::from_secs_f64(1.0 / config.tick_rate);
        Ok(Self {
            session: Session::new(config),
            theme,
            input: InputState::new(),
            tick_interval,
            last_tick: Instant::now(),
            shown_screen: None,
            screen_effect: None,
            screen_effect_process_time: None,
        })
    }

    pub fn run(&mut self) -> Result<()> {
        use crossterm::{
            event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
            execute,
            terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
        };

        enable_raw_mode()?;
        let mut stdout = std::io::stdout();
        execute!(stdout, EnterAlternateScreen)?;

        // Release events make held keys exact; terminals without the
        // protocol fall back to auto-repeat timing in InputState.
        let _ = execute!(
            stdout,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
        );

        let mut terminal =
            ratatui::DefaultTerminal::new(ratatui::backend::CrosstermBackend::new(stdout))?;

        let result = self.run_loop(&mut terminal);

        // Restore
        let _ = execute!(std::io::stdout(), PopKeyboardEnhancementFlags);
        execute!(std::io::stdout(), LeaveAlternateScreen)?;
        disable_raw_mode()?;

        result
    }

    fn run_loop(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        self.last_tick = Instant::now();
        loop {
            let now = Instant::now();
            if self.shown_screen != Some(self.session.screen) {
                self.shown_screen = Some(self.session.screen);
                self.screen_effect = Some(crate::ui::screen_entrance_effect(&self.theme));
                self.screen_effect_process_time = None;
                self.input.clear();
            }

            terminal.draw(|f| {
                crate::ui::draw(
                    f,
                    &self.session,
                    &self.theme,
                    &mut self.screen_effect,
                    &mut self.screen_effect_process_time,
                    now,
                );
            })?;

            let timeout = self.tick_interval.saturating_sub(self.last_tick.elapsed());
            if event::poll(timeout)? {
                while event::poll(Duration::ZERO)? {
                    if let Event::Key(key) = event::read()? {
                        if self.handle_key(key) == Flow::Quit {
                            return Ok(());
                        }
                    }
                }
            }

            // Catch up if drawing fell behind, but never spiral.
            let mut frames = 0;
            while self.last_tick.elapsed() >= self.tick_interval && frames < 4 {
                self.last_tick += self.tick_interval;
                let input = self.input.sample(Instant::now());
                self.session.tick(&input);
                frames += 1;
            }
            if self.last_tick.elapsed() >= self.tick_interval {
                self.last_tick = Instant::now();
            }
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Flow {
        let action = key_to_action(key);
        if !self.input.record(action, key.kind, Instant::now()) {
            return Flow::Continue;
        }
        match action {
            Action::Quit => return Flow::Quit,
            Action::Confirm => self.session.confirm(),
            Action::Pause => self.session.toggle_pause(),
            _ => {}
        }
        Flow::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEventKind, KeyModifiers};

    fn app() -> App {
        App::new(
            GameConfig {
                seed: Some(6),
                ..GameConfig::default()
            },
            Theme::default(),
        )
        .unwrap()
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_rejects_bad_tick_rate() {
        for tick_rate in [0.0, -5.0, f64::NAN, f64::INFINITY] {
            let config = GameConfig {
                tick_rate,
                ..GameConfig::default()
            };
            assert!(App::new(config, Theme::default()).is_err());
        }
    }

    #[test]
    fn test_tick_interval_from_rate() {
        let app = App::new(
            GameConfig {
                tick_rate: 50.0,
                ..GameConfig::default()
            },
            Theme::default(),
        )
        .unwrap();
        assert_eq!(app.tick_interval, Duration::from_millis(20));
    }

    #[test]
    fn test_keys_drive_session() {
        let mut app = app();
        assert_eq!(app.handle_key(press(KeyCode::Enter)), Flow::Continue);
        assert_eq!(app.session.screen, Screen::Tutorial);
        app.handle_key(release(KeyCode::Enter));
        app.handle_key(press(KeyCode::Char(' ')));
        assert_eq!(app.session.screen, Screen::Playing);
        app.handle_key(press(KeyCode::Char('p')));
        assert!(app.session.game.paused);
        assert_eq!(app.handle_key(press(KeyCode::Char('q'))), Flow::Quit);
    }

    fn release(code: KeyCode) -> KeyEvent {
        KeyEvent::new_with_kind(code, KeyModifiers::NONE, KeyEventKind::Release)
    }

    #[test]
    fn test_release_does_not_confirm() {
        let mut app = app();
        app.handle_key(release(KeyCode::Enter));
        assert_eq!(app.session.screen, Screen::TitleScreen);
    }

    #[test]
    fn test_held_enter_advances_one_screen() {
        let mut app = app();
        for _ in 0..5 {
            app.handle_key(press(KeyCode::Enter));
        }
        assert_eq!(app.session.screen, Screen::Tutorial);
    }
}
