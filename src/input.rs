//! Key bindings and the per-frame input sample handed to the simulation.

use crate::game::TickInput;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::{Duration, Instant};

/// Without release events a key counts as held until it has been silent this long.
/// Shorter than one lateral step so a tap moves once.
const HOLD_TIMEOUT: Duration = Duration::from_millis(200);

/// Action from a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Left,
    Right,
    /// Turn; single containers have nothing to rotate.
    Up,
    Down,
    Confirm,
    Pause,
    Quit,
    None,
}

/// Map key event to game action. Arrows and vim keys both work.
pub fn key_to_action(key: KeyEvent) -> Action {
    let KeyEvent {
        code, modifiers, ..
    } = key;
    let no_mod = modifiers.is_empty() || modifiers == KeyModifiers::SHIFT;
    if modifiers == KeyModifiers::CONTROL && code == KeyCode::Char('c') {
        return Action::Quit;
    }
    if !no_mod {
        return Action::None;
    }
    match code {
        KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
        KeyCode::Char('p') => Action::Pause,
        KeyCode::Left | KeyCode::Char('h') => Action::Left,
        KeyCode::Right | KeyCode::Char('l') => Action::Right,
        KeyCode::Up | KeyCode::Char('k') => Action::Up,
        KeyCode::Down | KeyCode::Char('j') => Action::Down,
        KeyCode::Enter | KeyCode::Char(' ') => Action::Confirm,
        _ => Action::None,
    }
}

#[derive(Debug, Clone, Copy)]
struct Held {
    last_seen: Instant,
}

/// Tracks press edges and held keys between simulation frames.
///
/// Terminals that support the kitty keyboard protocol report releases; once
/// one has been seen, keys stay held until released. Otherwise a key is
/// held while the terminal keeps auto-repeating it.
#[derive(Debug, Default)]
pub struct InputState {
    left_pressed: bool,
    right_pressed: bool,
    up_pressed: bool,
    left: Option<Held>,
    right: Option<Held>,
    down: Option<Held>,
    confirm: Option<Held>,
    pause: Option<Held>,
    quit: Option<Held>,
    reports_release: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a key event. Returns true for a fresh press, which is when
    /// screen-level actions (confirm, pause, quit) should fire.
    pub fn record(&mut self, action: Action, kind: KeyEventKind, now: Instant) -> bool {
        if kind == KeyEventKind::Release {
            self.reports_release = true;
            if let Some(slot) = self.held_slot(action) {
                *slot = None;
            }
            return false;
        }

        let reports_release = self.reports_release;
        let fresh = match self.held_slot(action) {
            Some(slot) => {
                let was_held = slot.is_some_and(|h| still_held(h, now, reports_release));
                *slot = Some(Held { last_seen: now });
                kind == KeyEventKind::Press && !was_held
            }
            None => kind == KeyEventKind::Press,
        };

        if fresh {
            match action {
                Action::Left => self.left_pressed = true,
                Action::Right => self.right_pressed = true,
                Action::Up => self.up_pressed = true,
                _ => {}
            }
        }
        fresh
    }

    /// Builds the input for one simulation frame and clears the press edges.
    pub fn sample(&mut self, now: Instant) -> TickInput {
        let reports_release = self.reports_release;
        let held = |slot: &mut Option<Held>| {
            if slot.is_some_and(|h| !still_held(h, now, reports_release)) {
                *slot = None;
            }
            slot.is_some()
        };
        let input = TickInput {
            left_pressed: self.left_pressed,
            right_pressed: self.right_pressed,
            up_pressed: self.up_pressed,
            left_held: held(&mut self.left),
            right_held: held(&mut self.right),
            down_held: held(&mut self.down),
        };
        self.left_pressed = false;
        self.right_pressed = false;
        self.up_pressed = false;
        input
    }

    /// Forget movement keys; used when the screen changes under a held key.
    /// Screen-level keys stay tracked so their auto-repeat cannot act on the
    /// screen they just opened.
    pub fn clear(&mut self) {
        *self = Self {
            confirm: self.confirm,
            pause: self.pause,
            quit: self.quit,
            reports_release: self.reports_release,
            ..Self::default()
        };
    }

    fn held_slot(&mut self, action: Action) -> Option<&mut Option<Held>> {
        match action {
            Action::Left => Some(&mut self.left),
            Action::Right => Some(&mut self.right),
            Action::Down => Some(&mut self.down),
            Action::Confirm => Some(&mut self.confirm),
            Action::Pause => Some(&mut self.pause),
            Action::Quit => Some(&mut self.quit),
            Action::Up | Action::None => None,
        }
    }
}

fn still_held(held: Held, now: Instant, reports_release: bool) -> bool {
    reports_release || now.saturating_duration_since(held.last_seen) <= HOLD_TIMEOUT
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_bindings() {
        assert_eq!(key_to_action(key(KeyCode::Left)), Action::Left);
        assert_eq!(key_to_action(key(KeyCode::Char('h'))), Action::Left);
        assert_eq!(key_to_action(key(KeyCode::Right)), Action::Right);
        assert_eq!(key_to_action(key(KeyCode::Char('l'))), Action::Right);
        assert_eq!(key_to_action(key(KeyCode::Up)), Action::Up);
        assert_eq!(key_to_action(key(KeyCode::Char('j'))), Action::Down);
        assert_eq!(key_to_action(key(KeyCode::Enter)), Action::Confirm);
        assert_eq!(key_to_action(key(KeyCode::Char(' '))), Action::Confirm);
        assert_eq!(key_to_action(key(KeyCode::Char('p'))), Action::Pause);
        assert_eq!(key_to_action(key(KeyCode::Esc)), Action::Quit);
        assert_eq!(key_to_action(key(KeyCode::Char('x'))), Action::None);
    }

    #[test]
    fn test_modifiers() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(key_to_action(ctrl_c), Action::Quit);
        let alt_h = KeyEvent::new(KeyCode::Char('h'), KeyModifiers::ALT);
        assert_eq!(key_to_action(alt_h), Action::None);
    }

    #[test]
    fn test_press_edge_is_consumed_by_sample() {
        let mut input = InputState::new();
        let t0 = Instant::now();
        assert!(input.record(Action::Right, KeyEventKind::Press, t0));
        let frame = input.sample(t0);
        assert!(frame.right_pressed && frame.right_held);
        let frame = input.sample(t0);
        assert!(!frame.right_pressed);
        assert!(frame.right_held);
    }

    #[test]
    fn test_autorepeat_is_not_a_new_press() {
        let mut input = InputState::new();
        let t0 = Instant::now();
        assert!(input.record(Action::Left, KeyEventKind::Press, t0));
        input.sample(t0);
        let t1 = t0 + Duration::from_millis(30);
        assert!(!input.record(Action::Left, KeyEventKind::Press, t1));
        assert!(!input.sample(t1).left_pressed);
    }

    #[test]
    fn test_held_expires_without_release_events() {
        let mut input = InputState::new();
        let t0 = Instant::now();
        input.record(Action::Down, KeyEventKind::Press, t0);
        assert!(input.sample(t0 + HOLD_TIMEOUT).down_held);
        assert!(!input.sample(t0 + HOLD_TIMEOUT * 2).down_held);
    }

    #[test]
    fn test_release_ends_hold_and_disables_timeout() {
        let mut input = InputState::new();
        let t0 = Instant::now();
        input.record(Action::Left, KeyEventKind::Press, t0);
        input.record(Action::Left, KeyEventKind::Release, t0);
        assert!(!input.sample(t0).left_held);

        input.record(Action::Right, KeyEventKind::Press, t0);
        assert!(input.sample(t0 + Duration::from_secs(5)).right_held);
    }

    #[test]
    fn test_non_movement_press_is_fresh_once() {
        let mut input = InputState::new();
        let t0 = Instant::now();
        assert!(input.record(Action::Confirm, KeyEventKind::Press, t0));
        assert!(!input.record(Action::Confirm, KeyEventKind::Repeat, t0));
        assert!(!input.record(Action::Confirm, KeyEventKind::Release, t0));
        assert_eq!(input.sample(t0), TickInput::default());
    }

    #[test]
    fn test_autorepeated_confirm_fires_once() {
        let mut input = InputState::new();
        let t0 = Instant::now();
        assert!(input.record(Action::Confirm, KeyEventKind::Press, t0));
        let t1 = t0 + Duration::from_millis(30);
        assert!(!input.record(Action::Confirm, KeyEventKind::Press, t1));
        input.clear();
        let t2 = t1 + Duration::from_millis(30);
        assert!(!input.record(Action::Confirm, KeyEventKind::Press, t2));

        assert!(input.record(Action::Pause, KeyEventKind::Press, t2));
        assert!(!input.record(Action::Pause, KeyEventKind::Press, t2 + Duration::from_millis(30)));
    }

    #[test]
    fn test_confirm_is_fresh_again_after_a_pause() {
        let mut input = InputState::new();
        let t0 = Instant::now();
        assert!(input.record(Action::Confirm, KeyEventKind::Press, t0));
        let later = t0 + HOLD_TIMEOUT * 2;
        assert!(input.record(Action::Confirm, KeyEventKind::Press, later));
    }

    #[test]
    fn test_released_confirm_is_fresh_on_next_press() {
        let mut input = InputState::new();
        let t0 = Instant::now();
        assert!(input.record(Action::Confirm, KeyEventKind::Press, t0));
        input.record(Action::Confirm, KeyEventKind::Release, t0);
        assert!(input.record(Action::Confirm, KeyEventKind::Press, t0 + Duration::from_millis(30)));
    }

    #[test]
    fn test_clear_drops_held_keys() {
        let mut input = InputState::new();
        let t0 = Instant::now();
        input.record(Action::Down, KeyEventKind::Press, t0);
        input.clear();
        assert!(!input.sample(t0).down_held);
    }
}
