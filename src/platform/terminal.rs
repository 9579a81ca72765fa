//! Crossterm + ratatui implementation of the platform layer.

use std::io::{self, Stdout};

use crossterm::event::{
    DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture, Event,
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags, MouseButton,
    MouseEvent, MouseEventKind, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
    LeaveAlternateScreen,
};
use glam::Vec2;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use ratatui::Terminal;

use super::{canvas, DisplayList, FrameClock, HeldKeys, InputEvent, Key, Platform};
use crate::error::Result;
use crate::event::EventHandler;

/// Without release events a freshly pressed movement key counts as held this
/// long. It has to outlast the terminal's auto-repeat delay.
pub const INITIAL_HOLD: f64 = 0.7;
/// Once auto-repeat has started, the key stays held this long after each
/// repeat.
pub const REPEAT_HOLD: f64 = 0.15;

const INPUT_POLL_MS: u64 = 8;

const UP: usize = 0;
const DOWN: usize = 1;
const LEFT: usize = 2;
const RIGHT: usize = 3;

#[derive(Clone, Copy, Debug)]
struct Press {
    at: f64,
    repeating: bool,
}

/// Held state for the four movement keys.
#[derive(Clone, Debug, Default)]
pub struct KeyTracker {
    pressed: [Option<Press>; 4],
    reports_release: bool,
}

impl KeyTracker {
    pub fn new(reports_release: bool) -> Self {
        Self {
            pressed: [None; 4],
            reports_release,
        }
    }

    /// A press that lands while the key is still held is an auto-repeat.
    pub fn press(&mut self, slot: usize, now: f64) {
        let repeating = self.is_held(slot, now);
        self.pressed[slot] = Some(Press { at: now, repeating });
    }

    pub fn release(&mut self, slot: usize) {
        self.pressed[slot] = None;
    }

    pub fn release_all(&mut self) {
        self.pressed = [None; 4];
    }

    pub fn held(&self, now: f64) -> HeldKeys {
        HeldKeys {
            up: self.is_held(UP, now),
            down: self.is_held(DOWN, now),
            left: self.is_held(LEFT, now),
            right: self.is_held(RIGHT, now),
        }
    }

    fn is_held(&self, slot: usize, now: f64) -> bool {
        match self.pressed[slot] {
            Some(_) if self.reports_release => true,
            Some(press) if press.repeating => now - press.at < REPEAT_HOLD,
            Some(press) => now - press.at < INITIAL_HOLD,
            None => false,
        }
    }
}

fn movement_slot(code: KeyCode) -> Option<usize> {
    match code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Some(UP),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Some(DOWN),
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(LEFT),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(RIGHT),
        _ => None,
    }
}

fn map_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Esc => Some(Key::Escape),
        KeyCode::Char(' ') => Some(Key::Space),
        KeyCode::Char(c) => Some(Key::Char(c.to_ascii_lowercase())),
        _ => None,
    }
}

/// Maps terminal cells of the painted canvas onto arena coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    area: Rect,
    arena: Vec2,
}

impl Viewport {
    pub fn new(area: Rect, arena: Vec2) -> Self {
        Self { area, arena }
    }

    /// Center of the cell under (`column`, `row`), clamped to the canvas.
    pub fn to_arena(&self, column: u16, row: u16) -> Vec2 {
        if self.area.width == 0 || self.area.height == 0 {
            return self.arena * 0.5;
        }
        let col = column.saturating_sub(self.area.x).min(self.area.width - 1);
        let row = row.saturating_sub(self.area.y).min(self.area.height - 1);
        Vec2::new(
            (f32::from(col) + 0.5) * self.arena.x / f32::from(self.area.width),
            (f32::from(row) + 0.5) * self.arena.y / f32::from(self.area.height),
        )
    }
}

/// Turns raw terminal events into game input, tracking held keys and the
/// pointer along the way.
#[derive(Clone, Debug)]
pub struct InputMapper {
    keys: KeyTracker,
    pointer: Vec2,
    viewport: Viewport,
}

impl InputMapper {
    pub fn new(arena: Vec2, reports_release: bool) -> Self {
        Self {
            keys: KeyTracker::new(reports_release),
            pointer: arena * 0.5,
            viewport: Viewport::new(Rect::default(), arena),
        }
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn pointer(&self) -> Vec2 {
        self.pointer
    }

    pub fn held(&self, now: f64) -> HeldKeys {
        self.keys.held(now)
    }

    pub fn translate(&mut self, event: Event, now: f64) -> Option<InputEvent> {
        match event {
            Event::Key(key) => self.on_key(key, now),
            Event::Mouse(mouse) => self.on_mouse(mouse),
            Event::FocusLost => {
                self.keys.release_all();
                None
            }
            _ => None,
        }
    }

    fn on_key(&mut self, key: KeyEvent, now: f64) -> Option<InputEvent> {
        if let Some(slot) = movement_slot(key.code) {
            match key.kind {
                KeyEventKind::Press | KeyEventKind::Repeat => self.keys.press(slot, now),
                KeyEventKind::Release => self.keys.release(slot),
            }
        }
        if key.kind != KeyEventKind::Press {
            return None;
        }
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Some(InputEvent::Quit);
        }
        map_key(key.code).map(InputEvent::KeyDown)
    }

    fn on_mouse(&mut self, mouse: MouseEvent) -> Option<InputEvent> {
        let pos = self.viewport.to_arena(mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                self.pointer = pos;
                None
            }
            MouseEventKind::Down(MouseButton::Left) => {
                self.pointer = pos;
                Some(InputEvent::MouseButtonDown(pos))
            }
            _ => None,
        }
    }
}

pub struct TerminalPlatform {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    events: EventHandler,
    input: InputMapper,
    clock: FrameClock,
    title: String,
    arena: Vec2,
    enhanced_keys: bool,
    closed: bool,
}

impl TerminalPlatform {
    /// Takes over the terminal: raw mode, alternate screen, mouse capture and,
    /// where supported, key release reporting. The arena is `width` x
    /// `height` world units scaled onto whatever the terminal offers.
    pub fn create_window(width: f32, height: f32, title: &str) -> Result<Self> {
        let (terminal, enhanced_keys) = match open_terminal() {
            Ok(opened) => opened,
            Err(e) => {
                let _ = restore_terminal(false);
                return Err(e.into());
            }
        };
        log::info!("keyboard enhancement available: {enhanced_keys}");

        let arena = Vec2::new(width, height);
        Ok(Self {
            terminal,
            events: EventHandler::new(INPUT_POLL_MS),
            input: InputMapper::new(arena, enhanced_keys),
            clock: FrameClock::new(),
            title: title.to_string(),
            arena,
            enhanced_keys,
            closed: false,
        })
    }

    /// Hands the terminal back in the state we found it.
    pub fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        restore_terminal(self.enhanced_keys)?;
        self.terminal.show_cursor()?;
        Ok(())
    }
}

impl Drop for TerminalPlatform {
    fn drop(&mut self) {
        let _ = self.close();
    }
}

fn open_terminal() -> io::Result<(Terminal<CrosstermBackend<Stdout>>, bool)> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture, EnableFocusChange)?;

    let enhanced = supports_keyboard_enhancement().unwrap_or(false);
    if enhanced {
        execute!(
            stdout,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
        )?;
    }

    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    terminal.clear()?;
    terminal.hide_cursor()?;
    Ok((terminal, enhanced))
}

fn restore_terminal(enhanced: bool) -> io::Result<()> {
    let mut stdout = io::stdout();
    if enhanced {
        execute!(stdout, PopKeyboardEnhancementFlags)?;
    }
    disable_raw_mode()?;
    execute!(stdout, LeaveAlternateScreen, DisableMouseCapture, DisableFocusChange)?;
    Ok(())
}

impl Platform for TerminalPlatform {
    fn poll_events(&mut self) -> Result<Vec<InputEvent>> {
        let now = self.clock.now();
        let raw = self.events.drain()?;
        Ok(raw
            .into_iter()
            .filter_map(|ev| self.input.translate(ev, now))
            .collect())
    }

    fn held_keys(&self) -> HeldKeys {
        self.input.held(self.clock.now())
    }

    fn pointer_position(&self) -> Vec2 {
        self.input.pointer()
    }

    fn now(&self) -> f64 {
        self.clock.now()
    }

    fn tick(&mut self, target_fps: u32) -> f32 {
        self.clock.tick(target_fps)
    }

    fn fps(&self) -> f32 {
        self.clock.fps()
    }

    fn present(&mut self, frame: &DisplayList) -> Result<()> {
        let title = &self.title;
        let arena = self.arena;
        let mut field = Rect::default();
        self.terminal.draw(|f| {
            field = canvas::paint(f, title, arena, frame);
        })?;
        self.input.set_viewport(Viewport::new(field, arena));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new_with_kind(code, KeyModifiers::NONE, KeyEventKind::Press))
    }

    fn release(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new_with_kind(code, KeyModifiers::NONE, KeyEventKind::Release))
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    fn arena() -> Vec2 {
        Vec2::new(800.0, 600.0)
    }

    #[test]
    fn viewport_maps_cells_to_arena() {
        let vp = Viewport::new(Rect::new(1, 1, 80, 30), arena());
        assert_eq!(vp.to_arena(1, 1), Vec2::new(5.0, 10.0));
        assert_eq!(vp.to_arena(80, 30), Vec2::new(795.0, 590.0));
        // Border cells clamp onto the canvas.
        assert_eq!(vp.to_arena(0, 0), vp.to_arena(1, 1));
        assert_eq!(vp.to_arena(200, 200), vp.to_arena(80, 30));
    }

    #[test]
    fn keys_expire_without_release_support() {
        let mut mapper = InputMapper::new(arena(), false);
        mapper.translate(press(KeyCode::Char('w')), 1.0);
        assert!(mapper.held(1.1).up);
        assert!(!mapper.held(1.0 + INITIAL_HOLD).up);
    }

    #[test]
    fn first_press_outlasts_autorepeat_delay() {
        let mut mapper = InputMapper::new(arena(), false);
        mapper.translate(press(KeyCode::Char('d')), 0.0);
        for t in [0.3, 0.4, 0.49, 0.6] {
            assert!(mapper.held(t).right, "dropped at {t}");
        }
    }

    #[test]
    fn autorepeat_shortens_the_hold() {
        let mut mapper = InputMapper::new(arena(), false);
        mapper.translate(press(KeyCode::Left), 0.0);
        mapper.translate(press(KeyCode::Left), 0.5);
        assert!(mapper.held(0.6).left);
        assert!(!mapper.held(0.5 + REPEAT_HOLD + 0.01).left);

        // A press after the key expired starts a fresh hold.
        mapper.translate(press(KeyCode::Left), 2.0);
        assert!(mapper.held(2.5).left);
    }

    #[test]
    fn arrows_only_drive_movement() {
        let mut mapper = InputMapper::new(arena(), false);
        assert_eq!(mapper.translate(press(KeyCode::Up), 0.0), None);
        assert!(mapper.held(0.0).up);
        assert_eq!(mapper.translate(press(KeyCode::Enter), 0.0), None);
    }

    #[test]
    fn keys_follow_release_events_when_reported() {
        let mut mapper = InputMapper::new(arena(), true);
        mapper.translate(press(KeyCode::Right), 1.0);
        assert!(mapper.held(60.0).right);
        mapper.translate(release(KeyCode::Right), 61.0);
        assert!(!mapper.held(61.0).right);
    }

    #[test]
    fn focus_loss_releases_everything() {
        let mut mapper = InputMapper::new(arena(), true);
        mapper.translate(press(KeyCode::Char('a')), 0.0);
        mapper.translate(Event::FocusLost, 0.0);
        assert_eq!(mapper.held(0.0), HeldKeys::default());
    }

    #[test]
    fn key_presses_become_key_down_events() {
        let mut mapper = InputMapper::new(arena(), false);
        assert_eq!(
            mapper.translate(press(KeyCode::Esc), 0.0),
            Some(InputEvent::KeyDown(Key::Escape))
        );
        assert_eq!(
            mapper.translate(press(KeyCode::Char('P')), 0.0),
            Some(InputEvent::KeyDown(Key::Char('p')))
        );
        assert_eq!(mapper.translate(release(KeyCode::Esc), 0.0), None);
        let ctrl_c = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(mapper.translate(ctrl_c, 0.0), Some(InputEvent::Quit));
    }

    #[test]
    fn mouse_tracks_pointer_and_clicks() {
        let mut mapper = InputMapper::new(arena(), false);
        mapper.set_viewport(Viewport::new(Rect::new(0, 0, 80, 30), arena()));
        assert_eq!(mapper.translate(mouse(MouseEventKind::Moved, 40, 15), 0.0), None);
        assert_eq!(mapper.pointer(), Vec2::new(405.0, 310.0));

        let click = mapper.translate(mouse(MouseEventKind::Down(MouseButton::Left), 0, 0), 0.0);
        assert_eq!(click, Some(InputEvent::MouseButtonDown(Vec2::new(5.0, 10.0))));
        assert_eq!(mapper.pointer(), Vec2::new(5.0, 10.0));
    }
}
