//! Acceptance Test Harness for TUI testing
//!
//! Wraps `TuiApp<TestBackend>` with a manual clock and a recording audio
//! backend, so tests can drive keys, pointer gestures and time.

use crate::audio::testing::{Call, RecordingAudio};
use crate::audio::AudioSource;
use crate::config::keybindings::KeyBindings;
use crate::model::catalog;
use crate::state::{AppOptions, AppState};
use crate::view::{CardStyles, ColorConfig, ScreenLayout, TuiApp};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::backend::TestBackend;
use ratatui::Terminal;
use std::time::{Duration, Instant};

/// Convert a ratatui buffer to a string representation for snapshot testing.
///
/// Empty trailing lines are removed to keep snapshots clean.
pub fn buffer_to_string(buffer: &ratatui::buffer::Buffer) -> String {
    let area = buffer.area();
    let mut lines = Vec::new();

    for y in area.top()..area.bottom() {
        let mut line = String::new();
        for x in area.left()..area.right() {
            line.push_str(buffer[(x, y)].symbol());
        }
        lines.push(line.trim_end().to_string());
    }

    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }
    lines.join("\n")
}

/// Test harness for acceptance testing
pub struct AcceptanceTestHarness {
    app: TuiApp<TestBackend>,
    audio: RecordingAudio,
    now: Instant,
    running: bool,
}

#[allow(dead_code)] // Not every scenario uses every helper
impl AcceptanceTestHarness {
    /// The built-in catalog on an 80x40 terminal, mounted.
    pub fn new() -> Self {
        Self::with_audio(RecordingAudio::new(), 80, 40)
    }

    /// Mount with a prepared audio backend (e.g. scripted play failures).
    pub fn with_audio(audio: RecordingAudio, width: u16, height: u16) -> Self {
        let now = Instant::now();
        let terminal =
            Terminal::new(TestBackend::new(width, height)).expect("TestBackend never fails");

        let songs = catalog::songs().expect("catalog ids are valid");
        let mut state = AppState::new(
            songs,
            AppOptions::default(),
            Box::new(audio.clone()),
            now,
        )
        .expect("catalog forms a deck")
        .with_rng(StdRng::seed_from_u64(42));
        let source = AudioSource::new("http://localhost:3000").expect("valid base url");
        state.mount(&source, now);

        let styles = CardStyles::with_color_config(ColorConfig::from_env_and_args(true));
        let app = TuiApp::new_for_test(terminal, state, KeyBindings::default(), styles);

        Self {
            app,
            audio,
            now,
            running: true,
        }
    }

    /// Send a single key event. Returns true if the app quit.
    pub fn send_key(&mut self, key: KeyCode) -> bool {
        self.send_key_with_mods(key, KeyModifiers::NONE)
    }

    /// Send key with modifiers (e.g., Ctrl+C)
    pub fn send_key_with_mods(&mut self, key: KeyCode, mods: KeyModifiers) -> bool {
        if !self.running {
            return true;
        }
        let quit = self.app.handle_key_test(KeyEvent::new(key, mods), self.now);
        if quit {
            self.running = false;
        }
        quit
    }

    /// Advance the clock, ticking in frame-sized steps.
    pub fn advance(&mut self, by: Duration) {
        let step = Duration::from_millis(16);
        let end = self.now + by;
        while self.now < end {
            self.now = (self.now + step).min(end);
            self.app.app_state_mut().tick(self.now);
        }
    }

    fn mouse(&mut self, kind: MouseEventKind, column: u16, row: u16) {
        if !self.running {
            return;
        }
        let event = MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        };
        self.app.handle_mouse_test(event, self.now);
    }

    /// Left button down.
    pub fn press_at(&mut self, column: u16, row: u16) {
        self.mouse(MouseEventKind::Down(MouseButton::Left), column, row);
    }

    /// Move with the left button held.
    pub fn drag_to(&mut self, column: u16, row: u16) {
        self.mouse(MouseEventKind::Drag(MouseButton::Left), column, row);
    }

    /// Left button up.
    pub fn release_at(&mut self, column: u16, row: u16) {
        self.mouse(MouseEventKind::Up(MouseButton::Left), column, row);
    }

    /// Press and release in place.
    pub fn click_at(&mut self, column: u16, row: u16) {
        self.press_at(column, row);
        self.release_at(column, row);
    }

    /// Move without buttons.
    pub fn hover_at(&mut self, column: u16, row: u16) {
        self.mouse(MouseEventKind::Moved, column, row);
    }

    /// Scroll the wheel up.
    pub fn scroll_up_at(&mut self, column: u16, row: u16) {
        self.mouse(MouseEventKind::ScrollUp, column, row);
    }

    /// Full drag of the top card from its middle by `columns`.
    pub fn drag_card_by(&mut self, columns: i32) {
        let card = self.layout().card;
        let (x, y) = (card.x + card.width / 2, card.y + 2);
        let to = u16::try_from(i32::from(x) + columns).expect("drag stays on screen");
        self.press_at(x, y);
        self.drag_to(to, y);
        self.release_at(to, y);
    }

    /// Screen layout for the current terminal size.
    pub fn layout(&mut self) -> ScreenLayout {
        self.app.current_layout()
    }

    /// Current state.
    pub fn state(&self) -> &AppState {
        self.app.app_state()
    }

    /// Mutable state (for lifecycle calls like unmount).
    pub fn state_mut(&mut self) -> &mut AppState {
        self.app.app_state_mut()
    }

    /// Calls made against the audio backend so far.
    pub fn audio_calls(&self) -> Vec<Call> {
        self.audio.calls()
    }

    /// Forget recorded audio calls.
    pub fn clear_audio_calls(&self) {
        self.audio.clear();
    }

    /// Id of the top card.
    pub fn active_id(&self) -> String {
        self.state().deck().active().to_string()
    }

    /// Current harness time.
    pub fn now(&self) -> Instant {
        self.now
    }

    /// Whether the app is still running.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Render the current frame to a string
    pub fn render_to_string(&mut self) -> String {
        self.app
            .render_test(self.now)
            .expect("Rendering should succeed in test harness");
        buffer_to_string(self.app.terminal().backend().buffer())
    }
}
