//! TUI rendering and terminal management (impure shell)

pub mod card_stack;
pub mod constants;
pub mod footer;
pub mod layout;
mod styles;
pub mod volume_bar;

pub use layout::ScreenLayout;
pub use styles::{CardStyles, ColorConfig};

use crate::audio::{AudioSource, HeadlessAudio};
use crate::config::keybindings::KeyBindings;
use crate::model::catalog;
use crate::model::{InvalidSongId, KeyAction};
use crate::state::{AppOptions, AppState, DeckError, SwipeDirection};
use constants::{FRAME_INTERVAL_MS, PX_PER_COLUMN, PX_PER_ROW};
use crossterm::{
    event::{self, Event, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};
use std::io::{self, Stdout};
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur during TUI operations
#[derive(Debug, Error)]
pub enum TuiError {
    /// IO error during terminal operations
    #[error("Terminal IO error: {0}")]
    Io(#[from] io::Error),

    /// The song list could not form a deck
    #[error("Invalid deck: {0}")]
    Deck(#[from] DeckError),

    /// The song list contains an invalid id
    #[error("Invalid song: {0}")]
    Song(#[from] InvalidSongId),

    /// The audio base address is not a URL
    #[error("Invalid audio address: {0}")]
    AudioUrl(#[from] url::ParseError),
}

/// What the pointer grabbed on mouse down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum PointerCapture {
    #[default]
    None,
    Card,
    Volume,
}

/// Main TUI application
///
/// Generic over backend to support testing with TestBackend
pub struct TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    terminal: Terminal<B>,
    app_state: AppState,
    key_bindings: KeyBindings,
    styles: CardStyles,
    capture: PointerCapture,
    /// Last rendered layout (for mouse hit testing)
    last_layout: Option<ScreenLayout>,
}

impl TuiApp<CrosstermBackend<Stdout>> {
    /// Create and initialize a new TUI application
    ///
    /// Sets up terminal in raw mode with alternate screen and mouse capture
    pub fn new(app_state: AppState, styles: CardStyles) -> Result<Self, TuiError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        stdout.execute(crossterm::event::EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        Ok(Self {
            terminal,
            app_state,
            key_bindings: KeyBindings::default(),
            styles,
            capture: PointerCapture::None,
            last_layout: None,
        })
    }

    /// Run the main event loop
    ///
    /// Returns when user quits. Springs, marquees and timers advance on
    /// every frame, so the loop redraws at a steady rate.
    pub fn run(&mut self) -> Result<(), TuiError> {
        const FRAME_INTERVAL: Duration = Duration::from_millis(FRAME_INTERVAL_MS);

        self.draw(Instant::now())?;

        loop {
            if event::poll(FRAME_INTERVAL)? {
                let now = Instant::now();
                match event::read()? {
                    Event::Key(key) if key.kind != KeyEventKind::Release => {
                        if self.handle_key(key, now) {
                            return Ok(());
                        }
                    }
                    Event::Mouse(mouse) => self.handle_mouse(mouse, now),
                    Event::Resize(width, height) => {
                        debug!(width, height, "Terminal resized");
                        self.last_layout = None;
                    }
                    _ => {}
                }
            }

            let now = Instant::now();
            self.app_state.tick(now);
            self.draw(now)?;
        }
    }
}

impl<B> TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    /// Handle a single keyboard event
    ///
    /// Returns true if app should quit
    fn handle_key(&mut self, key: KeyEvent, now: Instant) -> bool {
        self.app_state.note_user_interaction();

        let Some(action) = self.key_bindings.get(key) else {
            debug!(?key, "Unbound key");
            return false;
        };

        match action {
            KeyAction::Quit => return true,
            KeyAction::VolumeUp => self.app_state.volume_up(),
            KeyAction::VolumeDown => self.app_state.volume_down(),
            KeyAction::ToggleMute => self.app_state.toggle_mute(),
            KeyAction::SwipeLeft => self.app_state.swipe(SwipeDirection::Left, now),
            KeyAction::SwipeRight => self.app_state.swipe(SwipeDirection::Right, now),
            KeyAction::TogglePlayback => self.app_state.toggle_playback(now),
            KeyAction::NextCompliment => self.app_state.next_compliment(now),
        }
        false
    }

    /// Handle a single mouse event
    ///
    /// Presses pick a target (mute icon, volume track, waveform, top card);
    /// drags and releases go to whatever the press captured.
    fn handle_mouse(&mut self, mouse: MouseEvent, now: Instant) {
        let layout = self.layout();
        let (column, row) = (mouse.column, mouse.row);
        let x_px = f64::from(column) * PX_PER_COLUMN;
        let y_px = f64::from(row) * PX_PER_ROW;
        let offset = self.active_offset();

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.app_state.note_user_interaction();
                if layout::hit(layout.volume_icon, column, row) {
                    self.app_state.toggle_mute();
                } else if layout::hit(layout.volume_track, column, row) {
                    self.app_state.begin_volume_drag(y_px);
                    self.capture = PointerCapture::Volume;
                } else if layout::hit(layout.waveform_at(offset), column, row) {
                    self.app_state.toggle_playback(now);
                } else if layout::hit(layout.card_at(offset), column, row) {
                    self.app_state.press_card(x_px);
                    self.capture = PointerCapture::Card;
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => match self.capture {
                PointerCapture::Card => {
                    self.app_state.drag_card(x_px);
                }
                PointerCapture::Volume => {
                    let track_px = f64::from(layout.volume_track.height) * PX_PER_ROW;
                    self.app_state.drag_volume(y_px, track_px);
                }
                PointerCapture::None => {}
            },
            MouseEventKind::Up(MouseButton::Left) => {
                match self.capture {
                    PointerCapture::Card => {
                        self.app_state.release_card(x_px, now);
                    }
                    PointerCapture::Volume => self.app_state.end_volume_drag(),
                    PointerCapture::None => {}
                }
                self.capture = PointerCapture::None;
            }
            MouseEventKind::Moved => {
                let hovering = layout::hit(layout.waveform_at(offset), column, row);
                let was_hovering = self
                    .app_state
                    .active_card()
                    .is_some_and(|card| card.is_hovering());
                if hovering != was_hovering {
                    self.app_state.set_waveform_hover(hovering, now);
                }
            }
            MouseEventKind::ScrollUp if layout::hit(layout.volume_track, column, row) => {
                self.app_state.volume_up();
            }
            MouseEventKind::ScrollDown if layout::hit(layout.volume_track, column, row) => {
                self.app_state.volume_down();
            }
            _ => {}
        }
    }

    /// Horizontal offset of the top card, in pixels.
    fn active_offset(&self) -> f64 {
        let active = self.app_state.deck().active();
        self.app_state.card_pose(active).x
    }

    /// Layout of the last frame, or of the current terminal size.
    fn layout(&mut self) -> ScreenLayout {
        if let Some(layout) = self.last_layout {
            return layout;
        }
        let area = match self.terminal.size() {
            Ok(size) => Rect::new(0, 0, size.width, size.height),
            Err(_) => Rect::new(0, 0, 80, 24),
        };
        let layout = ScreenLayout::compute(area);
        self.last_layout = Some(layout);
        layout
    }

    /// Render the current frame
    fn draw(&mut self, now: Instant) -> Result<(), TuiError> {
        let size = self.terminal.size()?;
        let layout = ScreenLayout::compute(Rect::new(0, 0, size.width, size.height));
        self.last_layout = Some(layout);

        self.terminal.draw(|frame| {
            layout::render_layout(frame, &layout, &self.app_state, &self.styles, now);
        })?;

        Ok(())
    }
}

// ===== Test Helpers =====
//
// The following methods are ONLY for testing within the crate.

#[cfg(test)]
#[allow(dead_code)] // Not all helpers used in every test
impl<B> TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    /// Create TuiApp for testing without terminal initialization.
    pub(crate) fn new_for_test(
        terminal: Terminal<B>,
        app_state: AppState,
        key_bindings: KeyBindings,
        styles: CardStyles,
    ) -> Self {
        Self {
            terminal,
            app_state,
            key_bindings,
            styles,
            capture: PointerCapture::None,
            last_layout: None,
        }
    }

    pub(crate) fn app_state(&self) -> &AppState {
        &self.app_state
    }

    pub(crate) fn app_state_mut(&mut self) -> &mut AppState {
        &mut self.app_state
    }

    pub(crate) fn handle_key_test(&mut self, key: KeyEvent, now: Instant) -> bool {
        self.handle_key(key, now)
    }

    pub(crate) fn handle_mouse_test(&mut self, mouse: MouseEvent, now: Instant) {
        self.handle_mouse(mouse, now)
    }

    pub(crate) fn render_test(&mut self, now: Instant) -> Result<(), TuiError> {
        self.draw(now)
    }

    pub(crate) fn current_layout(&mut self) -> ScreenLayout {
        self.layout()
    }

    pub(crate) fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }
}

/// Startup settings for the TUI, resolved by `main` from the config chain.
#[derive(Debug, Clone)]
pub struct CliArgs {
    /// Base address of the audio endpoint.
    pub audio_base_url: String,
    /// Allow audible playback before the first interaction.
    pub autoplay: bool,
    /// Disable colors (`--no-color`).
    pub no_color: bool,
    /// State options (volume, mute, footer timing).
    pub options: AppOptions,
}

impl CliArgs {
    /// Create new CliArgs.
    pub fn new(audio_base_url: String, autoplay: bool, no_color: bool, options: AppOptions) -> Self {
        Self {
            audio_base_url,
            autoplay,
            no_color,
            options,
        }
    }
}

/// Build the card state from the built-in catalog.
///
/// Validation happens here, before the terminal is touched.
pub fn build_state(args: &CliArgs, now: Instant) -> Result<(AppState, AudioSource), TuiError> {
    let source = AudioSource::new(&args.audio_base_url)?;
    let songs = catalog::songs()?;
    let audio = Box::new(HeadlessAudio::new(args.autoplay));
    let state = AppState::new(songs, args.options.clone(), audio, now)?;
    Ok((state, source))
}

/// Initialize and run the card.
///
/// Handles terminal setup, runs the event loop, and ensures cleanup on
/// exit. Logging must be initialized by the caller.
pub fn run(args: CliArgs) -> Result<(), TuiError> {
    let (mut state, source) = build_state(&args, Instant::now())?;
    state.mount(&source, Instant::now());
    info!(endpoint = %args.audio_base_url, "Starting card");

    let styles = CardStyles::with_color_config(ColorConfig::from_env_and_args(args.no_color));
    let mut app = TuiApp::new(state, styles)?;

    // Run the app and ensure cleanup happens even on error
    let result = app.run();
    app.app_state.unmount();

    restore_terminal()?;

    result
}

/// Restore terminal to normal state
///
/// Disables raw mode, mouse capture, and leaves alternate screen
fn restore_terminal() -> Result<(), TuiError> {
    disable_raw_mode()?;
    io::stdout().execute(crossterm::event::DisableMouseCapture)?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}
