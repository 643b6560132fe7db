//! Root state container.
//!
//! Owns the deck, the gesture, the volume, the footer cycle, and the audio
//! backend. Widgets read it through shared borrows; every mutation goes
//! through a method here so derived state (poses, playback, waveforms) is
//! refreshed in one place.

use super::card::{self, ActiveTransition, CardPose, CardPresenter, CardRoles};
use super::compliments::{ComplimentRotator, DEFAULT_INTERVAL};
use super::deck::{DeckError, RankedDeck, SwipeDirection};
use super::gesture::{GestureInterpreter, Lean};
use super::marquee::Marquee;
use super::playback::{self, PlaybackStatus};
use super::volume::VolumeControl;
use super::waveform::{self, BarAnimation, WaveformMode, BAR_COUNT};
use crate::audio::{AudioBackend, AudioSource};
use crate::model::catalog::COMPLIMENTS;
use crate::model::{Song, SongId};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Marquee speed in pixel units per second.
pub const MARQUEE_SPEED_PX_PER_SEC: f64 = 20.0;

/// Pixel units covered by one terminal column.
pub const DEFAULT_PX_PER_COLUMN: f64 = 10.0;

/// Startup options.
#[derive(Debug, Clone, PartialEq)]
pub struct AppOptions {
    /// Initial volume in `[0, 1]`.
    pub volume: f64,
    /// Start muted.
    pub muted: bool,
    /// Time between footer messages.
    pub compliment_interval: Duration,
    /// Footer messages.
    pub compliments: Vec<String>,
    /// Pixel units per terminal column.
    pub px_per_column: f64,
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            volume: 0.5,
            muted: true,
            compliment_interval: DEFAULT_INTERVAL,
            compliments: COMPLIMENTS.iter().map(|s| s.to_string()).collect(),
            px_per_column: DEFAULT_PX_PER_COLUMN,
        }
    }
}

/// One card: song, animated pose, playback, waveform and marquees.
#[derive(Debug, Clone)]
pub struct CardState {
    song: Song,
    presenter: CardPresenter,
    playback: PlaybackStatus,
    hovering: bool,
    animating: bool,
    animations: Vec<BarAnimation>,
    animation_epoch: Instant,
    title: Marquee,
    artist: Marquee,
}

impl CardState {
    fn new(song: Song, columns_per_sec: f64, now: Instant) -> Self {
        let title = Marquee::new(song.title.clone(), columns_per_sec);
        let artist = Marquee::new(song.artist.clone(), columns_per_sec);
        Self {
            song,
            presenter: CardPresenter::new(),
            playback: PlaybackStatus::Stopped,
            hovering: false,
            animating: false,
            animations: Vec::new(),
            animation_epoch: now,
            title,
            artist,
        }
    }

    /// The song on this card.
    pub fn song(&self) -> &Song {
        &self.song
    }

    /// Song id.
    pub fn id(&self) -> &SongId {
        &self.song.id
    }

    /// Playback status.
    pub fn playback(&self) -> PlaybackStatus {
        self.playback
    }

    /// Whether the pointer rests on this card's waveform.
    pub fn is_hovering(&self) -> bool {
        self.hovering
    }

    /// Animated nudge pose (ignores any drag in progress).
    pub fn presenter_pose(&self) -> CardPose {
        self.presenter.pose()
    }

    /// Scrolling title.
    pub fn title(&self) -> &Marquee {
        &self.title
    }

    /// Scrolling artist line.
    pub fn artist(&self) -> &Marquee {
        &self.artist
    }

    /// Current bar animations (empty until first activation).
    pub fn animations(&self) -> &[BarAnimation] {
        &self.animations
    }
}

/// Complete UI state of the greeting card.
pub struct AppState {
    cards: Vec<CardState>,
    deck: RankedDeck,
    gesture: GestureInterpreter,
    drag_target: Option<SongId>,
    volume: VolumeControl,
    compliments: ComplimentRotator,
    audio: Box<dyn AudioBackend>,
    rng: StdRng,
    mounted_at: Instant,
    last_tick: Instant,
    mounted: bool,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("deck", &self.deck)
            .field("lean", &self.gesture.lean())
            .field("volume", &self.volume)
            .field("compliment", &self.compliments.index())
            .field("mounted", &self.mounted)
            .finish_non_exhaustive()
    }
}

impl AppState {
    /// Build the state for `songs` in stack order (last song on top).
    ///
    /// Nothing plays until [`mount`](Self::mount).
    ///
    /// # Errors
    ///
    /// Fails when `songs` is empty or repeats an id.
    pub fn new(
        songs: Vec<Song>,
        options: AppOptions,
        audio: Box<dyn AudioBackend>,
        now: Instant,
    ) -> Result<Self, DeckError> {
        let deck = RankedDeck::from_songs(&songs)?;
        let px_per_column = if options.px_per_column > 0.0 {
            options.px_per_column
        } else {
            DEFAULT_PX_PER_COLUMN
        };
        let columns_per_sec = MARQUEE_SPEED_PX_PER_SEC / px_per_column;
        let cards = songs
            .into_iter()
            .map(|song| CardState::new(song, columns_per_sec, now))
            .collect();

        Ok(Self {
            cards,
            deck,
            gesture: GestureInterpreter::new(),
            drag_target: None,
            volume: VolumeControl::new(options.volume, options.muted),
            compliments: ComplimentRotator::new(
                options.compliments,
                options.compliment_interval,
                now,
            ),
            audio,
            rng: StdRng::from_os_rng(),
            mounted_at: now,
            last_tick: now,
            mounted: false,
        })
    }

    /// Replace the waveform randomness (for reproducible output).
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    // ===== Lifecycle =====

    /// Attach audio streams, push volume, and start the top card.
    pub fn mount(&mut self, source: &AudioSource, now: Instant) {
        for card in &self.cards {
            self.audio.load(&card.song.id, source.stream_url(&card.song.id));
        }
        self.sync_audio_output();

        let active = self.deck.active().clone();
        if let Some(card) = self.cards.iter_mut().find(|c| c.song.id == active) {
            card.playback = playback::start(self.audio.as_mut(), &active);
        }

        self.mounted = true;
        self.mounted_at = now;
        self.last_tick = now;
        info!(cards = self.cards.len(), %active, "Card mounted");

        self.refresh_poses();
        self.refresh_waveforms(now);
    }

    /// Pause and rewind every card, and drop pending timers.
    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        for card in &mut self.cards {
            card.playback = playback::stop(self.audio.as_mut(), &card.song.id);
            card.animating = false;
        }
        self.gesture = GestureInterpreter::new();
        self.drag_target = None;
        self.volume.end_drag();
        self.mounted = false;
        info!("Card unmounted");
    }

    /// Whether [`mount`](Self::mount) ran and [`unmount`](Self::unmount) has not.
    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Advance every timer and animation to `now`.
    pub fn tick(&mut self, now: Instant) {
        let dt = now.saturating_duration_since(self.last_tick);
        self.last_tick = now;

        let was_dragging = self.gesture.is_dragging();
        self.gesture.tick(now, dt);
        if was_dragging && !self.gesture.is_dragging() {
            self.drag_target = None;
            self.refresh_poses();
        }

        for card in &mut self.cards {
            card.presenter.tick(dt);
        }

        if self.compliments.tick(now) {
            debug!(index = self.compliments.index(), "Compliment rotated");
        }

        self.audio.advance(dt);
    }

    // ===== Deck =====

    /// Commit a swipe: rotate the deck and run role transitions.
    pub fn swipe(&mut self, direction: SwipeDirection, now: Instant) {
        self.deck.apply(direction);
        debug!(
            ?direction,
            active = %self.deck.active(),
            "Deck rotated"
        );
        self.apply_transitions();
        self.refresh_poses();
        self.refresh_waveforms(now);
    }

    /// Pointer pressed on the top card.
    ///
    /// A card still springing back from an earlier release keeps the drag
    /// target until the new press actually moves.
    pub fn press_card(&mut self, pointer_x: f64) {
        self.gesture.press(pointer_x);
        if !self.gesture.is_dragging() {
            self.drag_target = Some(self.deck.active().clone());
        }
    }

    /// Pointer dragged while holding the top card.
    pub fn drag_card(&mut self, pointer_x: f64) -> Option<Lean> {
        let lean = self.gesture.pointer_move(pointer_x);
        if lean.is_some() {
            self.drag_target = Some(self.deck.active().clone());
            self.refresh_poses();
        }
        lean
    }

    /// Pointer released. Commits a swipe when past the threshold.
    pub fn release_card(&mut self, pointer_x: f64, now: Instant) -> Option<SwipeDirection> {
        let swipe = self.gesture.pointer_release(pointer_x, now);
        if !self.gesture.is_dragging() {
            self.drag_target = None;
        }
        self.refresh_poses();
        if let Some(direction) = swipe {
            self.swipe(direction, now);
        }
        swipe
    }

    // ===== Volume =====

    /// Arrow up.
    pub fn volume_up(&mut self) {
        self.volume.step_up();
        self.sync_audio_output();
    }

    /// Arrow down.
    pub fn volume_down(&mut self) {
        self.volume.step_down();
        self.sync_audio_output();
    }

    /// Click on the volume icon.
    pub fn toggle_mute(&mut self) {
        self.volume.toggle_mute();
        self.sync_audio_output();
    }

    /// Pointer pressed on the volume track.
    pub fn begin_volume_drag(&mut self, pointer_y: f64) {
        self.volume.begin_drag(pointer_y);
    }

    /// Pointer dragged along the volume track.
    pub fn drag_volume(&mut self, pointer_y: f64, track_height: f64) {
        self.volume.drag_to(pointer_y, track_height);
        self.sync_audio_output();
    }

    /// Pointer released from the volume track.
    pub fn end_volume_drag(&mut self) {
        self.volume.end_drag();
    }

    // ===== Playback =====

    /// Click on the top card's waveform: pause, or resume.
    pub fn toggle_playback(&mut self, now: Instant) {
        let active = self.deck.active().clone();
        if let Some(card) = self.cards.iter_mut().find(|c| c.song.id == active) {
            card.playback = playback::toggle(self.audio.as_mut(), &active, card.playback);
            debug!(%active, status = ?card.playback, "Playback toggled");
        }
        self.refresh_waveforms(now);
    }

    /// Any key press or click. Lifts the autoplay restriction without
    /// resuming a blocked card.
    pub fn note_user_interaction(&mut self) {
        self.audio.notify_user_activation();
    }

    /// Pointer entered or left the top card's waveform.
    pub fn set_waveform_hover(&mut self, hovering: bool, now: Instant) {
        let active = self.deck.active().clone();
        for card in &mut self.cards {
            card.hovering = hovering && card.song.id == active;
        }
        self.refresh_waveforms(now);
    }

    // ===== Footer =====

    /// Show the next compliment now.
    pub fn next_compliment(&mut self, now: Instant) {
        self.compliments.skip(now);
    }

    // ===== Read access =====

    /// The deck.
    pub fn deck(&self) -> &RankedDeck {
        &self.deck
    }

    /// The drag interpreter.
    pub fn gesture(&self) -> &GestureInterpreter {
        &self.gesture
    }

    /// Current lean.
    pub fn lean(&self) -> Lean {
        self.gesture.lean()
    }

    /// Volume state.
    pub fn volume(&self) -> &VolumeControl {
        &self.volume
    }

    /// Footer cycle.
    pub fn compliments(&self) -> &ComplimentRotator {
        &self.compliments
    }

    /// All cards in loaded order.
    pub fn cards(&self) -> &[CardState] {
        &self.cards
    }

    /// Card for `id`.
    pub fn card(&self, id: &SongId) -> Option<&CardState> {
        self.cards.iter().find(|c| &c.song.id == id)
    }

    /// Top card.
    pub fn active_card(&self) -> Option<&CardState> {
        self.card(self.deck.active())
    }

    /// Cards bottom to top, the order they should be drawn in.
    pub fn cards_in_z_order(&self) -> Vec<&CardState> {
        let mut ordered: Vec<(usize, &CardState)> = self
            .cards
            .iter()
            .filter_map(|c| self.deck.rank(&c.song.id).map(|rank| (rank, c)))
            .collect();
        ordered.sort_by_key(|(rank, _)| card::z_index(*rank));
        ordered.into_iter().map(|(_, c)| c).collect()
    }

    /// Roles of `id`, or no roles for an unknown id.
    pub fn roles(&self, id: &SongId) -> CardRoles {
        self.deck
            .rank(id)
            .map(|rank| card::roles(rank, self.deck.len()))
            .unwrap_or_default()
    }

    /// On-screen pose of `id`, including any drag in progress.
    pub fn card_pose(&self, id: &SongId) -> CardPose {
        let Some(card) = self.card(id) else {
            return CardPose::NEUTRAL;
        };
        let presenter = card.presenter.pose();
        if self.is_drag_target(id) && self.gesture.is_dragging() {
            CardPose {
                x: self.gesture.offset(),
                rotation: self.gesture.rotation(),
            }
        } else {
            presenter
        }
    }

    /// Waveform display mode of `id`.
    pub fn waveform_mode(&self, id: &SongId) -> WaveformMode {
        let Some(card) = self.card(id) else {
            return WaveformMode::Static;
        };
        waveform::waveform_mode(
            self.roles(id).active,
            card.playback.shows_paused(),
            card.hovering,
        )
    }

    /// Waveform bar heights of `id` at `now`.
    pub fn waveform_heights(&self, id: &SongId, now: Instant) -> [Option<f64>; BAR_COUNT] {
        let mode = self.waveform_mode(id);
        match self.card(id) {
            Some(card) => waveform::bar_heights(
                mode,
                &card.animations,
                now.saturating_duration_since(card.animation_epoch),
            ),
            None => waveform::bar_heights(WaveformMode::Static, &[], Duration::ZERO),
        }
    }

    /// Time since mount, the clock for marquees and the footer reveal.
    pub fn elapsed(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.mounted_at)
    }

    // ===== Internal =====

    fn is_drag_target(&self, id: &SongId) -> bool {
        self.drag_target.as_ref() == Some(id)
    }

    fn sync_audio_output(&mut self) {
        self.audio.set_volume(self.volume.level());
        self.audio.set_muted(self.volume.is_muted());
    }

    /// Start or stop playback for cards whose active role changed in the
    /// last rotation. Deactivations run first so two cards never overlap.
    fn apply_transitions(&mut self) {
        if !self.mounted {
            return;
        }
        let total = self.deck.len();
        let transitions: Vec<(usize, ActiveTransition)> = self
            .cards
            .iter()
            .enumerate()
            .map(|(i, c)| {
                let id = &c.song.id;
                (
                    i,
                    card::active_transition(
                        self.deck.previous_rank(id),
                        self.deck.rank(id),
                        total,
                    ),
                )
            })
            .collect();

        for (i, transition) in &transitions {
            if *transition == ActiveTransition::Deactivated {
                let card = &mut self.cards[*i];
                card.playback = playback::stop(self.audio.as_mut(), &card.song.id);
                card.hovering = false;
            }
        }
        for (i, transition) in &transitions {
            if *transition == ActiveTransition::Activated {
                let card = &mut self.cards[*i];
                card.playback = playback::start(self.audio.as_mut(), &card.song.id);
            }
        }
    }

    /// Re-target every card's pose from its roles, the lean and the drag.
    fn refresh_poses(&mut self) {
        let lean = self.gesture.lean();
        let gesture_dragging = self.gesture.is_dragging();
        let total = self.deck.len();
        for card in &mut self.cards {
            let Some(rank) = self.deck.rank(&card.song.id) else {
                continue;
            };
            let dragging = gesture_dragging && self.drag_target.as_ref() == Some(&card.song.id);
            card.presenter
                .update(card::roles(rank, total), lean, dragging);
        }
    }

    /// Regenerate bar animations for cards that just started animating.
    fn refresh_waveforms(&mut self, now: Instant) {
        let total = self.deck.len();
        for card in &mut self.cards {
            let active = self
                .deck
                .rank(&card.song.id)
                .is_some_and(|rank| card::roles(rank, total).active);
            let should_animate = active && !card.playback.shows_paused() && !card.hovering;
            if should_animate && !card.animating {
                card.animations = waveform::generate_animations(&mut self.rng, BAR_COUNT);
                card.animation_epoch = now;
            }
            card.animating = should_animate;
        }
    }
}

impl Drop for AppState {
    fn drop(&mut self) {
        self.unmount();
    }
}

#[cfg(test)]
#[path = "app_state_tests.rs"]
mod tests;
