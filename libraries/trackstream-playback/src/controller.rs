//! Playback controller - core orchestration
//!
//! Holds the authoritative playback state: the last-known ordered track list,
//! the current index within it, the transport state, and the single audio
//! output handle. Everything else in the system only publishes intents onto
//! the bus; this is the one place they are turned into output commands.

use crate::bus::PlaybackBus;
use crate::events::PlaybackEvent;
use crate::output::{AudioOutput, OutputFactory, OutputSignal};
use crate::types::{NavDirection, PlayerConfig, TrackListUpdate, TransportState};
use std::time::Instant;
use tracing::{debug, error, warn};
use trackstream_core::{Track, TrackId};

/// Central playback management
///
/// State machine: `Idle` → `Loading` → `Playing` ⇄ `Paused` → (natural end)
/// → `Idle`. `Loading` only becomes `Playing` after the output confirms it
/// has enough data and starts successfully; a failed start falls back to
/// `Idle` and is reported, never thrown across the public API.
///
/// Starting a resource is asynchronous, so every load mints a new generation
/// and confirmations carrying a stale generation are discarded: the newest
/// selection always wins.
pub struct PlaybackController {
    bus: PlaybackBus,
    factory: Box<dyn OutputFactory>,
    config: PlayerConfig,

    // Snapshot
    all_tracks: Vec<Track>,
    current_index: isize,
    state: TransportState,

    // Current track metadata, shown even when no resource URL exists
    track_url: String,
    track_title: String,
    track_artist: String,
    current_id: Option<TrackId>,
    player_visible: bool,

    // The single output handle and its selection generation
    output: Option<Box<dyn AudioOutput>>,
    generation: u64,
    volume: u8,

    // Transient visual marker for a pressed navigation button
    nav_flash: Option<(NavDirection, Instant)>,

    // Event queue for UI synchronization
    pending_events: Vec<PlaybackEvent>,
}

impl PlaybackController {
    /// Create a new controller.
    ///
    /// The controller publishes navigation updates onto `bus`; subscribing it
    /// to the bus is the job of [`FooterPlayer::attach`].
    ///
    /// [`FooterPlayer::attach`]: crate::FooterPlayer::attach
    pub fn new(bus: PlaybackBus, factory: Box<dyn OutputFactory>, config: PlayerConfig) -> Self {
        let volume = config.volume.min(100);
        Self {
            bus,
            factory,
            config,
            all_tracks: Vec::new(),
            current_index: -1,
            state: TransportState::Idle,
            track_url: String::new(),
            track_title: String::new(),
            track_artist: String::new(),
            current_id: None,
            player_visible: false,
            output: None,
            generation: 0,
            volume,
            nav_flash: None,
            pending_events: Vec::new(),
        }
    }

    // ===== Playback Control =====

    /// Make `track` the current track and try to start it.
    ///
    /// The current index is recomputed by scanning the known list for the
    /// first element with an equal `id` (`-1` if absent or if the track has
    /// no id). If the track has a resource URL, loading begins; otherwise the
    /// player shows the metadata only and the transport stays idle.
    pub fn play_track_from_list(&mut self, track: &Track) {
        self.track_url = track.file_url.clone().unwrap_or_default();
        self.track_title = track.title.clone();
        self.track_artist = track.artist.clone();
        self.current_id = track.id;
        self.current_index = self.index_of(track.id);
        self.player_visible = true;

        self.pending_events.push(PlaybackEvent::TrackChanged {
            track_id: track.id,
            title: self.track_title.clone(),
            artist: self.track_artist.clone(),
        });

        if self.track_url.is_empty() {
            debug!(title = %self.track_title, "track has no audio resource, metadata only");
            self.release_output();
            self.set_state(TransportState::Idle);
        } else {
            self.begin_loading();
        }
    }

    /// Toggle play/pause for the current track.
    ///
    /// With no output yet this behaves like first-time initialization;
    /// before any track is selected it is a no-op.
    pub fn toggle_play_pause(&mut self) {
        if self.output.is_none() {
            if self.track_url.is_empty() {
                debug!("toggle with no track selected, nothing to do");
                return;
            }
            self.player_visible = true;
            self.begin_loading();
            return;
        }

        match self.state {
            TransportState::Playing => {
                let result = self.output.as_mut().map(|output| output.pause());
                match result {
                    Some(Ok(())) => self.set_state(TransportState::Paused),
                    Some(Err(e)) => self.report_error(format!("failed to pause playback: {e}")),
                    None => {}
                }
            }
            TransportState::Paused | TransportState::Idle => {
                let result = self.output.as_mut().map(|output| output.resume());
                match result {
                    Some(Ok(())) => self.set_state(TransportState::Playing),
                    Some(Err(e)) => {
                        self.report_error(format!("failed to resume playback: {e}"));
                        self.release_output();
                        self.set_state(TransportState::Idle);
                    }
                    None => {}
                }
            }
            // Confirmation still pending; the Ready signal will start it
            TransportState::Loading => {}
        }
    }

    /// Step to the previous track; silent no-op without a previous neighbor.
    pub fn play_previous(&mut self) {
        if !self.has_previous() {
            return;
        }
        self.navigate(NavDirection::Previous, self.current_index - 1);
    }

    /// Step to the next track; silent no-op without a next neighbor.
    pub fn play_next(&mut self) {
        if !self.has_next() {
            return;
        }
        self.navigate(NavDirection::Next, self.current_index + 1);
    }

    fn navigate(&mut self, direction: NavDirection, index: isize) {
        // List broadcasts are applied verbatim, so the stored index may point
        // outside the list. A neighbor that does not exist is a silent no-op.
        let Some(target) = usize::try_from(index)
            .ok()
            .and_then(|i| self.all_tracks.get(i))
            .cloned()
        else {
            return;
        };

        self.nav_flash = Some((direction, Instant::now()));
        self.current_index = index;
        self.play_track_from_list(&target);

        // Re-broadcast so every other subscriber converges to the same
        // track and index. Our own subscriptions skip these: the change is
        // already applied locally.
        self.bus.request_play(&target);
        self.bus.publish_list(&self.all_tracks, self.current_index);
    }

    /// Stop and release the output. Idempotent.
    pub fn close(&mut self) {
        self.release_output();
        self.player_visible = false;
        self.nav_flash = None;
        self.set_state(TransportState::Idle);
    }

    /// Seek within the current track
    pub fn seek(&mut self, position: std::time::Duration) {
        let result = self.output.as_mut().map(|output| output.seek(position));
        if let Some(Err(e)) = result {
            self.report_error(format!("failed to seek: {e}"));
        }
    }

    /// Set volume (0-100)
    pub fn set_volume(&mut self, level: u8) {
        self.volume = level.min(100);
        if let Some(output) = self.output.as_mut() {
            output.set_volume(f32::from(self.volume) / 100.0);
        }
    }

    /// Get current volume level (0-100)
    pub fn volume(&self) -> u8 {
        self.volume
    }

    // ===== Reactive Bindings =====

    /// React to an asynchronous signal from the audio output.
    ///
    /// Signals whose generation does not match the current selection are
    /// stale (the user already picked a different track) and are discarded.
    pub fn handle_output_signal(&mut self, signal: &OutputSignal) {
        if signal.generation() != self.generation {
            debug!(
                signal_generation = signal.generation(),
                current_generation = self.generation,
                "discarding stale output signal"
            );
            return;
        }

        match signal {
            OutputSignal::Ready { .. } => {
                if self.state != TransportState::Loading {
                    return;
                }
                let result = self.output.as_mut().map(|output| output.start());
                match result {
                    Some(Ok(())) => self.set_state(TransportState::Playing),
                    Some(Err(e)) => {
                        self.report_error(format!("failed to start playback: {e}"));
                        self.release_output();
                        self.set_state(TransportState::Idle);
                    }
                    None => {}
                }
            }
            OutputSignal::Ended { .. } => {
                self.pending_events.push(PlaybackEvent::TrackFinished);
                self.set_state(TransportState::Idle);
            }
            OutputSignal::Failed { message, .. } => {
                self.report_error(format!("audio resource failed: {message}"));
                self.release_output();
                self.set_state(TransportState::Idle);
            }
        }
    }

    /// Replace the known list and index verbatim from a list broadcast.
    ///
    /// No validation against the currently playing track: the two may
    /// transiently disagree until the next play or navigation event.
    pub fn apply_list_update(&mut self, update: &TrackListUpdate) {
        self.all_tracks.clone_from(&update.tracks);
        self.current_index = update.current_index;
    }

    // ===== State Queries =====

    /// Whether a previous track exists
    pub fn has_previous(&self) -> bool {
        self.current_index > 0 && !self.all_tracks.is_empty()
    }

    /// Whether a next track exists
    pub fn has_next(&self) -> bool {
        !self.all_tracks.is_empty() && self.current_index < self.all_tracks.len() as isize - 1
    }

    /// Current transport state
    pub fn transport_state(&self) -> TransportState {
        self.state
    }

    /// Index of the current track in the known list, `-1` if not in it
    pub fn current_index(&self) -> isize {
        self.current_index
    }

    /// The last-known ordered track list
    pub fn all_tracks(&self) -> &[Track] {
        &self.all_tracks
    }

    /// Resource URL of the current track, empty if it has none
    pub fn track_url(&self) -> &str {
        &self.track_url
    }

    /// Title of the current track
    pub fn track_title(&self) -> &str {
        &self.track_title
    }

    /// Artist of the current track
    pub fn track_artist(&self) -> &str {
        &self.track_artist
    }

    /// Id of the current track, if it has one
    pub fn current_track_id(&self) -> Option<TrackId> {
        self.current_id
    }

    /// Whether the footer player region is shown
    pub fn is_player_visible(&self) -> bool {
        self.player_visible
    }

    /// The navigation button currently flashed, if the press was recent
    pub fn active_nav(&self) -> Option<NavDirection> {
        self.nav_flash
            .and_then(|(direction, at)| (at.elapsed() < self.config.nav_flash).then_some(direction))
    }

    /// Drain accumulated events for the UI
    pub fn take_events(&mut self) -> Vec<PlaybackEvent> {
        std::mem::take(&mut self.pending_events)
    }

    // ===== Internal =====

    fn index_of(&self, id: Option<TrackId>) -> isize {
        match id {
            Some(id) => self
                .all_tracks
                .iter()
                .position(|t| t.id == Some(id))
                .map_or(-1, |i| i as isize),
            None => -1,
        }
    }

    fn begin_loading(&mut self) {
        self.generation += 1;
        self.release_output();
        self.set_state(TransportState::Loading);

        debug!(url = %self.track_url, generation = self.generation, "opening audio resource");
        match self.factory.open(&self.track_url, self.generation) {
            Ok(mut output) => {
                output.set_volume(f32::from(self.volume) / 100.0);
                self.output = Some(output);
            }
            Err(e) => {
                self.report_error(format!(
                    "failed to load audio resource {}: {e}",
                    self.track_url
                ));
                self.set_state(TransportState::Idle);
            }
        }
    }

    fn release_output(&mut self) {
        if let Some(mut output) = self.output.take() {
            output.stop();
        }
    }

    fn set_state(&mut self, state: TransportState) {
        if self.state != state {
            self.state = state;
            self.pending_events
                .push(PlaybackEvent::StateChanged { state });
        }
    }

    fn report_error(&mut self, message: String) {
        error!(%message, "playback failure");
        self.pending_events.push(PlaybackEvent::Error { message });
    }
}

impl Drop for PlaybackController {
    fn drop(&mut self) {
        if self.output.is_some() {
            warn!("playback controller dropped with a live output, releasing");
            self.release_output();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::time::Duration;

    #[derive(Default)]
    struct Script {
        opened: Vec<(String, u64)>,
        started: u32,
        paused: u32,
        resumed: u32,
        stopped: u32,
        fail_start: bool,
        fail_open: bool,
    }

    struct ScriptedOutput {
        script: Rc<RefCell<Script>>,
    }

    impl AudioOutput for ScriptedOutput {
        fn start(&mut self) -> crate::Result<()> {
            let mut script = self.script.borrow_mut();
            if script.fail_start {
                return Err(crate::PlaybackError::Output("start rejected".into()));
            }
            script.started += 1;
            Ok(())
        }

        fn pause(&mut self) -> crate::Result<()> {
            self.script.borrow_mut().paused += 1;
            Ok(())
        }

        fn resume(&mut self) -> crate::Result<()> {
            self.script.borrow_mut().resumed += 1;
            Ok(())
        }

        fn stop(&mut self) {
            self.script.borrow_mut().stopped += 1;
        }

        fn seek(&mut self, _position: Duration) -> crate::Result<()> {
            Ok(())
        }

        fn set_volume(&mut self, _volume: f32) {}

        fn position(&self) -> Duration {
            Duration::ZERO
        }
    }

    struct ScriptedFactory {
        script: Rc<RefCell<Script>>,
    }

    impl OutputFactory for ScriptedFactory {
        fn open(&mut self, url: &str, generation: u64) -> crate::Result<Box<dyn AudioOutput>> {
            let mut script = self.script.borrow_mut();
            if script.fail_open {
                return Err(crate::PlaybackError::ResourceUnavailable(url.to_string()));
            }
            script.opened.push((url.to_string(), generation));
            drop(script);
            Ok(Box::new(ScriptedOutput {
                script: Rc::clone(&self.script),
            }))
        }
    }

    fn controller() -> (PlaybackController, Rc<RefCell<Script>>) {
        let script = Rc::new(RefCell::new(Script::default()));
        let factory = ScriptedFactory {
            script: Rc::clone(&script),
        };
        let controller = PlaybackController::new(
            PlaybackBus::new(),
            Box::new(factory),
            PlayerConfig::default(),
        );
        (controller, script)
    }

    fn track(id: i64, title: &str) -> Track {
        Track::new(title, "Artist", "pop")
            .with_id(TrackId::new(id))
            .with_file_url(format!("http://example.com/{id}.mp3"))
    }

    #[test]
    fn loading_becomes_playing_only_after_ready() {
        let (mut player, script) = controller();
        player.play_track_from_list(&track(1, "Song"));

        assert_eq!(player.transport_state(), TransportState::Loading);
        assert_eq!(script.borrow().started, 0);

        player.handle_output_signal(&OutputSignal::Ready { generation: 1 });
        assert_eq!(player.transport_state(), TransportState::Playing);
        assert_eq!(script.borrow().started, 1);
    }

    #[test]
    fn stale_ready_is_discarded() {
        let (mut player, script) = controller();
        player.play_track_from_list(&track(1, "First"));
        player.play_track_from_list(&track(2, "Second"));

        // Confirmation for the abandoned first selection
        player.handle_output_signal(&OutputSignal::Ready { generation: 1 });
        assert_eq!(player.transport_state(), TransportState::Loading);
        assert_eq!(script.borrow().started, 0);

        player.handle_output_signal(&OutputSignal::Ready { generation: 2 });
        assert_eq!(player.transport_state(), TransportState::Playing);
    }

    #[test]
    fn failed_start_falls_back_to_idle_and_reports() {
        let (mut player, script) = controller();
        player.play_track_from_list(&track(1, "Song"));
        script.borrow_mut().fail_start = true;

        player.handle_output_signal(&OutputSignal::Ready { generation: 1 });
        assert_eq!(player.transport_state(), TransportState::Idle);
        assert!(player
            .take_events()
            .iter()
            .any(|e| matches!(e, PlaybackEvent::Error { .. })));
        // Metadata stays displayed
        assert_eq!(player.track_title(), "Song");
        assert!(player.is_player_visible());
    }

    #[test]
    fn open_failure_is_reported_not_thrown() {
        let (mut player, script) = controller();
        script.borrow_mut().fail_open = true;

        player.play_track_from_list(&track(1, "Song"));
        assert_eq!(player.transport_state(), TransportState::Idle);
        assert!(player
            .take_events()
            .iter()
            .any(|e| matches!(e, PlaybackEvent::Error { .. })));
    }

    #[test]
    fn toggle_before_any_selection_is_noop() {
        let (mut player, script) = controller();
        player.toggle_play_pause();
        assert_eq!(player.transport_state(), TransportState::Idle);
        assert!(script.borrow().opened.is_empty());
    }

    #[test]
    fn toggle_flips_playing_and_paused() {
        let (mut player, script) = controller();
        player.play_track_from_list(&track(1, "Song"));
        player.handle_output_signal(&OutputSignal::Ready { generation: 1 });

        player.toggle_play_pause();
        assert_eq!(player.transport_state(), TransportState::Paused);
        player.toggle_play_pause();
        assert_eq!(player.transport_state(), TransportState::Playing);

        let script = script.borrow();
        assert_eq!(script.paused, 1);
        assert_eq!(script.resumed, 1);
    }

    #[test]
    fn natural_end_goes_idle_then_toggle_resumes() {
        let (mut player, script) = controller();
        player.play_track_from_list(&track(1, "Song"));
        player.handle_output_signal(&OutputSignal::Ready { generation: 1 });
        player.handle_output_signal(&OutputSignal::Ended { generation: 1 });

        assert_eq!(player.transport_state(), TransportState::Idle);
        assert!(player
            .take_events()
            .contains(&PlaybackEvent::TrackFinished));

        // The output still exists, so toggling resumes rather than reloading
        player.toggle_play_pause();
        assert_eq!(player.transport_state(), TransportState::Playing);
        assert_eq!(script.borrow().resumed, 1);
    }

    #[test]
    fn close_is_idempotent() {
        let (mut player, script) = controller();
        player.play_track_from_list(&track(1, "Song"));
        player.handle_output_signal(&OutputSignal::Ready { generation: 1 });

        player.close();
        let after_first = (
            player.transport_state(),
            player.is_player_visible(),
            script.borrow().stopped,
        );
        player.close();
        let after_second = (
            player.transport_state(),
            player.is_player_visible(),
            script.borrow().stopped,
        );

        assert_eq!(after_first, (TransportState::Idle, false, 1));
        assert_eq!(after_second, after_first);
    }

    #[test]
    fn track_without_url_shows_metadata_without_output() {
        let (mut player, script) = controller();
        let bare = Track::new("No File", "Artist", "other").with_id(TrackId::new(9));

        player.play_track_from_list(&bare);
        assert!(player.is_player_visible());
        assert_eq!(player.track_title(), "No File");
        assert_eq!(player.transport_state(), TransportState::Idle);
        assert!(script.borrow().opened.is_empty());

        // Subsequent toggle stays a no-op
        player.toggle_play_pause();
        assert!(script.borrow().opened.is_empty());
    }

    #[test]
    fn index_is_first_id_match_or_minus_one() {
        let (mut player, _script) = controller();
        let tracks = vec![
            track(1, "A"),
            track(2, "B"),
            track(2, "B again"),
            track(3, "C"),
        ];
        player.apply_list_update(&TrackListUpdate {
            tracks: tracks.clone(),
            current_index: -1,
        });

        // Duplicate id: the first match wins
        player.play_track_from_list(&tracks[2]);
        assert_eq!(player.current_index(), 1);

        // Unknown id resolves to -1, metadata still set
        player.play_track_from_list(&track(42, "Elsewhere"));
        assert_eq!(player.current_index(), -1);
        assert_eq!(player.track_title(), "Elsewhere");
    }

    #[test]
    fn navigation_with_out_of_range_published_index_is_noop() {
        let (mut player, script) = controller();
        let tracks = vec![track(1, "A"), track(2, "B")];

        // A published index past the end: "previous" points at nothing
        player.apply_list_update(&TrackListUpdate {
            tracks: tracks.clone(),
            current_index: 5,
        });
        player.play_previous();
        assert_eq!(player.current_index(), 5);
        assert!(script.borrow().opened.is_empty());
        assert!(player.active_nav().is_none());

        // A published index below -1: "next" resolves to -1, also nothing
        player.apply_list_update(&TrackListUpdate {
            tracks,
            current_index: -2,
        });
        player.play_next();
        assert_eq!(player.current_index(), -2);
        assert!(script.borrow().opened.is_empty());
    }

    #[test]
    fn selecting_new_track_releases_previous_output() {
        let (mut player, script) = controller();
        player.play_track_from_list(&track(1, "First"));
        player.play_track_from_list(&track(2, "Second"));

        let script = script.borrow();
        assert_eq!(script.stopped, 1);
        assert_eq!(script.opened.len(), 2);
        assert_eq!(script.opened[1].1, 2);
    }
}
