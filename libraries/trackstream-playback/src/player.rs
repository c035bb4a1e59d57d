//! Footer player region
//!
//! Wraps a [`PlaybackController`] and keeps it subscribed to both bus
//! channels for as long as the region is mounted. Dropping the player
//! releases the subscriptions and the audio output deterministically, so a
//! track never keeps playing after its owning region is gone.

use crate::bus::{PlaybackBus, Subscription};
use crate::controller::PlaybackController;
use crate::events::PlaybackEvent;
use crate::output::{OutputFactory, OutputSignal};
use crate::types::PlayerConfig;
use std::cell::{Ref, RefCell};
use std::rc::Rc;
use trackstream_core::Track;

/// The always-mounted footer region owning the playback controller.
pub struct FooterPlayer {
    inner: Rc<RefCell<PlaybackController>>,
    _subscriptions: [Subscription; 2],
}

impl FooterPlayer {
    /// Create the controller and subscribe it to both bus channels.
    ///
    /// Play broadcasts become [`PlaybackController::play_track_from_list`],
    /// list broadcasts become [`PlaybackController::apply_list_update`].
    /// Broadcasts that originate from the controller itself (prev/next
    /// re-publishing) arrive while it is still borrowed and are skipped;
    /// the change is already applied locally.
    pub fn attach(bus: &PlaybackBus, factory: Box<dyn OutputFactory>, config: PlayerConfig) -> Self {
        let inner = Rc::new(RefCell::new(PlaybackController::new(
            bus.clone(),
            factory,
            config,
        )));

        let play_target = Rc::downgrade(&inner);
        let play_sub = bus.subscribe_play(move |track: &Track| {
            if let Some(cell) = play_target.upgrade() {
                if let Ok(mut controller) = cell.try_borrow_mut() {
                    controller.play_track_from_list(track);
                }
            }
        });

        let list_target = Rc::downgrade(&inner);
        let list_sub = bus.subscribe_list(move |update| {
            if let Some(cell) = list_target.upgrade() {
                if let Ok(mut controller) = cell.try_borrow_mut() {
                    controller.apply_list_update(update);
                }
            }
        });

        Self {
            inner,
            _subscriptions: [play_sub, list_sub],
        }
    }

    /// Toggle play/pause on the controller
    pub fn toggle_play_pause(&self) {
        self.inner.borrow_mut().toggle_play_pause();
    }

    /// Previous-track button
    pub fn play_previous(&self) {
        self.inner.borrow_mut().play_previous();
    }

    /// Next-track button
    pub fn play_next(&self) {
        self.inner.borrow_mut().play_next();
    }

    /// Close the player and release the output
    pub fn close(&self) {
        self.inner.borrow_mut().close();
    }

    /// Forward an asynchronous output signal from the host
    pub fn handle_output_signal(&self, signal: &OutputSignal) {
        self.inner.borrow_mut().handle_output_signal(signal);
    }

    /// Drain accumulated playback events
    pub fn take_events(&self) -> Vec<PlaybackEvent> {
        self.inner.borrow_mut().take_events()
    }

    /// Read access to the controller state for rendering
    pub fn controller(&self) -> Ref<'_, PlaybackController> {
        self.inner.borrow()
    }
}

impl Drop for FooterPlayer {
    fn drop(&mut self) {
        // Unmount path: the output must not outlive the region
        self.inner.borrow_mut().close();
    }
}
