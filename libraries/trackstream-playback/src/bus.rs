//! Playback bus
//!
//! Two independent notification channels decoupling "who decided to play a
//! track" from "who actually plays it": a play-intent channel carrying single
//! tracks and a list-snapshot channel carrying `(tracks, current_index)`
//! pairs.
//!
//! Delivery is synchronous, in subscription order, with no buffering: a new
//! subscriber only sees future broadcasts. A panic in one handler is caught
//! and logged so the remaining handlers still receive the broadcast.

use crate::types::TrackListUpdate;
use std::cell::RefCell;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::rc::{Rc, Weak};
use tracing::{debug, error};
use trackstream_core::Track;

type Handler<T> = Box<dyn FnMut(&T)>;

struct ChannelInner<T> {
    subscribers: Vec<(u64, Handler<T>)>,
    /// Ids unsubscribed while a broadcast had the subscriber list taken out
    removed: Vec<u64>,
    next_id: u64,
}

impl<T> Default for ChannelInner<T> {
    fn default() -> Self {
        Self {
            subscribers: Vec::new(),
            removed: Vec::new(),
            next_id: 0,
        }
    }
}

struct Channel<T> {
    inner: Rc<RefCell<ChannelInner<T>>>,
}

impl<T> Clone for Channel<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T> Default for Channel<T> {
    fn default() -> Self {
        Self {
            inner: Rc::new(RefCell::new(ChannelInner::default())),
        }
    }
}

impl<T: 'static> Channel<T> {
    fn subscribe(&self, handler: impl FnMut(&T) + 'static) -> Subscription {
        let id = {
            let mut inner = self.inner.borrow_mut();
            let id = inner.next_id;
            inner.next_id += 1;
            inner.subscribers.push((id, Box::new(handler)));
            id
        };

        let target: Weak<RefCell<ChannelInner<T>>> = Rc::downgrade(&self.inner);
        Subscription {
            cancel: Some(Box::new(move || {
                if let Some(inner) = target.upgrade() {
                    let mut inner = inner.borrow_mut();
                    if let Some(pos) = inner.subscribers.iter().position(|(sid, _)| *sid == id) {
                        drop(inner.subscribers.remove(pos));
                    } else {
                        // Handler is currently taken out for delivery
                        inner.removed.push(id);
                    }
                }
            })),
        }
    }

    fn publish(&self, value: &T) {
        // The subscriber list is taken out for the duration of the broadcast
        // so handlers can subscribe or unsubscribe without re-entering the
        // borrow. Handlers added during delivery first see the next broadcast.
        let mut handlers = std::mem::take(&mut self.inner.borrow_mut().subscribers);

        for (id, handler) in &mut handlers {
            if self.inner.borrow().removed.contains(id) {
                continue;
            }
            if catch_unwind(AssertUnwindSafe(|| handler(value))).is_err() {
                error!(subscriber = *id, "playback bus handler panicked");
            }
        }

        let mut inner = self.inner.borrow_mut();
        let added = std::mem::take(&mut inner.subscribers);
        handlers.extend(added);
        let removed = std::mem::take(&mut inner.removed);
        handlers.retain(|(id, _)| !removed.contains(id));
        inner.subscribers = handlers;
    }

    #[cfg(test)]
    fn subscriber_count(&self) -> usize {
        self.inner.borrow().subscribers.len()
    }
}

/// Registration token returned by the subscribe operations.
///
/// The handler is invoked for every future broadcast on its channel until the
/// token is dropped or [`Subscription::unsubscribe`] is called.
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    /// Release the registration explicitly
    pub fn unsubscribe(mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

/// Publish/subscribe channel shared by all playback participants.
///
/// Handles are cheap clones of the same underlying channels; any number of
/// views publish onto the bus and any number of footer-like regions listen.
/// The bus holds no state beyond its two subscriber lists.
#[derive(Clone, Default)]
pub struct PlaybackBus {
    play: Channel<Track>,
    list: Channel<TrackListUpdate>,
}

impl PlaybackBus {
    /// Create a new bus with no subscribers
    pub fn new() -> Self {
        Self::default()
    }

    /// Broadcast a play intent to every play-channel subscriber.
    ///
    /// Succeeds unconditionally; listeners decide what "play" means.
    pub fn request_play(&self, track: &Track) {
        debug!(title = %track.title, "play requested");
        self.play.publish(track);
    }

    /// Broadcast a list snapshot to every list-channel subscriber.
    pub fn publish_list(&self, tracks: &[Track], current_index: isize) {
        debug!(tracks = tracks.len(), current_index, "list published");
        self.list.publish(&TrackListUpdate {
            tracks: tracks.to_vec(),
            current_index,
        });
    }

    /// Subscribe to play intents
    pub fn subscribe_play(&self, handler: impl FnMut(&Track) + 'static) -> Subscription {
        self.play.subscribe(handler)
    }

    /// Subscribe to list snapshots
    pub fn subscribe_list(&self, handler: impl FnMut(&TrackListUpdate) + 'static) -> Subscription {
        self.list.subscribe(handler)
    }
}
