//! Integration tests for the playback bus
//!
//! Verifies fan-out, ordering, and subscription lifecycle across
//! independently registered subscribers, the way multiple mounted regions
//! would use the bus.

use std::cell::RefCell;
use std::rc::Rc;
use trackstream_core::{Track, TrackId};
use trackstream_playback::{PlaybackBus, TrackListUpdate};

fn track(id: i64, title: &str) -> Track {
    Track::new(title, "Artist", "pop")
        .with_id(TrackId::new(id))
        .with_file_url(format!("http://example.com/{id}.mp3"))
}

#[test]
fn two_subscribers_observe_the_same_list_snapshot() {
    let bus = PlaybackBus::new();
    let first: Rc<RefCell<Vec<TrackListUpdate>>> = Rc::new(RefCell::new(Vec::new()));
    let second: Rc<RefCell<Vec<TrackListUpdate>>> = Rc::new(RefCell::new(Vec::new()));

    let target = Rc::clone(&first);
    let _a = bus.subscribe_list(move |update| target.borrow_mut().push(update.clone()));
    let target = Rc::clone(&second);
    let _b = bus.subscribe_list(move |update| target.borrow_mut().push(update.clone()));

    let tracks = vec![track(1, "A"), track(2, "B"), track(3, "C")];
    bus.publish_list(&tracks, 2);

    assert_eq!(first.borrow().len(), 1);
    assert_eq!(*first.borrow(), *second.borrow());
    assert_eq!(first.borrow()[0].tracks, tracks);
    assert_eq!(first.borrow()[0].current_index, 2);
}

#[test]
fn sequential_broadcasts_are_observed_in_publish_order() {
    let bus = PlaybackBus::new();
    let log: Rc<RefCell<Vec<String>>> = Rc::new(RefCell::new(Vec::new()));

    // Two footer-like regions, each listening on both channels
    let mut subs = Vec::new();
    for region in ["left", "right"] {
        let play_log = Rc::clone(&log);
        subs.push(bus.subscribe_play(move |t: &Track| {
            play_log.borrow_mut().push(format!("{region}: play {}", t.title));
        }));
        let list_log = Rc::clone(&log);
        subs.push(bus.subscribe_list(move |u: &TrackListUpdate| {
            list_log
                .borrow_mut()
                .push(format!("{region}: list {}", u.current_index));
        }));
    }

    // A publisher's play-then-list sequence must be observed in that order
    // by every subscriber
    let tracks = vec![track(1, "A"), track(2, "B")];
    bus.request_play(&tracks[1]);
    bus.publish_list(&tracks, 1);

    assert_eq!(
        *log.borrow(),
        vec![
            "left: play B",
            "right: play B",
            "left: list 1",
            "right: list 1",
        ]
    );
}

#[test]
fn unsubscribed_region_misses_later_broadcasts_only() {
    let bus = PlaybackBus::new();
    let seen = Rc::new(RefCell::new(0));

    let counter = Rc::clone(&seen);
    let sub = bus.subscribe_play(move |_| *counter.borrow_mut() += 1);

    bus.request_play(&track(1, "A"));
    sub.unsubscribe();
    bus.request_play(&track(2, "B"));

    assert_eq!(*seen.borrow(), 1);
}

#[test]
fn bus_handles_share_the_same_channels() {
    let bus = PlaybackBus::new();
    let clone = bus.clone();
    let seen = Rc::new(RefCell::new(0));

    let counter = Rc::clone(&seen);
    let _sub = bus.subscribe_play(move |_| *counter.borrow_mut() += 1);

    clone.request_play(&track(1, "A"));
    assert_eq!(*seen.borrow(), 1);
}
