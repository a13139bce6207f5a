// SPDX-FileCopyrightText: The djio authors
// SPDX-License-Identifier: MPL-2.0

use std::{sync::Arc, thread};

use float_cmp::assert_approx_eq;

use super::*;
use crate::{Button, JogEvent, JogSurface};

fn knob_event(knob: Knob, deck: Option<Deck>, value: f32) -> Event {
    KnobEvent {
        knob,
        deck,
        value,
        raw: 0,
    }
    .into()
}

fn button_event(button: Button, deck: Option<Deck>, shifted: bool, pressed: bool) -> Event {
    ButtonEvent {
        button,
        deck,
        shifted,
        pressed,
    }
    .into()
}

#[test]
fn absent_until_observed() {
    let store = ValueStore::new();
    assert_eq!(None, store.get(Knob::ChFader.into(), Some(Deck::One)));
    assert_eq!(None, store.get(Button::Cue.into(), Some(Deck::Two)));
    assert_eq!(None, store.get(Control::Pad(0), Some(Deck::One)));
}

#[test]
fn update_knob() {
    let store = ValueStore::new();
    assert!(store.update(&knob_event(Knob::ChFader, Some(Deck::One), 0.0)));
    assert!(!store.update(&knob_event(Knob::ChFader, Some(Deck::One), 0.0)));
    assert!(store.update(&knob_event(Knob::ChFader, Some(Deck::One), 0.5)));
    assert_approx_eq!(
        f32,
        0.5,
        store.get_f32(Knob::ChFader.into(), Some(Deck::One)).unwrap()
    );
    assert_eq!(None, store.get(Knob::ChFader.into(), Some(Deck::Two)));
    assert_eq!(None, store.get_bool(Knob::ChFader.into(), Some(Deck::One)));
}

#[test]
fn get_by_name() {
    let store = ValueStore::new();
    store.update(&knob_event(Knob::Crossfader, None, 0.25));
    assert_eq!(Some(Value::F32(0.25)), store.get_by_name("CROSSFADER", None));
    assert_eq!(None, store.get_by_name("CROSSFADER", Some(Deck::One)));
    assert_eq!(None, store.get_by_name("JOG", None));
    store.update(&button_event(Button::PlayPause, Some(Deck::Two), false, true));
    assert_eq!(
        Some(Value::Bool(true)),
        store.get_by_name("PLAY_PAUSE", Some(Deck::Two))
    );
}

#[test]
fn shifted_and_unshifted_buttons_share_a_slot() {
    let store = ValueStore::new();
    assert!(store.update(&button_event(Button::Cue, Some(Deck::One), true, true)));
    assert_eq!(Some(true), store.get_bool(Button::Cue.into(), Some(Deck::One)));
    assert!(store.update(&button_event(Button::Cue, Some(Deck::One), false, false)));
    assert_eq!(Some(false), store.get_bool(Button::Cue.into(), Some(Deck::One)));
    assert!(!store.update(&button_event(Button::Cue, Some(Deck::One), true, false)));
}

#[test]
fn pads() {
    let store = ValueStore::new();
    let event = PadEvent {
        deck: Deck::Two,
        pad: 5,
        pressed: true,
        velocity: 127,
    };
    assert!(store.update(&event.into()));
    assert_eq!(Some(true), store.get_bool(Control::Pad(5), Some(Deck::Two)));
    assert_eq!(None, store.get_bool(Control::Pad(5), Some(Deck::One)));
}

#[test]
fn events_without_values_are_ignored() {
    let store = ValueStore::new();
    let event = JogEvent {
        deck: Deck::One,
        surface: JogSurface::Side,
        direction: 1,
    };
    assert!(!store.update(&event.into()));
    assert_eq!(None, store.get(Control::Jog(JogSurface::Side), Some(Deck::One)));
}

#[test]
fn clear() {
    let store = ValueStore::new();
    store.update(&knob_event(Knob::Tempo, Some(Deck::One), -1.0));
    store.clear();
    assert_eq!(None, store.get(Knob::Tempo.into(), Some(Deck::One)));
    assert!(store.update(&knob_event(Knob::Tempo, Some(Deck::One), -1.0)));
}

#[test]
fn read_concurrently() {
    let store = Arc::new(ValueStore::new());
    store.update(&knob_event(Knob::MasterLevel, None, 1.0));
    let reader = {
        let store = Arc::clone(&store);
        thread::spawn(move || store.get_f32(Knob::MasterLevel.into(), None))
    };
    store.update(&knob_event(Knob::MasterLevel, None, 1.0));
    let value = reader.join().unwrap().unwrap();
    assert_approx_eq!(f32, 1.0, value);
}
