// SPDX-FileCopyrightText: The djio authors
// SPDX-License-Identifier: MPL-2.0

//! Last known values of controls
//!
//! Knobs store their normalized position, buttons and pads whether
//! they are currently pressed.

use std::collections::HashMap;

use enum_as_inner::EnumAsInner;
use float_cmp::approx_eq;
use strum::IntoEnumIterator as _;

use crate::{
    devices::pioneer_ddj_flx4::{button_addresses, NUM_PADS_PER_DECK},
    ButtonEvent, Control, Deck, Event, KnobEvent, Knob, PadEvent,
};

mod atomic;
use self::atomic::AtomicSlot;

#[cfg(test)]
mod tests;

#[derive(Debug, Clone, Copy, PartialEq, EnumAsInner, derive_more::From, derive_more::Display)]
pub enum Value {
    Bool(bool),
    F32(f32),
}

impl Value {
    #[must_use]
    pub fn to_bool(self) -> Option<bool> {
        self.as_bool().copied()
    }

    #[must_use]
    pub fn to_f32(self) -> Option<f32> {
        self.as_f32().copied()
    }
}

type SlotKey = (Control, Option<Deck>);

/// Lock-free store of the last known value of each control.
///
/// All slots are allocated upfront. Updates are supposed to be
/// applied by a single thread while values could be read
/// concurrently from any thread.
#[derive(Debug)]
pub struct ValueStore {
    slots: HashMap<SlotKey, AtomicSlot>,
}

impl ValueStore {
    #[must_use]
    pub fn new() -> Self {
        let mut slots = HashMap::new();
        for knob in Knob::iter() {
            if knob.is_deck_scoped() {
                for deck in Deck::iter() {
                    slots.insert((Control::Knob(knob), Some(deck)), AtomicSlot::new_f32());
                }
            } else {
                slots.insert((Control::Knob(knob), None), AtomicSlot::new_f32());
            }
        }
        // Shifted and unshifted variants share a slot
        for (button, deck, _, _) in button_addresses() {
            slots
                .entry((Control::Button(button), deck))
                .or_insert_with(AtomicSlot::new_bool);
        }
        for deck in Deck::iter() {
            for pad in 0..NUM_PADS_PER_DECK {
                slots.insert((Control::Pad(pad), Some(deck)), AtomicSlot::new_bool());
            }
        }
        Self { slots }
    }

    /// Store the value carried by an event.
    ///
    /// Returns `true` if the stored value has changed. Events without
    /// a value are ignored.
    pub fn update(&self, event: &Event) -> bool {
        let (key, value) = match *event {
            Event::Knob(KnobEvent {
                knob, deck, value, ..
            }) => ((Control::Knob(knob), deck), Value::F32(value)),
            Event::Button(ButtonEvent {
                button,
                deck,
                pressed,
                ..
            }) => ((Control::Button(button), deck), Value::Bool(pressed)),
            Event::Pad(PadEvent {
                deck, pad, pressed, ..
            }) => ((Control::Pad(pad), Some(deck)), Value::Bool(pressed)),
            Event::Tab(_)
            | Event::Jog(_)
            | Event::JogTouch(_)
            | Event::Browse(_) => return false,
        };
        let Some(slot) = self.slots.get(&key) else {
            log::warn!("No slot for {key:?}");
            return false;
        };
        let Some(previous) = slot.store(value) else {
            log::warn!("Mismatching value type {value:?} for {key:?}");
            return false;
        };
        match (previous, value) {
            (Some(Value::F32(previous)), Value::F32(value)) => {
                !approx_eq!(f32, previous, value, ulps = 1)
            }
            (Some(previous), value) => previous != value,
            (None, _) => true,
        }
    }

    /// The last known value of a control.
    ///
    /// Returns `None` if the control has not been observed yet or if
    /// there is no such control.
    #[must_use]
    pub fn get(&self, control: Control, deck: Option<Deck>) -> Option<Value> {
        self.slots.get(&(control, deck))?.load()
    }

    /// Look up a knob or button by name, e.g. `"CH_FADER"`.
    #[must_use]
    pub fn get_by_name(&self, name: &str, deck: Option<Deck>) -> Option<Value> {
        let control = Control::from_name(name)?;
        self.get(control, deck)
    }

    #[must_use]
    pub fn get_f32(&self, control: Control, deck: Option<Deck>) -> Option<f32> {
        self.get(control, deck).and_then(Value::to_f32)
    }

    #[must_use]
    pub fn get_bool(&self, control: Control, deck: Option<Deck>) -> Option<bool> {
        self.get(control, deck).and_then(Value::to_bool)
    }

    /// Forget all values.
    pub fn clear(&self) {
        for slot in self.slots.values() {
            slot.clear();
        }
    }
}

impl Default for ValueStore {
    fn default() -> Self {
        Self::new()
    }
}
