// SPDX-FileCopyrightText: The djio authors
// SPDX-License-Identifier: MPL-2.0

use std::collections::HashMap;

use super::{control_of, Deck, JogSurface, Knob, Sensor};
use crate::{
    input::StepEncoderInput, u7_be_to_u14, BrowseEvent, ButtonEvent, CenterSliderInput, Event,
    JogEvent, JogTouchEvent, KnobEvent, MidiMessage, PadEvent, SliderInput, TabEvent,
};


const MIDI_JOG_CW: u8 = 0x41;
const MIDI_JOG_CCW: u8 = 0x3f;

/// Stateful decoder of input messages.
///
/// The coarse half (MSB) of a 14-bit control is staged until the
/// matching fine half (LSB) arrives. Only the LSB emits an event.
#[derive(Debug, Default)]
pub struct MidiInputDecoder {
    /// Staged MSB values, keyed by (channel, MSB controller number)
    pending_msb: HashMap<(u8, u8), u8>,
    unrecognized_count: u64,
}

impl MidiInputDecoder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and decode raw input bytes.
    pub fn decode_midi_input(&mut self, input: &[u8]) -> Option<Event> {
        let Some(message) = MidiMessage::try_from_bytes(input) else {
            self.unrecognized_count = self.unrecognized_count.saturating_add(1);
            log::trace!("Unrecognized MIDI input: {input:x?}");
            return None;
        };
        self.decode(message)
    }

    /// Decode a message.
    ///
    /// Returns `None` for unrecognized messages, for the MSB of 14-bit
    /// controls, and for values that carry no information.
    pub fn decode(&mut self, message: MidiMessage) -> Option<Event> {
        let Some((_, sensor)) = control_of(message) else {
            self.unrecognized_count = self.unrecognized_count.saturating_add(1);
            log::trace!("Unrecognized MIDI message: {message:?}");
            return None;
        };
        let MidiMessage { channel, data2, .. } = message;
        let event = match sensor {
            Sensor::Pad { deck, pad } => PadEvent {
                deck,
                pad,
                pressed: data2 != 0,
                velocity: data2,
            }
            .into(),
            Sensor::Tab { deck, tab } => TabEvent {
                deck,
                tab,
                pressed: data2 != 0,
            }
            .into(),
            Sensor::Button {
                button,
                deck,
                shifted,
            } => ButtonEvent {
                button,
                deck,
                shifted,
                pressed: data2 != 0,
            }
            .into(),
            Sensor::JogTouch { deck } => JogTouchEvent {
                deck,
                touched: data2 != 0,
            }
            .into(),
            Sensor::JogRotation { deck, surface } => {
                // The TRIM LSB shares its address with the top surface.
                // It is only sent after the corresponding MSB.
                if surface == JogSurface::Top {
                    if let Some(msb) = self.pending_msb.remove(&(channel, Knob::Trim.midi_cc())) {
                        let event = knob_event(Knob::Trim, Some(deck), u7_be_to_u14(msb, data2));
                        log::debug!("Decoded {event:?}");
                        return Some(event.into());
                    }
                }
                let direction = match data2 {
                    MIDI_JOG_CW => 1,
                    MIDI_JOG_CCW => -1,
                    _ => {
                        log::trace!("Ignoring jog value {data2} of {message:?}");
                        return None;
                    }
                };
                JogEvent {
                    deck,
                    surface,
                    direction,
                }
                .into()
            }
            Sensor::KnobMsb { knob, .. } => {
                if let Some(replaced) = self.pending_msb.insert((channel, knob.midi_cc()), data2) {
                    log::trace!("Replacing pending MSB {replaced} of {knob} with {data2}");
                }
                return None;
            }
            Sensor::KnobLsb { knob, deck } => {
                let msb = self
                    .pending_msb
                    .remove(&(channel, knob.midi_cc()))
                    .unwrap_or(0);
                knob_event(knob, deck, u7_be_to_u14(msb, data2)).into()
            }
            Sensor::Knob { knob } => KnobEvent {
                knob,
                deck: None,
                value: SliderInput::from_u7(data2).position,
                raw: data2.into(),
            }
            .into(),
            Sensor::BrowseRotation { shifted } => {
                let StepEncoderInput { delta } = StepEncoderInput::from_u7(data2)?;
                BrowseEvent {
                    steps: delta,
                    shifted,
                }
                .into()
            }
        };
        log::debug!("Decoded {event:?}");
        Some(event)
    }

    /// The staged MSB of a 14-bit control, if any.
    #[must_use]
    pub fn pending_msb(&self, knob: Knob, deck: Option<Deck>) -> Option<u8> {
        let channel = knob.midi_channel(deck)?;
        self.pending_msb.get(&(channel, knob.midi_cc())).copied()
    }

    #[must_use]
    pub fn has_pending_msb(&self) -> bool {
        !self.pending_msb.is_empty()
    }

    /// Number of messages that did not match any control.
    #[must_use]
    pub const fn unrecognized_count(&self) -> u64 {
        self.unrecognized_count
    }

    /// Discard all staged MSB values.
    pub fn reset(&mut self) {
        self.pending_msb.clear();
    }
}

fn knob_event(knob: Knob, deck: Option<Deck>, raw: u16) -> KnobEvent {
    let value = if knob.is_centered() {
        CenterSliderInput::from_u14(raw).position
    } else {
        SliderInput::from_u14(raw).position
    };
    KnobEvent {
        knob,
        deck,
        value,
        raw,
    }
}
