// SPDX-FileCopyrightText: The djio authors
// SPDX-License-Identifier: MPL-2.0

//! LED and level meter output.
//!
//! The encoding functions only produce messages. Sending them is up
//! to the caller or to [`LedOutput`].

use strum::{EnumCount as _, IntoEnumIterator as _};

use super::{
    address_of, button_addresses, Button, Control, Deck, PadMode, NUM_PADS_PER_DECK,
    NUM_TABS_PER_DECK,
};
use crate::{
    InvalidAddress, LedState, MidiMessage, MidiOutputConnection, OutputError, OutputResult,
};

#[cfg(test)]
mod tests;

const LEVEL_METER_MAX: u8 = 0x7f;

/// Pad LED state per deck and layer, one bitmap per pad mode.
///
/// Bit `n` of a bitmap is set if pad `n` is lit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedPlanes {
    pads: [[[u8; PadMode::COUNT]; 2]; Deck::COUNT],
}

impl LedPlanes {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            pads: [[[0; PadMode::COUNT]; 2]; Deck::COUNT],
        }
    }

    /// The bitmap of lit pads.
    #[must_use]
    pub const fn pads(&self, deck: Deck, shifted: bool, mode: PadMode) -> u8 {
        self.pads[deck.index()][shifted as usize][mode.index()]
    }

    #[must_use]
    pub const fn is_lit(&self, deck: Deck, shifted: bool, mode: PadMode, pad: u8) -> bool {
        pad < NUM_PADS_PER_DECK && self.pads(deck, shifted, mode) & (1 << pad) != 0
    }

    /// Check if no pad is lit.
    #[must_use]
    pub fn is_dark(&self) -> bool {
        self.pads.iter().flatten().flatten().all(|&bits| bits == 0)
    }

    pub fn clear(&mut self) {
        *self = Self::new();
    }

    fn set(&mut self, deck: Deck, shifted: bool, mode: PadMode, pad: u8, led: LedState) {
        debug_assert!(pad < NUM_PADS_PER_DECK);
        let bits = &mut self.pads[deck.index()][usize::from(shifted)][mode.index()];
        if led.is_on() {
            *bits |= 1 << pad;
        } else {
            *bits &= !(1 << pad);
        }
    }
}

impl Default for LedPlanes {
    fn default() -> Self {
        Self::new()
    }
}

/// Switch a single pad LED.
///
/// The message is produced even if the plane already shows the
/// requested state.
pub fn set_pad(
    planes: &mut LedPlanes,
    deck: Deck,
    pad: u8,
    led: LedState,
    mode: PadMode,
    shifted: bool,
) -> OutputResult<MidiMessage> {
    if pad >= NUM_PADS_PER_DECK {
        return Err(InvalidAddress {
            control: Control::Pad(pad),
            deck: Some(deck),
            shifted,
        }
        .into());
    }
    planes.set(deck, shifted, mode, pad, led);
    Ok(MidiMessage::note_on(
        deck.pad_midi_channel(shifted),
        mode.note_offset() + pad,
        led.to_u7(),
    ))
}

fn pad_messages(
    planes: &mut LedPlanes,
    deck: Deck,
    led: LedState,
    mode: PadMode,
    shifted: bool,
) -> impl Iterator<Item = MidiMessage> + '_ {
    (0..NUM_PADS_PER_DECK).map(move |pad| {
        planes.set(deck, shifted, mode, pad, led);
        MidiMessage::note_on(
            deck.pad_midi_channel(shifted),
            mode.note_offset() + pad,
            led.to_u7(),
        )
    })
}

/// Switch all pad LEDs of a single mode and layer.
pub fn set_all_pads(
    planes: &mut LedPlanes,
    deck: Deck,
    led: LedState,
    mode: PadMode,
    shifted: bool,
) -> Vec<MidiMessage> {
    pad_messages(planes, deck, led, mode, shifted).collect()
}

/// Switch off all pad LEDs of a deck in every mode and layer.
pub fn clear_pads(planes: &mut LedPlanes, deck: Deck) -> Vec<MidiMessage> {
    let mut messages = Vec::with_capacity(PadMode::COUNT * 2 * usize::from(NUM_PADS_PER_DECK));
    for mode in PadMode::iter() {
        for shifted in [false, true] {
            messages.extend(pad_messages(planes, deck, LedState::Off, mode, shifted));
        }
    }
    messages
}

/// Switch a button LED.
///
/// Fails if the button has no (shifted) variant for the given deck.
pub fn set_button(
    button: Button,
    led: LedState,
    deck: Option<Deck>,
    shifted: bool,
) -> OutputResult<MidiMessage> {
    let address = address_of(button.into(), deck, shifted)?;
    Ok(address.to_midi_message(led.to_u7()))
}

pub fn set_tab(deck: Deck, tab: u8, led: LedState) -> OutputResult<MidiMessage> {
    let address = address_of(Control::Tab(tab), Some(deck), false)?;
    Ok(address.to_midi_message(led.to_u7()))
}

/// Display a normalized level in the interval [0, 1].
///
/// Values outside of the interval are clamped.
pub fn set_level_meter(deck: Deck, level: f32) -> OutputResult<MidiMessage> {
    if !level.is_finite() {
        return Err(OutputError::InvalidValue {
            value: level.into(),
            expected: "finite level",
        });
    }
    let value = (level * f32::from(LEVEL_METER_MAX))
        .round()
        .clamp(0.0, f32::from(LEVEL_METER_MAX));
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let value = value as u8;
    set_level_meter_raw(deck, value)
}

pub fn set_level_meter_raw(deck: Deck, value: u8) -> OutputResult<MidiMessage> {
    if value > LEVEL_METER_MAX {
        return Err(OutputError::InvalidValue {
            value: value.into(),
            expected: "0..=127",
        });
    }
    let address = address_of(Control::LevelMeter, Some(deck), false)?;
    Ok(address.to_midi_message(value))
}

/// Switch off all LEDs and reset the level meters.
///
/// Idempotent, i.e. the same messages are produced on every invocation.
pub fn all_off(planes: &mut LedPlanes) -> Vec<MidiMessage> {
    let mut messages = Vec::new();
    for deck in Deck::iter() {
        messages.extend(clear_pads(planes, deck));
    }
    messages.extend(button_addresses().map(|(_, _, _, (channel, note))| {
        MidiMessage::note_on(channel, note, LedState::Off.to_u7())
    }));
    for deck in Deck::iter() {
        messages.extend(
            (0..NUM_TABS_PER_DECK).filter_map(|tab| set_tab(deck, tab, LedState::Off).ok()),
        );
        messages.extend(set_level_meter_raw(deck, 0).ok());
    }
    debug_assert!(planes.is_dark());
    messages
}

/// Owns the LED state and sends all changes to the controller.
#[derive(Debug)]
pub struct LedOutput<C> {
    planes: LedPlanes,
    connection: C,
}

impl<C> LedOutput<C>
where
    C: MidiOutputConnection,
{
    /// Initially all LEDs are assumed to be off.
    #[must_use]
    pub fn attach(connection: C) -> Self {
        Self {
            planes: LedPlanes::new(),
            connection,
        }
    }

    #[must_use]
    pub fn detach(self) -> C {
        let Self { connection, .. } = self;
        connection
    }

    #[must_use]
    pub const fn planes(&self) -> &LedPlanes {
        &self.planes
    }

    fn send(&mut self, message: MidiMessage) -> OutputResult<()> {
        self.connection
            .send_midi_output(&message.to_bytes())
            .inspect_err(|err| {
                log::warn!("Failed to send {message:?}: {err}");
            })
    }

    fn send_all(&mut self, messages: Vec<MidiMessage>) -> OutputResult<()> {
        log::debug!("Sending {count} LED messages", count = messages.len());
        messages
            .into_iter()
            .try_for_each(|message| self.send(message))
    }

    pub fn set_pad(
        &mut self,
        deck: Deck,
        pad: u8,
        led: LedState,
        mode: PadMode,
        shifted: bool,
    ) -> OutputResult<()> {
        let message = set_pad(&mut self.planes, deck, pad, led, mode, shifted)?;
        self.send(message)
    }

    pub fn set_all_pads(
        &mut self,
        deck: Deck,
        led: LedState,
        mode: PadMode,
        shifted: bool,
    ) -> OutputResult<()> {
        let messages = set_all_pads(&mut self.planes, deck, led, mode, shifted);
        self.send_all(messages)
    }

    pub fn clear_pads(&mut self, deck: Deck) -> OutputResult<()> {
        let messages = clear_pads(&mut self.planes, deck);
        self.send_all(messages)
    }

    pub fn set_button(
        &mut self,
        button: Button,
        led: LedState,
        deck: Option<Deck>,
        shifted: bool,
    ) -> OutputResult<()> {
        let message = set_button(button, led, deck, shifted)?;
        self.send(message)
    }

    pub fn set_tab(&mut self, deck: Deck, tab: u8, led: LedState) -> OutputResult<()> {
        let message = set_tab(deck, tab, led)?;
        self.send(message)
    }

    pub fn set_level_meter(&mut self, deck: Deck, level: f32) -> OutputResult<()> {
        let message = set_level_meter(deck, level)?;
        self.send(message)
    }

    pub fn set_level_meter_raw(&mut self, deck: Deck, value: u8) -> OutputResult<()> {
        let message = set_level_meter_raw(deck, value)?;
        self.send(message)
    }

    pub fn all_off(&mut self) -> OutputResult<()> {
        let messages = all_off(&mut self.planes);
        self.send_all(messages)
    }
}
