// SPDX-FileCopyrightText: The djio authors
// SPDX-License-Identifier: MPL-2.0

//! # Pioneer DDJ-FLX4
//!
//! MIDI addresses of all controls.
//!
//! Buttons, tabs, and the level meters use the same address for both
//! input and LED output. The LEDs of the performance pads are addressed
//! per [`PadMode`] on separate channels for the unshifted and shifted
//! layer.
//!
//! Most 14-bit controls send their MSB on CC `n` and their LSB on CC
//! `n + 32` of the same channel. The LSB of TRIM (CC 34 on the deck
//! channels) shares its address with the top surface of the jog wheel.

use std::{borrow::Cow, str::FromStr as _};

use strum::{Display, EnumCount, EnumIter, EnumString, IntoEnumIterator as _, IntoStaticStr};
use thiserror::Error;

use crate::{
    ControllerDescriptor, DeviceDescriptor, MessageKind, MidiDeviceDescriptor, MidiMessage,
};

pub mod input;
pub use self::input::MidiInputDecoder;

pub mod output;
pub use self::output::{LedOutput, LedPlanes};

#[cfg(test)]
mod tests;

pub const MIDI_DEVICE_DESCRIPTOR: &MidiDeviceDescriptor = &MidiDeviceDescriptor {
    device: DeviceDescriptor {
        vendor_name: Cow::Borrowed("Pioneer DJ"),
        product_name: Cow::Borrowed("DDJ-FLX4"),
    },
    port_name_prefix: "DDJ-FLX4",
};

pub const DEVICE_DESCRIPTOR: &DeviceDescriptor = &MIDI_DEVICE_DESCRIPTOR.device;

#[allow(clippy::cast_possible_truncation)]
pub const CONTROLLER_DESCRIPTOR: &ControllerDescriptor = &ControllerDescriptor {
    num_decks: Deck::COUNT as u8,
    num_virtual_decks: Deck::COUNT as u8,
    num_mixer_channels: Deck::COUNT as u8,
    num_pads_per_deck: NUM_PADS_PER_DECK,
    num_effect_units: 1,
};

pub const NUM_PADS_PER_DECK: u8 = 8;

pub const NUM_TABS_PER_DECK: u8 = 4;

const MIDI_CHANNEL_DECK_ONE: u8 = 0x0;
const MIDI_CHANNEL_DECK_TWO: u8 = 0x1;
const MIDI_CHANNEL_EFFECT: u8 = 0x4;
const MIDI_CHANNEL_EFFECT_DECK_TWO: u8 = 0x5;
const MIDI_CHANNEL_MAIN: u8 = 0x6;
const MIDI_CHANNEL_PAD_DECK_ONE: u8 = 0x7;
const MIDI_CHANNEL_PAD_SHIFT_DECK_ONE: u8 = 0x8;
const MIDI_CHANNEL_PAD_DECK_TWO: u8 = 0x9;
const MIDI_CHANNEL_PAD_SHIFT_DECK_TWO: u8 = 0xa;

/// Note of the leftmost pad, followed by the other pads.
const MIDI_PAD_NOTE: u8 = 0x30;

const MIDI_TAB_NOTES: [u8; NUM_TABS_PER_DECK as usize] = [0x1b, 0x1e, 0x20, 0x22];

const MIDI_JOG_TOUCH_NOTE: u8 = 0x36;
const MIDI_JOG_TOP_CC: u8 = 0x22;
const MIDI_JOG_SIDE_CC: u8 = 0x21;

const MIDI_BROWSE_ROTATE_CC: u8 = 0x40;
const MIDI_BROWSE_ROTATE_SHIFT_CC: u8 = 0x64;

const MIDI_LEVEL_METER_CC: u8 = 0x02;

/// Distance between the MSB and LSB controller numbers of 14-bit controls.
const MIDI_CC_LSB_OFFSET: u8 = 0x20;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, EnumIter, EnumCount, Display,
)]
pub enum Deck {
    /// Left deck
    #[strum(to_string = "1")]
    One,
    /// Right deck
    #[strum(to_string = "2")]
    Two,
}

impl Deck {
    #[must_use]
    pub const fn number(self) -> u8 {
        match self {
            Self::One => 1,
            Self::Two => 2,
        }
    }

    #[must_use]
    pub const fn from_number(number: u8) -> Option<Self> {
        match number {
            1 => Some(Self::One),
            2 => Some(Self::Two),
            _ => None,
        }
    }

    pub(crate) const fn index(self) -> usize {
        match self {
            Self::One => 0,
            Self::Two => 1,
        }
    }

    const fn midi_channel(self) -> u8 {
        match self {
            Self::One => MIDI_CHANNEL_DECK_ONE,
            Self::Two => MIDI_CHANNEL_DECK_TWO,
        }
    }

    const fn from_midi_channel(channel: u8) -> Option<Self> {
        match channel {
            MIDI_CHANNEL_DECK_ONE => Some(Self::One),
            MIDI_CHANNEL_DECK_TWO => Some(Self::Two),
            _ => None,
        }
    }

    const fn effect_midi_channel(self) -> u8 {
        match self {
            Self::One => MIDI_CHANNEL_EFFECT,
            Self::Two => MIDI_CHANNEL_EFFECT_DECK_TWO,
        }
    }

    const fn pad_midi_channel(self, shifted: bool) -> u8 {
        match (self, shifted) {
            (Self::One, false) => MIDI_CHANNEL_PAD_DECK_ONE,
            (Self::One, true) => MIDI_CHANNEL_PAD_SHIFT_DECK_ONE,
            (Self::Two, false) => MIDI_CHANNEL_PAD_DECK_TWO,
            (Self::Two, true) => MIDI_CHANNEL_PAD_SHIFT_DECK_TWO,
        }
    }
}

/// The two touch sensitive surfaces of a jog wheel.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    EnumIter,
    EnumCount,
    Display,
    EnumString,
    IntoStaticStr,
)]
#[strum(serialize_all = "lowercase")]
pub enum JogSurface {
    /// Platter
    Top,
    /// Outer ring
    Side,
}

impl JogSurface {
    const fn midi_cc(self) -> u8 {
        match self {
            Self::Top => MIDI_JOG_TOP_CC,
            Self::Side => MIDI_JOG_SIDE_CC,
        }
    }
}

/// Function layers of the performance pads.
///
/// Each mode addresses the pad LEDs with its own range of 8 notes.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    EnumIter,
    EnumCount,
    Display,
    EnumString,
    IntoStaticStr,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum PadMode {
    #[default]
    HotCue,
    #[strum(to_string = "PAD_FX_1")]
    PadFx1,
    #[strum(to_string = "PAD_FX_2")]
    PadFx2,
    BeatJump,
    Sampler,
    Keyboard,
    BeatLoop,
    KeyShift,
}

impl PadMode {
    /// Note number of the leftmost pad LED.
    #[must_use]
    pub const fn note_offset(self) -> u8 {
        match self {
            Self::HotCue => 0x00,
            Self::PadFx1 => 0x10,
            Self::PadFx2 => 0x20,
            Self::BeatJump => 0x30,
            Self::Sampler => 0x40,
            Self::Keyboard => 0x50,
            Self::BeatLoop => 0x60,
            Self::KeyShift => 0x70,
        }
    }

    pub(crate) const fn index(self) -> usize {
        self as usize
    }
}

#[must_use]
pub const fn pad_mode_offset(mode: PadMode) -> u8 {
    mode.note_offset()
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    EnumIter,
    EnumCount,
    Display,
    EnumString,
    IntoStaticStr,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Button {
    // -- Deck section -- //
    PlayPause,
    Cue,
    CueLoopCall,
    In,
    Out,
    #[strum(to_string = "BEAT_4_EXIT")]
    Beat4Exit,
    CueLoopLeft,
    CueLoopRight,
    BeatSync,
    /// Sent after holding BEAT SYNC
    BeatSyncLong,
    Shift,
    // -- Effect section -- //
    FxBeatLeft,
    FxBeatRight,
    FxOnOff,
    FxChSelect,
    FxSelect,
    // -- Mixer and browser section -- //
    MasterCue,
    BrowseLoad,
    BrowsePress,
}

impl Button {
    /// Buttons that exist once per deck.
    #[must_use]
    pub const fn is_deck_scoped(self) -> bool {
        !matches!(
            self,
            Self::FxBeatLeft | Self::FxBeatRight | Self::FxOnOff | Self::MasterCue | Self::BrowsePress
        )
    }

    /// Note numbers of the unshifted and (optional) shifted variant
    /// of buttons that are sent on the deck channels.
    const fn deck_notes(self) -> Option<(u8, Option<u8>)> {
        let notes = match self {
            Self::PlayPause => (0x0b, Some(0x0e)),
            Self::Cue => (0x0c, Some(0x48)),
            Self::CueLoopCall => (0x54, None),
            Self::In => (0x10, Some(0x4c)),
            Self::Out => (0x11, Some(0x4e)),
            Self::Beat4Exit => (0x4d, Some(0x50)),
            Self::CueLoopLeft => (0x51, Some(0x3e)),
            Self::CueLoopRight => (0x53, Some(0x3d)),
            Self::BeatSync => (0x58, Some(0x60)),
            Self::BeatSyncLong => (0x5c, None),
            Self::Shift => (0x3f, Some(0x68)),
            _ => return None,
        };
        Some(notes)
    }

    /// Channel and note of the button.
    const fn midi_address(self, deck: Option<Deck>, shifted: bool) -> Option<(u8, u8)> {
        let address = match deck {
            Some(deck) => match self {
                Self::FxChSelect if !shifted => (deck.effect_midi_channel(), 0x47),
                Self::FxSelect if !shifted => (deck.effect_midi_channel(), 0x43),
                Self::BrowseLoad => {
                    let note = match (deck, shifted) {
                        (Deck::One, false) => 0x46,
                        (Deck::One, true) => 0x42,
                        (Deck::Two, false) => 0x47,
                        (Deck::Two, true) => 0x68,
                    };
                    (MIDI_CHANNEL_MAIN, note)
                }
                _ => {
                    let Some((note, shifted_note)) = self.deck_notes() else {
                        return None;
                    };
                    let note = if shifted {
                        let Some(shifted_note) = shifted_note else {
                            return None;
                        };
                        shifted_note
                    } else {
                        note
                    };
                    (deck.midi_channel(), note)
                }
            },
            None => {
                let (channel, note, shifted_note) = match self {
                    Self::FxBeatLeft => (MIDI_CHANNEL_EFFECT, 0x63, 0x64),
                    Self::FxBeatRight => (MIDI_CHANNEL_EFFECT, 0x4a, 0x66),
                    Self::FxOnOff => (MIDI_CHANNEL_EFFECT, 0x4b, 0x6b),
                    Self::MasterCue => (MIDI_CHANNEL_MAIN, 0x63, 0x78),
                    Self::BrowsePress => (MIDI_CHANNEL_MAIN, 0x41, 0x7a),
                    _ => return None,
                };
                (channel, if shifted { shifted_note } else { note })
            }
        };
        Some(address)
    }
}

const DECK_SCOPES: [Option<Deck>; Deck::COUNT] = [Some(Deck::One), Some(Deck::Two)];
const MAIN_SCOPE: [Option<Deck>; 1] = [None];

/// All addressable buttons with their channel and note.
pub(crate) fn button_addresses() -> impl Iterator<Item = (Button, Option<Deck>, bool, (u8, u8))>
{
    Button::iter().flat_map(|button| {
        let scopes: &'static [Option<Deck>] = if button.is_deck_scoped() {
            &DECK_SCOPES
        } else {
            &MAIN_SCOPE
        };
        scopes.iter().flat_map(move |&deck| {
            [false, true].into_iter().filter_map(move |shifted| {
                button
                    .midi_address(deck, shifted)
                    .map(|address| (button, deck, shifted, address))
            })
        })
    })
}

/// Knobs and faders.
///
/// All controls except [`Knob::MonoStereo`] have a resolution of 14 bits.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    EnumIter,
    EnumCount,
    Display,
    EnumString,
    IntoStaticStr,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Knob {
    // -- Deck section -- //
    Tempo,
    // -- Mixer section, per deck -- //
    Trim,
    EqHi,
    EqMid,
    EqLow,
    Cfx,
    ChFader,
    // -- Effect section -- //
    FxLevel,
    // -- Mixer section -- //
    MasterLevel,
    HeadphoneMix,
    HeadphoneLevel,
    MicLevel,
    SmartFader,
    Crossfader,
    /// 0: stereo, otherwise mono
    MonoStereo,
}

impl Knob {
    #[must_use]
    pub const fn is_deck_scoped(self) -> bool {
        matches!(
            self,
            Self::Tempo
                | Self::Trim
                | Self::EqHi
                | Self::EqMid
                | Self::EqLow
                | Self::Cfx
                | Self::ChFader
        )
    }

    /// Normalized to [-1, 1] instead of [0, 1].
    #[must_use]
    pub const fn is_centered(self) -> bool {
        matches!(self, Self::Tempo)
    }

    #[must_use]
    pub const fn is_14bit(self) -> bool {
        !matches!(self, Self::MonoStereo)
    }

    /// Controller number, i.e. the MSB for 14-bit controls.
    const fn midi_cc(self) -> u8 {
        match self {
            Self::Tempo => 0x00,
            Self::Trim | Self::FxLevel => 0x02,
            Self::EqHi => 0x04,
            Self::MasterLevel => 0x05,
            Self::EqMid => 0x07,
            Self::EqLow => 0x0b,
            Self::HeadphoneMix => 0x0c,
            Self::HeadphoneLevel => 0x0d,
            Self::Cfx => 0x0f,
            Self::ChFader => 0x13,
            Self::MicLevel => 0x17,
            Self::SmartFader => 0x18,
            Self::Crossfader => 0x1f,
            Self::MonoStereo => 0x6d,
        }
    }

    pub(crate) const fn midi_lsb_cc(self) -> Option<u8> {
        if self.is_14bit() {
            Some(self.midi_cc() + MIDI_CC_LSB_OFFSET)
        } else {
            None
        }
    }

    const fn midi_channel(self, deck: Option<Deck>) -> Option<u8> {
        match (self.is_deck_scoped(), deck) {
            (true, Some(deck)) => Some(deck.midi_channel()),
            (false, None) => match self {
                Self::FxLevel => Some(MIDI_CHANNEL_EFFECT),
                _ => Some(MIDI_CHANNEL_MAIN),
            },
            _ => None,
        }
    }
}

/// Logical controls, independent of deck and layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum Control {
    #[display("PAD_{_0}")]
    Pad(u8),
    #[display("TAB_{_0}")]
    Tab(u8),
    Button(Button),
    Knob(Knob),
    #[display("JOG_ROTATE({_0})")]
    Jog(JogSurface),
    #[display("JOG_TOUCH")]
    JogTouch,
    #[display("BROWSE_ROTATE")]
    BrowseRotate,
    /// Output only
    #[display("LEVEL_METER")]
    LevelMeter,
}

impl Control {
    /// Look up a knob or button by its name, e.g. `"CH_FADER"` or `"PLAY_PAUSE"`.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Knob::from_str(name)
            .map(Self::Knob)
            .or_else(|_| Button::from_str(name).map(Self::Button))
            .ok()
    }
}

impl From<Button> for Control {
    fn from(from: Button) -> Self {
        Self::Button(from)
    }
}

impl From<Knob> for Control {
    fn from(from: Knob) -> Self {
        Self::Knob(from)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ControlAddress {
    pub channel: u8,
    /// Note or controller number
    pub data1: u8,
    pub kind: MessageKind,
    pub deck: Option<Deck>,
    pub shifted: bool,
}

impl ControlAddress {
    #[must_use]
    pub const fn to_midi_message(self, data2: u8) -> MidiMessage {
        MidiMessage::new(self.channel, self.kind, self.data1, data2)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("no address for {control} (deck: {deck:?}, shifted: {shifted})")]
pub struct InvalidAddress {
    pub control: Control,
    pub deck: Option<Deck>,
    pub shifted: bool,
}

/// Look up the address of a control.
///
/// For 14-bit controls the address of the MSB is returned.
pub fn address_of(
    control: Control,
    deck: Option<Deck>,
    shifted: bool,
) -> Result<ControlAddress, InvalidAddress> {
    use MessageKind::{ControlChange, NoteOn};
    let invalid = || InvalidAddress {
        control,
        deck,
        shifted,
    };
    let (kind, channel, data1) = match (control, deck) {
        (Control::Pad(pad), Some(deck)) if !shifted && pad < NUM_PADS_PER_DECK => {
            (NoteOn, deck.pad_midi_channel(false), MIDI_PAD_NOTE + pad)
        }
        (Control::Tab(tab), Some(deck)) if !shifted => {
            let note = MIDI_TAB_NOTES
                .get(usize::from(tab))
                .copied()
                .ok_or_else(invalid)?;
            (NoteOn, deck.midi_channel(), note)
        }
        (Control::Button(button), deck) => {
            let (channel, note) = button.midi_address(deck, shifted).ok_or_else(invalid)?;
            (NoteOn, channel, note)
        }
        (Control::Knob(knob), deck) if !shifted => {
            let channel = knob.midi_channel(deck).ok_or_else(invalid)?;
            (ControlChange, channel, knob.midi_cc())
        }
        (Control::Jog(surface), Some(deck)) if !shifted => {
            (ControlChange, deck.midi_channel(), surface.midi_cc())
        }
        (Control::JogTouch, Some(deck)) if !shifted => {
            (NoteOn, deck.midi_channel(), MIDI_JOG_TOUCH_NOTE)
        }
        (Control::BrowseRotate, None) => {
            let cc = if shifted {
                MIDI_BROWSE_ROTATE_SHIFT_CC
            } else {
                MIDI_BROWSE_ROTATE_CC
            };
            (ControlChange, MIDI_CHANNEL_MAIN, cc)
        }
        (Control::LevelMeter, Some(deck)) if !shifted => {
            (ControlChange, deck.midi_channel(), MIDI_LEVEL_METER_CC)
        }
        _ => return Err(invalid()),
    };
    Ok(ControlAddress {
        channel,
        data1,
        kind,
        deck,
        shifted,
    })
}

/// The physical origin of an input message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sensor {
    Pad {
        deck: Deck,
        pad: u8,
    },
    Tab {
        deck: Deck,
        tab: u8,
    },
    Button {
        button: Button,
        deck: Option<Deck>,
        shifted: bool,
    },
    JogTouch {
        deck: Deck,
    },
    JogRotation {
        deck: Deck,
        surface: JogSurface,
    },
    /// Coarse half of a 14-bit control
    KnobMsb {
        knob: Knob,
        deck: Option<Deck>,
    },
    /// Fine half of a 14-bit control
    KnobLsb {
        knob: Knob,
        deck: Option<Deck>,
    },
    /// 7-bit control
    Knob {
        knob: Knob,
    },
    BrowseRotation {
        shifted: bool,
    },
}

impl Sensor {
    #[must_use]
    pub const fn deck(self) -> Option<Deck> {
        match self {
            Self::Pad { deck, .. }
            | Self::Tab { deck, .. }
            | Self::JogTouch { deck }
            | Self::JogRotation { deck, .. } => Some(deck),
            Self::Button { deck, .. } | Self::KnobMsb { deck, .. } | Self::KnobLsb { deck, .. } => {
                deck
            }
            Self::Knob { .. } | Self::BrowseRotation { .. } => None,
        }
    }

    #[must_use]
    pub const fn control(self) -> Control {
        match self {
            Self::Pad { pad, .. } => Control::Pad(pad),
            Self::Tab { tab, .. } => Control::Tab(tab),
            Self::Button { button, .. } => Control::Button(button),
            Self::JogTouch { .. } => Control::JogTouch,
            Self::JogRotation { surface, .. } => Control::Jog(surface),
            Self::KnobMsb { knob, .. } | Self::KnobLsb { knob, .. } | Self::Knob { knob } => {
                Control::Knob(knob)
            }
            Self::BrowseRotation { .. } => Control::BrowseRotate,
        }
    }

    #[must_use]
    pub const fn is_shifted(self) -> bool {
        match self {
            Self::Button { shifted, .. } | Self::BrowseRotation { shifted } => shifted,
            _ => false,
        }
    }
}

fn pad_at(channel: u8, note: u8) -> Option<Sensor> {
    let deck = Deck::iter().find(|deck| deck.pad_midi_channel(false) == channel)?;
    let pad = note.checked_sub(MIDI_PAD_NOTE)?;
    (pad < NUM_PADS_PER_DECK).then_some(Sensor::Pad { deck, pad })
}

fn tab_at(channel: u8, note: u8) -> Option<Sensor> {
    let deck = Deck::from_midi_channel(channel)?;
    let tab = MIDI_TAB_NOTES.iter().position(|&tab_note| tab_note == note)?;
    debug_assert!(tab < NUM_TABS_PER_DECK.into());
    #[allow(clippy::cast_possible_truncation)]
    let tab = tab as u8;
    Some(Sensor::Tab { deck, tab })
}

fn button_at(channel: u8, note: u8) -> Option<Sensor> {
    button_addresses().find_map(|(button, deck, shifted, address)| {
        (address == (channel, note)).then_some(Sensor::Button {
            button,
            deck,
            shifted,
        })
    })
}

fn jog_touch_at(channel: u8, note: u8) -> Option<Sensor> {
    let deck = Deck::from_midi_channel(channel)?;
    (note == MIDI_JOG_TOUCH_NOTE).then_some(Sensor::JogTouch { deck })
}

fn jog_rotation_at(channel: u8, cc: u8) -> Option<Sensor> {
    let deck = Deck::from_midi_channel(channel)?;
    let surface = JogSurface::iter().find(|surface| surface.midi_cc() == cc)?;
    Some(Sensor::JogRotation { deck, surface })
}

fn knob_at(channel: u8, cc: u8) -> Option<Sensor> {
    Knob::iter().find_map(|knob| {
        let deck = if knob.is_deck_scoped() {
            Some(Deck::from_midi_channel(channel)?)
        } else {
            None
        };
        if knob.midi_channel(deck)? != channel {
            return None;
        }
        if cc == knob.midi_cc() {
            let sensor = if knob.is_14bit() {
                Sensor::KnobMsb { knob, deck }
            } else {
                Sensor::Knob { knob }
            };
            return Some(sensor);
        }
        (knob.midi_lsb_cc() == Some(cc)).then_some(Sensor::KnobLsb { knob, deck })
    })
}

fn browse_rotation_at(channel: u8, cc: u8) -> Option<Sensor> {
    if channel != MIDI_CHANNEL_MAIN {
        return None;
    }
    let shifted = match cc {
        MIDI_BROWSE_ROTATE_CC => false,
        MIDI_BROWSE_ROTATE_SHIFT_CC => true,
        _ => return None,
    };
    Some(Sensor::BrowseRotation { shifted })
}

/// Look up which control has sent a message.
///
/// Categories are matched in a fixed order: pads, tabs, buttons, jog
/// touch, jog rotation, 14-bit knobs, and finally 7-bit controls.
/// The shared address of the top jog surface and the TRIM LSB always
/// resolves to the jog wheel.
#[must_use]
pub fn control_of(message: MidiMessage) -> Option<(ControlAddress, Sensor)> {
    let MidiMessage {
        channel,
        kind,
        data1,
        data2: _,
    } = message;
    let sensor = match kind {
        MessageKind::NoteOn => pad_at(channel, data1)
            .or_else(|| tab_at(channel, data1))
            .or_else(|| button_at(channel, data1))
            .or_else(|| jog_touch_at(channel, data1)),
        MessageKind::ControlChange => jog_rotation_at(channel, data1)
            .or_else(|| knob_at(channel, data1))
            .or_else(|| browse_rotation_at(channel, data1)),
    }?;
    let address = ControlAddress {
        channel,
        data1,
        kind,
        deck: sensor.deck(),
        shifted: sensor.is_shifted(),
    };
    Some((address, sensor))
}
