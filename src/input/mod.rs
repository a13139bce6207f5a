// SPDX-FileCopyrightText: The djio authors
// SPDX-License-Identifier: MPL-2.0

//! Typed input events and normalization of raw control values.

use derive_more::From;
use enum_as_inner::EnumAsInner;
use strum::{EnumCount, EnumDiscriminants, EnumIter, IntoStaticStr};

use crate::{Button, Deck, JogSurface, Knob};

#[cfg(test)]
mod tests;

/// Combine two 7-bit values into a 14-bit value.
#[must_use]
pub fn u7_be_to_u14(hi: u8, lo: u8) -> u16 {
    debug_assert!(hi <= 0x7f);
    debug_assert!(lo <= 0x7f);
    u16::from(hi) << 7 | u16::from(lo)
}

/// A continuous fader or knob.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderInput {
    /// Position in the interval [`Self::MIN_POSITION`, `Self::MAX_POSITION`]
    pub position: f32,
}

impl SliderInput {
    pub const MIN_POSITION: f32 = 0.0;
    pub const MAX_POSITION: f32 = 1.0;

    #[must_use]
    pub fn from_u7(input: u8) -> Self {
        let position = f32::from(input) / 127.0;
        Self { position }
    }

    #[must_use]
    pub fn from_u14(input: u16) -> Self {
        let position = f32::from(input) / 16383.0;
        Self { position }
    }
}

/// A continuous fader or knob with a symmetric center position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CenterSliderInput {
    /// Position in the interval [`Self::MIN_POSITION`, `Self::MAX_POSITION`]
    pub position: f32,
}

impl CenterSliderInput {
    pub const MIN_POSITION: f32 = -1.0;
    pub const MAX_POSITION: f32 = 1.0;
    pub const CENTER_POSITION: f32 = 0.0;

    const U14_CENTER: u16 = 8192;

    /// The 14-bit range is not symmetric: 0 maps to the minimum
    /// and 16383 to slightly below the maximum.
    #[must_use]
    pub fn from_u14(input: u16) -> Self {
        let position = (f32::from(input) - f32::from(Self::U14_CENTER))
            / f32::from(Self::U14_CENTER);
        Self {
            position: position.clamp(Self::MIN_POSITION, Self::MAX_POSITION),
        }
    }
}

/// An endless encoder that sends discrete delta values when rotated
/// in CW (positive) or CCW (negative) direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepEncoderInput {
    pub delta: i8,
}

impl StepEncoderInput {
    /// Decode a relative 7-bit value.
    ///
    /// 1..=64 are steps in CW direction and 65..=127 are steps in
    /// CCW direction. 0 is not a step.
    #[must_use]
    pub fn from_u7(input: u8) -> Option<Self> {
        debug_assert!(input <= 0x7f);
        if input == 0 {
            return None;
        }
        let delta = i16::from(input);
        let delta = if delta <= 64 { delta } else { delta - 128 };
        #[allow(clippy::cast_possible_truncation)]
        let delta = delta as i8;
        Some(Self { delta })
    }
}

/// A performance pad was pressed or released.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PadEvent {
    pub deck: Deck,
    /// 0 (leftmost) to 7
    pub pad: u8,
    pub pressed: bool,
    /// Raw velocity, 0 on release
    pub velocity: u8,
}

/// A pad mode tab was pressed or released.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TabEvent {
    pub deck: Deck,
    /// 0 to 3
    pub tab: u8,
    pub pressed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonEvent {
    pub button: Button,
    /// `None` for buttons that are not bound to a deck
    pub deck: Option<Deck>,
    pub shifted: bool,
    pub pressed: bool,
}

/// A knob or fader has been moved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KnobEvent {
    pub knob: Knob,
    pub deck: Option<Deck>,
    /// Normalized value, see [`Knob::is_centered()`]
    pub value: f32,
    /// The raw 14-bit or 7-bit value
    pub raw: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JogEvent {
    pub deck: Deck,
    pub surface: JogSurface,
    /// +1 (CW) or -1 (CCW)
    pub direction: i8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JogTouchEvent {
    pub deck: Deck,
    pub touched: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrowseEvent {
    /// Positive for CW, negative for CCW
    pub steps: i8,
    pub shifted: bool,
}

/// A decoded input event.
#[derive(Debug, Clone, Copy, PartialEq, From, EnumAsInner, EnumDiscriminants)]
#[strum_discriminants(
    name(EventKind),
    derive(Hash, EnumIter, EnumCount, IntoStaticStr),
    strum(serialize_all = "snake_case")
)]
pub enum Event {
    Pad(PadEvent),
    Tab(TabEvent),
    Button(ButtonEvent),
    Knob(KnobEvent),
    Jog(JogEvent),
    JogTouch(JogTouchEvent),
    Browse(BrowseEvent),
}

impl Event {
    #[must_use]
    pub fn kind(&self) -> EventKind {
        self.into()
    }

    /// The deck the event originates from, if any.
    #[must_use]
    pub const fn deck(&self) -> Option<Deck> {
        match self {
            Self::Pad(PadEvent { deck, .. })
            | Self::Tab(TabEvent { deck, .. })
            | Self::Jog(JogEvent { deck, .. })
            | Self::JogTouch(JogTouchEvent { deck, .. }) => Some(*deck),
            Self::Button(ButtonEvent { deck, .. }) | Self::Knob(KnobEvent { deck, .. }) => *deck,
            Self::Browse(_) => None,
        }
    }
}
