// SPDX-FileCopyrightText: The djio authors
// SPDX-License-Identifier: MPL-2.0

//! Event filters
//!
//! Each field of a filter is optional. An absent field matches
//! anything, otherwise the field of the event must be equal.

use derive_more::From;

use crate::{
    BrowseEvent, Button, ButtonEvent, Deck, Event, EventKind, JogEvent, JogSurface,
    JogTouchEvent, Knob, KnobEvent, PadEvent, TabEvent,
};

fn matches_optional<T: PartialEq>(filter: Option<T>, value: T) -> bool {
    filter.map_or(true, |filter| filter == value)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PadFilter {
    pub deck: Option<Deck>,
    pub pressed: Option<bool>,
}

impl PadFilter {
    #[must_use]
    pub fn matches(&self, event: &PadEvent) -> bool {
        let Self { deck, pressed } = *self;
        matches_optional(deck, event.deck) && matches_optional(pressed, event.pressed)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TabFilter {
    pub deck: Option<Deck>,
    pub pressed: Option<bool>,
}

impl TabFilter {
    #[must_use]
    pub fn matches(&self, event: &TabEvent) -> bool {
        let Self { deck, pressed } = *self;
        matches_optional(deck, event.deck) && matches_optional(pressed, event.pressed)
    }
}

/// Matches buttons.
///
/// The `deck` field filters only deck-scoped buttons, i.e.
/// `Some(deck)` never matches buttons without a deck.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ButtonFilter {
    pub button: Option<Button>,
    pub deck: Option<Deck>,
    pub shifted: Option<bool>,
    pub pressed: Option<bool>,
}

impl ButtonFilter {
    #[must_use]
    pub fn matches(&self, event: &ButtonEvent) -> bool {
        let Self {
            button,
            deck,
            shifted,
            pressed,
        } = *self;
        matches_optional(button, event.button)
            && (deck.is_none() || deck == event.deck)
            && matches_optional(shifted, event.shifted)
            && matches_optional(pressed, event.pressed)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KnobFilter {
    pub knob: Option<Knob>,
    pub deck: Option<Deck>,
}

impl KnobFilter {
    #[must_use]
    pub fn matches(&self, event: &KnobEvent) -> bool {
        let Self { knob, deck } = *self;
        matches_optional(knob, event.knob) && (deck.is_none() || deck == event.deck)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JogFilter {
    pub deck: Option<Deck>,
    pub surface: Option<JogSurface>,
}

impl JogFilter {
    #[must_use]
    pub fn matches(&self, event: &JogEvent) -> bool {
        let Self { deck, surface } = *self;
        matches_optional(deck, event.deck) && matches_optional(surface, event.surface)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JogTouchFilter {
    pub deck: Option<Deck>,
    pub touched: Option<bool>,
}

impl JogTouchFilter {
    #[must_use]
    pub fn matches(&self, event: &JogTouchEvent) -> bool {
        let Self { deck, touched } = *self;
        matches_optional(deck, event.deck) && matches_optional(touched, event.touched)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BrowseFilter {
    pub shifted: Option<bool>,
}

impl BrowseFilter {
    #[must_use]
    pub fn matches(&self, event: &BrowseEvent) -> bool {
        matches_optional(self.shifted, event.shifted)
    }
}

/// A filter for a single kind of event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, From)]
pub enum EventFilter {
    Pad(PadFilter),
    Tab(TabFilter),
    Button(ButtonFilter),
    Knob(KnobFilter),
    Jog(JogFilter),
    JogTouch(JogTouchFilter),
    Browse(BrowseFilter),
}

impl EventFilter {
    /// The kind of events that could match.
    #[must_use]
    pub const fn kind(&self) -> EventKind {
        match self {
            Self::Pad(_) => EventKind::Pad,
            Self::Tab(_) => EventKind::Tab,
            Self::Button(_) => EventKind::Button,
            Self::Knob(_) => EventKind::Knob,
            Self::Jog(_) => EventKind::Jog,
            Self::JogTouch(_) => EventKind::JogTouch,
            Self::Browse(_) => EventKind::Browse,
        }
    }

    #[must_use]
    pub fn matches(&self, event: &Event) -> bool {
        match (self, event) {
            (Self::Pad(filter), Event::Pad(event)) => filter.matches(event),
            (Self::Tab(filter), Event::Tab(event)) => filter.matches(event),
            (Self::Button(filter), Event::Button(event)) => filter.matches(event),
            (Self::Knob(filter), Event::Knob(event)) => filter.matches(event),
            (Self::Jog(filter), Event::Jog(event)) => filter.matches(event),
            (Self::JogTouch(filter), Event::JogTouch(event)) => filter.matches(event),
            (Self::Browse(filter), Event::Browse(event)) => filter.matches(event),
            _ => false,
        }
    }
}
