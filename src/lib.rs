// SPDX-FileCopyrightText: The djio authors
// SPDX-License-Identifier: MPL-2.0

#![allow(rustdoc::invalid_rust_codeblocks)]
#![doc = include_str!("../README.md")]
#![warn(rust_2018_idioms)]
#![warn(rust_2021_compatibility)]
#![warn(missing_debug_implementations)]
//#![warn(missing_docs)] // FIXME
#![warn(unreachable_pub)]
#![warn(unsafe_code)]
#![warn(clippy::pedantic)]
#![warn(clippy::clone_on_ref_ptr)]
#![warn(rustdoc::broken_intra_doc_links)]
// Repetitions of module/type names occur frequently when using many
// modules for keeping the size of the source files handy. Often
// types have the same name as their parent module.
#![allow(clippy::module_name_repetitions)]
// Repeating the type name in `..Default::default()` expressions
// is not needed since the context is obvious.
#![allow(clippy::default_trait_access)]

use std::borrow::Cow;

use derive_more::Display;

pub mod controller;
pub use self::controller::{Controller, ControllerDescriptor, Engine};
#[cfg(feature = "controller-thread")]
pub use self::controller::thread::{run_input_loop, InputThread};

pub mod devices;
pub use self::devices::pioneer_ddj_flx4::{
    self as flx4, Button, Control, ControlAddress, Deck, InvalidAddress, JogSurface, Knob,
    LedOutput, LedPlanes, MidiInputDecoder, PadMode, Sensor,
};

pub mod input;
pub use self::input::{
    u7_be_to_u14, BrowseEvent, ButtonEvent, CenterSliderInput, Event, EventKind, JogEvent,
    JogTouchEvent, KnobEvent, PadEvent, SliderInput, StepEncoderInput, TabEvent,
};

pub mod midi;
pub use self::midi::{
    MessageKind, MidiDeviceDescriptor, MidiInputHandler, MidiInputMessage, MidiInputSource,
    MidiMessage, MidiOutputConnection,
};

pub mod output;
pub use self::output::{LedState, OutputError, OutputResult};

pub mod router;
pub use self::router::{
    BrowseFilter, ButtonFilter, DispatchSummary, EventFilter, EventRouter, Handler,
    HandlerFailure, HandlerId, JogFilter, JogTouchFilter, KnobFilter, PadFilter, TabFilter,
};

pub mod values;
pub use self::values::{Value, ValueStore};

/// Time stamp with microsecond precision
///
/// The origin is defined by the MIDI transport, e.g. the time
/// when the input port has been connected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Display)]
#[display("{_0}µs")]
#[repr(transparent)]
pub struct TimeStamp(u64);

impl TimeStamp {
    #[must_use]
    pub const fn from_micros(micros: u64) -> Self {
        Self(micros)
    }

    #[must_use]
    pub const fn to_micros(self) -> u64 {
        self.0
    }
}

/// Identifies a hardware device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceDescriptor {
    pub vendor_name: Cow<'static, str>,
    pub product_name: Cow<'static, str>,
}

impl DeviceDescriptor {
    /// The vendor and product name, separated by a space.
    #[must_use]
    pub fn name(&self) -> Cow<'static, str> {
        let Self {
            vendor_name,
            product_name,
        } = self;
        debug_assert!(!product_name.is_empty());
        if vendor_name.is_empty() {
            product_name.clone()
        } else {
            format!("{vendor_name} {product_name}").into()
        }
    }
}
