// SPDX-FileCopyrightText: The djio authors
// SPDX-License-Identifier: MPL-2.0

use std::future::Future;

use futures_core::Stream;
use futures_util::StreamExt as _;

use crate::{DeviceDescriptor, OutputResult, TimeStamp};

#[cfg(feature = "midir")]
pub mod midir;


const MIDI_STATUS_MASK: u8 = 0xf0;
const MIDI_CHANNEL_MASK: u8 = 0x0f;
const MIDI_DATA_MASK: u8 = 0x7f;

const MIDI_STATUS_NOTE_OFF: u8 = 0x80;
const MIDI_STATUS_NOTE_ON: u8 = 0x90;
const MIDI_STATUS_CC: u8 = 0xb0;

/// MIDI-related, extended [`DeviceDescriptor`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MidiDeviceDescriptor {
    pub device: DeviceDescriptor,
    pub port_name_prefix: &'static str,
}

/// The kinds of channel voice messages exchanged with the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKind {
    NoteOn,
    ControlChange,
}

impl MessageKind {
    const fn status(self) -> u8 {
        match self {
            Self::NoteOn => MIDI_STATUS_NOTE_ON,
            Self::ControlChange => MIDI_STATUS_CC,
        }
    }
}

/// A 3-byte channel voice message.
///
/// Both data bytes are 7-bit values. For [`MessageKind::NoteOn`]
/// `data1` is the note number and `data2` the velocity, for
/// [`MessageKind::ControlChange`] `data1` is the controller number
/// and `data2` the value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MidiMessage {
    pub channel: u8,
    pub kind: MessageKind,
    pub data1: u8,
    pub data2: u8,
}

impl MidiMessage {
    #[must_use]
    pub const fn new(channel: u8, kind: MessageKind, data1: u8, data2: u8) -> Self {
        debug_assert!(channel <= MIDI_CHANNEL_MASK);
        debug_assert!(data1 <= MIDI_DATA_MASK);
        debug_assert!(data2 <= MIDI_DATA_MASK);
        Self {
            channel,
            kind,
            data1,
            data2,
        }
    }

    #[must_use]
    pub const fn note_on(channel: u8, note: u8, velocity: u8) -> Self {
        Self::new(channel, MessageKind::NoteOn, note, velocity)
    }

    #[must_use]
    pub const fn control_change(channel: u8, cc: u8, value: u8) -> Self {
        Self::new(channel, MessageKind::ControlChange, cc, value)
    }

    /// Parse a message from the wire.
    ///
    /// Note off is mapped to note on with velocity 0. Returns `None`
    /// for all other kinds of messages and for malformed input.
    #[must_use]
    pub fn try_from_bytes(input: &[u8]) -> Option<Self> {
        let [status, data1, data2] = *input else {
            return None;
        };
        if data1 > MIDI_DATA_MASK || data2 > MIDI_DATA_MASK {
            return None;
        }
        let channel = status & MIDI_CHANNEL_MASK;
        let message = match status & MIDI_STATUS_MASK {
            MIDI_STATUS_NOTE_OFF => Self::note_on(channel, data1, 0),
            MIDI_STATUS_NOTE_ON => Self::note_on(channel, data1, data2),
            MIDI_STATUS_CC => Self::control_change(channel, data1, data2),
            _ => return None,
        };
        Some(message)
    }

    #[must_use]
    pub const fn to_bytes(self) -> [u8; 3] {
        let Self {
            channel,
            kind,
            data1,
            data2,
        } = self;
        [kind.status() | channel, data1, data2]
    }
}

/// Raw MIDI input as received from the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MidiInputMessage {
    pub ts: TimeStamp,
    pub data: Vec<u8>,
}

/// Passive callback for sinking MIDI input messages
pub trait MidiInputHandler: Send {
    /// Invoked for each incoming message.
    ///
    /// Returns `true` if the message has been recognized and handled
    /// or `false` if it has been ignored.
    #[must_use]
    fn handle_midi_input(&mut self, ts: TimeStamp, input: &[u8]) -> bool;
}

/// Active source of MIDI input messages.
///
/// Pulled by the input thread. Awaiting the next message is the
/// only point where the input processing could be suspended or
/// cancelled.
pub trait MidiInputSource: Send {
    /// Receive the next message.
    ///
    /// Resolves to `None` after the source has been closed.
    fn recv_midi_input(&mut self) -> impl Future<Output = Option<MidiInputMessage>> + Send;
}

impl<S> MidiInputSource for S
where
    S: Stream<Item = MidiInputMessage> + Unpin + Send,
{
    fn recv_midi_input(&mut self) -> impl Future<Output = Option<MidiInputMessage>> + Send {
        self.next()
    }
}

/// Sink for outgoing MIDI messages.
pub trait MidiOutputConnection {
    fn send_midi_output(&mut self, output: &[u8]) -> OutputResult<()>;
}

impl<C> MidiOutputConnection for Box<C>
where
    C: MidiOutputConnection + ?Sized,
{
    fn send_midi_output(&mut self, output: &[u8]) -> OutputResult<()> {
        self.as_mut().send_midi_output(output)
    }
}
