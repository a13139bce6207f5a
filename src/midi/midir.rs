// SPDX-FileCopyrightText: The djio authors
// SPDX-License-Identifier: MPL-2.0

//! Adapters for connections established with [`midir`].
//!
//! Discovering and selecting ports is left to the application.

use std::future::Future;

use midir::{
    ConnectError, InitError, MidiInput, MidiInputConnection, MidiInputPort, MidiOutput,
    MidiOutputConnection, MidiOutputPort, SendError,
};
use thiserror::Error;
use tokio::sync::mpsc;

use super::{MidiInputHandler, MidiInputMessage, MidiInputSource};
use crate::{OutputError, TimeStamp};

#[derive(Debug, Error)]
pub enum MidiPortError {
    #[error(transparent)]
    Init(#[from] InitError),
    #[error(transparent)]
    ConnectInput(#[from] ConnectError<MidiInput>),
    #[error(transparent)]
    ConnectOutput(#[from] ConnectError<MidiOutput>),
}

impl From<SendError> for OutputError {
    fn from(err: SendError) -> Self {
        OutputError::Send {
            msg: err.to_string().into(),
        }
    }
}

impl super::MidiOutputConnection for MidiOutputConnection {
    fn send_midi_output(&mut self, output: &[u8]) -> crate::OutputResult<()> {
        self.send(output).map_err(Into::into)
    }
}

// Adapter for the midir callback closure
fn handle_input<I>(micros: u64, input: &[u8], input_handler: &mut I)
where
    I: MidiInputHandler,
{
    let ts = TimeStamp::from_micros(micros);
    log::trace!("Received MIDI input: {ts} {input:0x?}");
    if !input_handler.handle_midi_input(ts, input) {
        log::trace!("Ignored MIDI input: {ts} {input:x?}");
    }
}

/// Connect an input port and handle each message directly
/// within the callback thread of [`midir`].
pub fn connect_input_handler<I>(
    port: &MidiInputPort,
    port_name: &str,
    input_handler: I,
) -> Result<MidiInputConnection<I>, MidiPortError>
where
    I: MidiInputHandler + 'static,
{
    let input = MidiInput::new(port_name)?;
    input
        .connect(
            port,
            port_name,
            |micros, input, input_handler| {
                handle_input(micros, input, input_handler);
            },
            input_handler,
        )
        .map_err(Into::into)
}

/// Connect an output port.
pub fn connect_output(
    port: &MidiOutputPort,
    port_name: &str,
) -> Result<MidiOutputConnection, MidiPortError> {
    let output = MidiOutput::new(port_name)?;
    output.connect(port, port_name).map_err(Into::into)
}

/// Forwards all input from the callback thread into a channel.
#[derive(Debug)]
pub struct ForwardMidiInput {
    tx: mpsc::UnboundedSender<MidiInputMessage>,
}

impl MidiInputHandler for ForwardMidiInput {
    fn handle_midi_input(&mut self, ts: TimeStamp, input: &[u8]) -> bool {
        let message = MidiInputMessage {
            ts,
            data: input.to_vec(),
        };
        // Fails only if the receiving side has already been dropped.
        self.tx.send(message).is_ok()
    }
}

/// Receiving side of [`ForwardMidiInput`].
///
/// The source is closed when the input connection is closed.
#[derive(Debug)]
pub struct MidirInputSource {
    rx: mpsc::UnboundedReceiver<MidiInputMessage>,
}

impl MidiInputSource for MidirInputSource {
    fn recv_midi_input(&mut self) -> impl Future<Output = Option<MidiInputMessage>> + Send {
        self.rx.recv()
    }
}

/// Connect an input port as a [`MidiInputSource`] that can be
/// pulled by the input thread.
pub fn connect_input_source(
    port: &MidiInputPort,
    port_name: &str,
) -> Result<(MidiInputConnection<ForwardMidiInput>, MidirInputSource), MidiPortError> {
    let (tx, rx) = mpsc::unbounded_channel();
    let connection = connect_input_handler(port, port_name, ForwardMidiInput { tx })?;
    Ok((connection, MidirInputSource { rx }))
}
