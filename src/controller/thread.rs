// SPDX-FileCopyrightText: The djio authors
// SPDX-License-Identifier: MPL-2.0

use futures_util::future::{AbortHandle, Abortable, Aborted};

use super::Engine;
use crate::{MidiInputHandler as _, MidiInputMessage, MidiInputSource};

/// Pump all messages from the source through the engine.
///
/// Returns the number of received messages after the source has
/// been closed. Receiving the next message is the only suspension
/// point, i.e. each message is processed completely.
pub async fn run_input_loop<S>(engine: &mut Engine, source: &mut S) -> u64
where
    S: MidiInputSource,
{
    let mut received = 0;
    while let Some(MidiInputMessage { ts, data }) = source.recv_midi_input().await {
        received += 1;
        log::trace!("Received MIDI input: {ts} {data:x?}");
        if !engine.handle_midi_input(ts, &data) {
            log::trace!("Ignored MIDI input: {ts} {data:x?}");
        }
    }
    received
}

/// Dedicated thread for processing input.
///
/// Decoding, storing values, and invoking handlers all happen on
/// this thread.
#[derive(Debug)]
pub struct InputThread {
    abort_handle: AbortHandle,
    os_thread: std::thread::JoinHandle<()>,
}

impl InputThread {
    #[must_use]
    pub fn spawn<S>(mut engine: Engine, mut source: S) -> Self
    where
        S: MidiInputSource + 'static,
    {
        let (abort_handle, abort_registration) = AbortHandle::new_pair();
        let os_thread = std::thread::spawn(move || {
            log::info!("Entering input thread");
            let runtime = match tokio::runtime::Builder::new_current_thread().build() {
                Ok(runtime) => runtime,
                Err(err) => {
                    log::error!("Failed to create Tokio runtime: {err}");
                    return;
                }
            };
            let input_loop = Abortable::new(
                run_input_loop(&mut engine, &mut source),
                abort_registration,
            );
            runtime.block_on(async move {
                log::info!("Running input loop");
                match input_loop.await {
                    Ok(received) => {
                        log::info!("Input source closed after {received} message(s)");
                    }
                    Err(Aborted) => {
                        log::info!("Input loop aborted");
                    }
                }
            });
            log::info!(
                "Exiting input thread ({count} unrecognized message(s))",
                count = engine.decoder().unrecognized_count()
            );
        });
        Self {
            abort_handle,
            os_thread,
        }
    }

    /// Check if the input loop has terminated, e.g. after the
    /// source has been closed.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.os_thread.is_finished()
    }

    /// Stop processing and wait until the thread has exited.
    ///
    /// Pending MSB values of 14-bit controls are discarded.
    pub fn abort_and_join(self) -> anyhow::Result<()> {
        let Self {
            abort_handle,
            os_thread,
        } = self;
        abort_handle.abort();
        os_thread
            .join()
            .map_err(|err| anyhow::anyhow!("Input thread panicked: {err:?}"))
    }
}
