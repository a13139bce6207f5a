// SPDX-FileCopyrightText: The djio authors
// SPDX-License-Identifier: MPL-2.0

use std::sync::Arc;

use crate::{
    devices::pioneer_ddj_flx4, Deck, DeviceDescriptor, Event, EventRouter, MidiInputDecoder,
    MidiInputHandler, MidiMessage, TimeStamp, Value, ValueStore,
};

#[cfg(feature = "controller-thread")]
pub mod thread;


#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerDescriptor {
    /// Number of physical decks
    pub num_decks: u8,

    /// Number of virtual decks
    pub num_virtual_decks: u8,

    /// Number of mixer channels
    ///
    /// Usually equals the number of virtual decks.
    pub num_mixer_channels: u8,

    /// Number of performance pads per deck
    pub num_pads_per_deck: u8,

    /// Number of effect units
    pub num_effect_units: u8,
}

/// Processes input messages one at a time.
///
/// Each message is decoded, the resulting event is applied to the
/// [`ValueStore`] and then dispatched by the [`EventRouter`]. Handlers
/// thus observe the updated value.
#[derive(Debug)]
pub struct Engine {
    decoder: MidiInputDecoder,
    values: Arc<ValueStore>,
    router: Arc<EventRouter>,
}

impl Engine {
    #[must_use]
    pub fn new(values: Arc<ValueStore>, router: Arc<EventRouter>) -> Self {
        Self {
            decoder: MidiInputDecoder::new(),
            values,
            router,
        }
    }

    #[must_use]
    pub const fn decoder(&self) -> &MidiInputDecoder {
        &self.decoder
    }

    fn apply(&self, event: Event) -> Event {
        if self.values.update(&event) {
            log::trace!("Updated value: {event:?}");
        }
        let summary = self.router.dispatch(&event);
        if summary.failed > 0 {
            log::debug!(
                "{failed} of {invoked} handler(s) failed on {event:?}",
                failed = summary.failed,
                invoked = summary.invoked,
            );
        }
        event
    }

    /// Decode, store, and dispatch a message.
    pub fn handle_midi_message(&mut self, message: MidiMessage) -> Option<Event> {
        let event = self.decoder.decode(message)?;
        Some(self.apply(event))
    }

    /// Decode, store, and dispatch raw input.
    pub fn handle_midi_input_bytes(&mut self, input: &[u8]) -> Option<Event> {
        let event = self.decoder.decode_midi_input(input)?;
        Some(self.apply(event))
    }
}

impl MidiInputHandler for Engine {
    fn handle_midi_input(&mut self, ts: TimeStamp, input: &[u8]) -> bool {
        let unrecognized_before = self.decoder.unrecognized_count();
        if let Some(event) = self.handle_midi_input_bytes(input) {
            log::trace!("Handled MIDI input at {ts}: {event:?}");
        }
        self.decoder.unrecognized_count() == unrecognized_before
    }
}

/// Shared state of a connected controller.
///
/// Cheap to clone. All clones share the same values and handlers.
#[derive(Debug, Clone, Default)]
pub struct Controller {
    values: Arc<ValueStore>,
    router: Arc<EventRouter>,
}

impl Controller {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a custom router, e.g. with a custom error reporter.
    #[must_use]
    pub fn with_router(router: EventRouter) -> Self {
        Self {
            values: Default::default(),
            router: Arc::new(router),
        }
    }

    #[must_use]
    pub const fn device_descriptor(&self) -> &'static DeviceDescriptor {
        pioneer_ddj_flx4::DEVICE_DESCRIPTOR
    }

    #[must_use]
    pub const fn controller_descriptor(&self) -> &'static ControllerDescriptor {
        pioneer_ddj_flx4::CONTROLLER_DESCRIPTOR
    }

    #[must_use]
    pub const fn router(&self) -> &Arc<EventRouter> {
        &self.router
    }

    #[must_use]
    pub const fn values(&self) -> &Arc<ValueStore> {
        &self.values
    }

    /// Look up the last known value of a knob or button by name.
    #[must_use]
    pub fn get_value(&self, name: &str, deck: Option<Deck>) -> Option<Value> {
        self.values.get_by_name(name, deck)
    }

    /// Create an engine that operates on the shared state.
    ///
    /// Only a single engine should be active at a time.
    #[must_use]
    pub fn new_engine(&self) -> Engine {
        Engine::new(Arc::clone(&self.values), Arc::clone(&self.router))
    }

    /// Process all input from the source on a dedicated thread.
    #[cfg(feature = "controller-thread")]
    #[must_use]
    pub fn spawn_input_thread<S>(&self, source: S) -> thread::InputThread
    where
        S: crate::MidiInputSource + 'static,
    {
        thread::InputThread::spawn(self.new_engine(), source)
    }
}
