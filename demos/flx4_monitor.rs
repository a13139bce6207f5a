// SPDX-FileCopyrightText: The djio authors
// SPDX-License-Identifier: MPL-2.0

//! Log all events of a connected DDJ-FLX4 and light up pressed pads.
//!
//! An optional command line argument overrides the MIDI port name prefix.

use std::{
    io::stdin,
    sync::{Arc, Mutex},
};

use flx4io::{
    flx4,
    midi::midir::{connect_input_source, connect_output},
    Controller, LedOutput, LedState, PadFilter, PadMode,
};
use midir::{MidiInput, MidiOutput};

fn main() {
    pretty_env_logger::init();
    if let Err(err) = run() {
        log::error!("{err:#}");
    }
}

fn run() -> anyhow::Result<()> {
    let port_name_prefix = std::env::args()
        .nth(1)
        .unwrap_or_else(|| flx4::MIDI_DEVICE_DESCRIPTOR.port_name_prefix.to_owned());
    let client_name = env!("CARGO_PKG_NAME");

    let midi_input = MidiInput::new(client_name)?;
    let Some((input_port, input_port_name)) = midi_input.ports().into_iter().find_map(|port| {
        let port_name = midi_input.port_name(&port).ok()?;
        port_name
            .starts_with(&port_name_prefix)
            .then_some((port, port_name))
    }) else {
        anyhow::bail!("No MIDI input port found with prefix \"{port_name_prefix}\"");
    };
    let midi_output = MidiOutput::new(client_name)?;
    let Some((output_port, output_port_name)) =
        midi_output.ports().into_iter().find_map(|port| {
            let port_name = midi_output.port_name(&port).ok()?;
            port_name
                .starts_with(&port_name_prefix)
                .then_some((port, port_name))
        })
    else {
        anyhow::bail!("No MIDI output port found with prefix \"{port_name_prefix}\"");
    };

    let controller = Controller::new();
    log::info!(
        "Connecting {device_name}: input port \"{input_port_name}\", output port \"{output_port_name}\"",
        device_name = controller.device_descriptor().name(),
    );
    let led_output = Arc::new(Mutex::new(LedOutput::attach(connect_output(
        &output_port,
        &output_port_name,
    )?)));
    led_output
        .lock()
        .map_err(|_| anyhow::anyhow!("poisoned"))?
        .all_off()?;

    controller.router().on_any(|event| {
        log::info!("{event:?}");
        Ok(())
    });
    controller.router().on_pad(PadFilter::default(), {
        let led_output = Arc::clone(&led_output);
        move |event| {
            let Some(pad) = event.as_pad() else {
                return Ok(());
            };
            let mut led_output = led_output
                .lock()
                .map_err(|_| anyhow::anyhow!("poisoned"))?;
            led_output.set_pad(
                pad.deck,
                pad.pad,
                LedState::from(pad.pressed),
                PadMode::HotCue,
                false,
            )?;
            Ok(())
        }
    });

    let (input_connection, input_source) = connect_input_source(&input_port, &input_port_name)?;
    let input_thread = controller.spawn_input_thread(input_source);

    println!("Press ENTER to exit...");
    stdin().read_line(&mut String::new())?;

    input_connection.close();
    input_thread.abort_and_join()?;
    if let Ok(mut led_output) = led_output.lock() {
        led_output.all_off()?;
    }
    Ok(())
}
