// SPDX-FileCopyrightText: The djio authors
// SPDX-License-Identifier: MPL-2.0

pub mod pioneer_ddj_flx4;

// Descriptors of supported MIDI DJ controllers for auto-detection.
pub const MIDI_DJ_CONTROLLER_DESCRIPTORS: &[&crate::MidiDeviceDescriptor] =
    &[crate::devices::pioneer_ddj_flx4::MIDI_DEVICE_DESCRIPTOR];
