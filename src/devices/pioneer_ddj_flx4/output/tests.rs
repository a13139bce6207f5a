// SPDX-FileCopyrightText: The djio authors
// SPDX-License-Identifier: MPL-2.0

use std::collections::HashSet;

use strum::IntoEnumIterator as _;

use super::*;

#[derive(Debug, Default)]
struct RecordMidiOutput {
    sent: Vec<[u8; 3]>,
}

impl MidiOutputConnection for RecordMidiOutput {
    fn send_midi_output(&mut self, output: &[u8]) -> OutputResult<()> {
        self.sent.push(output.try_into().unwrap());
        Ok(())
    }
}

#[derive(Debug)]
struct DisconnectedMidiOutput;

impl MidiOutputConnection for DisconnectedMidiOutput {
    fn send_midi_output(&mut self, _output: &[u8]) -> OutputResult<()> {
        Err(OutputError::Send {
            msg: "disconnected".into(),
        })
    }
}

#[test]
fn set_pad_in_beat_jump_mode() {
    let mut planes = LedPlanes::new();
    for _ in 0..2 {
        assert_eq!(
            MidiMessage::note_on(7, 51, 127),
            set_pad(&mut planes, Deck::One, 3, LedState::On, PadMode::BeatJump, false).unwrap()
        );
    }
    assert!(planes.is_lit(Deck::One, false, PadMode::BeatJump, 3));
    assert_eq!(0b1000, planes.pads(Deck::One, false, PadMode::BeatJump));
    assert!(!planes.is_lit(Deck::One, true, PadMode::BeatJump, 3));
    assert!(!planes.is_lit(Deck::One, false, PadMode::HotCue, 3));
    assert!(!planes.is_lit(Deck::Two, false, PadMode::BeatJump, 3));
}

#[test]
fn set_pad_channels() {
    let mut planes = LedPlanes::new();
    for (deck, shifted, channel) in [
        (Deck::One, false, 7),
        (Deck::One, true, 8),
        (Deck::Two, false, 9),
        (Deck::Two, true, 10),
    ] {
        let message =
            set_pad(&mut planes, deck, 7, LedState::On, PadMode::KeyShift, shifted).unwrap();
        assert_eq!([0x90 | channel, 112 + 7, 127], message.to_bytes());
    }
    let message =
        set_pad(&mut planes, Deck::Two, 7, LedState::Off, PadMode::KeyShift, true).unwrap();
    assert_eq!([0x9a, 119, 0], message.to_bytes());
    assert!(!planes.is_lit(Deck::Two, true, PadMode::KeyShift, 7));
    assert!(planes.is_lit(Deck::Two, false, PadMode::KeyShift, 7));
}

#[test]
fn set_pad_out_of_range() {
    let mut planes = LedPlanes::new();
    assert!(matches!(
        set_pad(&mut planes, Deck::One, 8, LedState::On, PadMode::HotCue, false),
        Err(OutputError::InvalidAddress(_))
    ));
    assert!(planes.is_dark());
}

#[test]
fn set_all_pads_lights_a_single_plane() {
    let mut planes = LedPlanes::new();
    let messages = set_all_pads(&mut planes, Deck::Two, LedState::On, PadMode::Sampler, false);
    assert_eq!(8, messages.len());
    assert!(messages
        .iter()
        .zip(64..)
        .all(|(message, note)| *message == MidiMessage::note_on(9, note, 127)));
    assert_eq!(0xff, planes.pads(Deck::Two, false, PadMode::Sampler));
    assert_eq!(0x00, planes.pads(Deck::Two, true, PadMode::Sampler));
}

#[test]
fn clear_pads_of_every_mode_and_layer() {
    let mut planes = LedPlanes::new();
    set_all_pads(&mut planes, Deck::Two, LedState::On, PadMode::HotCue, true);
    set_all_pads(&mut planes, Deck::One, LedState::On, PadMode::HotCue, false);
    let messages = clear_pads(&mut planes, Deck::Two);
    assert_eq!(2 * 8 * 8, messages.len());
    let expected = [9, 10]
        .into_iter()
        .flat_map(|channel| {
            PadMode::iter().flat_map(move |mode| {
                (0..8).map(move |pad| (channel, mode.note_offset() + pad))
            })
        })
        .collect::<HashSet<_>>();
    let actual = messages
        .iter()
        .inspect(|message| assert_eq!(0, message.data2))
        .map(|message| (message.channel, message.data1))
        .collect::<HashSet<_>>();
    assert_eq!(expected, actual);
    assert_eq!(0x00, planes.pads(Deck::Two, true, PadMode::HotCue));
    // The other deck is untouched
    assert_eq!(0xff, planes.pads(Deck::One, false, PadMode::HotCue));
}

#[test]
fn set_button_led() {
    assert_eq!(
        MidiMessage::note_on(1, 0x0b, 127),
        set_button(Button::PlayPause, LedState::On, Some(Deck::Two), false).unwrap()
    );
    assert_eq!(
        MidiMessage::note_on(6, 0x78, 0),
        set_button(Button::MasterCue, LedState::Off, None, true).unwrap()
    );
    assert!(matches!(
        set_button(Button::CueLoopCall, LedState::On, Some(Deck::One), true),
        Err(OutputError::InvalidAddress(InvalidAddress {
            control: Control::Button(Button::CueLoopCall),
            deck: Some(Deck::One),
            shifted: true,
        }))
    ));
    assert!(set_button(Button::PlayPause, LedState::On, None, false).is_err());
}

#[test]
fn set_tab_led() {
    assert_eq!(
        MidiMessage::note_on(0, 34, 127),
        set_tab(Deck::One, 3, LedState::On).unwrap()
    );
    assert!(matches!(
        set_tab(Deck::One, 4, LedState::On),
        Err(OutputError::InvalidAddress(_))
    ));
}

#[test]
fn level_meter() {
    assert_eq!(
        MidiMessage::control_change(0, 2, 0),
        set_level_meter(Deck::One, 0.0).unwrap()
    );
    assert_eq!(
        MidiMessage::control_change(1, 2, 64),
        set_level_meter(Deck::Two, 0.5).unwrap()
    );
    assert_eq!(
        MidiMessage::control_change(1, 2, 127),
        set_level_meter(Deck::Two, 1.0).unwrap()
    );
    // Clamped
    assert_eq!(
        MidiMessage::control_change(0, 2, 127),
        set_level_meter(Deck::One, 1.5).unwrap()
    );
    assert_eq!(
        MidiMessage::control_change(0, 2, 0),
        set_level_meter(Deck::One, -0.1).unwrap()
    );
    for level in [f32::NAN, f32::INFINITY, f32::NEG_INFINITY] {
        assert!(matches!(
            set_level_meter(Deck::One, level),
            Err(OutputError::InvalidValue { .. })
        ));
    }
}

#[test]
fn level_meter_raw() {
    assert_eq!(
        MidiMessage::control_change(1, 2, 127),
        set_level_meter_raw(Deck::Two, 127).unwrap()
    );
    assert!(matches!(
        set_level_meter_raw(Deck::Two, 128),
        Err(OutputError::InvalidValue { .. })
    ));
}

#[test]
fn all_off_is_idempotent() {
    let mut planes = LedPlanes::new();
    set_all_pads(&mut planes, Deck::One, LedState::On, PadMode::BeatLoop, true);
    let first = all_off(&mut planes);
    assert!(planes.is_dark());
    let second = all_off(&mut planes);
    assert_eq!(first, second);
    assert!(first.iter().all(|message| message.data2 == 0));
    // Pads, buttons, tabs, and meters
    assert!(first.contains(&MidiMessage::note_on(8, 96, 0)));
    assert!(first.contains(&MidiMessage::note_on(1, 0x68, 0)));
    assert!(first.contains(&MidiMessage::note_on(1, 27, 0)));
    assert!(first.contains(&MidiMessage::control_change(1, 2, 0)));
}

#[test]
fn led_output_sends_messages() {
    let mut output = LedOutput::attach(RecordMidiOutput::default());
    output
        .set_pad(Deck::One, 0, LedState::On, PadMode::HotCue, false)
        .unwrap();
    output.set_level_meter(Deck::Two, 1.0).unwrap();
    assert!(output.planes().is_lit(Deck::One, false, PadMode::HotCue, 0));
    output.all_off().unwrap();
    assert!(output.planes().is_dark());
    let sent = output.detach().sent;
    assert_eq!([0x97, 48, 127], sent[0]);
    assert_eq!([0xb1, 2, 127], sent[1]);
    assert!(sent[2..].iter().all(|message| message[2] == 0));
}

#[test]
fn led_output_send_failure() {
    let mut output = LedOutput::attach(DisconnectedMidiOutput);
    assert!(matches!(
        output.set_tab(Deck::Two, 0, LedState::On),
        Err(OutputError::Send { .. })
    ));
    assert!(matches!(output.all_off(), Err(OutputError::Send { .. })));
    // Invalid input is rejected before sending
    assert!(matches!(
        output.set_level_meter_raw(Deck::One, 200),
        Err(OutputError::InvalidValue { .. })
    ));
}
