// SPDX-FileCopyrightText: The djio authors
// SPDX-License-Identifier: MPL-2.0

use std::collections::HashSet;

use strum::IntoEnumIterator as _;

use super::*;

/// All (control, deck, shifted) combinations that are expected to have
/// an input address.
fn input_controls() -> Vec<(Control, Option<Deck>, bool)> {
    let mut controls = Vec::new();
    for deck in Deck::iter() {
        for pad in 0..NUM_PADS_PER_DECK {
            controls.push((Control::Pad(pad), Some(deck), false));
        }
        for tab in 0..NUM_TABS_PER_DECK {
            controls.push((Control::Tab(tab), Some(deck), false));
        }
        for surface in JogSurface::iter() {
            controls.push((Control::Jog(surface), Some(deck), false));
        }
        controls.push((Control::JogTouch, Some(deck), false));
    }
    for (button, deck, shifted, _) in button_addresses() {
        controls.push((Control::Button(button), deck, shifted));
    }
    for knob in Knob::iter() {
        if knob.is_deck_scoped() {
            for deck in Deck::iter() {
                controls.push((Control::Knob(knob), Some(deck), false));
            }
        } else {
            controls.push((Control::Knob(knob), None, false));
        }
    }
    controls.push((Control::BrowseRotate, None, false));
    controls.push((Control::BrowseRotate, None, true));
    controls
}

#[test]
fn addresses_are_unique() {
    let mut addresses = HashSet::new();
    for (control, deck, shifted) in input_controls() {
        let address = address_of(control, deck, shifted).unwrap();
        assert!(
            addresses.insert((address.kind, address.channel, address.data1)),
            "duplicate address of {control}: {address:?}"
        );
        if let Control::Knob(knob) = control {
            if let Some(lsb_cc) = knob.midi_lsb_cc() {
                // The TRIM LSB is the only one shared with another control
                if knob != Knob::Trim {
                    assert!(addresses.insert((address.kind, address.channel, lsb_cc)));
                }
            }
        }
    }
}

#[test]
fn every_address_resolves_to_its_control() {
    for (control, deck, shifted) in input_controls() {
        let address = address_of(control, deck, shifted).unwrap();
        let (resolved, sensor) = control_of(address.to_midi_message(0x7f)).unwrap();
        assert_eq!(address, resolved);
        assert_eq!(control, sensor.control(), "{address:?}");
    }
}

#[test]
fn every_lsb_resolves_to_its_knob() {
    for knob in Knob::iter().filter(|knob| knob.is_14bit() && *knob != Knob::Trim) {
        let decks: &[Option<Deck>] = if knob.is_deck_scoped() {
            &DECK_SCOPES
        } else {
            &MAIN_SCOPE
        };
        for &deck in decks {
            let address = address_of(knob.into(), deck, false).unwrap();
            let lsb_cc = knob.midi_lsb_cc().unwrap();
            let message = MidiMessage::control_change(address.channel, lsb_cc, 0);
            assert_eq!(
                Some(Sensor::KnobLsb { knob, deck }),
                control_of(message).map(|(_, sensor)| sensor)
            );
        }
    }
}

#[test]
fn invalid_addresses() {
    for (control, deck, shifted) in [
        (Control::Pad(8), Some(Deck::One), false),
        (Control::Pad(0), None, false),
        (Control::Tab(4), Some(Deck::Two), false),
        (Button::PlayPause.into(), None, false),
        (Button::CueLoopCall.into(), Some(Deck::One), true),
        (Button::BeatSyncLong.into(), Some(Deck::Two), true),
        (Button::FxChSelect.into(), Some(Deck::One), true),
        (Button::MasterCue.into(), Some(Deck::One), false),
        (Knob::ChFader.into(), None, false),
        (Knob::Crossfader.into(), Some(Deck::One), false),
        (Knob::Tempo.into(), Some(Deck::One), true),
        (Control::BrowseRotate, Some(Deck::One), false),
        (Control::LevelMeter, None, false),
    ] {
        assert_eq!(
            Err(InvalidAddress {
                control,
                deck,
                shifted
            }),
            address_of(control, deck, shifted)
        );
    }
}

#[test]
fn level_meter_is_output_only() {
    let address = address_of(Control::LevelMeter, Some(Deck::Two), false).unwrap();
    assert_eq!(
        (MessageKind::ControlChange, 1, 2),
        (address.kind, address.channel, address.data1)
    );
    // Shares the address of the TRIM MSB on input
    assert!(control_of(address.to_midi_message(0)).is_some());
}

#[test]
fn pad_mode_offsets() {
    let offsets = PadMode::iter().map(pad_mode_offset).collect::<Vec<_>>();
    assert_eq!(vec![0, 16, 32, 48, 64, 80, 96, 112], offsets);
    assert_eq!(PadMode::HotCue, PadMode::default());
}

#[test]
fn names() {
    assert_eq!("PLAY_PAUSE", Button::PlayPause.to_string());
    assert_eq!("BEAT_4_EXIT", Button::Beat4Exit.to_string());
    assert_eq!("CH_FADER", Knob::ChFader.to_string());
    assert_eq!("EQ_HI", <&'static str>::from(Knob::EqHi));
    assert_eq!("BEAT_JUMP", PadMode::BeatJump.to_string());
    assert_eq!("PAD_FX_2", PadMode::PadFx2.to_string());
    assert_eq!("2", Deck::Two.to_string());
    for button in Button::iter() {
        assert_eq!(Some(Control::Button(button)), Control::from_name(&button.to_string()));
    }
    for knob in Knob::iter() {
        assert_eq!(Some(Control::Knob(knob)), Control::from_name(&knob.to_string()));
    }
    for mode in PadMode::iter() {
        assert_eq!(Ok(mode), mode.to_string().parse());
    }
    assert_eq!(None, Control::from_name("JOG"));
}

#[test]
fn deck_numbers() {
    for deck in Deck::iter() {
        assert_eq!(Some(deck), Deck::from_number(deck.number()));
    }
    assert_eq!(None, Deck::from_number(0));
    assert_eq!(None, Deck::from_number(3));
}
