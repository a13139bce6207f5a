// SPDX-FileCopyrightText: The djio authors
// SPDX-License-Identifier: MPL-2.0

use float_cmp::assert_approx_eq;

use super::*;

#[test]
fn combine_u7_be() {
    assert_eq!(0, u7_be_to_u14(0, 0));
    assert_eq!(127, u7_be_to_u14(0, 127));
    assert_eq!(128, u7_be_to_u14(1, 0));
    assert_eq!(8192, u7_be_to_u14(64, 0));
    assert_eq!(16383, u7_be_to_u14(127, 127));
}

#[test]
fn step_encoder_from_u7() {
    assert_eq!(None, StepEncoderInput::from_u7(0));
    assert_eq!(Some(1), StepEncoderInput::from_u7(1).map(|s| s.delta));
    assert_eq!(Some(63), StepEncoderInput::from_u7(63).map(|s| s.delta));
    assert_eq!(Some(64), StepEncoderInput::from_u7(64).map(|s| s.delta));
    assert_eq!(Some(-63), StepEncoderInput::from_u7(65).map(|s| s.delta));
    assert_eq!(Some(-1), StepEncoderInput::from_u7(127).map(|s| s.delta));
}

#[test]
#[allow(clippy::float_cmp)]
fn slider_from_u7() {
    assert_eq!(SliderInput::MIN_POSITION, SliderInput::from_u7(0).position);
    assert_eq!(
        SliderInput::MAX_POSITION,
        SliderInput::from_u7(127).position
    );
}

#[test]
#[allow(clippy::float_cmp)]
fn slider_from_u14() {
    assert_eq!(SliderInput::MIN_POSITION, SliderInput::from_u14(0).position);
    assert_eq!(
        SliderInput::MAX_POSITION,
        SliderInput::from_u14(16383).position
    );
    assert_approx_eq!(f32, 0.5, SliderInput::from_u14(8192).position, epsilon = 1e-4);
}

#[test]
#[allow(clippy::float_cmp)]
fn center_slider_from_u14() {
    assert_eq!(
        CenterSliderInput::MIN_POSITION,
        CenterSliderInput::from_u14(0).position
    );
    assert!(CenterSliderInput::MIN_POSITION < CenterSliderInput::from_u14(1).position);
    assert!(CenterSliderInput::CENTER_POSITION > CenterSliderInput::from_u14(8191).position);
    assert_eq!(
        CenterSliderInput::CENTER_POSITION,
        CenterSliderInput::from_u14(8192).position
    );
    assert!(CenterSliderInput::CENTER_POSITION < CenterSliderInput::from_u14(8193).position);
    assert!(CenterSliderInput::MAX_POSITION > CenterSliderInput::from_u14(16383).position);
    assert_approx_eq!(
        f32,
        CenterSliderInput::MAX_POSITION,
        CenterSliderInput::from_u14(16383).position,
        epsilon = 1e-3
    );
}

#[test]
fn event_kind_and_deck() {
    let pad = Event::from(PadEvent {
        deck: Deck::Two,
        pad: 7,
        pressed: true,
        velocity: 127,
    });
    assert_eq!(EventKind::Pad, pad.kind());
    assert_eq!(Some(Deck::Two), pad.deck());
    assert!(pad.as_pad().is_some());
    assert!(pad.as_knob().is_none());

    let browse = Event::from(BrowseEvent {
        steps: -1,
        shifted: true,
    });
    assert_eq!(EventKind::Browse, browse.kind());
    assert_eq!(None, browse.deck());

    let master_cue = Event::from(ButtonEvent {
        button: Button::MasterCue,
        deck: None,
        shifted: false,
        pressed: false,
    });
    assert_eq!(None, master_cue.deck());
    assert_eq!("button", <&'static str>::from(master_cue.kind()));
}
