//! Integration tests for the dial-core decoders.
//!
//! These tests sweep the byte/value space through the public API instead of
//! spot-checking single reports, so a new trigger code or a changed report ID
//! shows up here first.

use dial_core::report::raw::{
    DIAL_REPORT_ID, TRIGGER_LEFT_CCW, TRIGGER_LEFT_CW, TRIGGER_OFFSET, TRIGGER_RIGHT_CCW,
    TRIGGER_RIGHT_CW,
};
use dial_core::{
    decode_input_event, decode_raw_report, DialIdentity, DialTurnEvent, RelAxis,
    RotationDirection,
};

fn report(report_id: u8, trigger: u8) -> [u8; 8] {
    let mut buf = [0u8; 8];
    buf[0] = report_id;
    buf[TRIGGER_OFFSET] = trigger;
    buf
}

#[test]
fn test_no_event_for_any_other_report_id() {
    for report_id in (0u8..=255).filter(|id| *id != DIAL_REPORT_ID) {
        for trigger in 0u8..=255 {
            assert_eq!(
                decode_raw_report(&report(report_id, trigger)),
                None,
                "report id 0x{report_id:02X} trigger 0x{trigger:02X} must be ignored"
            );
        }
    }
}

#[test]
fn test_zero_trigger_never_produces_an_event() {
    // Whatever the filler bytes hold, a zero trigger is "no event".
    for filler in 0u8..=255 {
        let buf = [DIAL_REPORT_ID, filler, filler, 0x00, filler];
        assert_eq!(decode_raw_report(&buf), None);
    }
}

#[test]
fn test_each_defined_trigger_maps_to_exactly_one_turn() {
    let expected = [
        (TRIGGER_LEFT_CCW, DialIdentity::Left, RotationDirection::CounterClockwise),
        (TRIGGER_LEFT_CW, DialIdentity::Left, RotationDirection::Clockwise),
        (TRIGGER_RIGHT_CCW, DialIdentity::Right, RotationDirection::CounterClockwise),
        (TRIGGER_RIGHT_CW, DialIdentity::Right, RotationDirection::Clockwise),
    ];

    for (trigger, identity, direction) in expected {
        assert_eq!(
            decode_raw_report(&report(DIAL_REPORT_ID, trigger)),
            Some(DialTurnEvent::new(identity, direction)),
            "trigger 0x{trigger:02X}"
        );
    }
}

#[test]
fn test_only_the_four_defined_triggers_produce_events() {
    let produced = (0u8..=255)
        .filter(|t| decode_raw_report(&report(DIAL_REPORT_ID, *t)).is_some())
        .count();
    assert_eq!(produced, 4);
}

#[test]
fn test_input_event_direction_follows_sign_for_every_magnitude() {
    for value in [-1000, -3, -1, 1, 3, 1000] {
        let event = decode_input_event(0x02, RelAxis::HWheel.linux_code(), value)
            .expect("non-zero value must decode");
        assert_eq!(event.identity, DialIdentity::Right);
        assert_eq!(event.direction.sign(), value.signum());
    }
}
