//! Tests for the OA summary packet decoder

mod common;

use aissens_lib::error::FieldError;
use aissens_lib::oa::OaPacket;
use aissens_lib::types::DataType;
use common::{OaPayload, host_offset_secs};

#[test]
fn test_decode_known_payload() {
    let payload = OaPayload::default().encode();
    assert_eq!(payload.len(), 50);

    let packet = OaPacket::decode(&payload).expect("decode failed");
    assert_eq!(packet.data_type, DataType::OaOnly);
    assert_eq!(packet.data_length, 45);
    assert_eq!(packet.status, 1);
    assert_eq!(packet.battery_level, 80);
    assert_eq!(packet.adcavg, 1.5);
    assert_eq!(packet.adclast, 1.52);
    assert_eq!(packet.temperature, 23.5);
    assert_eq!(packet.oa_x, 0.1);
    assert_eq!(packet.oa_y, 0.2);
    assert_eq!(packet.oa_z, 0.3);
    assert_eq!(packet.reserved, "00".repeat(17));
    assert_eq!(
        packet.timestamp.timestamp(),
        1_700_000_000 - host_offset_secs()
    );
}

#[test]
fn test_decode_is_deterministic() {
    let payload = OaPayload::default().encode();
    let first = OaPacket::decode(&payload).expect("decode failed");
    let second = OaPacket::decode(&payload).expect("decode failed");
    assert_eq!(first, second);
}

#[test]
fn test_scaling_round_trip() {
    for raw in [-32768i16, -1, 0, 1, 999, 1000, 1500, 32767] {
        let payload = OaPayload {
            adcavg_raw: raw,
            ..OaPayload::default()
        }
        .encode();
        let packet = OaPacket::decode(&payload).expect("decode failed");
        assert!(
            (packet.adcavg * 1000.0 - f64::from(raw)).abs() < 1e-9,
            "scaling round-trip failed for raw value {raw}"
        );
    }
}

#[test]
fn test_trailing_bytes_ignored() {
    let mut payload = OaPayload::default().encode();
    let packet = OaPacket::decode(&payload).expect("decode failed");

    payload.extend_from_slice(&[0xDE, 0xAD, 0xBE, 0xEF]);
    let with_trailing = OaPacket::decode(&payload).expect("decode failed");
    assert_eq!(packet, with_trailing);
}

#[test]
fn test_real_time_variant() {
    let payload = OaPayload {
        data_type: 10,
        ..OaPayload::default()
    }
    .encode();
    let packet = OaPacket::decode(&payload).expect("decode failed");
    assert_eq!(packet.data_type, DataType::RealTimeOaOnly);
}

#[test]
fn test_reserved_bytes_kept_as_hex() {
    let mut reserved = [0u8; 17];
    reserved[0] = 0xAB;
    reserved[16] = 0x01;
    let payload = OaPayload {
        reserved,
        ..OaPayload::default()
    }
    .encode();
    let packet = OaPacket::decode(&payload).expect("decode failed");
    assert_eq!(packet.reserved, format!("ab{}01", "00".repeat(15)));
}

#[test]
fn test_truncated_payload_names_failing_field() {
    let full = OaPayload::default().encode();

    // Cut inside the temperature field: adclast (ends at 19) still reads,
    // temperature (17..21 is adclast+temperature span; temperature needs
    // bytes 19..21) does not
    let result = OaPacket::decode(&full[..20]);
    let err = result.expect_err("decode should fail");
    assert_eq!(err.field, "temperature");
    assert!(matches!(err.source, FieldError::OutOfRange { .. }));

    // Cut inside the reserved run
    let result = OaPacket::decode(&full[..40]);
    let err = result.expect_err("decode should fail");
    assert_eq!(err.field, "reserved");

    // Empty payload fails on the type byte itself
    let err = OaPacket::decode(&[]).expect_err("decode should fail");
    assert_eq!(err.field, "data_type");
    assert!(matches!(err.source, FieldError::OutOfRange { .. }));
}

#[test]
fn test_to_json_projection() {
    let payload = OaPayload::default().encode();
    let packet = OaPacket::decode(&payload).expect("decode failed");
    let json = packet.to_json();

    assert_eq!(json["data_type"], 9);
    assert_eq!(json["data_type_name"], "OA only");
    assert_eq!(json["status"], 1);
    assert_eq!(json["battery_level"], 80);
    assert_eq!(json["adcavg"].as_f64().expect("adcavg"), 1.5);
    assert!((json["oa_x"].as_f64().expect("oa_x") - 0.1).abs() < 1e-6);
    assert!((json["oa_y"].as_f64().expect("oa_y") - 0.2).abs() < 1e-6);
    assert!((json["oa_z"].as_f64().expect("oa_z") - 0.3).abs() < 1e-6);
    assert_eq!(json["reserved"], "00".repeat(17));
    assert_eq!(json["timestamp"], packet.timestamp.to_rfc3339());
}
