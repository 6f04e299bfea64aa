extern crate ofp_codec;

use ofp_codec::message::*;
use ofp_codec::{decode, encode};

const V2: u8 = 2;
const V4: u8 = 4;

fn round_trip(version: u8, body: MessageBody) {
    let msg = Message::new(version, 0xcafe, body);
    let data = encode(&msg).unwrap();
    // the header length field always equals the frame size
    let declared = (usize::from(data[2]) << 8) | usize::from(data[3]);
    assert_eq!(declared, data.len());
    assert_eq!(decode(&data).unwrap(), msg);
}

#[test]
fn hello_is_eight_bytes_on_both_versions() {
    for version in &[V2, V4] {
        let msg = Message::new(*version, 0, MessageBody::Hello);
        assert_eq!(encode(&msg).unwrap().len(), 8);
    }
}

#[test]
fn echo_round_trips_on_both_versions() {
    round_trip(V2, MessageBody::EchoRequest(vec![1, 2, 3]));
    round_trip(V2, MessageBody::EchoReply(vec![]));
    round_trip(V4, MessageBody::EchoRequest(vec![0xDE, 0xAD, 0xBE, 0xEF]));
    round_trip(V4, MessageBody::EchoReply(vec![9; 100]));
}

#[test]
fn v4_flow_mod_round_trips_through_the_public_surface() {
    round_trip(
        V4,
        MessageBody::FlowMod(FlowMod {
            cookie: 7,
            cookie_mask: 0xff,
            table_id: 1,
            command: FlowModCommand::Modify,
            idle_timeout: 0,
            hard_timeout: 30,
            priority: 1000,
            buffer_id: Some(77),
            out_port: PseudoPort::Controller,
            out_group: 0xffffffff,
            flags: vec![FlowModFlag::ResetCounts],
            pattern: Match {
                fields: vec![
                    MatchField::basic(OxmField::EthType, vec![0x86, 0xdd]),
                    MatchField::basic_masked(
                        OxmField::Metadata,
                        vec![0, 0, 0, 0, 0, 0, 0, 9],
                        vec![0xff; 8],
                    ),
                ],
            },
            instructions: vec![Instruction::Meter { meter_id: 4 }, Instruction::ClearActions],
        }),
    );
}

#[test]
fn version_byte_selects_the_codec_on_decode() {
    let v2_frame = encode(&Message::new(V2, 1, MessageBody::BarrierRequest)).unwrap();
    let v4_frame = encode(&Message::new(V4, 1, MessageBody::BarrierRequest)).unwrap();
    assert_eq!(decode(&v2_frame).unwrap().version, V2);
    assert_eq!(decode(&v4_frame).unwrap().version, V4);
}

#[test]
fn a_v2_frame_keeps_its_experimental_flag() {
    let mut msg = Message::new(V2, 3, MessageBody::FeaturesRequest);
    msg.experimental = true;
    let data = encode(&msg).unwrap();
    assert_eq!(data[0], 0x82);
    let parsed = decode(&data).unwrap();
    assert!(parsed.experimental);
    assert_eq!(parsed, msg);
}

#[test]
fn a_v4_message_must_not_carry_the_experimental_flag() {
    let mut msg = Message::new(V4, 3, MessageBody::FeaturesRequest);
    msg.experimental = true;
    assert!(encode(&msg).is_err());
}

#[test]
fn malformed_frames_produce_exactly_one_error() {
    // short header
    assert!(decode(&[0x04]).is_err());
    // unknown message type
    assert!(decode(&[0x04, 0x63, 0x00, 0x08, 0, 0, 0, 0]).is_err());
    // unknown version
    assert!(decode(&[0x07, 0x00, 0x00, 0x08, 0, 0, 0, 0]).is_err());
    // body shorter than the fixed layout needs
    assert!(decode(&[0x04, 0x06, 0x00, 0x0a, 0, 0, 0, 0, 0xaa, 0xbb]).is_err());
}
