//! Version dispatch for the public codec surface: `encode` picks the codec
//! by the message's version field, `decode` by the version byte of the wire
//! header. Versions are a closed set.

use crate::message::Message;
use crate::ofp_header::{OfpHeader, OPENFLOW_0_02_VERSION, OPENFLOW_0_04_VERSION};
use crate::ofp_message::{OfpMessage, OfpSerializationError};

/// Encode a complete message into a fresh wire frame, header included.
pub fn encode(message: &Message) -> Result<Vec<u8>, OfpSerializationError> {
    match message.version {
        OPENFLOW_0_02_VERSION => openflow0x02::encode(message),
        OPENFLOW_0_04_VERSION => openflow0x04::encode(message),
        v => Err(OfpSerializationError::UnsupportedVersion { version: v }),
    }
}

/// Decode one complete wire frame. The buffer must hold at least the
/// `length` the header declares; bytes beyond it are ignored.
pub fn decode(buf: &[u8]) -> Result<Message, OfpSerializationError> {
    let header = OfpHeader::parse(buf)?;
    if header.length() < OfpHeader::size() {
        return Err(OfpSerializationError::LengthMismatch {
            declared: header.length(),
            found: OfpHeader::size(),
            structure: "message header".to_string(),
        });
    }
    if buf.len() < header.length() {
        return Err(OfpSerializationError::ShortInput {
            expected: header.length(),
            available: buf.len(),
            structure: "message".to_string(),
        });
    }
    trace!(
        "Decoding a version {} frame of {} bytes",
        header.version(),
        header.length()
    );
    let body = &buf[OfpHeader::size()..header.length()];
    match header.version() {
        OPENFLOW_0_02_VERSION => openflow0x02::parse(&header, body),
        OPENFLOW_0_04_VERSION => openflow0x04::parse(&header, body),
        v => Err(OfpSerializationError::UnsupportedVersion { version: v }),
    }
}

pub mod openflow0x02 {
    use super::*;
    use crate::openflow0x02::message::Message0x02;

    pub fn encode(message: &Message) -> Result<Vec<u8>, OfpSerializationError> {
        Message0x02::marshal(message)
    }

    pub fn parse(
        header: &OfpHeader,
        body: &[u8],
    ) -> Result<Message, OfpSerializationError> {
        Message0x02::parse(header, body)
    }
}

pub mod openflow0x04 {
    use super::*;
    use crate::openflow0x04::message::Message0x04;

    pub fn encode(message: &Message) -> Result<Vec<u8>, OfpSerializationError> {
        Message0x04::marshal(message)
    }

    pub fn parse(
        header: &OfpHeader,
        body: &[u8],
    ) -> Result<Message, OfpSerializationError> {
        Message0x04::parse(header, body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::MessageBody;

    #[test]
    fn test_hello_both_ways() {
        let msg = Message::new(OPENFLOW_0_04_VERSION, 0, MessageBody::Hello);
        let data = encode(&msg).unwrap();
        assert_eq!(data, vec![0x04, 0x00, 0x00, 0x08, 0x00, 0x00, 0x00, 0x00]);
        assert_eq!(decode(&data).unwrap(), msg);
    }

    #[test]
    fn test_echo_request_bytes() {
        let msg = Message::new(
            OPENFLOW_0_04_VERSION,
            0x12345678,
            MessageBody::EchoRequest(vec![0xDE, 0xAD, 0xBE, 0xEF]),
        );
        let data = encode(&msg).unwrap();
        assert_eq!(
            data,
            vec![0x04, 0x02, 0x00, 0x0C, 0x12, 0x34, 0x56, 0x78, 0xDE, 0xAD, 0xBE, 0xEF]
        );
        assert_eq!(decode(&data).unwrap(), msg);
    }

    #[test]
    fn test_decode_needs_a_full_header() {
        assert!(decode(&[0x04, 0x00, 0x00]).is_err());
    }

    #[test]
    fn test_decode_rejects_truncated_frames() {
        // declares 12 bytes, provides 10
        let data = vec![0x04, 0x02, 0x00, 0x0C, 0x00, 0x00, 0x00, 0x01, 0xAA, 0xBB];
        assert!(decode(&data).is_err());
    }

    #[test]
    fn test_decode_rejects_undersized_length_field() {
        let data = vec![0x04, 0x00, 0x00, 0x04, 0x00, 0x00, 0x00, 0x00];
        assert!(decode(&data).is_err());
    }

    #[test]
    fn test_decode_ignores_bytes_past_the_declared_length() {
        let data = vec![
            0x04, 0x00, 0x00, 0x08, 0x00, 0x00, 0x00, 0x00, // hello frame
            0xFF, 0xFF, // trailing garbage
        ];
        let msg = decode(&data).unwrap();
        assert_eq!(msg.body, MessageBody::Hello);
    }

    #[test]
    fn test_unknown_version_is_rejected() {
        let data = vec![0x09, 0x00, 0x00, 0x08, 0x00, 0x00, 0x00, 0x00];
        assert!(decode(&data).is_err());

        let msg = Message::new(9, 0, MessageBody::Hello);
        assert!(encode(&msg).is_err());
    }

    #[test]
    fn test_version_dispatch_by_header_byte() {
        let v2 = Message::new(OPENFLOW_0_02_VERSION, 5, MessageBody::BarrierRequest);
        let data = encode(&v2).unwrap();
        assert_eq!(data[0], 0x02);
        assert_eq!(decode(&data).unwrap(), v2);
    }
}
