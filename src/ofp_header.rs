use std::io::Cursor;

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};

use crate::ofp_message::OfpSerializationError;

pub const OFP_HEADER_LENGTH: usize = 8;

pub type Xid = u32;

pub const OPENFLOW_0_02_VERSION: u8 = 2; // 1.1
pub const OPENFLOW_0_04_VERSION: u8 = 4; // 1.3

/// OpenFlow Header
///
/// The first fields of every OpenFlow message, no matter the protocol
/// version. This is parsed to determine version and length of the remaining
/// message, so that it can be properly handled.
///
/// Version 1.1 packs an extra experimental flag into the top bit of the
/// version byte; later versions use the whole byte for the version.
#[derive(Debug, Clone, PartialEq)]
pub struct OfpHeader {
    version: u8,
    experimental: bool,
    typ: u8,
    length: u16,
    xid: u32,
}

impl OfpHeader {
    /// Create an `OfpHeader` out of the arguments.
    pub fn new(version: u8, experimental: bool, typ: u8, length: u16, xid: u32) -> OfpHeader {
        OfpHeader {
            version,
            experimental,
            typ,
            length,
            xid,
        }
    }

    /// Return the byte-size of an `OfpHeader`.
    pub fn size() -> usize {
        OFP_HEADER_LENGTH
    }

    /// Fills a message buffer with the header fields of an `OfpHeader`.
    pub fn marshal(bytes: &mut Vec<u8>, header: &OfpHeader) -> Result<(), OfpSerializationError> {
        let version_byte = if header.experimental {
            header.version | 0x80
        } else {
            header.version
        };
        bytes.write_u8(version_byte)?;
        bytes.write_u8(header.type_code())?;
        bytes.write_u16::<BigEndian>(header.length)?;
        bytes.write_u32::<BigEndian>(header.xid)?;
        Ok(())
    }

    /// Takes a message buffer (at least header-sized) and returns an
    /// `OfpHeader`.
    pub fn parse(buf: &[u8]) -> Result<OfpHeader, OfpSerializationError> {
        if buf.len() < OFP_HEADER_LENGTH {
            return Err(OfpSerializationError::ShortInput {
                expected: OFP_HEADER_LENGTH,
                available: buf.len(),
                structure: "message header".to_string(),
            });
        }
        let mut bytes = Cursor::new(buf);
        let first = bytes.read_u8()?;
        let (version, experimental) = if first & 0x80 != 0 && first & 0x7f == OPENFLOW_0_02_VERSION
        {
            (OPENFLOW_0_02_VERSION, true)
        } else {
            (first, false)
        };
        Ok(OfpHeader {
            version,
            experimental,
            typ: bytes.read_u8()?,
            length: bytes.read_u16::<BigEndian>()?,
            xid: bytes.read_u32::<BigEndian>()?,
        })
    }

    /// Return the `version` field of a header, without the experimental bit.
    pub fn version(&self) -> u8 {
        self.version
    }

    /// Return the experimental flag of a v1.1 header. Always false on other
    /// versions.
    pub fn experimental(&self) -> bool {
        self.experimental
    }

    /// Return the raw OpenFlow message type code of a header. The mapping to
    /// a symbolic `MsgCode` is version-specific and happens in the codecs.
    pub fn type_code(&self) -> u8 {
        self.typ
    }

    /// Return the `length` field of a header. Includes the length of the
    /// header itself.
    pub fn length(&self) -> usize {
        self.length as usize
    }

    /// Return the `xid` field of a header, the transaction id associated
    /// with this message. Replies use the same id to facilitate pairing.
    pub fn xid(&self) -> u32 {
        self.xid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_requires_eight_bytes() {
        assert!(OfpHeader::parse(&[4, 0, 0]).is_err());
    }

    #[test]
    fn test_round_trip() {
        let header = OfpHeader::new(OPENFLOW_0_04_VERSION, false, 2, 12, 0x12345678);
        let mut bytes = vec![];
        OfpHeader::marshal(&mut bytes, &header).unwrap();
        assert_eq!(bytes, vec![0x04, 0x02, 0x00, 0x0c, 0x12, 0x34, 0x56, 0x78]);
        assert_eq!(OfpHeader::parse(&bytes).unwrap(), header);
    }

    #[test]
    fn test_experimental_bit_lives_in_the_version_byte() {
        let header = OfpHeader::new(OPENFLOW_0_02_VERSION, true, 0, 8, 1);
        let mut bytes = vec![];
        OfpHeader::marshal(&mut bytes, &header).unwrap();
        assert_eq!(bytes[0], 0x82);
        let parsed = OfpHeader::parse(&bytes).unwrap();
        assert_eq!(parsed.version(), OPENFLOW_0_02_VERSION);
        assert!(parsed.experimental());
    }
}
