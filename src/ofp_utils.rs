use std::io::{BufRead, Cursor};

use byteorder::{ReadBytesExt, WriteBytesExt};
use bytes::Buf;

use crate::ofp_message::OfpSerializationError;

macro_rules! create_empty_wrapper {
    ($wrapped_name:ident, $wrapper_name:ident) => {
        struct $wrapper_name {}
    };
}

/// Bytes needed to grow `length` to the next multiple of `alignment`.
pub fn padding(length: usize, alignment: usize) -> usize {
    (alignment - length % alignment) % alignment
}

pub fn write_padding_bytes(bytes: &mut Vec<u8>, count: usize) -> Result<(), OfpSerializationError> {
    for _ in 0..count {
        bytes.write_u8(0)?;
    }
    Ok(())
}

/// Encode `s` into exactly `max_capacity` bytes, truncating if it is longer
/// and right-padding with NUL bytes otherwise.
pub fn write_fixed_size_string(
    bytes: &mut Vec<u8>,
    s: &str,
    max_capacity: usize,
) -> Result<(), OfpSerializationError> {
    let raw = s.as_bytes();
    let n = raw.len().min(max_capacity);
    bytes.extend_from_slice(&raw[..n]);
    write_padding_bytes(bytes, max_capacity - n)
}

/// Read a NUL-padded string slot of `max_capacity` bytes, returning the
/// prefix before the first NUL (or the whole slot if there is none).
pub fn read_fixed_size_string(
    bytes: &mut Cursor<Vec<u8>>,
    max_capacity: usize,
    structure: &'static str,
) -> Result<String, OfpSerializationError> {
    check_remaining(bytes, max_capacity, structure)?;
    let mut arr = Vec::with_capacity(max_capacity);
    let mut read_count: usize = 0;
    for _ in 0..max_capacity {
        read_count += 1;
        let next_char = bytes.read_u8()?;
        if next_char == 0 {
            break;
        }
        arr.push(next_char);
    }
    bytes.consume(max_capacity - read_count);
    String::from_utf8(arr).map_err(|_| OfpSerializationError::UnexpectedValueError {
        value: "non-utf8 bytes".to_string(),
        field: "string".to_string(),
        message: structure.to_string(),
    })
}

/// Keep the low `bit_length` bits of a big-endian byte string. The result is
/// exactly `ceil(bit_length / 8)` bytes; surplus high bits of the first
/// retained byte are masked off. The input must be at least that long.
pub fn cut_bits(value: &[u8], bit_length: u32) -> Vec<u8> {
    let n = ((bit_length + 7) / 8) as usize;
    let mut out = value[value.len() - n..].to_vec();
    let surplus = (n as u32) * 8 - bit_length;
    if surplus > 0 && !out.is_empty() {
        out[0] &= 0xff >> surplus;
    }
    out
}

pub fn check_remaining(
    bytes: &Cursor<Vec<u8>>,
    needed: usize,
    structure: &'static str,
) -> Result<(), OfpSerializationError> {
    if bytes.remaining() < needed {
        Err(OfpSerializationError::ShortInput {
            expected: needed,
            available: bytes.remaining(),
            structure: structure.to_string(),
        })
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_padding() {
        assert_eq!(padding(0, 8), 0);
        assert_eq!(padding(6, 8), 2);
        assert_eq!(padding(8, 8), 0);
        assert_eq!(padding(10, 8), 6);
        assert_eq!(padding(3, 4), 1);
    }

    #[test]
    fn test_string_pads_and_strips() {
        let mut bytes = vec![];
        write_fixed_size_string(&mut bytes, "eth0", 16).unwrap();
        assert_eq!(bytes.len(), 16);
        assert_eq!(&bytes[..5], b"eth0\0");

        let mut cursor = Cursor::new(bytes);
        let name = read_fixed_size_string(&mut cursor, 16, "port").unwrap();
        assert_eq!(name, "eth0");
        assert_eq!(cursor.position(), 16);
    }

    #[test]
    fn test_string_truncates_at_capacity() {
        let mut bytes = vec![];
        write_fixed_size_string(&mut bytes, "a-port-name-longer-than-the-slot", 16).unwrap();
        assert_eq!(bytes.len(), 16);
        assert_eq!(&bytes[..], b"a-port-name-long");
    }

    #[test]
    fn test_string_stops_at_first_nul() {
        let mut cursor = Cursor::new(b"ab\0cd\0\0\0".to_vec());
        let name = read_fixed_size_string(&mut cursor, 8, "port").unwrap();
        assert_eq!(name, "ab");
        assert_eq!(cursor.position(), 8);
    }

    #[test]
    fn test_cut_bits_masks_surplus_high_bits() {
        // 13 significant bits out of a 2-byte value
        assert_eq!(cut_bits(&[0xff, 0xff], 13), vec![0x1f, 0xff]);
        // right-truncation of a longer value
        assert_eq!(cut_bits(&[0x12, 0x34, 0x56, 0x78], 16), vec![0x56, 0x78]);
        assert_eq!(cut_bits(&[0xab], 8), vec![0xab]);
        assert_eq!(cut_bits(&[0xff], 1), vec![0x01]);
    }
}
