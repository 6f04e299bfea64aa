use std::io;

use failure::Fail;

use crate::message::Message;
use crate::ofp_header::OfpHeader;
use crate::openflow::MsgCode;

/// Everything that can go wrong while encoding or decoding a frame. Both
/// directions are total: malformed input and unsupported bodies surface as
/// one of these, never as a panic.
#[derive(Debug, Fail)]
pub enum OfpSerializationError {
    #[fail(display = "IO Error: {}", error)]
    IoError { error: io::Error },
    #[fail(
        display = "Input too short: '{}' needs {} bytes, {} available",
        structure, expected, available
    )]
    ShortInput {
        expected: usize,
        available: usize,
        structure: String,
    },
    #[fail(
        display = "Length field of '{}' declares {} bytes but {} were found",
        structure, declared, found
    )]
    LengthMismatch {
        declared: usize,
        found: usize,
        structure: String,
    },
    #[fail(
        display = "Unexpected value '{}' at field '{}' of '{}'",
        value, field, message
    )]
    UnexpectedValueError {
        value: String,
        field: String,
        message: String,
    },
    #[fail(display = "Message code {} is not supported in version {}", code, version)]
    UnsupportedMessageCode { version: u8, code: MsgCode },
    #[fail(display = "Unsupported version: {}", version)]
    UnsupportedVersion { version: u8 },
    #[fail(display = "Feature unimplemented in version {}: {}", version, feature)]
    UnimplementedFeatureInVersion { version: u8, feature: String },
    #[fail(display = "Invariant violated at '{}': {}", field, details)]
    InvariantViolation { field: String, details: String },
}

impl From<io::Error> for OfpSerializationError {
    fn from(error: io::Error) -> OfpSerializationError {
        OfpSerializationError::IoError { error }
    }
}

/// OpenFlow Message
///
/// Version-specific codec for complete messages at the byte-buffer level.
/// Each protocol version provides one implementor; `ofp_serialization`
/// selects among them by version byte.
pub trait OfpMessage {
    /// Return the byte-size of the encoded message, header included.
    fn size_of(msg: &Message) -> Result<usize, OfpSerializationError>;
    /// Create the `OfpHeader` describing `msg`.
    fn header_of(msg: &Message) -> Result<OfpHeader, OfpSerializationError>;
    /// Return a marshaled buffer containing an OpenFlow header and the
    /// encoded body of `msg`.
    fn marshal(msg: &Message) -> Result<Vec<u8>, OfpSerializationError>;
    /// Parse the body bytes following `header` into a complete message.
    fn parse(header: &OfpHeader, buf: &[u8]) -> Result<Message, OfpSerializationError>;
}
