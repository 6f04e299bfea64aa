//! Bit-exact codec between in-memory OpenFlow control messages and the wire
//! frames of the switch-to-controller protocol, for protocol versions 1.1
//! (wire version 2) and 1.3 (wire version 4).
//!
//! The entry points are [`encode`] and [`decode`]; the version byte in the
//! message (or in the wire header) selects the per-version codec. Transport
//! framing and session state belong to the caller.

#[macro_use]
extern crate log;

pub mod bits;
#[macro_use]
pub mod ofp_utils;

pub mod message;
pub mod ofp_header;
pub mod ofp_message;
pub mod ofp_serialization;
pub mod openflow;
pub mod openflow0x02;
pub mod openflow0x04;

pub use crate::message::{Message, MessageBody};
pub use crate::ofp_message::OfpSerializationError;
pub use crate::ofp_serialization::{decode, encode};
