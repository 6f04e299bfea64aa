//! Codec for OpenFlow 1.3 (wire version 4): OXM matches, instructions,
//! meter bands, async masks and the multipart stats families.

use std::io::{BufRead, Cursor, Read, Write};

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use bytes::Buf;
use num_traits::FromPrimitive;

use crate::bits::*;
use crate::message::*;
use crate::ofp_header::OPENFLOW_0_04_VERSION;
use crate::ofp_message::OfpSerializationError;
use crate::ofp_utils::{
    check_remaining, cut_bits, padding, read_fixed_size_string, write_fixed_size_string,
    write_padding_bytes,
};

pub const ALL_TABLES: u8 = 0xff;

const OFP_NO_BUFFER: u32 = 0xffffffff;
const OFP_MAX_PORT_NAME_LENGTH: usize = 16;
const DESC_STR_LENGTH: usize = 256;
const SERIAL_NUM_LENGTH: usize = 32;

const OFPMT_OXM: u16 = 1;

#[repr(u32)]
pub enum OfpPort {
    OFPPMax = 0xffffff00,
    OFPPInPort = 0xfffffff8,
    OFPPTable = 0xfffffff9,
    OFPPNormal = 0xfffffffa,
    OFPPFlood = 0xfffffffb,
    OFPPAll = 0xfffffffc,
    OFPPController = 0xfffffffd,
    OFPPLocal = 0xfffffffe,
    OFPPAny = 0xffffffff,
}

#[repr(u32)]
pub enum OfpQueue {
    OFPQAll = 0xffffffff,
}

fn unexpected<T>(
    value: String,
    field: &str,
    message: &str,
) -> Result<T, OfpSerializationError> {
    Err(OfpSerializationError::UnexpectedValueError {
        value,
        field: field.to_string(),
        message: message.to_string(),
    })
}

// Flag families of this version. Encode rejects symbols the version does
// not define; decode rejects set bits with no symbol.

fn port_config_bit(f: PortConfig) -> Option<u32> {
    match f {
        PortConfig::PortDown => Some(0),
        PortConfig::NoRecv => Some(2),
        PortConfig::NoFwd => Some(5),
        PortConfig::NoPacketIn => Some(6),
    }
}

fn port_config_of_bit(b: u32) -> Option<PortConfig> {
    match b {
        0 => Some(PortConfig::PortDown),
        2 => Some(PortConfig::NoRecv),
        5 => Some(PortConfig::NoFwd),
        6 => Some(PortConfig::NoPacketIn),
        _ => None,
    }
}

fn port_state_bit(f: PortState) -> Option<u32> {
    match f {
        PortState::LinkDown => Some(0),
        PortState::Blocked => Some(1),
        PortState::Live => Some(2),
    }
}

fn port_state_of_bit(b: u32) -> Option<PortState> {
    match b {
        0 => Some(PortState::LinkDown),
        1 => Some(PortState::Blocked),
        2 => Some(PortState::Live),
        _ => None,
    }
}

fn port_feature_bit(f: PortFeature) -> Option<u32> {
    match f {
        PortFeature::Rate10MbHd => Some(0),
        PortFeature::Rate10MbFd => Some(1),
        PortFeature::Rate100MbHd => Some(2),
        PortFeature::Rate100MbFd => Some(3),
        PortFeature::Rate1GbHd => Some(4),
        PortFeature::Rate1GbFd => Some(5),
        PortFeature::Rate10GbFd => Some(6),
        PortFeature::Rate40GbFd => Some(7),
        PortFeature::Rate100GbFd => Some(8),
        PortFeature::Rate1TbFd => Some(9),
        PortFeature::Other => Some(10),
        PortFeature::Copper => Some(11),
        PortFeature::Fiber => Some(12),
        PortFeature::Autoneg => Some(13),
        PortFeature::Pause => Some(14),
        PortFeature::PauseAsym => Some(15),
    }
}

fn port_feature_of_bit(b: u32) -> Option<PortFeature> {
    match b {
        0 => Some(PortFeature::Rate10MbHd),
        1 => Some(PortFeature::Rate10MbFd),
        2 => Some(PortFeature::Rate100MbHd),
        3 => Some(PortFeature::Rate100MbFd),
        4 => Some(PortFeature::Rate1GbHd),
        5 => Some(PortFeature::Rate1GbFd),
        6 => Some(PortFeature::Rate10GbFd),
        7 => Some(PortFeature::Rate40GbFd),
        8 => Some(PortFeature::Rate100GbFd),
        9 => Some(PortFeature::Rate1TbFd),
        10 => Some(PortFeature::Other),
        11 => Some(PortFeature::Copper),
        12 => Some(PortFeature::Fiber),
        13 => Some(PortFeature::Autoneg),
        14 => Some(PortFeature::Pause),
        15 => Some(PortFeature::PauseAsym),
        _ => None,
    }
}

fn capability_bit(f: Capability) -> Option<u32> {
    match f {
        Capability::FlowStats => Some(0),
        Capability::TableStats => Some(1),
        Capability::PortStats => Some(2),
        Capability::GroupStats => Some(3),
        Capability::IpReasm => Some(5),
        Capability::QueueStats => Some(6),
        Capability::PortBlocked => Some(8),
        Capability::ArpMatchIp => None,
    }
}

fn capability_of_bit(b: u32) -> Option<Capability> {
    match b {
        0 => Some(Capability::FlowStats),
        1 => Some(Capability::TableStats),
        2 => Some(Capability::PortStats),
        3 => Some(Capability::GroupStats),
        5 => Some(Capability::IpReasm),
        6 => Some(Capability::QueueStats),
        8 => Some(Capability::PortBlocked),
        _ => None,
    }
}

fn config_flag_bit(f: ConfigFlag) -> Option<u32> {
    match f {
        ConfigFlag::FragDrop => Some(0),
        ConfigFlag::FragReasm => Some(1),
        ConfigFlag::InvalidTtlToController => None,
    }
}

fn config_flag_of_bit(b: u32) -> Option<ConfigFlag> {
    match b {
        0 => Some(ConfigFlag::FragDrop),
        1 => Some(ConfigFlag::FragReasm),
        _ => None,
    }
}

fn flow_mod_flag_bit(f: FlowModFlag) -> Option<u32> {
    match f {
        FlowModFlag::SendFlowRem => Some(0),
        FlowModFlag::CheckOverlap => Some(1),
        FlowModFlag::ResetCounts => Some(2),
        FlowModFlag::NoPacketCounts => Some(3),
        FlowModFlag::NoByteCounts => Some(4),
    }
}

fn flow_mod_flag_of_bit(b: u32) -> Option<FlowModFlag> {
    match b {
        0 => Some(FlowModFlag::SendFlowRem),
        1 => Some(FlowModFlag::CheckOverlap),
        2 => Some(FlowModFlag::ResetCounts),
        3 => Some(FlowModFlag::NoPacketCounts),
        4 => Some(FlowModFlag::NoByteCounts),
        _ => None,
    }
}

fn meter_flag_bit(f: MeterFlag) -> Option<u32> {
    match f {
        MeterFlag::Kbps => Some(0),
        MeterFlag::Pktps => Some(1),
        MeterFlag::Burst => Some(2),
        MeterFlag::Stats => Some(3),
    }
}

fn meter_flag_of_bit(b: u32) -> Option<MeterFlag> {
    match b {
        0 => Some(MeterFlag::Kbps),
        1 => Some(MeterFlag::Pktps),
        2 => Some(MeterFlag::Burst),
        3 => Some(MeterFlag::Stats),
        _ => None,
    }
}

// This version defines no table-config bits.
fn table_config_bit(_f: TableConfig) -> Option<u32> {
    None
}

fn table_config_of_bit(_b: u32) -> Option<TableConfig> {
    None
}

fn packet_in_reason_bit(r: PacketInReason) -> Option<u32> {
    Some(r as u32)
}

fn packet_in_reason_of_bit(b: u32) -> Option<PacketInReason> {
    PacketInReason::from_u32(b)
}

fn port_reason_bit(r: PortReason) -> Option<u32> {
    Some(r as u32)
}

fn port_reason_of_bit(b: u32) -> Option<PortReason> {
    PortReason::from_u32(b)
}

fn flow_removed_reason_bit(r: FlowRemovedReason) -> Option<u32> {
    Some(r as u32)
}

fn flow_removed_reason_of_bit(b: u32) -> Option<FlowRemovedReason> {
    FlowRemovedReason::from_u32(b)
}

create_empty_wrapper!(PseudoPort, PseudoPort0x04);

impl PseudoPort0x04 {
    fn make(p: u32) -> Result<PseudoPort, OfpSerializationError> {
        let res = match p {
            p if p == (OfpPort::OFPPInPort as u32) => PseudoPort::InPort,
            p if p == (OfpPort::OFPPTable as u32) => PseudoPort::Table,
            p if p == (OfpPort::OFPPNormal as u32) => PseudoPort::Normal,
            p if p == (OfpPort::OFPPFlood as u32) => PseudoPort::Flood,
            p if p == (OfpPort::OFPPAll as u32) => PseudoPort::AllPorts,
            p if p == (OfpPort::OFPPController as u32) => PseudoPort::Controller,
            p if p == (OfpPort::OFPPLocal as u32) => PseudoPort::Local,
            p if p == (OfpPort::OFPPAny as u32) => PseudoPort::Any,
            _ => {
                if p <= (OfpPort::OFPPMax as u32) {
                    PseudoPort::PhysicalPort(p)
                } else {
                    return unexpected(format!("{:x}", p), "port number", "");
                }
            }
        };
        Ok(res)
    }

    fn marshal(pp: PseudoPort, bytes: &mut Vec<u8>) -> Result<(), OfpSerializationError> {
        let value = match pp {
            PseudoPort::PhysicalPort(p) => p,
            PseudoPort::InPort => OfpPort::OFPPInPort as u32,
            PseudoPort::Table => OfpPort::OFPPTable as u32,
            PseudoPort::Normal => OfpPort::OFPPNormal as u32,
            PseudoPort::Flood => OfpPort::OFPPFlood as u32,
            PseudoPort::AllPorts => OfpPort::OFPPAll as u32,
            PseudoPort::Controller => OfpPort::OFPPController as u32,
            PseudoPort::Local => OfpPort::OFPPLocal as u32,
            PseudoPort::Any => OfpPort::OFPPAny as u32,
        };
        bytes.write_u32::<BigEndian>(value)?;
        Ok(())
    }
}

const OFP_PORT_LENGTH: usize = 64;

create_empty_wrapper!(PortDesc, PortDesc0x04);

impl PortDesc0x04 {
    fn marshal(pd: &PortDesc, bytes: &mut Vec<u8>) -> Result<(), OfpSerializationError> {
        PseudoPort0x04::marshal(pd.port_no, bytes)?;
        write_padding_bytes(bytes, 4)?;
        bytes.write_all(&pd.hw_addr)?;
        write_padding_bytes(bytes, 2)?;
        write_fixed_size_string(bytes, &pd.name, OFP_MAX_PORT_NAME_LENGTH)?;
        bytes.write_u32::<BigEndian>(flags_to_u32(&pd.config, port_config_bit, "port config")?)?;
        bytes.write_u32::<BigEndian>(flags_to_u32(&pd.state, port_state_bit, "port state")?)?;
        bytes.write_u32::<BigEndian>(flags_to_u32(&pd.curr, port_feature_bit, "port features")?)?;
        bytes.write_u32::<BigEndian>(flags_to_u32(
            &pd.advertised,
            port_feature_bit,
            "port features",
        )?)?;
        bytes.write_u32::<BigEndian>(flags_to_u32(
            &pd.supported,
            port_feature_bit,
            "port features",
        )?)?;
        bytes.write_u32::<BigEndian>(flags_to_u32(&pd.peer, port_feature_bit, "port features")?)?;
        bytes.write_u32::<BigEndian>(pd.curr_speed)?;
        bytes.write_u32::<BigEndian>(pd.max_speed)?;
        Ok(())
    }

    fn parse(bytes: &mut Cursor<Vec<u8>>) -> Result<PortDesc, OfpSerializationError> {
        check_remaining(bytes, OFP_PORT_LENGTH, "port description")?;
        let port_no = PseudoPort0x04::make(bytes.read_u32::<BigEndian>()?)?;
        bytes.consume(4);
        let mut hw_addr = [0u8; 6];
        bytes.read_exact(&mut hw_addr)?;
        bytes.consume(2);
        let name = read_fixed_size_string(bytes, OFP_MAX_PORT_NAME_LENGTH, "port description")?;
        let config = u32_to_flags(
            bytes.read_u32::<BigEndian>()?,
            port_config_of_bit,
            "port config",
        )?;
        let state = u32_to_flags(
            bytes.read_u32::<BigEndian>()?,
            port_state_of_bit,
            "port state",
        )?;
        let curr = u32_to_flags(
            bytes.read_u32::<BigEndian>()?,
            port_feature_of_bit,
            "port features",
        )?;
        let advertised = u32_to_flags(
            bytes.read_u32::<BigEndian>()?,
            port_feature_of_bit,
            "port features",
        )?;
        let supported = u32_to_flags(
            bytes.read_u32::<BigEndian>()?,
            port_feature_of_bit,
            "port features",
        )?;
        let peer = u32_to_flags(
            bytes.read_u32::<BigEndian>()?,
            port_feature_of_bit,
            "port features",
        )?;
        Ok(PortDesc {
            port_no,
            hw_addr,
            name,
            config,
            state,
            curr,
            advertised,
            supported,
            peer,
            curr_speed: bytes.read_u32::<BigEndian>()?,
            max_speed: bytes.read_u32::<BigEndian>()?,
        })
    }
}

fn oxm_class_code(c: OxmClass) -> u16 {
    match c {
        OxmClass::Nxm0 => 0x0000,
        OxmClass::Nxm1 => 0x0001,
        OxmClass::OpenflowBasic => 0x8000,
        OxmClass::Experimenter => 0xffff,
    }
}

fn oxm_class_of_code(c: u16) -> Option<OxmClass> {
    match c {
        0x0000 => Some(OxmClass::Nxm0),
        0x0001 => Some(OxmClass::Nxm1),
        0x8000 => Some(OxmClass::OpenflowBasic),
        0xffff => Some(OxmClass::Experimenter),
        _ => None,
    }
}

/// Canonical bit widths of the `openflow_basic` match fields. Values and
/// masks are truncated to this width before framing.
fn oxm_field_bits(f: OxmField) -> u32 {
    match f {
        OxmField::InPort => 32,
        OxmField::InPhyPort => 32,
        OxmField::Metadata => 64,
        OxmField::EthDst => 48,
        OxmField::EthSrc => 48,
        OxmField::EthType => 16,
        OxmField::VlanVid => 13,
        OxmField::VlanPcp => 3,
        OxmField::IpDscp => 6,
        OxmField::IpEcn => 2,
        OxmField::IpProto => 8,
        OxmField::Ipv4Src => 32,
        OxmField::Ipv4Dst => 32,
        OxmField::TcpSrc => 16,
        OxmField::TcpDst => 16,
        OxmField::UdpSrc => 16,
        OxmField::UdpDst => 16,
        OxmField::SctpSrc => 16,
        OxmField::SctpDst => 16,
        OxmField::Icmpv4Type => 8,
        OxmField::Icmpv4Code => 8,
        OxmField::ArpOp => 16,
        OxmField::ArpSpa => 32,
        OxmField::ArpTpa => 32,
        OxmField::ArpSha => 48,
        OxmField::ArpTha => 48,
        OxmField::Ipv6Src => 128,
        OxmField::Ipv6Dst => 128,
        OxmField::Ipv6Flabel => 20,
        OxmField::Icmpv6Type => 8,
        OxmField::Icmpv6Code => 8,
        OxmField::Ipv6NdTarget => 128,
        OxmField::Ipv6NdSll => 48,
        OxmField::Ipv6NdTll => 48,
        OxmField::MplsLabel => 20,
        OxmField::MplsTc => 3,
        OxmField::MplsBos => 1,
        OxmField::PbbIsid => 24,
        OxmField::TunnelId => 64,
        OxmField::Ipv6Exthdr => 9,
    }
}

fn oxm_field_bytes(f: OxmField) -> usize {
    ((oxm_field_bits(f) + 7) / 8) as usize
}

create_empty_wrapper!(MatchField, MatchField0x04);

impl MatchField0x04 {
    fn size_of(f: &MatchField) -> usize {
        let n = oxm_field_bytes(f.field);
        4 + n + if f.mask.is_some() { n } else { 0 }
    }

    fn marshal(f: &MatchField, bytes: &mut Vec<u8>) -> Result<(), OfpSerializationError> {
        if f.class != OxmClass::OpenflowBasic {
            return Err(OfpSerializationError::UnimplementedFeatureInVersion {
                version: OPENFLOW_0_04_VERSION,
                feature: format!("oxm class {:?}", f.class),
            });
        }
        let bits = oxm_field_bits(f.field);
        let n = oxm_field_bytes(f.field);
        if f.value.len() < n {
            return Err(OfpSerializationError::InvariantViolation {
                field: "oxm value".to_string(),
                details: format!(
                    "{:?} needs {} bytes, {} given",
                    f.field,
                    n,
                    f.value.len()
                ),
            });
        }
        let value = cut_bits(&f.value, bits);
        let mask = match &f.mask {
            Some(m) => {
                if m.len() < n {
                    return Err(OfpSerializationError::InvariantViolation {
                        field: "oxm mask".to_string(),
                        details: format!("{:?} needs {} bytes, {} given", f.field, n, m.len()),
                    });
                }
                Some(cut_bits(m, bits))
            }
            None => None,
        };
        let body_len = value.len() + mask.as_ref().map_or(0, |m| m.len());
        bytes.write_u16::<BigEndian>(oxm_class_code(f.class))?;
        bytes.write_u8(((f.field as u8) << 1) | if f.mask.is_some() { 1 } else { 0 })?;
        bytes.write_u8(body_len as u8)?;
        bytes.write_all(&value)?;
        if let Some(m) = mask {
            bytes.write_all(&m)?;
        }
        Ok(())
    }

    fn parse(bytes: &mut Cursor<Vec<u8>>) -> Result<MatchField, OfpSerializationError> {
        check_remaining(bytes, 4, "oxm tlv")?;
        let class_code = bytes.read_u16::<BigEndian>()?;
        let field_byte = bytes.read_u8()?;
        let body_len = bytes.read_u8()? as usize;
        let class = match oxm_class_of_code(class_code) {
            Some(c) => c,
            None => return unexpected(format!("{:x}", class_code), "oxm class", "match"),
        };
        if class != OxmClass::OpenflowBasic {
            return Err(OfpSerializationError::UnimplementedFeatureInVersion {
                version: OPENFLOW_0_04_VERSION,
                feature: format!("oxm class {:?}", class),
            });
        }
        let field = match OxmField::from_u8(field_byte >> 1) {
            Some(f) => f,
            None => return unexpected(format!("{}", field_byte >> 1), "oxm field", "match"),
        };
        let has_mask = field_byte & 1 == 1;
        let n = oxm_field_bytes(field);
        let expected = if has_mask { 2 * n } else { n };
        if body_len != expected {
            return Err(OfpSerializationError::LengthMismatch {
                declared: body_len,
                found: expected,
                structure: "oxm tlv".to_string(),
            });
        }
        check_remaining(bytes, body_len, "oxm tlv")?;
        let mut value = vec![0u8; n];
        bytes.read_exact(&mut value)?;
        let mask = if has_mask {
            let mut m = vec![0u8; n];
            bytes.read_exact(&mut m)?;
            Some(m)
        } else {
            None
        };
        Ok(MatchField {
            class,
            field,
            value,
            mask,
        })
    }
}

create_empty_wrapper!(Match, Match0x04);

impl Match0x04 {
    /// Length as declared on the wire: the 4-byte prefix plus the TLV
    /// stream, excluding padding.
    fn length_of(m: &Match) -> usize {
        4 + m.fields.iter().map(MatchField0x04::size_of).sum::<usize>()
    }

    fn marshal(m: &Match, bytes: &mut Vec<u8>) -> Result<(), OfpSerializationError> {
        let length = Self::length_of(m);
        bytes.write_u16::<BigEndian>(OFPMT_OXM)?;
        bytes.write_u16::<BigEndian>(length as u16)?;
        for field in &m.fields {
            MatchField0x04::marshal(field, bytes)?;
        }
        write_padding_bytes(bytes, padding(length, 8))
    }

    fn parse(bytes: &mut Cursor<Vec<u8>>) -> Result<Match, OfpSerializationError> {
        check_remaining(bytes, 4, "match")?;
        let typ = bytes.read_u16::<BigEndian>()?;
        if typ != OFPMT_OXM {
            return unexpected(format!("{}", typ), "match type", "match");
        }
        let length = bytes.read_u16::<BigEndian>()? as usize;
        if length < 4 {
            return Err(OfpSerializationError::LengthMismatch {
                declared: length,
                found: 4,
                structure: "match".to_string(),
            });
        }
        check_remaining(bytes, length - 4, "match")?;
        let mut tlv_buf = vec![0u8; length - 4];
        bytes.read_exact(&mut tlv_buf)?;
        let mut tlvs = Cursor::new(tlv_buf);
        let mut fields = vec![];
        while tlvs.remaining() > 0 {
            fields.push(MatchField0x04::parse(&mut tlvs)?);
        }
        let pad = padding(length, 8);
        check_remaining(bytes, pad, "match padding")?;
        bytes.consume(pad);
        Ok(Match { fields })
    }
}

#[repr(u16)]
enum OfpInstructionType {
    OFPITGotoTable = 1,
    OFPITWriteMetadata = 2,
    OFPITWriteActions = 3,
    OFPITApplyActions = 4,
    OFPITClearActions = 5,
    OFPITMeter = 6,
    OFPITExperimenter = 0xffff,
}

create_empty_wrapper!(Instruction, Instruction0x04);

impl Instruction0x04 {
    fn type_code(i: &Instruction) -> u16 {
        match i {
            Instruction::GotoTable { .. } => OfpInstructionType::OFPITGotoTable as u16,
            Instruction::WriteMetadata { .. } => OfpInstructionType::OFPITWriteMetadata as u16,
            Instruction::WriteActions { .. } => OfpInstructionType::OFPITWriteActions as u16,
            Instruction::ApplyActions { .. } => OfpInstructionType::OFPITApplyActions as u16,
            Instruction::ClearActions => OfpInstructionType::OFPITClearActions as u16,
            Instruction::Meter { .. } => OfpInstructionType::OFPITMeter as u16,
            Instruction::Experimenter { .. } => OfpInstructionType::OFPITExperimenter as u16,
        }
    }

    fn size_of(i: &Instruction) -> usize {
        match i {
            Instruction::GotoTable { .. } => 8,
            Instruction::WriteMetadata { .. } => 24,
            Instruction::WriteActions { actions } | Instruction::ApplyActions { actions } => {
                8 + actions.len()
            }
            Instruction::ClearActions => 8,
            Instruction::Meter { .. } => 8,
            Instruction::Experimenter { data, .. } => 8 + data.len(),
        }
    }

    fn marshal(i: &Instruction, bytes: &mut Vec<u8>) -> Result<(), OfpSerializationError> {
        bytes.write_u16::<BigEndian>(Instruction0x04::type_code(i))?;
        bytes.write_u16::<BigEndian>(Instruction0x04::size_of(i) as u16)?;
        match i {
            Instruction::GotoTable { table_id } => {
                bytes.write_u8(*table_id)?;
                write_padding_bytes(bytes, 3)?;
            }
            Instruction::WriteMetadata { metadata, mask } => {
                write_padding_bytes(bytes, 4)?;
                bytes.write_u64::<BigEndian>(*metadata)?;
                bytes.write_u64::<BigEndian>(*mask)?;
            }
            Instruction::WriteActions { actions } | Instruction::ApplyActions { actions } => {
                write_padding_bytes(bytes, 4)?;
                bytes.write_all(actions)?;
            }
            Instruction::ClearActions => {
                write_padding_bytes(bytes, 4)?;
            }
            Instruction::Meter { meter_id } => {
                bytes.write_u32::<BigEndian>(*meter_id)?;
            }
            Instruction::Experimenter { experimenter, data } => {
                bytes.write_u32::<BigEndian>(*experimenter)?;
                bytes.write_all(data)?;
            }
        }
        Ok(())
    }

    fn parse(bytes: &mut Cursor<Vec<u8>>) -> Result<Instruction, OfpSerializationError> {
        check_remaining(bytes, 4, "instruction")?;
        let type_code = bytes.read_u16::<BigEndian>()?;
        let length = bytes.read_u16::<BigEndian>()? as usize;
        if length < 8 {
            return Err(OfpSerializationError::LengthMismatch {
                declared: length,
                found: 8,
                structure: "instruction".to_string(),
            });
        }
        check_remaining(bytes, length - 4, "instruction")?;
        let instruction = match type_code {
            t if t == (OfpInstructionType::OFPITGotoTable as u16) => {
                let table_id = bytes.read_u8()?;
                bytes.consume(3);
                Instruction::GotoTable { table_id }
            }
            t if t == (OfpInstructionType::OFPITWriteMetadata as u16) => {
                if length != 24 {
                    return Err(OfpSerializationError::LengthMismatch {
                        declared: length,
                        found: 24,
                        structure: "write metadata instruction".to_string(),
                    });
                }
                bytes.consume(4);
                Instruction::WriteMetadata {
                    metadata: bytes.read_u64::<BigEndian>()?,
                    mask: bytes.read_u64::<BigEndian>()?,
                }
            }
            t if t == (OfpInstructionType::OFPITWriteActions as u16) => {
                bytes.consume(4);
                let mut actions = vec![0u8; length - 8];
                bytes.read_exact(&mut actions)?;
                Instruction::WriteActions { actions }
            }
            t if t == (OfpInstructionType::OFPITApplyActions as u16) => {
                bytes.consume(4);
                let mut actions = vec![0u8; length - 8];
                bytes.read_exact(&mut actions)?;
                Instruction::ApplyActions { actions }
            }
            t if t == (OfpInstructionType::OFPITClearActions as u16) => {
                bytes.consume(4);
                Instruction::ClearActions
            }
            t if t == (OfpInstructionType::OFPITMeter as u16) => Instruction::Meter {
                meter_id: bytes.read_u32::<BigEndian>()?,
            },
            t if t == (OfpInstructionType::OFPITExperimenter as u16) => {
                let experimenter = bytes.read_u32::<BigEndian>()?;
                let mut data = vec![0u8; length - 8];
                bytes.read_exact(&mut data)?;
                Instruction::Experimenter { experimenter, data }
            }
            code => return unexpected(format!("{}", code), "instruction type", "instruction"),
        };
        Ok(instruction)
    }

    fn parse_sequence(bytes: &mut Cursor<Vec<u8>>) -> Result<Vec<Instruction>, OfpSerializationError> {
        let mut instructions = vec![];
        while bytes.remaining() > 0 {
            instructions.push(Instruction0x04::parse(bytes)?);
        }
        Ok(instructions)
    }
}

const OFP_METER_BAND_LENGTH: usize = 16;

#[repr(u16)]
enum OfpMeterBandType {
    OFPMBTDrop = 1,
    OFPMBTDscpRemark = 2,
    OFPMBTExperimenter = 0xffff,
}

create_empty_wrapper!(MeterBand, MeterBand0x04);

impl MeterBand0x04 {
    fn marshal(band: &MeterBand, bytes: &mut Vec<u8>) -> Result<(), OfpSerializationError> {
        let (type_code, rate, burst_size) = match band {
            MeterBand::Drop { rate, burst_size } => {
                (OfpMeterBandType::OFPMBTDrop as u16, *rate, *burst_size)
            }
            MeterBand::DscpRemark {
                rate, burst_size, ..
            } => (OfpMeterBandType::OFPMBTDscpRemark as u16, *rate, *burst_size),
            MeterBand::Experimenter {
                rate, burst_size, ..
            } => (
                OfpMeterBandType::OFPMBTExperimenter as u16,
                *rate,
                *burst_size,
            ),
        };
        bytes.write_u16::<BigEndian>(type_code)?;
        bytes.write_u16::<BigEndian>(OFP_METER_BAND_LENGTH as u16)?;
        bytes.write_u32::<BigEndian>(rate)?;
        bytes.write_u32::<BigEndian>(burst_size)?;
        match band {
            MeterBand::Drop { .. } => write_padding_bytes(bytes, 4)?,
            MeterBand::DscpRemark { prec_level, .. } => {
                bytes.write_u8(*prec_level)?;
                write_padding_bytes(bytes, 3)?;
            }
            MeterBand::Experimenter { experimenter, .. } => {
                bytes.write_u32::<BigEndian>(*experimenter)?;
            }
        }
        Ok(())
    }

    fn parse(bytes: &mut Cursor<Vec<u8>>) -> Result<MeterBand, OfpSerializationError> {
        check_remaining(bytes, OFP_METER_BAND_LENGTH, "meter band")?;
        let type_code = bytes.read_u16::<BigEndian>()?;
        let length = bytes.read_u16::<BigEndian>()? as usize;
        if length != OFP_METER_BAND_LENGTH {
            return Err(OfpSerializationError::LengthMismatch {
                declared: length,
                found: OFP_METER_BAND_LENGTH,
                structure: "meter band".to_string(),
            });
        }
        let rate = bytes.read_u32::<BigEndian>()?;
        let burst_size = bytes.read_u32::<BigEndian>()?;
        let band = match type_code {
            t if t == (OfpMeterBandType::OFPMBTDrop as u16) => {
                bytes.consume(4);
                MeterBand::Drop { rate, burst_size }
            }
            t if t == (OfpMeterBandType::OFPMBTDscpRemark as u16) => {
                let prec_level = bytes.read_u8()?;
                bytes.consume(3);
                MeterBand::DscpRemark {
                    rate,
                    burst_size,
                    prec_level,
                }
            }
            t if t == (OfpMeterBandType::OFPMBTExperimenter as u16) => MeterBand::Experimenter {
                rate,
                burst_size,
                experimenter: bytes.read_u32::<BigEndian>()?,
            },
            code => return unexpected(format!("{}", code), "meter band type", "meter mod"),
        };
        Ok(band)
    }
}

#[repr(u16)]
enum OfpQueueProperty {
    OFPQTMinRate = 1,
    OFPQTMaxRate = 2,
    OFPQTExperimenter = 0xffff,
}

create_empty_wrapper!(QueueProperty, QueueProperty0x04);

impl QueueProperty0x04 {
    fn size_of(prop: &QueueProperty) -> usize {
        match prop {
            QueueProperty::MinRate { .. } | QueueProperty::MaxRate { .. } => 16,
            QueueProperty::Experimenter { data, .. } => 16 + data.len(),
        }
    }

    fn marshal(prop: &QueueProperty, bytes: &mut Vec<u8>) -> Result<(), OfpSerializationError> {
        let type_code = match prop {
            QueueProperty::MinRate { .. } => OfpQueueProperty::OFPQTMinRate as u16,
            QueueProperty::MaxRate { .. } => OfpQueueProperty::OFPQTMaxRate as u16,
            QueueProperty::Experimenter { .. } => OfpQueueProperty::OFPQTExperimenter as u16,
        };
        bytes.write_u16::<BigEndian>(type_code)?;
        bytes.write_u16::<BigEndian>(QueueProperty0x04::size_of(prop) as u16)?;
        write_padding_bytes(bytes, 4)?;
        match prop {
            QueueProperty::MinRate { rate } | QueueProperty::MaxRate { rate } => {
                bytes.write_u16::<BigEndian>(*rate)?;
                write_padding_bytes(bytes, 6)?;
            }
            QueueProperty::Experimenter { experimenter, data } => {
                bytes.write_u32::<BigEndian>(*experimenter)?;
                write_padding_bytes(bytes, 4)?;
                bytes.write_all(data)?;
            }
        }
        Ok(())
    }

    fn parse(bytes: &mut Cursor<Vec<u8>>) -> Result<QueueProperty, OfpSerializationError> {
        check_remaining(bytes, 8, "queue property")?;
        let type_code = bytes.read_u16::<BigEndian>()?;
        let length = bytes.read_u16::<BigEndian>()? as usize;
        bytes.consume(4);
        if length < 16 {
            return Err(OfpSerializationError::LengthMismatch {
                declared: length,
                found: 16,
                structure: "queue property".to_string(),
            });
        }
        check_remaining(bytes, length - 8, "queue property")?;
        let prop = match type_code {
            t if t == (OfpQueueProperty::OFPQTMinRate as u16) => {
                let rate = bytes.read_u16::<BigEndian>()?;
                bytes.consume(6);
                QueueProperty::MinRate { rate }
            }
            t if t == (OfpQueueProperty::OFPQTMaxRate as u16) => {
                let rate = bytes.read_u16::<BigEndian>()?;
                bytes.consume(6);
                QueueProperty::MaxRate { rate }
            }
            t if t == (OfpQueueProperty::OFPQTExperimenter as u16) => {
                let experimenter = bytes.read_u32::<BigEndian>()?;
                bytes.consume(4);
                let mut data = vec![0u8; length - 16];
                bytes.read_exact(&mut data)?;
                QueueProperty::Experimenter { experimenter, data }
            }
            code => return unexpected(format!("{}", code), "queue property", "packet queue"),
        };
        Ok(prop)
    }
}

const OFP_PACKET_QUEUE_LENGTH: usize = 16;

create_empty_wrapper!(PacketQueue, PacketQueue0x04);

impl PacketQueue0x04 {
    fn size_of(q: &PacketQueue) -> usize {
        OFP_PACKET_QUEUE_LENGTH
            + q.properties
                .iter()
                .map(QueueProperty0x04::size_of)
                .sum::<usize>()
    }

    fn marshal(q: &PacketQueue, bytes: &mut Vec<u8>) -> Result<(), OfpSerializationError> {
        bytes.write_u32::<BigEndian>(q.queue_id)?;
        bytes.write_u32::<BigEndian>(q.port_no.unwrap_or(OfpQueue::OFPQAll as u32))?;
        bytes.write_u16::<BigEndian>(PacketQueue0x04::size_of(q) as u16)?;
        write_padding_bytes(bytes, 6)?;
        for prop in &q.properties {
            QueueProperty0x04::marshal(prop, bytes)?;
        }
        Ok(())
    }

    fn parse(bytes: &mut Cursor<Vec<u8>>) -> Result<PacketQueue, OfpSerializationError> {
        check_remaining(bytes, OFP_PACKET_QUEUE_LENGTH, "packet queue")?;
        let queue_id = bytes.read_u32::<BigEndian>()?;
        let port_no = bytes.read_u32::<BigEndian>()?;
        let length = bytes.read_u16::<BigEndian>()? as usize;
        bytes.consume(6);
        if length < OFP_PACKET_QUEUE_LENGTH {
            return Err(OfpSerializationError::LengthMismatch {
                declared: length,
                found: OFP_PACKET_QUEUE_LENGTH,
                structure: "packet queue".to_string(),
            });
        }
        check_remaining(bytes, length - OFP_PACKET_QUEUE_LENGTH, "packet queue")?;
        let mut props_buf = vec![0u8; length - OFP_PACKET_QUEUE_LENGTH];
        bytes.read_exact(&mut props_buf)?;
        let mut props = Cursor::new(props_buf);
        let mut properties = vec![];
        while props.remaining() > 0 {
            properties.push(QueueProperty0x04::parse(&mut props)?);
        }
        Ok(PacketQueue {
            queue_id,
            port_no: Some(port_no),
            properties,
        })
    }
}

const OFP_ASYNC_CONFIG_LENGTH: usize = 24;

create_empty_wrapper!(AsyncConfig, AsyncConfig0x04);

impl AsyncConfig0x04 {
    fn marshal(cfg: &AsyncConfig, bytes: &mut Vec<u8>) -> Result<(), OfpSerializationError> {
        for mask in &cfg.packet_in_mask {
            bytes.write_u32::<BigEndian>(flags_to_u32(
                mask,
                packet_in_reason_bit,
                "packet-in reasons",
            )?)?;
        }
        for mask in &cfg.port_status_mask {
            bytes.write_u32::<BigEndian>(flags_to_u32(
                mask,
                port_reason_bit,
                "port-status reasons",
            )?)?;
        }
        for mask in &cfg.flow_removed_mask {
            bytes.write_u32::<BigEndian>(flags_to_u32(
                mask,
                flow_removed_reason_bit,
                "flow-removed reasons",
            )?)?;
        }
        Ok(())
    }

    fn parse(bytes: &mut Cursor<Vec<u8>>) -> Result<AsyncConfig, OfpSerializationError> {
        check_remaining(bytes, OFP_ASYNC_CONFIG_LENGTH, "async config")?;
        let packet_in_mask = [
            u32_to_flags(
                bytes.read_u32::<BigEndian>()?,
                packet_in_reason_of_bit,
                "packet-in reasons",
            )?,
            u32_to_flags(
                bytes.read_u32::<BigEndian>()?,
                packet_in_reason_of_bit,
                "packet-in reasons",
            )?,
        ];
        let port_status_mask = [
            u32_to_flags(
                bytes.read_u32::<BigEndian>()?,
                port_reason_of_bit,
                "port-status reasons",
            )?,
            u32_to_flags(
                bytes.read_u32::<BigEndian>()?,
                port_reason_of_bit,
                "port-status reasons",
            )?,
        ];
        let flow_removed_mask = [
            u32_to_flags(
                bytes.read_u32::<BigEndian>()?,
                flow_removed_reason_of_bit,
                "flow-removed reasons",
            )?,
            u32_to_flags(
                bytes.read_u32::<BigEndian>()?,
                flow_removed_reason_of_bit,
                "flow-removed reasons",
            )?,
        ];
        Ok(AsyncConfig {
            packet_in_mask,
            port_status_mask,
            flow_removed_mask,
        })
    }
}

create_empty_wrapper!(ErrorMsg, Error0x04);

impl Error0x04 {
    fn error_type_codes(t: &ErrorType) -> Result<(u16, u16), OfpSerializationError> {
        let codes = match t {
            ErrorType::HelloFailed(c) => (0, *c as u16),
            ErrorType::BadRequest(c) => (1, *c as u16),
            ErrorType::BadAction(c) => (2, *c as u16),
            ErrorType::BadInstruction(c) => (3, *c as u16),
            ErrorType::BadMatch(c) => (4, *c as u16),
            ErrorType::FlowModFailed(c) => (5, *c as u16),
            ErrorType::GroupModFailed(c) => (6, *c as u16),
            ErrorType::PortModFailed(c) => (7, *c as u16),
            ErrorType::TableModFailed(c) => (8, *c as u16),
            ErrorType::QueueOpFailed(c) => (9, *c as u16),
            ErrorType::SwitchConfigFailed(c) => (10, *c as u16),
            ErrorType::RoleRequestFailed(c) => (11, *c as u16),
            ErrorType::MeterModFailed(c) => (12, *c as u16),
            ErrorType::TableFeaturesFailed(c) => (13, *c as u16),
            ErrorType::Experimenter { .. } => {
                return Err(OfpSerializationError::InvariantViolation {
                    field: "error type".to_string(),
                    details: "experimenter errors use their own framing".to_string(),
                });
            }
        };
        Ok(codes)
    }

    fn error_type_of_codes(
        type_code: u16,
        code: u16,
    ) -> Result<ErrorType, OfpSerializationError> {
        let error_type = match type_code {
            0 => HelloFailedCode::from_u16(code).map(ErrorType::HelloFailed),
            1 => BadRequestCode::from_u16(code).map(ErrorType::BadRequest),
            2 => BadActionCode::from_u16(code).map(ErrorType::BadAction),
            3 => BadInstructionCode::from_u16(code).map(ErrorType::BadInstruction),
            4 => BadMatchCode::from_u16(code).map(ErrorType::BadMatch),
            5 => FlowModFailedCode::from_u16(code).map(ErrorType::FlowModFailed),
            6 => GroupModFailedCode::from_u16(code).map(ErrorType::GroupModFailed),
            7 => PortModFailedCode::from_u16(code).map(ErrorType::PortModFailed),
            8 => TableModFailedCode::from_u16(code).map(ErrorType::TableModFailed),
            9 => QueueOpFailedCode::from_u16(code).map(ErrorType::QueueOpFailed),
            10 => SwitchConfigFailedCode::from_u16(code).map(ErrorType::SwitchConfigFailed),
            11 => RoleRequestFailedCode::from_u16(code).map(ErrorType::RoleRequestFailed),
            12 => MeterModFailedCode::from_u16(code).map(ErrorType::MeterModFailed),
            13 => TableFeaturesFailedCode::from_u16(code).map(ErrorType::TableFeaturesFailed),
            t => return unexpected(format!("{:x}", t), "error type", "error"),
        };
        match error_type {
            Some(t) => Ok(t),
            None => unexpected(format!("{:x}", code), "error code", "error"),
        }
    }

    fn marshal(err: &ErrorMsg, bytes: &mut Vec<u8>) -> Result<(), OfpSerializationError> {
        match &err.error_type {
            ErrorType::Experimenter {
                exp_type,
                experimenter,
            } => {
                bytes.write_u16::<BigEndian>(0xffff)?;
                bytes.write_u16::<BigEndian>(*exp_type)?;
                bytes.write_u32::<BigEndian>(*experimenter)?;
            }
            t => {
                let (type_code, code) = Error0x04::error_type_codes(t)?;
                bytes.write_u16::<BigEndian>(type_code)?;
                bytes.write_u16::<BigEndian>(code)?;
            }
        }
        bytes.write_all(&err.data)?;
        Ok(())
    }

    fn parse(buf: &[u8]) -> Result<ErrorMsg, OfpSerializationError> {
        let mut bytes = Cursor::new(buf.to_vec());
        check_remaining(&bytes, 4, "error")?;
        let type_code = bytes.read_u16::<BigEndian>()?;
        let error_type = if type_code == 0xffff {
            let exp_type = bytes.read_u16::<BigEndian>()?;
            check_remaining(&bytes, 4, "experimenter error")?;
            ErrorType::Experimenter {
                exp_type,
                experimenter: bytes.read_u32::<BigEndian>()?,
            }
        } else {
            let code = bytes.read_u16::<BigEndian>()?;
            Error0x04::error_type_of_codes(type_code, code)?
        };
        Ok(ErrorMsg {
            error_type,
            data: bytes.fill_buf()?.to_vec(),
        })
    }
}

create_empty_wrapper!(SwitchFeatures, SwitchFeatures0x04);

impl SwitchFeatures0x04 {
    fn marshal(sf: &SwitchFeatures, bytes: &mut Vec<u8>) -> Result<(), OfpSerializationError> {
        if !sf.ports.is_empty() {
            return Err(OfpSerializationError::UnimplementedFeatureInVersion {
                version: OPENFLOW_0_04_VERSION,
                feature: "port list in features reply".to_string(),
            });
        }
        bytes.write_all(&sf.datapath_mac)?;
        bytes.write_u16::<BigEndian>(sf.datapath_id)?;
        bytes.write_u32::<BigEndian>(sf.n_buffers)?;
        bytes.write_u8(sf.n_tables)?;
        bytes.write_u8(sf.auxiliary_id)?;
        write_padding_bytes(bytes, 2)?;
        bytes.write_u32::<BigEndian>(flags_to_u32(
            &sf.capabilities,
            capability_bit,
            "capabilities",
        )?)?;
        bytes.write_u32::<BigEndian>(0)?; // reserved
        Ok(())
    }

    fn parse(buf: &[u8]) -> Result<SwitchFeatures, OfpSerializationError> {
        let mut bytes = Cursor::new(buf.to_vec());
        check_remaining(&bytes, 24, "features reply")?;
        let mut datapath_mac = [0u8; 6];
        bytes.read_exact(&mut datapath_mac)?;
        let datapath_id = bytes.read_u16::<BigEndian>()?;
        let n_buffers = bytes.read_u32::<BigEndian>()?;
        let n_tables = bytes.read_u8()?;
        let auxiliary_id = bytes.read_u8()?;
        bytes.consume(2);
        let capabilities = u32_to_flags(
            bytes.read_u32::<BigEndian>()?,
            capability_of_bit,
            "capabilities",
        )?;
        bytes.consume(4); // reserved
        Ok(SwitchFeatures {
            datapath_mac,
            datapath_id,
            n_buffers,
            n_tables,
            auxiliary_id,
            capabilities,
            ports: vec![],
        })
    }
}

create_empty_wrapper!(SwitchConfig, SwitchConfig0x04);

impl SwitchConfig0x04 {
    fn marshal(cfg: &SwitchConfig, bytes: &mut Vec<u8>) -> Result<(), OfpSerializationError> {
        bytes.write_u16::<BigEndian>(flags_to_u16(&cfg.flags, config_flag_bit, "config flags")?)?;
        bytes.write_u16::<BigEndian>(cfg.miss_send_len)?;
        Ok(())
    }

    fn parse(buf: &[u8]) -> Result<SwitchConfig, OfpSerializationError> {
        let mut bytes = Cursor::new(buf.to_vec());
        check_remaining(&bytes, 4, "switch config")?;
        Ok(SwitchConfig {
            flags: u16_to_flags(
                bytes.read_u16::<BigEndian>()?,
                config_flag_of_bit,
                "config flags",
            )?,
            miss_send_len: bytes.read_u16::<BigEndian>()?,
        })
    }
}

create_empty_wrapper!(PacketIn, PacketIn0x04);

impl PacketIn0x04 {
    fn marshal(pi: &PacketIn, bytes: &mut Vec<u8>) -> Result<(), OfpSerializationError> {
        bytes.write_u32::<BigEndian>(pi.buffer_id.unwrap_or(OFP_NO_BUFFER))?;
        bytes.write_u16::<BigEndian>(pi.total_len)?;
        bytes.write_u8(pi.reason as u8)?;
        bytes.write_u8(pi.table_id)?;
        bytes.write_u64::<BigEndian>(pi.cookie.unwrap_or(0))?;
        match &pi.pattern {
            Some(pattern) => Match0x04::marshal(pattern, bytes)?,
            None => Match0x04::marshal(&Match::match_all(), bytes)?,
        }
        write_padding_bytes(bytes, 2)?;
        bytes.write_all(&pi.data)?;
        Ok(())
    }

    fn parse(buf: &[u8]) -> Result<PacketIn, OfpSerializationError> {
        let mut bytes = Cursor::new(buf.to_vec());
        check_remaining(&bytes, 16, "packet in")?;
        let buffer_id = match bytes.read_u32::<BigEndian>()? {
            OFP_NO_BUFFER => None,
            n => Some(n),
        };
        let total_len = bytes.read_u16::<BigEndian>()?;
        let reason_code = bytes.read_u8()?;
        let reason = match PacketInReason::from_u8(reason_code) {
            Some(r) => r,
            None => return unexpected(format!("{}", reason_code), "reason", "packet in"),
        };
        let table_id = bytes.read_u8()?;
        let cookie = bytes.read_u64::<BigEndian>()?;
        let pattern = Match0x04::parse(&mut bytes)?;
        check_remaining(&bytes, 2, "packet in")?;
        bytes.consume(2);
        Ok(PacketIn {
            buffer_id,
            in_port: None,
            in_phy_port: None,
            total_len,
            reason,
            table_id,
            cookie: Some(cookie),
            pattern: Some(pattern),
            data: bytes.fill_buf()?.to_vec(),
        })
    }
}

create_empty_wrapper!(FlowRemoved, FlowRemoved0x04);

impl FlowRemoved0x04 {
    fn marshal(fr: &FlowRemoved, bytes: &mut Vec<u8>) -> Result<(), OfpSerializationError> {
        bytes.write_u64::<BigEndian>(fr.cookie)?;
        bytes.write_u16::<BigEndian>(fr.priority)?;
        bytes.write_u8(fr.reason as u8)?;
        bytes.write_u8(fr.table_id)?;
        bytes.write_u32::<BigEndian>(fr.duration_sec)?;
        bytes.write_u32::<BigEndian>(fr.duration_nsec)?;
        bytes.write_u16::<BigEndian>(fr.idle_timeout)?;
        bytes.write_u16::<BigEndian>(fr.hard_timeout)?;
        bytes.write_u64::<BigEndian>(fr.packet_count)?;
        bytes.write_u64::<BigEndian>(fr.byte_count)?;
        Match0x04::marshal(&fr.pattern, bytes)
    }

    fn parse(buf: &[u8]) -> Result<FlowRemoved, OfpSerializationError> {
        let mut bytes = Cursor::new(buf.to_vec());
        check_remaining(&bytes, 40, "flow removed")?;
        let cookie = bytes.read_u64::<BigEndian>()?;
        let priority = bytes.read_u16::<BigEndian>()?;
        let reason_code = bytes.read_u8()?;
        let reason = match FlowRemovedReason::from_u8(reason_code) {
            Some(r) => r,
            None => return unexpected(format!("{}", reason_code), "reason", "flow removed"),
        };
        let table_id = bytes.read_u8()?;
        Ok(FlowRemoved {
            cookie,
            priority,
            reason,
            table_id,
            duration_sec: bytes.read_u32::<BigEndian>()?,
            duration_nsec: bytes.read_u32::<BigEndian>()?,
            idle_timeout: bytes.read_u16::<BigEndian>()?,
            hard_timeout: bytes.read_u16::<BigEndian>()?,
            packet_count: bytes.read_u64::<BigEndian>()?,
            byte_count: bytes.read_u64::<BigEndian>()?,
            pattern: Match0x04::parse(&mut bytes)?,
        })
    }
}

create_empty_wrapper!(PortStatus, PortStatus0x04);

impl PortStatus0x04 {
    fn marshal(ps: &PortStatus, bytes: &mut Vec<u8>) -> Result<(), OfpSerializationError> {
        bytes.write_u8(ps.reason as u8)?;
        write_padding_bytes(bytes, 7)?;
        PortDesc0x04::marshal(&ps.desc, bytes)
    }

    fn parse(buf: &[u8]) -> Result<PortStatus, OfpSerializationError> {
        let mut bytes = Cursor::new(buf.to_vec());
        check_remaining(&bytes, 8, "port status")?;
        let reason_code = bytes.read_u8()?;
        let reason = match PortReason::from_u8(reason_code) {
            Some(r) => r,
            None => return unexpected(format!("{}", reason_code), "reason", "port status"),
        };
        bytes.consume(7);
        Ok(PortStatus {
            reason,
            desc: PortDesc0x04::parse(&mut bytes)?,
        })
    }
}

create_empty_wrapper!(PacketOut, PacketOut0x04);

impl PacketOut0x04 {
    fn marshal(po: &PacketOut, bytes: &mut Vec<u8>) -> Result<(), OfpSerializationError> {
        bytes.write_u32::<BigEndian>(po.buffer_id.unwrap_or(OFP_NO_BUFFER))?;
        PseudoPort0x04::marshal(po.in_port, bytes)?;
        bytes.write_u16::<BigEndian>(po.actions.len() as u16)?;
        write_padding_bytes(bytes, 6)?;
        bytes.write_all(&po.actions)?;
        bytes.write_all(&po.data)?;
        Ok(())
    }

    fn parse(buf: &[u8]) -> Result<PacketOut, OfpSerializationError> {
        let mut bytes = Cursor::new(buf.to_vec());
        check_remaining(&bytes, 16, "packet out")?;
        let buffer_id = match bytes.read_u32::<BigEndian>()? {
            OFP_NO_BUFFER => None,
            n => Some(n),
        };
        let in_port = PseudoPort0x04::make(bytes.read_u32::<BigEndian>()?)?;
        let actions_len = bytes.read_u16::<BigEndian>()? as usize;
        bytes.consume(6);
        check_remaining(&bytes, actions_len, "packet out actions")?;
        let mut actions = vec![0u8; actions_len];
        bytes.read_exact(&mut actions)?;
        Ok(PacketOut {
            buffer_id,
            in_port,
            actions,
            data: bytes.fill_buf()?.to_vec(),
        })
    }
}

create_empty_wrapper!(FlowMod, FlowMod0x04);

impl FlowMod0x04 {
    fn marshal(fm: &FlowMod, bytes: &mut Vec<u8>) -> Result<(), OfpSerializationError> {
        bytes.write_u64::<BigEndian>(fm.cookie)?;
        bytes.write_u64::<BigEndian>(fm.cookie_mask)?;
        bytes.write_u8(fm.table_id)?;
        bytes.write_u8(fm.command as u8)?;
        bytes.write_u16::<BigEndian>(fm.idle_timeout)?;
        bytes.write_u16::<BigEndian>(fm.hard_timeout)?;
        bytes.write_u16::<BigEndian>(fm.priority)?;
        bytes.write_u32::<BigEndian>(fm.buffer_id.unwrap_or(OFP_NO_BUFFER))?;
        PseudoPort0x04::marshal(fm.out_port, bytes)?;
        bytes.write_u32::<BigEndian>(fm.out_group)?;
        bytes.write_u16::<BigEndian>(flags_to_u16(
            &fm.flags,
            flow_mod_flag_bit,
            "flow mod flags",
        )?)?;
        write_padding_bytes(bytes, 2)?;
        Match0x04::marshal(&fm.pattern, bytes)?;
        for instruction in &fm.instructions {
            Instruction0x04::marshal(instruction, bytes)?;
        }
        Ok(())
    }

    fn parse(buf: &[u8]) -> Result<FlowMod, OfpSerializationError> {
        let mut bytes = Cursor::new(buf.to_vec());
        check_remaining(&bytes, 40, "flow mod")?;
        let cookie = bytes.read_u64::<BigEndian>()?;
        let cookie_mask = bytes.read_u64::<BigEndian>()?;
        let table_id = bytes.read_u8()?;
        let command_code = bytes.read_u8()?;
        let command = match FlowModCommand::from_u8(command_code) {
            Some(c) => c,
            None => return unexpected(format!("{}", command_code), "command", "flow mod"),
        };
        let idle_timeout = bytes.read_u16::<BigEndian>()?;
        let hard_timeout = bytes.read_u16::<BigEndian>()?;
        let priority = bytes.read_u16::<BigEndian>()?;
        let buffer_id = match bytes.read_u32::<BigEndian>()? {
            OFP_NO_BUFFER => None,
            n => Some(n),
        };
        let out_port = PseudoPort0x04::make(bytes.read_u32::<BigEndian>()?)?;
        let out_group = bytes.read_u32::<BigEndian>()?;
        let flags = u16_to_flags(
            bytes.read_u16::<BigEndian>()?,
            flow_mod_flag_of_bit,
            "flow mod flags",
        )?;
        bytes.consume(2);
        let pattern = Match0x04::parse(&mut bytes)?;
        let instructions = Instruction0x04::parse_sequence(&mut bytes)?;
        Ok(FlowMod {
            cookie,
            cookie_mask,
            table_id,
            command,
            idle_timeout,
            hard_timeout,
            priority,
            buffer_id,
            out_port,
            out_group,
            flags,
            pattern,
            instructions,
        })
    }
}

const OFP_BUCKET_LENGTH: usize = 16;

create_empty_wrapper!(Bucket, Bucket0x04);

impl Bucket0x04 {
    fn size_of(b: &Bucket) -> usize {
        OFP_BUCKET_LENGTH + b.actions.len()
    }

    fn marshal(b: &Bucket, bytes: &mut Vec<u8>) -> Result<(), OfpSerializationError> {
        bytes.write_u16::<BigEndian>(Bucket0x04::size_of(b) as u16)?;
        bytes.write_u16::<BigEndian>(b.weight)?;
        bytes.write_u32::<BigEndian>(b.watch_port)?;
        bytes.write_u32::<BigEndian>(b.watch_group)?;
        write_padding_bytes(bytes, 4)?;
        bytes.write_all(&b.actions)?;
        Ok(())
    }

    fn parse(bytes: &mut Cursor<Vec<u8>>) -> Result<Bucket, OfpSerializationError> {
        check_remaining(bytes, OFP_BUCKET_LENGTH, "bucket")?;
        let length = bytes.read_u16::<BigEndian>()? as usize;
        if length < OFP_BUCKET_LENGTH {
            return Err(OfpSerializationError::LengthMismatch {
                declared: length,
                found: OFP_BUCKET_LENGTH,
                structure: "bucket".to_string(),
            });
        }
        let weight = bytes.read_u16::<BigEndian>()?;
        let watch_port = bytes.read_u32::<BigEndian>()?;
        let watch_group = bytes.read_u32::<BigEndian>()?;
        bytes.consume(4);
        check_remaining(bytes, length - OFP_BUCKET_LENGTH, "bucket actions")?;
        let mut actions = vec![0u8; length - OFP_BUCKET_LENGTH];
        bytes.read_exact(&mut actions)?;
        Ok(Bucket {
            weight,
            watch_port,
            watch_group,
            actions,
        })
    }
}

create_empty_wrapper!(GroupMod, GroupMod0x04);

impl GroupMod0x04 {
    fn marshal(gm: &GroupMod, bytes: &mut Vec<u8>) -> Result<(), OfpSerializationError> {
        bytes.write_u16::<BigEndian>(gm.command as u16)?;
        bytes.write_u8(gm.group_type as u8)?;
        write_padding_bytes(bytes, 1)?;
        bytes.write_u32::<BigEndian>(gm.group_id)?;
        for bucket in &gm.buckets {
            Bucket0x04::marshal(bucket, bytes)?;
        }
        Ok(())
    }

    fn parse(buf: &[u8]) -> Result<GroupMod, OfpSerializationError> {
        let mut bytes = Cursor::new(buf.to_vec());
        check_remaining(&bytes, 8, "group mod")?;
        let command_code = bytes.read_u16::<BigEndian>()?;
        let command = match GroupModCommand::from_u16(command_code) {
            Some(c) => c,
            None => return unexpected(format!("{}", command_code), "command", "group mod"),
        };
        let type_code = bytes.read_u8()?;
        let group_type = match GroupType::from_u8(type_code) {
            Some(t) => t,
            None => return unexpected(format!("{}", type_code), "group type", "group mod"),
        };
        bytes.consume(1);
        let group_id = bytes.read_u32::<BigEndian>()?;
        let mut buckets = vec![];
        while bytes.remaining() > 0 {
            buckets.push(Bucket0x04::parse(&mut bytes)?);
        }
        Ok(GroupMod {
            command,
            group_type,
            group_id,
            buckets,
        })
    }
}

create_empty_wrapper!(PortMod, PortMod0x04);

impl PortMod0x04 {
    fn marshal(pm: &PortMod, bytes: &mut Vec<u8>) -> Result<(), OfpSerializationError> {
        PseudoPort0x04::marshal(pm.port_no, bytes)?;
        write_padding_bytes(bytes, 4)?;
        bytes.write_all(&pm.hw_addr)?;
        write_padding_bytes(bytes, 2)?;
        bytes.write_u32::<BigEndian>(flags_to_u32(&pm.config, port_config_bit, "port config")?)?;
        bytes.write_u32::<BigEndian>(flags_to_u32(&pm.mask, port_config_bit, "port config")?)?;
        bytes.write_u32::<BigEndian>(flags_to_u32(
            &pm.advertise,
            port_feature_bit,
            "port features",
        )?)?;
        write_padding_bytes(bytes, 4)?;
        Ok(())
    }

    fn parse(buf: &[u8]) -> Result<PortMod, OfpSerializationError> {
        let mut bytes = Cursor::new(buf.to_vec());
        check_remaining(&bytes, 32, "port mod")?;
        let port_no = PseudoPort0x04::make(bytes.read_u32::<BigEndian>()?)?;
        bytes.consume(4);
        let mut hw_addr = [0u8; 6];
        bytes.read_exact(&mut hw_addr)?;
        bytes.consume(2);
        let config = u32_to_flags(
            bytes.read_u32::<BigEndian>()?,
            port_config_of_bit,
            "port config",
        )?;
        let mask = u32_to_flags(
            bytes.read_u32::<BigEndian>()?,
            port_config_of_bit,
            "port config",
        )?;
        let advertise = u32_to_flags(
            bytes.read_u32::<BigEndian>()?,
            port_feature_of_bit,
            "port features",
        )?;
        bytes.consume(4);
        Ok(PortMod {
            port_no,
            hw_addr,
            config,
            mask,
            advertise,
        })
    }
}

create_empty_wrapper!(TableMod, TableMod0x04);

impl TableMod0x04 {
    fn marshal(tm: &TableMod, bytes: &mut Vec<u8>) -> Result<(), OfpSerializationError> {
        bytes.write_u8(tm.table_id)?;
        write_padding_bytes(bytes, 3)?;
        bytes.write_u32::<BigEndian>(flags_to_u32(
            &tm.config,
            table_config_bit,
            "table config",
        )?)?;
        Ok(())
    }

    fn parse(buf: &[u8]) -> Result<TableMod, OfpSerializationError> {
        let mut bytes = Cursor::new(buf.to_vec());
        check_remaining(&bytes, 8, "table mod")?;
        let table_id = bytes.read_u8()?;
        bytes.consume(3);
        let config = u32_to_flags(
            bytes.read_u32::<BigEndian>()?,
            table_config_of_bit,
            "table config",
        )?;
        Ok(TableMod { table_id, config })
    }
}

create_empty_wrapper!(Role, Role0x04);

impl Role0x04 {
    fn marshal(role: &Role, bytes: &mut Vec<u8>) -> Result<(), OfpSerializationError> {
        bytes.write_u32::<BigEndian>(role.role as u32)?;
        write_padding_bytes(bytes, 4)?;
        bytes.write_u64::<BigEndian>(role.generation_id)?;
        Ok(())
    }

    fn parse(buf: &[u8]) -> Result<Role, OfpSerializationError> {
        let mut bytes = Cursor::new(buf.to_vec());
        check_remaining(&bytes, 16, "role")?;
        let role_code = bytes.read_u32::<BigEndian>()?;
        let role = match ControllerRole::from_u32(role_code) {
            Some(r) => r,
            None => return unexpected(format!("{}", role_code), "role", "role request"),
        };
        bytes.consume(4);
        Ok(Role {
            role,
            generation_id: bytes.read_u64::<BigEndian>()?,
        })
    }
}

create_empty_wrapper!(MeterMod, MeterMod0x04);

impl MeterMod0x04 {
    fn marshal(mm: &MeterMod, bytes: &mut Vec<u8>) -> Result<(), OfpSerializationError> {
        bytes.write_u16::<BigEndian>(mm.command as u16)?;
        bytes.write_u16::<BigEndian>(flags_to_u16(&mm.flags, meter_flag_bit, "meter flags")?)?;
        bytes.write_u32::<BigEndian>(mm.meter_id)?;
        for band in &mm.bands {
            MeterBand0x04::marshal(band, bytes)?;
        }
        Ok(())
    }

    fn parse(buf: &[u8]) -> Result<MeterMod, OfpSerializationError> {
        let mut bytes = Cursor::new(buf.to_vec());
        check_remaining(&bytes, 8, "meter mod")?;
        let command_code = bytes.read_u16::<BigEndian>()?;
        let command = match MeterModCommand::from_u16(command_code) {
            Some(c) => c,
            None => return unexpected(format!("{}", command_code), "command", "meter mod"),
        };
        let flags = u16_to_flags(
            bytes.read_u16::<BigEndian>()?,
            meter_flag_of_bit,
            "meter flags",
        )?;
        let meter_id = bytes.read_u32::<BigEndian>()?;
        let mut bands = vec![];
        while bytes.remaining() > 0 {
            bands.push(MeterBand0x04::parse(&mut bytes)?);
        }
        Ok(MeterMod {
            command,
            flags,
            meter_id,
            bands,
        })
    }
}

create_empty_wrapper!(Experimenter, Experimenter0x04);

impl Experimenter0x04 {
    fn marshal(exp: &Experimenter, bytes: &mut Vec<u8>) -> Result<(), OfpSerializationError> {
        bytes.write_u32::<BigEndian>(exp.experimenter)?;
        bytes.write_u32::<BigEndian>(exp.exp_type)?;
        bytes.write_all(&exp.data)?;
        Ok(())
    }

    fn parse(buf: &[u8]) -> Result<Experimenter, OfpSerializationError> {
        let mut bytes = Cursor::new(buf.to_vec());
        check_remaining(&bytes, 8, "experimenter")?;
        Ok(Experimenter {
            experimenter: bytes.read_u32::<BigEndian>()?,
            exp_type: bytes.read_u32::<BigEndian>()?,
            data: bytes.fill_buf()?.to_vec(),
        })
    }
}

create_empty_wrapper!(QueueGetConfigReply, QueueGetConfig0x04);

impl QueueGetConfig0x04 {
    fn marshal_request(
        port: PseudoPort,
        bytes: &mut Vec<u8>,
    ) -> Result<(), OfpSerializationError> {
        PseudoPort0x04::marshal(port, bytes)?;
        write_padding_bytes(bytes, 4)
    }

    fn parse_request(buf: &[u8]) -> Result<PseudoPort, OfpSerializationError> {
        let mut bytes = Cursor::new(buf.to_vec());
        check_remaining(&bytes, 8, "queue get config request")?;
        PseudoPort0x04::make(bytes.read_u32::<BigEndian>()?)
    }

    fn marshal_reply(
        reply: &QueueGetConfigReply,
        bytes: &mut Vec<u8>,
    ) -> Result<(), OfpSerializationError> {
        PseudoPort0x04::marshal(reply.port, bytes)?;
        write_padding_bytes(bytes, 4)?;
        for queue in &reply.queues {
            PacketQueue0x04::marshal(queue, bytes)?;
        }
        Ok(())
    }

    fn parse_reply(buf: &[u8]) -> Result<QueueGetConfigReply, OfpSerializationError> {
        let mut bytes = Cursor::new(buf.to_vec());
        check_remaining(&bytes, 8, "queue get config reply")?;
        let port = PseudoPort0x04::make(bytes.read_u32::<BigEndian>()?)?;
        bytes.consume(4);
        let mut queues = vec![];
        while bytes.remaining() > 0 {
            queues.push(PacketQueue0x04::parse(&mut bytes)?);
        }
        Ok(QueueGetConfigReply { port, queues })
    }
}

#[repr(u16)]
enum OfpStatsType {
    OFPMPDesc = 0,
    OFPMPFlow = 1,
    OFPMPAggregate = 2,
    OFPMPTable = 3,
    OFPMPPort = 4,
    OFPMPQueue = 5,
}

create_empty_wrapper!(StatsRequest, Stats0x04);

impl Stats0x04 {
    fn request_type_code(body: &StatsRequestBody) -> u16 {
        match body {
            StatsRequestBody::Desc => OfpStatsType::OFPMPDesc as u16,
            StatsRequestBody::Flow(_) => OfpStatsType::OFPMPFlow as u16,
            StatsRequestBody::Aggregate(_) => OfpStatsType::OFPMPAggregate as u16,
            StatsRequestBody::Table => OfpStatsType::OFPMPTable as u16,
            StatsRequestBody::Port { .. } => OfpStatsType::OFPMPPort as u16,
            StatsRequestBody::Queue { .. } => OfpStatsType::OFPMPQueue as u16,
        }
    }

    fn reply_type_code(body: &StatsReplyBody) -> u16 {
        match body {
            StatsReplyBody::Desc(_) => OfpStatsType::OFPMPDesc as u16,
            StatsReplyBody::Flow(_) => OfpStatsType::OFPMPFlow as u16,
            StatsReplyBody::Aggregate { .. } => OfpStatsType::OFPMPAggregate as u16,
            StatsReplyBody::Table(_) => OfpStatsType::OFPMPTable as u16,
            StatsReplyBody::Port(_) => OfpStatsType::OFPMPPort as u16,
            StatsReplyBody::Queue(_) => OfpStatsType::OFPMPQueue as u16,
        }
    }

    fn marshal_flow_request(
        req: &FlowStatsRequest,
        bytes: &mut Vec<u8>,
    ) -> Result<(), OfpSerializationError> {
        bytes.write_u8(req.table_id)?;
        write_padding_bytes(bytes, 3)?;
        PseudoPort0x04::marshal(req.out_port, bytes)?;
        bytes.write_u32::<BigEndian>(req.out_group)?;
        write_padding_bytes(bytes, 4)?;
        bytes.write_u64::<BigEndian>(req.cookie)?;
        bytes.write_u64::<BigEndian>(req.cookie_mask)?;
        Match0x04::marshal(&req.pattern, bytes)
    }

    fn parse_flow_request(
        bytes: &mut Cursor<Vec<u8>>,
    ) -> Result<FlowStatsRequest, OfpSerializationError> {
        check_remaining(bytes, 32, "flow stats request")?;
        let table_id = bytes.read_u8()?;
        bytes.consume(3);
        let out_port = PseudoPort0x04::make(bytes.read_u32::<BigEndian>()?)?;
        let out_group = bytes.read_u32::<BigEndian>()?;
        bytes.consume(4);
        let cookie = bytes.read_u64::<BigEndian>()?;
        let cookie_mask = bytes.read_u64::<BigEndian>()?;
        let pattern = Match0x04::parse(bytes)?;
        Ok(FlowStatsRequest {
            table_id,
            out_port,
            out_group,
            cookie,
            cookie_mask,
            pattern,
        })
    }

    fn marshal_request(
        req: &StatsRequest,
        bytes: &mut Vec<u8>,
    ) -> Result<(), OfpSerializationError> {
        bytes.write_u16::<BigEndian>(Stats0x04::request_type_code(&req.body))?;
        bytes.write_u16::<BigEndian>(req.flags)?;
        write_padding_bytes(bytes, 4)?;
        match &req.body {
            StatsRequestBody::Desc | StatsRequestBody::Table => {}
            StatsRequestBody::Flow(f) | StatsRequestBody::Aggregate(f) => {
                Stats0x04::marshal_flow_request(f, bytes)?;
            }
            StatsRequestBody::Port { port_no } => {
                PseudoPort0x04::marshal(*port_no, bytes)?;
                write_padding_bytes(bytes, 4)?;
            }
            StatsRequestBody::Queue { port_no, queue_id } => {
                PseudoPort0x04::marshal(*port_no, bytes)?;
                bytes.write_u32::<BigEndian>(*queue_id)?;
            }
        }
        Ok(())
    }

    fn parse_request(buf: &[u8]) -> Result<StatsRequest, OfpSerializationError> {
        let mut bytes = Cursor::new(buf.to_vec());
        check_remaining(&bytes, 8, "stats request")?;
        let type_code = bytes.read_u16::<BigEndian>()?;
        let flags = bytes.read_u16::<BigEndian>()?;
        bytes.consume(4);
        let body = match type_code {
            t if t == (OfpStatsType::OFPMPDesc as u16) => StatsRequestBody::Desc,
            t if t == (OfpStatsType::OFPMPFlow as u16) => {
                StatsRequestBody::Flow(Stats0x04::parse_flow_request(&mut bytes)?)
            }
            t if t == (OfpStatsType::OFPMPAggregate as u16) => {
                StatsRequestBody::Aggregate(Stats0x04::parse_flow_request(&mut bytes)?)
            }
            t if t == (OfpStatsType::OFPMPTable as u16) => StatsRequestBody::Table,
            t if t == (OfpStatsType::OFPMPPort as u16) => {
                check_remaining(&bytes, 8, "port stats request")?;
                let port_no = PseudoPort0x04::make(bytes.read_u32::<BigEndian>()?)?;
                bytes.consume(4);
                StatsRequestBody::Port { port_no }
            }
            t if t == (OfpStatsType::OFPMPQueue as u16) => {
                check_remaining(&bytes, 8, "queue stats request")?;
                StatsRequestBody::Queue {
                    port_no: PseudoPort0x04::make(bytes.read_u32::<BigEndian>()?)?,
                    queue_id: bytes.read_u32::<BigEndian>()?,
                }
            }
            code => return unexpected(format!("{}", code), "stats type", "stats request"),
        };
        Ok(StatsRequest { flags, body })
    }

    fn marshal_flow_entry(
        entry: &FlowStatsEntry,
        bytes: &mut Vec<u8>,
    ) -> Result<(), OfpSerializationError> {
        let mut body = vec![];
        body.write_u8(entry.table_id)?;
        write_padding_bytes(&mut body, 1)?;
        body.write_u32::<BigEndian>(entry.duration_sec)?;
        body.write_u32::<BigEndian>(entry.duration_nsec)?;
        body.write_u16::<BigEndian>(entry.priority)?;
        body.write_u16::<BigEndian>(entry.idle_timeout)?;
        body.write_u16::<BigEndian>(entry.hard_timeout)?;
        body.write_u16::<BigEndian>(flags_to_u16(
            &entry.flags,
            flow_mod_flag_bit,
            "flow mod flags",
        )?)?;
        write_padding_bytes(&mut body, 4)?;
        body.write_u64::<BigEndian>(entry.cookie)?;
        body.write_u64::<BigEndian>(entry.packet_count)?;
        body.write_u64::<BigEndian>(entry.byte_count)?;
        Match0x04::marshal(&entry.pattern, &mut body)?;
        for instruction in &entry.instructions {
            Instruction0x04::marshal(instruction, &mut body)?;
        }
        bytes.write_u16::<BigEndian>((body.len() + 2) as u16)?;
        bytes.write_all(&body)?;
        Ok(())
    }

    fn parse_flow_entry(
        bytes: &mut Cursor<Vec<u8>>,
    ) -> Result<FlowStatsEntry, OfpSerializationError> {
        check_remaining(bytes, 2, "flow stats entry")?;
        let length = bytes.read_u16::<BigEndian>()? as usize;
        if length < 48 {
            return Err(OfpSerializationError::LengthMismatch {
                declared: length,
                found: 48,
                structure: "flow stats entry".to_string(),
            });
        }
        check_remaining(bytes, length - 2, "flow stats entry")?;
        let mut entry_buf = vec![0u8; length - 2];
        bytes.read_exact(&mut entry_buf)?;
        let mut entry = Cursor::new(entry_buf);
        let table_id = entry.read_u8()?;
        entry.consume(1);
        let duration_sec = entry.read_u32::<BigEndian>()?;
        let duration_nsec = entry.read_u32::<BigEndian>()?;
        let priority = entry.read_u16::<BigEndian>()?;
        let idle_timeout = entry.read_u16::<BigEndian>()?;
        let hard_timeout = entry.read_u16::<BigEndian>()?;
        let flags = u16_to_flags(
            entry.read_u16::<BigEndian>()?,
            flow_mod_flag_of_bit,
            "flow mod flags",
        )?;
        entry.consume(4);
        let cookie = entry.read_u64::<BigEndian>()?;
        let packet_count = entry.read_u64::<BigEndian>()?;
        let byte_count = entry.read_u64::<BigEndian>()?;
        let pattern = Match0x04::parse(&mut entry)?;
        let instructions = Instruction0x04::parse_sequence(&mut entry)?;
        Ok(FlowStatsEntry {
            table_id,
            duration_sec,
            duration_nsec,
            priority,
            idle_timeout,
            hard_timeout,
            flags,
            cookie,
            packet_count,
            byte_count,
            pattern,
            instructions,
        })
    }

    fn marshal_reply(
        reply: &StatsReply,
        bytes: &mut Vec<u8>,
    ) -> Result<(), OfpSerializationError> {
        bytes.write_u16::<BigEndian>(Stats0x04::reply_type_code(&reply.body))?;
        bytes.write_u16::<BigEndian>(reply.flags)?;
        write_padding_bytes(bytes, 4)?;
        match &reply.body {
            StatsReplyBody::Desc(desc) => {
                write_fixed_size_string(bytes, &desc.mfr_desc, DESC_STR_LENGTH)?;
                write_fixed_size_string(bytes, &desc.hw_desc, DESC_STR_LENGTH)?;
                write_fixed_size_string(bytes, &desc.sw_desc, DESC_STR_LENGTH)?;
                write_fixed_size_string(bytes, &desc.serial_num, SERIAL_NUM_LENGTH)?;
                write_fixed_size_string(bytes, &desc.dp_desc, DESC_STR_LENGTH)?;
            }
            StatsReplyBody::Flow(entries) => {
                for entry in entries {
                    Stats0x04::marshal_flow_entry(entry, bytes)?;
                }
            }
            StatsReplyBody::Aggregate {
                packet_count,
                byte_count,
                flow_count,
            } => {
                bytes.write_u64::<BigEndian>(*packet_count)?;
                bytes.write_u64::<BigEndian>(*byte_count)?;
                bytes.write_u32::<BigEndian>(*flow_count)?;
                write_padding_bytes(bytes, 4)?;
            }
            StatsReplyBody::Table(entries) => {
                for entry in entries {
                    bytes.write_u8(entry.table_id)?;
                    write_padding_bytes(bytes, 3)?;
                    bytes.write_u32::<BigEndian>(entry.active_count)?;
                    bytes.write_u64::<BigEndian>(entry.lookup_count)?;
                    bytes.write_u64::<BigEndian>(entry.matched_count)?;
                }
            }
            StatsReplyBody::Port(entries) => {
                for entry in entries {
                    PseudoPort0x04::marshal(entry.port_no, bytes)?;
                    write_padding_bytes(bytes, 4)?;
                    bytes.write_u64::<BigEndian>(entry.packets.rx)?;
                    bytes.write_u64::<BigEndian>(entry.packets.tx)?;
                    bytes.write_u64::<BigEndian>(entry.bytes.rx)?;
                    bytes.write_u64::<BigEndian>(entry.bytes.tx)?;
                    bytes.write_u64::<BigEndian>(entry.dropped.rx)?;
                    bytes.write_u64::<BigEndian>(entry.dropped.tx)?;
                    bytes.write_u64::<BigEndian>(entry.errors.rx)?;
                    bytes.write_u64::<BigEndian>(entry.errors.tx)?;
                    bytes.write_u64::<BigEndian>(entry.rx_frame_errors)?;
                    bytes.write_u64::<BigEndian>(entry.rx_over_errors)?;
                    bytes.write_u64::<BigEndian>(entry.rx_crc_errors)?;
                    bytes.write_u64::<BigEndian>(entry.collisions)?;
                    bytes.write_u32::<BigEndian>(entry.duration_sec)?;
                    bytes.write_u32::<BigEndian>(entry.duration_nsec)?;
                }
            }
            StatsReplyBody::Queue(entries) => {
                for entry in entries {
                    PseudoPort0x04::marshal(entry.port_no, bytes)?;
                    bytes.write_u32::<BigEndian>(entry.queue_id)?;
                    bytes.write_u64::<BigEndian>(entry.tx_bytes)?;
                    bytes.write_u64::<BigEndian>(entry.tx_packets)?;
                    bytes.write_u64::<BigEndian>(entry.tx_errors)?;
                    bytes.write_u32::<BigEndian>(entry.duration_sec)?;
                    bytes.write_u32::<BigEndian>(entry.duration_nsec)?;
                }
            }
        }
        Ok(())
    }

    fn parse_reply(buf: &[u8]) -> Result<StatsReply, OfpSerializationError> {
        let mut bytes = Cursor::new(buf.to_vec());
        check_remaining(&bytes, 8, "stats reply")?;
        let type_code = bytes.read_u16::<BigEndian>()?;
        let flags = bytes.read_u16::<BigEndian>()?;
        bytes.consume(4);
        let body = match type_code {
            t if t == (OfpStatsType::OFPMPDesc as u16) => {
                StatsReplyBody::Desc(DescStats {
                    mfr_desc: read_fixed_size_string(&mut bytes, DESC_STR_LENGTH, "desc stats")?,
                    hw_desc: read_fixed_size_string(&mut bytes, DESC_STR_LENGTH, "desc stats")?,
                    sw_desc: read_fixed_size_string(&mut bytes, DESC_STR_LENGTH, "desc stats")?,
                    serial_num: read_fixed_size_string(
                        &mut bytes,
                        SERIAL_NUM_LENGTH,
                        "desc stats",
                    )?,
                    dp_desc: read_fixed_size_string(&mut bytes, DESC_STR_LENGTH, "desc stats")?,
                })
            }
            t if t == (OfpStatsType::OFPMPFlow as u16) => {
                let mut entries = vec![];
                while bytes.remaining() > 0 {
                    entries.push(Stats0x04::parse_flow_entry(&mut bytes)?);
                }
                StatsReplyBody::Flow(entries)
            }
            t if t == (OfpStatsType::OFPMPAggregate as u16) => {
                check_remaining(&bytes, 24, "aggregate stats reply")?;
                let packet_count = bytes.read_u64::<BigEndian>()?;
                let byte_count = bytes.read_u64::<BigEndian>()?;
                let flow_count = bytes.read_u32::<BigEndian>()?;
                bytes.consume(4);
                StatsReplyBody::Aggregate {
                    packet_count,
                    byte_count,
                    flow_count,
                }
            }
            t if t == (OfpStatsType::OFPMPTable as u16) => {
                let mut entries = vec![];
                while bytes.remaining() > 0 {
                    check_remaining(&bytes, 24, "table stats entry")?;
                    let table_id = bytes.read_u8()?;
                    bytes.consume(3);
                    entries.push(TableStatsEntry {
                        table_id,
                        active_count: bytes.read_u32::<BigEndian>()?,
                        lookup_count: bytes.read_u64::<BigEndian>()?,
                        matched_count: bytes.read_u64::<BigEndian>()?,
                    });
                }
                StatsReplyBody::Table(entries)
            }
            t if t == (OfpStatsType::OFPMPPort as u16) => {
                let mut entries = vec![];
                while bytes.remaining() > 0 {
                    check_remaining(&bytes, 112, "port stats entry")?;
                    let port_no = PseudoPort0x04::make(bytes.read_u32::<BigEndian>()?)?;
                    bytes.consume(4);
                    let rx_packets = bytes.read_u64::<BigEndian>()?;
                    let tx_packets = bytes.read_u64::<BigEndian>()?;
                    let rx_bytes = bytes.read_u64::<BigEndian>()?;
                    let tx_bytes = bytes.read_u64::<BigEndian>()?;
                    let rx_dropped = bytes.read_u64::<BigEndian>()?;
                    let tx_dropped = bytes.read_u64::<BigEndian>()?;
                    let rx_errors = bytes.read_u64::<BigEndian>()?;
                    let tx_errors = bytes.read_u64::<BigEndian>()?;
                    entries.push(PortStatsEntry {
                        port_no,
                        packets: TransmissionCounter {
                            rx: rx_packets,
                            tx: tx_packets,
                        },
                        bytes: TransmissionCounter {
                            rx: rx_bytes,
                            tx: tx_bytes,
                        },
                        dropped: TransmissionCounter {
                            rx: rx_dropped,
                            tx: tx_dropped,
                        },
                        errors: TransmissionCounter {
                            rx: rx_errors,
                            tx: tx_errors,
                        },
                        rx_frame_errors: bytes.read_u64::<BigEndian>()?,
                        rx_over_errors: bytes.read_u64::<BigEndian>()?,
                        rx_crc_errors: bytes.read_u64::<BigEndian>()?,
                        collisions: bytes.read_u64::<BigEndian>()?,
                        duration_sec: bytes.read_u32::<BigEndian>()?,
                        duration_nsec: bytes.read_u32::<BigEndian>()?,
                    });
                }
                StatsReplyBody::Port(entries)
            }
            t if t == (OfpStatsType::OFPMPQueue as u16) => {
                let mut entries = vec![];
                while bytes.remaining() > 0 {
                    check_remaining(&bytes, 40, "queue stats entry")?;
                    entries.push(QueueStatsEntry {
                        port_no: PseudoPort0x04::make(bytes.read_u32::<BigEndian>()?)?,
                        queue_id: bytes.read_u32::<BigEndian>()?,
                        tx_bytes: bytes.read_u64::<BigEndian>()?,
                        tx_packets: bytes.read_u64::<BigEndian>()?,
                        tx_errors: bytes.read_u64::<BigEndian>()?,
                        duration_sec: bytes.read_u32::<BigEndian>()?,
                        duration_nsec: bytes.read_u32::<BigEndian>()?,
                    });
                }
                StatsReplyBody::Queue(entries)
            }
            code => return unexpected(format!("{}", code), "stats type", "stats reply"),
        };
        Ok(StatsReply { flags, body })
    }
}

/// Encapsulates handling of complete v1.3 messages.
pub mod message {
    use super::*;
    use crate::ofp_header::OfpHeader;
    use crate::ofp_message::OfpMessage;
    use crate::openflow::MsgCode;

    pub struct Message0x04 {}

    impl Message0x04 {
        /// Map a message body to its associated OpenFlow message type code.
        fn msg_code_of_message(body: &MessageBody) -> MsgCode {
            match body {
                MessageBody::Hello => MsgCode::Hello,
                MessageBody::Error(_) => MsgCode::Error,
                MessageBody::EchoRequest(_) => MsgCode::EchoReq,
                MessageBody::EchoReply(_) => MsgCode::EchoResp,
                MessageBody::Experimenter(_) => MsgCode::Experimenter,
                MessageBody::FeaturesRequest => MsgCode::FeaturesReq,
                MessageBody::FeaturesReply(_) => MsgCode::FeaturesResp,
                MessageBody::GetConfigRequest => MsgCode::GetConfigReq,
                MessageBody::GetConfigReply(_) => MsgCode::GetConfigResp,
                MessageBody::SetConfig(_) => MsgCode::SetConfig,
                MessageBody::PacketIn(_) => MsgCode::PacketIn,
                MessageBody::FlowRemoved(_) => MsgCode::FlowRemoved,
                MessageBody::PortStatus(_) => MsgCode::PortStatus,
                MessageBody::PacketOut(_) => MsgCode::PacketOut,
                MessageBody::FlowMod(_) => MsgCode::FlowMod,
                MessageBody::GroupMod(_) => MsgCode::GroupMod,
                MessageBody::PortMod(_) => MsgCode::PortMod,
                MessageBody::TableMod(_) => MsgCode::TableMod,
                MessageBody::StatsRequest(_) => MsgCode::StatsReq,
                MessageBody::StatsReply(_) => MsgCode::StatsResp,
                MessageBody::BarrierRequest => MsgCode::BarrierReq,
                MessageBody::BarrierReply => MsgCode::BarrierResp,
                MessageBody::QueueGetConfigRequest { .. } => MsgCode::QueueGetConfigReq,
                MessageBody::QueueGetConfigReply(_) => MsgCode::QueueGetConfigResp,
                MessageBody::RoleRequest(_) => MsgCode::RoleReq,
                MessageBody::RoleReply(_) => MsgCode::RoleResp,
                MessageBody::GetAsyncRequest => MsgCode::GetAsyncReq,
                MessageBody::GetAsyncReply(_) => MsgCode::GetAsyncResp,
                MessageBody::SetAsync(_) => MsgCode::SetAsync,
                MessageBody::MeterMod(_) => MsgCode::MeterMod,
            }
        }

        fn msg_code_to_u8(code: MsgCode) -> Result<u8, OfpSerializationError> {
            match code {
                MsgCode::Hello => Ok(0),
                MsgCode::Error => Ok(1),
                MsgCode::EchoReq => Ok(2),
                MsgCode::EchoResp => Ok(3),
                MsgCode::Experimenter => Ok(4),
                MsgCode::FeaturesReq => Ok(5),
                MsgCode::FeaturesResp => Ok(6),
                MsgCode::GetConfigReq => Ok(7),
                MsgCode::GetConfigResp => Ok(8),
                MsgCode::SetConfig => Ok(9),
                MsgCode::PacketIn => Ok(10),
                MsgCode::FlowRemoved => Ok(11),
                MsgCode::PortStatus => Ok(12),
                MsgCode::PacketOut => Ok(13),
                MsgCode::FlowMod => Ok(14),
                MsgCode::GroupMod => Ok(15),
                MsgCode::PortMod => Ok(16),
                MsgCode::TableMod => Ok(17),
                MsgCode::StatsReq => Ok(18),
                MsgCode::StatsResp => Ok(19),
                MsgCode::BarrierReq => Ok(20),
                MsgCode::BarrierResp => Ok(21),
                MsgCode::QueueGetConfigReq => Ok(22),
                MsgCode::QueueGetConfigResp => Ok(23),
                MsgCode::RoleReq => Ok(24),
                MsgCode::RoleResp => Ok(25),
                MsgCode::GetAsyncReq => Ok(26),
                MsgCode::GetAsyncResp => Ok(27),
                MsgCode::SetAsync => Ok(28),
                MsgCode::MeterMod => Ok(29),
            }
        }

        fn msg_code_of_u8(code: u8) -> Result<MsgCode, OfpSerializationError> {
            match code {
                0 => Ok(MsgCode::Hello),
                1 => Ok(MsgCode::Error),
                2 => Ok(MsgCode::EchoReq),
                3 => Ok(MsgCode::EchoResp),
                4 => Ok(MsgCode::Experimenter),
                5 => Ok(MsgCode::FeaturesReq),
                6 => Ok(MsgCode::FeaturesResp),
                7 => Ok(MsgCode::GetConfigReq),
                8 => Ok(MsgCode::GetConfigResp),
                9 => Ok(MsgCode::SetConfig),
                10 => Ok(MsgCode::PacketIn),
                11 => Ok(MsgCode::FlowRemoved),
                12 => Ok(MsgCode::PortStatus),
                13 => Ok(MsgCode::PacketOut),
                14 => Ok(MsgCode::FlowMod),
                15 => Ok(MsgCode::GroupMod),
                16 => Ok(MsgCode::PortMod),
                17 => Ok(MsgCode::TableMod),
                18 => Ok(MsgCode::StatsReq),
                19 => Ok(MsgCode::StatsResp),
                20 => Ok(MsgCode::BarrierReq),
                21 => Ok(MsgCode::BarrierResp),
                22 => Ok(MsgCode::QueueGetConfigReq),
                23 => Ok(MsgCode::QueueGetConfigResp),
                24 => Ok(MsgCode::RoleReq),
                25 => Ok(MsgCode::RoleResp),
                26 => Ok(MsgCode::GetAsyncReq),
                27 => Ok(MsgCode::GetAsyncResp),
                28 => Ok(MsgCode::SetAsync),
                29 => Ok(MsgCode::MeterMod),
                c => unexpected(format!("0x{:x}", c), "message type", "message header"),
            }
        }

        /// Marshal the body of the OpenFlow message `body`.
        fn marshal_body(
            body: &MessageBody,
            bytes: &mut Vec<u8>,
        ) -> Result<(), OfpSerializationError> {
            match body {
                MessageBody::Hello
                | MessageBody::FeaturesRequest
                | MessageBody::GetConfigRequest
                | MessageBody::BarrierRequest
                | MessageBody::BarrierReply
                | MessageBody::GetAsyncRequest => Ok(()),
                MessageBody::Error(err) => Error0x04::marshal(err, bytes),
                MessageBody::EchoRequest(buf) | MessageBody::EchoReply(buf) => {
                    bytes.write_all(buf).map_err(OfpSerializationError::from)
                }
                MessageBody::Experimenter(exp) => Experimenter0x04::marshal(exp, bytes),
                MessageBody::FeaturesReply(sf) => SwitchFeatures0x04::marshal(sf, bytes),
                MessageBody::GetConfigReply(cfg) | MessageBody::SetConfig(cfg) => {
                    SwitchConfig0x04::marshal(cfg, bytes)
                }
                MessageBody::PacketIn(pi) => PacketIn0x04::marshal(pi, bytes),
                MessageBody::FlowRemoved(fr) => FlowRemoved0x04::marshal(fr, bytes),
                MessageBody::PortStatus(ps) => PortStatus0x04::marshal(ps, bytes),
                MessageBody::PacketOut(po) => PacketOut0x04::marshal(po, bytes),
                MessageBody::FlowMod(fm) => FlowMod0x04::marshal(fm, bytes),
                MessageBody::GroupMod(gm) => GroupMod0x04::marshal(gm, bytes),
                MessageBody::PortMod(pm) => PortMod0x04::marshal(pm, bytes),
                MessageBody::TableMod(tm) => TableMod0x04::marshal(tm, bytes),
                MessageBody::StatsRequest(req) => Stats0x04::marshal_request(req, bytes),
                MessageBody::StatsReply(reply) => Stats0x04::marshal_reply(reply, bytes),
                MessageBody::QueueGetConfigRequest { port } => {
                    QueueGetConfig0x04::marshal_request(*port, bytes)
                }
                MessageBody::QueueGetConfigReply(reply) => {
                    QueueGetConfig0x04::marshal_reply(reply, bytes)
                }
                MessageBody::RoleRequest(role) | MessageBody::RoleReply(role) => {
                    Role0x04::marshal(role, bytes)
                }
                MessageBody::GetAsyncReply(cfg) | MessageBody::SetAsync(cfg) => {
                    AsyncConfig0x04::marshal(cfg, bytes)
                }
                MessageBody::MeterMod(mm) => MeterMod0x04::marshal(mm, bytes),
            }
        }
    }

    impl OfpMessage for Message0x04 {
        fn size_of(msg: &Message) -> Result<usize, OfpSerializationError> {
            let mut body = vec![];
            Message0x04::marshal_body(&msg.body, &mut body)?;
            Ok(OfpHeader::size() + body.len())
        }

        fn header_of(msg: &Message) -> Result<OfpHeader, OfpSerializationError> {
            let length = Message0x04::size_of(msg)?;
            let code = Message0x04::msg_code_to_u8(Message0x04::msg_code_of_message(&msg.body))?;
            Ok(OfpHeader::new(
                OPENFLOW_0_04_VERSION,
                false,
                code,
                length as u16,
                msg.xid,
            ))
        }

        fn marshal(msg: &Message) -> Result<Vec<u8>, OfpSerializationError> {
            if msg.experimental {
                return Err(OfpSerializationError::InvariantViolation {
                    field: "experimental".to_string(),
                    details: "the experimental flag only exists on the v1.1 wire".to_string(),
                });
            }
            let mut body = vec![];
            Message0x04::marshal_body(&msg.body, &mut body)?;
            let length = OfpHeader::size() + body.len();
            if length > u16::max_value() as usize {
                return Err(OfpSerializationError::InvariantViolation {
                    field: "length".to_string(),
                    details: format!("message of {} bytes overflows the length field", length),
                });
            }
            let code = Message0x04::msg_code_to_u8(Message0x04::msg_code_of_message(&msg.body))?;
            let header = OfpHeader::new(
                OPENFLOW_0_04_VERSION,
                false,
                code,
                length as u16,
                msg.xid,
            );
            let mut bytes = vec![];
            OfpHeader::marshal(&mut bytes, &header)?;
            bytes.write_all(&body)?;
            Ok(bytes)
        }

        fn parse(header: &OfpHeader, buf: &[u8]) -> Result<Message, OfpSerializationError> {
            let code = Message0x04::msg_code_of_u8(header.type_code())?;
            debug!("Message received: {}", code);
            let body = match code {
                MsgCode::Hello => MessageBody::Hello,
                MsgCode::Error => MessageBody::Error(Error0x04::parse(buf)?),
                MsgCode::EchoReq => MessageBody::EchoRequest(buf.to_vec()),
                MsgCode::EchoResp => MessageBody::EchoReply(buf.to_vec()),
                MsgCode::Experimenter => {
                    MessageBody::Experimenter(Experimenter0x04::parse(buf)?)
                }
                MsgCode::FeaturesReq => MessageBody::FeaturesRequest,
                MsgCode::FeaturesResp => {
                    MessageBody::FeaturesReply(SwitchFeatures0x04::parse(buf)?)
                }
                MsgCode::GetConfigReq => MessageBody::GetConfigRequest,
                MsgCode::GetConfigResp => {
                    MessageBody::GetConfigReply(SwitchConfig0x04::parse(buf)?)
                }
                MsgCode::SetConfig => MessageBody::SetConfig(SwitchConfig0x04::parse(buf)?),
                MsgCode::PacketIn => MessageBody::PacketIn(PacketIn0x04::parse(buf)?),
                MsgCode::FlowRemoved => MessageBody::FlowRemoved(FlowRemoved0x04::parse(buf)?),
                MsgCode::PortStatus => MessageBody::PortStatus(PortStatus0x04::parse(buf)?),
                MsgCode::PacketOut => MessageBody::PacketOut(PacketOut0x04::parse(buf)?),
                MsgCode::FlowMod => MessageBody::FlowMod(FlowMod0x04::parse(buf)?),
                MsgCode::GroupMod => MessageBody::GroupMod(GroupMod0x04::parse(buf)?),
                MsgCode::PortMod => MessageBody::PortMod(PortMod0x04::parse(buf)?),
                MsgCode::TableMod => MessageBody::TableMod(TableMod0x04::parse(buf)?),
                MsgCode::StatsReq => MessageBody::StatsRequest(Stats0x04::parse_request(buf)?),
                MsgCode::StatsResp => MessageBody::StatsReply(Stats0x04::parse_reply(buf)?),
                MsgCode::BarrierReq => MessageBody::BarrierRequest,
                MsgCode::BarrierResp => MessageBody::BarrierReply,
                MsgCode::QueueGetConfigReq => MessageBody::QueueGetConfigRequest {
                    port: QueueGetConfig0x04::parse_request(buf)?,
                },
                MsgCode::QueueGetConfigResp => {
                    MessageBody::QueueGetConfigReply(QueueGetConfig0x04::parse_reply(buf)?)
                }
                MsgCode::RoleReq => MessageBody::RoleRequest(Role0x04::parse(buf)?),
                MsgCode::RoleResp => MessageBody::RoleReply(Role0x04::parse(buf)?),
                MsgCode::GetAsyncReq => MessageBody::GetAsyncRequest,
                MsgCode::GetAsyncResp => {
                    MessageBody::GetAsyncReply(AsyncConfig0x04::parse(&mut Cursor::new(buf.to_vec()))?)
                }
                MsgCode::SetAsync => MessageBody::SetAsync(AsyncConfig0x04::parse(&mut Cursor::new(buf.to_vec()))?),
                MsgCode::MeterMod => MessageBody::MeterMod(MeterMod0x04::parse(buf)?),
            };
            Ok(Message {
                version: OPENFLOW_0_04_VERSION,
                xid: header.xid(),
                experimental: false,
                body,
            })
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use crate::ofp_header::OfpHeader;

        const TEST_XID: u32 = 0x12345678;

        fn round_trip(body: MessageBody) -> Message {
            let msg = Message::new(OPENFLOW_0_04_VERSION, TEST_XID, body);
            let data = Message0x04::marshal(&msg).unwrap();
            let header = OfpHeader::parse(&data).unwrap();
            assert_eq!(header.length(), data.len());
            let parsed = Message0x04::parse(&header, &data[OfpHeader::size()..]).unwrap();
            assert_eq!(parsed, msg);
            parsed
        }

        fn port_desc() -> PortDesc {
            PortDesc {
                port_no: PseudoPort::PhysicalPort(1),
                hw_addr: [0x00, 0x01, 0x02, 0x03, 0x04, 0x05],
                name: "eth0".to_string(),
                config: vec![],
                state: vec![PortState::Live],
                curr: vec![PortFeature::Rate1GbFd, PortFeature::Copper],
                advertised: vec![],
                supported: vec![],
                peer: vec![],
                curr_speed: 1000000,
                max_speed: 1000000,
            }
        }

        fn sample_match() -> Match {
            Match {
                fields: vec![
                    MatchField::basic(OxmField::InPort, vec![0, 0, 0, 1]),
                    MatchField::basic(OxmField::EthType, vec![0x08, 0x00]),
                    MatchField::basic_masked(
                        OxmField::Ipv4Src,
                        vec![10, 0, 0, 1],
                        vec![255, 255, 255, 0],
                    ),
                ],
            }
        }

        fn flow_mod() -> FlowMod {
            FlowMod {
                cookie: 0x1234567887654321,
                cookie_mask: 0,
                table_id: 0,
                command: FlowModCommand::Add,
                idle_timeout: 180,
                hard_timeout: 0,
                priority: 16,
                buffer_id: None,
                out_port: PseudoPort::Any,
                out_group: 0xffffffff,
                flags: vec![FlowModFlag::SendFlowRem, FlowModFlag::CheckOverlap],
                pattern: sample_match(),
                instructions: vec![
                    Instruction::ApplyActions {
                        actions: vec![0xAB; 16],
                    },
                    Instruction::GotoTable { table_id: 1 },
                ],
            }
        }

        #[test]
        fn test_marshal_hello() {
            let msg = Message::new(OPENFLOW_0_04_VERSION, 0, MessageBody::Hello);
            let data = Message0x04::marshal(&msg).unwrap();
            assert_eq!(data, vec![0x04, 0x00, 0x00, 0x08, 0x00, 0x00, 0x00, 0x00]);
        }

        #[test]
        fn test_parse_hello() {
            let data = vec![0x04, 0x00, 0x00, 0x08, 0x00, 0x00, 0x00, 0x00];
            let header = OfpHeader::parse(&data).unwrap();
            let msg = Message0x04::parse(&header, &data[8..]).unwrap();
            assert_eq!(msg, Message::new(OPENFLOW_0_04_VERSION, 0, MessageBody::Hello));
        }

        #[test]
        fn test_marshal_echo_request() {
            let msg = Message::new(
                OPENFLOW_0_04_VERSION,
                TEST_XID,
                MessageBody::EchoRequest(vec![0xDE, 0xAD, 0xBE, 0xEF]),
            );
            let data = Message0x04::marshal(&msg).unwrap();
            assert_eq!(
                data,
                vec![0x04, 0x02, 0x00, 0x0C, 0x12, 0x34, 0x56, 0x78, 0xDE, 0xAD, 0xBE, 0xEF]
            );
        }

        #[test]
        fn test_features_reply() {
            let features = SwitchFeatures {
                datapath_mac: [0x00, 0x11, 0x22, 0x33, 0x44, 0x55],
                datapath_id: 0x6677,
                n_buffers: 256,
                n_tables: 8,
                auxiliary_id: 0,
                capabilities: vec![Capability::FlowStats, Capability::TableStats],
                ports: vec![],
            };
            let msg = Message::new(
                OPENFLOW_0_04_VERSION,
                TEST_XID,
                MessageBody::FeaturesReply(features),
            );
            let data = Message0x04::marshal(&msg).unwrap();
            assert_eq!(data.len(), 32);
            assert_eq!(&data[..4], &[0x04, 0x06, 0x00, 0x20]);
            assert_eq!(&data[8..16], &[0x00, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77]);
            // capabilities bitmap: flow_stats | table_stats
            assert_eq!(&data[24..28], &[0x00, 0x00, 0x00, 0x03]);

            let header = OfpHeader::parse(&data).unwrap();
            let parsed = Message0x04::parse(&header, &data[8..]).unwrap();
            assert_eq!(parsed, msg);
        }

        #[test]
        fn test_oxm_field_framing() {
            let field = MatchField::basic(OxmField::EthType, vec![0x08, 0x00]);
            let mut bytes = vec![];
            MatchField0x04::marshal(&field, &mut bytes).unwrap();
            assert_eq!(bytes, vec![0x80, 0x00, 0x0A, 0x02, 0x08, 0x00]);
        }

        #[test]
        fn test_match_is_padded_to_eight_bytes() {
            let m = Match {
                fields: vec![MatchField::basic(OxmField::EthType, vec![0x08, 0x00])],
            };
            let mut bytes = vec![];
            Match0x04::marshal(&m, &mut bytes).unwrap();
            assert_eq!(bytes.len() % 8, 0);
            assert_eq!(bytes.len(), 16);
            // declared length excludes the padding
            assert_eq!(&bytes[..4], &[0x00, 0x01, 0x00, 0x0A]);

            let mut cursor = Cursor::new(bytes);
            assert_eq!(Match0x04::parse(&mut cursor).unwrap(), m);
        }

        #[test]
        fn test_empty_match_is_eight_bytes() {
            let mut bytes = vec![];
            Match0x04::marshal(&Match::match_all(), &mut bytes).unwrap();
            assert_eq!(bytes.len(), 8);
            assert_eq!(&bytes[..4], &[0x00, 0x01, 0x00, 0x04]);
        }

        #[test]
        fn test_oxm_values_are_cut_to_field_width() {
            let field = MatchField::basic(OxmField::VlanVid, vec![0xff, 0xff]);
            let mut bytes = vec![];
            MatchField0x04::marshal(&field, &mut bytes).unwrap();
            // 13-bit field: the top three bits of the first value byte go away
            assert_eq!(bytes, vec![0x80, 0x00, 0x0C, 0x02, 0x1f, 0xff]);
        }

        #[test]
        fn test_oxm_short_value_is_rejected() {
            let field = MatchField::basic(OxmField::EthType, vec![0x08]);
            let mut bytes = vec![];
            assert!(MatchField0x04::marshal(&field, &mut bytes).is_err());
        }

        #[test]
        fn test_instruction_length_fields() {
            let instructions = vec![
                Instruction::GotoTable { table_id: 2 },
                Instruction::WriteMetadata {
                    metadata: 0x1122334455667788,
                    mask: 0xffffffffffffffff,
                },
                Instruction::ApplyActions {
                    actions: vec![0xCD; 24],
                },
                Instruction::ClearActions,
                Instruction::Meter { meter_id: 7 },
            ];
            for instruction in &instructions {
                let mut bytes = vec![];
                Instruction0x04::marshal(instruction, &mut bytes).unwrap();
                let declared = u16::from(bytes[2]) << 8 | u16::from(bytes[3]);
                assert_eq!(declared as usize, bytes.len());
            }
            let mut bytes = vec![];
            for instruction in &instructions {
                Instruction0x04::marshal(instruction, &mut bytes).unwrap();
            }
            let mut cursor = Cursor::new(bytes);
            assert_eq!(
                Instruction0x04::parse_sequence(&mut cursor).unwrap(),
                instructions
            );
        }

        #[test]
        fn test_packet_queue_length_field() {
            let queue = PacketQueue {
                queue_id: 3,
                port_no: Some(1),
                properties: vec![
                    QueueProperty::MinRate { rate: 100 },
                    QueueProperty::MaxRate { rate: 500 },
                ],
            };
            let mut bytes = vec![];
            PacketQueue0x04::marshal(&queue, &mut bytes).unwrap();
            let declared = u16::from(bytes[8]) << 8 | u16::from(bytes[9]);
            assert_eq!(declared as usize, bytes.len());
            let mut cursor = Cursor::new(bytes);
            assert_eq!(PacketQueue0x04::parse(&mut cursor).unwrap(), queue);
        }

        #[test]
        fn test_round_trip_error() {
            round_trip(MessageBody::Error(ErrorMsg {
                error_type: ErrorType::BadRequest(BadRequestCode::BadLen),
                data: vec![0xAB; 10],
            }));
            round_trip(MessageBody::Error(ErrorMsg {
                error_type: ErrorType::Experimenter {
                    exp_type: 17,
                    experimenter: 0x00002320,
                },
                data: vec![1, 2, 3],
            }));
        }

        #[test]
        fn test_round_trip_echo_reply() {
            round_trip(MessageBody::EchoReply(vec![0xAB; 5]));
        }

        #[test]
        fn test_round_trip_experimenter() {
            round_trip(MessageBody::Experimenter(Experimenter {
                experimenter: 0x00002320,
                exp_type: 9,
                data: vec![5, 6, 7, 8],
            }));
        }

        #[test]
        fn test_round_trip_switch_config() {
            round_trip(MessageBody::GetConfigReply(SwitchConfig {
                flags: vec![ConfigFlag::FragDrop],
                miss_send_len: 128,
            }));
            round_trip(MessageBody::SetConfig(SwitchConfig {
                flags: vec![],
                miss_send_len: 0xffff,
            }));
        }

        #[test]
        fn test_round_trip_packet_in() {
            round_trip(MessageBody::PacketIn(PacketIn {
                buffer_id: Some(42),
                in_port: None,
                in_phy_port: None,
                total_len: 10,
                reason: PacketInReason::NoMatch,
                table_id: 3,
                cookie: Some(0xfeedbeef),
                pattern: Some(Match {
                    fields: vec![MatchField::basic(OxmField::InPort, vec![0, 0, 0, 7])],
                }),
                data: vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10],
            }));
        }

        #[test]
        fn test_round_trip_flow_removed() {
            round_trip(MessageBody::FlowRemoved(FlowRemoved {
                cookie: 0x1234567887654321,
                priority: 22,
                reason: FlowRemovedReason::IdleTimeout,
                table_id: 0,
                duration_sec: 123,
                duration_nsec: 123456,
                idle_timeout: 60,
                hard_timeout: 600,
                packet_count: 100,
                byte_count: 120500,
                pattern: sample_match(),
            }));
        }

        #[test]
        fn test_round_trip_port_status() {
            let msg = round_trip(MessageBody::PortStatus(PortStatus {
                reason: PortReason::PortAdd,
                desc: port_desc(),
            }));
            // the state bitmap carries exactly the live bit
            let data = Message0x04::marshal(&msg).unwrap();
            let state_offset = 8 + 8 + 32 + 4;
            assert_eq!(
                &data[state_offset..state_offset + 4],
                &[0x00, 0x00, 0x00, 0x04]
            );
        }

        #[test]
        fn test_round_trip_packet_out() {
            round_trip(MessageBody::PacketOut(PacketOut {
                buffer_id: None,
                in_port: PseudoPort::Controller,
                actions: vec![0xAA; 8],
                data: vec![1, 2, 3, 4],
            }));
        }

        #[test]
        fn test_round_trip_flow_mod() {
            round_trip(MessageBody::FlowMod(flow_mod()));
        }

        #[test]
        fn test_round_trip_group_mod() {
            round_trip(MessageBody::GroupMod(GroupMod {
                command: GroupModCommand::Add,
                group_type: GroupType::Select,
                group_id: 99,
                buckets: vec![
                    Bucket {
                        weight: 10,
                        watch_port: 0xffffffff,
                        watch_group: 0xffffffff,
                        actions: vec![0xBB; 16],
                    },
                    Bucket {
                        weight: 20,
                        watch_port: 1,
                        watch_group: 2,
                        actions: vec![],
                    },
                ],
            }));
        }

        #[test]
        fn test_round_trip_port_mod() {
            round_trip(MessageBody::PortMod(PortMod {
                port_no: PseudoPort::PhysicalPort(7),
                hw_addr: [0xAA, 0xBB, 0xCC, 0xDD, 0xEE, 0xFF],
                config: vec![PortConfig::NoFwd],
                mask: vec![PortConfig::NoFwd, PortConfig::NoPacketIn],
                advertise: vec![PortFeature::Rate10GbFd, PortFeature::Fiber],
            }));
        }

        #[test]
        fn test_round_trip_table_mod() {
            round_trip(MessageBody::TableMod(TableMod {
                table_id: ALL_TABLES,
                config: vec![],
            }));
        }

        #[test]
        fn test_round_trip_stats_requests() {
            round_trip(MessageBody::StatsRequest(StatsRequest {
                flags: 0,
                body: StatsRequestBody::Desc,
            }));
            round_trip(MessageBody::StatsRequest(StatsRequest {
                flags: 0,
                body: StatsRequestBody::Flow(FlowStatsRequest {
                    table_id: ALL_TABLES,
                    out_port: PseudoPort::Any,
                    out_group: 0xffffffff,
                    cookie: 0,
                    cookie_mask: 0,
                    pattern: Match::match_all(),
                }),
            }));
            round_trip(MessageBody::StatsRequest(StatsRequest {
                flags: 0,
                body: StatsRequestBody::Aggregate(FlowStatsRequest {
                    table_id: 1,
                    out_port: PseudoPort::Any,
                    out_group: 0xffffffff,
                    cookie: 7,
                    cookie_mask: 0xff,
                    pattern: sample_match(),
                }),
            }));
            round_trip(MessageBody::StatsRequest(StatsRequest {
                flags: 0,
                body: StatsRequestBody::Table,
            }));
            round_trip(MessageBody::StatsRequest(StatsRequest {
                flags: 0,
                body: StatsRequestBody::Port {
                    port_no: PseudoPort::AllPorts,
                },
            }));
            round_trip(MessageBody::StatsRequest(StatsRequest {
                flags: 0,
                body: StatsRequestBody::Queue {
                    port_no: PseudoPort::PhysicalPort(1),
                    queue_id: 0xffffffff,
                },
            }));
        }

        #[test]
        fn test_round_trip_stats_replies() {
            round_trip(MessageBody::StatsReply(StatsReply {
                flags: 0,
                body: StatsReplyBody::Desc(DescStats {
                    mfr_desc: "a vendor".to_string(),
                    hw_desc: "a switch".to_string(),
                    sw_desc: "an os".to_string(),
                    serial_num: "12345".to_string(),
                    dp_desc: "a datapath".to_string(),
                }),
            }));
            round_trip(MessageBody::StatsReply(StatsReply {
                flags: 0,
                body: StatsReplyBody::Flow(vec![FlowStatsEntry {
                    table_id: 0,
                    duration_sec: 10,
                    duration_nsec: 20,
                    priority: 16,
                    idle_timeout: 30,
                    hard_timeout: 40,
                    flags: vec![FlowModFlag::SendFlowRem],
                    cookie: 0x1122,
                    packet_count: 1000,
                    byte_count: 64000,
                    pattern: sample_match(),
                    instructions: vec![Instruction::GotoTable { table_id: 1 }],
                }]),
            }));
            round_trip(MessageBody::StatsReply(StatsReply {
                flags: 0,
                body: StatsReplyBody::Aggregate {
                    packet_count: 10,
                    byte_count: 20,
                    flow_count: 30,
                },
            }));
            round_trip(MessageBody::StatsReply(StatsReply {
                flags: 0,
                body: StatsReplyBody::Table(vec![TableStatsEntry {
                    table_id: 0,
                    active_count: 4,
                    lookup_count: 1000,
                    matched_count: 900,
                }]),
            }));
            round_trip(MessageBody::StatsReply(StatsReply {
                flags: 0,
                body: StatsReplyBody::Port(vec![PortStatsEntry {
                    port_no: PseudoPort::PhysicalPort(1),
                    packets: TransmissionCounter { rx: 1000, tx: 2000 },
                    bytes: TransmissionCounter {
                        rx: 536870912,
                        tx: 1073741824,
                    },
                    dropped: TransmissionCounter { rx: 5, tx: 0 },
                    errors: TransmissionCounter { rx: 0, tx: 0 },
                    rx_frame_errors: 0,
                    rx_over_errors: 0,
                    rx_crc_errors: 0,
                    collisions: 0,
                    duration_sec: 100,
                    duration_nsec: 200,
                }]),
            }));
            round_trip(MessageBody::StatsReply(StatsReply {
                flags: 0,
                body: StatsReplyBody::Queue(vec![QueueStatsEntry {
                    port_no: PseudoPort::PhysicalPort(1),
                    queue_id: 1,
                    tx_bytes: 1024,
                    tx_packets: 8,
                    tx_errors: 0,
                    duration_sec: 3,
                    duration_nsec: 4,
                }]),
            }));
        }

        #[test]
        fn test_round_trip_queue_get_config() {
            round_trip(MessageBody::QueueGetConfigRequest {
                port: PseudoPort::AllPorts,
            });
            round_trip(MessageBody::QueueGetConfigReply(QueueGetConfigReply {
                port: PseudoPort::PhysicalPort(1),
                queues: vec![PacketQueue {
                    queue_id: 1,
                    port_no: Some(1),
                    properties: vec![QueueProperty::Experimenter {
                        experimenter: 0x00002320,
                        data: vec![9, 9, 9],
                    }],
                }],
            }));
        }

        #[test]
        fn test_round_trip_roles() {
            round_trip(MessageBody::RoleRequest(Role {
                role: ControllerRole::Master,
                generation_id: 77,
            }));
            round_trip(MessageBody::RoleReply(Role {
                role: ControllerRole::Slave,
                generation_id: 78,
            }));
        }

        #[test]
        fn test_round_trip_async_config() {
            let config = AsyncConfig {
                packet_in_mask: [
                    vec![PacketInReason::NoMatch, PacketInReason::Action],
                    vec![PacketInReason::InvalidTtl],
                ],
                port_status_mask: [
                    vec![
                        PortReason::PortAdd,
                        PortReason::PortDelete,
                        PortReason::PortModify,
                    ],
                    vec![],
                ],
                flow_removed_mask: [
                    vec![FlowRemovedReason::IdleTimeout, FlowRemovedReason::Delete],
                    vec![FlowRemovedReason::GroupDelete],
                ],
            };
            round_trip(MessageBody::GetAsyncReply(config.clone()));
            round_trip(MessageBody::SetAsync(config));
            round_trip(MessageBody::GetAsyncRequest);
        }

        #[test]
        fn test_round_trip_meter_mod() {
            round_trip(MessageBody::MeterMod(MeterMod {
                command: MeterModCommand::Add,
                flags: vec![MeterFlag::Kbps, MeterFlag::Burst],
                meter_id: 5,
                bands: vec![
                    MeterBand::Drop {
                        rate: 1000,
                        burst_size: 128,
                    },
                    MeterBand::DscpRemark {
                        rate: 2000,
                        burst_size: 256,
                        prec_level: 1,
                    },
                    MeterBand::Experimenter {
                        rate: 3000,
                        burst_size: 512,
                        experimenter: 0x00002320,
                    },
                ],
            }));
        }

        #[test]
        fn test_barrier_messages_have_empty_bodies() {
            let msg = Message::new(OPENFLOW_0_04_VERSION, 9, MessageBody::BarrierRequest);
            assert_eq!(Message0x04::marshal(&msg).unwrap().len(), 8);
            round_trip(MessageBody::BarrierRequest);
            round_trip(MessageBody::BarrierReply);
        }

        #[test]
        fn test_unknown_type_code_is_an_error() {
            let header = OfpHeader::new(OPENFLOW_0_04_VERSION, false, 99, 8, 0);
            assert!(Message0x04::parse(&header, &[]).is_err());
        }

        #[test]
        fn test_unknown_capability_bit_is_an_error() {
            let mut data = vec![];
            let features = SwitchFeatures {
                datapath_mac: [0; 6],
                datapath_id: 0,
                n_buffers: 0,
                n_tables: 0,
                auxiliary_id: 0,
                capabilities: vec![],
                ports: vec![],
            };
            SwitchFeatures0x04::marshal(&features, &mut data).unwrap();
            // set an undefined capability bit
            data[19] |= 0x10;
            assert!(SwitchFeatures0x04::parse(&data).is_err());
        }
    }
}
