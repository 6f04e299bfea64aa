//! Codec for OpenFlow 1.1 (wire version 2): the fixed 88-byte standard
//! match with its wildcards bitmap, instructions, and the pre-multipart
//! stats framing. The v1.1 header carries an experimental flag in the top
//! bit of the version byte.

use std::io::{BufRead, Cursor, Read, Write};

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use bytes::Buf;
use num_traits::FromPrimitive;

use crate::bits::*;
use crate::message::*;
use crate::ofp_header::OPENFLOW_0_02_VERSION;
use crate::ofp_message::OfpSerializationError;
use crate::ofp_utils::{
    check_remaining, read_fixed_size_string, write_fixed_size_string, write_padding_bytes,
};

pub const ALL_TABLES: u8 = 0xff;

const OFP_NO_BUFFER: u32 = 0xffffffff;
const OFP_MAX_PORT_NAME_LENGTH: usize = 16;
const DESC_STR_LENGTH: usize = 256;
const SERIAL_NUM_LENGTH: usize = 32;

const OFPMT_STANDARD: u16 = 0;
const OFP_MATCH_STANDARD_LENGTH: usize = 88;

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

fn unimplemented<T>(feature: String) -> Result<T, OfpSerializationError> {
    Err(OfpSerializationError::UnimplementedFeatureInVersion {
        version: OPENFLOW_0_02_VERSION,
        feature,
    })
}

// Flag families of this version.

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
        Capability::ArpMatchIp => Some(7),
        Capability::PortBlocked => None,
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
        7 => Some(Capability::ArpMatchIp),
        _ => None,
    }
}

fn config_flag_bit(f: ConfigFlag) -> Option<u32> {
    match f {
        ConfigFlag::FragDrop => Some(0),
        ConfigFlag::FragReasm => Some(1),
        ConfigFlag::InvalidTtlToController => Some(2),
    }
}

fn config_flag_of_bit(b: u32) -> Option<ConfigFlag> {
    match b {
        0 => Some(ConfigFlag::FragDrop),
        1 => Some(ConfigFlag::FragReasm),
        2 => Some(ConfigFlag::InvalidTtlToController),
        _ => None,
    }
}

fn flow_mod_flag_bit(f: FlowModFlag) -> Option<u32> {
    match f {
        FlowModFlag::SendFlowRem => Some(0),
        FlowModFlag::CheckOverlap => Some(1),
        FlowModFlag::ResetCounts
        | FlowModFlag::NoPacketCounts
        | FlowModFlag::NoByteCounts => None,
    }
}

fn flow_mod_flag_of_bit(b: u32) -> Option<FlowModFlag> {
    match b {
        0 => Some(FlowModFlag::SendFlowRem),
        1 => Some(FlowModFlag::CheckOverlap),
        _ => None,
    }
}

fn table_config_bit(f: TableConfig) -> Option<u32> {
    match f {
        TableConfig::MissContinue => Some(0),
        TableConfig::MissDrop => Some(1),
    }
}

fn table_config_of_bit(b: u32) -> Option<TableConfig> {
    match b {
        0 => Some(TableConfig::MissContinue),
        1 => Some(TableConfig::MissDrop),
        _ => None,
    }
}

/// The v1.1 flow-wildcard family: one bit per non-maskable match slot.
#[derive(Copy, Clone, Debug, PartialEq)]
enum FlowWildcard {
    InPort,
    VlanVid,
    VlanPcp,
    EthType,
    IpDscp,
    IpProto,
    TpSrc,
    TpDst,
    MplsLabel,
    MplsTc,
}

fn flow_wildcard_bit(w: FlowWildcard) -> Option<u32> {
    match w {
        FlowWildcard::InPort => Some(0),
        FlowWildcard::VlanVid => Some(1),
        FlowWildcard::VlanPcp => Some(2),
        FlowWildcard::EthType => Some(3),
        FlowWildcard::IpDscp => Some(4),
        FlowWildcard::IpProto => Some(5),
        FlowWildcard::TpSrc => Some(6),
        FlowWildcard::TpDst => Some(7),
        FlowWildcard::MplsLabel => Some(8),
        FlowWildcard::MplsTc => Some(9),
    }
}

create_empty_wrapper!(PseudoPort, PseudoPort0x02);

impl PseudoPort0x02 {
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

create_empty_wrapper!(PortDesc, PortDesc0x02);

impl PortDesc0x02 {
    fn marshal(pd: &PortDesc, bytes: &mut Vec<u8>) -> Result<(), OfpSerializationError> {
        PseudoPort0x02::marshal(pd.port_no, bytes)?;
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
        let port_no = PseudoPort0x02::make(bytes.read_u32::<BigEndian>()?)?;
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

create_empty_wrapper!(Match, Match0x02);

impl Match0x02 {
    /// Look up a slot by name, checking its class and byte width.
    fn slot<'a>(
        m: &'a Match,
        field: OxmField,
        width: usize,
    ) -> Result<Option<&'a MatchField>, OfpSerializationError> {
        match m.fields.iter().find(|f| f.field == field) {
            None => Ok(None),
            Some(f) => {
                if f.class != OxmClass::OpenflowBasic {
                    return unimplemented(format!("match class {:?}", f.class));
                }
                if f.value.len() != width {
                    return Err(OfpSerializationError::InvariantViolation {
                        field: format!("{:?}", field),
                        details: format!("needs {} value bytes, {} given", width, f.value.len()),
                    });
                }
                if let Some(mask) = &f.mask {
                    if mask.len() != width {
                        return Err(OfpSerializationError::InvariantViolation {
                            field: format!("{:?}", field),
                            details: format!("needs {} mask bytes, {} given", width, mask.len()),
                        });
                    }
                }
                Ok(Some(f))
            }
        }
    }

    fn write_slot(
        bytes: &mut Vec<u8>,
        field: Option<&MatchField>,
        width: usize,
    ) -> Result<(), OfpSerializationError> {
        match field {
            Some(f) => bytes.write_all(&f.value)?,
            None => write_padding_bytes(bytes, width)?,
        }
        Ok(())
    }

    /// Mask-supporting slots are wildcarded by an all-ones mask instead of
    /// a wildcard bit; an absent mask means an exact match.
    fn write_masked_slot(
        bytes: &mut Vec<u8>,
        field: Option<&MatchField>,
        width: usize,
    ) -> Result<(), OfpSerializationError> {
        match field {
            Some(f) => {
                bytes.write_all(&f.value)?;
                match &f.mask {
                    Some(mask) => bytes.write_all(mask)?,
                    None => write_padding_bytes(bytes, width)?,
                }
            }
            None => {
                write_padding_bytes(bytes, width)?;
                for _ in 0..width {
                    bytes.write_u8(0xff)?;
                }
            }
        }
        Ok(())
    }

    fn read_value(bytes: &mut Cursor<Vec<u8>>, width: usize) -> Result<Vec<u8>, OfpSerializationError> {
        let mut value = vec![0u8; width];
        bytes.read_exact(&mut value)?;
        Ok(value)
    }

    /// Read a value-and-mask slot pair, emitting the field unconditionally.
    /// A zero mask reads back as an exact match.
    fn read_masked_slot(
        bytes: &mut Cursor<Vec<u8>>,
        field: OxmField,
        width: usize,
        fields: &mut Vec<MatchField>,
    ) -> Result<(), OfpSerializationError> {
        let value = Self::read_value(bytes, width)?;
        let mask = Self::read_value(bytes, width)?;
        let mask = if mask.iter().all(|b| *b == 0) {
            None
        } else {
            Some(mask)
        };
        fields.push(MatchField {
            class: OxmClass::OpenflowBasic,
            field,
            value,
            mask,
        });
        Ok(())
    }

    fn marshal(m: &Match, bytes: &mut Vec<u8>) -> Result<(), OfpSerializationError> {
        let in_port = Self::slot(m, OxmField::InPort, 4)?;
        let eth_src = Self::slot(m, OxmField::EthSrc, 6)?;
        let eth_dst = Self::slot(m, OxmField::EthDst, 6)?;
        let vlan_vid = Self::slot(m, OxmField::VlanVid, 2)?;
        let vlan_pcp = Self::slot(m, OxmField::VlanPcp, 1)?;
        let eth_type = Self::slot(m, OxmField::EthType, 2)?;
        let ip_dscp = Self::slot(m, OxmField::IpDscp, 1)?;
        let ip_proto = Self::slot(m, OxmField::IpProto, 1)?;
        let ipv4_src = Self::slot(m, OxmField::Ipv4Src, 4)?;
        let ipv4_dst = Self::slot(m, OxmField::Ipv4Dst, 4)?;
        let mpls_label = Self::slot(m, OxmField::MplsLabel, 4)?;
        let mpls_tc = Self::slot(m, OxmField::MplsTc, 1)?;
        let metadata = Self::slot(m, OxmField::Metadata, 8)?;

        // The transport-port slots belong to tcp or udp depending on the
        // ip_proto value being encoded alongside them.
        let (tp_src, tp_dst) = match ip_proto.map(|f| f.value[0]) {
            Some(6) => (
                Self::slot(m, OxmField::TcpSrc, 2)?,
                Self::slot(m, OxmField::TcpDst, 2)?,
            ),
            Some(17) => (
                Self::slot(m, OxmField::UdpSrc, 2)?,
                Self::slot(m, OxmField::UdpDst, 2)?,
            ),
            _ => (None, None),
        };

        let mut wildcarded = vec![];
        if in_port.is_none() {
            wildcarded.push(FlowWildcard::InPort);
        }
        if vlan_vid.is_none() {
            wildcarded.push(FlowWildcard::VlanVid);
        }
        if vlan_pcp.is_none() {
            wildcarded.push(FlowWildcard::VlanPcp);
        }
        if eth_type.is_none() {
            wildcarded.push(FlowWildcard::EthType);
        }
        if ip_dscp.is_none() {
            wildcarded.push(FlowWildcard::IpDscp);
        }
        if ip_proto.is_none() {
            wildcarded.push(FlowWildcard::IpProto);
        }
        if tp_src.is_none() {
            wildcarded.push(FlowWildcard::TpSrc);
        }
        if tp_dst.is_none() {
            wildcarded.push(FlowWildcard::TpDst);
        }
        if mpls_label.is_none() {
            wildcarded.push(FlowWildcard::MplsLabel);
        }
        if mpls_tc.is_none() {
            wildcarded.push(FlowWildcard::MplsTc);
        }

        bytes.write_u16::<BigEndian>(OFPMT_STANDARD)?;
        bytes.write_u16::<BigEndian>(OFP_MATCH_STANDARD_LENGTH as u16)?;
        Self::write_slot(bytes, in_port, 4)?;
        bytes.write_u32::<BigEndian>(flags_to_u32(
            &wildcarded,
            flow_wildcard_bit,
            "flow wildcards",
        )?)?;
        Self::write_masked_slot(bytes, eth_src, 6)?;
        Self::write_masked_slot(bytes, eth_dst, 6)?;
        Self::write_slot(bytes, vlan_vid, 2)?;
        Self::write_slot(bytes, vlan_pcp, 1)?;
        write_padding_bytes(bytes, 1)?;
        Self::write_slot(bytes, eth_type, 2)?;
        Self::write_slot(bytes, ip_dscp, 1)?;
        Self::write_slot(bytes, ip_proto, 1)?;
        Self::write_masked_slot(bytes, ipv4_src, 4)?;
        Self::write_masked_slot(bytes, ipv4_dst, 4)?;
        Self::write_slot(bytes, tp_src, 2)?;
        Self::write_slot(bytes, tp_dst, 2)?;
        Self::write_slot(bytes, mpls_label, 4)?;
        Self::write_slot(bytes, mpls_tc, 1)?;
        write_padding_bytes(bytes, 3)?;
        Self::write_masked_slot(bytes, metadata, 8)?;
        Ok(())
    }

    fn parse(bytes: &mut Cursor<Vec<u8>>) -> Result<Match, OfpSerializationError> {
        check_remaining(bytes, OFP_MATCH_STANDARD_LENGTH, "match")?;
        let typ = bytes.read_u16::<BigEndian>()?;
        if typ != OFPMT_STANDARD {
            return unexpected(format!("{}", typ), "match type", "match");
        }
        let length = bytes.read_u16::<BigEndian>()? as usize;
        if length != OFP_MATCH_STANDARD_LENGTH {
            return Err(OfpSerializationError::LengthMismatch {
                declared: length,
                found: OFP_MATCH_STANDARD_LENGTH,
                structure: "match".to_string(),
            });
        }
        let in_port = Self::read_value(bytes, 4)?;
        let w = u64::from(bytes.read_u32::<BigEndian>()?);

        let mut fields = vec![];
        if !test_bit(0, w) {
            fields.push(MatchField::basic(OxmField::InPort, in_port));
        }
        Self::read_masked_slot(bytes, OxmField::EthSrc, 6, &mut fields)?;
        Self::read_masked_slot(bytes, OxmField::EthDst, 6, &mut fields)?;
        let vlan_vid = Self::read_value(bytes, 2)?;
        if !test_bit(1, w) {
            fields.push(MatchField::basic(OxmField::VlanVid, vlan_vid));
        }
        let vlan_pcp = Self::read_value(bytes, 1)?;
        if !test_bit(2, w) {
            fields.push(MatchField::basic(OxmField::VlanPcp, vlan_pcp));
        }
        bytes.consume(1);
        let eth_type = Self::read_value(bytes, 2)?;
        if !test_bit(3, w) {
            fields.push(MatchField::basic(OxmField::EthType, eth_type));
        }
        let ip_dscp = Self::read_value(bytes, 1)?;
        if !test_bit(4, w) {
            fields.push(MatchField::basic(OxmField::IpDscp, ip_dscp));
        }
        let ip_proto = Self::read_value(bytes, 1)?;
        let proto = ip_proto[0];
        if !test_bit(5, w) {
            fields.push(MatchField::basic(OxmField::IpProto, ip_proto));
        }
        Self::read_masked_slot(bytes, OxmField::Ipv4Src, 4, &mut fields)?;
        Self::read_masked_slot(bytes, OxmField::Ipv4Dst, 4, &mut fields)?;
        // The transport-port slots are only meaningful under tcp or udp;
        // under any other protocol they are skipped even when not
        // wildcarded.
        let tp_src = Self::read_value(bytes, 2)?;
        if !test_bit(6, w) {
            match proto {
                6 => fields.push(MatchField::basic(OxmField::TcpSrc, tp_src)),
                17 => fields.push(MatchField::basic(OxmField::UdpSrc, tp_src)),
                _ => {}
            }
        }
        let tp_dst = Self::read_value(bytes, 2)?;
        if !test_bit(7, w) {
            match proto {
                6 => fields.push(MatchField::basic(OxmField::TcpDst, tp_dst)),
                17 => fields.push(MatchField::basic(OxmField::UdpDst, tp_dst)),
                _ => {}
            }
        }
        let mpls_label = Self::read_value(bytes, 4)?;
        if !test_bit(8, w) {
            fields.push(MatchField::basic(OxmField::MplsLabel, mpls_label));
        }
        let mpls_tc = Self::read_value(bytes, 1)?;
        if !test_bit(9, w) {
            fields.push(MatchField::basic(OxmField::MplsTc, mpls_tc));
        }
        bytes.consume(3);
        Self::read_masked_slot(bytes, OxmField::Metadata, 8, &mut fields)?;
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
    OFPITExperimenter = 0xffff,
}

create_empty_wrapper!(Instruction, Instruction0x02);

impl Instruction0x02 {
    fn type_code(i: &Instruction) -> Result<u16, OfpSerializationError> {
        match i {
            Instruction::GotoTable { .. } => Ok(OfpInstructionType::OFPITGotoTable as u16),
            Instruction::WriteMetadata { .. } => {
                Ok(OfpInstructionType::OFPITWriteMetadata as u16)
            }
            Instruction::WriteActions { .. } => Ok(OfpInstructionType::OFPITWriteActions as u16),
            Instruction::ApplyActions { .. } => Ok(OfpInstructionType::OFPITApplyActions as u16),
            Instruction::ClearActions => Ok(OfpInstructionType::OFPITClearActions as u16),
            Instruction::Experimenter { .. } => Ok(OfpInstructionType::OFPITExperimenter as u16),
            Instruction::Meter { .. } => unimplemented("meter instruction".to_string()),
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
        bytes.write_u16::<BigEndian>(Instruction0x02::type_code(i)?)?;
        bytes.write_u16::<BigEndian>(Instruction0x02::size_of(i) as u16)?;
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
            Instruction::Experimenter { experimenter, data } => {
                bytes.write_u32::<BigEndian>(*experimenter)?;
                bytes.write_all(data)?;
            }
            Instruction::Meter { .. } => {
                return unimplemented("meter instruction".to_string());
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

    fn parse_sequence(
        bytes: &mut Cursor<Vec<u8>>,
    ) -> Result<Vec<Instruction>, OfpSerializationError> {
        let mut instructions = vec![];
        while bytes.remaining() > 0 {
            instructions.push(Instruction0x02::parse(bytes)?);
        }
        Ok(instructions)
    }
}

#[repr(u16)]
enum OfpQueueProperty {
    OFPQTMinRate = 1,
}

create_empty_wrapper!(QueueProperty, QueueProperty0x02);

impl QueueProperty0x02 {
    fn size_of(prop: &QueueProperty) -> Result<usize, OfpSerializationError> {
        match prop {
            QueueProperty::MinRate { .. } => Ok(16),
            QueueProperty::MaxRate { .. } => unimplemented("max-rate queue property".to_string()),
            QueueProperty::Experimenter { .. } => {
                unimplemented("experimenter queue property".to_string())
            }
        }
    }

    fn marshal(prop: &QueueProperty, bytes: &mut Vec<u8>) -> Result<(), OfpSerializationError> {
        match prop {
            QueueProperty::MinRate { rate } => {
                bytes.write_u16::<BigEndian>(OfpQueueProperty::OFPQTMinRate as u16)?;
                bytes.write_u16::<BigEndian>(16)?;
                write_padding_bytes(bytes, 4)?;
                bytes.write_u16::<BigEndian>(*rate)?;
                write_padding_bytes(bytes, 6)?;
                Ok(())
            }
            QueueProperty::MaxRate { .. } => unimplemented("max-rate queue property".to_string()),
            QueueProperty::Experimenter { .. } => {
                unimplemented("experimenter queue property".to_string())
            }
        }
    }

    fn parse(bytes: &mut Cursor<Vec<u8>>) -> Result<QueueProperty, OfpSerializationError> {
        check_remaining(bytes, 8, "queue property")?;
        let type_code = bytes.read_u16::<BigEndian>()?;
        let length = bytes.read_u16::<BigEndian>()? as usize;
        bytes.consume(4);
        if length != 16 {
            return Err(OfpSerializationError::LengthMismatch {
                declared: length,
                found: 16,
                structure: "queue property".to_string(),
            });
        }
        check_remaining(bytes, length - 8, "queue property")?;
        match type_code {
            t if t == (OfpQueueProperty::OFPQTMinRate as u16) => {
                let rate = bytes.read_u16::<BigEndian>()?;
                bytes.consume(6);
                Ok(QueueProperty::MinRate { rate })
            }
            code => unexpected(format!("{}", code), "queue property", "packet queue"),
        }
    }
}

const OFP_PACKET_QUEUE_LENGTH: usize = 8;

create_empty_wrapper!(PacketQueue, PacketQueue0x02);

impl PacketQueue0x02 {
    fn size_of(q: &PacketQueue) -> Result<usize, OfpSerializationError> {
        let mut size = OFP_PACKET_QUEUE_LENGTH;
        for prop in &q.properties {
            size += QueueProperty0x02::size_of(prop)?;
        }
        Ok(size)
    }

    fn marshal(q: &PacketQueue, bytes: &mut Vec<u8>) -> Result<(), OfpSerializationError> {
        bytes.write_u32::<BigEndian>(q.queue_id)?;
        bytes.write_u16::<BigEndian>(PacketQueue0x02::size_of(q)? as u16)?;
        write_padding_bytes(bytes, 2)?;
        for prop in &q.properties {
            QueueProperty0x02::marshal(prop, bytes)?;
        }
        Ok(())
    }

    fn parse(bytes: &mut Cursor<Vec<u8>>) -> Result<PacketQueue, OfpSerializationError> {
        check_remaining(bytes, OFP_PACKET_QUEUE_LENGTH, "packet queue")?;
        let queue_id = bytes.read_u32::<BigEndian>()?;
        let length = bytes.read_u16::<BigEndian>()? as usize;
        bytes.consume(2);
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
            properties.push(QueueProperty0x02::parse(&mut props)?);
        }
        Ok(PacketQueue {
            queue_id,
            port_no: None,
            properties,
        })
    }
}

create_empty_wrapper!(ErrorMsg, Error0x02);

impl Error0x02 {
    /// Highest code this version defines for each error type.
    fn code_limit(type_code: u16) -> u16 {
        match type_code {
            0 => 1,  // hello failed
            1 => 9,  // bad request
            2 => 12, // bad action
            3 => 5,  // bad instruction
            4 => 7,  // bad match
            5 => 6,  // flow mod failed
            6 => 8,  // group mod failed
            7 => 3,  // port mod failed
            8 => 1,  // table mod failed
            9 => 2,  // queue op failed
            10 => 1, // switch config failed
            _ => 0,
        }
    }

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
            ErrorType::RoleRequestFailed(_)
            | ErrorType::MeterModFailed(_)
            | ErrorType::TableFeaturesFailed(_)
            | ErrorType::Experimenter { .. } => {
                return unimplemented(format!("error type {:?}", t));
            }
        };
        if codes.1 > Error0x02::code_limit(codes.0) {
            return unimplemented(format!("error code {} of type {}", codes.1, codes.0));
        }
        Ok(codes)
    }

    fn error_type_of_codes(
        type_code: u16,
        code: u16,
    ) -> Result<ErrorType, OfpSerializationError> {
        if type_code > 10 || code > Error0x02::code_limit(type_code) {
            return unexpected(
                format!("{:x}/{:x}", type_code, code),
                "error type",
                "error",
            );
        }
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
            _ => None,
        };
        match error_type {
            Some(t) => Ok(t),
            None => unexpected(format!("{:x}", code), "error code", "error"),
        }
    }

    fn marshal(err: &ErrorMsg, bytes: &mut Vec<u8>) -> Result<(), OfpSerializationError> {
        let (type_code, code) = Error0x02::error_type_codes(&err.error_type)?;
        bytes.write_u16::<BigEndian>(type_code)?;
        bytes.write_u16::<BigEndian>(code)?;
        bytes.write_all(&err.data)?;
        Ok(())
    }

    fn parse(buf: &[u8]) -> Result<ErrorMsg, OfpSerializationError> {
        let mut bytes = Cursor::new(buf.to_vec());
        check_remaining(&bytes, 4, "error")?;
        let type_code = bytes.read_u16::<BigEndian>()?;
        let code = bytes.read_u16::<BigEndian>()?;
        Ok(ErrorMsg {
            error_type: Error0x02::error_type_of_codes(type_code, code)?,
            data: bytes.fill_buf()?.to_vec(),
        })
    }
}

create_empty_wrapper!(SwitchFeatures, SwitchFeatures0x02);

impl SwitchFeatures0x02 {
    fn marshal(sf: &SwitchFeatures, bytes: &mut Vec<u8>) -> Result<(), OfpSerializationError> {
        bytes.write_all(&sf.datapath_mac)?;
        bytes.write_u16::<BigEndian>(sf.datapath_id)?;
        bytes.write_u32::<BigEndian>(sf.n_buffers)?;
        bytes.write_u8(sf.n_tables)?;
        write_padding_bytes(bytes, 3)?;
        bytes.write_u32::<BigEndian>(flags_to_u32(
            &sf.capabilities,
            capability_bit,
            "capabilities",
        )?)?;
        bytes.write_u32::<BigEndian>(0)?; // reserved
        for port in &sf.ports {
            PortDesc0x02::marshal(port, bytes)?;
        }
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
        bytes.consume(3);
        let capabilities = u32_to_flags(
            bytes.read_u32::<BigEndian>()?,
            capability_of_bit,
            "capabilities",
        )?;
        bytes.consume(4); // reserved
        let mut ports = vec![];
        while bytes.remaining() > 0 {
            ports.push(PortDesc0x02::parse(&mut bytes)?);
        }
        Ok(SwitchFeatures {
            datapath_mac,
            datapath_id,
            n_buffers,
            n_tables,
            auxiliary_id: 0,
            capabilities,
            ports,
        })
    }
}

create_empty_wrapper!(SwitchConfig, SwitchConfig0x02);

impl SwitchConfig0x02 {
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

create_empty_wrapper!(PacketIn, PacketIn0x02);

impl PacketIn0x02 {
    fn marshal(pi: &PacketIn, bytes: &mut Vec<u8>) -> Result<(), OfpSerializationError> {
        if pi.reason == PacketInReason::InvalidTtl {
            return unimplemented("invalid-ttl packet-in reason".to_string());
        }
        bytes.write_u32::<BigEndian>(pi.buffer_id.unwrap_or(OFP_NO_BUFFER))?;
        bytes.write_u32::<BigEndian>(pi.in_port.unwrap_or(0))?;
        bytes.write_u32::<BigEndian>(pi.in_phy_port.unwrap_or(0))?;
        bytes.write_u16::<BigEndian>(pi.total_len)?;
        bytes.write_u8(pi.reason as u8)?;
        bytes.write_u8(pi.table_id)?;
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
        let in_port = bytes.read_u32::<BigEndian>()?;
        let in_phy_port = bytes.read_u32::<BigEndian>()?;
        let total_len = bytes.read_u16::<BigEndian>()?;
        let reason_code = bytes.read_u8()?;
        let reason = match reason_code {
            0 => PacketInReason::NoMatch,
            1 => PacketInReason::Action,
            c => return unexpected(format!("{}", c), "reason", "packet in"),
        };
        let table_id = bytes.read_u8()?;
        Ok(PacketIn {
            buffer_id,
            in_port: Some(in_port),
            in_phy_port: Some(in_phy_port),
            total_len,
            reason,
            table_id,
            cookie: None,
            pattern: None,
            data: bytes.fill_buf()?.to_vec(),
        })
    }
}

create_empty_wrapper!(FlowRemoved, FlowRemoved0x02);

impl FlowRemoved0x02 {
    fn marshal(fr: &FlowRemoved, bytes: &mut Vec<u8>) -> Result<(), OfpSerializationError> {
        bytes.write_u64::<BigEndian>(fr.cookie)?;
        bytes.write_u16::<BigEndian>(fr.priority)?;
        bytes.write_u8(fr.reason as u8)?;
        bytes.write_u8(fr.table_id)?;
        bytes.write_u32::<BigEndian>(fr.duration_sec)?;
        bytes.write_u32::<BigEndian>(fr.duration_nsec)?;
        bytes.write_u16::<BigEndian>(fr.idle_timeout)?;
        write_padding_bytes(bytes, 2)?;
        bytes.write_u64::<BigEndian>(fr.packet_count)?;
        bytes.write_u64::<BigEndian>(fr.byte_count)?;
        Match0x02::marshal(&fr.pattern, bytes)
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
        let duration_sec = bytes.read_u32::<BigEndian>()?;
        let duration_nsec = bytes.read_u32::<BigEndian>()?;
        let idle_timeout = bytes.read_u16::<BigEndian>()?;
        bytes.consume(2);
        Ok(FlowRemoved {
            cookie,
            priority,
            reason,
            table_id,
            duration_sec,
            duration_nsec,
            idle_timeout,
            hard_timeout: 0,
            packet_count: bytes.read_u64::<BigEndian>()?,
            byte_count: bytes.read_u64::<BigEndian>()?,
            pattern: Match0x02::parse(&mut bytes)?,
        })
    }
}

create_empty_wrapper!(PortStatus, PortStatus0x02);

impl PortStatus0x02 {
    fn marshal(ps: &PortStatus, bytes: &mut Vec<u8>) -> Result<(), OfpSerializationError> {
        bytes.write_u8(ps.reason as u8)?;
        write_padding_bytes(bytes, 7)?;
        PortDesc0x02::marshal(&ps.desc, bytes)
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
            desc: PortDesc0x02::parse(&mut bytes)?,
        })
    }
}

create_empty_wrapper!(PacketOut, PacketOut0x02);

impl PacketOut0x02 {
    fn marshal(po: &PacketOut, bytes: &mut Vec<u8>) -> Result<(), OfpSerializationError> {
        bytes.write_u32::<BigEndian>(po.buffer_id.unwrap_or(OFP_NO_BUFFER))?;
        PseudoPort0x02::marshal(po.in_port, bytes)?;
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
        let in_port = PseudoPort0x02::make(bytes.read_u32::<BigEndian>()?)?;
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

create_empty_wrapper!(FlowMod, FlowMod0x02);

impl FlowMod0x02 {
    fn marshal(fm: &FlowMod, bytes: &mut Vec<u8>) -> Result<(), OfpSerializationError> {
        bytes.write_u64::<BigEndian>(fm.cookie)?;
        bytes.write_u64::<BigEndian>(fm.cookie_mask)?;
        bytes.write_u8(fm.table_id)?;
        bytes.write_u8(fm.command as u8)?;
        bytes.write_u16::<BigEndian>(fm.idle_timeout)?;
        bytes.write_u16::<BigEndian>(fm.hard_timeout)?;
        bytes.write_u16::<BigEndian>(fm.priority)?;
        bytes.write_u32::<BigEndian>(fm.buffer_id.unwrap_or(OFP_NO_BUFFER))?;
        PseudoPort0x02::marshal(fm.out_port, bytes)?;
        bytes.write_u32::<BigEndian>(fm.out_group)?;
        bytes.write_u16::<BigEndian>(flags_to_u16(
            &fm.flags,
            flow_mod_flag_bit,
            "flow mod flags",
        )?)?;
        write_padding_bytes(bytes, 2)?;
        Match0x02::marshal(&fm.pattern, bytes)?;
        for instruction in &fm.instructions {
            Instruction0x02::marshal(instruction, bytes)?;
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
        let out_port = PseudoPort0x02::make(bytes.read_u32::<BigEndian>()?)?;
        let out_group = bytes.read_u32::<BigEndian>()?;
        let flags = u16_to_flags(
            bytes.read_u16::<BigEndian>()?,
            flow_mod_flag_of_bit,
            "flow mod flags",
        )?;
        bytes.consume(2);
        let pattern = Match0x02::parse(&mut bytes)?;
        let instructions = Instruction0x02::parse_sequence(&mut bytes)?;
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

create_empty_wrapper!(Bucket, Bucket0x02);

impl Bucket0x02 {
    fn marshal(b: &Bucket, bytes: &mut Vec<u8>) -> Result<(), OfpSerializationError> {
        bytes.write_u16::<BigEndian>((OFP_BUCKET_LENGTH + b.actions.len()) as u16)?;
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

create_empty_wrapper!(GroupMod, GroupMod0x02);

impl GroupMod0x02 {
    fn marshal(gm: &GroupMod, bytes: &mut Vec<u8>) -> Result<(), OfpSerializationError> {
        bytes.write_u16::<BigEndian>(gm.command as u16)?;
        bytes.write_u8(gm.group_type as u8)?;
        write_padding_bytes(bytes, 1)?;
        bytes.write_u32::<BigEndian>(gm.group_id)?;
        for bucket in &gm.buckets {
            Bucket0x02::marshal(bucket, bytes)?;
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
            buckets.push(Bucket0x02::parse(&mut bytes)?);
        }
        Ok(GroupMod {
            command,
            group_type,
            group_id,
            buckets,
        })
    }
}

create_empty_wrapper!(PortMod, PortMod0x02);

impl PortMod0x02 {
    fn marshal(pm: &PortMod, bytes: &mut Vec<u8>) -> Result<(), OfpSerializationError> {
        PseudoPort0x02::marshal(pm.port_no, bytes)?;
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
        let port_no = PseudoPort0x02::make(bytes.read_u32::<BigEndian>()?)?;
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

create_empty_wrapper!(TableMod, TableMod0x02);

impl TableMod0x02 {
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

create_empty_wrapper!(Experimenter, Experimenter0x02);

impl Experimenter0x02 {
    fn marshal(exp: &Experimenter, bytes: &mut Vec<u8>) -> Result<(), OfpSerializationError> {
        bytes.write_u32::<BigEndian>(exp.experimenter)?;
        write_padding_bytes(bytes, 4)?;
        bytes.write_all(&exp.data)?;
        Ok(())
    }

    fn parse(buf: &[u8]) -> Result<Experimenter, OfpSerializationError> {
        let mut bytes = Cursor::new(buf.to_vec());
        check_remaining(&bytes, 8, "experimenter")?;
        let experimenter = bytes.read_u32::<BigEndian>()?;
        bytes.consume(4);
        Ok(Experimenter {
            experimenter,
            exp_type: 0,
            data: bytes.fill_buf()?.to_vec(),
        })
    }
}

create_empty_wrapper!(QueueGetConfigReply, QueueGetConfig0x02);

impl QueueGetConfig0x02 {
    fn marshal_request(
        port: PseudoPort,
        bytes: &mut Vec<u8>,
    ) -> Result<(), OfpSerializationError> {
        PseudoPort0x02::marshal(port, bytes)?;
        write_padding_bytes(bytes, 4)
    }

    fn parse_request(buf: &[u8]) -> Result<PseudoPort, OfpSerializationError> {
        let mut bytes = Cursor::new(buf.to_vec());
        check_remaining(&bytes, 8, "queue get config request")?;
        PseudoPort0x02::make(bytes.read_u32::<BigEndian>()?)
    }

    fn marshal_reply(
        reply: &QueueGetConfigReply,
        bytes: &mut Vec<u8>,
    ) -> Result<(), OfpSerializationError> {
        PseudoPort0x02::marshal(reply.port, bytes)?;
        write_padding_bytes(bytes, 4)?;
        for queue in &reply.queues {
            PacketQueue0x02::marshal(queue, bytes)?;
        }
        Ok(())
    }

    fn parse_reply(buf: &[u8]) -> Result<QueueGetConfigReply, OfpSerializationError> {
        let mut bytes = Cursor::new(buf.to_vec());
        check_remaining(&bytes, 8, "queue get config reply")?;
        let port = PseudoPort0x02::make(bytes.read_u32::<BigEndian>()?)?;
        bytes.consume(4);
        let mut queues = vec![];
        while bytes.remaining() > 0 {
            queues.push(PacketQueue0x02::parse(&mut bytes)?);
        }
        Ok(QueueGetConfigReply { port, queues })
    }
}

#[repr(u16)]
enum OfpStatsType {
    OFPSTDesc = 0,
    OFPSTFlow = 1,
    OFPSTAggregate = 2,
    OFPSTTable = 3,
    OFPSTPort = 4,
    OFPSTQueue = 5,
}

create_empty_wrapper!(StatsRequest, Stats0x02);

impl Stats0x02 {
    fn request_type_code(body: &StatsRequestBody) -> Result<u16, OfpSerializationError> {
        match body {
            StatsRequestBody::Desc => Ok(OfpStatsType::OFPSTDesc as u16),
            StatsRequestBody::Flow(_) => Ok(OfpStatsType::OFPSTFlow as u16),
            StatsRequestBody::Aggregate(_) => Ok(OfpStatsType::OFPSTAggregate as u16),
            StatsRequestBody::Table => unimplemented("table stats".to_string()),
            StatsRequestBody::Port { .. } => Ok(OfpStatsType::OFPSTPort as u16),
            StatsRequestBody::Queue { .. } => Ok(OfpStatsType::OFPSTQueue as u16),
        }
    }

    fn reply_type_code(body: &StatsReplyBody) -> Result<u16, OfpSerializationError> {
        match body {
            StatsReplyBody::Desc(_) => Ok(OfpStatsType::OFPSTDesc as u16),
            StatsReplyBody::Flow(_) => Ok(OfpStatsType::OFPSTFlow as u16),
            StatsReplyBody::Aggregate { .. } => Ok(OfpStatsType::OFPSTAggregate as u16),
            StatsReplyBody::Table(_) => unimplemented("table stats".to_string()),
            StatsReplyBody::Port(_) => Ok(OfpStatsType::OFPSTPort as u16),
            StatsReplyBody::Queue(_) => Ok(OfpStatsType::OFPSTQueue as u16),
        }
    }

    fn marshal_flow_request(
        req: &FlowStatsRequest,
        bytes: &mut Vec<u8>,
    ) -> Result<(), OfpSerializationError> {
        bytes.write_u8(req.table_id)?;
        write_padding_bytes(bytes, 3)?;
        PseudoPort0x02::marshal(req.out_port, bytes)?;
        bytes.write_u32::<BigEndian>(req.out_group)?;
        write_padding_bytes(bytes, 4)?;
        bytes.write_u64::<BigEndian>(req.cookie)?;
        bytes.write_u64::<BigEndian>(req.cookie_mask)?;
        Match0x02::marshal(&req.pattern, bytes)
    }

    fn parse_flow_request(
        bytes: &mut Cursor<Vec<u8>>,
    ) -> Result<FlowStatsRequest, OfpSerializationError> {
        check_remaining(bytes, 32, "flow stats request")?;
        let table_id = bytes.read_u8()?;
        bytes.consume(3);
        let out_port = PseudoPort0x02::make(bytes.read_u32::<BigEndian>()?)?;
        let out_group = bytes.read_u32::<BigEndian>()?;
        bytes.consume(4);
        let cookie = bytes.read_u64::<BigEndian>()?;
        let cookie_mask = bytes.read_u64::<BigEndian>()?;
        let pattern = Match0x02::parse(bytes)?;
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
        bytes.write_u16::<BigEndian>(Stats0x02::request_type_code(&req.body)?)?;
        bytes.write_u16::<BigEndian>(req.flags)?;
        match &req.body {
            StatsRequestBody::Desc => {}
            StatsRequestBody::Flow(f) | StatsRequestBody::Aggregate(f) => {
                Stats0x02::marshal_flow_request(f, bytes)?;
            }
            StatsRequestBody::Table => return unimplemented("table stats".to_string()),
            StatsRequestBody::Port { port_no } => {
                PseudoPort0x02::marshal(*port_no, bytes)?;
                write_padding_bytes(bytes, 4)?;
            }
            StatsRequestBody::Queue { port_no, queue_id } => {
                PseudoPort0x02::marshal(*port_no, bytes)?;
                bytes.write_u32::<BigEndian>(*queue_id)?;
            }
        }
        Ok(())
    }

    fn parse_request(buf: &[u8]) -> Result<StatsRequest, OfpSerializationError> {
        let mut bytes = Cursor::new(buf.to_vec());
        check_remaining(&bytes, 4, "stats request")?;
        let type_code = bytes.read_u16::<BigEndian>()?;
        let flags = bytes.read_u16::<BigEndian>()?;
        let body = match type_code {
            t if t == (OfpStatsType::OFPSTDesc as u16) => StatsRequestBody::Desc,
            t if t == (OfpStatsType::OFPSTFlow as u16) => {
                StatsRequestBody::Flow(Stats0x02::parse_flow_request(&mut bytes)?)
            }
            t if t == (OfpStatsType::OFPSTAggregate as u16) => {
                StatsRequestBody::Aggregate(Stats0x02::parse_flow_request(&mut bytes)?)
            }
            t if t == (OfpStatsType::OFPSTTable as u16) => {
                return unimplemented("table stats".to_string());
            }
            t if t == (OfpStatsType::OFPSTPort as u16) => {
                check_remaining(&bytes, 8, "port stats request")?;
                let port_no = PseudoPort0x02::make(bytes.read_u32::<BigEndian>()?)?;
                bytes.consume(4);
                StatsRequestBody::Port { port_no }
            }
            t if t == (OfpStatsType::OFPSTQueue as u16) => {
                check_remaining(&bytes, 8, "queue stats request")?;
                StatsRequestBody::Queue {
                    port_no: PseudoPort0x02::make(bytes.read_u32::<BigEndian>()?)?,
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
        write_padding_bytes(&mut body, 6)?;
        body.write_u64::<BigEndian>(entry.cookie)?;
        body.write_u64::<BigEndian>(entry.packet_count)?;
        body.write_u64::<BigEndian>(entry.byte_count)?;
        Match0x02::marshal(&entry.pattern, &mut body)?;
        for instruction in &entry.instructions {
            Instruction0x02::marshal(instruction, &mut body)?;
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
        entry.consume(6);
        let cookie = entry.read_u64::<BigEndian>()?;
        let packet_count = entry.read_u64::<BigEndian>()?;
        let byte_count = entry.read_u64::<BigEndian>()?;
        let pattern = Match0x02::parse(&mut entry)?;
        let instructions = Instruction0x02::parse_sequence(&mut entry)?;
        Ok(FlowStatsEntry {
            table_id,
            duration_sec,
            duration_nsec,
            priority,
            idle_timeout,
            hard_timeout,
            flags: vec![],
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
        bytes.write_u16::<BigEndian>(Stats0x02::reply_type_code(&reply.body)?)?;
        bytes.write_u16::<BigEndian>(reply.flags)?;
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
                    Stats0x02::marshal_flow_entry(entry, bytes)?;
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
            StatsReplyBody::Table(_) => return unimplemented("table stats".to_string()),
            StatsReplyBody::Port(entries) => {
                for entry in entries {
                    PseudoPort0x02::marshal(entry.port_no, bytes)?;
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
                }
            }
            StatsReplyBody::Queue(entries) => {
                for entry in entries {
                    PseudoPort0x02::marshal(entry.port_no, bytes)?;
                    bytes.write_u32::<BigEndian>(entry.queue_id)?;
                    bytes.write_u64::<BigEndian>(entry.tx_bytes)?;
                    bytes.write_u64::<BigEndian>(entry.tx_packets)?;
                    bytes.write_u64::<BigEndian>(entry.tx_errors)?;
                }
            }
        }
        Ok(())
    }

    fn parse_reply(buf: &[u8]) -> Result<StatsReply, OfpSerializationError> {
        let mut bytes = Cursor::new(buf.to_vec());
        check_remaining(&bytes, 4, "stats reply")?;
        let type_code = bytes.read_u16::<BigEndian>()?;
        let flags = bytes.read_u16::<BigEndian>()?;
        let body = match type_code {
            t if t == (OfpStatsType::OFPSTDesc as u16) => StatsReplyBody::Desc(DescStats {
                mfr_desc: read_fixed_size_string(&mut bytes, DESC_STR_LENGTH, "desc stats")?,
                hw_desc: read_fixed_size_string(&mut bytes, DESC_STR_LENGTH, "desc stats")?,
                sw_desc: read_fixed_size_string(&mut bytes, DESC_STR_LENGTH, "desc stats")?,
                serial_num: read_fixed_size_string(&mut bytes, SERIAL_NUM_LENGTH, "desc stats")?,
                dp_desc: read_fixed_size_string(&mut bytes, DESC_STR_LENGTH, "desc stats")?,
            }),
            t if t == (OfpStatsType::OFPSTFlow as u16) => {
                let mut entries = vec![];
                while bytes.remaining() > 0 {
                    entries.push(Stats0x02::parse_flow_entry(&mut bytes)?);
                }
                StatsReplyBody::Flow(entries)
            }
            t if t == (OfpStatsType::OFPSTAggregate as u16) => {
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
            t if t == (OfpStatsType::OFPSTTable as u16) => {
                return unimplemented("table stats".to_string());
            }
            t if t == (OfpStatsType::OFPSTPort as u16) => {
                let mut entries = vec![];
                while bytes.remaining() > 0 {
                    check_remaining(&bytes, 104, "port stats entry")?;
                    let port_no = PseudoPort0x02::make(bytes.read_u32::<BigEndian>()?)?;
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
                        duration_sec: 0,
                        duration_nsec: 0,
                    });
                }
                StatsReplyBody::Port(entries)
            }
            t if t == (OfpStatsType::OFPSTQueue as u16) => {
                let mut entries = vec![];
                while bytes.remaining() > 0 {
                    check_remaining(&bytes, 32, "queue stats entry")?;
                    entries.push(QueueStatsEntry {
                        port_no: PseudoPort0x02::make(bytes.read_u32::<BigEndian>()?)?,
                        queue_id: bytes.read_u32::<BigEndian>()?,
                        tx_bytes: bytes.read_u64::<BigEndian>()?,
                        tx_packets: bytes.read_u64::<BigEndian>()?,
                        tx_errors: bytes.read_u64::<BigEndian>()?,
                        duration_sec: 0,
                        duration_nsec: 0,
                    });
                }
                StatsReplyBody::Queue(entries)
            }
            code => return unexpected(format!("{}", code), "stats type", "stats reply"),
        };
        Ok(StatsReply { flags, body })
    }
}

/// Encapsulates handling of complete v1.1 messages.
pub mod message {
    use super::*;
    use crate::ofp_header::OfpHeader;
    use crate::ofp_message::OfpMessage;
    use crate::openflow::MsgCode;

    pub struct Message0x02 {}

    impl Message0x02 {
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
                c => Err(OfpSerializationError::UnsupportedMessageCode {
                    version: OPENFLOW_0_02_VERSION,
                    code: c,
                }),
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
                | MessageBody::BarrierReply => Ok(()),
                MessageBody::Error(err) => Error0x02::marshal(err, bytes),
                MessageBody::EchoRequest(buf) | MessageBody::EchoReply(buf) => {
                    bytes.write_all(buf).map_err(OfpSerializationError::from)
                }
                MessageBody::Experimenter(exp) => Experimenter0x02::marshal(exp, bytes),
                MessageBody::FeaturesReply(sf) => SwitchFeatures0x02::marshal(sf, bytes),
                MessageBody::GetConfigReply(cfg) | MessageBody::SetConfig(cfg) => {
                    SwitchConfig0x02::marshal(cfg, bytes)
                }
                MessageBody::PacketIn(pi) => PacketIn0x02::marshal(pi, bytes),
                MessageBody::FlowRemoved(fr) => FlowRemoved0x02::marshal(fr, bytes),
                MessageBody::PortStatus(ps) => PortStatus0x02::marshal(ps, bytes),
                MessageBody::PacketOut(po) => PacketOut0x02::marshal(po, bytes),
                MessageBody::FlowMod(fm) => FlowMod0x02::marshal(fm, bytes),
                MessageBody::GroupMod(gm) => GroupMod0x02::marshal(gm, bytes),
                MessageBody::PortMod(pm) => PortMod0x02::marshal(pm, bytes),
                MessageBody::TableMod(tm) => TableMod0x02::marshal(tm, bytes),
                MessageBody::StatsRequest(req) => Stats0x02::marshal_request(req, bytes),
                MessageBody::StatsReply(reply) => Stats0x02::marshal_reply(reply, bytes),
                MessageBody::QueueGetConfigRequest { port } => {
                    QueueGetConfig0x02::marshal_request(*port, bytes)
                }
                MessageBody::QueueGetConfigReply(reply) => {
                    QueueGetConfig0x02::marshal_reply(reply, bytes)
                }
                msg => unimplemented(format!(
                    "message {}",
                    Message0x02::msg_code_of_message(msg)
                )),
            }
        }
    }

    impl OfpMessage for Message0x02 {
        fn size_of(msg: &Message) -> Result<usize, OfpSerializationError> {
            let mut body = vec![];
            Message0x02::marshal_body(&msg.body, &mut body)?;
            Ok(OfpHeader::size() + body.len())
        }

        fn header_of(msg: &Message) -> Result<OfpHeader, OfpSerializationError> {
            let length = Message0x02::size_of(msg)?;
            let code = Message0x02::msg_code_to_u8(Message0x02::msg_code_of_message(&msg.body))?;
            Ok(OfpHeader::new(
                OPENFLOW_0_02_VERSION,
                msg.experimental,
                code,
                length as u16,
                msg.xid,
            ))
        }

        fn marshal(msg: &Message) -> Result<Vec<u8>, OfpSerializationError> {
            let mut body = vec![];
            Message0x02::marshal_body(&msg.body, &mut body)?;
            let length = OfpHeader::size() + body.len();
            if length > u16::max_value() as usize {
                return Err(OfpSerializationError::InvariantViolation {
                    field: "length".to_string(),
                    details: format!("message of {} bytes overflows the length field", length),
                });
            }
            let code = Message0x02::msg_code_to_u8(Message0x02::msg_code_of_message(&msg.body))?;
            let header = OfpHeader::new(
                OPENFLOW_0_02_VERSION,
                msg.experimental,
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
            let code = Message0x02::msg_code_of_u8(header.type_code())?;
            debug!("Message received: {}", code);
            let body = match code {
                MsgCode::Hello => MessageBody::Hello,
                MsgCode::Error => MessageBody::Error(Error0x02::parse(buf)?),
                MsgCode::EchoReq => MessageBody::EchoRequest(buf.to_vec()),
                MsgCode::EchoResp => MessageBody::EchoReply(buf.to_vec()),
                MsgCode::Experimenter => {
                    MessageBody::Experimenter(Experimenter0x02::parse(buf)?)
                }
                MsgCode::FeaturesReq => MessageBody::FeaturesRequest,
                MsgCode::FeaturesResp => {
                    MessageBody::FeaturesReply(SwitchFeatures0x02::parse(buf)?)
                }
                MsgCode::GetConfigReq => MessageBody::GetConfigRequest,
                MsgCode::GetConfigResp => {
                    MessageBody::GetConfigReply(SwitchConfig0x02::parse(buf)?)
                }
                MsgCode::SetConfig => MessageBody::SetConfig(SwitchConfig0x02::parse(buf)?),
                MsgCode::PacketIn => MessageBody::PacketIn(PacketIn0x02::parse(buf)?),
                MsgCode::FlowRemoved => MessageBody::FlowRemoved(FlowRemoved0x02::parse(buf)?),
                MsgCode::PortStatus => MessageBody::PortStatus(PortStatus0x02::parse(buf)?),
                MsgCode::PacketOut => MessageBody::PacketOut(PacketOut0x02::parse(buf)?),
                MsgCode::FlowMod => MessageBody::FlowMod(FlowMod0x02::parse(buf)?),
                MsgCode::GroupMod => MessageBody::GroupMod(GroupMod0x02::parse(buf)?),
                MsgCode::PortMod => MessageBody::PortMod(PortMod0x02::parse(buf)?),
                MsgCode::TableMod => MessageBody::TableMod(TableMod0x02::parse(buf)?),
                MsgCode::StatsReq => MessageBody::StatsRequest(Stats0x02::parse_request(buf)?),
                MsgCode::StatsResp => MessageBody::StatsReply(Stats0x02::parse_reply(buf)?),
                MsgCode::BarrierReq => MessageBody::BarrierRequest,
                MsgCode::BarrierResp => MessageBody::BarrierReply,
                MsgCode::QueueGetConfigReq => MessageBody::QueueGetConfigRequest {
                    port: QueueGetConfig0x02::parse_request(buf)?,
                },
                MsgCode::QueueGetConfigResp => {
                    MessageBody::QueueGetConfigReply(QueueGetConfig0x02::parse_reply(buf)?)
                }
                c => {
                    return Err(OfpSerializationError::UnsupportedMessageCode {
                        version: OPENFLOW_0_02_VERSION,
                        code: c,
                    });
                }
            };
            Ok(Message {
                version: OPENFLOW_0_02_VERSION,
                xid: header.xid(),
                experimental: header.experimental(),
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
            let msg = Message::new(OPENFLOW_0_02_VERSION, TEST_XID, body);
            let data = Message0x02::marshal(&msg).unwrap();
            let header = OfpHeader::parse(&data).unwrap();
            assert_eq!(header.length(), data.len());
            let parsed = Message0x02::parse(&header, &data[OfpHeader::size()..]).unwrap();
            assert_eq!(parsed, msg);
            parsed
        }

        fn all_ones(width: usize) -> Vec<u8> {
            vec![0xff; width]
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

        /// A field list in the canonical slot order the decoder produces,
        /// so it is round-trip-exact through the fixed layout.
        fn sample_match() -> Match {
            Match {
                fields: vec![
                    MatchField::basic(OxmField::InPort, vec![0, 0, 0, 1]),
                    MatchField::basic_masked(OxmField::EthSrc, vec![0; 6], all_ones(6)),
                    MatchField::basic(OxmField::EthDst, vec![1, 2, 3, 4, 5, 6]),
                    MatchField::basic(OxmField::EthType, vec![0x08, 0x00]),
                    MatchField::basic(OxmField::IpProto, vec![6]),
                    MatchField::basic_masked(
                        OxmField::Ipv4Src,
                        vec![10, 0, 0, 1],
                        vec![255, 255, 255, 0],
                    ),
                    MatchField::basic_masked(OxmField::Ipv4Dst, vec![0; 4], all_ones(4)),
                    MatchField::basic(OxmField::TcpDst, vec![0x0f, 0xa0]),
                    MatchField::basic_masked(OxmField::Metadata, vec![0; 8], all_ones(8)),
                ],
            }
        }

        #[test]
        fn test_marshal_hello() {
            let msg = Message::new(OPENFLOW_0_02_VERSION, 1, MessageBody::Hello);
            let data = Message0x02::marshal(&msg).unwrap();
            assert_eq!(data, vec![0x02, 0x00, 0x00, 0x08, 0x00, 0x00, 0x00, 0x01]);
        }

        #[test]
        fn test_experimental_bit_round_trip() {
            let mut msg = Message::new(OPENFLOW_0_02_VERSION, 7, MessageBody::Hello);
            msg.experimental = true;
            let data = Message0x02::marshal(&msg).unwrap();
            assert_eq!(data[0], 0x82);
            let header = OfpHeader::parse(&data).unwrap();
            let parsed = Message0x02::parse(&header, &data[8..]).unwrap();
            assert_eq!(parsed, msg);
        }

        #[test]
        fn test_port_struct_is_64_bytes() {
            let mut bytes = vec![];
            PortDesc0x02::marshal(&port_desc(), &mut bytes).unwrap();
            assert_eq!(bytes.len(), 64);
            // state bitmap carries exactly the live bit
            assert_eq!(&bytes[36..40], &[0x00, 0x00, 0x00, 0x04]);
            // curr bitmap: 1gb_fd | copper
            assert_eq!(&bytes[40..44], &[0x00, 0x00, 0x08, 0x20]);
            let mut cursor = Cursor::new(bytes);
            assert_eq!(PortDesc0x02::parse(&mut cursor).unwrap(), port_desc());
        }

        #[test]
        fn test_match_in_port_only_wildcards() {
            let m = Match {
                fields: vec![MatchField::basic(OxmField::InPort, vec![0, 0, 0, 1])],
            };
            let mut bytes = vec![];
            Match0x02::marshal(&m, &mut bytes).unwrap();
            assert_eq!(bytes.len(), 88);
            // every non-mask bit except in_port
            assert_eq!(&bytes[8..12], &[0x00, 0x00, 0x03, 0xfe]);

            let mut cursor = Cursor::new(bytes);
            let parsed = Match0x02::parse(&mut cursor).unwrap();
            assert_eq!(
                parsed.fields,
                vec![
                    MatchField::basic(OxmField::InPort, vec![0, 0, 0, 1]),
                    MatchField::basic_masked(OxmField::EthSrc, vec![0; 6], all_ones(6)),
                    MatchField::basic_masked(OxmField::EthDst, vec![0; 6], all_ones(6)),
                    MatchField::basic_masked(OxmField::Ipv4Src, vec![0; 4], all_ones(4)),
                    MatchField::basic_masked(OxmField::Ipv4Dst, vec![0; 4], all_ones(4)),
                    MatchField::basic_masked(OxmField::Metadata, vec![0; 8], all_ones(8)),
                ]
            );
        }

        #[test]
        fn test_match_round_trip() {
            let m = sample_match();
            let mut bytes = vec![];
            Match0x02::marshal(&m, &mut bytes).unwrap();
            assert_eq!(bytes.len(), 88);
            let mut cursor = Cursor::new(bytes);
            assert_eq!(Match0x02::parse(&mut cursor).unwrap(), m);
        }

        #[test]
        fn test_transport_ports_follow_ip_proto() {
            // tcp
            let tcp = Match {
                fields: vec![
                    MatchField::basic_masked(OxmField::EthSrc, vec![0; 6], all_ones(6)),
                    MatchField::basic_masked(OxmField::EthDst, vec![0; 6], all_ones(6)),
                    MatchField::basic(OxmField::IpProto, vec![6]),
                    MatchField::basic_masked(OxmField::Ipv4Src, vec![0; 4], all_ones(4)),
                    MatchField::basic_masked(OxmField::Ipv4Dst, vec![0; 4], all_ones(4)),
                    MatchField::basic(OxmField::TcpSrc, vec![0x00, 0x50]),
                    MatchField::basic_masked(OxmField::Metadata, vec![0; 8], all_ones(8)),
                ],
            };
            let mut bytes = vec![];
            Match0x02::marshal(&tcp, &mut bytes).unwrap();
            let mut cursor = Cursor::new(bytes);
            assert_eq!(Match0x02::parse(&mut cursor).unwrap(), tcp);

            // udp
            let udp = Match {
                fields: vec![
                    MatchField::basic_masked(OxmField::EthSrc, vec![0; 6], all_ones(6)),
                    MatchField::basic_masked(OxmField::EthDst, vec![0; 6], all_ones(6)),
                    MatchField::basic(OxmField::IpProto, vec![17]),
                    MatchField::basic_masked(OxmField::Ipv4Src, vec![0; 4], all_ones(4)),
                    MatchField::basic_masked(OxmField::Ipv4Dst, vec![0; 4], all_ones(4)),
                    MatchField::basic(OxmField::UdpSrc, vec![0x00, 0x35]),
                    MatchField::basic_masked(OxmField::Metadata, vec![0; 8], all_ones(8)),
                ],
            };
            let mut bytes = vec![];
            Match0x02::marshal(&udp, &mut bytes).unwrap();
            let mut cursor = Cursor::new(bytes);
            assert_eq!(Match0x02::parse(&mut cursor).unwrap(), udp);

            // no ip_proto: the transport slots encode zero and decode absent
            let none = Match {
                fields: vec![
                    MatchField::basic_masked(OxmField::EthSrc, vec![0; 6], all_ones(6)),
                    MatchField::basic_masked(OxmField::EthDst, vec![0; 6], all_ones(6)),
                    MatchField::basic_masked(OxmField::Ipv4Src, vec![0; 4], all_ones(4)),
                    MatchField::basic_masked(OxmField::Ipv4Dst, vec![0; 4], all_ones(4)),
                    MatchField::basic_masked(OxmField::Metadata, vec![0; 8], all_ones(8)),
                ],
            };
            let mut bytes = vec![];
            Match0x02::marshal(&none, &mut bytes).unwrap();
            assert_eq!(&bytes[60..64], &[0, 0, 0, 0]);
            let mut cursor = Cursor::new(bytes);
            assert_eq!(Match0x02::parse(&mut cursor).unwrap(), none);
        }

        #[test]
        fn test_round_trip_flow_mod() {
            round_trip(MessageBody::FlowMod(FlowMod {
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
                    Instruction::WriteActions {
                        actions: vec![0xAB; 16],
                    },
                    Instruction::WriteMetadata {
                        metadata: 0x11,
                        mask: 0xff,
                    },
                    Instruction::ClearActions,
                ],
            }));
        }

        #[test]
        fn test_round_trip_packet_in() {
            round_trip(MessageBody::PacketIn(PacketIn {
                buffer_id: Some(42),
                in_port: Some(1),
                in_phy_port: Some(1),
                total_len: 10,
                reason: PacketInReason::Action,
                table_id: 0,
                cookie: None,
                pattern: None,
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
                hard_timeout: 0,
                packet_count: 100,
                byte_count: 120500,
                pattern: sample_match(),
            }));
        }

        #[test]
        fn test_round_trip_port_status() {
            round_trip(MessageBody::PortStatus(PortStatus {
                reason: PortReason::PortAdd,
                desc: port_desc(),
            }));
        }

        #[test]
        fn test_round_trip_packet_out() {
            round_trip(MessageBody::PacketOut(PacketOut {
                buffer_id: None,
                in_port: PseudoPort::PhysicalPort(1),
                actions: vec![0xAA; 8],
                data: vec![1, 2, 3, 4],
            }));
        }

        #[test]
        fn test_round_trip_features_reply() {
            round_trip(MessageBody::FeaturesReply(SwitchFeatures {
                datapath_mac: [0xAA, 0xBB, 0xCC, 0xDD, 0xEE, 0xFF],
                datapath_id: 0x1122,
                n_buffers: 200,
                n_tables: 254,
                auxiliary_id: 0,
                capabilities: vec![
                    Capability::FlowStats,
                    Capability::TableStats,
                    Capability::ArpMatchIp,
                ],
                ports: vec![port_desc()],
            }));
        }

        #[test]
        fn test_round_trip_config() {
            round_trip(MessageBody::GetConfigReply(SwitchConfig {
                flags: vec![ConfigFlag::FragReasm, ConfigFlag::InvalidTtlToController],
                miss_send_len: 128,
            }));
        }

        #[test]
        fn test_round_trip_error() {
            round_trip(MessageBody::Error(ErrorMsg {
                error_type: ErrorType::BadMatch(BadMatchCode::BadWildcards),
                data: vec![0xAB; 10],
            }));
        }

        #[test]
        fn test_error_code_beyond_version_is_rejected() {
            let err = ErrorMsg {
                error_type: ErrorType::FlowModFailed(FlowModFailedCode::BadFlags),
                data: vec![],
            };
            let mut bytes = vec![];
            assert!(Error0x02::marshal(&err, &mut bytes).is_err());
        }

        #[test]
        fn test_round_trip_group_mod() {
            round_trip(MessageBody::GroupMod(GroupMod {
                command: GroupModCommand::Add,
                group_type: GroupType::All,
                group_id: 7,
                buckets: vec![Bucket {
                    weight: 0,
                    watch_port: 0xffffffff,
                    watch_group: 0xffffffff,
                    actions: vec![0xBB; 8],
                }],
            }));
        }

        #[test]
        fn test_round_trip_port_mod() {
            round_trip(MessageBody::PortMod(PortMod {
                port_no: PseudoPort::PhysicalPort(3),
                hw_addr: [1, 2, 3, 4, 5, 6],
                config: vec![PortConfig::PortDown],
                mask: vec![PortConfig::PortDown],
                advertise: vec![PortFeature::Rate100MbFd],
            }));
        }

        #[test]
        fn test_round_trip_table_mod() {
            round_trip(MessageBody::TableMod(TableMod {
                table_id: 2,
                config: vec![TableConfig::MissDrop],
            }));
        }

        #[test]
        fn test_round_trip_queue_get_config() {
            round_trip(MessageBody::QueueGetConfigRequest {
                port: PseudoPort::PhysicalPort(1),
            });
            round_trip(MessageBody::QueueGetConfigReply(QueueGetConfigReply {
                port: PseudoPort::PhysicalPort(1),
                queues: vec![PacketQueue {
                    queue_id: 1,
                    port_no: None,
                    properties: vec![QueueProperty::MinRate { rate: 100 }],
                }],
            }));
        }

        #[test]
        fn test_round_trip_stats() {
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
                    pattern: Match {
                        fields: vec![
                            MatchField::basic_masked(OxmField::EthSrc, vec![0; 6], all_ones(6)),
                            MatchField::basic_masked(OxmField::EthDst, vec![0; 6], all_ones(6)),
                            MatchField::basic_masked(OxmField::Ipv4Src, vec![0; 4], all_ones(4)),
                            MatchField::basic_masked(OxmField::Ipv4Dst, vec![0; 4], all_ones(4)),
                            MatchField::basic_masked(OxmField::Metadata, vec![0; 8], all_ones(8)),
                        ],
                    },
                }),
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
                body: StatsReplyBody::Queue(vec![QueueStatsEntry {
                    port_no: PseudoPort::PhysicalPort(1),
                    queue_id: 1,
                    tx_bytes: 1024,
                    tx_packets: 8,
                    tx_errors: 0,
                    duration_sec: 0,
                    duration_nsec: 0,
                }]),
            }));
        }

        #[test]
        fn test_table_stats_is_not_carried() {
            let msg = Message::new(
                OPENFLOW_0_02_VERSION,
                TEST_XID,
                MessageBody::StatsRequest(StatsRequest {
                    flags: 0,
                    body: StatsRequestBody::Table,
                }),
            );
            assert!(Message0x02::marshal(&msg).is_err());
        }

        #[test]
        fn test_v13_only_bodies_are_rejected() {
            let msg = Message::new(
                OPENFLOW_0_02_VERSION,
                TEST_XID,
                MessageBody::RoleRequest(Role {
                    role: ControllerRole::Master,
                    generation_id: 0,
                }),
            );
            assert!(Message0x02::marshal(&msg).is_err());

            let msg = Message::new(OPENFLOW_0_02_VERSION, TEST_XID, MessageBody::GetAsyncRequest);
            assert!(Message0x02::marshal(&msg).is_err());
        }
    }
}
