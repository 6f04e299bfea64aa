//! Version-independent model of OpenFlow control messages. The codec
//! modules translate between these records and the per-version wire layouts.

use num_derive::FromPrimitive;

use crate::ofp_header::Xid;

/// A single OpenFlow control message: protocol version, transaction id and
/// typed body. `experimental` is the high bit of the v1.1 version byte and
/// must stay false on v1.3 frames.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub version: u8,
    pub xid: Xid,
    pub experimental: bool,
    pub body: MessageBody,
}

impl Message {
    pub fn new(version: u8, xid: Xid, body: MessageBody) -> Message {
        Message {
            version,
            xid,
            experimental: false,
            body,
        }
    }
}

/// Abstractions of OpenFlow message bodies mapping to message codes.
#[derive(Debug, Clone, PartialEq)]
pub enum MessageBody {
    Hello,
    Error(ErrorMsg),
    EchoRequest(Vec<u8>),
    EchoReply(Vec<u8>),
    Experimenter(Experimenter),
    FeaturesRequest,
    FeaturesReply(SwitchFeatures),
    GetConfigRequest,
    GetConfigReply(SwitchConfig),
    SetConfig(SwitchConfig),
    PacketIn(PacketIn),
    FlowRemoved(FlowRemoved),
    PortStatus(PortStatus),
    PacketOut(PacketOut),
    FlowMod(FlowMod),
    GroupMod(GroupMod),
    PortMod(PortMod),
    TableMod(TableMod),
    StatsRequest(StatsRequest),
    StatsReply(StatsReply),
    BarrierRequest,
    BarrierReply,
    QueueGetConfigRequest { port: PseudoPort },
    QueueGetConfigReply(QueueGetConfigReply),
    RoleRequest(Role),
    RoleReply(Role),
    GetAsyncRequest,
    GetAsyncReply(AsyncConfig),
    SetAsync(AsyncConfig),
    MeterMod(MeterMod),
}

/// Port behavior: either a physical port number or one of the reserved
/// names.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PseudoPort {
    PhysicalPort(u32),
    InPort,
    Table,
    Normal,
    Flood,
    AllPorts,
    Controller,
    Local,
    Any,
}

/// Flags to indicate behavior of a physical port.
///
/// Used both to describe the current configuration of a port and, through
/// `PortMod`, to change it.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PortConfig {
    PortDown,
    NoRecv,
    NoFwd,
    NoPacketIn,
}

/// Current state of a physical port. Not configurable by the controller.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PortState {
    LinkDown,
    Blocked,
    Live,
}

/// Features of physical ports available in a datapath.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PortFeature {
    Rate10MbHd,
    Rate10MbFd,
    Rate100MbHd,
    Rate100MbFd,
    Rate1GbHd,
    Rate1GbFd,
    Rate10GbFd,
    Rate40GbFd,
    Rate100GbFd,
    Rate1TbFd,
    Other,
    Copper,
    Fiber,
    Autoneg,
    Pause,
    PauseAsym,
}

/// Description of a physical port.
#[derive(Clone, Debug, PartialEq)]
pub struct PortDesc {
    pub port_no: PseudoPort,
    pub hw_addr: [u8; 6],
    pub name: String,
    pub config: Vec<PortConfig>,
    pub state: Vec<PortState>,
    pub curr: Vec<PortFeature>,
    pub advertised: Vec<PortFeature>,
    pub supported: Vec<PortFeature>,
    pub peer: Vec<PortFeature>,
    pub curr_speed: u32,
    pub max_speed: u32,
}

/// Capabilities supported by the datapath.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Capability {
    FlowStats,
    TableStats,
    PortStats,
    GroupStats,
    IpReasm,
    QueueStats,
    ArpMatchIp,
    PortBlocked,
}

/// Switch features, as announced in a features reply.
#[derive(Clone, Debug, PartialEq)]
pub struct SwitchFeatures {
    pub datapath_mac: [u8; 6],
    pub datapath_id: u16,
    pub n_buffers: u32,
    pub n_tables: u8,
    pub auxiliary_id: u8,
    pub capabilities: Vec<Capability>,
    /// v1.1 carries the port list inline; v1.3 announces ports elsewhere.
    pub ports: Vec<PortDesc>,
}

/// IP fragment handling flags of the switch configuration.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ConfigFlag {
    FragDrop,
    FragReasm,
    InvalidTtlToController,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SwitchConfig {
    pub flags: Vec<ConfigFlag>,
    pub miss_send_len: u16,
}

/// The reason a packet arrives at the controller.
#[derive(Copy, Clone, Debug, PartialEq, Eq, FromPrimitive)]
pub enum PacketInReason {
    NoMatch = 0,
    Action = 1,
    InvalidTtl = 2,
}

/// Represents packets received by the datapath and sent to the controller.
#[derive(Clone, Debug, PartialEq)]
pub struct PacketIn {
    pub buffer_id: Option<u32>,
    /// Ingress ports of the v1.1 layout; v1.3 carries them in the match.
    pub in_port: Option<u32>,
    pub in_phy_port: Option<u32>,
    pub total_len: u16,
    pub reason: PacketInReason,
    pub table_id: u8,
    pub cookie: Option<u64>,
    pub pattern: Option<Match>,
    pub data: Vec<u8>,
}

/// Reason a flow was removed from a switch.
#[derive(Copy, Clone, Debug, PartialEq, Eq, FromPrimitive)]
pub enum FlowRemovedReason {
    IdleTimeout = 0,
    HardTimeout = 1,
    Delete = 2,
    GroupDelete = 3,
}

/// Flow removed (datapath -> controller).
#[derive(Clone, Debug, PartialEq)]
pub struct FlowRemoved {
    pub cookie: u64,
    pub priority: u16,
    pub reason: FlowRemovedReason,
    pub table_id: u8,
    pub duration_sec: u32,
    pub duration_nsec: u32,
    pub idle_timeout: u16,
    /// Not carried on the v1.1 wire.
    pub hard_timeout: u16,
    pub packet_count: u64,
    pub byte_count: u64,
    pub pattern: Match,
}

/// What changed about a physical port.
#[derive(Copy, Clone, Debug, PartialEq, Eq, FromPrimitive)]
pub enum PortReason {
    PortAdd = 0,
    PortDelete = 1,
    PortModify = 2,
}

/// A physical port has changed in the datapath.
#[derive(Clone, Debug, PartialEq)]
pub struct PortStatus {
    pub reason: PortReason,
    pub desc: PortDesc,
}

/// Represents packets sent from the controller. The action list is an
/// opaque, length-delimited byte string decoded by the action layer.
#[derive(Clone, Debug, PartialEq)]
pub struct PacketOut {
    pub buffer_id: Option<u32>,
    pub in_port: PseudoPort,
    pub actions: Vec<u8>,
    pub data: Vec<u8>,
}

/// Type of modification to perform on a flow table.
#[derive(Copy, Clone, Debug, PartialEq, Eq, FromPrimitive)]
pub enum FlowModCommand {
    Add = 0,
    Modify = 1,
    ModifyStrict = 2,
    Delete = 3,
    DeleteStrict = 4,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FlowModFlag {
    SendFlowRem,
    CheckOverlap,
    ResetCounts,
    NoPacketCounts,
    NoByteCounts,
}

/// Represents modifications to a flow table from the controller.
#[derive(Clone, Debug, PartialEq)]
pub struct FlowMod {
    pub cookie: u64,
    pub cookie_mask: u64,
    pub table_id: u8,
    pub command: FlowModCommand,
    pub idle_timeout: u16,
    pub hard_timeout: u16,
    pub priority: u16,
    pub buffer_id: Option<u32>,
    pub out_port: PseudoPort,
    pub out_group: u32,
    pub flags: Vec<FlowModFlag>,
    pub pattern: Match,
    pub instructions: Vec<Instruction>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, FromPrimitive)]
pub enum GroupModCommand {
    Add = 0,
    Modify = 1,
    Delete = 2,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, FromPrimitive)]
pub enum GroupType {
    All = 0,
    Select = 1,
    Indirect = 2,
    FastFailover = 3,
}

/// One action bucket of a group. Actions are opaque bytes at this layer.
#[derive(Clone, Debug, PartialEq)]
pub struct Bucket {
    pub weight: u16,
    pub watch_port: u32,
    pub watch_group: u32,
    pub actions: Vec<u8>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GroupMod {
    pub command: GroupModCommand,
    pub group_type: GroupType,
    pub group_id: u32,
    pub buckets: Vec<Bucket>,
}

/// Modification of the behavior of a physical port.
#[derive(Clone, Debug, PartialEq)]
pub struct PortMod {
    pub port_no: PseudoPort,
    pub hw_addr: [u8; 6],
    pub config: Vec<PortConfig>,
    pub mask: Vec<PortConfig>,
    pub advertise: Vec<PortFeature>,
}

/// Flow-table miss handling flags. Only v1.1 defines any bits.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TableConfig {
    MissContinue,
    MissDrop,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TableMod {
    pub table_id: u8,
    pub config: Vec<TableConfig>,
}

/// OXM match-field class.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum OxmClass {
    Nxm0,
    Nxm1,
    OpenflowBasic,
    Experimenter,
}

/// Match-field names of the `openflow_basic` class. The numeric values are
/// the OXM field codes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, FromPrimitive)]
pub enum OxmField {
    InPort = 0,
    InPhyPort = 1,
    Metadata = 2,
    EthDst = 3,
    EthSrc = 4,
    EthType = 5,
    VlanVid = 6,
    VlanPcp = 7,
    IpDscp = 8,
    IpEcn = 9,
    IpProto = 10,
    Ipv4Src = 11,
    Ipv4Dst = 12,
    TcpSrc = 13,
    TcpDst = 14,
    UdpSrc = 15,
    UdpDst = 16,
    SctpSrc = 17,
    SctpDst = 18,
    Icmpv4Type = 19,
    Icmpv4Code = 20,
    ArpOp = 21,
    ArpSpa = 22,
    ArpTpa = 23,
    ArpSha = 24,
    ArpTha = 25,
    Ipv6Src = 26,
    Ipv6Dst = 27,
    Ipv6Flabel = 28,
    Icmpv6Type = 29,
    Icmpv6Code = 30,
    Ipv6NdTarget = 31,
    Ipv6NdSll = 32,
    Ipv6NdTll = 33,
    MplsLabel = 34,
    MplsTc = 35,
    MplsBos = 36,
    PbbIsid = 37,
    TunnelId = 38,
    Ipv6Exthdr = 39,
}

/// One field to match against flows: class, name, big-endian value bytes
/// and an optional mask of the same width.
#[derive(Clone, Debug, PartialEq)]
pub struct MatchField {
    pub class: OxmClass,
    pub field: OxmField,
    pub value: Vec<u8>,
    pub mask: Option<Vec<u8>>,
}

impl MatchField {
    pub fn basic(field: OxmField, value: Vec<u8>) -> MatchField {
        MatchField {
            class: OxmClass::OpenflowBasic,
            field,
            value,
            mask: None,
        }
    }

    pub fn basic_masked(field: OxmField, value: Vec<u8>, mask: Vec<u8>) -> MatchField {
        MatchField {
            class: OxmClass::OpenflowBasic,
            field,
            value,
            mask: Some(mask),
        }
    }
}

/// Fields to match against flows, in encoding order. Both versions share
/// this form; the v1.1 codec projects it onto the fixed 88-byte layout.
#[derive(Clone, Debug, PartialEq)]
pub struct Match {
    pub fields: Vec<MatchField>,
}

impl Match {
    /// The match that constrains nothing.
    pub fn match_all() -> Match {
        Match { fields: vec![] }
    }
}

/// A directive attached to a flow entry. Action payloads are opaque bytes
/// decoded by the action layer.
#[derive(Clone, Debug, PartialEq)]
pub enum Instruction {
    GotoTable { table_id: u8 },
    WriteMetadata { metadata: u64, mask: u64 },
    WriteActions { actions: Vec<u8> },
    ApplyActions { actions: Vec<u8> },
    ClearActions,
    Meter { meter_id: u32 },
    Experimenter { experimenter: u32, data: Vec<u8> },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, FromPrimitive)]
pub enum MeterModCommand {
    Add = 0,
    Modify = 1,
    Delete = 2,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MeterFlag {
    Kbps,
    Pktps,
    Burst,
    Stats,
}

/// A rate-limiting band attached to a meter.
#[derive(Clone, Debug, PartialEq)]
pub enum MeterBand {
    Drop {
        rate: u32,
        burst_size: u32,
    },
    DscpRemark {
        rate: u32,
        burst_size: u32,
        prec_level: u8,
    },
    Experimenter {
        rate: u32,
        burst_size: u32,
        experimenter: u32,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub struct MeterMod {
    pub command: MeterModCommand,
    pub flags: Vec<MeterFlag>,
    pub meter_id: u32,
    pub bands: Vec<MeterBand>,
}

/// One property of a packet queue.
#[derive(Clone, Debug, PartialEq)]
pub enum QueueProperty {
    MinRate { rate: u16 },
    MaxRate { rate: u16 },
    Experimenter { experimenter: u32, data: Vec<u8> },
}

/// A packet queue attached to a port. The port association exists on the
/// v1.3 wire only.
#[derive(Clone, Debug, PartialEq)]
pub struct PacketQueue {
    pub queue_id: u32,
    pub port_no: Option<u32>,
    pub properties: Vec<QueueProperty>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct QueueGetConfigReply {
    pub port: PseudoPort,
    pub queues: Vec<PacketQueue>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, FromPrimitive)]
pub enum ControllerRole {
    NoChange = 0,
    Equal = 1,
    Master = 2,
    Slave = 3,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Role {
    pub role: ControllerRole,
    pub generation_id: u64,
}

/// Per-role filters controlling which asynchronous events a controller
/// receives. Index 0 is the master/equal mask, index 1 the slave mask.
#[derive(Clone, Debug, PartialEq)]
pub struct AsyncConfig {
    pub packet_in_mask: [Vec<PacketInReason>; 2],
    pub port_status_mask: [Vec<PortReason>; 2],
    pub flow_removed_mask: [Vec<FlowRemovedReason>; 2],
}

#[derive(Clone, Debug, PartialEq)]
pub struct Experimenter {
    pub experimenter: u32,
    /// Not carried on the v1.1 wire.
    pub exp_type: u32,
    pub data: Vec<u8>,
}

/// Reason Hello failed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, FromPrimitive)]
pub enum HelloFailedCode {
    Incompatible = 0,
    EPerm = 1,
}

/// Reason the controller made a bad request to a switch.
#[derive(Copy, Clone, Debug, PartialEq, Eq, FromPrimitive)]
pub enum BadRequestCode {
    BadVersion = 0,
    BadType = 1,
    BadStat = 2,
    BadExperimenter = 3,
    BadExpType = 4,
    EPerm = 5,
    BadLen = 6,
    BufferEmpty = 7,
    BufferUnknown = 8,
    BadTableId = 9,
    IsSlave = 10,
    BadPort = 11,
    BadPacket = 12,
    MultipartBufferOverflow = 13,
}

/// Reason an action in a request failed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, FromPrimitive)]
pub enum BadActionCode {
    BadType = 0,
    BadLen = 1,
    BadExperimenter = 2,
    BadExpType = 3,
    BadOutPort = 4,
    BadArgument = 5,
    EPerm = 6,
    TooMany = 7,
    BadQueue = 8,
    BadOutGroup = 9,
    MatchInconsistent = 10,
    UnsupportedOrder = 11,
    BadTag = 12,
    BadSetType = 13,
    BadSetLen = 14,
    BadSetArgument = 15,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, FromPrimitive)]
pub enum BadInstructionCode {
    UnknownInst = 0,
    UnsupInst = 1,
    BadTableId = 2,
    UnsupMetadata = 3,
    UnsupMetadataMask = 4,
    BadExperimenter = 5,
    BadExpType = 6,
    BadLen = 7,
    EPerm = 8,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, FromPrimitive)]
pub enum BadMatchCode {
    BadType = 0,
    BadLen = 1,
    BadTag = 2,
    BadDlAddrMask = 3,
    BadNwAddrMask = 4,
    BadWildcards = 5,
    BadField = 6,
    BadValue = 7,
    BadMask = 8,
    BadPrereq = 9,
    DupField = 10,
    EPerm = 11,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, FromPrimitive)]
pub enum FlowModFailedCode {
    Unknown = 0,
    TableFull = 1,
    BadTableId = 2,
    Overlap = 3,
    EPerm = 4,
    BadTimeout = 5,
    BadCommand = 6,
    BadFlags = 7,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, FromPrimitive)]
pub enum GroupModFailedCode {
    GroupExists = 0,
    InvalidGroup = 1,
    WeightUnsupported = 2,
    OutOfGroups = 3,
    OutOfBuckets = 4,
    ChainingUnsupported = 5,
    WatchUnsupported = 6,
    Loop = 7,
    UnknownGroup = 8,
    ChainedGroup = 9,
    BadType = 10,
    BadCommand = 11,
    BadBucket = 12,
    BadWatch = 13,
    EPerm = 14,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, FromPrimitive)]
pub enum PortModFailedCode {
    BadPort = 0,
    BadHwAddr = 1,
    BadConfig = 2,
    BadAdvertise = 3,
    EPerm = 4,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, FromPrimitive)]
pub enum TableModFailedCode {
    BadTable = 0,
    BadConfig = 1,
    EPerm = 2,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, FromPrimitive)]
pub enum QueueOpFailedCode {
    BadPort = 0,
    BadQueue = 1,
    EPerm = 2,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, FromPrimitive)]
pub enum SwitchConfigFailedCode {
    BadFlags = 0,
    BadLen = 1,
    EPerm = 2,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, FromPrimitive)]
pub enum RoleRequestFailedCode {
    Stale = 0,
    Unsup = 1,
    BadRole = 2,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, FromPrimitive)]
pub enum MeterModFailedCode {
    Unknown = 0,
    MeterExists = 1,
    InvalidMeter = 2,
    UnknownMeter = 3,
    BadCommand = 4,
    BadFlags = 5,
    BadRate = 6,
    BadBurst = 7,
    BadBand = 8,
    BadBandValue = 9,
    OutOfMeters = 10,
    OutOfBands = 11,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, FromPrimitive)]
pub enum TableFeaturesFailedCode {
    BadTable = 0,
    BadMetadata = 1,
    BadType = 2,
    BadLen = 3,
    BadArgument = 4,
    EPerm = 5,
}

/// High-level type of OpenFlow error, with the per-type failure code.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ErrorType {
    HelloFailed(HelloFailedCode),
    BadRequest(BadRequestCode),
    BadAction(BadActionCode),
    BadInstruction(BadInstructionCode),
    BadMatch(BadMatchCode),
    FlowModFailed(FlowModFailedCode),
    GroupModFailed(GroupModFailedCode),
    PortModFailed(PortModFailedCode),
    TableModFailed(TableModFailedCode),
    QueueOpFailed(QueueOpFailedCode),
    SwitchConfigFailed(SwitchConfigFailedCode),
    RoleRequestFailed(RoleRequestFailedCode),
    MeterModFailed(MeterModFailedCode),
    TableFeaturesFailed(TableFeaturesFailedCode),
    Experimenter { exp_type: u16, experimenter: u32 },
}

/// Error message (datapath -> controller).
#[derive(Clone, Debug, PartialEq)]
pub struct ErrorMsg {
    pub error_type: ErrorType,
    pub data: Vec<u8>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FlowStatsRequest {
    pub table_id: u8,
    pub out_port: PseudoPort,
    pub out_group: u32,
    pub cookie: u64,
    pub cookie_mask: u64,
    pub pattern: Match,
}

/// Type of body for stats requests.
#[derive(Clone, Debug, PartialEq)]
pub enum StatsRequestBody {
    Desc,
    Flow(FlowStatsRequest),
    Aggregate(FlowStatsRequest),
    Table,
    Port { port_no: PseudoPort },
    Queue { port_no: PseudoPort, queue_id: u32 },
}

/// Represents stats requests from the controller.
#[derive(Clone, Debug, PartialEq)]
pub struct StatsRequest {
    pub flags: u16,
    pub body: StatsRequestBody,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DescStats {
    pub mfr_desc: String,
    pub hw_desc: String,
    pub sw_desc: String,
    pub serial_num: String,
    pub dp_desc: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FlowStatsEntry {
    pub table_id: u8,
    pub duration_sec: u32,
    pub duration_nsec: u32,
    pub priority: u16,
    pub idle_timeout: u16,
    pub hard_timeout: u16,
    /// Not carried on the v1.1 wire.
    pub flags: Vec<FlowModFlag>,
    pub cookie: u64,
    pub packet_count: u64,
    pub byte_count: u64,
    pub pattern: Match,
    pub instructions: Vec<Instruction>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TableStatsEntry {
    pub table_id: u8,
    pub active_count: u32,
    pub lookup_count: u64,
    pub matched_count: u64,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TransmissionCounter {
    pub rx: u64,
    pub tx: u64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PortStatsEntry {
    pub port_no: PseudoPort,
    pub packets: TransmissionCounter,
    pub bytes: TransmissionCounter,
    pub dropped: TransmissionCounter,
    pub errors: TransmissionCounter,
    pub rx_frame_errors: u64,
    pub rx_over_errors: u64,
    pub rx_crc_errors: u64,
    pub collisions: u64,
    /// Not carried on the v1.1 wire.
    pub duration_sec: u32,
    pub duration_nsec: u32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct QueueStatsEntry {
    pub port_no: PseudoPort,
    pub queue_id: u32,
    pub tx_bytes: u64,
    pub tx_packets: u64,
    pub tx_errors: u64,
    /// Not carried on the v1.1 wire.
    pub duration_sec: u32,
    pub duration_nsec: u32,
}

/// Type of body for stats replies.
#[derive(Clone, Debug, PartialEq)]
pub enum StatsReplyBody {
    Desc(DescStats),
    Flow(Vec<FlowStatsEntry>),
    Aggregate {
        packet_count: u64,
        byte_count: u64,
        flow_count: u32,
    },
    Table(Vec<TableStatsEntry>),
    Port(Vec<PortStatsEntry>),
    Queue(Vec<QueueStatsEntry>),
}

#[derive(Clone, Debug, PartialEq)]
pub struct StatsReply {
    pub flags: u16,
    pub body: StatsReplyBody,
}
