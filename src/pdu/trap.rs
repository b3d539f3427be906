//! SNMPv1 Trap PDU (RFC 1157 Section 4.1.6).

use std::sync::OnceLock;

use super::{PduType, SnmpPdu, decode_checked, encode_pdu};
use crate::ber::{Decoder, EncodeBuf, tag};
use crate::error::Result;
use crate::oid::Oid;
use crate::value::Value;
use crate::varbind::{VarBind, decode_varbind_list, encode_varbind_list};
use crate::version::Version;
use bytes::Bytes;

/// SNMPv1 generic trap types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum GenericTrap {
    /// coldStart(0) - agent is reinitializing, config may change
    ColdStart = 0,
    /// warmStart(1) - agent is reinitializing, config unchanged
    WarmStart = 1,
    /// linkDown(2) - communication link failure
    LinkDown = 2,
    /// linkUp(3) - communication link came up
    LinkUp = 3,
    /// authenticationFailure(4) - improperly authenticated message received
    AuthenticationFailure = 4,
    /// egpNeighborLoss(5) - EGP peer marked down
    EgpNeighborLoss = 5,
    /// enterpriseSpecific(6) - vendor-specific trap, see specific_trap field
    EnterpriseSpecific = 6,
}

impl GenericTrap {
    /// Create from integer value; codes outside 0..=6 have no name.
    pub fn from_i32(v: i32) -> Option<Self> {
        match v {
            0 => Some(Self::ColdStart),
            1 => Some(Self::WarmStart),
            2 => Some(Self::LinkDown),
            3 => Some(Self::LinkUp),
            4 => Some(Self::AuthenticationFailure),
            5 => Some(Self::EgpNeighborLoss),
            6 => Some(Self::EnterpriseSpecific),
            _ => None,
        }
    }

    /// Get the integer value.
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl From<GenericTrap> for i32 {
    fn from(trap: GenericTrap) -> Self {
        trap.as_i32()
    }
}

impl std::fmt::Display for GenericTrap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::ColdStart => "coldStart",
            Self::WarmStart => "warmStart",
            Self::LinkDown => "linkDown",
            Self::LinkUp => "linkUp",
            Self::AuthenticationFailure => "authenticationFailure",
            Self::EgpNeighborLoss => "egpNeighborLoss",
            Self::EnterpriseSpecific => "enterpriseSpecific",
        };
        f.write_str(name)
    }
}

/// SNMPv1 Trap PDU.
///
/// Its layout has no request-id or error fields:
///
/// ```text
/// Trap-PDU ::= [4] IMPLICIT SEQUENCE {
///     enterprise        OBJECT IDENTIFIER,
///     agent-addr        NetworkAddress,      -- IpAddress, tag 0x40
///     generic-trap      INTEGER,
///     specific-trap     INTEGER,
///     time-stamp        TimeTicks,           -- tag 0x43
///     variable-bindings VarBindList
/// }
/// ```
#[derive(Clone)]
pub struct TrapV1Pdu {
    enterprise: Oid,
    agent_addr: [u8; 4],
    generic_trap: i32,
    specific_trap: i32,
    time_stamp: u32,
    varbinds: Vec<VarBind>,
    encoded: OnceLock<Bytes>,
}

impl TrapV1Pdu {
    /// Create a new SNMPv1 Trap PDU.
    ///
    /// `generic_trap` takes a [`GenericTrap`] or a raw code.
    ///
    /// ```
    /// use snmp_codec::pdu::{GenericTrap, TrapV1Pdu};
    /// use snmp_codec::{Value, VarBind, oid};
    /// use std::net::Ipv4Addr;
    ///
    /// let trap = TrapV1Pdu::new(
    ///     oid!(1, 3, 6, 1, 4, 1, 1234),
    ///     Ipv4Addr::new(192, 0, 2, 1).octets(),
    ///     GenericTrap::LinkDown,
    ///     7,
    ///     500,
    ///     vec![VarBind::new(oid!(1, 3, 6, 1, 2, 1, 1, 3, 0), Value::Integer(42))],
    /// );
    /// assert_eq!(trap.generic_trap(), Some(GenericTrap::LinkDown));
    /// assert_eq!(trap.v2_trap_oid().unwrap(), oid!(1, 3, 6, 1, 6, 3, 1, 1, 5, 3));
    /// ```
    pub fn new(
        enterprise: Oid,
        agent_addr: impl Into<[u8; 4]>,
        generic_trap: impl Into<i32>,
        specific_trap: i32,
        time_stamp: u32,
        varbinds: Vec<VarBind>,
    ) -> Self {
        Self {
            enterprise,
            agent_addr: agent_addr.into(),
            generic_trap: generic_trap.into(),
            specific_trap,
            time_stamp,
            varbinds,
            encoded: OnceLock::new(),
        }
    }

    /// Enterprise OID (sysObjectID of the entity generating the trap).
    pub fn enterprise(&self) -> &Oid {
        &self.enterprise
    }

    /// Address of the agent generating the trap.
    pub fn agent_addr(&self) -> [u8; 4] {
        self.agent_addr
    }

    /// Generic trap type, `None` for codes outside the standard range.
    pub fn generic_trap(&self) -> Option<GenericTrap> {
        GenericTrap::from_i32(self.generic_trap)
    }

    /// Generic trap code as carried on the wire.
    pub fn generic_trap_raw(&self) -> i32 {
        self.generic_trap
    }

    /// Specific trap code (meaningful when the generic type is enterpriseSpecific).
    pub fn specific_trap(&self) -> i32 {
        self.specific_trap
    }

    /// Hundredths of a second since the agent (re)initialized.
    pub fn time_stamp(&self) -> u32 {
        self.time_stamp
    }

    /// Variable bindings.
    pub fn varbinds(&self) -> &[VarBind] {
        &self.varbinds
    }

    /// Always [`PduType::TrapV1`].
    pub fn pdu_type(&self) -> PduType {
        PduType::TrapV1
    }

    /// Check if this is an enterprise-specific trap.
    pub fn is_enterprise_specific(&self) -> bool {
        self.generic_trap == GenericTrap::EnterpriseSpecific.as_i32()
    }

    /// Translate to the SNMPv2 snmpTrapOID.0 value (RFC 3584 Section 3).
    ///
    /// - Generic traps 0-5 map to `snmpTraps.{generic + 1}` (1.3.6.1.6.3.1.1.5.x).
    /// - enterpriseSpecific (and any unrecognized code) maps to
    ///   `enterprise.0.specific`, which fails when the enterprise OID is
    ///   empty or already within two arcs of [`MAX_OID_LEN`](crate::oid::MAX_OID_LEN).
    pub fn v2_trap_oid(&self) -> Result<Oid> {
        match self.generic_trap() {
            Some(generic) if generic != GenericTrap::EnterpriseSpecific => {
                crate::oid!(1, 3, 6, 1, 6, 3, 1, 1, 5).child(generic.as_i32() as u32 + 1)
            }
            _ => self.enterprise.child(0)?.child(self.specific_trap as u32),
        }
    }

    /// Decode the fields of a trap PDU whose tag and length have been read.
    pub fn decode_body(decoder: &mut Decoder, length: usize) -> Result<Self> {
        decode_checked(decoder, length, |body| {
            let enterprise = body.read_oid()?;
            let agent_addr = body.read_ip_address()?;
            let generic_trap = body.read_integer()?;
            let specific_trap = body.read_integer()?;
            let time_stamp = body.read_unsigned32(tag::application::TIMETICKS)?;
            let varbinds = decode_varbind_list(body)?;
            Ok(Self::new(
                enterprise,
                agent_addr,
                generic_trap,
                specific_trap,
                time_stamp,
                varbinds,
            ))
        })
    }

    /// The full TLV encoding, computed once per instance.
    pub fn to_bytes(&self) -> Bytes {
        self.encoded
            .get_or_init(|| {
                encode_pdu(tag::pdu::TRAP_V1, |buf| {
                    encode_varbind_list(buf, &self.varbinds);
                    buf.push_unsigned32(tag::application::TIMETICKS, self.time_stamp);
                    buf.push_integer(self.specific_trap);
                    buf.push_integer(self.generic_trap);
                    buf.push_ip_address(self.agent_addr);
                    buf.push_oid(&self.enterprise);
                })
            })
            .clone()
    }

    /// Encode to BER.
    pub fn encode(&self, buf: &mut EncodeBuf) {
        buf.push_bytes(&self.to_bytes());
    }

    /// Wrap in a message envelope value (see [`crate::message::pack`]).
    pub fn to_message_body(&self, version: Version, community: impl Into<Bytes>) -> Value {
        crate::message::pack(version, community, SnmpPdu::TrapV1(self.clone()))
    }
}

impl PartialEq for TrapV1Pdu {
    fn eq(&self, other: &Self) -> bool {
        self.enterprise == other.enterprise
            && self.agent_addr == other.agent_addr
            && self.generic_trap == other.generic_trap
            && self.specific_trap == other.specific_trap
            && self.time_stamp == other.time_stamp
            && self.varbinds == other.varbinds
    }
}

impl std::fmt::Debug for TrapV1Pdu {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrapV1Pdu")
            .field("enterprise", &self.enterprise)
            .field("agent_addr", &self.agent_addr)
            .field("generic_trap", &self.generic_trap)
            .field("specific_trap", &self.specific_trap)
            .field("time_stamp", &self.time_stamp)
            .field("varbinds", &self.varbinds)
            .finish_non_exhaustive()
    }
}

/// Summary order: agent address, time stamp, enterprise, generic, specific,
/// varbind count.
impl std::fmt::Display for TrapV1Pdu {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "TrapV1 agent-addr={} time-stamp={} enterprise={} generic-trap=",
            std::net::Ipv4Addr::from(self.agent_addr),
            self.time_stamp,
            self.enterprise
        )?;
        match self.generic_trap() {
            Some(generic) => write!(f, "{}", generic)?,
            None => write!(f, "{}", self.generic_trap)?,
        }
        write!(
            f,
            " specific-trap={} varbinds={}",
            self.specific_trap,
            self.varbinds.len()
        )
    }
}
