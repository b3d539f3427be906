//! Variable bindings.
//!
//! A VarBind pairs an OID with a value. A list of bindings travels as a
//! SEQUENCE of 2-element SEQUENCEs, in list order. Two paths are provided:
//! the streaming pair [`encode_varbind_list`] / [`decode_varbind_list`] used
//! by the PDU codecs, and the tree pair [`varbinds_to_value`] /
//! [`varbinds_from_value`] for callers that already hold a [`Value`].

use crate::ber::{Decoder, EncodeBuf};
use crate::error::{Error, Result, StructureErrorKind};
use crate::oid::Oid;
use crate::value::Value;

/// One name/value pair of a PDU's binding list.
#[derive(Debug, Clone, PartialEq)]
pub struct VarBind {
    /// Object instance name.
    pub oid: Oid,
    /// Bound value; `Null` in requests that only name objects.
    pub value: Value,
}

impl VarBind {
    /// Create a new VarBind.
    pub fn new(oid: Oid, value: impl Into<Value>) -> Self {
        Self {
            oid,
            value: value.into(),
        }
    }

    /// Binding with a NULL value, as GET and GETNEXT requests carry.
    pub fn null(oid: Oid) -> Self {
        Self {
            oid,
            value: Value::Null,
        }
    }

    /// Encode to BER.
    pub fn encode(&self, buf: &mut EncodeBuf) {
        buf.push_sequence(|buf| {
            self.value.encode(buf);
            buf.push_oid(&self.oid);
        });
    }

    /// Decode from BER.
    ///
    /// The inner SEQUENCE must hold exactly the name and one value.
    pub fn decode(decoder: &mut Decoder) -> Result<Self> {
        let mut seq = decoder.read_sequence()?;
        let oid = seq.read_oid()?;
        let value = Value::decode(&mut seq)?;
        seq.expect_end()?;
        Ok(VarBind { oid, value })
    }

    /// The 2-element SEQUENCE form of this binding.
    pub fn to_value(&self) -> Value {
        Value::Sequence(vec![
            Value::ObjectIdentifier(self.oid.clone()),
            self.value.clone(),
        ])
    }
}

impl From<(Oid, Value)> for VarBind {
    fn from((oid, value): (Oid, Value)) -> Self {
        Self { oid, value }
    }
}

impl std::fmt::Display for VarBind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} = {}", self.oid, self.value)
    }
}

/// Append a VarBindList (SEQUENCE of bindings) to `buf`.
pub fn encode_varbind_list(buf: &mut EncodeBuf, varbinds: &[VarBind]) {
    buf.push_sequence(|buf| {
        for vb in varbinds.iter().rev() {
            vb.encode(buf);
        }
    });
}

/// Read a VarBindList; bindings come back in wire order.
pub fn decode_varbind_list(decoder: &mut Decoder) -> Result<Vec<VarBind>> {
    let mut seq = decoder.read_sequence()?;
    let mut varbinds = Vec::new();

    while !seq.is_empty() {
        varbinds.push(VarBind::decode(&mut seq)?);
    }

    Ok(varbinds)
}

/// Build the SEQUENCE-of-SEQUENCE value for a binding list.
pub fn varbinds_to_value(varbinds: &[VarBind]) -> Value {
    Value::Sequence(varbinds.iter().map(VarBind::to_value).collect())
}

/// Convert a SEQUENCE-of-SEQUENCE value back into a binding list.
///
/// Fails unless `value` is a SEQUENCE whose every child is a 2-element
/// SEQUENCE starting with an OBJECT IDENTIFIER.
///
/// ```
/// use snmp_codec::{Value, oid};
/// use snmp_codec::varbind::{VarBind, varbinds_from_value, varbinds_to_value};
///
/// let list = vec![VarBind::new(oid!(1, 3, 6, 1, 2, 1, 1, 3, 0), Value::TimeTicks(500))];
/// let tree = varbinds_to_value(&list);
/// assert_eq!(varbinds_from_value(&tree).unwrap(), list);
///
/// assert!(varbinds_from_value(&Value::Integer(1)).is_err());
/// ```
pub fn varbinds_from_value(value: &Value) -> Result<Vec<VarBind>> {
    let Value::Sequence(items) = value else {
        return Err(Error::structure(StructureErrorKind::ExpectedSequence {
            actual: value.tag(),
        }));
    };

    items
        .iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::Sequence(pair) => match pair.as_slice() {
                [Value::ObjectIdentifier(oid), bound] => {
                    Ok(VarBind::new(oid.clone(), bound.clone()))
                }
                [name, _] => Err(Error::structure(StructureErrorKind::VarBindName {
                    index,
                    actual: name.tag(),
                })),
                other => Err(Error::structure(StructureErrorKind::VarBindArity {
                    index,
                    count: other.len(),
                })),
            },
            other => Err(Error::structure(StructureErrorKind::ExpectedSequence {
                actual: other.tag(),
            })),
        })
        .collect::<Result<Vec<_>>>()
        .inspect_err(|e| {
            tracing::debug!(target: "snmp_codec::ber", error = %e, "invalid varbind list")
        })
}
