//! OID name table.
//!
//! Maps symbolic object names to OIDs for diagnostics. This is not MIB
//! support: the table is whatever a MIB compiler (or the caller) registers,
//! plus a small preloaded set of common names. Nothing in the codec consults it.

use std::collections::{BTreeMap, HashMap};

use crate::error::{Error, OidErrorKind, Result};
use crate::oid::Oid;

/// Well-known OID entries.
const WELL_KNOWN_OIDS: &[(&[u32], &str)] = &[
    // SNMPv2-MIB::system
    (&[1, 3, 6, 1, 2, 1, 1], "system"),
    (&[1, 3, 6, 1, 2, 1, 1, 1], "sysDescr"),
    (&[1, 3, 6, 1, 2, 1, 1, 2], "sysObjectID"),
    (&[1, 3, 6, 1, 2, 1, 1, 3], "sysUpTime"),
    (&[1, 3, 6, 1, 2, 1, 1, 4], "sysContact"),
    (&[1, 3, 6, 1, 2, 1, 1, 5], "sysName"),
    (&[1, 3, 6, 1, 2, 1, 1, 6], "sysLocation"),
    (&[1, 3, 6, 1, 2, 1, 1, 7], "sysServices"),
    // IF-MIB::interfaces
    (&[1, 3, 6, 1, 2, 1, 2], "interfaces"),
    (&[1, 3, 6, 1, 2, 1, 2, 1], "ifNumber"),
    (&[1, 3, 6, 1, 2, 1, 2, 2], "ifTable"),
    (&[1, 3, 6, 1, 2, 1, 2, 2, 1], "ifEntry"),
    (&[1, 3, 6, 1, 2, 1, 2, 2, 1, 1], "ifIndex"),
    (&[1, 3, 6, 1, 2, 1, 2, 2, 1, 2], "ifDescr"),
    (&[1, 3, 6, 1, 2, 1, 2, 2, 1, 8], "ifOperStatus"),
    // SNMPv2-MIB::snmpTrapOID and snmpTraps
    (&[1, 3, 6, 1, 6, 3, 1, 1, 4, 1], "snmpTrapOID"),
    (&[1, 3, 6, 1, 6, 3, 1, 1, 5], "snmpTraps"),
    (&[1, 3, 6, 1, 6, 3, 1, 1, 5, 1], "coldStart"),
    (&[1, 3, 6, 1, 6, 3, 1, 1, 5, 2], "warmStart"),
    (&[1, 3, 6, 1, 6, 3, 1, 1, 5, 3], "linkDown"),
    (&[1, 3, 6, 1, 6, 3, 1, 1, 5, 4], "linkUp"),
    (&[1, 3, 6, 1, 6, 3, 1, 1, 5, 5], "authenticationFailure"),
    (&[1, 3, 6, 1, 6, 3, 1, 1, 5, 6], "egpNeighborLoss"),
];

const _: () = {
    let mut i = 0;
    while i < WELL_KNOWN_OIDS.len() {
        assert!(Oid::__is_valid_literal(WELL_KNOWN_OIDS[i].0));
        i += 1;
    }
};

/// Bidirectional name/OID table.
///
/// ```
/// use snmp_codec::names::OidNames;
/// use snmp_codec::oid;
///
/// let names = OidNames::well_known();
/// assert_eq!(names.format(&oid!(1, 3, 6, 1, 2, 1, 1, 3, 0)), "sysUpTime.0");
/// assert_eq!(names.resolve("ifDescr.3").unwrap(), oid!(1, 3, 6, 1, 2, 1, 2, 2, 1, 2, 3));
/// ```
#[derive(Debug, Clone, Default)]
pub struct OidNames {
    by_oid: BTreeMap<Vec<u32>, String>,
    by_name: HashMap<String, Oid>,
}

impl OidNames {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a table preloaded with common SNMPv2-MIB and IF-MIB names.
    pub fn well_known() -> Self {
        let mut names = Self::new();
        for (arcs, name) in WELL_KNOWN_OIDS {
            names.insert(*name, Oid::__from_literal(arcs));
        }
        names
    }

    /// Register `name` for `oid`, replacing any previous entry for either.
    pub fn insert(&mut self, name: impl Into<String>, oid: Oid) {
        let name = name.into();
        if let Some(old) = self.by_name.insert(name.clone(), oid.clone()) {
            self.by_oid.remove(old.arcs());
        }
        if let Some(old) = self.by_oid.insert(oid.arcs().to_vec(), name.clone()) {
            if old != name {
                self.by_name.remove(&old);
            }
        }
    }

    /// Number of registered names.
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    /// Returns `true` if no names are registered.
    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    /// Get the OID registered for an exact name.
    pub fn get(&self, name: &str) -> Option<&Oid> {
        self.by_name.get(name)
    }

    /// Parse an OID from dotted notation or `name[.suffix]` form.
    ///
    /// Accepts:
    /// - Dotted notation: "1.3.6.1.2.1.1.1.0"
    /// - Registered names, optionally followed by numeric arcs: "sysDescr.0", "ifTable"
    pub fn resolve(&self, s: &str) -> Result<Oid> {
        let trimmed = s.strip_prefix('.').unwrap_or(s);
        if trimmed.chars().next().is_some_and(|c| c.is_ascii_digit()) {
            return Oid::parse(s);
        }

        let (name, suffix) = match trimmed.split_once('.') {
            Some((name, suffix)) => (name, Some(suffix)),
            None => (trimmed, None),
        };
        let Some(base) = self.by_name.get(name) else {
            return Err(Error::invalid_oid_with_input(OidErrorKind::UnknownName, s));
        };

        let Some(suffix) = suffix else {
            return Ok(base.clone());
        };
        let mut arcs = base.arcs().to_vec();
        for part in suffix.split('.') {
            let arc: u32 = part
                .parse()
                .map_err(|_| Error::invalid_oid_with_input(OidErrorKind::InvalidArc, s))?;
            arcs.push(arc);
        }
        Oid::new(arcs).map_err(|err| match err {
            Error::InvalidOid { kind, .. } => Error::invalid_oid_with_input(kind, s),
            other => other,
        })
    }

    /// Find the longest registered prefix of `oid`.
    ///
    /// Returns the prefix name and the arcs that follow it.
    pub fn lookup<'a>(&self, oid: &'a Oid) -> Option<(&str, &'a [u32])> {
        let arcs = oid.arcs();
        (1..=arcs.len()).rev().find_map(|n| {
            self.by_oid
                .get(&arcs[..n])
                .map(|name| (name.as_str(), &arcs[n..]))
        })
    }

    /// Render `oid` as `name.suffix`, falling back to dotted notation.
    pub fn format(&self, oid: &Oid) -> String {
        match self.lookup(oid) {
            Some((name, suffix)) => {
                let mut out = name.to_string();
                for arc in suffix {
                    out.push('.');
                    out.push_str(&arc.to_string());
                }
                out
            }
            None => oid.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oid;

    #[test]
    fn test_lookup_exact() {
        let names = OidNames::well_known();
        let oid = oid!(1, 3, 6, 1, 2, 1, 1, 1);
        assert_eq!(names.lookup(&oid), Some(("sysDescr", &[][..])));
    }

    #[test]
    fn test_lookup_longest_prefix() {
        let names = OidNames::well_known();
        let oid = oid!(1, 3, 6, 1, 2, 1, 2, 2, 1, 8, 12);
        assert_eq!(names.lookup(&oid), Some(("ifOperStatus", &[12u32][..])));
        assert_eq!(names.format(&oid), "ifOperStatus.12");
    }

    #[test]
    fn test_lookup_not_found() {
        let names = OidNames::well_known();
        let oid = oid!(1, 3, 6, 1, 99, 99, 99);
        assert_eq!(names.lookup(&oid), None);
        assert_eq!(names.format(&oid), "1.3.6.1.99.99.99");
    }

    #[test]
    fn test_resolve_dotted() {
        let names = OidNames::new();
        let oid = names.resolve("1.3.6.1.2.1.1.1.0").unwrap();
        assert_eq!(oid.arcs(), &[1, 3, 6, 1, 2, 1, 1, 1, 0]);
    }

    #[test]
    fn test_resolve_names() {
        let names = OidNames::well_known();
        assert_eq!(
            names.resolve("sysDescr.0").unwrap(),
            oid!(1, 3, 6, 1, 2, 1, 1, 1, 0)
        );
        assert_eq!(names.resolve("system").unwrap(), oid!(1, 3, 6, 1, 2, 1, 1));
    }

    #[test]
    fn test_resolve_errors() {
        let names = OidNames::well_known();
        assert!(matches!(
            names.resolve("unknownOid").unwrap_err(),
            Error::InvalidOid {
                kind: OidErrorKind::UnknownName,
                ..
            }
        ));
        assert!(matches!(
            names.resolve("sysDescr.x").unwrap_err(),
            Error::InvalidOid {
                kind: OidErrorKind::InvalidArc,
                ..
            }
        ));
    }

    #[test]
    fn test_resolve_suffix_past_arc_limit() {
        let mut names = OidNames::new();
        let deep = Oid::new((0..127).map(|i| i % 40)).unwrap();
        names.insert("deep", deep);
        assert_eq!(names.resolve("deep.5").unwrap().len(), 128);

        let err = names.resolve("deep.5.6").unwrap_err();
        assert!(matches!(
            &err,
            Error::InvalidOid {
                kind: OidErrorKind::TooManyArcs { count: 129, max: 128 },
                input: Some(input),
            } if &**input == "deep.5.6"
        ));
    }

    #[test]
    fn test_insert_replaces() {
        let mut names = OidNames::new();
        names.insert("acme", oid!(1, 3, 6, 1, 4, 1, 1234));
        names.insert("acme", oid!(1, 3, 6, 1, 4, 1, 5678));
        assert_eq!(names.len(), 1);
        assert_eq!(names.lookup(&oid!(1, 3, 6, 1, 4, 1, 1234)), None);
        assert_eq!(names.format(&oid!(1, 3, 6, 1, 4, 1, 5678, 1)), "acme.1");

        names.insert("widget", oid!(1, 3, 6, 1, 4, 1, 5678));
        assert!(names.get("acme").is_none());
        assert_eq!(names.len(), 1);
    }

    #[test]
    fn test_trap_names() {
        let names = OidNames::well_known();
        assert_eq!(names.format(&oid!(1, 3, 6, 1, 6, 3, 1, 1, 5, 3)), "linkDown");
    }
}
