use crate::model::property::{AssociationKind, PropertyKind};
use serde::{Deserialize, Serialize};
use std::fmt;

///
/// PathHop
/// One association traversal: a property on `entity` leading to `target`.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct PathHop {
    /// Entity owning the association property.
    pub entity: String,
    /// Association property name (camelCase).
    pub property: String,
    /// Target entity of the association.
    pub target: String,
    /// Relationship shape of the hop.
    pub kind: AssociationKind,
}

///
/// TerminalRole
///
/// How the terminal property participates in query semantics. Identity and
/// version terminals short-circuit into `IdEquals`/`VersionEquals`;
/// foreign-key terminals are associations referenced by their key.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum TerminalRole {
    Plain,
    Identity,
    Version,
    ForeignKey,
}

///
/// PathTerminal
/// The resolved end of a property path.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct PathTerminal {
    /// Entity owning the terminal property.
    pub entity: String,
    /// Terminal property name (camelCase).
    pub name: String,
    /// Runtime type shape of the terminal.
    pub kind: PropertyKind,
    /// Query role of the terminal.
    pub role: TerminalRole,
}

///
/// PropertyPath
///
/// An ordered sequence of association hops followed by a terminal property.
/// Invariant (enforced by the resolver): every hop is an association-typed
/// property of the previous entity; the terminal is a non-association
/// property, a foreign-key reference, or an identity/version pseudo-role.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct PropertyPath {
    hops: Vec<PathHop>,
    terminal: PathTerminal,
    dotted: String,
}

impl PropertyPath {
    #[must_use]
    pub fn new(hops: Vec<PathHop>, terminal: PathTerminal) -> Self {
        let mut dotted = String::new();
        for hop in &hops {
            dotted.push_str(&hop.property);
            dotted.push('.');
        }
        dotted.push_str(&terminal.name);

        Self {
            hops,
            terminal,
            dotted,
        }
    }

    #[must_use]
    pub fn hops(&self) -> &[PathHop] {
        &self.hops
    }

    #[must_use]
    pub const fn terminal(&self) -> &PathTerminal {
        &self.terminal
    }

    /// Dotted string form, e.g. `author.name`.
    #[must_use]
    pub fn dotted(&self) -> &str {
        &self.dotted
    }

    #[must_use]
    pub const fn is_identity(&self) -> bool {
        matches!(self.terminal.role, TerminalRole::Identity)
    }

    #[must_use]
    pub const fn is_version(&self) -> bool {
        matches!(self.terminal.role, TerminalRole::Version)
    }

    /// Whether any hop crosses a to-many association. Such paths must be
    /// scoped as a sub-query rather than flattened into plain joins.
    #[must_use]
    pub fn crosses_to_many(&self) -> bool {
        self.hops.iter().any(|hop| hop.kind.is_to_many())
    }

    /// Dotted prefix up to and including the last to-many hop, if any.
    #[must_use]
    pub fn to_many_prefix(&self) -> Option<String> {
        let last = self
            .hops
            .iter()
            .rposition(|hop| hop.kind.is_to_many())?;

        let prefix = self.hops[..=last]
            .iter()
            .map(|hop| hop.property.as_str())
            .collect::<Vec<_>>()
            .join(".");

        Some(prefix)
    }

    /// Join-relevant hops with their dotted prefixes: non-embedded, to-one
    /// hops that occur before any to-many crossing. Embedded hops never
    /// surface as joins; to-many hops are handled by association scoping.
    #[must_use]
    pub fn join_hops(&self) -> Vec<(String, &PathHop)> {
        let mut out = Vec::new();
        let mut prefix = String::new();

        for hop in &self.hops {
            if !prefix.is_empty() {
                prefix.push('.');
            }
            prefix.push_str(&hop.property);

            if hop.kind.is_to_many() {
                break;
            }
            if hop.kind.is_embedded() {
                continue;
            }
            out.push((prefix.clone(), hop));
        }

        out
    }
}

impl fmt::Display for PropertyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.dotted)
    }
}

///
/// TESTS
///
