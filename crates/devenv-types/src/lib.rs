//! Shared types for the devenv setup workspace.
//!
//! This crate holds the vocabulary every stage agrees on: party identifiers,
//! the ordered party list, the authorized-profile document, and the on-disk
//! layout of the generated environment. It has no I/O of its own apart from
//! path arithmetic.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

mod layout;
mod profile;

pub use layout::Layout;
pub use profile::{AuthorizedProfile, PeerEntry};

/// Parties used when no party list is configured.
pub const DEFAULT_PARTIES: [&str; 3] = ["alice", "bob", "carol"];

/// Errors produced while validating identifiers and party lists.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypesError {
    /// An identifier was empty after trimming.
    #[error("{kind} must not be empty")]
    EmptyIdentifier { kind: &'static str },

    /// An identifier contains characters that are unsafe in a path component.
    #[error("{kind} {value:?} may only contain ASCII letters, digits, '-' and '_'")]
    InvalidIdentifier { kind: &'static str, value: String },

    /// The party list has no entries.
    #[error("party list must contain at least one party")]
    NoParties,

    /// The same party appears more than once.
    #[error("duplicate party {0:?} in party list")]
    DuplicateParty(String),
}

/// Checks that `value` can be used verbatim as a single path component.
///
/// Both party codes and protocol names end up as directory names, so they
/// share this rule.
pub fn validate_identifier(kind: &'static str, value: &str) -> Result<(), TypesError> {
    if value.is_empty() {
        return Err(TypesError::EmptyIdentifier { kind });
    }
    let valid = value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if !valid {
        return Err(TypesError::InvalidIdentifier {
            kind,
            value: value.to_string(),
        });
    }
    Ok(())
}

/// The code identifying one participant organization.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PartyCode(String);

impl PartyCode {
    /// Validates and wraps a party code.
    pub fn new(code: impl Into<String>) -> Result<Self, TypesError> {
        let code = code.into();
        validate_identifier("party code", &code)?;
        Ok(Self(code))
    }

    /// Returns the code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PartyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for PartyCode {
    type Error = TypesError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PartyCode> for String {
    fn from(code: PartyCode) -> Self {
        code.0
    }
}

/// Ordered, duplicate-free, non-empty list of parties.
///
/// Order is significant: engine services are rendered and peers are listed
/// in this order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartyList(Vec<PartyCode>);

impl PartyList {
    /// Builds a party list from raw codes, rejecting empties and duplicates.
    pub fn new<I, S>(codes: I) -> Result<Self, TypesError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut parties: Vec<PartyCode> = Vec::new();
        for code in codes {
            let party = PartyCode::new(code)?;
            if parties.contains(&party) {
                return Err(TypesError::DuplicateParty(party.0));
            }
            parties.push(party);
        }
        if parties.is_empty() {
            return Err(TypesError::NoParties);
        }
        Ok(Self(parties))
    }

    /// Iterates the parties in configured order.
    pub fn iter(&self) -> std::slice::Iter<'_, PartyCode> {
        self.0.iter()
    }

    /// Number of parties.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Never true for a list built through `new` or `default`.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Every party except `owner`, in list order.
    pub fn peers_of<'a>(&'a self, owner: &'a PartyCode) -> impl Iterator<Item = &'a PartyCode> {
        self.0.iter().filter(move |party| *party != owner)
    }
}

impl Default for PartyList {
    fn default() -> Self {
        Self(
            DEFAULT_PARTIES
                .iter()
                .map(|code| PartyCode(code.to_string()))
                .collect(),
        )
    }
}

impl<'a> IntoIterator for &'a PartyList {
    type Item = &'a PartyCode;
    type IntoIter = std::slice::Iter<'a, PartyCode>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_party_list_is_alice_bob_carol() {
        let parties = PartyList::default();
        let codes: Vec<&str> = parties.iter().map(PartyCode::as_str).collect();
        assert_eq!(codes, vec!["alice", "bob", "carol"]);
    }

    #[test]
    fn party_code_rejects_path_separators() {
        assert!(matches!(
            PartyCode::new("../alice"),
            Err(TypesError::InvalidIdentifier { .. })
        ));
        assert!(matches!(
            PartyCode::new("a/b"),
            Err(TypesError::InvalidIdentifier { .. })
        ));
        assert_eq!(
            PartyCode::new(""),
            Err(TypesError::EmptyIdentifier { kind: "party code" })
        );
    }

    #[test]
    fn party_list_rejects_duplicates_and_empty() {
        assert_eq!(
            PartyList::new(["alice", "bob", "alice"]),
            Err(TypesError::DuplicateParty("alice".to_string()))
        );
        assert_eq!(
            PartyList::new(Vec::<String>::new()),
            Err(TypesError::NoParties)
        );
    }

    #[test]
    fn peers_exclude_owner_and_keep_list_order() {
        let parties = PartyList::new(["carol", "alice", "bob"]).unwrap();
        let owner = PartyCode::new("alice").unwrap();
        let peers: Vec<&str> = parties.peers_of(&owner).map(PartyCode::as_str).collect();
        assert_eq!(peers, vec!["carol", "bob"]);
    }

    #[test]
    fn party_code_deserialization_is_validated() {
        let ok: PartyCode = serde_json::from_str("\"bob\"").unwrap();
        assert_eq!(ok.as_str(), "bob");
        assert!(serde_json::from_str::<PartyCode>("\"b ob\"").is_err());
    }
}
