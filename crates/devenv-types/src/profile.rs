//! Authorized profile document exchanged between parties.

use serde::{Deserialize, Serialize};

/// One peer's identity inside an authorized profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeerEntry {
    /// The peer's party code.
    pub party_code: String,
    /// The peer's public key, base64 of its DER encoding.
    pub public_key: String,
}

/// The peers a party trusts, written to `authorized_profile.json`.
///
/// Never contains an entry for the party that owns the file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorizedProfile {
    pub parties: Vec<PeerEntry>,
}

impl AuthorizedProfile {
    /// Serializes with four-space indentation and no trailing newline.
    ///
    /// Non-ASCII characters are written as-is rather than escaped.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut ser)?;
        // serde_json only ever emits valid UTF-8.
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pretty_json_uses_four_space_indent() {
        let profile = AuthorizedProfile {
            parties: vec![PeerEntry {
                party_code: "bob".to_string(),
                public_key: "MCowBQYDK2VwAyEA".to_string(),
            }],
        };
        let json = profile.to_json_pretty().unwrap();
        let expected = "{\n    \"parties\": [\n        {\n            \"party_code\": \"bob\",\n            \"public_key\": \"MCowBQYDK2VwAyEA\"\n        }\n    ]\n}";
        assert_eq!(json, expected);
    }

    #[test]
    fn empty_profile_still_has_parties_key() {
        let json = AuthorizedProfile::default().to_json_pretty().unwrap();
        assert_eq!(json, "{\n    \"parties\": []\n}");
    }
}
