//! Authorized profile publishing.
//!
//! Unlike key generation this stage is all-or-nothing for extraction: every
//! public key is collected before the first profile is written, and any
//! extraction failure aborts the stage.

use crate::error::PublishError;
use crate::tool::KeyTool;
use base64::Engine;
use devenv_types::{AuthorizedProfile, Layout, PartyCode, PartyList, PeerEntry};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::path::PathBuf;

/// Base64 (standard alphabet, padded) DER public key per party.
pub type PublicKeys = HashMap<PartyCode, String>;

/// Extracts and encodes every party's public key.
///
/// # Errors
///
/// Returns [`PublishError::Extract`] for the first party whose key cannot be
/// extracted.
pub fn collect_public_keys(
    tool: &dyn KeyTool,
    layout: &Layout,
    parties: &PartyList,
) -> Result<PublicKeys, PublishError> {
    let mut keys = PublicKeys::with_capacity(parties.len());
    for party in parties {
        let der = tool
            .public_key_der(&layout.private_key_file(party))
            .map_err(|source| PublishError::Extract {
                party: party.clone(),
                source,
            })?;
        tracing::info!(
            %party,
            fingerprint = %hex::encode(Sha256::digest(&der)),
            "extracted public key"
        );
        keys.insert(
            party.clone(),
            base64::engine::general_purpose::STANDARD.encode(&der),
        );
    }
    Ok(keys)
}

/// Builds `owner`'s profile: every other party, in party-list order.
///
/// Peers without an entry in `keys` are skipped.
pub fn build_profile(owner: &PartyCode, parties: &PartyList, keys: &PublicKeys) -> AuthorizedProfile {
    let peers = parties
        .peers_of(owner)
        .filter_map(|peer| {
            keys.get(peer).map(|public_key| PeerEntry {
                party_code: peer.to_string(),
                public_key: public_key.clone(),
            })
        })
        .collect();
    AuthorizedProfile { parties: peers }
}

/// Writes `engine/<party>/conf/authorized_profile.json` for every party.
///
/// Returns the written paths in party order. Existing profiles are replaced.
///
/// # Errors
///
/// Extraction failures abort before any profile is written. Serialization or
/// write failures abort at that party, leaving earlier profiles in place.
pub fn publish_authorized_profiles(
    tool: &dyn KeyTool,
    layout: &Layout,
    parties: &PartyList,
) -> Result<Vec<PathBuf>, PublishError> {
    let keys = collect_public_keys(tool, layout, parties)?;

    let mut written = Vec::with_capacity(parties.len());
    for party in parties {
        let profile = build_profile(party, parties, &keys);
        let json = profile.to_json_pretty()?;

        let dir = layout.party_conf_dir(party);
        std::fs::create_dir_all(&dir).map_err(|source| PublishError::Write {
            path: dir.clone(),
            source,
        })?;
        let path = layout.authorized_profile_file(party);
        std::fs::write(&path, json).map_err(|source| PublishError::Write {
            path: path.clone(),
            source,
        })?;
        tracing::info!(%party, peers = profile.parties.len(), path = %path.display(), "wrote authorized profile");
        written.push(path);
    }
    Ok(written)
}
