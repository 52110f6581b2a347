//! Party key material: private key generation and authorized profile
//! publishing.
//!
//! Both stages talk to the cryptography tool through the [`KeyTool`] trait;
//! [`OpensslTool`] is the production implementation.
//!
//! The two stages use different error policies:
//!
//! - [`generate_private_keys`] is best-effort. A failure for one party is
//!   logged and recorded in the [`KeygenReport`], and the remaining parties
//!   are still attempted.
//! - [`publish_authorized_profiles`] is fail-fast. Every public key is
//!   extracted first; if any extraction fails the stage returns an error and
//!   no profile is written.

mod error;
mod keygen;
mod profile;
mod tool;

pub use error::{KeyError, PublishError};
pub use keygen::{generate_private_keys, KeygenReport};
pub use profile::{build_profile, collect_public_keys, publish_authorized_profiles, PublicKeys};
pub use tool::{KeyTool, OpensslTool};
