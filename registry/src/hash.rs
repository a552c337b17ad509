//! # Commitment & Name Hashing
//!
//! Two BLAKE3 hashes hold the whole commit/reveal scheme together:
//!
//! - **Commitment hash** — binds a name to a secret salt. Published at
//!   reservation time, it reserves intent to register without revealing
//!   which name is being reserved.
//! - **Name hash** — the canonical key for a name's ledger record.
//!
//! Both use BLAKE3's `derive_key` mode with distinct context strings, so a
//! commitment can never collide with a name key even for identical input
//! bytes. Don't try to prepend a tag manually — `derive_key` uses a
//! different internal IV per context, making cross-context collisions
//! impossible by construction.

use rand::RngCore;

/// A salted commitment to a name: `blake3(name || salt)` under the
/// commitment context.
pub type CommitmentHash = [u8; 32];

/// The canonical ledger key for a name: `blake3(name)` under the name
/// context.
pub type NameHash = [u8; 32];

/// The secret salt binding a commitment. 32 bytes of entropy — enough
/// that grinding the preimage is not a conversation worth having.
pub type Salt = [u8; 32];

/// Domain tag for commitment hashes.
const COMMITMENT_CONTEXT: &str = "holdfast-registry commitment v1";

/// Domain tag for name ledger keys.
const NAME_CONTEXT: &str = "holdfast-registry name v1";

/// Computes the commitment hash for a `(name, salt)` pair.
///
/// This is what a caller publishes when reserving, and what the registry
/// recomputes at reveal time to check the caller isn't lying. Name and
/// salt are fed to the hasher sequentially — same result as concatenating,
/// without the temporary buffer.
pub fn commitment_hash(name: &str, salt: &Salt) -> CommitmentHash {
    let mut hasher = blake3::Hasher::new_derive_key(COMMITMENT_CONTEXT);
    hasher.update(name.as_bytes());
    hasher.update(salt);
    *hasher.finalize().as_bytes()
}

/// Computes the canonical name hash used as the Name Ledger key.
pub fn name_hash(name: &str) -> NameHash {
    let mut hasher = blake3::Hasher::new_derive_key(NAME_CONTEXT);
    hasher.update(name.as_bytes());
    *hasher.finalize().as_bytes()
}

/// Generates a fresh random salt from the OS entropy source.
///
/// Callers building a commitment should use this rather than inventing
/// their own salt scheme. A guessable salt turns the commitment into a
/// dictionary-attack target and forfeits the front-running protection.
pub fn random_salt() -> Salt {
    let mut salt = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut salt);
    salt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commitment_is_deterministic() {
        let salt = [7u8; 32];
        assert_eq!(commitment_hash("test", &salt), commitment_hash("test", &salt));
    }

    #[test]
    fn commitment_depends_on_salt() {
        assert_ne!(
            commitment_hash("test", &[1u8; 32]),
            commitment_hash("test", &[2u8; 32])
        );
    }

    #[test]
    fn commitment_depends_on_name() {
        let salt = [7u8; 32];
        assert_ne!(commitment_hash("test", &salt), commitment_hash("test2", &salt));
    }

    #[test]
    fn commitment_and_name_domains_are_separated() {
        // Even with an all-zero salt, the commitment of a name must not
        // collide with its ledger key. This is the whole point of the
        // derive_key contexts.
        let salt = [0u8; 32];
        assert_ne!(commitment_hash("test", &salt), name_hash("test"));
    }

    #[test]
    fn name_hash_is_deterministic() {
        assert_eq!(name_hash("alice"), name_hash("alice"));
        assert_ne!(name_hash("alice"), name_hash("Alice"));
    }

    #[test]
    fn random_salts_differ() {
        assert_ne!(random_salt(), random_salt());
    }
}
