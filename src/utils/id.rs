//! Opaque id generation for paragraphs
//!
//! Paragraph ids only need to be unique within one document for the
//! lifetime of an editing session (they key DOM nodes on the JS side),
//! so a short random base36 token is sufficient.

use std::sync::atomic::{AtomicU64, Ordering};

const ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const ID_LEN: usize = 9;

// Fallback source when the platform RNG is unavailable; uniqueness
// within one session is all that is required.
static FALLBACK_COUNTER: AtomicU64 = AtomicU64::new(0x5eed);

/// Generate a short random base36 token (e.g. "k3j9x0q2p")
pub fn short_id() -> String {
    let mut bytes = [0u8; 8];
    if getrandom::getrandom(&mut bytes).is_err() {
        let n = FALLBACK_COUNTER.fetch_add(0x9e3779b97f4a7c15, Ordering::Relaxed);
        bytes = n.to_le_bytes();
    }

    let mut value = u64::from_le_bytes(bytes);
    let mut out = String::with_capacity(ID_LEN);
    for _ in 0..ID_LEN {
        out.push(ALPHABET[(value % 36) as usize] as char);
        value /= 36;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn ids_have_expected_shape() {
        let id = short_id();
        assert_eq!(id.len(), ID_LEN);
        assert!(id.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
    }

    #[test]
    fn ids_do_not_collide_across_a_document() {
        let ids: HashSet<String> = (0..1000).map(|_| short_id()).collect();
        assert_eq!(ids.len(), 1000, "1000 generated ids should all differ");
    }
}
