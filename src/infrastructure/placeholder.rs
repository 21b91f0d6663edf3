// src/infrastructure/placeholder.rs
//
// Fallback poster supplier. When a poster URL fails to load, every render
// site substitutes the same deterministic placeholder for a given title.

use sha2::{Digest, Sha256};

const PLACEHOLDER_BASE: &str = "https://picsum.photos/seed";

/// Deterministic placeholder image URL keyed by the movie's title.
///
/// The title is hashed so arbitrary text (spaces, unicode, slashes) can
/// never produce an invalid URL; same title, same placeholder.
pub fn placeholder_poster_url(title: &str, width: u32, height: u32) -> String {
    let digest = Sha256::digest(title.as_bytes());
    let seed: String = digest[..8].iter().map(|b| format!("{:02x}", b)).collect();
    format!("{}/{}/{}/{}", PLACEHOLDER_BASE, seed, width, height)
}
