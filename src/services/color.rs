//! Deterministic subject color assignment.
//!
//! Each lesson card is tinted by its subject. The mapping is a pure
//! function of the subject name (a stable digest into a fixed palette),
//! so the same subject gets the same color in every render pass and
//! across sessions, with no dependence on first-seen insertion order.

use sha2::{Digest, Sha256};

/// Fixed pastel palette, readable as card backgrounds under dark text.
const PALETTE: [&str; 12] = [
    "#fefce8", "#fee2e2", "#dcfce7", "#dbeafe", "#fae8ff", "#ffedd5",
    "#e0f2fe", "#f1f5f9", "#fef9c3", "#fce7f3", "#d1fae5", "#ede9fe",
];

/// Pick the palette color for a subject name.
pub fn pick_color(subject_name: &str) -> &'static str {
    let digest = Sha256::digest(subject_name.as_bytes());
    let mut index = [0u8; 8];
    index.copy_from_slice(&digest[..8]);
    PALETTE[(u64::from_be_bytes(index) % PALETTE.len() as u64) as usize]
}
