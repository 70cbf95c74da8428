//! Structural identifier codec for grid cell addressing.
//!
//! Teacher and student-group display names are arbitrary strings; cell
//! addresses derived from them must be unique per distinct name and safe
//! to embed directly as structural identifiers. A reversible encoding
//! (rather than a hash) guarantees injectivity for any alphabet, and
//! stripping the padding removes the one character of the base64 output
//! that is unsafe to embed verbatim.

use base64::engine::general_purpose::STANDARD_NO_PAD;
use base64::Engine as _;

/// Encode a display name into a deterministic, collision-free cell key.
pub fn cell_key(name: &str) -> String {
    STANDARD_NO_PAD.encode(name.as_bytes())
}
