// src/rotation/mask.rs

/// Values at or below this many characters are masked completely.
pub const MASK_THRESHOLD: usize = 12;

const VISIBLE_PREFIX: usize = 8;
const VISIBLE_SUFFIX: usize = 4;

/// Redacts a credential for display.
///
/// Short values become a run of `*` of the same length. Longer values keep
/// their first 8 and last 4 characters with everything in between starred out.
/// Lengths are counted in characters so multi-byte input never splits a code point.
pub fn mask_credential(value: &str) -> String {
    let len = value.chars().count();
    if len <= MASK_THRESHOLD {
        return "*".repeat(len);
    }

    let prefix: String = value.chars().take(VISIBLE_PREFIX).collect();
    let suffix: String = value.chars().skip(len - VISIBLE_SUFFIX).collect();
    format!("{prefix}{}{suffix}", "*".repeat(len - MASK_THRESHOLD))
}
