//! Taiwanese business tax ID (統一編號) checksum and OCR repair.
//!
//! A tax ID is 8 ASCII digits. Each digit is multiplied by a fixed weight,
//! the product is folded to the sum of its tens and ones digits, and the
//! folded values are summed. The ID is valid when that sum is a multiple
//! of 10, or when the 7th digit is `7` and the sum plus one is.

/// Per-position weights of the checksum.
pub const TAX_ID_WEIGHTS: [u32; 8] = [1, 2, 1, 2, 1, 2, 4, 1];

/// Characters that OCR commonly reads in place of a slashed `0`.
const ZERO_CONFUSABLES: [u8; 2] = [b'8', b'6'];

/// Compute the folded checksum sum of an 8-digit tax ID.
///
/// Returns `None` unless the input is exactly 8 ASCII digits.
pub fn checksum(id: &str) -> Option<u32> {
    let bytes = id.as_bytes();
    if bytes.len() != 8 || !bytes.iter().all(u8::is_ascii_digit) {
        return None;
    }

    let total = bytes
        .iter()
        .zip(TAX_ID_WEIGHTS)
        .map(|(b, weight)| {
            let product = u32::from(b - b'0') * weight;
            product / 10 + product % 10
        })
        .sum();
    Some(total)
}

/// Check a tax ID against the checksum law.
pub fn is_valid(id: &str) -> bool {
    let Some(total) = checksum(id) else {
        return false;
    };
    if total % 10 == 0 {
        return true;
    }
    // A `7` at index 6 folds to 10, which may also be read as 1.
    id.as_bytes()[6] == b'7' && (total + 1) % 10 == 0
}

/// Best-effort repair of a misread tax ID.
///
/// Valid IDs come back unchanged. Otherwise each `8` or `6`, left to right,
/// is replaced by `0` on its own and the result re-checked; the first valid
/// candidate wins. Positions are never combined. When no single substitution
/// validates, the input is returned as-is.
pub fn correct(id: &str) -> String {
    if is_valid(id) {
        return id.to_string();
    }

    let bytes = id.as_bytes();
    for (i, b) in bytes.iter().enumerate() {
        if !ZERO_CONFUSABLES.contains(b) {
            continue;
        }
        let mut candidate = bytes.to_vec();
        candidate[i] = b'0';
        // Swapping one ASCII byte for another keeps the string valid UTF-8.
        let Ok(candidate) = String::from_utf8(candidate) else {
            continue;
        };
        if is_valid(&candidate) {
            return candidate;
        }
    }

    id.to_string()
}
