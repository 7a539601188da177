#![cfg(feature = "core")]

use fapiao::core::tax_id::{TAX_ID_WEIGHTS, checksum, correct, is_valid};
use proptest::prelude::*;

/// Reference implementation of the checksum law, written out longhand.
fn reference_valid(id: &str) -> bool {
    if id.len() != 8 || !id.chars().all(|c| c.is_ascii_digit()) {
        return false;
    }
    let digits: Vec<u32> = id.chars().map(|c| c.to_digit(10).unwrap()).collect();
    let mut total = 0;
    for i in 0..8 {
        let p = digits[i] * TAX_ID_WEIGHTS[i];
        total += p / 10 + p % 10;
    }
    total % 10 == 0 || (digits[6] == 7 && (total + 1) % 10 == 0)
}

// ---------------------------------------------------------------------------
// Known registrations
// ---------------------------------------------------------------------------

#[test]
fn known_valid_ids() {
    for id in ["04595257", "84881627", "49280041", "12345675", "10458574"] {
        assert!(is_valid(id), "{id} should be valid");
    }
}

#[test]
fn known_invalid_ids() {
    for id in ["12345678", "12345677", "68488162", "00000009"] {
        assert!(!is_valid(id), "{id} should be invalid");
    }
}

#[test]
fn weights_are_fixed() {
    assert_eq!(TAX_ID_WEIGHTS, [1, 2, 1, 2, 1, 2, 4, 1]);
}

#[test]
fn seventh_digit_special_case_only_with_seven() {
    // 12345675 sums to 39 and only passes through the index-6 rule.
    assert_eq!(checksum("12345675"), Some(39));
    assert!(is_valid("12345675"));
    // Same sum with a different digit at index 6 must fail.
    assert_eq!(checksum("12345627"), Some(39));
    assert!(!is_valid("12345627"));
}

// ---------------------------------------------------------------------------
// Correction
// ---------------------------------------------------------------------------

#[test]
fn correction_tries_one_position_at_a_time() {
    // 88595257 needs index 1 replaced; index 0 alone does not validate.
    assert_eq!(correct("88595257"), "80595257");
}

#[test]
fn correction_leaves_non_ids_alone() {
    for s in ["N/A", "", "ABCDEFGH", "8686", "868686868"] {
        assert_eq!(correct(s), s);
    }
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn is_valid_matches_reference(id in "[0-9]{8}") {
        prop_assert_eq!(is_valid(&id), reference_valid(&id));
    }

    #[test]
    fn correct_preserves_length(id in "[0-9]{6,10}") {
        prop_assert_eq!(correct(&id).len(), id.len());
    }

    #[test]
    fn correct_is_identity_on_valid(head in "[0-9]{7}") {
        // The last weight is 1, so a check digit always exists.
        let partial = checksum(&format!("{head}0")).unwrap();
        let id = format!("{head}{}", (10 - partial % 10) % 10);
        prop_assert!(is_valid(&id));
        prop_assert_eq!(correct(&id), id);
    }

    #[test]
    fn correct_changes_at_most_one_char(id in "[0-9]{8}") {
        let fixed = correct(&id);
        let diffs: Vec<(char, char)> = id
            .chars()
            .zip(fixed.chars())
            .filter(|(a, b)| a != b)
            .collect();
        prop_assert!(diffs.len() <= 1);
        if let Some(&(from, to)) = diffs.first() {
            prop_assert!(from == '8' || from == '6');
            prop_assert_eq!(to, '0');
            prop_assert!(is_valid(&fixed));
        }
    }

    #[test]
    fn correct_unchanged_when_no_single_fix(id in "[0-9]{8}") {
        let any_fix = id.char_indices().any(|(i, c)| {
            (c == '8' || c == '6') && {
                let mut cand = id.clone();
                cand.replace_range(i..=i, "0");
                is_valid(&cand)
            }
        });
        prop_assume!(!is_valid(&id) && !any_fix);
        prop_assert_eq!(correct(&id), id);
    }
}
