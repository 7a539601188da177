//! Fixed 5% VAT split of tax-inclusive totals.

/// Split a tax-inclusive total into `(tax_exclusive, tax)` at 5% VAT.
///
/// The net amount is `round(total / 1.05)`, computed exactly as
/// `(20 * total + 10) / 21`; the tax is the remainder. Non-positive totals
/// yield `(0, 0)`.
///
/// `total / 1.05` has a denominator of 21 and can never land on a half, so
/// rounding direction for ties does not arise.
pub fn split_tax(total: i64) -> (i64, i64) {
    if total <= 0 {
        return (0, 0);
    }
    let total = i128::from(total);
    let net = (total * 20 + 10) / 21;
    let tax = total - net;
    // Both fit back into i64: 0 < net <= total.
    (net as i64, tax as i64)
}
