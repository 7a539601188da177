//! Consolidation of small-tax invoices for expense reporting.

use std::collections::BTreeMap;

use super::types::{AggregatedExpenseRow, FinalizedReceiptRecord, FormatCode};

/// Invoices with at least this much input tax are reported individually.
pub const SMALL_TAX_THRESHOLD: i64 = 500;

/// Group finalized records into expense-report rows.
///
/// Per format code, ascending: large-tax invoices pass through in input
/// order, followed by one summary row consolidating all small-tax invoices
/// (if any). The summary takes its descriptive fields from the group's
/// largest invoice by (tax, net amount, invoice number), carries the summed
/// amounts, and is re-coded with [`FormatCode::summary`].
///
/// Failure records are left out.
pub fn aggregate(records: &[FinalizedReceiptRecord]) -> Vec<AggregatedExpenseRow> {
    let mut partitions: BTreeMap<FormatCode, Vec<&FinalizedReceiptRecord>> = BTreeMap::new();
    for record in records.iter().filter(|r| !r.is_failure()) {
        partitions.entry(record.format_code).or_default().push(record);
    }

    let mut rows = Vec::with_capacity(records.len());
    for (_, partition) in partitions {
        let (large, small): (Vec<_>, Vec<_>) = partition
            .into_iter()
            .partition(|r| r.tax_amount >= SMALL_TAX_THRESHOLD);

        rows.extend(large.into_iter().map(|r| AggregatedExpenseRow {
            record: r.clone(),
            aggregated: false,
            count: 0,
        }));

        if let Some(summary) = summarize(small) {
            rows.push(summary);
        }
    }
    rows
}

fn summarize(mut group: Vec<&FinalizedReceiptRecord>) -> Option<AggregatedExpenseRow> {
    group.sort_by(|a, b| {
        (b.tax_amount, b.tax_exclusive_amount, &b.invoice_number).cmp(&(
            a.tax_amount,
            a.tax_exclusive_amount,
            &a.invoice_number,
        ))
    });
    let template = *group.first()?;

    let mut record = template.clone();
    record.tax_exclusive_amount = saturating_sum(group.iter().map(|r| r.tax_exclusive_amount));
    record.tax_amount = saturating_sum(group.iter().map(|r| r.tax_amount));
    record.total_amount = saturating_sum(group.iter().map(|r| r.total_amount));
    record.format_code = template.format_code.summary();

    Some(AggregatedExpenseRow {
        record,
        aggregated: true,
        count: group.len(),
    })
}

/// Extracted totals are unbounded, so sums clamp at the `i64` range.
fn saturating_sum(values: impl Iterator<Item = i64>) -> i64 {
    values.fold(0, i64::saturating_add)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::amounts::split_tax;

    fn rec(invoice: &str, code: u16, total: i64) -> FinalizedReceiptRecord {
        let (net, tax) = split_tax(total);
        let mut r = FinalizedReceiptRecord::failed("a.pdf", "");
        r.invoice_number = invoice.into();
        r.failure = None;
        r.format_code = FormatCode(code);
        r.tax_exclusive_amount = net;
        r.tax_amount = tax;
        r.total_amount = total;
        r
    }

    #[test]
    fn empty_input() {
        assert!(aggregate(&[]).is_empty());
    }

    #[test]
    fn template_is_largest_tax() {
        let rows = aggregate(&[
            rec("AA00000001", 22, 105),
            rec("AA00000002", 22, 2100),
            rec("AA00000003", 22, 420),
        ]);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].record.invoice_number, "AA00000002");
        assert_eq!(rows[0].record.total_amount, 2625);
        assert_eq!(rows[0].record.format_code, FormatCode::DUPLICATE_SUMMARY);
        assert_eq!(rows[0].count, 3);
    }

    #[test]
    fn ties_broken_by_invoice_number_descending() {
        let rows = aggregate(&[rec("AA00000001", 25, 105), rec("AA00000009", 25, 105)]);
        assert_eq!(rows[0].record.invoice_number, "AA00000009");
        assert_eq!(rows[0].record.format_code, FormatCode::CASH_REGISTER);
    }

    #[test]
    fn threshold_is_inclusive_for_large() {
        // 10500 -> 10000 + 500
        let rows = aggregate(&[rec("AA00000001", 21, 10_500)]);
        assert_eq!(rows.len(), 1);
        assert!(!rows[0].aggregated);
        assert_eq!(rows[0].record.tax_amount, 500);
    }

    #[test]
    fn summary_sums_saturate() {
        let rows = aggregate(&[rec("AA00000001", 25, i64::MIN), rec("AA00000002", 25, -5)]);
        assert_eq!(rows[0].record.total_amount, i64::MIN);
        assert_eq!(rows[0].count, 2);
    }

    #[test]
    fn failure_records_are_skipped() {
        let rows = aggregate(&[
            FinalizedReceiptRecord::failed("x.pdf", "boom"),
            rec("AA00000001", 21, 105),
        ]);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].count, 1);
    }
}
