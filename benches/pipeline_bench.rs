use criterion::{Criterion, black_box, criterion_group, criterion_main};
use serde_json::{Value, json};

use fapiao::core::*;

fn build_records(n: usize) -> Vec<FinalizedReceiptRecord> {
    let codes = [FormatCode::TRIPLICATE, FormatCode::DUPLICATE, FormatCode::CASH_REGISTER];
    (0..n)
        .map(|i| {
            let total = ((i * 7_919) % 40_000) as i64;
            let (net, tax) = split_tax(total);
            FinalizedReceiptRecord {
                invoice_number: format!("MW{i:08}"),
                format_code: codes[i % codes.len()],
                date: "2025-05-27".into(),
                weekday: WeekdayLabel::NotAvailable,
                time: String::new(),
                seller_vat: "04595257".into(),
                seller: CompanyInfo::new("全聯實業股份有限公司", ""),
                buyer_vat: "N/A".into(),
                buyer: CompanyInfo::not_available(),
                tax_exclusive_amount: net,
                tax_amount: tax,
                total_amount: total,
                source_filename: "bench.pdf".into(),
                failure: None,
            }
        })
        .collect()
}

fn build_reply(n: usize) -> String {
    let receipts: Vec<Value> = (0..n)
        .map(|i| {
            json!({
                "invoice_number": format!("PT{i:08}"),
                "date": "2025-05-27",
                "time": "13:10:00",
                "seller_vat": "84595257",
                "buyer_vat": "N/A",
                "total_amount": (i * 105).to_string(),
            })
        })
        .collect();
    format!("```json\n{}\n```", json!({ "receipts": receipts }))
}

fn bench_tax_id(c: &mut Criterion) {
    c.bench_function("tax_id_is_valid", |b| {
        b.iter(|| black_box(tax_id::is_valid(black_box("04595257"))));
    });
    c.bench_function("tax_id_correct_repairable", |b| {
        b.iter(|| black_box(tax_id::correct(black_box("84595257"))));
    });
    c.bench_function("tax_id_correct_hopeless", |b| {
        b.iter(|| black_box(tax_id::correct(black_box("12845675"))));
    });
}

fn bench_classify(c: &mut Criterion) {
    let tables = PrefixTables::bundled().unwrap();
    c.bench_function("classify", |b| {
        b.iter(|| black_box(tables.classify(black_box("MW25046739"), black_box(2025))));
    });
}

fn bench_parse_reply(c: &mut Criterion) {
    let reply = build_reply(100);
    c.bench_function("parse_reply_100_receipts", |b| {
        b.iter(|| black_box(parse_receipts_reply(black_box(&reply))));
    });
}

fn bench_enrich_batch(c: &mut Criterion) {
    let tables = PrefixTables::bundled().unwrap();
    let values = parse_receipts_reply(&build_reply(100)).unwrap();
    let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
    let enricher = Enricher::new(&tables, &OfflineLookup);

    c.bench_function("enrich_batch_100_offline", |b| {
        b.iter(|| black_box(rt.block_on(enricher.enrich_batch(black_box(&values), "bench.pdf"))));
    });
}

fn bench_aggregate(c: &mut Criterion) {
    let records = build_records(1_000);
    c.bench_function("aggregate_1000_records", |b| {
        b.iter(|| black_box(aggregate(black_box(&records))));
    });
}

criterion_group!(
    benches,
    bench_tax_id,
    bench_classify,
    bench_parse_reply,
    bench_enrich_batch,
    bench_aggregate,
);
criterion_main!(benches);
