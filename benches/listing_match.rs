//! Benchmarks for scraped-source matching
//!
//! Tests performance of checklist parsing, promo scoring and face selection.

use cardforged::mtgpics::faces::pick_code;
use cardforged::mtgpics::listing::parse_rows;
use cardforged::mtgpics::resolver::{best_candidate, score_promo_rows, select_listed};
use cardforged_common::FaceSide;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

const ROW_STYLE: &str = "display:block;margin:0px 2px 0px 2px;border-top:1px #cccccc dotted;";

fn checklist(rows: usize) -> String {
    let body: String = (1..=rows)
        .map(|i| {
            format!(
                r#"<div style="{ROW_STYLE}"><table><tr><td>{i:03}</td><td></td>
                <td><a href="card?ref=pmo{i:03}">Card {i} Promo Printing {}</a></td>
                <td></td><td></td><td></td><td>Artist {}</td></tr></table></div>"#,
                i % 7,
                i % 13
            )
        })
        .collect();
    format!("<html><body>{body}</body></html>")
}

fn bench_parse_rows(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_rows");
    for rows in [50usize, 300, 1000] {
        let html = checklist(rows);
        group.throughput(Throughput::Elements(rows as u64));
        group.bench_with_input(BenchmarkId::from_parameter(rows), &html, |b, html| {
            b.iter(|| parse_rows(black_box(html)))
        });
    }
    group.finish();
}

fn bench_matching(c: &mut Criterion) {
    let rows = parse_rows(&checklist(1000));
    let mut group = c.benchmark_group("matching");

    group.bench_function("select_listed", |b| {
        b.iter(|| select_listed(black_box(&rows), "999", "Card 999"))
    });
    group.bench_function("promo_scoring", |b| {
        b.iter(|| {
            let candidates = score_promo_rows(black_box(&rows), "Card 1", "Artist 1", "Promo Printing 1");
            best_candidate(&candidates).map(|c| c.code.clone())
        })
    });
    group.finish();
}

fn bench_pick_code(c: &mut Criterion) {
    let codes: Vec<String> = ["050b", "050", "101", "050a", "x", "102c"]
        .iter()
        .map(|s| s.to_string())
        .collect();

    c.bench_function("pick_code_back", |b| {
        b.iter(|| pick_code(black_box(&codes), FaceSide::Back))
    });
}

criterion_group!(benches, bench_parse_rows, bench_matching, bench_pick_code);
criterion_main!(benches);
