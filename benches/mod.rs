//! Benchmarks for option-income.
//!
//! - **pricing_bench**: Premium derivation and row pricing
//! - **presentation_bench**: Table building and formatting


use criterion::{criterion_group, criterion_main};

// Pricing benchmarks
criterion_group!(
    pricing_benches,
    pricing_bench::premium_derivation,
    pricing_bench::price_rows_scaling,
);

// Presentation benchmarks
criterion_group!(
    presentation_benches,
    presentation_bench::formatting,
    presentation_bench::table_building,
);

criterion_main!(pricing_benches, presentation_benches);
