//! Benchmarks for eventvision-core live under `benches/`.
