use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use eventvision_core::kernels::time_surface::{create_map, create_matrix, Method};
use eventvision_core::Event;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const DURATION: i64 = 1_000_000;

fn make_events(n: usize, w: usize, h: usize, seed: u64) -> Vec<Event> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|i| {
            let t = if n > 1 { (i as i64 * DURATION) / (n as i64 - 1) } else { 0 };
            let x = rng.gen_range(0..w) as u16;
            let y = rng.gen_range(0..h) as u16;
            Event::new(x, y, t, rng.gen_bool(0.5) as u8)
        })
        .collect()
}

pub fn time_surface_bench(c: &mut Criterion) {
    // Sensor sizes: N-MNIST (34x34), ATIS (304x240), Gen4 (1280x720)
    let sizes = [(34usize, 34usize), (304, 240), (1280, 720)];
    let counts = [10_000usize, 100_000];
    let methods = [Method::Additive, Method::Recent];

    let mut group = c.benchmark_group("time_surface");

    for &(w, h) in &sizes {
        for &n in &counts {
            let seed = 0xDEADBEEF ^ ((w as u64) << 32) ^ ((h as u64) << 16) ^ (n as u64);
            let events = make_events(n, w, h, seed);
            group.throughput(Throughput::Elements(n as u64));

            for &method in &methods {
                let id = BenchmarkId::new(format!("matrix/{}x{}-n{}", w, h, n), method);
                group.bench_with_input(id, &events, |b, evs| {
                    b.iter(|| {
                        let out = create_matrix(black_box(evs), method, w, h).expect("valid dims");
                        black_box(out);
                    });
                });

                let id = BenchmarkId::new(format!("map/{}x{}-n{}", w, h, n), method);
                group.bench_with_input(id, &events, |b, evs| {
                    b.iter(|| black_box(create_map(black_box(evs), method)));
                });
            }
        }
    }

    group.finish();
}

criterion_group!(benches, time_surface_bench);
criterion_main!(benches);
