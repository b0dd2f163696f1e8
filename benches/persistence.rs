use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use glam::DVec2;

use coverage_grid::{CellType, GridMap};

fn bench_save_load(c: &mut Criterion) {
    let mut map = GridMap::new(1024, 1024, 0.05, DVec2::ZERO, CellType::Cuttable).unwrap();
    for i in 0..1024 {
        map.set_cell(i, i, CellType::NonTraversable).unwrap();
    }
    map.set_name("bench_map");

    c.bench_function("save_1024", |b| {
        b.iter_batched(
            || tempfile::tempdir().expect("tempdir"),
            |dir| {
                black_box(map.save(dir.path()).expect("save should succeed"));
            },
            BatchSize::SmallInput,
        );
    });

    let dir = tempfile::tempdir().expect("tempdir");
    let saved = map.save(dir.path()).expect("save should succeed");
    c.bench_function("open_1024", |b| {
        b.iter(|| black_box(GridMap::open(&saved).expect("open should succeed")));
    });
}

criterion_group!(benches, bench_save_load);
criterion_main!(benches);
