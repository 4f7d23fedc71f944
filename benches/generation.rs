use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use wumpus::{
    CaveGenerator, DifficultyOptions, GameDifficulty, Generator, Location, PathFinder,
    SeededRandom,
};

fn bench_generation(c: &mut Criterion) {
    let generator = CaveGenerator::new();
    let mut group = c.benchmark_group("generate");

    for difficulty in [GameDifficulty::Easy, GameDifficulty::Normal, GameDifficulty::Hard] {
        let options = DifficultyOptions::from_difficulty(difficulty);
        group.bench_with_input(
            BenchmarkId::from_parameter(difficulty),
            &options,
            |b, options| {
                let mut seed = 0;
                b.iter(|| {
                    seed += 1;
                    let mut rng = SeededRandom::new(seed);
                    black_box(generator.generate(options, &mut rng))
                });
            },
        );
    }

    group.finish();
}

fn bench_routes(c: &mut Criterion) {
    let mut rng = SeededRandom::new(42);
    let Ok(network) = CaveGenerator::new().generate(&DifficultyOptions::hard(), &mut rng) else {
        return;
    };
    let finder = PathFinder::new(&network);
    let start = network.locations_where(|cavern| cavern.is_cave)[0];

    c.bench_function("route to every cavern", |b| {
        b.iter(|| {
            for end in Location::all() {
                black_box(finder.route(start, end));
            }
        })
    });

    c.bench_function("shortest route to every cavern", |b| {
        b.iter(|| {
            for end in Location::all() {
                black_box(finder.shortest_route(start, end));
            }
        })
    });
}

criterion_group!(benches, bench_generation, bench_routes);
criterion_main!(benches);
