use criterion::{Criterion, criterion_group, criterion_main};
use metro_core::directory::{Directory, Line, Station};
use metro_core::graph::NetworkGraph;
use metro_nav::itinerary::instructions;
use metro_nav::paths::shortest_path;
use std::hint::black_box;

/// Build a grid network: `size` east-west lines crossed by `size` north-south lines.
fn build_grid(size: usize) -> Directory {
    let name = |row: usize, col: usize| format!("S{row}_{col}");

    let mut stations = Vec::with_capacity(size * size);
    for row in 0..size {
        for col in 0..size {
            stations.push(Station::new(
                format!("{row}-{col}"),
                name(row, col),
                [format!("EW{row}"), format!("NS{col}")],
            ));
        }
    }

    let mut lines = Vec::with_capacity(size * 2);
    for row in 0..size {
        lines.push(Line::new(
            format!("ew-{row}"),
            format!("EW{row}"),
            (0..size).map(|col| name(row, col)),
        ));
    }
    for col in 0..size {
        lines.push(Line::new(
            format!("ns-{col}"),
            format!("NS{col}"),
            (0..size).map(|row| name(row, col)),
        ));
    }

    Directory::new(stations, lines).expect("grid names are unique")
}

fn bench_build_graph(c: &mut Criterion) {
    let directory = build_grid(30);

    c.bench_function("build_graph_30x30", |b| {
        b.iter(|| NetworkGraph::build(black_box(&directory)))
    });
}

fn bench_shortest_path_small(c: &mut Criterion) {
    let graph = NetworkGraph::build(&build_grid(8));

    c.bench_function("shortest_path_8x8_corner_to_corner", |b| {
        b.iter(|| shortest_path(black_box(&graph), black_box("S0_0"), black_box("S7_7")))
    });
}

fn bench_shortest_path_large(c: &mut Criterion) {
    let graph = NetworkGraph::build(&build_grid(30));

    c.bench_function("shortest_path_30x30_corner_to_corner", |b| {
        b.iter(|| shortest_path(black_box(&graph), black_box("S0_0"), black_box("S29_29")))
    });
}

fn bench_instructions(c: &mut Criterion) {
    let directory = build_grid(30);
    let graph = NetworkGraph::build(&directory);
    let path = shortest_path(&graph, "S0_0", "S29_29").expect("grid is connected");

    c.bench_function("instructions_30x30_diagonal", |b| {
        b.iter(|| instructions(black_box(&path), black_box(&directory)))
    });
}

criterion_group!(
    benches,
    bench_build_graph,
    bench_shortest_path_small,
    bench_shortest_path_large,
    bench_instructions,
);
criterion_main!(benches);
