use criterion::{black_box, criterion_group, criterion_main, Criterion};
use paris_subway_map::geometry::Projection;
use paris_subway_map::map::base_map::{self, BaseMap};
use paris_subway_map::map::canvas::{Canvas, Scene};
use paris_subway_map::models::{MetroLine, SegmentKey, Station, StationAttributes, StationId, SubwayNetwork};
use paris_subway_map::settings::MapStyle;

/// A grid of stations where every row and column is served by two lines,
/// so most pairs need parallel offsets.
fn grid_network(size: u32) -> SubwayNetwork {
    let mut network = SubwayNetwork::new();
    let id = |row: u32, col: u32| StationId::new(format!("V{}", row * size + col));

    for row in 0..size {
        for col in 0..size {
            network.add_or_get_station(Station::new(
                id(row, col),
                StationAttributes {
                    name: format!("Station {row}-{col}"),
                    code: row * size + col,
                    lat: 48.80 + f64::from(row) * 0.005,
                    lon: 2.25 + f64::from(col) * 0.007,
                },
            ));
        }
    }

    let lines = MetroLine::ALL;
    for row in 0..size {
        for col in 0..size {
            let line_index = ((row + col) as usize) % (lines.len() - 1);
            for line in &lines[line_index..=line_index + 1] {
                if col + 1 < size {
                    let _ = network.add_segment(SegmentKey::new(id(row, col), id(row, col + 1), *line));
                }
                if row + 1 < size {
                    let _ = network.add_segment(SegmentKey::new(id(row, col), id(row + 1, col), *line));
                }
            }
        }
    }
    network
}

fn benchmark_base_map(c: &mut Criterion) {
    let style = MapStyle::default();
    let mut network = grid_network(20);
    let extents = network.extents().expect("grid has stations");
    let projection = Projection::fit_width(extents, 1200.0).expect("grid is not degenerate");
    network.project(&projection).expect("projection succeeds");

    // Layout only: offsets, labels and river
    c.bench_function("plan_base_map", |b| {
        b.iter(|| base_map::plan(black_box(&network), black_box(&projection), black_box(&style)));
    });

    let plan = base_map::plan(&network, &projection, &style).expect("plan succeeds");
    let mut scene = Scene::new(1200.0, 800.0);
    BaseMap::draw(&mut scene, plan);

    // Hit testing runs on every click
    c.bench_function("elements_at", |b| {
        b.iter(|| scene.elements_at(black_box((600.0, 400.0))));
    });
}

criterion_group!(benches, benchmark_base_map);
criterion_main!(benches);
