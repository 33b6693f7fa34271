use criterion::{black_box, criterion_group, criterion_main, Criterion};

use pathwise_core::parser::GraphDocument;
use pathwise_core::{LearningComponent, SkillType, Subject};
use pathwise_graph::{
    build_progression, map_skill_to_components, GraphLoader, GraphSource, GraphStore,
    DEFAULT_MAX_DEPTH,
};

/// `layers` layers of `width` components; each component depends on every
/// component in the layer below.
fn dense_graph(layers: usize, width: usize) -> GraphStore {
    let mut components = Vec::with_capacity(layers * width);
    for layer in 0..layers {
        for i in 0..width {
            let prerequisites = if layer == 0 {
                vec![]
            } else {
                (0..width).map(|j| format!("n{}-{}", layer - 1, j)).collect()
            };
            components.push(LearningComponent {
                id: format!("n{layer}-{i}"),
                label: format!("Skill {layer} {i}"),
                description: format!("Synthetic skill in layer {layer}"),
                subject: Subject::Math,
                grades: vec![(layer % 6).to_string()],
                domain: "Synthetic".into(),
                cluster: format!("Layer {layer}"),
                skill_type: SkillType::Procedural,
                prerequisites,
                standards: vec![],
            });
        }
    }
    GraphLoader::new(GraphSource::Documents(vec![GraphDocument {
        id: "bench".into(),
        name: "Bench".into(),
        description: String::new(),
        components,
        relationships: vec![],
    }]))
    .load_new()
    .expect("synthetic graph loads")
}

fn bench_progression(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_progression");

    let store = dense_graph(12, 10);
    group.bench_function("dense 12x10 middle", |b| {
        b.iter(|| build_progression(black_box(&store), black_box("n6-5"), DEFAULT_MAX_DEPTH))
    });

    let builtin = GraphLoader::builtin().load_new().expect("builtin graph loads");
    group.bench_function("builtin", |b| {
        b.iter(|| {
            build_progression(
                black_box(&builtin),
                black_box("math.oa.multiplication-facts"),
                DEFAULT_MAX_DEPTH,
            )
        })
    });

    group.finish();
}

fn bench_mapping(c: &mut Criterion) {
    let builtin = GraphLoader::builtin().load_new().expect("builtin graph loads");
    c.bench_function("map_skill_to_components", |b| {
        b.iter(|| {
            map_skill_to_components(
                black_box(&builtin),
                black_box("compare fractions using a number line"),
                Some("3"),
            )
        })
    });
}

criterion_group!(benches, bench_progression, bench_mapping);
criterion_main!(benches);
