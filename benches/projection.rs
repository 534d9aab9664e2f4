use chrono::{TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use schema_sampler::domain::{Field, FieldId, FieldPatch, FieldTree, FieldType, Projector};

/// `width` nested fields per level, `depth` levels, one leaf of each kind at the bottom
fn build_tree(width: usize, depth: usize) -> FieldTree {
    fn level(prefix: &str, width: usize, depth: usize) -> Vec<Field> {
        if depth == 0 {
            return FieldType::ALL
                .iter()
                .filter(|t| !t.is_nested())
                .enumerate()
                .map(|(i, t)| {
                    Field::named(format!("leaf_{}", i), *t).with_id(format!("{}_{}", prefix, i))
                })
                .collect();
        }
        (0..width)
            .map(|i| {
                let id = format!("{}_{}", prefix, i);
                Field::named(format!("node_{}", i), FieldType::Nested)
                    .with_children(level(&id, width, depth - 1))
                    .with_id(id)
            })
            .collect()
    }
    FieldTree::from(level("f", width, depth))
}

fn benchmark_projection(c: &mut Criterion) {
    let projector = Projector::default();
    let now = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();
    let mut group = c.benchmark_group("projection");

    for (width, depth) in [(4, 2), (4, 4), (8, 3)] {
        let tree = build_tree(width, depth);
        let label = format!("{}x{}", width, depth);
        group.bench_with_input(BenchmarkId::from_parameter(label), &tree, |b, tree| {
            b.iter(|| projector.project_at(black_box(tree), now));
        });
    }

    group.finish();
}

fn benchmark_tree_edits(c: &mut Criterion) {
    let tree = build_tree(4, 4);
    let deep = FieldId::from("f_3_3_3_3_8");
    let patch = FieldPatch::new().name("renamed");

    c.bench_function("update_deep_leaf", |b| {
        b.iter(|| tree.update(black_box(&deep), &patch));
    });

    c.bench_function("insert_root", |b| {
        b.iter(|| tree.insert(Field::named("extra", FieldType::String).with_id("extra"), None));
    });

    c.bench_function("delete_subtree", |b| {
        b.iter(|| tree.delete(black_box(&FieldId::from("f_2"))));
    });
}

criterion_group!(benches, benchmark_projection, benchmark_tree_edits);
criterion_main!(benches);
