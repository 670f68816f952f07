use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use keyvalues_engine::{MatchField, SearchCursor, SearchOptions, Tree, build_tree_from_str};
use keyvalues_syntax::NullLogger;

/// `sections` blocks of `entries` key/value pairs each, one level deep.
fn generate_document(sections: usize, entries: usize) -> String {
    let mut content = String::from("\"document\"\n{\n");
    for section in 0..sections {
        content.push_str(&format!("\t\"section{section}\"\n\t{{\n"));
        for entry in 0..entries {
            content.push_str(&format!("\t\t\"key{entry}\"\t\"{}\"\n", section * entries + entry));
        }
        content.push_str("\t}\n");
    }
    content.push_str("}\n");
    content
}

fn deep_chain(depth: usize) -> Tree {
    let mut tree = Tree::new();
    let mut parent = tree.root();
    for _ in 0..depth {
        let child = tree.create_node_with("n", None);
        tree.append_child(parent, child);
        parent = child;
    }
    tree
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");
    group.sample_size(10);

    let content = generate_document(200, 20);
    group.bench_function("parse_and_build", |b| {
        b.iter(|| {
            let tree =
                build_tree_from_str("bench", std::hint::black_box(&content), &mut NullLogger);
            std::hint::black_box(tree)
        });
    });

    group.finish();
}

fn bench_delete(c: &mut Criterion) {
    let mut group = c.benchmark_group("delete");
    group.sample_size(10);

    group.bench_function("deep_chain_100k", |b| {
        b.iter_batched(
            || deep_chain(100_000),
            |mut tree| {
                let top = tree.first_child(tree.root());
                if let Some(top) = top {
                    tree.delete_node(top);
                }
                tree
            },
            BatchSize::LargeInput,
        );
    });

    group.finish();
}

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("search");
    group.sample_size(10);

    let content = generate_document(200, 20);
    let Ok(tree) = build_tree_from_str("bench", &content, &mut NullLogger) else {
        return;
    };

    group.bench_function("level_scoped_wildcard", |b| {
        b.iter(|| {
            let mut cursor = SearchCursor::new();
            cursor.set_search(
                &tree,
                "*",
                SearchOptions {
                    level: Some(1),
                    ..SearchOptions::default()
                },
            );
            std::hint::black_box(cursor.find_all())
        });
    });

    group.bench_function("value_anywhere", |b| {
        b.iter(|| {
            let mut cursor = SearchCursor::new();
            cursor.set_search(
                &tree,
                "3999",
                SearchOptions {
                    field: MatchField::Value,
                    ..SearchOptions::default()
                },
            );
            std::hint::black_box(cursor.find_all())
        });
    });

    group.finish();
}

criterion_group!(benches, bench_build, bench_delete, bench_search);
criterion_main!(benches);
