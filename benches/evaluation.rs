//! Expression parsing and evaluation benchmarks
//!
//! Measures evaluation over generated trees of varying:
//! - Width (children per node)
//! - Parent resolution (back-references vs. search from the root)
//!
//! Run benchmarks: `cargo bench --bench evaluation`

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;
use treepath::{FunctionRegistry, Node, NodeRef, ParentIndex, PathExpression, evaluate};

/// A three-level tree with `width` sections of `width` items each.
fn generate_tree(width: usize) -> Node {
    Node::new("root").with_children((0..width).map(|i| {
        Node::new("section")
            .with_attribute("id", i.to_string())
            .with_children((0..width).map(|j| {
                Node::terminal("item", if j % 2 == 0 { "even" } else { "odd" })
            }))
    }))
}

fn node_count(width: usize) -> u64 {
    (1 + width + width * width) as u64
}

fn bench_parsing(c: &mut Criterion) {
    let expressions = [
        ("simple", "/section/item"),
        ("predicates", "//section[@id='3']/item[@value='odd'][2]"),
        ("nested", "//item[/preceding-sibling::item[?terminal]] | /section[last]"),
    ];

    let mut group = c.benchmark_group("parsing");
    for (label, text) in expressions {
        group.bench_with_input(BenchmarkId::from_parameter(label), text, |b, text| {
            b.iter(|| black_box(text).parse::<PathExpression>())
        });
    }
    group.finish();
}

fn bench_descendants(c: &mut Criterion) {
    let expression: PathExpression = "//item[@value='odd']".parse().expect("valid expression");

    let mut group = c.benchmark_group("descendants");
    for width in [10, 50, 100] {
        let tree = generate_tree(width);
        group.throughput(Throughput::Elements(node_count(width)));
        group.bench_with_input(BenchmarkId::from_parameter(width), &tree, |b, tree| {
            let registry = FunctionRegistry::new();
            b.iter(|| evaluate(NodeRef::new(tree), &expression, &registry))
        });
    }
    group.finish();
}

fn bench_parent_resolution(c: &mut Criterion) {
    let expression: PathExpression = "//item[?terminal][1]/../following-sibling::*"
        .parse()
        .expect("valid expression");
    let tree = generate_tree(50);
    let index = ParentIndex::build(&tree);

    let mut group = c.benchmark_group("parent_resolution");
    group.throughput(Throughput::Elements(node_count(50)));
    group.bench_function("indexed", |b| {
        let registry = FunctionRegistry::with_builtins();
        b.iter(|| evaluate(index.root(), &expression, &registry))
    });
    group.bench_function("search", |b| {
        let registry = FunctionRegistry::with_builtins();
        b.iter(|| evaluate(NodeRef::new(&tree), &expression, &registry))
    });
    group.finish();
}

criterion_group!(benches, bench_parsing, bench_descendants, bench_parent_resolution);
criterion_main!(benches);
