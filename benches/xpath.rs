use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use syncdom::{xpath, DomArena, DomNode, NodeId, NodeType};

/// Deep, wide-ish document: `depth` nested divs, each with `fanout`
/// same-tag siblings forcing positional predicates on every level.
fn build_tree(depth: usize, fanout: usize) -> (DomArena, NodeId) {
    let mut arena = DomArena::new();
    let root = arena.add_node(DomNode::new(NodeType::Document, "#document".to_string()));
    arena.set_root(root).unwrap();

    let mut parent = root;
    let mut leaf = root;
    for _ in 0..depth {
        for i in 0..fanout {
            let node = DomNode::new(NodeType::Element, "DIV".to_string());
            let id = arena.add_child(parent, node).unwrap();
            if i == 0 {
                leaf = id;
            }
        }
        parent = leaf;
    }
    (arena, leaf)
}

fn bench_xpath(c: &mut Criterion) {
    let (arena, leaf) = build_tree(50, 4);

    c.bench_function("xpath_depth50", |b| {
        b.iter(|| xpath(black_box(&arena), black_box(leaf), false).unwrap())
    });

    let mut id_arena = DomArena::new();
    let root = id_arena.add_node(DomNode::new(NodeType::Document, "#document".to_string()));
    id_arena.set_root(root).unwrap();
    let mut node = DomNode::new(NodeType::Element, "DIV".to_string());
    node.attributes
        .insert("id".to_string(), "target".to_string());
    let target = id_arena.add_child(root, node).unwrap();

    c.bench_function("xpath_id_shortcut", |b| {
        b.iter(|| xpath(black_box(&id_arena), black_box(target), true).unwrap())
    });
}

criterion_group!(benches, bench_xpath);
criterion_main!(benches);
