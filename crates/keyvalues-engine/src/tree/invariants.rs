use crate::tree::Tree;

/// Validates the structural invariants of a tree.
///
/// Asserts that:
/// - The root is live and heads the top-level chain
/// - `prev`/`next` links mirror each other and stay within one parent
/// - A parent's first child is the head of its children's chain
/// - Walking the tree from the root terminates
///
/// # Panics
/// Panics with a descriptive message if any invariant is violated.
pub fn check(tree: &Tree) {
    let root = tree.root;
    let root_node = tree
        .nodes
        .get(root)
        .unwrap_or_else(|| panic!("root {root:?} is not a live node"));
    assert!(root_node.parent.is_none(), "root {root:?} has a parent");
    assert!(root_node.prev.is_none(), "root {root:?} is not the chain head");

    for (id, node) in &tree.nodes {
        if let Some(prev) = node.prev {
            let prev_node = &tree.nodes[prev];
            assert_eq!(prev_node.next, Some(id), "{prev:?}.next does not point back to {id:?}");
            assert_eq!(prev_node.parent, node.parent, "{prev:?} and {id:?} have different parents");
        }
        if let Some(next) = node.next {
            let next_node = &tree.nodes[next];
            assert_eq!(next_node.prev, Some(id), "{next:?}.prev does not point back to {id:?}");
            assert_eq!(next_node.parent, node.parent, "{next:?} and {id:?} have different parents");
        }
        if let Some(child) = node.first_child {
            let child_node = &tree.nodes[child];
            assert_eq!(child_node.parent, Some(id), "first child {child:?} of {id:?} has another parent");
            assert!(child_node.prev.is_none(), "first child {child:?} of {id:?} is not a chain head");
        }
        if let Some(parent) = node.parent
            && node.prev.is_none()
        {
            assert_eq!(
                tree.nodes[parent].first_child,
                Some(id),
                "{id:?} heads a chain but is not the first child of {parent:?}"
            );
        }
    }

    let visited = tree.traverse().take(tree.len() + 1).count();
    assert!(visited <= tree.len(), "traversal from the root does not terminate");
}
