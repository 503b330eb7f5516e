use crate::tree_node::TreeNode;

/// A [`TreeNode`] with its position in the tree as returned by [`flatten`].
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Flattened<'tree> {
    /// Zero based depth. Depth 0 is the root.
    pub depth: usize,
    /// Index of the parent inside the flattened list. `None` for the root.
    pub parent: Option<usize>,
    pub node: &'tree TreeNode,
}

impl Flattened<'_> {
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.node.is_leaf()
    }
}

/// All nodes of the tree in depth-first pre-order.
///
/// Parents always come before their children and siblings keep their left to right order.
#[must_use]
pub fn flatten(root: &TreeNode) -> Vec<Flattened<'_>> {
    let mut result = Vec::new();
    let mut stack = vec![(root, 0, None)];
    while let Some((node, depth, parent)) = stack.pop() {
        let index = result.len();
        result.push(Flattened {
            depth,
            parent,
            node,
        });
        stack.extend(
            node.children
                .iter()
                .rev()
                .map(|child| (child, depth + 1, Some(index))),
        );
    }
    result
}

#[test]
fn depth_works() {
    let tree = TreeNode::example();
    let depths = flatten(&tree)
        .into_iter()
        .map(|flattened| flattened.depth)
        .collect::<Vec<_>>();
    assert_eq!(depths, [0, 1, 2, 3, 2, 3, 1, 2, 3]);
}

#[test]
fn pre_order_works() {
    let tree = TreeNode::example();
    let labels = flatten(&tree)
        .into_iter()
        .map(|flattened| flattened.node.label())
        .collect::<Vec<_>>();
    assert_eq!(
        labels,
        ["S", "NP", "DT", "The", "NN", "cat", "VP", "VBZ", "sits"]
    );
}

#[test]
fn parents_work() {
    let tree = TreeNode::example();
    let parents = flatten(&tree)
        .into_iter()
        .map(|flattened| flattened.parent)
        .collect::<Vec<_>>();
    assert_eq!(
        parents,
        [
            None,
            Some(0),
            Some(1),
            Some(2),
            Some(1),
            Some(4),
            Some(0),
            Some(6),
            Some(7)
        ]
    );
}

#[test]
fn single_node_is_root_only() {
    let tree = TreeNode::new_leaf("X");
    let flattened = flatten(&tree);
    assert_eq!(flattened.len(), 1);
    assert_eq!(flattened[0].depth, 0);
    assert_eq!(flattened[0].parent, None);
    assert!(flattened[0].is_leaf());
}
