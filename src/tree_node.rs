use std::fmt;

/// One constituent of a parsed constituency tree.
///
/// Can have zero or more `children`.
///
/// A node without children is a leaf (a terminal token like `cat`),
/// a node with children is a constituent (like `NP`).
/// The `label` itself carries no type information: leafness is purely structural.
///
/// Every node owns its children, there are no references back to the parent.
/// Once built the tree is not modified anymore, a new analysis result replaces it as a whole.
///
/// # Example
///
/// ```
/// # use tui_constituency_tree::TreeNode;
/// let word = TreeNode::new_leaf("cat");
/// let noun = TreeNode::new("NN", vec![word]);
/// assert!(noun.child(0).is_some_and(TreeNode::is_leaf));
/// assert_eq!(noun.to_string(), "(NN cat)");
/// ```
#[derive(Debug, Clone)]
pub struct TreeNode {
    pub(super) label: String,
    pub(super) children: Vec<TreeNode>,
}

impl TreeNode {
    /// Create a new `TreeNode` without children.
    #[must_use]
    pub fn new_leaf<L>(label: L) -> Self
    where
        L: Into<String>,
    {
        Self {
            label: label.into(),
            children: Vec::new(),
        }
    }

    /// Create a new `TreeNode` with children.
    #[must_use]
    pub fn new<L>(label: L, children: Vec<Self>) -> Self
    where
        L: Into<String>,
    {
        Self {
            label: label.into(),
            children,
        }
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub fn children(&self) -> &[Self] {
        &self.children
    }

    /// Get a reference to a child by index.
    #[must_use]
    pub fn child(&self, index: usize) -> Option<&Self> {
        self.children.get(index)
    }

    /// Follow the child indices from this node downwards.
    ///
    /// An empty path is the node itself.
    #[must_use]
    pub fn get(&self, path: &[usize]) -> Option<&Self> {
        let mut current = self;
        for index in path {
            current = current.child(*index)?;
        }
        Some(current)
    }

    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Amount of nodes in this subtree including itself.
    #[must_use]
    pub fn node_count(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend(&node.children);
        }
        count
    }

    /// Amount of levels of this subtree. A single leaf has one level.
    #[must_use]
    pub fn levels(&self) -> usize {
        let mut levels = 0;
        let mut stack = vec![(self, 1)];
        while let Some((node, depth)) = stack.pop() {
            levels = levels.max(depth);
            stack.extend(node.children.iter().map(|child| (child, depth + 1)));
        }
        levels
    }

    /// Labels of all leaves from left to right.
    ///
    /// For a sentence parse these are the words of the sentence.
    #[must_use]
    pub fn leaves(&self) -> Vec<&str> {
        let mut result = Vec::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            if node.is_leaf() {
                result.push(node.label.as_str());
            } else {
                stack.extend(node.children.iter().rev());
            }
        }
        result
    }

    #[cfg(test)]
    #[must_use]
    pub(crate) fn example() -> Self {
        Self::new(
            "S",
            vec![
                Self::new(
                    "NP",
                    vec![
                        Self::new("DT", vec![Self::new_leaf("The")]),
                        Self::new("NN", vec![Self::new_leaf("cat")]),
                    ],
                ),
                Self::new("VP", vec![Self::new("VBZ", vec![Self::new_leaf("sits")])]),
            ],
        )
    }
}

/// Trees are walked with an explicit stack, deeply nested input must not exhaust the call stack.
impl Drop for TreeNode {
    fn drop(&mut self) {
        let mut stack = std::mem::take(&mut self.children);
        while let Some(mut node) = stack.pop() {
            stack.append(&mut node.children);
        }
    }
}

impl PartialEq for TreeNode {
    fn eq(&self, other: &Self) -> bool {
        let mut stack = vec![(self, other)];
        while let Some((left, right)) = stack.pop() {
            if left.label != right.label || left.children.len() != right.children.len() {
                return false;
            }
            stack.extend(left.children.iter().zip(&right.children));
        }
        true
    }
}

impl Eq for TreeNode {}

enum Step<'tree> {
    Node(&'tree TreeNode),
    Close,
}

/// Bracketed notation like `(S (NP (DT The) (NN cat)) (VP (VBZ sits)))`.
///
/// The root is always wrapped in parentheses so the output can be parsed again.
/// Leaves below the root are written as bare tokens.
impl fmt::Display for TreeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}", self.label)?;
        let mut stack = vec![Step::Close];
        stack.extend(self.children.iter().rev().map(Step::Node));
        while let Some(step) = stack.pop() {
            match step {
                Step::Close => f.write_str(")")?,
                Step::Node(node) if node.is_leaf() => write!(f, " {}", node.label)?,
                Step::Node(node) => {
                    write!(f, " ({}", node.label)?;
                    stack.push(Step::Close);
                    stack.extend(node.children.iter().rev().map(Step::Node));
                }
            }
        }
        Ok(())
    }
}

#[test]
fn example_is_shaped_like_a_sentence() {
    let tree = TreeNode::example();
    assert_eq!(tree.node_count(), 9);
    assert_eq!(tree.levels(), 4);
    assert_eq!(tree.leaves(), ["The", "cat", "sits"]);
}

#[test]
fn get_follows_path() {
    let tree = TreeNode::example();
    assert_eq!(tree.get(&[]).map(TreeNode::label), Some("S"));
    assert_eq!(tree.get(&[0, 1, 0]).map(TreeNode::label), Some("cat"));
    assert_eq!(tree.get(&[1, 0]).map(TreeNode::label), Some("VBZ"));
    assert_eq!(tree.get(&[2]), None);
    assert_eq!(tree.get(&[0, 0, 0, 0]), None);
}

#[test]
fn display_writes_bracketed_notation() {
    assert_eq!(
        TreeNode::example().to_string(),
        "(S (NP (DT The) (NN cat)) (VP (VBZ sits)))"
    );
}

#[test]
fn display_single_node_is_wrapped() {
    assert_eq!(TreeNode::new_leaf("X").to_string(), "(X)");
}

#[test]
fn equality_compares_structure() {
    let tree = TreeNode::example();
    assert_eq!(tree, tree.clone());
    assert_ne!(tree, TreeNode::new("S", vec![]));
    assert_ne!(
        TreeNode::new("A", vec![TreeNode::new_leaf("b")]),
        TreeNode::new("A", vec![TreeNode::new_leaf("c")])
    );
}

#[cfg(test)]
fn chain(depth: usize) -> TreeNode {
    let mut node = TreeNode::new_leaf("x");
    for _ in 0..depth {
        node = TreeNode::new("A", vec![node]);
    }
    node
}

#[test]
fn deep_chain_is_walked_without_recursion() {
    let depth = 100_000;
    let tree = chain(depth);
    assert_eq!(tree.node_count(), depth + 1);
    assert_eq!(tree.levels(), depth + 1);
    assert_eq!(tree.leaves(), ["x"]);
    let text = tree.to_string();
    assert!(text.starts_with("(A (A (A "));
    assert!(text.ends_with(" x)))"));
    assert!(tree == chain(depth));
}
