use unicode_width::UnicodeWidthStr;

use crate::flatten::flatten;
use crate::tree_node::TreeNode;

/// Default amount of columns between two sibling subtrees.
pub const DEFAULT_SPACING: usize = 2;

/// Whether a [`LabelBox`] is drawn as a leaf or as a constituent.
///
/// Only depends on the structure, never on the label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// A node without children, usually a word of the sentence.
    Leaf,
    /// A node with children like `NP` or `VBZ`.
    Constituent,
}

/// The position of one node label.
///
/// Columns are relative to the left edge of the layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelBox<'tree> {
    pub label: &'tree str,
    pub kind: NodeKind,
    pub depth: usize,
    /// First column of the label.
    pub x: usize,
    /// Display width of the label.
    pub width: usize,
}

impl LabelBox<'_> {
    /// Row of the label inside the layout.
    #[must_use]
    pub const fn row(&self) -> usize {
        self.depth * 2
    }
}

/// Lines from a parent to its children.
///
/// Drawn on the row between the parent and its children.
/// One child results in a single vertical line.
/// Multiple children share a horizontal bus which the parent joins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connector {
    /// Depth of the parent.
    pub depth: usize,
    /// Column below the parent label.
    pub parent: usize,
    /// Column above each child label from left to right.
    pub children: Vec<usize>,
}

impl Connector {
    #[must_use]
    pub const fn row(&self) -> usize {
        self.depth * 2 + 1
    }

    /// Columns and the box drawing symbol for each cell of this connector.
    #[must_use]
    pub fn cells(&self) -> Vec<(usize, &'static str)> {
        let first = self.children.first().copied().unwrap_or(self.parent);
        let last = self.children.last().copied().unwrap_or(self.parent);
        let start = first.min(self.parent);
        let end = last.max(self.parent);
        (start..=end)
            .map(|column| {
                let symbol = junction(
                    column == self.parent,
                    self.children.contains(&column),
                    column > start,
                    column < end,
                );
                (column, symbol)
            })
            .collect()
    }
}

const fn junction(up: bool, down: bool, left: bool, right: bool) -> &'static str {
    match (up, down, left, right) {
        (true, true, false, false) | (true, false, false, false) | (false, true, false, false) => {
            "│"
        }
        (false, true, false, true) => "┌",
        (false, true, true, false) => "┐",
        (false, true, true, true) => "┬",
        (true, false, true, true) => "┴",
        (true, true, true, true) => "┼",
        (true, true, false, true) => "├",
        (true, true, true, false) => "┤",
        (true, false, false, true) => "└",
        (true, false, true, false) => "┘",
        (false, false, _, _) => "─",
    }
}

/// Top-down arrangement of a [`TreeNode`] on a grid of cells.
///
/// Each depth uses two rows: one for the labels and one for the [`Connector`]s to the next depth.
/// The children of a node are placed left to right and centered below it,
/// the label of a node is centered above the connector to its children.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TreeLayout<'tree> {
    boxes: Vec<LabelBox<'tree>>,
    connectors: Vec<Connector>,
    width: usize,
    levels: usize,
}

impl<'tree> TreeLayout<'tree> {
    /// Arrange the tree with `spacing` columns between sibling subtrees.
    ///
    /// Without a tree the layout is empty.
    #[must_use]
    pub fn new(root: Option<&'tree TreeNode>, spacing: usize) -> Self {
        root.map_or_else(Self::default, |root| Self::arrange(root, spacing))
    }

    fn arrange(root: &'tree TreeNode, spacing: usize) -> Self {
        let nodes = flatten(root);

        let mut children = vec![Vec::new(); nodes.len()];
        for (index, flattened) in nodes.iter().enumerate() {
            if let Some(parent) = flattened.parent {
                children[parent].push(index);
            }
        }

        let label_widths = nodes
            .iter()
            .map(|flattened| flattened.node.label.width().max(1))
            .collect::<Vec<_>>();

        // Children come after their parent, so going backwards every child is known before its parent.
        let mut block_widths = vec![0; nodes.len()];
        let mut widths = vec![0; nodes.len()];
        for index in (0..nodes.len()).rev() {
            let own = &children[index];
            if !own.is_empty() {
                block_widths[index] = own.iter().map(|child| widths[*child]).sum::<usize>()
                    + spacing * (own.len() - 1);
            }
            widths[index] = label_widths[index].max(block_widths[index]);
        }

        let mut lefts = vec![0; nodes.len()];
        for index in 0..nodes.len() {
            let mut x = lefts[index] + (widths[index] - block_widths[index]) / 2;
            for child in &children[index] {
                lefts[*child] = x;
                x += widths[*child] + spacing;
            }
        }

        let mut columns = vec![0; nodes.len()];
        for index in (0..nodes.len()).rev() {
            columns[index] = match (children[index].first(), children[index].last()) {
                (Some(first), Some(last)) => (columns[*first] + columns[*last]) / 2,
                _ => lefts[index] + (label_widths[index] - 1) / 2,
            };
        }

        let mut boxes = Vec::with_capacity(nodes.len());
        let mut connectors = Vec::new();
        let mut levels = 0;
        for (index, flattened) in nodes.iter().enumerate() {
            let width = label_widths[index];
            let x = columns[index]
                .saturating_sub((width - 1) / 2)
                .clamp(lefts[index], lefts[index] + widths[index] - width);
            let kind = if flattened.is_leaf() {
                NodeKind::Leaf
            } else {
                connectors.push(Connector {
                    depth: flattened.depth,
                    parent: columns[index],
                    children: children[index].iter().map(|child| columns[*child]).collect(),
                });
                NodeKind::Constituent
            };
            levels = levels.max(flattened.depth + 1);
            boxes.push(LabelBox {
                label: flattened.node.label(),
                kind,
                depth: flattened.depth,
                x,
                width,
            });
        }

        Self {
            boxes,
            connectors,
            width: widths[0],
            levels,
        }
    }

    /// All node labels in depth-first pre-order.
    #[must_use]
    pub fn boxes(&self) -> &[LabelBox<'tree>] {
        &self.boxes
    }

    #[must_use]
    pub fn connectors(&self) -> &[Connector] {
        &self.connectors
    }

    /// The labels of one depth from left to right.
    pub fn level(&self, depth: usize) -> impl Iterator<Item = &LabelBox<'tree>> + '_ {
        let mut boxes = self
            .boxes
            .iter()
            .filter(move |label| label.depth == depth)
            .collect::<Vec<_>>();
        boxes.sort_by_key(|label| label.x);
        boxes.into_iter()
    }

    /// Amount of depth levels. Zero for an empty layout.
    #[must_use]
    pub const fn levels(&self) -> usize {
        self.levels
    }

    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Amount of rows including the connector rows.
    #[must_use]
    pub const fn height(&self) -> usize {
        (self.levels * 2).saturating_sub(1)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }
}

/// Arrange the tree for drawing with the [`DEFAULT_SPACING`].
///
/// Absent trees (for example when parsing failed) result in an empty layout.
///
/// # Example
///
/// ```
/// # use tui_constituency_tree::{parse, render};
/// let tree = parse("(S (NP (DT The) (NN cat)) (VP (VBZ sits)))")?;
/// let layout = render(Some(&tree));
/// assert_eq!(layout.levels(), 4);
/// assert!(render(None).is_empty());
/// # Ok::<(), tui_constituency_tree::MalformedTreeError>(())
/// ```
#[must_use]
pub fn render(root: Option<&TreeNode>) -> TreeLayout<'_> {
    TreeLayout::new(root, DEFAULT_SPACING)
}
