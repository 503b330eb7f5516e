#![forbid(unsafe_code)]
#![warn(clippy::pedantic, clippy::nursery)]

/*!
Widget built to show constituency trees of natural language sentences.

Bracketed trees like `(S (NP (DT The) (NN cat)) (VP (VBZ sits)))` are parsed with [`parse`] into a [`TreeNode`].
The [`ConstituencyTree`] widget draws it top-down with the children centered below their parent.
The scroll position is stored in the [`TreeState`].

[`SyntaxView`] combines both for one analysis result: it shows the tree or falls back to the raw text when it could not be parsed.
*/

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, StatefulWidget, Widget};
use unicode_width::UnicodeWidthChar;

mod flatten;
#[cfg(feature = "json")]
pub mod json;
mod layout;
mod parse;
mod syntax_view;
mod tree_node;
mod tree_state;

pub use crate::flatten::{flatten, Flattened};
pub use crate::layout::{render, Connector, LabelBox, NodeKind, TreeLayout, DEFAULT_SPACING};
pub use crate::parse::{parse, MalformedTreeError};
pub use crate::syntax_view::{SyntaxState, SyntaxView, ViewMode};
pub use crate::tree_node::TreeNode;
pub use crate::tree_state::TreeState;

/// A constituency tree which can be rendered.
///
/// Without a tree (for example when parsing failed) nothing is rendered.
///
/// # Example
///
/// ```
/// # use tui_constituency_tree::{parse, ConstituencyTree, TreeState};
/// # use ratatui::backend::TestBackend;
/// # use ratatui::Terminal;
/// # use ratatui::widgets::Block;
/// # let mut terminal = Terminal::new(TestBackend::new(32, 32)).unwrap();
/// let mut state = TreeState::default();
///
/// let tree = parse("(S (NP (DT The) (NN cat)) (VP (VBZ sits)))").ok();
///
/// terminal.draw(|frame| {
///     let area = frame.size();
///
///     let tree_widget = ConstituencyTree::new(tree.as_ref())
///         .block(Block::bordered().title("Syntax Tree"));
///
///     frame.render_stateful_widget(tree_widget, area, &mut state);
/// })?;
/// # Ok::<(), std::io::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConstituencyTree<'a> {
    tree: Option<&'a TreeNode>,

    block: Option<Block<'a>>,
    /// Style used as a base style for the widget
    style: Style,

    /// Style of labels with children
    node_style: Style,
    /// Style of labels without children
    leaf_style: Style,
    /// Style of the lines between parents and children
    connector_style: Style,

    /// Columns between sibling subtrees
    spacing: usize,
}

impl<'a> ConstituencyTree<'a> {
    #[must_use]
    pub const fn new(tree: Option<&'a TreeNode>) -> Self {
        Self {
            tree,
            block: None,
            style: Style::new(),
            node_style: Style::new().fg(Color::Blue).add_modifier(Modifier::BOLD),
            leaf_style: Style::new().fg(Color::Green),
            connector_style: Style::new().fg(Color::DarkGray),
            spacing: DEFAULT_SPACING,
        }
    }

    #[allow(clippy::missing_const_for_fn)]
    #[must_use]
    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    #[must_use]
    pub const fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    #[must_use]
    pub const fn node_style(mut self, style: Style) -> Self {
        self.node_style = style;
        self
    }

    #[must_use]
    pub const fn leaf_style(mut self, style: Style) -> Self {
        self.leaf_style = style;
        self
    }

    #[must_use]
    pub const fn connector_style(mut self, style: Style) -> Self {
        self.connector_style = style;
        self
    }

    /// Columns between two sibling subtrees.
    #[must_use]
    pub const fn spacing(mut self, spacing: usize) -> Self {
        self.spacing = spacing;
        self
    }

    /// The arrangement this widget will draw.
    #[must_use]
    pub fn layout(&self) -> TreeLayout<'a> {
        TreeLayout::new(self.tree, self.spacing)
    }
}

/// Drop the first `skip` columns of `text`.
///
/// Returns the remaining text and the columns it starts after the cut.
/// This is more than zero when a wide character was cut in half.
fn skip_columns(text: &str, skip: usize) -> (&str, usize) {
    let mut columns = 0;
    for (index, character) in text.char_indices() {
        if columns >= skip {
            return (&text[index..], columns - skip);
        }
        columns += character.width().unwrap_or(0);
    }
    ("", 0)
}

impl<'a> StatefulWidget for ConstituencyTree<'a> {
    type State = TreeState;

    #[allow(clippy::cast_possible_truncation)]
    fn render(self, full_area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        buf.set_style(full_area, self.style);

        // Get the inner area inside a possible block, otherwise use the full area
        let area = self.block.map_or(full_area, |block| {
            let inner_area = block.inner(full_area);
            block.render(full_area, buf);
            inner_area
        });

        if area.width < 1 || area.height < 1 {
            return;
        }

        let layout = TreeLayout::new(self.tree, self.spacing);
        if layout.is_empty() {
            return;
        }

        let viewport = (area.width as usize, area.height as usize);
        state.clamp((layout.width(), layout.height()), viewport);
        let (offset_x, offset_y) = state.get_offset();

        // Center trees narrower than the area
        let indent = viewport.0.saturating_sub(layout.width()) / 2;

        let to_screen = |column: usize, row: usize| -> Option<(u16, u16)> {
            let column = (column + indent).checked_sub(offset_x)?;
            let row = row.checked_sub(offset_y)?;
            (column < viewport.0 && row < viewport.1)
                .then(|| (area.x + column as u16, area.y + row as u16))
        };

        for connector in layout.connectors() {
            for (column, symbol) in connector.cells() {
                if let Some((x, y)) = to_screen(column, connector.row()) {
                    buf.get_mut(x, y)
                        .set_symbol(symbol)
                        .set_style(self.connector_style);
                }
            }
        }

        for label in layout.boxes() {
            let style = match label.kind {
                NodeKind::Leaf => self.leaf_style,
                NodeKind::Constituent => self.node_style,
            };
            let hidden = offset_x.saturating_sub(label.x + indent);
            let (text, extra) = skip_columns(label.label, hidden);
            if let Some((x, y)) = to_screen(label.x + hidden + extra, label.row()) {
                let max_width = area.right().saturating_sub(x);
                buf.set_stringn(x, y, text, max_width as usize, style);
            }
        }
    }
}

impl<'a> Widget for ConstituencyTree<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut state = TreeState::default();
        StatefulWidget::render(self, area, buf, &mut state);
    }
}


#[test]
fn skip_columns_works() {
    assert_eq!(skip_columns("sits", 0), ("sits", 0));
    assert_eq!(skip_columns("sits", 2), ("ts", 0));
    assert_eq!(skip_columns("sits", 4), ("", 0));
    assert_eq!(skip_columns("猫猫", 1), ("猫", 1));
}
