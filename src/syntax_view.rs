use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Paragraph, StatefulWidget, Widget, Wrap};

use crate::layout::DEFAULT_SPACING;
use crate::parse::{parse, MalformedTreeError};
use crate::tree_node::TreeNode;
use crate::tree_state::TreeState;
use crate::ConstituencyTree;

/// How a [`SyntaxView`] shows the analysis result.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewMode {
    /// Draw the constituency tree. Falls back to [`Text`](Self::Text) when there is no tree.
    #[default]
    Tree,
    /// Show the bracketed string as returned by the analysis.
    Text,
}

impl ViewMode {
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Tree => Self::Text,
            Self::Text => Self::Tree,
        }
    }
}

/// The current analysis result of a [`SyntaxView`] together with how it is shown.
///
/// A new result replaces the previous one completely, whichever arrived last wins.
///
/// # Example
///
/// ```
/// # use tui_constituency_tree::{SyntaxState, ViewMode};
/// let mut state = SyntaxState::default();
/// state.set_result("(S (NP (DT The) (NN cat)) (VP (VBZ sits)))");
/// assert!(state.tree().is_some());
///
/// state.set_result("(S (NP");
/// assert!(state.tree().is_none());
/// assert_eq!(state.raw(), Some("(S (NP"));
/// ```
#[derive(Debug, Default, Clone)]
pub struct SyntaxState {
    raw: Option<String>,
    parsed: Option<Result<TreeNode, MalformedTreeError>>,
    mode: ViewMode,
    tree_state: TreeState,
}

impl SyntaxState {
    /// Replace the shown result with the bracketed tree `raw`.
    ///
    /// When `raw` can not be parsed the failure is logged and the raw text is shown instead.
    pub fn set_result<S>(&mut self, raw: S)
    where
        S: Into<String>,
    {
        let raw = raw.into();
        let parsed = parse(&raw);
        if let Err(error) = &parsed {
            tracing::warn!(%error, "constituency tree could not be parsed, showing raw text");
        }
        self.raw = Some(raw);
        self.parsed = Some(parsed);
        self.tree_state = TreeState::default();
    }

    /// Forget the current result.
    pub fn clear(&mut self) {
        self.raw = None;
        self.parsed = None;
        self.tree_state = TreeState::default();
    }

    #[must_use]
    pub fn raw(&self) -> Option<&str> {
        self.raw.as_deref()
    }

    #[must_use]
    pub fn tree(&self) -> Option<&TreeNode> {
        self.parsed.as_ref()?.as_ref().ok()
    }

    /// Why the current result is not shown as a tree.
    #[must_use]
    pub fn error(&self) -> Option<&MalformedTreeError> {
        self.parsed.as_ref()?.as_ref().err()
    }

    #[must_use]
    pub const fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: ViewMode) {
        self.mode = mode;
    }

    /// Switch between tree and text.
    ///
    /// Returns the new mode.
    pub fn toggle_mode(&mut self) -> ViewMode {
        self.mode = self.mode.toggled();
        self.mode
    }

    /// Whether the next render draws a tree.
    #[must_use]
    pub fn shows_tree(&self) -> bool {
        self.mode == ViewMode::Tree && self.tree().is_some()
    }

    /// Scroll state of the drawn tree.
    #[must_use]
    pub const fn tree_state(&self) -> &TreeState {
        &self.tree_state
    }

    pub fn tree_state_mut(&mut self) -> &mut TreeState {
        &mut self.tree_state
    }
}

/// Shows the result kept in a [`SyntaxState`].
///
/// Either draws the [`ConstituencyTree`] or the raw bracketed text, depending on the [`ViewMode`] and whether parsing worked.
#[derive(Debug, Clone)]
pub struct SyntaxView<'a> {
    block: Option<Block<'a>>,
    text_style: Style,
    node_style: Style,
    leaf_style: Style,
    connector_style: Style,
    spacing: usize,
}

impl Default for SyntaxView<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> SyntaxView<'a> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            block: None,
            text_style: Style::new().fg(Color::LightGreen),
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

    /// Style of the raw text shown in [`ViewMode::Text`].
    #[must_use]
    pub const fn text_style(mut self, style: Style) -> Self {
        self.text_style = style;
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

    #[must_use]
    pub const fn spacing(mut self, spacing: usize) -> Self {
        self.spacing = spacing;
        self
    }
}

impl<'a> StatefulWidget for SyntaxView<'a> {
    type State = SyntaxState;

    fn render(self, full_area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let area = self.block.map_or(full_area, |block| {
            let inner_area = block.inner(full_area);
            block.render(full_area, buf);
            inner_area
        });

        let Some(raw) = state.raw.as_deref() else {
            return;
        };

        let shows_tree = state.shows_tree();
        match state.parsed.as_ref() {
            Some(Ok(tree)) if shows_tree => {
                let widget = ConstituencyTree::new(Some(tree))
                    .node_style(self.node_style)
                    .leaf_style(self.leaf_style)
                    .connector_style(self.connector_style)
                    .spacing(self.spacing);
                StatefulWidget::render(widget, area, buf, &mut state.tree_state);
            }
            _ => {
                Paragraph::new(raw)
                    .style(self.text_style)
                    .wrap(Wrap { trim: false })
                    .render(area, buf);
            }
        }
    }
}
