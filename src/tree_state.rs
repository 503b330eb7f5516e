/// Keeps the scroll position of a [`ConstituencyTree`](crate::ConstituencyTree).
///
/// Trees of longer sentences quickly get wider than the terminal.
/// The offsets are clamped on render so the last column and row stay visible.
///
/// # Example
///
/// ```
/// # use tui_constituency_tree::TreeState;
/// let mut state = TreeState::default();
/// state.scroll_right(3);
/// assert_eq!(state.get_offset(), (3, 0));
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TreeState {
    pub(super) offset_x: usize,
    pub(super) offset_y: usize,
}

impl TreeState {
    /// Horizontal and vertical offset in cells.
    #[must_use]
    pub const fn get_offset(&self) -> (usize, usize) {
        (self.offset_x, self.offset_y)
    }

    /// Scroll the specified amount of columns left
    ///
    /// Returns `true` when the scroll position changed.
    /// Returns `false` when the scrolling has reached the left edge.
    pub fn scroll_left(&mut self, columns: usize) -> bool {
        let before = self.offset_x;
        self.offset_x = self.offset_x.saturating_sub(columns);
        before != self.offset_x
    }

    /// Scroll the specified amount of columns right
    ///
    /// In contrast to [`scroll_left()`](Self::scroll_left) this can not return whether the view position changed or not as the actual change is determined on render.
    /// Always returns `true`.
    pub fn scroll_right(&mut self, columns: usize) -> bool {
        self.offset_x = self.offset_x.saturating_add(columns);
        true
    }

    /// Scroll the specified amount of lines up
    ///
    /// Returns `true` when the scroll position changed.
    /// Returns `false` when the scrolling has reached the top.
    pub fn scroll_up(&mut self, lines: usize) -> bool {
        let before = self.offset_y;
        self.offset_y = self.offset_y.saturating_sub(lines);
        before != self.offset_y
    }

    /// Scroll the specified amount of lines down
    ///
    /// Like [`scroll_right()`](Self::scroll_right) the actual change is determined on render.
    /// Always returns `true`.
    pub fn scroll_down(&mut self, lines: usize) -> bool {
        self.offset_y = self.offset_y.saturating_add(lines);
        true
    }

    /// Scroll back to the top left corner.
    ///
    /// Returns `true` when the scroll position changed.
    pub fn scroll_home(&mut self) -> bool {
        let changed = self.offset_x != 0 || self.offset_y != 0;
        *self = Self::default();
        changed
    }

    /// Keep the offsets inside of content which is `content` big while `viewport` is visible.
    pub(super) fn clamp(&mut self, content: (usize, usize), viewport: (usize, usize)) {
        self.offset_x = self.offset_x.min(content.0.saturating_sub(viewport.0));
        self.offset_y = self.offset_y.min(content.1.saturating_sub(viewport.1));
    }
}

#[test]
fn scroll_left_stops_at_edge() {
    let mut state = TreeState::default();
    assert!(!state.scroll_left(1));
    state.scroll_right(2);
    assert!(state.scroll_left(5));
    assert_eq!(state.get_offset(), (0, 0));
}

#[test]
fn scroll_up_stops_at_top() {
    let mut state = TreeState::default();
    assert!(!state.scroll_up(1));
    assert!(state.scroll_down(4));
    assert!(state.scroll_up(1));
    assert_eq!(state.get_offset(), (0, 3));
}

#[test]
fn scroll_home_resets() {
    let mut state = TreeState::default();
    assert!(!state.scroll_home());
    state.scroll_right(7);
    state.scroll_down(2);
    assert!(state.scroll_home());
    assert_eq!(state.get_offset(), (0, 0));
}

#[test]
fn clamp_keeps_last_column_visible() {
    let mut state = TreeState::default();
    state.scroll_right(100);
    state.scroll_down(100);
    state.clamp((30, 7), (10, 5));
    assert_eq!(state.get_offset(), (20, 2));

    state.clamp((8, 3), (10, 5));
    assert_eq!(state.get_offset(), (0, 0));
}
