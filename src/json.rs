//! Read analysis responses of an NLP service.
//!
//! A syntax analysis answers with a JSON object containing the bracketed tree in the `constituency_tree` field:
//!
//! ```json
//! { "constituency_tree": "(S (NP (DT The) (NN cat)) (VP (VBZ sits)))" }
//! ```

use serde_json::Value;

use crate::syntax_view::SyntaxState;

/// Name of the response field containing the bracketed tree.
pub const CONSTITUENCY_TREE_FIELD: &str = "constituency_tree";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResponseError {
    #[error("the response has no \"constituency_tree\" field")]
    MissingField,
    #[error("the \"constituency_tree\" field is not a string")]
    NotAString,
}

/// Get the bracketed tree out of a syntax analysis response.
///
/// # Errors
///
/// Errors when the response is not an object with a `constituency_tree` string.
pub fn constituency_tree(response: &Value) -> Result<&str, ResponseError> {
    response
        .get(CONSTITUENCY_TREE_FIELD)
        .ok_or(ResponseError::MissingField)?
        .as_str()
        .ok_or(ResponseError::NotAString)
}

impl SyntaxState {
    /// Replace the shown result with the tree of a syntax analysis response.
    ///
    /// See [`SyntaxState::set_result`] for what happens when the tree itself is malformed.
    ///
    /// # Errors
    ///
    /// Errors when the response does not contain a tree at all.
    /// The previous result is cleared in that case so nothing outdated stays visible.
    pub fn set_response(&mut self, response: &Value) -> Result<(), ResponseError> {
        match constituency_tree(response) {
            Ok(tree) => {
                self.set_result(tree);
                Ok(())
            }
            Err(error) => {
                tracing::warn!(%error, "syntax analysis response has no constituency tree");
                self.clear();
                Err(error)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn extracts_tree() {
        let response = json!({
            "text": "The cat sits",
            "constituency_tree": "(S (NP (DT The) (NN cat)) (VP (VBZ sits)))",
        });
        assert_eq!(
            constituency_tree(&response),
            Ok("(S (NP (DT The) (NN cat)) (VP (VBZ sits)))")
        );
    }

    #[test]
    fn missing_field() {
        assert_eq!(
            constituency_tree(&json!({ "entities": [] })),
            Err(ResponseError::MissingField)
        );
        assert_eq!(
            constituency_tree(&json!("(S x)")),
            Err(ResponseError::MissingField)
        );
    }

    #[test]
    fn not_a_string() {
        assert_eq!(
            constituency_tree(&json!({ "constituency_tree": ["S"] })),
            Err(ResponseError::NotAString)
        );
    }

    #[test]
    fn error_message_names_field() {
        assert_eq!(
            ResponseError::MissingField.to_string(),
            "the response has no \"constituency_tree\" field"
        );
    }

    #[test]
    fn set_response_parses_tree() {
        let mut state = SyntaxState::default();
        state
            .set_response(&json!({ "constituency_tree": "(S (NP x) (VP y))" }))
            .unwrap();
        assert_eq!(state.tree().map(crate::TreeNode::label), Some("S"));
    }

    #[test]
    fn set_response_without_tree_clears_previous() {
        let mut state = SyntaxState::default();
        state.set_result("(X)");
        let result = state.set_response(&json!({ "tokens": [] }));
        assert_eq!(result, Err(ResponseError::MissingField));
        assert_eq!(state.raw(), None);
        assert_eq!(state.tree(), None);
    }

    #[test]
    fn set_response_with_wrong_type_renders_nothing() {
        let mut state = SyntaxState::default();
        state.set_result("(S (NP x) (VP y))");
        let result = state.set_response(&json!({ "constituency_tree": 42 }));
        assert_eq!(result, Err(ResponseError::NotAString));

        let area = ratatui::layout::Rect::new(0, 0, 6, 3);
        let mut buffer = ratatui::buffer::Buffer::empty(area);
        ratatui::widgets::StatefulWidget::render(
            crate::SyntaxView::new(),
            area,
            &mut buffer,
            &mut state,
        );
        assert_eq!(
            buffer,
            ratatui::buffer::Buffer::with_lines(vec!["      "; 3])
        );
    }

    #[test]
    fn set_response_with_malformed_tree_keeps_raw() {
        let mut state = SyntaxState::default();
        state
            .set_response(&json!({ "constituency_tree": "(S (NP x)" }))
            .unwrap();
        assert_eq!(state.tree(), None);
        assert_eq!(state.raw(), Some("(S (NP x)"));
    }
}
