//! Parsing of bracketed constituency trees like `(S (NP (DT The) (NN cat)) (VP (VBZ sits)))`.
//!
//! ```text
//! tree  := '(' LABEL node* ')'
//! node  := tree | LEAF
//! LABEL := token without whitespace or parentheses
//! LEAF  := token without whitespace or parentheses
//! ```
//!
//! Parentheses are always structural, labels can not contain them.

use std::fmt;

use crate::tree_node::TreeNode;

/// The input does not describe exactly one well-formed, fully parenthesized tree.
///
/// Positions are token indices, not byte offsets.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MalformedTreeError {
    #[error("the input contains no tree")]
    Empty,
    #[error("expected '(' at token {position} but found {found}")]
    ExpectedOpen { position: usize, found: String },
    #[error("expected a label after '(' at token {position} but found {found}")]
    MissingLabel { position: usize, found: String },
    #[error("input ended at token {position} before the tree was closed")]
    UnexpectedEnd { position: usize },
    #[error("unexpected {found} at token {position} after the tree was closed")]
    TrailingTokens { position: usize, found: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token<'input> {
    Open,
    Close,
    Word(&'input str),
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open => f.write_str("'('"),
            Self::Close => f.write_str("')'"),
            Self::Word(word) => write!(f, "{word:?}"),
        }
    }
}

/// Split into parentheses and the words between them.
///
/// Whitespace only separates, runs of it have no further meaning.
fn tokenize(input: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut word_start = None;
    for (index, character) in input.char_indices() {
        let is_delimiter = character.is_whitespace() || character == '(' || character == ')';
        if !is_delimiter {
            if word_start.is_none() {
                word_start = Some(index);
            }
            continue;
        }
        if let Some(start) = word_start.take() {
            tokens.push(Token::Word(&input[start..index]));
        }
        match character {
            '(' => tokens.push(Token::Open),
            ')' => tokens.push(Token::Close),
            _ => {}
        }
    }
    if let Some(start) = word_start {
        tokens.push(Token::Word(&input[start..]));
    }
    tokens
}

/// Cursor over the tokens of one input.
///
/// Every call to [`parse`] owns its own state so parses never interfere with each other.
struct Parser<'input> {
    tokens: Vec<Token<'input>>,
    position: usize,
}

impl<'input> Parser<'input> {
    const fn new(tokens: Vec<Token<'input>>) -> Self {
        Self {
            tokens,
            position: 0,
        }
    }

    fn peek(&self) -> Option<Token<'input>> {
        self.tokens.get(self.position).copied()
    }

    fn advance(&mut self) -> Result<Token<'input>, MalformedTreeError> {
        let token = self.peek().ok_or(MalformedTreeError::UnexpectedEnd {
            position: self.position,
        })?;
        self.position += 1;
        Ok(token)
    }

    fn label(&mut self) -> Result<&'input str, MalformedTreeError> {
        let position = self.position;
        match self.advance()? {
            Token::Word(label) => Ok(label),
            found => Err(MalformedTreeError::MissingLabel {
                position,
                found: found.to_string(),
            }),
        }
    }

    /// Nested subtrees are kept on an explicit stack of open constituents,
    /// the nesting depth of the input is not limited by the call stack.
    fn tree(&mut self) -> Result<TreeNode, MalformedTreeError> {
        let position = self.position;
        match self.advance()? {
            Token::Open => {}
            found => {
                return Err(MalformedTreeError::ExpectedOpen {
                    position,
                    found: found.to_string(),
                })
            }
        }

        let mut open = Vec::new();
        let mut current = (self.label()?, Vec::new());
        loop {
            match self.peek() {
                None => {
                    return Err(MalformedTreeError::UnexpectedEnd {
                        position: self.position,
                    })
                }
                Some(Token::Open) => {
                    self.position += 1;
                    let child = (self.label()?, Vec::new());
                    open.push(std::mem::replace(&mut current, child));
                }
                Some(Token::Word(word)) => {
                    self.position += 1;
                    current.1.push(TreeNode::new_leaf(word));
                }
                Some(Token::Close) => {
                    self.position += 1;
                    let (label, children) = current;
                    let node = TreeNode::new(label, children);
                    match open.pop() {
                        Some(mut parent) => {
                            parent.1.push(node);
                            current = parent;
                        }
                        None => return Ok(node),
                    }
                }
            }
        }
    }

    fn finish(&self) -> Result<(), MalformedTreeError> {
        match self.peek() {
            None => Ok(()),
            Some(found) => Err(MalformedTreeError::TrailingTokens {
                position: self.position,
                found: found.to_string(),
            }),
        }
    }
}

/// Parse a bracketed constituency tree into its [`TreeNode`] structure.
///
/// # Errors
///
/// Errors when the input is empty, the parentheses are unbalanced, an opening parenthesis is not followed by a label or anything follows the closed root.
///
/// # Example
///
/// ```
/// # use tui_constituency_tree::parse;
/// let tree = parse("(S (NP (DT The) (NN cat)) (VP (VBZ sits)))")?;
/// assert_eq!(tree.label(), "S");
/// assert_eq!(tree.leaves(), ["The", "cat", "sits"]);
/// # Ok::<(), tui_constituency_tree::MalformedTreeError>(())
/// ```
pub fn parse(input: &str) -> Result<TreeNode, MalformedTreeError> {
    let tokens = tokenize(input);
    if tokens.is_empty() {
        return Err(MalformedTreeError::Empty);
    }
    let mut parser = Parser::new(tokens);
    let tree = parser.tree()?;
    parser.finish()?;
    tracing::debug!(
        nodes = tree.node_count(),
        levels = tree.levels(),
        "parsed constituency tree"
    );
    Ok(tree)
}

#[test]
fn tokenize_separates_parentheses() {
    assert_eq!(
        tokenize("(NP(DT the)  (NN\tcat ))"),
        [
            Token::Open,
            Token::Word("NP"),
            Token::Open,
            Token::Word("DT"),
            Token::Word("the"),
            Token::Close,
            Token::Open,
            Token::Word("NN"),
            Token::Word("cat"),
            Token::Close,
            Token::Close,
        ]
    );
}

#[test]
fn tokenize_whitespace_only_is_empty() {
    assert!(tokenize(" \n\t ").is_empty());
}

#[test]
fn tokenize_keeps_trailing_word() {
    assert_eq!(
        tokenize("(A) b"),
        [Token::Open, Token::Word("A"), Token::Close, Token::Word("b")]
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentence() {
        let tree = parse("(S (NP (DT The) (NN cat)) (VP (VBZ sits)))").unwrap();
        assert_eq!(tree.label(), "S");
        assert_eq!(tree.children().len(), 2);

        let np = tree.child(0).unwrap();
        assert_eq!(np.label(), "NP");
        assert_eq!(np.child(0).unwrap().label(), "DT");
        let the = np.child(0).unwrap().child(0).unwrap();
        assert_eq!(the.label(), "The");
        assert!(the.is_leaf());

        assert_eq!(tree.child(1).unwrap().label(), "VP");
    }

    #[test]
    fn single_node() {
        let tree = parse("(X)").unwrap();
        assert_eq!(tree, TreeNode::new_leaf("X"));
    }

    #[test]
    fn nested_single_nodes_become_leaves() {
        let tree = parse("(A (B) (C))").unwrap();
        assert_eq!(
            tree,
            TreeNode::new("A", vec![TreeNode::new_leaf("B"), TreeNode::new_leaf("C")])
        );
    }

    #[test]
    fn whitespace_has_no_meaning() {
        let compact = parse("(S(NP(DT The)(NN cat))(VP(VBZ sits)))").unwrap();
        let spread = parse("\n  ( S\n\t(NP (DT   The) (NN cat) )\n  (VP (VBZ sits)) )  \n").unwrap();
        assert_eq!(compact, spread);
        assert_eq!(compact, TreeNode::example());
    }

    #[test]
    fn display_output_parses_to_same_structure() {
        for input in [
            "(X)",
            "(A (B) (C))",
            "(S (NP (DT The) (NN cat)) (VP (VBZ sits)))",
            "(ROOT (S (NP (PRP I)) (VP (VBP like) (NP (NNS trees))) (. .)))",
            "(A b c (D e (F g)) h)",
        ] {
            let tree = parse(input).unwrap();
            let again = parse(&tree.to_string()).unwrap();
            assert_eq!(tree, again, "input: {input}");
        }
    }

    #[test]
    fn empty_fails() {
        assert_eq!(parse(""), Err(MalformedTreeError::Empty));
        assert_eq!(parse("   \n "), Err(MalformedTreeError::Empty));
    }

    #[test]
    fn missing_close_fails() {
        assert_eq!(
            parse("(A (B) (C)"),
            Err(MalformedTreeError::UnexpectedEnd { position: 8 })
        );
    }

    #[test]
    fn only_open_fails() {
        assert_eq!(
            parse("("),
            Err(MalformedTreeError::UnexpectedEnd { position: 1 })
        );
    }

    #[test]
    fn trailing_close_fails() {
        assert_eq!(
            parse("(A (B)))"),
            Err(MalformedTreeError::TrailingTokens {
                position: 6,
                found: "')'".to_owned()
            })
        );
    }

    #[test]
    fn second_tree_fails() {
        assert!(matches!(
            parse("(A b) (C d)"),
            Err(MalformedTreeError::TrailingTokens { position: 4, .. })
        ));
    }

    #[test]
    fn bare_word_fails() {
        assert_eq!(
            parse("hello"),
            Err(MalformedTreeError::ExpectedOpen {
                position: 0,
                found: "\"hello\"".to_owned()
            })
        );
    }

    #[test]
    fn close_first_fails() {
        assert!(matches!(
            parse(") (A)"),
            Err(MalformedTreeError::ExpectedOpen { position: 0, .. })
        ));
    }

    #[test]
    fn missing_label_fails() {
        assert!(matches!(
            parse("()"),
            Err(MalformedTreeError::MissingLabel { position: 1, .. })
        ));
        assert!(matches!(
            parse("((A b))"),
            Err(MalformedTreeError::MissingLabel { position: 1, .. })
        ));
    }

    #[test]
    fn deeply_nested_input_parses() {
        let depth = 100_000;
        let input = format!("{}x{}", "(A ".repeat(depth), ")".repeat(depth));
        let tree = parse(&input).unwrap();
        assert_eq!(tree.levels(), depth + 1);
        assert_eq!(tree.leaves(), ["x"]);
        assert!(parse(&tree.to_string()).unwrap() == tree);
    }

    #[test]
    fn deeply_nested_unclosed_input_fails() {
        let depth = 100_000;
        let input = format!("{}x{}", "(A ".repeat(depth), ")".repeat(depth - 1));
        assert_eq!(
            parse(&input),
            Err(MalformedTreeError::UnexpectedEnd {
                position: 3 * depth
            })
        );
    }

    #[test]
    fn error_message_names_position() {
        let error = parse("(A (B) (C)").unwrap_err();
        assert_eq!(
            error.to_string(),
            "input ended at token 8 before the tree was closed"
        );
    }
}
