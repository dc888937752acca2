//! Expansion-string scanning.
//!
//! An expansion alternative is a flat string mixing literal terminal text
//! with nonterminal references written as `<name>`. This module splits such
//! strings into tokens without any grammar context.

use serde::{Deserialize, Serialize};

/// One piece of an expansion string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Token {
    /// Literal terminal text, emitted verbatim.
    Terminal(String),
    /// Reference to a nonterminal, including the angle brackets.
    Nonterminal(String),
}

impl Token {
    /// The token's symbol as it appears in a derivation tree node.
    pub fn symbol(&self) -> &str {
        match self {
            Token::Terminal(s) => s,
            Token::Nonterminal(s) => s,
        }
    }

    pub fn is_nonterminal(&self) -> bool {
        matches!(self, Token::Nonterminal(_))
    }
}

/// Whether `s` is a nonterminal reference: `<name>` with no spaces and no
/// nested angle brackets.
pub fn is_nonterminal(s: &str) -> bool {
    let inner = match s.strip_prefix('<').and_then(|rest| rest.strip_suffix('>')) {
        Some(inner) => inner,
        None => return false,
    };
    !inner.is_empty() && !inner.contains(['<', '>', ' '])
}

/// Split an expansion string into terminal and nonterminal tokens.
///
/// The empty expansion is the epsilon alternative and yields a single empty
/// terminal token, so expanding it produces one terminal child rather than
/// leaving the node looking unexpanded.
pub fn tokenize(expansion: &str) -> Vec<Token> {
    if expansion.is_empty() {
        return vec![Token::Terminal(String::new())];
    }

    let mut tokens = Vec::new();
    let mut terminal = String::new();
    let mut rest = expansion;

    while !rest.is_empty() {
        match scan_nonterminal(rest) {
            Some(end) => {
                if !terminal.is_empty() {
                    tokens.push(Token::Terminal(std::mem::take(&mut terminal)));
                }
                tokens.push(Token::Nonterminal(rest[..end].to_string()));
                rest = &rest[end..];
            }
            None => {
                let mut chars = rest.chars();
                // Unwrap is fine: rest is non-empty.
                terminal.push(chars.next().unwrap());
                rest = chars.as_str();
            }
        }
    }
    if !terminal.is_empty() {
        tokens.push(Token::Terminal(terminal));
    }
    tokens
}

/// If `s` starts with a nonterminal reference, return its byte length.
fn scan_nonterminal(s: &str) -> Option<usize> {
    if !s.starts_with('<') {
        return None;
    }
    let end = s.find('>')?;
    let candidate = &s[..=end];
    if is_nonterminal(candidate) {
        Some(end + 1)
    } else {
        None
    }
}

/// Ordered list of nonterminal symbols referenced by an expansion string.
/// A symbol referenced twice appears twice.
pub fn nonterminals(expansion: &str) -> Vec<String> {
    tokenize(expansion)
        .into_iter()
        .filter_map(|t| match t {
            Token::Nonterminal(s) => Some(s),
            Token::Terminal(_) => None,
        })
        .collect()
}
