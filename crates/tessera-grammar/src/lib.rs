pub mod grammar;
pub mod samples;
pub mod token;

pub use grammar::{Grammar, START_SYMBOL};
pub use token::{is_nonterminal, nonterminals, tokenize, Token};
