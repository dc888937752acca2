//! Small well-known grammars used across the workspace's tests.

use crate::grammar::Grammar;

/// `<start> -> <digit>`, `<digit> -> "0" | ... | "9"`.
/// Expansion universe: 11 keys (1 for start, 10 digits).
pub fn digit_grammar() -> Grammar {
    Grammar::from_rules([
        ("<start>", vec!["<digit>"]),
        (
            "<digit>",
            vec!["0", "1", "2", "3", "4", "5", "6", "7", "8", "9"],
        ),
    ])
}

/// Arithmetic expressions with nested, recursive rules.
pub fn expr_grammar() -> Grammar {
    Grammar::from_rules([
        ("<start>", vec!["<expr>"]),
        ("<expr>", vec!["<term> + <expr>", "<term> - <expr>", "<term>"]),
        (
            "<term>",
            vec!["<factor> * <term>", "<factor> / <term>", "<factor>"],
        ),
        (
            "<factor>",
            vec![
                "+<factor>",
                "-<factor>",
                "(<expr>)",
                "<integer>.<integer>",
                "<integer>",
            ],
        ),
        ("<integer>", vec!["<digit><integer>", "<digit>"]),
        (
            "<digit>",
            vec!["0", "1", "2", "3", "4", "5", "6", "7", "8", "9"],
        ),
    ])
}

/// CGI-encoded strings: letters, percent escapes, and plus signs.
pub fn cgi_grammar() -> Grammar {
    Grammar::from_rules([
        ("<start>", vec!["<string>"]),
        ("<string>", vec!["<letter>", "<letter><string>"]),
        ("<letter>", vec!["<plus>", "<percent>", "<other>"]),
        ("<plus>", vec!["+"]),
        ("<percent>", vec!["%<hexdigit><hexdigit>"]),
        (
            "<hexdigit>",
            vec![
                "0", "1", "2", "3", "4", "5", "6", "7", "8", "9", "a", "b", "c", "d", "e",
                "f",
            ],
        ),
        ("<other>", vec!["0", "1", "2", "3", "4", "5", "a", "b", "c", "d", "e", "-", "_"]),
    ])
}

/// HTTP-ish URLs.
pub fn url_grammar() -> Grammar {
    Grammar::from_rules([
        ("<start>", vec!["<url>"]),
        ("<url>", vec!["<scheme>://<authority><path><query>"]),
        ("<scheme>", vec!["http", "https", "ftp", "ftps"]),
        (
            "<authority>",
            vec!["<host>", "<host>:<port>", "<userinfo>@<host>", "<userinfo>@<host>:<port>"],
        ),
        ("<host>", vec!["example.org", "www.google.com", "localhost"]),
        ("<port>", vec!["80", "8080", "<nat>"]),
        ("<nat>", vec!["<digit>", "<digit><digit>"]),
        ("<digit>", vec!["0", "1", "2", "3", "4", "5", "6", "7", "8", "9"]),
        ("<userinfo>", vec!["user:password"]),
        ("<path>", vec!["", "/", "/<id>"]),
        ("<id>", vec!["abc", "def", "x<digit><digit>"]),
        ("<query>", vec!["", "?<params>"]),
        ("<params>", vec!["<param>", "<param>&<params>"]),
        ("<param>", vec!["<id>=<id>", "<id>=<nat>"]),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::nonterminals;

    #[test]
    fn test_sample_grammars_are_closed() {
        // Every referenced nonterminal is defined.
        for grammar in [digit_grammar(), expr_grammar(), cgi_grammar(), url_grammar()] {
            for (symbol, alts) in grammar.iter() {
                for alt in alts {
                    for nt in nonterminals(alt) {
                        assert!(
                            grammar.contains(&nt),
                            "{symbol} references undefined {nt}"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_digit_grammar_shape() {
        let g = digit_grammar();
        assert_eq!(g.len(), 2);
        assert_eq!(g.alternatives("<digit>").unwrap().len(), 10);
    }
}
