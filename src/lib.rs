extern crate wasm_bindgen;

use wasm_bindgen::prelude::*;

mod grammar;
pub use grammar::{Grammar, ParseError, ParseTree, ProductionRef, RecursiveParser};

fn load_grammar(grammar: &str) -> Result<Grammar, String> {
    let g = Grammar::parse(grammar)?;
    g.validate()?;
    Ok(g)
}

#[wasm_bindgen]
pub fn nullable_first_follow_to_json(grammar: &str) -> String {
    match load_grammar(grammar) {
        Ok(mut g) => {
            g.calculate_nullable_first_follow();
            g.to_non_terminal_output_vec().to_json()
        }
        Err(e) => format!("{{\"error\":\"{}\"}}", e),
    }
}

#[wasm_bindgen]
pub fn ll1_to_json(grammar: &str) -> String {
    match load_grammar(grammar) {
        Ok(mut g) => serde_json::to_string(&g.to_ll1_output()).unwrap(),
        Err(e) => format!("{{\"error\":\"{}\"}}", e),
    }
}

#[wasm_bindgen]
pub fn parse_to_json(grammar: &str, input: &str) -> String {
    match load_grammar(grammar) {
        Ok(g) => {
            let mut parser = RecursiveParser::new(&g);
            match parser.parse(input) {
                Ok(tree) => serde_json::to_string(&tree).unwrap(),
                Err(e) => format!("{{\"error\":\"{}\"}}", e),
            }
        }
        Err(e) => format!("{{\"error\":\"{}\"}}", e),
    }
}



#[cfg(test)]
mod ll1_test {
    use crate::Grammar;

    #[test]
    fn demo_grammar_is_ll1() {
        let mut g =
            Grammar::parse("S -> a b S | b X\nX -> ε | c N\nN -> c N'\nN' -> b N' | ε").unwrap();
        assert!(g.is_ll1());
        // idempotent: a fresh analysis each call, same verdict
        assert!(g.is_ll1());
    }

    #[test]
    fn simple_grammar_is_ll1() {
        let mut g = Grammar::parse("S -> a S | b").unwrap();
        assert!(g.is_ll1());
    }

    #[test]
    fn alternative_conflict() {
        let mut g = Grammar::parse("S -> a b | a c").unwrap();
        assert!(!g.is_ll1());
    }

    #[test]
    fn epsilon_follow_conflict() {
        let mut g = Grammar::parse("S -> A b\nA -> b | ε").unwrap();
        assert!(!g.is_ll1());
    }

    #[test]
    fn two_nullable_alternatives_conflict() {
        let mut g = Grammar::parse("S -> A | B\nA -> ε\nB -> ε").unwrap();
        assert!(!g.is_ll1());
    }

    #[test]
    fn verdict_does_not_depend_on_stale_tables() {
        let mut g = Grammar::parse("S -> a b | a c").unwrap();
        g.calculate_nullable_first_follow();
        assert!(!g.is_ll1());
        assert!(!g.is_ll1());
    }
}

#[cfg(test)]
mod parser_test {
    use crate::{Grammar, ParseError, ParseTree, ProductionRef, RecursiveParser};

    const DEMO: &str = "S -> a b S | b X\nX -> ε | c N\nN -> c N'\nN' -> b N' | ε";
    const DEMO_GREEDY_X: &str = "S -> a b S | b X\nX -> c N | ε\nN -> c N'\nN' -> b N' | ε";

    fn t(name: &str) -> ParseTree {
        ParseTree::Terminal(name.to_string())
    }

    fn node(g: &Grammar, symbol: &str, alternative: usize, children: Vec<ParseTree>) -> ParseTree {
        ParseTree::NonTerminal {
            symbol: symbol.to_string(),
            production: ProductionRef {
                left: g.get_symbol_index(symbol).unwrap(),
                alternative,
            },
            children,
        }
    }

    #[test]
    fn parse_single_b() {
        let g = Grammar::parse(DEMO).unwrap();
        let tree = RecursiveParser::new(&g).parse("b").unwrap();
        assert_eq!(
            tree,
            node(&g, "S", 1, vec![t("b"), node(&g, "X", 0, vec![ParseTree::Epsilon])])
        );
    }

    #[test]
    fn parse_abb() {
        let g = Grammar::parse(DEMO).unwrap();
        let tree = RecursiveParser::new(&g).parse("abb").unwrap();
        assert_eq!(
            tree,
            node(
                &g,
                "S",
                0,
                vec![
                    t("a"),
                    t("b"),
                    node(&g, "S", 1, vec![t("b"), node(&g, "X", 0, vec![ParseTree::Epsilon])]),
                ]
            )
        );
    }

    #[test]
    fn reject_ab() {
        let g = Grammar::parse(DEMO).unwrap();
        assert_eq!(
            RecursiveParser::new(&g).parse("ab"),
            Err(ParseError::Failure { position: 0 })
        );
    }

    // With X -> ε declared first, the epsilon alternative wins at position 1
    // and the derivation stops there: a prefix match is a failure.
    #[test]
    fn declaration_order_tie_break() {
        let g = Grammar::parse(DEMO).unwrap();
        assert_eq!(
            RecursiveParser::new(&g).parse("bccb"),
            Err(ParseError::Failure { position: 1 })
        );
    }

    #[test]
    fn parse_bccb_with_greedy_x() {
        let g = Grammar::parse(DEMO_GREEDY_X).unwrap();
        let tree = RecursiveParser::new(&g).parse("bccb").unwrap();
        assert_eq!(
            tree,
            node(
                &g,
                "S",
                1,
                vec![
                    t("b"),
                    node(
                        &g,
                        "X",
                        0,
                        vec![
                            t("c"),
                            node(
                                &g,
                                "N",
                                0,
                                vec![
                                    t("c"),
                                    node(
                                        &g,
                                        "N'",
                                        0,
                                        vec![t("b"), node(&g, "N'", 1, vec![ParseTree::Epsilon])]
                                    ),
                                ]
                            ),
                        ]
                    ),
                ]
            )
        );
    }

    #[test]
    fn parse_bcc_with_greedy_x() {
        let g = Grammar::parse(DEMO_GREEDY_X).unwrap();
        let tree = RecursiveParser::new(&g).parse("bcc").unwrap();
        assert_eq!(
            tree,
            node(
                &g,
                "S",
                1,
                vec![
                    t("b"),
                    node(
                        &g,
                        "X",
                        0,
                        vec![
                            t("c"),
                            node(&g, "N", 0, vec![t("c"), node(&g, "N'", 1, vec![ParseTree::Epsilon])]),
                        ]
                    ),
                ]
            )
        );
    }

    #[test]
    fn empty_input_rejected() {
        let g = Grammar::parse(DEMO).unwrap();
        assert_eq!(RecursiveParser::new(&g).parse(""), Err(ParseError::EmptyInput));
    }

    #[test]
    fn unknown_token() {
        let g = Grammar::parse(DEMO).unwrap();
        assert_eq!(
            RecursiveParser::new(&g).parse("bz"),
            Err(ParseError::UnknownToken('z'))
        );
    }

    #[test]
    fn end_mark_is_not_a_token() {
        let g = Grammar::parse(DEMO).unwrap();
        assert_eq!(
            RecursiveParser::new(&g).parse("b$"),
            Err(ParseError::UnknownToken('$'))
        );
    }

    #[test]
    fn non_terminal_name_is_not_a_token() {
        let g = Grammar::parse(DEMO).unwrap();
        assert_eq!(
            RecursiveParser::new(&g).parse("S"),
            Err(ParseError::UnknownToken('S'))
        );
    }

    #[test]
    fn empty_grammar() {
        let g = Grammar::parse("").unwrap();
        assert_eq!(RecursiveParser::new(&g).parse("a"), Err(ParseError::EmptyGrammar));
    }

    #[test]
    fn first_alternative_wins_on_ambiguity() {
        let g = Grammar::parse("S -> a | a").unwrap();
        let tree = RecursiveParser::new(&g).parse("a").unwrap();
        assert_eq!(tree, node(&g, "S", 0, vec![t("a")]));
    }

    #[test]
    fn fringe_round_trip() {
        let g = Grammar::parse(DEMO_GREEDY_X).unwrap();
        for input in ["b", "bcc", "bccb", "abbccb"] {
            let tree = RecursiveParser::new(&g).parse(input).unwrap();
            assert_eq!(tree.fringe(), input);
        }
    }

    #[test]
    fn parser_state_does_not_leak_between_calls() {
        let g = Grammar::parse(DEMO).unwrap();
        let mut parser = RecursiveParser::new(&g);
        assert!(parser.parse("bccb").is_err());
        let tree = parser.parse("b").unwrap();
        assert_eq!(tree.fringe(), "b");
        assert!(parser.parse("abb").is_ok());
    }

    #[test]
    fn tree_display() {
        let g = Grammar::parse(DEMO).unwrap();
        let tree = RecursiveParser::new(&g).parse("b").unwrap();
        assert_eq!(
            tree.to_plaintext(&g),
            "└── S (S -> b X)\n    ├── b\n    └── X (X -> ε)\n        └── ε"
        );
    }
}
