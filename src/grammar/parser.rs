use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

use super::{grammar::Symbol, Grammar, END_MARK};

/// Which production built an interior node: the left non-terminal's symbol
/// index and the alternative's position in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProductionRef {
    pub left: usize,
    pub alternative: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ParseTree {
    Epsilon,
    Terminal(String),
    NonTerminal {
        symbol: String,
        production: ProductionRef,
        children: Vec<ParseTree>,
    },
}

impl ParseTree {
    /// Terminal leaves left to right; concatenated they reproduce the input
    /// the tree was parsed from.
    pub fn fringe(&self) -> String {
        match self {
            ParseTree::Epsilon => String::new(),
            ParseTree::Terminal(name) => name.clone(),
            ParseTree::NonTerminal { children, .. } => {
                children.iter().map(|child| child.fringe()).collect()
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    EmptyGrammar,
    EmptyInput,
    UnknownToken(char),
    Failure { position: usize },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::EmptyGrammar => write!(f, "grammar has no start symbol"),
            ParseError::EmptyInput => write!(f, "empty input string"),
            ParseError::UnknownToken(c) => {
                write!(f, "\"{}\" is not a terminal of the grammar", c)
            }
            ParseError::Failure { position } => {
                write!(
                    f,
                    "could not parse entire input, stopped at position {}",
                    position
                )
            }
        }
    }
}

type MemoEntry = Option<(ParseTree, usize)>;

/// Memoized backtracking parser. The cursor and the memo table belong to one
/// `parse` call; nothing carries over between invocations.
pub struct RecursiveParser<'a> {
    grammar: &'a Grammar,
    input: Vec<usize>,
    pos: usize,
    memo: HashMap<(usize, usize), MemoEntry>,
}

impl<'a> RecursiveParser<'a> {
    pub fn new(grammar: &'a Grammar) -> Self {
        Self {
            grammar,
            input: Vec::new(),
            pos: 0,
            memo: HashMap::new(),
        }
    }

    pub fn parse(&mut self, input: &str) -> Result<ParseTree, ParseError> {
        let start = self.grammar.start_symbol.ok_or(ParseError::EmptyGrammar)?;
        if input.is_empty() {
            return Err(ParseError::EmptyInput);
        }

        // the end marker is not a real input token
        let end_mark = self.grammar.get_symbol_index(END_MARK);
        let mut tokens: Vec<usize> = Vec::with_capacity(input.len());
        for c in input.chars() {
            let idx = self
                .grammar
                .get_symbol_index(&c.to_string())
                .filter(|&idx| {
                    Some(idx) != end_mark
                        && matches!(self.grammar.symbols[idx], Symbol::Terminal(_))
                })
                .ok_or(ParseError::UnknownToken(c))?;
            tokens.push(idx);
        }

        self.input = tokens;
        self.pos = 0;
        self.memo.clear();

        match self.derive_non_terminal(start, 0) {
            Some(tree) if self.pos == self.input.len() => Ok(tree),
            _ => Err(ParseError::Failure { position: self.pos }),
        }
    }

    fn derive_non_terminal(&mut self, nt_idx: usize, start_pos: usize) -> Option<ParseTree> {
        if let Some(entry) = self.memo.get(&(nt_idx, start_pos)) {
            return match entry {
                Some((tree, end_pos)) => {
                    self.pos = *end_pos;
                    Some(tree.clone())
                }
                None => {
                    self.pos = start_pos;
                    None
                }
            };
        }

        let grammar = self.grammar;
        let nt = grammar.symbols[nt_idx].non_terminal().unwrap();

        // declaration order is the tie-break: the first alternative that
        // succeeds wins, even on ambiguous grammars
        for (alternative, production) in nt.productions.iter().enumerate() {
            self.pos = start_pos;

            if production.is_empty() {
                let node = ParseTree::NonTerminal {
                    symbol: nt.name.clone(),
                    production: ProductionRef {
                        left: nt_idx,
                        alternative,
                    },
                    children: vec![ParseTree::Epsilon],
                };
                self.memo
                    .insert((nt_idx, start_pos), Some((node.clone(), self.pos)));
                return Some(node);
            }

            let mut children: Vec<ParseTree> = Vec::with_capacity(production.len());
            let mut success = true;
            for &symbol_idx in production {
                match &grammar.symbols[symbol_idx] {
                    Symbol::NonTerminal(_) => match self.derive_non_terminal(symbol_idx, self.pos)
                    {
                        Some(child) => children.push(child),
                        None => {
                            success = false;
                            break;
                        }
                    },
                    Symbol::Terminal(name) => {
                        if self.pos < self.input.len() && self.input[self.pos] == symbol_idx {
                            children.push(ParseTree::Terminal(name.clone()));
                            self.pos += 1;
                        } else {
                            success = false;
                            break;
                        }
                    }
                }
            }

            if success {
                let node = ParseTree::NonTerminal {
                    symbol: nt.name.clone(),
                    production: ProductionRef {
                        left: nt_idx,
                        alternative,
                    },
                    children,
                };
                self.memo
                    .insert((nt_idx, start_pos), Some((node.clone(), self.pos)));
                return Some(node);
            }
        }

        self.pos = start_pos;
        self.memo.insert((nt_idx, start_pos), None);
        None
    }
}
