use crate::Grammar;

use super::EPSILON;

impl Grammar {
    /// Loads a grammar from text. One rule per line, `->` or `→` between the
    /// sides, `|` between alternatives, `ε` (or `ϵ`) for an epsilon
    /// alternative. A line starting with `|` continues the previous left
    /// side. The first left side is the start symbol.
    pub fn parse(grammar: &str) -> Result<Self, String> {
        let mut g = Self::new();

        let text = grammar.replace('→', "->");

        let mut raw_productions: Vec<(usize, &str)> = Vec::new();

        let mut previous_left: Option<usize> = None;
        for (i, line) in text.lines().enumerate() {
            if line.chars().all(|c| c.is_whitespace()) {
                continue;
            }
            let parts: Vec<&str> = line.split("->").collect();
            if parts.len() > 2 {
                return Err(format!("Line {}: too many \"->\"", i + 1));
            }
            let (left, rights): (usize, &str) = if parts.len() == 2 {
                let left_str = parts[0].trim();
                if left_str.is_empty() {
                    return Err(format!("Line {}: empty left side", i + 1));
                } else if left_str.split_whitespace().count() != 1 {
                    return Err(format!("Line {}: left side contains whitespace", i + 1));
                }
                (
                    if let Some(idx) = g.get_symbol_index(left_str) {
                        idx
                    } else {
                        g.add_non_terminal(left_str)
                    },
                    parts[1].trim(),
                )
            } else if let Some(rest) = parts[0].trim().strip_prefix('|') {
                if let Some(idx) = previous_left {
                    (idx, rest.trim())
                } else {
                    return Err(format!("Line {}: cannot find left side", i + 1));
                }
            } else {
                return Err(format!("Line {}: cannot find left side", i + 1));
            };

            previous_left = Some(left);

            raw_productions.push((left, rights));
        }

        // Right sides resolve after every left side is known, so rules may
        // reference non-terminals defined further down.
        for (left, rights) in raw_productions {
            for right in rights.split('|') {
                let tokens: Vec<&str> = right.split_whitespace().collect();
                if tokens.iter().any(|&t| t == EPSILON || t == "ϵ") {
                    if tokens.len() != 1 {
                        return Err(format!("{} must be the whole alternative", EPSILON));
                    }
                    g.add_production(left, Vec::new());
                    continue;
                }
                let mut symbols: Vec<usize> = Vec::with_capacity(tokens.len());
                for token in tokens {
                    let idx = if let Some(idx) = g.get_symbol_index(token) {
                        idx
                    } else if token.chars().count() == 1 {
                        // terminals match one input character each
                        g.add_terminal(token.to_string())
                    } else {
                        return Err(format!(
                            "undeclared symbol \"{}\" in production for {}",
                            token,
                            g.get_symbol_name(left)
                        ));
                    };
                    symbols.push(idx);
                }
                g.add_production(left, symbols);
            }
        }

        let start = g.non_terminal_iter().next().map(|nt| nt.index);
        g.start_symbol = start;

        Ok(g)
    }
}
