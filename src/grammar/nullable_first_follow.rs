use std::collections::HashSet;

use super::{grammar::Symbol, Grammar, END_MARK};

impl Grammar {
    pub fn calculate_nullable_first_follow(&mut self) {
        if let Some(start_idx) = self.start_symbol {
            self.symbols[start_idx]
                .mut_non_terminal()
                .unwrap()
                .follow
                .insert(self.symbol_table[END_MARK]);
            self.calculate_nullable();
            self.calculate_first();
            self.calculate_follow();
        }
    }

    pub fn reset_nullable_first_follow(&mut self) {
        for nt in self.non_terminal_iter_mut() {
            nt.nullable = false;
            nt.first = HashSet::new();
            nt.follow = HashSet::new();
        }
    }

    fn calculate_nullable(&mut self) {
        let mut changed = true;
        while changed {
            changed = false;
            for i in 0..self.symbols.len() {
                let nullable: bool = match &self.symbols[i] {
                    Symbol::Terminal(_) => continue,
                    Symbol::NonTerminal(nt) => {
                        if nt.nullable {
                            continue;
                        }
                        // an empty production is vacuously all-nullable
                        nt.productions.iter().any(|production| {
                            production.iter().all(|s| match &self.symbols[*s] {
                                Symbol::Terminal(_) => false,
                                Symbol::NonTerminal(e) => e.nullable,
                            })
                        })
                    }
                };

                if nullable {
                    self.symbols[i].mut_non_terminal().unwrap().nullable = true;
                    changed = true;
                }
            }
        }
    }

    /// FIRST of a symbol sequence: scan left to right, stop at the first
    /// non-nullable symbol. The bool reports whether the whole sequence is
    /// nullable (the sequence's epsilon marker).
    pub fn calculate_first_for_production(&self, production: &[usize]) -> (HashSet<usize>, bool) {
        let mut first: HashSet<usize> = HashSet::new();
        for (idx, symbol) in production.iter().map(|i| (*i, &self.symbols[*i])) {
            match symbol {
                Symbol::Terminal(_) => {
                    first.insert(idx);
                    return (first, false);
                }
                Symbol::NonTerminal(nt) => {
                    first.extend(nt.first.iter().cloned());
                    if !nt.nullable {
                        return (first, false);
                    }
                }
            }
        }
        (first, true)
    }

    fn calculate_first(&mut self) {
        let mut changed = true;
        while changed {
            changed = false;
            for i in 0..self.symbols.len() {
                let first: HashSet<usize> = match &self.symbols[i] {
                    Symbol::Terminal(_) => continue,
                    Symbol::NonTerminal(nt) => {
                        nt.productions
                            .iter()
                            .fold(HashSet::new(), |mut first, production| {
                                first.extend(
                                    self.calculate_first_for_production(production).0.into_iter(),
                                );
                                first
                            })
                    }
                };

                let nt = self.symbols[i].mut_non_terminal().unwrap();
                if nt.first.len() != first.len() {
                    changed = true;
                    nt.first = first;
                }
            }
        }
    }

    fn calculate_follow(&mut self) {
        let mut changed = true;
        while changed {
            changed = false;

            let mut additions: Vec<(usize, HashSet<usize>)> = Vec::new();
            for left in self.non_terminal_iter() {
                for production in &left.productions {
                    for (i, &idx) in production.iter().enumerate() {
                        if self.symbols[idx].non_terminal().is_none() {
                            continue;
                        }
                        let (mut incoming, rest_nullable) =
                            self.calculate_first_for_production(&production[i + 1..]);
                        if rest_nullable {
                            incoming.extend(left.follow.iter().cloned());
                        }
                        if !incoming.is_empty() {
                            additions.push((idx, incoming));
                        }
                    }
                }
            }

            for (idx, incoming) in additions {
                let nt = self.symbols[idx].mut_non_terminal().unwrap();
                let before = nt.follow.len();
                nt.follow.extend(incoming.into_iter());
                if nt.follow.len() != before {
                    changed = true;
                }
            }
        }
    }
}
