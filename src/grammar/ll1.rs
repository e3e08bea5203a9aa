use std::collections::HashSet;

use crate::Grammar;

impl Grammar {
    /// Decides whether the grammar is predictively parsable with one symbol
    /// of lookahead. Runs a fresh nullable/FIRST/FOLLOW analysis, then
    /// applies the two disjointness conditions. Never alters the grammar.
    pub fn is_ll1(&mut self) -> bool {
        self.reset_nullable_first_follow();
        self.calculate_nullable_first_follow();

        // two alternatives of one non-terminal must not share a FIRST
        // terminal, and at most one of them may be nullable
        for nt in self.non_terminal_iter() {
            if nt.productions.len() < 2 {
                continue;
            }
            let firsts: Vec<(HashSet<usize>, bool)> = nt
                .productions
                .iter()
                .map(|production| self.calculate_first_for_production(production))
                .collect();
            for (i, (first, nullable)) in firsts.iter().enumerate() {
                for (other_first, other_nullable) in &firsts[..i] {
                    if (*nullable && *other_nullable) || !first.is_disjoint(other_first) {
                        return false;
                    }
                }
            }
        }

        // a non-terminal with an epsilon production must not be followed by
        // anything it can also start with
        for nt in self.non_terminal_iter() {
            if nt.productions.iter().any(|production| production.is_empty())
                && !nt.follow.is_disjoint(&nt.first)
            {
                return false;
            }
        }

        true
    }
}
