use crowbook_text_processing::escape;
use serde::Serialize;

use super::{
    parser::{ParseTree, ProductionRef},
    Grammar, EPSILON,
};

#[derive(Debug, Clone, Serialize)]
pub struct ProductionOutput<'a> {
    pub left: &'a str,
    pub rights: Vec<Vec<&'a str>>,
}

impl ProductionOutput<'_> {
    pub fn to_plaintext(&self, left_width: usize, multiline: bool) -> String {
        self.rights
            .iter()
            .map(|right| right.join(" "))
            .enumerate()
            .map(|(i, right)| {
                if i == 0 {
                    format!("{:>width$} -> {}", self.left, right, width = left_width)
                } else {
                    if multiline {
                        format!("{:>width$}  | {}", "", right, width = left_width)
                    } else {
                        format!(" | {}", right)
                    }
                }
            })
            .collect::<Vec<_>>()
            .join(if multiline { "\n" } else { "" })
    }

    pub fn to_latex(&self, and_sign: bool) -> String {
        if self.rights.len() == 0 {
            return String::new();
        }

        let left = if and_sign {
            format!("{} & \\rightarrow &", escape::tex(self.left)).to_string()
        } else {
            format!("{} \\rightarrow ", escape::tex(self.left)).to_string()
        };
        let right = self
            .rights
            .iter()
            .map(|right| {
                right
                    .iter()
                    .map(|s| escape::tex(*s))
                    .collect::<Vec<_>>()
                    .join(" \\ ")
            })
            .collect::<Vec<_>>()
            .join(" \\mid ");

        let output = left + &right;
        output.replace(EPSILON, "\\epsilon")
    }
}

#[derive(Serialize)]
pub struct ProductionOutputVec<'a> {
    productions: Vec<ProductionOutput<'a>>,
}

impl ProductionOutputVec<'_> {
    pub fn to_plaintext(&self) -> String {
        let left_max_len = self.productions.iter().map(|p| p.left.len()).max().unwrap();
        self.productions
            .iter()
            .map(|s| s.to_plaintext(left_max_len, true))
            .collect::<Vec<String>>()
            .join("\n")
    }

    pub fn to_latex(&self) -> String {
        std::iter::once("\\[\\begin{array}{cll}".to_string())
            .chain(self.productions.iter().map(|s| s.to_latex(true)))
            .chain(std::iter::once("\\end{array}\\]".to_string()))
            .collect::<Vec<String>>()
            .join("\\\\\n")
    }
}

impl Grammar {
    fn production_to_vec_str(&self, production: &[usize]) -> Vec<&str> {
        if production.is_empty() {
            vec![EPSILON]
        } else {
            production
                .iter()
                .map(|&idx| self.get_symbol_name(idx))
                .collect()
        }
    }

    pub fn to_production_output_vec(&self) -> ProductionOutputVec {
        let mut productions = Vec::new();
        for non_terminal in self.non_terminal_iter() {
            let mut rights = Vec::new();
            for production in &non_terminal.productions {
                rights.push(self.production_to_vec_str(production));
            }
            productions.push(ProductionOutput {
                left: non_terminal.name.as_str(),
                rights,
            });
        }
        ProductionOutputVec { productions }
    }

    pub fn production_to_string(&self, production: ProductionRef) -> String {
        let nt = self.symbols[production.left].non_terminal().unwrap();
        format!(
            "{} -> {}",
            nt.name,
            self.production_to_vec_str(&nt.productions[production.alternative])
                .join(" ")
        )
    }
}

#[derive(Serialize)]
struct NonTerminalOutput<'a> {
    name: &'a str,
    nullable: bool,
    first: Vec<&'a str>,
    follow: Vec<&'a str>,
}

impl NonTerminalOutput<'_> {
    fn to_plaintext(&self) -> String {
        format!(
            "{} | {} | {} | {}",
            self.name,
            self.nullable,
            self.first.join(", "),
            self.follow.join(", ")
        )
    }
    fn to_latex(&self) -> String {
        fn f(a: &Vec<&str>) -> String {
            a.iter()
                .map(|s| escape::tex(*s))
                .collect::<Vec<_>>()
                .join(r"\ ")
                .replace(EPSILON, r"$\epsilon$")
        }

        format!(
            "{} & {} & {} & {}",
            escape::tex(self.name),
            self.nullable,
            f(&self.first),
            f(&self.follow)
        )
    }
}

#[derive(Serialize)]
pub struct NonTerminalOutputVec<'a> {
    data: Vec<NonTerminalOutput<'a>>,
}

impl NonTerminalOutputVec<'_> {
    pub fn to_plaintext(&self) -> String {
        self.data
            .iter()
            .map(|s| s.to_plaintext())
            .collect::<Vec<String>>()
            .join("\n")
    }
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap()
    }
    pub fn to_latex(&self) -> String {
        let content = self
            .data
            .iter()
            .map(|e| e.to_latex())
            .collect::<Vec<_>>()
            .join("\\\\\n ");

        "\\begin{tabular}{c|c|c|c}\n".to_string()
            + "Symbol & Nullable & First & Follow\\\\\\hline\n"
            + &content
            + "\\\\\n\\end{tabular}"
    }
}

impl Grammar {
    pub fn to_non_terminal_output_vec(&self) -> NonTerminalOutputVec {
        let mut data = Vec::new();
        for non_terminal in self.non_terminal_iter() {
            let mut t = NonTerminalOutput {
                name: non_terminal.name.as_str(),
                nullable: non_terminal.nullable,
                first: non_terminal
                    .first
                    .iter()
                    .map(|idx| self.get_symbol_name(*idx))
                    .collect(),
                follow: non_terminal
                    .follow
                    .iter()
                    .map(|idx| self.get_symbol_name(*idx))
                    .collect(),
            };
            t.first.sort();
            t.follow.sort();

            if non_terminal.nullable {
                t.first.push(EPSILON);
            }
            data.push(t);
        }
        NonTerminalOutputVec { data }
    }
}

#[derive(Debug, Serialize)]
pub struct Ll1Output {
    pub ll1: bool,
}

impl Ll1Output {
    pub fn to_plaintext(&self) -> String {
        format!("The grammar is {}LL(1)", if self.ll1 { "" } else { "not " })
    }
    pub fn to_latex(&self) -> String {
        format!(
            "\\text{{The grammar is {}LL(1)}}",
            if self.ll1 { "" } else { "not " }
        )
    }
}

impl Grammar {
    pub fn to_ll1_output(&mut self) -> Ll1Output {
        Ll1Output { ll1: self.is_ll1() }
    }
}

impl ParseTree {
    pub fn to_plaintext(&self, grammar: &Grammar) -> String {
        let mut lines: Vec<String> = Vec::new();
        self.collect_lines(grammar, "", true, &mut lines);
        lines.join("\n")
    }

    fn collect_lines(
        &self,
        grammar: &Grammar,
        prefix: &str,
        is_last: bool,
        lines: &mut Vec<String>,
    ) {
        let connector = if is_last { "└── " } else { "├── " };
        let (label, rule, children): (&str, Option<String>, &[ParseTree]) = match self {
            ParseTree::Epsilon => (EPSILON, None, &[]),
            ParseTree::Terminal(name) => (name.as_str(), None, &[]),
            ParseTree::NonTerminal {
                symbol,
                production,
                children,
            } => (
                symbol.as_str(),
                Some(grammar.production_to_string(*production)),
                children.as_slice(),
            ),
        };

        match rule {
            Some(rule) => lines.push(format!("{}{}{} ({})", prefix, connector, label, rule)),
            None => lines.push(format!("{}{}{}", prefix, connector, label)),
        }

        let child_prefix = format!("{}{}", prefix, if is_last { "    " } else { "│   " });
        for (i, child) in children.iter().enumerate() {
            child.collect_lines(grammar, &child_prefix, i + 1 == children.len(), lines);
        }
    }
}
