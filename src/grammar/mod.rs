pub mod grammar;
pub mod ll1;
pub mod nullable_first_follow;
pub mod parse;
pub mod parser;
pub mod pretty_print;
pub use grammar::Grammar;
pub use parser::{ParseError, ParseTree, ProductionRef, RecursiveParser};

pub const EPSILON: &str = "ε";
pub const END_MARK: &str = "$";
