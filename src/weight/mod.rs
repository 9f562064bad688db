//! Weight laws: restricted expressions giving a polygon weight along the axis
//!
//! A law is written as `"startName,endName : expression"`. The expression
//! is tokenized, parsed into a tree and interpreted over a fixed
//! environment (`z`, `t`, `w0`, `w1`, `L`, math functions, vertex distances
//! and lookup tables). Nothing else is reachable from an expression.

mod eval;
mod law;
mod lexer;
mod lookup;
mod parser;

pub use eval::EvalContext;
pub use law::{WeightLaw, WeightLawTable};
pub use lookup::LookupTable;
pub use parser::{parse_expression, Expr};
