//! Pratt parser producing the weight-law expression tree
//!
//! Identifiers and function names are resolved while parsing against the
//! fixed environment of a weight law, so an expression that parses can only
//! refer to known variables and functions with the right number of arguments.

use std::ops::Range;

use serde::{Deserialize, Serialize};

use super::lexer::{tokenize, Token};

/// Variables visible to a weight law
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Variable {
    /// Absolute longitudinal coordinate
    Z,
    /// Normalized coordinate `(z - z0) / (z1 - z0)`
    T,
    /// Weight of the start polygon
    W0,
    /// Weight of the end polygon
    W1,
    /// Field length `z1 - z0`
    Length,
    Pi,
    E,
}

impl Variable {
    fn resolve(name: &str) -> Option<Self> {
        match name {
            "z" => Some(Self::Z),
            "t" => Some(Self::T),
            "w0" => Some(Self::W0),
            "w1" => Some(Self::W1),
            "L" => Some(Self::Length),
            "pi" => Some(Self::Pi),
            "e" => Some(Self::E),
            _ => None,
        }
    }
}

/// Built-in scalar functions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Function {
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Atan2,
    Sinh,
    Cosh,
    Tanh,
    Exp,
    Ln,
    Log10,
    Sqrt,
    Abs,
    Min,
    Max,
    Pow,
    Floor,
    Ceil,
    Clamp,
}

impl Function {
    fn resolve(name: &str) -> Option<Self> {
        let f = match name {
            "sin" => Self::Sin,
            "cos" => Self::Cos,
            "tan" => Self::Tan,
            "asin" => Self::Asin,
            "acos" => Self::Acos,
            "atan" => Self::Atan,
            "atan2" => Self::Atan2,
            "sinh" => Self::Sinh,
            "cosh" => Self::Cosh,
            "tanh" => Self::Tanh,
            "exp" => Self::Exp,
            "ln" | "log" => Self::Ln,
            "log10" => Self::Log10,
            "sqrt" => Self::Sqrt,
            "abs" => Self::Abs,
            "min" => Self::Min,
            "max" => Self::Max,
            "pow" => Self::Pow,
            "floor" => Self::Floor,
            "ceil" => Self::Ceil,
            "clamp" => Self::Clamp,
            _ => return None,
        };
        Some(f)
    }

    /// Number of arguments, `None` for variadic (at least one)
    fn arity(self) -> Option<usize> {
        match self {
            Self::Min | Self::Max => None,
            Self::Atan2 | Self::Pow => Some(2),
            Self::Clamp => Some(3),
            _ => Some(1),
        }
    }
}

/// Which polygon a vertex-distance query reads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VertexSource {
    /// Interpolated polygon at the evaluation coordinate
    Current,
    /// Start boundary polygon
    Start,
    /// End boundary polygon
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

/// Expression tree of a weight law
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expr {
    Number(f64),
    Var(Variable),
    Neg(Box<Expr>),
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Call {
        func: Function,
        args: Vec<Expr>,
    },
    /// Distance between two vertices of a polygon of the pair
    Distance {
        source: VertexSource,
        i: Box<Expr>,
        j: Box<Expr>,
    },
    /// Interpolated value from an external lookup table
    Lookup(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Assoc {
    Left,
    Right,
}

fn binary_op_info(token: &Token) -> Option<(u8, Assoc, BinaryOp)> {
    match token {
        Token::Plus => Some((10, Assoc::Left, BinaryOp::Add)),
        Token::Minus => Some((10, Assoc::Left, BinaryOp::Sub)),
        Token::Star => Some((20, Assoc::Left, BinaryOp::Mul)),
        Token::Slash => Some((20, Assoc::Left, BinaryOp::Div)),
        Token::Caret => Some((30, Assoc::Right, BinaryOp::Pow)),
        _ => None,
    }
}

/// Unary minus binds looser than `^` so that `-x^2 == -(x^2)`
const UNARY_PRECEDENCE: u8 = 30;

/// Deepest expression tree accepted; bounds parser recursion and every later tree walk
pub const MAX_NESTING: usize = 256;

/// Parse a complete expression
pub fn parse_expression(source: &str) -> Result<Expr, String> {
    let tokens = tokenize(source)?;
    if tokens.is_empty() {
        return Err("empty expression".to_string());
    }
    let mut parser = Parser {
        tokens: &tokens,
        pos: 0,
        depth: 0,
    };
    let (expr, _) = parser.parse_pratt(0)?;
    match parser.peek() {
        None => Ok(expr),
        Some(token) => Err(format!("unexpected {token} at byte {}", parser.offset())),
    }
}

/// Parsed subtree with its height
type Node = (Expr, usize);

struct Parser<'src> {
    tokens: &'src [(Token, Range<usize>)],
    pos: usize,
    /// Active `parse_pratt` frames
    depth: usize,
}

impl Parser<'_> {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|(tok, _)| tok)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).map(|(tok, _)| tok.clone());
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn offset(&self) -> usize {
        self.tokens
            .get(self.pos)
            .or(self.tokens.last())
            .map(|(_, span)| span.start)
            .unwrap_or(0)
    }

    fn expect(&mut self, expected: Token) -> Result<(), String> {
        match self.advance() {
            Some(token) if token == expected => Ok(()),
            Some(token) => Err(format!("expected {expected}, found {token}")),
            None => Err(format!("expected {expected}, found end of expression")),
        }
    }

    fn too_deep(&self) -> String {
        format!(
            "expression nests deeper than {MAX_NESTING} levels at byte {}",
            self.offset()
        )
    }

    fn node(&self, expr: Expr, height: usize) -> Result<Node, String> {
        if height > MAX_NESTING {
            return Err(self.too_deep());
        }
        Ok((expr, height))
    }

    fn parse_pratt(&mut self, min_prec: u8) -> Result<Node, String> {
        if self.depth >= MAX_NESTING {
            return Err(self.too_deep());
        }
        self.depth += 1;
        let result = self.parse_binary(min_prec);
        self.depth -= 1;
        result
    }

    fn parse_binary(&mut self, min_prec: u8) -> Result<Node, String> {
        let (mut left, mut height) = self.parse_prefix()?;

        while let Some((prec, assoc, op)) = self.peek().and_then(binary_op_info) {
            if prec < min_prec {
                break;
            }
            self.advance();
            let next_prec = if assoc == Assoc::Left { prec + 1 } else { prec };
            let (right, right_height) = self.parse_pratt(next_prec)?;
            let expr = Expr::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
            };
            (left, height) = self.node(expr, 1 + height.max(right_height))?;
        }

        Ok((left, height))
    }

    fn parse_prefix(&mut self) -> Result<Node, String> {
        match self.peek() {
            Some(Token::Minus) => {
                self.advance();
                let (operand, height) = self.parse_pratt(UNARY_PRECEDENCE)?;
                self.node(Expr::Neg(Box::new(operand)), height + 1)
            }
            Some(Token::Plus) => {
                self.advance();
                self.parse_pratt(UNARY_PRECEDENCE)
            }
            _ => self.parse_atom(),
        }
    }

    fn parse_atom(&mut self) -> Result<Node, String> {
        let offset = self.offset();
        match self.advance() {
            Some(Token::Number(n)) => Ok((Expr::Number(n), 1)),
            Some(Token::LParen) => {
                let inner = self.parse_pratt(0)?;
                self.expect(Token::RParen)?;
                Ok(inner)
            }
            Some(Token::Ident(name)) => {
                if self.peek() == Some(&Token::LParen) {
                    self.parse_call(&name, offset)
                } else {
                    Variable::resolve(&name)
                        .map(|var| (Expr::Var(var), 1))
                        .ok_or_else(|| format!("unknown variable '{name}' at byte {offset}"))
                }
            }
            Some(Token::Str(s)) => Err(format!("string \"{s}\" is only allowed as a lookup argument")),
            Some(token) => Err(format!("unexpected {token} at byte {offset}")),
            None => Err("unexpected end of expression".to_string()),
        }
    }

    fn parse_call(&mut self, name: &str, offset: usize) -> Result<Node, String> {
        self.expect(Token::LParen)?;

        if name == "lookup" {
            let path = match self.advance() {
                Some(Token::Str(path)) => path,
                _ => return Err("lookup expects a single quoted file path".to_string()),
            };
            self.expect(Token::RParen)?;
            return Ok((Expr::Lookup(path), 1));
        }

        let mut args = Vec::new();
        let mut height = 0;
        if self.peek() != Some(&Token::RParen) {
            loop {
                let (arg, arg_height) = self.parse_pratt(0)?;
                height = height.max(arg_height);
                args.push(arg);
                if self.peek() == Some(&Token::Comma) {
                    self.advance();
                } else {
                    break;
                }
            }
        }
        self.expect(Token::RParen)?;

        let source = match name {
            "d" => Some(VertexSource::Current),
            "d0" => Some(VertexSource::Start),
            "d1" => Some(VertexSource::End),
            _ => None,
        };
        if let Some(source) = source {
            if args.len() != 2 {
                return Err(format!("{name}() takes 2 arguments, got {}", args.len()));
            }
            let j = args.pop().map(Box::new);
            let i = args.pop().map(Box::new);
            return match (i, j) {
                (Some(i), Some(j)) => self.node(Expr::Distance { source, i, j }, height + 1),
                _ => Err(format!("{name}() takes 2 arguments")),
            };
        }

        let func = Function::resolve(name).ok_or_else(|| format!("unknown function '{name}' at byte {offset}"))?;
        match func.arity() {
            Some(n) if n != args.len() => {
                return Err(format!("{name}() takes {n} argument(s), got {}", args.len()));
            }
            None if args.is_empty() => {
                return Err(format!("{name}() takes at least one argument"));
            }
            _ => {}
        }
        self.node(Expr::Call { func, args }, height + 1)
    }
}

/// Every lookup-table path an expression reads
pub fn lookup_paths(expr: &Expr) -> Vec<&str> {
    let mut paths = Vec::new();
    let mut stack = vec![expr];
    while let Some(expr) = stack.pop() {
        match expr {
            Expr::Number(_) | Expr::Var(_) => {}
            Expr::Neg(inner) => stack.push(inner),
            Expr::Binary { left, right, .. } => {
                stack.push(left);
                stack.push(right);
            }
            Expr::Call { args, .. } => stack.extend(args.iter()),
            Expr::Distance { i, j, .. } => {
                stack.push(i);
                stack.push(j);
            }
            Expr::Lookup(path) => paths.push(path.as_str()),
        }
    }
    paths
}
