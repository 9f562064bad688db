//! Interpreter for weight-law expressions

use std::path::Path;

use super::lookup::LookupTable;
use super::parser::{BinaryOp, Expr, Function, Variable, VertexSource};
use crate::geometry::Point;

/// Everything a weight law may read at one evaluation coordinate
#[derive(Debug, Clone, Copy)]
pub struct EvalContext<'a> {
    pub z: f64,
    pub t: f64,
    pub w0: f64,
    pub w1: f64,
    pub length: f64,
    /// Interpolated vertices of the polygon at `z`
    pub current: &'a [Point],
    pub start: &'a [Point],
    pub end: &'a [Point],
}

impl EvalContext<'_> {
    fn variable(&self, var: Variable) -> f64 {
        match var {
            Variable::Z => self.z,
            Variable::T => self.t,
            Variable::W0 => self.w0,
            Variable::W1 => self.w1,
            Variable::Length => self.length,
            Variable::Pi => std::f64::consts::PI,
            Variable::E => std::f64::consts::E,
        }
    }

    fn vertices(&self, source: VertexSource) -> &[Point] {
        match source {
            VertexSource::Current => self.current,
            VertexSource::Start => self.start,
            VertexSource::End => self.end,
        }
    }
}

/// Evaluate an expression tree; the result is not checked for finiteness here
pub fn evaluate(expr: &Expr, ctx: &EvalContext) -> Result<f64, String> {
    match expr {
        Expr::Number(n) => Ok(*n),
        Expr::Var(var) => Ok(ctx.variable(*var)),
        Expr::Neg(inner) => Ok(-evaluate(inner, ctx)?),
        Expr::Binary { op, left, right } => {
            let a = evaluate(left, ctx)?;
            let b = evaluate(right, ctx)?;
            Ok(match op {
                BinaryOp::Add => a + b,
                BinaryOp::Sub => a - b,
                BinaryOp::Mul => a * b,
                BinaryOp::Div => {
                    if b == 0.0 {
                        return Err("division by zero".to_string());
                    }
                    a / b
                }
                BinaryOp::Pow => a.powf(b),
            })
        }
        Expr::Call { func, args } => {
            let values = args
                .iter()
                .map(|arg| evaluate(arg, ctx))
                .collect::<Result<Vec<_>, _>>()?;
            call(*func, &values)
        }
        Expr::Distance { source, i, j } => {
            let vertices = ctx.vertices(*source);
            let a = vertex_index(evaluate(i, ctx)?, vertices.len())?;
            let b = vertex_index(evaluate(j, ctx)?, vertices.len())?;
            Ok(vertices[a].distance_to(&vertices[b]))
        }
        Expr::Lookup(path) => {
            let table = LookupTable::load(Path::new(path)).map_err(|e| e.to_string())?;
            table.interpolate(ctx.z).map_err(|msg| format!("lookup('{path}'): {msg}"))
        }
    }
}

fn vertex_index(value: f64, count: usize) -> Result<usize, String> {
    if value.fract() != 0.0 || value < 0.0 || value >= count as f64 {
        return Err(format!("vertex index {value} is not an integer in 0..{count}"));
    }
    Ok(value as usize)
}

fn call(func: Function, args: &[f64]) -> Result<f64, String> {
    let x = args.first().copied().unwrap_or(f64::NAN);
    let value = match func {
        Function::Sin => x.sin(),
        Function::Cos => x.cos(),
        Function::Tan => x.tan(),
        Function::Asin => x.asin(),
        Function::Acos => x.acos(),
        Function::Atan => x.atan(),
        Function::Atan2 => x.atan2(args[1]),
        Function::Sinh => x.sinh(),
        Function::Cosh => x.cosh(),
        Function::Tanh => x.tanh(),
        Function::Exp => x.exp(),
        Function::Ln => x.ln(),
        Function::Log10 => x.log10(),
        Function::Sqrt => x.sqrt(),
        Function::Abs => x.abs(),
        Function::Min => args.iter().copied().fold(f64::INFINITY, f64::min),
        Function::Max => args.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        Function::Pow => x.powf(args[1]),
        Function::Floor => x.floor(),
        Function::Ceil => x.ceil(),
        Function::Clamp => {
            let (lo, hi) = (args[1], args[2]);
            if lo > hi {
                return Err(format!("clamp bounds are reversed ({lo} > {hi})"));
            }
            x.clamp(lo, hi)
        }
    };
    Ok(value)
}
