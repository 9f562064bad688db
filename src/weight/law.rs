//! Weight laws and the replace-only law table

use std::collections::HashMap;

use serde::{Serialize, Serializer};

use super::eval::{evaluate, EvalContext};
use super::parser::{lookup_paths, parse_expression, Expr};
use crate::error::{SectionError, SectionResult};

/// A scalar law `w(z)` attached to a pair of corresponding polygons
#[derive(Debug, Clone, PartialEq)]
pub struct WeightLaw {
    start: String,
    end: String,
    source: String,
    expr: Expr,
}

impl WeightLaw {
    /// Parse `"startName,endName : expression"`
    pub fn parse(spec: &str) -> SectionResult<Self> {
        let syntax_error = |message: &str| SectionError::WeightLawSyntax {
            expression: spec.to_string(),
            message: message.to_string(),
        };

        let (names, source) = spec
            .split_once(':')
            .ok_or_else(|| syntax_error("expected 'startName,endName : expression'"))?;
        let (start, end) = names
            .split_once(',')
            .ok_or_else(|| syntax_error("expected two polygon names separated by ','"))?;
        let (start, end, source) = (start.trim(), end.trim(), source.trim());
        if start.is_empty() || end.is_empty() {
            return Err(syntax_error("polygon names must not be empty"));
        }

        Self::new(start, end, source)
    }

    /// Build a law from its parts
    pub fn new(start: &str, end: &str, source: &str) -> SectionResult<Self> {
        let expr = parse_expression(source).map_err(|message| SectionError::WeightLawSyntax {
            expression: source.to_string(),
            message,
        })?;
        Ok(Self {
            start: start.to_string(),
            end: end.to_string(),
            source: source.to_string(),
            expr,
        })
    }

    pub fn start(&self) -> &str {
        &self.start
    }

    pub fn end(&self) -> &str {
        &self.end
    }

    /// Expression text as written by the caller
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Lookup-table files the law reads when evaluated
    pub fn lookup_paths(&self) -> Vec<&str> {
        lookup_paths(&self.expr)
    }

    /// Evaluate the law; NaN and infinite results are errors
    pub fn evaluate(&self, ctx: &EvalContext) -> SectionResult<f64> {
        let eval_error = |message: String| SectionError::WeightLawEval {
            expression: self.source.clone(),
            z: ctx.z,
            message,
        };
        let value = evaluate(&self.expr, ctx).map_err(eval_error)?;
        if !value.is_finite() {
            return Err(eval_error(format!("result {value} is not finite")));
        }
        Ok(value)
    }
}

impl Serialize for WeightLaw {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format!("{},{} : {}", self.start, self.end, self.source))
    }
}

/// Weight laws keyed by start polygon name
///
/// Tables are replaced wholesale, never edited in place.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WeightLawTable {
    laws: HashMap<String, WeightLaw>,
}

impl WeightLawTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a list of `"startName,endName : expression"` entries
    pub fn parse<S: AsRef<str>>(specs: &[S]) -> SectionResult<Self> {
        let mut table = Self::new();
        for spec in specs {
            let law = WeightLaw::parse(spec.as_ref())?;
            if table.laws.contains_key(law.start()) {
                return Err(SectionError::InvalidInput(format!(
                    "more than one weight law for polygon '{}'",
                    law.start()
                )));
            }
            table.laws.insert(law.start.clone(), law);
        }
        Ok(table)
    }

    /// Law for the pair whose start polygon is `start`
    pub fn get(&self, start: &str) -> Option<&WeightLaw> {
        self.laws.get(start)
    }

    pub fn iter(&self) -> impl Iterator<Item = &WeightLaw> {
        self.laws.values()
    }

    pub fn len(&self) -> usize {
        self.laws.len()
    }

    pub fn is_empty(&self) -> bool {
        self.laws.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;

    fn ctx<'a>(z: f64, vertices: &'a [Point]) -> EvalContext<'a> {
        EvalContext {
            z,
            t: z / 2.0,
            w0: 1.0,
            w1: 3.0,
            length: 2.0,
            current: vertices,
            start: vertices,
            end: vertices,
        }
    }

    #[test]
    fn test_parse_law_spec() {
        let law = WeightLaw::parse("flange_a , flange_b : w0 * (1 - t) + w1 * t").unwrap();
        assert_eq!(law.start(), "flange_a");
        assert_eq!(law.end(), "flange_b");
        assert_eq!(law.source(), "w0 * (1 - t) + w1 * t");

        let vertices = [Point::new(0.0, 0.0)];
        assert!((law.evaluate(&ctx(1.0, &vertices)).unwrap() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_malformed_specs() {
        assert!(matches!(WeightLaw::parse("a b : t"), Err(SectionError::WeightLawSyntax { .. })));
        assert!(matches!(WeightLaw::parse("a,b t"), Err(SectionError::WeightLawSyntax { .. })));
        assert!(matches!(WeightLaw::parse("a,b : t +"), Err(SectionError::WeightLawSyntax { .. })));
        assert!(matches!(WeightLaw::parse(" ,b : t"), Err(SectionError::WeightLawSyntax { .. })));
    }

    #[test]
    fn test_deeply_nested_law_is_a_syntax_error() {
        let spec = format!("a,b : {}w0{}", "(".repeat(100_000), ")".repeat(100_000));
        let err = WeightLaw::parse(&spec).unwrap_err();
        assert!(matches!(err, SectionError::WeightLawSyntax { ref message, .. } if message.contains("nests deeper")));
    }

    #[test]
    fn test_lookup_paths() {
        let law = WeightLaw::parse("a,b : w0 * lookup('tables/a.txt')").unwrap();
        assert_eq!(law.lookup_paths(), vec!["tables/a.txt"]);
        assert!(WeightLaw::parse("a,b : w0").unwrap().lookup_paths().is_empty());
    }

    #[test]
    fn test_non_finite_result_is_rejected() {
        let law = WeightLaw::parse("a,b : ln(t - t + 0) ").unwrap();
        let vertices = [Point::new(0.0, 0.0)];
        let err = law.evaluate(&ctx(1.0, &vertices)).unwrap_err();
        assert!(matches!(err, SectionError::WeightLawEval { z, .. } if z == 1.0));
    }

    #[test]
    fn test_duplicate_start_polygon_rejected() {
        let result = WeightLawTable::parse(&["a,b : 1", "a,c : 2"]);
        assert!(matches!(result, Err(SectionError::InvalidInput(_))));
    }
}
