//! Type expression parsing.
//!
//! Supports:
//! - Plain names: `Str`, `FileHandle`
//! - Parameterized names: `OrderedList[Str]`
//! - Nesting: `ArrayRef[ArrayRef[Int]]`
//!
//! Whitespace around names and brackets is ignored. Each family takes exactly
//! one parameter.

use std::fmt;
use std::str::FromStr;

use crate::error::RegistryError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeExpr {
    Named(String),
    Parameterized {
        base: String,
        parameter: Box<TypeExpr>,
    },
}

impl TypeExpr {
    pub fn parse(expr: &str) -> Result<TypeExpr, RegistryError> {
        parse_expr(expr.trim(), expr)
    }

    /// The outermost type name.
    pub fn base_name(&self) -> &str {
        match self {
            TypeExpr::Named(name) => name,
            TypeExpr::Parameterized { base, .. } => base,
        }
    }
}

fn malformed(original: &str, reason: impl Into<String>) -> RegistryError {
    RegistryError::MalformedExpression {
        expr: original.to_string(),
        reason: reason.into(),
    }
}

fn parse_expr(s: &str, original: &str) -> Result<TypeExpr, RegistryError> {
    let Some(open) = s.find('[') else {
        return parse_name(s, original).map(TypeExpr::Named);
    };

    let inner = s[open + 1..]
        .strip_suffix(']')
        .ok_or_else(|| malformed(original, "missing closing ']'"))?;
    let base = parse_name(s[..open].trim(), original)?;

    // The parameter must be a single balanced expression.
    let mut depth = 0i32;
    for c in inner.chars() {
        match c {
            '[' => depth += 1,
            ']' => {
                depth -= 1;
                if depth < 0 {
                    return Err(malformed(original, "unbalanced ']'"));
                }
            }
            ',' if depth == 0 => {
                return Err(malformed(original, "only one type parameter is supported"));
            }
            _ => {}
        }
    }
    if depth != 0 {
        return Err(malformed(original, "unbalanced '['"));
    }

    let inner = inner.trim();
    if inner.is_empty() {
        return Err(malformed(original, "empty type parameter"));
    }

    Ok(TypeExpr::Parameterized {
        base,
        parameter: Box::new(parse_expr(inner, original)?),
    })
}

fn parse_name(s: &str, original: &str) -> Result<String, RegistryError> {
    if s.is_empty() {
        return Err(malformed(original, "empty type name"));
    }
    if let Some(c) = s
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || *c == '_' || *c == ':'))
    {
        return Err(malformed(original, format!("unexpected character '{}'", c)));
    }
    Ok(s.to_string())
}

impl FromStr for TypeExpr {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TypeExpr::parse(s)
    }
}

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeExpr::Named(name) => f.write_str(name),
            TypeExpr::Parameterized { base, parameter } => write!(f, "{}[{}]", base, parameter),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_named() {
        assert_eq!(
            TypeExpr::parse(" FileHandle ").unwrap(),
            TypeExpr::Named("FileHandle".to_string())
        );
    }

    #[test]
    fn test_parse_nested() {
        let expr = TypeExpr::parse("ArrayRef[ ArrayRef[Int] ]").unwrap();
        assert_eq!(expr.base_name(), "ArrayRef");
        assert_eq!(expr.to_string(), "ArrayRef[ArrayRef[Int]]");
        let TypeExpr::Parameterized { parameter, .. } = expr else {
            panic!("Expected parameterized expression");
        };
        assert_eq!(parameter.to_string(), "ArrayRef[Int]");
    }

    #[test]
    fn test_parse_errors() {
        for bad in [
            "",
            "OrderedList[",
            "OrderedList[Str",
            "OrderedList[]",
            "[Str]",
            "OrderedList[Str, Int]",
            "OrderedList[Str]]",
            "Ordered List",
            "A[B]C]",
        ] {
            let err = TypeExpr::parse(bad).unwrap_err();
            assert!(
                matches!(err, RegistryError::MalformedExpression { .. }),
                "expected malformed expression for {:?}",
                bad
            );
        }
    }
}
