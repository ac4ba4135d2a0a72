//! Ordered, first-match coercion chains.
//!
//! A target type owns a list of [`CoercionRule`]s. Each rule names the type a
//! raw value must satisfy for the rule to apply (its source) and a transform
//! that produces a value of the target type. Coercion walks the list in
//! declaration order and applies the first rule whose source accepts the
//! value. A value that already satisfies the target never reaches the rules.

use std::fmt;
use std::sync::Arc;

use anyhow::Result;
use attr_types_value::Value;
use tracing::{trace, warn};

use crate::config::CoercionMode;
use crate::definition::TypeDefinition;
use crate::error::CoercionError;

/// A rule's conversion function. Errors pass through `coerce` untouched.
pub type Transform = Arc<dyn Fn(Value) -> Result<Value> + Send + Sync>;

#[derive(Clone)]
pub struct CoercionRule {
    from: Arc<TypeDefinition>,
    via: Transform,
}

impl CoercionRule {
    pub fn new<F>(from: Arc<TypeDefinition>, via: F) -> Self
    where
        F: Fn(Value) -> Result<Value> + Send + Sync + 'static,
    {
        Self {
            from,
            via: Arc::new(via),
        }
    }

    pub fn source_name(&self) -> &str {
        self.from.name()
    }

    pub fn accepts(&self, value: &Value) -> bool {
        self.from.validate(value)
    }

    pub fn apply(&self, value: Value) -> Result<Value> {
        (self.via)(value)
    }
}

impl fmt::Debug for CoercionRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CoercionRule")
            .field("from", &self.from.name())
            .finish_non_exhaustive()
    }
}

/// Coerce `value` into `target`.
pub(crate) fn run_chain(target: &TypeDefinition, value: Value, mode: CoercionMode) -> Result<Value> {
    if target.validate(&value) {
        trace!(target_type = %target.name(), "value already conforms");
        return Ok(value);
    }

    match target.coercions().iter().position(|rule| rule.accepts(&value)) {
        Some(index) => {
            let rule = &target.coercions()[index];
            trace!(
                target_type = %target.name(),
                rule = index,
                from = %rule.source_name(),
                "applying coercion rule"
            );
            rule.apply(value)
        }
        None => match mode {
            CoercionMode::Lenient => {
                trace!(
                    target_type = %target.name(),
                    kind = %value.kind(),
                    "no coercion rule matched"
                );
                Ok(value)
            }
            CoercionMode::Strict => {
                warn!(
                    target_type = %target.name(),
                    kind = %value.kind(),
                    "no coercion rule matched in strict mode"
                );
                Err(CoercionError::NoMatchingRule {
                    type_name: target.name().to_string(),
                    kind: value.kind(),
                    value: value.to_string(),
                }
                .into())
            }
        },
    }
}

/// Coerce every item into `element_type`, keeping order and count.
///
/// Each item is coerced on its own, so conforming items pass through
/// unchanged while the rest go through `element_type`'s chain. The first
/// transform error aborts the whole mapping.
pub fn coerce_each<I>(element_type: &TypeDefinition, items: I) -> Result<Vec<Value>>
where
    I: IntoIterator<Item = Value>,
{
    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            trace!(element_type = %element_type.name(), index, "coercing element");
            element_type.coerce(item)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraint::Constraint;
    use anyhow::anyhow;
    use attr_types_value::ValueKind;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn kind_type(name: &str, kind: ValueKind) -> Arc<TypeDefinition> {
        Arc::new(
            TypeDefinition::builder(name)
                .constraint(Constraint::kind(kind))
                .build(),
        )
    }

    #[test]
    fn test_first_matching_rule_wins() {
        let str_type = kind_type("Str", ValueKind::Str);
        let any_type = Arc::new(TypeDefinition::builder("Any").build());
        let target = TypeDefinition::builder("Int")
            .constraint(Constraint::kind(ValueKind::Int))
            .coerce_from(str_type, |v| {
                let s = v.as_str().unwrap_or_default();
                Ok(Value::Int(s.len() as i64))
            })
            .coerce_from(any_type, |_| Ok(Value::Int(-1)))
            .build();

        assert_eq!(target.coerce(Value::from("abc")).unwrap(), Value::Int(3));
        assert_eq!(target.coerce(Value::Bool(true)).unwrap(), Value::Int(-1));
    }

    #[test]
    fn test_conforming_value_skips_rules() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let target = TypeDefinition::builder("Int")
            .constraint(Constraint::kind(ValueKind::Int))
            .coerce_from(Arc::new(TypeDefinition::builder("Any").build()), move |v| {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(v)
            })
            .build();

        assert_eq!(target.coerce(Value::Int(7)).unwrap(), Value::Int(7));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_no_rule_lenient_and_strict() {
        let target = TypeDefinition::builder("Int")
            .constraint(Constraint::kind(ValueKind::Int))
            .build();

        let value = target
            .coerce_with_mode(Value::from("x"), CoercionMode::Lenient)
            .unwrap();
        assert_eq!(value, Value::from("x"));

        let err = target
            .coerce_with_mode(Value::from("x"), CoercionMode::Strict)
            .unwrap_err();
        let err = err.downcast::<CoercionError>().unwrap();
        assert!(matches!(
            err,
            CoercionError::NoMatchingRule { kind: ValueKind::Str, .. }
        ));
    }

    #[test]
    fn test_transform_error_propagates() {
        let target = TypeDefinition::builder("Int")
            .constraint(Constraint::kind(ValueKind::Int))
            .coerce_from(kind_type("Str", ValueKind::Str), |v| {
                Err(anyhow!("cannot parse {}", v))
            })
            .build();

        let err = target.coerce(Value::from("abc")).unwrap_err();
        assert_eq!(err.to_string(), "cannot parse \"abc\"");
    }

    #[test]
    fn test_coerce_each_keeps_order() {
        let target = TypeDefinition::builder("Int")
            .constraint(Constraint::kind(ValueKind::Int))
            .coerce_from(kind_type("Str", ValueKind::Str), |v| {
                Ok(Value::Int(v.as_str().map(|s| s.len()).unwrap_or(0) as i64))
            })
            .build();

        let out = coerce_each(
            &target,
            vec![Value::from("a"), Value::Int(10), Value::from("ccc")],
        )
        .unwrap();
        assert_eq!(out, vec![Value::Int(1), Value::Int(10), Value::Int(3)]);
    }

    #[test]
    fn test_rule_debug_names_source() {
        let rule = CoercionRule::new(kind_type("Str", ValueKind::Str), Ok);
        assert_eq!(rule.source_name(), "Str");
        assert!(format!("{:?}", rule).contains("Str"));
    }
}
