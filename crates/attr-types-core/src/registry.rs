//! Named catalog of type definitions.
//!
//! A [`TypeRegistry`] maps names to shared, immutable [`TypeDefinition`]s.
//! Registries are ordinary values: build one, [`extend`](TypeRegistry::extend)
//! it from a foundational registry, register your own types and hand it to
//! whatever needs to resolve type names.
//!
//! Registration takes a write lock, so a registry may still be extended after
//! it has been shared. Resolution, validation and coercion only ever read.
//!
//! # Example
//!
//! ```
//! use attr_types_core::{foundation, TypeRegistry};
//! use attr_types_value::Value;
//!
//! let registry = TypeRegistry::new("app");
//! registry.extend(&foundation::foundation_registry()?)?;
//!
//! let ints = registry.resolve_expr("ArrayRef[Int]")?;
//! assert!(ints.validate(&Value::Sequence(vec![Value::Int(1), Value::Int(2)])));
//! # Ok::<(), attr_types_core::RegistryError>(())
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;
use attr_types_value::Value;
use parking_lot::RwLock;
use tracing::debug;

use crate::config::CoercionConfig;
use crate::definition::TypeDefinition;
use crate::error::RegistryError;
use crate::expr::TypeExpr;
use crate::parameterized::{parameterize, parameterized_name};

pub struct TypeRegistry {
    scope: String,
    types: RwLock<HashMap<String, Arc<TypeDefinition>>>,
    /// Parameterized instances by `Base[Element]` name.
    parameterized: RwLock<HashMap<String, Arc<TypeDefinition>>>,
    config: CoercionConfig,
}

impl TypeRegistry {
    /// Create an empty registry. `scope` names it in error messages.
    pub fn new(scope: impl Into<String>) -> Self {
        Self {
            scope: scope.into(),
            types: RwLock::new(HashMap::new()),
            parameterized: RwLock::new(HashMap::new()),
            config: CoercionConfig::default(),
        }
    }

    pub fn with_config(mut self, config: CoercionConfig) -> Self {
        self.config = config;
        self
    }

    pub fn scope(&self) -> &str {
        &self.scope
    }

    pub fn config(&self) -> &CoercionConfig {
        &self.config
    }

    /// Add a definition under its own name.
    pub fn register(
        &self,
        definition: impl Into<Arc<TypeDefinition>>,
    ) -> Result<Arc<TypeDefinition>, RegistryError> {
        let definition = definition.into();
        let mut types = self.types.write();
        if types.contains_key(definition.name()) {
            return Err(RegistryError::DuplicateName {
                name: definition.name().to_string(),
                scope: self.scope.clone(),
            });
        }
        debug!(scope = %self.scope, name = %definition.name(), "registered type");
        types.insert(definition.name().to_string(), Arc::clone(&definition));
        Ok(definition)
    }

    /// Make every definition of `other` resolvable here.
    ///
    /// Definitions are shared, not copied. A name that already refers to the
    /// very same definition is skipped; a name bound to a different definition
    /// fails the whole call before anything is imported.
    pub fn extend(&self, other: &TypeRegistry) -> Result<(), RegistryError> {
        if std::ptr::eq(self, other) {
            return Ok(());
        }

        let imported: Vec<Arc<TypeDefinition>> = other.types.read().values().cloned().collect();

        let mut types = self.types.write();
        for definition in &imported {
            if let Some(existing) = types.get(definition.name()) {
                if !Arc::ptr_eq(existing, definition) {
                    return Err(RegistryError::DuplicateName {
                        name: definition.name().to_string(),
                        scope: self.scope.clone(),
                    });
                }
            }
        }

        let mut added = 0usize;
        for definition in imported {
            if !types.contains_key(definition.name()) {
                types.insert(definition.name().to_string(), definition);
                added += 1;
            }
        }
        debug!(scope = %self.scope, from = %other.scope, added, "extended registry");
        Ok(())
    }

    pub fn resolve(&self, name: &str) -> Result<Arc<TypeDefinition>, RegistryError> {
        self.types
            .read()
            .get(name)
            .cloned()
            .ok_or_else(|| RegistryError::UnknownType {
                name: name.to_string(),
                scope: self.scope.clone(),
            })
    }

    /// Resolve `name` parameterized over `element`.
    ///
    /// Instances are cached per name; a cached instance is reused only when
    /// it was built over this exact element definition.
    pub fn resolve_parameterized(
        &self,
        name: &str,
        element: &Arc<TypeDefinition>,
    ) -> Result<Arc<TypeDefinition>, RegistryError> {
        let key = parameterized_name(name, element.name());
        if let Some(cached) = self.parameterized.read().get(&key) {
            if cached.parameter().is_some_and(|p| Arc::ptr_eq(p, element)) {
                return Ok(Arc::clone(cached));
            }
        }

        let base = self.resolve(name)?;
        let instance = parameterize(&base, Some(element))?;
        self.parameterized
            .write()
            .entry(key)
            .or_insert_with(|| Arc::clone(&instance));
        Ok(instance)
    }

    /// Resolve a type expression such as `OrderedList[FileHandle]`.
    pub fn resolve_expr(&self, expr: &str) -> Result<Arc<TypeDefinition>, RegistryError> {
        let parsed = TypeExpr::parse(expr)?;
        self.resolve_type_expr(&parsed)
    }

    pub fn resolve_type_expr(&self, expr: &TypeExpr) -> Result<Arc<TypeDefinition>, RegistryError> {
        match expr {
            TypeExpr::Named(name) => self.resolve(name),
            TypeExpr::Parameterized { base, parameter } => {
                let element = self.resolve_type_expr(parameter)?;
                self.resolve_parameterized(base, &element)
            }
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.types.read().contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.types.read().keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.types.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.read().is_empty()
    }

    /// Validate `value` against the type named `name`.
    pub fn validate(&self, name: &str, value: &Value) -> Result<bool, RegistryError> {
        Ok(self.resolve_expr(name)?.validate(value))
    }

    /// Coerce `value` into the type named `name` using this registry's mode.
    pub fn coerce(&self, name: &str, value: Value) -> Result<Value> {
        let target = self.resolve_expr(name)?;
        target.coerce_with_mode(value, self.config.mode)
    }
}

impl std::fmt::Debug for TypeRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypeRegistry")
            .field("scope", &self.scope)
            .field("types", &self.names())
            .field("config", &self.config)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraint::Constraint;
    use crate::error::CoercionError;
    use attr_types_value::ValueKind;

    fn int_def() -> TypeDefinition {
        TypeDefinition::builder("Int")
            .constraint(Constraint::kind(ValueKind::Int))
            .build()
    }

    fn seq_def() -> TypeDefinition {
        TypeDefinition::builder("Seq")
            .constraint(Constraint::kind(ValueKind::Sequence))
            .container(ValueKind::Sequence)
            .build()
    }

    #[test]
    fn test_register_and_resolve() {
        let registry = TypeRegistry::new("test");
        let int = registry.register(int_def()).unwrap();
        let resolved = registry.resolve("Int").unwrap();
        assert!(Arc::ptr_eq(&int, &resolved));
        assert_eq!(registry.len(), 1);
        assert!(registry.contains("Int"));
    }

    #[test]
    fn test_duplicate_name() {
        let registry = TypeRegistry::new("test");
        registry.register(int_def()).unwrap();
        let err = registry.register(int_def()).unwrap_err();
        assert_eq!(
            err,
            RegistryError::DuplicateName {
                name: "Int".to_string(),
                scope: "test".to_string()
            }
        );
    }

    #[test]
    fn test_unknown_type() {
        let registry = TypeRegistry::new("test");
        let err = registry.resolve("NoSuchType").unwrap_err();
        assert!(matches!(err, RegistryError::UnknownType { ref name, .. } if name == "NoSuchType"));
    }

    #[test]
    fn test_extend_shares_definitions() {
        let base = TypeRegistry::new("base");
        let int = base.register(int_def()).unwrap();

        let app = TypeRegistry::new("app");
        app.extend(&base).unwrap();
        assert!(Arc::ptr_eq(&app.resolve("Int").unwrap(), &int));

        // Extending twice from the same source is harmless.
        app.extend(&base).unwrap();
        assert_eq!(app.len(), 1);

        // Extending from itself is a no-op.
        app.extend(&app).unwrap();
    }

    #[test]
    fn test_extend_conflict_imports_nothing() {
        let base = TypeRegistry::new("base");
        base.register(int_def()).unwrap();
        base.register(seq_def()).unwrap();

        let app = TypeRegistry::new("app");
        app.register(int_def()).unwrap();

        let err = app.extend(&base).unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateName { .. }));
        assert!(!app.contains("Seq"));
    }

    #[test]
    fn test_parameterized_cache() {
        let registry = TypeRegistry::new("test");
        let int = registry.register(int_def()).unwrap();
        registry.register(seq_def()).unwrap();

        let a = registry.resolve_parameterized("Seq", &int).unwrap();
        let b = registry.resolve_parameterized("Seq", &int).unwrap();
        assert!(Arc::ptr_eq(&a, &b));

        // A different element definition with the same name is not served
        // from the cache.
        let other_int = Arc::new(int_def());
        let c = registry.resolve_parameterized("Seq", &other_int).unwrap();
        assert!(!Arc::ptr_eq(&a, &c));
        assert!(Arc::ptr_eq(c.parameter().unwrap(), &other_int));
    }

    #[test]
    fn test_resolve_expr() {
        let registry = TypeRegistry::new("test");
        registry.register(int_def()).unwrap();
        registry.register(seq_def()).unwrap();

        let nested = registry.resolve_expr("Seq[Seq[Int]]").unwrap();
        let value = Value::Sequence(vec![
            Value::Sequence(vec![Value::Int(1)]),
            Value::Sequence(vec![]),
        ]);
        assert!(nested.validate(&value));
        assert!(!nested.validate(&Value::Sequence(vec![Value::Int(1)])));

        let err = registry.resolve_expr("Int[Seq]").unwrap_err();
        assert!(matches!(err, RegistryError::NotParameterizable { .. }));
    }

    #[test]
    fn test_registry_coerce_uses_config_mode() {
        let registry = TypeRegistry::new("test").with_config(CoercionConfig::strict());
        registry.register(int_def()).unwrap();

        assert_eq!(registry.coerce("Int", Value::Int(1)).unwrap(), Value::Int(1));
        let err = registry.coerce("Int", Value::from("x")).unwrap_err();
        assert!(err.downcast_ref::<CoercionError>().is_some());

        let err = registry.coerce("Nope", Value::Int(1)).unwrap_err();
        assert!(err.downcast_ref::<RegistryError>().is_some());
    }

    #[test]
    fn test_resolved_definition_coerce_ignores_registry_mode() {
        let registry = TypeRegistry::new("test").with_config(CoercionConfig::strict());
        registry.register(int_def()).unwrap();
        let int = registry.resolve("Int").unwrap();

        assert_eq!(int.coerce(Value::from("x")).unwrap(), Value::from("x"));
        assert!(int
            .coerce_with_mode(Value::from("x"), registry.config().mode)
            .is_err());
        assert!(registry.coerce("Int", Value::from("x")).is_err());
    }

    #[test]
    fn test_names_sorted() {
        let registry = TypeRegistry::new("test");
        registry.register(seq_def()).unwrap();
        registry.register(int_def()).unwrap();
        assert_eq!(registry.names(), vec!["Int".to_string(), "Seq".to_string()]);
    }
}
