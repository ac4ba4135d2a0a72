//! Coercion configuration.
//!
//! The only knob is what happens when a non-conforming value meets a chain
//! with no matching rule. The default hands the value back unchanged and
//! leaves rejection to the host's later `validate`; strict mode fails the
//! `coerce` call itself.
//!
//! ```
//! use attr_types_core::config::{CoercionConfig, CoercionMode};
//!
//! assert_eq!(CoercionConfig::default().mode, CoercionMode::Lenient);
//! assert!(CoercionConfig::strict().is_strict());
//! ```

use serde::{Deserialize, Serialize};

/// Environment variable that switches registries built from the
/// environment into strict mode.
pub const STRICT_COERCION_ENV: &str = "ATTR_TYPES_STRICT_COERCION";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoercionMode {
    /// Return non-coercible values unchanged.
    #[default]
    Lenient,
    /// Fail with [`CoercionError::NoMatchingRule`](crate::CoercionError::NoMatchingRule).
    Strict,
}

impl CoercionMode {
    /// Interpret an optional flag value.
    ///
    /// `1`, `true`, `yes` and `on` (case-insensitive) select strict mode;
    /// anything else, including an unset flag, is lenient.
    pub fn from_flag(flag: Option<&str>) -> Self {
        match flag.map(|v| v.trim().to_lowercase()) {
            Some(v) if matches!(v.as_str(), "1" | "true" | "yes" | "on") => CoercionMode::Strict,
            _ => CoercionMode::Lenient,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoercionConfig {
    #[serde(default)]
    pub mode: CoercionMode,
}

impl CoercionConfig {
    pub fn strict() -> Self {
        Self {
            mode: CoercionMode::Strict,
        }
    }

    /// Read the configuration from [`STRICT_COERCION_ENV`].
    pub fn from_env() -> Self {
        let flag = std::env::var(STRICT_COERCION_ENV).ok();
        Self {
            mode: CoercionMode::from_flag(flag.as_deref()),
        }
    }

    pub fn is_strict(&self) -> bool {
        self.mode == CoercionMode::Strict
    }
}
