//! Built-in functions
//!
//! Every function takes exactly one numeric argument.

pub mod math;

use std::collections::HashMap;

/// Function implementation signature
///
/// Returns `None` when the argument lies outside the function's domain.
pub type FunctionImpl = fn(f64) -> Option<f64>;

/// Function definition
pub struct FunctionDef {
    /// Function name (uppercase)
    pub name: &'static str,
    /// Implementation
    pub implementation: FunctionImpl,
    /// Description of the accepted arguments, used in domain errors
    pub domain: &'static str,
}

/// Function registry
pub struct FunctionRegistry {
    functions: HashMap<&'static str, FunctionDef>,
}

impl FunctionRegistry {
    /// Create a new registry with all built-in functions
    pub fn new() -> Self {
        let mut registry = Self {
            functions: HashMap::new(),
        };

        registry.register_math_functions();

        registry
    }

    /// Look up a function by name (case-insensitive)
    pub fn get(&self, name: &str) -> Option<&FunctionDef> {
        self.functions.get(name.to_uppercase().as_str())
    }

    /// Register a function
    pub fn register(&mut self, def: FunctionDef) {
        self.functions.insert(def.name, def);
    }

    /// Registered names in alphabetical order
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.functions.keys().copied().collect();
        names.sort_unstable();
        names
    }

    fn register_math_functions(&mut self) {
        const ANY: &str = "a number";
        const POSITIVE: &str = "a value > 0";

        let defs = [
            ("ABS", math::fn_abs as FunctionImpl, ANY),
            ("SQRT", math::fn_sqrt, "a value >= 0"),
            ("SQR", math::fn_sqr, ANY),
            ("SIN", math::fn_sin, ANY),
            ("COS", math::fn_cos, ANY),
            ("ARCTAN", math::fn_arctan, ANY),
            ("LN", math::fn_ln, POSITIVE),
            ("LOG", math::fn_log, POSITIVE),
            ("EXP", math::fn_exp, ANY),
            ("FACT", math::fn_fact, "an integer between 0 and 33"),
        ];

        for (name, implementation, domain) in defs {
            self.register(FunctionDef {
                name,
                implementation,
                domain,
            });
        }
    }
}

impl Default for FunctionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_lookup_is_case_insensitive() {
        let registry = FunctionRegistry::new();
        assert!(registry.get("sqrt").is_some());
        assert!(registry.get("ArcTan").is_some());
        assert!(registry.get("SUM").is_none());
    }

    #[test]
    fn test_names() {
        let registry = FunctionRegistry::new();
        assert_eq!(
            registry.names(),
            vec!["ABS", "ARCTAN", "COS", "EXP", "FACT", "LN", "LOG", "SIN", "SQR", "SQRT"]
        );
    }
}
