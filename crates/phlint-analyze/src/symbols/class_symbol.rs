//! Per-class reflection data

use std::path::PathBuf;

use phlint_syntax::Visibility;

use super::{MethodHandle, PropertyHandle};

/// Reflection view of one declared class.
#[derive(Debug, Clone)]
pub struct ClassSymbol {
    /// Fully qualified name
    pub name: String,
    /// Name without namespace
    pub short_name: String,
    /// Declaring unit; `None` for built-ins and synthetic classes
    pub file: Option<PathBuf>,
    pub is_final: bool,
    pub is_abstract: bool,
    /// Parent class FQN
    pub parent: Option<String>,
    pub interfaces: Vec<String>,
    /// Declaration order
    pub methods: Vec<MethodSymbol>,
    pub properties: Vec<PropertySymbol>,
}

#[derive(Debug, Clone)]
pub struct MethodSymbol {
    pub name: String,
    pub is_static: bool,
    pub visibility: Visibility,
}

#[derive(Debug, Clone)]
pub struct PropertySymbol {
    pub name: String,
    pub visibility: Visibility,
    /// Attribute names as written (`Inject`, `Nette\DI\Attributes\Inject`)
    pub attributes: Vec<String>,
}

impl ClassSymbol {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let short_name = name
            .rsplit('\\')
            .next()
            .unwrap_or(name.as_str())
            .to_string();
        Self {
            name,
            short_name,
            file: None,
            is_final: false,
            is_abstract: false,
            parent: None,
            interfaces: Vec::new(),
            methods: Vec::new(),
            properties: Vec::new(),
        }
    }

    /// Method lookup, case-insensitive (PHP method names are).
    pub fn method(&self, name: &str) -> Option<&MethodSymbol> {
        self.methods
            .iter()
            .find(|m| m.name.eq_ignore_ascii_case(name))
    }

    /// Property lookup, case-sensitive.
    pub fn property(&self, name: &str) -> Option<&PropertySymbol> {
        self.properties.iter().find(|p| p.name == name)
    }

    pub fn has_method(&self, name: &str) -> bool {
        self.method(name).is_some()
    }

    /// Handle for a declared method; the handle carries the declaring unit,
    /// never a node.
    pub fn method_handle(&self, name: &str) -> MethodHandle {
        MethodHandle {
            class: self.name.clone(),
            method: name.to_string(),
            file: self.file.clone(),
        }
    }

    pub fn property_handle(&self, name: &str) -> PropertyHandle {
        PropertyHandle {
            class: self.name.clone(),
            property: name.to_string(),
            file: self.file.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_name_is_last_segment() {
        let symbol = ClassSymbol::new("App\\Models\\User");
        assert_eq!(symbol.short_name, "User");
        assert_eq!(ClassSymbol::new("User").short_name, "User");
    }

    #[test]
    fn method_lookup_is_case_insensitive() {
        let mut symbol = ClassSymbol::new("Foo");
        symbol.methods.push(MethodSymbol {
            name: "Run".to_string(),
            is_static: false,
            visibility: Visibility::Public,
        });
        assert!(symbol.has_method("run"));
        assert!(!symbol.has_method("walk"));
    }
}
