//! Reflection metadata: class/method/property symbols and their handles
//!
//! Symbols describe declared program elements independently of any syntax
//! tree. A handle never stores a node reference; going back to syntax is a
//! lazy lookup through the reflection bridge.

mod class_symbol;
mod collector;
mod symbol_table;

pub use class_symbol::{ClassSymbol, MethodSymbol, PropertySymbol};
pub use collector::SymbolCollector;
pub use symbol_table::SymbolTable;

use std::path::PathBuf;

/// Opaque handle to a declared method: declaring unit identity plus member
/// name. `file` is `None` for built-in or synthetic symbols.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodHandle {
    pub class: String,
    pub method: String,
    pub file: Option<PathBuf>,
}

/// Opaque handle to a declared property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyHandle {
    pub class: String,
    pub property: String,
    pub file: Option<PathBuf>,
}
