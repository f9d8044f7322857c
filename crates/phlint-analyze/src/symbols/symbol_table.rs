//! Symbol table for cross-unit reflection queries

use std::collections::HashMap;

use super::ClassSymbol;

/// All known classes, keyed by fully qualified name. Class names are
/// case-insensitive in PHP, so keys are lowercased for lookup while the
/// symbols keep their declared spelling.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    classes: HashMap<String, ClassSymbol>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_class(&mut self, symbol: ClassSymbol) {
        self.classes.insert(symbol.name.to_lowercase(), symbol);
    }

    pub fn get_class(&self, name: &str) -> Option<&ClassSymbol> {
        self.classes.get(&name.to_lowercase())
    }

    pub fn class_exists(&self, name: &str) -> bool {
        self.classes.contains_key(&name.to_lowercase())
    }

    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    /// Ancestor-chain query: true when `ancestor` appears among the parent
    /// chain or the (transitively reachable) interfaces of `class`. A class
    /// is not its own subclass. Unregistered ancestors still match by name
    /// on the direct edge.
    ///
    /// Ancestor links are stored as written; an unqualified link resolves
    /// against the declaring class's namespace first, then as a global name.
    pub fn is_subclass_of(&self, class: &str, ancestor: &str) -> bool {
        let Some(mut current) = self.get_class(class) else {
            return false;
        };
        loop {
            if self.interfaces_contain(current, ancestor) {
                return true;
            }
            let Some(parent) = current.parent.as_deref() else {
                return false;
            };
            let candidates = Self::resolution_candidates(current, parent);
            if candidates.iter().any(|c| c.eq_ignore_ascii_case(ancestor)) {
                return true;
            }
            match candidates.iter().find_map(|c| self.get_class(c)) {
                Some(parent_symbol) => current = parent_symbol,
                None => return false,
            }
        }
    }

    fn interfaces_contain(&self, symbol: &ClassSymbol, ancestor: &str) -> bool {
        symbol.interfaces.iter().any(|iface| {
            let candidates = Self::resolution_candidates(symbol, iface);
            candidates.iter().any(|c| c.eq_ignore_ascii_case(ancestor))
                || candidates
                    .iter()
                    .find_map(|c| self.get_class(c))
                    .is_some_and(|parent_iface| self.interfaces_contain(parent_iface, ancestor))
        })
    }

    /// Names an unqualified ancestor link may refer to, in lookup order:
    /// the declaring namespace's name, then the global one. A qualified
    /// link refers to itself only.
    fn resolution_candidates(declaring: &ClassSymbol, name: &str) -> Vec<String> {
        let mut candidates = Vec::with_capacity(2);
        if !name.contains('\\') {
            if let Some((namespace, _)) = declaring.name.rsplit_once('\\') {
                candidates.push(format!("{}\\{}", namespace, name));
            }
        }
        candidates.push(name.to_string());
        candidates
    }

    pub fn merge(&mut self, other: SymbolTable) {
        self.classes.extend(other.classes);
    }

    pub fn all_classes(&self) -> impl Iterator<Item = &ClassSymbol> {
        self.classes.values()
    }
}
