//! Builds the symbol table from parsed trees
//!
//! A per-unit pass over the tree, extracting class declarations with their
//! members into reflection symbols. Cross-unit analysis merges the
//! collected tables.

use std::path::Path;

use phlint_syntax::{ChildRole, NodeId, NodeKind, Tree};

use super::{ClassSymbol, MethodSymbol, PropertySymbol, SymbolTable};

pub struct SymbolCollector;

impl SymbolCollector {
    /// Collect all class symbols declared in one unit.
    pub fn collect(tree: &Tree, file: &Path) -> Vec<ClassSymbol> {
        let mut symbols = Vec::new();
        Self::collect_container(tree, tree.root(), None, file, &mut symbols);
        symbols
    }

    /// Collect a set of units into one table.
    pub fn build_table<'a>(units: impl IntoIterator<Item = (&'a Tree, &'a Path)>) -> SymbolTable {
        let mut table = SymbolTable::new();
        for (tree, file) in units {
            for symbol in Self::collect(tree, file) {
                table.register_class(symbol);
            }
        }
        table
    }

    fn collect_container(
        tree: &Tree,
        container: NodeId,
        namespace: Option<&str>,
        file: &Path,
        symbols: &mut Vec<ClassSymbol>,
    ) {
        for child in tree.children_with_role(container, ChildRole::Statement) {
            match tree.kind(child) {
                NodeKind::Namespace { name } => {
                    Self::collect_container(tree, child, Some(name), file, symbols);
                }
                NodeKind::Class { .. } => {
                    symbols.push(Self::class_symbol(tree, child, namespace, file));
                }
                _ => {}
            }
        }
    }

    fn class_symbol(
        tree: &Tree,
        class: NodeId,
        namespace: Option<&str>,
        file: &Path,
    ) -> ClassSymbol {
        let NodeKind::Class {
            name,
            is_final,
            is_abstract,
            parent,
            interfaces,
        } = tree.kind(class)
        else {
            unreachable!("caller checked the kind");
        };

        let fqn = match namespace {
            Some(ns) => format!("{}\\{}", ns, name),
            None => name.clone(),
        };
        let mut symbol = ClassSymbol::new(fqn);
        symbol.file = Some(file.to_path_buf());
        symbol.is_final = *is_final;
        symbol.is_abstract = *is_abstract;
        symbol.parent = parent.clone();
        symbol.interfaces = interfaces.clone();

        for member in tree.children_with_role(class, ChildRole::Member) {
            match tree.kind(member) {
                NodeKind::Method {
                    name,
                    is_static,
                    visibility,
                } => symbol.methods.push(MethodSymbol {
                    name: name.clone(),
                    is_static: *is_static,
                    visibility: *visibility,
                }),
                NodeKind::Property {
                    name,
                    visibility,
                    attributes,
                    ..
                } => symbol.properties.push(PropertySymbol {
                    name: name.clone(),
                    visibility: *visibility,
                    attributes: attributes.clone(),
                }),
                _ => {}
            }
        }
        symbol
    }
}
