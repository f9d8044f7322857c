//! Per-node scope and the type-resolution oracle
//!
//! A `Scope` is created by the driver for every visited node and dropped
//! right after: it exposes the enclosing class/method symbols and a
//! type-resolution function. Nothing retains a scope beyond one traversal
//! step.

use std::collections::HashMap;

use phlint_syntax::{ChildRole, NodeId, NodeKind, SyntaxKind, Tree};

use crate::symbols::{ClassSymbol, MethodSymbol};

/// Resolved type of an expression, as far as rules need it: either the
/// current object (`$this`) or a class name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeRef {
    This,
    Class(String),
}

impl TypeRef {
    pub fn is_this(&self) -> bool {
        matches!(self, TypeRef::This)
    }

    pub fn class_name(&self) -> Option<&str> {
        match self {
            TypeRef::Class(name) => Some(name),
            TypeRef::This => None,
        }
    }
}

/// The type-resolution oracle. The engine consumes resolved types, it never
/// computes them; implementations range from the bundled local resolver to
/// a full inference engine.
pub trait TypeResolver {
    fn resolve_type(&self, tree: &Tree, node: NodeId) -> Option<TypeRef>;
}

/// Transient per-node context handed to rules.
pub struct Scope<'a> {
    class: Option<&'a ClassSymbol>,
    method: Option<&'a MethodSymbol>,
    resolver: &'a dyn TypeResolver,
}

impl<'a> Scope<'a> {
    pub fn new(
        class: Option<&'a ClassSymbol>,
        method: Option<&'a MethodSymbol>,
        resolver: &'a dyn TypeResolver,
    ) -> Self {
        Self {
            class,
            method,
            resolver,
        }
    }

    pub fn class_symbol(&self) -> Option<&'a ClassSymbol> {
        self.class
    }

    pub fn method_symbol(&self) -> Option<&'a MethodSymbol> {
        self.method
    }

    pub fn in_constructor(&self) -> bool {
        self.method
            .is_some_and(|m| m.name.eq_ignore_ascii_case("__construct"))
    }

    pub fn resolve_type(&self, tree: &Tree, node: NodeId) -> Option<TypeRef> {
        self.resolver.resolve_type(tree, node)
    }
}

/// Reference oracle for the bundled driver: variable types from parameter
/// type hints and direct `$x = new T()` assignments inside one method
/// body. `$this` always resolves to [`TypeRef::This`].
#[derive(Debug, Default)]
pub struct LocalTypeResolver {
    variables: HashMap<String, String>,
}

impl LocalTypeResolver {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn for_method(tree: &Tree, method: NodeId) -> Self {
        let mut variables = HashMap::new();
        for param in tree.children_with_role(method, ChildRole::Param) {
            if let NodeKind::Param {
                name,
                type_hint: Some(hint),
            } = tree.kind(param)
            {
                variables.insert(name.clone(), hint.clone());
            }
        }
        collect_new_assignments(tree, method, &mut variables);
        Self { variables }
    }
}

/// `$x = new T()` bindings, without crossing closure boundaries.
fn collect_new_assignments(tree: &Tree, node: NodeId, variables: &mut HashMap<String, String>) {
    for child in tree.children(node) {
        let id = child.id;
        if let NodeKind::Assign = tree.kind(id) {
            let target = tree.child_with_role(id, ChildRole::Target);
            let value = tree.child_with_role(id, ChildRole::Value);
            if let (Some(target), Some(value)) = (target, value) {
                if let (
                    NodeKind::Variable { name },
                    NodeKind::New { class },
                ) = (tree.kind(target), tree.kind(value))
                {
                    if name != "this" {
                        variables.insert(name.clone(), class.clone());
                    }
                }
            }
        }
        if tree.syntax_kind(id) != SyntaxKind::Closure {
            collect_new_assignments(tree, id, variables);
        }
    }
}

impl TypeResolver for LocalTypeResolver {
    fn resolve_type(&self, tree: &Tree, node: NodeId) -> Option<TypeRef> {
        match tree.kind(node) {
            NodeKind::Variable { name } if name == "this" => Some(TypeRef::This),
            NodeKind::Variable { name } => self
                .variables
                .get(name)
                .map(|class| TypeRef::Class(class.clone())),
            NodeKind::New { class } => Some(TypeRef::Class(class.clone())),
            _ => None,
        }
    }
}
