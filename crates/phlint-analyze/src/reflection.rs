//! Reflection bridge: from symbol handles back to declaration nodes
//!
//! Reflection metadata and syntax trees identify the same program through
//! different schemes, so the bridge re-resolves lazily: declaring unit ->
//! cached tree -> class-like declaration -> named member. `Ok(None)` is a
//! legitimate outcome, not a failure: inherited members have no local node
//! in the declaring unit of a more derived class.

use std::path::Path;
use std::sync::Arc;

use phlint_syntax::{NodeFinder, NodeId, ParseError, SyntaxCache, SyntaxKind, Tree};
use thiserror::Error;

use crate::symbols::{MethodHandle, PropertyHandle};

#[derive(Debug, Error)]
pub enum ResolveError {
    /// Built-in or synthetic symbol; nothing local to inspect.
    #[error("symbol has no source location")]
    NoSourceLocation,

    /// The declaring unit failed to parse; callers treat this as
    /// "could not resolve" and keep going.
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// A node located inside its (shared, immutable) tree.
#[derive(Debug, Clone)]
pub struct ResolvedNode {
    pub tree: Arc<Tree>,
    pub node: NodeId,
}

impl ResolvedNode {
    pub fn kind(&self) -> SyntaxKind {
        self.tree.syntax_kind(self.node)
    }

    pub fn line(&self) -> usize {
        self.tree.line(self.node)
    }
}

/// Locates declaration nodes for symbol handles through the syntax cache.
///
/// The bridge resolves against the first class-like declaration of the
/// unit; one class per unit is the supported layout.
pub struct ReflectionBridge {
    cache: Arc<SyntaxCache>,
}

impl ReflectionBridge {
    pub fn new(cache: Arc<SyntaxCache>) -> Self {
        Self { cache }
    }

    /// Declaration node for a method handle. `Ok(None)` when the unit has
    /// no class declaration or the class does not redeclare the member.
    pub fn resolve_method(
        &self,
        handle: &MethodHandle,
    ) -> Result<Option<ResolvedNode>, ResolveError> {
        self.resolve_member(handle.file.as_deref(), &handle.method)
    }

    /// Declaration node for a property handle; same contract.
    pub fn resolve_property(
        &self,
        handle: &PropertyHandle,
    ) -> Result<Option<ResolvedNode>, ResolveError> {
        self.resolve_member(handle.file.as_deref(), &handle.property)
    }

    fn resolve_member(
        &self,
        file: Option<&Path>,
        member: &str,
    ) -> Result<Option<ResolvedNode>, ResolveError> {
        let file = file.ok_or(ResolveError::NoSourceLocation)?;
        let tree = self.cache.get_tree(file)?;

        let Some(class) = Self::class_node(&tree) else {
            return Ok(None);
        };
        let member = NodeFinder::new(&tree).find_named_member(class, member);
        Ok(member.map(|node| ResolvedNode {
            tree: Arc::clone(&tree),
            node,
        }))
    }

    fn class_node(tree: &Tree) -> Option<NodeId> {
        NodeFinder::new(tree).find_first_descendant_of_kind(tree.root(), SyntaxKind::Class)
    }
}
