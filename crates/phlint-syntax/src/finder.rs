//! Generic tree navigation used by rules and the reflection bridge

use crate::node::{NodeId, NodeKind, SyntaxKind, Tree};

/// Pure read-only lookups over one immutable tree.
pub struct NodeFinder<'t> {
    tree: &'t Tree,
}

impl<'t> NodeFinder<'t> {
    pub fn new(tree: &'t Tree) -> Self {
        Self { tree }
    }

    /// First descendant (pre-order, depth-first) for which `predicate`
    /// holds. Does not descend into nested declaration boundaries (closures
    /// and nested classes): a search for "a call inside this method body"
    /// must not leak matches out of a nested anonymous-function body. The
    /// boundary node itself is still tested against the predicate.
    pub fn find_first_descendant<P>(&self, start: NodeId, predicate: P) -> Option<NodeId>
    where
        P: Fn(&Tree, NodeId) -> bool,
    {
        self.find_descendant_impl(start, predicate, false)
    }

    /// Like [`Self::find_first_descendant`] but crossing declaration
    /// boundaries; for the callers that explicitly want whole-subtree scans.
    pub fn find_first_descendant_including_nested<P>(
        &self,
        start: NodeId,
        predicate: P,
    ) -> Option<NodeId>
    where
        P: Fn(&Tree, NodeId) -> bool,
    {
        self.find_descendant_impl(start, predicate, true)
    }

    fn find_descendant_impl<P>(&self, start: NodeId, predicate: P, cross: bool) -> Option<NodeId>
    where
        P: Fn(&Tree, NodeId) -> bool,
    {
        let mut stack: Vec<NodeId> = self
            .tree
            .children(start)
            .iter()
            .rev()
            .map(|c| c.id)
            .collect();
        while let Some(id) = stack.pop() {
            if predicate(self.tree, id) {
                return Some(id);
            }
            if cross || !is_declaration_boundary(self.tree.syntax_kind(id)) {
                for child in self.tree.children(id).iter().rev() {
                    stack.push(child.id);
                }
            }
        }
        None
    }

    /// Convenience form of the descendant search matching on kind.
    pub fn find_first_descendant_of_kind(&self, start: NodeId, kind: SyntaxKind) -> Option<NodeId> {
        self.find_first_descendant(start, |tree, id| tree.syntax_kind(id) == kind)
    }

    /// Nearest enclosing node of `kind`, walking parent references upward.
    pub fn find_first_ancestor(&self, start: NodeId, kind: SyntaxKind) -> Option<NodeId> {
        let mut cursor = self.tree.parent(start);
        while let Some(id) = cursor {
            if self.tree.syntax_kind(id) == kind {
                return Some(id);
            }
            cursor = self.tree.parent(id);
        }
        None
    }

    /// Method or property of a class-like node by name, in declaration
    /// order; with duplicate names the first declaration wins. Method names
    /// compare case-insensitively, property names exactly (PHP semantics).
    pub fn find_named_member(&self, class_like: NodeId, name: &str) -> Option<NodeId> {
        self.tree
            .children(class_like)
            .iter()
            .map(|c| c.id)
            .find(|&id| match self.tree.kind(id) {
                NodeKind::Method {
                    name: method_name, ..
                } => method_name.eq_ignore_ascii_case(name),
                NodeKind::Property {
                    name: property_name,
                    ..
                } => property_name == name,
                _ => false,
            })
    }
}

fn is_declaration_boundary(kind: SyntaxKind) -> bool {
    matches!(kind, SyntaxKind::Closure | SyntaxKind::Class)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    fn class_of(tree: &Tree) -> NodeId {
        NodeFinder::new(tree)
            .find_first_descendant_of_kind(tree.root(), SyntaxKind::Class)
            .unwrap()
    }

    #[test]
    fn finds_first_descendant_of_kind() {
        let tree = parse(
            "<?php class C { public function run() { $this->first(); $this->second(); } }",
        )
        .unwrap();
        let finder = NodeFinder::new(&tree);
        let class = class_of(&tree);
        let method = finder.find_named_member(class, "run").unwrap();
        let call = finder
            .find_first_descendant_of_kind(method, SyntaxKind::MethodCall)
            .unwrap();
        let NodeKind::MethodCall { method: name } = tree.kind(call) else {
            panic!("expected call");
        };
        assert_eq!(name, "first");
    }

    #[test]
    fn descendant_search_stops_at_closure_boundary() {
        let tree = parse(
            "<?php class C { public function run() { $f = function () { $this->hidden(); }; } }",
        )
        .unwrap();
        let finder = NodeFinder::new(&tree);
        let class = class_of(&tree);
        let method = finder.find_named_member(class, "run").unwrap();

        assert_eq!(
            finder.find_first_descendant_of_kind(method, SyntaxKind::MethodCall),
            None
        );
        assert!(finder
            .find_first_descendant_including_nested(method, |tree, id| {
                tree.syntax_kind(id) == SyntaxKind::MethodCall
            })
            .is_some());
    }

    #[test]
    fn ancestor_walk_finds_enclosing_class() {
        let tree =
            parse("<?php class C { public function run() { self::execute(); } }").unwrap();
        let finder = NodeFinder::new(&tree);
        let call = finder
            .find_first_descendant_including_nested(tree.root(), |tree, id| {
                tree.syntax_kind(id) == SyntaxKind::StaticCall
            })
            .unwrap();

        let class = finder.find_first_ancestor(call, SyntaxKind::Class).unwrap();
        assert_eq!(tree.syntax_kind(class), SyntaxKind::Class);
        assert_eq!(finder.find_first_ancestor(call, SyntaxKind::Closure), None);
    }

    #[test]
    fn named_member_lookup_is_declaration_order_first_wins() {
        // duplicate member names are not this component's problem to reject
        let tree = parse(
            "<?php class C { public function dup() { return 1; } public function dup() { return 2; } }",
        )
        .unwrap();
        let finder = NodeFinder::new(&tree);
        let class = class_of(&tree);
        let member = finder.find_named_member(class, "dup").unwrap();
        let first = tree
            .children(class)
            .iter()
            .map(|c| c.id)
            .next()
            .unwrap();
        assert_eq!(member, first);
    }

    #[test]
    fn method_lookup_is_case_insensitive_property_lookup_is_not() {
        let tree = parse("<?php class C { public $Prop; public function Run() {} }").unwrap();
        let finder = NodeFinder::new(&tree);
        let class = class_of(&tree);

        assert!(finder.find_named_member(class, "run").is_some());
        assert!(finder.find_named_member(class, "Prop").is_some());
        assert!(finder.find_named_member(class, "prop").is_none());
    }

    #[test]
    fn missing_member_is_none() {
        let tree = parse("<?php class C { public function run() {} }").unwrap();
        let finder = NodeFinder::new(&tree);
        assert_eq!(finder.find_named_member(class_of(&tree), "absent"), None);
    }
}
