//! Rule registry and per-node dispatch

use std::collections::HashMap;

use phlint_syntax::{NodeId, SyntaxKind, Tree};
use thiserror::Error;

use crate::diagnostic::Diagnostic;
use crate::reflection::{ReflectionBridge, ResolveError};
use crate::scope::Scope;
use crate::symbols::SymbolTable;

/// Unexpected fault raised by one rule on one node. Isolated by the
/// engine; never aborts the remaining rules.
#[derive(Debug, Error)]
pub enum RuleError {
    #[error("{0}")]
    Failed(String),

    #[error(transparent)]
    Resolve(#[from] ResolveError),
}

/// Shared per-unit context handed to rules alongside the node and scope.
pub struct RuleContext<'a> {
    pub tree: &'a Tree,
    pub file: &'a std::path::Path,
    pub table: &'a SymbolTable,
    pub bridge: &'a ReflectionBridge,
}

/// A single structural check. Stateless, or constructed with configuration
/// that is never mutated per invocation; rules must not touch the tree or
/// the cache beyond reads.
pub trait Rule: Send + Sync {
    /// Stable identifier used in diagnostics (e.g. "no-inject-on-final")
    fn id(&self) -> &'static str;

    fn description(&self) -> &'static str;

    /// Node kinds this rule wants to see.
    fn interested_kinds(&self) -> &'static [SyntaxKind];

    fn evaluate(
        &self,
        ctx: &RuleContext<'_>,
        node: NodeId,
        scope: &Scope<'_>,
    ) -> Result<Vec<Diagnostic>, RuleError>;
}

/// Registry of rules with a kind-indexed dispatch map, built once at
/// registration time so a visit never scans uninterested rules.
#[derive(Default)]
pub struct RuleEngine {
    rules: Vec<Box<dyn Rule>>,
    by_kind: HashMap<SyntaxKind, Vec<usize>>,
}

impl RuleEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, rule: Box<dyn Rule>) {
        let index = self.rules.len();
        for &kind in rule.interested_kinds() {
            self.by_kind.entry(kind).or_default().push(index);
        }
        self.rules.push(rule);
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Dispatch one node to every rule registered for its kind, in
    /// registration order. A failing rule is reported as a warning
    /// diagnostic attributing the fault to that rule and node, and
    /// evaluation continues with the next rule.
    pub fn visit(
        &self,
        ctx: &RuleContext<'_>,
        node: NodeId,
        scope: &Scope<'_>,
    ) -> Vec<Diagnostic> {
        let kind = ctx.tree.syntax_kind(node);
        let Some(interested) = self.by_kind.get(&kind) else {
            return Vec::new();
        };

        let mut diagnostics = Vec::new();
        for &index in interested {
            let rule = &self.rules[index];
            match rule.evaluate(ctx, node, scope) {
                Ok(found) => diagnostics.extend(found),
                Err(error) => diagnostics.push(Diagnostic::warning(
                    rule.id(),
                    format!("rule evaluation failed: {}", error),
                    ctx.file,
                    ctx.tree.line(node),
                )),
            }
        }
        diagnostics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scope::LocalTypeResolver;
    use phlint_syntax::{parse, SyntaxCache};
    use std::path::Path;
    use std::sync::Arc;

    struct EchoSpy {
        id: &'static str,
    }

    impl Rule for EchoSpy {
        fn id(&self) -> &'static str {
            self.id
        }

        fn description(&self) -> &'static str {
            "flags every echo statement"
        }

        fn interested_kinds(&self) -> &'static [SyntaxKind] {
            &[SyntaxKind::Echo]
        }

        fn evaluate(
            &self,
            ctx: &RuleContext<'_>,
            node: NodeId,
            _scope: &Scope<'_>,
        ) -> Result<Vec<Diagnostic>, RuleError> {
            Ok(vec![Diagnostic::error(
                self.id,
                "echo found",
                ctx.file,
                ctx.tree.line(node),
            )])
        }
    }

    struct AlwaysFails;

    impl Rule for AlwaysFails {
        fn id(&self) -> &'static str {
            "always-fails"
        }

        fn description(&self) -> &'static str {
            "faults on every node it sees"
        }

        fn interested_kinds(&self) -> &'static [SyntaxKind] {
            &[SyntaxKind::Echo]
        }

        fn evaluate(
            &self,
            _ctx: &RuleContext<'_>,
            _node: NodeId,
            _scope: &Scope<'_>,
        ) -> Result<Vec<Diagnostic>, RuleError> {
            Err(RuleError::Failed("boom".to_string()))
        }
    }

    fn run_over_echo(engine: &RuleEngine) -> Vec<Diagnostic> {
        let tree = parse("<?php\necho 'hi';\n").unwrap();
        let table = SymbolTable::new();
        let bridge = ReflectionBridge::new(Arc::new(SyntaxCache::new()));
        let ctx = RuleContext {
            tree: &tree,
            file: Path::new("/unit.php"),
            table: &table,
            bridge: &bridge,
        };
        let resolver = LocalTypeResolver::empty();
        let scope = Scope::new(None, None, &resolver);

        let mut diagnostics = Vec::new();
        for node in tree.preorder() {
            diagnostics.extend(engine.visit(&ctx, node, &scope));
        }
        diagnostics
    }

    #[test]
    fn dispatches_in_registration_order() {
        let mut engine = RuleEngine::new();
        engine.register(Box::new(EchoSpy { id: "first" }));
        engine.register(Box::new(EchoSpy { id: "second" }));

        let diagnostics = run_over_echo(&engine);
        let ids: Vec<_> = diagnostics.iter().map(|d| d.rule_id.as_str()).collect();
        assert_eq!(ids, vec!["first", "second"]);
    }

    #[test]
    fn uninterested_kinds_are_not_dispatched() {
        let mut engine = RuleEngine::new();
        engine.register(Box::new(EchoSpy { id: "echo-only" }));

        let tree = parse("<?php\n$x = 1;\n").unwrap();
        let table = SymbolTable::new();
        let bridge = ReflectionBridge::new(Arc::new(SyntaxCache::new()));
        let ctx = RuleContext {
            tree: &tree,
            file: Path::new("/unit.php"),
            table: &table,
            bridge: &bridge,
        };
        let resolver = LocalTypeResolver::empty();
        let scope = Scope::new(None, None, &resolver);
        for node in tree.preorder() {
            assert!(engine.visit(&ctx, node, &scope).is_empty());
        }
    }

    #[test]
    fn failing_rule_is_attributed_and_isolated() {
        let mut engine = RuleEngine::new();
        engine.register(Box::new(AlwaysFails));
        engine.register(Box::new(EchoSpy { id: "survivor" }));

        let diagnostics = run_over_echo(&engine);
        assert_eq!(diagnostics.len(), 2);

        // registration order is preserved across the failure
        assert_eq!(diagnostics[0].rule_id, "always-fails");
        assert!(diagnostics[0].message.contains("rule evaluation failed"));
        assert!(diagnostics[0].message.contains("boom"));
        assert_eq!(diagnostics[0].line, 2);

        assert_eq!(diagnostics[1].rule_id, "survivor");
        assert_eq!(diagnostics[1].message, "echo found");
    }

    #[test]
    fn repeated_runs_yield_identical_sequences() {
        let mut engine = RuleEngine::new();
        engine.register(Box::new(EchoSpy { id: "first" }));
        engine.register(Box::new(AlwaysFails));
        engine.register(Box::new(EchoSpy { id: "last" }));

        let first_run = run_over_echo(&engine);
        let second_run = run_over_echo(&engine);
        assert_eq!(first_run, second_run);
    }
}
