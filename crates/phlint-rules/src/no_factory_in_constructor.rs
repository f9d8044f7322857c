//! Forbid factory/method calls inside constructors

use phlint_analyze::{Diagnostic, Rule, RuleContext, RuleError, Scope, TypeRef};
use phlint_syntax::{ChildRole, NodeId, SyntaxKind};

use crate::config::NoFactoryConfig;

const ERROR_MESSAGE: &str = "Do not use factory/method call in constructor. Put factory in config and get service with dependency injection";

/// Constructors should receive collaborators, not build them. Any method
/// call on a typed non-`$this` receiver inside `__construct` is reported,
/// unless the receiver type, the enclosing class name, or an ancestor of
/// the enclosing class is exempted by configuration.
pub struct NoFactoryInConstructorRule {
    config: NoFactoryConfig,
}

impl NoFactoryInConstructorRule {
    pub fn new(config: NoFactoryConfig) -> Self {
        Self { config }
    }
}

impl Rule for NoFactoryInConstructorRule {
    fn id(&self) -> &'static str {
        "no-factory-in-constructor"
    }

    fn description(&self) -> &'static str {
        "disallows factory/method calls inside constructors"
    }

    fn interested_kinds(&self) -> &'static [SyntaxKind] {
        &[SyntaxKind::MethodCall]
    }

    fn evaluate(
        &self,
        ctx: &RuleContext<'_>,
        node: NodeId,
        scope: &Scope<'_>,
    ) -> Result<Vec<Diagnostic>, RuleError> {
        if !scope.in_constructor() {
            return Ok(Vec::new());
        }

        let Some(receiver) = ctx.tree.child_with_role(node, ChildRole::Receiver) else {
            return Ok(Vec::new());
        };
        if ctx.tree.syntax_kind(receiver) != SyntaxKind::Variable {
            return Ok(Vec::new());
        }

        // `$x->create()[0]` is an array access, not a service lookup
        if ctx
            .tree
            .parent(node)
            .is_some_and(|parent| ctx.tree.syntax_kind(parent) == SyntaxKind::ArrayDim)
        {
            return Ok(Vec::new());
        }

        let Some(receiver_type) = scope.resolve_type(ctx.tree, receiver) else {
            return Ok(Vec::new());
        };
        let class_name = match receiver_type {
            TypeRef::This => return Ok(Vec::new()),
            TypeRef::Class(name) => name,
        };
        if self.config.allowed_types.is_match(&class_name) {
            return Ok(Vec::new());
        }

        if let Some(enclosing) = scope.class_symbol() {
            if self.config.skip_class_names.is_match(&enclosing.name) {
                return Ok(Vec::new());
            }
            let exempted_by_parent = self
                .config
                .allowed_parent_types
                .iter()
                .any(|parent| ctx.table.is_subclass_of(&enclosing.name, parent));
            if exempted_by_parent {
                return Ok(Vec::new());
            }
        }

        Ok(vec![Diagnostic::error(
            self.id(),
            ERROR_MESSAGE,
            ctx.file,
            ctx.tree.line(node),
        )])
    }
}
