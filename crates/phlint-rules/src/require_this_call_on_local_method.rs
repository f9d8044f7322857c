//! Require `$this->` for calling local non-static methods

use phlint_analyze::{Diagnostic, Rule, RuleContext, RuleError, Scope};
use phlint_syntax::{NodeFinder, NodeId, NodeKind, SyntaxKind};

/// `self::method()` on a method the class declares as non-static works in
/// PHP, but hides the instance call. Report it and point at `$this->`.
#[derive(Default)]
pub struct RequireThisCallOnLocalMethodRule;

impl RequireThisCallOnLocalMethodRule {
    pub fn new() -> Self {
        Self
    }
}

impl Rule for RequireThisCallOnLocalMethodRule {
    fn id(&self) -> &'static str {
        "require-this-call-on-local-method"
    }

    fn description(&self) -> &'static str {
        "requires $this-> for calls to local non-static methods"
    }

    fn interested_kinds(&self) -> &'static [SyntaxKind] {
        &[SyntaxKind::StaticCall]
    }

    fn evaluate(
        &self,
        ctx: &RuleContext<'_>,
        node: NodeId,
        _scope: &Scope<'_>,
    ) -> Result<Vec<Diagnostic>, RuleError> {
        let NodeKind::StaticCall { class, method } = ctx.tree.kind(node) else {
            return Ok(Vec::new());
        };
        if !class.eq_ignore_ascii_case("self") {
            return Ok(Vec::new());
        }

        let finder = NodeFinder::new(ctx.tree);
        let Some(class_node) = finder.find_first_ancestor(node, SyntaxKind::Class) else {
            return Ok(Vec::new());
        };
        let Some(member) = finder.find_named_member(class_node, method) else {
            return Ok(Vec::new());
        };
        let NodeKind::Method { is_static, .. } = ctx.tree.kind(member) else {
            return Ok(Vec::new());
        };
        if *is_static {
            return Ok(Vec::new());
        }

        Ok(vec![Diagnostic::error(
            self.id(),
            format!(
                "Use \"$this->{method}()\" instead of \"self::{method}()\" to call local method",
                method = method
            ),
            ctx.file,
            ctx.tree.line(node),
        )])
    }
}
