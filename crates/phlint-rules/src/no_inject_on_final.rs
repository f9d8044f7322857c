//! Forbid property injection on final classes

use phlint_analyze::{Diagnostic, Rule, RuleContext, RuleError, Scope};
use phlint_syntax::{NodeId, NodeKind, SyntaxKind};

use crate::config::NoInjectConfig;

const ERROR_MESSAGE: &str = "Use constructor on final classes, instead of property injection";

/// A final class cannot be extended for testing, so its injected
/// properties cannot be substituted either; such classes should take their
/// dependencies through the constructor. Reports properties carrying a
/// configured inject attribute inside a final class.
pub struct NoInjectOnFinalRule {
    config: NoInjectConfig,
}

impl NoInjectOnFinalRule {
    pub fn new(config: NoInjectConfig) -> Self {
        Self { config }
    }

    /// Attribute markers match as written or by final name segment, so
    /// `#[Inject]` and `#[Nette\DI\Attributes\Inject]` both count.
    fn is_inject_attribute(&self, attribute: &str) -> bool {
        self.config.inject_attributes.iter().any(|marker| {
            attribute == marker
                || marker
                    .rsplit('\\')
                    .next()
                    .is_some_and(|short| attribute == short)
                || attribute
                    .rsplit('\\')
                    .next()
                    .is_some_and(|short| short == marker)
        })
    }
}

impl Rule for NoInjectOnFinalRule {
    fn id(&self) -> &'static str {
        "no-inject-on-final"
    }

    fn description(&self) -> &'static str {
        "disallows inject attributes on properties of final classes"
    }

    fn interested_kinds(&self) -> &'static [SyntaxKind] {
        &[SyntaxKind::Property]
    }

    fn evaluate(
        &self,
        ctx: &RuleContext<'_>,
        node: NodeId,
        scope: &Scope<'_>,
    ) -> Result<Vec<Diagnostic>, RuleError> {
        let NodeKind::Property { attributes, .. } = ctx.tree.kind(node) else {
            return Ok(Vec::new());
        };
        if !attributes.iter().any(|a| self.is_inject_attribute(a)) {
            return Ok(Vec::new());
        }
        if !scope.class_symbol().is_some_and(|class| class.is_final) {
            return Ok(Vec::new());
        }

        Ok(vec![Diagnostic::error(
            self.id(),
            ERROR_MESSAGE,
            ctx.file,
            ctx.tree.line(node),
        )])
    }
}
