//! Diagnostic types for analysis findings

use std::path::PathBuf;

/// Severity of a diagnostic. Rule findings are errors; engine-level
/// attributions of a failed rule are warnings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// A single finding: message plus originating location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// The rule that produced this diagnostic (e.g. "no-factory-in-constructor")
    pub rule_id: String,
    pub severity: Severity,
    pub message: String,
    /// Unit the finding belongs to
    pub file: PathBuf,
    /// Line number (1-based)
    pub line: usize,
}

impl Diagnostic {
    pub fn error(
        rule_id: impl Into<String>,
        message: impl Into<String>,
        file: impl Into<PathBuf>,
        line: usize,
    ) -> Self {
        Self {
            rule_id: rule_id.into(),
            severity: Severity::Error,
            message: message.into(),
            file: file.into(),
            line,
        }
    }

    pub fn warning(
        rule_id: impl Into<String>,
        message: impl Into<String>,
        file: impl Into<PathBuf>,
        line: usize,
    ) -> Self {
        Self {
            rule_id: rule_id.into(),
            severity: Severity::Warning,
            message: message.into(),
            file: file.into(),
            line,
        }
    }
}

/// Ordered collection of diagnostics from one run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DiagnosticCollection {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn extend(&mut self, diagnostics: impl IntoIterator<Item = Diagnostic>) {
        self.diagnostics.extend(diagnostics);
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Error)
            .count()
    }

    /// Stable sort by file then line; diagnostics on the same line keep the
    /// order they were produced in (rule registration order).
    pub fn sort(&mut self) {
        self.diagnostics
            .sort_by(|a, b| a.file.cmp(&b.file).then_with(|| a.line.cmp(&b.line)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_is_stable_within_a_line() {
        let mut collection = DiagnosticCollection::new();
        collection.add(Diagnostic::error("b-rule", "second", "/a.php", 3));
        collection.add(Diagnostic::error("a-rule", "first registered wins", "/a.php", 3));
        collection.add(Diagnostic::error("c-rule", "earlier line", "/a.php", 1));
        collection.sort();

        let rules: Vec<_> = collection.iter().map(|d| d.rule_id.as_str()).collect();
        assert_eq!(rules, vec!["c-rule", "b-rule", "a-rule"]);
    }

    #[test]
    fn counts_by_severity() {
        let mut collection = DiagnosticCollection::new();
        collection.add(Diagnostic::error("r", "e", "/a.php", 1));
        collection.add(Diagnostic::warning("r", "w", "/a.php", 2));
        assert_eq!(collection.len(), 2);
        assert_eq!(collection.error_count(), 1);
    }
}
