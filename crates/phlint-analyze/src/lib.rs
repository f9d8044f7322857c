//! phlint-analyze: rule engine and analysis driver
//!
//! This crate provides:
//!
//! - `Diagnostic`/`DiagnosticCollection`: analysis findings
//! - `NamePatternSet`: allow/skip-list matching for rule configuration
//! - `SymbolTable` + `SymbolCollector`: reflection metadata over all units
//! - `ReflectionBridge`: symbol handle -> declaration node resolution
//! - `Scope`/`TypeResolver`: per-node context handed to rules
//! - `Rule`/`RuleEngine`: registration and per-node-kind dispatch
//! - `Analyzer`: the reference driver walking units in parallel
//!
//! # Example
//!
//! ```no_run
//! use phlint_analyze::{Analyzer, RuleEngine};
//! use std::path::Path;
//!
//! let engine = RuleEngine::new(); // register rules here
//! let analyzer = Analyzer::new(engine);
//! let report = analyzer.analyze_paths(&[Path::new("src/")]);
//! for diagnostic in report.diagnostics.iter() {
//!     println!("{}:{} {}", diagnostic.file.display(), diagnostic.line, diagnostic.message);
//! }
//! ```

pub mod diagnostic;
pub mod engine;
pub mod logging;
pub mod matcher;
pub mod reflection;
pub mod scope;
pub mod symbols;

pub use diagnostic::{Diagnostic, DiagnosticCollection, Severity};
pub use engine::{Rule, RuleContext, RuleEngine, RuleError};
pub use matcher::{NamePattern, NamePatternSet};
pub use reflection::{ReflectionBridge, ResolveError, ResolvedNode};
pub use scope::{LocalTypeResolver, Scope, TypeRef, TypeResolver};
pub use symbols::{
    ClassSymbol, MethodHandle, MethodSymbol, PropertyHandle, PropertySymbol, SymbolCollector,
    SymbolTable,
};

use std::path::{Path, PathBuf};
use std::sync::Arc;

use phlint_syntax::{NodeId, NodeKind, ParseError, SyntaxCache, Tree};
use rayon::prelude::*;
use walkdir::WalkDir;

/// A unit that produced no diagnostics because it could not be analyzed.
/// Always surfaced to the caller; a malformed file must never vanish
/// silently from the report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedUnit {
    pub file: PathBuf,
    pub reason: String,
}

/// Result of one analysis run.
#[derive(Debug, Default)]
pub struct AnalysisReport {
    pub diagnostics: DiagnosticCollection,
    pub skipped: Vec<SkippedUnit>,
}

/// Reference driver: discovers units, builds the symbol table, walks each
/// unit's tree once and dispatches every node through the rule engine.
pub struct Analyzer {
    cache: Arc<SyntaxCache>,
    bridge: ReflectionBridge,
    engine: RuleEngine,
}

impl Analyzer {
    pub fn new(engine: RuleEngine) -> Self {
        Self::with_cache(Arc::new(SyntaxCache::new()), engine)
    }

    /// Share an existing cache, e.g. across analyzer instances in tests.
    pub fn with_cache(cache: Arc<SyntaxCache>, engine: RuleEngine) -> Self {
        let bridge = ReflectionBridge::new(Arc::clone(&cache));
        Self {
            cache,
            bridge,
            engine,
        }
    }

    pub fn cache(&self) -> &Arc<SyntaxCache> {
        &self.cache
    }

    /// Analyze files and directories; directories are searched recursively
    /// for `.php` units. Unreadable inputs end up in the report's skip
    /// list, never silently dropped.
    pub fn analyze_paths(&self, paths: &[&Path]) -> AnalysisReport {
        let mut files = Vec::new();
        let mut skipped = Vec::new();
        for path in paths {
            if path.is_file() {
                files.push(path.to_path_buf());
            } else if path.is_dir() {
                for entry in WalkDir::new(path).follow_links(true).sort_by_file_name() {
                    match entry {
                        Ok(entry) => {
                            let entry_path = entry.path();
                            if entry_path.is_file()
                                && entry_path.extension().map(|e| e == "php").unwrap_or(false)
                            {
                                files.push(entry_path.to_path_buf());
                            }
                        }
                        Err(error) => {
                            let file = error
                                .path()
                                .map(Path::to_path_buf)
                                .unwrap_or_else(|| path.to_path_buf());
                            let reason = format!("cannot walk: {}", error);
                            logging::log_skipped_unit(&file, &reason);
                            skipped.push(SkippedUnit { file, reason });
                        }
                    }
                }
            } else {
                let reason = "path is neither a file nor a directory".to_string();
                logging::log_skipped_unit(path, &reason);
                skipped.push(SkippedUnit {
                    file: path.to_path_buf(),
                    reason,
                });
            }
        }
        let mut report = self.analyze_units(&files);
        report.skipped.extend(skipped);
        report.skipped.sort_by(|a, b| a.file.cmp(&b.file));
        report
    }

    /// Analyze a fixed set of units. Units are independent: they are parsed
    /// and walked in parallel, per-unit walks stay sequential, and the
    /// final report is sorted so serial and parallel runs agree.
    pub fn analyze_units(&self, files: &[PathBuf]) -> AnalysisReport {
        logging::log_analysis_start(files.len(), self.engine.len());

        let parsed: Vec<(PathBuf, Result<Arc<Tree>, ParseError>)> = files
            .par_iter()
            .map(|file| (file.clone(), self.cache.get_tree(file)))
            .collect();

        let mut units = Vec::new();
        let mut skipped = Vec::new();
        for (file, result) in parsed {
            match result {
                Ok(tree) => units.push((file, tree)),
                Err(error) => {
                    let reason = error.to_string();
                    logging::log_skipped_unit(&file, &reason);
                    skipped.push(SkippedUnit { file, reason });
                }
            }
        }

        let table = SymbolCollector::build_table(
            units.iter().map(|(file, tree)| (tree.as_ref(), file.as_path())),
        );

        let per_unit: Vec<Vec<Diagnostic>> = units
            .par_iter()
            .map(|(file, tree)| self.walk_unit(file, tree, &table))
            .collect();

        let mut diagnostics = DiagnosticCollection::new();
        for unit_diagnostics in per_unit {
            diagnostics.extend(unit_diagnostics);
        }
        diagnostics.sort();
        skipped.sort_by(|a, b| a.file.cmp(&b.file));

        logging::log_analysis_complete(diagnostics.len(), skipped.len());
        AnalysisReport {
            diagnostics,
            skipped,
        }
    }

    /// Analyze in-memory source under the given unit identity; symbols come
    /// from that unit alone.
    pub fn analyze_source(
        &self,
        path: &Path,
        source: &str,
    ) -> Result<DiagnosticCollection, ParseError> {
        let tree = self.cache.get_tree_from(path, source)?;
        let table = SymbolCollector::build_table([(tree.as_ref(), path)]);
        let mut diagnostics = DiagnosticCollection::new();
        diagnostics.extend(self.walk_unit(path, &tree, &table));
        diagnostics.sort();
        Ok(diagnostics)
    }

    /// One sequential pre-order walk; a fresh Scope per node.
    fn walk_unit(&self, file: &Path, tree: &Tree, table: &SymbolTable) -> Vec<Diagnostic> {
        let ctx = RuleContext {
            tree,
            file,
            table,
            bridge: &self.bridge,
        };
        let mut walker = UnitWalker {
            engine: &self.engine,
            ctx: &ctx,
            table,
            diagnostics: Vec::new(),
        };
        let root_resolver = LocalTypeResolver::empty();
        walker.walk(tree, tree.root(), None, None, None, &root_resolver);
        walker.diagnostics
    }
}

struct UnitWalker<'a> {
    engine: &'a RuleEngine,
    ctx: &'a RuleContext<'a>,
    table: &'a SymbolTable,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> UnitWalker<'a> {
    fn walk(
        &mut self,
        tree: &Tree,
        node: NodeId,
        namespace: Option<&str>,
        class: Option<&'a ClassSymbol>,
        method: Option<&'a MethodSymbol>,
        resolver: &LocalTypeResolver,
    ) {
        match tree.kind(node) {
            NodeKind::Namespace { name } => {
                self.visit(node, class, method, resolver);
                let namespace = name.as_str();
                for child in tree.children(node) {
                    self.walk(tree, child.id, Some(namespace), class, method, resolver);
                }
            }
            NodeKind::Class { name, .. } => {
                let fqn = match namespace {
                    Some(ns) => format!("{}\\{}", ns, name),
                    None => name.clone(),
                };
                let class = self.table.get_class(&fqn);
                self.visit(node, class, method, resolver);
                for child in tree.children(node) {
                    self.walk(tree, child.id, namespace, class, None, resolver);
                }
            }
            NodeKind::Method { name, .. } => {
                let method = class.and_then(|c| c.method(name));
                let local = LocalTypeResolver::for_method(tree, node);
                self.visit(node, class, method, &local);
                for child in tree.children(node) {
                    self.walk(tree, child.id, namespace, class, method, &local);
                }
            }
            _ => {
                self.visit(node, class, method, resolver);
                for child in tree.children(node) {
                    self.walk(tree, child.id, namespace, class, method, resolver);
                }
            }
        }
    }

    fn visit(
        &mut self,
        node: NodeId,
        class: Option<&ClassSymbol>,
        method: Option<&MethodSymbol>,
        resolver: &LocalTypeResolver,
    ) {
        let scope = Scope::new(class, method, resolver);
        let found = self.engine.visit(self.ctx, node, &scope);
        self.diagnostics.extend(found);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use phlint_syntax::SyntaxKind;
    use std::fs;

    /// Flags every method call whose receiver type is known to the oracle.
    struct TypedCallSpy;

    impl Rule for TypedCallSpy {
        fn id(&self) -> &'static str {
            "typed-call-spy"
        }

        fn description(&self) -> &'static str {
            "reports method calls with a resolvable receiver type"
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
            let Some(receiver) =
                ctx.tree.child_with_role(node, phlint_syntax::ChildRole::Receiver)
            else {
                return Ok(Vec::new());
            };
            let Some(type_ref) = scope.resolve_type(ctx.tree, receiver) else {
                return Ok(Vec::new());
            };
            let described = match type_ref {
                TypeRef::This => "$this".to_string(),
                TypeRef::Class(name) => name,
            };
            Ok(vec![Diagnostic::error(
                self.id(),
                format!("call on {}", described),
                ctx.file,
                ctx.tree.line(node),
            )])
        }
    }

    fn engine_with_spy() -> RuleEngine {
        let mut engine = RuleEngine::new();
        engine.register(Box::new(TypedCallSpy));
        engine
    }

    #[test]
    fn analyze_source_resolves_receiver_types() {
        let analyzer = Analyzer::new(engine_with_spy());
        let source = "<?php\nclass C {\n    public function __construct(App\\Dep $dep) {\n        $dep->init();\n        $this->setup();\n    }\n}\n";
        let diagnostics = analyzer
            .analyze_source(Path::new("/virtual/c.php"), source)
            .unwrap();

        let messages: Vec<_> = diagnostics.iter().map(|d| d.message.as_str()).collect();
        assert_eq!(messages, vec!["call on App\\Dep", "call on $this"]);
        assert_eq!(diagnostics.diagnostics()[0].line, 4);
    }

    #[test]
    fn malformed_units_are_reported_as_skipped() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("good.php"), "<?php class Good {}").unwrap();
        fs::write(dir.path().join("bad.php"), "<?php class {").unwrap();
        fs::write(dir.path().join("notes.txt"), "not php").unwrap();

        let analyzer = Analyzer::new(engine_with_spy());
        let report = analyzer.analyze_paths(&[dir.path()]);

        assert_eq!(report.skipped.len(), 1);
        assert!(report.skipped[0].file.ends_with("bad.php"));
        assert!(!report.skipped[0].reason.is_empty());
    }

    #[test]
    fn missing_input_path_is_reported_as_skipped() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("good.php"), "<?php class Good {}").unwrap();
        let gone = dir.path().join("gone");

        let analyzer = Analyzer::new(engine_with_spy());
        let report = analyzer.analyze_paths(&[dir.path(), gone.as_path()]);

        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].file, gone);
        assert!(report.skipped[0]
            .reason
            .contains("neither a file nor a directory"));
    }

    #[test]
    fn runs_are_deterministic() {
        let dir = tempfile::tempdir().unwrap();
        for i in 0..4 {
            fs::write(
                dir.path().join(format!("unit{}.php", i)),
                format!(
                    "<?php\nclass C{} {{\n    public function run(App\\Dep $dep) {{\n        $dep->go();\n    }}\n}}\n",
                    i
                ),
            )
            .unwrap();
        }

        let first = Analyzer::new(engine_with_spy()).analyze_paths(&[dir.path()]);
        let second = Analyzer::new(engine_with_spy()).analyze_paths(&[dir.path()]);

        assert_eq!(first.diagnostics, second.diagnostics);
        assert_eq!(first.diagnostics.len(), 4);
    }

    #[test]
    fn symbols_span_units() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("base.php"),
            "<?php namespace App; class Base {}",
        )
        .unwrap();
        fs::write(
            dir.path().join("child.php"),
            "<?php namespace App; class Child extends Base {}",
        )
        .unwrap();

        let analyzer = Analyzer::new(RuleEngine::new());
        let report = analyzer.analyze_paths(&[dir.path()]);
        assert!(report.skipped.is_empty());
        assert!(report.diagnostics.is_empty());
    }
}
