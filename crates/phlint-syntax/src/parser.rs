//! Recursive-descent parser producing the arena tree
//!
//! Parses the PHP subset the rules inspect: namespaces, class declarations
//! with attributes and modifiers, typed properties, methods, and the
//! expression forms that matter to structural rules (variables, property
//! fetches, method/static/function calls, `new`, array access, assignment,
//! closures). Everything is parsed into [`Tree`] with parent links fixed at
//! build time.

use std::path::PathBuf;

use thiserror::Error;

use crate::lexer::{Lexer, Token, TokenKind};
use crate::node::{ChildRole, NodeId, NodeKind, Tree, TreeBuilder, Visibility};

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("unexpected character '{ch}' at line {line}, column {column}")]
    UnexpectedChar { ch: char, line: usize, column: usize },

    #[error("unterminated string at line {line}, column {column}")]
    UnterminatedString { line: usize, column: usize },

    #[error("unexpected token at line {line}, column {column}: expected {expected}, got {got:?}")]
    UnexpectedToken {
        line: usize,
        column: usize,
        expected: String,
        got: TokenKind,
    },

    #[error("unexpected end of file")]
    UnexpectedEof,

    #[error("failed to read {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Parse one source unit into a tree.
pub fn parse(source: &str) -> Result<Tree, ParseError> {
    let tokens = Lexer::new(source).tokenize()?;
    Parser {
        tokens,
        pos: 0,
        builder: TreeBuilder::new(),
    }
    .parse_program()
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    builder: TreeBuilder,
}

impl Parser {
    fn peek(&self) -> &Token {
        // the token stream always ends with Eof
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn peek_kind(&self) -> &TokenKind {
        &self.peek().kind
    }

    fn bump(&mut self) -> Token {
        let token = self.peek().clone();
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
        token
    }

    fn at(&self, kind: &TokenKind) -> bool {
        self.peek_kind() == kind
    }

    fn at_keyword(&self, keyword: &str) -> bool {
        self.peek_kind().is_keyword(keyword)
    }

    fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn eat_keyword(&mut self, keyword: &str) -> bool {
        if self.at_keyword(keyword) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: &TokenKind, expected: &str) -> Result<Token, ParseError> {
        if self.at(kind) {
            Ok(self.bump())
        } else {
            Err(self.error_here(expected))
        }
    }

    fn expect_keyword(&mut self, keyword: &str) -> Result<Token, ParseError> {
        if self.at_keyword(keyword) {
            Ok(self.bump())
        } else {
            Err(self.error_here(keyword))
        }
    }

    /// Consume an identifier token, returning its text and line.
    fn expect_name(&mut self, expected: &str) -> Result<(String, usize), ParseError> {
        match self.peek_kind() {
            TokenKind::Identifier(_) => {
                let token = self.bump();
                let TokenKind::Identifier(name) = token.kind else {
                    unreachable!()
                };
                Ok((name, token.line))
            }
            _ => Err(self.error_here(expected)),
        }
    }

    fn error_here(&self, expected: &str) -> ParseError {
        let token = self.peek();
        if matches!(token.kind, TokenKind::Eof) {
            ParseError::UnexpectedEof
        } else {
            ParseError::UnexpectedToken {
                line: token.line,
                column: token.column,
                expected: expected.to_string(),
                got: token.kind.clone(),
            }
        }
    }

    // ---- declarations ----

    fn parse_program(mut self) -> Result<Tree, ParseError> {
        let root = self.builder.add_node(NodeKind::Program, 1);
        if !self.eat(&TokenKind::OpenTag) {
            return Err(self.error_here("<?php"));
        }

        let mut container = root;
        while !self.at(&TokenKind::Eof) {
            if self.at_keyword("namespace") {
                let line = self.peek().line;
                self.bump();
                let (name, _) = self.expect_name("namespace name")?;
                self.expect(&TokenKind::Semicolon, ";")?;
                let ns = self.builder.add_node(NodeKind::Namespace { name }, line);
                self.builder.link(root, ChildRole::Statement, ns);
                // implicit namespace body: the rest of the unit
                container = ns;
                continue;
            }
            if self.at_keyword("use") {
                self.skip_until_semicolon()?;
                continue;
            }
            let stmt = self.parse_statement()?;
            self.builder.link(container, ChildRole::Statement, stmt);
        }
        Ok(self.builder.finish(root))
    }

    fn parse_statement(&mut self) -> Result<NodeId, ParseError> {
        let attributes = self.parse_attribute_groups()?;
        if self.at_keyword("final") || self.at_keyword("abstract") || self.at_keyword("class") {
            return self.parse_class();
        }
        if !attributes.is_empty() {
            return Err(self.error_here("class declaration"));
        }
        if self.at_keyword("return") {
            let line = self.bump().line;
            let node = self.builder.add_node(NodeKind::Return, line);
            if !self.at(&TokenKind::Semicolon) {
                let value = self.parse_expression()?;
                self.builder.link(node, ChildRole::Value, value);
            }
            self.expect(&TokenKind::Semicolon, ";")?;
            return Ok(node);
        }
        if self.at_keyword("echo") {
            let line = self.bump().line;
            let node = self.builder.add_node(NodeKind::Echo, line);
            loop {
                let value = self.parse_expression()?;
                self.builder.link(node, ChildRole::Value, value);
                if !self.eat(&TokenKind::Comma) {
                    break;
                }
            }
            self.expect(&TokenKind::Semicolon, ";")?;
            return Ok(node);
        }
        let expr = self.parse_expression()?;
        self.expect(&TokenKind::Semicolon, ";")?;
        Ok(expr)
    }

    fn parse_class(&mut self) -> Result<NodeId, ParseError> {
        let line = self.peek().line;
        let mut is_final = false;
        let mut is_abstract = false;
        loop {
            if self.eat_keyword("final") {
                is_final = true;
            } else if self.eat_keyword("abstract") {
                is_abstract = true;
            } else {
                break;
            }
        }
        self.expect_keyword("class")?;
        let (name, _) = self.expect_name("class name")?;

        let mut parent = None;
        if self.eat_keyword("extends") {
            let (parent_name, _) = self.expect_name("parent class name")?;
            parent = Some(normalize_name(parent_name));
        }
        let mut interfaces = Vec::new();
        if self.eat_keyword("implements") {
            loop {
                let (iface, _) = self.expect_name("interface name")?;
                interfaces.push(normalize_name(iface));
                if !self.eat(&TokenKind::Comma) {
                    break;
                }
            }
        }

        let class = self.builder.add_node(
            NodeKind::Class {
                name,
                is_final,
                is_abstract,
                parent,
                interfaces,
            },
            line,
        );

        self.expect(&TokenKind::LBrace, "{")?;
        while !self.at(&TokenKind::RBrace) {
            if self.at(&TokenKind::Eof) {
                return Err(ParseError::UnexpectedEof);
            }
            if let Some(member) = self.parse_member()? {
                self.builder.link(class, ChildRole::Member, member);
            }
        }
        self.expect(&TokenKind::RBrace, "}")?;
        Ok(class)
    }

    /// Parse one class member. Constants are consumed but produce no node.
    fn parse_member(&mut self) -> Result<Option<NodeId>, ParseError> {
        let attributes = self.parse_attribute_groups()?;
        let line = self.peek().line;

        let mut visibility = Visibility::Public;
        let mut is_static = false;
        loop {
            if self.eat_keyword("public") {
                visibility = Visibility::Public;
            } else if self.eat_keyword("protected") {
                visibility = Visibility::Protected;
            } else if self.eat_keyword("private") {
                visibility = Visibility::Private;
            } else if self.eat_keyword("static") {
                is_static = true;
            } else if self.eat_keyword("readonly")
                || self.eat_keyword("final")
                || self.eat_keyword("abstract")
            {
                // tracked on the class/symbol level where it matters
            } else {
                break;
            }
        }

        if self.at_keyword("const") {
            self.skip_until_semicolon()?;
            return Ok(None);
        }

        if self.eat_keyword("function") {
            let (name, _) = self.expect_name("method name")?;
            let method = self.builder.add_node(
                NodeKind::Method {
                    name,
                    is_static,
                    visibility,
                },
                line,
            );
            self.expect(&TokenKind::LParen, "(")?;
            self.parse_params_into(method)?;
            if self.eat(&TokenKind::Colon) {
                self.parse_type()?;
            }
            if self.eat(&TokenKind::Semicolon) {
                // abstract/interface method, no body
                return Ok(Some(method));
            }
            self.expect(&TokenKind::LBrace, "{")?;
            while !self.at(&TokenKind::RBrace) {
                if self.at(&TokenKind::Eof) {
                    return Err(ParseError::UnexpectedEof);
                }
                let stmt = self.parse_statement()?;
                self.builder.link(method, ChildRole::Statement, stmt);
            }
            self.expect(&TokenKind::RBrace, "}")?;
            return Ok(Some(method));
        }

        // typed or untyped property
        let type_hint = self.parse_optional_type()?;
        if let TokenKind::Variable(_) = self.peek_kind() {
            let token = self.bump();
            let TokenKind::Variable(name) = token.kind else {
                unreachable!()
            };
            let property = self.builder.add_node(
                NodeKind::Property {
                    name,
                    visibility,
                    type_hint,
                    attributes,
                },
                line,
            );
            if self.eat(&TokenKind::Equals) {
                let default = self.parse_expression()?;
                self.builder.link(property, ChildRole::Value, default);
            }
            self.expect(&TokenKind::Semicolon, ";")?;
            return Ok(Some(property));
        }

        Err(self.error_here("class member"))
    }

    fn parse_params_into(&mut self, owner: NodeId) -> Result<(), ParseError> {
        if self.eat(&TokenKind::RParen) {
            return Ok(());
        }
        loop {
            let _ = self.parse_attribute_groups()?;
            // constructor promotion modifiers
            while self.eat_keyword("public")
                || self.eat_keyword("protected")
                || self.eat_keyword("private")
                || self.eat_keyword("readonly")
            {}
            let type_hint = self.parse_optional_type()?;
            self.eat(&TokenKind::Ampersand);
            let token = self.peek().clone();
            let TokenKind::Variable(name) = token.kind else {
                return Err(self.error_here("parameter"));
            };
            self.bump();
            let param = self
                .builder
                .add_node(NodeKind::Param { name, type_hint }, token.line);
            self.builder.link(owner, ChildRole::Param, param);
            if self.eat(&TokenKind::Equals) {
                let default = self.parse_expression()?;
                self.builder.link(param, ChildRole::Value, default);
            }
            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }
        self.expect(&TokenKind::RParen, ")")?;
        Ok(())
    }

    /// `?Type` / `Type` / `A|B` ahead of a property or parameter.
    fn parse_optional_type(&mut self) -> Result<Option<String>, ParseError> {
        if self.at(&TokenKind::Question) {
            self.bump();
            return Ok(Some(self.parse_type()?));
        }
        if matches!(self.peek_kind(), TokenKind::Identifier(_)) {
            return Ok(Some(self.parse_type()?));
        }
        Ok(None)
    }

    fn parse_type(&mut self) -> Result<String, ParseError> {
        self.eat(&TokenKind::Question);
        let (first, _) = self.expect_name("type name")?;
        let mut full = normalize_name(first);
        while self.eat(&TokenKind::Pipe) {
            let (next, _) = self.expect_name("type name")?;
            full.push('|');
            full.push_str(&normalize_name(next));
        }
        Ok(full)
    }

    /// `#[Foo, Bar(args)]` groups; returns attribute names, arguments are
    /// consumed without building nodes.
    fn parse_attribute_groups(&mut self) -> Result<Vec<String>, ParseError> {
        let mut names = Vec::new();
        while self.at(&TokenKind::AttributeStart) {
            self.bump();
            loop {
                let (name, _) = self.expect_name("attribute name")?;
                names.push(normalize_name(name));
                if self.eat(&TokenKind::LParen) {
                    self.skip_balanced_parens()?;
                }
                if !self.eat(&TokenKind::Comma) {
                    break;
                }
            }
            self.expect(&TokenKind::RBracket, "]")?;
        }
        Ok(names)
    }

    fn skip_balanced_parens(&mut self) -> Result<(), ParseError> {
        let mut depth = 1usize;
        while depth > 0 {
            match self.peek_kind() {
                TokenKind::LParen => depth += 1,
                TokenKind::RParen => depth -= 1,
                TokenKind::Eof => return Err(ParseError::UnexpectedEof),
                _ => {}
            }
            self.bump();
        }
        Ok(())
    }

    fn skip_until_semicolon(&mut self) -> Result<(), ParseError> {
        loop {
            match self.peek_kind() {
                TokenKind::Semicolon => {
                    self.bump();
                    return Ok(());
                }
                TokenKind::Eof => return Err(ParseError::UnexpectedEof),
                _ => {
                    self.bump();
                }
            }
        }
    }

    // ---- expressions ----

    fn parse_expression(&mut self) -> Result<NodeId, ParseError> {
        let lhs = self.parse_postfix()?;
        if self.at(&TokenKind::Equals) {
            let line = self.bump().line;
            let assign = self.builder.add_node(NodeKind::Assign, line);
            let rhs = self.parse_expression()?;
            self.builder.link(assign, ChildRole::Target, lhs);
            self.builder.link(assign, ChildRole::Value, rhs);
            return Ok(assign);
        }
        Ok(lhs)
    }

    fn parse_postfix(&mut self) -> Result<NodeId, ParseError> {
        let mut expr = self.parse_primary()?;
        loop {
            match self.peek_kind() {
                TokenKind::Arrow => {
                    let line = self.bump().line;
                    let (name, _) = self.expect_name("member name")?;
                    if self.eat(&TokenKind::LParen) {
                        let call = self
                            .builder
                            .add_node(NodeKind::MethodCall { method: name }, line);
                        self.builder.link(call, ChildRole::Receiver, expr);
                        self.parse_args_into(call)?;
                        expr = call;
                    } else {
                        let fetch = self
                            .builder
                            .add_node(NodeKind::PropertyFetch { property: name }, line);
                        self.builder.link(fetch, ChildRole::Receiver, expr);
                        expr = fetch;
                    }
                }
                TokenKind::LBracket => {
                    let line = self.bump().line;
                    let dim = self.builder.add_node(NodeKind::ArrayDim, line);
                    self.builder.link(dim, ChildRole::Receiver, expr);
                    if !self.at(&TokenKind::RBracket) {
                        let index = self.parse_expression()?;
                        self.builder.link(dim, ChildRole::Index, index);
                    }
                    self.expect(&TokenKind::RBracket, "]")?;
                    expr = dim;
                }
                _ => return Ok(expr),
            }
        }
    }

    fn parse_primary(&mut self) -> Result<NodeId, ParseError> {
        match self.peek_kind().clone() {
            TokenKind::Variable(name) => {
                let line = self.bump().line;
                Ok(self.builder.add_node(NodeKind::Variable { name }, line))
            }
            TokenKind::Int(value) => {
                let line = self.bump().line;
                Ok(self.builder.add_node(
                    NodeKind::Literal {
                        value: value.to_string(),
                    },
                    line,
                ))
            }
            TokenKind::Str(value) => {
                let line = self.bump().line;
                Ok(self.builder.add_node(NodeKind::Literal { value }, line))
            }
            TokenKind::LParen => {
                self.bump();
                let inner = self.parse_expression()?;
                self.expect(&TokenKind::RParen, ")")?;
                Ok(inner)
            }
            TokenKind::Identifier(name) if name.eq_ignore_ascii_case("new") => {
                let line = self.bump().line;
                let (class, _) = self.expect_name("class name")?;
                let node = self.builder.add_node(
                    NodeKind::New {
                        class: normalize_name(class),
                    },
                    line,
                );
                if self.eat(&TokenKind::LParen) {
                    self.parse_args_into(node)?;
                }
                Ok(node)
            }
            TokenKind::Identifier(name) if name.eq_ignore_ascii_case("function") => {
                self.parse_closure()
            }
            TokenKind::Identifier(_) => {
                let (name, line) = self.expect_name("expression")?;
                if self.eat(&TokenKind::DoubleColon) {
                    let (member, _) = self.expect_name("member name")?;
                    if self.eat(&TokenKind::LParen) {
                        let call = self.builder.add_node(
                            NodeKind::StaticCall {
                                class: normalize_name(name),
                                method: member,
                            },
                            line,
                        );
                        self.parse_args_into(call)?;
                        return Ok(call);
                    }
                    // class constant fetch, e.g. `self::class`
                    return Ok(self.builder.add_node(
                        NodeKind::Literal {
                            value: format!("{}::{}", normalize_name(name), member),
                        },
                        line,
                    ));
                }
                if self.eat(&TokenKind::LParen) {
                    let call = self.builder.add_node(
                        NodeKind::FunctionCall {
                            name: normalize_name(name),
                        },
                        line,
                    );
                    self.parse_args_into(call)?;
                    return Ok(call);
                }
                // bare constant reference
                Ok(self.builder.add_node(NodeKind::Literal { value: name }, line))
            }
            _ => Err(self.error_here("expression")),
        }
    }

    fn parse_closure(&mut self) -> Result<NodeId, ParseError> {
        let line = self.bump().line; // `function`
        self.eat(&TokenKind::Ampersand);
        let closure = self.builder.add_node(NodeKind::Closure, line);
        self.expect(&TokenKind::LParen, "(")?;
        self.parse_params_into(closure)?;
        if self.eat_keyword("use") {
            self.expect(&TokenKind::LParen, "(")?;
            loop {
                self.eat(&TokenKind::Ampersand);
                match self.peek_kind() {
                    TokenKind::Variable(_) => {
                        self.bump();
                    }
                    _ => return Err(self.error_here("closure binding")),
                }
                if !self.eat(&TokenKind::Comma) {
                    break;
                }
            }
            self.expect(&TokenKind::RParen, ")")?;
        }
        if self.eat(&TokenKind::Colon) {
            self.parse_type()?;
        }
        self.expect(&TokenKind::LBrace, "{")?;
        while !self.at(&TokenKind::RBrace) {
            if self.at(&TokenKind::Eof) {
                return Err(ParseError::UnexpectedEof);
            }
            let stmt = self.parse_statement()?;
            self.builder.link(closure, ChildRole::Statement, stmt);
        }
        self.expect(&TokenKind::RBrace, "}")?;
        Ok(closure)
    }

    fn parse_args_into(&mut self, call: NodeId) -> Result<(), ParseError> {
        if self.eat(&TokenKind::RParen) {
            return Ok(());
        }
        loop {
            let arg = self.parse_expression()?;
            self.builder.link(call, ChildRole::Argument, arg);
            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }
        self.expect(&TokenKind::RParen, ")")?;
        Ok(())
    }
}

/// Strip a leading namespace separator; stored names are always unrooted.
fn normalize_name(name: String) -> String {
    match name.strip_prefix('\\') {
        Some(rest) => rest.to_string(),
        None => name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::SyntaxKind;

    fn parse_ok(source: &str) -> Tree {
        parse(source).unwrap()
    }

    fn find_kind(tree: &Tree, kind: SyntaxKind) -> Option<NodeId> {
        tree.preorder()
            .into_iter()
            .find(|&id| tree.syntax_kind(id) == kind)
    }

    #[test]
    fn parses_class_with_members() {
        let tree = parse_ok(
            r#"<?php
namespace App;

final class SomeClass extends Base implements First, Second
{
    private SomeDependency $dependency;

    public function __construct(SomeFactory $factory)
    {
        $this->dependency = $factory->build();
    }
}
"#,
        );

        let class = find_kind(&tree, SyntaxKind::Class).unwrap();
        let NodeKind::Class {
            name,
            is_final,
            parent,
            interfaces,
            ..
        } = tree.kind(class)
        else {
            panic!("expected class");
        };
        assert_eq!(name, "SomeClass");
        assert!(*is_final);
        assert_eq!(parent.as_deref(), Some("Base"));
        assert_eq!(interfaces, &["First", "Second"]);

        let members: Vec<_> = tree.children_with_role(class, ChildRole::Member).collect();
        assert_eq!(members.len(), 2);
        assert_eq!(tree.syntax_kind(members[0]), SyntaxKind::Property);
        assert_eq!(tree.syntax_kind(members[1]), SyntaxKind::Method);
    }

    #[test]
    fn method_call_has_receiver_and_line() {
        let tree = parse_ok("<?php\n$factory->build(1, 'x');\n");
        let call = find_kind(&tree, SyntaxKind::MethodCall).unwrap();
        assert_eq!(tree.line(call), 2);
        let NodeKind::MethodCall { method } = tree.kind(call) else {
            panic!("expected method call");
        };
        assert_eq!(method, "build");
        let receiver = tree.child_with_role(call, ChildRole::Receiver).unwrap();
        assert_eq!(
            tree.kind(receiver),
            &NodeKind::Variable {
                name: "factory".to_string()
            }
        );
        let args: Vec<_> = tree.children_with_role(call, ChildRole::Argument).collect();
        assert_eq!(args.len(), 2);
    }

    #[test]
    fn static_call_on_self() {
        let tree = parse_ok("<?php self::execute();\n");
        let call = find_kind(&tree, SyntaxKind::StaticCall).unwrap();
        assert_eq!(
            tree.kind(call),
            &NodeKind::StaticCall {
                class: "self".to_string(),
                method: "execute".to_string()
            }
        );
    }

    #[test]
    fn property_attributes_are_collected() {
        let tree = parse_ok(
            "<?php\nfinal class P {\n    #[Inject]\n    public SomeType $service;\n}\n",
        );
        let property = find_kind(&tree, SyntaxKind::Property).unwrap();
        let NodeKind::Property {
            name,
            attributes,
            type_hint,
            ..
        } = tree.kind(property)
        else {
            panic!("expected property");
        };
        assert_eq!(name, "service");
        assert_eq!(attributes, &["Inject"]);
        assert_eq!(type_hint.as_deref(), Some("SomeType"));
    }

    #[test]
    fn assignment_nests_call_under_assign() {
        let tree = parse_ok("<?php $this->dep = $factory->build();\n");
        let assign = find_kind(&tree, SyntaxKind::Assign).unwrap();
        let target = tree.child_with_role(assign, ChildRole::Target).unwrap();
        let value = tree.child_with_role(assign, ChildRole::Value).unwrap();
        assert_eq!(tree.syntax_kind(target), SyntaxKind::PropertyFetch);
        assert_eq!(tree.syntax_kind(value), SyntaxKind::MethodCall);
        assert_eq!(tree.parent(value), Some(assign));
    }

    #[test]
    fn array_dim_wraps_receiver() {
        let tree = parse_ok("<?php $map[$factory->build()];\n");
        let dim = find_kind(&tree, SyntaxKind::ArrayDim).unwrap();
        let index = tree.child_with_role(dim, ChildRole::Index).unwrap();
        assert_eq!(tree.syntax_kind(index), SyntaxKind::MethodCall);
        assert_eq!(tree.parent(index), Some(dim));
    }

    #[test]
    fn closure_is_a_distinct_body() {
        let tree = parse_ok(
            "<?php\nclass C {\n    public function run() {\n        $fn = function () { $this->inner(); };\n    }\n}\n",
        );
        let closure = find_kind(&tree, SyntaxKind::Closure).unwrap();
        let call = find_kind(&tree, SyntaxKind::MethodCall).unwrap();
        // the inner call hangs below the closure, not directly below run()
        let mut cursor = tree.parent(call);
        let mut crossed_closure = false;
        while let Some(id) = cursor {
            if id == closure {
                crossed_closure = true;
                break;
            }
            cursor = tree.parent(id);
        }
        assert!(crossed_closure);
    }

    #[test]
    fn malformed_source_reports_position() {
        let err = parse("<?php class {").unwrap_err();
        match err {
            ParseError::UnexpectedToken { line, .. } => assert_eq!(line, 1),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn missing_open_tag_is_an_error() {
        assert!(parse("class Foo {}").is_err());
    }

    #[test]
    fn constructor_promotion_params() {
        let tree = parse_ok(
            "<?php class C { public function __construct(private Dep $dep, int $n = 1) {} }",
        );
        let params: Vec<_> = tree
            .preorder()
            .into_iter()
            .filter(|&id| tree.syntax_kind(id) == SyntaxKind::Param)
            .collect();
        assert_eq!(params.len(), 2);
        assert_eq!(
            tree.kind(params[0]),
            &NodeKind::Param {
                name: "dep".to_string(),
                type_hint: Some("Dep".to_string())
            }
        );
    }
}
