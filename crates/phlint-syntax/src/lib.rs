//! phlint-syntax: PHP syntax trees for phlint
//!
//! This crate provides:
//! - `Tree`/`Node`/`NodeId`: arena-based syntax tree with parent handles
//! - `parse()`: recursive-descent parser for the analyzed PHP subset
//! - `SyntaxCache`: one parsed tree per source unit, shared per run
//! - `NodeFinder`: ancestor/descendant/named-member navigation

pub mod cache;
pub mod finder;
pub mod lexer;
pub mod node;
pub mod parser;

pub use cache::SyntaxCache;
pub use finder::NodeFinder;
pub use node::{Child, ChildRole, Node, NodeId, NodeKind, SyntaxKind, Tree, Visibility};
pub use parser::{parse, ParseError};
