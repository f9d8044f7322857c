//! Arena-based syntax tree for PHP source units
//!
//! Nodes live in a flat `Vec` inside `Tree` and reference each other by
//! `NodeId`. Parent back-references are set while the tree is built and
//! never change afterwards: trees are immutable once parsing finishes.

/// Index of a node inside its owning [`Tree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Fieldless discriminant of [`NodeKind`], used as a dispatch key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyntaxKind {
    Program,
    Namespace,
    Class,
    Method,
    Property,
    Param,
    MethodCall,
    StaticCall,
    FunctionCall,
    New,
    Variable,
    PropertyFetch,
    ArrayDim,
    Assign,
    Return,
    Echo,
    Closure,
    Literal,
}

/// Role of a child inside its parent node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChildRole {
    /// Callee/receiver expression of a call, fetch or array access
    Receiver,
    /// Left-hand side of an assignment
    Target,
    /// Right-hand side of an assignment, returned/echoed expression
    Value,
    /// Array dimension index expression
    Index,
    /// Call or constructor argument
    Argument,
    /// Class member (method or property)
    Member,
    /// Statement inside a body
    Statement,
    /// Function/method/closure parameter
    Param,
}

/// A role-tagged edge from a parent node to one of its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Child {
    pub role: ChildRole,
    pub id: NodeId,
}

/// Member visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Public,
    Protected,
    Private,
}

/// Tagged union of node kinds with their lexical payload.
///
/// Structured children (expressions, members, statements) are kept in the
/// node's child list; names and modifiers that have no tree structure of
/// their own are stored inline here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Program,
    Namespace {
        name: String,
    },
    Class {
        name: String,
        is_final: bool,
        is_abstract: bool,
        parent: Option<String>,
        interfaces: Vec<String>,
    },
    Method {
        name: String,
        is_static: bool,
        visibility: Visibility,
    },
    Property {
        name: String,
        visibility: Visibility,
        type_hint: Option<String>,
        attributes: Vec<String>,
    },
    Param {
        name: String,
        type_hint: Option<String>,
    },
    /// `$recv->name(...)`; receiver and arguments are children
    MethodCall {
        method: String,
    },
    /// `Class::name(...)`, including `self::name(...)`
    StaticCall {
        class: String,
        method: String,
    },
    FunctionCall {
        name: String,
    },
    New {
        class: String,
    },
    /// `$name`; `$this` is `Variable { name: "this" }`
    Variable {
        name: String,
    },
    /// `$recv->name` without a call
    PropertyFetch {
        property: String,
    },
    /// `$recv[index?]`
    ArrayDim,
    Assign,
    Return,
    Echo,
    Closure,
    /// Literals and bare constant references, kept as raw text
    Literal {
        value: String,
    },
}

impl NodeKind {
    pub fn syntax_kind(&self) -> SyntaxKind {
        match self {
            NodeKind::Program => SyntaxKind::Program,
            NodeKind::Namespace { .. } => SyntaxKind::Namespace,
            NodeKind::Class { .. } => SyntaxKind::Class,
            NodeKind::Method { .. } => SyntaxKind::Method,
            NodeKind::Property { .. } => SyntaxKind::Property,
            NodeKind::Param { .. } => SyntaxKind::Param,
            NodeKind::MethodCall { .. } => SyntaxKind::MethodCall,
            NodeKind::StaticCall { .. } => SyntaxKind::StaticCall,
            NodeKind::FunctionCall { .. } => SyntaxKind::FunctionCall,
            NodeKind::New { .. } => SyntaxKind::New,
            NodeKind::Variable { .. } => SyntaxKind::Variable,
            NodeKind::PropertyFetch { .. } => SyntaxKind::PropertyFetch,
            NodeKind::ArrayDim => SyntaxKind::ArrayDim,
            NodeKind::Assign => SyntaxKind::Assign,
            NodeKind::Return => SyntaxKind::Return,
            NodeKind::Echo => SyntaxKind::Echo,
            NodeKind::Closure => SyntaxKind::Closure,
            NodeKind::Literal { .. } => SyntaxKind::Literal,
        }
    }

    /// Name of a declared member, if this node declares one.
    pub fn member_name(&self) -> Option<&str> {
        match self {
            NodeKind::Method { name, .. } | NodeKind::Property { name, .. } => Some(name),
            _ => None,
        }
    }
}

/// A single syntax node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub kind: NodeKind,
    pub parent: Option<NodeId>,
    pub children: Vec<Child>,
    /// 1-based source line
    pub line: usize,
}

/// An immutable parsed tree for one source unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tree {
    nodes: Vec<Node>,
    root: NodeId,
}

impl Tree {
    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.nodes[id.index()].kind
    }

    pub fn syntax_kind(&self, id: NodeId) -> SyntaxKind {
        self.nodes[id.index()].kind.syntax_kind()
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.index()].parent
    }

    pub fn children(&self, id: NodeId) -> &[Child] {
        &self.nodes[id.index()].children
    }

    /// First child of `id` carrying `role`.
    pub fn child_with_role(&self, id: NodeId, role: ChildRole) -> Option<NodeId> {
        self.children(id)
            .iter()
            .find(|c| c.role == role)
            .map(|c| c.id)
    }

    /// All children of `id` carrying `role`, in declaration order.
    pub fn children_with_role<'t>(
        &'t self,
        id: NodeId,
        role: ChildRole,
    ) -> impl Iterator<Item = NodeId> + 't {
        self.children(id)
            .iter()
            .filter(move |c| c.role == role)
            .map(|c| c.id)
    }

    pub fn line(&self, id: NodeId) -> usize {
        self.nodes[id.index()].line
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Pre-order traversal of the whole tree.
    pub fn preorder(&self) -> Vec<NodeId> {
        let mut out = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            out.push(id);
            for child in self.children(id).iter().rev() {
                stack.push(child.id);
            }
        }
        out
    }
}

/// Builder used by the parser; parent links are fixed once `finish` runs.
#[derive(Debug, Default)]
pub struct TreeBuilder {
    nodes: Vec<Node>,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_node(&mut self, kind: NodeKind, line: usize) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node {
            kind,
            parent: None,
            children: Vec::new(),
            line,
        });
        id
    }

    /// Attach `child` under `parent` with `role`. Every node except the
    /// root gets exactly one parent this way.
    pub fn link(&mut self, parent: NodeId, role: ChildRole, child: NodeId) {
        debug_assert!(self.nodes[child.index()].parent.is_none());
        self.nodes[child.index()].parent = Some(parent);
        self.nodes[parent.index()].children.push(Child { role, id: child });
    }

    pub fn finish(self, root: NodeId) -> Tree {
        Tree {
            nodes: self.nodes,
            root,
        }
    }
}
