#![deny(missing_docs)]

//! # Syntax Models
//!
//! A deliberately small typed tree. Only three shapes matter to the patcher:
//! import declarations, array literals and everything else. "Everything else"
//! still carries a kind tag so decorators, calls and bindings can be matched.

/// Byte range into the original source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    /// Inclusive start offset.
    pub start: usize,
    /// Exclusive end offset.
    pub end: usize,
}

impl Span {
    /// Creates a new span.
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Slices the span out of the text it was computed against.
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        &source[self.start..self.end]
    }
}

/// A node of the lowered syntax tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// `import ... from '...';`
    ImportDecl(ImportDecl),
    /// `[a, b, c]`
    ArrayLiteral(ArrayLiteral),
    /// Any other construct.
    Other(Other),
}

/// A top-level import declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportDecl {
    /// Full statement, including the trailing `;` when present.
    pub span: Span,
    /// Module specifier without quotes.
    pub source: String,
}

/// An array literal expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrayLiteral {
    /// From `[` to `]` inclusive.
    pub span: Span,
    /// Offset of the closing `]`.
    pub close_bracket: usize,
    /// Elements in source order (comments excluded).
    pub elements: Vec<Node>,
}

/// Any node that is neither an import nor an array literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Other {
    /// What the node is, as far as the patcher cares.
    pub kind: OtherKind,
    /// Source range.
    pub span: Span,
    /// Lowered children.
    pub children: Vec<Node>,
}

/// Tags for the constructs the patcher needs to recognise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OtherKind {
    /// `@Name(...)`, tagged with the decorator name.
    Decorator(String),
    /// `callee(args)`. Children are the arguments.
    Call(String),
    /// `const` / `let` / `var` statement. Children are its bindings.
    Declaration,
    /// `name = value` in a variable declaration. Children hold the initializer.
    Binding(String),
    /// `{ ... }`. Children are the properties.
    ObjectLiteral,
    /// `key: value`. The single child is the value.
    Property(String),
    /// A bare identifier reference.
    Identifier(String),
    /// A string literal, unquoted.
    StringLiteral(String),
    /// Anything else.
    Opaque,
}

impl Node {
    /// Source range of the node.
    pub fn span(&self) -> Span {
        match self {
            Node::ImportDecl(decl) => decl.span,
            Node::ArrayLiteral(arr) => arr.span,
            Node::Other(other) => other.span,
        }
    }

    /// Direct children.
    pub fn children(&self) -> &[Node] {
        match self {
            Node::ImportDecl(_) => &[],
            Node::ArrayLiteral(arr) => &arr.elements,
            Node::Other(other) => &other.children,
        }
    }

    /// Pre-order iterator over this node and all of its descendants.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }

    /// Returns the node as an array literal, if it is one.
    pub fn as_array(&self) -> Option<&ArrayLiteral> {
        match self {
            Node::ArrayLiteral(arr) => Some(arr),
            _ => None,
        }
    }

    /// Returns the node's tag when it is an `Other` node.
    pub fn other_kind(&self) -> Option<&OtherKind> {
        match self {
            Node::Other(other) => Some(&other.kind),
            _ => None,
        }
    }
}

/// Pre-order traversal.
pub struct Descendants<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children().iter().rev());
        Some(node)
    }
}

/// A parsed module descriptor.
#[derive(Debug, Clone)]
pub struct SourceTree {
    text: String,
    items: Vec<Node>,
}

impl SourceTree {
    /// Wraps already lowered top-level items.
    pub fn new(text: impl Into<String>, items: Vec<Node>) -> Self {
        Self {
            text: text.into(),
            items,
        }
    }

    /// The text the tree was parsed from.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Top-level statements.
    pub fn items(&self) -> &[Node] {
        &self.items
    }

    /// Top-level import declarations in source order.
    pub fn imports(&self) -> impl Iterator<Item = &ImportDecl> {
        self.items.iter().filter_map(|item| match item {
            Node::ImportDecl(decl) => Some(decl),
            _ => None,
        })
    }

    /// Pre-order traversal of the whole file.
    pub fn descendants(&self) -> impl Iterator<Item = &Node> {
        self.items.iter().flat_map(|item| item.descendants())
    }
}
