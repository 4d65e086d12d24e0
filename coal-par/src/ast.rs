//! The Coal AST: a closed set of node kinds, each carrying a [`Span`].
//!
//! Every [`Expr`] additionally carries an [`ExprId`] assigned at construction
//! time, so the analyzer can key a `TypeTable` off it instead of requiring
//! `Hash`/`Eq` over whole subtrees or relying on pointer identity.

use coal_util::{define_idx, Span, Symbol};

define_idx!(
    /// Stable identity of an [`Expr`], assigned in source-order by the parser.
    ExprId
);

/// A parsed source file: zero or more function declarations.
#[derive(Debug, Clone)]
pub struct Program {
    pub decls: Vec<Decl>,
}

/// A top-level declaration. Coal has exactly one kind: functions.
#[derive(Debug, Clone)]
pub enum Decl {
    FnDecl(FnDecl),
}

/// `fn name() { ... }`.
///
/// Parameter lists and return-type annotations parse but carry no semantic
/// weight: every function takes no arguments and returns `int`.
#[derive(Debug, Clone)]
pub struct FnDecl {
    pub name: Symbol,
    pub params: Vec<Symbol>,
    pub return_type: Option<TypeRef>,
    pub body: Block,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct Block {
    pub stmts: Vec<Stmt>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub enum Stmt {
    VarDecl(VarDecl),
    Assign(Assign),
    ExprStmt(Expr),
    IfStmt(IfStmt),
    WhileStmt(WhileStmt),
}

/// `var`/`const` binding. `annotated_type` and `init` are each optional but
/// at least one must be present — enforced by the parser, not this type.
#[derive(Debug, Clone)]
pub struct VarDecl {
    pub name: Symbol,
    pub annotated_type: Option<TypeRef>,
    pub init: Option<Expr>,
    pub is_const: bool,
    pub span: Span,
}

/// `name = value` or the desugared form of `name += value`.
#[derive(Debug, Clone)]
pub struct Assign {
    pub name: Symbol,
    pub value: Expr,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct IfStmt {
    pub branches: Vec<IfBranch>,
    pub else_branch: Option<Block>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct IfBranch {
    pub cond: Expr,
    pub body: Block,
}

#[derive(Debug, Clone)]
pub struct WhileStmt {
    pub cond: Expr,
    pub body: Block,
    pub span: Span,
}

/// An expression node: its identity, its span, and its shape.
#[derive(Debug, Clone)]
pub struct Expr {
    pub id: ExprId,
    pub span: Span,
    pub kind: Box<ExprKind>,
}

#[derive(Debug, Clone)]
pub enum ExprKind {
    IntLit(i64),
    FloatLit(f64),
    BoolLit(bool),
    CharLit(char),
    StringLit(Symbol),
    Ident { name: Symbol },
    Unary { op: UnOp, expr: Expr },
    Binary { op: BinOp, left: Expr, right: Expr },
    Call { callee: Symbol, args: Vec<Expr> },
    MethodCall { receiver: Expr, method: Symbol, args: Vec<Expr> },
}

/// The only unary operator the grammar admits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnOp {
    Not,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    And,
    Or,
}

/// A named type reference: `int`, `float`, `bool`, `char`, `string`, or an
/// arbitrary identifier (accepted syntactically, rejected by the analyzer).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeRef {
    Int,
    Float,
    Bool,
    Char,
    String,
    Named(Symbol),
}

impl TypeRef {
    pub fn from_name(name: &str, sym: Symbol) -> TypeRef {
        match name {
            "int" => TypeRef::Int,
            "float" => TypeRef::Float,
            "bool" => TypeRef::Bool,
            "char" => TypeRef::Char,
            "string" => TypeRef::String,
            _ => TypeRef::Named(sym),
        }
    }
}
