//! Statement entity records, one struct per [`StmtSort`] variant, plus the
//! [`Stmt`] visitor-dispatch enum.

use super::common::SourceLocation;
use crate::index::{DeclIndex, DirIndex, ExprIndex, Sequence, StmtIndex, SyntaxIndex, TypeIndex, VendorIndex};

#[derive(Debug, Clone, Copy, serde::Serialize, Default)]
pub struct VendorStmt {
    pub index: VendorIndex,
}

#[derive(Debug, Clone, Copy, serde::Serialize, Default)]
pub struct TryStmt {
    pub locus: SourceLocation,
    pub statements: Sequence<StmtIndex>,
    pub handlers: StmtIndex,
}

#[derive(Debug, Clone, Copy, serde::Serialize, Default)]
pub struct IfStmt {
    pub locus: SourceLocation,
    pub init: StmtIndex,
    pub condition: StmtIndex,
    pub consequence: StmtIndex,
    pub alternative: StmtIndex,
}

#[derive(Debug, Clone, Copy, serde::Serialize, Default)]
pub struct ForStmt {
    pub locus: SourceLocation,
    pub init: StmtIndex,
    pub condition: StmtIndex,
    pub increment: StmtIndex,
    pub body: StmtIndex,
}

/// A `case`/`default` label and the statement it guards. A null `label`
/// marks the `default` case.
#[derive(Debug, Clone, Copy, serde::Serialize, Default)]
pub struct LabeledStmt {
    pub locus: SourceLocation,
    pub ty: TypeIndex,
    pub label: ExprIndex,
    pub statement: StmtIndex,
}

#[derive(Debug, Clone, Copy, serde::Serialize, Default)]
pub struct WhileStmt {
    pub locus: SourceLocation,
    pub condition: StmtIndex,
    pub body: StmtIndex,
}

#[derive(Debug, Clone, Copy, serde::Serialize, Default)]
pub struct BlockStmt {
    pub locus: SourceLocation,
    pub statements: Sequence<StmtIndex>,
}

#[derive(Debug, Clone, Copy, serde::Serialize, Default)]
pub struct BreakStmt {
    pub locus: SourceLocation,
}

#[derive(Debug, Clone, Copy, serde::Serialize, Default)]
pub struct SwitchStmt {
    pub locus: SourceLocation,
    pub init: StmtIndex,
    pub control: ExprIndex,
    pub body: StmtIndex,
}

#[derive(Debug, Clone, Copy, serde::Serialize, Default)]
pub struct DoWhileStmt {
    pub locus: SourceLocation,
    /// Grammatically always a plain expression, never a condition-decl.
    pub condition: ExprIndex,
    pub body: StmtIndex,
}

#[derive(Debug, Clone, Copy, serde::Serialize, Default)]
pub struct GotoStmt {
    pub locus: SourceLocation,
    pub target: ExprIndex,
}

#[derive(Debug, Clone, Copy, serde::Serialize, Default)]
pub struct ContinueStmt {
    pub locus: SourceLocation,
}

#[derive(Debug, Clone, Copy, serde::Serialize, Default)]
pub struct ExpressionStmt {
    pub locus: SourceLocation,
    pub expr: ExprIndex,
}

#[derive(Debug, Clone, Copy, serde::Serialize, Default)]
pub struct ReturnStmt {
    pub locus: SourceLocation,
    pub ty: TypeIndex,
    pub expr: ExprIndex,
    pub function_type: TypeIndex,
}

#[derive(Debug, Clone, Copy, serde::Serialize, Default)]
pub struct DeclStmt {
    pub locus: SourceLocation,
    pub decl: DeclIndex,
}

#[derive(Debug, Clone, Copy, serde::Serialize, Default)]
pub struct ExpansionStmt {
    pub locus: SourceLocation,
    pub operand: StmtIndex,
}

/// Statement form of a parse-tree fragment not yet elaborated.
#[derive(Debug, Clone, Copy, serde::Serialize, Default)]
pub struct SyntaxTreeStmt {
    pub syntax: SyntaxIndex,
}

#[derive(Debug, Clone, Copy, serde::Serialize, Default)]
pub struct HandlerStmt {
    pub locus: SourceLocation,
    pub exception: DeclIndex,
    pub body: StmtIndex,
}

#[derive(Debug, Clone, Copy, serde::Serialize, Default)]
pub struct TupleStmt {
    pub locus: SourceLocation,
    pub ty: TypeIndex,
    pub elements: Sequence<StmtIndex>,
}

#[derive(Debug, Clone, Copy, serde::Serialize, Default)]
pub struct DirStmt {
    pub directive: DirIndex,
}

/// Any statement entity, tagged by its [`crate::index::StmtSort`].
#[derive(Debug, Clone, Copy, serde::Serialize)]
pub enum Stmt {
    VendorExtension(VendorStmt),
    Try(TryStmt),
    If(IfStmt),
    For(ForStmt),
    Labeled(LabeledStmt),
    While(WhileStmt),
    Block(BlockStmt),
    Break(BreakStmt),
    Switch(SwitchStmt),
    DoWhile(DoWhileStmt),
    Goto(GotoStmt),
    Continue(ContinueStmt),
    Expression(ExpressionStmt),
    Return(ReturnStmt),
    Decl(DeclStmt),
    Expansion(ExpansionStmt),
    SyntaxTree(SyntaxTreeStmt),
    Handler(HandlerStmt),
    Tuple(TupleStmt),
    Dir(DirStmt),
}

impl Stmt {
    pub fn sort(&self) -> crate::index::StmtSort {
        use crate::index::StmtSort;
        match self {
            Stmt::VendorExtension(_) => StmtSort::VendorExtension,
            Stmt::Try(_) => StmtSort::Try,
            Stmt::If(_) => StmtSort::If,
            Stmt::For(_) => StmtSort::For,
            Stmt::Labeled(_) => StmtSort::Labeled,
            Stmt::While(_) => StmtSort::While,
            Stmt::Block(_) => StmtSort::Block,
            Stmt::Break(_) => StmtSort::Break,
            Stmt::Switch(_) => StmtSort::Switch,
            Stmt::DoWhile(_) => StmtSort::DoWhile,
            Stmt::Goto(_) => StmtSort::Goto,
            Stmt::Continue(_) => StmtSort::Continue,
            Stmt::Expression(_) => StmtSort::Expression,
            Stmt::Return(_) => StmtSort::Return,
            Stmt::Decl(_) => StmtSort::Decl,
            Stmt::Expansion(_) => StmtSort::Expansion,
            Stmt::SyntaxTree(_) => StmtSort::SyntaxTree,
            Stmt::Handler(_) => StmtSort::Handler,
            Stmt::Tuple(_) => StmtSort::Tuple,
            Stmt::Dir(_) => StmtSort::Dir,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn if_stmt_defaults_to_null_branches() {
        let s = IfStmt::default();
        assert!(s.alternative.is_null());
    }

    #[test]
    fn block_stmt_reports_its_own_sort() {
        let s = Stmt::Block(BlockStmt::default());
        assert_eq!(s.sort(), crate::index::StmtSort::Block);
    }
}
