//! Directive entity records ([`DirSort`]) and pragma entities ([`PragmaSort`]):
//! the program-order, non-declarative constructs (using-directives, static
//! assertions of attributes, `#pragma`, structured bindings) threaded
//! through a scope's statement sequence.

use super::common::SourceLocation;
use crate::index::{AttrIndex, DeclIndex, ExprIndex, Sequence, SentenceIndex, StmtIndex, VendorIndex};
use crate::primitives::TextOffset;
use serde::Serialize;

/// The set of translation phases a directive applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
pub struct Phases(pub u32);

pub const PHASE_READING: u32 = 1 << 0;
pub const PHASE_LEXING: u32 = 1 << 1;
pub const PHASE_PREPROCESSING: u32 = 1 << 2;
pub const PHASE_PARSING: u32 = 1 << 3;
pub const PHASE_IMPORTING: u32 = 1 << 4;
pub const PHASE_NAME_RESOLUTION: u32 = 1 << 5;
pub const PHASE_TYPING: u32 = 1 << 6;
pub const PHASE_EVALUATION: u32 = 1 << 7;
pub const PHASE_INSTANTIATION: u32 = 1 << 8;
pub const PHASE_ANALYSIS: u32 = 1 << 9;
pub const PHASE_CODE_GENERATION: u32 = 1 << 10;
pub const PHASE_LINKING: u32 = 1 << 11;
pub const PHASE_LOADING: u32 = 1 << 12;
pub const PHASE_EXECUTION: u32 = 1 << 13;

impl Phases {
    pub fn contains(self, phase: u32) -> bool {
        self.0 & phase != 0
    }
}

#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct VendorDir {
    pub index: VendorIndex,
}

#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct EmptyDir {
    pub locus: SourceLocation,
}

#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct AttributeDir {
    pub locus: SourceLocation,
    pub attr: AttrIndex,
}

#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct PragmaDir {
    pub locus: SourceLocation,
    pub words: SentenceIndex,
}

#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct UsingDir {
    pub locus: SourceLocation,
    /// The in-source name expression designating the namespace.
    pub nominated: ExprIndex,
    /// The namespace after semantic elaboration of `nominated`.
    pub resolution: DeclIndex,
}

#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct UsingDeclarationDir {
    pub locus: SourceLocation,
    pub path: ExprIndex,
    pub result: DeclIndex,
}

#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct ExprDir {
    pub locus: SourceLocation,
    pub expr: ExprIndex,
    pub phases: Phases,
}

#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct StmtDir {
    pub locus: SourceLocation,
    pub stmt: StmtIndex,
    pub phases: Phases,
}

#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct StructuredBindingDir {
    pub locus: SourceLocation,
    pub bindings: Sequence<DeclIndex>,
    pub names: Sequence<TextOffset>,
}

#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct SpecifiersSpreadDir {
    pub locus: SourceLocation,
}

#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct TupleDir {
    pub elements: Sequence<crate::index::DirIndex>,
}

/// Any directive entity, tagged by its [`crate::index::DirSort`].
#[derive(Debug, Clone, Copy, Serialize)]
pub enum Dir {
    VendorExtension(VendorDir),
    Empty(EmptyDir),
    Attribute(AttributeDir),
    Pragma(PragmaDir),
    Using(UsingDir),
    DeclUse(UsingDeclarationDir),
    Expr(ExprDir),
    StructuredBinding(StructuredBindingDir),
    SpecifiersSpread(SpecifiersSpreadDir),
    Stmt(StmtDir),
    Tuple(TupleDir),
}

impl Dir {
    pub fn sort(&self) -> crate::index::DirSort {
        use crate::index::DirSort;
        match self {
            Dir::VendorExtension(_) => DirSort::VendorExtension,
            Dir::Empty(_) => DirSort::Empty,
            Dir::Attribute(_) => DirSort::Attribute,
            Dir::Pragma(_) => DirSort::Pragma,
            Dir::Using(_) => DirSort::Using,
            Dir::DeclUse(_) => DirSort::DeclUse,
            Dir::Expr(_) => DirSort::Expr,
            Dir::StructuredBinding(_) => DirSort::StructuredBinding,
            Dir::SpecifiersSpread(_) => DirSort::SpecifiersSpread,
            Dir::Stmt(_) => DirSort::Stmt,
            Dir::Tuple(_) => DirSort::Tuple,
        }
    }
}

/// MSVC `#pragma comment(category, "text")` category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, num_enum::TryFromPrimitive, num_enum::IntoPrimitive)]
#[repr(u8)]
pub enum PragmaCommentSort {
    Unknown,
    Compiler,
    Lib,
    Exestr,
    User,
    Nolib,
    Linker,
}

impl Default for PragmaCommentSort {
    fn default() -> Self {
        PragmaCommentSort::Unknown
    }
}

#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct PragmaComment {
    pub comment_text: TextOffset,
    pub sort: PragmaCommentSort,
}

#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct PragmaExpr {
    pub locus: SourceLocation,
    pub name: TextOffset,
    pub operand: ExprIndex,
}

/// Any pragma entity, tagged by its [`crate::index::PragmaSort`].
#[derive(Debug, Clone, Copy, Serialize)]
pub enum Pragma {
    VendorExtension(PragmaComment),
    Expr(PragmaExpr),
}

impl Pragma {
    pub fn sort(&self) -> crate::index::PragmaSort {
        use crate::index::PragmaSort;
        match self {
            Pragma::VendorExtension(_) => PragmaSort::VendorExtension,
            Pragma::Expr(_) => PragmaSort::Expr,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phases_combine_as_a_bitset() {
        let p = Phases(PHASE_PARSING | PHASE_TYPING);
        assert!(p.contains(PHASE_PARSING));
        assert!(p.contains(PHASE_TYPING));
        assert!(!p.contains(PHASE_LINKING));
    }

    #[test]
    fn using_dir_reports_its_own_sort() {
        let d = Dir::Using(UsingDir::default());
        assert_eq!(d.sort(), crate::index::DirSort::Using);
    }
}
