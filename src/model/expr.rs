//! Expression entity records, one struct per [`ExprSort`] variant, plus the
//! [`Expr`] visitor-dispatch enum.
//!
//! Most expression records share a `locus` + `ty` prefix (the format's
//! `LocationAndType` base); that pair is inlined into each struct rather than
//! factored into a wrapper type, since every field of it is meaningful on
//! its own and a wrapper would just add a layer of indirection to reach
//! `.ty`.

use super::common::SourceLocation;
use crate::index::{
    DeclIndex, ExprIndex, LitIndex, NameIndex, Sequence, StmtIndex, StringIndex, SyntaxIndex,
    TypeIndex, VendorIndex,
};
use crate::primitives::TextOffset;
use num_enum::{IntoPrimitive, TryFromPrimitive};
use serde::Serialize;

/// A raw operator code taking one argument. Carries the format's numeric
/// encoding directly rather than an exhaustive enum: the vocabulary spans
/// a large, still-growing portable and MSVC-specific range, and nothing in
/// this crate branches on individual operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
pub struct MonadicOperator(pub u16);

/// A raw operator code taking two arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
pub struct DyadicOperator(pub u16);

/// A raw operator code taking three arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
pub struct TriadicOperator(pub u16);

/// A raw operator code for a type-trait intrinsic (`__is_constructible`,
/// ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
pub struct Operator(pub u16);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum Associativity {
    Unspecified,
    Left,
    Right,
}

impl Default for Associativity {
    fn default() -> Self {
        Associativity::Unspecified
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TryFromPrimitive, IntoPrimitive, Default)]
#[repr(u8)]
pub enum ReadKind {
    #[default]
    Unknown,
    Indirection,
    RemoveReference,
    LvalueToRvalue,
    IntegralConversion,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TryFromPrimitive, IntoPrimitive, Default)]
#[repr(u8)]
pub enum DestructorCallKind {
    #[default]
    Unknown,
    Destructor,
    Finalizer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TryFromPrimitive, IntoPrimitive, Default)]
#[repr(u8)]
pub enum InitializationKind {
    #[default]
    Unknown,
    DirectInitialization,
    CopyInitialization,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TryFromPrimitive, IntoPrimitive, Default)]
#[repr(u8)]
pub enum ExpressionListDelimiter {
    #[default]
    None,
    Brace,
    Parenthesis,
}

macro_rules! location_and_type {
    ($(#[$meta:meta])* $name:ident { $($field:ident : $ty:ty),* $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Serialize, Default)]
        pub struct $name {
            pub locus: SourceLocation,
            pub ty: TypeIndex,
            $(pub $field: $ty,)*
        }
    };
}

#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct VendorExpr {
    pub index: VendorIndex,
}

location_and_type!(EmptyExpr {});

#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct LiteralExpr {
    pub locus: SourceLocation,
    pub ty: TypeIndex,
    pub value: LitIndex,
}

#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct LambdaExpr {
    pub introducer: SyntaxIndex,
    pub template_parameters: SyntaxIndex,
    pub declarator: SyntaxIndex,
    pub requires_clause: SyntaxIndex,
    pub body: SyntaxIndex,
}

location_and_type!(TypeExpr { denotation: TypeIndex });
location_and_type!(NamedDeclExpr { decl: DeclIndex });
location_and_type!(UnresolvedIdExpr { name: NameIndex });
location_and_type!(TemplateIdExpr { primary_template: ExprIndex, arguments: ExprIndex });
location_and_type!(UnqualifiedIdExpr {
    name: NameIndex,
    symbol: ExprIndex,
    template_keyword: SourceLocation,
});
location_and_type!(SimpleIdentifierExpr { name: NameIndex });

#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct PointerExpr {
    pub locus: SourceLocation,
}

location_and_type!(QualifiedNameExpr { elements: ExprIndex, typename_keyword: SourceLocation });
location_and_type!(PathExpr { scope: ExprIndex, member: ExprIndex });
location_and_type!(ReadExpr { child: ExprIndex, kind: ReadKind });

#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct MonadicExpr {
    pub locus: SourceLocation,
    pub ty: TypeIndex,
    pub impl_decl: DeclIndex,
    pub arg: ExprIndex,
    pub assort: MonadicOperator,
}

#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct DyadicExpr {
    pub locus: SourceLocation,
    pub ty: TypeIndex,
    pub impl_decl: DeclIndex,
    pub arg: [ExprIndex; 2],
    pub assort: DyadicOperator,
}

#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct TriadicExpr {
    pub locus: SourceLocation,
    pub ty: TypeIndex,
    pub impl_decl: DeclIndex,
    pub arg: [ExprIndex; 3],
    pub assort: TriadicOperator,
}

location_and_type!(StringExpr { string: StringIndex });
location_and_type!(TemporaryExpr { index: u32 });
location_and_type!(CallExpr { function: ExprIndex, arguments: ExprIndex });
location_and_type!(MemberInitializerExpr { member: DeclIndex, base: TypeIndex, expression: ExprIndex });
location_and_type!(MemberAccessExpr { offset: ExprIndex, parent: TypeIndex, name: TextOffset });
location_and_type!(InheritancePathExpr { path: ExprIndex });
location_and_type!(InitializerListExpr { elements: ExprIndex });

#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct CastExpr {
    pub locus: SourceLocation,
    pub ty: TypeIndex,
    pub source: ExprIndex,
    pub target: TypeIndex,
    pub assort: DyadicOperator,
}

location_and_type!(ConditionExpr { expression: ExprIndex });

#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct ExpressionListExpr {
    pub left_delimiter: SourceLocation,
    pub right_delimiter: SourceLocation,
    pub expressions: ExprIndex,
    pub delimiter: ExpressionListDelimiter,
}

location_and_type!(SizeofTypeExpr { operand: TypeIndex });
location_and_type!(AlignofExpr { type_id: TypeIndex });
location_and_type!(LabelExpr { designator: ExprIndex });
location_and_type!(TypeidExpr { operand: TypeIndex });

#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct DestructorCallExpr {
    pub locus: SourceLocation,
    pub ty: TypeIndex,
    pub name: ExprIndex,
    pub decltype_specifier: SyntaxIndex,
    pub kind: DestructorCallKind,
}

#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct SyntaxTreeExpr {
    pub syntax: SyntaxIndex,
}

location_and_type!(FunctionStringExpr { macro_name: TextOffset });
location_and_type!(CompoundStringExpr { prefix: TextOffset, string: ExprIndex });
location_and_type!(StringSequenceExpr { strings: ExprIndex });
location_and_type!(InitializerExpr { initializer: ExprIndex, kind: InitializationKind });

#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct RequiresExpr {
    pub locus: SourceLocation,
    pub ty: TypeIndex,
    pub parameters: SyntaxIndex,
    pub body: SyntaxIndex,
}

location_and_type!(UnaryFoldExpr { expr: ExprIndex, op: DyadicOperator, assoc: Associativity });
location_and_type!(BinaryFoldExpr {
    left: ExprIndex,
    right: ExprIndex,
    op: DyadicOperator,
    assoc: Associativity,
});

/// A sequence of zero or more expressions.
#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct ProductTypeValueExpr {
    pub locus: SourceLocation,
    pub ty: TypeIndex,
    pub structure: TypeIndex,
    pub members: ExprIndex,
    pub base_class_values: ExprIndex,
}

location_and_type!(SumTypeValueExpr { variant: TypeIndex, active_member: u32, value: ExprIndex });
location_and_type!(ArrayValueExpr { elements: ExprIndex, element_type: TypeIndex });

#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct TupleExpr {
    pub locus: SourceLocation,
    pub ty: TypeIndex,
    pub elements: Sequence<ExprIndex>,
}

location_and_type!(PlaceholderExpr {});
location_and_type!(ExpansionExpr { operand: ExprIndex });
location_and_type!(StatementExpr { stmt: StmtIndex });
location_and_type!(TypeTraitIntrinsicExpr { arguments: TypeIndex, intrinsic: Operator });
location_and_type!(NullptrExpr {});
location_and_type!(ThisExpr {});

#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct TemplateReferenceExpr {
    pub locus: SourceLocation,
    pub ty: TypeIndex,
    pub member: DeclIndex,
    pub member_name: NameIndex,
    pub parent: TypeIndex,
    pub template_arguments: ExprIndex,
}

location_and_type!(DesignatedInitializerExpr { member: TextOffset, initializer: ExprIndex });
location_and_type!(PackedTemplateArgumentsExpr { arguments: ExprIndex });

/// Any expression entity, tagged by its [`crate::index::ExprSort`].
#[derive(Debug, Clone, Copy, Serialize)]
pub enum Expr {
    VendorExtension(VendorExpr),
    Empty(EmptyExpr),
    Literal(LiteralExpr),
    Lambda(LambdaExpr),
    Type(TypeExpr),
    NamedDecl(NamedDeclExpr),
    UnresolvedId(UnresolvedIdExpr),
    TemplateId(TemplateIdExpr),
    UnqualifiedId(UnqualifiedIdExpr),
    SimpleIdentifier(SimpleIdentifierExpr),
    Pointer(PointerExpr),
    QualifiedName(QualifiedNameExpr),
    Path(PathExpr),
    Read(ReadExpr),
    Monad(MonadicExpr),
    Dyad(DyadicExpr),
    Triad(TriadicExpr),
    String(StringExpr),
    Temporary(TemporaryExpr),
    Call(CallExpr),
    MemberInitializer(MemberInitializerExpr),
    MemberAccess(MemberAccessExpr),
    InheritancePath(InheritancePathExpr),
    InitializerList(InitializerListExpr),
    Cast(CastExpr),
    Condition(ConditionExpr),
    ExpressionList(ExpressionListExpr),
    SizeofType(SizeofTypeExpr),
    Alignof(AlignofExpr),
    Label(LabelExpr),
    Typeid(TypeidExpr),
    DestructorCall(DestructorCallExpr),
    SyntaxTree(SyntaxTreeExpr),
    FunctionString(FunctionStringExpr),
    CompoundString(CompoundStringExpr),
    StringSequence(StringSequenceExpr),
    Initializer(InitializerExpr),
    Requires(RequiresExpr),
    UnaryFold(UnaryFoldExpr),
    BinaryFold(BinaryFoldExpr),
    ProductTypeValue(ProductTypeValueExpr),
    SumTypeValue(SumTypeValueExpr),
    ArrayValue(ArrayValueExpr),
    Placeholder(PlaceholderExpr),
    Expansion(ExpansionExpr),
    Tuple(TupleExpr),
    Nullptr(NullptrExpr),
    This(ThisExpr),
    TemplateReference(TemplateReferenceExpr),
    Statement(StatementExpr),
    TypeTraitIntrinsic(TypeTraitIntrinsicExpr),
    DesignatedInitializer(DesignatedInitializerExpr),
    PackedTemplateArguments(PackedTemplateArgumentsExpr),
}

impl Expr {
    pub fn sort(&self) -> crate::index::ExprSort {
        use crate::index::ExprSort;
        match self {
            Expr::VendorExtension(_) => ExprSort::VendorExtension,
            Expr::Empty(_) => ExprSort::Empty,
            Expr::Literal(_) => ExprSort::Literal,
            Expr::Lambda(_) => ExprSort::Lambda,
            Expr::Type(_) => ExprSort::Type,
            Expr::NamedDecl(_) => ExprSort::NamedDecl,
            Expr::UnresolvedId(_) => ExprSort::UnresolvedId,
            Expr::TemplateId(_) => ExprSort::TemplateId,
            Expr::UnqualifiedId(_) => ExprSort::UnqualifiedId,
            Expr::SimpleIdentifier(_) => ExprSort::SimpleIdentifier,
            Expr::Pointer(_) => ExprSort::Pointer,
            Expr::QualifiedName(_) => ExprSort::QualifiedName,
            Expr::Path(_) => ExprSort::Path,
            Expr::Read(_) => ExprSort::Read,
            Expr::Monad(_) => ExprSort::Monad,
            Expr::Dyad(_) => ExprSort::Dyad,
            Expr::Triad(_) => ExprSort::Triad,
            Expr::String(_) => ExprSort::String,
            Expr::Temporary(_) => ExprSort::Temporary,
            Expr::Call(_) => ExprSort::Call,
            Expr::MemberInitializer(_) => ExprSort::MemberInitializer,
            Expr::MemberAccess(_) => ExprSort::MemberAccess,
            Expr::InheritancePath(_) => ExprSort::InheritancePath,
            Expr::InitializerList(_) => ExprSort::InitializerList,
            Expr::Cast(_) => ExprSort::Cast,
            Expr::Condition(_) => ExprSort::Condition,
            Expr::ExpressionList(_) => ExprSort::ExpressionList,
            Expr::SizeofType(_) => ExprSort::SizeofType,
            Expr::Alignof(_) => ExprSort::Alignof,
            Expr::Label(_) => ExprSort::Label,
            Expr::Typeid(_) => ExprSort::Typeid,
            Expr::DestructorCall(_) => ExprSort::DestructorCall,
            Expr::SyntaxTree(_) => ExprSort::SyntaxTree,
            Expr::FunctionString(_) => ExprSort::FunctionString,
            Expr::CompoundString(_) => ExprSort::CompoundString,
            Expr::StringSequence(_) => ExprSort::StringSequence,
            Expr::Initializer(_) => ExprSort::Initializer,
            Expr::Requires(_) => ExprSort::Requires,
            Expr::UnaryFold(_) => ExprSort::UnaryFold,
            Expr::BinaryFold(_) => ExprSort::BinaryFold,
            Expr::ProductTypeValue(_) => ExprSort::ProductTypeValue,
            Expr::SumTypeValue(_) => ExprSort::SumTypeValue,
            Expr::ArrayValue(_) => ExprSort::ArrayValue,
            Expr::Placeholder(_) => ExprSort::Placeholder,
            Expr::Expansion(_) => ExprSort::Expansion,
            Expr::Tuple(_) => ExprSort::Tuple,
            Expr::Nullptr(_) => ExprSort::Nullptr,
            Expr::This(_) => ExprSort::This,
            Expr::TemplateReference(_) => ExprSort::TemplateReference,
            Expr::Statement(_) => ExprSort::Statement,
            Expr::TypeTraitIntrinsic(_) => ExprSort::TypeTraitIntrinsic,
            Expr::DesignatedInitializer(_) => ExprSort::DesignatedInitializer,
            Expr::PackedTemplateArguments(_) => ExprSort::PackedTemplateArguments,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dyadic_expr_carries_two_operands() {
        let e = DyadicExpr::default();
        assert_eq!(e.arg.len(), 2);
    }

    #[test]
    fn named_decl_expr_reports_its_own_sort() {
        let e = Expr::NamedDecl(NamedDeclExpr::default());
        assert_eq!(e.sort(), crate::index::ExprSort::NamedDecl);
    }
}
