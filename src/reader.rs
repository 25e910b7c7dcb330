//! Decodes entities out of a validated container on demand.
//!
//! A [`Reader`] borrows an [`InputIfc`](crate::container::InputIfc) and
//! caches the byte range of every partition the catalog recognizes. Nothing
//! is decoded until asked for: `get` turns an abstract reference into an
//! owned copy of the entity it names, re-reading the same bytes every time
//! it's called rather than keeping its own decoded copy around. Entities are
//! `Copy`, so two calls to `get` on the same index produce equal but
//! independent values -- callers that need identity compare `(sort, index)`
//! pairs, not addresses, which is what the format actually means by "the
//! same entity" (see [`crate::dom`], which relies on exactly this).
//!
//! All of the mechanical per-field decoding below follows one shape:
//! fixed-width little-endian records, read field by field in declaration
//! order, exactly like [`crate::container::Header`] decodes itself. The
//! [`Decode`] trait and its `decode_*!` macros just generalize that pattern
//! from one hand-written struct to the few hundred record shapes the data
//! model defines.

use std::collections::HashMap;

use crate::catalog::{self, AnySort};
use crate::container::{InputIfc, PartitionSummary};
use crate::error::{assert_ifc, IfcError};
use crate::index::{
    AttrIndex, AttrSort, ChartIndex, ChartSort, DeclIndex, DeclSort, DirIndex, DirSort,
    ExprIndex, ExprSort, FormIndex, FormSort, Index, LineIndex, LiteralSort, LitIndex, MacroIndex,
    MacroSort, NameIndex, NameSort, PragmaIndex, PragmaSort, ScopeIndex, Sequence, SentenceIndex,
    Sort, SpecFormIndex, StmtIndex, StmtSort, StringIndex, StringSort, SyntaxIndex, SyntaxSort,
    TraitSort, TypeIndex, TypeSort, VendorIndex, VendorSort, WordIndex,
};
use crate::model::common::{FileAndLine, SpecializationForm, StringLiteral};
use crate::model::traits::{
    AliasTemplate, Attributes, Deprecated, DeductionGuides, Friends, MappingExpr, Requires,
    Specializations,
};
use crate::model::{attr, decl, dir, expr, form, name, stmt, syntax, types};
use crate::primitives::{Cardinality, ColumnNumber, LineNumber, TextOffset};

// ---------------------------------------------------------------------
// The Decode trait and its base cases.
// ---------------------------------------------------------------------

/// A fixed-width little-endian record that can be read straight out of a
/// partition's bytes. `SIZE` is the record's width; `decode` is only ever
/// handed exactly that many bytes.
pub trait Decode: Sized {
    const SIZE: usize;
    fn decode(bytes: &[u8]) -> Self;
}

impl Decode for bool {
    const SIZE: usize = 1;
    fn decode(bytes: &[u8]) -> Self {
        bytes[0] != 0
    }
}

impl Decode for u8 {
    const SIZE: usize = 1;
    fn decode(bytes: &[u8]) -> Self {
        bytes[0]
    }
}

impl Decode for u16 {
    const SIZE: usize = 2;
    fn decode(bytes: &[u8]) -> Self {
        u16::from_le_bytes(bytes[0..2].try_into().unwrap())
    }
}

impl Decode for u32 {
    const SIZE: usize = 4;
    fn decode(bytes: &[u8]) -> Self {
        u32::from_le_bytes(bytes[0..4].try_into().unwrap())
    }
}

impl Decode for i32 {
    const SIZE: usize = 4;
    fn decode(bytes: &[u8]) -> Self {
        i32::from_le_bytes(bytes[0..4].try_into().unwrap())
    }
}

impl Decode for u64 {
    const SIZE: usize = 8;
    fn decode(bytes: &[u8]) -> Self {
        u64::from_le_bytes(bytes[0..8].try_into().unwrap())
    }
}

impl Decode for i64 {
    const SIZE: usize = 8;
    fn decode(bytes: &[u8]) -> Self {
        i64::from_le_bytes(bytes[0..8].try_into().unwrap())
    }
}

impl Decode for f64 {
    const SIZE: usize = 8;
    fn decode(bytes: &[u8]) -> Self {
        f64::from_le_bytes(bytes[0..8].try_into().unwrap())
    }
}

impl<T: Decode> Decode for [T; 2] {
    const SIZE: usize = T::SIZE * 2;
    fn decode(bytes: &[u8]) -> Self {
        [T::decode(&bytes[0..T::SIZE]), T::decode(&bytes[T::SIZE..T::SIZE * 2])]
    }
}

impl<T: Decode> Decode for [T; 3] {
    const SIZE: usize = T::SIZE * 3;
    fn decode(bytes: &[u8]) -> Self {
        [
            T::decode(&bytes[0..T::SIZE]),
            T::decode(&bytes[T::SIZE..T::SIZE * 2]),
            T::decode(&bytes[T::SIZE * 2..T::SIZE * 3]),
        ]
    }
}

/// A single field whose raw storage is a newtype around a base integer.
/// Covers every `pub struct Foo(pub uNN)` in the model: offsets, operator
/// codes, bit masks, all decoded the same way.
macro_rules! decode_newtype {
    ($name:ty, $repr:ty) => {
        impl Decode for $name {
            const SIZE: usize = <$repr as Decode>::SIZE;
            fn decode(bytes: &[u8]) -> Self {
                Self(<$repr as Decode>::decode(bytes))
            }
        }
    };
}

decode_newtype!(TextOffset, u32);
decode_newtype!(Cardinality, u32);
decode_newtype!(LineNumber, i32);
decode_newtype!(ColumnNumber, i32);
decode_newtype!(crate::model::common::PackSize, u16);
decode_newtype!(crate::model::common::DefaultIndex, u32);
decode_newtype!(expr::MonadicOperator, u16);
decode_newtype!(expr::DyadicOperator, u16);
decode_newtype!(expr::TriadicOperator, u16);
decode_newtype!(expr::Operator, u16);
decode_newtype!(form::PPOperator, u16);
decode_newtype!(syntax::StorageClass, u32);
decode_newtype!(syntax::LambdaDeclaratorSpec, u8);
decode_newtype!(dir::Phases, u32);

/// A `#[repr(u8)] ... TryFromPrimitive` enum: one byte, rejected if it
/// doesn't name a known variant. Mirrors how `container::Abi`/`Arch` are
/// read, generalized to a macro since the model has dozens of these.
macro_rules! decode_enum8 {
    ($name:ty) => {
        impl Decode for $name {
            const SIZE: usize = 1;
            fn decode(bytes: &[u8]) -> Self {
                let raw = bytes[0];
                <$name>::try_from(raw)
                    .unwrap_or_else(|_| panic!("{}: unknown tag {raw}", stringify!($name)))
            }
        }
    };
}

use crate::model::common::{Access, CallingConvention, ExceptionSpecification, NoexceptSort, ParameterSort, SpecializationSort};
decode_enum8!(Access);
decode_enum8!(CallingConvention);
decode_enum8!(ExceptionSpecification);
decode_enum8!(NoexceptSort);
decode_enum8!(ParameterSort);
decode_enum8!(SpecializationSort);
decode_enum8!(expr::Associativity);
decode_enum8!(expr::ReadKind);
decode_enum8!(expr::DestructorCallKind);
decode_enum8!(expr::InitializationKind);
decode_enum8!(expr::ExpressionListDelimiter);
decode_enum8!(types::TypeBasis);
decode_enum8!(types::TypePrecision);
decode_enum8!(types::TypeSign);
decode_enum8!(types::ExpansionMode);
decode_enum8!(types::BaseClassTraits);
decode_enum8!(syntax::KeywordKind);
decode_enum8!(syntax::PointerDeclaratorKind);
decode_enum8!(syntax::ReturnKind);
decode_enum8!(syntax::LabelKind);
decode_enum8!(dir::PragmaCommentSort);

/// A `flags_to_struct!`-generated bitset: the raw integer, validated
/// through the same `from_raw` the rest of the crate uses to construct one.
macro_rules! decode_flags {
    ($name:ty, $repr:ty) => {
        impl Decode for $name {
            const SIZE: usize = <$repr as Decode>::SIZE;
            fn decode(bytes: &[u8]) -> Self {
                let raw = <$repr as Decode>::decode(bytes);
                <$name>::from_raw(raw).unwrap_or_else(|e| panic!("{e}"))
            }
        }
    };
}

use crate::model::common::{
    BasicSpecifiers, FunctionTraits, FunctionTypeTraits, GuideTraits, ObjectTraits, Qualifier,
    ReachableProperties, ScopeTraits, VendorTraits,
};
decode_flags!(FunctionTypeTraits, u8);
decode_flags!(Qualifier, u8);
decode_flags!(BasicSpecifiers, u8);
decode_flags!(ReachableProperties, u8);
decode_flags!(FunctionTraits, u16);
decode_flags!(ObjectTraits, u8);
decode_flags!(ScopeTraits, u8);
decode_flags!(GuideTraits, u8);
decode_flags!(VendorTraits, u32);

/// A multi-sorted abstract reference: tag plus position packed into one
/// `u32`, read back with `per` exactly as it was written with `rep`.
macro_rules! decode_multisorted {
    ($name:ty) => {
        impl Decode for $name {
            const SIZE: usize = 4;
            fn decode(bytes: &[u8]) -> Self {
                <$name>::per(u32::decode(bytes))
            }
        }
    };
}

decode_multisorted!(NameIndex);
decode_multisorted!(ChartIndex);
decode_multisorted!(DeclIndex);
decode_multisorted!(TypeIndex);
decode_multisorted!(ExprIndex);
decode_multisorted!(StmtIndex);
decode_multisorted!(SyntaxIndex);
decode_multisorted!(FormIndex);
decode_multisorted!(MacroIndex);
decode_multisorted!(PragmaIndex);
decode_multisorted!(AttrIndex);
decode_multisorted!(DirIndex);
decode_multisorted!(LitIndex);
decode_multisorted!(StringIndex);
decode_multisorted!(VendorIndex);

/// A bare unisorted index: a `u32` position into one implicitly-known
/// partition, no sort tag to unpack.
macro_rules! decode_unisorted {
    ($name:ty) => {
        impl Decode for $name {
            const SIZE: usize = 4;
            fn decode(bytes: &[u8]) -> Self {
                <$name>(u32::decode(bytes))
            }
        }
    };
}

decode_unisorted!(LineIndex);
decode_unisorted!(WordIndex);
decode_unisorted!(SentenceIndex);
decode_unisorted!(SpecFormIndex);
decode_unisorted!(ScopeIndex);

impl<T> Decode for Sequence<T> {
    const SIZE: usize = 8;
    fn decode(bytes: &[u8]) -> Self {
        Sequence::new(Index(u32::decode(&bytes[0..4])), Cardinality(u32::decode(&bytes[4..8])))
    }
}

impl<T: Decode> Decode for crate::model::common::Identity<T> {
    const SIZE: usize = T::SIZE + crate::model::common::SourceLocation::SIZE;
    fn decode(bytes: &[u8]) -> Self {
        let name = T::decode(&bytes[0..T::SIZE]);
        let locus = crate::model::common::SourceLocation::decode(&bytes[T::SIZE..Self::SIZE]);
        crate::model::common::Identity { name, locus }
    }
}

impl<K: Decode, V: Decode> Decode for crate::model::traits::AssociatedTrait<K, V> {
    const SIZE: usize = K::SIZE + V::SIZE;
    fn decode(bytes: &[u8]) -> Self {
        let entity = K::decode(&bytes[0..K::SIZE]);
        let trait_value = V::decode(&bytes[K::SIZE..Self::SIZE]);
        crate::model::traits::AssociatedTrait { entity, trait_value }
    }
}

/// Declares `impl Decode` for a plain-old-data struct: every field decoded
/// in declaration order from sequential byte ranges, `SIZE` the sum of its
/// fields' sizes. One invocation per record shape in the data model.
macro_rules! decode_struct {
    ($name:path { $($field:ident : $ty:ty),* $(,)? }) => {
        impl Decode for $name {
            const SIZE: usize = 0 $(+ <$ty as Decode>::SIZE)*;
            #[allow(unused_assignments, unused_mut)]
            fn decode(bytes: &[u8]) -> Self {
                let mut cursor = 0usize;
                $(
                    let $field = <$ty as Decode>::decode(&bytes[cursor..cursor + <$ty as Decode>::SIZE]);
                    cursor += <$ty as Decode>::SIZE;
                )*
                $name { $($field),* }
            }
        }
    };
}

// ---------------------------------------------------------------------
// Shared field types.
// ---------------------------------------------------------------------

decode_struct!(crate::model::common::SourceLocation { line: LineIndex, column: ColumnNumber });
decode_struct!(crate::model::common::MappingDefinition {
    parameters: ChartIndex,
    initializers: ExprIndex,
    body: StmtIndex,
});
decode_struct!(crate::model::common::NoexceptSpecification { words: SentenceIndex, sort: NoexceptSort });
decode_struct!(FileAndLine { file: TextOffset, line: LineNumber });
decode_struct!(StringLiteral { size: Cardinality, start: TextOffset });
decode_struct!(SpecializationForm { primary_template: DeclIndex, arguments: Sequence<ExprIndex> });

// ---------------------------------------------------------------------
// model::attr
// ---------------------------------------------------------------------

decode_struct!(attr::Word { locus: crate::model::common::SourceLocation, payload: u32 });
decode_struct!(attr::BasicAttr { word: attr::Word });
decode_struct!(attr::ScopedAttr { scope: attr::Word, member: attr::Word });
decode_struct!(attr::LabeledAttr { label: attr::Word, attribute: AttrIndex });
decode_struct!(attr::CalledAttr { function: AttrIndex, arguments: AttrIndex });
decode_struct!(attr::ExpandedAttr { operand: AttrIndex });
decode_struct!(attr::FactoredAttr { factor: attr::Word, terms: AttrIndex });
decode_struct!(attr::ElaboratedAttr { expr: ExprIndex });
decode_struct!(attr::TupleAttr { elements: Sequence<AttrIndex> });

// ---------------------------------------------------------------------
// model::name
// ---------------------------------------------------------------------

decode_struct!(name::ConversionFunctionId { target: TypeIndex, name: TextOffset });
decode_struct!(name::OperatorFunctionId { name: TextOffset, symbol: expr::Operator });
decode_struct!(name::LiteralOperatorId { name_index: TextOffset });
decode_struct!(name::TemplateName { name: NameIndex });
decode_struct!(name::SpecializationName { primary_template: NameIndex, arguments: ExprIndex });
decode_struct!(name::SourceFileName { name: TextOffset, include_guard: TextOffset });
decode_struct!(name::GuideName { primary_template: DeclIndex });

// ---------------------------------------------------------------------
// model::form
// ---------------------------------------------------------------------

decode_struct!(form::IdentifierForm { locus: crate::model::common::SourceLocation, spelling: TextOffset });
decode_struct!(form::NumberForm { locus: crate::model::common::SourceLocation, spelling: TextOffset });
decode_struct!(form::CharacterForm { locus: crate::model::common::SourceLocation, spelling: TextOffset });
decode_struct!(form::StringForm { locus: crate::model::common::SourceLocation, spelling: TextOffset });
decode_struct!(form::KeywordForm { locus: crate::model::common::SourceLocation, spelling: TextOffset });
decode_struct!(form::ParameterForm { locus: crate::model::common::SourceLocation, spelling: TextOffset });
decode_struct!(form::HeaderForm { locus: crate::model::common::SourceLocation, spelling: TextOffset });
decode_struct!(form::JunkForm { locus: crate::model::common::SourceLocation, spelling: TextOffset });
decode_struct!(form::OperatorForm {
    locus: crate::model::common::SourceLocation,
    spelling: TextOffset,
    value: form::PPOperator,
});
decode_struct!(form::WhitespaceForm { locus: crate::model::common::SourceLocation });
decode_struct!(form::StringizeForm { locus: crate::model::common::SourceLocation, operand: FormIndex });
decode_struct!(form::CatenateForm {
    locus: crate::model::common::SourceLocation,
    first: FormIndex,
    second: FormIndex,
});
decode_struct!(form::PragmaForm { locus: crate::model::common::SourceLocation, operand: FormIndex });
decode_struct!(form::ParenthesizedForm { locus: crate::model::common::SourceLocation, operand: FormIndex });
decode_struct!(form::TupleForm { elements: Sequence<FormIndex> });
decode_struct!(form::ObjectLikeMacro {
    locus: crate::model::common::SourceLocation,
    name: TextOffset,
    replacement_list: FormIndex,
});
decode_struct!(form::FunctionLikeMacro {
    locus: crate::model::common::SourceLocation,
    name: TextOffset,
    parameters: FormIndex,
    replacement_list: FormIndex,
    arity: u32,
    variadic: bool,
});

// ---------------------------------------------------------------------
// model::expr
// ---------------------------------------------------------------------

decode_struct!(expr::VendorExpr { index: VendorIndex });
decode_struct!(expr::EmptyExpr { locus: crate::model::common::SourceLocation, ty: TypeIndex });
decode_struct!(expr::LiteralExpr { locus: crate::model::common::SourceLocation, ty: TypeIndex, value: LitIndex });
decode_struct!(expr::LambdaExpr {
    introducer: SyntaxIndex,
    template_parameters: SyntaxIndex,
    declarator: SyntaxIndex,
    requires_clause: SyntaxIndex,
    body: SyntaxIndex,
});
decode_struct!(expr::TypeExpr { locus: crate::model::common::SourceLocation, ty: TypeIndex, denotation: TypeIndex });
decode_struct!(expr::NamedDeclExpr { locus: crate::model::common::SourceLocation, ty: TypeIndex, decl: DeclIndex });
decode_struct!(expr::UnresolvedIdExpr { locus: crate::model::common::SourceLocation, ty: TypeIndex, name: NameIndex });
decode_struct!(expr::TemplateIdExpr {
    locus: crate::model::common::SourceLocation,
    ty: TypeIndex,
    primary_template: ExprIndex,
    arguments: ExprIndex,
});
decode_struct!(expr::UnqualifiedIdExpr {
    locus: crate::model::common::SourceLocation,
    ty: TypeIndex,
    name: NameIndex,
    symbol: ExprIndex,
    template_keyword: crate::model::common::SourceLocation,
});
decode_struct!(expr::SimpleIdentifierExpr { locus: crate::model::common::SourceLocation, ty: TypeIndex, name: NameIndex });
decode_struct!(expr::PointerExpr { locus: crate::model::common::SourceLocation });
decode_struct!(expr::QualifiedNameExpr {
    locus: crate::model::common::SourceLocation,
    ty: TypeIndex,
    elements: ExprIndex,
    typename_keyword: crate::model::common::SourceLocation,
});
decode_struct!(expr::PathExpr {
    locus: crate::model::common::SourceLocation,
    ty: TypeIndex,
    scope: ExprIndex,
    member: ExprIndex,
});
decode_struct!(expr::ReadExpr {
    locus: crate::model::common::SourceLocation,
    ty: TypeIndex,
    child: ExprIndex,
    kind: expr::ReadKind,
});
decode_struct!(expr::MonadicExpr {
    locus: crate::model::common::SourceLocation,
    ty: TypeIndex,
    impl_decl: DeclIndex,
    arg: ExprIndex,
    assort: expr::MonadicOperator,
});
decode_struct!(expr::DyadicExpr {
    locus: crate::model::common::SourceLocation,
    ty: TypeIndex,
    impl_decl: DeclIndex,
    arg: [ExprIndex; 2],
    assort: expr::DyadicOperator,
});
decode_struct!(expr::TriadicExpr {
    locus: crate::model::common::SourceLocation,
    ty: TypeIndex,
    impl_decl: DeclIndex,
    arg: [ExprIndex; 3],
    assort: expr::TriadicOperator,
});
decode_struct!(expr::StringExpr { locus: crate::model::common::SourceLocation, ty: TypeIndex, string: StringIndex });
decode_struct!(expr::TemporaryExpr { locus: crate::model::common::SourceLocation, ty: TypeIndex, index: u32 });
decode_struct!(expr::CallExpr {
    locus: crate::model::common::SourceLocation,
    ty: TypeIndex,
    function: ExprIndex,
    arguments: ExprIndex,
});
decode_struct!(expr::MemberInitializerExpr {
    locus: crate::model::common::SourceLocation,
    ty: TypeIndex,
    member: DeclIndex,
    base: TypeIndex,
    expression: ExprIndex,
});
decode_struct!(expr::MemberAccessExpr {
    locus: crate::model::common::SourceLocation,
    ty: TypeIndex,
    offset: ExprIndex,
    parent: TypeIndex,
    name: TextOffset,
});
decode_struct!(expr::InheritancePathExpr { locus: crate::model::common::SourceLocation, ty: TypeIndex, path: ExprIndex });
decode_struct!(expr::InitializerListExpr { locus: crate::model::common::SourceLocation, ty: TypeIndex, elements: ExprIndex });
decode_struct!(expr::CastExpr {
    locus: crate::model::common::SourceLocation,
    ty: TypeIndex,
    source: ExprIndex,
    target: TypeIndex,
    assort: expr::DyadicOperator,
});
decode_struct!(expr::ConditionExpr { locus: crate::model::common::SourceLocation, ty: TypeIndex, expression: ExprIndex });
decode_struct!(expr::ExpressionListExpr {
    left_delimiter: crate::model::common::SourceLocation,
    right_delimiter: crate::model::common::SourceLocation,
    expressions: ExprIndex,
    delimiter: expr::ExpressionListDelimiter,
});
decode_struct!(expr::SizeofTypeExpr { locus: crate::model::common::SourceLocation, ty: TypeIndex, operand: TypeIndex });
decode_struct!(expr::AlignofExpr { locus: crate::model::common::SourceLocation, ty: TypeIndex, type_id: TypeIndex });
decode_struct!(expr::LabelExpr { locus: crate::model::common::SourceLocation, ty: TypeIndex, designator: ExprIndex });
decode_struct!(expr::TypeidExpr { locus: crate::model::common::SourceLocation, ty: TypeIndex, operand: TypeIndex });
decode_struct!(expr::DestructorCallExpr {
    locus: crate::model::common::SourceLocation,
    ty: TypeIndex,
    name: ExprIndex,
    decltype_specifier: SyntaxIndex,
    kind: expr::DestructorCallKind,
});
decode_struct!(expr::SyntaxTreeExpr { syntax: SyntaxIndex });
decode_struct!(expr::FunctionStringExpr { locus: crate::model::common::SourceLocation, ty: TypeIndex, macro_name: TextOffset });
decode_struct!(expr::CompoundStringExpr {
    locus: crate::model::common::SourceLocation,
    ty: TypeIndex,
    prefix: TextOffset,
    string: ExprIndex,
});
decode_struct!(expr::StringSequenceExpr { locus: crate::model::common::SourceLocation, ty: TypeIndex, strings: ExprIndex });
decode_struct!(expr::InitializerExpr {
    locus: crate::model::common::SourceLocation,
    ty: TypeIndex,
    initializer: ExprIndex,
    kind: expr::InitializationKind,
});
decode_struct!(expr::RequiresExpr {
    locus: crate::model::common::SourceLocation,
    ty: TypeIndex,
    parameters: SyntaxIndex,
    body: SyntaxIndex,
});
decode_struct!(expr::UnaryFoldExpr {
    locus: crate::model::common::SourceLocation,
    ty: TypeIndex,
    expr: ExprIndex,
    op: expr::DyadicOperator,
    assoc: expr::Associativity,
});
decode_struct!(expr::BinaryFoldExpr {
    locus: crate::model::common::SourceLocation,
    ty: TypeIndex,
    left: ExprIndex,
    right: ExprIndex,
    op: expr::DyadicOperator,
    assoc: expr::Associativity,
});
decode_struct!(expr::ProductTypeValueExpr {
    locus: crate::model::common::SourceLocation,
    ty: TypeIndex,
    structure: TypeIndex,
    members: ExprIndex,
    base_class_values: ExprIndex,
});
decode_struct!(expr::SumTypeValueExpr {
    locus: crate::model::common::SourceLocation,
    ty: TypeIndex,
    variant: TypeIndex,
    active_member: u32,
    value: ExprIndex,
});
decode_struct!(expr::ArrayValueExpr {
    locus: crate::model::common::SourceLocation,
    ty: TypeIndex,
    elements: ExprIndex,
    element_type: TypeIndex,
});
decode_struct!(expr::TupleExpr { locus: crate::model::common::SourceLocation, ty: TypeIndex, elements: Sequence<ExprIndex> });
decode_struct!(expr::PlaceholderExpr { locus: crate::model::common::SourceLocation, ty: TypeIndex });
decode_struct!(expr::ExpansionExpr { locus: crate::model::common::SourceLocation, ty: TypeIndex, operand: ExprIndex });
decode_struct!(expr::StatementExpr { locus: crate::model::common::SourceLocation, ty: TypeIndex, stmt: StmtIndex });
decode_struct!(expr::TypeTraitIntrinsicExpr {
    locus: crate::model::common::SourceLocation,
    ty: TypeIndex,
    arguments: TypeIndex,
    intrinsic: expr::Operator,
});
decode_struct!(expr::NullptrExpr { locus: crate::model::common::SourceLocation, ty: TypeIndex });
decode_struct!(expr::ThisExpr { locus: crate::model::common::SourceLocation, ty: TypeIndex });
decode_struct!(expr::TemplateReferenceExpr {
    locus: crate::model::common::SourceLocation,
    ty: TypeIndex,
    member: DeclIndex,
    member_name: NameIndex,
    parent: TypeIndex,
    template_arguments: ExprIndex,
});
decode_struct!(expr::DesignatedInitializerExpr {
    locus: crate::model::common::SourceLocation,
    ty: TypeIndex,
    member: TextOffset,
    initializer: ExprIndex,
});
decode_struct!(expr::PackedTemplateArgumentsExpr { locus: crate::model::common::SourceLocation, ty: TypeIndex, arguments: ExprIndex });

// ---------------------------------------------------------------------
// model::stmt
// ---------------------------------------------------------------------

decode_struct!(stmt::VendorStmt { index: VendorIndex });
decode_struct!(stmt::TryStmt {
    locus: crate::model::common::SourceLocation,
    statements: Sequence<StmtIndex>,
    handlers: StmtIndex,
});
decode_struct!(stmt::IfStmt {
    locus: crate::model::common::SourceLocation,
    init: StmtIndex,
    condition: StmtIndex,
    consequence: StmtIndex,
    alternative: StmtIndex,
});
decode_struct!(stmt::ForStmt {
    locus: crate::model::common::SourceLocation,
    init: StmtIndex,
    condition: StmtIndex,
    increment: StmtIndex,
    body: StmtIndex,
});
decode_struct!(stmt::LabeledStmt {
    locus: crate::model::common::SourceLocation,
    ty: TypeIndex,
    label: ExprIndex,
    statement: StmtIndex,
});
decode_struct!(stmt::WhileStmt { locus: crate::model::common::SourceLocation, condition: StmtIndex, body: StmtIndex });
decode_struct!(stmt::BlockStmt { locus: crate::model::common::SourceLocation, statements: Sequence<StmtIndex> });
decode_struct!(stmt::BreakStmt { locus: crate::model::common::SourceLocation });
decode_struct!(stmt::SwitchStmt {
    locus: crate::model::common::SourceLocation,
    init: StmtIndex,
    control: ExprIndex,
    body: StmtIndex,
});
decode_struct!(stmt::DoWhileStmt { locus: crate::model::common::SourceLocation, condition: ExprIndex, body: StmtIndex });
decode_struct!(stmt::GotoStmt { locus: crate::model::common::SourceLocation, target: ExprIndex });
decode_struct!(stmt::ContinueStmt { locus: crate::model::common::SourceLocation });
decode_struct!(stmt::ExpressionStmt { locus: crate::model::common::SourceLocation, expr: ExprIndex });
decode_struct!(stmt::ReturnStmt {
    locus: crate::model::common::SourceLocation,
    ty: TypeIndex,
    expr: ExprIndex,
    function_type: TypeIndex,
});
decode_struct!(stmt::DeclStmt { locus: crate::model::common::SourceLocation, decl: DeclIndex });
decode_struct!(stmt::ExpansionStmt { locus: crate::model::common::SourceLocation, operand: StmtIndex });
decode_struct!(stmt::SyntaxTreeStmt { syntax: SyntaxIndex });
decode_struct!(stmt::HandlerStmt { locus: crate::model::common::SourceLocation, exception: DeclIndex, body: StmtIndex });
decode_struct!(stmt::TupleStmt {
    locus: crate::model::common::SourceLocation,
    ty: TypeIndex,
    elements: Sequence<StmtIndex>,
});
decode_struct!(stmt::DirStmt { directive: DirIndex });

// ---------------------------------------------------------------------
// model::decl
// ---------------------------------------------------------------------

decode_struct!(decl::FunctionDecl {
    identity: crate::model::common::Identity<NameIndex>,
    ty: TypeIndex,
    home_scope: DeclIndex,
    chart: ChartIndex,
    traits: FunctionTraits,
    basic_spec: BasicSpecifiers,
    access: Access,
    properties: ReachableProperties,
});
decode_struct!(decl::MethodDecl {
    identity: crate::model::common::Identity<NameIndex>,
    ty: TypeIndex,
    home_scope: DeclIndex,
    chart: ChartIndex,
    traits: FunctionTraits,
    basic_spec: BasicSpecifiers,
    access: Access,
    properties: ReachableProperties,
});
decode_struct!(decl::ConstructorDecl {
    identity: crate::model::common::Identity<TextOffset>,
    ty: TypeIndex,
    home_scope: DeclIndex,
    chart: ChartIndex,
    traits: FunctionTraits,
    basic_spec: BasicSpecifiers,
    access: Access,
    properties: ReachableProperties,
});
decode_struct!(decl::DestructorDecl {
    identity: crate::model::common::Identity<TextOffset>,
    home_scope: DeclIndex,
    eh_spec: ExceptionSpecification,
    traits: FunctionTraits,
    basic_spec: BasicSpecifiers,
    access: Access,
    convention: CallingConvention,
    properties: ReachableProperties,
});
decode_struct!(decl::EnumeratorDecl {
    identity: crate::model::common::Identity<TextOffset>,
    ty: TypeIndex,
    initializer: ExprIndex,
    basic_spec: BasicSpecifiers,
    access: Access,
});
decode_struct!(decl::VariableDecl {
    identity: crate::model::common::Identity<NameIndex>,
    ty: TypeIndex,
    home_scope: DeclIndex,
    initializer: ExprIndex,
    alignment: ExprIndex,
    obj_spec: ObjectTraits,
    basic_spec: BasicSpecifiers,
    access: Access,
    properties: ReachableProperties,
});
decode_struct!(decl::ParameterDecl {
    identity: crate::model::common::Identity<TextOffset>,
    ty: TypeIndex,
    type_constraint: ExprIndex,
    initializer: crate::model::common::DefaultIndex,
    level: u32,
    position: u32,
    sort: ParameterSort,
    properties: ReachableProperties,
});
decode_struct!(decl::FieldDecl {
    identity: crate::model::common::Identity<TextOffset>,
    ty: TypeIndex,
    home_scope: DeclIndex,
    initializer: ExprIndex,
    alignment: ExprIndex,
    obj_spec: ObjectTraits,
    basic_spec: BasicSpecifiers,
    access: Access,
    properties: ReachableProperties,
});
decode_struct!(decl::BitfieldDecl {
    identity: crate::model::common::Identity<TextOffset>,
    ty: TypeIndex,
    home_scope: DeclIndex,
    width: ExprIndex,
    initializer: ExprIndex,
    obj_spec: ObjectTraits,
    basic_spec: BasicSpecifiers,
    access: Access,
    properties: ReachableProperties,
});
decode_struct!(decl::ScopeDecl {
    identity: crate::model::common::Identity<NameIndex>,
    ty: TypeIndex,
    base: TypeIndex,
    initializer: ScopeIndex,
    home_scope: DeclIndex,
    alignment: ExprIndex,
    pack_size: crate::model::common::PackSize,
    basic_spec: BasicSpecifiers,
    scope_spec: crate::model::common::ScopeTraits,
    access: Access,
    properties: ReachableProperties,
});
decode_struct!(decl::EnumerationDecl {
    identity: crate::model::common::Identity<TextOffset>,
    ty: TypeIndex,
    base: TypeIndex,
    initializer: Sequence<decl::EnumeratorDecl>,
    home_scope: DeclIndex,
    alignment: ExprIndex,
    basic_spec: BasicSpecifiers,
    access: Access,
    properties: ReachableProperties,
});
decode_struct!(decl::AliasDecl {
    identity: crate::model::common::Identity<TextOffset>,
    ty: TypeIndex,
    home_scope: DeclIndex,
    aliasee: TypeIndex,
    basic_spec: BasicSpecifiers,
    access: Access,
});
decode_struct!(decl::TemplateCore {
    identity: crate::model::common::Identity<NameIndex>,
    home_scope: DeclIndex,
    chart: ChartIndex,
});
decode_struct!(decl::TemplateDecl {
    core: decl::TemplateCore,
    ty: TypeIndex,
    basic_spec: BasicSpecifiers,
    access: Access,
    properties: ReachableProperties,
});
decode_struct!(decl::PartialSpecializationDecl {
    core: decl::TemplateCore,
    specialization_form: SpecFormIndex,
    basic_spec: BasicSpecifiers,
    access: Access,
    properties: ReachableProperties,
});
decode_struct!(decl::SpecializationDecl {
    specialization_form: SpecFormIndex,
    decl: DeclIndex,
    sort: SpecializationSort,
    basic_spec: BasicSpecifiers,
    access: Access,
    properties: ReachableProperties,
});
decode_struct!(decl::ConceptDecl {
    identity: crate::model::common::Identity<TextOffset>,
    home_scope: DeclIndex,
    ty: TypeIndex,
    chart: ChartIndex,
    constraint: ExprIndex,
    basic_spec: BasicSpecifiers,
    access: Access,
    head: SentenceIndex,
    body: SentenceIndex,
});
decode_struct!(decl::DeductionGuideDecl {
    identity: crate::model::common::Identity<NameIndex>,
    home_scope: DeclIndex,
    source: ChartIndex,
    target: ExprIndex,
    traits: GuideTraits,
    basic_spec: BasicSpecifiers,
});
decode_struct!(decl::IntrinsicDecl {
    identity: crate::model::common::Identity<TextOffset>,
    ty: TypeIndex,
    home_scope: DeclIndex,
    basic_spec: BasicSpecifiers,
    access: Access,
    traits: FunctionTraits,
});
decode_struct!(decl::PropertyDecl {
    data_member: DeclIndex,
    get_method_name: TextOffset,
    set_method_name: TextOffset,
});
decode_struct!(decl::SegmentDecl { name: TextOffset, class_id: TextOffset });
decode_struct!(decl::UsingDecl {
    identity: crate::model::common::Identity<TextOffset>,
    home_scope: DeclIndex,
    resolution: DeclIndex,
    parent: ExprIndex,
    name: TextOffset,
    basic_spec: BasicSpecifiers,
    access: Access,
    is_hidden: bool,
});
decode_struct!(decl::FriendDecl { reference: ExprIndex });
decode_struct!(decl::ExpansionDecl { locus: crate::model::common::SourceLocation, operand: DeclIndex });
decode_struct!(decl::BarrenDecl { directive: DirIndex, basic_spec: BasicSpecifiers, access: Access });
decode_struct!(decl::SyntacticDecl { tree: SyntaxIndex });
decode_struct!(decl::ReferenceDecl {
    owner_module: TextOffset,
    owner_partition: TextOffset,
    local_index: DeclIndex,
});
decode_struct!(decl::TupleDecl { elements: Sequence<DeclIndex> });
decode_struct!(decl::VendorDecl { index: VendorIndex });
decode_struct!(decl::ScopeExtent { members: Sequence<DeclIndex> });

// ---------------------------------------------------------------------
// model::types
// ---------------------------------------------------------------------

decode_struct!(types::FundamentalType { basis: types::TypeBasis, precision: types::TypePrecision, sign: types::TypeSign });
decode_struct!(types::DesignatedType { decl: DeclIndex });
decode_struct!(types::TorType {
    source: TypeIndex,
    eh_spec: crate::model::common::NoexceptSpecification,
    convention: CallingConvention,
});
decode_struct!(types::SyntacticType { expr: ExprIndex });
decode_struct!(types::ExpansionType { pack: TypeIndex, mode: types::ExpansionMode });
decode_struct!(types::PointerType { pointee: TypeIndex });
decode_struct!(types::PointerToMemberType { scope: TypeIndex, ty: TypeIndex });
decode_struct!(types::LvalueReferenceType { referee: TypeIndex });
decode_struct!(types::RvalueReferenceType { referee: TypeIndex });
decode_struct!(types::UnalignedType { operand: TypeIndex });
decode_struct!(types::DecltypeType { expression: SyntaxIndex });
decode_struct!(types::PlaceholderType { constraint: ExprIndex, basis: types::TypeBasis, elaboration: TypeIndex });
decode_struct!(types::TupleType { elements: Sequence<TypeIndex> });
decode_struct!(types::ForallType { chart: ChartIndex, subject: TypeIndex });
decode_struct!(types::FunctionType {
    target: TypeIndex,
    source: TypeIndex,
    eh_spec: crate::model::common::NoexceptSpecification,
    convention: CallingConvention,
    traits: FunctionTypeTraits,
});
decode_struct!(types::MethodType {
    target: TypeIndex,
    source: TypeIndex,
    class_type: TypeIndex,
    eh_spec: crate::model::common::NoexceptSpecification,
    convention: CallingConvention,
    traits: FunctionTypeTraits,
});
decode_struct!(types::ArrayType { element: TypeIndex, bound: ExprIndex });
decode_struct!(types::QualifiedType { unqualified_type: TypeIndex, qualifiers: Qualifier });
decode_struct!(types::TypenameType { path: ExprIndex });
decode_struct!(types::BaseType { ty: TypeIndex, access: Access, traits: types::BaseClassTraits });
decode_struct!(types::SyntaxTreeType { syntax: SyntaxIndex });
decode_struct!(types::VendorType { index: VendorIndex });

// ---------------------------------------------------------------------
// model::syntax
// ---------------------------------------------------------------------

decode_struct!(syntax::Keyword { locus: crate::model::common::SourceLocation, kind: syntax::KeywordKind });
decode_struct!(syntax::VendorSyntax { index: VendorIndex });
decode_struct!(syntax::SimpleTypeSpecifier { ty: TypeIndex, expr: ExprIndex, locus: crate::model::common::SourceLocation });
decode_struct!(syntax::DecltypeSpecifier { expr: ExprIndex, locus: crate::model::common::SourceLocation });
decode_struct!(syntax::PlaceholderTypeSpecifier { ty: TypeIndex, locus: crate::model::common::SourceLocation });
decode_struct!(syntax::TypeSpecifierSeq {
    type_script: SyntaxIndex,
    ty: TypeIndex,
    locus: crate::model::common::SourceLocation,
    qualifiers: Qualifier,
    is_unhashed: bool,
});
decode_struct!(syntax::DeclSpecifierSeq {
    ty: TypeIndex,
    type_script: SyntaxIndex,
    locus: crate::model::common::SourceLocation,
    storage_class: syntax::StorageClass,
    declspec: SentenceIndex,
    explicit_specifier: SyntaxIndex,
    qualifiers: Qualifier,
});
decode_struct!(syntax::VirtualSpecifierSeq {
    locus: crate::model::common::SourceLocation,
    final_keyword: crate::model::common::SourceLocation,
    override_keyword: crate::model::common::SourceLocation,
    is_pure: bool,
});
decode_struct!(syntax::NoexceptSpecificationSyntax {
    expression: ExprIndex,
    locus: crate::model::common::SourceLocation,
    left_paren: crate::model::common::SourceLocation,
    right_paren: crate::model::common::SourceLocation,
});
decode_struct!(syntax::ExplicitSpecifier {
    expression: ExprIndex,
    locus: crate::model::common::SourceLocation,
    left_paren: crate::model::common::SourceLocation,
    right_paren: crate::model::common::SourceLocation,
});
decode_struct!(syntax::EnumSpecifier {
    name: ExprIndex,
    class_or_struct: syntax::Keyword,
    enumerators: SyntaxIndex,
    enum_base: SyntaxIndex,
    locus: crate::model::common::SourceLocation,
    colon: crate::model::common::SourceLocation,
    left_brace: crate::model::common::SourceLocation,
    right_brace: crate::model::common::SourceLocation,
});
decode_struct!(syntax::EnumeratorDefinition {
    name: TextOffset,
    expression: ExprIndex,
    locus: crate::model::common::SourceLocation,
    assign: crate::model::common::SourceLocation,
    comma: crate::model::common::SourceLocation,
});
decode_struct!(syntax::ClassSpecifier {
    name: ExprIndex,
    class_key: syntax::Keyword,
    base_classes: SyntaxIndex,
    members: SyntaxIndex,
    left_brace: crate::model::common::SourceLocation,
    right_brace: crate::model::common::SourceLocation,
});
decode_struct!(syntax::MemberSpecification { declarations: SyntaxIndex });
decode_struct!(syntax::MemberDeclaration {
    decl_specifier_seq: SyntaxIndex,
    declarators: SyntaxIndex,
    semi_colon: crate::model::common::SourceLocation,
});
decode_struct!(syntax::MemberDeclarator {
    declarator: SyntaxIndex,
    requires_clause: SyntaxIndex,
    expression: ExprIndex,
    initializer: ExprIndex,
    locus: crate::model::common::SourceLocation,
    colon: crate::model::common::SourceLocation,
    comma: crate::model::common::SourceLocation,
});
decode_struct!(syntax::AccessSpecifier { keyword: syntax::Keyword, colon: crate::model::common::SourceLocation });
decode_struct!(syntax::BaseSpecifierList { base_specifiers: SyntaxIndex, colon: crate::model::common::SourceLocation });
decode_struct!(syntax::BaseSpecifier {
    name: ExprIndex,
    access_keyword: syntax::Keyword,
    virtual_keyword: crate::model::common::SourceLocation,
    locus: crate::model::common::SourceLocation,
    ellipsis: crate::model::common::SourceLocation,
    comma: crate::model::common::SourceLocation,
});
decode_struct!(syntax::TypeId { ty: SyntaxIndex, declarator: SyntaxIndex, locus: crate::model::common::SourceLocation });
decode_struct!(syntax::TrailingReturnType { ty: SyntaxIndex, locus: crate::model::common::SourceLocation });
decode_struct!(syntax::PointerDeclarator {
    owner: ExprIndex,
    child: SyntaxIndex,
    locus: crate::model::common::SourceLocation,
    kind: syntax::PointerDeclaratorKind,
    qualifiers: Qualifier,
    convention: CallingConvention,
    is_function: bool,
});
decode_struct!(syntax::ArrayDeclarator {
    bounds: ExprIndex,
    left_bracket: crate::model::common::SourceLocation,
    right_bracket: crate::model::common::SourceLocation,
});
decode_struct!(syntax::FunctionDeclarator {
    parameters: SyntaxIndex,
    exception_specification: SyntaxIndex,
    left_paren: crate::model::common::SourceLocation,
    right_paren: crate::model::common::SourceLocation,
    ellipsis: crate::model::common::SourceLocation,
    ref_qualifier: crate::model::common::SourceLocation,
    traits: FunctionTypeTraits,
});
decode_struct!(syntax::ParameterDeclarator {
    decl_specifier_seq: SyntaxIndex,
    declarator: SyntaxIndex,
    default_argument: ExprIndex,
    locus: crate::model::common::SourceLocation,
    sort: ParameterSort,
});
decode_struct!(syntax::InitDeclarator {
    declarator: SyntaxIndex,
    requires_clause: SyntaxIndex,
    initializer: ExprIndex,
    comma: crate::model::common::SourceLocation,
});
decode_struct!(syntax::SimpleDeclaration {
    decl_specifier_seq: SyntaxIndex,
    declarators: SyntaxIndex,
    locus: crate::model::common::SourceLocation,
    semi_colon: crate::model::common::SourceLocation,
});
decode_struct!(syntax::ConditionDeclaration {
    decl_specifier: SyntaxIndex,
    init_statement: SyntaxIndex,
    locus: crate::model::common::SourceLocation,
});
decode_struct!(syntax::StaticAssertDeclaration {
    expression: ExprIndex,
    message: ExprIndex,
    locus: crate::model::common::SourceLocation,
    left_paren: crate::model::common::SourceLocation,
    right_paren: crate::model::common::SourceLocation,
    semi_colon: crate::model::common::SourceLocation,
    comma: crate::model::common::SourceLocation,
});
decode_struct!(syntax::AliasDeclaration {
    identifier: TextOffset,
    defining_type_id: SyntaxIndex,
    locus: crate::model::common::SourceLocation,
    assign: crate::model::common::SourceLocation,
    semi_colon: crate::model::common::SourceLocation,
});
decode_struct!(syntax::ConceptDefinition {
    parameters: SyntaxIndex,
    locus: crate::model::common::SourceLocation,
    identifier: TextOffset,
    expression: ExprIndex,
    concept_keyword: crate::model::common::SourceLocation,
    assign: crate::model::common::SourceLocation,
    semi_colon: crate::model::common::SourceLocation,
});
decode_struct!(syntax::CompoundStatement {
    pragma_tokens: SentenceIndex,
    statements: SyntaxIndex,
    left_curly: crate::model::common::SourceLocation,
    right_curly: crate::model::common::SourceLocation,
});
decode_struct!(syntax::ReturnStatement {
    pragma_tokens: SentenceIndex,
    expr: ExprIndex,
    return_kind: syntax::ReturnKind,
    return_locus: crate::model::common::SourceLocation,
    semi_colon: crate::model::common::SourceLocation,
});
decode_struct!(syntax::IfStatement {
    pragma_tokens: SentenceIndex,
    init_statement: SyntaxIndex,
    condition: ExprIndex,
    if_true: SyntaxIndex,
    if_false: SyntaxIndex,
    if_keyword: crate::model::common::SourceLocation,
    constexpr_locus: crate::model::common::SourceLocation,
    else_keyword: crate::model::common::SourceLocation,
});
decode_struct!(syntax::WhileStatement {
    pragma_tokens: SentenceIndex,
    condition: ExprIndex,
    statement: SyntaxIndex,
    while_keyword: crate::model::common::SourceLocation,
});
decode_struct!(syntax::DoWhileStatement {
    pragma_tokens: SentenceIndex,
    condition: ExprIndex,
    statement: SyntaxIndex,
    do_keyword: crate::model::common::SourceLocation,
    while_keyword: crate::model::common::SourceLocation,
    semi_colon: crate::model::common::SourceLocation,
});
decode_struct!(syntax::ForStatement {
    pragma_tokens: SentenceIndex,
    init_statement: SyntaxIndex,
    condition: ExprIndex,
    expression: ExprIndex,
    statement: SyntaxIndex,
    for_keyword: crate::model::common::SourceLocation,
    left_paren: crate::model::common::SourceLocation,
    right_paren: crate::model::common::SourceLocation,
    semi_colon: crate::model::common::SourceLocation,
});
decode_struct!(syntax::RangeBasedForStatement {
    pragma_tokens: SentenceIndex,
    init_statement: SyntaxIndex,
    declaration: SyntaxIndex,
    initializer: ExprIndex,
    statement: SyntaxIndex,
    for_keyword: crate::model::common::SourceLocation,
    left_paren: crate::model::common::SourceLocation,
    right_paren: crate::model::common::SourceLocation,
    colon: crate::model::common::SourceLocation,
});
decode_struct!(syntax::LabeledStatement {
    pragma_tokens: SentenceIndex,
    expression: ExprIndex,
    statement: SyntaxIndex,
    locus: crate::model::common::SourceLocation,
    colon: crate::model::common::SourceLocation,
    kind: syntax::LabelKind,
});
decode_struct!(syntax::BreakStatement { break_keyword: crate::model::common::SourceLocation, semi_colon: crate::model::common::SourceLocation });
decode_struct!(syntax::ContinueStatement { continue_keyword: crate::model::common::SourceLocation, semi_colon: crate::model::common::SourceLocation });
decode_struct!(syntax::SwitchStatement {
    pragma_tokens: SentenceIndex,
    init_statement: SyntaxIndex,
    condition: ExprIndex,
    statement: SyntaxIndex,
    switch_keyword: crate::model::common::SourceLocation,
});
decode_struct!(syntax::GotoStatement {
    pragma_tokens: SentenceIndex,
    name: TextOffset,
    locus: crate::model::common::SourceLocation,
    label: crate::model::common::SourceLocation,
    semi_colon: crate::model::common::SourceLocation,
});
decode_struct!(syntax::DeclarationStatement { pragma_tokens: SentenceIndex, declaration: SyntaxIndex });
decode_struct!(syntax::ExpressionStatement {
    pragma_tokens: SentenceIndex,
    expression: ExprIndex,
    semi_colon: crate::model::common::SourceLocation,
});
decode_struct!(syntax::TryBlock {
    pragma_tokens: SentenceIndex,
    statement: SyntaxIndex,
    handler_seq: SyntaxIndex,
    try_keyword: crate::model::common::SourceLocation,
});
decode_struct!(syntax::Handler {
    pragma_tokens: SentenceIndex,
    exception_declaration: SyntaxIndex,
    statement: SyntaxIndex,
    catch_keyword: crate::model::common::SourceLocation,
    left_paren: crate::model::common::SourceLocation,
    right_paren: crate::model::common::SourceLocation,
});
decode_struct!(syntax::HandlerSeq { handlers: SyntaxIndex });
decode_struct!(syntax::StatementSeq { statements: SyntaxIndex });
decode_struct!(syntax::Expression { expression: ExprIndex });
decode_struct!(syntax::FunctionDefinition {
    decl_specifier_seq: SyntaxIndex,
    declarator: SyntaxIndex,
    requires_clause: SyntaxIndex,
    body: SyntaxIndex,
});
decode_struct!(syntax::TemplateDeclaration {
    parameters: SyntaxIndex,
    declaration: SyntaxIndex,
    locus: crate::model::common::SourceLocation,
});
decode_struct!(syntax::RequiresClause { expression: ExprIndex, locus: crate::model::common::SourceLocation });
decode_struct!(syntax::TemplateParameterList {
    parameters: SyntaxIndex,
    requires_clause: SyntaxIndex,
    left_angle: crate::model::common::SourceLocation,
    right_angle: crate::model::common::SourceLocation,
});
decode_struct!(syntax::TemplateArgumentList {
    arguments: SyntaxIndex,
    left_angle: crate::model::common::SourceLocation,
    right_angle: crate::model::common::SourceLocation,
});
decode_struct!(syntax::TemplateId {
    name: SyntaxIndex,
    symbol: ExprIndex,
    arguments: SyntaxIndex,
    locus: crate::model::common::SourceLocation,
    template_keyword: crate::model::common::SourceLocation,
});
decode_struct!(syntax::LambdaIntroducer {
    captures: SyntaxIndex,
    left_bracket: crate::model::common::SourceLocation,
    right_bracket: crate::model::common::SourceLocation,
});
decode_struct!(syntax::LambdaDeclarator {
    parameters: SyntaxIndex,
    exception_specification: SyntaxIndex,
    trailing_return_type: SyntaxIndex,
    spec_locus: crate::model::common::SourceLocation,
    spec: syntax::LambdaDeclaratorSpec,
    left_paren: crate::model::common::SourceLocation,
    right_paren: crate::model::common::SourceLocation,
    ellipsis: crate::model::common::SourceLocation,
});
decode_struct!(syntax::UsingDeclaration {
    declarators: SyntaxIndex,
    using_keyword: crate::model::common::SourceLocation,
    semi_colon: crate::model::common::SourceLocation,
});
decode_struct!(syntax::UsingDirective {
    qualified_name: ExprIndex,
    using_keyword: crate::model::common::SourceLocation,
    namespace_keyword: crate::model::common::SourceLocation,
    semi_colon: crate::model::common::SourceLocation,
});
decode_struct!(syntax::AttributeSpecifierSeq { attributes: Sequence<AttrIndex>, locus: crate::model::common::SourceLocation });
decode_struct!(syntax::Tuple { elements: Sequence<SyntaxIndex> });
decode_struct!(syntax::Declarator {
    pointer: SyntaxIndex,
    parenthesized_declarator: SyntaxIndex,
    array_or_function_declarator: SyntaxIndex,
    trailing_return_type: SyntaxIndex,
    virtual_specifiers: SyntaxIndex,
    name: ExprIndex,
    ellipsis: crate::model::common::SourceLocation,
    locus: crate::model::common::SourceLocation,
    qualifiers: Qualifier,
    convention: CallingConvention,
    is_function: bool,
});

// ---------------------------------------------------------------------
// model::dir
// ---------------------------------------------------------------------

decode_struct!(dir::VendorDir { index: VendorIndex });
decode_struct!(dir::EmptyDir { locus: crate::model::common::SourceLocation });
decode_struct!(dir::AttributeDir { locus: crate::model::common::SourceLocation, attr: AttrIndex });
decode_struct!(dir::PragmaDir { locus: crate::model::common::SourceLocation, words: SentenceIndex });
decode_struct!(dir::UsingDir { locus: crate::model::common::SourceLocation, nominated: ExprIndex, resolution: DeclIndex });
decode_struct!(dir::UsingDeclarationDir { locus: crate::model::common::SourceLocation, path: ExprIndex, result: DeclIndex });
decode_struct!(dir::ExprDir { locus: crate::model::common::SourceLocation, expr: ExprIndex, phases: dir::Phases });
decode_struct!(dir::StmtDir { locus: crate::model::common::SourceLocation, stmt: StmtIndex, phases: dir::Phases });
decode_struct!(dir::StructuredBindingDir {
    locus: crate::model::common::SourceLocation,
    bindings: Sequence<DeclIndex>,
    names: Sequence<TextOffset>,
});
decode_struct!(dir::SpecifiersSpreadDir { locus: crate::model::common::SourceLocation });
decode_struct!(dir::TupleDir { elements: Sequence<DirIndex> });
decode_struct!(dir::PragmaComment { comment_text: TextOffset, sort: dir::PragmaCommentSort });
decode_struct!(dir::PragmaExpr { locus: crate::model::common::SourceLocation, name: TextOffset, operand: ExprIndex });

// ---------------------------------------------------------------------
// Entity <-> sort plumbing: every leaf struct decoded above that lives in
// its own sort-tagged partition implements `Entity`, pairing it with the
// multi-sorted index type and sort tag that addresses it.
// ---------------------------------------------------------------------

/// A sort enumeration that names one of the partition families the catalog
/// resolves partition names against.
pub trait SortFamily: Sort {
    fn any(self) -> AnySort;
}

macro_rules! impl_sort_family {
    ($sort:ty, $ctor:path) => {
        impl SortFamily for $sort {
            fn any(self) -> AnySort {
                $ctor(self)
            }
        }
    };
}

impl_sort_family!(NameSort, AnySort::Name);
impl_sort_family!(ChartSort, AnySort::Chart);
impl_sort_family!(DeclSort, AnySort::Decl);
impl_sort_family!(TypeSort, AnySort::Type);
impl_sort_family!(ExprSort, AnySort::Expr);
impl_sort_family!(StmtSort, AnySort::Stmt);
impl_sort_family!(SyntaxSort, AnySort::Syntax);
impl_sort_family!(FormSort, AnySort::Form);
impl_sort_family!(MacroSort, AnySort::Macro);
impl_sort_family!(PragmaSort, AnySort::Pragma);
impl_sort_family!(AttrSort, AnySort::Attr);
impl_sort_family!(DirSort, AnySort::Dir);
impl_sort_family!(LiteralSort, AnySort::Lit);
impl_sort_family!(StringSort, AnySort::String);
impl_sort_family!(VendorSort, AnySort::Vendor);

/// An entity materialized from one row of a sort-tagged partition: `get`
/// decodes one of these out of the partition named by `SORT`'s family and
/// its own variant.
pub trait Entity: Decode + Copy {
    type Index: MultiSorted;
    const SORT: <Self::Index as MultiSorted>::Sort;
}

/// The common shape of every `define_multisorted_index!`-generated type:
/// pack/unpack a sort tag and a partition position.
pub trait MultiSorted: Copy {
    type Sort: SortFamily;
    fn sort(self) -> Self::Sort;
    fn index(self) -> Index;
    fn make(sort: Self::Sort, position: u32) -> Self;
}

macro_rules! impl_multisorted {
    ($name:ty, $sort:ty) => {
        impl MultiSorted for $name {
            type Sort = $sort;
            fn sort(self) -> Self::Sort {
                <$name>::sort(self)
            }
            fn index(self) -> Index {
                <$name>::index(self)
            }
            fn make(sort: Self::Sort, position: u32) -> Self {
                <$name>::make(sort, position)
            }
        }
    };
}

impl_multisorted!(NameIndex, NameSort);
impl_multisorted!(ChartIndex, ChartSort);
impl_multisorted!(DeclIndex, DeclSort);
impl_multisorted!(TypeIndex, TypeSort);
impl_multisorted!(ExprIndex, ExprSort);
impl_multisorted!(StmtIndex, StmtSort);
impl_multisorted!(SyntaxIndex, SyntaxSort);
impl_multisorted!(FormIndex, FormSort);
impl_multisorted!(MacroIndex, MacroSort);
impl_multisorted!(PragmaIndex, PragmaSort);
impl_multisorted!(AttrIndex, AttrSort);
impl_multisorted!(DirIndex, DirSort);
impl_multisorted!(LitIndex, LiteralSort);
impl_multisorted!(StringIndex, StringSort);
impl_multisorted!(VendorIndex, VendorSort);

macro_rules! impl_entity {
    ($struct:path, $index:ty, $sort:expr) => {
        impl Entity for $struct {
            type Index = $index;
            const SORT: <$index as MultiSorted>::Sort = $sort;
        }
    };
}

impl_entity!(name::ConversionFunctionId, NameIndex, NameSort::Conversion);
impl_entity!(name::OperatorFunctionId, NameIndex, NameSort::Operator);
impl_entity!(name::LiteralOperatorId, NameIndex, NameSort::Literal);
impl_entity!(name::TemplateName, NameIndex, NameSort::Template);
impl_entity!(name::SpecializationName, NameIndex, NameSort::Specialization);
impl_entity!(name::SourceFileName, NameIndex, NameSort::SourceFile);
impl_entity!(name::GuideName, NameIndex, NameSort::Guide);

impl_entity!(decl::FunctionDecl, DeclIndex, DeclSort::Function);
impl_entity!(decl::MethodDecl, DeclIndex, DeclSort::Method);
impl_entity!(decl::ConstructorDecl, DeclIndex, DeclSort::Constructor);
impl_entity!(decl::DestructorDecl, DeclIndex, DeclSort::Destructor);
impl_entity!(decl::EnumeratorDecl, DeclIndex, DeclSort::Enumerator);
impl_entity!(decl::VariableDecl, DeclIndex, DeclSort::Variable);
impl_entity!(decl::ParameterDecl, DeclIndex, DeclSort::Parameter);
impl_entity!(decl::FieldDecl, DeclIndex, DeclSort::Field);
impl_entity!(decl::BitfieldDecl, DeclIndex, DeclSort::Bitfield);
impl_entity!(decl::ScopeDecl, DeclIndex, DeclSort::Scope);
impl_entity!(decl::EnumerationDecl, DeclIndex, DeclSort::Enumeration);
impl_entity!(decl::AliasDecl, DeclIndex, DeclSort::Alias);
impl_entity!(decl::TemplateDecl, DeclIndex, DeclSort::Template);
impl_entity!(decl::PartialSpecializationDecl, DeclIndex, DeclSort::PartialSpecialization);
impl_entity!(decl::SpecializationDecl, DeclIndex, DeclSort::Specialization);
impl_entity!(decl::ConceptDecl, DeclIndex, DeclSort::Concept);
impl_entity!(decl::DeductionGuideDecl, DeclIndex, DeclSort::DeductionGuide);
impl_entity!(decl::IntrinsicDecl, DeclIndex, DeclSort::Intrinsic);
impl_entity!(decl::PropertyDecl, DeclIndex, DeclSort::Property);
impl_entity!(decl::SegmentDecl, DeclIndex, DeclSort::Segment);
impl_entity!(decl::UsingDecl, DeclIndex, DeclSort::Using);
impl_entity!(decl::FriendDecl, DeclIndex, DeclSort::Friend);
impl_entity!(decl::ExpansionDecl, DeclIndex, DeclSort::Expansion);
impl_entity!(decl::BarrenDecl, DeclIndex, DeclSort::Barren);
impl_entity!(decl::SyntacticDecl, DeclIndex, DeclSort::SyntaxTree);
impl_entity!(decl::ReferenceDecl, DeclIndex, DeclSort::Reference);
impl_entity!(decl::TupleDecl, DeclIndex, DeclSort::Tuple);
impl_entity!(decl::VendorDecl, DeclIndex, DeclSort::VendorExtension);

impl_entity!(types::FundamentalType, TypeIndex, TypeSort::Fundamental);
impl_entity!(types::DesignatedType, TypeIndex, TypeSort::Designated);
impl_entity!(types::TorType, TypeIndex, TypeSort::Tor);
impl_entity!(types::SyntacticType, TypeIndex, TypeSort::Syntactic);
impl_entity!(types::ExpansionType, TypeIndex, TypeSort::Expansion);
impl_entity!(types::PointerType, TypeIndex, TypeSort::Pointer);
impl_entity!(types::PointerToMemberType, TypeIndex, TypeSort::PointerToMember);
impl_entity!(types::LvalueReferenceType, TypeIndex, TypeSort::LvalueReference);
impl_entity!(types::RvalueReferenceType, TypeIndex, TypeSort::RvalueReference);
impl_entity!(types::UnalignedType, TypeIndex, TypeSort::Unaligned);
impl_entity!(types::DecltypeType, TypeIndex, TypeSort::Decltype);
impl_entity!(types::PlaceholderType, TypeIndex, TypeSort::Placeholder);
impl_entity!(types::TupleType, TypeIndex, TypeSort::Tuple);
impl_entity!(types::ForallType, TypeIndex, TypeSort::Forall);
impl_entity!(types::FunctionType, TypeIndex, TypeSort::Function);
impl_entity!(types::MethodType, TypeIndex, TypeSort::Method);
impl_entity!(types::ArrayType, TypeIndex, TypeSort::Array);
impl_entity!(types::QualifiedType, TypeIndex, TypeSort::Qualified);
impl_entity!(types::TypenameType, TypeIndex, TypeSort::Typename);
impl_entity!(types::BaseType, TypeIndex, TypeSort::Base);
impl_entity!(types::SyntaxTreeType, TypeIndex, TypeSort::SyntaxTree);
impl_entity!(types::VendorType, TypeIndex, TypeSort::VendorExtension);

impl_entity!(expr::VendorExpr, ExprIndex, ExprSort::VendorExtension);
impl_entity!(expr::EmptyExpr, ExprIndex, ExprSort::Empty);
impl_entity!(expr::LiteralExpr, ExprIndex, ExprSort::Literal);
impl_entity!(expr::TypeExpr, ExprIndex, ExprSort::Type);
impl_entity!(expr::NamedDeclExpr, ExprIndex, ExprSort::NamedDecl);
impl_entity!(expr::UnresolvedIdExpr, ExprIndex, ExprSort::UnresolvedId);
impl_entity!(expr::TemplateIdExpr, ExprIndex, ExprSort::TemplateId);
impl_entity!(expr::UnqualifiedIdExpr, ExprIndex, ExprSort::UnqualifiedId);
impl_entity!(expr::SimpleIdentifierExpr, ExprIndex, ExprSort::SimpleIdentifier);
impl_entity!(expr::PointerExpr, ExprIndex, ExprSort::Pointer);
impl_entity!(expr::QualifiedNameExpr, ExprIndex, ExprSort::QualifiedName);
impl_entity!(expr::PathExpr, ExprIndex, ExprSort::Path);
impl_entity!(expr::ReadExpr, ExprIndex, ExprSort::Read);
impl_entity!(expr::MonadicExpr, ExprIndex, ExprSort::Monad);
impl_entity!(expr::DyadicExpr, ExprIndex, ExprSort::Dyad);
impl_entity!(expr::TriadicExpr, ExprIndex, ExprSort::Triad);
impl_entity!(expr::StringExpr, ExprIndex, ExprSort::String);
impl_entity!(expr::TemporaryExpr, ExprIndex, ExprSort::Temporary);
impl_entity!(expr::CallExpr, ExprIndex, ExprSort::Call);
impl_entity!(expr::MemberInitializerExpr, ExprIndex, ExprSort::MemberInitializer);
impl_entity!(expr::MemberAccessExpr, ExprIndex, ExprSort::MemberAccess);
impl_entity!(expr::InheritancePathExpr, ExprIndex, ExprSort::InheritancePath);
impl_entity!(expr::InitializerListExpr, ExprIndex, ExprSort::InitializerList);
impl_entity!(expr::CastExpr, ExprIndex, ExprSort::Cast);
impl_entity!(expr::ConditionExpr, ExprIndex, ExprSort::Condition);
impl_entity!(expr::ExpressionListExpr, ExprIndex, ExprSort::ExpressionList);
impl_entity!(expr::SizeofTypeExpr, ExprIndex, ExprSort::SizeofType);
impl_entity!(expr::AlignofExpr, ExprIndex, ExprSort::Alignof);
impl_entity!(expr::LabelExpr, ExprIndex, ExprSort::Label);
impl_entity!(expr::TypeidExpr, ExprIndex, ExprSort::Typeid);
impl_entity!(expr::DestructorCallExpr, ExprIndex, ExprSort::DestructorCall);
impl_entity!(expr::SyntaxTreeExpr, ExprIndex, ExprSort::SyntaxTree);
impl_entity!(expr::FunctionStringExpr, ExprIndex, ExprSort::FunctionString);
impl_entity!(expr::CompoundStringExpr, ExprIndex, ExprSort::CompoundString);
impl_entity!(expr::StringSequenceExpr, ExprIndex, ExprSort::StringSequence);
impl_entity!(expr::InitializerExpr, ExprIndex, ExprSort::Initializer);
impl_entity!(expr::RequiresExpr, ExprIndex, ExprSort::Requires);
impl_entity!(expr::UnaryFoldExpr, ExprIndex, ExprSort::UnaryFold);
impl_entity!(expr::BinaryFoldExpr, ExprIndex, ExprSort::BinaryFold);
impl_entity!(expr::ProductTypeValueExpr, ExprIndex, ExprSort::ProductTypeValue);
impl_entity!(expr::SumTypeValueExpr, ExprIndex, ExprSort::SumTypeValue);
impl_entity!(expr::ArrayValueExpr, ExprIndex, ExprSort::ArrayValue);
impl_entity!(expr::TupleExpr, ExprIndex, ExprSort::Tuple);
impl_entity!(expr::PlaceholderExpr, ExprIndex, ExprSort::Placeholder);
impl_entity!(expr::ExpansionExpr, ExprIndex, ExprSort::Expansion);
impl_entity!(expr::StatementExpr, ExprIndex, ExprSort::Statement);
impl_entity!(expr::TypeTraitIntrinsicExpr, ExprIndex, ExprSort::TypeTraitIntrinsic);
impl_entity!(expr::NullptrExpr, ExprIndex, ExprSort::Nullptr);
impl_entity!(expr::ThisExpr, ExprIndex, ExprSort::This);
impl_entity!(expr::TemplateReferenceExpr, ExprIndex, ExprSort::TemplateReference);
impl_entity!(expr::DesignatedInitializerExpr, ExprIndex, ExprSort::DesignatedInitializer);
impl_entity!(expr::PackedTemplateArgumentsExpr, ExprIndex, ExprSort::PackedTemplateArguments);
// Note: `expr::LambdaExpr` has no `locus`/`ty`; it shares `ExprSort::Lambda`.
impl_entity!(expr::LambdaExpr, ExprIndex, ExprSort::Lambda);

impl_entity!(stmt::VendorStmt, StmtIndex, StmtSort::VendorExtension);
impl_entity!(stmt::TryStmt, StmtIndex, StmtSort::Try);
impl_entity!(stmt::IfStmt, StmtIndex, StmtSort::If);
impl_entity!(stmt::ForStmt, StmtIndex, StmtSort::For);
impl_entity!(stmt::LabeledStmt, StmtIndex, StmtSort::Labeled);
impl_entity!(stmt::WhileStmt, StmtIndex, StmtSort::While);
impl_entity!(stmt::BlockStmt, StmtIndex, StmtSort::Block);
impl_entity!(stmt::BreakStmt, StmtIndex, StmtSort::Break);
impl_entity!(stmt::SwitchStmt, StmtIndex, StmtSort::Switch);
impl_entity!(stmt::DoWhileStmt, StmtIndex, StmtSort::DoWhile);
impl_entity!(stmt::GotoStmt, StmtIndex, StmtSort::Goto);
impl_entity!(stmt::ContinueStmt, StmtIndex, StmtSort::Continue);
impl_entity!(stmt::ExpressionStmt, StmtIndex, StmtSort::Expression);
impl_entity!(stmt::ReturnStmt, StmtIndex, StmtSort::Return);
impl_entity!(stmt::DeclStmt, StmtIndex, StmtSort::Decl);
impl_entity!(stmt::ExpansionStmt, StmtIndex, StmtSort::Expansion);
impl_entity!(stmt::SyntaxTreeStmt, StmtIndex, StmtSort::SyntaxTree);
impl_entity!(stmt::HandlerStmt, StmtIndex, StmtSort::Handler);
impl_entity!(stmt::TupleStmt, StmtIndex, StmtSort::Tuple);
impl_entity!(stmt::DirStmt, StmtIndex, StmtSort::Dir);

impl_entity!(syntax::SimpleTypeSpecifier, SyntaxIndex, SyntaxSort::SimpleTypeSpecifier);
impl_entity!(syntax::DecltypeSpecifier, SyntaxIndex, SyntaxSort::DecltypeSpecifier);
impl_entity!(syntax::PlaceholderTypeSpecifier, SyntaxIndex, SyntaxSort::PlaceholderTypeSpecifier);
impl_entity!(syntax::TypeSpecifierSeq, SyntaxIndex, SyntaxSort::TypeSpecifierSeq);
impl_entity!(syntax::DeclSpecifierSeq, SyntaxIndex, SyntaxSort::DeclSpecifierSeq);
impl_entity!(syntax::VirtualSpecifierSeq, SyntaxIndex, SyntaxSort::VirtualSpecifierSeq);
impl_entity!(syntax::NoexceptSpecificationSyntax, SyntaxIndex, SyntaxSort::NoexceptSpecification);
impl_entity!(syntax::ExplicitSpecifier, SyntaxIndex, SyntaxSort::ExplicitSpecifier);
impl_entity!(syntax::EnumSpecifier, SyntaxIndex, SyntaxSort::EnumSpecifier);
impl_entity!(syntax::EnumeratorDefinition, SyntaxIndex, SyntaxSort::EnumeratorDefinition);
impl_entity!(syntax::ClassSpecifier, SyntaxIndex, SyntaxSort::ClassSpecifier);
impl_entity!(syntax::MemberSpecification, SyntaxIndex, SyntaxSort::MemberSpecification);
impl_entity!(syntax::MemberDeclaration, SyntaxIndex, SyntaxSort::MemberDeclaration);
impl_entity!(syntax::MemberDeclarator, SyntaxIndex, SyntaxSort::MemberDeclarator);
impl_entity!(syntax::AccessSpecifier, SyntaxIndex, SyntaxSort::AccessSpecifier);
impl_entity!(syntax::BaseSpecifierList, SyntaxIndex, SyntaxSort::BaseSpecifierList);
impl_entity!(syntax::BaseSpecifier, SyntaxIndex, SyntaxSort::BaseSpecifier);
impl_entity!(syntax::TypeId, SyntaxIndex, SyntaxSort::TypeId);
impl_entity!(syntax::TrailingReturnType, SyntaxIndex, SyntaxSort::TrailingReturnType);
impl_entity!(syntax::Declarator, SyntaxIndex, SyntaxSort::Declarator);
impl_entity!(syntax::PointerDeclarator, SyntaxIndex, SyntaxSort::PointerDeclarator);
impl_entity!(syntax::ArrayDeclarator, SyntaxIndex, SyntaxSort::ArrayDeclarator);
impl_entity!(syntax::FunctionDeclarator, SyntaxIndex, SyntaxSort::FunctionDeclarator);
impl_entity!(syntax::ParameterDeclarator, SyntaxIndex, SyntaxSort::ParameterDeclarator);
impl_entity!(syntax::InitDeclarator, SyntaxIndex, SyntaxSort::InitDeclarator);
impl_entity!(syntax::SimpleDeclaration, SyntaxIndex, SyntaxSort::SimpleDeclaration);
impl_entity!(syntax::ConditionDeclaration, SyntaxIndex, SyntaxSort::ConditionDeclaration);
impl_entity!(syntax::StaticAssertDeclaration, SyntaxIndex, SyntaxSort::StaticAssertDeclaration);
impl_entity!(syntax::AliasDeclaration, SyntaxIndex, SyntaxSort::AliasDeclaration);
impl_entity!(syntax::ConceptDefinition, SyntaxIndex, SyntaxSort::ConceptDefinition);
impl_entity!(syntax::CompoundStatement, SyntaxIndex, SyntaxSort::CompoundStatement);
impl_entity!(syntax::ReturnStatement, SyntaxIndex, SyntaxSort::ReturnStatement);
impl_entity!(syntax::IfStatement, SyntaxIndex, SyntaxSort::IfStatement);
impl_entity!(syntax::WhileStatement, SyntaxIndex, SyntaxSort::WhileStatement);
impl_entity!(syntax::DoWhileStatement, SyntaxIndex, SyntaxSort::DoWhileStatement);
impl_entity!(syntax::ForStatement, SyntaxIndex, SyntaxSort::ForStatement);
impl_entity!(syntax::RangeBasedForStatement, SyntaxIndex, SyntaxSort::RangeBasedForStatement);
impl_entity!(syntax::LabeledStatement, SyntaxIndex, SyntaxSort::LabeledStatement);
impl_entity!(syntax::BreakStatement, SyntaxIndex, SyntaxSort::BreakStatement);
impl_entity!(syntax::ContinueStatement, SyntaxIndex, SyntaxSort::ContinueStatement);
impl_entity!(syntax::SwitchStatement, SyntaxIndex, SyntaxSort::SwitchStatement);
impl_entity!(syntax::GotoStatement, SyntaxIndex, SyntaxSort::GotoStatement);
impl_entity!(syntax::DeclarationStatement, SyntaxIndex, SyntaxSort::DeclarationStatement);
impl_entity!(syntax::ExpressionStatement, SyntaxIndex, SyntaxSort::ExpressionStatement);
impl_entity!(syntax::TryBlock, SyntaxIndex, SyntaxSort::TryBlock);
impl_entity!(syntax::Handler, SyntaxIndex, SyntaxSort::Handler);
impl_entity!(syntax::HandlerSeq, SyntaxIndex, SyntaxSort::HandlerSeq);
impl_entity!(syntax::StatementSeq, SyntaxIndex, SyntaxSort::StatementSeq);
impl_entity!(syntax::Expression, SyntaxIndex, SyntaxSort::Expression);
impl_entity!(syntax::FunctionDefinition, SyntaxIndex, SyntaxSort::FunctionDefinition);
impl_entity!(syntax::TemplateDeclaration, SyntaxIndex, SyntaxSort::TemplateDeclaration);
impl_entity!(syntax::RequiresClause, SyntaxIndex, SyntaxSort::RequiresClause);
impl_entity!(syntax::TemplateParameterList, SyntaxIndex, SyntaxSort::TemplateParameterList);
impl_entity!(syntax::TemplateArgumentList, SyntaxIndex, SyntaxSort::TemplateArgumentList);
impl_entity!(syntax::TemplateId, SyntaxIndex, SyntaxSort::TemplateId);
impl_entity!(syntax::LambdaIntroducer, SyntaxIndex, SyntaxSort::LambdaIntroducer);
impl_entity!(syntax::LambdaDeclarator, SyntaxIndex, SyntaxSort::LambdaDeclarator);
impl_entity!(syntax::AttributeSpecifierSeq, SyntaxIndex, SyntaxSort::AttributeSpecifierSeq);
impl_entity!(syntax::UsingDeclaration, SyntaxIndex, SyntaxSort::UsingDeclaration);
impl_entity!(syntax::UsingDirective, SyntaxIndex, SyntaxSort::UsingDirective);
impl_entity!(syntax::Tuple, SyntaxIndex, SyntaxSort::Tuple);
impl_entity!(syntax::VendorSyntax, SyntaxIndex, SyntaxSort::VendorExtension);

impl_entity!(form::IdentifierForm, FormIndex, FormSort::Identifier);
impl_entity!(form::NumberForm, FormIndex, FormSort::Number);
impl_entity!(form::CharacterForm, FormIndex, FormSort::Character);
impl_entity!(form::StringForm, FormIndex, FormSort::String);
impl_entity!(form::OperatorForm, FormIndex, FormSort::Operator);
impl_entity!(form::KeywordForm, FormIndex, FormSort::Keyword);
impl_entity!(form::WhitespaceForm, FormIndex, FormSort::Whitespace);
impl_entity!(form::ParameterForm, FormIndex, FormSort::Parameter);
impl_entity!(form::StringizeForm, FormIndex, FormSort::Stringize);
impl_entity!(form::CatenateForm, FormIndex, FormSort::Catenate);
impl_entity!(form::PragmaForm, FormIndex, FormSort::Pragma);
impl_entity!(form::HeaderForm, FormIndex, FormSort::Header);
impl_entity!(form::ParenthesizedForm, FormIndex, FormSort::Parenthesized);
impl_entity!(form::TupleForm, FormIndex, FormSort::Tuple);
impl_entity!(form::JunkForm, FormIndex, FormSort::Junk);

impl_entity!(form::ObjectLikeMacro, MacroIndex, MacroSort::ObjectLike);
impl_entity!(form::FunctionLikeMacro, MacroIndex, MacroSort::FunctionLike);

impl_entity!(dir::PragmaComment, PragmaIndex, PragmaSort::VendorExtension);
impl_entity!(dir::PragmaExpr, PragmaIndex, PragmaSort::Expr);

impl_entity!(attr::BasicAttr, AttrIndex, AttrSort::Basic);
impl_entity!(attr::ScopedAttr, AttrIndex, AttrSort::Scoped);
impl_entity!(attr::LabeledAttr, AttrIndex, AttrSort::Labeled);
impl_entity!(attr::CalledAttr, AttrIndex, AttrSort::Called);
impl_entity!(attr::ExpandedAttr, AttrIndex, AttrSort::Expanded);
impl_entity!(attr::FactoredAttr, AttrIndex, AttrSort::Factored);
impl_entity!(attr::ElaboratedAttr, AttrIndex, AttrSort::Elaborated);
impl_entity!(attr::TupleAttr, AttrIndex, AttrSort::Tuple);

impl_entity!(dir::VendorDir, DirIndex, DirSort::VendorExtension);
impl_entity!(dir::EmptyDir, DirIndex, DirSort::Empty);
impl_entity!(dir::AttributeDir, DirIndex, DirSort::Attribute);
impl_entity!(dir::PragmaDir, DirIndex, DirSort::Pragma);
impl_entity!(dir::UsingDir, DirIndex, DirSort::Using);
impl_entity!(dir::UsingDeclarationDir, DirIndex, DirSort::DeclUse);
impl_entity!(dir::ExprDir, DirIndex, DirSort::Expr);
impl_entity!(dir::StmtDir, DirIndex, DirSort::Stmt);
impl_entity!(dir::StructuredBindingDir, DirIndex, DirSort::StructuredBinding);
impl_entity!(dir::SpecifiersSpreadDir, DirIndex, DirSort::SpecifiersSpread);
impl_entity!(dir::TupleDir, DirIndex, DirSort::Tuple);

/// An index type into a partition that carries no sort tag of its own
/// (the global line, word, sentence, spec-form and scope tables). Each is
/// addressed by a fixed, well-known partition name rather than one derived
/// from a [`crate::index::Sort`] variant, since the catalog's bijection only
/// covers the multi-sorted families.
pub trait UnisortedEntity: Decode {
    type Index: crate::index::Unisorted;
    const PARTITION_NAME: &'static str;
}

macro_rules! impl_unisorted_entity {
    ($entity:ty, $index:ty, $name:literal) => {
        impl UnisortedEntity for $entity {
            type Index = $index;
            const PARTITION_NAME: &'static str = $name;
        }
    };
}

impl_unisorted_entity!(FileAndLine, LineIndex, "line");
impl_unisorted_entity!(SpecializationForm, SpecFormIndex, "spec-form");
impl_unisorted_entity!(decl::ScopeExtent, ScopeIndex, "scope");

/// A partition key for [`Sequence`] element types that don't select a
/// partition by their own sort: they're stored in one of the shared "heap"
/// partitions named by [`crate::index::HeapSort`].
pub trait HeapElement {
    const HEAP: &'static str;
}

macro_rules! impl_heap_element {
    ($ty:ty, $heap:expr) => {
        impl HeapElement for $ty {
            const HEAP: &'static str = $heap;
        }
    };
}

impl_heap_element!(DeclIndex, "heap.decl");
impl_heap_element!(TypeIndex, "heap.type");
impl_heap_element!(ExprIndex, "heap.expr");
impl_heap_element!(StmtIndex, "heap.stmt");
impl_heap_element!(SyntaxIndex, "heap.syntax");
impl_heap_element!(ChartIndex, "heap.chart");
impl_heap_element!(FormIndex, "heap.form");
impl_heap_element!(AttrIndex, "heap.attr");
impl_heap_element!(DirIndex, "heap.dir");
impl_heap_element!(VendorIndex, "heap.vendor");
impl_heap_element!(WordIndex, "heap.word");
// No `HeapSort` variant names a text-offset heap; `StructuredBindingDir`'s
// `names: Sequence<TextOffset>` is the only field that needs one, so it
// gets a dedicated partition name rather than stretching the catalog.
impl_heap_element!(TextOffset, "heap.text");

// ---------------------------------------------------------------------
// The reader itself.
// ---------------------------------------------------------------------

/// Numeric value of a `LitIndex` entry: packed directly into the index for
/// `LiteralSort::Immediate`, or looked up in the integer/floating-point
/// partitions otherwise.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LiteralValue {
    Integer(i64),
    FloatingPoint(f64),
}

/// Decodes entities out of a validated container on demand.
///
/// Owns a decoded copy of the table of contents (one [`PartitionSummary`]
/// per partition name the file declares); everything else is read straight
/// out of the borrowed container's bytes, every time it's asked for.
pub struct Reader<'ifc> {
    container: InputIfc<'ifc>,
    partitions: HashMap<String, PartitionSummary>,
}

impl<'ifc> Reader<'ifc> {
    /// Builds the in-memory TOC, rejecting any partition name the catalog
    /// doesn't recognize (§4.2: `InvalidPartitionName` at TOC build time).
    /// `.msvc.code-analysis.`-prefixed names are the one documented
    /// exception and are accepted without a catalog entry.
    pub fn new(container: InputIfc<'ifc>) -> Result<Self, IfcError> {
        let mut partitions = HashMap::new();
        for summary in container.partition_summaries() {
            let name = container.get(summary.name).to_string();
            if !crate::catalog::is_known_partition_name(&name) {
                return Err(IfcError::InvalidPartitionName { name });
            }
            partitions.insert(name, summary);
        }
        Ok(Reader { container, partitions })
    }

    fn partition_named(&self, name: &str) -> Option<(PartitionSummary, &'ifc [u8])> {
        let summary = *self.partitions.get(name)?;
        Some((summary, self.container.view_partition_bytes(&summary)))
    }

    fn partition_for<S: SortFamily>(&self, sort: S) -> Option<(PartitionSummary, &'ifc [u8])> {
        self.partition_named(&sort.any().partition_name())
    }

    /// Look up the entity named by `index`, asserting that `index`'s sort
    /// tag matches `E::SORT` and that the entity fits wholly inside its
    /// partition. Both checks are programming errors on mismatch, per
    /// this crate's failure semantics: a caller that already obtained an
    /// `E`-typed index from the right place can't fail them.
    pub fn get<E: Entity>(&self, index: E::Index) -> E {
        assert_ifc(index.sort() == E::SORT, || {
            format!("Reader::get: index sort {:?} does not match entity sort {:?}", index.sort(), E::SORT)
        });
        let (summary, bytes) = self.partition_for(E::SORT).unwrap_or_else(|| {
            panic!("Reader::get: partition {:?} missing from container", E::SORT.any().partition_name())
        });
        let position = index.index().0 as usize;
        let start = position * E::SIZE;
        let end = start + E::SIZE;
        assert_ifc(end <= bytes.len(), || {
            format!(
                "Reader::get: entity at position {position} (size {}) overruns partition {:?} (cardinality {})",
                E::SIZE,
                E::SORT.any().partition_name(),
                summary.cardinality.0,
            )
        });
        E::decode(&bytes[start..end])
    }

    /// Like [`Reader::get`], but answers `None` instead of asserting when
    /// `index`'s sort tag doesn't match `E::SORT`.
    pub fn get_if<E: Entity>(&self, index: E::Index) -> Option<E> {
        if index.sort() != E::SORT {
            return None;
        }
        Some(self.get(index))
    }

    /// Every entity of sort `E::SORT`, decoded from the start of its
    /// partition.
    pub fn partition<E: Entity>(&self) -> Vec<E> {
        match self.partition_for(E::SORT) {
            Some((summary, bytes)) => (0..summary.cardinality.0 as usize)
                .map(|i| E::decode(&bytes[i * E::SIZE..(i + 1) * E::SIZE]))
                .collect(),
            None => Vec::new(),
        }
    }

    /// The subrange `[seq.start, seq.start + seq.cardinality)` of the heap
    /// partition backing `Sequence<T>` elements that are themselves
    /// abstract references (not full entity records): `Sequence<DeclIndex>`,
    /// `Sequence<ExprIndex>`, and so on.
    pub fn sequence<T: Decode + HeapElement>(&self, seq: Sequence<T>) -> Vec<T> {
        let (summary, bytes) = self
            .partition_named(T::HEAP)
            .unwrap_or_else(|| panic!("Reader::sequence: heap partition {} missing", T::HEAP));
        self.decode_range(seq, summary, bytes)
    }

    /// The subrange of an entity's own partition named by a `Sequence<E>`
    /// whose elements are full entity records, e.g. `EnumerationDecl`'s
    /// `Sequence<EnumeratorDecl>`.
    pub fn sequence_of<E: Entity>(&self, seq: Sequence<E>) -> Vec<E> {
        let (summary, bytes) = self
            .partition_for(E::SORT)
            .unwrap_or_else(|| panic!("Reader::sequence_of: partition {:?} missing", E::SORT.any().partition_name()));
        self.decode_range(seq, summary, bytes)
    }

    fn decode_range<T: Decode>(&self, seq: Sequence<T>, summary: PartitionSummary, bytes: &'ifc [u8]) -> Vec<T> {
        let start = seq.start.0 as usize;
        let count = seq.cardinality.as_usize();
        assert_ifc(start + count <= summary.cardinality.as_usize(), || {
            format!("Reader::sequence: range [{start}, {start_plus_count}) overruns partition (cardinality {card})",
                start_plus_count = start + count, card = summary.cardinality.0)
        });
        (start..start + count).map(|i| T::decode(&bytes[i * T::SIZE..(i + 1) * T::SIZE])).collect()
    }

    /// A NUL-terminated run of the global string table; `""` for a null
    /// offset.
    pub fn text(&self, offset: TextOffset) -> &'ifc str {
        self.container.get(offset)
    }

    /// A string literal's `(size, start)` row, looked up by its partition
    /// position regardless of its `StringSort` prefix tag.
    pub fn string_literal(&self, index: StringIndex) -> StringLiteral {
        self.get_unisorted_in_family(index)
    }

    /// `(file, line)` of a `LineIndex`, the global line table addressed by
    /// `SourceLocation::line`.
    pub fn line(&self, index: LineIndex) -> FileAndLine {
        self.get_unisorted(index)
    }

    /// The specialization form (primary template + arguments) a
    /// `SpecFormIndex` names.
    pub fn specialization_form(&self, index: SpecFormIndex) -> SpecializationForm {
        self.get_unisorted(index)
    }

    /// The literal value a `LitIndex` addresses: packed directly into the
    /// index for `LiteralSort::Immediate`, otherwise looked up in the
    /// integer or floating-point partition.
    pub fn literal(&self, index: LitIndex) -> LiteralValue {
        match index.sort() {
            LiteralSort::Immediate => LiteralValue::Integer(i64::from(index.index().0 as i32)),
            LiteralSort::Integer => {
                let (summary, bytes) = self.partition_for(LiteralSort::Integer).unwrap_or_else(|| {
                    panic!("Reader::literal: integer partition missing")
                });
                LiteralValue::Integer(self.decode_at::<i64>(index.index(), summary, bytes))
            }
            LiteralSort::FloatingPoint => {
                let (summary, bytes) = self.partition_for(LiteralSort::FloatingPoint).unwrap_or_else(|| {
                    panic!("Reader::literal: floating-point partition missing")
                });
                LiteralValue::FloatingPoint(self.decode_at::<f64>(index.index(), summary, bytes))
            }
            LiteralSort::Count => unreachable!("LiteralSort::Count is never a real literal sort"),
        }
    }

    /// The scope-extent row (member declarations) a non-null `ScopeIndex`
    /// addresses; `None` for the null scope.
    pub fn try_scope(&self, index: ScopeIndex) -> Option<decl::ScopeExtent> {
        if index.is_null() {
            return None;
        }
        Some(self.get_unisorted(index))
    }

    fn get_unisorted<E: UnisortedEntity<Index = I>, I: crate::index::Unisorted>(&self, index: I) -> E {
        let (summary, bytes) = self
            .partition_named(E::PARTITION_NAME)
            .unwrap_or_else(|| panic!("Reader: partition {} missing", E::PARTITION_NAME));
        let position = index.raw() as usize;
        assert_ifc(position < summary.cardinality.as_usize(), || {
            format!("Reader: position {position} overruns partition {} (cardinality {})", E::PARTITION_NAME, summary.cardinality.0)
        });
        E::decode(&bytes[position * E::SIZE..(position + 1) * E::SIZE])
    }

    fn get_unisorted_in_family<E: Decode>(&self, index: StringIndex) -> E {
        let (summary, bytes) = self
            .partition_for(index.sort())
            .unwrap_or_else(|| panic!("Reader: string partition missing for {:?}", index.sort()));
        let position = index.index().0 as usize;
        assert_ifc(position < summary.cardinality.as_usize(), || {
            format!("Reader: string position {position} overruns partition (cardinality {})", summary.cardinality.0)
        });
        E::decode(&bytes[position * E::SIZE..(position + 1) * E::SIZE])
    }

    fn decode_at<T: Decode>(&self, index: Index, summary: PartitionSummary, bytes: &'ifc [u8]) -> T {
        let position = index.0 as usize;
        assert_ifc(position < summary.cardinality.as_usize(), || {
            format!("Reader: literal position {position} overruns partition (cardinality {})", summary.cardinality.0)
        });
        T::decode(&bytes[position * T::SIZE..(position + 1) * T::SIZE])
    }

    /// Binary search a `(DeclIndex, V)` trait side-table for the row keyed
    /// by `entity`. One method per portable `TraitSort` variant, since each
    /// names a differently-typed row and Rust can't dispatch that
    /// generically over a single marker type the way the abstract
    /// `try_find<Trait>(key)` operation implies.
    pub fn find_mapping_expr(&self, entity: DeclIndex) -> Option<MappingExpr> {
        self.find_trait_row(TraitSort::MappingExpr, entity)
    }
    pub fn find_alias_template(&self, entity: DeclIndex) -> Option<AliasTemplate> {
        self.find_trait_row(TraitSort::AliasTemplate, entity)
    }
    pub fn find_friends(&self, entity: DeclIndex) -> Option<Friends> {
        self.find_trait_row(TraitSort::Friends, entity)
    }
    pub fn find_specializations(&self, entity: DeclIndex) -> Option<Specializations> {
        self.find_trait_row(TraitSort::Specializations, entity)
    }
    pub fn find_requires(&self, entity: DeclIndex) -> Option<Requires> {
        self.find_trait_row(TraitSort::Requires, entity)
    }
    pub fn find_deprecated(&self, entity: DeclIndex) -> Option<Deprecated> {
        self.find_trait_row(TraitSort::Deprecated, entity)
    }
    pub fn find_deduction_guides(&self, entity: DeclIndex) -> Option<DeductionGuides> {
        self.find_trait_row(TraitSort::DeductionGuides, entity)
    }
    pub fn find_attributes(&self, entity: SyntaxIndex) -> Option<Attributes> {
        self.find_trait_row(TraitSort::Attributes, entity)
    }

    fn find_trait_row<K, V>(&self, sort: TraitSort, entity: K) -> Option<crate::model::traits::AssociatedTrait<K, V>>
    where
        K: Decode + Ord + Copy,
        V: Decode + Copy,
    {
        let (summary, bytes) = self.partition_named(&AnySort::Trait(sort).partition_name())?;
        let rows: Vec<crate::model::traits::AssociatedTrait<K, V>> = (0..summary.cardinality.0 as usize)
            .map(|i| {
                let size = crate::model::traits::AssociatedTrait::<K, V>::SIZE;
                crate::model::traits::AssociatedTrait::<K, V>::decode(&bytes[i * size..(i + 1) * size])
            })
            .collect();
        crate::model::traits::AssociatedTrait::lower_bound(&rows, entity).copied()
    }

    /// The partition-relative position of an entity already obtained from
    /// this reader, recovered as the inverse of `get`'s decode: a byte
    /// offset isn't kept on `E` itself (it's `Copy`, not a borrow), so the
    /// caller re-supplies the index it used to fetch `entity` in the first
    /// place and this just validates it's self-consistent.
    pub fn index_of<E: Entity>(&self, index: E::Index) -> Index {
        assert_ifc(index.sort() == E::SORT, || {
            format!("Reader::index_of: index sort {:?} does not match entity sort {:?}", index.sort(), E::SORT)
        });
        index.index()
    }

    /// Dispatches to the sort-specific arm of `f` based on `index`'s tag.
    /// `VendorExtension` and the `Count` sentinel are programming errors
    /// here, not data to decode.
    pub fn visit_decl<R>(&self, index: DeclIndex, f: impl FnOnce(decl::Decl) -> R) -> Result<R, IfcError> {
        use DeclSort::*;
        let variant = match index.sort() {
            Function => decl::Decl::Function(self.get(index)),
            Method => decl::Decl::Method(self.get(index)),
            Constructor => decl::Decl::Constructor(self.get(index)),
            Destructor => decl::Decl::Destructor(self.get(index)),
            Enumerator => decl::Decl::Enumerator(self.get(index)),
            Variable => decl::Decl::Variable(self.get(index)),
            Parameter => decl::Decl::Parameter(self.get(index)),
            Field => decl::Decl::Field(self.get(index)),
            Bitfield => decl::Decl::Bitfield(self.get(index)),
            Scope => decl::Decl::Scope(self.get(index)),
            Enumeration => decl::Decl::Enumeration(self.get(index)),
            Alias => decl::Decl::Alias(self.get(index)),
            Template => decl::Decl::Template(self.get(index)),
            PartialSpecialization => decl::Decl::PartialSpecialization(self.get(index)),
            Specialization => decl::Decl::Specialization(self.get(index)),
            Concept => decl::Decl::Concept(self.get(index)),
            DeductionGuide => decl::Decl::DeductionGuide(self.get(index)),
            Using => decl::Decl::Using(self.get(index)),
            Friend => decl::Decl::Friend(self.get(index)),
            Expansion => decl::Decl::Expansion(self.get(index)),
            Barren => decl::Decl::Barren(self.get(index)),
            Tuple => decl::Decl::Tuple(self.get(index)),
            SyntaxTree => decl::Decl::SyntaxTree(self.get(index)),
            Intrinsic => decl::Decl::Intrinsic(self.get(index)),
            Property => decl::Decl::Property(self.get(index)),
            Segment => decl::Decl::Segment(self.get(index)),
            Reference => decl::Decl::Reference(self.get(index)),
            VendorExtension => return Err(IfcError::UnexpectedVisitor { category: "decl", sort: VendorExtension.into() }),
            Count => return Err(IfcError::UnexpectedVisitor { category: "decl", sort: Count.into() }),
        };
        Ok(f(variant))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::{Designator, InputIfc, ValidationOptions};
    use crate::index::UnitSort;

    fn build_file(
        extra_partitions: &[(&str, Vec<Vec<u8>>)],
        unit_path: &str,
    ) -> Vec<u8> {
        // Mirrors container::tests::build_file: signature, digest, header,
        // toc, string table, then each partition's raw bytes back to back.
        let mut strings = vec![0u8]; // offset 0 is the empty string
        let mut intern = |s: &str| -> u32 {
            let off = strings.len() as u32;
            strings.extend_from_slice(s.as_bytes());
            strings.push(0);
            off
        };
        let path_off = intern(unit_path);

        let mut toc_entries = Vec::new();
        let mut partition_bytes = Vec::new();
        for (name, rows) in extra_partitions {
            let name_off = intern(name);
            let cardinality = rows.len() as u32;
            let entry_size = rows.first().map(|r| r.len()).unwrap_or(0) as u32;
            toc_entries.push((name_off, entry_size, cardinality));
            for row in rows {
                partition_bytes.extend_from_slice(row);
            }
        }

        let mut header = Vec::new();
        header.push(0u8); // major
        header.push(44u8); // minor
        header.push(1u8); // abi: raw tag, opaque
        header.push(0u8); // arch: Unknown
        header.extend_from_slice(&0u32.to_le_bytes()); // cplusplus
        let string_table_bytes_placeholder = header.len();
        header.extend_from_slice(&0u32.to_le_bytes()); // string_table_bytes, patched below
        header.extend_from_slice(&(strings.len() as u32).to_le_bytes()); // string_table_size
        let unit = crate::index::UnitIndex::new(UnitSort::Primary, TextOffset(path_off));
        header.extend_from_slice(&unit.rep().to_le_bytes()); // unit
        header.extend_from_slice(&path_off.to_le_bytes()); // src_path
        header.extend_from_slice(&0u32.to_le_bytes()); // global_scope
        let toc_offset_placeholder = header.len();
        header.extend_from_slice(&0u32.to_le_bytes()); // toc, patched below
        header.extend_from_slice(&(toc_entries.len() as u32).to_le_bytes()); // partition_count
        header.push(0u8); // internal_partition

        // Layout: signature(4) + digest(32) + header + toc + string_table + payload.
        let toc_offset = 36 + header.len();
        let toc_size = toc_entries.len() * 16;
        let string_table_offset = toc_offset + toc_size;
        let partitions_offset = string_table_offset + strings.len();

        header[string_table_bytes_placeholder..string_table_bytes_placeholder + 4]
            .copy_from_slice(&(string_table_offset as u32).to_le_bytes());
        header[toc_offset_placeholder..toc_offset_placeholder + 4]
            .copy_from_slice(&(toc_offset as u32).to_le_bytes());

        let mut toc = Vec::new();
        let mut running_offset = partitions_offset as u32;
        for (name_off, entry_size, cardinality) in &toc_entries {
            toc.extend_from_slice(&name_off.to_le_bytes());
            toc.extend_from_slice(&running_offset.to_le_bytes());
            toc.extend_from_slice(&cardinality.to_le_bytes());
            toc.extend_from_slice(&entry_size.to_le_bytes());
            running_offset += entry_size * cardinality;
        }

        let mut signed_region = Vec::new();
        signed_region.extend_from_slice(&header);
        signed_region.extend_from_slice(&toc);
        signed_region.extend_from_slice(&strings);
        signed_region.extend_from_slice(&partition_bytes);

        let digest = crate::hash::Sha256Hasher::digest(&signed_region);

        let mut file = Vec::new();
        file.extend_from_slice(&crate::container::SIGNATURE);
        file.extend_from_slice(&digest);
        file.extend_from_slice(&signed_region);
        file
    }

    fn reader_for(extra_partitions: &[(&str, Vec<Vec<u8>>)]) -> Vec<u8> {
        build_file(extra_partitions, "/tmp/unit.cpp")
    }

    fn basic_spec_row() -> Vec<u8> {
        // FriendDecl: one ExprIndex (4 bytes).
        ExprIndex::make(ExprSort::NamedDecl, 3).rep().to_le_bytes().to_vec()
    }

    #[test]
    fn get_decodes_a_friend_decl_from_its_partition() {
        let row = basic_spec_row();
        let bytes = reader_for(&[("decl.friend", vec![row])]);
        let input = InputIfc::validate(
            &bytes,
            std::path::Path::new("/tmp/unit.cpp"),
            UnitSort::Primary,
            &Designator::ModuleName(String::new()),
            &ValidationOptions { allow_any_primary_interface: true, ..Default::default() },
        )
        .expect("valid container");
        let reader = Reader::new(input).expect("known partition names");

        let index = DeclIndex::make(DeclSort::Friend, 0);
        let friend: decl::FriendDecl = reader.get(index);
        assert_eq!(friend.reference.sort(), ExprSort::NamedDecl);
        assert_eq!(friend.reference.index(), Index(3));
    }

    #[test]
    fn get_if_rejects_sort_mismatch() {
        let bytes = reader_for(&[("decl.friend", vec![basic_spec_row()])]);
        let input = InputIfc::validate(
            &bytes,
            std::path::Path::new("/tmp/unit.cpp"),
            UnitSort::Primary,
            &Designator::ModuleName(String::new()),
            &ValidationOptions { allow_any_primary_interface: true, ..Default::default() },
        )
        .unwrap();
        let reader = Reader::new(input).expect("known partition names");

        let wrong_sort_index = DeclIndex::make(DeclSort::Barren, 0);
        let result: Option<decl::FriendDecl> = reader.get_if(wrong_sort_index);
        assert!(result.is_none());
    }

    #[test]
    #[should_panic]
    fn get_panics_on_out_of_range_position() {
        let bytes = reader_for(&[("decl.friend", vec![basic_spec_row()])]);
        let input = InputIfc::validate(
            &bytes,
            std::path::Path::new("/tmp/unit.cpp"),
            UnitSort::Primary,
            &Designator::ModuleName(String::new()),
            &ValidationOptions { allow_any_primary_interface: true, ..Default::default() },
        )
        .unwrap();
        let reader = Reader::new(input).expect("known partition names");

        let out_of_range = DeclIndex::make(DeclSort::Friend, 5);
        let _: decl::FriendDecl = reader.get(out_of_range);
    }

    #[test]
    fn partition_decodes_every_row_in_order() {
        let rows = vec![
            ExprIndex::make(ExprSort::NamedDecl, 1).rep().to_le_bytes().to_vec(),
            ExprIndex::make(ExprSort::NamedDecl, 2).rep().to_le_bytes().to_vec(),
        ];
        let bytes = reader_for(&[("decl.friend", rows)]);
        let input = InputIfc::validate(
            &bytes,
            std::path::Path::new("/tmp/unit.cpp"),
            UnitSort::Primary,
            &Designator::ModuleName(String::new()),
            &ValidationOptions { allow_any_primary_interface: true, ..Default::default() },
        )
        .unwrap();
        let reader = Reader::new(input).expect("known partition names");

        let all: Vec<decl::FriendDecl> = reader.partition::<decl::FriendDecl>();
        assert_eq!(all.len(), 2);
        assert_eq!(all[1].reference.index(), Index(2));
    }

    #[test]
    fn literal_immediate_is_packed_in_the_index() {
        let bytes = reader_for(&[]);
        let input = InputIfc::validate(
            &bytes,
            std::path::Path::new("/tmp/unit.cpp"),
            UnitSort::Primary,
            &Designator::ModuleName(String::new()),
            &ValidationOptions { allow_any_primary_interface: true, ..Default::default() },
        )
        .unwrap();
        let reader = Reader::new(input).expect("known partition names");

        let lit = LitIndex::make(LiteralSort::Immediate, 42);
        assert_eq!(reader.literal(lit), LiteralValue::Integer(42));
    }

    #[test]
    fn try_scope_is_none_for_the_null_scope() {
        let bytes = reader_for(&[]);
        let input = InputIfc::validate(
            &bytes,
            std::path::Path::new("/tmp/unit.cpp"),
            UnitSort::Primary,
            &Designator::ModuleName(String::new()),
            &ValidationOptions { allow_any_primary_interface: true, ..Default::default() },
        )
        .unwrap();
        let reader = Reader::new(input).expect("known partition names");

        assert!(reader.try_scope(ScopeIndex(0)).is_none());
    }

    #[test]
    fn visit_decl_dispatches_by_sort() {
        let bytes = reader_for(&[("decl.friend", vec![basic_spec_row()])]);
        let input = InputIfc::validate(
            &bytes,
            std::path::Path::new("/tmp/unit.cpp"),
            UnitSort::Primary,
            &Designator::ModuleName(String::new()),
            &ValidationOptions { allow_any_primary_interface: true, ..Default::default() },
        )
        .unwrap();
        let reader = Reader::new(input).expect("known partition names");

        let index = DeclIndex::make(DeclSort::Friend, 0);
        let matched = reader
            .visit_decl(index, |decl| matches!(decl, decl::Decl::Friend(_)))
            .unwrap();
        assert!(matched);
    }

    #[test]
    fn new_rejects_an_unrecognized_partition_name() {
        let bytes = reader_for(&[("not.a.real.partition", vec![vec![0u8; 4]])]);
        let input = InputIfc::validate(
            &bytes,
            std::path::Path::new("/tmp/unit.cpp"),
            UnitSort::Primary,
            &Designator::ModuleName(String::new()),
            &ValidationOptions { allow_any_primary_interface: true, ..Default::default() },
        )
        .unwrap();

        let err = Reader::new(input).unwrap_err();
        assert!(matches!(err, IfcError::InvalidPartitionName { name } if name == "not.a.real.partition"));
    }

    #[test]
    fn new_accepts_an_ignorable_vendor_code_analysis_partition() {
        let bytes = reader_for(&[(".msvc.code-analysis.foo", vec![vec![0u8; 4]])]);
        let input = InputIfc::validate(
            &bytes,
            std::path::Path::new("/tmp/unit.cpp"),
            UnitSort::Primary,
            &Designator::ModuleName(String::new()),
            &ValidationOptions { allow_any_primary_interface: true, ..Default::default() },
        )
        .unwrap();

        assert!(Reader::new(input).is_ok());
    }

    #[test]
    fn visit_decl_rejects_vendor_extension_as_a_fatal_sort() {
        let bytes = reader_for(&[]);
        let input = InputIfc::validate(
            &bytes,
            std::path::Path::new("/tmp/unit.cpp"),
            UnitSort::Primary,
            &Designator::ModuleName(String::new()),
            &ValidationOptions { allow_any_primary_interface: true, ..Default::default() },
        )
        .unwrap();
        let reader = Reader::new(input).expect("known partition names");

        let index = DeclIndex::make(DeclSort::VendorExtension, 0);
        let err = reader.visit_decl(index, |_| ()).unwrap_err();
        assert!(matches!(err, IfcError::UnexpectedVisitor { category: "decl", sort } if sort == DeclSort::VendorExtension.into()));
    }

    /// End-to-end scenario: a free function `void glb_void_void_func()`,
    /// exported, no home scope, no template chart, no traits -- `type`
    /// names a `FunctionType` over `Fundamental{Void, Default, Plain}` with
    /// a null `source`.
    #[test]
    fn free_void_to_void_function_has_no_scope_chart_or_traits_and_is_exported() {
        use crate::model::common::BASIC_SPEC_EXTERNAL;

        let mut function_row = Vec::new();
        function_row.extend_from_slice(&NameIndex::default().rep().to_le_bytes()); // identity.name
        function_row.extend_from_slice(&0i32.to_le_bytes()); // identity.locus.line
        function_row.extend_from_slice(&0i32.to_le_bytes()); // identity.locus.column
        function_row.extend_from_slice(&TypeIndex::make(TypeSort::Function, 0).rep().to_le_bytes()); // ty
        function_row.extend_from_slice(&DeclIndex::default().rep().to_le_bytes()); // home_scope
        function_row.extend_from_slice(&ChartIndex::default().rep().to_le_bytes()); // chart
        function_row.extend_from_slice(&0u16.to_le_bytes()); // traits: None
        function_row.push(BASIC_SPEC_EXTERNAL); // basic_spec: Cxx (unset C bit) + External
        function_row.push(0); // access: None
        function_row.push(0); // properties: none reachable

        let mut function_type_row = Vec::new();
        function_type_row.extend_from_slice(&TypeIndex::make(TypeSort::Fundamental, 0).rep().to_le_bytes()); // target
        function_type_row.extend_from_slice(&TypeIndex::default().rep().to_le_bytes()); // source: null
        function_type_row.extend_from_slice(&SentenceIndex::default().0.to_le_bytes()); // eh_spec.words
        function_type_row.push(0); // eh_spec.sort: None
        function_type_row.push(0); // convention: Cdecl
        function_type_row.push(0); // traits: none

        let fundamental_row = vec![0u8, 0u8, 0u8]; // basis: Void, precision: Default, sign: Plain

        let bytes = reader_for(&[
            ("decl.function", vec![function_row]),
            ("type.function", vec![function_type_row]),
            ("type.fundamental", vec![fundamental_row]),
        ]);
        let input = InputIfc::validate(
            &bytes,
            std::path::Path::new("/tmp/unit.cpp"),
            UnitSort::Primary,
            &Designator::ModuleName(String::new()),
            &ValidationOptions { allow_any_primary_interface: true, ..Default::default() },
        )
        .unwrap();
        let reader = Reader::new(input).expect("known partition names");

        let decl_index = DeclIndex::make(DeclSort::Function, 0);
        let func: decl::FunctionDecl = reader.get(decl_index);
        assert!(func.home_scope.is_null());
        assert!(func.chart.is_null());
        assert_eq!(func.traits, FunctionTraits::default());
        assert!(func.basic_spec.is_cxx());
        assert!(func.basic_spec.is_external());

        let func_type: types::FunctionType = reader.get(func.ty);
        assert!(func_type.source.is_null());
        let target: types::FundamentalType = reader.get(func_type.target);
        assert_eq!(target.basis, types::TypeBasis::Void);
        assert_eq!(target.precision, types::TypePrecision::Default);
        assert_eq!(target.sign, types::TypeSign::Plain);
    }
}
