//! Declaration entities: one record type per [`DeclSort`](crate::index::DeclSort)
//! variant, stored in the partition of that name.

use super::common::*;
use crate::index::{
    ChartIndex, DeclIndex, DeclSort, DirIndex, ExprIndex, NameIndex, Sequence, SentenceIndex,
    SpecFormIndex, SyntaxIndex, TypeIndex, VendorIndex,
};
use crate::primitives::TextOffset;
use serde::Serialize;

/// A free function, possibly a namespace-scope operator or conversion.
#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct FunctionDecl {
    pub identity: Identity<NameIndex>,
    pub ty: TypeIndex,
    pub home_scope: DeclIndex,
    pub chart: ChartIndex,
    pub traits: FunctionTraits,
    pub basic_spec: BasicSpecifiers,
    pub access: Access,
    pub properties: ReachableProperties,
}

/// A non-static member function.
#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct MethodDecl {
    pub identity: Identity<NameIndex>,
    pub ty: TypeIndex,
    pub home_scope: DeclIndex,
    pub chart: ChartIndex,
    pub traits: FunctionTraits,
    pub basic_spec: BasicSpecifiers,
    pub access: Access,
    pub properties: ReachableProperties,
}

#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct ConstructorDecl {
    pub identity: Identity<TextOffset>,
    pub ty: TypeIndex,
    pub home_scope: DeclIndex,
    pub chart: ChartIndex,
    pub traits: FunctionTraits,
    pub basic_spec: BasicSpecifiers,
    pub access: Access,
    pub properties: ReachableProperties,
}

#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct DestructorDecl {
    pub identity: Identity<TextOffset>,
    pub home_scope: DeclIndex,
    pub eh_spec: ExceptionSpecification,
    pub traits: FunctionTraits,
    pub basic_spec: BasicSpecifiers,
    pub access: Access,
    pub convention: CallingConvention,
    pub properties: ReachableProperties,
}

impl Default for CallingConvention {
    fn default() -> Self {
        CallingConvention::Cdecl
    }
}
impl Default for ExceptionSpecification {
    fn default() -> Self {
        ExceptionSpecification::None
    }
}
impl Default for ParameterSort {
    fn default() -> Self {
        ParameterSort::Object
    }
}
impl Default for SpecializationSort {
    fn default() -> Self {
        SpecializationSort::Implicit
    }
}
impl Default for NoexceptSort {
    fn default() -> Self {
        NoexceptSort::None
    }
}

#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct EnumeratorDecl {
    pub identity: Identity<TextOffset>,
    pub ty: TypeIndex,
    pub initializer: ExprIndex,
    pub basic_spec: BasicSpecifiers,
    pub access: Access,
}

#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct VariableDecl {
    pub identity: Identity<NameIndex>,
    pub ty: TypeIndex,
    pub home_scope: DeclIndex,
    pub initializer: ExprIndex,
    pub alignment: ExprIndex,
    pub obj_spec: ObjectTraits,
    pub basic_spec: BasicSpecifiers,
    pub access: Access,
    pub properties: ReachableProperties,
}

#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct ParameterDecl {
    pub identity: Identity<TextOffset>,
    pub ty: TypeIndex,
    pub type_constraint: ExprIndex,
    pub initializer: DefaultIndex,
    pub level: u32,
    pub position: u32,
    pub sort: ParameterSort,
    pub properties: ReachableProperties,
}

#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct FieldDecl {
    pub identity: Identity<TextOffset>,
    pub ty: TypeIndex,
    pub home_scope: DeclIndex,
    pub initializer: ExprIndex,
    pub alignment: ExprIndex,
    pub obj_spec: ObjectTraits,
    pub basic_spec: BasicSpecifiers,
    pub access: Access,
    pub properties: ReachableProperties,
}

#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct BitfieldDecl {
    pub identity: Identity<TextOffset>,
    pub ty: TypeIndex,
    pub home_scope: DeclIndex,
    pub width: ExprIndex,
    pub initializer: ExprIndex,
    pub obj_spec: ObjectTraits,
    pub basic_spec: BasicSpecifiers,
    pub access: Access,
    pub properties: ReachableProperties,
}

#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct ScopeDecl {
    pub identity: Identity<NameIndex>,
    pub ty: TypeIndex,
    pub base: TypeIndex,
    pub initializer: crate::index::ScopeIndex,
    pub home_scope: DeclIndex,
    pub alignment: ExprIndex,
    pub pack_size: PackSize,
    pub basic_spec: BasicSpecifiers,
    pub scope_spec: ScopeTraits,
    pub access: Access,
    pub properties: ReachableProperties,
}

#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct EnumerationDecl {
    pub identity: Identity<TextOffset>,
    pub ty: TypeIndex,
    pub base: TypeIndex,
    pub initializer: Sequence<EnumeratorDecl>,
    pub home_scope: DeclIndex,
    pub alignment: ExprIndex,
    pub basic_spec: BasicSpecifiers,
    pub access: Access,
    pub properties: ReachableProperties,
}

#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct AliasDecl {
    pub identity: Identity<TextOffset>,
    pub ty: TypeIndex,
    pub home_scope: DeclIndex,
    pub aliasee: TypeIndex,
    pub basic_spec: BasicSpecifiers,
    pub access: Access,
}

/// Shared core of `Template`, `PartialSpecialization` (both wrap this plus
/// their own tail fields, mirroring the original's mixin inheritance).
#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct TemplateCore {
    pub identity: Identity<NameIndex>,
    pub home_scope: DeclIndex,
    pub chart: ChartIndex,
}

#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct TemplateDecl {
    pub core: TemplateCore,
    pub ty: TypeIndex,
    pub basic_spec: BasicSpecifiers,
    pub access: Access,
    pub properties: ReachableProperties,
}

#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct PartialSpecializationDecl {
    pub core: TemplateCore,
    pub specialization_form: SpecFormIndex,
    pub basic_spec: BasicSpecifiers,
    pub access: Access,
    pub properties: ReachableProperties,
}

#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct SpecializationDecl {
    pub specialization_form: SpecFormIndex,
    pub decl: DeclIndex,
    pub sort: SpecializationSort,
    pub basic_spec: BasicSpecifiers,
    pub access: Access,
    pub properties: ReachableProperties,
}

#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct ConceptDecl {
    pub identity: Identity<TextOffset>,
    pub home_scope: DeclIndex,
    pub ty: TypeIndex,
    pub chart: ChartIndex,
    pub constraint: ExprIndex,
    pub basic_spec: BasicSpecifiers,
    pub access: Access,
    pub head: SentenceIndex,
    pub body: SentenceIndex,
}

#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct DeductionGuideDecl {
    pub identity: Identity<NameIndex>,
    pub home_scope: DeclIndex,
    pub source: ChartIndex,
    pub target: ExprIndex,
    pub traits: GuideTraits,
    pub basic_spec: BasicSpecifiers,
}

#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct IntrinsicDecl {
    pub identity: Identity<TextOffset>,
    pub ty: TypeIndex,
    pub home_scope: DeclIndex,
    pub basic_spec: BasicSpecifiers,
    pub access: Access,
    pub traits: FunctionTraits,
}

#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct PropertyDecl {
    pub data_member: DeclIndex,
    pub get_method_name: TextOffset,
    pub set_method_name: TextOffset,
}

#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct SegmentDecl {
    pub name: TextOffset,
    pub class_id: TextOffset,
}

#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct UsingDecl {
    pub identity: Identity<TextOffset>,
    pub home_scope: DeclIndex,
    pub resolution: DeclIndex,
    pub parent: ExprIndex,
    pub name: TextOffset,
    pub basic_spec: BasicSpecifiers,
    pub access: Access,
    pub is_hidden: bool,
}

#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct FriendDecl {
    pub reference: ExprIndex,
}

#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct ExpansionDecl {
    pub locus: SourceLocation,
    pub operand: DeclIndex,
}

#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct BarrenDecl {
    pub directive: DirIndex,
    pub basic_spec: BasicSpecifiers,
    pub access: Access,
}

#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct SyntacticDecl {
    pub tree: SyntaxIndex,
}

/// A reference to a declaration owned by another translation unit.
#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct ReferenceDecl {
    pub owner_module: TextOffset,
    pub owner_partition: TextOffset,
    pub local_index: DeclIndex,
}

/// A sequence of zero or more declaration indices, stored in the
/// `HeapSort::Decl` heap rather than its own dedicated partition.
#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct TupleDecl {
    pub elements: Sequence<DeclIndex>,
}

#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct VendorDecl {
    pub index: VendorIndex,
}

/// The member list of a named scope: a plain sequence of declaration
/// indices, stored in the scope partition and addressed by `ScopeIndex`
/// (distinct from [`ScopeDecl`], which is the *declaration* of the scope
/// entity itself).
#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct ScopeExtent {
    pub members: Sequence<DeclIndex>,
}

/// Dispatch target for [`crate::reader::Reader::visit`] over `DeclSort`.
/// `Count` and `VendorExtension` never appear as the argument to a
/// well-formed visit -- see `Reader::visit`.
#[derive(Debug, Clone, Copy)]
pub enum Decl {
    Function(FunctionDecl),
    Method(MethodDecl),
    Constructor(ConstructorDecl),
    Destructor(DestructorDecl),
    Enumerator(EnumeratorDecl),
    Variable(VariableDecl),
    Parameter(ParameterDecl),
    Field(FieldDecl),
    Bitfield(BitfieldDecl),
    Scope(ScopeDecl),
    Enumeration(EnumerationDecl),
    Alias(AliasDecl),
    Template(TemplateDecl),
    PartialSpecialization(PartialSpecializationDecl),
    Specialization(SpecializationDecl),
    Concept(ConceptDecl),
    DeductionGuide(DeductionGuideDecl),
    Intrinsic(IntrinsicDecl),
    Property(PropertyDecl),
    Segment(SegmentDecl),
    Using(UsingDecl),
    Friend(FriendDecl),
    Expansion(ExpansionDecl),
    Barren(BarrenDecl),
    SyntaxTree(SyntacticDecl),
    Reference(ReferenceDecl),
    Tuple(TupleDecl),
    VendorExtension(VendorDecl),
}

impl Decl {
    pub fn sort(&self) -> DeclSort {
        match self {
            Decl::Function(_) => DeclSort::Function,
            Decl::Method(_) => DeclSort::Method,
            Decl::Constructor(_) => DeclSort::Constructor,
            Decl::Destructor(_) => DeclSort::Destructor,
            Decl::Enumerator(_) => DeclSort::Enumerator,
            Decl::Variable(_) => DeclSort::Variable,
            Decl::Parameter(_) => DeclSort::Parameter,
            Decl::Field(_) => DeclSort::Field,
            Decl::Bitfield(_) => DeclSort::Bitfield,
            Decl::Scope(_) => DeclSort::Scope,
            Decl::Enumeration(_) => DeclSort::Enumeration,
            Decl::Alias(_) => DeclSort::Alias,
            Decl::Template(_) => DeclSort::Template,
            Decl::PartialSpecialization(_) => DeclSort::PartialSpecialization,
            Decl::Specialization(_) => DeclSort::Specialization,
            Decl::Concept(_) => DeclSort::Concept,
            Decl::DeductionGuide(_) => DeclSort::DeductionGuide,
            Decl::Intrinsic(_) => DeclSort::Intrinsic,
            Decl::Property(_) => DeclSort::Property,
            Decl::Segment(_) => DeclSort::Segment,
            Decl::Using(_) => DeclSort::Using,
            Decl::Friend(_) => DeclSort::Friend,
            Decl::Expansion(_) => DeclSort::Expansion,
            Decl::Barren(_) => DeclSort::Barren,
            Decl::SyntaxTree(_) => DeclSort::SyntaxTree,
            Decl::Reference(_) => DeclSort::Reference,
            Decl::Tuple(_) => DeclSort::Tuple,
            Decl::VendorExtension(_) => DeclSort::VendorExtension,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn function_decl_defaults_are_null_and_empty() {
        let f = FunctionDecl::default();
        assert!(f.home_scope.is_null());
        assert!(f.chart.is_null());
        assert_eq!(f.basic_spec.into_raw(), 0);
    }

    #[test]
    fn default_index_round_trips_through_named_decl_expr() {
        let expr = ExprIndex::make(crate::index::ExprSort::NamedDecl, 3);
        let wrapped = DefaultIndex::from_expr_index(expr);
        assert_eq!(wrapped.as_expr_index(), Some(expr));
        assert_eq!(DefaultIndex::default().as_expr_index(), None);
    }
}
