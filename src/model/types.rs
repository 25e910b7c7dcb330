//! Type entity records, one struct per [`TypeSort`] variant, plus the
//! [`Type`] visitor-dispatch enum that mirrors [`crate::model::decl::Decl`].

use super::common::{
    CallingConvention, FunctionTypeTraits, NoexceptSpecification, Qualifier,
};
use crate::index::{ChartIndex, ExprIndex, Sequence, SyntaxIndex, TypeIndex, VendorIndex};
use num_enum::{IntoPrimitive, TryFromPrimitive};
use serde::Serialize;

/// Core basis of a fundamental type, independent of precision and sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum TypeBasis {
    Void,
    Bool,
    Char,
    WcharT,
    Int,
    Float,
    Double,
    Nullptr,
    Ellipsis,
    SegmentType,
    Class,
    Struct,
    Union,
    Enum,
    Typename,
    Namespace,
    Interface,
    Function,
    Empty,
    VariableTemplate,
    Concept,
    Auto,
    DecltypeAuto,
    Overload,
}

impl Default for TypeBasis {
    fn default() -> Self {
        TypeBasis::Void
    }
}

/// Bit-width modifier applied to a [`TypeBasis`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum TypePrecision {
    Default,
    Short,
    Long,
    Bit8,
    Bit16,
    Bit32,
    Bit64,
    Bit128,
}

impl Default for TypePrecision {
    fn default() -> Self {
        TypePrecision::Default
    }
}

/// Signed-ness of a fundamental type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum TypeSign {
    Plain,
    Signed,
    Unsigned,
}

impl Default for TypeSign {
    fn default() -> Self {
        TypeSign::Plain
    }
}

/// Whether a pack or template-id expansion is fully or partially expanded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum ExpansionMode {
    Full,
    Partial,
}

impl Default for ExpansionMode {
    fn default() -> Self {
        ExpansionMode::Full
    }
}

/// Extra semantics on a base class in an inheritance list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum BaseClassTraits {
    None,
    Shared,
    Expanded,
}

impl Default for BaseClassTraits {
    fn default() -> Self {
        BaseClassTraits::None
    }
}

/// Standard fundamental types, represented as a signed variation of a core
/// basis with a bit-width modifier.
#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct FundamentalType {
    pub basis: TypeBasis,
    pub precision: TypePrecision,
    pub sign: TypeSign,
}

/// Designation of a type by a declared name (class, enum, alias, ...).
#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct DesignatedType {
    pub decl: crate::index::DeclIndex,
}

/// Parameter-type sequence plus exception and calling-convention of a
/// constructor or destructor, factored out as its own type so multiple
/// declarations can share one.
#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct TorType {
    pub source: TypeIndex,
    pub eh_spec: NoexceptSpecification,
    pub convention: CallingConvention,
}

/// A type expressed only in parse-tree (syntactic) form, not yet elaborated.
#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct SyntacticType {
    pub expr: ExprIndex,
}

/// Type-id expansion involving a template parameter pack.
#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct ExpansionType {
    pub pack: TypeIndex,
    pub mode: ExpansionMode,
}

#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct PointerType {
    pub pointee: TypeIndex,
}

#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct PointerToMemberType {
    /// The enclosing class.
    pub scope: TypeIndex,
    /// Type of the pointed-to member.
    pub ty: TypeIndex,
}

#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct LvalueReferenceType {
    pub referee: TypeIndex,
}

#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct RvalueReferenceType {
    pub referee: TypeIndex,
}

/// `__unaligned` qualification, an MSVC extension.
#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct UnalignedType {
    pub operand: TypeIndex,
}

#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct DecltypeType {
    pub expression: SyntaxIndex,
}

/// `auto` or `decltype(auto)`, optionally constrained and/or already
/// deduced.
#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct PlaceholderType {
    /// Null means no constraint.
    pub constraint: ExprIndex,
    pub basis: TypeBasis,
    /// The type this placeholder was deduced to, if any.
    pub elaboration: TypeIndex,
}

/// A sequence of zero or more types: a generalized type used to describe
/// parameter lists and other disparate type notions.
#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct TupleType {
    pub elements: Sequence<TypeIndex>,
}

/// A universally quantified type, e.g. the type `forall(T: typename). T*`
/// of a variable template.
#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct ForallType {
    pub chart: ChartIndex,
    pub subject: TypeIndex,
}

#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct FunctionType {
    pub target: TypeIndex,
    pub source: TypeIndex,
    pub eh_spec: NoexceptSpecification,
    pub convention: CallingConvention,
    pub traits: FunctionTypeTraits,
}

/// Non-static member function type: a [`FunctionType`] plus the enclosing
/// class.
#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct MethodType {
    pub target: TypeIndex,
    pub source: TypeIndex,
    pub class_type: TypeIndex,
    pub eh_spec: NoexceptSpecification,
    pub convention: CallingConvention,
    pub traits: FunctionTypeTraits,
}

#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct ArrayType {
    pub element: TypeIndex,
    /// Number of elements; null when the bound is unspecified (`T[]`).
    pub bound: ExprIndex,
}

#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct QualifiedType {
    pub unqualified_type: TypeIndex,
    pub qualifiers: Qualifier,
}

/// An unresolved type name (`typename T::type`, a dependent qualified-id).
#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct TypenameType {
    pub path: ExprIndex,
}

/// A base-type entry in a class's inheritance list.
#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct BaseType {
    /// The base type itself, without cv/inheritance specifiers.
    pub ty: TypeIndex,
    pub access: super::common::Access,
    pub traits: BaseClassTraits,
}

/// Type-id expressed in parse-tree form.
#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct SyntaxTreeType {
    pub syntax: SyntaxIndex,
}

/// Vendor extension carried as an opaque payload outside the portable type
/// sorts.
#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct VendorType {
    pub index: VendorIndex,
}

/// Any type entity, tagged by its [`crate::index::TypeSort`].
#[derive(Debug, Clone, Copy, Serialize)]
pub enum Type {
    VendorExtension(VendorType),
    Fundamental(FundamentalType),
    Designated(DesignatedType),
    Tor(TorType),
    Syntactic(SyntacticType),
    Expansion(ExpansionType),
    Pointer(PointerType),
    PointerToMember(PointerToMemberType),
    LvalueReference(LvalueReferenceType),
    RvalueReference(RvalueReferenceType),
    Function(FunctionType),
    Method(MethodType),
    Array(ArrayType),
    Typename(TypenameType),
    Qualified(QualifiedType),
    Base(BaseType),
    Decltype(DecltypeType),
    Placeholder(PlaceholderType),
    Tuple(TupleType),
    Forall(ForallType),
    Unaligned(UnalignedType),
    SyntaxTree(SyntaxTreeType),
}

impl Type {
    pub fn sort(&self) -> crate::index::TypeSort {
        use crate::index::TypeSort;
        match self {
            Type::VendorExtension(_) => TypeSort::VendorExtension,
            Type::Fundamental(_) => TypeSort::Fundamental,
            Type::Designated(_) => TypeSort::Designated,
            Type::Tor(_) => TypeSort::Tor,
            Type::Syntactic(_) => TypeSort::Syntactic,
            Type::Expansion(_) => TypeSort::Expansion,
            Type::Pointer(_) => TypeSort::Pointer,
            Type::PointerToMember(_) => TypeSort::PointerToMember,
            Type::LvalueReference(_) => TypeSort::LvalueReference,
            Type::RvalueReference(_) => TypeSort::RvalueReference,
            Type::Function(_) => TypeSort::Function,
            Type::Method(_) => TypeSort::Method,
            Type::Array(_) => TypeSort::Array,
            Type::Typename(_) => TypeSort::Typename,
            Type::Qualified(_) => TypeSort::Qualified,
            Type::Base(_) => TypeSort::Base,
            Type::Decltype(_) => TypeSort::Decltype,
            Type::Placeholder(_) => TypeSort::Placeholder,
            Type::Tuple(_) => TypeSort::Tuple,
            Type::Forall(_) => TypeSort::Forall,
            Type::Unaligned(_) => TypeSort::Unaligned,
            Type::SyntaxTree(_) => TypeSort::SyntaxTree,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fundamental_type_default_is_void() {
        let ty = FundamentalType::default();
        assert_eq!(ty.basis, TypeBasis::Void);
        assert_eq!(ty.precision, TypePrecision::Default);
        assert_eq!(ty.sign, TypeSign::Plain);
    }

    #[test]
    fn qualified_type_reports_its_own_sort() {
        let ty = Type::Qualified(QualifiedType::default());
        assert_eq!(ty.sort(), crate::index::TypeSort::Qualified);
    }

    #[test]
    fn qualifier_flags_combine() {
        let q = Qualifier::from_raw(
            crate::model::common::QUALIFIER_CONST | crate::model::common::QUALIFIER_VOLATILE,
        )
        .unwrap();
        assert!(q.is_const());
        assert!(q.is_volatile());
        assert!(!q.is_restrict());
    }
}
