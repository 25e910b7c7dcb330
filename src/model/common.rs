//! Field types shared across declaration, type, expression and statement
//! records: source locations, specifier flag-sets, access and calling
//! conventions. Grouped here instead of duplicated per record, matching how
//! the format itself factors them out of each entity.

use crate::index::{ChartIndex, ExprIndex, LineIndex, NameIndex, SentenceIndex, StmtIndex};
use crate::primitives::ColumnNumber;
use crate::{flags_to_struct, index::pointed};
use num_enum::{IntoPrimitive, TryFromPrimitive};
use serde::Serialize;

/// Where an entity was written in source: a line-table reference plus a
/// column. Types never carry one; most declarations, expressions and
/// statements do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
pub struct SourceLocation {
    pub line: LineIndex,
    pub column: ColumnNumber,
}

/// `(name, locus)` pair shared by every declaration record, parameterized
/// over whether the name is a full `NameIndex` or a plain `TextOffset`
/// (simple identifiers don't need the richer name algebra).
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Identity<T> {
    pub name: T,
    pub locus: SourceLocation,
}

impl<T: Default> Default for Identity<T> {
    fn default() -> Self {
        Identity {
            name: T::default(),
            locus: SourceLocation::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum Access {
    None,
    Private,
    Protected,
    Public,
}

impl Default for Access {
    fn default() -> Self {
        Access::None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum CallingConvention {
    Cdecl,
    Fast,
    Std,
    This,
    Clr,
    Vector,
    Eabi,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum ExceptionSpecification {
    None,
    NonNoexcept,
    Noexcept,
    Conditional,
    Empty,
    ExplicitList,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum NoexceptSort {
    None,
    False,
    True,
    Expression,
    InferredSpecialMember,
    Unenforced,
}

/// Noexcept-specification of a function or method type: `sort` names the
/// shape (`noexcept`, `noexcept(expr)`, inferred, ...), `words` points at the
/// tokenized operand when `sort` is `Expression`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
pub struct NoexceptSpecification {
    pub words: SentenceIndex,
    pub sort: NoexceptSort,
}

flags_to_struct!(
    FunctionTypeTraits,
    u8,
    FN_TYPE_TRAIT_CONST is_const "'void (int) const'",
    FN_TYPE_TRAIT_VOLATILE is_volatile "'void (int) volatile'",
    FN_TYPE_TRAIT_LVALUE is_lvalue "'void (int) &'",
    FN_TYPE_TRAIT_RVALUE is_rvalue "'void (int) &&'",
);
pub const FN_TYPE_TRAIT_CONST: u8 = 1 << 0;
pub const FN_TYPE_TRAIT_VOLATILE: u8 = 1 << 1;
pub const FN_TYPE_TRAIT_LVALUE: u8 = 1 << 2;
pub const FN_TYPE_TRAIT_RVALUE: u8 = 1 << 3;

flags_to_struct!(
    Qualifier,
    u8,
    QUALIFIER_CONST is_const "'const' qualifier",
    QUALIFIER_VOLATILE is_volatile "'volatile' qualifier",
    QUALIFIER_RESTRICT is_restrict "'restrict' qualifier, C extension",
);
pub const QUALIFIER_CONST: u8 = 1 << 0;
pub const QUALIFIER_VOLATILE: u8 = 1 << 1;
pub const QUALIFIER_RESTRICT: u8 = 1 << 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum ParameterSort {
    Object,
    Type,
    NonType,
    TemplateTemplate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum SpecializationSort {
    Implicit,
    Explicit,
    Instantiation,
}

flags_to_struct!(
    BasicSpecifiers,
    u8,
    BASIC_SPEC_C C_LINKAGE "\"extern \\\"C\\\"\" language linkage",
    BASIC_SPEC_INTERNAL is_internal "exported entity forced to internal linkage",
    BASIC_SPEC_VAGUE is_vague_linkage "vague (COMDAT-style) linkage",
    BASIC_SPEC_EXTERNAL is_external "external linkage",
    BASIC_SPEC_DEPRECATED is_deprecated "[[deprecated]]",
    BASIC_SPEC_INITIALIZED_IN_CLASS is_initialized_in_class "has an in-class initializer",
    BASIC_SPEC_NON_EXPORTED is_non_exported "not explicitly exported from its module",
    BASIC_SPEC_GLOBAL_MODULE_MEMBER is_global_module_member "member of the global module",
);
pub const BASIC_SPEC_C: u8 = 1 << 0;
pub const BASIC_SPEC_INTERNAL: u8 = 1 << 1;
pub const BASIC_SPEC_VAGUE: u8 = 1 << 2;
pub const BASIC_SPEC_EXTERNAL: u8 = 1 << 3;
pub const BASIC_SPEC_DEPRECATED: u8 = 1 << 4;
pub const BASIC_SPEC_INITIALIZED_IN_CLASS: u8 = 1 << 5;
pub const BASIC_SPEC_NON_EXPORTED: u8 = 1 << 6;
pub const BASIC_SPEC_GLOBAL_MODULE_MEMBER: u8 = 1 << 7;

impl BasicSpecifiers {
    pub fn is_cxx(&self) -> bool {
        self.into_raw() & BASIC_SPEC_C == 0
    }
}

macro_rules! impl_flags_default {
    ($($name:ident),+ $(,)?) => {
        $(
            impl Default for $name {
                fn default() -> Self {
                    $name::from_raw(0).expect("zero is always a valid flag set")
                }
            }
        )+
    };
}

flags_to_struct!(
    ReachableProperties,
    u8,
    REACHABLE_INITIALIZER has_initializer "the initializer is exported",
    REACHABLE_DEFAULT_ARGUMENTS has_default_arguments "default arguments are exported",
    REACHABLE_ATTRIBUTES has_attributes "attributes are exported",
);
pub const REACHABLE_INITIALIZER: u8 = 1 << 0;
pub const REACHABLE_DEFAULT_ARGUMENTS: u8 = 1 << 1;
pub const REACHABLE_ATTRIBUTES: u8 = 1 << 2;

flags_to_struct!(
    FunctionTraits,
    u16,
    FN_TRAIT_INLINE is_inline "inline",
    FN_TRAIT_CONSTEXPR is_constexpr "constexpr",
    FN_TRAIT_EXPLICIT is_explicit "explicit conversion function",
    FN_TRAIT_VIRTUAL is_virtual "virtual",
    FN_TRAIT_NORETURN is_noreturn "[[noreturn]]",
    FN_TRAIT_PURE_VIRTUAL is_pure_virtual "pure virtual ('= 0')",
    FN_TRAIT_HIDDEN_FRIEND is_hidden_friend "hidden friend",
    FN_TRAIT_DEFAULTED is_defaulted "'= default'",
    FN_TRAIT_DELETED is_deleted "'= delete'",
    FN_TRAIT_CONSTRAINED is_constrained "has a constraint expression",
    FN_TRAIT_IMMEDIATE is_immediate "consteval / immediate function",
    FN_TRAIT_FINAL is_final "marked 'final'",
    FN_TRAIT_OVERRIDE is_override "marked 'override'",
    FN_TRAIT_EXPLICIT_OBJECT_PARAMETER has_explicit_object_parameter "explicit object parameter",
    FN_TRAIT_VENDOR has_vendor_traits "extended vendor-specific traits present",
);
pub const FN_TRAIT_INLINE: u16 = 1 << 0;
pub const FN_TRAIT_CONSTEXPR: u16 = 1 << 1;
pub const FN_TRAIT_EXPLICIT: u16 = 1 << 2;
pub const FN_TRAIT_VIRTUAL: u16 = 1 << 3;
pub const FN_TRAIT_NORETURN: u16 = 1 << 4;
pub const FN_TRAIT_PURE_VIRTUAL: u16 = 1 << 5;
pub const FN_TRAIT_HIDDEN_FRIEND: u16 = 1 << 6;
pub const FN_TRAIT_DEFAULTED: u16 = 1 << 7;
pub const FN_TRAIT_DELETED: u16 = 1 << 8;
pub const FN_TRAIT_CONSTRAINED: u16 = 1 << 9;
pub const FN_TRAIT_IMMEDIATE: u16 = 1 << 10;
pub const FN_TRAIT_FINAL: u16 = 1 << 11;
pub const FN_TRAIT_OVERRIDE: u16 = 1 << 12;
pub const FN_TRAIT_EXPLICIT_OBJECT_PARAMETER: u16 = 1 << 13;
pub const FN_TRAIT_VENDOR: u16 = 1 << 15;

flags_to_struct!(
    ObjectTraits,
    u8,
    OBJ_TRAIT_CONSTEXPR is_constexpr "constexpr object",
    OBJ_TRAIT_MUTABLE is_mutable "mutable object",
    OBJ_TRAIT_THREAD_LOCAL is_thread_local "thread_local storage",
    OBJ_TRAIT_INLINE is_inline "inline object",
    OBJ_TRAIT_INITIALIZER_EXPORTED has_exported_initializer "initializer exported",
    OBJ_TRAIT_NO_UNIQUE_ADDRESS is_no_unique_address "[[no_unique_address]]",
    OBJ_TRAIT_VENDOR has_vendor_traits "extended vendor-specific traits present",
);
pub const OBJ_TRAIT_CONSTEXPR: u8 = 1 << 0;
pub const OBJ_TRAIT_MUTABLE: u8 = 1 << 1;
pub const OBJ_TRAIT_THREAD_LOCAL: u8 = 1 << 2;
pub const OBJ_TRAIT_INLINE: u8 = 1 << 3;
pub const OBJ_TRAIT_INITIALIZER_EXPORTED: u8 = 1 << 4;
pub const OBJ_TRAIT_NO_UNIQUE_ADDRESS: u8 = 1 << 5;
pub const OBJ_TRAIT_VENDOR: u8 = 1 << 7;

flags_to_struct!(
    ScopeTraits,
    u8,
    SCOPE_TRAIT_UNNAMED is_unnamed "unnamed namespace or class",
    SCOPE_TRAIT_INLINE is_inline "inline namespace",
    SCOPE_TRAIT_INITIALIZER_EXPORTED has_exported_initializer "initializer exported",
    SCOPE_TRAIT_CLOSURE_TYPE is_closure_type "lambda closure type",
    SCOPE_TRAIT_FINAL is_final "class marked 'final'",
    SCOPE_TRAIT_VENDOR has_vendor_traits "extended vendor-specific traits present",
);
pub const SCOPE_TRAIT_UNNAMED: u8 = 1 << 0;
pub const SCOPE_TRAIT_INLINE: u8 = 1 << 1;
pub const SCOPE_TRAIT_INITIALIZER_EXPORTED: u8 = 1 << 2;
pub const SCOPE_TRAIT_CLOSURE_TYPE: u8 = 1 << 3;
pub const SCOPE_TRAIT_FINAL: u8 = 1 << 4;
pub const SCOPE_TRAIT_VENDOR: u8 = 1 << 7;

flags_to_struct!(
    GuideTraits,
    u8,
    GUIDE_TRAIT_EXPLICIT is_explicit "deduction guide declared 'explicit'",
);
pub const GUIDE_TRAIT_EXPLICIT: u8 = 1 << 0;

/// MSVC `__declspec`/`[[msvc::...]]` vendor attributes, carried as a
/// `MsvcTraitSort::Vendor` side-table entry rather than a portable trait.
flags_to_struct!(
    VendorTraits,
    u32,
    VENDOR_TRAIT_FORCE_INLINE is_force_inline "__forceinline",
    VENDOR_TRAIT_NAKED is_naked "__declspec(naked)",
    VENDOR_TRAIT_NOALIAS is_noalias "__declspec(noalias)",
    VENDOR_TRAIT_NOINLINE is_noinline "__declspec(noinline)",
    VENDOR_TRAIT_RESTRICT is_restrict "__declspec(restrict)",
    VENDOR_TRAIT_SAFEBUFFERS is_safebuffers "__declspec(safebuffers)",
    VENDOR_TRAIT_DLLEXPORT is_dllexport "__declspec(dllexport)",
    VENDOR_TRAIT_DLLIMPORT is_dllimport "__declspec(dllimport)",
    VENDOR_TRAIT_CODE_SEGMENT has_code_segment "__declspec(code_seg(...))",
    VENDOR_TRAIT_NOVTABLE is_novtable "__declspec(novtable)",
    VENDOR_TRAIT_SELECTANY is_selectany "__declspec(selectany)",
    VENDOR_TRAIT_UUID has_uuid "__declspec(uuid(...))",
);
pub const VENDOR_TRAIT_FORCE_INLINE: u32 = 1 << 0;
pub const VENDOR_TRAIT_NAKED: u32 = 1 << 1;
pub const VENDOR_TRAIT_NOALIAS: u32 = 1 << 2;
pub const VENDOR_TRAIT_NOINLINE: u32 = 1 << 3;
pub const VENDOR_TRAIT_RESTRICT: u32 = 1 << 4;
pub const VENDOR_TRAIT_SAFEBUFFERS: u32 = 1 << 5;
pub const VENDOR_TRAIT_DLLEXPORT: u32 = 1 << 6;
pub const VENDOR_TRAIT_DLLIMPORT: u32 = 1 << 7;
pub const VENDOR_TRAIT_CODE_SEGMENT: u32 = 1 << 8;
pub const VENDOR_TRAIT_NOVTABLE: u32 = 1 << 9;
pub const VENDOR_TRAIT_SELECTANY: u32 = 1 << 14;
pub const VENDOR_TRAIT_UUID: u32 = 1 << 16;

/// `#pragma pack` value in effect for a scope; `0` means unspecified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
pub struct PackSize(pub u16);

/// A function parameter's default argument, when present. Its payload is
/// always an `ExprIndex` of `ExprSort::NamedDecl` pointing at the parameter's
/// synthesized `DefaultArgumentDecl`; nullable via `pointed<T>` rather than
/// carrying a separate null flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
pub struct DefaultIndex(pub u32);

impl crate::index::Unisorted for DefaultIndex {
    fn from_raw(raw: u32) -> Self {
        DefaultIndex(raw)
    }
    fn raw(self) -> u32 {
        self.0
    }
}

impl DefaultIndex {
    pub fn as_expr_index(self) -> Option<ExprIndex> {
        if pointed::is_null(self) {
            return None;
        }
        let position = pointed::retract(self);
        Some(ExprIndex::make(crate::index::ExprSort::NamedDecl, position))
    }

    pub fn from_expr_index(index: ExprIndex) -> Self {
        if index.is_null() {
            return DefaultIndex(0);
        }
        crate::error::assert_ifc(
            index.sort() == crate::index::ExprSort::NamedDecl,
            || "DefaultIndex can only wrap a NamedDecl expression".to_string(),
        );
        pointed::inject(index.index().0)
    }
}

/// Parameters + initializers + body of a definition, stored in the traits
/// partition keyed by the declaration it defines.
#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct MappingDefinition {
    pub parameters: ChartIndex,
    pub initializers: ExprIndex,
    pub body: StmtIndex,
}

/// One row of the global source-line table addressed by `LineIndex`: the
/// file a `SourceLocation::line` actually belongs to, since the location
/// itself only carries the line number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
pub struct FileAndLine {
    pub file: crate::primitives::TextOffset,
    pub line: crate::primitives::LineNumber,
}

/// One row of the string-literal table addressed by `StringIndex`. The
/// index's own sort tag (`StringSort`) carries the prefix (`u8`, `u8"`,
/// `L"`, ...); this row carries the literal's text and length, since C++
/// string literals may embed NUL bytes the global string table's
/// NUL-terminated convention can't represent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
pub struct StringLiteral {
    pub size: crate::primitives::Cardinality,
    pub start: crate::primitives::TextOffset,
}

/// One row of the specialization-form table addressed by `SpecFormIndex`:
/// the primary template and argument list a `SpecializationDecl` or
/// `SpecializationName` names.
#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct SpecializationForm {
    pub primary_template: crate::index::DeclIndex,
    pub arguments: crate::index::Sequence<ExprIndex>,
}

impl_flags_default!(
    BasicSpecifiers,
    ReachableProperties,
    FunctionTraits,
    ObjectTraits,
    ScopeTraits,
    GuideTraits,
    FunctionTypeTraits,
    Qualifier,
    VendorTraits,
);

pub use NameIndex as EntityName;
