//! The abstract-reference algebra: tagged 32-bit indices that address
//! entries inside partitions. Every edge in the abstract semantics graph
//! (a declaration's type, an expression's operand, a statement's next
//! sibling, ...) is one of these.
//!
//! Two families exist:
//!
//! - **Unisorted** indices (`LineIndex`, `WordIndex`, ...) are a bare `u32`
//!   position into a single, implicitly-known partition.
//! - **Multi-sorted** indices (`DeclIndex`, `TypeIndex`, ...) pack a *sort
//!   tag* into the low bits and a partition-relative position into the high
//!   bits, so a single 32-bit value identifies both the entity's kind and
//!   its location. [`bit_length`](crate::primitives::bit_length) of the
//!   sort's `Count` sentinel gives the tag width.
//!
//! `rep`/`per` are the representational round-trip: converting to and from
//! the raw `u32` word is the identity, by construction.

use crate::primitives::bit_length;
use num_enum::{IntoPrimitive, TryFromPrimitive};
use serde::Serialize;

/// Generic 32-bit representation shared by every index-like type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Default)]
pub struct Index(pub u32);

impl Index {
    pub const NULL: Index = Index(0);

    pub fn is_null(self) -> bool {
        self.0 == 0
    }
}

/// A sort enumeration used as the tag of a multi-sorted index.
///
/// Every implementor must declare its last variant as `Count`, used purely
/// as a sentinel to size the tag: `COUNT` is the ordinal of that variant.
pub trait Sort:
    Copy + Eq + std::fmt::Debug + Into<u8> + TryFrom<u8> + 'static
{
    const COUNT: u8;
}

/// Number of bits needed for the sort tag of `S`.
pub const fn tag_precision<S: SortCount>() -> u32 {
    if S::COUNT_U32 == 0 {
        0
    } else {
        bit_length(S::COUNT_U32 - 1)
    }
}

/// Number of bits left over for the position value of an index over `S`.
pub const fn index_precision<S: SortCount>() -> u32 {
    32 - tag_precision::<S>()
}

/// Helper trait that exposes `Sort::COUNT` as a `u32` so it can be used in
/// `const fn` arithmetic above (associated consts of different integer
/// widths don't unify otherwise).
pub trait SortCount {
    const COUNT_U32: u32;
}

impl<S: Sort> SortCount for S {
    const COUNT_U32: u32 = S::COUNT as u32;
}

/// Declares a sort enumeration. The final variant must be named `Count` and
/// is never produced by a well-formed file; seeing it (or failing to decode
/// a tag at all) is a programming error at the call site, not a recoverable
/// one (see `Reader::visit`).
macro_rules! define_sort {
    ($(#[$meta:meta])* $name:ident { $($(#[$vmeta:meta])* $variant:ident),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, TryFromPrimitive, IntoPrimitive)]
        #[repr(u8)]
        pub enum $name {
            $($(#[$vmeta])* $variant),+
        }

        impl Sort for $name {
            const COUNT: u8 = $name::Count as u8;
        }
    };
}

/// Declares a multi-sorted index type packing a tag of sort `$sort` into its
/// low bits and a partition position into its high bits.
macro_rules! define_multisorted_index {
    ($(#[$meta:meta])* $name:ident over $sort:ty) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Serialize)]
        pub struct $name(u32);

        impl $name {
            /// Construct an index of the given `sort` pointing at `position`
            /// within that sort's partition.
            ///
            /// Panics if `position` does not fit in the bits left over after
            /// the sort tag (a corrupt caller, not a malformed file: callers
            /// get `position` from a `Cardinality` they already bounds-checked).
            pub fn make(sort: $sort, position: u32) -> Self {
                let tag_bits = tag_precision::<$sort>();
                let idx_bits = index_precision::<$sort>();
                assert!(
                    idx_bits >= 32 || bit_length(position) <= idx_bits,
                    "{}::make: position {position} overflows {idx_bits} index bits",
                    stringify!($name),
                );
                let tag: u8 = sort.into();
                $name((position << tag_bits) | u32::from(tag))
            }

            /// The sort tag packed into this index's low bits.
            pub fn sort(self) -> $sort {
                let tag_bits = tag_precision::<$sort>();
                let mask = (1u32 << tag_bits) - 1;
                let tag = (self.0 & mask) as u8;
                <$sort>::try_from(tag)
                    .unwrap_or_else(|_| panic!("{}: corrupt sort tag {tag}", stringify!($name)))
            }

            /// The partition-relative position packed into this index's high bits.
            pub fn index(self) -> Index {
                let tag_bits = tag_precision::<$sort>();
                Index(self.0 >> tag_bits)
            }

            /// `true` iff this is the zero bit-pattern: the well-formed null
            /// of every index type, regardless of sort.
            pub fn is_null(self) -> bool {
                self.0 == 0
            }

            /// Raw 32-bit representation (`rep` in the spec's algebra).
            pub fn rep(self) -> u32 {
                self.0
            }

            /// Reinterpret a raw 32-bit word as this index type (`per`).
            pub fn per(rep: u32) -> Self {
                $name(rep)
            }
        }

        impl Default for $name {
            fn default() -> Self {
                $name(0)
            }
        }

        impl PartialEq for $name {
            fn eq(&self, other: &Self) -> bool {
                self.0 == other.0
            }
        }
        impl Eq for $name {}

        impl PartialOrd for $name {
            fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
                Some(self.cmp(other))
            }
        }
        impl Ord for $name {
            fn cmp(&self, other: &Self) -> std::cmp::Ordering {
                self.0.cmp(&other.0)
            }
        }
        impl std::hash::Hash for $name {
            fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
                self.0.hash(state);
            }
        }

        impl std::fmt::Debug for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                if self.is_null() {
                    write!(f, "{}(null)", stringify!($name))
                } else {
                    write!(f, "{}({:?}, {})", stringify!($name), self.sort(), self.index().0)
                }
            }
        }
    };
}

/// Declares a bare unisorted index: a `u32` position into a single,
/// implicitly-known partition, with no embedded sort tag.
macro_rules! define_unisorted_index {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Default)]
        pub struct $name(pub u32);

        impl $name {
            pub fn is_null(self) -> bool {
                self.0 == 0
            }
        }

        impl Unisorted for $name {
            fn from_raw(raw: u32) -> Self {
                $name(raw)
            }
            fn raw(self) -> u32 {
                self.0
            }
        }
    };
}

/// A unisorted index type representable as a bare `u32`. Implemented by
/// every type produced by [`define_unisorted_index!`]; `pointed<T>` builds
/// on this to give nullable-pointer semantics to otherwise-dense indices.
pub trait Unisorted: Copy + Eq {
    fn from_raw(raw: u32) -> Self;
    fn raw(self) -> u32;
}

/// `pointed<T>` from the spec: some unisorted indices use `0` to mean "no
/// entity" and shift every real position up by one. `inject` maps a
/// partition-relative position into that space; `retract` reverses it.
pub mod pointed {
    use super::Unisorted;

    /// `inject(n) = T(n + 1)`.
    pub fn inject<T: Unisorted>(position: u32) -> T {
        assert!(position < u32::MAX, "pointed index: position overflow");
        T::from_raw(position + 1)
    }

    /// `retract(T(n + 1)) = n`. Undefined (panics) on the null value.
    pub fn retract<T: Unisorted>(value: T) -> u32 {
        let raw = value.raw();
        assert!(raw > 0, "pointed index: retract of a null value");
        raw - 1
    }

    /// `true` iff `value` is the null (zero) representation.
    pub fn is_null<T: Unisorted>(value: T) -> bool {
        value.raw() == 0
    }
}

// ---------------------------------------------------------------------
// Sort enumerations and their index types.
// ---------------------------------------------------------------------

define_sort!(
    /// Kinds of C++ names.
    NameSort {
        Identifier,
        Operator,
        Conversion,
        Literal,
        Template,
        Specialization,
        SourceFile,
        Guide,
        Count,
    }
);
define_multisorted_index!(
    /// Abstract reference to a name entity.
    NameIndex over NameSort
);

define_sort!(
    /// Shape of a template parameter list ("chart").
    ChartSort {
        /// No template parameters, e.g. an explicit specialization.
        None,
        /// A single-dimensional parameter list.
        Unilevel,
        /// A parameter list spanning several nesting levels.
        Multilevel,
        Count,
    }
);
define_multisorted_index!(
    /// Abstract reference to a chart (template parameter list) entity.
    ChartIndex over ChartSort
);

define_sort!(
    /// Kinds of declarations. A representative subset of the original's
    /// `DeclSort`: `Temploid`, `DefaultArgument`, `InheritedConstructor` and
    /// `Prolongation` are not modeled (see DESIGN.md), and `OutputSegment`
    /// is carried here as `Segment`.
    DeclSort {
        VendorExtension,
        Enumerator,
        Variable,
        Parameter,
        Field,
        Bitfield,
        Scope,
        Enumeration,
        Alias,
        Template,
        PartialSpecialization,
        Specialization,
        Concept,
        DeductionGuide,
        Function,
        Method,
        Constructor,
        Destructor,
        Reference,
        Using,
        Friend,
        Expansion,
        Barren,
        Tuple,
        SyntaxTree,
        Intrinsic,
        Property,
        Segment,
        Count,
    }
);
define_multisorted_index!(
    /// Abstract reference to a declaration entity.
    DeclIndex over DeclSort
);

define_sort!(
    /// Kinds of types.
    TypeSort {
        VendorExtension,
        Fundamental,
        Designated,
        Tor,
        Syntactic,
        Expansion,
        Pointer,
        PointerToMember,
        LvalueReference,
        RvalueReference,
        Function,
        Method,
        Array,
        Typename,
        Qualified,
        Base,
        Decltype,
        Placeholder,
        Tuple,
        Forall,
        Unaligned,
        SyntaxTree,
        Count,
    }
);
define_multisorted_index!(
    /// Abstract reference to a type entity.
    TypeIndex over TypeSort
);

define_sort!(
    /// Kinds of expressions.
    ExprSort {
        VendorExtension,
        Empty,
        Literal,
        Lambda,
        Type,
        NamedDecl,
        UnresolvedId,
        TemplateId,
        UnqualifiedId,
        SimpleIdentifier,
        Pointer,
        QualifiedName,
        Path,
        Read,
        Monad,
        Dyad,
        Triad,
        String,
        Temporary,
        Call,
        MemberInitializer,
        MemberAccess,
        InheritancePath,
        InitializerList,
        Cast,
        Condition,
        ExpressionList,
        SizeofType,
        Alignof,
        Label,
        /// Reserved slot, never constructed; decoding it is a programming error.
        UnusedSort0,
        Typeid,
        DestructorCall,
        SyntaxTree,
        FunctionString,
        CompoundString,
        StringSequence,
        Initializer,
        Requires,
        UnaryFold,
        BinaryFold,
        ProductTypeValue,
        SumTypeValue,
        /// Reserved slot, never constructed; decoding it is a programming error.
        UnusedSort1,
        ArrayValue,
        Placeholder,
        Expansion,
        Tuple,
        Nullptr,
        This,
        TemplateReference,
        Statement,
        TypeTraitIntrinsic,
        DesignatedInitializer,
        PackedTemplateArguments,
        Count,
    }
);
define_multisorted_index!(
    /// Abstract reference to an expression entity.
    ExprIndex over ExprSort
);

define_sort!(
    /// Kinds of statements.
    StmtSort {
        VendorExtension,
        Try,
        If,
        For,
        Labeled,
        While,
        Block,
        Break,
        Switch,
        DoWhile,
        Goto,
        Continue,
        Expression,
        Return,
        Decl,
        Expansion,
        SyntaxTree,
        Handler,
        Tuple,
        Dir,
        Count,
    }
);
define_multisorted_index!(
    /// Abstract reference to a statement entity.
    StmtIndex over StmtSort
);

define_sort!(
    /// Kinds of syntactic (unelaborated) program fragments.
    ///
    /// The full grammar-level catalog is large; this carries the subset
    /// actually materialized as distinct entities elsewhere in this crate
    /// (types, declarations, statements, expressions and template machinery
    /// that route through a syntax tree before elaboration). See
    /// `DESIGN.md` for the scoping rationale.
    SyntaxSort {
        VendorExtension,
        SimpleTypeSpecifier,
        DecltypeSpecifier,
        PlaceholderTypeSpecifier,
        TypeSpecifierSeq,
        DeclSpecifierSeq,
        VirtualSpecifierSeq,
        NoexceptSpecification,
        ExplicitSpecifier,
        EnumSpecifier,
        EnumeratorDefinition,
        ClassSpecifier,
        MemberSpecification,
        MemberDeclaration,
        MemberDeclarator,
        AccessSpecifier,
        BaseSpecifierList,
        BaseSpecifier,
        TypeId,
        TrailingReturnType,
        Declarator,
        PointerDeclarator,
        ArrayDeclarator,
        FunctionDeclarator,
        ParameterDeclarator,
        InitDeclarator,
        SimpleDeclaration,
        ConditionDeclaration,
        StaticAssertDeclaration,
        AliasDeclaration,
        ConceptDefinition,
        CompoundStatement,
        ReturnStatement,
        IfStatement,
        WhileStatement,
        DoWhileStatement,
        ForStatement,
        RangeBasedForStatement,
        LabeledStatement,
        BreakStatement,
        ContinueStatement,
        SwitchStatement,
        GotoStatement,
        DeclarationStatement,
        ExpressionStatement,
        TryBlock,
        Handler,
        HandlerSeq,
        StatementSeq,
        Expression,
        FunctionDefinition,
        TemplateDeclaration,
        RequiresClause,
        TemplateParameterList,
        TemplateArgumentList,
        TemplateId,
        LambdaIntroducer,
        LambdaDeclarator,
        AttributeSpecifierSeq,
        UsingDeclaration,
        UsingDirective,
        Tuple,
        Count,
    }
);
define_multisorted_index!(
    /// Abstract reference to a syntactic element entity.
    SyntaxIndex over SyntaxSort
);

define_sort!(
    /// Kinds of preprocessing forms (pp-token groupings).
    FormSort {
        Identifier,
        Number,
        Character,
        String,
        Operator,
        Keyword,
        Whitespace,
        Parameter,
        Stringize,
        Catenate,
        Pragma,
        Header,
        Parenthesized,
        Tuple,
        Junk,
        Count,
    }
);
define_multisorted_index!(
    /// Abstract reference to a preprocessing form entity.
    FormIndex over FormSort
);

define_sort!(
    /// Kinds of object-like vs. function-like macros.
    MacroSort {
        ObjectLike,
        FunctionLike,
        Count,
    }
);
define_multisorted_index!(
    /// Abstract reference to a macro definition entity.
    MacroIndex over MacroSort
);

define_sort!(
    /// Kinds of pragma directives.
    PragmaSort {
        VendorExtension,
        Expr,
        Count,
    }
);
define_multisorted_index!(
    /// Abstract reference to a pragma entity.
    PragmaIndex over PragmaSort
);

define_sort!(
    /// Kinds of attributes.
    AttrSort {
        Nothing,
        Basic,
        Scoped,
        Labeled,
        Called,
        Expanded,
        Factored,
        Elaborated,
        Tuple,
        Count,
    }
);
define_multisorted_index!(
    /// Abstract reference to an attribute entity.
    AttrIndex over AttrSort
);

define_sort!(
    /// Kinds of directives.
    DirSort {
        VendorExtension,
        Empty,
        Attribute,
        Pragma,
        Using,
        DeclUse,
        Expr,
        StructuredBinding,
        SpecifiersSpread,
        Stmt,
        /// Reserved slots, never constructed; decoding one is a programming error.
        Unused1, Unused2, Unused3, Unused4, Unused5, Unused6, Unused7, Unused8,
        Unused9, Unused10, Unused11, Unused12, Unused13, Unused14, Unused15,
        Unused16, Unused17, Unused18, Unused19, Unused20, Unused21,
        Tuple,
        Count,
    }
);
define_multisorted_index!(
    /// Abstract reference to a directive entity.
    DirIndex over DirSort
);

define_sort!(
    /// Variety of numeric literal representations.
    LiteralSort {
        /// Value small enough to be packed directly into the index.
        Immediate,
        Integer,
        FloatingPoint,
        Count,
    }
);
define_multisorted_index!(
    /// Abstract reference to a numeric literal constant.
    LitIndex over LiteralSort
);

define_sort!(
    /// Variety of string literal prefixes.
    StringSort {
        Ordinary,
        Utf8,
        Utf16,
        Utf32,
        Wide,
        Count,
    }
);
define_multisorted_index!(
    /// Abstract reference to a string literal entity.
    StringIndex over StringSort
);

define_sort!(
    /// Vendor (MSVC) syntax extensions not modeled by the portable sorts.
    VendorSort {
        SehTry,
        SehFinally,
        SehExcept,
        SehLeave,
        Count,
    }
);
define_multisorted_index!(
    /// Abstract reference to a vendor-extension entity.
    VendorIndex over VendorSort
);

define_sort!(
    /// Names the heap partition backing a [`crate::index::Sequence`] whose
    /// element type does not itself select a unique partition.
    HeapSort {
        Decl,
        Type,
        Stmt,
        Expr,
        Syntax,
        Word,
        Chart,
        Spec,
        Form,
        Attr,
        Dir,
        Vendor,
        Count,
    }
);

define_sort!(
    /// Portable associative trait keys (see [`crate::model::traits`]).
    TraitSort {
        MappingExpr,
        AliasTemplate,
        Friends,
        Specializations,
        Requires,
        Attributes,
        Deprecated,
        DeductionGuides,
        Count,
    }
);

define_sort!(
    /// MSVC-specific associative trait keys.
    MsvcTraitSort {
        Uuid,
        Segment,
        SpecializationEncoding,
        SalAnnotation,
        FunctionParameters,
        InitializerLocus,
        Vendor,
        DeclAttributes,
        Count,
    }
);

define_sort!(
    /// The various sorts of translation unit a container can represent.
    UnitSort {
        Source,
        Primary,
        Partition,
        Header,
        ExportedTU,
        Count,
    }
);
define_multisorted_index!(
    /// Identity of the translation unit a container holds, tagged with its
    /// [`UnitSort`] and packing a [`crate::primitives::TextOffset`] (not a
    /// partition position) in its high bits.
    UnitIndex over UnitSort
);

impl UnitIndex {
    pub fn new(sort: UnitSort, name: crate::primitives::TextOffset) -> Self {
        UnitIndex::make(sort, name.0)
    }

    /// The module name, valid when `sort()` is `Primary` or `ExportedTU`.
    pub fn module_name(self) -> crate::primitives::TextOffset {
        crate::primitives::TextOffset(self.index().0)
    }

    /// The header name, valid when `sort()` is `Header`.
    pub fn header_name(self) -> crate::primitives::TextOffset {
        assert_eq!(self.sort(), UnitSort::Header, "header_name on a non-header unit");
        crate::primitives::TextOffset(self.index().0)
    }
}

define_unisorted_index!(
    /// Index into the global source-line table.
    LineIndex
);
define_unisorted_index!(
    /// Index into the word (token) stream table.
    WordIndex
);
define_unisorted_index!(
    /// Index into the token-sentence table.
    SentenceIndex
);
define_unisorted_index!(
    /// Index into the specialization-form table.
    SpecFormIndex
);
define_unisorted_index!(
    /// Index into the scope partition.
    ScopeIndex
);

/// A contiguous run `[start, start + cardinality)` of homogeneous elements.
///
/// If `Heap` is given, elements live in that heap partition; otherwise they
/// live in the partition implied by `T`. The range must lie wholly within
/// its backing partition -- enforced by the reader at access time, not here.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Sequence<T> {
    pub start: Index,
    pub cardinality: crate::primitives::Cardinality,
    #[serde(skip)]
    _marker: std::marker::PhantomData<T>,
}

impl<T> Sequence<T> {
    pub fn new(start: Index, cardinality: crate::primitives::Cardinality) -> Self {
        Sequence {
            start,
            cardinality,
            _marker: std::marker::PhantomData,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.cardinality.is_zero()
    }
}

impl<T> Default for Sequence<T> {
    fn default() -> Self {
        Sequence::new(Index::default(), crate::primitives::Cardinality(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_index_round_trip() {
        let idx = DeclIndex::make(DeclSort::Function, 42);
        assert_eq!(idx.sort(), DeclSort::Function);
        assert_eq!(idx.index(), Index(42));
        assert!(!idx.is_null());
    }

    #[test]
    fn rep_per_round_trip() {
        let idx = TypeIndex::make(TypeSort::Pointer, 7);
        let rep = idx.rep();
        let back = TypeIndex::per(rep);
        assert_eq!(back.sort(), TypeSort::Pointer);
        assert_eq!(back.index(), Index(7));
    }

    #[test]
    fn zero_is_null_regardless_of_sort() {
        let null = DeclIndex::default();
        assert!(null.is_null());
        assert_eq!(null.rep(), 0);
    }

    #[test]
    #[should_panic]
    fn make_panics_on_overflow() {
        // DeclSort needs 5 tag bits (28 variants -> Count=28), leaving 27
        // index bits; 1 << 27 overflows that.
        DeclIndex::make(DeclSort::Function, 1 << 27);
    }

    #[test]
    fn pointed_inject_retract_round_trip() {
        let injected: LineIndex = pointed::inject(5);
        assert_eq!(pointed::retract(injected), 5);
        assert!(pointed::is_null(LineIndex(0)));
        assert!(!pointed::is_null(injected));
    }

    #[test]
    fn unit_index_carries_text_offset_not_position() {
        let unit = UnitIndex::new(UnitSort::Primary, crate::primitives::TextOffset(100));
        assert_eq!(unit.sort(), UnitSort::Primary);
        assert_eq!(unit.module_name(), crate::primitives::TextOffset(100));
    }
}
