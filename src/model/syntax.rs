//! Syntactic (unelaborated) program fragments ([`crate::index::SyntaxSort`]):
//! the parse-tree shapes that exist before or alongside semantic
//! elaboration (declarators, specifier-seqs, statement forms, template
//! parameter/argument lists, lambda introducers, ...).
//!
//! A syntax node generally carries its own sub-structure as `SyntaxIndex`
//! children plus the handful of `SourceLocation`s needed to report
//! diagnostics against the original spelling; several also reference an
//! elaborated `ExprIndex`/`TypeIndex`/`DeclIndex` once semantic analysis has
//! resolved them.

use super::common::{CallingConvention, NoexceptSpecification, Qualifier, SourceLocation};
use crate::index::{ExprIndex, Sequence, SentenceIndex, SyntaxIndex, TypeIndex};
use crate::primitives::TextOffset;
use serde::Serialize;

/// A single keyword token tracked for its source location and identity
/// (`class` vs `struct` vs `union`, an access-specifier, `constexpr`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, num_enum::TryFromPrimitive, num_enum::IntoPrimitive, Serialize)]
#[repr(u8)]
pub enum KeywordKind {
    None,
    Class,
    Struct,
    Union,
    Public,
    Protected,
    Private,
    Default,
    Delete,
    Mutable,
    Constexpr,
    Consteval,
    Typename,
    Constinit,
}

impl Default for KeywordKind {
    fn default() -> Self {
        KeywordKind::None
    }
}

#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct Keyword {
    pub locus: SourceLocation,
    pub kind: KeywordKind,
}

#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct VendorSyntax {
    pub index: crate::index::VendorIndex,
}

#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct SimpleTypeSpecifier {
    /// The type, if already resolved.
    pub ty: TypeIndex,
    /// The expression naming it, if not.
    pub expr: ExprIndex,
    pub locus: SourceLocation,
}

#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct DecltypeSpecifier {
    pub expr: ExprIndex,
    pub locus: SourceLocation,
}

#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct PlaceholderTypeSpecifier {
    pub ty: TypeIndex,
    pub locus: SourceLocation,
}

#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct TypeSpecifierSeq {
    pub type_script: SyntaxIndex,
    pub ty: TypeIndex,
    pub locus: SourceLocation,
    pub qualifiers: Qualifier,
    pub is_unhashed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
pub struct StorageClass(pub u32);

pub const STORAGE_AUTO: u32 = 1 << 0;
pub const STORAGE_CONSTEXPR: u32 = 1 << 1;
pub const STORAGE_EXPLICIT: u32 = 1 << 2;
pub const STORAGE_EXTERN: u32 = 1 << 3;
pub const STORAGE_FORCE_INLINE: u32 = 1 << 4;
pub const STORAGE_FRIEND: u32 = 1 << 5;
pub const STORAGE_INLINE: u32 = 1 << 6;
pub const STORAGE_MUTABLE: u32 = 1 << 7;
pub const STORAGE_REGISTER: u32 = 1 << 9;
pub const STORAGE_STATIC: u32 = 1 << 10;
pub const STORAGE_THREAD_LOCAL: u32 = 1 << 11;
pub const STORAGE_TYPEDEF: u32 = 1 << 13;
pub const STORAGE_VIRTUAL: u32 = 1 << 14;
pub const STORAGE_CONSTEVAL: u32 = 1 << 15;
pub const STORAGE_CONSTINIT: u32 = 1 << 16;

impl StorageClass {
    pub fn contains(self, flag: u32) -> bool {
        self.0 & flag != 0
    }
}

#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct DeclSpecifierSeq {
    pub ty: TypeIndex,
    pub type_script: SyntaxIndex,
    pub locus: SourceLocation,
    pub storage_class: StorageClass,
    pub declspec: SentenceIndex,
    pub explicit_specifier: SyntaxIndex,
    pub qualifiers: Qualifier,
}

#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct VirtualSpecifierSeq {
    pub locus: SourceLocation,
    pub final_keyword: SourceLocation,
    pub override_keyword: SourceLocation,
    pub is_pure: bool,
}

/// Reuses the elaborated [`NoexceptSpecification`] shape; the syntax-tree
/// rendering additionally tracks the parenthesization.
#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct NoexceptSpecificationSyntax {
    pub expression: ExprIndex,
    pub locus: SourceLocation,
    pub left_paren: SourceLocation,
    pub right_paren: SourceLocation,
}

#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct ExplicitSpecifier {
    pub expression: ExprIndex,
    pub locus: SourceLocation,
    pub left_paren: SourceLocation,
    pub right_paren: SourceLocation,
}

#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct EnumSpecifier {
    pub name: ExprIndex,
    pub class_or_struct: Keyword,
    pub enumerators: SyntaxIndex,
    pub enum_base: SyntaxIndex,
    pub locus: SourceLocation,
    pub colon: SourceLocation,
    pub left_brace: SourceLocation,
    pub right_brace: SourceLocation,
}

#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct EnumeratorDefinition {
    pub name: TextOffset,
    pub expression: ExprIndex,
    pub locus: SourceLocation,
    pub assign: SourceLocation,
    pub comma: SourceLocation,
}

#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct ClassSpecifier {
    pub name: ExprIndex,
    pub class_key: Keyword,
    pub base_classes: SyntaxIndex,
    pub members: SyntaxIndex,
    pub left_brace: SourceLocation,
    pub right_brace: SourceLocation,
}

#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct MemberSpecification {
    pub declarations: SyntaxIndex,
}

#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct MemberDeclaration {
    pub decl_specifier_seq: SyntaxIndex,
    pub declarators: SyntaxIndex,
    pub semi_colon: SourceLocation,
}

#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct MemberDeclarator {
    pub declarator: SyntaxIndex,
    pub requires_clause: SyntaxIndex,
    pub expression: ExprIndex,
    pub initializer: ExprIndex,
    pub locus: SourceLocation,
    pub colon: SourceLocation,
    pub comma: SourceLocation,
}

#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct AccessSpecifier {
    pub keyword: Keyword,
    pub colon: SourceLocation,
}

#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct BaseSpecifierList {
    pub base_specifiers: SyntaxIndex,
    pub colon: SourceLocation,
}

#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct BaseSpecifier {
    pub name: ExprIndex,
    pub access_keyword: Keyword,
    pub virtual_keyword: SourceLocation,
    pub locus: SourceLocation,
    pub ellipsis: SourceLocation,
    pub comma: SourceLocation,
}

#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct TypeId {
    pub ty: SyntaxIndex,
    pub declarator: SyntaxIndex,
    pub locus: SourceLocation,
}

#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct TrailingReturnType {
    pub ty: SyntaxIndex,
    pub locus: SourceLocation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, num_enum::TryFromPrimitive, num_enum::IntoPrimitive, Serialize)]
#[repr(u8)]
pub enum PointerDeclaratorKind {
    None,
    Pointer,
    LvalueReference,
    RvalueReference,
    PointerToMember,
}

impl Default for PointerDeclaratorKind {
    fn default() -> Self {
        PointerDeclaratorKind::None
    }
}

#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct PointerDeclarator {
    /// The owning class, if this is a pointer-to-member.
    pub owner: ExprIndex,
    /// The next declarator, for multiple indirections.
    pub child: SyntaxIndex,
    pub locus: SourceLocation,
    pub kind: PointerDeclaratorKind,
    pub qualifiers: Qualifier,
    pub convention: CallingConvention,
    pub is_function: bool,
}

#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct ArrayDeclarator {
    pub bounds: ExprIndex,
    pub left_bracket: SourceLocation,
    pub right_bracket: SourceLocation,
}

#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct FunctionDeclarator {
    pub parameters: SyntaxIndex,
    pub exception_specification: SyntaxIndex,
    pub left_paren: SourceLocation,
    pub right_paren: SourceLocation,
    pub ellipsis: SourceLocation,
    pub ref_qualifier: SourceLocation,
    pub traits: super::common::FunctionTypeTraits,
}

#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct ParameterDeclarator {
    pub decl_specifier_seq: SyntaxIndex,
    pub declarator: SyntaxIndex,
    pub default_argument: ExprIndex,
    pub locus: SourceLocation,
    pub sort: super::common::ParameterSort,
}

#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct InitDeclarator {
    pub declarator: SyntaxIndex,
    pub requires_clause: SyntaxIndex,
    pub initializer: ExprIndex,
    pub comma: SourceLocation,
}

#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct SimpleDeclaration {
    pub decl_specifier_seq: SyntaxIndex,
    pub declarators: SyntaxIndex,
    pub locus: SourceLocation,
    pub semi_colon: SourceLocation,
}

#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct ConditionDeclaration {
    pub decl_specifier: SyntaxIndex,
    pub init_statement: SyntaxIndex,
    pub locus: SourceLocation,
}

#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct StaticAssertDeclaration {
    pub expression: ExprIndex,
    pub message: ExprIndex,
    pub locus: SourceLocation,
    pub left_paren: SourceLocation,
    pub right_paren: SourceLocation,
    pub semi_colon: SourceLocation,
    pub comma: SourceLocation,
}

#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct AliasDeclaration {
    pub identifier: TextOffset,
    pub defining_type_id: SyntaxIndex,
    pub locus: SourceLocation,
    pub assign: SourceLocation,
    pub semi_colon: SourceLocation,
}

#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct ConceptDefinition {
    pub parameters: SyntaxIndex,
    pub locus: SourceLocation,
    pub identifier: TextOffset,
    pub expression: ExprIndex,
    pub concept_keyword: SourceLocation,
    pub assign: SourceLocation,
    pub semi_colon: SourceLocation,
}

#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct CompoundStatement {
    pub pragma_tokens: SentenceIndex,
    pub statements: SyntaxIndex,
    pub left_curly: SourceLocation,
    pub right_curly: SourceLocation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, num_enum::TryFromPrimitive, num_enum::IntoPrimitive, Serialize)]
#[repr(u8)]
pub enum ReturnKind {
    Return,
    CoReturn,
}

impl Default for ReturnKind {
    fn default() -> Self {
        ReturnKind::Return
    }
}

#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct ReturnStatement {
    pub pragma_tokens: SentenceIndex,
    pub expr: ExprIndex,
    pub return_kind: ReturnKind,
    pub return_locus: SourceLocation,
    pub semi_colon: SourceLocation,
}

#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct IfStatement {
    pub pragma_tokens: SentenceIndex,
    pub init_statement: SyntaxIndex,
    pub condition: ExprIndex,
    pub if_true: SyntaxIndex,
    pub if_false: SyntaxIndex,
    pub if_keyword: SourceLocation,
    pub constexpr_locus: SourceLocation,
    pub else_keyword: SourceLocation,
}

#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct WhileStatement {
    pub pragma_tokens: SentenceIndex,
    pub condition: ExprIndex,
    pub statement: SyntaxIndex,
    pub while_keyword: SourceLocation,
}

#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct DoWhileStatement {
    pub pragma_tokens: SentenceIndex,
    pub condition: ExprIndex,
    pub statement: SyntaxIndex,
    pub do_keyword: SourceLocation,
    pub while_keyword: SourceLocation,
    pub semi_colon: SourceLocation,
}

#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct ForStatement {
    pub pragma_tokens: SentenceIndex,
    pub init_statement: SyntaxIndex,
    pub condition: ExprIndex,
    pub expression: ExprIndex,
    pub statement: SyntaxIndex,
    pub for_keyword: SourceLocation,
    pub left_paren: SourceLocation,
    pub right_paren: SourceLocation,
    pub semi_colon: SourceLocation,
}

#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct RangeBasedForStatement {
    pub pragma_tokens: SentenceIndex,
    pub init_statement: SyntaxIndex,
    pub declaration: SyntaxIndex,
    pub initializer: ExprIndex,
    pub statement: SyntaxIndex,
    pub for_keyword: SourceLocation,
    pub left_paren: SourceLocation,
    pub right_paren: SourceLocation,
    pub colon: SourceLocation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, num_enum::TryFromPrimitive, num_enum::IntoPrimitive, Serialize)]
#[repr(u8)]
pub enum LabelKind {
    None,
    Case,
    Default,
    Label,
}

impl Default for LabelKind {
    fn default() -> Self {
        LabelKind::None
    }
}

#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct LabeledStatement {
    pub pragma_tokens: SentenceIndex,
    /// The `case` expression, or the label name.
    pub expression: ExprIndex,
    pub statement: SyntaxIndex,
    pub locus: SourceLocation,
    pub colon: SourceLocation,
    pub kind: LabelKind,
}

#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct BreakStatement {
    pub break_keyword: SourceLocation,
    pub semi_colon: SourceLocation,
}

#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct ContinueStatement {
    pub continue_keyword: SourceLocation,
    pub semi_colon: SourceLocation,
}

#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct SwitchStatement {
    pub pragma_tokens: SentenceIndex,
    pub init_statement: SyntaxIndex,
    pub condition: ExprIndex,
    pub statement: SyntaxIndex,
    pub switch_keyword: SourceLocation,
}

#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct GotoStatement {
    pub pragma_tokens: SentenceIndex,
    pub name: TextOffset,
    pub locus: SourceLocation,
    pub label: SourceLocation,
    pub semi_colon: SourceLocation,
}

#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct DeclarationStatement {
    pub pragma_tokens: SentenceIndex,
    pub declaration: SyntaxIndex,
}

#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct ExpressionStatement {
    pub pragma_tokens: SentenceIndex,
    pub expression: ExprIndex,
    pub semi_colon: SourceLocation,
}

#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct TryBlock {
    pub pragma_tokens: SentenceIndex,
    pub statement: SyntaxIndex,
    pub handler_seq: SyntaxIndex,
    pub try_keyword: SourceLocation,
}

#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct Handler {
    pub pragma_tokens: SentenceIndex,
    pub exception_declaration: SyntaxIndex,
    pub statement: SyntaxIndex,
    pub catch_keyword: SourceLocation,
    pub left_paren: SourceLocation,
    pub right_paren: SourceLocation,
}

#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct HandlerSeq {
    pub handlers: SyntaxIndex,
}

#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct StatementSeq {
    pub statements: SyntaxIndex,
}

#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct Expression {
    pub expression: ExprIndex,
}

#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct FunctionDefinition {
    pub decl_specifier_seq: SyntaxIndex,
    pub declarator: SyntaxIndex,
    pub requires_clause: SyntaxIndex,
    pub body: SyntaxIndex,
}

#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct TemplateDeclaration {
    pub parameters: SyntaxIndex,
    pub declaration: SyntaxIndex,
    pub locus: SourceLocation,
}

#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct RequiresClause {
    pub expression: ExprIndex,
    pub locus: SourceLocation,
}

#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct TemplateParameterList {
    pub parameters: SyntaxIndex,
    pub requires_clause: SyntaxIndex,
    pub left_angle: SourceLocation,
    pub right_angle: SourceLocation,
}

#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct TemplateArgumentList {
    pub arguments: SyntaxIndex,
    pub left_angle: SourceLocation,
    pub right_angle: SourceLocation,
}

#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct TemplateId {
    /// The name of the primary template, if it is not yet bound.
    pub name: SyntaxIndex,
    /// The symbol for the primary template, once bound.
    pub symbol: ExprIndex,
    pub arguments: SyntaxIndex,
    pub locus: SourceLocation,
    pub template_keyword: SourceLocation,
}

#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct LambdaIntroducer {
    pub captures: SyntaxIndex,
    pub left_bracket: SourceLocation,
    pub right_bracket: SourceLocation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
pub struct LambdaDeclaratorSpec(pub u8);

pub const LAMBDA_SPEC_MUTABLE: u8 = 1 << 0;
pub const LAMBDA_SPEC_CONSTEXPR: u8 = 1 << 1;
pub const LAMBDA_SPEC_CONSTEVAL: u8 = 1 << 2;
pub const LAMBDA_SPEC_STATIC: u8 = 1 << 3;

#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct LambdaDeclarator {
    pub parameters: SyntaxIndex,
    pub exception_specification: SyntaxIndex,
    pub trailing_return_type: SyntaxIndex,
    pub spec_locus: SourceLocation,
    pub spec: LambdaDeclaratorSpec,
    pub left_paren: SourceLocation,
    pub right_paren: SourceLocation,
    pub ellipsis: SourceLocation,
}

#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct UsingDeclaration {
    pub declarators: SyntaxIndex,
    pub using_keyword: SourceLocation,
    pub semi_colon: SourceLocation,
}

#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct UsingDirective {
    pub qualified_name: ExprIndex,
    pub using_keyword: SourceLocation,
    pub namespace_keyword: SourceLocation,
    pub semi_colon: SourceLocation,
}

/// An attribute-specifier-seq attached to a declaration or type, e.g.
/// `[[nodiscard]] [[deprecated]]`.
#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct AttributeSpecifierSeq {
    pub attributes: Sequence<crate::index::AttrIndex>,
    pub locus: SourceLocation,
}

/// A sequence of sibling syntax nodes of the same sort, e.g. a declarator
/// list or a statement list; mirrors [`super::attr::TupleAttr`] and
/// [`super::stmt::TupleStmt`] for the syntax-tree layer.
#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct Tuple {
    pub elements: Sequence<SyntaxIndex>,
}

/// Any syntax entity, tagged by its [`crate::index::SyntaxSort`].
#[derive(Debug, Clone, Copy, Serialize)]
pub enum Syntax {
    VendorExtension(VendorSyntax),
    SimpleTypeSpecifier(SimpleTypeSpecifier),
    DecltypeSpecifier(DecltypeSpecifier),
    PlaceholderTypeSpecifier(PlaceholderTypeSpecifier),
    TypeSpecifierSeq(TypeSpecifierSeq),
    DeclSpecifierSeq(DeclSpecifierSeq),
    VirtualSpecifierSeq(VirtualSpecifierSeq),
    NoexceptSpecification(NoexceptSpecificationSyntax),
    ExplicitSpecifier(ExplicitSpecifier),
    EnumSpecifier(EnumSpecifier),
    EnumeratorDefinition(EnumeratorDefinition),
    ClassSpecifier(ClassSpecifier),
    MemberSpecification(MemberSpecification),
    MemberDeclaration(MemberDeclaration),
    MemberDeclarator(MemberDeclarator),
    AccessSpecifier(AccessSpecifier),
    BaseSpecifierList(BaseSpecifierList),
    BaseSpecifier(BaseSpecifier),
    TypeId(TypeId),
    TrailingReturnType(TrailingReturnType),
    Declarator(Declarator),
    PointerDeclarator(PointerDeclarator),
    ArrayDeclarator(ArrayDeclarator),
    FunctionDeclarator(FunctionDeclarator),
    ParameterDeclarator(ParameterDeclarator),
    InitDeclarator(InitDeclarator),
    SimpleDeclaration(SimpleDeclaration),
    ConditionDeclaration(ConditionDeclaration),
    StaticAssertDeclaration(StaticAssertDeclaration),
    AliasDeclaration(AliasDeclaration),
    ConceptDefinition(ConceptDefinition),
    CompoundStatement(CompoundStatement),
    ReturnStatement(ReturnStatement),
    IfStatement(IfStatement),
    WhileStatement(WhileStatement),
    DoWhileStatement(DoWhileStatement),
    ForStatement(ForStatement),
    RangeBasedForStatement(RangeBasedForStatement),
    LabeledStatement(LabeledStatement),
    BreakStatement(BreakStatement),
    ContinueStatement(ContinueStatement),
    SwitchStatement(SwitchStatement),
    GotoStatement(GotoStatement),
    DeclarationStatement(DeclarationStatement),
    ExpressionStatement(ExpressionStatement),
    TryBlock(TryBlock),
    Handler(Handler),
    HandlerSeq(HandlerSeq),
    StatementSeq(StatementSeq),
    Expression(Expression),
    FunctionDefinition(FunctionDefinition),
    TemplateDeclaration(TemplateDeclaration),
    RequiresClause(RequiresClause),
    TemplateParameterList(TemplateParameterList),
    TemplateArgumentList(TemplateArgumentList),
    TemplateId(TemplateId),
    LambdaIntroducer(LambdaIntroducer),
    LambdaDeclarator(LambdaDeclarator),
    AttributeSpecifierSeq(AttributeSpecifierSeq),
    UsingDeclaration(UsingDeclaration),
    UsingDirective(UsingDirective),
    Tuple(Tuple),
}

/// A declarator, named in full as it is the syntax node that most often
/// shows up on its own (e.g. in a diagnostic about a parameter).
#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct Declarator {
    pub pointer: SyntaxIndex,
    pub parenthesized_declarator: SyntaxIndex,
    pub array_or_function_declarator: SyntaxIndex,
    pub trailing_return_type: SyntaxIndex,
    pub virtual_specifiers: SyntaxIndex,
    pub name: ExprIndex,
    pub ellipsis: SourceLocation,
    pub locus: SourceLocation,
    pub qualifiers: Qualifier,
    pub convention: CallingConvention,
    pub is_function: bool,
}

impl Syntax {
    pub fn sort(&self) -> crate::index::SyntaxSort {
        use crate::index::SyntaxSort;
        match self {
            Syntax::VendorExtension(_) => SyntaxSort::VendorExtension,
            Syntax::SimpleTypeSpecifier(_) => SyntaxSort::SimpleTypeSpecifier,
            Syntax::DecltypeSpecifier(_) => SyntaxSort::DecltypeSpecifier,
            Syntax::PlaceholderTypeSpecifier(_) => SyntaxSort::PlaceholderTypeSpecifier,
            Syntax::TypeSpecifierSeq(_) => SyntaxSort::TypeSpecifierSeq,
            Syntax::DeclSpecifierSeq(_) => SyntaxSort::DeclSpecifierSeq,
            Syntax::VirtualSpecifierSeq(_) => SyntaxSort::VirtualSpecifierSeq,
            Syntax::NoexceptSpecification(_) => SyntaxSort::NoexceptSpecification,
            Syntax::ExplicitSpecifier(_) => SyntaxSort::ExplicitSpecifier,
            Syntax::EnumSpecifier(_) => SyntaxSort::EnumSpecifier,
            Syntax::EnumeratorDefinition(_) => SyntaxSort::EnumeratorDefinition,
            Syntax::ClassSpecifier(_) => SyntaxSort::ClassSpecifier,
            Syntax::MemberSpecification(_) => SyntaxSort::MemberSpecification,
            Syntax::MemberDeclaration(_) => SyntaxSort::MemberDeclaration,
            Syntax::MemberDeclarator(_) => SyntaxSort::MemberDeclarator,
            Syntax::AccessSpecifier(_) => SyntaxSort::AccessSpecifier,
            Syntax::BaseSpecifierList(_) => SyntaxSort::BaseSpecifierList,
            Syntax::BaseSpecifier(_) => SyntaxSort::BaseSpecifier,
            Syntax::TypeId(_) => SyntaxSort::TypeId,
            Syntax::TrailingReturnType(_) => SyntaxSort::TrailingReturnType,
            Syntax::Declarator(_) => SyntaxSort::Declarator,
            Syntax::PointerDeclarator(_) => SyntaxSort::PointerDeclarator,
            Syntax::ArrayDeclarator(_) => SyntaxSort::ArrayDeclarator,
            Syntax::FunctionDeclarator(_) => SyntaxSort::FunctionDeclarator,
            Syntax::ParameterDeclarator(_) => SyntaxSort::ParameterDeclarator,
            Syntax::InitDeclarator(_) => SyntaxSort::InitDeclarator,
            Syntax::SimpleDeclaration(_) => SyntaxSort::SimpleDeclaration,
            Syntax::ConditionDeclaration(_) => SyntaxSort::ConditionDeclaration,
            Syntax::StaticAssertDeclaration(_) => SyntaxSort::StaticAssertDeclaration,
            Syntax::AliasDeclaration(_) => SyntaxSort::AliasDeclaration,
            Syntax::ConceptDefinition(_) => SyntaxSort::ConceptDefinition,
            Syntax::CompoundStatement(_) => SyntaxSort::CompoundStatement,
            Syntax::ReturnStatement(_) => SyntaxSort::ReturnStatement,
            Syntax::IfStatement(_) => SyntaxSort::IfStatement,
            Syntax::WhileStatement(_) => SyntaxSort::WhileStatement,
            Syntax::DoWhileStatement(_) => SyntaxSort::DoWhileStatement,
            Syntax::ForStatement(_) => SyntaxSort::ForStatement,
            Syntax::RangeBasedForStatement(_) => SyntaxSort::RangeBasedForStatement,
            Syntax::LabeledStatement(_) => SyntaxSort::LabeledStatement,
            Syntax::BreakStatement(_) => SyntaxSort::BreakStatement,
            Syntax::ContinueStatement(_) => SyntaxSort::ContinueStatement,
            Syntax::SwitchStatement(_) => SyntaxSort::SwitchStatement,
            Syntax::GotoStatement(_) => SyntaxSort::GotoStatement,
            Syntax::DeclarationStatement(_) => SyntaxSort::DeclarationStatement,
            Syntax::ExpressionStatement(_) => SyntaxSort::ExpressionStatement,
            Syntax::TryBlock(_) => SyntaxSort::TryBlock,
            Syntax::Handler(_) => SyntaxSort::Handler,
            Syntax::HandlerSeq(_) => SyntaxSort::HandlerSeq,
            Syntax::StatementSeq(_) => SyntaxSort::StatementSeq,
            Syntax::Expression(_) => SyntaxSort::Expression,
            Syntax::FunctionDefinition(_) => SyntaxSort::FunctionDefinition,
            Syntax::TemplateDeclaration(_) => SyntaxSort::TemplateDeclaration,
            Syntax::RequiresClause(_) => SyntaxSort::RequiresClause,
            Syntax::TemplateParameterList(_) => SyntaxSort::TemplateParameterList,
            Syntax::TemplateArgumentList(_) => SyntaxSort::TemplateArgumentList,
            Syntax::TemplateId(_) => SyntaxSort::TemplateId,
            Syntax::LambdaIntroducer(_) => SyntaxSort::LambdaIntroducer,
            Syntax::LambdaDeclarator(_) => SyntaxSort::LambdaDeclarator,
            Syntax::AttributeSpecifierSeq(_) => SyntaxSort::AttributeSpecifierSeq,
            Syntax::UsingDeclaration(_) => SyntaxSort::UsingDeclaration,
            Syntax::UsingDirective(_) => SyntaxSort::UsingDirective,
            Syntax::Tuple(_) => SyntaxSort::Tuple,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn if_statement_defaults_to_null_branches() {
        let s = IfStatement::default();
        assert!(s.if_true.is_null());
        assert!(s.if_false.is_null());
    }

    #[test]
    fn function_declarator_reports_its_own_sort() {
        let s = Syntax::FunctionDeclarator(FunctionDeclarator::default());
        assert_eq!(s.sort(), crate::index::SyntaxSort::FunctionDeclarator);
    }

    #[test]
    fn tuple_starts_empty() {
        let t = Tuple::default();
        assert!(t.elements.is_empty());
    }
}
