//! The DOM loader: turns reader entries into a traversable node graph.
//!
//! The abstract semantics graph is freely cyclic (a template refers to its
//! own parameters, a class to methods that return pointers back to the
//! class, ...), so this is not a tree-builder, it's an arena keyed by
//! [`NodeKey`] -- a type-erased `(sort_kind, sort_tag, position)` triple.
//! [`Loader::get_decl`] and its siblings are idempotent: the first call
//! walks the entity's fields and recurses through the same `get_*` family
//! for every edge, reserving the arena slot *before* recursing so a cycle
//! back to an in-progress node just returns its (still being filled in)
//! key instead of looping forever (see [`crate::reader`]'s note on `Copy`
//! entities and identity).
//!
//! Short pretty forms (`int*`, a literal's printed value, ...) are spelled
//! out inline rather than built as a child node; anything referenced only
//! that way is recorded in [`Loader::pending_references`] so a caller that
//! wants the full graph can keep calling `get_*` until the set drains.
//!
//! Two entity families have no backing record at all in this data model
//! (`Chart`'s parameter list and `Sentence`): nodes for them carry only
//! their key and sort, never decoded content. See [`Loader::try_get_chart`]
//! and [`Loader::get_sentence`].

use std::collections::{HashMap, HashSet};

use crate::index::{
    ChartIndex, ChartSort, DeclIndex, DeclSort, ExprIndex, ExprSort, NameIndex, NameSort,
    ScopeIndex, SentenceIndex, StmtIndex, SyntaxIndex, TypeIndex, TypeSort,
};
use crate::model::common::SourceLocation;
use crate::model::{decl, expr, name, stmt, syntax, types};
use crate::primitives::TextOffset;
use crate::reader::{LiteralValue, Reader};

/// The nine families a [`NodeKey`] can name, matching the families the
/// format itself addresses with a distinct index type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortKind {
    Expr,
    Decl,
    Type,
    Name,
    Scope,
    Sentence,
    Chart,
    Syntax,
    Stmt,
}

impl SortKind {
    pub fn name(self) -> &'static str {
        match self {
            SortKind::Expr => "expr",
            SortKind::Decl => "decl",
            SortKind::Type => "type",
            SortKind::Name => "name",
            SortKind::Scope => "scope",
            SortKind::Sentence => "sentence",
            SortKind::Chart => "chart",
            SortKind::Syntax => "syntax",
            SortKind::Stmt => "stmt",
        }
    }
}

/// A type-erased reference into the arena: which family, which sort tag
/// within it (`0` for the unisorted families), and which position. Two
/// keys compare equal iff all three fields do, which is exactly "the same
/// entity" as the format defines it (see [`crate::reader`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeKey {
    pub kind: SortKind,
    pub tag: u8,
    pub position: u32,
}

/// A materialized entity: a stable id, an ordered property list, and the
/// keys of every entity it structurally owns. Properties are rendered
/// eagerly as strings (there is no reason for a DOM consumer to need
/// anything richer than text plus the graph of children).
#[derive(Debug, Clone, Default)]
pub struct Node {
    pub id: String,
    pub properties: Vec<(String, String)>,
    pub children: Vec<NodeKey>,
}

/// Owns the arena. `nodes`/`index` realize the spec's node arena as a
/// growable `Vec` plus a `NodeKey -> usize` side table, since Rust can't
/// hand out a stable `&Node` into a `Vec` that keeps growing the way the
/// original's arena of heap-allocated nodes does; a `NodeKey` is already
/// the stable, `Copy` identity the format gives every entity, so storing
/// edges as keys rather than references loses nothing.
pub struct Loader<'r, 'ifc> {
    reader: &'r Reader<'ifc>,
    nodes: Vec<Node>,
    index: HashMap<NodeKey, usize>,
    pending: HashSet<NodeKey>,
}

impl<'r, 'ifc> Loader<'r, 'ifc> {
    pub fn new(reader: &'r Reader<'ifc>) -> Self {
        Loader {
            reader,
            nodes: Vec::new(),
            index: HashMap::new(),
            pending: HashSet::new(),
        }
    }

    /// The node materialized for `key`. Panics if `key` was never produced
    /// by one of this loader's `get_*` methods.
    pub fn node(&self, key: NodeKey) -> &Node {
        &self.nodes[self.index[&key]]
    }

    /// Keys that were only ever mentioned through a `ref_*` short form,
    /// never loaded as a structural child. Drains as the caller keeps
    /// calling the matching `get_*` for each one.
    pub fn pending_references(&self) -> impl Iterator<Item = &NodeKey> {
        self.pending.iter()
    }

    fn no(kind: SortKind) -> String {
        format!("no-{}", kind.name())
    }

    /// Reserves `key`'s arena slot before calling `load`, so a cycle back
    /// to `key` during `load` sees the slot already present and returns
    /// immediately instead of re-entering. Idempotent: a second `ensure`
    /// for the same key is a no-op lookup.
    fn ensure(
        &mut self,
        key: NodeKey,
        load: impl FnOnce(&mut Self) -> (String, Vec<(String, String)>, Vec<NodeKey>),
    ) -> NodeKey {
        if !self.index.contains_key(&key) {
            let slot = self.nodes.len();
            self.nodes.push(Node::default());
            self.index.insert(key, slot);
            let (id, properties, children) = load(self);
            self.nodes[slot] = Node { id, properties, children };
            self.pending.remove(&key);
        }
        key
    }

    fn locus_text(&self, locus: SourceLocation) -> String {
        if locus.line.is_null() {
            return String::new();
        }
        let fl = self.reader.line(locus.line);
        format!("{}:{}:{}", self.reader.text(fl.file), fl.line.0, locus.column.0)
    }

    fn text_prop(&self, label: &str, offset: TextOffset) -> (String, String) {
        (label.to_string(), self.reader.text(offset).to_string())
    }

    fn dbg_prop(label: &str, value: impl std::fmt::Debug) -> (String, String) {
        (label.to_string(), format!("{:?}", value))
    }
}

// ---------------------------------------------------------------------
// Declarations.
// ---------------------------------------------------------------------

impl<'r, 'ifc> Loader<'r, 'ifc> {
    fn decl_key(index: DeclIndex) -> NodeKey {
        NodeKey { kind: SortKind::Decl, tag: index.sort().into(), position: index.index().0 }
    }

    pub fn get_decl(&mut self, index: DeclIndex) -> NodeKey {
        let key = Self::decl_key(index);
        self.ensure(key, |loader| loader.build_decl(index))
    }

    pub fn ref_decl(&mut self, index: DeclIndex) -> String {
        if index.is_null() {
            return Self::no(SortKind::Decl);
        }
        self.pending.insert(Self::decl_key(index));
        format!("decl-{}", index.index().0)
    }

    fn build_decl(&mut self, index: DeclIndex) -> (String, Vec<(String, String)>, Vec<NodeKey>) {
        let id = format!("decl-{}", index.index().0);
        let variant = self
            .reader
            .visit_decl(index, |d| d)
            .unwrap_or_else(|e| panic!("dom: decl {index:?}: {e}"));
        let mut props = Vec::new();
        let mut children = Vec::new();
        use decl::Decl as D;
        match variant {
            D::Function(f) | D::Method(f) => {
                props.push(("name".into(), self.ref_name(f.identity.name)));
                props.push(("locus".into(), self.locus_text(f.identity.locus)));
                props.push(Self::dbg_prop("traits", f.traits));
                props.push(Self::dbg_prop("basic_spec", f.basic_spec));
                props.push(Self::dbg_prop("access", f.access));
                children.push(self.get_type(f.ty));
                if !f.home_scope.is_null() {
                    children.push(self.get_decl(f.home_scope));
                }
                if let Some(chart) = self.try_get_chart(f.chart) {
                    children.push(chart);
                }
            }
            D::Constructor(f) => {
                props.push(("name".into(), self.reader.text(f.identity.name).to_string()));
                props.push(("locus".into(), self.locus_text(f.identity.locus)));
                props.push(Self::dbg_prop("traits", f.traits));
                props.push(Self::dbg_prop("basic_spec", f.basic_spec));
                props.push(Self::dbg_prop("access", f.access));
                children.push(self.get_type(f.ty));
                if !f.home_scope.is_null() {
                    children.push(self.get_decl(f.home_scope));
                }
                if let Some(chart) = self.try_get_chart(f.chart) {
                    children.push(chart);
                }
            }
            D::Destructor(f) => {
                props.push(("name".into(), self.reader.text(f.identity.name).to_string()));
                props.push(("locus".into(), self.locus_text(f.identity.locus)));
                props.push(Self::dbg_prop("eh_spec", f.eh_spec));
                props.push(Self::dbg_prop("convention", f.convention));
                props.push(Self::dbg_prop("traits", f.traits));
                props.push(Self::dbg_prop("basic_spec", f.basic_spec));
                props.push(Self::dbg_prop("access", f.access));
                if !f.home_scope.is_null() {
                    children.push(self.get_decl(f.home_scope));
                }
            }
            D::Enumerator(f) => {
                props.push(("name".into(), self.reader.text(f.identity.name).to_string()));
                props.push(("locus".into(), self.locus_text(f.identity.locus)));
                props.push(Self::dbg_prop("basic_spec", f.basic_spec));
                props.push(Self::dbg_prop("access", f.access));
                children.push(self.get_type(f.ty));
                if !f.initializer.is_null() {
                    children.push(self.get_expr(f.initializer));
                }
            }
            D::Variable(f) => {
                props.push(("name".into(), self.ref_name(f.identity.name)));
                props.push(("locus".into(), self.locus_text(f.identity.locus)));
                props.push(Self::dbg_prop("obj_spec", f.obj_spec));
                props.push(Self::dbg_prop("basic_spec", f.basic_spec));
                props.push(Self::dbg_prop("access", f.access));
                children.push(self.get_type(f.ty));
                if !f.home_scope.is_null() {
                    children.push(self.get_decl(f.home_scope));
                }
                if !f.initializer.is_null() {
                    children.push(self.get_expr(f.initializer));
                }
                if !f.alignment.is_null() {
                    children.push(self.get_expr(f.alignment));
                }
            }
            D::Parameter(f) => {
                props.push(("name".into(), self.reader.text(f.identity.name).to_string()));
                props.push(("locus".into(), self.locus_text(f.identity.locus)));
                props.push(("level".into(), f.level.to_string()));
                props.push(("position".into(), f.position.to_string()));
                props.push(Self::dbg_prop("sort", f.sort));
                children.push(self.get_type(f.ty));
                if !f.type_constraint.is_null() {
                    children.push(self.get_expr(f.type_constraint));
                }
                if let Some(e) = f.initializer.as_expr_index() {
                    children.push(self.get_expr(e));
                }
            }
            D::Field(f) => {
                props.push(("name".into(), self.reader.text(f.identity.name).to_string()));
                props.push(("locus".into(), self.locus_text(f.identity.locus)));
                props.push(Self::dbg_prop("obj_spec", f.obj_spec));
                props.push(Self::dbg_prop("basic_spec", f.basic_spec));
                props.push(Self::dbg_prop("access", f.access));
                children.push(self.get_type(f.ty));
                if !f.home_scope.is_null() {
                    children.push(self.get_decl(f.home_scope));
                }
                if !f.initializer.is_null() {
                    children.push(self.get_expr(f.initializer));
                }
                if !f.alignment.is_null() {
                    children.push(self.get_expr(f.alignment));
                }
            }
            D::Bitfield(f) => {
                props.push(("name".into(), self.reader.text(f.identity.name).to_string()));
                props.push(("locus".into(), self.locus_text(f.identity.locus)));
                props.push(Self::dbg_prop("obj_spec", f.obj_spec));
                props.push(Self::dbg_prop("basic_spec", f.basic_spec));
                props.push(Self::dbg_prop("access", f.access));
                children.push(self.get_type(f.ty));
                if !f.home_scope.is_null() {
                    children.push(self.get_decl(f.home_scope));
                }
                children.push(self.get_expr(f.width));
                if !f.initializer.is_null() {
                    children.push(self.get_expr(f.initializer));
                }
            }
            D::Scope(f) => {
                props.push(("name".into(), self.ref_name(f.identity.name)));
                props.push(("locus".into(), self.locus_text(f.identity.locus)));
                props.push(Self::dbg_prop("pack_size", f.pack_size));
                props.push(Self::dbg_prop("basic_spec", f.basic_spec));
                props.push(Self::dbg_prop("scope_spec", f.scope_spec));
                props.push(Self::dbg_prop("access", f.access));
                children.push(self.get_type(f.ty));
                if !f.base.is_null() {
                    children.push(self.get_type(f.base));
                }
                if !f.home_scope.is_null() {
                    children.push(self.get_decl(f.home_scope));
                }
                if !f.alignment.is_null() {
                    children.push(self.get_expr(f.alignment));
                }
                children.push(self.get_scope(f.initializer));
            }
            D::Enumeration(f) => {
                props.push(("name".into(), self.reader.text(f.identity.name).to_string()));
                props.push(("locus".into(), self.locus_text(f.identity.locus)));
                props.push(Self::dbg_prop("basic_spec", f.basic_spec));
                props.push(Self::dbg_prop("access", f.access));
                children.push(self.get_type(f.ty));
                if !f.base.is_null() {
                    children.push(self.get_type(f.base));
                }
                if !f.home_scope.is_null() {
                    children.push(self.get_decl(f.home_scope));
                }
                if !f.alignment.is_null() {
                    children.push(self.get_expr(f.alignment));
                }
                for i in 0..f.initializer.cardinality.0 {
                    let enumerator = DeclIndex::make(DeclSort::Enumerator, f.initializer.start.0 + i);
                    children.push(self.get_decl(enumerator));
                }
            }
            D::Alias(f) => {
                props.push(("name".into(), self.reader.text(f.identity.name).to_string()));
                props.push(("locus".into(), self.locus_text(f.identity.locus)));
                props.push(Self::dbg_prop("basic_spec", f.basic_spec));
                props.push(Self::dbg_prop("access", f.access));
                children.push(self.get_type(f.ty));
                if !f.home_scope.is_null() {
                    children.push(self.get_decl(f.home_scope));
                }
                children.push(self.get_type(f.aliasee));
            }
            D::Template(f) => {
                props.push(("name".into(), self.ref_name(f.core.identity.name)));
                props.push(("locus".into(), self.locus_text(f.core.identity.locus)));
                props.push(Self::dbg_prop("basic_spec", f.basic_spec));
                props.push(Self::dbg_prop("access", f.access));
                children.push(self.get_type(f.ty));
                if !f.core.home_scope.is_null() {
                    children.push(self.get_decl(f.core.home_scope));
                }
                if let Some(chart) = self.try_get_chart(f.core.chart) {
                    children.push(chart);
                }
            }
            D::PartialSpecialization(f) => {
                props.push(("name".into(), self.ref_name(f.core.identity.name)));
                props.push(("locus".into(), self.locus_text(f.core.identity.locus)));
                props.push(Self::dbg_prop("basic_spec", f.basic_spec));
                props.push(Self::dbg_prop("access", f.access));
                if !f.core.home_scope.is_null() {
                    children.push(self.get_decl(f.core.home_scope));
                }
                if let Some(chart) = self.try_get_chart(f.core.chart) {
                    children.push(chart);
                }
                props.push(("specialization_form".into(), format!("spec-form-{}", f.specialization_form.0)));
            }
            D::Specialization(f) => {
                props.push(Self::dbg_prop("sort", f.sort));
                props.push(Self::dbg_prop("basic_spec", f.basic_spec));
                props.push(Self::dbg_prop("access", f.access));
                props.push(("specialization_form".into(), format!("spec-form-{}", f.specialization_form.0)));
                if !f.decl.is_null() {
                    children.push(self.get_decl(f.decl));
                }
            }
            D::Concept(f) => {
                props.push(("name".into(), self.reader.text(f.identity.name).to_string()));
                props.push(("locus".into(), self.locus_text(f.identity.locus)));
                props.push(Self::dbg_prop("basic_spec", f.basic_spec));
                props.push(Self::dbg_prop("access", f.access));
                if !f.home_scope.is_null() {
                    children.push(self.get_decl(f.home_scope));
                }
                children.push(self.get_type(f.ty));
                if let Some(chart) = self.try_get_chart(f.chart) {
                    children.push(chart);
                }
                if !f.constraint.is_null() {
                    children.push(self.get_expr(f.constraint));
                }
                if !f.head.is_null() {
                    children.push(self.get_sentence(f.head));
                }
                if !f.body.is_null() {
                    children.push(self.get_sentence(f.body));
                }
            }
            D::DeductionGuide(f) => {
                props.push(("name".into(), self.ref_name(f.identity.name)));
                props.push(("locus".into(), self.locus_text(f.identity.locus)));
                props.push(Self::dbg_prop("traits", f.traits));
                props.push(Self::dbg_prop("basic_spec", f.basic_spec));
                if !f.home_scope.is_null() {
                    children.push(self.get_decl(f.home_scope));
                }
                if let Some(chart) = self.try_get_chart(f.source) {
                    children.push(chart);
                }
                if !f.target.is_null() {
                    children.push(self.get_expr(f.target));
                }
            }
            D::Intrinsic(f) => {
                props.push(("name".into(), self.reader.text(f.identity.name).to_string()));
                props.push(("locus".into(), self.locus_text(f.identity.locus)));
                props.push(Self::dbg_prop("basic_spec", f.basic_spec));
                props.push(Self::dbg_prop("access", f.access));
                props.push(Self::dbg_prop("traits", f.traits));
                children.push(self.get_type(f.ty));
                if !f.home_scope.is_null() {
                    children.push(self.get_decl(f.home_scope));
                }
            }
            D::Property(f) => {
                props.push(self.text_prop("get_method_name", f.get_method_name));
                props.push(self.text_prop("set_method_name", f.set_method_name));
                children.push(self.get_decl(f.data_member));
            }
            D::Segment(f) => {
                props.push(self.text_prop("name", f.name));
                props.push(self.text_prop("class_id", f.class_id));
            }
            D::Using(f) => {
                props.push(self.text_prop("identity_name", f.identity.name));
                props.push(("locus".into(), self.locus_text(f.identity.locus)));
                props.push(self.text_prop("name", f.name));
                props.push(Self::dbg_prop("basic_spec", f.basic_spec));
                props.push(Self::dbg_prop("access", f.access));
                props.push(("is_hidden".into(), f.is_hidden.to_string()));
                if !f.home_scope.is_null() {
                    children.push(self.get_decl(f.home_scope));
                }
                if !f.resolution.is_null() {
                    children.push(self.get_decl(f.resolution));
                }
                if !f.parent.is_null() {
                    children.push(self.get_expr(f.parent));
                }
            }
            D::Friend(f) => {
                if !f.reference.is_null() {
                    children.push(self.get_expr(f.reference));
                }
            }
            D::Expansion(f) => {
                props.push(("locus".into(), self.locus_text(f.locus)));
                children.push(self.get_decl(f.operand));
            }
            D::Barren(f) => {
                props.push(Self::dbg_prop("directive", f.directive));
                props.push(Self::dbg_prop("basic_spec", f.basic_spec));
                props.push(Self::dbg_prop("access", f.access));
            }
            D::SyntaxTree(f) => {
                children.push(self.get_syntax(f.tree));
            }
            D::Reference(f) => {
                props.push(self.text_prop("owner_module", f.owner_module));
                props.push(self.text_prop("owner_partition", f.owner_partition));
                if !f.local_index.is_null() {
                    children.push(self.get_decl(f.local_index));
                }
            }
            D::Tuple(f) => {
                for e in self.reader.sequence(f.elements) {
                    children.push(self.get_decl(e));
                }
            }
            D::VendorExtension(f) => {
                props.push(Self::dbg_prop("vendor_index", f.index));
            }
        }
        (id, props, children)
    }
}

// ---------------------------------------------------------------------
// Types.
// ---------------------------------------------------------------------

/// `VendorExtension` and `Count` are deliberately left out of every call
/// site's variant list, so both fall into the `other` arm and panic
/// rather than decode -- visiting either is a programming error.
macro_rules! decode_tagged {
    ($reader:expr, $index:expr, $sort_ty:path, $enum_ty:path, { $($variant:ident),+ $(,)? }) => {{
        use $sort_ty as S;
        match $index.sort() {
            $(S::$variant => <$enum_ty>::$variant($reader.get($index)),)+
            other => panic!("dom: unexpected sort tag {other:?} decoding {}", stringify!($enum_ty)),
        }
    }};
}

fn decode_type(reader: &Reader, index: TypeIndex) -> types::Type {
    decode_tagged!(reader, index, crate::index::TypeSort, types::Type, {
        Fundamental, Designated, Tor, Syntactic, Expansion, Pointer,
        PointerToMember, LvalueReference, RvalueReference, Function, Method, Array, Typename,
        Qualified, Base, Decltype, Placeholder, Tuple, Forall, Unaligned, SyntaxTree,
    })
}

fn decode_expr(reader: &Reader, index: ExprIndex) -> expr::Expr {
    decode_tagged!(reader, index, crate::index::ExprSort, expr::Expr, {
        Empty, Literal, Lambda, Type, NamedDecl, UnresolvedId, TemplateId,
        UnqualifiedId, SimpleIdentifier, Pointer, QualifiedName, Path, Read, Monad, Dyad, Triad,
        String, Temporary, Call, MemberInitializer, MemberAccess, InheritancePath,
        InitializerList, Cast, Condition, ExpressionList, SizeofType, Alignof, Label, Typeid,
        DestructorCall, SyntaxTree, FunctionString, CompoundString, StringSequence, Initializer,
        Requires, UnaryFold, BinaryFold, ProductTypeValue, SumTypeValue, ArrayValue, Placeholder,
        Expansion, Tuple, Nullptr, This, TemplateReference, Statement, TypeTraitIntrinsic,
        DesignatedInitializer, PackedTemplateArguments,
    })
}

fn decode_stmt(reader: &Reader, index: StmtIndex) -> stmt::Stmt {
    decode_tagged!(reader, index, crate::index::StmtSort, stmt::Stmt, {
        Try, If, For, Labeled, While, Block, Break, Switch, DoWhile, Goto,
        Continue, Expression, Return, Decl, Expansion, SyntaxTree, Handler, Tuple, Dir,
    })
}

fn decode_syntax(reader: &Reader, index: SyntaxIndex) -> syntax::Syntax {
    decode_tagged!(reader, index, crate::index::SyntaxSort, syntax::Syntax, {
        SimpleTypeSpecifier, DecltypeSpecifier, PlaceholderTypeSpecifier,
        TypeSpecifierSeq, DeclSpecifierSeq, VirtualSpecifierSeq, NoexceptSpecification,
        ExplicitSpecifier, EnumSpecifier, EnumeratorDefinition, ClassSpecifier,
        MemberSpecification, MemberDeclaration, MemberDeclarator, AccessSpecifier,
        BaseSpecifierList, BaseSpecifier, TypeId, TrailingReturnType, Declarator,
        PointerDeclarator, ArrayDeclarator, FunctionDeclarator, ParameterDeclarator,
        InitDeclarator, SimpleDeclaration, ConditionDeclaration, StaticAssertDeclaration,
        AliasDeclaration, ConceptDefinition, CompoundStatement, ReturnStatement, IfStatement,
        WhileStatement, DoWhileStatement, ForStatement, RangeBasedForStatement, LabeledStatement,
        BreakStatement, ContinueStatement, SwitchStatement, GotoStatement, DeclarationStatement,
        ExpressionStatement, TryBlock, Handler, HandlerSeq, StatementSeq, Expression,
        FunctionDefinition, TemplateDeclaration, RequiresClause, TemplateParameterList,
        TemplateArgumentList, TemplateId, LambdaIntroducer, LambdaDeclarator,
        AttributeSpecifierSeq, UsingDeclaration, UsingDirective, Tuple,
    })
}

impl<'r, 'ifc> Loader<'r, 'ifc> {
    fn type_key(index: TypeIndex) -> NodeKey {
        NodeKey { kind: SortKind::Type, tag: index.sort().into(), position: index.index().0 }
    }

    pub fn get_type(&mut self, index: TypeIndex) -> NodeKey {
        let key = Self::type_key(index);
        self.ensure(key, |loader| loader.build_type(index))
    }

    /// `ref(index)`: null marker, else a short pretty form if one is
    /// defined for this sort, else a stable id with the index registered
    /// as pending.
    pub fn ref_type(&mut self, index: TypeIndex) -> String {
        if index.is_null() {
            return Self::no(SortKind::Type);
        }
        if let Some(short) = self.short_type(index) {
            return short;
        }
        self.pending.insert(Self::type_key(index));
        format!("type-{}", index.index().0)
    }

    /// The short pretty forms §4.5 defines for `TypeSort`. `None` falls
    /// through to the stable-id form.
    fn short_type(&mut self, index: TypeIndex) -> Option<String> {
        let entity = decode_type(self.reader, index);
        use types::Type as T;
        match entity {
            T::Fundamental(f) => Some(fundamental_keyword(f)),
            T::Pointer(p) => Some(format!("{}*", self.ref_type(p.pointee))),
            T::LvalueReference(r) => Some(format!("{}&", self.ref_type(r.referee))),
            T::Array(a) => {
                let bound = if a.bound.is_null() { String::new() } else { self.ref_expr(a.bound) };
                Some(format!("{}[{}]", self.ref_type(a.element), bound))
            }
            T::Qualified(q) => {
                Some(format!("{} {}", self.ref_type(q.unqualified_type), qualifier_text(q.qualifiers)))
            }
            T::Function(f) => Some(format!("{}({})", self.ref_type(f.target), self.ref_type(f.source))),
            T::Method(m) => Some(format!(
                "{}({}: {})",
                self.ref_type(m.target),
                self.ref_type(m.class_type),
                self.ref_type(m.source)
            )),
            T::Tuple(t) => {
                let elements = self.reader.sequence(t.elements);
                Some(elements.into_iter().map(|e| self.ref_type(e)).collect::<Vec<_>>().join(", "))
            }
            _ => None,
        }
    }

    fn build_type(&mut self, index: TypeIndex) -> (String, Vec<(String, String)>, Vec<NodeKey>) {
        let id = format!("type-{}", index.index().0);
        let entity = decode_type(self.reader, index);
        let mut props = Vec::new();
        let mut children = Vec::new();
        use types::Type as T;
        match entity {
            T::VendorExtension(v) => props.push(Self::dbg_prop("vendor_index", v.index)),
            T::Fundamental(f) => {
                props.push(("keyword".into(), fundamental_keyword(f)));
                props.push(Self::dbg_prop("basis", f.basis));
                props.push(Self::dbg_prop("precision", f.precision));
                props.push(Self::dbg_prop("sign", f.sign));
            }
            T::Designated(d) => children.push(self.get_decl(d.decl)),
            T::Tor(t) => {
                props.push(Self::dbg_prop("eh_spec", t.eh_spec));
                props.push(Self::dbg_prop("convention", t.convention));
                children.push(self.get_type(t.source));
            }
            T::Syntactic(s) => children.push(self.get_expr(s.expr)),
            T::Expansion(e) => {
                props.push(Self::dbg_prop("mode", e.mode));
                children.push(self.get_type(e.pack));
            }
            T::Pointer(p) => {
                props.push(("pretty".into(), self.ref_type(index).clone()));
                children.push(self.get_type(p.pointee));
            }
            T::PointerToMember(p) => {
                children.push(self.get_type(p.scope));
                children.push(self.get_type(p.ty));
            }
            T::LvalueReference(r) => {
                children.push(self.get_type(r.referee));
            }
            T::RvalueReference(r) => {
                children.push(self.get_type(r.referee));
            }
            T::Function(f) => {
                props.push(Self::dbg_prop("eh_spec", f.eh_spec));
                props.push(Self::dbg_prop("convention", f.convention));
                props.push(Self::dbg_prop("traits", f.traits));
                children.push(self.get_type(f.target));
                children.push(self.get_type(f.source));
            }
            T::Method(m) => {
                props.push(Self::dbg_prop("eh_spec", m.eh_spec));
                props.push(Self::dbg_prop("convention", m.convention));
                props.push(Self::dbg_prop("traits", m.traits));
                children.push(self.get_type(m.target));
                children.push(self.get_type(m.source));
                children.push(self.get_type(m.class_type));
            }
            T::Array(a) => {
                children.push(self.get_type(a.element));
                if !a.bound.is_null() {
                    children.push(self.get_expr(a.bound));
                }
            }
            T::Typename(t) => children.push(self.get_expr(t.path)),
            T::Qualified(q) => {
                props.push(("qualifiers".into(), qualifier_text(q.qualifiers)));
                children.push(self.get_type(q.unqualified_type));
            }
            T::Base(b) => {
                props.push(Self::dbg_prop("access", b.access));
                props.push(Self::dbg_prop("traits", b.traits));
                children.push(self.get_type(b.ty));
            }
            T::Decltype(d) => children.push(self.get_syntax(d.expression)),
            T::Placeholder(p) => {
                props.push(Self::dbg_prop("basis", p.basis));
                if !p.constraint.is_null() {
                    children.push(self.get_expr(p.constraint));
                }
                if !p.elaboration.is_null() {
                    children.push(self.get_type(p.elaboration));
                }
            }
            T::Tuple(t) => {
                for e in self.reader.sequence(t.elements) {
                    children.push(self.get_type(e));
                }
            }
            T::Forall(f) => {
                if let Some(chart) = self.try_get_chart(f.chart) {
                    children.push(chart);
                }
                children.push(self.get_type(f.subject));
            }
            T::Unaligned(u) => children.push(self.get_type(u.operand)),
            T::SyntaxTree(s) => children.push(self.get_syntax(s.syntax)),
        }
        (id, props, children)
    }
}

/// `sign + precision + basis` the way C++ itself spells a fundamental
/// type's keyword: `int` is elided once a width modifier already says
/// enough (`unsigned short`, not `unsigned short int`).
fn fundamental_keyword(f: types::FundamentalType) -> String {
    use types::{TypeBasis as B, TypePrecision as P, TypeSign as Sg};
    if let Some(bits) = match f.precision {
        P::Bit8 => Some(8),
        P::Bit16 => Some(16),
        P::Bit32 => Some(32),
        P::Bit64 => Some(64),
        P::Bit128 => Some(128),
        _ => None,
    } {
        let prefix = if f.sign == Sg::Unsigned { "u" } else { "" };
        return format!("{prefix}int{bits}");
    }

    let mut words = Vec::new();
    match f.sign {
        Sg::Signed => words.push("signed"),
        Sg::Unsigned => words.push("unsigned"),
        Sg::Plain => {}
    }
    match f.precision {
        P::Short => words.push("short"),
        P::Long => words.push("long"),
        P::Default => {}
        P::Bit8 | P::Bit16 | P::Bit32 | P::Bit64 | P::Bit128 => unreachable!("handled above"),
    }
    let elide_int = matches!(f.precision, P::Short | P::Long) && f.basis == B::Int;
    if !elide_int {
        let basis = match f.basis {
            B::Void => "void",
            B::Bool => "bool",
            B::Char => "char",
            B::WcharT => "wchar_t",
            B::Int => "int",
            B::Float => "float",
            B::Double => "double",
            B::Nullptr => "nullptr_t",
            B::Ellipsis => "...",
            B::SegmentType => "segment",
            B::Class => "class",
            B::Struct => "struct",
            B::Union => "union",
            B::Enum => "enum",
            B::Typename => "typename",
            B::Namespace => "namespace",
            B::Interface => "__interface",
            B::Function => "function",
            B::Empty => "",
            B::VariableTemplate => "variable-template",
            B::Concept => "concept",
            B::Auto => "auto",
            B::DecltypeAuto => "decltype(auto)",
            B::Overload => "overload-set",
        };
        if !basis.is_empty() {
            words.push(basis);
        }
    }
    words.join(" ")
}

fn qualifier_text(q: crate::model::common::Qualifier) -> String {
    let mut words = Vec::new();
    if q.is_const() {
        words.push("const");
    }
    if q.is_volatile() {
        words.push("volatile");
    }
    if q.is_restrict() {
        words.push("restrict");
    }
    words.join(" ")
}

// ---------------------------------------------------------------------
// Expressions.
// ---------------------------------------------------------------------

impl<'r, 'ifc> Loader<'r, 'ifc> {
    fn expr_key(index: ExprIndex) -> NodeKey {
        NodeKey { kind: SortKind::Expr, tag: index.sort().into(), position: index.index().0 }
    }

    pub fn get_expr(&mut self, index: ExprIndex) -> NodeKey {
        let key = Self::expr_key(index);
        self.ensure(key, |loader| loader.build_expr(index))
    }

    pub fn ref_expr(&mut self, index: ExprIndex) -> String {
        if index.is_null() {
            return Self::no(SortKind::Expr);
        }
        if let Some(short) = self.short_expr(index) {
            return short;
        }
        self.pending.insert(Self::expr_key(index));
        format!("expr-{}", index.index().0)
    }

    /// The four short forms §4.5 names for `ExprSort`.
    fn short_expr(&mut self, index: ExprIndex) -> Option<String> {
        let entity = decode_expr(self.reader, index);
        use expr::Expr as E;
        match entity {
            E::Nullptr(_) => Some("nullptr".to_string()),
            E::This(_) => Some("this".to_string()),
            E::Literal(l) => Some(literal_text(self.reader.literal(l.value))),
            E::NamedDecl(n) => Some(format!("decl-ref({})", self.ref_decl(n.decl))),
            _ => None,
        }
    }

    fn build_expr(&mut self, index: ExprIndex) -> (String, Vec<(String, String)>, Vec<NodeKey>) {
        let id = format!("expr-{}", index.index().0);
        let entity = decode_expr(self.reader, index);
        let mut props = Vec::new();
        let mut children = Vec::new();
        use expr::Expr as E;
        match entity {
            E::VendorExtension(v) => props.push(Self::dbg_prop("vendor_index", v.index)),
            E::Empty(e) => {
                props.push(("locus".into(), self.locus_text(e.locus)));
                children.push(self.get_type(e.ty));
            }
            E::Literal(l) => {
                props.push(("locus".into(), self.locus_text(l.locus)));
                props.push(("value".into(), literal_text(self.reader.literal(l.value))));
                children.push(self.get_type(l.ty));
            }
            E::Lambda(l) => {
                children.push(self.get_syntax(l.introducer));
                if !l.template_parameters.is_null() {
                    children.push(self.get_syntax(l.template_parameters));
                }
                children.push(self.get_syntax(l.declarator));
                if !l.requires_clause.is_null() {
                    children.push(self.get_syntax(l.requires_clause));
                }
                children.push(self.get_syntax(l.body));
            }
            E::Type(t) => {
                props.push(("locus".into(), self.locus_text(t.locus)));
                children.push(self.get_type(t.ty));
                children.push(self.get_type(t.denotation));
            }
            E::NamedDecl(n) => {
                props.push(("locus".into(), self.locus_text(n.locus)));
                children.push(self.get_type(n.ty));
                children.push(self.get_decl(n.decl));
            }
            E::UnresolvedId(u) => {
                props.push(("locus".into(), self.locus_text(u.locus)));
                children.push(self.get_type(u.ty));
                children.push(self.get_name(u.name));
            }
            E::TemplateId(t) => {
                props.push(("locus".into(), self.locus_text(t.locus)));
                children.push(self.get_type(t.ty));
                children.push(self.get_expr(t.primary_template));
                if !t.arguments.is_null() {
                    children.push(self.get_expr(t.arguments));
                }
            }
            E::UnqualifiedId(u) => {
                props.push(("locus".into(), self.locus_text(u.locus)));
                props.push(("template_keyword".into(), self.locus_text(u.template_keyword)));
                children.push(self.get_type(u.ty));
                children.push(self.get_name(u.name));
                if !u.symbol.is_null() {
                    children.push(self.get_expr(u.symbol));
                }
            }
            E::SimpleIdentifier(s) => {
                props.push(("locus".into(), self.locus_text(s.locus)));
                children.push(self.get_type(s.ty));
                children.push(self.get_name(s.name));
            }
            E::Pointer(p) => {
                props.push(("locus".into(), self.locus_text(p.locus)));
            }
            E::QualifiedName(q) => {
                props.push(("locus".into(), self.locus_text(q.locus)));
                props.push(("typename_keyword".into(), self.locus_text(q.typename_keyword)));
                children.push(self.get_type(q.ty));
                children.push(self.get_expr(q.elements));
            }
            E::Path(p) => {
                props.push(("locus".into(), self.locus_text(p.locus)));
                children.push(self.get_type(p.ty));
                children.push(self.get_expr(p.scope));
                children.push(self.get_expr(p.member));
            }
            E::Read(r) => {
                props.push(("locus".into(), self.locus_text(r.locus)));
                props.push(Self::dbg_prop("kind", r.kind));
                children.push(self.get_type(r.ty));
                children.push(self.get_expr(r.child));
            }
            E::Monad(m) => {
                props.push(("locus".into(), self.locus_text(m.locus)));
                props.push(Self::dbg_prop("operator", m.assort));
                children.push(self.get_type(m.ty));
                if !m.impl_decl.is_null() {
                    children.push(self.get_decl(m.impl_decl));
                }
                children.push(self.get_expr(m.arg));
            }
            E::Dyad(d) => {
                props.push(("locus".into(), self.locus_text(d.locus)));
                props.push(Self::dbg_prop("operator", d.assort));
                children.push(self.get_type(d.ty));
                if !d.impl_decl.is_null() {
                    children.push(self.get_decl(d.impl_decl));
                }
                for arg in d.arg {
                    children.push(self.get_expr(arg));
                }
            }
            E::Triad(t) => {
                props.push(("locus".into(), self.locus_text(t.locus)));
                props.push(Self::dbg_prop("operator", t.assort));
                children.push(self.get_type(t.ty));
                if !t.impl_decl.is_null() {
                    children.push(self.get_decl(t.impl_decl));
                }
                for arg in t.arg {
                    children.push(self.get_expr(arg));
                }
            }
            E::String(s) => {
                props.push(("locus".into(), self.locus_text(s.locus)));
                let literal = self.reader.string_literal(s.string);
                props.push(("text".into(), self.reader.text(literal.start).to_string()));
                children.push(self.get_type(s.ty));
            }
            E::Temporary(t) => {
                props.push(("locus".into(), self.locus_text(t.locus)));
                props.push(("index".into(), t.index.to_string()));
                children.push(self.get_type(t.ty));
            }
            E::Call(c) => {
                props.push(("locus".into(), self.locus_text(c.locus)));
                children.push(self.get_type(c.ty));
                children.push(self.get_expr(c.function));
                if !c.arguments.is_null() {
                    children.push(self.get_expr(c.arguments));
                }
            }
            E::MemberInitializer(m) => {
                props.push(("locus".into(), self.locus_text(m.locus)));
                children.push(self.get_type(m.ty));
                children.push(self.get_decl(m.member));
                children.push(self.get_type(m.base));
                children.push(self.get_expr(m.expression));
            }
            E::MemberAccess(m) => {
                props.push(("locus".into(), self.locus_text(m.locus)));
                props.push(self.text_prop("name", m.name));
                children.push(self.get_type(m.ty));
                children.push(self.get_expr(m.offset));
                children.push(self.get_type(m.parent));
            }
            E::InheritancePath(i) => {
                props.push(("locus".into(), self.locus_text(i.locus)));
                children.push(self.get_type(i.ty));
                children.push(self.get_expr(i.path));
            }
            E::InitializerList(i) => {
                props.push(("locus".into(), self.locus_text(i.locus)));
                children.push(self.get_type(i.ty));
                if !i.elements.is_null() {
                    children.push(self.get_expr(i.elements));
                }
            }
            E::Cast(c) => {
                props.push(("locus".into(), self.locus_text(c.locus)));
                props.push(Self::dbg_prop("operator", c.assort));
                children.push(self.get_type(c.ty));
                children.push(self.get_expr(c.source));
                children.push(self.get_type(c.target));
            }
            E::Condition(c) => {
                props.push(("locus".into(), self.locus_text(c.locus)));
                children.push(self.get_type(c.ty));
                children.push(self.get_expr(c.expression));
            }
            E::ExpressionList(e) => {
                props.push(("left_delimiter".into(), self.locus_text(e.left_delimiter)));
                props.push(("right_delimiter".into(), self.locus_text(e.right_delimiter)));
                props.push(Self::dbg_prop("delimiter", e.delimiter));
                if !e.expressions.is_null() {
                    children.push(self.get_expr(e.expressions));
                }
            }
            E::SizeofType(s) => {
                props.push(("locus".into(), self.locus_text(s.locus)));
                children.push(self.get_type(s.ty));
                children.push(self.get_type(s.operand));
            }
            E::Alignof(a) => {
                props.push(("locus".into(), self.locus_text(a.locus)));
                children.push(self.get_type(a.ty));
                children.push(self.get_type(a.type_id));
            }
            E::Label(l) => {
                props.push(("locus".into(), self.locus_text(l.locus)));
                children.push(self.get_type(l.ty));
                children.push(self.get_expr(l.designator));
            }
            E::Typeid(t) => {
                props.push(("locus".into(), self.locus_text(t.locus)));
                children.push(self.get_type(t.ty));
                children.push(self.get_type(t.operand));
            }
            E::DestructorCall(d) => {
                props.push(("locus".into(), self.locus_text(d.locus)));
                props.push(Self::dbg_prop("kind", d.kind));
                children.push(self.get_type(d.ty));
                children.push(self.get_expr(d.name));
                if !d.decltype_specifier.is_null() {
                    children.push(self.get_syntax(d.decltype_specifier));
                }
            }
            E::SyntaxTree(s) => {
                children.push(self.get_syntax(s.syntax));
            }
            E::FunctionString(f) => {
                props.push(("locus".into(), self.locus_text(f.locus)));
                props.push(self.text_prop("macro_name", f.macro_name));
                children.push(self.get_type(f.ty));
            }
            E::CompoundString(c) => {
                props.push(("locus".into(), self.locus_text(c.locus)));
                props.push(self.text_prop("prefix", c.prefix));
                children.push(self.get_type(c.ty));
                children.push(self.get_expr(c.string));
            }
            E::StringSequence(s) => {
                props.push(("locus".into(), self.locus_text(s.locus)));
                children.push(self.get_type(s.ty));
                children.push(self.get_expr(s.strings));
            }
            E::Initializer(i) => {
                props.push(("locus".into(), self.locus_text(i.locus)));
                props.push(Self::dbg_prop("kind", i.kind));
                children.push(self.get_type(i.ty));
                if !i.initializer.is_null() {
                    children.push(self.get_expr(i.initializer));
                }
            }
            E::Requires(r) => {
                props.push(("locus".into(), self.locus_text(r.locus)));
                children.push(self.get_type(r.ty));
                if !r.parameters.is_null() {
                    children.push(self.get_syntax(r.parameters));
                }
                children.push(self.get_syntax(r.body));
            }
            E::UnaryFold(u) => {
                props.push(("locus".into(), self.locus_text(u.locus)));
                props.push(Self::dbg_prop("operator", u.op));
                props.push(Self::dbg_prop("assoc", u.assoc));
                children.push(self.get_type(u.ty));
                children.push(self.get_expr(u.expr));
            }
            E::BinaryFold(b) => {
                props.push(("locus".into(), self.locus_text(b.locus)));
                props.push(Self::dbg_prop("operator", b.op));
                props.push(Self::dbg_prop("assoc", b.assoc));
                children.push(self.get_type(b.ty));
                children.push(self.get_expr(b.left));
                children.push(self.get_expr(b.right));
            }
            E::ProductTypeValue(p) => {
                props.push(("locus".into(), self.locus_text(p.locus)));
                children.push(self.get_type(p.ty));
                children.push(self.get_type(p.structure));
                if !p.members.is_null() {
                    children.push(self.get_expr(p.members));
                }
                if !p.base_class_values.is_null() {
                    children.push(self.get_expr(p.base_class_values));
                }
            }
            E::SumTypeValue(s) => {
                props.push(("locus".into(), self.locus_text(s.locus)));
                props.push(("active_member".into(), s.active_member.to_string()));
                children.push(self.get_type(s.ty));
                children.push(self.get_type(s.variant));
                children.push(self.get_expr(s.value));
            }
            E::ArrayValue(a) => {
                props.push(("locus".into(), self.locus_text(a.locus)));
                children.push(self.get_type(a.ty));
                children.push(self.get_type(a.element_type));
                if !a.elements.is_null() {
                    children.push(self.get_expr(a.elements));
                }
            }
            E::Placeholder(p) => {
                props.push(("locus".into(), self.locus_text(p.locus)));
                children.push(self.get_type(p.ty));
            }
            E::Expansion(e) => {
                props.push(("locus".into(), self.locus_text(e.locus)));
                children.push(self.get_type(e.ty));
                children.push(self.get_expr(e.operand));
            }
            E::Tuple(t) => {
                props.push(("locus".into(), self.locus_text(t.locus)));
                children.push(self.get_type(t.ty));
                for e in self.reader.sequence(t.elements) {
                    children.push(self.get_expr(e));
                }
            }
            E::Nullptr(n) => {
                props.push(("locus".into(), self.locus_text(n.locus)));
                children.push(self.get_type(n.ty));
            }
            E::This(t) => {
                props.push(("locus".into(), self.locus_text(t.locus)));
                children.push(self.get_type(t.ty));
            }
            E::TemplateReference(t) => {
                props.push(("locus".into(), self.locus_text(t.locus)));
                children.push(self.get_type(t.ty));
                children.push(self.get_decl(t.member));
                children.push(self.get_name(t.member_name));
                children.push(self.get_type(t.parent));
                if !t.template_arguments.is_null() {
                    children.push(self.get_expr(t.template_arguments));
                }
            }
            E::Statement(s) => {
                props.push(("locus".into(), self.locus_text(s.locus)));
                children.push(self.get_type(s.ty));
                children.push(self.get_stmt(s.stmt));
            }
            E::TypeTraitIntrinsic(t) => {
                props.push(("locus".into(), self.locus_text(t.locus)));
                props.push(Self::dbg_prop("intrinsic", t.intrinsic));
                children.push(self.get_type(t.ty));
                children.push(self.get_type(t.arguments));
            }
            E::DesignatedInitializer(d) => {
                props.push(("locus".into(), self.locus_text(d.locus)));
                props.push(self.text_prop("member", d.member));
                children.push(self.get_type(d.ty));
                children.push(self.get_expr(d.initializer));
            }
            E::PackedTemplateArguments(p) => {
                props.push(("locus".into(), self.locus_text(p.locus)));
                children.push(self.get_type(p.ty));
                children.push(self.get_expr(p.arguments));
            }
        }
        (id, props, children)
    }
}

fn literal_text(value: LiteralValue) -> String {
    match value {
        LiteralValue::Integer(i) => i.to_string(),
        LiteralValue::FloatingPoint(f) => f.to_string(),
    }
}

// ---------------------------------------------------------------------
// Statements.
// ---------------------------------------------------------------------

impl<'r, 'ifc> Loader<'r, 'ifc> {
    fn stmt_key(index: StmtIndex) -> NodeKey {
        NodeKey { kind: SortKind::Stmt, tag: index.sort().into(), position: index.index().0 }
    }

    pub fn get_stmt(&mut self, index: StmtIndex) -> NodeKey {
        let key = Self::stmt_key(index);
        self.ensure(key, |loader| loader.build_stmt(index))
    }

    pub fn ref_stmt(&mut self, index: StmtIndex) -> String {
        if index.is_null() {
            return Self::no(SortKind::Stmt);
        }
        self.pending.insert(Self::stmt_key(index));
        format!("stmt-{}", index.index().0)
    }

    fn build_stmt(&mut self, index: StmtIndex) -> (String, Vec<(String, String)>, Vec<NodeKey>) {
        let id = format!("stmt-{}", index.index().0);
        let entity = decode_stmt(self.reader, index);
        let mut props = Vec::new();
        let mut children = Vec::new();
        use stmt::Stmt as S;
        match entity {
            S::VendorExtension(v) => props.push(Self::dbg_prop("vendor_index", v.index)),
            S::Try(t) => {
                props.push(("locus".into(), self.locus_text(t.locus)));
                for s in self.reader.sequence(t.statements) {
                    children.push(self.get_stmt(s));
                }
                if !t.handlers.is_null() {
                    children.push(self.get_stmt(t.handlers));
                }
            }
            S::If(i) => {
                props.push(("locus".into(), self.locus_text(i.locus)));
                if !i.init.is_null() {
                    children.push(self.get_stmt(i.init));
                }
                children.push(self.get_stmt(i.condition));
                children.push(self.get_stmt(i.consequence));
                if !i.alternative.is_null() {
                    children.push(self.get_stmt(i.alternative));
                }
            }
            S::For(f) => {
                props.push(("locus".into(), self.locus_text(f.locus)));
                if !f.init.is_null() {
                    children.push(self.get_stmt(f.init));
                }
                if !f.condition.is_null() {
                    children.push(self.get_stmt(f.condition));
                }
                if !f.increment.is_null() {
                    children.push(self.get_stmt(f.increment));
                }
                children.push(self.get_stmt(f.body));
            }
            S::Labeled(l) => {
                props.push(("locus".into(), self.locus_text(l.locus)));
                props.push(("is_default".into(), l.label.is_null().to_string()));
                children.push(self.get_type(l.ty));
                if !l.label.is_null() {
                    children.push(self.get_expr(l.label));
                }
                children.push(self.get_stmt(l.statement));
            }
            S::While(w) => {
                props.push(("locus".into(), self.locus_text(w.locus)));
                children.push(self.get_stmt(w.condition));
                children.push(self.get_stmt(w.body));
            }
            S::Block(b) => {
                props.push(("locus".into(), self.locus_text(b.locus)));
                for s in self.reader.sequence(b.statements) {
                    children.push(self.get_stmt(s));
                }
            }
            S::Break(b) => {
                props.push(("locus".into(), self.locus_text(b.locus)));
            }
            S::Switch(s) => {
                props.push(("locus".into(), self.locus_text(s.locus)));
                if !s.init.is_null() {
                    children.push(self.get_stmt(s.init));
                }
                children.push(self.get_expr(s.control));
                children.push(self.get_stmt(s.body));
            }
            S::DoWhile(d) => {
                props.push(("locus".into(), self.locus_text(d.locus)));
                children.push(self.get_expr(d.condition));
                children.push(self.get_stmt(d.body));
            }
            S::Goto(g) => {
                props.push(("locus".into(), self.locus_text(g.locus)));
                children.push(self.get_expr(g.target));
            }
            S::Continue(c) => {
                props.push(("locus".into(), self.locus_text(c.locus)));
            }
            S::Expression(e) => {
                props.push(("locus".into(), self.locus_text(e.locus)));
                children.push(self.get_expr(e.expr));
            }
            S::Return(r) => {
                props.push(("locus".into(), self.locus_text(r.locus)));
                children.push(self.get_type(r.ty));
                if !r.expr.is_null() {
                    children.push(self.get_expr(r.expr));
                }
                children.push(self.get_type(r.function_type));
            }
            S::Decl(d) => {
                props.push(("locus".into(), self.locus_text(d.locus)));
                children.push(self.get_decl(d.decl));
            }
            S::Expansion(e) => {
                props.push(("locus".into(), self.locus_text(e.locus)));
                children.push(self.get_stmt(e.operand));
            }
            S::SyntaxTree(s) => {
                children.push(self.get_syntax(s.syntax));
            }
            S::Handler(h) => {
                props.push(("locus".into(), self.locus_text(h.locus)));
                if !h.exception.is_null() {
                    children.push(self.get_decl(h.exception));
                }
                children.push(self.get_stmt(h.body));
            }
            S::Tuple(t) => {
                props.push(("locus".into(), self.locus_text(t.locus)));
                children.push(self.get_type(t.ty));
                for s in self.reader.sequence(t.elements) {
                    children.push(self.get_stmt(s));
                }
            }
            S::Dir(d) => {
                props.push(Self::dbg_prop("directive", d.directive));
            }
        }
        (id, props, children)
    }
}

// ---------------------------------------------------------------------
// Names.
// ---------------------------------------------------------------------

impl<'r, 'ifc> Loader<'r, 'ifc> {
    fn name_key(index: NameIndex) -> NodeKey {
        NodeKey { kind: SortKind::Name, tag: index.sort().into(), position: index.index().0 }
    }

    pub fn get_name(&mut self, index: NameIndex) -> NodeKey {
        let key = Self::name_key(index);
        self.ensure(key, |loader| loader.build_name(index))
    }

    pub fn ref_name(&mut self, index: NameIndex) -> String {
        if index.is_null() {
            return Self::no(SortKind::Name);
        }
        self.pending.insert(Self::name_key(index));
        format!("name-{}", index.index().0)
    }

    fn build_name(&mut self, index: NameIndex) -> (String, Vec<(String, String)>, Vec<NodeKey>) {
        let id = format!("name-{}", index.index().0);
        let mut props = Vec::new();
        let mut children = Vec::new();
        match index.sort() {
            // `Identifier` is the degenerate case: the packed position *is*
            // the `TextOffset`, with no partition row of its own.
            NameSort::Identifier => {
                let text = self.reader.text(TextOffset(index.index().0));
                props.push(("text".into(), text.to_string()));
            }
            NameSort::Operator => {
                let op: name::OperatorFunctionId = self.reader.get(index);
                props.push(self.text_prop("name", op.name));
                props.push(Self::dbg_prop("symbol", op.symbol));
            }
            NameSort::Conversion => {
                let conv: name::ConversionFunctionId = self.reader.get(index);
                props.push(self.text_prop("name", conv.name));
                children.push(self.get_type(conv.target));
            }
            NameSort::Literal => {
                let lit: name::LiteralOperatorId = self.reader.get(index);
                props.push(self.text_prop("name", lit.name_index));
            }
            NameSort::Template => {
                let t: name::TemplateName = self.reader.get(index);
                children.push(self.get_name(t.name));
            }
            NameSort::Specialization => {
                let s: name::SpecializationName = self.reader.get(index);
                children.push(self.get_name(s.primary_template));
                if !s.arguments.is_null() {
                    children.push(self.get_expr(s.arguments));
                }
            }
            NameSort::SourceFile => {
                let s: name::SourceFileName = self.reader.get(index);
                props.push(self.text_prop("name", s.name));
                props.push(self.text_prop("include_guard", s.include_guard));
            }
            NameSort::Guide => {
                let g: name::GuideName = self.reader.get(index);
                children.push(self.get_decl(g.primary_template));
            }
            NameSort::Count => unreachable!("NameSort::Count is never a real name sort"),
        }
        (id, props, children)
    }
}

// ---------------------------------------------------------------------
// Syntax trees: decoded in full but not expanded into child edges. These
// are pre-elaboration parse fragments; the overwhelming majority of DOM
// consumers never descend into them, so every field is surfaced as text
// rather than as graph edges.
// ---------------------------------------------------------------------

impl<'r, 'ifc> Loader<'r, 'ifc> {
    fn syntax_key(index: SyntaxIndex) -> NodeKey {
        NodeKey { kind: SortKind::Syntax, tag: index.sort().into(), position: index.index().0 }
    }

    pub fn get_syntax(&mut self, index: SyntaxIndex) -> NodeKey {
        let key = Self::syntax_key(index);
        self.ensure(key, |loader| {
            let id = format!("syntax-{}", index.index().0);
            let entity = decode_syntax(loader.reader, index);
            let props = vec![("debug".to_string(), format!("{entity:?}"))];
            (id, props, Vec::new())
        })
    }

    pub fn ref_syntax(&mut self, index: SyntaxIndex) -> String {
        if index.is_null() {
            return Self::no(SortKind::Syntax);
        }
        self.pending.insert(Self::syntax_key(index));
        format!("syntax-{}", index.index().0)
    }
}

// ---------------------------------------------------------------------
// Charts: no backing entity record exists in this data model at all (no
// partition decodes a chart's parameter list), so a chart node carries
// only its own key -- never decoded content.
// ---------------------------------------------------------------------

impl<'r, 'ifc> Loader<'r, 'ifc> {
    fn chart_key(index: ChartIndex) -> NodeKey {
        NodeKey { kind: SortKind::Chart, tag: index.sort().into(), position: index.index().0 }
    }

    /// `None` for `ChartSort::None`; a minimal node otherwise.
    pub fn try_get_chart(&mut self, index: ChartIndex) -> Option<NodeKey> {
        if index.sort() == ChartSort::None {
            return None;
        }
        let key = Self::chart_key(index);
        Some(self.ensure(key, |_loader| {
            let id = format!("chart-{}", index.index().0);
            let props = vec![("sort".to_string(), format!("{:?}", index.sort()))];
            (id, props, Vec::new())
        }))
    }

    pub fn ref_chart(&mut self, index: ChartIndex) -> String {
        if index.sort() == ChartSort::None {
            return Self::no(SortKind::Chart);
        }
        self.pending.insert(Self::chart_key(index));
        format!("chart-{}", index.index().0)
    }
}

// ---------------------------------------------------------------------
// Scopes: the member list of a named scope, fully decodable via
// `Reader::try_scope`.
// ---------------------------------------------------------------------

impl<'r, 'ifc> Loader<'r, 'ifc> {
    fn scope_key(index: ScopeIndex) -> NodeKey {
        NodeKey { kind: SortKind::Scope, tag: 0, position: index.0 }
    }

    pub fn get_scope(&mut self, index: ScopeIndex) -> NodeKey {
        let key = Self::scope_key(index);
        self.ensure(key, |loader| {
            let id = format!("scope-{}", index.0);
            let mut children = Vec::new();
            if let Some(extent) = loader.reader.try_scope(index) {
                for member in loader.reader.sequence(extent.members) {
                    children.push(loader.get_decl(member));
                }
            }
            (id, Vec::new(), children)
        })
    }

    pub fn ref_scope(&mut self, index: ScopeIndex) -> String {
        if index.is_null() {
            return Self::no(SortKind::Scope);
        }
        self.pending.insert(Self::scope_key(index));
        format!("scope-{}", index.0)
    }
}

// ---------------------------------------------------------------------
// Sentences: like charts, no decodable record exists for this unisorted
// family (only `LineIndex`, `SpecFormIndex` and `ScopeIndex` have one), so
// a sentence node is a bare placeholder.
// ---------------------------------------------------------------------

impl<'r, 'ifc> Loader<'r, 'ifc> {
    fn sentence_key(index: SentenceIndex) -> NodeKey {
        NodeKey { kind: SortKind::Sentence, tag: 0, position: index.0 }
    }

    pub fn get_sentence(&mut self, index: SentenceIndex) -> NodeKey {
        let key = Self::sentence_key(index);
        self.ensure(key, |_loader| (format!("sentence-{}", index.0), Vec::new(), Vec::new()))
    }

    pub fn ref_sentence(&mut self, index: SentenceIndex) -> String {
        if index.is_null() {
            return Self::no(SortKind::Sentence);
        }
        self.pending.insert(Self::sentence_key(index));
        format!("sentence-{}", index.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::{Designator, InputIfc, ValidationOptions};
    use crate::index::{DeclSort, ExprSort, Index, TypeSort, UnitSort};

    fn build_file(extra_partitions: &[(&str, Vec<Vec<u8>>)], unit_path: &str) -> Vec<u8> {
        let mut strings = vec![0u8];
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
        header.push(0u8);
        header.push(44u8);
        header.push(1u8);
        header.push(0u8);
        header.extend_from_slice(&0u32.to_le_bytes());
        let string_table_bytes_placeholder = header.len();
        header.extend_from_slice(&0u32.to_le_bytes());
        header.extend_from_slice(&(strings.len() as u32).to_le_bytes());
        let unit = crate::index::UnitIndex::new(UnitSort::Primary, TextOffset(path_off));
        header.extend_from_slice(&unit.rep().to_le_bytes());
        header.extend_from_slice(&path_off.to_le_bytes());
        header.extend_from_slice(&0u32.to_le_bytes());
        let toc_offset_placeholder = header.len();
        header.extend_from_slice(&0u32.to_le_bytes());
        header.extend_from_slice(&(toc_entries.len() as u32).to_le_bytes());
        header.push(0u8);

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

    fn reader_from(bytes: &[u8]) -> Reader<'_> {
        let input = InputIfc::validate(
            bytes,
            std::path::Path::new("/tmp/unit.cpp"),
            UnitSort::Primary,
            &Designator::ModuleName(String::new()),
            &ValidationOptions { allow_any_primary_interface: true, ..Default::default() },
        )
        .expect("valid container");
        Reader::new(input).expect("known partition names")
    }

    fn friend_row() -> Vec<u8> {
        ExprIndex::make(ExprSort::NamedDecl, 3).rep().to_le_bytes().to_vec()
    }

    #[test]
    fn sort_kind_names_are_lowercase() {
        assert_eq!(SortKind::Decl.name(), "decl");
        assert_eq!(SortKind::Type.name(), "type");
        assert_eq!(SortKind::Sentence.name(), "sentence");
    }

    #[test]
    fn ref_decl_of_null_is_the_no_marker() {
        let bytes = build_file(&[], "/tmp/unit.cpp");
        let reader = reader_from(&bytes);
        let mut loader = Loader::new(&reader);
        assert_eq!(loader.ref_decl(DeclIndex::default()), "no-decl");
    }

    #[test]
    fn get_decl_is_idempotent_across_cycles() {
        let bytes = build_file(&[("decl.friend", vec![friend_row()])], "/tmp/unit.cpp");
        let reader = reader_from(&bytes);
        let mut loader = Loader::new(&reader);

        let index = DeclIndex::make(DeclSort::Friend, 0);
        let first = loader.get_decl(index);
        let second = loader.get_decl(index);
        assert_eq!(first, second);
        // Only one node materialized despite two `get_decl` calls.
        assert_eq!(loader.nodes.len(), 1);
    }

    #[test]
    fn friend_decl_children_include_its_reference() {
        let bytes = build_file(&[("decl.friend", vec![friend_row()])], "/tmp/unit.cpp");
        let reader = reader_from(&bytes);
        let mut loader = Loader::new(&reader);

        let index = DeclIndex::make(DeclSort::Friend, 0);
        let key = loader.get_decl(index);
        let node = loader.node(key);
        assert_eq!(node.children.len(), 1);
        assert_eq!(node.children[0].kind, SortKind::Expr);
    }

    #[test]
    fn ref_type_of_null_is_the_no_marker() {
        let bytes = build_file(&[], "/tmp/unit.cpp");
        let reader = reader_from(&bytes);
        let mut loader = Loader::new(&reader);

        assert_eq!(loader.ref_type(TypeIndex::default()), "no-type");
        assert!(loader.pending_references().next().is_none());
    }

    #[test]
    fn fundamental_keyword_matches_examples() {
        use types::{FundamentalType, TypeBasis, TypePrecision, TypeSign};
        let unsigned_short = FundamentalType {
            basis: TypeBasis::Int,
            precision: TypePrecision::Short,
            sign: TypeSign::Unsigned,
        };
        assert_eq!(fundamental_keyword(unsigned_short), "unsigned short");

        let uint64 = FundamentalType {
            basis: TypeBasis::Int,
            precision: TypePrecision::Bit64,
            sign: TypeSign::Unsigned,
        };
        assert_eq!(fundamental_keyword(uint64), "uint64");

        let int8 = FundamentalType {
            basis: TypeBasis::Int,
            precision: TypePrecision::Bit8,
            sign: TypeSign::Signed,
        };
        assert_eq!(fundamental_keyword(int8), "int8");
    }

    #[test]
    fn try_get_chart_is_none_for_chart_sort_none() {
        let bytes = build_file(&[], "/tmp/unit.cpp");
        let reader = reader_from(&bytes);
        let mut loader = Loader::new(&reader);
        let index = ChartIndex::make(ChartSort::None, 0);
        assert!(loader.try_get_chart(index).is_none());
    }

    #[test]
    fn ref_sentence_of_null_is_the_no_marker() {
        let bytes = build_file(&[], "/tmp/unit.cpp");
        let reader = reader_from(&bytes);
        let mut loader = Loader::new(&reader);
        assert_eq!(loader.ref_sentence(SentenceIndex::default()), "no-sentence");
    }

    #[test]
    fn identifier_name_reads_its_packed_text_offset() {
        let bytes = build_file(&[], "hello");
        let reader = reader_from(&bytes);
        let mut loader = Loader::new(&reader);
        // Offset 1 is where "hello" starts in the string table (offset 0 is
        // reserved for the empty string).
        let index = NameIndex::make(NameSort::Identifier, 1);
        let key = loader.get_name(index);
        let node = loader.node(key);
        assert_eq!(node.properties, vec![("text".to_string(), "hello".to_string())]);
    }

    fn zero_source_location() -> Vec<u8> {
        vec![0u8; 8] // LineIndex(0) + ColumnNumber(0)
    }

    #[test]
    fn nullptr_expr_short_form_is_nullptr() {
        let mut nullptr_row = zero_source_location();
        nullptr_row.extend_from_slice(&0u32.to_le_bytes()); // ty: null TypeIndex
        let bytes = build_file(&[("expr.nullptr", vec![nullptr_row])], "/tmp/unit.cpp");
        let reader = reader_from(&bytes);
        let mut loader = Loader::new(&reader);

        let index = ExprIndex::make(ExprSort::Nullptr, 0);
        assert_eq!(loader.ref_expr(index), "nullptr");
        assert!(loader.pending_references().next().is_none());
    }

    #[test]
    fn break_stmt_node_carries_its_locus() {
        let break_row = zero_source_location();
        let bytes = build_file(&[("stmt.break", vec![break_row])], "/tmp/unit.cpp");
        let reader = reader_from(&bytes);
        let mut loader = Loader::new(&reader);

        let index = StmtIndex::make(crate::index::StmtSort::Break, 0);
        let key = loader.get_stmt(index);
        let node = loader.node(key);
        assert!(node.children.is_empty());
        assert!(node.properties.iter().any(|(k, _)| k == "locus"));
    }

    #[test]
    fn scope_loads_its_members_from_the_decl_heap() {
        let mut scope_row = 0u32.to_le_bytes().to_vec(); // start
        scope_row.extend_from_slice(&1u32.to_le_bytes()); // cardinality
        let heap_row = DeclIndex::make(DeclSort::Friend, 0).rep().to_le_bytes().to_vec();
        let bytes = build_file(
            &[
                ("scope", vec![scope_row]),
                ("heap.decl", vec![heap_row]),
                ("decl.friend", vec![friend_row()]),
            ],
            "/tmp/unit.cpp",
        );
        let reader = reader_from(&bytes);
        let mut loader = Loader::new(&reader);

        let index = ScopeIndex(0);
        let key = loader.get_scope(index);
        let node = loader.node(key);
        assert_eq!(node.children.len(), 1);
        assert_eq!(node.children[0].kind, SortKind::Decl);
    }
}
