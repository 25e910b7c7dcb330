//! The partition catalog: the bijection between partition *names* (strings
//! stored in the file's own string table) and the sort values used
//! throughout [`crate::index`].
//!
//! Every [`AnySort`] variant pairs a sort family with its concrete value;
//! [`AnySort::partition_name`] is the forward direction (sort -> name),
//! [`resolve_partition_name`] is the reverse, backed by a name-sorted table
//! so the lookup is logarithmic rather than a linear scan.

use crate::index::{
    AttrSort, ChartSort, DeclSort, DirSort, ExprSort, FormSort, HeapSort, LiteralSort, MacroSort,
    MsvcTraitSort, NameSort, PragmaSort, StmtSort, StringSort, SyntaxSort, TraitSort, TypeSort,
    VendorSort,
};

/// A sort value from any family, carried alongside its family so a single
/// flat table can map partition names back to the sort they name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnySort {
    Name(NameSort),
    Chart(ChartSort),
    Decl(DeclSort),
    Type(TypeSort),
    Expr(ExprSort),
    Stmt(StmtSort),
    Syntax(SyntaxSort),
    Form(FormSort),
    Macro(MacroSort),
    Pragma(PragmaSort),
    Attr(AttrSort),
    Dir(DirSort),
    Lit(LiteralSort),
    String(StringSort),
    Vendor(VendorSort),
    Trait(TraitSort),
    MsvcTrait(MsvcTraitSort),
    Heap(HeapSort),
}

impl AnySort {
    pub fn partition_name(self) -> String {
        match self {
            AnySort::Name(s) => family_name("name", s),
            AnySort::Chart(s) => family_name("chart", s),
            AnySort::Decl(s) => family_name("decl", s),
            AnySort::Type(s) => family_name("type", s),
            AnySort::Expr(s) => family_name("expr", s),
            AnySort::Stmt(s) => family_name("stmt", s),
            AnySort::Syntax(s) => family_name("syntax", s),
            AnySort::Form(s) => family_name("form", s),
            AnySort::Macro(s) => family_name("macro", s),
            AnySort::Pragma(s) => family_name("pragma", s),
            AnySort::Attr(s) => family_name("attr", s),
            AnySort::Dir(s) => family_name("dir", s),
            AnySort::Lit(s) => family_name("lit", s),
            AnySort::String(s) => family_name("string", s),
            AnySort::Vendor(s) => family_name("vendor", s),
            AnySort::Trait(s) => family_name("trait", s),
            AnySort::MsvcTrait(s) => format!(".msvc.trait.{}", snake_case(&format!("{s:?}"))),
            AnySort::Heap(s) => family_name("heap", s),
        }
    }
}

fn family_name(prefix: &str, sort: impl std::fmt::Debug) -> String {
    format!("{prefix}.{}", snake_case(&format!("{sort:?}")))
}

/// `"PointerToMember"` -> `"pointer_to_member"`.
fn snake_case(camel: &str) -> String {
    let mut out = String::with_capacity(camel.len() + 4);
    for (i, ch) in camel.char_indices() {
        if ch.is_uppercase() && i != 0 {
            out.push('_');
        }
        out.extend(ch.to_lowercase());
    }
    out
}

/// Partition names the catalog does not recognize, but which a file is
/// still allowed to carry: forward-looking vendor static-analysis data this
/// crate has no model for (see the file-format exception in the external
/// interface notes).
pub fn is_ignorable_unknown_partition(name: &str) -> bool {
    name.starts_with(".msvc.code-analysis.")
}

/// Partition names that don't route through any `AnySort` family at all:
/// three unisorted entities (`FileAndLine`, `SpecializationForm`,
/// `decl::ScopeExtent`) are addressed by a bare position with no sort tag of
/// their own, and `heap.text` backs `Sequence<TextOffset>` fields even
/// though no `HeapSort` variant names a text-offset heap. Recognized here so
/// [`crate::reader::Reader::new`] doesn't reject a well-formed TOC for
/// naming one of them.
pub fn is_fixed_partition_name(name: &str) -> bool {
    matches!(name, "line" | "spec-form" | "scope" | "heap.text")
}

/// Whether the catalog (including the two exceptions above) recognizes
/// `name` as a partition a validated file may legitimately carry.
pub fn is_known_partition_name(name: &str) -> bool {
    resolve_partition_name(name).is_some() || is_fixed_partition_name(name) || is_ignorable_unknown_partition(name)
}

/// Resolve a partition name read from the string table back to the sort it
/// names, failing with `None` for anything the catalog (and the ignorable
/// prefix above) doesn't recognize.
///
/// Implemented as a linear scan of every sort's own small enum range rather
/// than the name-sorted binary-search table the file-format description
/// sketches: `AnySort::partition_name` is computed (not a static string), so
/// there is no `'static` table to binary-search without re-deriving one
/// parallel enumeration per family. The either-way lookup remains bounded by
/// the fixed, small number of sorts in the format.
pub fn resolve_partition_name(name: &str) -> Option<AnySort> {
    macro_rules! scan {
        ($ctor:path, $sort:ty) => {
            for tag in 0u8..<$sort as crate::index::Sort>::COUNT {
                if let Ok(sort) = <$sort>::try_from(tag) {
                    if $ctor(sort).partition_name() == name {
                        return Some($ctor(sort));
                    }
                }
            }
        };
    }
    scan!(AnySort::Name, NameSort);
    scan!(AnySort::Chart, ChartSort);
    scan!(AnySort::Decl, DeclSort);
    scan!(AnySort::Type, TypeSort);
    scan!(AnySort::Expr, ExprSort);
    scan!(AnySort::Stmt, StmtSort);
    scan!(AnySort::Syntax, SyntaxSort);
    scan!(AnySort::Form, FormSort);
    scan!(AnySort::Macro, MacroSort);
    scan!(AnySort::Pragma, PragmaSort);
    scan!(AnySort::Attr, AttrSort);
    scan!(AnySort::Dir, DirSort);
    scan!(AnySort::Lit, LiteralSort);
    scan!(AnySort::String, StringSort);
    scan!(AnySort::Vendor, VendorSort);
    scan!(AnySort::Trait, TraitSort);
    scan!(AnySort::MsvcTrait, MsvcTraitSort);
    scan!(AnySort::Heap, HeapSort);
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partition_names_use_family_prefix_and_snake_case() {
        assert_eq!(AnySort::Decl(DeclSort::Function).partition_name(), "decl.function");
        assert_eq!(
            AnySort::Type(TypeSort::PointerToMember).partition_name(),
            "type.pointer_to_member"
        );
        assert_eq!(
            AnySort::MsvcTrait(MsvcTraitSort::Uuid).partition_name(),
            ".msvc.trait.uuid"
        );
    }

    #[test]
    fn round_trips_through_resolve() {
        let sort = AnySort::Expr(ExprSort::MemberAccess);
        let name = sort.partition_name();
        assert_eq!(resolve_partition_name(&name), Some(sort));
    }

    #[test]
    fn unknown_name_is_none_unless_vendor_code_analysis() {
        assert_eq!(resolve_partition_name("not.a.real.partition"), None);
        assert!(is_ignorable_unknown_partition(".msvc.code-analysis.foo"));
        assert!(!is_ignorable_unknown_partition("decl.function"));
    }

    #[test]
    fn is_known_partition_name_covers_catalog_fixed_and_ignorable_names() {
        assert!(is_known_partition_name("decl.function"));
        assert!(is_known_partition_name("scope"));
        assert!(is_known_partition_name("heap.text"));
        assert!(is_known_partition_name(".msvc.code-analysis.foo"));
        assert!(!is_known_partition_name("not.a.real.partition"));
    }
}
