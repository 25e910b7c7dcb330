//! Attribute entity records ([`AttrSort`]): the `[[...]]` grammar, stored as
//! a small tree of words and nested attribute indices.

use super::common::SourceLocation;
use crate::index::{AttrIndex, ExprIndex, Sequence};
use crate::primitives::TextOffset;
use serde::Serialize;

/// A single preprocessor-level token as it appears inside an attribute or
/// directive: a source location plus a raw payload whose interpretation
/// (text offset, expression, type, literal) depends on the surrounding
/// record. Mirrors the format's tagged-union token representation without
/// reproducing the union itself.
#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct Word {
    pub locus: SourceLocation,
    pub payload: u32,
}

impl Word {
    pub fn text(self) -> TextOffset {
        TextOffset(self.payload)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct BasicAttr {
    /// The token in `[[ token ]]`.
    pub word: Word,
}

#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct ScopedAttr {
    /// e.g. `foo` in `[[ foo::attr ]]`.
    pub scope: Word,
    /// e.g. `attr` in `[[ foo::attr ]]`.
    pub member: Word,
}

#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct LabeledAttr {
    /// `key` in `[[ key : value ]]`.
    pub label: Word,
    /// `value` in `[[ key : value ]]`.
    pub attribute: AttrIndex,
}

#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct CalledAttr {
    /// Function postfix `opt` in `[[ opt(args) ]]`.
    pub function: AttrIndex,
    /// Argument expression `args` in `[[ opt(args) ]]`.
    pub arguments: AttrIndex,
}

#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct ExpandedAttr {
    pub operand: AttrIndex,
}

#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct FactoredAttr {
    /// The scope factored out, e.g. `msvc` in `[[ using msvc: opt(args), dbg(1) ]]`.
    pub factor: Word,
    pub terms: AttrIndex,
}

#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct ElaboratedAttr {
    pub expr: ExprIndex,
}

/// A sequence of one or more attributes.
#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct TupleAttr {
    pub elements: Sequence<AttrIndex>,
}

/// Any attribute entity, tagged by its [`crate::index::AttrSort`].
/// `Nothing` is the absent-attribute placeholder sort.
#[derive(Debug, Clone, Copy, Serialize)]
pub enum Attr {
    Nothing,
    Basic(BasicAttr),
    Scoped(ScopedAttr),
    Labeled(LabeledAttr),
    Called(CalledAttr),
    Expanded(ExpandedAttr),
    Factored(FactoredAttr),
    Elaborated(ElaboratedAttr),
    Tuple(TupleAttr),
}

impl Attr {
    pub fn sort(&self) -> crate::index::AttrSort {
        use crate::index::AttrSort;
        match self {
            Attr::Nothing => AttrSort::Nothing,
            Attr::Basic(_) => AttrSort::Basic,
            Attr::Scoped(_) => AttrSort::Scoped,
            Attr::Labeled(_) => AttrSort::Labeled,
            Attr::Called(_) => AttrSort::Called,
            Attr::Expanded(_) => AttrSort::Expanded,
            Attr::Factored(_) => AttrSort::Factored,
            Attr::Elaborated(_) => AttrSort::Elaborated,
            Attr::Tuple(_) => AttrSort::Tuple,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn word_interprets_payload_as_text_offset() {
        let w = Word { locus: SourceLocation::default(), payload: 42 };
        assert_eq!(w.text(), TextOffset(42));
    }

    #[test]
    fn scoped_attr_reports_its_own_sort() {
        let a = Attr::Scoped(ScopedAttr::default());
        assert_eq!(a.sort(), crate::index::AttrSort::Scoped);
    }
}
