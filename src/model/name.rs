//! Name entity records, one struct per [`NameSort`] variant, plus the
//! [`Name`] visitor-dispatch enum.
//!
//! `Identifier` is the degenerate case: a plain identifier is just a
//! [`TextOffset`] into the string table, with no partition record of its
//! own, so `Name::Identifier` carries the offset directly rather than a
//! wrapper struct.

use crate::index::{DeclIndex, ExprIndex, NameIndex, TypeIndex};
use crate::primitives::TextOffset;
use serde::Serialize;

use super::expr::Operator;

#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct ConversionFunctionId {
    pub target: TypeIndex,
    pub name: TextOffset,
}

#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct OperatorFunctionId {
    pub name: TextOffset,
    pub symbol: Operator,
}

#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct LiteralOperatorId {
    pub name_index: TextOffset,
}

#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct TemplateName {
    /// The template's own name. Never itself a `TemplateName`.
    pub name: NameIndex,
}

#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct SpecializationName {
    pub primary_template: NameIndex,
    pub arguments: ExprIndex,
}

#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct SourceFileName {
    pub name: TextOffset,
    pub include_guard: TextOffset,
}

#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct GuideName {
    pub primary_template: DeclIndex,
}

/// Any name entity, tagged by its [`crate::index::NameSort`].
#[derive(Debug, Clone, Copy, Serialize)]
pub enum Name {
    Identifier(TextOffset),
    Operator(OperatorFunctionId),
    Conversion(ConversionFunctionId),
    Literal(LiteralOperatorId),
    Template(TemplateName),
    Specialization(SpecializationName),
    SourceFile(SourceFileName),
    Guide(GuideName),
}

impl Name {
    pub fn sort(&self) -> crate::index::NameSort {
        use crate::index::NameSort;
        match self {
            Name::Identifier(_) => NameSort::Identifier,
            Name::Operator(_) => NameSort::Operator,
            Name::Conversion(_) => NameSort::Conversion,
            Name::Literal(_) => NameSort::Literal,
            Name::Template(_) => NameSort::Template,
            Name::Specialization(_) => NameSort::Specialization,
            Name::SourceFile(_) => NameSort::SourceFile,
            Name::Guide(_) => NameSort::Guide,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifier_name_reports_its_own_sort() {
        let n = Name::Identifier(TextOffset(7));
        assert_eq!(n.sort(), crate::index::NameSort::Identifier);
    }

    #[test]
    fn template_name_cannot_nest_by_construction() {
        let t = TemplateName { name: NameIndex::default() };
        assert!(t.name.is_null());
    }
}
