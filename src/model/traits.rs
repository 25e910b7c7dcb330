//! Trait side-tables: ordered `(entity, value)` associations keyed by the
//! entity they extend, for extra facts that don't belong in the entity's
//! own fixed-size record (a function's definition, a class's friends, an
//! MSVC `__declspec`, ...).
//!
//! Every partition in this family is conceptually `Vec<AssociatedTrait<K,
//! V>>` ordered by `entity`, so a reader does a binary (or for small
//! partitions, linear) search on `entity` rather than indexing directly.

use super::common::{MappingDefinition, SourceLocation, VendorTraits};
use crate::index::{ChartIndex, DeclIndex, NameIndex, Sequence, StringIndex, SyntaxIndex, TypeIndex};
use crate::primitives::{LineNumber, TextOffset};
use serde::Serialize;

/// `(entity, trait)` pair: one row of a trait side-table.
#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct AssociatedTrait<K, V> {
    pub entity: K,
    pub trait_value: V,
}

impl<K: Ord + Copy, V> AssociatedTrait<K, V> {
    /// Binary search for the row keyed by `entity` in a table known to be
    /// sorted by key, mirroring the `lower_bound`-on-entity lookup the
    /// format expects of this partition shape.
    pub fn lower_bound(table: &[Self], entity: K) -> Option<&Self>
    where
        K: std::cmp::PartialOrd,
    {
        let idx = table.partition_point(|row| row.entity < entity);
        table.get(idx).filter(|row| row.entity == entity)
    }
}

pub type MappingExpr = AssociatedTrait<DeclIndex, MappingDefinition>;
pub type AliasTemplate = AssociatedTrait<DeclIndex, SyntaxIndex>;
pub type Friends = AssociatedTrait<DeclIndex, Sequence<DeclIndex>>;
pub type Specializations = AssociatedTrait<DeclIndex, Sequence<DeclIndex>>;
pub type Requires = AssociatedTrait<DeclIndex, SyntaxIndex>;
pub type Attributes = AssociatedTrait<SyntaxIndex, SyntaxIndex>;
pub type Deprecated = AssociatedTrait<DeclIndex, TextOffset>;
pub type DeductionGuides = AssociatedTrait<DeclIndex, DeclIndex>;

/// Any portable trait row, tagged by its [`crate::index::TraitSort`].
#[derive(Debug, Clone, Copy, Serialize)]
pub enum Trait {
    MappingExpr(MappingExpr),
    AliasTemplate(AliasTemplate),
    Friends(Friends),
    Specializations(Specializations),
    Requires(Requires),
    Attributes(Attributes),
    Deprecated(Deprecated),
    DeductionGuides(DeductionGuides),
}

impl Trait {
    pub fn sort(&self) -> crate::index::TraitSort {
        use crate::index::TraitSort;
        match self {
            Trait::MappingExpr(_) => TraitSort::MappingExpr,
            Trait::AliasTemplate(_) => TraitSort::AliasTemplate,
            Trait::Friends(_) => TraitSort::Friends,
            Trait::Specializations(_) => TraitSort::Specializations,
            Trait::Requires(_) => TraitSort::Requires,
            Trait::Attributes(_) => TraitSort::Attributes,
            Trait::Deprecated(_) => TraitSort::Deprecated,
            Trait::DeductionGuides(_) => TraitSort::DeductionGuides,
        }
    }
}

pub type MsvcUuid = AssociatedTrait<DeclIndex, StringIndex>;
pub type MsvcSegment = AssociatedTrait<DeclIndex, DeclIndex>;
pub type MsvcSpecializationEncoding = AssociatedTrait<DeclIndex, TextOffset>;
pub type MsvcSalAnnotation = AssociatedTrait<DeclIndex, TextOffset>;
pub type MsvcFunctionParameters = AssociatedTrait<DeclIndex, ChartIndex>;
pub type MsvcInitializerLocus = AssociatedTrait<DeclIndex, SourceLocation>;
pub type MsvcVendor = AssociatedTrait<DeclIndex, VendorTraits>;
pub type DeclAttributes = AssociatedTrait<DeclIndex, crate::index::AttrIndex>;

/// Any MSVC-specific trait row, tagged by its [`crate::index::MsvcTraitSort`].
#[derive(Debug, Clone, Copy, Serialize)]
pub enum MsvcTrait {
    Uuid(MsvcUuid),
    Segment(MsvcSegment),
    SpecializationEncoding(MsvcSpecializationEncoding),
    SalAnnotation(MsvcSalAnnotation),
    FunctionParameters(MsvcFunctionParameters),
    InitializerLocus(MsvcInitializerLocus),
    Vendor(MsvcVendor),
    DeclAttributes(DeclAttributes),
}

impl MsvcTrait {
    pub fn sort(&self) -> crate::index::MsvcTraitSort {
        use crate::index::MsvcTraitSort;
        match self {
            MsvcTrait::Uuid(_) => MsvcTraitSort::Uuid,
            MsvcTrait::Segment(_) => MsvcTraitSort::Segment,
            MsvcTrait::SpecializationEncoding(_) => MsvcTraitSort::SpecializationEncoding,
            MsvcTrait::SalAnnotation(_) => MsvcTraitSort::SalAnnotation,
            MsvcTrait::FunctionParameters(_) => MsvcTraitSort::FunctionParameters,
            MsvcTrait::InitializerLocus(_) => MsvcTraitSort::InitializerLocus,
            MsvcTrait::Vendor(_) => MsvcTraitSort::Vendor,
            MsvcTrait::DeclAttributes(_) => MsvcTraitSort::DeclAttributes,
        }
    }
}

/// First/last line of a file, used by the `FileBoundary` trait family in
/// the full format; kept here for symmetry even though this crate's
/// trimmed `MsvcTraitSort` doesn't carry that variant.
#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct FileBoundary {
    pub first: LineNumber,
    pub last: LineNumber,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lower_bound_finds_exact_key() {
        let table = [
            AssociatedTrait { entity: DeclIndex::make(crate::index::DeclSort::Variable, 1), trait_value: TextOffset(10) },
            AssociatedTrait { entity: DeclIndex::make(crate::index::DeclSort::Variable, 3), trait_value: TextOffset(30) },
        ];
        let found = AssociatedTrait::lower_bound(&table, DeclIndex::make(crate::index::DeclSort::Variable, 3));
        assert_eq!(found.unwrap().trait_value, TextOffset(30));
        assert!(AssociatedTrait::lower_bound(&table, DeclIndex::make(crate::index::DeclSort::Variable, 2)).is_none());
    }

    #[test]
    fn deprecated_trait_reports_its_own_sort() {
        let t = Trait::Deprecated(Deprecated { entity: DeclIndex::default(), trait_value: TextOffset::NULL });
        assert_eq!(t.sort(), crate::index::TraitSort::Deprecated);
    }
}
