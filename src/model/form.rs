//! Preprocessing form records ([`FormSort`]) and macro definitions
//! ([`MacroSort`]): the token-group and macro-replacement-list shapes that
//! back the preprocessor-facing parts of a translation unit.

use super::common::SourceLocation;
use crate::index::{FormIndex, Sequence};
use crate::primitives::TextOffset;
use serde::Serialize;

/// A raw preprocessing-operator code (`#`, `##`, ...), carried as the
/// format's numeric encoding rather than an exhaustive enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
pub struct PPOperator(pub u16);

macro_rules! spelled_form {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Serialize, Default)]
        pub struct $name {
            pub locus: SourceLocation,
            pub spelling: TextOffset,
        }
    };
}

spelled_form!(IdentifierForm);
spelled_form!(NumberForm);
spelled_form!(CharacterForm);
spelled_form!(StringForm);
spelled_form!(KeywordForm);
spelled_form!(ParameterForm);
spelled_form!(HeaderForm);
spelled_form!(JunkForm);

#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct OperatorForm {
    pub locus: SourceLocation,
    pub spelling: TextOffset,
    pub value: PPOperator,
}

#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct WhitespaceForm {
    pub locus: SourceLocation,
}

#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct StringizeForm {
    pub locus: SourceLocation,
    pub operand: FormIndex,
}

#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct CatenateForm {
    pub locus: SourceLocation,
    pub first: FormIndex,
    pub second: FormIndex,
}

#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct PragmaForm {
    pub locus: SourceLocation,
    pub operand: FormIndex,
}

#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct ParenthesizedForm {
    pub locus: SourceLocation,
    pub operand: FormIndex,
}

/// A run of zero or more forms, e.g. a macro's replacement list.
#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct TupleForm {
    pub elements: Sequence<FormIndex>,
}

/// Any preprocessing form, tagged by its [`crate::index::FormSort`].
#[derive(Debug, Clone, Copy, Serialize)]
pub enum Form {
    Identifier(IdentifierForm),
    Number(NumberForm),
    Character(CharacterForm),
    String(StringForm),
    Operator(OperatorForm),
    Keyword(KeywordForm),
    Whitespace(WhitespaceForm),
    Parameter(ParameterForm),
    Stringize(StringizeForm),
    Catenate(CatenateForm),
    Pragma(PragmaForm),
    Header(HeaderForm),
    Parenthesized(ParenthesizedForm),
    Tuple(TupleForm),
    Junk(JunkForm),
}

impl Form {
    pub fn sort(&self) -> crate::index::FormSort {
        use crate::index::FormSort;
        match self {
            Form::Identifier(_) => FormSort::Identifier,
            Form::Number(_) => FormSort::Number,
            Form::Character(_) => FormSort::Character,
            Form::String(_) => FormSort::String,
            Form::Operator(_) => FormSort::Operator,
            Form::Keyword(_) => FormSort::Keyword,
            Form::Whitespace(_) => FormSort::Whitespace,
            Form::Parameter(_) => FormSort::Parameter,
            Form::Stringize(_) => FormSort::Stringize,
            Form::Catenate(_) => FormSort::Catenate,
            Form::Pragma(_) => FormSort::Pragma,
            Form::Header(_) => FormSort::Header,
            Form::Parenthesized(_) => FormSort::Parenthesized,
            Form::Tuple(_) => FormSort::Tuple,
            Form::Junk(_) => FormSort::Junk,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct ObjectLikeMacro {
    pub locus: SourceLocation,
    pub name: TextOffset,
    pub replacement_list: FormIndex,
}

#[derive(Debug, Clone, Copy, Serialize, Default)]
pub struct FunctionLikeMacro {
    pub locus: SourceLocation,
    pub name: TextOffset,
    pub parameters: FormIndex,
    pub replacement_list: FormIndex,
    pub arity: u32,
    pub variadic: bool,
}

/// Either shape of macro definition, tagged by its [`crate::index::MacroSort`].
#[derive(Debug, Clone, Copy, Serialize)]
pub enum Macro {
    ObjectLike(ObjectLikeMacro),
    FunctionLike(FunctionLikeMacro),
}

impl Macro {
    pub fn sort(&self) -> crate::index::MacroSort {
        use crate::index::MacroSort;
        match self {
            Macro::ObjectLike(_) => MacroSort::ObjectLike,
            Macro::FunctionLike(_) => MacroSort::FunctionLike,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tuple_form_starts_empty() {
        assert!(TupleForm::default().elements.is_empty());
    }

    #[test]
    fn function_like_macro_reports_its_own_sort() {
        let m = Macro::FunctionLike(FunctionLikeMacro::default());
        assert_eq!(m.sort(), crate::index::MacroSort::FunctionLike);
    }
}
