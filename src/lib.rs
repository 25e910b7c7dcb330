#![forbid(unsafe_code)]

use anyhow::anyhow;
use serde::Serialize;

pub mod catalog;
pub mod container;
pub mod dom;
pub mod error;
pub mod hash;
pub mod index;
pub mod model;
pub mod primitives;
pub mod reader;

/// Generates a single boolean accessor backed by one bit of a flag word.
/// One invocation per flag; used by [`flags_to_struct!`].
#[macro_export]
macro_rules! flag_to_function {
    ($flag_name:ident $fun_name:ident $comment:literal) => {
        #[doc = $comment]
        pub fn $fun_name(&self) -> bool {
            self.0 & $flag_name != 0
        }
    };
}

/// Declares a newtype wrapping a raw flag word, rejecting any bit not named
/// by one of the given flags, plus one accessor per flag via
/// [`flag_to_function!`]. Every bitset in [`crate::model`] is built this way.
#[macro_export]
macro_rules! flags_to_struct {
    ($struct_name:ident, $struct_type:ty, $($flag_name:ident $flag_fun_name:ident $flag_doc:literal),* $(,)?) => {
        #[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize)]
        pub struct $struct_name($struct_type);
        impl $struct_name {
            pub(crate) fn from_raw(value: $struct_type) -> anyhow::Result<Self> {
                let invalid_bits = value & !(0 $(| $flag_name)*);
                if invalid_bits != 0 {
                    Err(anyhow!("Flag {} with invalid bits {invalid_bits:X}", stringify!($struct_name)))
                } else {
                    Ok(Self(value))
                }
            }

            pub fn into_raw(&self) -> $struct_type {
                self.0
            }

            $(
                $crate::flag_to_function!($flag_name $flag_fun_name $flag_doc);
            )*
        }
    }
}
