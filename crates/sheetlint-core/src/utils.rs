//! Utility functions for rule implementations.

pub mod allowance;
pub mod matcher;
pub mod syntax;

// Re-export commonly used utilities for rule implementations
#[doc(inline)]
pub use allowance::{AllowCheck, AllowDirective, AllowDirectives};
#[doc(inline)]
pub use matcher::{matches, AllowList, AllowListEntry, MatcherError};
#[doc(inline)]
pub use syntax::{
    is_numbery, is_standard_syntax_rule, is_standard_syntax_value, is_variable, vendor_unprefixed,
};
