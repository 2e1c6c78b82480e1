//! Utility functions

pub mod string;

pub use string::{char_len, escape_html};
