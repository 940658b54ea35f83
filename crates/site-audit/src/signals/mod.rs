//! Signal extraction from retrieved text: robots directives and page markup.

pub mod markup;
pub mod page;
pub mod robots;

pub use page::{extract, OnPageSignals, OpenGraph, PageSignals};
