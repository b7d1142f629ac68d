//! Core value types, error taxonomy and pixel math shared by every stage.

pub(crate) mod core;
pub(crate) mod error;
pub(crate) mod math;
