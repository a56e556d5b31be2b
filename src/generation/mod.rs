//! Structured output generation.

pub mod object;

pub use object::generate_object;
