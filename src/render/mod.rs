//! Corpus output rendering.

mod json;

pub use json::{to_json, write_json, JsonFormat};
