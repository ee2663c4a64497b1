//! hOCR input parsing.

mod hocr;

pub use hocr::{hocr_files, HocrParser};
