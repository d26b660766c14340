//! Text codecs shared by import/export paths.

pub mod xml;

pub use xml::{escape_xml_text, unicode_decode, unicode_encode};
