pub mod html_document;

pub use html_document::{Element, StructuralDocument};
