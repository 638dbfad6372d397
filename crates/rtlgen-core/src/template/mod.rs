//! Template scanning and placeholder substitution

pub mod engine;
pub mod parser;

pub use engine::render;
pub use parser::{ParsedTemplate, TemplateElement, TemplateParser};
