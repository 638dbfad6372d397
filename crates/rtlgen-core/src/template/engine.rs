//! Placeholder substitution
//!
//! Rendering is a single linear left-to-right rewrite: each region is
//! replaced by its resolver's output, all other text is copied through
//! untouched. Resolver output is final text and is not re-scanned for
//! further placeholders.

use crate::{
    context::Context,
    error::GenError,
    module::ResolverSet,
    template::parser::{TemplateElement, TemplateParser},
};

/// Render a template with the given resolver set and context
///
/// Fails before emitting anything if a region's name has no registered
/// resolver or any resolver's prerequisites cannot be satisfied. Given the
/// same base arguments, two renders of the same template are byte-identical.
pub fn render(
    template: &str,
    resolvers: &ResolverSet,
    ctx: &mut Context,
) -> Result<String, GenError> {
    let parsed = TemplateParser::parse(template)?;

    let mut out = String::with_capacity(template.len());
    for element in &parsed.elements {
        match element {
            TemplateElement::Text(text) => out.push_str(text),
            TemplateElement::Region { name, line } => {
                let resolver =
                    resolvers
                        .get(name)
                        .ok_or_else(|| GenError::TemplateSyntax {
                            line: *line,
                            message: format!("no resolver registered for placeholder `{}`", name),
                        })?;
                out.push_str(&resolver(ctx)?);
            }
        }
    }
    Ok(out)
}
