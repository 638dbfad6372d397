//! Placeholder-region scanner
//!
//! Templates are opaque text with marked substitution spans. A span is a
//! matched marker pair carrying one parameter name:
//!
//! ```text
//! parameter int SAMPLE_RATE = @{samples_per_symbol} 16 @{/samples_per_symbol}
//! ```
//!
//! The example payload between the markers keeps the unrendered template
//! readable and is discarded at render time. `@{` does not occur in the
//! generated language, so a single left-to-right scan is unambiguous.

use crate::error::GenError;

/// Marker opener; a marker is `@{name}` or `@{/name}` on one line
const OPEN: &str = "@{";

/// One parsed piece of a template
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateElement {
    /// Literal text copied through untouched
    Text(String),
    /// A placeholder region to be replaced by a resolver's output
    Region {
        /// Parameter name carried by the marker pair
        name: String,
        /// Line of the open marker, for error reporting
        line: usize,
    },
}

/// Result of scanning a template once
#[derive(Debug, Clone)]
pub struct ParsedTemplate {
    /// Elements in order of appearance
    pub elements: Vec<TemplateElement>,
    /// Placeholder names in order of appearance
    pub placeholder_names: Vec<String>,
}

/// Template scanner
pub struct TemplateParser;

impl TemplateParser {
    /// Scan template content into elements, validating marker structure
    pub fn parse(content: &str) -> Result<ParsedTemplate, GenError> {
        Parser::new(content).parse()
    }

    /// Names of every placeholder region in the template
    pub fn extract_placeholders(content: &str) -> Result<Vec<String>, GenError> {
        Ok(Self::parse(content)?.placeholder_names)
    }
}

/// Internal scanner state
struct Parser<'a> {
    content: &'a str,
    position: usize,
    line: usize,
}

impl<'a> Parser<'a> {
    fn new(content: &'a str) -> Self {
        Self {
            content,
            position: 0,
            line: 1,
        }
    }

    fn parse(mut self) -> Result<ParsedTemplate, GenError> {
        let mut elements = Vec::new();
        let mut placeholder_names = Vec::new();

        while let Some(offset) = self.rest().find(OPEN) {
            if offset > 0 {
                elements.push(TemplateElement::Text(self.rest()[..offset].to_string()));
                self.advance(offset);
            }
            let open_line = self.line;
            let tag = self.read_marker()?;
            if let Some(name) = tag.strip_prefix('/') {
                return Err(self.syntax(
                    open_line,
                    format!("close marker `@{{/{}}}` without a matching open marker", name),
                ));
            }
            if !valid_name(&tag) {
                return Err(self.syntax(open_line, format!("invalid placeholder name `{}`", tag)));
            }
            self.skip_payload(&tag, open_line)?;
            placeholder_names.push(tag.clone());
            elements.push(TemplateElement::Region {
                name: tag,
                line: open_line,
            });
        }

        if !self.rest().is_empty() {
            elements.push(TemplateElement::Text(self.rest().to_string()));
        }

        Ok(ParsedTemplate {
            elements,
            placeholder_names,
        })
    }

    fn rest(&self) -> &'a str {
        &self.content[self.position..]
    }

    fn advance(&mut self, len: usize) {
        let consumed = &self.content[self.position..self.position + len];
        self.line += consumed.bytes().filter(|&b| b == b'\n').count();
        self.position += len;
    }

    /// Consume the marker at the current position and return its tag text
    fn read_marker(&mut self) -> Result<String, GenError> {
        let body = &self.rest()[OPEN.len()..];
        let end = match body.find('}') {
            Some(end) if !body[..end].contains('\n') => end,
            _ => {
                return Err(self.syntax(self.line, "unterminated placeholder marker".to_string()));
            }
        };
        let tag = body[..end].to_string();
        self.advance(OPEN.len() + end + 1);
        Ok(tag)
    }

    /// Skip the example payload of an open region up to and including its
    /// close marker
    fn skip_payload(&mut self, name: &str, open_line: usize) -> Result<(), GenError> {
        let offset = self.rest().find(OPEN).ok_or_else(|| {
            self.syntax(
                open_line,
                format!("placeholder region `{}` is never closed", name),
            )
        })?;
        self.advance(offset);
        let marker_line = self.line;
        let tag = self.read_marker()?;
        match tag.strip_prefix('/') {
            Some(close) if close == name => Ok(()),
            Some(close) => Err(self.syntax(
                marker_line,
                format!(
                    "mismatched close marker `@{{/{}}}` inside region `{}`",
                    close, name
                ),
            )),
            None => Err(self.syntax(
                marker_line,
                format!(
                    "nested placeholder marker `@{{{}}}` inside region `{}`",
                    tag, name
                ),
            )),
        }
    }

    fn syntax(&self, line: usize, message: String) -> GenError {
        GenError::TemplateSyntax { line, message }
    }
}

fn valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_a_single_element() {
        let parsed = TemplateParser::parse("module foo;\nendmodule\n").unwrap();
        assert_eq!(parsed.elements.len(), 1);
        assert!(parsed.placeholder_names.is_empty());
    }

    #[test]
    fn test_region_with_payload() {
        let parsed = TemplateParser::parse("x = @{width} 16 @{/width};").unwrap();
        assert_eq!(
            parsed.elements,
            vec![
                TemplateElement::Text("x = ".to_string()),
                TemplateElement::Region {
                    name: "width".to_string(),
                    line: 1
                },
                TemplateElement::Text(";".to_string()),
            ]
        );
        assert_eq!(parsed.placeholder_names, vec!["width"]);
    }

    #[test]
    fn test_multiline_payload_tracks_lines() {
        let template = "a\n@{body}\nexample\npayload\n@{/body}\nb\n@{tail} t @{/tail}\n";
        let parsed = TemplateParser::parse(template).unwrap();
        let lines: Vec<usize> = parsed
            .elements
            .iter()
            .filter_map(|e| match e {
                TemplateElement::Region { line, .. } => Some(*line),
                _ => None,
            })
            .collect();
        assert_eq!(lines, vec![2, 7]);
    }

    #[test]
    fn test_unclosed_region_is_fatal() {
        let err = TemplateParser::parse("a\nb @{width} 16 ...").unwrap_err();
        match err {
            GenError::TemplateSyntax { line, message } => {
                assert_eq!(line, 2);
                assert!(message.contains("never closed"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_stray_close_marker_is_fatal() {
        let err = TemplateParser::parse("x @{/width} y").unwrap_err();
        assert!(matches!(err, GenError::TemplateSyntax { line: 1, .. }));
    }

    #[test]
    fn test_mismatched_close_marker_is_fatal() {
        let err = TemplateParser::parse("@{a} 1 @{/b}").unwrap_err();
        match err {
            GenError::TemplateSyntax { message, .. } => {
                assert!(message.contains("mismatched close marker"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_nested_open_marker_is_fatal() {
        let err = TemplateParser::parse("@{a} @{b} 1 @{/b} @{/a}").unwrap_err();
        match err {
            GenError::TemplateSyntax { message, .. } => {
                assert!(message.contains("nested placeholder marker"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_marker_must_not_span_lines() {
        let err = TemplateParser::parse("@{wid\nth} 1 @{/width}").unwrap_err();
        match err {
            GenError::TemplateSyntax { message, .. } => {
                assert!(message.contains("unterminated placeholder marker"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_invalid_name_is_fatal() {
        let err = TemplateParser::parse("@{1bad} x @{/1bad}").unwrap_err();
        assert!(matches!(err, GenError::TemplateSyntax { .. }));
    }

    #[test]
    fn test_extract_placeholders_in_order() {
        let names =
            TemplateParser::extract_placeholders("@{b} 1 @{/b} mid @{a} 2 @{/a}").unwrap();
        assert_eq!(names, vec!["b", "a"]);
    }
}
