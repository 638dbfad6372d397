//! Generator modules and their resolver sets

use std::collections::HashMap;

use crate::{context::Context, error::GenError, modules};

/// A resolver produces the final text for one placeholder name
///
/// Resolvers declare prerequisites through [`Context::ensure`], read them
/// through the context, and may write additional named values before
/// returning their own.
pub type RenderFn = fn(&mut Context) -> Result<String, GenError>;

/// The active module's mapping from placeholder name to resolver
///
/// Every placeholder a template uses must map to exactly one entry here;
/// an unmapped name is a fatal template error at render time.
#[derive(Default)]
pub struct ResolverSet {
    map: HashMap<&'static str, RenderFn>,
}

impl ResolverSet {
    /// Empty resolver set
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the resolver for a placeholder name
    pub fn register(&mut self, name: &'static str, resolver: RenderFn) {
        self.map.insert(name, resolver);
    }

    /// Look up the resolver for a placeholder name
    pub fn get(&self, name: &str) -> Option<RenderFn> {
        self.map.get(name).copied()
    }
}

/// A named generator module with one public entry point
pub struct GeneratorModule {
    /// Module name as selected by the caller
    pub name: &'static str,
    /// One-line description for diagnostics and usage listings
    pub description: &'static str,
    /// Entry point: dispatches to one template variant and renders it
    pub generate: fn(&mut Context) -> Result<String, GenError>,
}

/// All registered generator modules
pub fn registry() -> &'static [GeneratorModule] {
    const MODULES: &[GeneratorModule] = &[GeneratorModule {
        name: modules::clock_recovery::NAME,
        description: "BLE clock-data-recovery symbol clock extraction",
        generate: modules::clock_recovery::generate,
    }];
    MODULES
}

/// Look a generator module up by name
pub fn find_module(name: &str) -> Option<&'static GeneratorModule> {
    registry().iter().find(|m| m.name == name)
}

/// Drop trailing blank lines from a rendered variant
///
/// Presentation normalization only; internal whitespace is untouched.
pub fn trim_trailing_blank_lines(text: &str) -> &str {
    let mut end = text.len();
    for line in text.split_inclusive('\n').rev() {
        if line.trim().is_empty() {
            end -= line.len();
        } else {
            break;
        }
    }
    &text[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_contains_clock_recovery() {
        assert!(find_module("clock_recovery").is_some());
        assert!(find_module("preamble_detect").is_none());
    }

    #[test]
    fn test_trim_trailing_blank_lines() {
        assert_eq!(trim_trailing_blank_lines("a\n\n  \n\n"), "a\n");
        assert_eq!(trim_trailing_blank_lines("a\nb"), "a\nb");
        assert_eq!(trim_trailing_blank_lines("a\n\nb\n"), "a\n\nb\n");
        assert_eq!(trim_trailing_blank_lines("\n \n"), "");
    }

    #[test]
    fn test_resolver_set_lookup() {
        fn one(_ctx: &mut Context) -> Result<String, GenError> {
            Ok("1".to_string())
        }
        let mut set = ResolverSet::new();
        set.register("one", one);
        assert!(set.get("one").is_some());
        assert!(set.get("two").is_none());
    }
}
