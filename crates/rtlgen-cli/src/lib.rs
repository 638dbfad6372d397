//! Command-line driver for the rtlgen engine
//!
//! Loads a base argument set from a TOML parameter file, looks the requested
//! generator module up in the registry, renders it, and writes the result.
//! All real work happens in `rtlgen-core`; this crate owns I/O and the
//! concrete coefficient derivation.

pub mod coeffs;

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{bail, Context as _};
use rtlgen_core::{find_module, registry, Context, Value};

/// Load the base argument set from a TOML parameter file
pub fn load_params(path: &Path) -> anyhow::Result<HashMap<String, Value>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading parameter file {}", path.display()))?;
    let args = toml::from_str(&text)
        .with_context(|| format!("parsing parameter file {}", path.display()))?;
    Ok(args)
}

/// Render one generator module with the given base arguments
pub fn generate(module_name: &str, args: HashMap<String, Value>) -> anyhow::Result<String> {
    let Some(module) = find_module(module_name) else {
        let known: Vec<&str> = registry().iter().map(|m| m.name).collect();
        bail!(
            "unknown module `{}`; registered modules: {}",
            module_name,
            known.join(", ")
        );
    };
    tracing::info!(module = module.name, "generating");

    let mut ctx = Context::new(args).with_coefficients(coeffs::if_correction);
    let rtl = (module.generate)(&mut ctx)
        .with_context(|| format!("rendering module `{}`", module_name))?;
    Ok(rtl)
}

/// Render a module and write it to `output`, or stdout when `None`
///
/// Nothing is written on a failed render.
pub fn generate_to(
    module_name: &str,
    params_path: &Path,
    output: Option<&Path>,
) -> anyhow::Result<()> {
    let args = load_params(params_path)?;
    let rtl = generate(module_name, args)?;
    match output {
        Some(path) => {
            fs::write(path, &rtl)
                .with_context(|| format!("writing output file {}", path.display()))?;
            tracing::info!(path = %path.display(), bytes = rtl.len(), "wrote module");
        }
        None => print!("{rtl}"),
    }
    Ok(())
}
