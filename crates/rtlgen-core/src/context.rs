//! Per-invocation parameter context
//!
//! A [`Context`] holds every parameter a single generation run has touched:
//! values imported from the caller's base argument set, values a derivation
//! has computed, and derivations that have not run yet. It lives for exactly
//! one invocation and is never shared.

use std::collections::HashMap;

use crate::{error::GenError, value::Value};

/// A derivation computes one parameter's value from the context
///
/// It may call [`Context::set`] to write sibling outputs before returning its
/// own value. The context invokes a derivation at most once per name.
pub type Derivation = fn(&mut Context) -> Result<Value, GenError>;

/// External pure function deriving the two raw correction coefficients from
/// a normalized frequency ratio and the oversampling factor
pub type CoefficientFn = fn(ratio: f64, samples_per_symbol: u32) -> (f64, f64);

/// A parameter slot: either a settled value or a derivation yet to run
enum Slot {
    Resolved(Value),
    Pending(Derivation),
}

/// Mutable store of resolved and pending parameter values for one run
pub struct Context {
    /// Base argument set supplied by the caller; read-only
    args: HashMap<String, Value>,
    /// Parameters touched so far this invocation
    entries: HashMap<String, Slot>,
    /// Injected coefficient derivation, when the module needs one
    coefficients: Option<CoefficientFn>,
}

impl Context {
    /// Create a fresh context over the given base argument set
    pub fn new(args: HashMap<String, Value>) -> Self {
        Self {
            args,
            entries: HashMap::new(),
            coefficients: None,
        }
    }

    /// Inject the coefficient derivation function
    pub fn with_coefficients(mut self, f: CoefficientFn) -> Self {
        self.coefficients = Some(f);
        self
    }

    /// The injected coefficient derivation
    pub fn coefficients(&self) -> Result<CoefficientFn, GenError> {
        self.coefficients.ok_or_else(|| {
            GenError::Configuration("no coefficient derivation function configured".into())
        })
    }

    /// Guarantee that each name exists in the context before a resolver reads
    /// it, importing from the base argument set on first need
    ///
    /// Idempotent: an entry already present, resolved or pending, is never
    /// overwritten. A name absent from both the context and the base
    /// arguments fails with [`GenError::MissingParameter`].
    pub fn ensure(&mut self, names: &[&str]) -> Result<(), GenError> {
        for &name in names {
            if self.entries.contains_key(name) {
                continue;
            }
            match self.args.get(name) {
                Some(value) => {
                    tracing::debug!(param = name, %value, "imported from base arguments");
                    self.entries
                        .insert(name.to_string(), Slot::Resolved(value.clone()));
                }
                None => return Err(GenError::MissingParameter(name.to_string())),
            }
        }
        Ok(())
    }

    /// Write a resolved value, replacing any pending derivation for the name
    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        self.entries.insert(name.into(), Slot::Resolved(value));
    }

    /// Install a derivation to run lazily on first resolve of `name`
    pub fn set_pending(&mut self, name: impl Into<String>, derive: Derivation) {
        self.entries.insert(name.into(), Slot::Pending(derive));
    }

    /// Resolve a name to its concrete value
    ///
    /// A pending entry is invoked with the context, its result stored as
    /// resolved, and returned; a resolved entry returns immediately. After
    /// the first resolution the value is stable for the rest of the run.
    pub fn resolve(&mut self, name: &str) -> Result<Value, GenError> {
        let derive = match self.entries.get(name) {
            Some(Slot::Resolved(value)) => return Ok(value.clone()),
            Some(Slot::Pending(derive)) => *derive,
            None => return Err(GenError::MissingParameter(name.to_string())),
        };
        let value = derive(self)?;
        tracing::debug!(param = name, %value, "derived");
        self.entries
            .insert(name.to_string(), Slot::Resolved(value.clone()));
        Ok(value)
    }

    /// Resolve a name that must be a boolean
    pub fn resolve_bool(&mut self, name: &str) -> Result<bool, GenError> {
        let value = self.resolve(name)?;
        value.as_bool().ok_or_else(|| {
            GenError::Configuration(format!(
                "parameter `{}` must be a bool, got {}",
                name,
                value.type_name()
            ))
        })
    }

    /// Resolve a name that must be an integer
    pub fn resolve_i64(&mut self, name: &str) -> Result<i64, GenError> {
        let value = self.resolve(name)?;
        value.as_i64().ok_or_else(|| {
            GenError::Configuration(format!(
                "parameter `{}` must be an integer, got {}",
                name,
                value.type_name()
            ))
        })
    }

    /// Resolve a name that must be numeric
    pub fn resolve_f64(&mut self, name: &str) -> Result<f64, GenError> {
        let value = self.resolve(name)?;
        value.as_f64().ok_or_else(|| {
            GenError::Configuration(format!(
                "parameter `{}` must be numeric, got {}",
                name,
                value.type_name()
            ))
        })
    }
}
