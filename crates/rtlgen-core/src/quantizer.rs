//! Fixed-point quantization of the correction coefficients
//!
//! The timing error detector applies two real-valued correction coefficients.
//! Hardware wants integers, so both are scaled by the same power of two until
//! each sits within tolerance of an integer; the shift amount is compensated
//! downstream.

use tracing::{debug, info};

use crate::{context::Context, error::GenError, value::Value};

/// Absolute distance from the nearest integer at which a scaled coefficient
/// counts as converged
pub const QUANT_TOLERANCE: f64 = 0.001;

/// Hard bound on the number of doublings. Any finite f64 becomes exactly
/// integral once scaled past its 52-bit mantissa, so the bound must sit well
/// below that to reject coefficients that only "converge" by exhausting
/// float precision; a shift past 32 is also far beyond what the error
/// datapath can use.
pub const MAX_SHIFT: u32 = 32;

/// Integer correction coefficients and their common power-of-two shift
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CorrectionSet {
    /// Real coefficient
    pub re: i64,
    /// Imaginary coefficient
    pub im: i64,
    /// Power-of-two scaling applied to both
    pub shift: u32,
}

/// Scale both coefficients by a common power of two until each is within
/// [`QUANT_TOLERANCE`] of an integer
///
/// The final cast rounds to nearest; at convergence the scaled value is
/// within the tolerance of that integer, so no precision is lost.
pub fn quantize_pair(re: f64, im: f64) -> Result<CorrectionSet, GenError> {
    let mut scaled_re = re;
    let mut scaled_im = im;
    let mut shift = 0u32;

    loop {
        let re_err = (scaled_re - scaled_re.round()).abs();
        let im_err = (scaled_im - scaled_im.round()).abs();
        if re_err <= QUANT_TOLERANCE && im_err <= QUANT_TOLERANCE {
            return Ok(CorrectionSet {
                re: scaled_re.round() as i64,
                im: scaled_im.round() as i64,
                shift,
            });
        }
        if shift == MAX_SHIFT {
            return Err(GenError::QuantizationNonConvergence {
                re,
                im,
                max_shift: MAX_SHIFT,
            });
        }
        scaled_re *= 2.0;
        scaled_im *= 2.0;
        shift += 1;
    }
}

/// Derive and quantize the intermediate-frequency correction coefficients,
/// writing all three outputs into the context in one step
///
/// Reads `fsym`, `clk_freq` and `ifreq`, checks that the clock rate is an
/// exact integer multiple of the symbol rate, calls the injected coefficient
/// derivation on the normalized frequency ratio, and quantizes its outputs.
/// `re_correction`, `im_correction` and `correction_shift` land in the
/// context atomically so no partial derivation is ever observable.
pub fn derive_corrections(ctx: &mut Context) -> Result<CorrectionSet, GenError> {
    ctx.ensure(&["fsym", "clk_freq", "ifreq"])?;
    let fsym = ctx.resolve_i64("fsym")?;
    let clk_freq = ctx.resolve_i64("clk_freq")?;
    let ifreq = ctx.resolve_f64("ifreq")?;

    if fsym <= 0 || clk_freq <= 0 || ifreq <= 0.0 {
        return Err(GenError::Configuration(
            "symbol rate, clock rate and intermediate frequency must be positive".into(),
        ));
    }
    if clk_freq % fsym != 0 {
        return Err(GenError::Configuration(
            "clock rate must be an integer multiple of symbol rate".into(),
        ));
    }
    let samples_per_symbol = (clk_freq / fsym) as u32;
    let ratio = ifreq / fsym as f64;

    let derive = ctx.coefficients()?;
    let (re, im) = derive(ratio, samples_per_symbol);
    debug!(ratio, samples_per_symbol, re, im, "raw correction coefficients");

    let set = quantize_pair(re, im)?;
    info!(
        re = set.re,
        im = set.im,
        shift = set.shift,
        "quantized correction coefficients"
    );

    ctx.set("re_correction", Value::Int(set.re));
    ctx.set("im_correction", Value::Int(set.im));
    ctx.set("correction_shift", Value::Int(i64::from(set.shift)));
    Ok(set)
}
