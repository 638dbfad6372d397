//! Clock recovery generator module
//!
//! Extracts the symbol clock from the demodulated BLE signal. Two variants:
//! a matched-filter edge follower, and the timing error detector from the
//! 1990 feedforward paper with intermediate-frequency correction. The
//! `mf_clock_rec` argument selects between them.

use crate::{
    context::Context,
    error::GenError,
    module::{trim_trailing_blank_lines, ResolverSet},
    quantizer,
    template::render,
    value::Value,
};

/// Module name in the registry
pub const NAME: &str = "clock_recovery";

const MATCHED_FILTER_TEMPLATE: &str = include_str!("../../templates/clock_recovery_mf.sv");
const PAPER_TEMPLATE: &str = include_str!("../../templates/clock_recovery_paper.sv");

/// Render the clock recovery module
///
/// Reads the `mf_clock_rec` selector once and renders exactly one variant.
/// Trailing blank lines are trimmed from the result.
pub fn generate(ctx: &mut Context) -> Result<String, GenError> {
    ctx.ensure(&["mf_clock_rec"])?;
    let matched_filter = ctx.resolve_bool("mf_clock_rec")?;
    tracing::info!(matched_filter, "rendering clock_recovery");
    let rtl = if matched_filter {
        matched_filter_variant(ctx)?
    } else {
        paper_variant(ctx)?
    };
    Ok(trim_trailing_blank_lines(&rtl).to_string())
}

/// Matched-filter variant: a counter reset on bit transitions. Only the
/// sample rate is exposed.
fn matched_filter_variant(ctx: &mut Context) -> Result<String, GenError> {
    ctx.set_pending("samples_per_symbol", derive_samples_per_symbol);

    let mut resolvers = ResolverSet::new();
    resolvers.register("samples_per_symbol", samples_per_symbol);
    render(MATCHED_FILTER_TEMPLATE, &resolvers, ctx)
}

/// Timing-error-detector variant with IF correction; exposes the bit widths
/// and shifts of the error datapath plus the quantized corrections.
fn paper_variant(ctx: &mut Context) -> Result<String, GenError> {
    ctx.set_pending("samples_per_symbol", derive_samples_per_symbol);
    ctx.set_pending("error_res", derive_error_res);
    ctx.set_pending("re_correction", derive_re_correction);
    ctx.set_pending("im_correction", derive_im_correction);
    ctx.set_pending("correction_shift", derive_correction_shift);

    let mut resolvers = ResolverSet::new();
    resolvers.register("samples_per_symbol", samples_per_symbol);
    resolvers.register("ek_shift", ek_shift);
    resolvers.register("tau_shift", tau_shift);
    resolvers.register("sample_pos", sample_pos);
    resolvers.register("adc_width", adc_width);
    resolvers.register("calculate_error_res", calculate_error_res);
    resolvers.register("re_correction", re_correction);
    resolvers.register("im_correction", im_correction);
    resolvers.register("correction_shift", correction_shift);
    render(PAPER_TEMPLATE, &resolvers, ctx)
}

// --- derivations -----------------------------------------------------------

/// Oversampling factor, exact by the divisibility precondition
fn derive_samples_per_symbol(ctx: &mut Context) -> Result<Value, GenError> {
    ctx.ensure(&["fsym", "clk_freq"])?;
    let fsym = ctx.resolve_i64("fsym")?;
    let clk_freq = ctx.resolve_i64("clk_freq")?;
    if fsym <= 0 || clk_freq <= 0 {
        return Err(GenError::Configuration(
            "symbol rate and clock rate must be positive".into(),
        ));
    }
    if clk_freq % fsym != 0 {
        return Err(GenError::Configuration(
            "clock rate must be an integer multiple of symbol rate".into(),
        ));
    }
    Ok(Value::Int(clk_freq / fsym))
}

/// Bit width of the raw error term: products of four `adc_width`-bit
/// samples plus the squaring carry
fn derive_error_res(ctx: &mut Context) -> Result<Value, GenError> {
    ctx.ensure(&["adc_width"])?;
    let adc_width = ctx.resolve_i64("adc_width")?;
    if adc_width <= 0 {
        return Err(GenError::Configuration(
            "adc_width must be positive".into(),
        ));
    }
    Ok(Value::Int(2 * (2 * adc_width + 1)))
}

fn derive_re_correction(ctx: &mut Context) -> Result<Value, GenError> {
    Ok(Value::Int(quantizer::derive_corrections(ctx)?.re))
}

fn derive_im_correction(ctx: &mut Context) -> Result<Value, GenError> {
    Ok(Value::Int(quantizer::derive_corrections(ctx)?.im))
}

fn derive_correction_shift(ctx: &mut Context) -> Result<Value, GenError> {
    Ok(Value::Int(i64::from(
        quantizer::derive_corrections(ctx)?.shift,
    )))
}

// --- resolvers -------------------------------------------------------------

fn render_param(ctx: &mut Context, name: &str) -> Result<String, GenError> {
    ctx.ensure(&[name])?;
    Ok(ctx.resolve(name)?.to_string())
}

fn samples_per_symbol(ctx: &mut Context) -> Result<String, GenError> {
    Ok(ctx.resolve("samples_per_symbol")?.to_string())
}

fn ek_shift(ctx: &mut Context) -> Result<String, GenError> {
    render_param(ctx, "ek_shift")
}

fn tau_shift(ctx: &mut Context) -> Result<String, GenError> {
    render_param(ctx, "tau_shift")
}

fn sample_pos(ctx: &mut Context) -> Result<String, GenError> {
    render_param(ctx, "sample_pos")
}

fn adc_width(ctx: &mut Context) -> Result<String, GenError> {
    render_param(ctx, "adc_width")
}

/// The ERROR_RES localparam line; widened by the correction shift so the
/// corrected products still fit
fn calculate_error_res(ctx: &mut Context) -> Result<String, GenError> {
    let error_res = ctx.resolve("error_res")?;
    let shift = ctx.resolve("correction_shift")?;
    Ok(format!(
        "localparam int ERROR_RES = {} + {};",
        error_res, shift
    ))
}

fn re_correction(ctx: &mut Context) -> Result<String, GenError> {
    Ok(ctx.resolve("re_correction")?.to_string())
}

fn im_correction(ctx: &mut Context) -> Result<String, GenError> {
    Ok(ctx.resolve("im_correction")?.to_string())
}

fn correction_shift(ctx: &mut Context) -> Result<String, GenError> {
    Ok(ctx.resolve("correction_shift")?.to_string())
}
