//! End-to-end tests over the whole generation pipeline

use std::collections::HashMap;

use rtlgen_core::{find_module, Context, GenError, Value};

fn base_args(mf: bool) -> HashMap<String, Value> {
    let pairs: &[(&str, Value)] = &[
        ("mf_clock_rec", Value::Bool(mf)),
        ("fsym", Value::Int(10)),
        ("clk_freq", Value::Int(160)),
        ("ifreq", Value::Float(25.0)),
        ("ek_shift", Value::Int(2)),
        ("tau_shift", Value::Int(11)),
        ("sample_pos", Value::Int(2)),
        ("adc_width", Value::Int(4)),
    ];
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

fn half_quarter(_ratio: f64, _sps: u32) -> (f64, f64) {
    (0.5, 0.25)
}

fn render(mf: bool) -> Result<String, GenError> {
    let module = find_module("clock_recovery").unwrap();
    let mut ctx = Context::new(base_args(mf)).with_coefficients(half_quarter);
    (module.generate)(&mut ctx)
}

#[test]
fn test_variant_dispatch_produces_structurally_distinct_modules() {
    let matched_filter = render(true).unwrap();
    let paper = render(false).unwrap();

    // variant A: a bit follower with only the sample-rate parameter
    assert!(matched_filter.contains("input logic mf_bit"));
    assert!(!matched_filter.contains("TAU_SHIFT"));

    // variant B: the error-detector datapath with its widths and shifts
    assert!(paper.contains("parameter int TAU_SHIFT = 11"));
    assert!(paper.contains("input logic signed [DATA_WIDTH-1:0] i_data, q_data"));
    assert!(!paper.contains("mf_bit"));

    assert_ne!(matched_filter, paper);
}

#[test]
fn test_samples_per_symbol_from_exact_division() {
    // clock 160, symbol rate 10: sixteen samples per symbol
    let rtl = render(true).unwrap();
    assert!(rtl.contains("parameter int SAMPLE_RATE = 16"));
}

#[test]
fn test_quantized_corrections_flow_into_rtl() {
    // (0.5, 0.25) quantizes to (2, 1) with shift 2
    let rtl = render(false).unwrap();
    assert!(rtl.contains("integer re_correction = 2;"));
    assert!(rtl.contains("integer im_correction = 1;"));
    assert!(rtl.contains(">>> 2;"));
    assert!(rtl.contains("localparam int ERROR_RES = 18 + 2;"));
}

#[test]
fn test_rendering_is_idempotent() {
    assert_eq!(render(false).unwrap(), render(false).unwrap());
    assert_eq!(render(true).unwrap(), render(true).unwrap());
}

#[test]
fn test_indivisible_clock_rate_aborts_render() {
    let module = find_module("clock_recovery").unwrap();
    let mut args = base_args(false);
    args.insert("clk_freq".to_string(), Value::Int(100));
    args.insert("fsym".to_string(), Value::Int(7));
    let mut ctx = Context::new(args).with_coefficients(half_quarter);

    match (module.generate)(&mut ctx).unwrap_err() {
        GenError::Configuration(msg) => {
            assert_eq!(msg, "clock rate must be an integer multiple of symbol rate");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_dropped_parameter_fails_with_its_name() {
    let module = find_module("clock_recovery").unwrap();
    let mut args = base_args(false);
    args.remove("tau_shift");
    let mut ctx = Context::new(args).with_coefficients(half_quarter);

    match (module.generate)(&mut ctx).unwrap_err() {
        GenError::MissingParameter(name) => assert_eq!(name, "tau_shift"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_nonconvergent_coefficients_abort_render() {
    fn irrational(_ratio: f64, _sps: u32) -> (f64, f64) {
        (std::f64::consts::FRAC_1_SQRT_2, 0.5)
    }
    let module = find_module("clock_recovery").unwrap();
    let mut ctx = Context::new(base_args(false)).with_coefficients(irrational);
    assert!(matches!(
        (module.generate)(&mut ctx).unwrap_err(),
        GenError::QuantizationNonConvergence { .. }
    ));
}
