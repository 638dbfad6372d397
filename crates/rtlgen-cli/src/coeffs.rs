//! Intermediate-frequency correction coefficients
//!
//! The timing error detector multiplies sample products taken two samples
//! apart; a nonzero intermediate frequency rotates those products by the
//! phase the IF accumulates across that spacing. The correction is the
//! inverse rotation, expressed as the real/imaginary pair the datapath
//! combines linearly with its re/im error terms.

use std::f64::consts::PI;

/// Raw correction coefficients for a normalized IF ratio and oversampling
/// factor
///
/// `ratio` is the intermediate frequency divided by the symbol rate;
/// `samples_per_symbol` the oversampling factor. Pure: same inputs, same
/// outputs.
pub fn if_correction(ratio: f64, samples_per_symbol: u32) -> (f64, f64) {
    // phase advance of the squared-signal products over the two-sample
    // spacing used by the error detector
    let phase = 4.0 * PI * ratio / f64::from(samples_per_symbol);
    (phase.cos(), phase.sin())
}
