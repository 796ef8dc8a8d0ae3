//! Textual rendering of numbers in responses.
//!
//! Floats are rendered in shortest round-trip form with a trailing `.0` on
//! whole values and `e+NN`/`e-NN` exponents outside `[1e-4, 1e16)`, the
//! format downstream inventory tooling parses (`298.0`, `1e+16`, `1.5e-05`).
//! Integer quantities keep their plain integer form.

/// Text used for a numeric observation that was never recorded.
pub const MISSING: &str = "None";

/// Text used for an unknown capacity factor.
pub const NOT_AVAILABLE: &str = "NA";

/// Renders a float in shortest round-trip form.
#[must_use]
pub fn float(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    // `Debug` already switches to exponent form at the same thresholds;
    // only the exponent spelling differs.
    let text = format!("{value:?}");
    match text.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = exponent
                .strip_prefix('-')
                .map_or(("+", exponent), |digits| ("-", digits));
            format!("{mantissa}e{sign}{digits:0>2}")
        }
        None => text,
    }
}

/// Renders an optional observation, using [`MISSING`] when absent.
#[must_use]
pub fn optional(value: Option<f64>) -> String {
    value.map_or_else(|| MISSING.to_string(), float)
}

/// Renders `mass * gwp` for an integer mass.
///
/// Whole-number potentials keep the product an integer (`10 * 273` renders
/// as `2730`); fractional ones produce a float (`10 * 29.8` renders as
/// `298.0`).
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
pub fn scaled_integer(mass: i64, gwp: f64) -> String {
    if gwp.fract() == 0.0 {
        mass.saturating_mul(gwp as i64).to_string()
    } else {
        float(mass as f64 * gwp)
    }
}
