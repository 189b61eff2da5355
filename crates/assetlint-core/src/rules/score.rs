//! Impact scoring model.
//!
//! Every rule maps its measured value onto a unitless impact in `[0, 100]`
//! using a linear function of how far the measurement exceeds its threshold,
//! followed by a per-rule clamp. Severity is then derived from impact alone
//! through [`severity_for`].
//!
//! Formulas multiply before dividing where possible so that the documented
//! reference scenarios land on exact values.

use crate::rules::catalog::Severity;

/// Impact above which an issue is critical.
pub const CRITICAL_ABOVE: f64 = 75.0;

/// Impact above which an issue is a warning.
pub const WARNING_ABOVE: f64 = 45.0;

/// Fixed impact of the two-sided material rule.
pub const TWO_SIDED_IMPACT: f64 = 35.0;

/// Clamp `value` into `[lo, hi]`, then into `[0, 100]`.
///
/// NaN maps to `lo`.
pub fn clamp_impact(value: f64, lo: f64, hi: f64) -> f64 {
    let v = if value.is_nan() { lo } else { value.clamp(lo, hi) };
    v.clamp(0.0, 100.0)
}

/// `scale * (r - 1)` where `r = measured / threshold` is the excess ratio.
fn scaled_excess(scale: f64, measured: f64, threshold: f64) -> f64 {
    scale * (measured - threshold) / threshold
}

/// Severity map shared by all impact-scored rules.
pub fn severity_for(impact: f64) -> Severity {
    if impact > CRITICAL_ABOVE {
        Severity::Critical
    } else if impact > WARNING_ABOVE {
        Severity::Warning
    } else {
        Severity::Info
    }
}

pub fn high_poly(triangles: u64, threshold: u64) -> f64 {
    let e = scaled_excess(60.0, triangles as f64, threshold as f64);
    clamp_impact(e + 10.0, 10.0, 100.0)
}

pub fn missing_lods(triangles: u64) -> f64 {
    clamp_impact(40.0 * triangles as f64 / 50_000.0 + 20.0, 20.0, 70.0)
}

pub fn oversized_texture(max_dimension: u32, threshold: u32, memory_mb: u64) -> f64 {
    let e = scaled_excess(45.0, f64::from(max_dimension), f64::from(threshold));
    let memory_term = (memory_mb as f64 / 8.0).min(40.0);
    clamp_impact(e + memory_term + 10.0, 10.0, 100.0)
}

pub fn texture_samples(samples: u32, threshold: u32) -> f64 {
    let e = scaled_excess(50.0, f64::from(samples), f64::from(threshold));
    clamp_impact(e + 20.0, 20.0, 95.0)
}

pub fn complex_translucency(samples: u32) -> f64 {
    clamp_impact(8.0 * f64::from(samples), 30.0, 80.0)
}

pub fn shader_complexity(instructions: u32, threshold: u32) -> f64 {
    let e = scaled_excess(60.0, f64::from(instructions), f64::from(threshold));
    clamp_impact(e + 25.0, 25.0, 90.0)
}

pub fn complex_blueprint(nodes: u64, threshold: u64) -> f64 {
    let e = scaled_excess(55.0, nodes as f64, threshold as f64);
    clamp_impact(e + 15.0, 15.0, 100.0)
}

pub fn tick_in_complex_blueprint(nodes: u64) -> f64 {
    clamp_impact(60.0 * nodes as f64 / 200.0 + 25.0, 25.0, 95.0)
}

pub fn underused_instances(base_materials: usize, instances: usize) -> f64 {
    let per_base = instances as f64 / base_materials as f64;
    clamp_impact(20.0 * (3.0 - per_base), 25.0, 60.0)
}
