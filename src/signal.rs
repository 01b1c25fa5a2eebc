//! Raw signal normalization.
//!
//! Basecallers are trained on normalized signal, so every read's raw DAC
//! values are rescaled before dispatch: subtract the median, divide by the
//! median absolute deviation scaled to be a consistent estimator of the
//! standard deviation under normality.

/// Normal-consistency scale factor for the median absolute deviation.
pub const MAD_SCALE_FACTOR: f32 = 1.4826;

/// Computes the median and scaled median absolute deviation of a signal.
///
/// The MAD is scaled by [`MAD_SCALE_FACTOR`]. The input must be non-empty.
#[must_use]
pub fn med_mad(signal: &[f32]) -> (f32, f32) {
    let med = median(signal);
    let deviations: Vec<f32> = signal.iter().map(|value| (value - med).abs()).collect();
    let mad = median(&deviations) * MAD_SCALE_FACTOR;
    (med, mad)
}

/// Rescales a raw signal to zero median and unit scaled-MAD.
///
/// Returns a same-length `f32` sequence. Degenerate inputs are handled
/// explicitly rather than dividing by zero: an empty signal yields an empty
/// vector, and a signal whose MAD is exactly zero (e.g. a constant signal)
/// is returned median-centered but unscaled.
#[must_use]
pub fn normalize(signal: &[i16]) -> Vec<f32> {
    if signal.is_empty() {
        return Vec::new();
    }

    let mut values: Vec<f32> = signal.iter().map(|&value| f32::from(value)).collect();
    let (med, mad) = med_mad(&values);

    if mad == 0.0 {
        for value in &mut values {
            *value -= med;
        }
    } else {
        for value in &mut values {
            *value = (*value - med) / mad;
        }
    }

    values
}

/// Median of a non-empty slice; the mean of the two middle values when the
/// length is even.
fn median(values: &[f32]) -> f32 {
    debug_assert!(!values.is_empty());

    let mut sorted = values.to_vec();
    sorted.sort_unstable_by(f32::total_cmp);

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}
