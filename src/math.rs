//! Small numeric helpers used by the curl estimator.

/// Maps the unitless ratio `t` onto `[min, max]`, clamping the result to that range.
pub fn remap_clamped(min: f32, max: f32, t: f32) -> f32 {
    let mut result = t * (max - min) + min;
    if result > max {
        result = max;
    }
    if result < min {
        result = min;
    }
    result
}

/// Flips the sign of `x` when it lies below `threshold`. This is not `abs`: values between zero
/// and a positive threshold are negated too.
#[inline]
pub fn sign_correct(x: f32, threshold: f32) -> f32 {
    if x < threshold {
        -x
    } else {
        x
    }
}

#[inline]
pub fn abs_value(x: f32) -> f32 {
    x.abs()
}
