use crate::prelude::Real;

#[inline]
pub fn sqr(x: Real) -> Real {
    x * x
}

/// Return `num` evenly spaced values from `start` to `stop`, both included.
///
/// The last value is exactly `stop`. A single value is just `start`.
pub fn linspace(start: Real, stop: Real, num: usize) -> Vec<Real> {
    match num {
        0 => vec![],
        1 => vec![start],
        _ => {
            let delta = (stop - start) / (num - 1) as Real;
            (0..num)
                .map(|k| if k == num - 1 { stop } else { start + k as Real * delta })
                .collect()
        }
    }
}
