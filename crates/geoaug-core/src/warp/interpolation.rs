//! Interpolation kernels for backward warping.
//!
//! All kernels read their taps through a [`BorderMode`], so a sample near
//! the edge blends with extrapolated pixels exactly the way a sample far
//! outside the raster would.

use serde::{Deserialize, Serialize};

use super::border::{BorderMode, BorderValue};
use crate::raster::{Element, Raster};

/// Interpolation kernel used when resampling a raster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Interpolation {
    /// Nearest neighbour. Never invents new values; use for label masks.
    Nearest,
    /// Bilinear over a 2x2 neighbourhood.
    #[default]
    Linear,
    /// Bicubic over a 4x4 neighbourhood (a = -0.75).
    Cubic,
    /// Lanczos3 over a 6x6 neighbourhood, weight-normalized.
    Lanczos,
}

/// Bicubic kernel coefficient.
const CUBIC_A: f64 = -0.75;

/// Lanczos window radius.
const LANCZOS_RADIUS: f64 = 3.0;

/// Taps per axis, from `floor - 2` to `floor + 3`.
const LANCZOS_TAPS: usize = 6;
const LANCZOS_FIRST_TAP: i64 = -2;

/// A raster viewed through a border policy.
pub(crate) struct Sampler<'a, T: Element> {
    raster: &'a Raster<T>,
    border: BorderMode,
    fill: &'a BorderValue,
}

impl<'a, T: Element> Sampler<'a, T> {
    pub(crate) fn new(raster: &'a Raster<T>, border: BorderMode, fill: &'a BorderValue) -> Self {
        Self {
            raster,
            border,
            fill,
        }
    }

    /// Read one channel at an integer position, extrapolating if needed.
    #[inline]
    fn tap(&self, x: i64, y: i64, channel: usize) -> f64 {
        let ix = self.border.resolve(x, self.raster.width() as usize);
        let iy = self.border.resolve(y, self.raster.height() as usize);
        match (ix, iy) {
            (Some(ix), Some(iy)) => self.raster.sample_f32(ix, iy, channel) as f64,
            _ => self.fill.channel(channel) as f64,
        }
    }

    /// Interpolate every channel at `(x, y)` into `out`.
    pub(crate) fn sample(&self, x: f64, y: f64, interpolation: Interpolation, out: &mut [f32]) {
        match interpolation {
            Interpolation::Nearest => self.sample_nearest(x, y, out),
            Interpolation::Linear => self.sample_separable(x, y, 0, &linear_weights, out),
            Interpolation::Cubic => self.sample_separable(x, y, 1, &cubic_weights, out),
            Interpolation::Lanczos => self.sample_lanczos(x, y, out),
        }
    }

    fn sample_nearest(&self, x: f64, y: f64, out: &mut [f32]) {
        let (ix, iy) = (x.round() as i64, y.round() as i64);
        for (c, v) in out.iter_mut().enumerate() {
            *v = self.tap(ix, iy, c) as f32;
        }
    }

    /// Separable 4-or-fewer tap kernel. `before` is the number of taps left
    /// of (and above) the floor position.
    fn sample_separable<const N: usize>(
        &self,
        x: f64,
        y: f64,
        before: i64,
        weights: &dyn Fn(f64) -> [f64; N],
        out: &mut [f32],
    ) {
        let (x0, y0) = (x.floor(), y.floor());
        let wx = weights(x - x0);
        let wy = weights(y - y0);
        let (x0, y0) = (x0 as i64 - before, y0 as i64 - before);

        for (c, v) in out.iter_mut().enumerate() {
            let mut acc = 0.0;
            for (j, wyj) in wy.iter().enumerate() {
                let mut row = 0.0;
                for (i, wxi) in wx.iter().enumerate() {
                    row += wxi * self.tap(x0 + i as i64, y0 + j as i64, c);
                }
                acc += wyj * row;
            }
            *v = acc as f32;
        }
    }

    fn sample_lanczos(&self, x: f64, y: f64, out: &mut [f32]) {
        let (x0, y0) = (x.floor() as i64, y.floor() as i64);

        let wx: [f64; LANCZOS_TAPS] = std::array::from_fn(|i| {
            lanczos_weight(x - (x0 + LANCZOS_FIRST_TAP + i as i64) as f64, LANCZOS_RADIUS)
        });
        let wy: [f64; LANCZOS_TAPS] = std::array::from_fn(|j| {
            lanczos_weight(y - (y0 + LANCZOS_FIRST_TAP + j as i64) as f64, LANCZOS_RADIUS)
        });
        let weight_sum: f64 = wx.iter().sum::<f64>() * wy.iter().sum::<f64>();

        for (c, v) in out.iter_mut().enumerate() {
            let mut acc = 0.0;
            for (j, wyj) in wy.iter().enumerate() {
                let ty = y0 + LANCZOS_FIRST_TAP + j as i64;
                for (i, wxi) in wx.iter().enumerate() {
                    let tx = x0 + LANCZOS_FIRST_TAP + i as i64;
                    acc += wxi * wyj * self.tap(tx, ty, c);
                }
            }
            *v = if weight_sum.abs() > f64::EPSILON {
                (acc / weight_sum) as f32
            } else {
                0.0
            };
        }
    }
}

fn linear_weights(t: f64) -> [f64; 2] {
    [1.0 - t, t]
}

/// Bicubic convolution weights for the taps at offsets -1, 0, 1, 2.
fn cubic_weights(t: f64) -> [f64; 4] {
    let a = CUBIC_A;
    let w0 = ((a * (t + 1.0) - 5.0 * a) * (t + 1.0) + 8.0 * a) * (t + 1.0) - 4.0 * a;
    let w1 = ((a + 2.0) * t - (a + 3.0)) * t * t + 1.0;
    let u = 1.0 - t;
    let w2 = ((a + 2.0) * u - (a + 3.0)) * u * u + 1.0;
    [w0, w1, w2, 1.0 - w0 - w1 - w2]
}

/// Lanczos kernel weight function.
///
/// ```text
/// L(x) = sinc(x) * sinc(x/a)  for |x| < a
/// L(x) = 0                     for |x| >= a
/// ```
///
/// where sinc(x) = sin(πx) / (πx)
fn lanczos_weight(x: f64, a: f64) -> f64 {
    if x.abs() < f64::EPSILON {
        return 1.0;
    }
    if x.abs() >= a {
        return 0.0;
    }

    let pi_x = std::f64::consts::PI * x;
    let pi_x_a = pi_x / a;

    (a * pi_x.sin() * pi_x_a.sin()) / (pi_x * pi_x)
}
