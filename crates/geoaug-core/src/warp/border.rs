//! Border policies for samples that fall outside the source raster.

use serde::{Deserialize, Serialize};

/// How to extrapolate pixels beyond the source edge.
///
/// Shown for a row `abcdefgh` extended to the left and right:
///
/// ```text
/// Constant     iiiiii|abcdefgh|iiiiiii   (i = border value)
/// Replicate    aaaaaa|abcdefgh|hhhhhhh
/// Reflect      fedcba|abcdefgh|hgfedcb
/// Reflect101   gfedcb|abcdefgh|gfedcba
/// Wrap         cdefgh|abcdefgh|abcdefg
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BorderMode {
    /// Fill with a fixed [`BorderValue`].
    Constant,
    /// Repeat the edge pixel.
    Replicate,
    /// Mirror including the edge pixel.
    #[default]
    Reflect,
    /// Mirror excluding the edge pixel.
    Reflect101,
    /// Tile the raster periodically.
    Wrap,
}

impl BorderMode {
    /// Map a possibly out-of-range index onto `0..len`.
    ///
    /// Returns `None` when the sample should come from the border value
    /// (only for [`BorderMode::Constant`]).
    pub fn resolve(self, index: i64, len: usize) -> Option<usize> {
        let n = len as i64;
        if (0..n).contains(&index) {
            return Some(index as usize);
        }

        let resolved = match self {
            BorderMode::Constant => return None,
            BorderMode::Replicate => index.clamp(0, n - 1),
            BorderMode::Reflect => {
                let period = 2 * n;
                let m = index.rem_euclid(period);
                if m < n {
                    m
                } else {
                    period - 1 - m
                }
            }
            BorderMode::Reflect101 => {
                if n == 1 {
                    0
                } else {
                    let period = 2 * n - 2;
                    let m = index.rem_euclid(period);
                    if m < n {
                        m
                    } else {
                        period - m
                    }
                }
            }
            BorderMode::Wrap => index.rem_euclid(n),
        };
        Some(resolved as usize)
    }
}

/// Fill value used by [`BorderMode::Constant`].
///
/// Deserializes from either a number or a list of per-channel numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BorderValue {
    /// Same value on every channel.
    Scalar(f32),
    /// One value per channel; missing channels read as 0.
    PerChannel(Vec<f32>),
}

impl Default for BorderValue {
    fn default() -> Self {
        BorderValue::Scalar(0.0)
    }
}

impl From<f32> for BorderValue {
    fn from(value: f32) -> Self {
        BorderValue::Scalar(value)
    }
}

impl From<Vec<f32>> for BorderValue {
    fn from(values: Vec<f32>) -> Self {
        BorderValue::PerChannel(values)
    }
}

impl BorderValue {
    /// Fill value for `channel`.
    #[inline]
    pub fn channel(&self, channel: usize) -> f32 {
        match self {
            BorderValue::Scalar(v) => *v,
            BorderValue::PerChannel(values) => values.get(channel).copied().unwrap_or(0.0),
        }
    }
}
