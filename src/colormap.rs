use std::fmt;
use std::str::FromStr;

use crate::errors::{Error, ErrorKind};
use crate::math::{CpuScalar, GpuScalar};

/// Perceptually uniform colour ramps, sampled at nine evenly spaced stops
/// and linearly interpolated in between.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Colormap {
    Viridis,
    Plasma,
}

impl Colormap {
    /// RGB colour for `t` in `[0, 1]`; values outside are clamped.
    pub fn rgb(&self, t: CpuScalar) -> [GpuScalar; 3] {
        let stops = self.stops();
        let last = stops.len() - 1;
        let position = if t.is_nan() { 0.0 } else { t.max(0.0).min(1.0) } * last as CpuScalar;
        let lower = position.floor() as usize;
        if lower >= last {
            return stops[last];
        }
        let fraction = (position - lower as CpuScalar) as GpuScalar;
        let (a, b) = (stops[lower], stops[lower + 1]);
        [a[0] + (b[0] - a[0]) * fraction,
         a[1] + (b[1] - a[1]) * fraction,
         a[2] + (b[2] - a[2]) * fraction]
    }

    pub fn rgba(&self, t: CpuScalar, alpha: GpuScalar) -> [GpuScalar; 4] {
        let [r, g, b] = self.rgb(t);
        [r, g, b, alpha]
    }

    fn stops(&self) -> &'static [[GpuScalar; 3]] {
        match *self {
            Colormap::Viridis => &VIRIDIS,
            Colormap::Plasma => &PLASMA,
        }
    }
}

impl FromStr for Colormap {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Error> {
        match value {
            "viridis" => Ok(Colormap::Viridis),
            "plasma" => Ok(Colormap::Plasma),
            _ => {
                Err(ErrorKind::InvalidParameter("colormap".into(),
                                                format!("unknown colormap '{}'", value))
                    .into())
            }
        }
    }
}

impl fmt::Display for Colormap {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Colormap::Viridis => write!(f, "viridis"),
            Colormap::Plasma => write!(f, "plasma"),
        }
    }
}

#[cfg_attr(rustfmt, rustfmt_skip)]
const VIRIDIS: [[GpuScalar; 3]; 9] = [
    [0.267004, 0.004874, 0.329415],
    [0.278826, 0.175490, 0.483397],
    [0.229739, 0.322361, 0.545706],
    [0.172719, 0.448791, 0.557885],
    [0.127568, 0.566949, 0.550556],
    [0.157851, 0.683765, 0.501686],
    [0.369214, 0.788888, 0.382914],
    [0.678489, 0.863742, 0.189503],
    [0.993248, 0.906157, 0.143936],
];

#[cfg_attr(rustfmt, rustfmt_skip)]
const PLASMA: [[GpuScalar; 3]; 9] = [
    [0.050383, 0.029803, 0.527975],
    [0.254627, 0.013882, 0.615419],
    [0.417642, 0.000564, 0.658390],
    [0.562738, 0.051545, 0.641509],
    [0.692840, 0.165141, 0.564522],
    [0.798216, 0.280197, 0.469538],
    [0.881443, 0.392529, 0.383229],
    [0.949217, 0.517763, 0.295662],
    [0.940015, 0.975158, 0.131326],
];
