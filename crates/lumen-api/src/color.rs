//! RGB to CIE xy conversion for color writes.
//!
//! The bridge takes colors as xy chromaticity, not RGB. This is the
//! standard Philips conversion: inverse sRGB gamma, then the wide-gamut
//! RGB→XYZ matrix, then projection onto the xy plane.

/// D65 white point, used as the fallback for pure black (zero luminance
/// has no defined chromaticity).
const WHITE_POINT: [f64; 2] = [0.3127, 0.3290];

/// Convert an 8-bit RGB triple to CIE xy chromaticity.
pub fn rgb_to_xy(r: u8, g: u8, b: u8) -> [f64; 2] {
    let r = inverse_gamma(f64::from(r) / 255.0);
    let g = inverse_gamma(f64::from(g) / 255.0);
    let b = inverse_gamma(f64::from(b) / 255.0);

    let x = r * 0.664_511 + g * 0.154_324 + b * 0.162_028;
    let y = r * 0.283_881 + g * 0.668_433 + b * 0.047_685;
    let z = r * 0.000_088 + g * 0.072_310 + b * 0.986_039;

    let sum = x + y + z;
    if sum == 0.0 {
        return WHITE_POINT;
    }
    [x / sum, y / sum]
}

/// Convert CIE xy chromaticity plus a 0-254 brightness back to 8-bit RGB.
///
/// Inverse of [`rgb_to_xy`], used to report light colors in snapshots.
/// Out-of-gamut results are clamped.
pub fn xy_to_rgb(xy: [f64; 2], brightness: u8) -> (u8, u8, u8) {
    let [x, y] = xy;
    if y == 0.0 {
        return (0, 0, 0);
    }

    let luminance = f64::from(brightness) / 254.0;
    let cx = (luminance / y) * x;
    let cz = (luminance / y) * (1.0 - x - y);

    let r = cx * 1.656_492 - luminance * 0.354_851 - cz * 0.255_038;
    let g = -cx * 0.707_196 + luminance * 1.655_397 + cz * 0.036_152;
    let b = cx * 0.051_713 - luminance * 0.121_364 + cz * 1.011_530;

    (to_channel(r), to_channel(g), to_channel(b))
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_channel(linear: f64) -> u8 {
    let gamma = if linear <= 0.003_130_8 {
        12.92 * linear
    } else {
        1.055 * linear.powf(1.0 / 2.4) - 0.055
    };
    (gamma.clamp(0.0, 1.0) * 255.0).round() as u8
}

fn inverse_gamma(channel: f64) -> f64 {
    if channel > 0.04045 {
        ((channel + 0.055) / 1.055).powf(2.4)
    } else {
        channel / 12.92
    }
}
