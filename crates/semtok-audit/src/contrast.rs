//! Color contrast collaborator
//!
//! The accessibility analyzer only consumes [`ContrastChecker`]; the
//! bundled [`StandardContrast`] implements WCAG 2.x relative luminance and
//! APCA 0.0.98G lightness contrast over hex colors.

use semtok_token::parse_hex;
use serde::{Deserialize, Serialize};

/// WCAG conformance levels met by a ratio
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WcagLevels {
    /// AA normal text (4.5)
    pub aa: bool,
    /// AA large text (3.0)
    pub aa_large: bool,
    /// AAA normal text (7.0)
    pub aaa: bool,
}

/// Result of comparing a foreground with a background
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContrastResult {
    /// WCAG contrast ratio in `[1, 21]`
    pub wcag_ratio: f64,
    /// WCAG levels met
    pub wcag: WcagLevels,
    /// APCA lightness contrast (signed; negative for light text on dark)
    pub apca_lc: f64,
    /// Descriptive APCA level
    pub apca_level: String,
}

/// External color contrast collaborator
pub trait ContrastChecker: Send + Sync {
    /// Compare two literal colors
    ///
    /// Returns `None` when either color cannot be interpreted.
    fn check(&self, foreground: &str, background: &str) -> Option<ContrastResult>;
}

/// WCAG 2.x plus APCA 0.0.98G over hex colors
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardContrast;

impl StandardContrast {
    /// Create checker
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

fn srgb_to_linear(channel: u8) -> f64 {
    let c = f64::from(channel) / 255.0;
    if c <= 0.040_45 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// WCAG relative luminance
fn relative_luminance([r, g, b]: [u8; 3]) -> f64 {
    0.2126 * srgb_to_linear(r) + 0.7152 * srgb_to_linear(g) + 0.0722 * srgb_to_linear(b)
}

/// WCAG contrast ratio between two colors
#[must_use]
pub fn wcag_ratio(a: [u8; 3], b: [u8; 3]) -> f64 {
    let la = relative_luminance(a);
    let lb = relative_luminance(b);
    let (hi, lo) = if la >= lb { (la, lb) } else { (lb, la) };
    (hi + 0.05) / (lo + 0.05)
}

/// APCA screen luminance with soft black clamp
fn apca_luminance([r, g, b]: [u8; 3]) -> f64 {
    const BLACK_THRESHOLD: f64 = 0.022;
    const BLACK_CLAMP: f64 = 1.414;

    let channel = |c: u8| (f64::from(c) / 255.0).powf(2.4);
    let y = 0.212_672_9 * channel(r) + 0.715_152_2 * channel(g) + 0.072_175 * channel(b);
    if y < BLACK_THRESHOLD {
        y + (BLACK_THRESHOLD - y).powf(BLACK_CLAMP)
    } else {
        y
    }
}

/// APCA lightness contrast of `text` on `background`
#[must_use]
pub fn apca_contrast(text: [u8; 3], background: [u8; 3]) -> f64 {
    const NORM_BG: f64 = 0.56;
    const NORM_TXT: f64 = 0.57;
    const REV_TXT: f64 = 0.62;
    const REV_BG: f64 = 0.65;
    const SCALE: f64 = 1.14;
    const LO_OFFSET: f64 = 0.027;
    const LO_CLIP: f64 = 0.1;
    const DELTA_Y_MIN: f64 = 0.0005;

    let y_txt = apca_luminance(text);
    let y_bg = apca_luminance(background);

    if (y_bg - y_txt).abs() < DELTA_Y_MIN {
        return 0.0;
    }

    let output = if y_bg > y_txt {
        let sapc = (y_bg.powf(NORM_BG) - y_txt.powf(NORM_TXT)) * SCALE;
        if sapc < LO_CLIP {
            0.0
        } else {
            sapc - LO_OFFSET
        }
    } else {
        let sapc = (y_bg.powf(REV_BG) - y_txt.powf(REV_TXT)) * SCALE;
        if sapc > -LO_CLIP {
            0.0
        } else {
            sapc + LO_OFFSET
        }
    };

    output * 100.0
}

fn apca_level(lc: f64) -> &'static str {
    match lc.abs() {
        x if x >= 90.0 => "preferred body text",
        x if x >= 75.0 => "body text",
        x if x >= 60.0 => "content text",
        x if x >= 45.0 => "large text",
        x if x >= 30.0 => "spot text",
        x if x >= 15.0 => "non-text",
        _ => "invisible",
    }
}

impl ContrastChecker for StandardContrast {
    fn check(&self, foreground: &str, background: &str) -> Option<ContrastResult> {
        let fg = parse_hex(foreground.trim())?;
        let bg = parse_hex(background.trim())?;

        let ratio = wcag_ratio(fg, bg);
        let lc = apca_contrast(fg, bg);

        Some(ContrastResult {
            wcag_ratio: ratio,
            wcag: WcagLevels {
                aa: ratio >= 4.5,
                aa_large: ratio >= 3.0,
                aaa: ratio >= 7.0,
            },
            apca_lc: lc,
            apca_level: apca_level(lc).to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn black_on_white_is_maximal() {
        let result = StandardContrast.check("#000000", "#ffffff").unwrap();
        assert!((result.wcag_ratio - 21.0).abs() < 0.01);
        assert!(result.wcag.aaa);
        assert!((result.apca_lc - 106.04).abs() < 0.1);
    }

    #[test]
    fn white_on_blue_fails_wcag_aa() {
        let result = StandardContrast.check("#FFFFFF", "#3B82F6").unwrap();
        assert!((result.wcag_ratio - 3.68).abs() < 0.01);
        assert!(!result.wcag.aa);
        assert!(result.wcag.aa_large);
        assert!(result.apca_lc < -60.0);
    }

    #[test]
    fn identical_colors_have_no_contrast() {
        let result = StandardContrast.check("#777", "#777777").unwrap();
        assert!((result.wcag_ratio - 1.0).abs() < 1e-9);
        assert!(result.apca_lc.abs() < f64::EPSILON);
        assert_eq!(result.apca_level, "invisible");
    }

    #[test]
    fn non_hex_is_not_computable() {
        assert!(StandardContrast.check("rgb(0,0,0)", "#fff").is_none());
    }
}
