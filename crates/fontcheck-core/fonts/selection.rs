//! Style-to-face selection strategies
//!
//! The strategy decides which face of a candidate set best serves a
//! requested style. [`LibassStrategy`] reproduces the rules libass applies
//! in `ass_font_select`: the family (or full/PostScript) name must match
//! after normalization, then faces compete on weight distance with a heavy
//! penalty for a slant mismatch, so a regular face still wins over a
//! different family but loses to the real italic.

use super::face::{normalize_family, FaceRecord};
use crate::analysis::UsedStyle;

/// Penalty added when the requested and provided slants differ.
/// Dominates any possible weight distance (max 900) so slant is only
/// traded away when no matching-slant face exists.
const SLANT_MISMATCH_PENALTY: u32 = 1000;

/// Scoring rule for matching a requested style against one face
///
/// Lower scores are better; `None` removes the face from consideration.
pub trait FontSelectionStrategy {
    /// Score `face` as a candidate for `style`
    fn score(&self, style: &UsedStyle, face: &FaceRecord) -> Option<u32>;
}

/// libass-compatible selection rules
#[derive(Debug, Clone, Copy, Default)]
pub struct LibassStrategy;

impl FontSelectionStrategy for LibassStrategy {
    fn score(&self, style: &UsedStyle, face: &FaceRecord) -> Option<u32> {
        let key = normalize_family(&style.family);
        if key.is_empty() || !face.keys.iter().any(|k| *k == key) {
            return None;
        }

        let weight_distance = u32::from(style.weight.abs_diff(face.weight));
        let slant_penalty = if style.italic == face.italic {
            0
        } else {
            SLANT_MISMATCH_PENALTY
        };
        Some(weight_distance + slant_penalty)
    }
}
