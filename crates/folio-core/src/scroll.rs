//! Section tracking for the dot navigator and scroll reveal styling.

use crate::config::RevealConfig;
use crate::math::clamp;

/// Document-space extent of one page section.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SectionBounds {
    pub top: f32,
    pub height: f32,
}

impl SectionBounds {
    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }
}

#[derive(Clone, Debug, Default)]
pub struct SectionNavigator {
    sections: Vec<SectionBounds>,
}

impl SectionNavigator {
    /// Sections are sorted by their top edge.
    pub fn new(mut sections: Vec<SectionBounds>) -> Self {
        sections.sort_by(|a, b| a.top.total_cmp(&b.top));
        Self { sections }
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Section under the viewport's vertical center.
    pub fn active_index(&self, scroll_y: f32, viewport_height: f32) -> Option<usize> {
        let first = self.sections.first()?;
        let probe = scroll_y + viewport_height * 0.5;
        if probe < first.top {
            return Some(0);
        }
        let hit = self
            .sections
            .iter()
            .rposition(|s| probe >= s.top)
            .unwrap_or(0);
        Some(hit)
    }

    pub fn scroll_target(&self, index: usize) -> Option<f32> {
        self.sections.get(index).map(|s| s.top)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RevealStyle {
    pub opacity: f32,
    pub translate_y: f32,
}

impl RevealStyle {
    pub const SHOWN: RevealStyle = RevealStyle {
        opacity: 1.0,
        translate_y: 0.0,
    };
}

/// Entry/exit styling for an element whose viewport rect spans
/// `rect_top..rect_bottom`.
///
/// Entering from below slides up into place; exiting past the top keeps
/// sliding up while fading out.
pub fn reveal_style(
    rect_top: f32,
    rect_bottom: f32,
    viewport_height: f32,
    config: &RevealConfig,
) -> RevealStyle {
    let band = config.band_px;
    // how far the top edge has risen above the viewport bottom
    let entry = clamp((viewport_height - rect_top) / band, 0.0, 1.0);
    // how much of the element remains below the viewport top
    let exit = clamp(rect_bottom / band, 0.0, 1.0);
    if entry < 1.0 {
        RevealStyle {
            opacity: entry,
            translate_y: (1.0 - entry) * config.offset_px,
        }
    } else if exit < 1.0 {
        RevealStyle {
            opacity: exit,
            translate_y: -(1.0 - exit) * config.offset_px,
        }
    } else {
        RevealStyle::SHOWN
    }
}
