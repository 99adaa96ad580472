//! HUD text (score and caught count)
//!
//! Tracks what was last shown so the DOM is only touched on change.

use crate::sim::{GameState, SessionTotals};

/// Text for the two HUD fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HudText {
    pub score: String,
    pub caught: String,
}

impl HudText {
    pub fn from_totals(totals: &SessionTotals) -> Self {
        Self {
            score: format!("Score: {}", totals.display_score()),
            caught: format!("Caught: {}", totals.caught),
        }
    }
}

/// Last values pushed to the HUD
#[derive(Debug, Clone, Default)]
pub struct Hud {
    shown: Option<(u64, u32)>,
}

impl Hud {
    pub fn new() -> Self {
        Self::default()
    }

    /// New text when the shown values changed or the state asked for a refresh
    pub fn refresh(&mut self, state: &mut GameState) -> Option<HudText> {
        let values = (state.totals.display_score(), state.totals.caught);
        let dirty = std::mem::replace(&mut state.hud_dirty, false);
        if !dirty && self.shown == Some(values) {
            return None;
        }
        self.shown = Some(values);
        Some(HudText::from_totals(&state.totals))
    }

    /// Write the text into `#score` and `#caught` (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn apply(text: &HudText) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        if let Some(el) = document.get_element_by_id("score") {
            el.set_text_content(Some(&text.score));
        }
        if let Some(el) = document.get_element_by_id("caught") {
            el.set_text_content(Some(&text.caught));
        }
    }
}
