//! Presentation adapter for the auth panel.
//!
//! Produces plain text lines and tones from a `MetricsStore`; the page
//! layer owns markup and events. `PanelRenderer` keeps the built layout
//! for the current user and swaps line text in place, rebuilding only
//! when the user changes.

use crate::{
    format::{format_activity, format_currency, format_percent},
    grade::Grade,
    keys,
    metrics::MetricsStore,
    storage::KeyValueStorage,
};
use serde::Serialize;

pub const COLLAPSED_LABEL: &str = "▸ Info";
pub const EXPANDED_LABEL: &str = "▾ Info";
pub const EVALUATING_LINE: &str = "[Activity evaluating…]";

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    Neutral,
    Gain,
    Loss,
    Bright,
}

impl Tone {
    pub fn color(self) -> &'static str {
        match self {
            Tone::Neutral => "#848e9c",
            Tone::Gain    => "#02c076",
            Tone::Loss    => "#cf304a",
            Tone::Bright  => "#d1d4dc",
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PanelLines {
    pub user:          String,
    pub equity_line:   String,
    pub roi_line:      String,
    pub roi_tone:      Tone,
    pub activity_line: String,
    pub activity_tone: Tone,
    pub grade:         Grade,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum PanelView {
    Hidden,
    Visible(PanelLines),
}

impl PanelView {
    /// Reloads activity from storage, then formats the current values.
    /// Hidden when not authenticated or when no email can be masked.
    pub fn build<S: KeyValueStorage>(store: &mut MetricsStore<S>, authed: bool) -> Self {
        if !authed {
            return PanelView::Hidden;
        }
        let user = store.masked_email();
        if user.is_empty() {
            return PanelView::Hidden;
        }
        store.load_activity();

        let equity_line = format!("[Equity {}]", or_dash(format_currency(store.equity())));
        let roi_line = format!("[ROI {}]", or_dash(format_percent(store.roi_percent())));
        let roi_tone = match store.roi_percent() {
            None => Tone::Neutral,
            Some(r) if r >= 0.0 => Tone::Gain,
            Some(_) => Tone::Loss,
        };

        let grade = store.grade();
        let (activity_line, activity_tone) = match store.activity() {
            Some(a) => (
                format!("[Activity {}p, {}]", format_activity(Some(a)), grade.label()),
                Tone::Bright,
            ),
            None => (EVALUATING_LINE.to_string(), Tone::Neutral),
        };

        PanelView::Visible(PanelLines {
            user,
            equity_line,
            roi_line,
            roi_tone,
            activity_line,
            activity_tone,
            grade,
        })
    }

    pub fn is_visible(&self) -> bool {
        matches!(self, PanelView::Visible(_))
    }
}

fn or_dash(s: String) -> String {
    if s.is_empty() { "-".to_string() } else { s }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RenderOutcome {
    Hidden,
    Rebuilt,
    Updated,
}

/// Holds the layout built for the current user.
#[derive(Debug, Default)]
pub struct PanelRenderer {
    current:  Option<PanelLines>,
    rebuilds: u32,
}

impl PanelRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// A hidden view keeps the cached layout so showing the same user
    /// again is an in-place update.
    pub fn render(&mut self, view: PanelView) -> RenderOutcome {
        let lines = match view {
            PanelView::Hidden => return RenderOutcome::Hidden,
            PanelView::Visible(lines) => lines,
        };
        match self.current.as_mut() {
            Some(cur) if cur.user == lines.user => {
                *cur = lines;
                RenderOutcome::Updated
            }
            _ => {
                self.rebuilds += 1;
                log::debug!("panel: layout rebuilt for {}", lines.user);
                self.current = Some(lines);
                RenderOutcome::Rebuilt
            }
        }
    }

    pub fn current(&self) -> Option<&PanelLines> {
        self.current.as_ref()
    }

    pub fn rebuild_count(&self) -> u32 {
        self.rebuilds
    }
}

/// Collapse state of the info box. Defaults to expanded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InfoToggle {
    collapsed: bool,
}

impl InfoToggle {
    pub fn load<S: KeyValueStorage>(storage: &S) -> Self {
        let collapsed = match storage.get_item(keys::INFO_COLLAPSED) {
            Ok(flag) => flag.as_deref() == Some("1"),
            Err(e) => {
                log::warn!("panel: read of {} failed: {e}", keys::INFO_COLLAPSED);
                false
            }
        };
        Self { collapsed }
    }

    /// Flip the state and persist it. The in-memory state flips even
    /// when the write fails.
    pub fn toggle<S: KeyValueStorage>(&mut self, storage: &mut S) -> bool {
        self.collapsed = !self.collapsed;
        let flag = if self.collapsed { "1" } else { "0" };
        if let Err(e) = storage.set_item(keys::INFO_COLLAPSED, flag) {
            log::warn!("panel: write of {} failed: {e}", keys::INFO_COLLAPSED);
        }
        self.collapsed
    }

    pub fn is_collapsed(&self) -> bool {
        self.collapsed
    }

    pub fn label(&self) -> &'static str {
        if self.collapsed { COLLAPSED_LABEL } else { EXPANDED_LABEL }
    }
}
