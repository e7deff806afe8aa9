//! Persisted metrics store: in-memory mirrors of equity, ROI, and
//! activity, backed by injected local storage.
//!
//! RULES:
//!   - A missing, empty, or non-numeric stored value reads as `None`,
//!     never as zero.
//!   - Storage failures are logged and swallowed. A failed read keeps the
//!     previous in-memory value.
//!   - Setting `None` removes the stored key so storage and memory agree.
//!   - Construct once per session; there is no global instance.

use crate::{
    config::MaskConfig,
    email::mask_email_with,
    grade::Grade,
    keys,
    storage::KeyValueStorage,
};
use serde::{Deserialize, Serialize};

/// Called after every setter and after a reset, with the updated values.
pub type RenderHook = Box<dyn FnMut(&MetricsSnapshot)>;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct MetricsSnapshot {
    pub equity:      Option<f64>,
    pub roi_percent: Option<f64>,
    pub activity:    Option<f64>,
}

pub struct MetricsStore<S: KeyValueStorage> {
    storage:     S,
    mask:        MaskConfig,
    equity:      Option<f64>,
    roi_percent: Option<f64>,
    activity:    Option<f64>,
    render_hook: Option<RenderHook>,
}

impl<S: KeyValueStorage> MetricsStore<S> {
    /// Wrap `storage` and seed the in-memory values from it.
    pub fn open(storage: S) -> Self {
        Self::open_with_mask(storage, MaskConfig::default())
    }

    pub fn open_with_mask(storage: S, mask: MaskConfig) -> Self {
        let mut store = Self {
            storage,
            mask,
            equity: None,
            roi_percent: None,
            activity: None,
            render_hook: None,
        };
        store.load();
        store
    }

    // ── Loading ────────────────────────────────────────────────

    pub fn load(&mut self) {
        self.load_metrics();
        self.load_activity();
    }

    pub fn load_metrics(&mut self) {
        if let Some(v) = self.read_number(keys::EQUITY) {
            self.equity = v;
        }
        if let Some(v) = self.read_number(keys::ROI) {
            self.roi_percent = v;
        }
    }

    pub fn load_activity(&mut self) {
        if let Some(v) = self.read_number(keys::ACTIVITY) {
            self.activity = v;
        }
    }

    /// Outer `None` means the read failed and the caller should keep
    /// its current value.
    fn read_number(&self, key: &str) -> Option<Option<f64>> {
        match self.storage.get_item(key) {
            Ok(raw) => Some(raw.as_deref().and_then(parse_stored)),
            Err(e) => {
                log::warn!("metrics: read of {key} failed, keeping cached value: {e}");
                None
            }
        }
    }

    // ── Setters ────────────────────────────────────────────────

    /// Non-finite inputs are treated as `None`.
    pub fn set_metrics(&mut self, equity: Option<f64>, roi_percent: Option<f64>) {
        self.equity = finite(equity);
        self.roi_percent = finite(roi_percent);
        self.persist(keys::EQUITY, self.equity);
        self.persist(keys::ROI, self.roi_percent);
        self.notify();
    }

    pub fn set_activity(&mut self, activity: Option<f64>) {
        self.activity = finite(activity);
        self.persist(keys::ACTIVITY, self.activity);
        self.notify();
    }

    fn persist(&mut self, key: &str, value: Option<f64>) {
        let result = match value {
            Some(v) => self.storage.set_item(key, &v.to_string()),
            None => self.storage.remove_item(key),
        };
        match result {
            Ok(()) => log::debug!("metrics: persisted {key} = {value:?}"),
            Err(e) => log::warn!("metrics: write of {key} failed: {e}"),
        }
    }

    pub fn set_render_hook(&mut self, hook: impl FnMut(&MetricsSnapshot) + 'static) {
        self.render_hook = Some(Box::new(hook));
    }

    pub fn clear_render_hook(&mut self) {
        self.render_hook = None;
    }

    fn notify(&mut self) {
        let snapshot = self.snapshot();
        if let Some(hook) = self.render_hook.as_mut() {
            hook(&snapshot);
        }
    }

    // ── Identity ───────────────────────────────────────────────

    /// Record a completed registration. Used on login.
    pub fn set_identity(&mut self, email: &str, name: &str) {
        let writes = [
            (keys::EMAIL, email.trim()),
            (keys::NAME, name.trim()),
            (keys::PROFILE_DONE, "1"),
        ];
        for (key, value) in writes {
            if let Err(e) = self.storage.set_item(key, value) {
                log::warn!("metrics: write of {key} failed: {e}");
            }
        }
    }

    /// Remove identity and activity keys. Equity and ROI are kept.
    pub fn clear(&mut self) {
        for key in keys::IDENTITY_KEYS {
            match self.storage.remove_item(key) {
                Ok(()) => {
                    if key == keys::ACTIVITY {
                        self.activity = None;
                    }
                }
                Err(e) => log::warn!("metrics: removal of {key} failed: {e}"),
            }
        }
        log::info!("metrics: identity cleared");
    }

    /// Emergency reset: wipe all of local storage and drop the cached
    /// metrics. On a storage failure nothing changes.
    pub fn reset(&mut self) {
        if let Err(e) = self.storage.clear_all() {
            log::warn!("metrics: reset failed, keeping cached values: {e}");
            return;
        }
        self.equity = None;
        self.roi_percent = None;
        self.activity = None;
        log::info!("metrics: local storage reset");
        self.notify();
    }

    /// Masked stored email, or `""` when none is stored.
    pub fn masked_email(&self) -> String {
        match self.storage.get_item(keys::EMAIL) {
            Ok(Some(email)) => mask_email_with(&email, &self.mask),
            Ok(None) => String::new(),
            Err(e) => {
                log::warn!("metrics: read of {} failed: {e}", keys::EMAIL);
                String::new()
            }
        }
    }

    pub fn registered_name(&self) -> Option<String> {
        match self.storage.get_item(keys::NAME) {
            Ok(name) => name,
            Err(e) => {
                log::warn!("metrics: read of {} failed: {e}", keys::NAME);
                None
            }
        }
    }

    /// Profile flag set and a maskable email stored.
    pub fn is_authenticated(&self) -> bool {
        let done = matches!(
            self.storage.get_item(keys::PROFILE_DONE),
            Ok(Some(ref flag)) if flag == "1"
        );
        done && !self.masked_email().is_empty()
    }

    // ── Accessors ──────────────────────────────────────────────

    pub fn equity(&self) -> Option<f64> {
        self.equity
    }

    pub fn roi_percent(&self) -> Option<f64> {
        self.roi_percent
    }

    pub fn activity(&self) -> Option<f64> {
        self.activity
    }

    pub fn grade(&self) -> Grade {
        Grade::from_activity(self.activity)
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            equity:      self.equity,
            roi_percent: self.roi_percent,
            activity:    self.activity,
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }
}

fn finite(v: Option<f64>) -> Option<f64> {
    v.filter(|x| x.is_finite())
}

/// Parse a stored numeric string. Empty, unparseable, and non-finite
/// values are absent.
pub fn parse_stored(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    raw.parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_stored_rejects_empty_and_garbage() {
        assert_eq!(parse_stored(""), None);
        assert_eq!(parse_stored("   "), None);
        assert_eq!(parse_stored("abc"), None);
        assert_eq!(parse_stored("NaN"), None);
        assert_eq!(parse_stored("inf"), None);
        assert_eq!(parse_stored("12abc"), None);
    }

    #[test]
    fn parse_stored_accepts_plain_numbers() {
        assert_eq!(parse_stored("0"), Some(0.0));
        assert_eq!(parse_stored(" 1234.5 "), Some(1234.5));
        assert_eq!(parse_stored("-0.19"), Some(-0.19));
        assert_eq!(parse_stored("1e3"), Some(1000.0));
    }
}
