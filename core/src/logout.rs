//! Logout flow.
//!
//! With an open position the player is warned that it will not be
//! recorded; on confirmation the caller closes the position, waits the
//! fixed delay, then finalizes. The delay is fire-and-forget: nothing
//! awaits or cancels it.

use crate::{config::PanelConfig, metrics::MetricsStore, storage::KeyValueStorage};
use serde::Serialize;
use std::time::Duration;

pub const OPEN_POSITION_PROMPT: &str = "Close your position before logging out so it is recorded.\n\n\
If you log out now, the open position will not be recorded.\n\n\
[OK] Close position and log out\n[Cancel] Stay";

pub const LOGOUT_PROMPT: &str = "Log out?";

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum LogoutDecision {
    /// Not authenticated; the click does nothing.
    Ignored,
    Cancelled,
    /// Identity already cleared.
    LoggedOut,
    /// Caller must close the position, wait `delay`, then `finalize`.
    ClosePositionThenLogout { delay_ms: u64 },
}

impl LogoutDecision {
    pub fn delay(&self) -> Option<Duration> {
        match self {
            LogoutDecision::ClosePositionThenLogout { delay_ms } => {
                Some(Duration::from_millis(*delay_ms))
            }
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct LogoutFlow {
    delay_ms: u64,
}

impl LogoutFlow {
    pub fn new(delay_ms: u64) -> Self {
        Self { delay_ms }
    }

    /// `confirm` receives the prompt text and returns the player's answer.
    pub fn request<S, F>(
        &self,
        store: &mut MetricsStore<S>,
        authed: bool,
        has_position: bool,
        mut confirm: F,
    ) -> LogoutDecision
    where
        S: KeyValueStorage,
        F: FnMut(&str) -> bool,
    {
        if !authed {
            return LogoutDecision::Ignored;
        }

        if has_position {
            if !confirm(OPEN_POSITION_PROMPT) {
                return LogoutDecision::Cancelled;
            }
            log::info!("logout: closing open position, finalizing in {}ms", self.delay_ms);
            return LogoutDecision::ClosePositionThenLogout { delay_ms: self.delay_ms };
        }

        if !confirm(LOGOUT_PROMPT) {
            return LogoutDecision::Cancelled;
        }
        Self::finalize(store);
        LogoutDecision::LoggedOut
    }

    pub fn finalize<S: KeyValueStorage>(store: &mut MetricsStore<S>) {
        store.clear();
    }
}

impl Default for LogoutFlow {
    fn default() -> Self {
        Self::new(PanelConfig::default().logout_delay_ms)
    }
}
