//! Fixed local-storage keys shared by both game pages.
//!
//! RULE: values under these keys are plain strings. Numeric keys hold
//! whatever `f64::to_string` produced; anything unparseable reads as absent.

pub const EMAIL: &str = "registeredEmail";
pub const NAME: &str = "registeredName";

/// "1" once the player has completed the registration profile.
pub const PROFILE_DONE: &str = "btc_user_done";

pub const EQUITY: &str = "tg_metric_equity";
pub const ROI: &str = "tg_metric_roi";
pub const ACTIVITY: &str = "tg_activity_index";

/// "1" collapsed, anything else expanded.
pub const INFO_COLLAPSED: &str = "tg_info_collapsed";

/// Keys removed on logout. Equity and ROI survive a logout.
pub const IDENTITY_KEYS: [&str; 4] = [PROFILE_DONE, EMAIL, NAME, ACTIVITY];
