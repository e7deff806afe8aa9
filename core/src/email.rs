//! Masked display form of the registered email.

use crate::config::MaskConfig;

/// `"alexander@example.com"` -> `"alexa***"`, `"jo@x.io"` -> `"jo***"`.
/// Returns an empty string when the input has no `@`.
pub fn mask_email(email: &str) -> String {
    mask_email_with(email, &MaskConfig::default())
}

pub fn mask_email_with(email: &str, cfg: &MaskConfig) -> String {
    let email = email.trim();
    let Some((local, _)) = email.split_once('@') else {
        return String::new();
    };
    let len = local.chars().count();
    let keep = len.max(cfg.min_prefix).min(cfg.max_prefix);
    let prefix: String = local.chars().take(keep).collect();
    format!("{prefix}{}", cfg.suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_between_three_and_five_characters() {
        assert_eq!(mask_email("alexander@example.com"), "alexa***");
        assert_eq!(mask_email("abcd@example.com"), "abcd***");
        assert_eq!(mask_email("abc@example.com"), "abc***");
    }

    #[test]
    fn short_local_part_is_shown_whole() {
        assert_eq!(mask_email("jo@x.io"), "jo***");
        assert_eq!(mask_email("@x.io"), "***");
    }

    #[test]
    fn no_at_sign_means_no_mask() {
        assert_eq!(mask_email("not-an-email"), "");
        assert_eq!(mask_email(""), "");
        assert_eq!(mask_email("   "), "");
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        assert_eq!(mask_email("  player01@game.io \n"), "playe***");
    }

    #[test]
    fn counts_characters_not_bytes() {
        assert_eq!(mask_email("한국어사용자입니다@example.kr"), "한국어사용***");
    }

    #[test]
    fn custom_suffix_and_bounds() {
        let cfg = MaskConfig { min_prefix: 2, max_prefix: 2, suffix: "…".into() };
        assert_eq!(mask_email_with("player@game.io", &cfg), "pl…");
    }
}
