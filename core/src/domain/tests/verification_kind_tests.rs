use std::time::Duration;

use crate::domain::verification_kind::*;

#[test]
fn test_cache_keys_use_kind_prefix() {
    assert_eq!(
        VerificationKind::Email.cache_key("a@b.com"),
        "Email:VERIFICATION:CODE:a@b.com"
    );
    assert_eq!(
        VerificationKind::Image.cache_key("a@b.com"),
        "IMG:VERIFICATION:CODE:CACHE:a@b.com"
    );
}

#[test]
fn test_kinds_do_not_share_keys() {
    let identity = "someone@example.com";
    assert_ne!(
        VerificationKind::Email.cache_key(identity),
        VerificationKind::Image.cache_key(identity)
    );
}

#[test]
fn test_code_expiration_is_three_minutes() {
    assert_eq!(CODE_EXPIRATION, Duration::from_secs(180));
    assert_eq!(CODE_EXPIRATION_MINUTES, 3);
}

#[test]
fn test_kind_display() {
    assert_eq!(VerificationKind::Email.to_string(), "email");
    assert_eq!(VerificationKind::Image.as_str(), "image");
}
