use super::*;

/// # Safety
/// Tests must run with `--test-threads=1` to avoid env races.
unsafe fn clear_tutor_env() {
    unsafe {
        std::env::remove_var("GEMINI_API_KEY");
        std::env::remove_var("TUTOR_MODEL");
        std::env::remove_var("TUTOR_BASE_URL");
        std::env::remove_var("TUTOR_REQUEST_TIMEOUT_SECS");
        std::env::remove_var("TUTOR_CONNECT_TIMEOUT_SECS");
    }
}

#[test]
fn from_env_defaults() {
    unsafe {
        clear_tutor_env();
        std::env::set_var("GEMINI_API_KEY", "secret");
    }

    let cfg = TutorConfig::from_env().unwrap();
    assert_eq!(cfg.api_key, "secret");
    assert_eq!(cfg.model, DEFAULT_TUTOR_MODEL);
    assert_eq!(cfg.base_url, DEFAULT_TUTOR_BASE_URL);
    assert_eq!(
        cfg.timeouts,
        TutorTimeouts { request_secs: DEFAULT_TUTOR_REQUEST_TIMEOUT_SECS, connect_secs: DEFAULT_TUTOR_CONNECT_TIMEOUT_SECS }
    );

    unsafe { clear_tutor_env() };
}

#[test]
fn from_env_parses_overrides_and_trims_base_url() {
    unsafe {
        clear_tutor_env();
        std::env::set_var("GEMINI_API_KEY", "secret");
        std::env::set_var("TUTOR_MODEL", "gemini-exp");
        std::env::set_var("TUTOR_BASE_URL", "https://example.test/v1beta/");
        std::env::set_var("TUTOR_REQUEST_TIMEOUT_SECS", "42");
        std::env::set_var("TUTOR_CONNECT_TIMEOUT_SECS", "7");
    }

    let cfg = TutorConfig::from_env().unwrap();
    assert_eq!(cfg.model, "gemini-exp");
    assert_eq!(cfg.base_url, "https://example.test/v1beta");
    assert_eq!(cfg.timeouts, TutorTimeouts { request_secs: 42, connect_secs: 7 });

    unsafe { clear_tutor_env() };
}

#[test]
fn from_env_missing_key_is_typed_error() {
    unsafe { clear_tutor_env() };

    let err = TutorConfig::from_env().unwrap_err();
    assert!(matches!(err, TutorError::MissingApiKey { ref var } if var == "GEMINI_API_KEY"));

    unsafe { clear_tutor_env() };
}

#[test]
fn from_env_bad_timeout_falls_back_to_default() {
    unsafe {
        clear_tutor_env();
        std::env::set_var("GEMINI_API_KEY", "secret");
        std::env::set_var("TUTOR_REQUEST_TIMEOUT_SECS", "not-a-number");
    }

    let cfg = TutorConfig::from_env().unwrap();
    assert_eq!(cfg.timeouts.request_secs, DEFAULT_TUTOR_REQUEST_TIMEOUT_SECS);

    unsafe { clear_tutor_env() };
}
