use lexcase::infrastructure::observability::sanitize_prompt;

#[test]
fn given_blank_prompt_when_sanitizing_then_marked_empty() {
    assert_eq!(sanitize_prompt("  \n "), "[EMPTY]");
}

#[test]
fn given_short_prompt_when_sanitizing_then_unchanged() {
    assert_eq!(sanitize_prompt(" Who is the petitioner? "), "Who is the petitioner?");
}

#[test]
fn given_long_multibyte_prompt_when_sanitizing_then_truncates_on_char_boundary() {
    let prompt = "न्याय".repeat(60);

    let sanitized = sanitize_prompt(&prompt);

    let total = prompt.chars().count();
    assert!(sanitized.ends_with(&format!("... ({total} chars total)")));
    assert!(sanitized.starts_with(&prompt.chars().take(100).collect::<String>()));
}

#[test]
fn given_credentials_when_sanitizing_then_redacted() {
    let sanitized = sanitize_prompt("use Bearer abc123 and api_key=xyz&password=hunter2");

    assert_eq!(
        sanitized,
        "use Bearer [REDACTED] and api_key=[REDACTED]&password=[REDACTED]"
    );
}
