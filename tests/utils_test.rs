use moodboard::{
    gemini::parse_analysis,
    utils::*,
};

#[test]
fn test_generate_state_token() {
    let token = generate_state_token();

    // Should be exactly 32 characters
    assert_eq!(token.len(), 32);

    // Should contain only alphanumeric characters
    assert!(token.chars().all(|c| c.is_ascii_alphanumeric()));

    // Two generated tokens should be different
    let token2 = generate_state_token();
    assert_ne!(token, token2);
}

#[test]
fn test_search_query_or_default() {
    assert_eq!(search_query_or_default(Some("ocean")), "ocean");
    assert_eq!(search_query_or_default(Some("  ")), "aesthetic");
    assert_eq!(search_query_or_default(Some("")), "aesthetic");
    assert_eq!(search_query_or_default(None), "aesthetic");
}

#[test]
fn test_state_cookie_attributes() {
    let cookie = state_cookie("abc".to_string());
    let rendered = cookie.to_string();

    assert_eq!(cookie.name(), STATE_COOKIE);
    assert_eq!(cookie.value(), "abc");
    assert_eq!(cookie.http_only(), Some(true));
    assert_eq!(cookie.secure(), Some(true));
    assert!(rendered.contains("SameSite=None"));
    // session cookie
    assert!(cookie.max_age().is_none());
}

#[test]
fn test_access_token_cookie_lasts_thirty_days() {
    let cookie = access_token_cookie("tok".to_string());

    assert_eq!(cookie.name(), ACCESS_TOKEN_COOKIE);
    assert_eq!(cookie.value(), "tok");
    assert_eq!(cookie.http_only(), Some(true));
    assert_eq!(cookie.secure(), Some(true));
    assert_eq!(
        cookie.max_age().map(|d| d.whole_seconds()),
        Some(30 * 24 * 60 * 60)
    );
}

#[test]
fn test_escape_script_json() {
    let escaped = escape_script_json(r#"{"error":"</script><b>&"}"#);

    assert!(!escaped.contains('<'));
    assert!(!escaped.contains('>'));
    assert!(!escaped.contains('&'));

    // Still the same JSON once parsed
    let value: serde_json::Value = serde_json::from_str(&escaped).unwrap();
    assert_eq!(value["error"], "</script><b>&");
}

#[test]
fn test_parse_analysis_plain_and_fenced() {
    let plain = r##"{"palette":["#000000"],"keywords":["noir"],"description":"Dark."}"##;
    let fenced = format!("```json\n{}\n```", plain);

    let a = parse_analysis(plain).unwrap();
    let b = parse_analysis(&fenced).unwrap();

    assert_eq!(a, b);
    assert_eq!(a.palette, vec!["#000000"]);
    assert_eq!(a.keywords, vec!["noir"]);
    assert_eq!(a.description, "Dark.");
}

#[test]
fn test_parse_analysis_rejects_prose() {
    assert!(parse_analysis("I think this image is lovely.").is_err());
}
