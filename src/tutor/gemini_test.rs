use super::*;

fn make_response(candidates: serde_json::Value) -> String {
    serde_json::json!({
        "candidates": candidates,
        "modelVersion": "gemini-2.5-flash"
    })
    .to_string()
}

#[test]
fn parse_single_text_part() {
    let json = make_response(serde_json::json!([
        { "content": { "parts": [ { "text": "The chain rule says..." } ], "role": "model" } }
    ]));
    assert_eq!(parse_response(&json).unwrap(), "The chain rule says...");
}

#[test]
fn parse_joins_multiple_parts() {
    let json = make_response(serde_json::json!([
        { "content": { "parts": [ { "text": "Part one. " }, { "text": "Part two." } ] } }
    ]));
    assert_eq!(parse_response(&json).unwrap(), "Part one. Part two.");
}

#[test]
fn parse_uses_first_candidate_only() {
    let json = make_response(serde_json::json!([
        { "content": { "parts": [ { "text": "first" } ] } },
        { "content": { "parts": [ { "text": "second" } ] } }
    ]));
    assert_eq!(parse_response(&json).unwrap(), "first");
}

#[test]
fn parse_empty_candidates_yields_empty_string() {
    let json = make_response(serde_json::json!([]));
    assert_eq!(parse_response(&json).unwrap(), "");
}

#[test]
fn parse_missing_candidates_field_yields_empty_string() {
    assert_eq!(parse_response("{}").unwrap(), "");
}

#[test]
fn parse_candidate_without_content_yields_empty_string() {
    let json = make_response(serde_json::json!([ { "finishReason": "SAFETY" } ]));
    assert_eq!(parse_response(&json).unwrap(), "");
}

#[test]
fn parse_invalid_json_is_typed_error() {
    let err = parse_response("not json").unwrap_err();
    assert!(matches!(err, TutorError::ApiParse(_)));
}

#[test]
fn client_builds_from_config() {
    let config = TutorConfig {
        api_key: "secret".into(),
        model: "gemini-2.5-flash".into(),
        base_url: "https://example.test/v1beta".into(),
        timeouts: TutorTimeouts { request_secs: 5, connect_secs: 2 },
    };
    let client = GeminiClient::from_config(config).unwrap();
    assert_eq!(client.model(), "gemini-2.5-flash");
}
