use serde_json::{Value, json};
use studyspark::ai::parser::{parse_ai_json, strip_code_fence};

#[test]
fn test_fenced_json_is_recovered() {
    assert_eq!(
        parse_ai_json(Some("```json\n{\"a\":1}\n```")),
        Some(json!({"a": 1}))
    );
    assert_eq!(
        parse_ai_json(Some("```\n{\"a\":1}\n```")),
        Some(json!({"a": 1}))
    );
}

#[test]
fn test_garbage_and_absent_input_yield_none() {
    assert_eq!(parse_ai_json(Some("not json")), None);
    assert_eq!(parse_ai_json(Some("")), None);
    assert_eq!(parse_ai_json(None), None);
}

#[test]
fn test_parse_is_idempotent_on_clean_json() {
    let samples = [
        "{\"a\":1}",
        "```json\n{\"topic\":\"gravity\",\"questions\":[]}\n```",
        "[1, 2.5, \"three\", null, true]",
        "  {\"nested\": {\"deep\": [\"x\", {\"y\": -3}]}}  ",
        "\"just a string\"",
    ];

    for sample in samples {
        let first: Value = parse_ai_json(Some(sample)).expect("sample should parse");
        let reserialized = serde_json::to_string(&first).unwrap();
        let second = parse_ai_json(Some(reserialized.as_str()));
        assert_eq!(second, Some(first), "not idempotent for {sample}");

        let pretty = serde_json::to_string_pretty(&second.unwrap()).unwrap();
        assert_eq!(strip_code_fence(&pretty), pretty.trim());
    }
}

#[test]
fn test_backticks_inside_json_strings_survive() {
    let text = "```json\n{\"code\":\"use ``` fences\"}\n```";
    assert_eq!(
        parse_ai_json(Some(text)),
        Some(json!({"code": "use ``` fences"}))
    );
}
