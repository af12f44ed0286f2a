use prompt_ox::{Conversation, Message, PromptError, Role};
use serde_json::json;

#[test]
fn test_conversation_serialization_shape() {
    let history = Conversation::from(vec![
        Message::system("Be brief."),
        Message::user("  Hi  "),
    ]);

    let value = serde_json::to_value(&history).unwrap();
    assert_eq!(
        value,
        json!({
            "messages": [
                {"role": "system", "content": "Be brief."},
                {"role": "user", "content": "  Hi  "}
            ]
        })
    );
}

#[test]
fn test_conversation_from_json() {
    let json = json!({
        "messages": [
            {"role": "user", "content": "Hello"},
            {"role": "assistant", "content": ""},
            {"role": "tool", "content": "{}"}
        ]
    })
    .to_string();

    let history = Conversation::from_json(&json).unwrap();
    let roles: Vec<Role> = history.iter().map(Message::role).collect();
    assert_eq!(roles, [Role::User, Role::Assistant, Role::Tool]);
    assert_eq!(history.messages()[1].content(), "");
}

#[test]
fn test_conversation_from_json_rejects_unknown_role() {
    let json = r#"{"messages":[{"role":"narrator","content":"Once upon a time"}]}"#;
    let err = Conversation::from_json(json).unwrap_err();
    assert!(matches!(err, PromptError::Json(_)));
}

#[test]
fn test_conversation_from_json_requires_content() {
    let json = r#"{"messages":[{"role":"user"}]}"#;
    assert!(Conversation::from_json(json).is_err());
}

#[test]
fn test_json_round_trip_keeps_raw_content() {
    let history = Conversation::from(Message::user("\tindented\n"));
    let restored = Conversation::from_json(&history.to_json_pretty().unwrap()).unwrap();
    assert_eq!(restored, history);
}

#[test]
fn test_collect_and_extend() {
    let mut history: Conversation = ["a", "b"].into_iter().map(Message::user).collect();
    history.extend([Message::assistant("c")]);
    history.extend_from(Conversation::from(Message::user("d")));

    let contents: Vec<&str> = (&history).into_iter().map(Message::content).collect();
    assert_eq!(contents, ["a", "b", "c", "d"]);

    let owned: Vec<Message> = history.into_iter().collect();
    assert_eq!(owned.len(), 4);
}

#[test]
fn test_load_reports_missing_file_as_io() {
    let err = Conversation::load("/nonexistent/prompt-ox/history.json").unwrap_err();
    assert!(matches!(err, PromptError::Io(_)));
}

#[test]
fn test_load_reads_file() {
    let path = std::env::temp_dir().join(format!("prompt-ox-load-{}.json", std::process::id()));
    std::fs::write(&path, r#"{"messages":[{"role":"user","content":"Hi"}]}"#).unwrap();

    let history = Conversation::load(&path).unwrap();
    assert_eq!(history, Conversation::from(Message::user("Hi")));
    std::fs::remove_file(path).unwrap();
}
