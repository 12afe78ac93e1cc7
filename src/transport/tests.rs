use serde_json::json;

use super::message::{ClientMessage, ServerMessage};
use crate::feed::message::Message;

#[test]
fn test_client_message_parses_all_variants() {
    let cases = [
        (
            json!({"type": "signup", "username": "alice", "password": "pw"}),
            "signup",
        ),
        (
            json!({"type": "login", "username": "alice", "password": "pw"}),
            "login",
        ),
        (json!({"type": "auth", "token": "abc"}), "auth"),
        (json!({"type": "append", "body": "hello"}), "append"),
        (json!({"type": "list"}), "list"),
        (json!({"type": "subscribe"}), "subscribe"),
        (json!({"type": "unsubscribe"}), "unsubscribe"),
    ];

    for (value, tag) in cases {
        let parsed: ClientMessage =
            serde_json::from_value(value).unwrap_or_else(|e| panic!("{tag}: {e}"));
        match (tag, parsed) {
            ("signup", ClientMessage::Signup { username, .. }) => assert_eq!(username, "alice"),
            ("login", ClientMessage::Login { username, .. }) => assert_eq!(username, "alice"),
            ("auth", ClientMessage::Auth { token }) => assert_eq!(token, "abc"),
            ("append", ClientMessage::Append { body }) => assert_eq!(body, "hello"),
            ("list", ClientMessage::List) => {}
            ("subscribe", ClientMessage::Subscribe) => {}
            ("unsubscribe", ClientMessage::Unsubscribe) => {}
            (tag, other) => panic!("{tag} parsed as {other:?}"),
        }
    }
}

#[test]
fn test_unknown_client_message_is_rejected() {
    assert!(serde_json::from_str::<ClientMessage>(r#"{"type":"publish","topic":"x"}"#).is_err());
    assert!(serde_json::from_str::<ClientMessage>("not json").is_err());
}

#[test]
fn test_push_event_wire_tag() {
    let event = ServerMessage::MessageNew {
        message: Message {
            id: "m1".into(),
            author: "alice".into(),
            body: "hello".into(),
            accepted_at: 1_725_000_000_000_000,
        },
    };
    let value = serde_json::to_value(&event).unwrap();
    assert_eq!(value["type"], "message:new");
    assert_eq!(value["message"]["author"], "alice");
    assert_eq!(value["message"]["body"], "hello");
}

#[test]
fn test_error_wire_shape_distinguishes_failures() {
    let err = ServerMessage::Error {
        code: "validation".into(),
        message: "invalid message: message cannot be empty".into(),
    };
    let value = serde_json::to_value(&err).unwrap();
    assert_eq!(value["type"], "error");
    assert_eq!(value["code"], "validation");
}

#[test]
fn test_history_lists_messages_in_given_order() {
    let history = ServerMessage::History {
        messages: vec![
            Message {
                id: "m1".into(),
                author: "alice".into(),
                body: "first".into(),
                accepted_at: 1,
            },
            Message {
                id: "m2".into(),
                author: "bob".into(),
                body: "second".into(),
                accepted_at: 2,
            },
        ],
    };
    let value = serde_json::to_value(&history).unwrap();
    assert_eq!(value["type"], "history");
    assert_eq!(value["messages"][0]["body"], "first");
    assert_eq!(value["messages"][1]["body"], "second");
}
