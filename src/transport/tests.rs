use serde_json::json;
use uuid::Uuid;

use crate::config::TopicSettings;
use crate::store::{Topic, TopicStore};
use crate::transport::handler::{handle_message, handle_text, validate_name};
use crate::transport::message::{ClientMessage, ServerMessage};
use crate::utils::error::RequestError;

fn send(store: &TopicStore, msg: serde_json::Value) -> ServerMessage {
    handle_text(store, &TopicSettings::default(), &msg.to_string())
}

fn expect_topic(reply: ServerMessage) -> Topic {
    match reply {
        ServerMessage::Topic { topic } => topic,
        other => panic!("Expected topic, got {:?}", other),
    }
}

fn expect_error(reply: ServerMessage) -> String {
    match reply {
        ServerMessage::Error { message } => message,
        other => panic!("Expected error, got {:?}", other),
    }
}

fn create(store: &TopicStore, name: &str) -> Topic {
    expect_topic(send(
        store,
        json!({ "type": "create_topic", "name": name }),
    ))
}

#[test]
fn test_handle_create_topic() {
    let store = TopicStore::new();
    let topic = create(&store, "rust");

    assert_eq!(topic.name, "rust");
    assert_eq!(topic.upvotes, 0);
    assert_eq!(topic.downvotes, 0);
    assert!(store.contains(&topic.id));
}

#[test]
fn test_handle_create_topic_rejects_empty_name() {
    let store = TopicStore::new();
    let message = expect_error(send(&store, json!({ "type": "create_topic", "name": "   " })));

    assert_eq!(message, "topic name must not be empty");
    assert!(store.is_empty());
}

#[test]
fn test_handle_create_topic_rejects_long_name() {
    let store = TopicStore::new();
    let message = expect_error(send(
        &store,
        json!({ "type": "create_topic", "name": "a".repeat(256) }),
    ));

    assert_eq!(message, "topic name exceeds 255 characters");
    assert!(store.is_empty());
}

#[test]
fn test_validate_name_counts_characters() {
    // 255 multi-byte characters are within the limit
    assert!(validate_name(&"é".repeat(255), 255).is_ok());
    assert!(matches!(
        validate_name(&"é".repeat(256), 255),
        Err(RequestError::NameTooLong { max: 255 })
    ));
    assert!(matches!(validate_name("", 255), Err(RequestError::EmptyName)));
}

#[test]
fn test_handle_get_topic() {
    let store = TopicStore::new();
    let created = create(&store, "lookup");

    let fetched = expect_topic(send(
        &store,
        json!({ "type": "get_topic", "id": created.id.to_string() }),
    ));
    assert_eq!(fetched, created);
}

#[test]
fn test_handle_get_topic_invalid_id() {
    let store = TopicStore::new();
    let message = expect_error(send(&store, json!({ "type": "get_topic", "id": "testuid" })));
    assert_eq!(message, "invalid topic id");
}

#[test]
fn test_handle_get_topic_not_found() {
    let store = TopicStore::new();
    let message = expect_error(send(
        &store,
        json!({ "type": "get_topic", "id": Uuid::new_v4().to_string() }),
    ));
    assert_eq!(message, "topic not found");
}

#[test]
fn test_handle_votes() {
    let store = TopicStore::new();
    let id = create(&store, "votes").id.to_string();

    send(&store, json!({ "type": "upvote", "id": id }));
    let after_up = expect_topic(send(&store, json!({ "type": "upvote", "id": id })));
    assert_eq!(after_up.upvotes, 2);

    let after_down = expect_topic(send(&store, json!({ "type": "downvote", "id": id })));
    assert_eq!(after_down.upvotes, 2);
    assert_eq!(after_down.downvotes, 1);
}

#[test]
fn test_handle_vote_unknown_topic() {
    let store = TopicStore::new();
    let id = Uuid::new_v4().to_string();

    let up = expect_error(send(&store, json!({ "type": "upvote", "id": id })));
    let down = expect_error(send(&store, json!({ "type": "downvote", "id": id })));
    assert_eq!(up, "topic not found");
    assert_eq!(down, "topic not found");
}

#[test]
fn test_handle_delete_topic() {
    let store = TopicStore::new();
    let id = create(&store, "bye").id.to_string();

    for _ in 0..2 {
        match send(&store, json!({ "type": "delete_topic", "id": id })) {
            ServerMessage::Deleted { id: deleted } => assert_eq!(deleted, id),
            other => panic!("Expected deleted, got {:?}", other),
        }
    }

    let message = expect_error(send(&store, json!({ "type": "get_topic", "id": id })));
    assert_eq!(message, "topic not found");
}

#[test]
fn test_handle_top_topics_truncates_to_limit() {
    let store = TopicStore::new();
    let limits = TopicSettings {
        max_name_len: 255,
        top_limit: 3,
    };
    for i in 0..5 {
        let id = store.create_topic(&format!("t{i}")).unwrap();
        for _ in 0..i {
            store.increment_upvote(&id);
        }
    }

    let reply = handle_message(
        &store,
        &limits,
        ClientMessage::TopTopics {
            order: None,
            limit: Some(100),
        },
    );
    let topics = match reply {
        ServerMessage::Topics { topics } => topics,
        other => panic!("Expected topics, got {:?}", other),
    };

    let names: Vec<&str> = topics.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["t4", "t3", "t2"]);
}

#[test]
fn test_handle_top_topics_by_downvotes() {
    let store = TopicStore::new();
    let a = store.create_topic("a").unwrap();
    let b = store.create_topic("b").unwrap();
    store.increment_upvote(&a);
    store.increment_downvote(&b);

    let reply = send(
        &store,
        json!({ "type": "top_topics", "order": "downvotes", "limit": 1 }),
    );
    match reply {
        ServerMessage::Topics { topics } => {
            assert_eq!(topics.len(), 1);
            assert_eq!(topics[0].id, b);
        }
        other => panic!("Expected topics, got {:?}", other),
    }
}

#[test]
fn test_handle_malformed_request() {
    let store = TopicStore::new();
    let reply = handle_text(&store, &TopicSettings::default(), "{not json");
    assert_eq!(expect_error(reply), "malformed request");

    let unknown = send(&store, json!({ "type": "rename_topic", "name": "x" }));
    assert_eq!(expect_error(unknown), "malformed request");
}

#[test]
fn test_server_message_wire_format() {
    let store = TopicStore::new();
    let topic = create(&store, "wire");

    let value = serde_json::to_value(ServerMessage::Topic { topic }).unwrap();
    assert_eq!(value["type"], "topic");
    assert_eq!(value["topic"]["name"], "wire");
    assert_eq!(value["topic"]["upvotes"], 0);
    assert_eq!(value["topic"]["downvotes"], 0);
    assert!(value["topic"]["id"].is_string());
}
