//! Request handling
//!
//! Turns decoded client requests into store operations and store results into
//! replies. Validation that the store leaves to its callers (name length,
//! id syntax, page size) happens here.

use tracing::{debug, error};
use uuid::Uuid;

use crate::config::TopicSettings;
use crate::store::{TopicId, TopicStore, VoteKind};
use crate::transport::message::{ClientMessage, ServerMessage};
use crate::utils::error::RequestError;

/// Decodes one text frame and handles it.
pub fn handle_text(store: &TopicStore, settings: &TopicSettings, text: &str) -> ServerMessage {
    match serde_json::from_str::<ClientMessage>(text) {
        Ok(msg) => handle_message(store, settings, msg),
        Err(e) => {
            debug!("Invalid client message: {} | {}", e, text);
            error_reply(RequestError::Malformed)
        }
    }
}

/// Handles one request. Failures come back as `ServerMessage::Error`.
pub fn handle_message(
    store: &TopicStore,
    settings: &TopicSettings,
    msg: ClientMessage,
) -> ServerMessage {
    dispatch(store, settings, msg).unwrap_or_else(error_reply)
}

fn dispatch(
    store: &TopicStore,
    settings: &TopicSettings,
    msg: ClientMessage,
) -> Result<ServerMessage, RequestError> {
    match msg {
        ClientMessage::CreateTopic { name } => {
            validate_name(&name, settings.max_name_len)?;
            let id = store.create_topic(&name)?;
            topic_reply(store, &id)
        }
        ClientMessage::GetTopic { id } => topic_reply(store, &parse_id(&id)?),
        ClientMessage::Upvote { id } => vote(store, &id, VoteKind::Upvotes),
        ClientMessage::Downvote { id } => vote(store, &id, VoteKind::Downvotes),
        ClientMessage::DeleteTopic { id } => {
            let id = parse_id(&id)?;
            store.delete_topic(&id);
            Ok(ServerMessage::Deleted { id: id.to_string() })
        }
        ClientMessage::TopTopics { order, limit } => {
            let page = limit
                .unwrap_or(settings.top_limit)
                .min(settings.top_limit);
            let mut topics = store.list_descending_by(order.unwrap_or(VoteKind::Upvotes));
            topics.truncate(page);
            Ok(ServerMessage::Topics { topics })
        }
    }
}

fn vote(store: &TopicStore, id: &str, kind: VoteKind) -> Result<ServerMessage, RequestError> {
    let id = parse_id(id)?;
    store
        .vote(&id, kind)
        .map(|topic| ServerMessage::Topic { topic })
        .ok_or(RequestError::NotFound)
}

fn topic_reply(store: &TopicStore, id: &TopicId) -> Result<ServerMessage, RequestError> {
    store
        .get_topic(id)
        .map(|topic| ServerMessage::Topic { topic })
        .ok_or(RequestError::NotFound)
}

fn parse_id(raw: &str) -> Result<TopicId, RequestError> {
    Uuid::parse_str(raw.trim()).map_err(|_| RequestError::InvalidId)
}

/// Names must contain something other than whitespace and stay within
/// `max_len` characters.
pub fn validate_name(name: &str, max_len: usize) -> Result<(), RequestError> {
    if name.trim().is_empty() {
        return Err(RequestError::EmptyName);
    }
    if name.chars().count() > max_len {
        return Err(RequestError::NameTooLong { max: max_len });
    }
    Ok(())
}

fn error_reply(err: RequestError) -> ServerMessage {
    if let RequestError::Internal(cause) = &err {
        error!("Request failed: {}", cause);
    }
    ServerMessage::Error {
        message: err.to_string(),
    }
}
