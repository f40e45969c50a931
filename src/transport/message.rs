use serde::{Deserialize, Serialize};

use crate::store::{Topic, VoteKind};

/// Requests a client can send, one JSON object per text frame.
///
/// Ids travel as strings so that a malformed id can be reported back as
/// `invalid topic id` instead of failing the whole frame.
#[derive(Debug, Deserialize, Serialize)]
#[serde(tag = "type")]
pub enum ClientMessage {
    #[serde(rename = "create_topic")]
    CreateTopic { name: String },
    #[serde(rename = "get_topic")]
    GetTopic { id: String },
    #[serde(rename = "upvote")]
    Upvote { id: String },
    #[serde(rename = "downvote")]
    Downvote { id: String },
    #[serde(rename = "delete_topic")]
    DeleteTopic { id: String },
    #[serde(rename = "top_topics")]
    TopTopics {
        #[serde(default)]
        order: Option<VoteKind>,
        #[serde(default)]
        limit: Option<usize>,
    },
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(tag = "type")]
pub enum ServerMessage {
    #[serde(rename = "topic")]
    Topic { topic: Topic },
    #[serde(rename = "topics")]
    Topics { topics: Vec<Topic> },
    #[serde(rename = "deleted")]
    Deleted { id: String },
    #[serde(rename = "error")]
    Error { message: String },
}
