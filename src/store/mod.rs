pub mod engine;
pub mod id;
pub mod topic;

pub use engine::TopicStore;
pub use topic::{Topic, TopicId, VoteKind};
