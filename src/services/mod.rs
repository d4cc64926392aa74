pub mod topic_service;

pub use topic_service::{CreateTopic, TopicError, TopicService, UpdateTopic};
