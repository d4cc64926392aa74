pub mod topic;
pub mod user;

pub use topic::{oversized_column, NewTopic, Topic, TopicStatus, CURSO_MAX_CHARS, TITULO_MAX_CHARS};
pub use user::{NewUser, User};
