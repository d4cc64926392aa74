pub mod manager;
pub mod memory;
pub mod models;
pub mod postgres;
pub mod repository;

pub use manager::{DatabaseError, DatabaseManager};
pub use memory::{MemoryTopicRepository, MemoryUserRepository};
pub use models::{NewTopic, NewUser, Topic, TopicStatus, User};
pub use postgres::{PgTopicRepository, PgUserRepository};
pub use repository::{TopicQuery, TopicRepository, UserRepository};
