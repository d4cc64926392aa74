use async_trait::async_trait;

use crate::database::manager::DatabaseError;
use crate::database::models::{NewTopic, NewUser, Topic, User};
use crate::filter::{Page, Pageable};

/// Credential store: user records keyed by login
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_login(&self, login: &str) -> Result<Option<User>, DatabaseError>;

    async fn insert(&self, user: NewUser) -> Result<User, DatabaseError>;
}

/// The four listing shapes; each maps to its own store query
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TopicQuery {
    All,
    ByCourse(String),
    ByYear(i32),
    ByCourseAndYear(String, i32),
}

impl TopicQuery {
    pub fn from_filters(curso: Option<String>, ano: Option<i32>) -> Self {
        match (curso, ano) {
            (Some(curso), Some(ano)) => TopicQuery::ByCourseAndYear(curso, ano),
            (Some(curso), None) => TopicQuery::ByCourse(curso),
            (None, Some(ano)) => TopicQuery::ByYear(ano),
            (None, None) => TopicQuery::All,
        }
    }
}

#[async_trait]
pub trait TopicRepository: Send + Sync {
    /// True when some topic other than `exclude_id` already has this exact pair
    async fn exists_by_titulo_and_mensagem(
        &self,
        titulo: &str,
        mensagem: &str,
        exclude_id: Option<i64>,
    ) -> Result<bool, DatabaseError>;

    async fn insert(&self, topic: NewTopic) -> Result<Topic, DatabaseError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Topic>, DatabaseError>;

    async fn find_page(&self, query: &TopicQuery, pageable: &Pageable) -> Result<Page<Topic>, DatabaseError>;

    /// Returns false when no row had this id
    async fn update(&self, topic: &Topic) -> Result<bool, DatabaseError>;

    /// Returns false when no row had this id
    async fn delete_by_id(&self, id: i64) -> Result<bool, DatabaseError>;

    async fn ping(&self) -> Result<(), DatabaseError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filters_select_query_shape() {
        assert_eq!(TopicQuery::from_filters(None, None), TopicQuery::All);
        assert_eq!(
            TopicQuery::from_filters(Some("Rust".into()), None),
            TopicQuery::ByCourse("Rust".into())
        );
        assert_eq!(TopicQuery::from_filters(None, Some(2024)), TopicQuery::ByYear(2024));
        assert_eq!(
            TopicQuery::from_filters(Some("Rust".into()), Some(2024)),
            TopicQuery::ByCourseAndYear("Rust".into(), 2024)
        );
    }
}
