use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use chrono::Datelike;
use tokio::sync::RwLock;

use crate::database::manager::DatabaseError;
use crate::database::models::{oversized_column, NewTopic, NewUser, Topic, User};
use crate::database::repository::{TopicQuery, TopicRepository, UserRepository};
use crate::filter::{Page, Pageable};

/// In-process credential store, used by `serve --memory` and the test suite
#[derive(Default)]
pub struct MemoryUserRepository {
    users: RwLock<HashMap<String, User>>,
}

impl MemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn find_by_login(&self, login: &str) -> Result<Option<User>, DatabaseError> {
        Ok(self.users.read().await.get(login).cloned())
    }

    async fn insert(&self, user: NewUser) -> Result<User, DatabaseError> {
        let mut users = self.users.write().await;
        if users.contains_key(&user.login) {
            return Err(DatabaseError::UniqueViolation("usuarios_login_key".to_string()));
        }
        let stored = User {
            id: users.len() as i64 + 1,
            login: user.login,
            senha: user.senha,
            roles: user.roles,
        };
        users.insert(stored.login.clone(), stored.clone());
        Ok(stored)
    }
}

#[derive(Default)]
struct TopicTable {
    last_id: i64,
    rows: BTreeMap<i64, Topic>,
}

impl TopicTable {
    fn pair_taken(&self, titulo: &str, mensagem: &str, exclude_id: Option<i64>) -> bool {
        self.rows
            .values()
            .any(|t| Some(t.id) != exclude_id && t.has_content(titulo, mensagem))
    }
}

/// In-process topic store mirroring the `topicos` table, unique pair index included
#[derive(Default)]
pub struct MemoryTopicRepository {
    table: RwLock<TopicTable>,
}

impl MemoryTopicRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

// Same VARCHAR limits as the `topicos` columns
fn check_lengths(titulo: &str, curso: &str) -> Result<(), DatabaseError> {
    match oversized_column(titulo, curso) {
        Some(column) => Err(DatabaseError::ValueTooLong(column.to_string())),
        None => Ok(()),
    }
}

fn matches(query: &TopicQuery, topic: &Topic) -> bool {
    match query {
        TopicQuery::All => true,
        TopicQuery::ByCourse(curso) => &topic.curso == curso,
        TopicQuery::ByYear(ano) => topic.data_criacao.year() == *ano,
        TopicQuery::ByCourseAndYear(curso, ano) => {
            &topic.curso == curso && topic.data_criacao.year() == *ano
        }
    }
}

#[async_trait]
impl TopicRepository for MemoryTopicRepository {
    async fn exists_by_titulo_and_mensagem(
        &self,
        titulo: &str,
        mensagem: &str,
        exclude_id: Option<i64>,
    ) -> Result<bool, DatabaseError> {
        Ok(self.table.read().await.pair_taken(titulo, mensagem, exclude_id))
    }

    async fn insert(&self, topic: NewTopic) -> Result<Topic, DatabaseError> {
        check_lengths(&topic.titulo, &topic.curso)?;
        let mut table = self.table.write().await;
        if table.pair_taken(&topic.titulo, &topic.mensagem, None) {
            return Err(DatabaseError::UniqueViolation("topicos_titulo_mensagem_key".to_string()));
        }
        table.last_id += 1;
        let topic = topic.into_topic(table.last_id);
        table.rows.insert(topic.id, topic.clone());
        Ok(topic)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Topic>, DatabaseError> {
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn find_page(&self, query: &TopicQuery, pageable: &Pageable) -> Result<Page<Topic>, DatabaseError> {
        let table = self.table.read().await;
        let mut found: Vec<&Topic> = table.rows.values().filter(|t| matches(query, t)).collect();
        found.sort_by(|a, b| pageable.sort.compare(a, b));

        let total = found.len() as u64;
        let content = found
            .into_iter()
            .skip(pageable.offset() as usize)
            .take(pageable.size as usize)
            .cloned()
            .collect();

        Ok(Page::new(content, pageable, total))
    }

    async fn update(&self, topic: &Topic) -> Result<bool, DatabaseError> {
        check_lengths(&topic.titulo, &topic.curso)?;
        let mut table = self.table.write().await;
        if table.pair_taken(&topic.titulo, &topic.mensagem, Some(topic.id)) {
            return Err(DatabaseError::UniqueViolation("topicos_titulo_mensagem_key".to_string()));
        }
        match table.rows.get_mut(&topic.id) {
            Some(row) => {
                *row = topic.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool, DatabaseError> {
        Ok(self.table.write().await.rows.remove(&id).is_some())
    }
}
