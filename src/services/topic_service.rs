use std::collections::HashMap;
use std::sync::Arc;

use serde::Deserialize;

use crate::database::manager::DatabaseError;
use crate::database::models::{NewTopic, Topic, TopicStatus, CURSO_MAX_CHARS, TITULO_MAX_CHARS};
use crate::database::repository::{TopicQuery, TopicRepository};
use crate::filter::{Page, Pageable};

#[derive(Debug, thiserror::Error)]
pub enum TopicError {
    #[error("A topic with this titulo and mensagem already exists")]
    Duplicate,

    #[error("Topic {0} not found")]
    NotFound(i64),

    #[error("Invalid topic fields")]
    Validation(HashMap<String, String>),

    #[error(transparent)]
    Database(DatabaseError),
}

impl From<DatabaseError> for TopicError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::UniqueViolation(_) => TopicError::Duplicate,
            DatabaseError::ValueTooLong(column) => {
                TopicError::Validation(HashMap::from([(column, TOO_LONG.to_string())]))
            }
            other => TopicError::Database(other),
        }
    }
}

const BLANK: &str = "must not be blank";
const TOO_LONG: &str = "is too long";

fn field_error(field: &str, value: &str) -> Option<String> {
    if value.trim().is_empty() {
        return Some(BLANK.to_string());
    }

    let max = match field {
        "titulo" => TITULO_MAX_CHARS,
        "curso" => CURSO_MAX_CHARS,
        _ => return None,
    };
    (value.chars().count() > max).then(|| format!("must be at most {} characters", max))
}

/// Body of `POST /topicos`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateTopic {
    pub titulo: Option<String>,
    pub mensagem: Option<String>,
    pub curso: Option<String>,
}

impl CreateTopic {
    fn validate(self) -> Result<NewTopic, TopicError> {
        let mut field_errors = HashMap::new();
        for (field, value) in [("titulo", &self.titulo), ("mensagem", &self.mensagem), ("curso", &self.curso)] {
            let error = match value.as_deref() {
                Some(v) => field_error(field, v),
                None => Some(BLANK.to_string()),
            };
            if let Some(error) = error {
                field_errors.insert(field.to_string(), error);
            }
        }

        match (self.titulo, self.mensagem, self.curso) {
            (Some(titulo), Some(mensagem), Some(curso)) if field_errors.is_empty() => {
                Ok(NewTopic::new(titulo, mensagem, curso))
            }
            _ => Err(TopicError::Validation(field_errors)),
        }
    }
}

/// Body of `PUT /topicos/{id}`; absent fields keep their current value
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTopic {
    pub titulo: Option<String>,
    pub mensagem: Option<String>,
    pub curso: Option<String>,
    pub status: Option<TopicStatus>,
}

impl UpdateTopic {
    fn validate(&self) -> Result<(), TopicError> {
        let mut field_errors = HashMap::new();
        for (field, value) in [("titulo", &self.titulo), ("mensagem", &self.mensagem), ("curso", &self.curso)] {
            if let Some(error) = value.as_deref().and_then(|v| field_error(field, v)) {
                field_errors.insert(field.to_string(), error);
            }
        }

        if field_errors.is_empty() {
            Ok(())
        } else {
            Err(TopicError::Validation(field_errors))
        }
    }

    fn apply_to(self, topic: &mut Topic) {
        if let Some(titulo) = self.titulo {
            topic.titulo = titulo;
        }
        if let Some(mensagem) = self.mensagem {
            topic.mensagem = mensagem;
        }
        if let Some(curso) = self.curso {
            topic.curso = curso;
        }
        if let Some(status) = self.status {
            topic.status = status;
        }
    }
}

/// Topic operations behind the `/topicos` routes
#[derive(Clone)]
pub struct TopicService {
    repository: Arc<dyn TopicRepository>,
}

impl TopicService {
    pub fn new(repository: Arc<dyn TopicRepository>) -> Self {
        Self { repository }
    }

    pub async fn create(&self, request: CreateTopic) -> Result<Topic, TopicError> {
        let new_topic = request.validate()?;

        if self
            .repository
            .exists_by_titulo_and_mensagem(&new_topic.titulo, &new_topic.mensagem, None)
            .await?
        {
            return Err(TopicError::Duplicate);
        }

        Ok(self.repository.insert(new_topic).await?)
    }

    pub async fn list(
        &self,
        curso: Option<String>,
        ano: Option<i32>,
        pageable: &Pageable,
    ) -> Result<Page<Topic>, TopicError> {
        let query = TopicQuery::from_filters(curso, ano);
        Ok(self.repository.find_page(&query, pageable).await?)
    }

    pub async fn get(&self, id: i64) -> Result<Topic, TopicError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(TopicError::NotFound(id))
    }

    pub async fn update(&self, id: i64, changes: UpdateTopic) -> Result<Topic, TopicError> {
        changes.validate()?;
        let mut topic = self.get(id).await?;

        if let (Some(titulo), Some(mensagem)) = (&changes.titulo, &changes.mensagem) {
            if self
                .repository
                .exists_by_titulo_and_mensagem(titulo, mensagem, Some(id))
                .await?
            {
                return Err(TopicError::Duplicate);
            }
        }

        changes.apply_to(&mut topic);
        // The row may have been deleted since it was read
        if !self.repository.update(&topic).await? {
            return Err(TopicError::NotFound(id));
        }
        Ok(topic)
    }

    pub async fn delete(&self, id: i64) -> Result<(), TopicError> {
        if self.repository.delete_by_id(id).await? {
            Ok(())
        } else {
            Err(TopicError::NotFound(id))
        }
    }

    pub async fn ping(&self) -> Result<(), DatabaseError> {
        self.repository.ping().await
    }
}
