use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};

use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::models::{NewTopic, NewUser, Topic, User};
use crate::database::repository::{TopicQuery, TopicRepository, UserRepository};
use crate::filter::{FilterOrder, Page, Pageable};

const USER_COLUMNS: &str = "id, login, senha, roles";
const TOPIC_COLUMNS: &str = "id, titulo, mensagem, curso, data_criacao, status";
const YEAR_MATCHES: &str = "EXTRACT(YEAR FROM data_criacao AT TIME ZONE 'UTC')::int = ";

pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_login(&self, login: &str) -> Result<Option<User>, DatabaseError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM usuarios WHERE login = $1",
            USER_COLUMNS
        ))
        .bind(login)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn insert(&self, user: NewUser) -> Result<User, DatabaseError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "INSERT INTO usuarios (login, senha, roles) VALUES ($1, $2, $3) RETURNING {}",
            USER_COLUMNS
        ))
        .bind(&user.login)
        .bind(&user.senha)
        .bind(&user.roles)
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }
}

/// Row shape of `topicos`; status is stored as its wire name
#[derive(FromRow)]
struct TopicRow {
    id: i64,
    titulo: String,
    mensagem: String,
    curso: String,
    data_criacao: DateTime<Utc>,
    status: String,
}

impl TryFrom<TopicRow> for Topic {
    type Error = DatabaseError;

    fn try_from(row: TopicRow) -> Result<Self, Self::Error> {
        Ok(Topic {
            id: row.id,
            titulo: row.titulo,
            mensagem: row.mensagem,
            curso: row.curso,
            data_criacao: row.data_criacao,
            status: row.status.parse().map_err(DatabaseError::Corrupt)?,
        })
    }
}

pub struct PgTopicRepository {
    pool: PgPool,
}

impl PgTopicRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn push_where(builder: &mut QueryBuilder<'_, Postgres>, query: &TopicQuery) {
    match query {
        TopicQuery::All => {}
        TopicQuery::ByCourse(curso) => {
            builder.push(" WHERE curso = ").push_bind(curso.clone());
        }
        TopicQuery::ByYear(ano) => {
            builder.push(" WHERE ").push(YEAR_MATCHES).push_bind(*ano);
        }
        TopicQuery::ByCourseAndYear(curso, ano) => {
            builder
                .push(" WHERE curso = ")
                .push_bind(curso.clone())
                .push(" AND ")
                .push(YEAR_MATCHES)
                .push_bind(*ano);
        }
    }
}

#[async_trait]
impl TopicRepository for PgTopicRepository {
    async fn exists_by_titulo_and_mensagem(
        &self,
        titulo: &str,
        mensagem: &str,
        exclude_id: Option<i64>,
    ) -> Result<bool, DatabaseError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(
                SELECT 1 FROM topicos
                WHERE titulo = $1 AND md5(mensagem) = md5($2) AND mensagem = $2
                AND ($3::bigint IS NULL OR id <> $3)
            )",
        )
        .bind(titulo)
        .bind(mensagem)
        .bind(exclude_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn insert(&self, topic: NewTopic) -> Result<Topic, DatabaseError> {
        let row = sqlx::query_as::<_, TopicRow>(&format!(
            "INSERT INTO topicos (titulo, mensagem, curso, data_criacao, status)
             VALUES ($1, $2, $3, $4, $5) RETURNING {}",
            TOPIC_COLUMNS
        ))
        .bind(&topic.titulo)
        .bind(&topic.mensagem)
        .bind(&topic.curso)
        .bind(topic.data_criacao)
        .bind(topic.status.as_str())
        .fetch_one(&self.pool)
        .await?;

        row.try_into()
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Topic>, DatabaseError> {
        let row = sqlx::query_as::<_, TopicRow>(&format!(
            "SELECT {} FROM topicos WHERE id = $1",
            TOPIC_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Topic::try_from).transpose()
    }

    async fn find_page(&self, query: &TopicQuery, pageable: &Pageable) -> Result<Page<Topic>, DatabaseError> {
        let mut count = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM topicos");
        push_where(&mut count, query);
        let total: i64 = count.build_query_scalar().fetch_one(&self.pool).await?;

        let mut select = QueryBuilder::<Postgres>::new(format!("SELECT {} FROM topicos", TOPIC_COLUMNS));
        push_where(&mut select, query);
        select
            .push(" ")
            .push(FilterOrder::generate(&pageable.sort))
            .push(" LIMIT ")
            .push_bind(pageable.size as i64)
            .push(" OFFSET ")
            .push_bind(pageable.offset() as i64);

        let rows: Vec<TopicRow> = select.build_query_as().fetch_all(&self.pool).await?;
        let content = rows
            .into_iter()
            .map(Topic::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Page::new(content, pageable, total.max(0) as u64))
    }

    async fn update(&self, topic: &Topic) -> Result<bool, DatabaseError> {
        let result = sqlx::query(
            "UPDATE topicos SET titulo = $1, mensagem = $2, curso = $3, status = $4 WHERE id = $5",
        )
        .bind(&topic.titulo)
        .bind(&topic.mensagem)
        .bind(&topic.curso)
        .bind(topic.status.as_str())
        .bind(topic.id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool, DatabaseError> {
        let result = sqlx::query("DELETE FROM topicos WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        DatabaseManager::health_check(&self.pool).await
    }
}
