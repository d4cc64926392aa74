use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TopicStatus {
    #[default]
    NaoRespondido,
    NaoSolucionado,
    Solucionado,
    Fechado,
}

impl TopicStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TopicStatus::NaoRespondido => "NAO_RESPONDIDO",
            TopicStatus::NaoSolucionado => "NAO_SOLUCIONADO",
            TopicStatus::Solucionado => "SOLUCIONADO",
            TopicStatus::Fechado => "FECHADO",
        }
    }
}

impl FromStr for TopicStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "NAO_RESPONDIDO" => Ok(TopicStatus::NaoRespondido),
            "NAO_SOLUCIONADO" => Ok(TopicStatus::NaoSolucionado),
            "SOLUCIONADO" => Ok(TopicStatus::Solucionado),
            "FECHADO" => Ok(TopicStatus::Fechado),
            other => Err(format!("unknown topic status '{}'", other)),
        }
    }
}

/// Column limits of `topicos`, counted in characters as VARCHAR(n) does
pub const TITULO_MAX_CHARS: usize = 255;
pub const CURSO_MAX_CHARS: usize = 100;

/// First column whose value would not fit in `topicos`
pub fn oversized_column(titulo: &str, curso: &str) -> Option<&'static str> {
    if titulo.chars().count() > TITULO_MAX_CHARS {
        Some("titulo")
    } else if curso.chars().count() > CURSO_MAX_CHARS {
        Some("curso")
    } else {
        None
    }
}

/// A forum topic, serialized in the shape clients see for both detail and list views
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Topic {
    pub id: i64,
    pub titulo: String,
    pub mensagem: String,
    pub data_criacao: DateTime<Utc>,
    pub status: TopicStatus,
    pub curso: String,
}

impl Topic {
    pub fn has_content(&self, titulo: &str, mensagem: &str) -> bool {
        self.titulo == titulo && self.mensagem == mensagem
    }
}

#[derive(Debug, Clone)]
pub struct NewTopic {
    pub titulo: String,
    pub mensagem: String,
    pub curso: String,
    pub data_criacao: DateTime<Utc>,
    pub status: TopicStatus,
}

impl NewTopic {
    pub fn new(titulo: String, mensagem: String, curso: String) -> Self {
        Self {
            titulo,
            mensagem,
            curso,
            data_criacao: Utc::now(),
            status: TopicStatus::default(),
        }
    }

    pub fn into_topic(self, id: i64) -> Topic {
        Topic {
            id,
            titulo: self.titulo,
            mensagem: self.mensagem,
            data_criacao: self.data_criacao,
            status: self.status,
            curso: self.curso,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn status_round_trips_through_its_wire_name() {
        for status in [
            TopicStatus::NaoRespondido,
            TopicStatus::NaoSolucionado,
            TopicStatus::Solucionado,
            TopicStatus::Fechado,
        ] {
            assert_eq!(status.as_str().parse::<TopicStatus>(), Ok(status));
            assert_eq!(serde_json::to_value(status).unwrap(), json!(status.as_str()));
        }
        assert!("ABERTO".parse::<TopicStatus>().is_err());
    }

    #[test]
    fn limits_count_characters_not_bytes() {
        let accented = "é".repeat(TITULO_MAX_CHARS);
        assert!(accented.len() > TITULO_MAX_CHARS);
        assert_eq!(oversized_column(&accented, "Rust"), None);
        assert_eq!(oversized_column(&format!("{}x", accented), "Rust"), Some("titulo"));
        assert_eq!(oversized_column("T", &"c".repeat(CURSO_MAX_CHARS + 1)), Some("curso"));
    }

    #[test]
    fn topic_serializes_in_camel_case() {
        let topic = NewTopic::new("T".into(), "M".into(), "Rust".into()).into_topic(3);
        let value = serde_json::to_value(&topic).unwrap();
        assert_eq!(value["id"], 3);
        assert_eq!(value["status"], "NAO_RESPONDIDO");
        assert!(value.get("dataCriacao").is_some());
        assert!(value.get("data_criacao").is_none());
    }
}
