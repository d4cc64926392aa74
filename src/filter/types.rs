use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::error::FilterError;
use super::filter_order::FilterOrder;
use crate::database::models::Topic;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn to_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }

    pub fn apply(&self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}

/// Topic fields clients may sort by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Id,
    Titulo,
    Curso,
    DataCriacao,
    Status,
}

impl SortField {
    pub fn from_param(name: &str) -> Result<Self, FilterError> {
        match name {
            "id" => Ok(SortField::Id),
            "titulo" => Ok(SortField::Titulo),
            "curso" => Ok(SortField::Curso),
            "dataCriacao" => Ok(SortField::DataCriacao),
            "status" => Ok(SortField::Status),
            other => Err(FilterError::InvalidSortField(other.to_string())),
        }
    }

    /// Column name in `topicos`; only ever one of these literals reaches SQL
    pub fn column(&self) -> &'static str {
        match self {
            SortField::Id => "id",
            SortField::Titulo => "titulo",
            SortField::Curso => "curso",
            SortField::DataCriacao => "data_criacao",
            SortField::Status => "status",
        }
    }

    pub fn compare(&self, a: &Topic, b: &Topic) -> Ordering {
        match self {
            SortField::Id => a.id.cmp(&b.id),
            SortField::Titulo => a.titulo.cmp(&b.titulo),
            SortField::Curso => a.curso.cmp(&b.curso),
            SortField::DataCriacao => a.data_criacao.cmp(&b.data_criacao),
            SortField::Status => a.status.as_str().cmp(b.status.as_str()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortOrder {
    pub field: SortField,
    pub direction: SortDirection,
}

impl Default for SortOrder {
    fn default() -> Self {
        Self {
            field: SortField::DataCriacao,
            direction: SortDirection::Asc,
        }
    }
}

impl SortOrder {
    /// Full ordering with `id` as tie-breaker so pages never overlap
    pub fn compare(&self, a: &Topic, b: &Topic) -> Ordering {
        self.direction
            .apply(self.field.compare(a, b))
            .then_with(|| a.id.cmp(&b.id))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct PageDefaults {
    pub default_size: u32,
    pub max_size: u32,
}

impl Default for PageDefaults {
    fn default() -> Self {
        Self {
            default_size: 10,
            max_size: 1000,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pageable {
    pub page: u32,
    pub size: u32,
    pub sort: SortOrder,
}

impl Pageable {
    pub fn from_params(
        page: Option<u32>,
        size: Option<u32>,
        sort: Option<&str>,
        defaults: &PageDefaults,
    ) -> Result<Self, FilterError> {
        let size = match size {
            Some(0) => return Err(FilterError::InvalidSize),
            Some(n) => n.min(defaults.max_size),
            None => defaults.default_size,
        };

        let sort = match sort {
            Some(s) if !s.trim().is_empty() => FilterOrder::parse(s)?,
            _ => SortOrder::default(),
        };

        Ok(Self {
            page: page.unwrap_or(0),
            size,
            sort,
        })
    }

    pub fn offset(&self) -> u64 {
        self.page as u64 * self.size as u64
    }
}
