use super::error::FilterError;
use super::types::{SortDirection, SortField, SortOrder};

pub struct FilterOrder;

impl FilterOrder {
    /// Parses `field[,asc|desc]`, e.g. `dataCriacao,desc` or `titulo`
    pub fn parse(s: &str) -> Result<SortOrder, FilterError> {
        let mut it = s.split(',').map(str::trim);
        let field = SortField::from_param(it.next().unwrap_or_default())?;
        let direction = match it.next() {
            None | Some("") => SortDirection::Asc,
            Some(dir) if dir.eq_ignore_ascii_case("asc") => SortDirection::Asc,
            Some(dir) if dir.eq_ignore_ascii_case("desc") => SortDirection::Desc,
            Some(dir) => return Err(FilterError::InvalidSortDirection(dir.to_string())),
        };
        Ok(SortOrder { field, direction })
    }

    /// ORDER BY clause for `topicos`, always ending with the id tie-breaker
    pub fn generate(order: &SortOrder) -> String {
        if order.field == SortField::Id {
            return format!("ORDER BY \"id\" {}", order.direction.to_sql());
        }
        format!(
            "ORDER BY \"{}\" {}, \"id\" ASC",
            order.field.column(),
            order.direction.to_sql()
        )
    }
}
