use serde::Serialize;

use super::types::Pageable;

/// One page of results plus the totals clients need to navigate
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub total_elements: u64,
    pub total_pages: u64,
    pub number: u32,
    pub size: u32,
    pub number_of_elements: usize,
    pub first: bool,
    pub last: bool,
    pub empty: bool,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, pageable: &Pageable, total_elements: u64) -> Self {
        let size = pageable.size.max(1);
        let total_pages = total_elements.div_ceil(size as u64);
        let number_of_elements = content.len();
        Self {
            empty: content.is_empty(),
            content,
            total_elements,
            total_pages,
            number: pageable.page,
            size: pageable.size,
            number_of_elements,
            first: pageable.page == 0,
            last: pageable.page as u64 + 1 >= total_pages,
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            total_elements: self.total_elements,
            total_pages: self.total_pages,
            number: self.number,
            size: self.size,
            number_of_elements: self.number_of_elements,
            first: self.first,
            last: self.last,
            empty: self.empty,
        }
    }
}
