//! Paginated response envelope

use serde::{Deserialize, Serialize};

/// One page of a list endpoint.
///
/// `total_pages == ceil(total / page_size)` and `data.len() <= page_size`
/// hold for envelopes built with [`Paginated::new`]; server responses can be
/// checked with [`Paginated::is_consistent`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub total: u64,
    pub page: u64,
    pub page_size: u64,
    pub total_pages: u64,
    pub data: Vec<T>,
}

impl<T> Paginated<T> {
    pub fn new(data: Vec<T>, total: u64, page: u64, page_size: u64) -> Self {
        Self {
            total,
            page,
            page_size,
            total_pages: Self::pages_for(total, page_size),
            data,
        }
    }

    pub const fn pages_for(total: u64, page_size: u64) -> u64 {
        if page_size == 0 {
            0
        } else {
            total.div_ceil(page_size)
        }
    }

    pub fn is_consistent(&self) -> bool {
        self.total_pages == Self::pages_for(self.total, self.page_size)
            && self.data.len() as u64 <= self.page_size
    }

    pub const fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Paginated<U> {
        Paginated {
            total: self.total,
            page: self.page,
            page_size: self.page_size,
            total_pages: self.total_pages,
            data: self.data.into_iter().map(f).collect(),
        }
    }
}
