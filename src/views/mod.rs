use anyhow::Result;
use async_trait::async_trait;

use crate::catalog::Catalog;
use crate::models::{MovieDetail, MovieSummary};

mod detail;
mod list;

pub use detail::{DetailState, DetailView, DETAIL_ERROR_MESSAGE};
pub use list::{ListState, ListView, LIST_ERROR_MESSAGE, SEARCH_DEBOUNCE};

/// What the views fetch from. [`Catalog`] never returns `Err` or `Ok(None)`;
/// other sources may, and the views render those as error/not-found states.
#[async_trait]
pub trait MovieSource: Send + Sync {
    async fn popular(&self, page: u32) -> Result<Vec<MovieSummary>>;
    async fn search(&self, query: &str, page: u32) -> Result<Vec<MovieSummary>>;
    async fn movie(&self, id: &str) -> Result<Option<MovieDetail>>;
}

#[async_trait]
impl MovieSource for Catalog {
    async fn popular(&self, page: u32) -> Result<Vec<MovieSummary>> {
        Ok(self.list_popular(page).await)
    }

    async fn search(&self, query: &str, page: u32) -> Result<Vec<MovieSummary>> {
        Ok(Catalog::search(self, query, page).await)
    }

    async fn movie(&self, id: &str) -> Result<Option<MovieDetail>> {
        Ok(Some(self.get_by_id(id).await))
    }
}

/// A response tagged with the generation of the request that produced it.
struct Completion<T> {
    generation: u64,
    outcome: Result<T>,
}
