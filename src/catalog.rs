use anyhow::Result;
use std::sync::Arc;

use crate::config::Config;
use crate::diagnostics::{FallbackEvent, FallbackObserver, FallbackReason, LogObserver, Operation};
use crate::fallback;
use crate::models::{MovieDetail, MovieSummary};
use crate::tmdb::{CatalogApi, TmdbClient};

pub const FIRST_PAGE: u32 = 1;

/// Remote catalog with the built-in dataset behind it. None of the public
/// operations fail: missing credentials and remote errors both degrade to
/// [`fallback`] data and are reported to the observer.
#[derive(Clone)]
pub struct Catalog {
    remote: Arc<dyn CatalogApi>,
    observer: Arc<dyn FallbackObserver>,
}

impl Catalog {
    pub fn new(remote: Arc<dyn CatalogApi>) -> Self {
        Self {
            remote,
            observer: Arc::new(LogObserver),
        }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(Arc::new(TmdbClient::new(config)?)))
    }

    pub fn with_observer(mut self, observer: Arc<dyn FallbackObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Whether results can come from the remote catalog at all.
    pub fn is_live(&self) -> bool {
        self.remote.is_configured()
    }

    pub async fn list_popular(&self, page: u32) -> Vec<MovieSummary> {
        if !self.remote.is_configured() {
            self.fell_back(Operation::ListPopular, FallbackReason::MissingCredential, None);
            return fallback::popular();
        }
        match self.remote.popular(page).await {
            Ok(movies) => movies,
            Err(e) => {
                self.fell_back(Operation::ListPopular, remote_reason(&e), None);
                fallback::popular()
            }
        }
    }

    pub async fn search(&self, query: &str, page: u32) -> Vec<MovieSummary> {
        let query = query.trim();
        if query.is_empty() {
            return Vec::new();
        }
        if !self.remote.is_configured() {
            self.fell_back(Operation::Search, FallbackReason::MissingCredential, None);
            return fallback::search(query);
        }
        match self.remote.search(query, page).await {
            Ok(movies) => movies,
            Err(e) => {
                self.fell_back(Operation::Search, remote_reason(&e), None);
                fallback::search(query)
            }
        }
    }

    /// Unknown ids resolve to the first built-in record rather than an
    /// absence; the observer sees `matched: Some(false)` in that case.
    pub async fn get_by_id(&self, id: &str) -> MovieDetail {
        let reason = if self.remote.is_configured() {
            match self.remote.movie(id).await {
                Ok(detail) => return detail,
                Err(e) => remote_reason(&e),
            }
        } else {
            FallbackReason::MissingCredential
        };
        let (detail, matched) = fallback::by_id(id);
        self.fell_back(Operation::GetById, reason, Some(matched));
        detail
    }

    fn fell_back(&self, operation: Operation, reason: FallbackReason, matched: Option<bool>) {
        self.observer.on_fallback(&FallbackEvent {
            operation,
            reason,
            matched,
        });
    }
}

fn remote_reason(err: &anyhow::Error) -> FallbackReason {
    FallbackReason::Remote(format!("{err:#}"))
}
