//! Side channel for fallbacks the catalog swallows.
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    ListPopular,
    Search,
    GetById,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FallbackReason {
    MissingCredential,
    Remote(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct FallbackEvent {
    pub operation: Operation,
    pub reason: FallbackReason,
    /// Only set for `GetById`: whether the requested id exists in the built-in
    /// catalog. `Some(false)` means an unrelated record was served.
    pub matched: Option<bool>,
}

pub trait FallbackObserver: Send + Sync {
    fn on_fallback(&self, event: &FallbackEvent);
}

/// Default observer: one warning per fallback.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl FallbackObserver for LogObserver {
    fn on_fallback(&self, event: &FallbackEvent) {
        match &event.reason {
            FallbackReason::MissingCredential => warn!(
                operation = ?event.operation,
                matched = ?event.matched,
                "No TMDB credential configured, serving built-in catalog"
            ),
            FallbackReason::Remote(err) => warn!(
                operation = ?event.operation,
                matched = ?event.matched,
                "TMDB request failed, serving built-in catalog: {}",
                err
            ),
        }
    }
}
