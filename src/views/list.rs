use std::future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};
use tracing::{debug, error};

use super::{Completion, MovieSource};
use crate::catalog::FIRST_PAGE;
use crate::models::MovieSummary;
use crate::routes::Route;

pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(500);
pub const LIST_ERROR_MESSAGE: &str = "Failed to load movies. Please try again later.";

#[derive(Debug, Clone, PartialEq)]
pub enum ListState {
    Loading,
    Ready {
        movies: Vec<MovieSummary>,
        searching: bool,
    },
    Error {
        message: String,
    },
}

impl ListState {
    pub fn movies(&self) -> &[MovieSummary] {
        match self {
            ListState::Ready { movies, .. } => movies,
            _ => &[],
        }
    }

    pub fn is_searching(&self) -> bool {
        matches!(self, ListState::Ready { searching: true, .. })
    }
}

/// The movie list screen. Loads the popular list on creation and turns
/// search box edits into debounced searches. Dropping the view stops its
/// worker and any pending search timer.
pub struct ListView {
    commands: mpsc::UnboundedSender<String>,
    state: watch::Receiver<ListState>,
    worker: JoinHandle<()>,
}

impl ListView {
    pub fn spawn(source: Arc<dyn MovieSource>) -> Self {
        Self::with_debounce(source, SEARCH_DEBOUNCE)
    }

    pub fn with_debounce(source: Arc<dyn MovieSource>, debounce: Duration) -> Self {
        let (commands, commands_rx) = mpsc::unbounded_channel();
        let (state_tx, state) = watch::channel(ListState::Loading);
        let (done_tx, done_rx) = mpsc::unbounded_channel();
        let worker = ListWorker {
            source,
            debounce,
            state: state_tx,
            done: done_tx,
            searching: false,
            pending: None,
            generation: 0,
        };
        let worker = tokio::spawn(worker.run(commands_rx, done_rx));
        Self {
            commands,
            state,
            worker,
        }
    }

    /// Replaces the search box contents.
    pub fn set_query(&self, text: impl Into<String>) {
        if self.commands.send(text.into()).is_err() {
            debug!("list view worker stopped, dropping query");
        }
    }

    pub fn state(&self) -> ListState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ListState> {
        self.state.clone()
    }

    /// Route for the movie at `index` in the current results.
    pub fn open(&self, index: usize) -> Option<Route> {
        self.state
            .borrow()
            .movies()
            .get(index)
            .map(|m| Route::movie(m.id))
    }
}

impl Drop for ListView {
    fn drop(&mut self) {
        self.worker.abort();
    }
}

struct PendingSearch {
    query: String,
    deadline: Instant,
}

struct ListWorker {
    source: Arc<dyn MovieSource>,
    debounce: Duration,
    state: watch::Sender<ListState>,
    done: mpsc::UnboundedSender<Completion<Vec<MovieSummary>>>,
    searching: bool,
    pending: Option<PendingSearch>,
    generation: u64,
}

impl ListWorker {
    async fn run(
        mut self,
        mut commands: mpsc::UnboundedReceiver<String>,
        mut done: mpsc::UnboundedReceiver<Completion<Vec<MovieSummary>>>,
    ) {
        self.issue(None);
        loop {
            let deadline = self.pending.as_ref().map(|p| p.deadline);
            tokio::select! {
                command = commands.recv() => match command {
                    Some(text) => self.on_query(&text),
                    None => break,
                },
                Some(completion) = done.recv() => self.settle(completion),
                _ = wait_until(deadline) => self.fire(),
            }
        }
        debug!("list view closed");
    }

    fn on_query(&mut self, text: &str) {
        if text.trim().is_empty() {
            self.pending = None;
            if self.searching {
                debug!("search cleared, reloading popular movies");
                self.searching = false;
                self.issue(None);
            }
            return;
        }
        self.pending = Some(PendingSearch {
            query: text.to_string(),
            deadline: Instant::now() + self.debounce,
        });
    }

    fn fire(&mut self) {
        if let Some(pending) = self.pending.take() {
            debug!(query = %pending.query, "search debounce elapsed");
            self.searching = true;
            self.issue(Some(pending.query));
        }
    }

    /// Starts a request and supersedes every request issued before it.
    fn issue(&mut self, query: Option<String>) {
        self.generation += 1;
        let generation = self.generation;
        self.state.send_replace(ListState::Loading);

        let source = Arc::clone(&self.source);
        let done = self.done.clone();
        tokio::spawn(async move {
            let outcome = match query {
                Some(q) => source.search(&q, FIRST_PAGE).await,
                None => source.popular(FIRST_PAGE).await,
            };
            let _ = done.send(Completion {
                generation,
                outcome,
            });
        });
    }

    fn settle(&mut self, completion: Completion<Vec<MovieSummary>>) {
        if completion.generation != self.generation {
            debug!(
                stale = completion.generation,
                current = self.generation,
                "dropping superseded list response"
            );
            return;
        }
        let next = match completion.outcome {
            Ok(movies) => ListState::Ready {
                movies,
                searching: self.searching,
            },
            Err(e) => {
                error!("Failed to load movies: {:#}", e);
                ListState::Error {
                    message: LIST_ERROR_MESSAGE.to_string(),
                }
            }
        };
        self.state.send_replace(next);
    }
}

async fn wait_until(deadline: Option<Instant>) {
    match deadline {
        Some(at) => sleep_until(at).await,
        None => future::pending::<()>().await,
    }
}
