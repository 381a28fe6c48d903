use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, error, warn};

use super::{Completion, MovieSource};
use crate::models::MovieDetail;

pub const DETAIL_ERROR_MESSAGE: &str = "Failed to load movie details. Please try again later.";

#[derive(Debug, Clone, PartialEq)]
pub enum DetailState {
    Loading,
    Ready(Box<MovieDetail>),
    Error { message: String },
    NotFound,
}

impl DetailState {
    pub fn detail(&self) -> Option<&MovieDetail> {
        match self {
            DetailState::Ready(detail) => Some(detail.as_ref()),
            _ => None,
        }
    }
}

/// The single-movie screen, keyed by the id from the `/movie/{id}` route.
pub struct DetailView {
    commands: mpsc::UnboundedSender<String>,
    state: watch::Receiver<DetailState>,
    worker: JoinHandle<()>,
}

impl DetailView {
    pub fn spawn(source: Arc<dyn MovieSource>, id: impl Into<String>) -> Self {
        let (commands, commands_rx) = mpsc::unbounded_channel();
        let (state_tx, state) = watch::channel(DetailState::Loading);
        let (done_tx, done_rx) = mpsc::unbounded_channel();
        let worker = DetailWorker {
            source,
            id: id.into(),
            state: state_tx,
            done: done_tx,
            generation: 0,
        };
        let worker = tokio::spawn(worker.run(commands_rx, done_rx));
        Self {
            commands,
            state,
            worker,
        }
    }

    /// Points the view at another route id. Re-fetches only when the id
    /// actually changes.
    pub fn navigate(&self, id: impl Into<String>) {
        if self.commands.send(id.into()).is_err() {
            debug!("detail view worker stopped, dropping navigation");
        }
    }

    pub fn state(&self) -> DetailState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<DetailState> {
        self.state.clone()
    }
}

impl Drop for DetailView {
    fn drop(&mut self) {
        self.worker.abort();
    }
}

struct DetailWorker {
    source: Arc<dyn MovieSource>,
    id: String,
    state: watch::Sender<DetailState>,
    done: mpsc::UnboundedSender<Completion<Option<MovieDetail>>>,
    generation: u64,
}

impl DetailWorker {
    async fn run(
        mut self,
        mut commands: mpsc::UnboundedReceiver<String>,
        mut done: mpsc::UnboundedReceiver<Completion<Option<MovieDetail>>>,
    ) {
        self.issue();
        loop {
            tokio::select! {
                command = commands.recv() => match command {
                    Some(id) if id != self.id => {
                        self.id = id;
                        self.issue();
                    }
                    Some(_) => {}
                    None => break,
                },
                Some(completion) = done.recv() => self.settle(completion),
            }
        }
        debug!("detail view closed");
    }

    fn issue(&mut self) {
        self.generation += 1;
        let generation = self.generation;
        self.state.send_replace(DetailState::Loading);

        let source = Arc::clone(&self.source);
        let done = self.done.clone();
        let id = self.id.clone();
        tokio::spawn(async move {
            let outcome = source.movie(&id).await;
            let _ = done.send(Completion {
                generation,
                outcome,
            });
        });
    }

    fn settle(&mut self, completion: Completion<Option<MovieDetail>>) {
        if completion.generation != self.generation {
            debug!(
                stale = completion.generation,
                current = self.generation,
                "dropping superseded detail response"
            );
            return;
        }
        let next = match completion.outcome {
            Ok(Some(detail)) => DetailState::Ready(Box::new(detail)),
            Ok(None) => {
                warn!(id = %self.id, "movie not found");
                DetailState::NotFound
            }
            Err(e) => {
                error!(id = %self.id, "Failed to load movie details: {:#}", e);
                DetailState::Error {
                    message: DETAIL_ERROR_MESSAGE.to_string(),
                }
            }
        };
        self.state.send_replace(next);
    }
}
