use anyhow::{anyhow, bail, Context, Result};
use std::future::Future;
use std::io::BufRead;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::{mpsc, watch};
use tracing::{debug, error, info, warn};

use crate::catalog::Catalog;
use crate::config::Config;
use crate::render::{render_detail, render_list};
use crate::routes::Route;
use crate::views::{DetailState, DetailView, ListState, ListView, MovieSource};

const HELP: &str = "Type to search (empty line clears). Commands: :open N, :movie ID, :go PATH, :back, :quit\n";

/// One line of terminal input.
#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    /// New contents of the search box.
    Query(String),
    /// Zero-based position in the current list.
    Open(usize),
    Go(Route),
    Back,
    Quit,
}

impl Input {
    pub fn parse(line: &str) -> Result<Self> {
        let Some(command) = line.trim_start().strip_prefix(':') else {
            return Ok(Input::Query(line.to_string()));
        };
        let mut parts = command.split_whitespace();
        let name = parts.next().unwrap_or_default();
        let arg = parts.next();
        match (name, arg) {
            ("q" | "quit", None) => Ok(Input::Quit),
            ("back", None) => Ok(Input::Back),
            ("open", Some(n)) => {
                let n: usize = n
                    .parse()
                    .with_context(|| format!("':open' expects a list position, got '{n}'"))?;
                if n == 0 {
                    bail!("list positions start at 1");
                }
                Ok(Input::Open(n - 1))
            }
            ("movie", Some(id)) => Ok(Input::Go(Route::Movie(id.to_string()))),
            ("go", Some(path)) => Ok(Input::Go(path.parse()?)),
            _ => Err(anyhow!("unknown command ':{}'", command.trim())),
        }
    }
}

/// What the front end does after a line of input.
#[derive(Debug, PartialEq)]
enum Transition {
    Stay,
    Switch(Route),
    Quit,
}

enum Screen {
    List(ListView, watch::Receiver<ListState>),
    Detail(DetailView, watch::Receiver<DetailState>),
}

impl Screen {
    fn open(route: Route, source: &Arc<dyn MovieSource>, debounce: Duration) -> Self {
        debug!(%route, "opening screen");
        match route {
            Route::List => {
                let view = ListView::with_debounce(Arc::clone(source), debounce);
                let rx = view.subscribe();
                Screen::List(view, rx)
            }
            Route::Movie(id) => {
                let view = DetailView::spawn(Arc::clone(source), id);
                let rx = view.subscribe();
                Screen::Detail(view, rx)
            }
        }
    }

    /// Applies input to the current screen.
    fn apply(&self, input: Input) -> Result<Transition> {
        match (self, input) {
            (_, Input::Quit) => Ok(Transition::Quit),
            (Screen::List(view, _), Input::Query(text)) => {
                view.set_query(text);
                Ok(Transition::Stay)
            }
            (Screen::List(view, _), Input::Open(index)) => view
                .open(index)
                .map(Transition::Switch)
                .ok_or_else(|| anyhow!("no movie at position {}", index + 1)),
            (Screen::List(..), Input::Go(Route::List) | Input::Back) => Ok(Transition::Stay),
            (Screen::Detail(view, _), Input::Go(Route::Movie(id))) => {
                view.navigate(id);
                Ok(Transition::Stay)
            }
            (Screen::Detail(..), Input::Back | Input::Go(Route::List)) => {
                Ok(Transition::Switch(Route::List))
            }
            (Screen::Detail(..), Input::Query(_) | Input::Open(_)) => {
                Err(anyhow!("use :back to return to the movie list"))
            }
            (Screen::List(..), Input::Go(route)) => Ok(Transition::Switch(route)),
        }
    }

    /// Resolves when the visible state changes; false once the view is gone.
    async fn changed(&mut self) -> bool {
        match self {
            Screen::List(_, rx) => rx.changed().await.is_ok(),
            Screen::Detail(_, rx) => rx.changed().await.is_ok(),
        }
    }

    fn render(&mut self) -> String {
        match self {
            Screen::List(_, rx) => render_list(&rx.borrow_and_update()),
            Screen::Detail(_, rx) => render_detail(&rx.borrow_and_update()),
        }
    }
}

pub async fn run(config: Config) -> Result<()> {
    let catalog = Catalog::from_config(&config)?;
    if catalog.is_live() {
        info!(base_url = %config.base_url, "Using remote catalog");
    } else {
        warn!("TMDB_API_KEY is not configured - every screen shows the built-in demo catalog");
    }
    let source: Arc<dyn MovieSource> = Arc::new(catalog);
    let lines = spawn_stdin_reader()?;
    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl-C: {e}");
            std::future::pending::<()>().await;
        }
    };
    browse(
        source,
        config.search_debounce,
        lines,
        shutdown,
        &mut tokio::io::stdout(),
    )
    .await?;
    info!("Exiting");
    Ok(())
}

/// Blocking stdin reads stay on their own thread so an exit never waits for
/// the next keypress.
fn spawn_stdin_reader() -> Result<mpsc::Receiver<String>> {
    let (tx, rx) = mpsc::channel(16);
    std::thread::Builder::new()
        .name("stdin".to_string())
        .spawn(move || {
            for line in std::io::stdin().lock().lines() {
                match line {
                    Ok(line) => {
                        if tx.blocking_send(line).is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        error!("Failed to read input: {e}");
                        break;
                    }
                }
            }
        })
        .context("Failed to start stdin reader")?;
    Ok(rx)
}

/// Runs the browser until `:quit`, end of input, or `shutdown` resolves.
async fn browse<W>(
    source: Arc<dyn MovieSource>,
    debounce: Duration,
    mut lines: mpsc::Receiver<String>,
    shutdown: impl Future<Output = ()>,
    out: &mut W,
) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    tokio::pin!(shutdown);
    let mut screen = Screen::open(Route::List, &source, debounce);
    write_out(out, HELP).await?;

    loop {
        tokio::select! {
            line = lines.recv() => {
                let Some(line) = line else {
                    debug!("input closed");
                    break;
                };
                let input = match Input::parse(&line) {
                    Ok(input) => input,
                    Err(e) => {
                        write_out(out, &format!("! {e:#}\n")).await?;
                        continue;
                    }
                };
                match screen.apply(input) {
                    Ok(Transition::Stay) => {}
                    Ok(Transition::Switch(route)) => screen = Screen::open(route, &source, debounce),
                    Ok(Transition::Quit) => break,
                    Err(e) => write_out(out, &format!("! {e}\n")).await?,
                }
            }
            alive = screen.changed() => {
                if !alive {
                    break;
                }
                let text = screen.render();
                write_out(out, &text).await?;
            }
            _ = &mut shutdown => {
                debug!("shutdown requested");
                break;
            }
        }
    }
    Ok(())
}

async fn write_out<W>(out: &mut W, text: &str) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    out.write_all(text.as_bytes())
        .await
        .context("Failed to write to stdout")?;
    out.flush().await.context("Failed to flush stdout")?;
    Ok(())
}
