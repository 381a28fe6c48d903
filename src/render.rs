//! Plain-text rendering of the two screens.
use std::fmt::Write;

use crate::format::{
    format_date, format_money, format_rating, format_runtime, release_year, resolve_image_url,
    BACKDROP_FULL, NOT_AVAILABLE, POSTER_FULL, POSTER_THUMB,
};
use crate::models::MovieDetail;
use crate::views::{DetailState, ListState};

pub const EMPTY_RESULTS: &str = "No movies found.";
pub const NOT_FOUND_MESSAGE: &str = "Movie not found.";
const BACK_HINT: &str = "[:back] Back to movies";

pub fn render_list(state: &ListState) -> String {
    let mut out = String::new();
    match state {
        ListState::Loading => out.push_str("Loading movies...\n"),
        ListState::Error { message } => {
            let _ = writeln!(out, "! {message}");
            let _ = writeln!(out, "{EMPTY_RESULTS}");
        }
        ListState::Ready { movies, searching } => {
            let heading = if *searching {
                "Search results"
            } else {
                "Popular movies"
            };
            let _ = writeln!(out, "== {heading} ==");
            if movies.is_empty() {
                let _ = writeln!(out, "{EMPTY_RESULTS}");
            }
            for (i, movie) in movies.iter().enumerate() {
                let year = release_year(movie.release_date.as_deref())
                    .map(|y| format!(" ({y})"))
                    .unwrap_or_default();
                let _ = writeln!(
                    out,
                    "{:>2}. {}{}  * {}",
                    i + 1,
                    movie.title,
                    year,
                    format_rating(movie.vote_average)
                );
                let _ = writeln!(
                    out,
                    "    {}",
                    resolve_image_url(movie.poster_path.as_deref(), POSTER_THUMB)
                );
            }
        }
    }
    out
}

pub fn render_detail(state: &DetailState) -> String {
    match state {
        DetailState::Loading => "Loading movie details...\n".to_string(),
        DetailState::Error { message } => format!("! {message}\n{BACK_HINT}\n"),
        DetailState::NotFound => format!("! {NOT_FOUND_MESSAGE}\n{BACK_HINT}\n"),
        DetailState::Ready(detail) => render_movie(detail),
    }
}

fn render_movie(detail: &MovieDetail) -> String {
    let summary = &detail.summary;
    let mut out = String::new();
    let _ = writeln!(out, "== {} ==", summary.title);
    if let Some(tagline) = detail.tagline.as_deref().filter(|t| !t.is_empty()) {
        let _ = writeln!(out, "\"{tagline}\"");
    }
    let genres = if detail.genres.is_empty() {
        NOT_AVAILABLE.to_string()
    } else {
        detail
            .genres
            .iter()
            .map(|g| g.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    };
    let rows = [
        ("Released", format_date(summary.release_date.as_deref())),
        ("Rating", format_rating(summary.vote_average)),
        ("Runtime", format_runtime(detail.runtime)),
        ("Genres", genres),
        (
            "Status",
            detail.status.clone().unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        ),
        (
            "Language",
            detail
                .original_language
                .as_deref()
                .map(str::to_uppercase)
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        ),
        ("Budget", format_money(detail.budget)),
        ("Revenue", format_money(detail.revenue)),
        (
            "Poster",
            resolve_image_url(summary.poster_path.as_deref(), POSTER_FULL),
        ),
        (
            "Backdrop",
            resolve_image_url(detail.backdrop_path.as_deref(), BACKDROP_FULL),
        ),
    ];
    for (label, value) in rows {
        let _ = writeln!(out, "{label:<9} {value}");
    }
    if !summary.overview.is_empty() {
        let _ = writeln!(out, "\n{}", summary.overview);
    }
    let _ = writeln!(out, "\n{BACK_HINT}");
    out
}
