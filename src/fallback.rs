//! Built-in catalog served whenever the remote catalog cannot be used.
use crate::models::{Genre, MovieDetail, MovieSummary};
use once_cell::sync::Lazy;

static FALLBACK_MOVIES: Lazy<Vec<MovieDetail>> = Lazy::new(|| {
    vec![
        record(
            1,
            "The Shawshank Redemption",
            "/q6y0Go1tsGEsmtFryDOJo3dEmqu.jpg",
            "/kXfqcdQKsToO0OUXHcrrNCHDBzO.jpg",
            "Imprisoned in the 1940s for the double murder of his wife and her lover, upstanding banker Andy Dufresne begins a new life at the Shawshank prison.",
            "Fear can hold you prisoner. Hope can set you free.",
            8.7,
            "1994-09-23",
            142,
            &[(18, "Drama"), (80, "Crime")],
            25_000_000,
            28_341_469,
        ),
        record(
            2,
            "The Godfather",
            "/3bhkrj58Vtu7enYsRolD1fZdja1.jpg",
            "/tmU7GeKVybMWFButWEGl2M4GeiP.jpg",
            "Spanning the years 1945 to 1955, a chronicle of the fictional Italian-American Corleone crime family.",
            "An offer you can't refuse.",
            8.7,
            "1972-03-14",
            175,
            &[(18, "Drama"), (80, "Crime")],
            6_000_000,
            245_066_411,
        ),
        record(
            3,
            "The Dark Knight",
            "/qJ2tW6WMUDux911r6m7haRef0WH.jpg",
            "/nMKdUUepR0i5zn0y1T4CsSB5chy.jpg",
            "Batman raises the stakes in his war on crime and faces a criminal mastermind known as the Joker.",
            "Why so serious?",
            8.5,
            "2008-07-16",
            152,
            &[(18, "Drama"), (28, "Action"), (80, "Crime"), (53, "Thriller")],
            185_000_000,
            1_004_558_444,
        ),
        record(
            4,
            "Pulp Fiction",
            "/d5iIlFn5s0ImszYzBPb8JPIfbXD.jpg",
            "/suaEOtk1N1sgg2MTM7oZd2cfVp3.jpg",
            "A burger-loving hit man, his philosophical partner and a washed-up boxer converge in this sprawling crime caper.",
            "Just because you are a character doesn't mean you have character.",
            8.5,
            "1994-09-10",
            154,
            &[(53, "Thriller"), (80, "Crime")],
            8_500_000,
            213_900_000,
        ),
        record(
            5,
            "Forrest Gump",
            "/arw2vcBveWOVZr6pxd9XTd1TdQa.jpg",
            "/qdIMHd4sEfJSckfVJfKQvisL02a.jpg",
            "A man with a low IQ has accomplished great things in his life and been present during significant historic events.",
            "The world will never be the same once you've seen it through the eyes of Forrest Gump.",
            8.5,
            "1994-06-23",
            142,
            &[(35, "Comedy"), (18, "Drama"), (10749, "Romance")],
            55_000_000,
            677_387_716,
        ),
        record(
            6,
            "Inception",
            "/oYuLEt3zVCKq57qu2F8dT7NIa6f.jpg",
            "/8ZTVqvKDQ8emSGUEMjsS4yHAwrp.jpg",
            "Cobb, a skilled thief who commits corporate espionage by infiltrating the subconscious of his targets, is offered a chance to regain his old life.",
            "Your mind is the scene of the crime.",
            8.4,
            "2010-07-15",
            148,
            &[(28, "Action"), (878, "Science Fiction"), (12, "Adventure")],
            160_000_000,
            825_532_764,
        ),
    ]
});

#[allow(clippy::too_many_arguments)]
fn record(
    id: i64,
    title: &str,
    poster: &str,
    backdrop: &str,
    overview: &str,
    tagline: &str,
    vote_average: f64,
    release_date: &str,
    runtime: u32,
    genres: &[(i64, &str)],
    budget: u64,
    revenue: u64,
) -> MovieDetail {
    MovieDetail {
        summary: MovieSummary {
            id,
            title: title.to_string(),
            poster_path: Some(poster.to_string()),
            overview: overview.to_string(),
            vote_average: Some(vote_average),
            release_date: Some(release_date.to_string()),
        },
        backdrop_path: Some(backdrop.to_string()),
        tagline: Some(tagline.to_string()),
        runtime: Some(runtime),
        genres: genres
            .iter()
            .map(|(id, name)| Genre {
                id: *id,
                name: name.to_string(),
            })
            .collect(),
        budget: Some(budget),
        revenue: Some(revenue),
        status: Some("Released".to_string()),
        original_language: Some("en".to_string()),
    }
}

pub fn fallback_movies() -> &'static [MovieDetail] {
    &FALLBACK_MOVIES
}

pub fn popular() -> Vec<MovieSummary> {
    FALLBACK_MOVIES.iter().map(|m| m.summary.clone()).collect()
}

/// Case-insensitive substring match on the title. Blank queries match nothing.
pub fn search(query: &str) -> Vec<MovieSummary> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }
    FALLBACK_MOVIES
        .iter()
        .filter(|m| m.summary.title.to_lowercase().contains(&needle))
        .map(|m| m.summary.clone())
        .collect()
}

/// Looks up a record by its integer id, answering with the first record when
/// the id is unknown or not numeric. The flag reports whether the id matched.
pub fn by_id(id: &str) -> (MovieDetail, bool) {
    let wanted = parse_id(id);
    match wanted.and_then(|w| FALLBACK_MOVIES.iter().find(|m| m.summary.id == w)) {
        Some(found) => (found.clone(), true),
        None => (FALLBACK_MOVIES[0].clone(), false),
    }
}

/// Leading-digit integer parse: `"6"` and `"6-inception"` both give 6.
pub fn parse_id(id: &str) -> Option<i64> {
    let trimmed = id.trim();
    let (sign, rest) = match trimmed.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, trimmed),
    };
    let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse::<i64>().ok().map(|n| sign * n)
}
