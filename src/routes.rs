use std::fmt;
use std::str::FromStr;

/// The two screens of the browser: the movie list at `/` and a single movie
/// at `/movie/{id}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    List,
    Movie(String),
}

impl Route {
    pub fn movie(id: i64) -> Self {
        Route::Movie(id.to_string())
    }
}

impl FromStr for Route {
    type Err = anyhow::Error;

    fn from_str(path: &str) -> anyhow::Result<Self> {
        let path = path.trim();
        let trimmed = path.trim_end_matches('/');
        if trimmed.is_empty() {
            return Ok(Route::List);
        }
        match trimmed.strip_prefix("/movie/") {
            Some(id) if !id.is_empty() && !id.contains('/') => Ok(Route::Movie(id.to_string())),
            _ => Err(anyhow::anyhow!("unknown route '{}'", path)),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::List => write!(f, "/"),
            Route::Movie(id) => write!(f, "/movie/{}", urlencoding::encode(id)),
        }
    }
}
