use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct MovieSummary {
    pub id: i64,
    pub title: String,
    pub poster_path: Option<String>,
    #[serde(default)]
    pub overview: String,
    pub vote_average: Option<f64>,
    pub release_date: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Genre {
    pub id: i64,
    pub name: String,
}

/// A single catalog record as returned by the by-id endpoint. The summary
/// fields live at the top level of the same JSON object.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct MovieDetail {
    #[serde(flatten)]
    pub summary: MovieSummary,
    pub backdrop_path: Option<String>,
    pub tagline: Option<String>,
    pub runtime: Option<u32>,
    #[serde(default)]
    pub genres: Vec<Genre>,
    pub budget: Option<u64>,
    pub revenue: Option<u64>,
    pub status: Option<String>,
    pub original_language: Option<String>,
}

impl MovieDetail {
    pub fn id(&self) -> i64 {
        self.summary.id
    }

    pub fn title(&self) -> &str {
        &self.summary.title
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ResultsPage {
    #[serde(default)]
    pub(crate) results: Vec<MovieSummary>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserializes_detail_with_flattened_summary() {
        let value = json!({
            "id": 27205,
            "title": "Inception",
            "poster_path": "/poster.jpg",
            "overview": "Dreams.",
            "vote_average": 8.4,
            "release_date": "2010-07-15",
            "backdrop_path": null,
            "tagline": "Your mind is the scene of the crime.",
            "runtime": 148,
            "genres": [{ "id": 28, "name": "Action" }],
            "budget": 160000000,
            "revenue": 0,
            "status": "Released",
            "original_language": "en"
        });
        let detail: MovieDetail = serde_json::from_value(value).expect("detail deserialize");
        assert_eq!(detail.id(), 27205);
        assert_eq!(detail.title(), "Inception");
        assert_eq!(detail.summary.vote_average, Some(8.4));
        assert_eq!(detail.runtime, Some(148));
        assert_eq!(detail.genres[0].name, "Action");
        assert_eq!(detail.revenue, Some(0));
    }

    #[test]
    fn missing_overview_and_genres_default_to_empty() {
        let value = json!({ "id": 1, "title": "Bare" });
        let detail: MovieDetail = serde_json::from_value(value).expect("detail deserialize");
        assert!(detail.summary.overview.is_empty());
        assert!(detail.genres.is_empty());
        assert_eq!(detail.summary.poster_path, None);
    }
}
