use axum::extract::{Path, Query, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::routing::get;
use axum::{Json, Router};
use cinelist::catalog::{Catalog, FIRST_PAGE};
use cinelist::config::Config;
use cinelist::tmdb::{CatalogApi, TmdbClient};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

const API_KEY: &str = "test-key";

#[derive(Debug, Clone)]
struct SeenRequest {
    path: String,
    query: HashMap<String, String>,
    authorization: Option<String>,
}

type Seen = Arc<Mutex<Vec<SeenRequest>>>;

fn record(seen: &Seen, path: String, query: HashMap<String, String>, headers: &HeaderMap) {
    let authorization = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    seen.lock().unwrap().push(SeenRequest {
        path,
        query,
        authorization,
    });
}

fn summary_json(id: i64, title: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "poster_path": format!("/{id}.jpg"),
        "overview": "From the fake catalog.",
        "vote_average": 6.5,
        "release_date": "2023-03-03"
    })
}

async fn popular(
    State(seen): State<Seen>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Json<Value> {
    record(&seen, "/movie/popular".to_string(), query, &headers);
    Json(json!({
        "page": 1,
        "results": [summary_json(11, "Remote One"), summary_json(12, "Remote Two")],
        "total_pages": 1
    }))
}

async fn search(
    State(seen): State<Seen>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Json<Value> {
    let title = query.get("query").cloned().unwrap_or_default();
    record(&seen, "/search/movie".to_string(), query, &headers);
    Json(json!({ "results": [summary_json(21, &title)] }))
}

async fn movie(
    State(seen): State<Seen>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Json<Value> {
    record(&seen, format!("/movie/{id}"), query, &headers);
    let mut body = summary_json(id.parse().unwrap_or(0), "Remote Detail");
    body["tagline"] = json!("Served by axum.");
    body["runtime"] = json!(99);
    body["genres"] = json!([{ "id": 18, "name": "Drama" }]);
    body["budget"] = json!(0);
    body["status"] = json!("Released");
    Json(body)
}

async fn spawn_catalog(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind fake catalog");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("fake catalog");
    });
    format!("http://{addr}/3")
}

async fn healthy_catalog() -> (TmdbClient, Seen) {
    let seen: Seen = Arc::new(Mutex::new(Vec::new()));
    let router = Router::new()
        .route("/3/movie/popular", get(popular))
        .route("/3/search/movie", get(search))
        .route("/3/movie/:id", get(movie))
        .with_state(seen.clone());
    let base_url = spawn_catalog(router).await;
    (client_for(base_url), seen)
}

fn client_for(base_url: String) -> TmdbClient {
    let config = Config {
        api_key: Some(API_KEY.to_string()),
        base_url,
        ..Config::default()
    };
    TmdbClient::new(&config).expect("client")
}

#[tokio::test]
async fn popular_sends_credential_as_query_and_bearer() {
    let (client, seen) = healthy_catalog().await;
    assert!(client.is_configured());

    let movies = client.popular(2).await.expect("popular");
    let titles: Vec<&str> = movies.iter().map(|m| m.title.as_str()).collect();
    assert_eq!(titles, vec!["Remote One", "Remote Two"]);
    assert_eq!(movies[0].poster_path.as_deref(), Some("/11.jpg"));

    let seen = seen.lock().unwrap();
    let request = &seen[0];
    assert_eq!(request.path, "/movie/popular");
    assert_eq!(request.query.get("api_key").map(String::as_str), Some(API_KEY));
    assert_eq!(request.query.get("page").map(String::as_str), Some("2"));
    assert_eq!(request.query.get("language").map(String::as_str), Some("en-US"));
    assert_eq!(
        request.authorization.as_deref(),
        Some(format!("Bearer {API_KEY}").as_str())
    );
}

#[tokio::test]
async fn search_encodes_the_query() {
    let (client, seen) = healthy_catalog().await;
    let movies = client.search("amélie & co", 1).await.expect("search");
    assert_eq!(movies[0].title, "amélie & co");

    let seen = seen.lock().unwrap();
    assert_eq!(seen[0].path, "/search/movie");
    assert_eq!(seen[0].query.get("page").map(String::as_str), Some("1"));
}

#[tokio::test]
async fn movie_returns_the_record_directly() {
    let (client, seen) = healthy_catalog().await;
    let detail = client.movie("27205").await.expect("movie");
    assert_eq!(detail.id(), 27205);
    assert_eq!(detail.tagline.as_deref(), Some("Served by axum."));
    assert_eq!(detail.runtime, Some(99));
    assert_eq!(detail.genres[0].name, "Drama");
    assert_eq!(detail.budget, Some(0));
    assert_eq!(seen.lock().unwrap()[0].path, "/movie/27205");
}

#[tokio::test]
async fn catalog_passes_live_results_through() {
    let (client, _seen) = healthy_catalog().await;
    let catalog = Catalog::new(Arc::new(client));
    assert!(catalog.is_live());
    let movies = catalog.list_popular(FIRST_PAGE).await;
    assert_eq!(movies.len(), 2);
    assert_eq!(movies[0].title, "Remote One");
}

#[tokio::test]
async fn error_status_is_a_failure_and_catalog_falls_back() {
    let router = Router::new().fallback(|| async {
        (StatusCode::UNAUTHORIZED, Json(json!({ "status_message": "Invalid API key" })))
    });
    let client = client_for(spawn_catalog(router).await);

    let err = client.popular(1).await.unwrap_err();
    let message = format!("{err:#}");
    assert!(message.contains("401"), "unexpected error: {message}");
    assert!(!message.contains(API_KEY), "key leaked: {message}");

    let catalog = Catalog::new(Arc::new(client));
    assert_eq!(catalog.list_popular(FIRST_PAGE).await.len(), 6);
    let hits = catalog.search("godfather", FIRST_PAGE).await;
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].title, "The Godfather");
}

#[tokio::test]
async fn malformed_payload_is_a_failure_and_catalog_falls_back() {
    let router = Router::new().fallback(|| async { "<html>maintenance</html>" });
    let client = client_for(spawn_catalog(router).await);

    assert!(client.movie("6").await.is_err());

    let catalog = Catalog::new(Arc::new(client));
    assert_eq!(catalog.get_by_id("6").await.title(), "Inception");
}

#[tokio::test]
async fn unreachable_catalog_falls_back() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let catalog = Catalog::new(Arc::new(client_for(format!("http://{addr}/3"))));
    assert_eq!(catalog.list_popular(FIRST_PAGE).await.len(), 6);
}
