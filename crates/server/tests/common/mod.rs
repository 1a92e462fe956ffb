use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use migration::MigratorTrait;
use sea_orm::{Database, DatabaseConnection};
use tower::ServiceExt;
use tower_http::cors::CorsLayer;

use server::{routes, state::ServerState};

/// Router over a fresh, migrated in-memory database.
pub async fn build_app() -> anyhow::Result<Router> {
    Ok(build_app_with_db().await?.0)
}

/// Like `build_app`, also handing back the connection for seeding related rows.
pub async fn build_app_with_db() -> anyhow::Result<(Router, DatabaseConnection)> {
    let db = Database::connect("sqlite::memory:").await?;
    migration::Migrator::up(&db, None).await?;
    let app = routes::build_router(ServerState::new(db.clone()), CorsLayer::very_permissive());
    Ok((app, db))
}

/// Send one request and return status plus parsed JSON body (`Null` when empty).
pub async fn send(app: &Router, method: &str, uri: &str, body: Option<serde_json::Value>) -> anyhow::Result<(StatusCode, serde_json::Value)> {
    let builder = Request::builder().method(method).uri(uri);
    let req = match body {
        Some(v) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&v)?))?,
        None => builder.body(Body::empty())?,
    };
    let resp = app.clone().oneshot(req).await?;
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await?;
    let json = if bytes.is_empty() { serde_json::Value::Null } else { serde_json::from_slice(&bytes)? };
    Ok((status, json))
}

pub async fn create(app: &Router, name: &str, description: &str) -> anyhow::Result<StatusCode> {
    let (status, _) = send(app, "POST", "/communities", Some(serde_json::json!({"name": name, "description": description}))).await?;
    Ok(status)
}

/// Ids of a JSON array of communities, in response order.
pub fn ids(v: &serde_json::Value) -> Vec<i64> {
    v.as_array()
        .map(|rows| rows.iter().filter_map(|r| r["id"].as_i64()).collect())
        .unwrap_or_default()
}
