use axum::response::Json;
use serde_json::{json, Value};

/// GET /v3/api-docs - hand-maintained description of the HTTP surface
pub async fn api_docs() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "name": "ForumHub API",
        "version": version,
        "security": {
            "scheme": "bearer",
            "format": "JWT",
            "header": "Authorization: Bearer <token>",
            "obtain": "POST /login"
        },
        "endpoints": {
            "POST /login": "body {login, senha} -> 200 {tokenJWT} (public)",
            "POST /topicos": "body {titulo, mensagem, curso} -> 201 + Location (protected)",
            "GET /topicos": "query curso?, ano?, page, size, sort=field,asc|desc -> 200 page (protected)",
            "GET /topicos/{id}": "-> 200 topic (protected)",
            "PUT /topicos/{id}": "body {titulo?, mensagem?, curso?, status?} -> 200 topic (protected)",
            "DELETE /topicos/{id}": "-> 204 (protected)",
            "GET /health": "-> 200 or 503"
        }
    }))
}
