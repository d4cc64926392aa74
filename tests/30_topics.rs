mod common;

use anyhow::Result;
use axum::http::{header, Method, StatusCode};
use serde_json::json;

use common::TestApp;

#[tokio::test]
async fn test_create_returns_created_with_location() -> Result<()> {
    let app = TestApp::spawn().await?;
    let token = app.login().await?;

    let res = app.create_topic(&token, "Dúvida", "Como usar JPA?", "Spring").await?;
    assert_eq!(res.status, StatusCode::CREATED);

    let id = res.body["id"].as_i64().expect("numeric id");
    let location = res.headers[header::LOCATION].to_str()?;
    assert_eq!(location, format!("/topicos/{}", id));

    assert_eq!(res.body["titulo"], "Dúvida");
    assert_eq!(res.body["curso"], "Spring");
    assert_eq!(res.body["status"], "NAO_RESPONDIDO");
    assert!(res.body["dataCriacao"].is_string());

    let detail = app.request(Method::GET, location, Some(&token), None).await?;
    assert_eq!(detail.status, StatusCode::OK);
    assert_eq!(detail.body, res.body);
    Ok(())
}

#[tokio::test]
async fn test_duplicate_pair_is_rejected_and_not_stored() -> Result<()> {
    let app = TestApp::spawn().await?;
    let token = app.login().await?;

    let first = app.create_topic(&token, "Dúvida", "Como usar JPA?", "Spring").await?;
    assert_eq!(first.status, StatusCode::CREATED);

    let second = app.create_topic(&token, "Dúvida", "Como usar JPA?", "Java").await?;
    assert_eq!(second.status, StatusCode::BAD_REQUEST);
    assert_eq!(second.body["code"], "DUPLICATE_TOPIC");

    let list = app.request(Method::GET, "/topicos", Some(&token), None).await?;
    assert_eq!(list.body["totalElements"], 1);
    Ok(())
}

#[tokio::test]
async fn test_same_titulo_with_other_mensagem_is_allowed() -> Result<()> {
    let app = TestApp::spawn().await?;
    let token = app.login().await?;

    app.create_topic(&token, "Dúvida", "Como usar JPA?", "Spring").await?;
    let res = app.create_topic(&token, "Dúvida", "Como usar Flyway?", "Spring").await?;
    assert_eq!(res.status, StatusCode::CREATED);
    Ok(())
}

#[tokio::test]
async fn test_create_with_missing_fields_is_bad_request() -> Result<()> {
    let app = TestApp::spawn().await?;
    let token = app.login().await?;

    let res = app
        .request(Method::POST, "/topicos", Some(&token), Some(json!({ "titulo": "Só título" })))
        .await?;

    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["code"], "VALIDATION_ERROR");
    assert!(res.body["field_errors"].get("mensagem").is_some());
    assert!(res.body["field_errors"].get("curso").is_some());
    Ok(())
}

#[tokio::test]
async fn test_create_without_token_stores_nothing() -> Result<()> {
    let app = TestApp::spawn().await?;

    let res = app
        .request(
            Method::POST,
            "/topicos",
            None,
            Some(json!({ "titulo": "a", "mensagem": "b", "curso": "c" })),
        )
        .await?;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);

    let token = app.login().await?;
    let list = app.request(Method::GET, "/topicos", Some(&token), None).await?;
    assert_eq!(list.body["totalElements"], 0);
    Ok(())
}

#[tokio::test]
async fn test_update_onto_another_topics_pair_is_rejected() -> Result<()> {
    let app = TestApp::spawn().await?;
    let token = app.login().await?;

    for n in 1..=7 {
        let res = app
            .create_topic(&token, &format!("Tópico {}", n), &format!("Mensagem {}", n), "Rust")
            .await?;
        assert_eq!(res.body["id"], n);
    }

    let clash = app
        .request(
            Method::PUT,
            "/topicos/5",
            Some(&token),
            Some(json!({ "titulo": "Tópico 7", "mensagem": "Mensagem 7" })),
        )
        .await?;
    assert_eq!(clash.status, StatusCode::BAD_REQUEST);
    assert_eq!(clash.body["code"], "DUPLICATE_TOPIC");

    let unchanged = app.request(Method::GET, "/topicos/5", Some(&token), None).await?;
    assert_eq!(unchanged.body["titulo"], "Tópico 5");

    // Re-submitting its own pair is not a conflict
    let own = app
        .request(
            Method::PUT,
            "/topicos/5",
            Some(&token),
            Some(json!({ "titulo": "Tópico 5", "mensagem": "Mensagem 5", "curso": "Go" })),
        )
        .await?;
    assert_eq!(own.status, StatusCode::OK);
    assert_eq!(own.body["curso"], "Go");
    Ok(())
}

#[tokio::test]
async fn test_partial_update_keeps_absent_fields() -> Result<()> {
    let app = TestApp::spawn().await?;
    let token = app.login().await?;

    let created = app.create_topic(&token, "Dúvida", "Como usar JPA?", "Spring").await?;
    let location = created.headers[header::LOCATION].to_str()?.to_string();

    let res = app
        .request(Method::PUT, &location, Some(&token), Some(json!({ "status": "SOLUCIONADO" })))
        .await?;

    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["status"], "SOLUCIONADO");
    assert_eq!(res.body["titulo"], "Dúvida");
    assert_eq!(res.body["mensagem"], "Como usar JPA?");
    assert_eq!(res.body["dataCriacao"], created.body["dataCriacao"]);
    Ok(())
}

#[tokio::test]
async fn test_update_with_blank_titulo_is_bad_request() -> Result<()> {
    let app = TestApp::spawn().await?;
    let token = app.login().await?;
    app.create_topic(&token, "Dúvida", "Como usar JPA?", "Spring").await?;

    let res = app
        .request(Method::PUT, "/topicos/1", Some(&token), Some(json!({ "titulo": "  " })))
        .await?;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert!(res.body["field_errors"].get("titulo").is_some());
    Ok(())
}

#[tokio::test]
async fn test_missing_topic_is_not_found() -> Result<()> {
    let app = TestApp::spawn().await?;
    let token = app.login().await?;

    let get = app.request(Method::GET, "/topicos/999", Some(&token), None).await?;
    assert_eq!(get.status, StatusCode::NOT_FOUND);
    assert_eq!(get.body["code"], "NOT_FOUND");

    let put = app
        .request(Method::PUT, "/topicos/999", Some(&token), Some(json!({ "curso": "Go" })))
        .await?;
    assert_eq!(put.status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn test_non_numeric_id_is_bad_request() -> Result<()> {
    let app = TestApp::spawn().await?;
    let token = app.login().await?;

    let res = app.request(Method::GET, "/topicos/abc", Some(&token), None).await?;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn test_delete_then_second_delete_is_not_found() -> Result<()> {
    let app = TestApp::spawn().await?;
    let token = app.login().await?;
    app.create_topic(&token, "Dúvida", "Como usar JPA?", "Spring").await?;

    let first = app.request(Method::DELETE, "/topicos/1", Some(&token), None).await?;
    assert_eq!(first.status, StatusCode::NO_CONTENT);
    assert!(first.body.is_null());

    let get = app.request(Method::GET, "/topicos/1", Some(&token), None).await?;
    assert_eq!(get.status, StatusCode::NOT_FOUND);

    let second = app.request(Method::DELETE, "/topicos/1", Some(&token), None).await?;
    assert_eq!(second.status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn test_long_bodies_are_stored_and_long_titles_rejected() -> Result<()> {
    let app = TestApp::spawn().await?;
    let token = app.login().await?;

    let body: String = (0..4000).map(|i| char::from(b'a' + (i * 7 % 26) as u8)).collect();
    let created = app.create_topic(&token, "Stack trace", &body, "Rust").await?;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.body["mensagem"].as_str().map(str::len), Some(4000));

    let long_title = app.create_topic(&token, &"t".repeat(300), "Mensagem", "Rust").await?;
    assert_eq!(long_title.status, StatusCode::BAD_REQUEST);
    assert_eq!(long_title.body["code"], "VALIDATION_ERROR");
    assert!(long_title.body["field_errors"].get("titulo").is_some());

    let long_course = app
        .request(
            Method::PUT,
            "/topicos/1",
            Some(&token),
            Some(json!({ "curso": "c".repeat(101) })),
        )
        .await?;
    assert_eq!(long_course.status, StatusCode::BAD_REQUEST);
    assert!(long_course.body["field_errors"].get("curso").is_some());
    Ok(())
}
