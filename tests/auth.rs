mod common;

use serde_json::json;

#[tokio::test]
async fn register_sets_cookie_and_returns_user() {
    let app = common::spawn_app().await;

    let response = app
        .post_json("/api/register", &json!({"username": "ada", "password": "correct horse"}))
        .await;
    assert_eq!(response.status().as_u16(), 201);

    let set_cookie = response
        .headers()
        .get(reqwest::header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(set_cookie.contains("HttpOnly"));
    assert!(set_cookie.contains("SameSite=Lax"));
    assert!(set_cookie.contains("Path=/"));

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["username"], "ada");
    assert_eq!(body["isPro"], false);
    assert!(body.get("password").is_none());
    assert!(body.get("item").is_none());
}

#[tokio::test]
async fn register_rejects_invalid_and_duplicate_users() {
    let app = common::spawn_app().await;
    app.register("ada", "correct horse").await;

    for body in [
        json!({"username": "ada", "password": "another password"}),
        json!({"username": "x", "password": "correct horse"}),
        json!({"username": "bob", "password": "short"}),
        json!({"username": "bob"}),
    ] {
        let response = app.post_json("/api/register", &body).await;
        assert_eq!(response.status().as_u16(), 400, "{body}");
    }
}

#[tokio::test]
async fn login_and_current_user() {
    let app = common::spawn_app().await;
    app.register("ada", "correct horse").await;

    let bad = app
        .post_json("/api/login", &json!({"username": "ada", "password": "wrong password"}))
        .await;
    assert_eq!(bad.status().as_u16(), 401);

    let good = app
        .post_json("/api/login", &json!({"username": "ada", "password": "correct horse"}))
        .await;
    assert_eq!(good.status().as_u16(), 200);
    let cookie = common::session_cookie(&good).unwrap();
    let user: serde_json::Value = good.json().await.unwrap();
    assert_eq!(user["username"], "ada");

    let me: serde_json::Value = app
        .client
        .get(app.url("/api/user"))
        .header(reqwest::header::COOKIE, cookie)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(me["username"], "ada");
}

#[tokio::test]
async fn logout_ends_the_session() {
    let app = common::spawn_app().await;
    let cookie = app.register("ada", "correct horse").await;

    let response = app
        .client
        .post(app.url("/api/logout"))
        .header(reqwest::header::COOKIE, cookie.clone())
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);
    assert!(response
        .headers()
        .get_all(reqwest::header::SET_COOKIE)
        .iter()
        .any(|value| value.to_str().unwrap().starts_with("chatbridge_session=;")));
    assert!(response.text().await.unwrap().is_empty());

    let response = app
        .client
        .get(app.url("/api/user"))
        .header(reqwest::header::COOKIE, cookie)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 401);
}
