mod common;

#[tokio::test]
async fn session_is_created_on_first_read() {
    let app = common::spawn_app().await;

    let body = app.anonymous_session("tab-1").await;
    assert_eq!(body["sessionId"], "tab-1");
    assert_eq!(body["messageCount"], 0);
    assert_eq!(body["messageLimit"], 3);
    assert_eq!(body["messagesRemaining"], 3);
}

#[tokio::test]
async fn missing_or_oversized_session_id_is_400() {
    let app = common::spawn_app().await;

    let response = app
        .client
        .get(app.url("/api/anonymous/session"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 400);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Invalid session ID");

    let long = "a".repeat(129);
    let response = app.send_anonymous(&long, "hi", "gemini-free").await;
    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn unknown_session_is_404() {
    let app = common::spawn_app().await;
    common::mount_gemini_reply(&app.gemini, "hello").await;

    let response = app.send_anonymous("never-seen", "hi", "gemini-free").await;
    assert_eq!(response.status().as_u16(), 404);
    assert!(app.gemini.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn gemini_free_send_persists_both_messages() {
    let app = common::spawn_app().await;
    common::mount_gemini_reply(&app.gemini, "Hello there").await;
    app.anonymous_session("tab-1").await;

    let response = app.send_anonymous("tab-1", "hi", "gemini-free").await;
    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["content"], "Hello there");
    assert_eq!(body["sessionId"], "tab-1");
    assert!(body["userId"].is_null());

    let requests = app.gemini.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(
        requests[0].url.path(),
        "/v1beta/models/gemini-1.5-flash:generateContent"
    );
    assert!(requests[0].url.query().is_none());

    let list: serde_json::Value = app
        .client
        .get(app.url("/api/anonymous/messages"))
        .query(&[("sessionId", "tab-1")])
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let list = list.as_array().expect("bare message array");
    assert_eq!(list.len(), 2);
    assert_eq!(list[0]["role"], "user");
    assert_eq!(list[1]["role"], "assistant");

    let session = app.anonymous_session("tab-1").await;
    assert_eq!(session["messageCount"], 1);
    assert_eq!(session["messagesRemaining"], 2);
}

#[tokio::test]
async fn quota_blocks_at_the_ceiling() {
    let app = common::spawn_app().await;
    common::mount_gemini_reply(&app.gemini, "ok").await;
    app.anonymous_session("tab-1").await;

    for _ in 0..3 {
        let response = app.send_anonymous("tab-1", "hi", "gemini-pro").await;
        assert_eq!(response.status().as_u16(), 200);
    }

    let response = app.send_anonymous("tab-1", "one more", "gemini-pro").await;
    assert_eq!(response.status().as_u16(), 403);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Message limit reached");

    let session = app.anonymous_session("tab-1").await;
    assert_eq!(session["messageCount"], 3);
    assert_eq!(session["messagesRemaining"], 0);
    assert_eq!(app.gemini.received_requests().await.unwrap().len(), 3);
}

#[tokio::test]
async fn quota_limit_comes_from_configuration() {
    let app = common::spawn_app_with(|settings| settings.quota.anonymous_message_limit = 0).await;
    common::mount_gemini_reply(&app.gemini, "ok").await;

    assert_eq!(app.anonymous_session("tab-1").await["messageLimit"], 0);
    let response = app.send_anonymous("tab-1", "hi", "gemini-free").await;
    assert_eq!(response.status().as_u16(), 403);
}
