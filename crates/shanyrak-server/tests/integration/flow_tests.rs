use axum::http::StatusCode;
use uuid::Uuid;

use crate::integration::common::{
    empty_request, json_request, sample_shanyrak, setup_test_app,
};

#[tokio::test]
async fn register_list_comment_and_guard_deletion() {
    let app = setup_test_app().await;

    let alice_id = app.register("alice", "s3cret").await;
    let alice = app.login("alice", "s3cret").await;

    let shanyrak_id = app.create_shanyrak(&alice, &sample_shanyrak()).await;

    let (status, json) = app
        .send(empty_request("GET", &format!("/shanyraks/{shanyrak_id}"), None))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["id"], shanyrak_id);
    assert_eq!(json["type"], "house");
    assert_eq!(json["price"], 100000);
    assert_eq!(json["address"], "x");
    assert_eq!(json["area"], 50.0);
    assert_eq!(json["rooms_count"], 3);
    assert!(json["description"].is_null());
    assert_eq!(json["user_id"], alice_id);

    let comments_uri = format!("/shanyraks/{shanyrak_id}/comments");
    let (status, json) = app
        .send(json_request(
            "POST",
            &comments_uri,
            Some(&alice),
            &serde_json::json!({"content": "hi"}),
        ))
        .await;
    assert_eq!(status, StatusCode::OK);
    let comment_id = json["id"].as_str().unwrap().to_string();

    let (status, json) = app.send(empty_request("GET", &comments_uri, None)).await;
    assert_eq!(status, StatusCode::OK);
    let comments = json["comments"].as_array().unwrap();
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0]["content"], "hi");
    assert_eq!(comments[0]["author_id"], alice_id);

    let bob = app.signup("bob").await;
    let (status, json) = app
        .send(empty_request(
            "DELETE",
            &format!("{comments_uri}/{comment_id}"),
            Some(&bob),
        ))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["error"], "unauthorized");

    let (_, json) = app.send(empty_request("GET", &comments_uri, None)).await;
    assert_eq!(json["comments"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn owner_edits_and_deletes_shanyrak() {
    let app = setup_test_app().await;
    let alice = app.signup("alice").await;
    let bob = app.signup("bob").await;
    let id = app.create_shanyrak(&alice, &sample_shanyrak()).await;
    let uri = format!("/shanyraks/{id}");

    let (status, _) = app
        .send(json_request(
            "PATCH",
            &uri,
            Some(&bob),
            &serde_json::json!({"price": 1}),
        ))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, json) = app
        .send(json_request(
            "PATCH",
            &uri,
            Some(&alice),
            &serde_json::json!({"price": 120000, "description": "renovated"}),
        ))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["message"], "Shanyrak updated successfully");

    let (_, json) = app.send(empty_request("GET", &uri, None)).await;
    assert_eq!(json["price"], 120000);
    assert_eq!(json["description"], "renovated");
    assert_eq!(json["address"], "x");
    assert_eq!(json["rooms_count"], 3);

    let comments_uri = format!("{uri}/comments");
    app.send(json_request(
        "POST",
        &comments_uri,
        Some(&bob),
        &serde_json::json!({"content": "still available?"}),
    ))
    .await;

    let (status, _) = app.send(empty_request("DELETE", &uri, Some(&bob))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, json) = app.send(empty_request("DELETE", &uri, Some(&alice))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["message"], "Shanyrak deleted successfully");

    let (status, _) = app.send(empty_request("GET", &uri, None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = app.send(empty_request("GET", &comments_uri, None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn author_edits_and_deletes_comment() {
    let app = setup_test_app().await;
    let alice = app.signup("alice").await;
    let bob = app.signup("bob").await;
    let id = app.create_shanyrak(&alice, &sample_shanyrak()).await;
    let comments_uri = format!("/shanyraks/{id}/comments");

    let (_, json) = app
        .send(json_request(
            "POST",
            &comments_uri,
            Some(&bob),
            &serde_json::json!({"content": "first"}),
        ))
        .await;
    let comment_uri = format!("{comments_uri}/{}", json["id"].as_str().unwrap());

    let (status, _) = app
        .send(json_request(
            "PATCH",
            &comment_uri,
            Some(&alice),
            &serde_json::json!({"content": "hijacked"}),
        ))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, json) = app
        .send(json_request(
            "PATCH",
            &comment_uri,
            Some(&bob),
            &serde_json::json!({"content": "edited"}),
        ))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["message"], "Comment updated successfully");

    let (_, json) = app.send(empty_request("GET", &comments_uri, None)).await;
    assert_eq!(json["comments"][0]["content"], "edited");

    // Same comment id under a different listing does not resolve.
    let other = app.create_shanyrak(&alice, &sample_shanyrak()).await;
    let comment_id = comment_uri.rsplit('/').next().unwrap();
    let (status, _) = app
        .send(empty_request(
            "DELETE",
            &format!("/shanyraks/{other}/comments/{comment_id}"),
            Some(&bob),
        ))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, json) = app
        .send(empty_request("DELETE", &comment_uri, Some(&bob)))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["message"], "Comment deleted successfully");

    let (_, json) = app.send(empty_request("GET", &comments_uri, None)).await;
    assert!(json["comments"].as_array().unwrap().is_empty());

    let (status, _) = app
        .send(empty_request(
            "DELETE",
            &format!("{comments_uri}/{}", Uuid::new_v4()),
            Some(&bob),
        ))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn comments_listed_in_creation_order() {
    let app = setup_test_app().await;
    let alice = app.signup("alice").await;
    let id = app.create_shanyrak(&alice, &sample_shanyrak()).await;
    let comments_uri = format!("/shanyraks/{id}/comments");

    for content in ["one", "two", "three"] {
        let (status, _) = app
            .send(json_request(
                "POST",
                &comments_uri,
                Some(&alice),
                &serde_json::json!({"content": content}),
            ))
            .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (_, json) = app.send(empty_request("GET", &comments_uri, None)).await;
    let contents: Vec<_> = json["comments"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["content"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(contents, ["one", "two", "three"]);
}
