use uuid::Uuid;

use crate::integration::common::{insert_user, sample_listing, setup_test_db};

#[tokio::test]
async fn comments_are_listed_oldest_first() {
    let (db, _container) = setup_test_db().await;
    let author = insert_user(&db.user_repo(), "alice").await;
    let listing = db
        .listing_repo()
        .create(author.id, &sample_listing())
        .await
        .unwrap();
    let repo = db.comment_repo();

    let first = repo.create(listing.id, author.id, "first").await.unwrap();
    let second = repo.create(listing.id, author.id, "second").await.unwrap();
    let third = repo.create(listing.id, author.id, "third").await.unwrap();

    let comments = repo.list_for_listing(listing.id).await.unwrap();
    let ids: Vec<_> = comments.iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![first.id, second.id, third.id]);
    assert!(comments.iter().all(|c| c.listing_id == listing.id));

    assert!(repo.list_for_listing(Uuid::new_v4()).await.unwrap().is_empty());
}

#[tokio::test]
async fn update_and_delete_are_scoped_to_author() {
    let (db, _container) = setup_test_db().await;
    let users = db.user_repo();
    let author = insert_user(&users, "alice").await;
    let other = insert_user(&users, "bob").await;
    let listing = db
        .listing_repo()
        .create(author.id, &sample_listing())
        .await
        .unwrap();
    let repo = db.comment_repo();
    let comment = repo.create(listing.id, author.id, "hi").await.unwrap();

    assert!(repo.update(comment.id, other.id, "hijacked").await.unwrap().is_none());
    assert!(!repo.delete(comment.id, other.id).await.unwrap());

    let edited = repo
        .update(comment.id, author.id, "hello")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(edited.content, "hello");
    assert_eq!(edited.created_at, comment.created_at);

    assert!(repo.delete(comment.id, author.id).await.unwrap());
    assert!(repo.get(comment.id).await.unwrap().is_none());
}

#[tokio::test]
async fn deleting_listing_removes_its_comments() {
    let (db, _container) = setup_test_db().await;
    let author = insert_user(&db.user_repo(), "alice").await;
    let listings = db.listing_repo();
    let listing = listings.create(author.id, &sample_listing()).await.unwrap();
    let repo = db.comment_repo();
    let comment = repo.create(listing.id, author.id, "hi").await.unwrap();

    assert!(listings.delete(listing.id, author.id).await.unwrap());
    assert!(repo.get(comment.id).await.unwrap().is_none());
}
