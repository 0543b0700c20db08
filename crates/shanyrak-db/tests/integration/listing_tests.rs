use shanyrak_core::AppError;
use shanyrak_core::models::ListingChanges;
use shanyrak_core::patch::Patch;
use uuid::Uuid;

use crate::integration::common::{insert_user, sample_listing, setup_test_db};

#[tokio::test]
async fn create_and_get_listing() {
    let (db, _container) = setup_test_db().await;
    let owner = insert_user(&db.user_repo(), "alice").await;
    let repo = db.listing_repo();

    let listing = repo.create(owner.id, &sample_listing()).await.unwrap();
    assert_eq!(listing.owner_id, owner.id);
    assert_eq!(listing.kind, "rent");

    let fetched = repo.get(listing.id).await.unwrap().expect("listing exists");
    assert_eq!(fetched, listing);

    assert!(repo.get(Uuid::new_v4()).await.unwrap().is_none());
}

#[tokio::test]
async fn create_with_unknown_owner_is_not_found() {
    let (db, _container) = setup_test_db().await;
    let err = db
        .listing_repo()
        .create(Uuid::new_v4(), &sample_listing())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn partial_update_keeps_other_fields() {
    let (db, _container) = setup_test_db().await;
    let owner = insert_user(&db.user_repo(), "alice").await;
    let repo = db.listing_repo();
    let listing = repo.create(owner.id, &sample_listing()).await.unwrap();

    let updated = repo
        .update(
            listing.id,
            owner.id,
            &ListingChanges {
                price: Some(175_000),
                description: Patch::Clear,
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .unwrap();

    assert_eq!(updated.price, 175_000);
    assert_eq!(updated.description, None);
    assert_eq!(updated.address, listing.address);
    assert_eq!(updated.area, listing.area);
    assert_eq!(updated.rooms_count, listing.rooms_count);
}

#[tokio::test]
async fn update_and_delete_are_scoped_to_owner() {
    let (db, _container) = setup_test_db().await;
    let users = db.user_repo();
    let owner = insert_user(&users, "alice").await;
    let other = insert_user(&users, "bob").await;
    let repo = db.listing_repo();
    let listing = repo.create(owner.id, &sample_listing()).await.unwrap();

    let changes = ListingChanges {
        kind: Some("sale".into()),
        ..Default::default()
    };
    assert!(repo.update(listing.id, other.id, &changes).await.unwrap().is_none());
    assert!(!repo.delete(listing.id, other.id).await.unwrap());

    assert!(repo.delete(listing.id, owner.id).await.unwrap());
    assert!(repo.get(listing.id).await.unwrap().is_none());
}

#[tokio::test]
async fn negative_price_rejected_by_constraint() {
    let (db, _container) = setup_test_db().await;
    let owner = insert_user(&db.user_repo(), "alice").await;
    let mut listing = sample_listing();
    listing.price = -1;

    let err = db.listing_repo().create(owner.id, &listing).await.unwrap_err();
    assert!(matches!(err, AppError::ValidationError(_)));
}
