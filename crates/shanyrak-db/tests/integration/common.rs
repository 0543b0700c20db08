use shanyrak_core::models::{NewListing, NewUser, User};
use shanyrak_db::{Database, UserRepository};
use sqlx::postgres::PgPoolOptions;
use testcontainers::core::{ContainerPort, WaitFor};
use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerAsync, GenericImage, ImageExt};

/// Spins up a PostgreSQL container and returns a migrated database.
///
/// The `ContainerAsync` must be kept in scope for the test duration;
/// dropping it stops the container.
pub async fn setup_test_db() -> (Database, ContainerAsync<GenericImage>) {
    let container = GenericImage::new("postgres", "16")
        .with_exposed_port(ContainerPort::Tcp(5432))
        .with_wait_for(WaitFor::message_on_stderr(
            "database system is ready to accept connections",
        ))
        .with_env_var("POSTGRES_PASSWORD", "postgres")
        .with_env_var("POSTGRES_DB", "shanyrak_test")
        .start()
        .await
        .expect("Failed to start PostgreSQL container");

    let host = container.get_host().await.expect("Failed to get host");
    let port = container
        .get_host_port_ipv4(5432)
        .await
        .expect("Failed to get port");

    let connection_string = format!("postgresql://postgres:postgres@{host}:{port}/shanyrak_test");

    // The server restarts once after init, so the first attempts may fail.
    const MAX_RETRIES: u32 = 30;
    let mut retries = 0;
    let pool = loop {
        match PgPoolOptions::new()
            .max_connections(5)
            .connect(&connection_string)
            .await
        {
            Ok(pool) => break pool,
            Err(e) => {
                retries += 1;
                if retries >= MAX_RETRIES {
                    panic!("Failed to connect to database after {MAX_RETRIES} retries: {e}");
                }
                tokio::time::sleep(std::time::Duration::from_millis(100)).await;
            }
        }
    };

    let db = Database::from_pool(pool);
    db.migrate().await.expect("Failed to run migrations");
    (db, container)
}

pub async fn insert_user(repo: &UserRepository, username: &str) -> User {
    repo.create(&NewUser {
        username: username.into(),
        phone: "+7 700 000 0000".into(),
        password_hash: "$2b$04$not-a-real-hash".into(),
        name: None,
        city: None,
    })
    .await
    .expect("insert user")
}

pub fn sample_listing() -> NewListing {
    NewListing {
        kind: "rent".into(),
        price: 150_000,
        address: "Abay 10, Almaty".into(),
        area: 46.5,
        rooms_count: 2,
        description: Some("Near the metro".into()),
    }
}
