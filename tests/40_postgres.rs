//! Store checks against a live Postgres. Skipped unless DATABASE_URL is set.

use anyhow::Result;
use game_vault_api::config::AppConfig;
use game_vault_api::database::{GameChanges, GameStore, NewGame, PgStore, UserStore};
use uuid::Uuid;

/// Connect and prepare the schema, or `None` when no database is configured.
async fn connect() -> Result<Option<(PgStore, sqlx::PgPool)>> {
    let Ok(url) = std::env::var("DATABASE_URL") else {
        eprintln!("DATABASE_URL not set; skipping Postgres store test");
        return Ok(None);
    };

    let config = AppConfig::from_env();
    let store = PgStore::connect(&config.database).await?;
    store.ensure_schema().await?;
    // Running twice must be harmless
    store.ensure_schema().await?;

    let pool = sqlx::PgPool::connect(&url).await?;
    Ok(Some((store, pool)))
}

fn unique(prefix: &str) -> String {
    format!("{}-{}", prefix, Uuid::new_v4().simple())
}

#[tokio::test]
async fn insert_list_and_partial_update() -> Result<()> {
    let Some((store, _pool)) = connect().await? else {
        return Ok(());
    };

    let title = unique("Chrono Trigger");
    let created = store
        .insert_game(NewGame {
            title: title.clone(),
            genre: "RPG".to_string(),
        })
        .await?;
    assert_eq!(created.title, title);
    assert_eq!(created.genre, "RPG");

    let listed = store.list_games().await?;
    assert!(listed.contains(&created));

    let updated = store
        .update_game(
            created.id,
            GameChanges {
                title: None,
                genre: Some("Action RPG".to_string()),
            },
        )
        .await?
        .expect("existing game should be updated");
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.title, title);
    assert_eq!(updated.genre, "Action RPG");

    // Same values again still counts as a match
    let unchanged = store
        .update_game(
            created.id,
            GameChanges {
                title: Some(title.clone()),
                genre: Some("Action RPG".to_string()),
            },
        )
        .await?;
    assert_eq!(unchanged, Some(updated));

    assert_eq!(store.delete_game(created.id).await?, 1);
    assert!(!store.list_games().await?.iter().any(|g| g.id == created.id));
    Ok(())
}

#[tokio::test]
async fn unknown_ids_affect_nothing() -> Result<()> {
    let Some((store, _pool)) = connect().await? else {
        return Ok(());
    };

    let kept = store
        .insert_game(NewGame {
            title: unique("Tetris"),
            genre: "Puzzle".to_string(),
        })
        .await?;
    let missing = Uuid::new_v4();

    let updated = store
        .update_game(
            missing,
            GameChanges {
                title: Some("Nope".to_string()),
                genre: None,
            },
        )
        .await?;
    assert!(updated.is_none());
    assert_eq!(store.delete_game(missing).await?, 0);

    let listed = store.list_games().await?;
    assert!(listed.contains(&kept));

    store.delete_game(kept.id).await?;
    Ok(())
}

#[tokio::test]
async fn find_user_is_exact_and_case_sensitive() -> Result<()> {
    let Some((store, pool)) = connect().await? else {
        return Ok(());
    };

    let username = unique("alice");
    sqlx::query("INSERT INTO users (username, password, role) VALUES ($1, $2, $3)")
        .bind(&username)
        .bind("$argon2id$placeholder")
        .bind("admin")
        .execute(&pool)
        .await?;

    let user = store
        .find_user(&username)
        .await?
        .expect("inserted user should be found");
    assert_eq!(user.username, username);
    assert_eq!(user.role, "admin");

    assert!(store.find_user(&username.to_uppercase()).await?.is_none());
    assert!(store.find_user(&unique("nobody")).await?.is_none());

    sqlx::query("DELETE FROM users WHERE username = $1")
        .bind(&username)
        .execute(&pool)
        .await?;
    Ok(())
}
