//! Database pool construction and the startup migration runner.
//!
//! Migrations are plain SQL files under `migrations/`, embedded in the binary
//! and applied in filename order. Each applied file is recorded in a
//! `migrations` table (name unique, applied timestamp) so re-runs skip it.

use sqlx::postgres::PgPoolOptions;
use sqlx::{Executor, PgPool};

use crate::config::Config;

/// Ordered migration files. New migrations are appended here and under
/// `migrations/`; never reorder or edit applied ones.
const MIGRATIONS: &[(&str, &str)] = &[
    (
        "0001_create_users.sql",
        include_str!("../migrations/0001_create_users.sql"),
    ),
    (
        "0002_create_projects.sql",
        include_str!("../migrations/0002_create_projects.sql"),
    ),
    (
        "0003_create_user_projects.sql",
        include_str!("../migrations/0003_create_user_projects.sql"),
    ),
    (
        "0004_create_tasks.sql",
        include_str!("../migrations/0004_create_tasks.sql"),
    ),
];

pub async fn connect(config: &Config) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .connect(&config.database_url())
        .await
}

/// Applies any migration files not yet recorded in the `migrations` table.
/// Each file runs in its own transaction together with the bookkeeping row.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::Error> {
    pool.execute(
        "CREATE TABLE IF NOT EXISTS migrations (
            id SERIAL PRIMARY KEY,
            name VARCHAR(255) NOT NULL UNIQUE,
            applied_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )",
    )
    .await?;

    let applied: Vec<String> = sqlx::query_scalar("SELECT name FROM migrations")
        .fetch_all(pool)
        .await?;

    for (name, sql) in MIGRATIONS {
        if applied.iter().any(|a| a == name) {
            continue;
        }

        let mut tx = pool.begin().await?;
        (&mut *tx).execute(*sql).await?;
        sqlx::query("INSERT INTO migrations (name) VALUES ($1)")
            .bind(name)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        log::info!("applied migration: {}", name);
    }

    Ok(())
}
