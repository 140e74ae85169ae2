use sqlx::{PgConnection, PgPool};

use gp_db::{
    models::{Game, NewGame},
    repositories::{games, sessions},
};

use crate::{catalog, error::ApiError};

/// Ensure a game row exists for (grade, game_id), materializing it from
/// the static catalog on first access.
///
/// The insert races on the (grade, game_id) unique index, so concurrent
/// first accesses converge on a single row; whoever loses the race simply
/// re-reads the winner's insert. Play counts are backfilled from sessions
/// recorded before the game was materialized.
pub async fn ensure_game(
    conn: &mut PgConnection,
    grade: &str,
    game_id: i32,
) -> Result<Game, ApiError> {
    if let Some(game) = games::find_by_key(&mut *conn, grade, game_id).await? {
        return Ok(game);
    }

    let entry = catalog::find(grade, game_id)
        .ok_or_else(|| ApiError::NotFound("Game not found".to_string()))?;

    let recorded_plays = sessions::count_for_game(&mut *conn, grade, game_id).await?;

    games::insert_if_absent(
        &mut *conn,
        &NewGame {
            grade,
            game_id,
            title: entry.title,
            description: entry.description,
            thumbnail_url: entry.thumbnail_url,
            play_url: entry.play_url,
            total_plays: recorded_plays,
        },
    )
    .await?;

    tracing::debug!(grade, game_id, "materialized game from catalog");

    games::find_by_key(&mut *conn, grade, game_id)
        .await?
        .ok_or_else(|| {
            ApiError::Internal(anyhow::anyhow!(
                "game {grade}/{game_id} missing after upsert"
            ))
        })
}

/// Seed every catalog game with zeroed counters. Fails if any games are
/// already materialized.
pub async fn seed_catalog(pool: &PgPool) -> Result<usize, ApiError> {
    let mut tx = pool.begin().await?;

    let existing = games::count_all(&mut *tx).await?;
    if existing > 0 {
        return Err(ApiError::Validation(
            "Games are already initialized in the database".to_string(),
        ));
    }

    for entry in catalog::GAMES {
        games::insert_if_absent(
            &mut *tx,
            &NewGame {
                grade: entry.grade,
                game_id: entry.id,
                title: entry.title,
                description: entry.description,
                thumbnail_url: entry.thumbnail_url,
                play_url: entry.play_url,
                total_plays: 0,
            },
        )
        .await?;
    }

    tx.commit().await?;

    Ok(catalog::GAMES.len())
}
