//! SQLite character store and inventory
//!
//! Characters are stored one row per character with a `version` column;
//! granted items go to `item_grants`. `save` runs the conditional UPDATE and
//! the item inserts in one transaction, so a ledger transition and its items
//! are either fully visible or not at all.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use crate::application::ports::outbound::{
    CharacterRepositoryPort, InventoryError, InventoryPort, RepoError,
};
use crate::domain::entities::Character;
use crate::domain::value_objects::{AccountId, CharacterId, ItemGrant, ItemKind, MinigameKind};

const CHARACTER_COLUMNS: &str = "id, account_id, level, experience, hp, attack, defense, gold, \
     fatigue, last_fatigue_reset, minigame_play_counts, version, created_at";

pub struct SqliteCharacterRepository {
    pool: SqlitePool,
}

impl SqliteCharacterRepository {
    pub async fn new(pool: SqlitePool) -> Result<Self, sqlx::Error> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS characters (
                id TEXT PRIMARY KEY,
                account_id TEXT NOT NULL UNIQUE,
                level INTEGER NOT NULL,
                experience INTEGER NOT NULL,
                hp INTEGER NOT NULL,
                attack INTEGER NOT NULL,
                defense INTEGER NOT NULL,
                gold INTEGER NOT NULL CHECK (gold >= 0),
                fatigue INTEGER NOT NULL CHECK (fatigue BETWEEN 0 AND 100),
                last_fatigue_reset TIMESTAMP NOT NULL,
                minigame_play_counts TEXT NOT NULL DEFAULT '{}',
                version INTEGER NOT NULL DEFAULT 0,
                created_at TIMESTAMP NOT NULL
            )
        "#,
        )
        .execute(&pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS item_grants (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                character_id TEXT NOT NULL,
                kind TEXT NOT NULL,
                level INTEGER NOT NULL,
                granted_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
            )
        "#,
        )
        .execute(&pool)
        .await?;

        Ok(Self { pool })
    }

    async fn fetch_one_where(
        &self,
        column: &str,
        value: String,
    ) -> Result<Option<Character>, RepoError> {
        let sql = format!("SELECT {CHARACTER_COLUMNS} FROM characters WHERE {column} = ?");
        let row = sqlx::query(&sql)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(unavailable)?;

        row.map(|r| row_to_character(&r)).transpose()
    }
}

#[async_trait]
impl CharacterRepositoryPort for SqliteCharacterRepository {
    async fn create(&self, character: &Character) -> Result<(), RepoError> {
        let play_counts = play_counts_to_json(&character.minigame_play_counts)?;
        let sql = format!(
            "INSERT INTO characters ({CHARACTER_COLUMNS}) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"
        );

        let result = sqlx::query(&sql)
            .bind(character.id.to_string())
            .bind(character.account_id.to_string())
            .bind(i64::from(character.level))
            .bind(to_db(character.experience, "experience")?)
            .bind(i64::from(character.hp))
            .bind(i64::from(character.attack))
            .bind(i64::from(character.defense))
            .bind(to_db(character.gold, "gold")?)
            .bind(i64::from(character.fatigue))
            .bind(character.last_fatigue_reset)
            .bind(play_counts)
            .bind(to_db(character.version, "version")?)
            .bind(character.created_at)
            .execute(&self.pool)
            .await;

        match result {
            Ok(_) => {
                tracing::debug!(character_id = %character.id, "Inserted character row");
                Ok(())
            }
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                Err(RepoError::AlreadyExists)
            }
            Err(e) => Err(unavailable(e)),
        }
    }

    async fn load(&self, id: CharacterId) -> Result<Option<Character>, RepoError> {
        self.fetch_one_where("id", id.to_string()).await
    }

    async fn load_by_account(&self, account_id: AccountId) -> Result<Option<Character>, RepoError> {
        self.fetch_one_where("account_id", account_id.to_string())
            .await
    }

    async fn save(
        &self,
        character: &Character,
        expected_version: u64,
        items: &[ItemGrant],
    ) -> Result<u64, RepoError> {
        let play_counts = play_counts_to_json(&character.minigame_play_counts)?;
        let mut tx = self.pool.begin().await.map_err(unavailable)?;

        let result = sqlx::query(
            r#"
            UPDATE characters SET
                level = ?, experience = ?, hp = ?, attack = ?, defense = ?,
                gold = ?, fatigue = ?, last_fatigue_reset = ?,
                minigame_play_counts = ?, version = version + 1
            WHERE id = ? AND version = ?
        "#,
        )
        .bind(i64::from(character.level))
        .bind(to_db(character.experience, "experience")?)
        .bind(i64::from(character.hp))
        .bind(i64::from(character.attack))
        .bind(i64::from(character.defense))
        .bind(to_db(character.gold, "gold")?)
        .bind(i64::from(character.fatigue))
        .bind(character.last_fatigue_reset)
        .bind(play_counts)
        .bind(character.id.to_string())
        .bind(to_db(expected_version, "version")?)
        .execute(&mut *tx)
        .await
        .map_err(unavailable)?;

        if result.rows_affected() == 1 {
            for item in items {
                sqlx::query("INSERT INTO item_grants (character_id, kind, level) VALUES (?, ?, ?)")
                    .bind(character.id.to_string())
                    .bind(item.kind.as_str())
                    .bind(i64::from(item.level))
                    .execute(&mut *tx)
                    .await
                    .map_err(unavailable)?;
            }
            tx.commit().await.map_err(unavailable)?;
            return Ok(expected_version + 1);
        }

        let exists: Option<i64> = sqlx::query_scalar("SELECT 1 FROM characters WHERE id = ?")
            .bind(character.id.to_string())
            .fetch_optional(&mut *tx)
            .await
            .map_err(unavailable)?;
        tx.rollback().await.map_err(unavailable)?;

        match exists {
            Some(_) => Err(RepoError::Conflict {
                id: character.id,
                expected: expected_version,
            }),
            None => Err(RepoError::NotFound),
        }
    }
}

/// Reads the `item_grants` table written by `SqliteCharacterRepository::save`
pub struct SqliteInventory {
    pool: SqlitePool,
}

impl SqliteInventory {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InventoryPort for SqliteInventory {
    async fn list_items(&self, character_id: CharacterId) -> Result<Vec<ItemGrant>, InventoryError> {
        let rows: Vec<(String, i64)> =
            sqlx::query_as("SELECT kind, level FROM item_grants WHERE character_id = ? ORDER BY id")
                .bind(character_id.to_string())
                .fetch_all(&self.pool)
                .await
                .map_err(inventory_unavailable)?;

        rows.into_iter()
            .map(|(kind, level)| {
                let kind: ItemKind = kind.parse().map_err(InventoryError::Unavailable)?;
                let level = u32::try_from(level)
                    .map_err(|_| InventoryError::Unavailable(format!("Bad item level {level}")))?;
                Ok(ItemGrant { kind, level })
            })
            .collect()
    }
}

fn row_to_character(row: &SqliteRow) -> Result<Character, RepoError> {
    let id: String = row.try_get("id").map_err(unavailable)?;
    let account_id: String = row.try_get("account_id").map_err(unavailable)?;
    let play_counts: String = row.try_get("minigame_play_counts").map_err(unavailable)?;
    let last_fatigue_reset: DateTime<Utc> =
        row.try_get("last_fatigue_reset").map_err(unavailable)?;
    let created_at: DateTime<Utc> = row.try_get("created_at").map_err(unavailable)?;

    Ok(Character {
        id: parse_id(&id)?,
        account_id: parse_id(&account_id)?,
        level: from_db(row, "level")?,
        experience: from_db(row, "experience")?,
        hp: from_db(row, "hp")?,
        attack: from_db(row, "attack")?,
        defense: from_db(row, "defense")?,
        gold: from_db(row, "gold")?,
        fatigue: from_db(row, "fatigue")?,
        last_fatigue_reset,
        minigame_play_counts: serde_json::from_str(&play_counts)
            .map_err(|e| RepoError::Unavailable(format!("Corrupt play counts: {e}")))?,
        version: from_db(row, "version")?,
        created_at,
    })
}

fn play_counts_to_json(counts: &BTreeMap<MinigameKind, u64>) -> Result<String, RepoError> {
    serde_json::to_string(counts)
        .map_err(|e| RepoError::Unavailable(format!("Failed to encode play counts: {e}")))
}

fn parse_id<T>(value: &str) -> Result<T, RepoError>
where
    T: std::str::FromStr<Err = uuid::Error>,
{
    value
        .parse()
        .map_err(|e| RepoError::Unavailable(format!("Corrupt id {value}: {e}")))
}

fn to_db(value: u64, column: &str) -> Result<i64, RepoError> {
    i64::try_from(value)
        .map_err(|_| RepoError::Unavailable(format!("{column} out of range: {value}")))
}

fn from_db<T: TryFrom<i64>>(row: &SqliteRow, column: &str) -> Result<T, RepoError> {
    let value: i64 = row.try_get(column).map_err(unavailable)?;
    T::try_from(value)
        .map_err(|_| RepoError::Unavailable(format!("{column} out of range: {value}")))
}

fn unavailable(e: sqlx::Error) -> RepoError {
    RepoError::Unavailable(e.to_string())
}

fn inventory_unavailable(e: sqlx::Error) -> InventoryError {
    InventoryError::Unavailable(e.to_string())
}
