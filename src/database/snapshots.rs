use anyhow::{Context, Result};
use chrono::NaiveDate;
use rusqlite::params;
use rusqlite::types::ValueRef;

use super::connection::DbConn;
use super::models::HistoryPoint;
use crate::domain::{parse_rating, PlayerRatingSnapshot, RatingCategory};
use crate::errors::storage_context;

/// Store a snapshot, replacing any row already stored for that player and day
pub fn replace_snapshot(conn: &mut DbConn, snapshot: &PlayerRatingSnapshot) -> Result<()> {
    let tx = conn
        .transaction()
        .with_context(|| storage_context("begin", &snapshot.nickname))?;

    tx.execute(
        "DELETE FROM rating WHERE Name = ?1 AND Date = ?2",
        params![snapshot.nickname, snapshot.date],
    )
    .with_context(|| storage_context("clear", &snapshot.nickname))?;

    tx.execute(
        "INSERT INTO rating (Name, Bullet, Blitz, Rapid, Date) VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            snapshot.nickname,
            snapshot.bullet,
            snapshot.blitz,
            snapshot.rapid,
            snapshot.date
        ],
    )
    .with_context(|| storage_context("insert", &snapshot.nickname))?;

    tx.commit()
        .with_context(|| storage_context("commit", &snapshot.nickname))
}

/// All snapshots stored for one day
pub fn list_for_date(conn: &mut DbConn, date: NaiveDate) -> Result<Vec<PlayerRatingSnapshot>> {
    let sql = "SELECT Name, Bullet, Blitz, Rapid, Date FROM rating WHERE Date = ?1 ORDER BY Name";

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map(params![date], parse_snapshot_row)?
        .collect::<rusqlite::Result<Vec<_>>>()
        .with_context(|| storage_context("list", &date.to_string()))?;

    Ok(rows)
}

/// Dated values of one rating category for a player, oldest first
pub fn list_history(
    conn: &mut DbConn,
    name: &str,
    category: RatingCategory,
) -> Result<Vec<HistoryPoint>> {
    // column comes from the closed RatingCategory set, never from user text
    let sql = format!(
        "SELECT Date, {} FROM rating WHERE Name = ?1 ORDER BY Date ASC",
        category.column()
    );

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(params![name], parse_history_row)?
        .collect::<rusqlite::Result<Vec<_>>>()
        .with_context(|| storage_context("read history", name))?;

    Ok(rows)
}

fn parse_snapshot_row(row: &rusqlite::Row) -> rusqlite::Result<PlayerRatingSnapshot> {
    Ok(PlayerRatingSnapshot {
        nickname: row.get(0)?,
        bullet: read_rating(row, 1)?,
        blitz: read_rating(row, 2)?,
        rapid: read_rating(row, 3)?,
        date: row.get(4)?,
    })
}

fn parse_history_row(row: &rusqlite::Row) -> rusqlite::Result<HistoryPoint> {
    Ok(HistoryPoint {
        date: row.get(0)?,
        rating: read_rating(row, 1)?,
    })
}

/// Rating cells may hold integers, NULL, or text such as "None" from older writers
fn read_rating(row: &rusqlite::Row, idx: usize) -> rusqlite::Result<Option<u32>> {
    let value = match row.get_ref(idx)? {
        ValueRef::Integer(v) => u32::try_from(v).ok(),
        ValueRef::Text(bytes) => std::str::from_utf8(bytes).ok().and_then(parse_rating),
        _ => None,
    };
    Ok(value)
}
