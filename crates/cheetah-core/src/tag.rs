// crates/cheetah-core/src/tag.rs - Tag Store
//
// Like the command store, each method checks for an active sheet before
// looking at its arguments.

use rusqlite::{Connection, OptionalExtension, params};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use crate::command::CommandId;
use crate::error::{StoreError, StoreResult};
use crate::session::SessionManager;

/// A label attachable to many commands
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: i64,
    pub text: String,
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.text)
    }
}

/// Tag operations scoped to the active sheet
pub struct TagStore<'s> {
    session: &'s SessionManager,
}

impl<'s> TagStore<'s> {
    pub(crate) fn new(session: &'s SessionManager) -> Self {
        Self { session }
    }

    /// Every tag in the sheet, ordered by text
    pub fn list_all(&self) -> StoreResult<Vec<Tag>> {
        self.session.require_active()?;

        self.session.with_session(|conn| {
            let mut stmt = conn.prepare("SELECT id, tag FROM tags ORDER BY tag")?;
            let tags = stmt
                .query_map([], |row| {
                    Ok(Tag {
                        id: row.get(0)?,
                        text: row.get(1)?,
                    })
                })?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(tags)
        })
    }

    /// Tags of one command, ordered by text; empty for unknown ids
    pub fn list_for_command(&self, id: CommandId) -> StoreResult<Vec<Tag>> {
        self.session.require_active()?;
        self.session.with_session(|conn| tags_of(conn, id))
    }

    /// Distinct tools across all commands, ascending
    pub fn list_distinct_tools(&self) -> StoreResult<Vec<String>> {
        self.session.require_active()?;

        self.session.with_session(|conn| {
            let mut stmt = conn.prepare("SELECT DISTINCT tool FROM commands ORDER BY tool")?;
            let tools = stmt
                .query_map([], |row| row.get(0))?
                .collect::<Result<Vec<String>, _>>()?;
            Ok(tools)
        })
    }

    /// Attach tags to a command, creating missing tags on the way
    ///
    /// Idempotent: existing tags and associations are left alone. Fails with
    /// [`StoreError::CommandNotFound`] if the command does not exist.
    pub fn attach<I, S>(&self, id: CommandId, tags: I) -> StoreResult<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.session.require_active()?;
        let tags = split_tags(tags);
        if tags.is_empty() {
            return Ok(());
        }

        self.session.with_session(|conn| {
            let tx = conn.transaction()?;
            if !command_exists(&tx, id)? {
                return Err(StoreError::CommandNotFound(id));
            }
            attach_in(&tx, id, tags.iter().map(String::as_str))?;
            tx.commit()?;
            Ok(())
        })
    }

    /// Remove tag associations from a command; returns how many were removed
    ///
    /// Tags that are unknown or not attached are ignored. The tags themselves
    /// stay in the sheet.
    pub fn detach<I, S>(&self, id: CommandId, tags: I) -> StoreResult<usize>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.session.require_active()?;
        let tags = split_tags(tags);
        if tags.is_empty() {
            return Ok(0);
        }

        self.session.with_session(|conn| {
            let tx = conn.transaction()?;
            let mut removed = 0;
            {
                let mut stmt = tx.prepare_cached(
                    "DELETE FROM command_tags
                     WHERE command_id = ?1
                       AND tag_id IN (SELECT id FROM tags WHERE tag = ?2)",
                )?;
                for tag in &tags {
                    removed += stmt.execute(params![id, tag])?;
                }
            }
            tx.commit()?;

            debug!(id, removed, "detached tags");
            Ok(removed)
        })
    }

    /// Delete tags that are attached to no command
    pub fn prune_orphans(&self) -> StoreResult<usize> {
        self.session.require_active()?;

        self.session.with_session(|conn| {
            let pruned = conn.execute(
                "DELETE FROM tags WHERE id NOT IN (SELECT DISTINCT tag_id FROM command_tags)",
                [],
            )?;
            debug!(pruned, "pruned orphan tags");
            Ok(pruned)
        })
    }
}

/// Insert-if-absent every tag, then link each to `id`
///
/// Runs on the caller's connection so it can share a transaction with the
/// command insert. Both statements are prepared once and reused per tag.
pub(crate) fn attach_in<'t>(
    conn: &Connection,
    id: CommandId,
    tags: impl IntoIterator<Item = &'t str>,
) -> StoreResult<()> {
    let mut insert_tag = conn.prepare_cached("INSERT OR IGNORE INTO tags (tag) VALUES (?1)")?;
    let mut link = conn.prepare_cached(
        "INSERT OR IGNORE INTO command_tags (command_id, tag_id)
         SELECT ?1, id FROM tags WHERE tag = ?2",
    )?;

    let mut linked = 0;
    for tag in tags {
        insert_tag.execute([tag])?;
        linked += link.execute(params![id, tag])?;
    }

    debug!(id, linked, "attached tags");
    Ok(())
}

pub(crate) fn tags_of(conn: &Connection, id: CommandId) -> StoreResult<Vec<Tag>> {
    let mut stmt = conn.prepare_cached(
        "SELECT t.id, t.tag
         FROM tags t
         JOIN command_tags ct ON t.id = ct.tag_id
         WHERE ct.command_id = ?1
         ORDER BY t.tag",
    )?;
    let tags = stmt
        .query_map([id], |row| {
            Ok(Tag {
                id: row.get(0)?,
                text: row.get(1)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(tags)
}

fn command_exists(conn: &Connection, id: CommandId) -> StoreResult<bool> {
    let found = conn
        .query_row("SELECT 1 FROM commands WHERE id = ?1", [id], |_| Ok(()))
        .optional()?;
    Ok(found.is_some())
}

fn split_tags<I, S>(tags: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out: Vec<String> = Vec::new();
    for entry in tags {
        for tag in entry.as_ref().split_whitespace() {
            if !out.iter().any(|seen| seen == tag) {
                out.push(tag.to_string());
            }
        }
    }
    out
}
