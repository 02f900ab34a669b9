// crates/cheetah-core/src/command.rs - Command Store
//
// CRUD and filtered reads over the `commands` table of the active sheet.
// Every method checks for an active sheet before it validates its input, so
// a call without a sheet always reports `NoSheetSelected` rather than a
// usage error. The I/O then runs inside a single `SessionManager::with_session`
// scope, which applies the same gate for callers that use it directly.

use indexmap::IndexMap;
use rusqlite::types::ToSql;
use rusqlite::{Connection, OptionalExtension, Row, params, params_from_iter};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use tracing::debug;

use crate::error::{StoreError, StoreResult, single_token};
use crate::session::SessionManager;
use crate::tag;

/// Store-assigned command identifier
pub type CommandId = i64;

const SELECT_COMMAND: &str = r#"SELECT c.id, c.tool, c.args, c."desc" FROM commands c"#;

/// A stored shell invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Command {
    pub id: CommandId,
    pub tool: String,
    pub args: String,
    pub desc: String,
}

impl Command {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            tool: row.get(1)?,
            args: row.get(2)?,
            desc: row.get(3)?,
        })
    }

    /// The runnable command line: tool followed by its arguments
    pub fn command_line(&self) -> String {
        if self.args.is_empty() {
            self.tool.clone()
        } else {
            format!("{} {}", self.tool, self.args)
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} # {} {} -> {}", self.id, self.tool, self.args, self.desc)
    }
}

/// A command together with its tag texts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandWithTags {
    #[serde(flatten)]
    pub command: Command,
    pub tags: Vec<String>,
}

/// Input for [`CommandStore::insert`]
///
/// The tool is validated on construction and is always part of the tag set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCommand {
    tool: String,
    args: String,
    desc: String,
    tags: BTreeSet<String>,
}

impl NewCommand {
    pub fn new(tool: &str, args: &str, desc: &str) -> StoreResult<Self> {
        if tool.trim().is_empty() {
            return Err(StoreError::EmptyTool);
        }
        let tool = single_token("tool", tool)?;

        let mut tags = BTreeSet::new();
        tags.insert(tool.clone());

        Ok(Self {
            tool,
            args: args.trim().to_string(),
            desc: desc.trim().to_string(),
            tags,
        })
    }

    /// Add tags; each entry may hold several whitespace-separated tags
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for entry in tags {
            self.tags
                .extend(entry.as_ref().split_whitespace().map(str::to_string));
        }
        self
    }

    pub fn tool(&self) -> &str {
        &self.tool
    }

    pub fn args(&self) -> &str {
        &self.args
    }

    pub fn desc(&self) -> &str {
        &self.desc
    }

    /// Tags to attach, including the tool itself
    pub fn tags(&self) -> &BTreeSet<String> {
        &self.tags
    }
}

/// Partial update of a command; `None` leaves a field untouched
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandUpdate {
    pub tool: Option<String>,
    pub args: Option<String>,
    pub desc: Option<String>,
}

impl CommandUpdate {
    pub fn is_empty(&self) -> bool {
        self.tool.is_none() && self.args.is_none() && self.desc.is_none()
    }
}

/// Result of [`CommandStore::get_by_tags`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TagMatches {
    /// Commands per matched tag, each list ordered by tool
    pub by_tag: IndexMap<String, Vec<Command>>,

    /// Requested tags with no commands
    pub not_found: BTreeSet<String>,
}

/// Command operations scoped to the active sheet
pub struct CommandStore<'s> {
    session: &'s SessionManager,
}

impl<'s> CommandStore<'s> {
    pub(crate) fn new(session: &'s SessionManager) -> Self {
        Self { session }
    }

    /// Insert a command and attach its tags in one transaction
    pub fn insert(&self, command: &NewCommand) -> StoreResult<CommandId> {
        self.session.require_active()?;

        self.session.with_session(|conn| {
            let tx = conn.transaction()?;
            tx.execute(
                r#"INSERT INTO commands (tool, args, "desc") VALUES (?1, ?2, ?3)"#,
                params![command.tool, command.args, command.desc],
            )?;
            let id = tx.last_insert_rowid();
            tag::attach_in(&tx, id, command.tags.iter().map(String::as_str))?;
            tx.commit()?;

            debug!(id, tool = %command.tool, tags = command.tags.len(), "inserted command");
            Ok(id)
        })
    }

    /// Look up one command; an unknown id yields `None`
    pub fn get_by_id(&self, id: CommandId) -> StoreResult<Option<Command>> {
        self.session.require_active()?;

        self.session.with_session(|conn| {
            let command = conn
                .query_row(
                    &format!("{SELECT_COMMAND} WHERE c.id = ?1"),
                    [id],
                    Command::from_row,
                )
                .optional()?;
            Ok(command)
        })
    }

    /// All commands ordered by tool
    pub fn get_all(&self) -> StoreResult<Vec<Command>> {
        self.session.require_active()?;

        self.session
            .with_session(|conn| query_commands(conn, &format!("{SELECT_COMMAND} ORDER BY c.tool, c.id"), []))
    }

    /// Commands whose tool is exactly `tool`
    pub fn get_by_tool(&self, tool: &str) -> StoreResult<Vec<Command>> {
        self.session.require_active()?;
        let tool = single_token("tool", tool)?;

        self.session.with_session(|conn| {
            query_commands(conn, &format!("{SELECT_COMMAND} WHERE c.tool = ?1"), [tool.as_str()])
        })
    }

    /// Commands grouped under each requested tag
    ///
    /// Tags with no commands are reported in [`TagMatches::not_found`]
    /// instead of being dropped.
    pub fn get_by_tags<I, S>(&self, tags: I) -> StoreResult<TagMatches>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.session.require_active()?;

        let requested: BTreeSet<String> = tags
            .into_iter()
            .flat_map(|t| {
                t.as_ref()
                    .split_whitespace()
                    .map(str::to_string)
                    .collect::<Vec<_>>()
            })
            .collect();
        if requested.is_empty() {
            return Ok(TagMatches::default());
        }

        self.session.with_session(|conn| {
            let placeholders = vec!["?"; requested.len()].join(", ");
            let sql = format!(
                r#"SELECT c.id, c.tool, c.args, c."desc", t.tag
                   FROM commands c
                   JOIN command_tags ct ON c.id = ct.command_id
                   JOIN tags t ON ct.tag_id = t.id
                   WHERE t.tag IN ({placeholders})
                   ORDER BY c.tool, c.id"#
            );

            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt.query_map(params_from_iter(requested.iter()), |row| {
                Ok((Command::from_row(row)?, row.get::<_, String>(4)?))
            })?;

            let mut matches = TagMatches {
                by_tag: IndexMap::new(),
                not_found: requested.clone(),
            };
            for row in rows {
                let (command, tag) = row?;
                matches.not_found.remove(&tag);
                matches.by_tag.entry(tag).or_default().push(command);
            }
            Ok(matches)
        })
    }

    /// Apply a partial update; returns the number of rows changed (0 or 1)
    ///
    /// Values are trimmed like in [`NewCommand::new`]; args and desc may be
    /// set to empty. An empty update is a no-op. A missing id changes nothing
    /// and returns 0.
    pub fn update(&self, id: CommandId, update: &CommandUpdate) -> StoreResult<usize> {
        self.session.require_active()?;
        if update.is_empty() {
            return Ok(0);
        }

        let tool = update
            .tool
            .as_deref()
            .map(|tool| {
                if tool.trim().is_empty() {
                    Err(StoreError::EmptyTool)
                } else {
                    single_token("tool", tool)
                }
            })
            .transpose()?;
        let args = update.args.as_deref().map(|args| args.trim().to_string());
        let desc = update.desc.as_deref().map(|desc| desc.trim().to_string());

        self.session.with_session(|conn| {
            let mut assignments = Vec::new();
            let mut values: Vec<&dyn ToSql> = Vec::new();
            if let Some(tool) = &tool {
                assignments.push("tool = ?");
                values.push(tool);
            }
            if let Some(args) = &args {
                assignments.push("args = ?");
                values.push(args);
            }
            if let Some(desc) = &desc {
                assignments.push(r#""desc" = ?"#);
                values.push(desc);
            }
            values.push(&id);

            let sql = format!("UPDATE commands SET {} WHERE id = ?", assignments.join(", "));
            let changed = conn.execute(&sql, values.as_slice())?;

            debug!(id, changed, "updated command");
            Ok(changed)
        })
    }

    /// Delete every matching id in one transaction
    ///
    /// Returns how many commands were actually removed; ids that do not exist
    /// are simply not counted. Tag associations go with their command.
    pub fn delete<I>(&self, ids: I) -> StoreResult<usize>
    where
        I: IntoIterator<Item = CommandId>,
    {
        self.session.require_active()?;

        let ids: BTreeSet<CommandId> = ids.into_iter().collect();
        if ids.is_empty() {
            return Ok(0);
        }

        self.session.with_session(|conn| {
            let tx = conn.transaction()?;
            let mut deleted = 0;
            {
                let mut stmt = tx.prepare_cached("DELETE FROM commands WHERE id = ?1")?;
                for id in &ids {
                    deleted += stmt.execute([id])?;
                }
            }
            tx.commit()?;

            debug!(requested = ids.len(), deleted, "deleted commands");
            Ok(deleted)
        })
    }

    /// Every command with its tags, ordered by tool
    pub fn export_all(&self) -> StoreResult<Vec<CommandWithTags>> {
        self.session.require_active()?;

        self.session.with_session(|conn| {
            let commands =
                query_commands(conn, &format!("{SELECT_COMMAND} ORDER BY c.tool, c.id"), [])?;

            commands
                .into_iter()
                .map(|command| {
                    let tags = tag::tags_of(conn, command.id)?
                        .into_iter()
                        .map(|tag| tag.text)
                        .collect();
                    Ok(CommandWithTags { command, tags })
                })
                .collect()
        })
    }
}

fn query_commands<P: rusqlite::Params>(
    conn: &Connection,
    sql: &str,
    params: P,
) -> StoreResult<Vec<Command>> {
    let mut stmt = conn.prepare(sql)?;
    let commands = stmt
        .query_map(params, Command::from_row)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(commands)
}
