use anyhow::{bail, Result};
use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension};

use crate::model::{Comment, Priority, Project, Task, TaskStatus};
use crate::validate::{validate_date_range, validate_title};

fn project_exists(conn: &Connection, id: i64) -> Result<bool> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM projects WHERE id = ?1",
        [id],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}

fn require_project(conn: &Connection, id: i64) -> Result<()> {
    if !project_exists(conn, id)? {
        bail!("project {id} not found");
    }
    Ok(())
}

fn task_exists(conn: &Connection, id: i64) -> Result<bool> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM tasks WHERE id = ?1",
        [id],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}

fn require_task(conn: &Connection, id: i64) -> Result<()> {
    if !task_exists(conn, id)? {
        bail!("task {id} not found");
    }
    Ok(())
}

fn read_project_row(row: &rusqlite::Row) -> rusqlite::Result<Project> {
    Ok(Project {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        start_date: row.get(3)?,
        end_date: row.get(4)?,
        created_at: row.get(5)?,
    })
}

fn read_task_row(row: &rusqlite::Row) -> rusqlite::Result<Task> {
    Ok(Task {
        id: row.get(0)?,
        project_id: row.get(1)?,
        title: row.get(2)?,
        description: row.get(3)?,
        status: row.get(4)?,
        priority: row.get(5)?,
        assignee: row.get(6)?,
        due_date: row.get(7)?,
        created_at: row.get(8)?,
        updated_at: row.get(9)?,
    })
}

fn read_comment_row(row: &rusqlite::Row) -> rusqlite::Result<Comment> {
    Ok(Comment {
        id: row.get(0)?,
        task_id: row.get(1)?,
        content: row.get(2)?,
        timestamp: row.get(3)?,
    })
}

const PROJECT_COLUMNS: &str = "id, title, description, start_date, end_date, created_at";

const TASK_COLUMNS: &str = "id, project_id, title, description, status, priority, assignee, due_date, created_at, updated_at";

const COMMENT_COLUMNS: &str = "id, task_id, content, timestamp";

const INSERT_PROJECT: &str = "
INSERT INTO projects (title, description, start_date, end_date)
VALUES (?1, ?2, ?3, ?4)
";

const INSERT_TASK: &str = "
INSERT INTO tasks (project_id, title, description, status, priority, assignee, due_date)
VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
";

const UPDATE_TASK_FIELDS: &str = "
UPDATE tasks
SET status = COALESCE(?1, status),
    priority = COALESCE(?2, priority),
    description = COALESCE(?3, description),
    due_date = COALESCE(?4, due_date),
    updated_at = CURRENT_TIMESTAMP
WHERE id = ?5
";

const SET_ASSIGNEE: &str = "
UPDATE tasks
SET assignee = ?1,
    updated_at = CURRENT_TIMESTAMP
WHERE id = ?2
";

const RECORD_SEARCH: &str = "
INSERT INTO recent_searches (query, seq)
VALUES (?1, (SELECT COALESCE(MAX(seq), 0) + 1 FROM recent_searches))
ON CONFLICT(query) DO UPDATE SET
    seq = excluded.seq,
    searched_at = excluded.searched_at
";

/// Fields for a task that does not exist yet.
#[derive(Debug, Clone)]
pub struct NewTask<'a> {
    pub project_id: i64,
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub status: TaskStatus,
    pub priority: Priority,
    pub assignee: Option<&'a str>,
    pub due_date: Option<DateTime<Utc>>,
}

impl<'a> NewTask<'a> {
    pub fn new(project_id: i64, title: &'a str) -> Self {
        Self {
            project_id,
            title,
            description: None,
            status: TaskStatus::Todo,
            priority: Priority::Medium,
            assignee: None,
            due_date: None,
        }
    }
}

/// Partial update of a task. `None` leaves the column untouched;
/// `assignee: Some(None)` clears the assignee.
#[derive(Debug, Clone, Default)]
pub struct TaskUpdate<'a> {
    pub status: Option<TaskStatus>,
    pub priority: Option<Priority>,
    pub description: Option<&'a str>,
    pub due_date: Option<DateTime<Utc>>,
    pub assignee: Option<Option<&'a str>>,
}

pub fn add_project(
    conn: &Connection,
    title: &str,
    description: Option<&str>,
    start_date: Option<DateTime<Utc>>,
    end_date: Option<DateTime<Utc>>,
) -> Result<i64> {
    validate_title(title)?;
    validate_date_range(start_date, end_date)?;
    conn.execute(
        INSERT_PROJECT,
        rusqlite::params![title.trim(), description, start_date, end_date],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn add_task(conn: &Connection, task: &NewTask) -> Result<i64> {
    validate_title(task.title)?;
    require_project(conn, task.project_id)?;
    conn.execute(
        INSERT_TASK,
        rusqlite::params![
            task.project_id,
            task.title.trim(),
            task.description,
            task.status,
            task.priority,
            task.assignee,
            task.due_date,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn update_task(conn: &Connection, id: i64, update: &TaskUpdate) -> Result<()> {
    require_task(conn, id)?;
    conn.execute(
        UPDATE_TASK_FIELDS,
        rusqlite::params![
            update.status,
            update.priority,
            update.description,
            update.due_date,
            id,
        ],
    )?;
    if let Some(assignee) = update.assignee {
        conn.execute(SET_ASSIGNEE, rusqlite::params![assignee, id])?;
    }
    Ok(())
}

pub fn remove_task(conn: &Connection, id: i64) -> Result<()> {
    require_task(conn, id)?;
    conn.execute("DELETE FROM tasks WHERE id = ?1", [id])?;
    Ok(())
}

pub fn add_comment(conn: &Connection, task_id: i64, content: &str) -> Result<i64> {
    require_task(conn, task_id)?;
    if content.trim().is_empty() {
        bail!("comment must not be empty");
    }
    conn.execute(
        "INSERT INTO comments (task_id, content) VALUES (?1, ?2)",
        rusqlite::params![task_id, content],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn get_project(conn: &Connection, id: i64) -> Result<Project> {
    let project = conn
        .query_row(
            &format!("SELECT {PROJECT_COLUMNS} FROM projects WHERE id = ?1"),
            [id],
            read_project_row,
        )
        .optional()?;
    match project {
        Some(p) => Ok(p),
        None => bail!("project {id} not found"),
    }
}

pub fn get_task(conn: &Connection, id: i64) -> Result<Task> {
    let task = conn
        .query_row(
            &format!("SELECT {TASK_COLUMNS} FROM tasks WHERE id = ?1"),
            [id],
            read_task_row,
        )
        .optional()?;
    match task {
        Some(t) => Ok(t),
        None => bail!("task {id} not found"),
    }
}

pub fn list_projects(conn: &Connection) -> Result<Vec<Project>> {
    let mut stmt = conn.prepare(&format!("SELECT {PROJECT_COLUMNS} FROM projects ORDER BY id"))?;
    let rows = stmt.query_map([], read_project_row)?;
    rows.collect::<rusqlite::Result<Vec<_>>>()
        .map_err(Into::into)
}

pub fn list_tasks(conn: &Connection, project_id: Option<i64>) -> Result<Vec<Task>> {
    if let Some(p) = project_id {
        require_project(conn, p)?;
    }
    let mut stmt = conn.prepare(&format!(
        "SELECT {TASK_COLUMNS} FROM tasks WHERE ?1 IS NULL OR project_id = ?1 ORDER BY id"
    ))?;
    let rows = stmt.query_map([project_id], read_task_row)?;
    rows.collect::<rusqlite::Result<Vec<_>>>()
        .map_err(Into::into)
}

/// Comments for a task, oldest first.
pub fn list_comments_for_task(conn: &Connection, task_id: i64) -> Result<Vec<Comment>> {
    let mut stmt = conn.prepare_cached(&format!(
        "SELECT {COMMENT_COLUMNS} FROM comments WHERE task_id = ?1 ORDER BY timestamp, id"
    ))?;
    let rows = stmt.query_map([task_id], read_comment_row)?;
    rows.collect::<rusqlite::Result<Vec<_>>>()
        .map_err(Into::into)
}

/// Remember a search query. Repeating a query moves it to the front.
pub fn record_search(conn: &Connection, query: &str) -> Result<()> {
    let query = query.trim();
    if query.is_empty() {
        return Ok(());
    }
    conn.execute(RECORD_SEARCH, [query])?;
    Ok(())
}

/// Most recent distinct queries, newest first.
pub fn recent_searches(conn: &Connection, limit: usize) -> Result<Vec<String>> {
    let mut stmt =
        conn.prepare_cached("SELECT query FROM recent_searches ORDER BY seq DESC LIMIT ?1")?;
    let rows = stmt.query_map([i64::try_from(limit).unwrap_or(i64::MAX)], |row| row.get(0))?;
    rows.collect::<rusqlite::Result<Vec<_>>>()
        .map_err(Into::into)
}
