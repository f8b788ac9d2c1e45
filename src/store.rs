//! Read access to the entities a search runs over.
//!
//! Search code only sees the [`Repository`] trait, so it can run against the
//! SQLite database or an in-memory fixture without change.

use anyhow::Result;
use rusqlite::Connection;

use crate::model::{Comment, Project, Task};
use crate::ops;

pub trait Repository {
    fn list_tasks(&self) -> Result<Vec<Task>>;
    fn list_projects(&self) -> Result<Vec<Project>>;
    /// Comments belonging to `task_id`. An unknown task has no comments.
    fn list_comments_for_task(&self, task_id: i64) -> Result<Vec<Comment>>;
}

/// Repository backed by an open database connection.
pub struct SqliteStore<'a> {
    conn: &'a Connection,
}

impl<'a> SqliteStore<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }
}

impl Repository for SqliteStore<'_> {
    fn list_tasks(&self) -> Result<Vec<Task>> {
        ops::list_tasks(self.conn, None)
    }

    fn list_projects(&self) -> Result<Vec<Project>> {
        ops::list_projects(self.conn)
    }

    fn list_comments_for_task(&self, task_id: i64) -> Result<Vec<Comment>> {
        ops::list_comments_for_task(self.conn, task_id)
    }
}

/// Fixed set of entities held in memory, returned in insertion order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    tasks: Vec<Task>,
    projects: Vec<Project>,
    comments: Vec<Comment>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_task(mut self, task: Task) -> Self {
        self.tasks.push(task);
        self
    }

    pub fn with_project(mut self, project: Project) -> Self {
        self.projects.push(project);
        self
    }

    pub fn with_comment(mut self, comment: Comment) -> Self {
        self.comments.push(comment);
        self
    }
}

impl Repository for InMemoryStore {
    fn list_tasks(&self) -> Result<Vec<Task>> {
        Ok(self.tasks.clone())
    }

    fn list_projects(&self) -> Result<Vec<Project>> {
        Ok(self.projects.clone())
    }

    fn list_comments_for_task(&self, task_id: i64) -> Result<Vec<Comment>> {
        Ok(self
            .comments
            .iter()
            .filter(|c| c.task_id == task_id)
            .cloned()
            .collect())
    }
}
