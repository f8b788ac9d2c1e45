//! Lightweight task-only suggestions for type-ahead input.

use anyhow::Result;
use log::debug;
use serde::Serialize;

use super::score::QueryMatcher;
use crate::model::{Priority, TaskStatus};
use crate::store::Repository;

pub const DEFAULT_LIMIT: usize = 8;

/// Suggestions must score strictly above this.
pub const THRESHOLD: f64 = 30.0;

pub const DESCRIPTION_WEIGHT: f64 = 0.7;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename = "task", rename_all = "camelCase")]
pub struct Suggestion {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub score: f64,
    pub status: TaskStatus,
    pub priority: Priority,
    pub project_id: i64,
}

/// Suggest up to `limit` tasks whose title or description matches `query`.
///
/// Each task scores the better of its title and its discounted description.
/// Results are ordered by score only; ties keep repository order.
pub fn autocomplete<R: Repository + ?Sized>(
    repo: &R,
    query: &str,
    limit: usize,
) -> Result<Vec<Suggestion>> {
    let query = query.trim();
    if query.is_empty() {
        return Ok(Vec::new());
    }

    let matcher = QueryMatcher::new(query);
    let tasks = repo.list_tasks()?;
    let candidates = tasks.len();

    let mut suggestions: Vec<Suggestion> = tasks
        .into_iter()
        .filter_map(|task| {
            let title = f64::from(matcher.score(&task.title));
            let description = task
                .description
                .as_deref()
                .map_or(0.0, |d| f64::from(matcher.score(d)) * DESCRIPTION_WEIGHT);
            let score = title.max(description);
            (score > THRESHOLD).then(|| Suggestion {
                id: task.id,
                title: task.title,
                description: task.description,
                score,
                status: task.status,
                priority: task.priority,
                project_id: task.project_id,
            })
        })
        .collect();

    suggestions.sort_by(|a, b| b.score.total_cmp(&a.score));
    suggestions.truncate(limit);
    debug!(
        "autocomplete {query:?}: {} of {candidates} tasks suggested",
        suggestions.len()
    );
    Ok(suggestions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Task;
    use crate::store::InMemoryStore;
    use chrono::{TimeZone, Utc};

    fn task(id: i64, title: &str, description: Option<&str>) -> Task {
        Task {
            id,
            title: title.to_string(),
            description: description.map(str::to_string),
            status: TaskStatus::Todo,
            priority: Priority::Medium,
            assignee: None,
            project_id: 1,
            due_date: None,
            created_at: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
            updated_at: None,
        }
    }

    #[test]
    fn blank_query_suggests_nothing() {
        let store = InMemoryStore::new().with_task(task(1, "Deploy", None));
        assert!(autocomplete(&store, "  ", DEFAULT_LIMIT).unwrap().is_empty());
    }

    #[test]
    fn description_match_is_discounted() {
        let store = InMemoryStore::new().with_task(task(1, "Misc", Some("a deploy step")));
        let out = autocomplete(&store, "deploy", DEFAULT_LIMIT).unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].score, 70.0 * DESCRIPTION_WEIGHT);
    }

    #[test]
    fn substring_description_clears_threshold() {
        // 50 * 0.7 = 35, above the threshold.
        let store = InMemoryStore::new().with_task(task(1, "Misc", Some("redeployment")));
        let out = autocomplete(&store, "deploy", DEFAULT_LIMIT).unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].score, 35.0);
    }

    #[test]
    fn partial_matches_fall_below_threshold() {
        // Title partial: 20. Description partial: 40 * 0.7 = 28.
        let store = InMemoryStore::new().with_task(task(
            1,
            "ship it",
            Some("deploy notes and ship"),
        ));
        assert!(autocomplete(&store, "deploy ship now", DEFAULT_LIMIT)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn ordered_by_score_and_limited() {
        let store = InMemoryStore::new()
            .with_task(task(1, "the deploy", None))
            .with_task(task(2, "deploy", None))
            .with_task(task(3, "deployment", None))
            .with_task(task(4, "redeploy", None));
        let out = autocomplete(&store, "deploy", 3).unwrap();
        let ids: Vec<i64> = out.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[test]
    fn equal_scores_keep_repository_order() {
        let store = InMemoryStore::new()
            .with_task(task(7, "deploy y", None))
            .with_task(task(2, "deploy z", None))
            .with_task(task(9, "deploy", None))
            .with_task(task(5, "deploy x", None))
            .with_task(task(4, "deploy w", None));
        let out = autocomplete(&store, "deploy", 4).unwrap();
        let ids: Vec<i64> = out.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![9, 7, 2, 5]);
        assert!(out[1..].iter().all(|s| s.score == 90.0));
    }

    #[test]
    fn serializes_as_task() {
        let store = InMemoryStore::new().with_task(task(7, "deploy", None));
        let out = autocomplete(&store, "deploy", DEFAULT_LIMIT).unwrap();
        let json = serde_json::to_value(&out[0]).unwrap();
        assert_eq!(json["type"], "task");
        assert_eq!(json["projectId"], 1);
        assert_eq!(json["status"], "todo");
    }
}
