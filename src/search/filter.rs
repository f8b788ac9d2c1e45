use crate::model::{Priority, TaskStatus};

use super::SearchResult;

/// Narrows ranked results by task attributes.
///
/// Projects carry none of these attributes, so any active filter excludes
/// them. An empty filter keeps everything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResultFilter {
    pub status: Option<TaskStatus>,
    pub priority: Option<Priority>,
    pub project_id: Option<i64>,
}

impl ResultFilter {
    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.priority.is_none() && self.project_id.is_none()
    }

    pub fn matches(&self, result: &SearchResult) -> bool {
        match result {
            SearchResult::Task(hit) => {
                self.status.map_or(true, |s| hit.status == s)
                    && self.priority.map_or(true, |p| hit.priority == p)
                    && self.project_id.map_or(true, |id| hit.project_id == id)
            }
            SearchResult::Project(_) => self.is_empty(),
        }
    }

    /// Keep matching results, preserving their order.
    pub fn apply(&self, results: Vec<SearchResult>) -> Vec<SearchResult> {
        if self.is_empty() {
            return results;
        }
        results.into_iter().filter(|r| self.matches(r)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::{Match, MatchType, ProjectHit, TaskHit};
    use chrono::{TimeZone, Utc};

    fn matched() -> Match {
        Match {
            snippet: String::new(),
            match_type: MatchType::Title,
            score: 70.0,
        }
    }

    fn task(id: i64, status: TaskStatus, priority: Priority, project_id: i64) -> SearchResult {
        SearchResult::Task(TaskHit {
            id,
            title: format!("task {id}"),
            description: None,
            matched: matched(),
            status,
            priority,
            project_id,
            assignee: None,
            due_date: None,
            created_at: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
            updated_at: None,
        })
    }

    fn project(id: i64) -> SearchResult {
        SearchResult::Project(ProjectHit {
            id,
            title: format!("project {id}"),
            description: None,
            matched: matched(),
            start_date: None,
            end_date: None,
            created_at: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
        })
    }

    fn ids(results: &[SearchResult]) -> Vec<(&'static str, i64)> {
        results.iter().map(|r| (r.kind(), r.id())).collect()
    }

    fn sample() -> Vec<SearchResult> {
        vec![
            task(1, TaskStatus::Todo, Priority::High, 1),
            project(1),
            task(2, TaskStatus::Done, Priority::High, 2),
            task(3, TaskStatus::Todo, Priority::Low, 2),
        ]
    }

    #[test]
    fn empty_filter_keeps_everything() {
        let filter = ResultFilter::default();
        assert!(filter.is_empty());
        assert_eq!(filter.apply(sample()).len(), 4);
    }

    #[test]
    fn status_filter_drops_projects() {
        let filter = ResultFilter {
            status: Some(TaskStatus::Todo),
            ..Default::default()
        };
        assert_eq!(ids(&filter.apply(sample())), vec![("task", 1), ("task", 3)]);
    }

    #[test]
    fn filters_combine() {
        let filter = ResultFilter {
            priority: Some(Priority::High),
            project_id: Some(2),
            ..Default::default()
        };
        assert_eq!(ids(&filter.apply(sample())), vec![("task", 2)]);
    }
}
