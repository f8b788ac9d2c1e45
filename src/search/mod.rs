//! Free-text search over projects, tasks and task comments.
//!
//! A search lists every candidate from the [`Repository`], scores each
//! searchable field with [`score::QueryMatcher`], keeps the single best field
//! per entity together with a [`snippet`] of it, ranks the survivors and
//! slices out the requested page. Comments never appear as results of their
//! own; a matching comment only lifts its parent task, at a discount.

pub mod autocomplete;
pub mod filter;
pub mod rank;
pub mod score;
pub mod sequence;
pub mod snippet;

use std::time::Instant;

use anyhow::{bail, Result};
use chrono::{DateTime, Utc};
use log::debug;
use serde::Serialize;

use crate::model::{Comment, Priority, Project, Task, TaskStatus};
use crate::store::Repository;
use score::QueryMatcher;

pub use autocomplete::{autocomplete, Suggestion};
pub use filter::ResultFilter;
pub use rank::{paginate, rank, Page};
pub use score::score;
pub use sequence::{QuerySequence, Ticket};
pub use snippet::snippet;

pub const DEFAULT_LIMIT: usize = 50;

/// Comment matches count for less than matches on the task itself.
pub const COMMENT_WEIGHT: f64 = 0.8;

/// Which entity kinds a search considers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchType {
    #[default]
    All,
    Task,
    Project,
}

impl SearchType {
    pub fn parse(s: &str) -> Result<Self> {
        match s {
            "all" => Ok(Self::All),
            "task" => Ok(Self::Task),
            "project" => Ok(Self::Project),
            _ => bail!("invalid search type '{s}': must be all, task, or project"),
        }
    }

    fn includes_tasks(self) -> bool {
        matches!(self, Self::All | Self::Task)
    }

    fn includes_projects(self) -> bool {
        matches!(self, Self::All | Self::Project)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOptions {
    pub kind: SearchType,
    pub limit: usize,
    pub offset: usize,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            kind: SearchType::All,
            limit: DEFAULT_LIMIT,
            offset: 0,
        }
    }
}

/// The field that produced an entity's best score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchType {
    Title,
    Description,
    Comment,
}

impl MatchType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Description => "description",
            Self::Comment => "comment",
        }
    }
}

/// Best-scoring field of one entity.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    pub snippet: String,
    pub match_type: MatchType,
    pub score: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskHit {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    #[serde(flatten)]
    pub matched: Match,
    pub status: TaskStatus,
    pub priority: Priority,
    pub project_id: i64,
    pub assignee: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectHit {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    #[serde(flatten)]
    pub matched: Match,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SearchResult {
    Task(TaskHit),
    Project(ProjectHit),
}

impl SearchResult {
    pub fn id(&self) -> i64 {
        match self {
            Self::Task(hit) => hit.id,
            Self::Project(hit) => hit.id,
        }
    }

    /// `"task"` or `"project"`; together with [`id`](Self::id) this is unique
    /// within one response.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Task(_) => "task",
            Self::Project(_) => "project",
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Self::Task(hit) => &hit.title,
            Self::Project(hit) => &hit.title,
        }
    }

    pub fn matched(&self) -> &Match {
        match self {
            Self::Task(hit) => &hit.matched,
            Self::Project(hit) => &hit.matched,
        }
    }

    pub fn score(&self) -> f64 {
        self.matched().score
    }

    /// `updatedAt` when present, `createdAt` otherwise.
    pub fn recency(&self) -> DateTime<Utc> {
        match self {
            Self::Task(hit) => hit.updated_at.unwrap_or(hit.created_at),
            Self::Project(hit) => hit.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub results: Vec<SearchResult>,
    pub total: usize,
    pub query: String,
    /// Milliseconds spent scoring and ranking. Informational only.
    #[serde(rename = "searchTime")]
    pub search_time_ms: u64,
    pub has_more: bool,
}

impl SearchResponse {
    fn empty() -> Self {
        Self {
            results: Vec::new(),
            total: 0,
            query: String::new(),
            search_time_ms: 0,
            has_more: false,
        }
    }
}

/// Tracks the best-scoring field seen so far. A later field only replaces
/// the current best when it scores strictly higher.
struct BestMatch<'q> {
    matcher: &'q QueryMatcher,
    query: &'q str,
    best: Option<Match>,
}

impl<'q> BestMatch<'q> {
    fn new(matcher: &'q QueryMatcher, query: &'q str) -> Self {
        Self {
            matcher,
            query,
            best: None,
        }
    }

    fn offer(&mut self, text: Option<&str>, weight: f64, match_type: MatchType) {
        let Some(text) = text else {
            return;
        };
        let score = f64::from(self.matcher.score(text)) * weight;
        if score > self.best.as_ref().map_or(0.0, |m| m.score) {
            self.best = Some(Match {
                snippet: snippet(text, self.query, snippet::DEFAULT_MAX_LEN),
                match_type,
                score,
            });
        }
    }

    fn finish(self) -> Option<Match> {
        self.best
    }
}

fn task_hit(
    matcher: &QueryMatcher,
    query: &str,
    task: Task,
    comments: &[Comment],
) -> Option<SearchResult> {
    let mut best = BestMatch::new(matcher, query);
    best.offer(Some(task.title.as_str()), 1.0, MatchType::Title);
    best.offer(task.description.as_deref(), 1.0, MatchType::Description);
    for comment in comments {
        best.offer(Some(comment.content.as_str()), COMMENT_WEIGHT, MatchType::Comment);
    }
    let matched = best.finish()?;
    Some(SearchResult::Task(TaskHit {
        id: task.id,
        title: task.title,
        description: task.description,
        matched,
        status: task.status,
        priority: task.priority,
        project_id: task.project_id,
        assignee: task.assignee,
        due_date: task.due_date,
        created_at: task.created_at,
        updated_at: task.updated_at,
    }))
}

fn project_hit(matcher: &QueryMatcher, query: &str, project: Project) -> Option<SearchResult> {
    let mut best = BestMatch::new(matcher, query);
    best.offer(Some(project.title.as_str()), 1.0, MatchType::Title);
    best.offer(project.description.as_deref(), 1.0, MatchType::Description);
    let matched = best.finish()?;
    Some(SearchResult::Project(ProjectHit {
        id: project.id,
        title: project.title,
        description: project.description,
        matched,
        start_date: project.start_date,
        end_date: project.end_date,
        created_at: project.created_at,
    }))
}

/// Run a full search and return one ranked page.
///
/// The query is trimmed first; a blank query returns an empty response
/// without reading the repository. Repository failures are returned as-is.
pub fn search<R: Repository + ?Sized>(
    repo: &R,
    query: &str,
    options: &SearchOptions,
) -> Result<SearchResponse> {
    let query = query.trim();
    if query.is_empty() {
        return Ok(SearchResponse::empty());
    }

    let mut tasks = Vec::new();
    if options.kind.includes_tasks() {
        for task in repo.list_tasks()? {
            let comments = repo.list_comments_for_task(task.id)?;
            tasks.push((task, comments));
        }
    }
    let projects = if options.kind.includes_projects() {
        repo.list_projects()?
    } else {
        Vec::new()
    };
    let candidates = tasks.len() + projects.len();

    let started = Instant::now();
    let matcher = QueryMatcher::new(query);
    let mut results: Vec<SearchResult> = tasks
        .into_iter()
        .filter_map(|(task, comments)| task_hit(&matcher, query, task, &comments))
        .chain(
            projects
                .into_iter()
                .filter_map(|project| project_hit(&matcher, query, project)),
        )
        .collect();
    rank(&mut results);
    let elapsed = started.elapsed();

    let page = paginate(results, options.offset, options.limit);
    debug!(
        "search {query:?}: {} of {candidates} candidates matched in {:.1}ms",
        page.total,
        elapsed.as_secs_f64() * 1000.0
    );

    Ok(SearchResponse {
        results: page.results,
        total: page.total,
        query: query.to_string(),
        search_time_ms: u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
        has_more: page.has_more,
    })
}

/// Like [`search`], but drops results rejected by `filter` before paging,
/// so `total` and `has_more` describe the filtered list.
pub fn search_filtered<R: Repository + ?Sized>(
    repo: &R,
    query: &str,
    options: &SearchOptions,
    filter: &ResultFilter,
) -> Result<SearchResponse> {
    if filter.is_empty() {
        return search(repo, query, options);
    }
    let unpaged = SearchOptions {
        kind: options.kind,
        limit: usize::MAX,
        offset: 0,
    };
    let all = search(repo, query, &unpaged)?;
    let page = paginate(filter.apply(all.results), options.offset, options.limit);
    Ok(SearchResponse {
        results: page.results,
        total: page.total,
        has_more: page.has_more,
        ..all
    })
}
