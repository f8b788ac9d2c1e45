use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::model::{Comment, Project, Task};
use crate::search::{SearchResponse, SearchResult, Suggestion};

#[derive(Serialize)]
pub struct TaskDetail<'a> {
    #[serde(flatten)]
    pub task: &'a Task,
    pub comments: &'a [Comment],
}

fn fmt_time(t: &DateTime<Utc>) -> String {
    t.format("%Y-%m-%d %H:%M").to_string()
}

pub fn format_task_detail(task: &Task, comments: &[Comment]) -> String {
    let mut out = String::new();
    out.push_str(&format!("Id:          {}\n", task.id));
    out.push_str(&format!("Title:       {}\n", task.title));
    out.push_str(&format!("Status:      {}\n", task.status));
    out.push_str(&format!("Priority:    {}\n", task.priority));
    out.push_str(&format!("Project:     {}\n", task.project_id));
    if let Some(ref desc) = task.description {
        out.push_str(&format!("Description: {desc}\n"));
    }
    if let Some(ref assignee) = task.assignee {
        out.push_str(&format!("Assignee:    {assignee}\n"));
    }
    if let Some(ref due) = task.due_date {
        out.push_str(&format!("Due:         {}\n", fmt_time(due)));
    }
    out.push_str(&format!("Created:     {}\n", fmt_time(&task.created_at)));
    if let Some(ref updated) = task.updated_at {
        out.push_str(&format!("Updated:     {}\n", fmt_time(updated)));
    }

    if !comments.is_empty() {
        out.push('\n');
        out.push_str("Comments:\n");
        for comment in comments {
            out.push_str(&format!(
                "  [{}] {}\n",
                fmt_time(&comment.timestamp),
                comment.content
            ));
        }
    }

    out
}

pub fn format_task_list(tasks: &[Task]) -> String {
    let mut out = String::new();
    for task in tasks {
        let desc = task
            .description
            .as_ref()
            .map(|d| format!("  {d}"))
            .unwrap_or_default();
        out.push_str(&format!(
            "{} {:>4} [{}] {}{}\n",
            task.status.icon(),
            task.id,
            task.priority,
            task.title,
            desc
        ));
    }
    out
}

pub fn format_projects(projects: &[Project]) -> String {
    let mut out = String::new();
    for project in projects {
        let span = match (&project.start_date, &project.end_date) {
            (None, None) => String::new(),
            (start, end) => format!(
                " ({} .. {})",
                start.as_ref().map(fmt_time).unwrap_or_default(),
                end.as_ref().map(fmt_time).unwrap_or_default()
            ),
        };
        out.push_str(&format!("{:>4} {}{}\n", project.id, project.title, span));
    }
    out
}

fn format_result(result: &SearchResult) -> String {
    let matched = result.matched();
    let tag = match result {
        SearchResult::Task(hit) => format!("task {} {}", hit.status.icon(), hit.id),
        SearchResult::Project(hit) => format!("project {}", hit.id),
    };
    format!(
        "{:>5.1}  {tag}  {}\n       {}: {}\n",
        matched.score,
        result.title(),
        matched.match_type.as_str(),
        matched.snippet
    )
}

pub fn format_results(response: &SearchResponse, offset: usize) -> String {
    if response.results.is_empty() {
        if response.total > 0 {
            return format!(
                "{} results for '{}', offset {offset} is past the end\n",
                response.total, response.query
            );
        }
        return format!("No results for '{}'\n", response.query);
    }
    let mut out = String::new();
    for result in &response.results {
        out.push_str(&format_result(result));
    }
    let first = offset + 1;
    let last = offset + response.results.len();
    out.push_str(&format!(
        "\n{first}-{last} of {} results ({}ms)",
        response.total, response.search_time_ms
    ));
    if response.has_more {
        out.push_str(&format!(", next page: --offset {last}"));
    }
    out.push('\n');
    out
}

pub fn format_suggestions(suggestions: &[Suggestion]) -> String {
    let mut out = String::new();
    for s in suggestions {
        out.push_str(&format!(
            "{:>5.1}  {} {:>4} {}\n",
            s.score,
            s.status.icon(),
            s.id,
            s.title
        ));
    }
    out
}

pub fn format_recent(queries: &[String]) -> String {
    let mut out = String::new();
    for q in queries {
        out.push_str(q);
        out.push('\n');
    }
    out
}
