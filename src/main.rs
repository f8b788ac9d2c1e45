mod cli;

use std::io::Read as _;

use anyhow::{bail, Context, Result};
use clap::Parser;
use log::debug;
use rusqlite::Connection;

use cli::{Cli, Command, ProjectCommand};
use taskscope::config::Config;
use taskscope::model::{Priority, TaskStatus};
use taskscope::ops::{self, NewTask, TaskUpdate};
use taskscope::output;
use taskscope::search::{self, ResultFilter, SearchOptions, SearchType};
use taskscope::store::SqliteStore;
use taskscope::{db, validate};

fn ensure_db_dir(db_path: &str) -> Result<()> {
    if let Some(parent) = std::path::Path::new(db_path).parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }
    }
    Ok(())
}

fn open_db(db_path: &str) -> Result<Connection> {
    let conn = db::open(db_path)?;
    db::init(&conn)?;
    Ok(conn)
}

fn setup_logging() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env()
        .format_timestamp_millis()
        .init();
}

fn parse_opt_date(s: Option<&str>) -> Result<Option<chrono::DateTime<chrono::Utc>>> {
    s.map(validate::parse_date).transpose()
}

fn main() {
    setup_logging();
    if let Err(e) = run() {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load()?;
    let db_path = config.db_path(cli.db.as_deref());
    debug!("using database {db_path}");
    ensure_db_dir(&db_path)?;

    match cli.command {
        Command::Init => {
            open_db(&db_path)?;
            eprintln!("Initialized {db_path}");
        }

        Command::Project { command } => match command {
            ProjectCommand::Add {
                title,
                desc,
                start,
                end,
            } => {
                let conn = open_db(&db_path)?;
                let start = parse_opt_date(start.as_deref())?;
                let end = parse_opt_date(end.as_deref())?;
                let id = ops::add_project(&conn, &title, desc.as_deref(), start, end)?;
                println!("{id}");
                eprintln!("Added project '{title}'");
            }
        },

        Command::Projects { json } => {
            let conn = open_db(&db_path)?;
            let projects = ops::list_projects(&conn)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&projects)?);
            } else {
                print!("{}", output::format_projects(&projects));
            }
        }

        Command::Add {
            title,
            project,
            desc,
            status,
            priority,
            assignee,
            due,
        } => {
            let conn = open_db(&db_path)?;
            let task = NewTask {
                description: desc.as_deref(),
                status: TaskStatus::parse(&status)?,
                priority: Priority::parse(&priority)?,
                assignee: assignee.as_deref(),
                due_date: parse_opt_date(due.as_deref())?,
                ..NewTask::new(project, &title)
            };
            let id = ops::add_task(&conn, &task)?;
            println!("{id}");
            eprintln!("Added task '{title}'");
        }

        Command::Edit {
            id,
            desc,
            status,
            priority,
            assignee,
            unassign,
            due,
        } => {
            let conn = open_db(&db_path)?;
            let assignee = if unassign {
                Some(None)
            } else {
                assignee.as_deref().map(Some)
            };
            let update = TaskUpdate {
                status: status.as_deref().map(TaskStatus::parse).transpose()?,
                priority: priority.as_deref().map(Priority::parse).transpose()?,
                description: desc.as_deref(),
                due_date: parse_opt_date(due.as_deref())?,
                assignee,
            };
            ops::update_task(&conn, id, &update)?;
            eprintln!("Updated task {id}");
        }

        Command::Rm { id } => {
            let conn = open_db(&db_path)?;
            ops::remove_task(&conn, id)?;
            eprintln!("Removed task {id}");
        }

        Command::Comment { id, content, stdin } => {
            let conn = open_db(&db_path)?;
            let content = match content {
                Some(c) if !stdin => c,
                _ => {
                    let mut buf = String::new();
                    std::io::stdin().read_to_string(&mut buf)?;
                    if buf.trim().is_empty() {
                        bail!("no content provided");
                    }
                    buf.trim_end().to_string()
                }
            };
            ops::add_comment(&conn, id, &content)?;
            eprintln!("Added comment to task {id}");
        }

        Command::Tasks { project, json } => {
            let conn = open_db(&db_path)?;
            let tasks = ops::list_tasks(&conn, project)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&tasks)?);
            } else {
                print!("{}", output::format_task_list(&tasks));
            }
        }

        Command::Show { id, json } => {
            let conn = open_db(&db_path)?;
            let task = ops::get_task(&conn, id)?;
            let comments = ops::list_comments_for_task(&conn, id)?;
            if json {
                let detail = output::TaskDetail {
                    task: &task,
                    comments: &comments,
                };
                println!("{}", serde_json::to_string_pretty(&detail)?);
            } else {
                print!("{}", output::format_task_detail(&task, &comments));
            }
        }

        Command::Search {
            query,
            kind,
            limit,
            offset,
            status,
            priority,
            project,
            json,
        } => {
            let conn = open_db(&db_path)?;
            let query = query.join(" ");
            let options = SearchOptions {
                kind: SearchType::parse(&kind)?,
                limit: limit.unwrap_or_else(|| config.search.limit()),
                offset,
            };
            let filter = ResultFilter {
                status: status.as_deref().map(TaskStatus::parse).transpose()?,
                priority: priority.as_deref().map(Priority::parse).transpose()?,
                project_id: project,
            };
            let store = SqliteStore::new(&conn);
            let response = search::search_filtered(&store, &query, &options, &filter)?;
            ops::record_search(&conn, &query)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&response)?);
            } else {
                print!("{}", output::format_results(&response, offset));
            }
        }

        Command::Suggest { query, limit, json } => {
            let conn = open_db(&db_path)?;
            let query = query.join(" ");
            let limit = limit.unwrap_or_else(|| config.search.suggest_limit());
            let store = SqliteStore::new(&conn);
            let suggestions = search::autocomplete(&store, &query, limit)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&suggestions)?);
            } else {
                print!("{}", output::format_suggestions(&suggestions));
            }
        }

        Command::Recent { limit, json } => {
            let conn = open_db(&db_path)?;
            let limit = limit.unwrap_or_else(|| config.search.recent_limit());
            let queries = ops::recent_searches(&conn, limit)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&queries)?);
            } else {
                print!("{}", output::format_recent(&queries));
            }
        }
    }

    Ok(())
}
