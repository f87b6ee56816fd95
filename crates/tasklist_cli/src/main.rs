use clap::{CommandFactory, Parser};
use std::io::{self, BufRead};
use tabled::settings::Style;
use tabled::{Table, Tabled};
use tasklist_cli::cli::{Cli, Command, ListFilter, validate_due_date};
use tasklist_cli::theme::palette_for_mode;
use tasklist_core::error::AppError;
use tasklist_core::model::Todo;
use tasklist_core::session::{Action, Session};
use tasklist_core::storage::kv_store::FileStore;
use tasklist_core::todo_api;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Tabled)]
struct TodoRow {
    #[tabled(rename = "#")]
    position: usize,
    #[tabled(rename = "id")]
    id: String,
    #[tabled(rename = "done")]
    done: &'static str,
    #[tabled(rename = "title")]
    title: String,
    #[tabled(rename = "description")]
    description: String,
    #[tabled(rename = "due")]
    due: String,
}

fn due_label(todo: &Todo) -> String {
    let due = todo.due_date.as_deref().unwrap_or("-");
    if todo_api::todo_overdue(todo) {
        format!("{due} (overdue)")
    } else {
        due.to_string()
    }
}

fn print_todos_plain(todos: &[Todo]) {
    let rows: Vec<TodoRow> = todos
        .iter()
        .enumerate()
        .map(|(position, todo)| TodoRow {
            position,
            id: todo.id.clone(),
            done: if todo.completed { "x" } else { "" },
            title: todo.title.clone(),
            description: todo.description.clone().unwrap_or_default(),
            due: due_label(todo),
        })
        .collect();

    println!("{}", Table::new(rows).with(Style::sharp()));
}

fn todo_json(todo: &Todo) -> serde_json::Value {
    serde_json::json!({
        "id": todo.id,
        "title": todo.title,
        "description": todo.description,
        "dueDate": todo.due_date,
        "completed": todo.completed,
        "createdAt": todo.created_at,
    })
}

fn print_todo_json(todo: &Todo) {
    println!("{}", todo_json(todo));
}

fn print_todos_json(todos: &[Todo]) {
    let payload: Vec<serde_json::Value> = todos
        .iter()
        .map(|todo| {
            let mut value = todo_json(todo);
            value["overdue"] = serde_json::Value::Bool(todo_api::todo_overdue(todo));
            value
        })
        .collect();
    println!("{}", serde_json::Value::Array(payload));
}

fn empty_list_message(filter: ListFilter) -> &'static str {
    match filter {
        ListFilter::All => "No todos yet. Add one to get started!",
        ListFilter::Completed => "No completed todos",
        ListFilter::Pending => "All caught up! No pending todos",
    }
}

fn parse_due_flag(due: Option<String>) -> Result<String, AppError> {
    match due {
        Some(value) => validate_due_date(&value).map_err(AppError::invalid_input),
        None => Ok(String::new()),
    }
}

fn normalize_parse_error(err: clap::Error) -> AppError {
    let rendered = err.to_string();
    let first_line = rendered.lines().next().unwrap_or("invalid command").trim();
    let message = first_line
        .strip_prefix("error: ")
        .unwrap_or(first_line)
        .to_string();
    AppError::invalid_input(message)
}

fn split_command_line(line: &str) -> Result<Vec<String>, AppError> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut escape = false;

    for ch in line.chars() {
        if escape {
            if ch != '"' && ch != '\\' {
                current.push('\\');
            }
            current.push(ch);
            escape = false;
            continue;
        }

        if in_quotes && ch == '\\' {
            escape = true;
            continue;
        }

        if ch == '"' {
            in_quotes = !in_quotes;
            continue;
        }

        if ch.is_whitespace() && !in_quotes {
            if !current.is_empty() {
                args.push(current.clone());
                current.clear();
            }
            continue;
        }

        current.push(ch);
    }

    if in_quotes {
        return Err(AppError::invalid_input("unterminated quote in command"));
    }

    if !current.is_empty() {
        args.push(current);
    }

    Ok(args)
}

fn print_help() {
    let mut cmd = Cli::command();
    let help = cmd.render_help();
    println!("{help}");
}

fn run_command(cli: Cli) -> Result<(), AppError> {
    let store = FileStore::open_default()?;
    let mut session = Session::load(Box::new(store));
    let palette = palette_for_mode(session.dark_mode());

    match cli.command {
        Command::Add {
            title,
            description,
            due,
        } => {
            let title = match title {
                Some(value) if !value.trim().is_empty() => value,
                _ => return Err(AppError::invalid_input("title is required")),
            };
            let due_date = parse_due_flag(due)?;

            session.apply(Action::Add {
                title,
                description: description.unwrap_or_default(),
                due_date,
            })?;

            let todo = &session.todos()[0];
            if cli.json {
                print_todo_json(todo);
            } else {
                let line = format!("Added todo: {} ({})", todo.title, todo.id);
                println!("{}", palette.accentize(&line));
            }
        }
        Command::Edit {
            id,
            new_title,
            description,
            due,
        } => {
            if session.find(&id).is_none() {
                return Err(AppError::invalid_input("todo not found"));
            }
            let due_date = parse_due_flag(due)?;

            session.apply(Action::Update {
                id: id.clone(),
                title: new_title,
                description: description.unwrap_or_default(),
                due_date,
            })?;

            let todo = session
                .find(&id)
                .ok_or_else(|| AppError::invalid_input("todo not found"))?;
            if cli.json {
                print_todo_json(todo);
            } else {
                let line = format!("Updated todo: {} ({})", todo.title, todo.id);
                println!("{}", palette.accentize(&line));
            }
        }
        Command::Toggle { id } => {
            if session.find(&id).is_none() {
                return Err(AppError::invalid_input("todo not found"));
            }

            session.apply(Action::Toggle { id: id.clone() })?;

            let todo = session
                .find(&id)
                .ok_or_else(|| AppError::invalid_input("todo not found"))?;
            if cli.json {
                print_todo_json(todo);
            } else {
                let state = if todo.completed { "completed" } else { "pending" };
                let line = format!("Marked todo {}: {} ({})", state, todo.title, todo.id);
                println!("{}", palette.accentize(&line));
            }
        }
        Command::Delete { id } => {
            let todo = session
                .find(&id)
                .cloned()
                .ok_or_else(|| AppError::invalid_input("todo not found"))?;

            session.apply(Action::Delete { id })?;

            if cli.json {
                print_todo_json(&todo);
            } else {
                let line = format!("Deleted todo: {} ({})", todo.title, todo.id);
                println!("{}", palette.accentize(&line));
            }
        }
        Command::Move { from, to } => {
            session.apply(Action::Reorder { from, to })?;

            let todo = session
                .todos()
                .get(to)
                .ok_or_else(|| AppError::invalid_input("index out of range"))?;
            if cli.json {
                print_todo_json(todo);
            } else {
                let line = format!("Moved todo: {} ({}) to position {}", todo.title, todo.id, to);
                println!("{}", palette.accentize(&line));
            }
        }
        Command::List { filter } => {
            session.apply(Action::SetFilter(filter.into()))?;
            let visible = session.visible();

            if cli.json {
                print_todos_json(&visible);
            } else if visible.is_empty() {
                println!("{}", palette.mutedize(empty_list_message(filter)));
            } else {
                print_todos_plain(&visible);
            }
        }
        Command::Stats => {
            let stats = session.stats();
            if cli.json {
                println!(
                    "{}",
                    serde_json::json!({
                        "total": stats.total,
                        "completed": stats.completed,
                        "pending": stats.pending,
                    })
                );
            } else {
                let line = format!(
                    "{} total \u{2022} {} completed \u{2022} {} pending",
                    stats.total, stats.completed, stats.pending
                );
                println!("{}", palette.accentize(&line));
            }
        }
        Command::Mode => {
            session.apply(Action::ToggleDarkMode)?;

            if cli.json {
                println!("{}", serde_json::json!({ "darkMode": session.dark_mode() }));
            } else {
                let palette = palette_for_mode(session.dark_mode());
                let line = if session.dark_mode() {
                    "Dark mode enabled"
                } else {
                    "Dark mode disabled"
                };
                println!("{}", palette.accentize(line));
            }
        }
    }

    Ok(())
}

fn run_interactive() -> Result<(), AppError> {
    let mut input = String::new();
    let stdin = io::stdin();
    let mut stdin_lock = stdin.lock();

    loop {
        input.clear();
        let bytes = stdin_lock
            .read_line(&mut input)
            .map_err(|err| AppError::io(err.to_string()))?;

        if bytes == 0 {
            break;
        }

        let line = input.trim();
        if line.is_empty() {
            continue;
        }

        if line.eq_ignore_ascii_case("exit") || line.eq_ignore_ascii_case("quit") {
            break;
        }

        if line == "help" || line == "?" {
            print_help();
            continue;
        }

        let args = match split_command_line(line) {
            Ok(args) => args,
            Err(err) => {
                eprintln!("ERROR: {}", err);
                continue;
            }
        };

        if args.is_empty() {
            continue;
        }

        let mut argv = Vec::with_capacity(args.len() + 1);
        argv.push("tasklist".to_string());
        argv.extend(args);

        let cli = match Cli::try_parse_from(argv) {
            Ok(cli) => cli,
            Err(err) => {
                eprintln!("ERROR: {}", normalize_parse_error(err));
                continue;
            }
        };

        if let Err(err) = run_command(cli) {
            eprintln!("ERROR: {}", err);
        }
    }

    Ok(())
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tasklist_core=warn,tasklist_cli=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn main() {
    init_tracing();

    let mut args = std::env::args_os();
    args.next();
    if args.next().is_none() {
        if let Err(err) = run_interactive() {
            eprintln!("ERROR: {}", err);
            std::process::exit(1);
        }
        return;
    }

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            if err.use_stderr() {
                eprintln!("ERROR: {}", normalize_parse_error(err));
                std::process::exit(1);
            }
            // --help and --version render through clap itself.
            err.exit();
        }
    };

    if let Err(err) = run_command(cli) {
        eprintln!("ERROR: {}", err);
        std::process::exit(1);
    }
}
