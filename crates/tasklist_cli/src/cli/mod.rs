use clap::{Parser, Subcommand, ValueEnum};
use tasklist_core::todo_api::{DUE_DATE_FORMAT, Filter};
use time::Date;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Output JSON
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Add a new todo
    ///
    /// Example: tasklist add "Buy milk"
    /// Example: tasklist add "Buy milk" --description "2 liters" --due 2026-01-15
    Add {
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        /// Due date in YYYY-MM-DD format
        #[arg(long)]
        due: Option<String>,
    },
    /// Replace a todo's title, description, and due date
    ///
    /// Omitted --description and --due clear those fields.
    ///
    /// Example: tasklist edit todo-1 "Buy organic milk" --due 2026-01-20
    Edit {
        id: String,
        new_title: String,
        #[arg(long)]
        description: Option<String>,
        /// Due date in YYYY-MM-DD format
        #[arg(long)]
        due: Option<String>,
    },
    /// Flip a todo between pending and completed
    ///
    /// Example: tasklist toggle todo-1
    Toggle {
        id: String,
    },
    /// Delete a todo
    ///
    /// Example: tasklist delete todo-1
    Delete {
        id: String,
    },
    /// Move a todo to a new position
    ///
    /// Positions are the row numbers shown by `list all`; the target
    /// position is taken after the todo has been lifted out.
    ///
    /// Example: tasklist move 0 2
    Move {
        from: usize,
        to: usize,
    },
    /// List todos
    ///
    /// Example: tasklist list
    /// Example: tasklist list pending
    List {
        #[arg(value_enum, default_value = "all")]
        filter: ListFilter,
    },
    /// Show aggregate counts
    ///
    /// Example: tasklist stats
    Stats,
    /// Toggle between light and dark display mode
    ///
    /// Example: tasklist mode
    Mode,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListFilter {
    All,
    Completed,
    Pending,
}

impl From<ListFilter> for Filter {
    fn from(filter: ListFilter) -> Self {
        match filter {
            ListFilter::All => Filter::All,
            ListFilter::Completed => Filter::Completed,
            ListFilter::Pending => Filter::Pending,
        }
    }
}

/// Checks a user-entered due date against the YYYY-MM-DD calendar format
/// and returns the trimmed value. The core stores what it is given, so bad
/// input has to be stopped here.
pub fn validate_due_date(raw: &str) -> Result<String, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(String::new());
    }

    Date::parse(trimmed, DUE_DATE_FORMAT)
        .map_err(|_| format!("due date must be YYYY-MM-DD, got '{trimmed}'"))?;
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::{Filter, ListFilter, validate_due_date};

    #[test]
    fn validate_due_date_accepts_calendar_dates() {
        assert_eq!(validate_due_date("2026-01-15").unwrap(), "2026-01-15");
        assert_eq!(validate_due_date("  2026-12-31  ").unwrap(), "2026-12-31");
    }

    #[test]
    fn validate_due_date_passes_through_empty_input() {
        assert_eq!(validate_due_date("").unwrap(), "");
        assert_eq!(validate_due_date("   ").unwrap(), "");
    }

    #[test]
    fn validate_due_date_rejects_malformed_input() {
        let err = validate_due_date("tomorrow").unwrap_err();
        assert!(err.contains("YYYY-MM-DD"));

        assert!(validate_due_date("2026-13-01").is_err());
        assert!(validate_due_date("15/01/2026").is_err());
    }

    #[test]
    fn list_filter_maps_to_core_filter() {
        assert_eq!(Filter::from(ListFilter::All), Filter::All);
        assert_eq!(Filter::from(ListFilter::Completed), Filter::Completed);
        assert_eq!(Filter::from(ListFilter::Pending), Filter::Pending);
    }
}
