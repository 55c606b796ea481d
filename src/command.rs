// Line-oriented command grammar for the interactive session

use crate::models::TaskId;
use clap::{CommandFactory, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "tasklist", no_binary_name = true, disable_help_subcommand = true)]
#[command(override_usage = "<COMMAND> [ARGS]")]
struct CommandLine {
    #[command(subcommand)]
    command: Command,
}

/// One user action
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Add a task (due date defaults to today)
    Add {
        /// Due date as YYYY-MM-DD; must come before the text
        #[arg(short, long)]
        due: Option<String>,

        /// Task text; everything after it, dashes included, is part of it.
        /// `parse_line` keeps it as a single entry spaced as typed.
        #[arg(trailing_var_arg = true, allow_hyphen_values = true, num_args = 1..)]
        text: Vec<String>,
    },

    /// Mark a task completed (no-op if already completed)
    Done { id: TaskId },

    /// Mark a task pending again (no-op if already pending)
    Undo { id: TaskId },

    /// Flip a task between pending and completed
    Toggle { id: TaskId },

    /// Delete a task
    #[command(alias = "rm")]
    Delete { id: TaskId },

    /// Show all, pending or completed tasks
    Filter { filter: String },

    /// Redraw the task list
    #[command(alias = "ls")]
    List,

    /// Show available commands
    Help,

    /// Leave the session
    #[command(alias = "exit")]
    Quit,
}

/// Parse one input line
///
/// Blank lines and lines starting with `#` yield `None`.
pub fn parse_line(line: &str) -> Result<Option<Command>, clap::Error> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let words: Vec<&str> = line.split_whitespace().collect();
    let mut command = CommandLine::try_parse_from(words.iter().copied())?.command;

    // Text words are always the tail of the line; take them verbatim
    if let Command::Add { text, .. } = &mut command {
        if !text.is_empty() {
            let first = words[words.len() - text.len()];
            let start = first.as_ptr() as usize - line.as_ptr() as usize;
            *text = vec![line[start..].to_string()];
        }
    }

    Ok(Some(command))
}

/// Help text listing every command
pub fn help_text() -> String {
    CommandLine::command().render_help().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> Command {
        parse_line(line).unwrap().unwrap()
    }

    #[test]
    fn test_parse_add() {
        assert_eq!(
            parse("add Buy milk"),
            Command::Add {
                due: None,
                text: vec!["Buy milk".to_string()],
            }
        );
        assert_eq!(
            parse("add --due 2024-01-01 Buy milk"),
            Command::Add {
                due: Some("2024-01-01".to_string()),
                text: vec!["Buy milk".to_string()],
            }
        );
        assert_eq!(
            parse("add -d 2024-02-01 Pay rent"),
            Command::Add {
                due: Some("2024-02-01".to_string()),
                text: vec!["Pay rent".to_string()],
            }
        );
    }

    #[test]
    fn test_parse_add_hyphenated_text() {
        assert_eq!(
            parse("add Review PR -draft"),
            Command::Add {
                due: None,
                text: vec!["Review PR -draft".to_string()],
            }
        );
        assert_eq!(
            parse("add -d 2024-02-01 Temp -5 outside --due later"),
            Command::Add {
                due: Some("2024-02-01".to_string()),
                text: vec!["Temp -5 outside --due later".to_string()],
            }
        );
    }

    #[test]
    fn test_parse_add_keeps_inner_spacing() {
        assert_eq!(
            parse("  add  --due 2024-01-01 Buy   2  milk  "),
            Command::Add {
                due: Some("2024-01-01".to_string()),
                text: vec!["Buy   2  milk".to_string()],
            }
        );
    }

    #[test]
    fn test_parse_add_without_text() {
        // Empty text is left for the store to reject
        assert_eq!(parse("add"), Command::Add { due: None, text: vec![] });
    }

    #[test]
    fn test_parse_id_commands() {
        assert_eq!(parse("done 3"), Command::Done { id: TaskId(3) });
        assert_eq!(parse("undo 3"), Command::Undo { id: TaskId(3) });
        assert_eq!(parse("toggle #4"), Command::Toggle { id: TaskId(4) });
        assert_eq!(parse("delete 5"), Command::Delete { id: TaskId(5) });
        assert_eq!(parse("rm 5"), Command::Delete { id: TaskId(5) });
    }

    #[test]
    fn test_parse_other_commands() {
        assert_eq!(
            parse("filter pending"),
            Command::Filter {
                filter: "pending".to_string()
            }
        );
        assert_eq!(parse("list"), Command::List);
        assert_eq!(parse("ls"), Command::List);
        assert_eq!(parse("help"), Command::Help);
        assert_eq!(parse("quit"), Command::Quit);
        assert_eq!(parse("exit"), Command::Quit);
    }

    #[test]
    fn test_parse_skips_blank_and_comments() {
        assert_eq!(parse_line("").unwrap(), None);
        assert_eq!(parse_line("   ").unwrap(), None);
        assert_eq!(parse_line("# setup").unwrap(), None);
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_line("frobnicate").is_err());
        assert!(parse_line("done").is_err());
        assert!(parse_line("done abc").is_err());
        assert!(parse_line("filter").is_err());
    }

    #[test]
    fn test_help_text_lists_commands() {
        let help = help_text();
        for name in ["add", "done", "undo", "toggle", "delete", "filter", "list", "quit"] {
            assert!(help.contains(name), "help should mention {}", name);
        }
        assert!(help.contains("no-op if already completed"));
        assert!(help.contains("no-op if already pending"));
    }
}
