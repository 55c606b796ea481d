// Renderers that draw a store view

use crate::filter::Filter;
use crate::store::{View, ViewEntry};
use chrono::NaiveDate;
use colored::Colorize;
use eyre::{Result, eyre};
use serde::Serialize;
use std::io::Write;

/// Consumer of store views
///
/// Called after every state change with the freshly computed view.
pub trait Renderer {
    fn render(&mut self, view: &View<'_>) -> Result<()>;

    /// Informational line for the user
    fn message(&mut self, text: &str) -> Result<()>;

    /// Problem the user should correct
    fn error(&mut self, text: &str) -> Result<()>;

    /// Input prompt for interactive sessions
    fn prompt(&mut self, _prompt: &str) -> Result<()> {
        Ok(())
    }
}

/// Human-readable task list
pub struct TextRenderer<W: Write> {
    out: W,
    date_format: String,
    color: bool,
}

impl<W: Write> TextRenderer<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            date_format: crate::models::DATE_INPUT_FORMAT.to_string(),
            color: false,
        }
    }

    /// chrono strftime pattern used for due dates
    pub fn with_date_format(mut self, date_format: impl Into<String>) -> Self {
        self.date_format = date_format.into();
        self
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn format_entry(&self, entry: &ViewEntry<'_>) -> Result<String> {
        let task = entry.task;
        let mark = if task.is_completed() { "[x]" } else { "[ ]" };
        let overdue = if entry.is_overdue { " OVERDUE" } else { "" };
        let due = format_date(task.due_date(), &self.date_format)?;

        let line = format!(
            "{} {:>3}  {}  (due {}){}",
            mark,
            task.id(),
            task.text(),
            due,
            overdue
        );
        let line = if !self.color {
            line
        } else if task.is_completed() {
            line.green().dimmed().to_string()
        } else if entry.is_overdue {
            line.red().bold().to_string()
        } else {
            line
        };

        Ok(format!(
            "{}  [{} {}] [Delete {}]",
            line,
            task.status().toggle_label(),
            task.id(),
            task.id()
        ))
    }
}

impl<W: Write> Renderer for TextRenderer<W> {
    fn render(&mut self, view: &View<'_>) -> Result<()> {
        if view.is_empty() {
            writeln!(self.out, "No tasks to show.")?;
        }
        for entry in view.iter() {
            let line = self.format_entry(&entry)?;
            writeln!(self.out, "{}", line)?;
        }
        writeln!(
            self.out,
            "Showing {} of {} tasks (filter: {})",
            view.len(),
            view.total(),
            view.filter()
        )?;
        self.out.flush()?;
        Ok(())
    }

    fn message(&mut self, text: &str) -> Result<()> {
        writeln!(self.out, "{}", text)?;
        Ok(())
    }

    fn error(&mut self, text: &str) -> Result<()> {
        if self.color {
            writeln!(self.out, "{}", text.red())?;
        } else {
            writeln!(self.out, "{}", text)?;
        }
        self.out.flush()?;
        Ok(())
    }

    fn prompt(&mut self, prompt: &str) -> Result<()> {
        write!(self.out, "{}", prompt)?;
        self.out.flush()?;
        Ok(())
    }
}

#[derive(Serialize)]
struct JsonlEntry<'a> {
    id: u64,
    text: &'a str,
    due_date: NaiveDate,
    status: crate::models::TaskStatus,
    overdue: bool,
    action: &'static str,
}

#[derive(Serialize)]
#[serde(rename_all = "lowercase")]
enum JsonlLine<'a> {
    View { filter: Filter, shown: usize, total: usize },
    Message(&'a str),
    Error(&'a str),
}

/// One JSON object per line, for scripts
///
/// Each render writes a `{"view": ...}` header followed by one line per task.
pub struct JsonlRenderer<W: Write> {
    out: W,
}

impl<W: Write> JsonlRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_line<T: Serialize>(&mut self, value: &T) -> Result<()> {
        let json = serde_json::to_string(value)?;
        writeln!(self.out, "{}", json)?;
        Ok(())
    }
}

impl<W: Write> Renderer for JsonlRenderer<W> {
    fn render(&mut self, view: &View<'_>) -> Result<()> {
        self.write_line(&JsonlLine::View {
            filter: view.filter(),
            shown: view.len(),
            total: view.total(),
        })?;
        for entry in view.iter() {
            let task = entry.task;
            self.write_line(&JsonlEntry {
                id: task.id().0,
                text: task.text(),
                due_date: task.due_date(),
                status: task.status(),
                overdue: entry.is_overdue,
                action: task.status().toggle_label(),
            })?;
        }
        self.out.flush()?;
        Ok(())
    }

    fn message(&mut self, text: &str) -> Result<()> {
        self.write_line(&JsonlLine::Message(text))
    }

    fn error(&mut self, text: &str) -> Result<()> {
        self.write_line(&JsonlLine::Error(text))?;
        self.out.flush()?;
        Ok(())
    }
}

/// Format a date, rejecting invalid strftime patterns instead of panicking
pub fn format_date(date: NaiveDate, pattern: &str) -> Result<String> {
    use std::fmt::Write as _;

    let mut out = String::new();
    write!(out, "{}", date.format(pattern)).map_err(|_| eyre!("Invalid date format: {:?}", pattern))?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TaskStore;
    use crate::clock::FixedClock;
    use crate::models::parse_date;

    fn sample_store() -> TaskStore {
        let mut store = TaskStore::with_clock(Box::new(FixedClock(parse_date("2024-03-02").unwrap())));
        store.add("Write report", "2024-03-05").unwrap();
        store.add("Buy milk", "2024-03-01").unwrap();
        let done = store.add("Call mom", "2024-02-01").unwrap();
        store.toggle(done.id()).unwrap();
        store
    }

    fn render_text(store: &TaskStore, renderer: TextRenderer<Vec<u8>>) -> String {
        let mut renderer = renderer;
        renderer.render(&store.view()).unwrap();
        String::from_utf8(renderer.into_inner()).unwrap()
    }

    #[test]
    fn test_text_render() {
        let store = sample_store();
        let output = render_text(&store, TextRenderer::new(Vec::new()));

        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(
            lines,
            vec![
                "[x]   3  Call mom  (due 2024-02-01)  [Undo 3] [Delete 3]",
                "[ ]   2  Buy milk  (due 2024-03-01) OVERDUE  [Done 2] [Delete 2]",
                "[ ]   1  Write report  (due 2024-03-05)  [Done 1] [Delete 1]",
                "Showing 3 of 3 tasks (filter: all)",
            ]
        );
    }

    #[test]
    fn test_text_render_date_format() {
        let store = sample_store();
        let output = render_text(&store, TextRenderer::new(Vec::new()).with_date_format("%d %b %Y"));

        assert!(output.contains("(due 01 Mar 2024)"));
        assert!(output.contains("(due 05 Mar 2024)"));
    }

    #[test]
    fn test_text_render_empty() {
        let mut store = sample_store();
        store.set_filter(Filter::Completed);
        let done_id = store.view().iter().next().unwrap().task.id();
        store.toggle(done_id).unwrap();

        let output = render_text(&store, TextRenderer::new(Vec::new()));
        assert_eq!(output, "No tasks to show.\nShowing 0 of 3 tasks (filter: completed)\n");
    }

    #[test]
    fn test_text_render_invalid_date_format() {
        let store = sample_store();
        let mut renderer = TextRenderer::new(Vec::new()).with_date_format("%Q");

        assert!(renderer.render(&store.view()).is_err());
    }

    #[test]
    fn test_text_messages() {
        let mut renderer = TextRenderer::new(Vec::new());
        renderer.message("hello").unwrap();
        renderer.error("oops").unwrap();
        renderer.prompt("> ").unwrap();

        let output = String::from_utf8(renderer.into_inner()).unwrap();
        assert_eq!(output, "hello\noops\n> ");
    }

    #[test]
    fn test_jsonl_render() {
        let mut store = sample_store();
        store.set_filter(Filter::Pending);

        let mut renderer = JsonlRenderer::new(Vec::new());
        renderer.render(&store.view()).unwrap();
        let output = String::from_utf8(renderer.into_inner()).unwrap();

        let lines: Vec<serde_json::Value> = output.lines().map(|l| serde_json::from_str(l).unwrap()).collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0]["view"]["filter"], "pending");
        assert_eq!(lines[0]["view"]["shown"], 2);
        assert_eq!(lines[0]["view"]["total"], 3);

        assert_eq!(lines[1]["text"], "Buy milk");
        assert_eq!(lines[1]["due_date"], "2024-03-01");
        assert_eq!(lines[1]["status"], "pending");
        assert_eq!(lines[1]["overdue"], true);
        assert_eq!(lines[1]["action"], "Done");

        assert_eq!(lines[2]["text"], "Write report");
        assert_eq!(lines[2]["overdue"], false);
    }

    #[test]
    fn test_jsonl_messages() {
        let mut renderer = JsonlRenderer::new(Vec::new());
        renderer.message("added").unwrap();
        renderer.error("bad input").unwrap();

        let output = String::from_utf8(renderer.into_inner()).unwrap();
        assert_eq!(output, "{\"message\":\"added\"}\n{\"error\":\"bad input\"}\n");
    }

    #[test]
    fn test_format_date() {
        let date = parse_date("2024-01-09").unwrap();
        assert_eq!(format_date(date, "%Y-%m-%d").unwrap(), "2024-01-09");
        assert_eq!(format_date(date, "%d/%m").unwrap(), "09/01");
    }
}
