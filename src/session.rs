// Event loop tying input commands to the store and the renderer

use crate::command::{self, Command};
use crate::error::StoreError;
use crate::models::{TaskId, TaskStatus};
use crate::render::Renderer;
use crate::store::TaskStore;
use clap::error::ErrorKind;
use eyre::{Context, Result};
use std::io::BufRead;
use tracing::{debug, info, warn};

/// Shown when an add is rejected; the specific reason follows it
pub const ADD_REJECTED: &str = "Please enter both a task and a date.";

/// Whether the loop should keep reading input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Owns the store for the lifetime of the application and redraws after
/// every change
pub struct Session<R: Renderer> {
    store: TaskStore,
    renderer: R,
}

impl<R: Renderer> Session<R> {
    pub fn new(store: TaskStore, renderer: R) -> Self {
        Self { store, renderer }
    }

    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn into_renderer(self) -> R {
        self.renderer
    }

    /// Recompute the view and hand it to the renderer
    pub fn redraw(&mut self) -> Result<()> {
        let view = self.store.view();
        self.renderer.render(&view)
    }

    /// Read commands until input ends or `quit` is entered
    ///
    /// Draws the initial list before reading. Unparseable lines are
    /// reported and skipped.
    pub fn run<B: BufRead>(&mut self, input: B, prompt: Option<&str>) -> Result<()> {
        info!(tasks = self.store.len(), filter = %self.store.filter(), "Session started");
        self.redraw()?;

        let mut lines = input.lines();
        let mut line_num = 0;
        loop {
            if let Some(prompt) = prompt {
                self.renderer.prompt(prompt)?;
            }
            let Some(line) = lines.next() else {
                break;
            };
            let line = line.context("Failed to read command input")?;
            line_num += 1;

            let command = match command::parse_line(&line) {
                Ok(Some(command)) => command,
                Ok(None) => continue,
                Err(e) => {
                    let text = e.render().to_string();
                    match e.kind() {
                        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                            self.renderer.message(text.trim_end())?;
                        }
                        _ => {
                            warn!(line = line_num, input = %line, "Failed to parse command, skipping");
                            self.renderer.error(text.trim_end())?;
                        }
                    }
                    continue;
                }
            };

            if self.execute(command)? == Flow::Quit {
                break;
            }
        }

        info!(tasks = self.store.len(), "Session ended");
        Ok(())
    }

    /// Apply one command and redraw when state changed
    pub fn execute(&mut self, command: Command) -> Result<Flow> {
        debug!(?command, "execute: called");

        match command {
            Command::Add { due, text } => {
                let text = text.join(" ");
                let result = match due {
                    Some(due) => self.store.add(&text, &due),
                    None => {
                        let today = self.store.today();
                        self.store.add_dated(&text, today)
                    }
                };
                match result {
                    Ok(task) => {
                        info!(id = %task.id(), due_date = %task.due_date(), "Task added");
                        self.redraw()?;
                    }
                    Err(e) => self.report(e)?,
                }
            }
            Command::Done { id } => self.set_status(id, TaskStatus::Completed)?,
            Command::Undo { id } => self.set_status(id, TaskStatus::Pending)?,
            Command::Toggle { id } => match self.store.toggle(id) {
                Ok(_) => self.redraw()?,
                Err(e) => self.report(e)?,
            },
            Command::Delete { id } => match self.store.remove(id) {
                Ok(()) => {
                    info!(id = %id, "Task deleted");
                    self.redraw()?;
                }
                Err(e) => self.report(e)?,
            },
            Command::Filter { filter } => match self.store.set_filter_named(&filter) {
                Ok(()) => self.redraw()?,
                Err(e) => self.report(e)?,
            },
            Command::List => self.redraw()?,
            Command::Help => {
                let help = command::help_text();
                self.renderer.message(help.trim_end())?;
            }
            Command::Quit => return Ok(Flow::Quit),
        }

        Ok(Flow::Continue)
    }

    /// Toggle only when the task is not already in `target`
    ///
    /// A repeated "Done" on a completed task is a redundant event, not a
    /// request to undo it.
    fn set_status(&mut self, id: TaskId, target: TaskStatus) -> Result<()> {
        let current = match self.store.get(id) {
            Some(task) => task.status(),
            None => return self.report(StoreError::NotFound(id)),
        };

        if current == target {
            debug!(id = %id, status = %current, "set_status: already in target state");
            return Ok(());
        }

        match self.store.toggle(id) {
            Ok(_) => self.redraw(),
            Err(e) => self.report(e),
        }
    }

    fn report(&mut self, err: StoreError) -> Result<()> {
        if err.is_ignorable() {
            debug!(error = %err, "Ignoring command for unknown task");
            return Ok(());
        }

        match &err {
            StoreError::Validation(reason) => {
                self.renderer.error(&format!("{} ({})", ADD_REJECTED, reason))
            }
            _ => self.renderer.error(&err.to_string()),
        }
    }
}
