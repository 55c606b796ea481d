//! Basic usage: add, toggle, filter, and delete tasks
//!
//! This walkthrough drives a TaskStore directly and prints each view with
//! the text renderer. The clock is pinned so the output is reproducible.
//!
//! Run with: cargo run --example basic_usage

use eyre::Result;
use std::io;
use tasklist::{Filter, FixedClock, Renderer, StoreError, TaskStore, TextRenderer, parse_date};

fn main() -> Result<()> {
    let today = parse_date("2024-03-02")?;
    let mut store = TaskStore::with_clock(Box::new(FixedClock(today)));
    let mut renderer = TextRenderer::new(io::stdout());

    println!("TaskList Basic Usage Example");
    println!("============================\n");
    println!("Today is {}\n", today);

    // ADD: a few tasks, deliberately out of date order
    println!("1. ADD - Creating three tasks...");
    let report = store.add("Write report", "2024-03-05")?;
    let milk = store.add("Buy milk", "2024-03-01")?;
    let call = store.add("Call mom", "2024-03-02")?;
    println!("   Created {}, {} and {}\n", report.id(), milk.id(), call.id());
    renderer.render(&store.view())?;
    println!();

    // VALIDATION: empty text is rejected and nothing is stored
    println!("2. VALIDATION - Adding a task without text...");
    match store.add("   ", "2024-03-10") {
        Err(StoreError::Validation(reason)) => println!("   Rejected: {}", reason),
        other => println!("   Unexpected result: {:?}", other),
    }
    println!("   Store still holds {} tasks\n", store.len());

    // TOGGLE: complete the overdue task
    println!("3. TOGGLE - Completing '{}'...", milk.text());
    let milk = store.toggle(milk.id())?;
    println!("   Status is now {}\n", milk.status());
    renderer.render(&store.view())?;
    println!();

    // FILTER: only what is left to do
    println!("4. FILTER - Showing pending tasks...");
    store.set_filter(Filter::Pending);
    renderer.render(&store.view())?;
    println!();

    // DELETE: removing twice reports not found the second time
    println!("5. DELETE - Removing '{}' twice...", call.text());
    store.remove(call.id())?;
    if let Err(e) = store.remove(call.id()) {
        println!("   Second delete: {}", e);
    }
    store.set_filter(Filter::All);
    renderer.render(&store.view())?;

    println!("\nExample complete!");
    Ok(())
}
