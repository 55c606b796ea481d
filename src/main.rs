use clap::Parser;
use eyre::{Context, Result};
use std::fs::File;
use std::io::{self, BufReader, IsTerminal};
use std::path::PathBuf;
use tasklist::{
    Clock, Config, Filter, FixedClock, JsonlRenderer, OutputFormat, Renderer, Session, SystemClock, TaskStore,
    TextRenderer, parse_date,
};
use tracing::{Level, debug};

#[derive(Parser)]
#[command(name = "tasklist")]
#[command(about = "Interactive task list with due dates, filters and overdue tracking")]
#[command(version = env!("GIT_DESCRIBE"))]
struct Cli {
    /// Path to the config file (default: <config dir>/tasklist/config.yaml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Read commands from a file instead of stdin
    #[arg(short, long)]
    script: Option<PathBuf>,

    /// Output format (overrides config)
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// Initial filter: all, pending or completed (overrides config)
    #[arg(long)]
    filter: Option<String>,

    /// Treat this date (YYYY-MM-DD) as today
    #[arg(long)]
    today: Option<String>,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup tracing
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::WARN })
        .init();

    let config = Config::load(cli.config.as_deref())?;
    debug!(?config, "Effective config before overrides");

    let clock: Box<dyn Clock> = match &cli.today {
        Some(today) => {
            let date = parse_date(today).with_context(|| format!("Invalid --today date: {}", today))?;
            Box::new(FixedClock(date))
        }
        None => Box::new(SystemClock),
    };

    let filter: Filter = match &cli.filter {
        Some(name) => name.parse()?,
        None => config.default_filter,
    };

    let mut store = TaskStore::with_clock(clock);
    store.set_filter(filter);

    let interactive = cli.script.is_none() && io::stdin().is_terminal();
    let prompt = interactive.then_some(config.prompt.as_str());
    let color = config.color && !cli.no_color && io::stdout().is_terminal();

    match cli.format.unwrap_or(config.output) {
        OutputFormat::Text => {
            let renderer = TextRenderer::new(io::stdout())
                .with_date_format(config.date_format.clone())
                .with_color(color);
            run(&cli, Session::new(store, renderer), prompt)
        }
        OutputFormat::Jsonl => run(&cli, Session::new(store, JsonlRenderer::new(io::stdout())), prompt),
    }
}

fn run<R: Renderer>(cli: &Cli, mut session: Session<R>, prompt: Option<&str>) -> Result<()> {
    match &cli.script {
        Some(path) => {
            let file = File::open(path).with_context(|| format!("Failed to open script {}", path.display()))?;
            session.run(BufReader::new(file), prompt)
        }
        None => session.run(io::stdin().lock(), prompt),
    }
}
