use std::io::stdout;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};

use search_ui::config::{CONFIG, Config, ResponseOrdering};
use search_ui::controller::SearchController;
use search_ui::navigator::TerminalNavigator;
use search_ui::view::TerminalView;

/// Search from the terminal. Type a query to search, a result number to open
/// it, `/` before a query that is itself a number, `:q` to quit.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Search API base URL
    #[arg(long, env = "SEARCH_API_BASE_URL")]
    search_api_url: Option<String>,

    /// ML API base URL
    #[arg(long, env = "ML_API_BASE_URL")]
    ml_api_url: Option<String>,

    /// Only render the response to the most recently submitted search
    #[arg(long)]
    latest_wins: bool,

    /// Open clicked results with the system URL handler
    #[arg(long)]
    open: bool,

    #[arg(long, default_value = "warn")]
    log_level: tracing::Level,

    /// Query to run before reading from stdin
    query: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Reads .env before clap looks at the environment
    let defaults = CONFIG.clone();
    let args = Args::parse();

    // Also picks up records from the log crate
    tracing_subscriber::fmt()
        .with_max_level(args.log_level)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let ordering = if args.latest_wins {
        ResponseOrdering::LatestSubmission
    } else {
        ResponseOrdering::ArrivalOrder
    };
    let config = Config::new(
        args.search_api_url.unwrap_or(defaults.search_api_base_url),
        args.ml_api_url.unwrap_or(defaults.ml_api_base_url),
    )
    .with_ordering(ordering);
    tracing::info!(?config, "starting search ui");

    let controller = Arc::new(SearchController::new(
        &config,
        Arc::new(TerminalView::new(stdout())),
        Arc::new(TerminalNavigator::new(args.open)),
    ));

    if let Some(query) = args.query {
        controller.perform_search(&query).await;
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("failed to read stdin")? {
        match Input::parse(line) {
            Input::Quit => break,
            Input::Open(number) => {
                match number.checked_sub(1).map(|index| controller.activate(index)) {
                    Some(Ok(_)) => {}
                    Some(Err(e)) => eprintln!("{e}"),
                    None => eprintln!("results are numbered from 1"),
                }
            }
            Input::Search(query) => {
                // Searches run concurrently, like repeated form submissions.
                let controller = controller.clone();
                tokio::spawn(async move {
                    controller.perform_search(&query).await;
                });
            }
        }
    }
    Ok(())
}

#[derive(Debug, PartialEq, Eq)]
enum Input {
    Quit,
    /// Result number as shown, counted from 1.
    Open(usize),
    Search(String),
}

impl Input {
    /// `:q` quits, a bare number opens that result, a leading `/` forces the
    /// rest of the line to be searched, anything else is a query as typed.
    fn parse(line: String) -> Input {
        if line == ":q" {
            return Input::Quit;
        }
        if let Some(query) = line.strip_prefix('/') {
            return Input::Search(query.to_string());
        }
        match line.trim().parse::<usize>() {
            Ok(number) => Input::Open(number),
            Err(_) => Input::Search(line),
        }
    }
}

#[test]
fn test_input_parsing() {
    assert_eq!(Input::parse(":q".to_string()), Input::Quit);
    assert_eq!(Input::parse(" 2 ".to_string()), Input::Open(2));
    assert_eq!(Input::parse("2024".to_string()), Input::Open(2024));
    assert_eq!(Input::parse("/2024".to_string()), Input::Search("2024".to_string()));
    assert_eq!(Input::parse("/".to_string()), Input::Search(String::new()));
    assert_eq!(Input::parse("//etc".to_string()), Input::Search("/etc".to_string()));
    assert_eq!(Input::parse("rust vs go".to_string()), Input::Search("rust vs go".to_string()));
    assert_eq!(Input::parse("".to_string()), Input::Search(String::new()));
}
