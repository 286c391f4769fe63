use std::sync::Arc;

use movie_finder::{
    host::{ClickTarget, TerminalHost, UiEvent},
    services::HttpMovieApi,
    Config, Widget,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const HELP: &str = "\
commands:
  type <text>                    change the search input (empty clears it)
  pick <n>                       select suggestion n (1-based)
  click input|panel|outside      pointer interaction
  toggle <genre>                 flip a genre chip
  submit                         fetch recommendations for the selected genres
  genres                         list available genres
  help                           show this message
  quit                           exit";

/// Parses one REPL line into a widget event
fn parse_command(line: &str) -> Result<Option<UiEvent>, String> {
    let line = line.trim();
    let (command, rest) = line.split_once(' ').unwrap_or((line, ""));

    let event = match command {
        "type" => UiEvent::Input(rest.to_string()),
        "pick" => {
            let n: usize = rest
                .trim()
                .parse()
                .map_err(|_| format!("not a suggestion number: {rest}"))?;
            if n == 0 {
                return Err("suggestions are numbered from 1".to_string());
            }
            UiEvent::SuggestionClicked(n - 1)
        }
        "click" => match rest.trim() {
            "input" => UiEvent::Click(ClickTarget::Input),
            "panel" => UiEvent::Click(ClickTarget::SuggestionPanel),
            "outside" => UiEvent::Click(ClickTarget::Outside),
            other => return Err(format!("unknown click target: {other}")),
        },
        "toggle" => UiEvent::ChipClicked(rest.trim().to_string()),
        "submit" => UiEvent::SubmitClicked,
        "" => return Ok(None),
        other => return Err(format!("unknown command: {other} (try `help`)")),
    };
    Ok(Some(event))
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "movie_finder=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::from_env()?;
    let api = HttpMovieApi::new(&config.api_base_url)?;
    tracing::info!(api_url = %config.api_base_url, "Movie finder starting");

    let widget = Widget::new(
        Arc::new(api),
        Arc::new(TerminalHost::new()),
        config.widget(),
    );

    let starter = widget.clone();
    tokio::spawn(async move { starter.start().await });

    println!("{HELP}");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match line.trim() {
            "quit" | "exit" => break,
            "help" => println!("{HELP}"),
            "genres" => println!("{}", widget.genres().presented().join(", ")),
            _ => match parse_command(&line) {
                Ok(Some(event)) => {
                    let widget = widget.clone();
                    tokio::spawn(async move { widget.dispatch(event).await });
                }
                Ok(None) => {}
                Err(message) => eprintln!("{message}"),
            },
        }
    }

    Ok(())
}
