// src/interactive.rs
// =============================================================================
// A small prompt for searching and paging without re-running the program.
//
//   github-lookup> octocat        search for a user, shows page 1
//   github-lookup> :page 3        show page 3 of the last search
//   github-lookup> :next / :prev  move one page
//   github-lookup> :help          list commands
//   github-lookup> :quit          leave (end of input works too)
//
// Page commands reuse the result of the last search; only a new username
// fetches from GitHub again. Problems are printed as a one-line alert and the
// prompt keeps going.
//
// Rust concepts:
// - Generic I/O: Any AsyncBufRead in, any Write out, so tests can use buffers
// =============================================================================

use anyhow::Result;
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::render::render_text;
use crate::search::{PageView, SearchController, SearchError};

const PROMPT: &str = "github-lookup> ";

const HELP: &str = "\
Commands:
  <username>   search for a GitHub user
  :page <n>    show page n of the last search
  :next        show the next page
  :prev        show the previous page
  :help        show this help
  :quit        exit";

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Search(String),
    Page(usize),
    Next,
    Previous,
    Help,
    Quit,
}

fn parse_command(line: &str) -> Result<Command, String> {
    let line = line.trim();

    let Some(rest) = line.strip_prefix(':') else {
        return Ok(Command::Search(line.to_string()));
    };

    let mut words = rest.split_whitespace();
    match (words.next(), words.next()) {
        (Some("page" | "p"), Some(number)) => number
            .parse()
            .map(Command::Page)
            .map_err(|_| format!("Not a page number: {number}")),
        (Some("page" | "p"), None) => Err("Usage: :page <number>".to_string()),
        (Some("next" | "n"), None) => Ok(Command::Next),
        (Some("prev" | "previous"), None) => Ok(Command::Previous),
        (Some("help" | "h"), None) => Ok(Command::Help),
        (Some("quit" | "q" | "exit"), None) => Ok(Command::Quit),
        _ => Err(format!("Unknown command: {line} (try :help)")),
    }
}

pub async fn run<R, W>(controller: &SearchController, input: R, mut output: W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();

    loop {
        write!(output, "{PROMPT}")?;
        output.flush()?;

        let Some(line) = lines.next_line().await? else {
            writeln!(output)?;
            break;
        };

        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(message) => {
                writeln!(output, "⚠️  {message}")?;
                continue;
            }
        };

        let result = match command {
            Command::Search(username) => controller.search(&username).await,
            Command::Page(page) => controller.show_page(page).await,
            Command::Next => controller.next_page().await,
            Command::Previous => controller.previous_page().await,
            Command::Help => {
                writeln!(output, "{HELP}")?;
                continue;
            }
            Command::Quit => break,
        };

        show(&mut output, result)?;
    }

    Ok(())
}

fn show<W: Write>(output: &mut W, result: Result<PageView, SearchError>) -> Result<()> {
    match result {
        Ok(view) => write!(output, "\n{}\n", render_text(&view))?,
        Err(e) => writeln!(output, "⚠️  {e}")?,
    }
    Ok(())
}
