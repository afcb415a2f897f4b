//! Commands accepted by the interactive shell.

use crate::model::{DietTag, HealthTag};

pub const HELP: &str = "\
Commands:
  search <text>       search recipes
  diet <tag|none>     set or clear the diet filter
  health <tag|none>   set or clear the health filter
  open <n>            show result n in the detail panel
  save                save or unsave the recipe in the detail panel
  close               close the detail panel
  favorites           show the favorites panel
  fav-open <n>        open favorite n
  fav-remove <n>      remove favorite n
  fav-close           close the favorites panel
  explore             list the available filters
  help                show this help
  quit                exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Search(String),
    Diet(Option<DietTag>),
    Health(Option<HealthTag>),
    Open(usize),
    Save,
    Close,
    Favorites,
    FavOpen(usize),
    FavRemove(usize),
    FavClose,
    Explore,
    Help,
    Quit,
}

/// Parse one input line. Returns `Ok(None)` for a blank line and
/// `Err(message)` for anything that is not a valid command.
pub fn parse_command(line: &str) -> Result<Option<Command>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_ascii_lowercase().as_str() {
        "search" | "s" => Command::Search(rest.to_string()),
        "diet" => Command::Diet(parse_optional_tag(rest)?),
        "health" => Command::Health(parse_optional_tag(rest)?),
        "open" | "o" => Command::Open(parse_position(rest)?),
        "save" => Command::Save,
        "close" => Command::Close,
        "favorites" | "favs" => Command::Favorites,
        "fav-open" => Command::FavOpen(parse_position(rest)?),
        "fav-remove" => Command::FavRemove(parse_position(rest)?),
        "fav-close" => Command::FavClose,
        "explore" => Command::Explore,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => return Err(format!("Unknown command: {}", other)),
    };
    Ok(Some(command))
}

fn parse_optional_tag<T>(value: &str) -> Result<Option<T>, String>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    if value.is_empty() {
        return Err("Missing tag (use \"none\" to clear)".to_string());
    }
    if value.eq_ignore_ascii_case("none") {
        return Ok(None);
    }
    value.parse().map(Some).map_err(|e: T::Err| e.to_string())
}

/// Parse a 1-based position into a 0-based index.
fn parse_position(value: &str) -> Result<usize, String> {
    match value.parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n - 1),
        _ => Err(format!("Expected a number from 1, got {:?}", value)),
    }
}
