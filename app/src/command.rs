use common::{models::TimeRange, Error, Result};
use std::str::FromStr;

pub const HELP: &str = "\
Commands:
  home              featured chart and trending coins
  list              market table
  next | prev       move one page in the market table
  page <n>          jump to page n
  open <coin-id>    detail view for a coin (e.g. open bitcoin)
  range <r>         chart range: 1d, 7d, 30d, 1y
  refresh           refetch the current view
  help              this message
  quit              exit";

/// One line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Home,
    List,
    Next,
    Previous,
    Page(usize),
    Open(String),
    Range(TimeRange),
    Refresh,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = Error;

    fn from_str(line: &str) -> Result<Self> {
        let mut words = line.split_whitespace();
        let verb = words
            .next()
            .ok_or_else(|| Error::ParseError("Empty command".to_string()))?
            .to_lowercase();
        let arg = words.next();

        let command = match (verb.as_str(), arg) {
            ("home", None) => Command::Home,
            ("list" | "trending", None) => Command::List,
            ("next" | "n", None) => Command::Next,
            ("prev" | "previous" | "p", None) => Command::Previous,
            ("page", Some(n)) => Command::Page(
                n.parse()
                    .map_err(|_| Error::ParseError(format!("Invalid page number: {}", n)))?,
            ),
            ("open", Some(id)) => Command::Open(id.to_lowercase()),
            ("range", Some(r)) => Command::Range(r.parse()?),
            ("refresh" | "r", None) => Command::Refresh,
            ("help" | "?", None) => Command::Help,
            ("quit" | "exit" | "q", None) => Command::Quit,
            _ => {
                return Err(Error::ParseError(format!(
                    "Unknown command: {}. Type 'help' for the list of commands",
                    line.trim()
                )))
            }
        };

        if words.next().is_some() {
            return Err(Error::ParseError(format!(
                "Too many arguments: {}",
                line.trim()
            )));
        }
        Ok(command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_navigation() {
        assert_eq!("next".parse::<Command>().unwrap(), Command::Next);
        assert_eq!("P".parse::<Command>().unwrap(), Command::Previous);
        assert_eq!("page 3".parse::<Command>().unwrap(), Command::Page(3));
        assert_eq!("list".parse::<Command>().unwrap(), Command::List);
    }

    #[test]
    fn parses_detail_commands() {
        assert_eq!(
            "open Bitcoin".parse::<Command>().unwrap(),
            Command::Open("bitcoin".to_string())
        );
        assert_eq!(
            "range 30d".parse::<Command>().unwrap(),
            Command::Range(TimeRange::ThirtyDays)
        );
    }

    #[test]
    fn rejects_bad_input() {
        assert!("".parse::<Command>().is_err());
        assert!("open".parse::<Command>().is_err());
        assert!("page two".parse::<Command>().is_err());
        assert!("range 5y".parse::<Command>().is_err());
        assert!("next please".parse::<Command>().is_err());
        assert!("dance".parse::<Command>().is_err());
    }
}
