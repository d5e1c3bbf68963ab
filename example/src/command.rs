use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use tessera_date_panel::{Granularity, StepDirection, calendar::parse_date};

/// One line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Step(StepDirection),
    Pick(NaiveDate),
    View(Granularity),
    Mode(Granularity),
    Value(NaiveDate),
    Help,
    Quit,
}

pub const HELP: &str = "\
commands:
  prev | next | today     page the header
  pick YYYY-MM-DD         click the cell selecting that date
  view year|month|date    switch the grid from the header
  mode year|month|date    change the mode prop
  value YYYY-MM-DD        change the value prop
  help                    show this message
  quit                    exit";

pub fn parse(line: &str) -> Result<Command> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        bail!("empty command");
    };
    let arg = words.next();
    if words.next().is_some() {
        bail!("too many arguments to `{head}`");
    }

    let command = match (head, arg) {
        ("prev" | "p", None) => Command::Step(StepDirection::Previous),
        ("next" | "n", None) => Command::Step(StepDirection::Next),
        ("today" | "t", None) => Command::Step(StepDirection::Today),
        ("pick", Some(text)) => Command::Pick(parse_date(text)?),
        ("view", Some(text)) => Command::View(text.parse()?),
        ("mode", Some(text)) => Command::Mode(text.parse()?),
        ("value", Some(text)) => {
            Command::Value(parse_date(text).with_context(|| format!("bad value for `{head}`"))?)
        }
        ("help" | "?", None) => Command::Help,
        ("quit" | "q" | "exit", None) => Command::Quit,
        (other, _) => bail!("unknown command `{other}`, try `help`"),
    };
    Ok(command)
}
