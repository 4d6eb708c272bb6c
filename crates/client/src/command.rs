//! Line commands understood by the REPL.

use anyhow::{Context, Result, anyhow, bail};

use escape_core::{CoreId, Direction, GameConfig, Language};

/// One parsed input line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReplCommand {
    Help,
    Start,
    Intro,
    State,
    Codex,
    /// Selects a knowledge entry and prints it.
    Read(String),
    Inventory,
    /// Dial number is one-based, the position is the symbol index.
    Dial { dial: usize, position: u8 },
    Manifesto,
    Key,
    Navigate(Direction),
    /// One-based room number.
    Room(usize),
    Play(CoreId),
    Answer(String),
    Retry,
    Close,
    Assemble(CoreId),
    Badge,
    /// `None` toggles between the two languages.
    Language(Option<Language>),
    Hint,
    Sound,
    /// One-based room number; `revoke` also clears its completion flag.
    Reset { room: usize, revoke: bool },
    Save,
    Quit,
}

impl ReplCommand {
    /// Parses one input line. Blank lines yield `Ok(None)`.
    pub fn parse(line: &str) -> Result<Option<Self>> {
        let line = line.trim();
        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };
        if verb.is_empty() {
            return Ok(None);
        }

        let command = match verb.to_lowercase().as_str() {
            "help" | "?" => Self::Help,
            "start" => Self::Start,
            "intro" => Self::Intro,
            "state" | "look" => Self::State,
            "codex" | "knowledge" => Self::Codex,
            "read" => Self::Read(required(rest, "read <knowledge-id>")?.to_owned()),
            "inventory" | "inv" => Self::Inventory,
            "dial" => parse_dial(rest)?,
            "manifesto" => Self::Manifesto,
            "key" => Self::Key,
            "next" | "forward" => Self::Navigate(Direction::Forward),
            "back" | "prev" => Self::Navigate(Direction::Back),
            "room" => Self::Room(parse_room(rest)?),
            "play" => Self::Play(parse_core(rest, "play <core>")?),
            "answer" | "a" => Self::Answer(required(rest, "answer <text>")?.to_owned()),
            "retry" => Self::Retry,
            "close" => Self::Close,
            "assemble" => Self::Assemble(parse_core(rest, "assemble <core>")?),
            "badge" => Self::Badge,
            "lang" | "language" => Self::Language(if rest.is_empty() {
                None
            } else {
                Some(
                    rest.parse()
                        .map_err(|_| anyhow!("unknown language '{rest}' (en, vi)"))?,
                )
            }),
            "hint" => Self::Hint,
            "sound" => Self::Sound,
            "reset" => parse_reset(rest)?,
            "save" => Self::Save,
            "quit" | "exit" | "q" => Self::Quit,
            other => bail!("unknown command '{other}', type 'help' for a list"),
        };
        Ok(Some(command))
    }
}

pub const HELP: &str = "\
commands:
  start | intro                 leave or return to the intro screen
  state | codex | inventory     show progress, knowledge, items
  read <id>                     open a knowledge entry
  dial <1-4> <0-3>              turn a dial on the Room 1 box
  manifesto | key               search the desk, take the key
  next | back | room <n>        move between rooms
  play <core>                   start the mini-game guarding a core
  answer <text|n>               answer the current question (n picks an option)
  retry | close                 restart a lost run, leave the mini-game
  assemble <core> | badge       build the machines, claim the badge
  lang [en|vi] | hint | sound   presentation toggles
  reset <n> [revoke]            reset a room's puzzle
  save | quit";

fn required<'a>(rest: &'a str, usage: &str) -> Result<&'a str> {
    if rest.is_empty() {
        bail!("usage: {usage}");
    }
    Ok(rest)
}

fn parse_core(rest: &str, usage: &str) -> Result<CoreId> {
    Ok(CoreId::parse(required(rest, usage)?)?)
}

fn parse_room(rest: &str) -> Result<usize> {
    let number: usize = required(rest, "room <n>")?
        .parse()
        .with_context(|| format!("'{rest}' is not a room number"))?;
    if number == 0 || number > GameConfig::ROOM_COUNT {
        bail!("rooms are numbered 1 to {}", GameConfig::ROOM_COUNT);
    }
    Ok(number)
}

fn parse_dial(rest: &str) -> Result<ReplCommand> {
    let mut parts = rest.split_whitespace();
    let (Some(dial), Some(position), None) = (parts.next(), parts.next(), parts.next()) else {
        bail!("usage: dial <1-{}> <0-{}>", GameConfig::DIAL_COUNT, GameConfig::DIAL_POSITIONS - 1);
    };
    let dial: usize = dial.parse().with_context(|| format!("'{dial}' is not a dial number"))?;
    if dial == 0 {
        bail!("dials are numbered from 1");
    }
    let position: u8 = position
        .parse()
        .with_context(|| format!("'{position}' is not a dial position"))?;
    Ok(ReplCommand::Dial { dial, position })
}

fn parse_reset(rest: &str) -> Result<ReplCommand> {
    let mut parts = rest.split_whitespace();
    let room = parse_room(parts.next().unwrap_or_default())?;
    let revoke = match parts.next() {
        None => false,
        Some("revoke") => true,
        Some(other) => bail!("unknown reset option '{other}' (expected 'revoke')"),
    };
    Ok(ReplCommand::Reset { room, revoke })
}
