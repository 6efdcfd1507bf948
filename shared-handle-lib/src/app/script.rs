use core::fmt::{self, Display};

/// One line of a handle script. Slots are named handles owning `i64` values.
#[derive(Debug, PartialEq)]
pub enum Command {
    New(String, i64),
    Empty(String),
    Copy(String, String),
    Move(String, String),
    Assign(String, String),
    AssignMove(String, String),
    Drop(String),
    Reset(String),
    ResetWith(String, i64),
    Swap(String, String),
    Show(String),
    Deref(String),
}

#[derive(Debug, PartialEq)]
pub enum ScriptError {
    UnknownCommand { line: usize, name: String },
    WrongArgumentCount { line: usize, name: String },
    InvalidValue { line: usize, value: String },
    UndefinedSlot { line: usize, slot: String },
}

impl Display for ScriptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScriptError::UnknownCommand { line, name } => {
                write!(f, "line {line}: unknown command `{name}`")
            }
            ScriptError::WrongArgumentCount { line, name } => {
                write!(f, "line {line}: wrong number of arguments for `{name}`")
            }
            ScriptError::InvalidValue { line, value } => {
                write!(f, "line {line}: invalid value `{value}`")
            }
            ScriptError::UndefinedSlot { line, slot } => {
                write!(f, "line {line}: undefined slot `{slot}`")
            }
        }
    }
}

impl std::error::Error for ScriptError {}

fn parse_value(line: usize, value: &str) -> Result<i64, ScriptError> {
    value.parse().map_err(|_| ScriptError::InvalidValue {
        line,
        value: value.to_string(),
    })
}

fn s(slot: &str) -> String {
    slot.to_string()
}

/// Parses one line. Blank lines and `#` comments give `None`.
pub fn parse_line(line: usize, text: &str) -> Result<Option<Command>, ScriptError> {
    let mut tokens = text.split_whitespace();
    let name = match tokens.next() {
        None => return Ok(None),
        Some(name) if name.starts_with('#') => return Ok(None),
        Some(name) => name,
    };
    let args: Vec<&str> = tokens.collect();
    let command = match (name, args.as_slice()) {
        ("new", [a, v]) => Command::New(s(a), parse_value(line, v)?),
        ("empty", [a]) => Command::Empty(s(a)),
        ("copy", [a, b]) => Command::Copy(s(a), s(b)),
        ("move", [a, b]) => Command::Move(s(a), s(b)),
        ("assign", [a, b]) => Command::Assign(s(a), s(b)),
        ("assign_move", [a, b]) => Command::AssignMove(s(a), s(b)),
        ("drop", [a]) => Command::Drop(s(a)),
        ("reset", [a]) => Command::Reset(s(a)),
        ("reset", [a, v]) => Command::ResetWith(s(a), parse_value(line, v)?),
        ("swap", [a, b]) => Command::Swap(s(a), s(b)),
        ("show", [a]) => Command::Show(s(a)),
        ("deref", [a]) => Command::Deref(s(a)),
        (
            "new" | "empty" | "copy" | "move" | "assign" | "assign_move" | "drop" | "reset"
            | "swap" | "show" | "deref",
            _,
        ) => {
            return Err(ScriptError::WrongArgumentCount {
                line,
                name: name.to_string(),
            })
        }
        _ => {
            return Err(ScriptError::UnknownCommand {
                line,
                name: name.to_string(),
            })
        }
    };
    Ok(Some(command))
}

/// Parses a whole script. Each command is paired with its 1-based line number.
pub fn parse(script: &str) -> Result<Vec<(usize, Command)>, ScriptError> {
    script
        .lines()
        .enumerate()
        .filter_map(|(i, text)| {
            let line = i + 1;
            parse_line(line, text)
                .map(|command| command.map(|c| (line, c)))
                .transpose()
        })
        .collect()
}
