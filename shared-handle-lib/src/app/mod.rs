pub mod script;

use io_trait::Io;
use log::{debug, info};
use std::{
    collections::BTreeMap,
    io::{self, Error},
};

use crate::mem::handle::LocalHandle;

use self::script::{parse, Command, ScriptError};

type Handle = LocalHandle<i64>;

type Slots = BTreeMap<String, Handle>;

/// Reads the handle script named by the first argument, runs it and writes the trace to the
/// path named by the second argument.
pub fn run(io: &impl Io) -> io::Result<()> {
    let mut a = io.args();
    a.next();
    let input = a
        .next()
        .ok_or_else(|| Error::other("missing input path"))?;
    let output = a
        .next()
        .ok_or_else(|| Error::other("missing output path"))?;

    let script = io.read_to_string(input.as_str())?;
    let commands = parse(&script).map_err(Error::other)?;
    let trace = execute(&commands).map_err(Error::other)?;
    info!("{input}: {} commands executed", commands.len());
    io.write(output.as_str(), trace.as_bytes())
}

fn undefined(line: usize, slot: &str) -> ScriptError {
    ScriptError::UndefinedSlot {
        line,
        slot: slot.to_string(),
    }
}

fn slot<'a>(slots: &'a Slots, line: usize, name: &str) -> Result<&'a Handle, ScriptError> {
    slots.get(name).ok_or_else(|| undefined(line, name))
}

fn slot_mut<'a>(
    slots: &'a mut Slots,
    line: usize,
    name: &str,
) -> Result<&'a mut Handle, ScriptError> {
    slots.get_mut(name).ok_or_else(|| undefined(line, name))
}

/// Applies `f` to two distinct slots. When `a` and `b` name the same slot, only checks that it
/// exists.
fn pair(
    slots: &mut Slots,
    line: usize,
    a: &str,
    b: &str,
    f: impl FnOnce(&mut Handle, &mut Handle),
) -> Result<(), ScriptError> {
    if a == b {
        return slot(slots, line, a).map(|_| ());
    }
    let mut source = slots.remove(b).ok_or_else(|| undefined(line, b))?;
    let result = slot_mut(slots, line, a).map(|target| f(target, &mut source));
    slots.insert(b.to_string(), source);
    result
}

/// Executes the commands and returns the trace written by `show` and `deref`.
pub fn execute(commands: &[(usize, Command)]) -> Result<String, ScriptError> {
    let mut slots = Slots::new();
    let mut trace = String::new();
    for (line, command) in commands {
        let line = *line;
        debug!("line {line}: {command:?}");
        match command {
            Command::New(a, v) => {
                slots.insert(a.clone(), Handle::from_value(*v));
            }
            Command::Empty(a) => {
                slots.insert(a.clone(), Handle::new());
            }
            Command::Copy(a, b) => {
                let handle = slot(&slots, line, b)?.clone();
                slots.insert(a.clone(), handle);
            }
            Command::Move(a, b) => {
                let handle = slot_mut(&mut slots, line, b)?.take();
                slots.insert(a.clone(), handle);
            }
            Command::Assign(a, b) => pair(&mut slots, line, a, b, |target, source| {
                target.assign(source);
            })?,
            Command::AssignMove(a, b) => pair(&mut slots, line, a, b, |target, source| {
                target.assign_move(source);
            })?,
            Command::Drop(a) => {
                slots.remove(a).ok_or_else(|| undefined(line, a))?;
            }
            Command::Reset(a) => slot_mut(&mut slots, line, a)?.reset(),
            Command::ResetWith(a, v) => slot_mut(&mut slots, line, a)?.reset_with(*v),
            Command::Swap(a, b) => pair(&mut slots, line, a, b, |x, y| x.swap(y))?,
            Command::Show(a) => {
                let handle = slot(&slots, line, a)?;
                trace.push_str(&match handle.as_ref() {
                    Some(v) => format!("{a}: value={v} use_count={}\n", handle.use_count()),
                    None => format!("{a}: empty\n"),
                });
            }
            Command::Deref(a) => {
                let handle = slot(&slots, line, a)?;
                trace.push_str(&match handle.try_deref() {
                    Ok(v) => format!("{a}: {v}\n"),
                    Err(e) => format!("{a}: {e}\n"),
                });
            }
        }
    }
    Ok(trace)
}
