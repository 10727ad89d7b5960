//! Interactive mode: parameter edits from stdin, debounced recomputation
//!
//! Input lines are read on a background thread and forwarded over a channel;
//! the controller itself only ever runs on the calling thread. Between lines
//! the loop waits until the next debounced run is due.

use std::io::{BufRead, Write};
use std::sync::mpsc::{Receiver, RecvTimeoutError, channel};
use std::thread;
use std::time::Instant;

use retsim_core::{Presenter, SimulationController};

use crate::presenter::CliPresenter;

pub const HELP: &str = "commands: drift <pct> | vol <pct> | months <n> | regen | table | help | quit";

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    Drift(f64),
    Volatility(f64),
    Months(u32),
    Regenerate,
    ToggleTable,
    Help,
    Quit,
}

/// Parse one input line; `Ok(None)` for blank lines
pub fn parse_command(line: &str) -> Result<Option<Command>, String> {
    let mut parts = line.split_whitespace();
    let Some(word) = parts.next() else {
        return Ok(None);
    };
    let arg = parts.next();

    fn number<T: std::str::FromStr>(word: &str, arg: Option<&str>) -> Result<T, String> {
        let arg = arg.ok_or_else(|| format!("'{word}' needs a value"))?;
        arg.parse()
            .map_err(|_| format!("'{arg}' is not a valid value for '{word}'"))
    }

    let command = match word.to_ascii_lowercase().as_str() {
        "drift" | "d" => Command::Drift(number(word, arg)?),
        "volatility" | "vol" | "v" => Command::Volatility(number(word, arg)?),
        "months" | "horizon" | "m" => Command::Months(number(word, arg)?),
        "regen" | "regenerate" | "r" => Command::Regenerate,
        "table" | "t" => Command::ToggleTable,
        "help" | "h" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => return Err(format!("unknown command '{other}'")),
    };
    Ok(Some(command))
}

/// Forward stdin lines over a channel until EOF
pub fn spawn_stdin_reader() -> Receiver<String> {
    let (tx, rx) = channel();
    thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}

/// Drive the controller from input lines until `quit` or end of input.
///
/// A pending debounced run is flushed when input ends, so the last edit is
/// never lost.
pub fn run<W, E>(
    controller: &mut SimulationController<CliPresenter<W, E>>,
    input: Receiver<String>,
) where
    W: Write + 'static,
    E: Write + 'static,
{
    loop {
        let received = match controller.next_due() {
            Some(due) => input.recv_timeout(due.saturating_duration_since(Instant::now())),
            None => input.recv().map_err(|_| RecvTimeoutError::Disconnected),
        };

        match received {
            Ok(line) => match parse_command(&line) {
                Ok(Some(Command::Quit)) => break,
                Ok(Some(command)) => handle(controller, command),
                Ok(None) => {}
                Err(msg) => eprintln!("{msg}\n{HELP}"),
            },
            Err(RecvTimeoutError::Timeout) => {
                controller.tick(Instant::now());
            }
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }

    if let Some(due) = controller.next_due() {
        controller.tick(due);
    }
}

fn handle<W, E>(controller: &mut SimulationController<CliPresenter<W, E>>, command: Command)
where
    W: Write + 'static,
    E: Write + 'static,
{
    let params = *controller.params();
    let now = Instant::now();
    match command {
        Command::Drift(drift) => controller.set_params(now, params.with_drift(drift)),
        Command::Volatility(vol) => controller.set_params(now, params.with_volatility(vol)),
        Command::Months(months) => controller.set_params(now, params.with_horizon_months(months)),
        Command::Regenerate => {
            controller.regenerate();
        }
        Command::ToggleTable => {
            let shown = controller.presenter_mut().toggle_table();
            tracing::debug!(shown, "Toggled table");
            // Presentation-only: re-render the last outcome
            if let Some(outcome) = controller.last_outcome().cloned() {
                controller.presenter_mut().present(&outcome);
            }
        }
        Command::Help => eprintln!("{HELP}"),
        Command::Quit => {}
    }
}
