//! progcalc - standard/programmer calculator in the terminal.
//!
//! Usage:
//!   progcalc [options] [--eval SCRIPT]
//!
//! Examples:
//!   progcalc                                # Interactive calculator
//!   progcalc --mode programmer --base hex   # Start in programmer mode, HEX
//!   progcalc --eval "2 + 3 x 4 ="           # Prints 20
//!   progcalc --eval "PROG 12 AND 10 =" --json

use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    cursor::MoveToColumn,
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, Clear, ClearType},
};
use tokio::sync::mpsc;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use progcalc_core::{load_config, Base, CalcConfig, Calculator, InputEvent, Mode, Operator};

/// Standard and programmer calculator
#[derive(Parser, Debug)]
#[command(name = "progcalc")]
#[command(about = "Standard and programmer calculator")]
struct Args {
    /// Starting mode (standard, programmer)
    #[arg(short, long)]
    mode: Option<Mode>,

    /// Starting base in programmer mode (bin, oct, dec, hex)
    #[arg(short, long)]
    base: Option<Base>,

    /// JSON config file with default mode and base
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Run a key script instead of the interactive calculator
    #[arg(short, long)]
    eval: Option<String>,

    /// Print the final state as JSON (with --eval)
    #[arg(long)]
    json: bool,

    /// Log every key and transition to stderr
    #[arg(short, long)]
    trace: bool,
}

/// Messages from the terminal reader to the calculator loop.
enum Input {
    Key(InputEvent),
    Quit,
}

/// Translate crossterm key events to calculator input.
fn translate_key(code: KeyCode, modifiers: KeyModifiers) -> Option<Input> {
    if modifiers.contains(KeyModifiers::CONTROL) {
        return match code {
            KeyCode::Char('c') | KeyCode::Char('d') => Some(Input::Quit),
            _ => None,
        };
    }

    let event = match code {
        KeyCode::Char(c @ ('0'..='9' | 'a'..='f' | 'A'..='F' | '.')) => {
            InputEvent::from_key(c).ok()?
        }
        KeyCode::Char('+') => InputEvent::Operator(Operator::Add),
        KeyCode::Char('-') => InputEvent::Operator(Operator::Subtract),
        KeyCode::Char('*') | KeyCode::Char('x') => InputEvent::Operator(Operator::Multiply),
        KeyCode::Char('/') => InputEvent::Operator(Operator::Divide),
        KeyCode::Char('&') => InputEvent::Operator(Operator::And),
        KeyCode::Char('|') => InputEvent::Operator(Operator::Or),
        KeyCode::Char('^') => InputEvent::Operator(Operator::Xor),
        KeyCode::Char('~') | KeyCode::Char('!') => InputEvent::Operator(Operator::Not),
        KeyCode::Char('<') => InputEvent::Operator(Operator::ShiftLeft),
        KeyCode::Char('>') => InputEvent::Operator(Operator::ShiftRight),
        KeyCode::Char('=') | KeyCode::Enter => InputEvent::Equals,
        KeyCode::Backspace | KeyCode::Delete => InputEvent::Clear,
        KeyCode::F(1) => InputEvent::Mode(Mode::Standard),
        KeyCode::F(2) => InputEvent::Mode(Mode::Programmer),
        KeyCode::F(5) => InputEvent::Base(Base::Hex),
        KeyCode::F(6) => InputEvent::Base(Base::Dec),
        KeyCode::F(7) => InputEvent::Base(Base::Oct),
        KeyCode::F(8) => InputEvent::Base(Base::Bin),
        KeyCode::Esc | KeyCode::Char('q') => return Some(Input::Quit),
        _ => return None,
    };

    Some(Input::Key(event))
}

/// Install the stderr log subscriber.
fn init_logging(trace: bool) {
    let filter = if trace {
        EnvFilter::new("progcalc=trace,progcalc_core=trace")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Resolve the starting config: file first, then flags on top.
fn resolve_config(args: &Args) -> Result<CalcConfig, Box<dyn std::error::Error>> {
    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => CalcConfig::default(),
    };

    if let Some(mode) = args.mode {
        config.mode = mode;
    }
    if let Some(base) = args.base {
        config.base = base;
    }

    Ok(config)
}

/// Draw the current state on one line (raw mode).
fn render(calc: &Calculator) -> std::io::Result<()> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    let snapshot = calc.snapshot();

    execute!(handle, MoveToColumn(0), Clear(ClearType::CurrentLine))?;

    match &snapshot.views {
        Some(views) => {
            write!(handle, "[{} {}] {}  ", snapshot.mode, snapshot.base, snapshot.display)?;
            for base in Base::ALL {
                write!(handle, " | {} {}", base, views.get(base))?;
            }
        }
        None => write!(handle, "[{}] {}", snapshot.mode, snapshot.display)?,
    }

    handle.flush()
}

/// Run a key script and print the result.
fn run_eval(
    calc: &mut Calculator,
    script: &str,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    calc.run_script(script)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&calc.snapshot())?);
    } else {
        println!("{}", calc.display());
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    init_logging(args.trace);

    let config = resolve_config(&args)?;
    debug!(?config, "starting calculator");
    let mut calc = Calculator::with_config(&config);

    if let Some(script) = &args.eval {
        return run_eval(&mut calc, script, args.json);
    }

    eprintln!(
        "progcalc: digits/a-f, + - * / & | ^ ~ < >, Enter '=', Backspace clear, \
         F1/F2 mode, F5-F8 HEX/DEC/OCT/BIN, Esc quit"
    );

    // Enable raw mode (gracefully handle non-TTY)
    let raw_mode_enabled = enable_raw_mode().is_ok();

    let (input_tx, mut input_rx) = mpsc::channel::<Input>(64);

    // Spawn terminal input reader
    let input_handle = tokio::spawn(async move {
        loop {
            tokio::time::sleep(Duration::from_millis(10)).await;

            if !event::poll(Duration::from_millis(0)).unwrap_or(false) {
                continue;
            }
            let Ok(Event::Key(key_event)) = event::read() else {
                continue;
            };
            if key_event.kind != KeyEventKind::Press {
                continue;
            }
            if let Some(input) = translate_key(key_event.code, key_event.modifiers) {
                let quit = matches!(input, Input::Quit);
                if input_tx.send(input).await.is_err() || quit {
                    break; // Channel closed or quitting
                }
            }
        }
    });

    render(&calc)?;
    while let Some(input) = input_rx.recv().await {
        match input {
            Input::Key(event) => {
                calc.press(event);
                render(&calc)?;
            }
            Input::Quit => break,
        }
    }

    let _ = input_handle.await;

    // Disable raw mode if we enabled it
    if raw_mode_enabled {
        let _ = disable_raw_mode();
    }
    println!();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> Option<InputEvent> {
        match translate_key(code, KeyModifiers::NONE) {
            Some(Input::Key(event)) => Some(event),
            _ => None,
        }
    }

    #[test]
    fn test_translate_digits_and_letters() {
        assert_eq!(key(KeyCode::Char('7')), Some(InputEvent::Digit(7)));
        assert_eq!(key(KeyCode::Char('b')), Some(InputEvent::HexDigit('B')));
        assert_eq!(key(KeyCode::Char('.')), Some(InputEvent::DecimalPoint));
        assert_eq!(key(KeyCode::Char('z')), None);
    }

    #[test]
    fn test_translate_operators() {
        assert_eq!(
            key(KeyCode::Char('&')),
            Some(InputEvent::Operator(Operator::And))
        );
        assert_eq!(
            key(KeyCode::Char('<')),
            Some(InputEvent::Operator(Operator::ShiftLeft))
        );
        assert_eq!(key(KeyCode::Enter), Some(InputEvent::Equals));
        assert_eq!(key(KeyCode::Backspace), Some(InputEvent::Clear));
        assert_eq!(key(KeyCode::F(5)), Some(InputEvent::Base(Base::Hex)));
    }

    #[test]
    fn test_translate_quit() {
        assert!(matches!(
            translate_key(KeyCode::Esc, KeyModifiers::NONE),
            Some(Input::Quit)
        ));
        assert!(matches!(
            translate_key(KeyCode::Char('c'), KeyModifiers::CONTROL),
            Some(Input::Quit)
        ));
    }

    #[test]
    fn test_flags_override_config() {
        let args = Args::parse_from(["progcalc", "--mode", "programmer", "--base", "hex"]);
        let config = resolve_config(&args).unwrap();
        assert_eq!(config.mode, Mode::Programmer);
        assert_eq!(config.base, Base::Hex);
    }
}
