//! Interactive terminal demo
//!
//! Logs every event that reaches a hook, quits on Q or Escape, toggles
//! keyboard blocking with B and reports clicks inside a box in the top-left
//! corner. Set RUST_LOG=trace to watch the dispatcher.

use std::cell::Cell;
use std::io::{self, Write};
use std::rc::Rc;

use anyhow::Result;
use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use input_relay::build_info;
use input_relay::config::InputConfig;
use input_relay::input::{
    EventKind, Hook, InputContext, InputEvent, KeyCode, KeyHandler, MouseButton, MouseHandler, Rect,
};
use input_relay::platform::{InputSource, TerminalSource, TerminalWindow};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    info!(version = %build_info::version_string(), "Starting input demo");

    let config = InputConfig::load_from_env().unwrap_or_else(|e| {
        warn!(error = %e, "Failed to load config, using default configuration");
        InputConfig::default()
    });
    let mut source = TerminalSource::from_config(&config.keyboard);
    let input = InputContext::with_config(config);
    input.initialize(TerminalWindow::stdout())?;

    let running = Rc::new(Cell::new(true));
    register(&input, &running)?;

    enable_raw_mode()?;
    execute!(io::stdout(), EnableMouseCapture)?;
    say("Press keys or click; B toggles blocking, Q or Esc quits")?;

    let result = pump(&input, &mut source, &running);

    execute!(io::stdout(), DisableMouseCapture)?;
    disable_raw_mode()?;
    input.shutdown();
    result
}

fn pump(input: &InputContext, source: &mut TerminalSource, running: &Cell<bool>) -> Result<()> {
    while running.get() {
        let event = event::read()?;
        if !source.process(input, &event) {
            info!(?event, "Event consumed");
        }
    }
    Ok(())
}

fn register(input: &InputContext, running: &Rc<Cell<bool>>) -> Result<()> {
    let log = Hook::new(|event: &InputEvent| {
        let _ = say(&format!("{:?}", event));
        true
    });
    for kind in EventKind::ALL {
        input.add_hook(kind, log.clone())?;
    }

    let quit = {
        let running = running.clone();
        KeyHandler::new(move |_| {
            running.set(false);
            false
        })
    };
    input.add_key_down_bind(KeyCode::Q, quit.clone())?;
    input.add_key_down_bind(KeyCode::ESCAPE, quit)?;

    // Blocking swallows B as well, so the toggle lives in a hook
    let toggle = {
        let ctx = input.clone();
        Hook::new(move |event: &InputEvent| {
            if event.as_keyboard().is_some_and(|k| k.key == KeyCode::B) {
                let block = !ctx.is_blocking_keys();
                ctx.block_keys(block);
                let _ = say(&format!("Keyboard blocking: {block}"));
            }
            true
        })
    };
    input.add_hook(EventKind::KeyDown, toggle)?;

    input.add_mouse_down_bind(
        MouseButton::Left,
        Rect::new(0, 0, 20, 5),
        MouseHandler::new(|_, x, y| {
            let _ = say(&format!("Clicked the box at {x},{y}"));
            false
        }),
    )?;

    Ok(())
}

/// Print a line in raw mode
fn say(line: &str) -> io::Result<()> {
    let mut out = io::stdout();
    write!(out, "{line}\r\n")?;
    out.flush()
}
