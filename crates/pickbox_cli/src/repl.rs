//! Line-oriented driver for the demo host
//!
//! Each line is one input event or action; the screen is redrawn after every
//! command.

use std::io::{self, BufRead, Write};

use anyhow::Result;
use pickbox_app::{App, Corner, FetchMode, OptionSource, SelectionSink, SubmitMode};
use pickbox_core::{Key, Point, Size};

pub const HELP: &str = "\
commands:
  load [ok|empty|null|error]   fetch the catalog
  submit [ok|error]            submit the selected value
  submit tl|tr|bl|br           press a corner's submit button
  focus tl|tr|bl|br            focus a corner
  key <name>                   press a key (Enter, Escape, Tab, ArrowUp, ArrowDown, a)
  type <text>                  set the focused input's text
  tap <x> <y>                  pointer down + click
  down <x> <y>                 pointer down only
  click <x> <y>                click only
  scroll <dy>                  scroll the focused list
  resize <w> <h>               resize the viewport
  clear                        clear the message log
  show                         redraw
  help                         this text
  quit";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Load(FetchMode),
    Submit(SubmitMode),
    SubmitFrom(Corner),
    Focus(Corner),
    Key(Key),
    Type(String),
    Tap(Point),
    Down(Point),
    Click(Point),
    Scroll(f32),
    Resize(Size),
    Clear,
    Show,
    Help,
    Quit,
}

fn parse_corner(s: &str) -> Result<Corner, String> {
    match s {
        "tl" => Ok(Corner::TopLeft),
        "tr" => Ok(Corner::TopRight),
        "bl" => Ok(Corner::BottomLeft),
        "br" => Ok(Corner::BottomRight),
        other => Err(format!("unknown corner: {}", other)),
    }
}

fn parse_f32(s: Option<&str>, what: &str) -> Result<f32, String> {
    s.ok_or_else(|| format!("missing {}", what))?
        .parse()
        .map_err(|_| format!("bad {}", what))
}

fn parse_point<'a>(mut args: impl Iterator<Item = &'a str>) -> Result<Point, String> {
    let x = parse_f32(args.next(), "x")?;
    let y = parse_f32(args.next(), "y")?;
    Ok(Point::new(x, y))
}

/// Parse one input line
pub fn parse_command(line: &str) -> Result<Command, String> {
    let line = line.trim();
    let (word, rest) = line.split_once(' ').unwrap_or((line, ""));
    let mut args = rest.split_whitespace();

    match word {
        "load" => args
            .next()
            .unwrap_or("ok")
            .parse()
            .map(Command::Load)
            .map_err(|e| e.to_string()),
        "submit" => {
            let arg = args.next().unwrap_or("ok");
            match parse_corner(arg) {
                Ok(corner) => Ok(Command::SubmitFrom(corner)),
                Err(_) => arg
                    .parse()
                    .map(Command::Submit)
                    .map_err(|e| e.to_string()),
            }
        }
        "focus" => parse_corner(args.next().unwrap_or_default()).map(Command::Focus),
        "key" => match args.next() {
            Some(name) => Ok(Command::Key(Key::from_name(name))),
            None => Err("missing key name".into()),
        },
        // keep inner spaces; the query is trimmed by the filter anyway
        "type" => Ok(Command::Type(rest.to_string())),
        "tap" => parse_point(args).map(Command::Tap),
        "down" => parse_point(args).map(Command::Down),
        "click" => parse_point(args).map(Command::Click),
        "scroll" => parse_f32(args.next(), "dy").map(Command::Scroll),
        "resize" => {
            let w = parse_f32(args.next(), "width")?;
            let h = parse_f32(args.next(), "height")?;
            Ok(Command::Resize(Size::new(w, h)))
        }
        "clear" => Ok(Command::Clear),
        "show" | "" => Ok(Command::Show),
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" => Ok(Command::Quit),
        other => Err(format!("unknown command: {}", other)),
    }
}

/// Apply `command`; returns false when the session should end
pub async fn execute<B: OptionSource + SelectionSink>(app: &mut App<B>, command: Command) -> bool {
    match command {
        Command::Load(mode) => app.load_options(mode).await,
        Command::Submit(mode) => {
            if !app.submit(mode).await {
                println!("nothing to submit");
            }
        }
        Command::SubmitFrom(corner) => {
            if !app.submit_from(corner).await {
                println!("nothing to submit");
            }
        }
        Command::Focus(corner) => app.focus(corner),
        Command::Key(key) => app.key_down(key),
        Command::Type(text) => app.input_changed(&text),
        Command::Tap(point) => app.tap(point),
        Command::Down(point) => app.pointer_down(point),
        Command::Click(point) => app.click(point),
        Command::Scroll(dy) => app.scroll(dy),
        Command::Resize(size) => app.resize(size),
        Command::Clear => app.clear_messages(),
        Command::Show => {}
        Command::Help => {
            println!("{}", HELP);
            return true;
        }
        Command::Quit => return false,
    }
    true
}

/// Run the session on stdin until `quit` or end of input
pub async fn run<B: OptionSource + SelectionSink>(app: &mut App<B>) -> Result<()> {
    println!("{}", HELP);
    println!("\n{}", app.render_text());

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("> ");
        io::stdout().flush()?;
        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        match parse_command(&line) {
            Ok(command) => {
                tracing::debug!(?command, "repl command");
                if !execute(app, command.clone()).await {
                    break;
                }
                if command != Command::Help {
                    println!("{}", app.render_text());
                }
            }
            Err(err) => println!("error: {}", err),
        }
    }
    Ok(())
}
