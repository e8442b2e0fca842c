use std::io::{self, BufRead, Write};
use std::sync::Arc;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use colored::Colorize;
use philo_core::timer::{format_clock, is_low_time};
use philo_core::{AppConfig, ModuleKind};
use philo_games::{Event, Field, Panel, Runner};

/// Something the play loop has to react to.
enum Input {
    Line(String),
    Second,
    Eof,
}

/// A parsed input line.
#[derive(Debug, PartialEq)]
enum Command {
    Event(Event),
    Help,
    Back,
}

pub fn run(config: &AppConfig, module: &str) -> Result<(), String> {
    let kind: ModuleKind = module.parse().map_err(|e| format!("{e}"))?;
    let content = super::load_content()?;
    let session = super::open_session(config);
    let mut runner = Runner::new(session, Arc::new(content), config.clone());
    runner.launch(kind).map_err(|e| e.to_string())?;

    println!(
        "  {} {} (unit {})",
        "Playing".bold(),
        kind.title(),
        runner.session().unit()
    );
    println!("  Type 'help' for commands, 'back' to leave.\n");

    let (tx, rx) = mpsc::channel();
    let heartbeat = tx.clone();
    thread::spawn(move || {
        loop {
            thread::sleep(Duration::from_secs(1));
            if heartbeat.send(Input::Second).is_err() {
                break;
            }
        }
    });
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(Input::Line(line)).is_err() {
                return;
            }
        }
        let _ = tx.send(Input::Eof);
    });

    let mut shown = None;
    refresh(&mut runner, &mut shown)?;

    for input in rx {
        match input {
            Input::Second => {
                runner.on_second().map_err(|e| e.to_string())?;
                let due = runner
                    .remaining()
                    .filter(|left| is_low_time(*left) || left % 60 == 0);
                if let Some(left) = due {
                    let clock = format_clock(left);
                    if is_low_time(left) {
                        println!("  ⏳ {}", clock.red().bold());
                    } else {
                        println!("  ⏳ {clock}");
                    }
                }
            }
            Input::Line(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                match parse_command(line) {
                    Ok(Command::Event(event)) => {
                        if let Err(e) = runner.dispatch(event) {
                            println!("  {}", e.to_string().yellow());
                        }
                    }
                    Ok(Command::Help) => print_help(runner.panel().as_ref()),
                    Ok(Command::Back) => break,
                    Err(e) => println!("  {}", e.yellow()),
                }
            }
            Input::Eof => break,
        }
        refresh(&mut runner, &mut shown)?;
        if runner.is_finished() {
            break;
        }
    }

    runner.leave();
    let state = runner.session().state();
    println!(
        "\n  Score {} | {} activities | {} achievements",
        state.total_score, state.games_completed, state.achievements
    );
    Ok(())
}

/// Print pending notifications, and the panel if its content changed.
fn refresh(runner: &mut Runner, shown: &mut Option<Panel>) -> Result<(), String> {
    super::print_notifications(runner.session_mut());
    let Some(panel) = runner.panel() else {
        return Ok(());
    };
    let content = Panel {
        progress: None,
        ..panel.clone()
    };
    if shown.as_ref() != Some(&content) {
        render(&panel);
        *shown = Some(content);
    }
    io::stdout().flush().map_err(|e| e.to_string())
}

fn render(panel: &Panel) {
    println!("\n  {}", panel.title.bold());
    if let Some(pct) = panel.progress {
        let filled = usize::from(pct) / 5;
        println!("  [{}{}] {pct}%", "#".repeat(filled), ".".repeat(20 - filled));
    }
    for line in &panel.body {
        println!("  {line}");
    }
    for (i, option) in panel.options.iter().enumerate() {
        println!("    {}) {option}", i + 1);
    }
    if !panel.actions.is_empty() {
        println!("  {}", format!("[{}]", panel.actions.join(" | ")).dimmed());
    }
}

fn print_help(panel: Option<&Panel>) {
    println!("  <number>          choose an option");
    println!("  hint              reveal the hint of a quiz question");
    println!("  continue          go on to the next dilemma layer");
    println!("  flip <number>     turn a card over");
    println!("  set <field> <text>  fill in a field (idea1-3, question, hypothesis, answers, revision, why)");
    println!("  save              save and register the activity");
    println!("  back              leave the activity");
    if let Some(panel) = panel.filter(|p| !p.actions.is_empty()) {
        println!("  Available now: {}", panel.actions.join(", "));
    }
}

fn parse_command(line: &str) -> Result<Command, String> {
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };
    let event = match word.to_lowercase().as_str() {
        "help" | "?" => return Ok(Command::Help),
        "back" | "quit" | "q" => return Ok(Command::Back),
        "hint" => Event::RequestHint,
        "continue" | "c" => Event::Continue,
        "save" => Event::Submit,
        "flip" => Event::Flip(ordinal(rest)?),
        "set" => {
            let (field, text) = rest
                .split_once(char::is_whitespace)
                .unwrap_or((rest, ""));
            let field: Field = field.parse()?;
            Event::Write {
                field,
                text: text.trim().to_string(),
            }
        }
        _ => Event::Choose(
            ordinal(line).map_err(|_| format!("unknown command '{line}', try 'help'"))?,
        ),
    };
    Ok(Command::Event(event))
}

/// A 1-based number from the user as a 0-based index.
fn ordinal(text: &str) -> Result<usize, String> {
    text.parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .ok_or_else(|| format!("expected a number from 1, got '{text}'"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_choose_options() {
        assert_eq!(
            parse_command("2").unwrap(),
            Command::Event(Event::Choose(1))
        );
        assert!(parse_command("0").is_err());
    }

    #[test]
    fn set_takes_rest_of_line() {
        assert_eq!(
            parse_command("set why  Because consequences matter").unwrap(),
            Command::Event(Event::Write {
                field: Field::Justification,
                text: "Because consequences matter".to_string(),
            })
        );
        assert!(parse_command("set mood happy").is_err());
    }

    #[test]
    fn keywords() {
        assert_eq!(
            parse_command("flip 3").unwrap(),
            Command::Event(Event::Flip(2))
        );
        assert_eq!(
            parse_command("SAVE").unwrap(),
            Command::Event(Event::Submit)
        );
        assert_eq!(parse_command("back").unwrap(), Command::Back);
        assert!(parse_command("dance").is_err());
    }
}
