// Line-oriented command front end driving an AppState
use std::io::{BufRead, Write};

use linkpath_core::{NodeId, Point};
use tracing::debug;

use crate::error::{Result, SessionError};
use crate::state::{AppState, Event, InteractionMode, PointerButton};

/// One parsed script line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Forward an input event to the state
    Event(Event),
    /// Place a node directly, bypassing hit-testing
    Add(Point),
    /// Activate (`true`) or deactivate the link between two nodes
    Link(NodeId, NodeId, bool),
    /// Print the state as JSON
    Show,
}

impl Command {
    /// Parse one line. Blank lines and `#` comments yield `None`.
    ///
    /// ```text
    /// mode edit|start|finish
    /// move X Y
    /// click left|right X Y
    /// drag X1 Y1 X2 Y2
    /// find
    /// show
    /// add X Y
    /// link A B
    /// unlink A B
    /// ```
    pub fn parse(line: usize, text: &str) -> Result<Option<Self>> {
        let text = text.split('#').next().unwrap_or("").trim();
        let mut words = text.split_whitespace();
        let Some(verb) = words.next() else {
            return Ok(None);
        };
        let args: Vec<&str> = words.collect();
        let invalid = |reason: String| SessionError::InvalidCommand { line, reason };

        let expect = |n: usize| {
            if args.len() == n {
                Ok(())
            } else {
                Err(invalid(format!("'{}' takes {} argument(s), got {}", verb, n, args.len())))
            }
        };

        let command = match verb {
            "mode" => {
                expect(1)?;
                let mode = match args[0] {
                    "edit" => InteractionMode::EditNetwork,
                    "start" => InteractionMode::PickStart,
                    "finish" => InteractionMode::PickFinish,
                    other => return Err(invalid(format!("unknown mode '{}'", other))),
                };
                Command::Event(Event::SetMode(mode))
            }
            "move" => {
                expect(2)?;
                Command::Event(Event::PointerMoved(point(line, args[0], args[1])?))
            }
            "click" => {
                expect(3)?;
                let button = match args[0] {
                    "left" => PointerButton::Primary,
                    "right" => PointerButton::Secondary,
                    other => return Err(invalid(format!("unknown button '{}'", other))),
                };
                Command::Event(Event::Click { button, point: point(line, args[1], args[2])? })
            }
            "drag" => {
                expect(4)?;
                Command::Event(Event::Drag {
                    from: point(line, args[0], args[1])?,
                    to: point(line, args[2], args[3])?,
                })
            }
            "find" => {
                expect(0)?;
                Command::Event(Event::FindPath)
            }
            "show" => {
                expect(0)?;
                Command::Show
            }
            "add" => {
                expect(2)?;
                Command::Add(point(line, args[0], args[1])?)
            }
            "link" | "unlink" => {
                expect(2)?;
                Command::Link(node_id(line, args[0])?, node_id(line, args[1])?, verb == "link")
            }
            other => return Err(invalid(format!("unknown command '{}'", other))),
        };
        Ok(Some(command))
    }
}

fn integer<T: std::str::FromStr>(line: usize, word: &str) -> Result<T> {
    word.parse().map_err(|_| SessionError::InvalidCommand {
        line,
        reason: format!("'{}' is not an integer", word),
    })
}

fn point(line: usize, x: &str, y: &str) -> Result<Point> {
    Ok(Point::new(integer(line, x)?, integer(line, y)?))
}

// Accepts both "3" and the display form "n3"
fn node_id(line: usize, word: &str) -> Result<NodeId> {
    integer(line, word.strip_prefix('n').unwrap_or(word)).map(NodeId)
}

/// Execute one command, writing any output line to `out`
pub fn execute<W: Write>(state: AppState, command: Command, out: &mut W) -> Result<AppState> {
    match command {
        Command::Event(event) => {
            let (state, feedback) = state.handle(event);
            writeln!(out, "{}", feedback?.message())?;
            Ok(state)
        }
        Command::Add(at) => {
            let mut state = state;
            let id = state.graph_mut().add_node(at.x, at.y);
            writeln!(out, "Added node {}", id)?;
            Ok(state)
        }
        Command::Link(a, b, on) => {
            let mut state = state;
            let graph = state.graph_mut();
            let link = graph
                .link_between(a, b)
                .ok_or(linkpath_core::Error::NodeNotFound(if graph.contains_node(a) { b } else { a }))?;
            if on {
                graph.activate_link(link)?;
            } else {
                graph.deactivate_link(link)?;
            }
            writeln!(out, "Link {} is now {}", link, if on { "active" } else { "inactive" })?;
            Ok(state)
        }
        Command::Show => {
            serde_json::to_writer_pretty(&mut *out, &state.view())?;
            writeln!(out)?;
            Ok(state)
        }
    }
}

/// Run every line of `input` against `state`, stopping at the first error
pub fn run<R: BufRead, W: Write>(mut state: AppState, input: R, out: &mut W) -> Result<AppState> {
    for (index, line) in input.lines().enumerate() {
        let line = line?;
        if let Some(command) = Command::parse(index + 1, &line)? {
            debug!(line = index + 1, ?command, "command");
            state = execute(state, command, out)?;
        }
    }
    Ok(state)
}
