//! Interactive commands read from stdin while quotes rotate.
//!
//! Pausing stands in for hovering over the quote: rotation is suspended until
//! the matching resume.
use std::io::BufRead;

use crossbeam_channel::Sender;
use log::debug;

/// One keyboard command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// Fetch a new quote right away.
    Next,
    /// Interaction started.
    Pause,
    /// Interaction ended.
    Resume,
    /// Stop rotation.
    Stop,
    /// Start rotation again.
    Start,
    /// Leave the program.
    Quit,
}

impl Input {
    /// Parse a trimmed line; unknown input yields `None`.
    pub fn parse(line: &str) -> Option<Input> {
        match line.trim().to_ascii_lowercase().as_str() {
            "n" | "next" => Some(Input::Next),
            "p" | "pause" => Some(Input::Pause),
            "r" | "resume" => Some(Input::Resume),
            "s" | "stop" => Some(Input::Stop),
            "g" | "go" | "start" => Some(Input::Start),
            "q" | "quit" | "exit" => Some(Input::Quit),
            _ => None,
        }
    }
}

/// Usage line printed at startup.
pub const HELP: &str = "Commands: [n]ext, [p]ause, [r]esume, [s]top, [g]o, [q]uit";

/// Forward parsed lines from `reader` to `tx` until EOF or the receiver is gone.
pub fn forward_lines<R: BufRead>(reader: R, tx: Sender<Input>) {
    for line in reader.lines() {
        let Ok(line) = line else { break };
        match Input::parse(&line) {
            Some(input) => {
                if tx.send(input).is_err() {
                    break;
                }
            }
            None if line.trim().is_empty() => {}
            None => println!("{}", HELP),
        }
    }
    debug!("Input reader stopping...");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::unbounded;
    use std::io::Cursor;

    #[test]
    fn test_parse_commands() {
        assert_eq!(Input::parse("n"), Some(Input::Next));
        assert_eq!(Input::parse(" Pause "), Some(Input::Pause));
        assert_eq!(Input::parse("r"), Some(Input::Resume));
        assert_eq!(Input::parse("stop"), Some(Input::Stop));
        assert_eq!(Input::parse("g"), Some(Input::Start));
        assert_eq!(Input::parse("Q"), Some(Input::Quit));
        assert_eq!(Input::parse("hover"), None);
    }

    #[test]
    fn test_forward_lines() {
        let (tx, rx) = unbounded();
        forward_lines(Cursor::new("p\n\nbogus\nr\nq\n"), tx);
        let received: Vec<Input> = rx.try_iter().collect();
        assert_eq!(received, vec![Input::Pause, Input::Resume, Input::Quit]);
    }
}
