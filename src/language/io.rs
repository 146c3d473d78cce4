//! Collaborators the interpreter talks to for all of its I/O.

use std::collections::{HashMap, VecDeque};
use std::io::{self, BufRead, Write};
use tracing::warn;

pub trait Printer {
    fn print(&mut self, text: &str);
}

pub trait Reader {
    /// Blocks until a line of input is available. Running out of input is an error.
    fn input(&mut self, prompt: &str) -> io::Result<String>;
}

pub trait EnvironmentVariables {
    fn var(&self, name: &str) -> Option<String>;
}

#[derive(Debug, Default)]
pub struct StdoutPrinter;

impl Printer for StdoutPrinter {
    fn print(&mut self, text: &str) {
        let mut stdout = io::stdout().lock();

        if let Err(err) = writeln!(stdout, "{}", text) {
            warn!(%err, "failed to write to stdout");
        }
    }
}

#[derive(Debug, Default)]
pub struct StdinReader;

impl Reader for StdinReader {
    fn input(&mut self, _prompt: &str) -> io::Result<String> {
        let mut line = String::new();

        if io::stdin().lock().read_line(&mut line)? == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "end of input"));
        }

        Ok(line.trim_end_matches(&['\r', '\n'][..]).to_owned())
    }
}

#[derive(Debug, Default)]
pub struct ProcessEnvironment;

impl EnvironmentVariables for ProcessEnvironment {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

/// Collects printed text in memory.
#[derive(Debug, Default)]
pub struct BufferPrinter {
    lines: Vec<String>,
}

impl BufferPrinter {
    pub fn new() -> BufferPrinter {
        BufferPrinter::default()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

impl Printer for BufferPrinter {
    fn print(&mut self, text: &str) {
        self.lines.push(text.to_owned());
    }
}

/// Answers input requests from a fixed queue.
#[derive(Debug, Default)]
pub struct QueueReader {
    inputs: VecDeque<String>,
    prompts: Vec<String>,
}

impl QueueReader {
    pub fn new<I, S>(inputs: I) -> QueueReader where I: IntoIterator<Item = S>, S: Into<String> {
        QueueReader {
            inputs: inputs.into_iter().map(Into::into).collect(),
            prompts: Vec::new(),
        }
    }

    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }
}

impl Reader for QueueReader {
    fn input(&mut self, prompt: &str) -> io::Result<String> {
        self.prompts.push(prompt.to_owned());
        self.inputs.pop_front()
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "no input left"))
    }
}

#[derive(Debug, Default)]
pub struct MapEnvironment {
    vars: HashMap<String, String>,
}

impl MapEnvironment {
    pub fn new<I, K, V>(vars: I) -> MapEnvironment where I: IntoIterator<Item = (K, V)>, K: Into<String>, V: Into<String> {
        MapEnvironment {
            vars: vars.into_iter().map(|(key, value)| (key.into(), value.into())).collect(),
        }
    }
}

impl EnvironmentVariables for MapEnvironment {
    fn var(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }
}
