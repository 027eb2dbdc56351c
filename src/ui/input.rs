// Wed Jan 15 2026 - Alex

use crate::memory::Address;
use crate::protocol::ProceedGate;
use crate::utils::{parse_hex_address, parse_hex_byte};
use std::io::{self, BufRead, Stdout, Write};

pub const LOADER_INSTRUCTIONS: &[&str] = &[
    "Please enable loader either by: ",
    "  * MC68HC05PGMR: S3-S5 = OFF, S6 = ON, shunt across Pin 1 & 2 of J1",
    "  * MIDON PROG05: shunt across pins 1 & 2 of J1",
    "Then, release reset by:",
    "  * MC68HC05PGMR: switch S2 from RESET -> OUT",
    "  * MIDON PROG05: Press and release SW1",
    "  **** PRESS ENTER WHEN READY ***",
];

/// Answer to an access-mode prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry<T> {
    Value(T),
    Quit,
    Invalid(String),
}

/// Line-oriented operator console. Generic over the streams so sessions
/// can be scripted.
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl Console<io::StdinLock<'static>, Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// `None` once the input is exhausted.
    pub fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    pub fn prompt(&mut self, message: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", message)?;
        self.output.flush()?;
        self.read_line()
    }

    pub fn say(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.output, "{}", message)
    }

    pub fn print_loader_instructions(&mut self) -> io::Result<()> {
        for line in LOADER_INSTRUCTIONS {
            writeln!(self.output, "{}", line)?;
        }
        self.output.flush()
    }

    pub fn ask_address(&mut self, message: &str) -> io::Result<Entry<Address>> {
        Ok(self.ask(message)?.map_value(parse_hex_address))
    }

    pub fn ask_byte(&mut self, message: &str) -> io::Result<Entry<u8>> {
        Ok(self.ask(message)?.map_value(parse_hex_byte))
    }

    /// A blank line asks again.
    fn ask(&mut self, message: &str) -> io::Result<Entry<String>> {
        loop {
            match self.prompt(message)? {
                None => return Ok(Entry::Quit),
                Some(text) if text.trim().is_empty() => continue,
                Some(text) if text.trim().eq_ignore_ascii_case("q") => return Ok(Entry::Quit),
                Some(text) => return Ok(Entry::Value(text)),
            }
        }
    }
}

impl Entry<String> {
    fn map_value<T>(self, parse: impl Fn(&str) -> Result<T, String>) -> Entry<T> {
        match self {
            Entry::Value(text) => match parse(&text) {
                Ok(value) => Entry::Value(value),
                Err(reason) => Entry::Invalid(reason),
            },
            Entry::Quit => Entry::Quit,
            Entry::Invalid(reason) => Entry::Invalid(reason),
        }
    }
}

impl<R: BufRead, W: Write> ProceedGate for Console<R, W> {
    /// Shows the arming steps and blocks until ENTER; end of input declines.
    fn wait_for_proceed(&mut self) -> bool {
        if let Err(e) = self.print_loader_instructions() {
            log::warn!("Unable to print loader instructions: {}", e);
        }
        matches!(self.read_line(), Ok(Some(_)))
    }
}
