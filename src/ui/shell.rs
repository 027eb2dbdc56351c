// Wed Jan 15 2026 - Alex

//! Interactive command loop driving an [`Engine`].

use crate::engine::{Applet, Engine, EngineError};
use crate::memory::Address;
use crate::protocol::ProtocolError;
use crate::ui::display::{format_register, HexTable};
use crate::ui::input::{Console, Entry};
use crate::ui::progress::TerminalProgress;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

pub const COMMAND_HELP: &[&str] = &[
    "***************** PROG05 COMMAND OPTIONS *********************",
    "Available Commands:",
    " * TEST    - Load test program into HC05 and check response (supports official boards and MIDON PROG05 programmer)",
    " * DUMP A  - Dump RAM buffer ($0050-$00FF)",
    " * DUMP B  - Dump PROM buffer ($0160-$1EFF)",
    " * DEMO    - Load simple demonstration program into HC05 that toggles PORT A pins (use this to confirm your MCU is OK)",
    " * LOADRAM - Load user application into HC05 RAM and execute (specify a .S19 file)",
    " * LOAD    - Load user application into memory for EPROM programming",
    " * READ    - Read a specified memory address in the HC05 memory map",
    " * WRITE   - Write a specified memory address in the HC05 memory map",
    " * DUMPMCU - Read entire HC05 address space and display as hexdump (only works if device is unsecured)",
    " * QUIT    - Quit this program ",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Help,
    Empty,
    Test,
    DumpRam,
    DumpProm,
    Demo,
    LoadRam,
    Load,
    Read,
    Write,
    DumpMcu,
    Quit,
    Unknown(String),
}

impl ShellCommand {
    pub fn parse(line: &str) -> Self {
        let words: Vec<String> = line.split_whitespace().map(|w| w.to_ascii_uppercase()).collect();
        let words: Vec<&str> = words.iter().map(String::as_str).collect();
        match words.as_slice() {
            [] => Self::Empty,
            ["?"] | ["HELP"] => Self::Help,
            ["TEST"] => Self::Test,
            ["DUMP", "A"] => Self::DumpRam,
            ["DUMP", "B"] => Self::DumpProm,
            ["DEMO"] => Self::Demo,
            ["LOADRAM"] => Self::LoadRam,
            ["LOAD"] => Self::Load,
            ["READ"] => Self::Read,
            ["WRITE"] => Self::Write,
            ["DUMPMCU"] => Self::DumpMcu,
            ["QUIT"] | ["EXIT"] => Self::Quit,
            _ => Self::Unknown(line.trim().to_string()),
        }
    }
}

/// Errors end the current command only; the loop keeps going until QUIT or
/// end of input.
pub struct Shell<R, W> {
    engine: Engine,
    console: Console<R, W>,
    progress: TerminalProgress,
    table: HexTable,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(engine: Engine, console: Console<R, W>) -> Self {
        Self {
            engine,
            console,
            progress: TerminalProgress::new(),
            table: HexTable::new(),
        }
    }

    pub fn with_progress(mut self, progress: TerminalProgress) -> Self {
        self.progress = progress;
        self
    }

    pub fn with_table(mut self, table: HexTable) -> Self {
        self.table = table;
        self
    }

    pub fn into_parts(self) -> (Engine, Console<R, W>) {
        (self.engine, self.console)
    }

    pub fn run(&mut self) -> io::Result<()> {
        self.print_help()?;
        loop {
            let line = match self.console.prompt(">")? {
                Some(line) => line,
                None => break,
            };
            let command = ShellCommand::parse(&line);
            log::debug!("Shell command {:?}", command);
            if command == ShellCommand::Quit {
                self.console.say("Program shutdown")?;
                break;
            }
            self.dispatch(command)?;
        }
        Ok(())
    }

    fn dispatch(&mut self, command: ShellCommand) -> io::Result<()> {
        match command {
            ShellCommand::Help => self.print_help(),
            ShellCommand::Empty | ShellCommand::Quit => Ok(()),
            ShellCommand::Test => self.self_test(),
            ShellCommand::DumpRam => {
                self.console.say("HEX Dump of RAM buffer ($0050 - $00FF in the HC05 memory map)")?;
                let lines = self.table.render(self.engine.ram_image().data(), self.engine.ram_image().base());
                self.say_all(&lines)
            }
            ShellCommand::DumpProm => {
                self.console.say("HEX Dump of PROM buffer ($0160 - $1EFF in the HC05 memory map)")?;
                let lines = self.table.render(self.engine.prom_image().data(), self.engine.prom_image().base());
                self.say_all(&lines)
            }
            ShellCommand::Demo => self.demo(),
            ShellCommand::LoadRam => self.load_ram(),
            ShellCommand::Load => self.load_prom(),
            ShellCommand::Read => self.read_mode(),
            ShellCommand::Write => self.write_mode(),
            ShellCommand::DumpMcu => self.dump_mcu(),
            ShellCommand::Unknown(_) => self.console.say(" Unknown Command"),
        }
    }

    fn print_help(&mut self) -> io::Result<()> {
        for line in COMMAND_HELP {
            self.console.say(line)?;
        }
        Ok(())
    }

    fn say_all(&mut self, lines: &[String]) -> io::Result<()> {
        for line in lines {
            self.console.say(line)?;
        }
        Ok(())
    }

    fn report(&mut self, err: &EngineError) -> io::Result<()> {
        log::debug!("Command failed: {:?}", err);
        self.console.say(&format!(" Error: {}", err))
    }

    fn self_test(&mut self) -> io::Result<()> {
        self.console.say("Loading test program compatible with MC68HC05PGMR and MIDON PROG05")?;
        match self.engine.self_test(&mut self.console, &mut self.progress) {
            Ok(report) => {
                self.console.say(&format!("Checking target.... [OK] ({} bytes uploaded)", report.upload.bytes_sent))?;
                self.console.say("Target (68HC705C8) access is Successful")
            }
            Err(EngineError::SelfTestFailed { received }) => {
                log::debug!("Self-test reply {:?}", received);
                self.console.say("Checking target.... [FAILED]")?;
                self.console.say("  Check your hardware, clock speed, and confirm HC05 did go into bootloader mode")
            }
            Err(e) => self.report(&e),
        }
    }

    fn demo(&mut self) -> io::Result<()> {
        self.console.say("Loading DEMO program compatible with MC68HC05PGMR and MIDON PROG05")?;
        match self.engine.demo(&mut self.console, &mut self.progress) {
            Ok(_) => self.console.say("Demo program should be running - Check PORT A pins for toggling"),
            Err(e) => self.report(&e),
        }
    }

    fn ask_path(&mut self) -> io::Result<Option<PathBuf>> {
        Ok(self
            .console
            .prompt(" Enter path and file name of S-record file: ")?
            .map(|p| PathBuf::from(p.trim()))
            .filter(|p| !p.as_os_str().is_empty()))
    }

    fn load_ram(&mut self) -> io::Result<()> {
        let path = match self.ask_path()? {
            Some(path) => path,
            None => return Ok(()),
        };
        let loaded = match self.engine.load_ram(&path) {
            Ok(report) => report,
            Err(e) => return self.report(&e),
        };
        self.console.say(&format!(
            "S-Record loaded Successfully. {} bytes written to buffer",
            loaded.bytes_written
        ))?;
        match self.engine.upload(&mut self.console, &mut self.progress) {
            Ok(_) => self.console.say(" Program Running!"),
            Err(e) => self.report(&e),
        }
    }

    fn load_prom(&mut self) -> io::Result<()> {
        let path = match self.ask_path()? {
            Some(path) => path,
            None => return Ok(()),
        };
        match self.engine.load_prom(&path) {
            Ok(report) => self.console.say(&format!(
                "S-Record loaded Successfully. {} bytes written to buffer",
                report.bytes_written
            )),
            Err(e) => self.report(&e),
        }
    }

    fn enter_access_mode(&mut self, applet: Applet) -> io::Result<bool> {
        self.console.say("Preparing to access HC05...")?;
        match self.engine.run_applet(applet, &mut self.console, &mut self.progress) {
            Ok(_) => {
                self.console.say("     -- HC05 is in access mode, enter Q to exit and return --    ")?;
                Ok(true)
            }
            Err(e) => {
                self.report(&e)?;
                Ok(false)
            }
        }
    }

    fn leave_access_mode(&mut self) -> io::Result<()> {
        self.console.say("     -- HC05 access mode terminated --    ")
    }

    fn read_mode(&mut self) -> io::Result<()> {
        if !self.enter_access_mode(Applet::MemRead)? {
            return Ok(());
        }
        loop {
            let address = match self.console.ask_address("Enter address to be read (in hexadecimal):")? {
                Entry::Value(address) => address,
                Entry::Quit => return self.leave_access_mode(),
                Entry::Invalid(reason) => {
                    self.console.say(&format!(" {}", reason))?;
                    continue;
                }
            };
            match self.engine.read(address) {
                Ok(value) => self.console.say(&format!(" Value Read: {:02X}", value))?,
                Err(ProtocolError::ResponseTimeout { .. }) => self.console.say(" Response timeout...")?,
                Err(e) => self.console.say(&format!(" Error reading memory: {}", e))?,
            }
        }
    }

    fn write_mode(&mut self) -> io::Result<()> {
        if !self.enter_access_mode(Applet::MemWrite)? {
            return Ok(());
        }
        loop {
            let address = match self.console.ask_address("Enter address to be written (in hexadecimal):")? {
                Entry::Value(address) => address,
                Entry::Quit => return self.leave_access_mode(),
                Entry::Invalid(reason) => {
                    self.console.say(&format!(" {}", reason))?;
                    continue;
                }
            };
            let value = loop {
                match self.console.ask_byte("Enter data to be written (in hexadecimal):")? {
                    Entry::Value(value) => break value,
                    Entry::Quit => return self.leave_access_mode(),
                    Entry::Invalid(reason) => self.console.say(&format!(" {}", reason))?,
                }
            };
            match self.engine.write(address, value) {
                Ok(()) => self.console.say("Write operation complete...")?,
                Err(e) => self.console.say(&format!(" Error writing memory: {}", e))?,
            }
        }
    }

    fn dump_mcu(&mut self) -> io::Result<()> {
        self.console.say("Preparing to dump HC05...")?;
        if let Err(e) = self.engine.run_applet(Applet::MemRead, &mut self.console, &mut self.progress) {
            return self.report(&e);
        }
        let report = match self.engine.dump(&mut self.progress) {
            Ok(report) => report,
            Err(e) => return self.report(&EngineError::from(e)),
        };
        for reading in &report.registers {
            self.console.say(&format_register(reading))?;
        }
        if report.is_complete() {
            self.console.say(" Entire HC05 memory space read successfully")?;
        } else {
            self.console.say(&format!(
                " HC05 memory space read with {} timeout(s) and {} failure(s)",
                report.timeouts, report.failures
            ))?;
        }
        let lines = self.table.render(report.snapshot.as_bytes(), Address::zero());
        self.say_all(&lines)
    }
}
