// Wed Jan 15 2026 - Alex

use super::args::{Args, Buffer, Command, DumpBufferArgs, DumpMcuArgs, FileArgs, ReadArgs, WriteArgs};
use crate::config::{Config, ConfigError};
use crate::engine::{Applet, Engine, EngineError};
use crate::memory::{Address, MemoryImage, MemoryMap};
use crate::srec::{SrecDecoder, SrecEncoder};
use crate::ui::banner::Banner;
use crate::ui::display::{format_register, HexTable};
use crate::ui::input::Console;
use crate::ui::progress::TerminalProgress;
use crate::ui::shell::Shell;
use crate::ui::{print_info, print_success, print_warning};
use crate::utils::format_duration;
use colored::Colorize;
use std::fs::File;
use std::io::BufWriter;
use std::time::Instant;

pub struct CommandHandler {
    use_color: bool,
}

impl CommandHandler {
    pub fn new() -> Self {
        Self { use_color: true }
    }

    pub fn execute(&self, args: Args) -> anyhow::Result<()> {
        let use_color = self.use_color && !args.no_color;
        if !use_color {
            colored::control::set_override(false);
        }
        if !args.quiet {
            Banner::prog05().with_color(use_color).print();
        }

        self.setup_logging(&args)?;

        let config = self.load_config(&args)?;
        let table = HexTable::new().with_color(use_color);
        let command = args.command.unwrap_or(Command::Shell);

        if !command.needs_target() {
            return match command {
                Command::Load(file) => self.handle_load(&config, file),
                Command::DumpBuffer(dump) => self.handle_dump_buffer(&config, dump, &table),
                _ => Ok(()),
            };
        }

        config.validate().map_err(ConfigError::Invalid)?;
        if !args.quiet {
            print_info(&format!("Port: {}  Target clock: {}  Baud: {}", config.port, config.target_clock, config.baud_rate()));
        }
        let mut engine = Engine::connect(config)?;
        log::info!("Ready to access target MC68HC705C8");
        if let Command::Shell = command {
            return self.handle_shell(engine, table);
        }

        let result = match command {
            Command::Test => self.handle_test(&mut engine),
            Command::Demo => self.handle_demo(&mut engine),
            Command::LoadRam(file) => self.handle_load_ram(&mut engine, file),
            Command::Read(read) => self.handle_read(&mut engine, read),
            Command::Write(write) => self.handle_write(&mut engine, write),
            Command::DumpMcu(dump) => self.handle_dump_mcu(&mut engine, dump, &table),
            Command::Shell | Command::Load(_) | Command::DumpBuffer(_) => Ok(()),
        };
        engine.close();
        result
    }

    fn setup_logging(&self, args: &Args) -> anyhow::Result<()> {
        let level = match args.log_level.to_lowercase().as_str() {
            "trace" => log::LevelFilter::Trace,
            "debug" => log::LevelFilter::Debug,
            "info" => log::LevelFilter::Info,
            "warn" => log::LevelFilter::Warn,
            "error" => log::LevelFilter::Error,
            "off" => log::LevelFilter::Off,
            _ => log::LevelFilter::Warn,
        };

        env_logger::Builder::new()
            .filter_level(level)
            .format_timestamp(None)
            .try_init()?;

        Ok(())
    }

    /// The file is optional when `--port` names the device.
    fn load_config(&self, args: &Args) -> anyhow::Result<Config> {
        let mut config = match Config::load(&args.config) {
            Ok(config) => config,
            Err(ConfigError::Read { .. }) if args.port.is_some() => {
                log::info!("No configuration at {:?}, using defaults", args.config);
                Config::new()
            }
            Err(e) => return Err(e.into()),
        };
        if let Some(port) = &args.port {
            config = config.with_port(port);
        }
        if let Some(clock) = &args.clock {
            config = config.with_target_clock(clock);
        }
        Ok(config)
    }

    fn handle_shell(&self, engine: Engine, table: HexTable) -> anyhow::Result<()> {
        print_success("READY TO ACCESS TARGET MC68HC705C8");
        let mut shell = Shell::new(engine, Console::stdio()).with_table(table);
        let result = shell.run();
        let (engine, _) = shell.into_parts();
        engine.close();
        Ok(result?)
    }

    fn handle_test(&self, engine: &mut Engine) -> anyhow::Result<()> {
        let mut console = Console::stdio();
        let mut progress = TerminalProgress::new();
        match engine.self_test(&mut console, &mut progress) {
            Ok(_) => {
                print_success("Target (68HC705C8) access is Successful");
                Ok(())
            }
            Err(EngineError::SelfTestFailed { received }) => {
                log::debug!("Self-test reply {:?}", received);
                print_warning("Check your hardware, clock speed, and confirm HC05 did go into bootloader mode");
                Err(anyhow::anyhow!("Target self-test FAILED"))
            }
            Err(e) => Err(e.into()),
        }
    }

    fn handle_demo(&self, engine: &mut Engine) -> anyhow::Result<()> {
        let mut console = Console::stdio();
        let report = engine.demo(&mut console, &mut TerminalProgress::new())?;
        if !report.is_clean() {
            print_warning(&format!("{} byte(s) failed to send", report.failed.len()));
        }
        print_success("Demo program should be running - Check PORT A pins for toggling");
        Ok(())
    }

    fn handle_load_ram(&self, engine: &mut Engine, args: FileArgs) -> anyhow::Result<()> {
        let loaded = engine.load_ram(&args.file)?;
        print_info(&format!("S-Record loaded Successfully. {} bytes written to buffer", loaded.bytes_written));
        let report = engine.upload(&mut Console::stdio(), &mut TerminalProgress::new())?;
        if !report.is_clean() {
            print_warning(&format!("{} byte(s) failed to send", report.failed.len()));
        }
        print_success("Program Running!");
        Ok(())
    }

    fn handle_read(&self, engine: &mut Engine, args: ReadArgs) -> anyhow::Result<()> {
        engine.run_applet(Applet::MemRead, &mut Console::stdio(), &mut TerminalProgress::new())?;
        let mut failures = 0;
        for address in args.addresses {
            match engine.read(address) {
                Ok(value) => println!("{:04X}: {}", address.as_u16(), format!("{:02X}", value).green()),
                Err(e) => {
                    failures += 1;
                    println!("{:04X}: {}", address.as_u16(), e.to_string().red());
                }
            }
        }
        if failures > 0 {
            return Err(anyhow::anyhow!("{} read(s) failed", failures));
        }
        Ok(())
    }

    fn handle_write(&self, engine: &mut Engine, args: WriteArgs) -> anyhow::Result<()> {
        engine.run_applet(Applet::MemWrite, &mut Console::stdio(), &mut TerminalProgress::new())?;
        engine.write(args.address, args.value)?;
        print_success(&format!("Wrote {:02X} to {}", args.value, args.address));
        Ok(())
    }

    fn handle_dump_mcu(&self, engine: &mut Engine, args: DumpMcuArgs, table: &HexTable) -> anyhow::Result<()> {
        args.validate().map_err(|e| anyhow::anyhow!(e))?;
        engine.run_applet(Applet::MemRead, &mut Console::stdio(), &mut TerminalProgress::new())?;

        let started = Instant::now();
        let report = engine.dump(&mut TerminalProgress::new())?;
        for reading in &report.registers {
            println!("{}", format_register(reading));
        }
        if report.is_complete() {
            print_success(&format!(
                "Entire HC05 memory space read successfully in {}",
                format_duration(started.elapsed())
            ));
        } else {
            print_warning(&format!(
                "HC05 memory space read with {} timeout(s) and {} failure(s)",
                report.timeouts, report.failures
            ));
        }
        if !args.no_table {
            table.print_snapshot(&report.snapshot);
        }

        if let Some(path) = args.srec {
            let mut out = BufWriter::new(File::create(&path)?);
            let lines = SrecEncoder::new()
                .with_header("PROG05")
                .with_bytes_per_line(args.record_bytes)
                .write_to(&mut out, Address::zero(), report.snapshot.as_bytes())?;
            print_success(&format!("{} S-record line(s) written to {:?}", lines, path));
        }
        Ok(())
    }

    fn decode_offline(&self, config: &Config, image: &mut MemoryImage, file: &std::path::Path) -> anyhow::Result<()> {
        let report = SrecDecoder::new().with_strict_hex(config.strict_hex).load_file(file, image)?;
        print_info(&format!(
            "S-Record loaded Successfully. {} bytes written to buffer ({} record(s))",
            report.bytes_written, report.records
        ));
        if let Some(start) = image.program_start() {
            print_info(&format!("Program start {}", start));
        }
        Ok(())
    }

    fn handle_load(&self, config: &Config, args: FileArgs) -> anyhow::Result<()> {
        let map = MemoryMap::mc68hc705c8();
        let mut image = MemoryImage::for_region(map.prom());
        self.decode_offline(config, &mut image, &args.file)
    }

    fn handle_dump_buffer(&self, config: &Config, args: DumpBufferArgs, table: &HexTable) -> anyhow::Result<()> {
        let map = MemoryMap::mc68hc705c8();
        let region = match args.buffer {
            Buffer::Ram => map.ram(),
            Buffer::Prom => map.prom(),
        };
        let mut image = MemoryImage::for_region(region);
        self.decode_offline(config, &mut image, &args.file)?;
        println!("HEX Dump of {} buffer {}", image.name(), image.range());
        table.print_image(&image);
        Ok(())
    }
}

impl Default for CommandHandler {
    fn default() -> Self {
        Self::new()
    }
}
