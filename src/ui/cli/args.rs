// Wed Jan 15 2026 - Alex

use crate::memory::Address;
use crate::srec::encoder::DEFAULT_BYTES_PER_LINE;
use crate::utils::{parse_hex_address, parse_hex_byte};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "prog05")]
#[command(author = "Alex")]
#[command(version)]
#[command(about = "Serial bootloader programmer for the MC68HC705C8", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    #[arg(short, long, global = true, default_value = "config.json")]
    pub config: PathBuf,

    /// Serial device, overrides `Port` from the configuration file.
    #[arg(short, long, global = true)]
    pub port: Option<String>,

    /// Target clock, overrides `Targetclock` ("4MHz" selects 9600 baud).
    #[arg(long, global = true)]
    pub clock: Option<String>,

    #[arg(short, long, global = true, default_value = "warn")]
    pub log_level: String,

    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Interactive command prompt (default).
    Shell,
    /// Upload the self-test applet and check the target answers.
    Test,
    /// Upload the PORT A toggle demonstration.
    Demo,
    /// Load an S-record into the RAM image and run it on the target.
    LoadRam(FileArgs),
    /// Decode an S-record into the PROM image (host side only).
    Load(FileArgs),
    Read(ReadArgs),
    Write(WriteArgs),
    /// Read the whole 8 KiB address space.
    DumpMcu(DumpMcuArgs),
    /// Decode an S-record and print the RAM or PROM image.
    DumpBuffer(DumpBufferArgs),
}

impl Command {
    /// Whether the command needs the serial link.
    pub fn needs_target(&self) -> bool {
        !matches!(self, Command::Load(_) | Command::DumpBuffer(_))
    }
}

#[derive(Parser, Debug)]
pub struct FileArgs {
    pub file: PathBuf,
}

#[derive(Parser, Debug)]
pub struct ReadArgs {
    /// Four hexadecimal digits each, e.g. 1FDF.
    #[arg(required = true, value_parser = parse_hex_address)]
    pub addresses: Vec<Address>,
}

#[derive(Parser, Debug)]
pub struct WriteArgs {
    #[arg(value_parser = parse_hex_address)]
    pub address: Address,

    #[arg(value_parser = parse_hex_byte)]
    pub value: u8,
}

#[derive(Parser, Debug)]
pub struct DumpMcuArgs {
    /// Also export the snapshot as S-records.
    #[arg(long)]
    pub srec: Option<PathBuf>,

    /// Data bytes per exported S1 record.
    #[arg(long, default_value_t = DEFAULT_BYTES_PER_LINE)]
    pub record_bytes: usize,

    /// Skip printing the hex table.
    #[arg(long)]
    pub no_table: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Buffer {
    Ram,
    Prom,
}

#[derive(Parser, Debug)]
pub struct DumpBufferArgs {
    #[arg(value_enum)]
    pub buffer: Buffer,

    pub file: PathBuf,
}

impl DumpMcuArgs {
    pub fn validate(&self) -> Result<(), String> {
        if let Some(path) = &self.srec {
            if path.is_dir() {
                return Err(format!("S-record output is a directory: {:?}", path));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_shell() {
        let args = Args::try_parse_from(["prog05"]).unwrap();
        assert!(args.command.is_none());
        assert_eq!(args.log_level, "warn");
        assert_eq!(args.config, PathBuf::from("config.json"));
    }

    #[test]
    fn test_read_and_write_parse_hex() {
        let args = Args::try_parse_from(["prog05", "--port", "/dev/ttyUSB1", "read", "1FDF", "1FF0"]).unwrap();
        assert_eq!(args.port.as_deref(), Some("/dev/ttyUSB1"));
        match args.command {
            Some(Command::Read(read)) => {
                assert_eq!(read.addresses, vec![Address::new(0x1FDF), Address::new(0x1FF0)])
            }
            other => panic!("unexpected {:?}", other),
        }

        let args = Args::try_parse_from(["prog05", "write", "0050", "A5"]).unwrap();
        assert!(matches!(
            args.command,
            Some(Command::Write(WriteArgs { value: 0xA5, .. }))
        ));
        assert!(Args::try_parse_from(["prog05", "write", "50", "A5"]).is_err());
    }

    #[test]
    fn test_offline_commands() {
        let args = Args::try_parse_from(["prog05", "dump-buffer", "prom", "user.s19"]).unwrap();
        let command = args.command.unwrap();
        assert!(!command.needs_target());
        assert!(matches!(command, Command::DumpBuffer(DumpBufferArgs { buffer: Buffer::Prom, .. })));
        let args = Args::try_parse_from(["prog05", "dump-mcu", "--srec", "mcu.s19"]).unwrap();
        let command = args.command.unwrap();
        assert!(command.needs_target());
        assert!(matches!(command, Command::DumpMcu(DumpMcuArgs { record_bytes: 16, .. })));
        let args = Args::try_parse_from(["prog05", "dump-mcu", "--record-bytes", "32"]).unwrap();
        assert!(matches!(args.command, Some(Command::DumpMcu(DumpMcuArgs { record_bytes: 32, .. }))));
    }
}
