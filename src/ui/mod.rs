// Wed Jan 15 2026 - Alex

pub mod banner;
pub mod cli;
pub mod display;
pub mod input;
pub mod progress;
pub mod shell;

pub use banner::Banner;
pub use cli::{Args, Command, CommandHandler};
pub use display::HexTable;
pub use input::Console;
pub use progress::TerminalProgress;
pub use shell::{Shell, ShellCommand};

pub fn print_info(message: &str) {
    use colored::Colorize;
    println!("{} {}", "[INFO]".cyan(), message);
}

pub fn print_success(message: &str) {
    use colored::Colorize;
    println!("{} {}", "[OK]".green(), message);
}

pub fn print_warning(message: &str) {
    use colored::Colorize;
    println!("{} {}", "[WARN]".yellow(), message);
}

pub fn print_error(message: &str) {
    use colored::Colorize;
    eprintln!("{} {}", "[ERROR]".red(), message);
}
