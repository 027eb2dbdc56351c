// Sat Oct 17 2026 - Alex

use std::fmt;
use std::path::{Path, PathBuf};

/// Small programs shipped as S-records and run from target RAM.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Applet {
    /// Answers each two-byte address with the byte stored there.
    MemRead,
    /// Stores the third byte of each request at the two-byte address.
    MemWrite,
    /// Toggles the port A pins.
    Demo,
    /// Sends a banner containing `HC05` back to the host.
    GoTest,
}

impl Applet {
    pub const ALL: [Applet; 4] = [Applet::MemRead, Applet::MemWrite, Applet::Demo, Applet::GoTest];

    pub fn file_name(self) -> &'static str {
        match self {
            Self::MemRead => "memread.s19",
            Self::MemWrite => "memwrite.s19",
            Self::Demo => "hc05demo.s19",
            Self::GoTest => "hc05_gotest.s19",
        }
    }

    pub fn path_in(self, dir: &Path) -> PathBuf {
        dir.join(self.file_name())
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::MemRead => "memory read service",
            Self::MemWrite => "memory write service",
            Self::Demo => "PORT A toggle demonstration",
            Self::GoTest => "target self-test",
        }
    }
}

impl fmt::Display for Applet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.file_name(), self.description())
    }
}
