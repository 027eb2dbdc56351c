// Sat Oct 17 2026 - Alex

use crate::link::{TransportReader, TransportWriter};
use std::fs::File;
use std::io::{self, Read, Write};
use std::path::PathBuf;

/// 8 data bits, no parity, one stop bit at `baud`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerialSettings {
    pub path: PathBuf,
    pub baud: u32,
}

impl SerialSettings {
    pub fn new(path: impl Into<PathBuf>, baud: u32) -> Self {
        Self { path: path.into(), baud }
    }
}

pub struct SerialPort {
    file: File,
}

impl SerialPort {
    pub fn open(settings: &SerialSettings) -> io::Result<Self> {
        let file = imp::open_raw(settings)?;
        log::info!("Opened {} at {} baud, 8N1", settings.path.display(), settings.baud);
        Ok(Self { file })
    }

    pub fn split(self) -> io::Result<(SerialReader, SerialWriter)> {
        let reader = self.file.try_clone()?;
        Ok((SerialReader { file: reader }, SerialWriter { file: self.file }))
    }
}

pub struct SerialReader {
    file: File,
}

impl TransportReader for SerialReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.file.read(buf)
    }
}

pub struct SerialWriter {
    file: File,
}

impl TransportWriter for SerialWriter {
    fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
        self.file.write_all(bytes)?;
        Ok(bytes.len())
    }
}

#[cfg(unix)]
mod imp {
    use super::SerialSettings;
    use std::fs::{File, OpenOptions};
    use std::io;
    use std::os::unix::fs::OpenOptionsExt;
    use std::os::unix::io::AsRawFd;

    pub fn baud_constant(baud: u32) -> io::Result<libc::speed_t> {
        let speed = match baud {
            1200 => libc::B1200,
            2400 => libc::B2400,
            4800 => libc::B4800,
            9600 => libc::B9600,
            19200 => libc::B19200,
            38400 => libc::B38400,
            57600 => libc::B57600,
            115200 => libc::B115200,
            other => {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("unsupported baud rate {}", other),
                ))
            }
        };
        Ok(speed)
    }

    fn check(ret: libc::c_int) -> io::Result<()> {
        if ret != 0 {
            return Err(io::Error::last_os_error());
        }
        Ok(())
    }

    /// Drops `O_NONBLOCK` from an open descriptor.
    pub fn set_blocking(file: &File) -> io::Result<()> {
        let fd = file.as_raw_fd();
        unsafe {
            let flags = libc::fcntl(fd, libc::F_GETFL);
            if flags < 0 {
                return Err(io::Error::last_os_error());
            }
            if libc::fcntl(fd, libc::F_SETFL, flags & !libc::O_NONBLOCK) < 0 {
                return Err(io::Error::last_os_error());
            }
        }
        Ok(())
    }

    /// Opens the device in raw 8N1 mode. Reads return after at most 100 ms
    /// (`VMIN = 0`, `VTIME = 1`) with whatever arrived, possibly nothing.
    ///
    /// The open itself is non-blocking so a port with no carrier does not
    /// hang before `CLOCAL` is set.
    pub fn open_raw(settings: &SerialSettings) -> io::Result<File> {
        let speed = baud_constant(settings.baud)?;
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .custom_flags(libc::O_NOCTTY | libc::O_NONBLOCK)
            .open(&settings.path)?;
        let fd = file.as_raw_fd();

        unsafe {
            let mut tio: libc::termios = std::mem::zeroed();
            check(libc::tcgetattr(fd, &mut tio))?;
            libc::cfmakeraw(&mut tio);
            tio.c_cflag &= !(libc::PARENB | libc::CSTOPB | libc::CSIZE | libc::CRTSCTS);
            tio.c_cflag |= libc::CS8 | libc::CLOCAL | libc::CREAD;
            tio.c_cc[libc::VMIN] = 0;
            tio.c_cc[libc::VTIME] = 1;
            check(libc::cfsetispeed(&mut tio, speed))?;
            check(libc::cfsetospeed(&mut tio, speed))?;
            check(libc::tcsetattr(fd, libc::TCSANOW, &tio))?;
            check(libc::tcflush(fd, libc::TCIOFLUSH))?;
        }
        set_blocking(&file)?;

        Ok(file)
    }

}

#[cfg(not(unix))]
mod imp {
    use super::SerialSettings;
    use std::fs::File;
    use std::io;

    pub fn open_raw(settings: &SerialSettings) -> io::Result<File> {
        Err(io::Error::new(
            io::ErrorKind::Unsupported,
            format!("serial access to {} is only implemented for Unix hosts", settings.path.display()),
        ))
    }
}
