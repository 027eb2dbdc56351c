// Sat Oct 17 2026 - Alex

pub mod buffer;
pub mod drain;
pub mod serial;
#[cfg(test)]
pub(crate) mod stub;

pub use buffer::ReceiveBuffer;
pub use drain::RxDrain;
pub use serial::{SerialPort, SerialSettings};

use std::io;
use std::sync::Arc;
use std::time::Duration;

const DEFAULT_IDLE: Duration = Duration::from_micros(200);

/// Receiving half of the duplex byte channel. `read` must not block for
/// long; returning `Ok(0)` means nothing arrived yet.
pub trait TransportReader: Send {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize>;
}

/// Transmitting half of the duplex byte channel.
pub trait TransportWriter: Send {
    fn write(&mut self, bytes: &[u8]) -> io::Result<usize>;
}

/// The open channel to the target: the transmit half, the shared receive
/// buffer and the thread that fills it.
pub struct Link {
    writer: Box<dyn TransportWriter>,
    rx: Arc<ReceiveBuffer>,
    drain: RxDrain,
}

impl Link {
    pub fn new(reader: Box<dyn TransportReader>, writer: Box<dyn TransportWriter>) -> io::Result<Self> {
        Self::with_idle(reader, writer, DEFAULT_IDLE)
    }

    pub fn with_idle(
        reader: Box<dyn TransportReader>,
        writer: Box<dyn TransportWriter>,
        idle: Duration,
    ) -> io::Result<Self> {
        let rx = Arc::new(ReceiveBuffer::new());
        let drain = RxDrain::spawn(reader, rx.clone(), idle)?;
        Ok(Self { writer, rx, drain })
    }

    pub fn open_serial(settings: &SerialSettings) -> io::Result<Self> {
        let port = SerialPort::open(settings)?;
        let (reader, writer) = port.split()?;
        Self::new(Box::new(reader), Box::new(writer))
    }

    /// Puts one byte on the wire.
    pub fn send_byte(&mut self, byte: u8) -> io::Result<()> {
        match self.writer.write(&[byte])? {
            0 => Err(io::Error::new(io::ErrorKind::WriteZero, "transport accepted no bytes")),
            _ => Ok(()),
        }
    }

    pub fn rx(&self) -> &ReceiveBuffer {
        &self.rx
    }

    pub fn close(mut self) {
        self.drain.stop();
    }
}
