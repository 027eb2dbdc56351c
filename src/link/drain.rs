// Sat Oct 17 2026 - Alex

use crate::link::{ReceiveBuffer, TransportReader};
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

const READ_CHUNK: usize = 100;
const ERROR_BACKOFF: Duration = Duration::from_millis(10);

/// Background thread moving everything the transport delivers into a
/// [`ReceiveBuffer`]. It is the buffer's only writer.
pub struct RxDrain {
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl RxDrain {
    pub fn spawn(
        mut reader: Box<dyn TransportReader>,
        rx: Arc<ReceiveBuffer>,
        idle: Duration,
    ) -> io::Result<Self> {
        let stop = Arc::new(AtomicBool::new(false));
        let flag = stop.clone();
        let handle = thread::Builder::new()
            .name("rx-drain".to_string())
            .spawn(move || {
                let mut chunk = [0u8; READ_CHUNK];
                let mut failing = false;
                while !flag.load(Ordering::Acquire) {
                    match reader.read(&mut chunk) {
                        Ok(0) => thread::sleep(idle),
                        Ok(n) => {
                            failing = false;
                            let kept = rx.push(&chunk[..n]);
                            if kept < n {
                                log::debug!("Receive buffer full, dropped {} byte(s)", n - kept);
                            }
                        }
                        Err(e) if matches!(
                            e.kind(),
                            io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut | io::ErrorKind::Interrupted
                        ) => thread::sleep(idle),
                        Err(e) => {
                            if !failing {
                                log::warn!("Serial receive error: {}", e);
                                failing = true;
                            }
                            thread::sleep(ERROR_BACKOFF);
                        }
                    }
                }
                log::debug!("Receive drain stopped");
            })?;

        Ok(Self {
            stop,
            handle: Some(handle),
        })
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().map(|h| !h.is_finished()).unwrap_or(false)
    }

    pub fn stop(&mut self) {
        self.stop.store(true, Ordering::Release);
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                log::error!("Receive drain thread panicked");
            }
        }
    }
}

impl Drop for RxDrain {
    fn drop(&mut self) {
        self.stop();
    }
}
