// Sat Oct 17 2026 - Alex

use parking_lot::{Condvar, Mutex};
use std::time::{Duration, Instant};

pub const DEFAULT_CAPACITY: usize = 1024;

struct Inner {
    bytes: Vec<u8>,
    dropped: usize,
}

/// Bytes received from the target, appended by the drain thread and read by
/// protocol operations.
///
/// Once `capacity` bytes are held, further bytes are dropped until
/// [`ReceiveBuffer::clear`]. Appends and clears serialize on one lock, so a
/// clear never interleaves with a half-finished append.
pub struct ReceiveBuffer {
    inner: Mutex<Inner>,
    arrived: Condvar,
    capacity: usize,
}

impl ReceiveBuffer {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: Mutex::new(Inner {
                bytes: Vec::with_capacity(capacity),
                dropped: 0,
            }),
            arrived: Condvar::new(),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Appends as much of `data` as fits and returns how many bytes were kept.
    pub fn push(&self, data: &[u8]) -> usize {
        let mut inner = self.inner.lock();
        let room = self.capacity - inner.bytes.len();
        let kept = room.min(data.len());
        inner.bytes.extend_from_slice(&data[..kept]);
        inner.dropped += data.len() - kept;
        drop(inner);
        if kept > 0 {
            self.arrived.notify_all();
        }
        kept
    }

    pub fn clear(&self) {
        let mut inner = self.inner.lock();
        inner.bytes.clear();
        inner.dropped = 0;
    }

    pub fn len(&self) -> usize {
        self.inner.lock().bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_saturated(&self) -> bool {
        self.len() >= self.capacity
    }

    /// Bytes discarded since the last clear because the buffer was full.
    pub fn dropped(&self) -> usize {
        self.inner.lock().dropped
    }

    pub fn first(&self) -> Option<u8> {
        self.inner.lock().bytes.first().copied()
    }

    pub fn snapshot(&self) -> Vec<u8> {
        self.inner.lock().bytes.clone()
    }

    /// Takes everything buffered, leaving the buffer empty.
    pub fn take(&self) -> Vec<u8> {
        let mut inner = self.inner.lock();
        inner.dropped = 0;
        std::mem::take(&mut inner.bytes)
    }

    /// Blocks until at least `min` bytes are buffered or `timeout` elapses.
    /// Returns the buffered count on success. A timeout too large for the
    /// clock waits without a deadline.
    pub fn wait_for(&self, min: usize, timeout: Duration) -> Option<usize> {
        let deadline = Instant::now().checked_add(timeout);
        let mut inner = self.inner.lock();
        while inner.bytes.len() < min {
            match deadline {
                Some(deadline) => {
                    if self.arrived.wait_until(&mut inner, deadline).timed_out() {
                        break;
                    }
                }
                None => self.arrived.wait(&mut inner),
            }
        }
        let len = inner.bytes.len();
        if len >= min {
            Some(len)
        } else {
            None
        }
    }
}

impl Default for ReceiveBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_push_and_first() {
        let buf = ReceiveBuffer::new();
        assert_eq!(buf.first(), None);
        assert_eq!(buf.push(&[0x42, 0x43]), 2);
        assert_eq!(buf.first(), Some(0x42));
        assert_eq!(buf.len(), 2);
    }

    #[test]
    fn test_saturation_drops_new_bytes() {
        let buf = ReceiveBuffer::with_capacity(4);
        assert_eq!(buf.push(&[1, 2, 3]), 3);
        assert_eq!(buf.push(&[4, 5, 6]), 1);
        assert!(buf.is_saturated());
        assert_eq!(buf.snapshot(), vec![1, 2, 3, 4]);
        assert_eq!(buf.dropped(), 2);
        assert_eq!(buf.push(&[7]), 0);

        buf.clear();
        assert!(buf.is_empty());
        assert_eq!(buf.dropped(), 0);
        assert_eq!(buf.push(&[8]), 1);
        assert_eq!(buf.first(), Some(8));
    }

    #[test]
    fn test_default_capacity() {
        let buf = ReceiveBuffer::default();
        let data = vec![0xAA; 1500];
        assert_eq!(buf.push(&data), 1024);
        assert_eq!(buf.len(), 1024);
    }

    #[test]
    fn test_take_empties() {
        let buf = ReceiveBuffer::new();
        buf.push(b"HC05");
        assert_eq!(buf.take(), b"HC05".to_vec());
        assert!(buf.is_empty());
    }

    #[test]
    fn test_wait_times_out_when_silent() {
        let buf = ReceiveBuffer::new();
        let start = Instant::now();
        assert_eq!(buf.wait_for(1, Duration::from_millis(5)), None);
        assert!(start.elapsed() >= Duration::from_millis(5));
    }

    #[test]
    fn test_wait_wakes_on_push() {
        let buf = Arc::new(ReceiveBuffer::new());
        let producer = {
            let buf = buf.clone();
            thread::spawn(move || {
                thread::sleep(Duration::from_millis(2));
                buf.push(&[0x42]);
            })
        };
        assert_eq!(buf.wait_for(1, Duration::from_secs(2)), Some(1));
        assert_eq!(buf.first(), Some(0x42));
        producer.join().unwrap();
    }

    #[test]
    fn test_wait_with_unbounded_timeout() {
        let buf = Arc::new(ReceiveBuffer::new());
        let producer = {
            let buf = buf.clone();
            thread::spawn(move || {
                thread::sleep(Duration::from_millis(2));
                buf.push(&[0x21, 0x22]);
            })
        };
        assert_eq!(buf.wait_for(2, Duration::MAX), Some(2));
        producer.join().unwrap();
    }

    #[test]
    fn test_concurrent_push_and_clear_never_exceeds_capacity() {
        let buf = Arc::new(ReceiveBuffer::with_capacity(64));
        let producer = {
            let buf = buf.clone();
            thread::spawn(move || {
                for i in 0..5000u32 {
                    buf.push(&[(i & 0xFF) as u8; 3]);
                }
            })
        };
        for _ in 0..1000 {
            buf.clear();
            assert!(buf.len() <= 64);
        }
        producer.join().unwrap();
        assert!(buf.len() <= 64);
    }
}
