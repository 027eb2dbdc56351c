// Sat Oct 17 2026 - Alex

//! Scripted transports standing in for the programmer board in tests.

use crate::link::{Link, TransportReader, TransportWriter};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::io;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

#[derive(Default)]
struct FeedState {
    queue: VecDeque<u8>,
    error: Option<io::ErrorKind>,
}

/// Handle for injecting bytes (or one error) into a [`ScriptedReader`].
#[derive(Clone, Default)]
pub struct Feed {
    inner: Arc<Mutex<FeedState>>,
}

impl Feed {
    pub fn push(&self, bytes: &[u8]) {
        self.inner.lock().queue.extend(bytes.iter().copied());
    }

    pub fn fail_next(&self, kind: io::ErrorKind) {
        self.inner.lock().error = Some(kind);
    }
}

pub struct ScriptedReader {
    feed: Feed,
}

impl ScriptedReader {
    pub fn new() -> (Self, Feed) {
        let feed = Feed::default();
        (Self { feed: feed.clone() }, feed)
    }
}

impl TransportReader for ScriptedReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let mut state = self.feed.inner.lock();
        if let Some(kind) = state.error.take() {
            return Err(io::Error::new(kind, "scripted read failure"));
        }
        let n = buf.len().min(state.queue.len());
        for (slot, byte) in buf.iter_mut().zip(state.queue.drain(..n)) {
            *slot = byte;
        }
        Ok(n)
    }
}

#[derive(Default)]
struct RecordingState {
    bytes: Vec<(u8, Instant)>,
    calls: usize,
    fail_calls: Vec<usize>,
}

/// Every byte the host put on the wire, with the instant it was written.
#[derive(Clone, Default)]
pub struct Recording {
    inner: Arc<Mutex<RecordingState>>,
}

impl Recording {
    pub fn bytes(&self) -> Vec<u8> {
        self.inner.lock().bytes.iter().map(|(b, _)| *b).collect()
    }

    pub fn times(&self) -> Vec<Instant> {
        self.inner.lock().bytes.iter().map(|(_, t)| *t).collect()
    }

    pub fn calls(&self) -> usize {
        self.inner.lock().calls
    }

    /// Makes the write call with this zero-based index fail.
    pub fn fail_call(&self, index: usize) {
        self.inner.lock().fail_calls.push(index);
    }

    pub fn reset(&self) {
        let mut state = self.inner.lock();
        state.bytes.clear();
        state.calls = 0;
    }
}

#[derive(Debug, Clone)]
pub enum Responder {
    Silent,
    Fixed(u8),
    /// Replies with the low byte of the requested address.
    EchoLow,
    /// Sends `reply` once, `delay` after the `after`-th byte was written.
    Banner {
        after: usize,
        delay: Duration,
        reply: Vec<u8>,
    },
}

/// Plays the part of a resident applet: every `frame` bytes form one request
/// that the responder may answer through the feed.
pub struct StubTarget {
    frame: usize,
    skip: usize,
    pending: Vec<u8>,
    written: usize,
    responder: Responder,
    feed: Feed,
    recording: Recording,
}

impl StubTarget {
    pub fn new(frame: usize, responder: Responder, feed: Feed, recording: Recording) -> Self {
        Self {
            frame,
            skip: 0,
            pending: Vec::new(),
            written: 0,
            responder,
            feed,
            recording,
        }
    }

    /// The first `skip` bytes (an applet upload) are recorded but not framed.
    pub fn with_skip(mut self, skip: usize) -> Self {
        self.skip = skip;
        self
    }

    fn on_byte(&mut self, byte: u8) {
        self.written += 1;
        if let Responder::Banner { after, delay, reply } = &self.responder {
            if self.written == *after {
                let feed = self.feed.clone();
                let (delay, reply) = (*delay, reply.clone());
                thread::spawn(move || {
                    thread::sleep(delay);
                    feed.push(&reply);
                });
            }
            return;
        }
        if self.frame == 0 || self.written <= self.skip {
            return;
        }
        self.pending.push(byte);
        if self.pending.len() < self.frame {
            return;
        }
        let low = self.pending[1];
        self.pending.clear();
        match self.responder {
            Responder::Fixed(value) => self.feed.push(&[value]),
            Responder::EchoLow => self.feed.push(&[low]),
            _ => {}
        }
    }
}

impl TransportWriter for StubTarget {
    fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
        {
            let mut state = self.recording.inner.lock();
            let call = state.calls;
            state.calls += 1;
            if state.fail_calls.contains(&call) {
                return Err(io::Error::new(io::ErrorKind::BrokenPipe, "scripted write failure"));
            }
            let now = Instant::now();
            state.bytes.extend(bytes.iter().map(|&b| (b, now)));
        }
        for &b in bytes {
            self.on_byte(b);
        }
        Ok(bytes.len())
    }
}

/// Link wired to a [`StubTarget`].
pub fn stub_link(frame: usize, responder: Responder) -> (Link, Recording) {
    stub_applet_link(0, frame, responder)
}

/// Like [`stub_link`], for sessions that upload `upload_len` bytes first.
pub fn stub_applet_link(upload_len: usize, frame: usize, responder: Responder) -> (Link, Recording) {
    let (reader, feed) = ScriptedReader::new();
    let recording = Recording::default();
    let target = StubTarget::new(frame, responder, feed, recording.clone()).with_skip(upload_len);
    let link = Link::with_idle(Box::new(reader), Box::new(target), Duration::from_micros(50))
        .expect("spawn drain thread");
    (link, recording)
}
