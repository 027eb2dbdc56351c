// Sat Oct 17 2026 - Alex

use crate::link::Link;
use crate::memory::MemoryImage;
use crate::protocol::{pause, ErrorPolicy, ProceedGate, ProgressSink, ProtocolError, Timing, TxStep};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadReport {
    pub length_indicator: u8,
    pub bytes_sent: usize,
    /// Payload indices whose transmit failed under [`ErrorPolicy::Continue`].
    pub failed: Vec<usize>,
}

impl UploadReport {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Pushes a RAM image through the bootloader's length-prefixed handshake:
/// one length byte counting itself, then the payload in address order with
/// a fixed delay before every byte. There is no acknowledgement; once the
/// stream is out the target is assumed to run the applet.
pub struct AppletUploader<'a> {
    link: &'a mut Link,
    timing: Timing,
    policy: ErrorPolicy,
}

impl<'a> AppletUploader<'a> {
    pub fn new(link: &'a mut Link, timing: Timing, policy: ErrorPolicy) -> Self {
        Self { link, timing, policy }
    }

    pub fn length_indicator(image: &MemoryImage) -> Result<u8, ProtocolError> {
        let len = image.upload_bytes().len();
        u8::try_from(len + 1).map_err(|_| ProtocolError::ImageTooLarge { len })
    }

    pub fn upload(
        &mut self,
        image: &MemoryImage,
        gate: &mut dyn ProceedGate,
        progress: &mut dyn ProgressSink,
    ) -> Result<UploadReport, ProtocolError> {
        if image.is_empty() {
            return Err(ProtocolError::EmptyImage);
        }
        let length = Self::length_indicator(image)?;
        let payload = image.upload_bytes();
        if payload.len() < image.loaded_len() {
            let note = format!(
                "{} byte(s) loaded but only {} follow the program start, sending those",
                image.loaded_len(),
                payload.len()
            );
            log::warn!("{}", note);
            progress.message(&note);
        }

        if !gate.wait_for_proceed() {
            return Err(ProtocolError::NotArmed);
        }

        log::info!("Uploading {} byte(s) from {:?}, length indicator {}", payload.len(), image.program_start(), length);
        self.link
            .send_byte(length)
            .map_err(|source| ProtocolError::TransportWrite { step: TxStep::LengthByte, source })?;

        progress.begin("Upload to target", payload.len() as u64);
        let mut failed = Vec::new();
        for (index, &byte) in payload.iter().enumerate() {
            pause(self.timing.upload_byte_delay());
            match self.link.send_byte(byte) {
                Ok(()) => progress.step(true),
                Err(source) => {
                    progress.step(false);
                    match self.policy {
                        ErrorPolicy::Abort => {
                            progress.finish("aborted");
                            return Err(ProtocolError::TransportWrite { step: TxStep::Payload(index), source });
                        }
                        ErrorPolicy::Continue => {
                            let note = format!("Error writing byte {} to target: {}", index, source);
                            log::warn!("{}", note);
                            progress.message(&note);
                            failed.push(index);
                        }
                    }
                }
            }
        }
        progress.finish("DONE!");

        Ok(UploadReport {
            length_indicator: length,
            bytes_sent: 1 + payload.len() - failed.len(),
            failed,
        })
    }
}
