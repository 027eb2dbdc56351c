// Sat Oct 17 2026 - Alex

use crate::config::Config;
use crate::engine::{Applet, EngineError};
use crate::link::{Link, SerialSettings};
use crate::memory::{Address, MemoryImage, MemoryMap};
use crate::protocol::{
    AccessProtocol, AppletUploader, DumpReport, FullSpaceDump, ProceedGate, ProgressSink, ProtocolError,
    UploadReport,
};
use crate::srec::{DecodeReport, SrecDecoder};
use std::path::Path;
use std::thread;

/// Text the self-test applet must send back.
pub const SELF_TEST_SIGNATURE: &str = "HC05";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    Idle,
    /// The RAM image holds a decoded file that has not been sent yet.
    ImageLoaded,
    /// A user program from the RAM image was uploaded and is running.
    UserProgram,
    Resident(Applet),
}

#[derive(Debug, Clone)]
pub struct SelfTestReport {
    pub upload: UploadReport,
    pub received: String,
}

/// Owns everything one programming session touches: the link to the board,
/// the RAM and PROM images and the configuration. Operations borrow the
/// engine mutably, so only one exchange is ever in flight.
pub struct Engine {
    config: Config,
    link: Link,
    ram: MemoryImage,
    prom: MemoryImage,
    decoder: SrecDecoder,
    state: EngineState,
}

impl Engine {
    pub fn new(config: Config, link: Link) -> Self {
        let map = MemoryMap::mc68hc705c8();
        let ram = MemoryImage::for_region(map.ram());
        let prom = MemoryImage::for_region(map.prom());
        let decoder = SrecDecoder::new().with_strict_hex(config.strict_hex);
        Self {
            config,
            link,
            ram,
            prom,
            decoder,
            state: EngineState::Idle,
        }
    }

    pub fn connect(config: Config) -> Result<Self, EngineError> {
        let settings = SerialSettings::new(&config.port, config.baud_rate());
        let link = Link::open_serial(&settings).map_err(|source| EngineError::Connect {
            port: config.port.clone(),
            source,
        })?;
        Ok(Self::new(config, link))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn ram_image(&self) -> &MemoryImage {
        &self.ram
    }

    pub fn prom_image(&self) -> &MemoryImage {
        &self.prom
    }

    pub fn link(&self) -> &Link {
        &self.link
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn load_ram(&mut self, path: &Path) -> Result<DecodeReport, EngineError> {
        self.ram.clear();
        self.state = EngineState::Idle;
        let report = self.decoder.load_file(path, &mut self.ram)?;
        self.state = EngineState::ImageLoaded;
        log::info!("{} byte(s) written to RAM buffer", report.bytes_written);
        Ok(report)
    }

    /// Decodes into the host-side PROM image only; nothing is sent.
    pub fn load_prom(&mut self, path: &Path) -> Result<DecodeReport, EngineError> {
        self.prom.clear();
        let report = self.decoder.load_file(path, &mut self.prom)?;
        log::info!("{} byte(s) written to PROM buffer", report.bytes_written);
        Ok(report)
    }

    pub fn load_applet(&mut self, applet: Applet) -> Result<DecodeReport, EngineError> {
        let path = applet.path_in(&self.config.applet_dir);
        self.load_ram(&path)
    }

    /// Streams the RAM image into the armed bootloader.
    pub fn upload(
        &mut self,
        gate: &mut dyn ProceedGate,
        progress: &mut dyn ProgressSink,
    ) -> Result<UploadReport, EngineError> {
        let report = AppletUploader::new(&mut self.link, self.config.timing, self.config.error_policy)
            .upload(&self.ram, gate, progress)?;
        self.state = EngineState::UserProgram;
        Ok(report)
    }

    pub fn run_applet(
        &mut self,
        applet: Applet,
        gate: &mut dyn ProceedGate,
        progress: &mut dyn ProgressSink,
    ) -> Result<UploadReport, EngineError> {
        self.load_applet(applet)?;
        let report = self.upload(gate, progress)?;
        self.state = EngineState::Resident(applet);
        log::info!("{} resident", applet);
        Ok(report)
    }

    pub fn self_test(
        &mut self,
        gate: &mut dyn ProceedGate,
        progress: &mut dyn ProgressSink,
    ) -> Result<SelfTestReport, EngineError> {
        self.link.rx().clear();
        let upload = self.run_applet(Applet::GoTest, gate, progress)?;

        self.link.rx().clear();
        thread::sleep(self.config.timing.settle());
        let received = String::from_utf8_lossy(&self.link.rx().take()).into_owned();
        self.link.rx().clear();

        if received.contains(SELF_TEST_SIGNATURE) {
            Ok(SelfTestReport { upload, received })
        } else {
            Err(EngineError::SelfTestFailed { received })
        }
    }

    pub fn demo(
        &mut self,
        gate: &mut dyn ProceedGate,
        progress: &mut dyn ProgressSink,
    ) -> Result<UploadReport, EngineError> {
        self.link.rx().clear();
        let report = self.run_applet(Applet::Demo, gate, progress)?;
        self.link.rx().clear();
        Ok(report)
    }

    pub fn access(&mut self) -> AccessProtocol<'_> {
        AccessProtocol::new(&mut self.link, self.config.timing, self.config.error_policy)
    }

    pub fn read(&mut self, address: Address) -> Result<u8, ProtocolError> {
        self.access().read(address)
    }

    pub fn write(&mut self, address: Address, value: u8) -> Result<(), ProtocolError> {
        self.access().write(address, value)
    }

    pub fn dump(&mut self, progress: &mut dyn ProgressSink) -> Result<DumpReport, ProtocolError> {
        let mut access = self.access();
        FullSpaceDump::new(&mut access).run(progress)
    }

    pub fn close(self) {
        self.link.close();
    }
}
