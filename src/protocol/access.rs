// Sat Oct 17 2026 - Alex

use crate::link::Link;
use crate::memory::Address;
use crate::protocol::{pause, ErrorPolicy, ProtocolError, Timing, TxStep};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestState {
    Idle,
    AddressSent,
    AwaitingResponse,
    Complete,
    TimedOut,
}

/// Byte-addressed read/write service of a resident applet.
///
/// A read sends the address high byte, waits the address gap, sends the low
/// byte and then waits for one reply byte. A write appends the value byte
/// after a second gap and gets no reply. The gaps are what the applet's
/// polling loop can keep up with; closing them garbles the address.
pub struct AccessProtocol<'a> {
    link: &'a mut Link,
    timing: Timing,
    policy: ErrorPolicy,
    state: RequestState,
}

impl<'a> AccessProtocol<'a> {
    pub fn new(link: &'a mut Link, timing: Timing, policy: ErrorPolicy) -> Self {
        Self {
            link,
            timing,
            policy,
            state: RequestState::Idle,
        }
    }

    pub fn state(&self) -> RequestState {
        self.state
    }

    pub fn policy(&self) -> ErrorPolicy {
        self.policy
    }

    pub fn read(&mut self, address: Address) -> Result<u8, ProtocolError> {
        self.state = RequestState::Idle;
        self.link.rx().clear();

        let mut deferred = None;
        self.transmit(TxStep::AddressHigh, address.high(), &mut deferred)?;
        pause(self.timing.address_gap());
        self.transmit(TxStep::AddressLow, address.low(), &mut deferred)?;
        self.state = RequestState::AddressSent;

        self.state = RequestState::AwaitingResponse;
        let waited = self.timing.response_timeout();
        let reply = self
            .link
            .rx()
            .wait_for(1, waited)
            .and_then(|_| self.link.rx().first());

        match reply {
            Some(value) => {
                self.state = RequestState::Complete;
                if let Some(err) = deferred {
                    log::warn!("Read of {} answered despite a transmit failure ({})", address, err);
                }
                log::trace!("Read {} = {:02X}", address, value);
                Ok(value)
            }
            None => {
                self.state = RequestState::TimedOut;
                match deferred {
                    Some(err) => Err(err),
                    None => Err(ProtocolError::ResponseTimeout { address, waited }),
                }
            }
        }
    }

    pub fn write(&mut self, address: Address, value: u8) -> Result<(), ProtocolError> {
        self.state = RequestState::Idle;
        self.link.rx().clear();

        let mut deferred = None;
        self.transmit(TxStep::AddressHigh, address.high(), &mut deferred)?;
        pause(self.timing.address_gap());
        self.transmit(TxStep::AddressLow, address.low(), &mut deferred)?;
        self.state = RequestState::AddressSent;
        pause(self.timing.address_gap());
        self.transmit(TxStep::Value, value, &mut deferred)?;
        self.state = RequestState::Complete;

        match deferred {
            Some(err) => Err(err),
            None => {
                log::trace!("Wrote {:02X} to {}", value, address);
                Ok(())
            }
        }
    }

    /// Under [`ErrorPolicy::Continue`] a failed byte is logged and remembered
    /// in `deferred` (first failure wins) so the remaining bytes still go out.
    fn transmit(
        &mut self,
        step: TxStep,
        byte: u8,
        deferred: &mut Option<ProtocolError>,
    ) -> Result<(), ProtocolError> {
        let source = match self.link.send_byte(byte) {
            Ok(()) => return Ok(()),
            Err(source) => source,
        };
        log::warn!("Error sending {} on serial port: {}", step, source);
        let err = ProtocolError::TransportWrite { step, source };
        match self.policy {
            ErrorPolicy::Abort => {
                self.state = RequestState::Idle;
                Err(err)
            }
            ErrorPolicy::Continue => {
                if deferred.is_none() {
                    *deferred = Some(err);
                }
                Ok(())
            }
        }
    }
}
