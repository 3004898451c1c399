//! Hardware interface abstraction
//!
//! This module provides the [`DisplayInterface`] trait and the [`Interface`] struct
//! for talking to the IL0373 controller over a full-duplex SPI bus.
//!
//! ## Hardware Requirements
//!
//! - SPI bus (MOSI + SCK), driven as a raw [`SpiBus`]
//! - **CS**: chip select (output, active low), toggled by this driver
//! - **DC**: data/command select (output, low = command)
//! - **RST**: reset (output, active low), optional
//! - **BUSY**: busy status (input), optional
//!
//! Without a busy pin, [`DisplayInterface::busy_wait`] sleeps a fixed fallback
//! duration instead. That is an approximation: nothing tells the driver the
//! panel has actually finished.
//!
//! ## Bus Framing
//!
//! Every command is framed as:
//!
//! 1. CS low
//! 2. DC low, transfer the opcode
//! 3. DC high, transfer the payload (when present)
//! 4. CS high (when released)
//!
//! Leaving CS asserted lets the caller chain a data stream under the same
//! selection.
//!
//! ## Example
//!
//! ```rust,no_run
//! use embedded_hal::delay::DelayNs;
//! use embedded_hal::digital::{InputPin, OutputPin};
//! use embedded_hal::spi::SpiBus;
//! use il0373::{DisplayInterface, Interface, NoPin};
//! # use core::convert::Infallible;
//! # struct MockSpi;
//! # impl embedded_hal::spi::ErrorType for MockSpi { type Error = Infallible; }
//! # impl SpiBus for MockSpi {
//! #     fn read(&mut self, _words: &mut [u8]) -> Result<(), Self::Error> { Ok(()) }
//! #     fn write(&mut self, _words: &[u8]) -> Result<(), Self::Error> { Ok(()) }
//! #     fn transfer(&mut self, _read: &mut [u8], _write: &[u8]) -> Result<(), Self::Error> { Ok(()) }
//! #     fn transfer_in_place(&mut self, _words: &mut [u8]) -> Result<(), Self::Error> { Ok(()) }
//! #     fn flush(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # struct MockPin;
//! # impl embedded_hal::digital::ErrorType for MockPin { type Error = Infallible; }
//! # impl OutputPin for MockPin {
//! #     fn set_low(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! #     fn set_high(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # impl InputPin for MockPin {
//! #     fn is_high(&mut self) -> Result<bool, Self::Error> { Ok(false) }
//! #     fn is_low(&mut self) -> Result<bool, Self::Error> { Ok(true) }
//! # }
//! # struct MockDelay;
//! # impl DelayNs for MockDelay { fn delay_ns(&mut self, _ns: u32) {} }
//! # let mut delay = MockDelay;
//! // Reset wired, busy not wired
//! let mut interface = Interface::new(MockSpi, MockPin, MockPin, Some(MockPin), None::<NoPin>);
//!
//! // VCM-DC setting, select released afterwards
//! let _ = interface.command(0x82, Some(&[0x0A]), true);
//!
//! // Falls back to a fixed delay since busy is absent
//! let _ = interface.busy_wait(&mut delay);
//! ```

use core::convert::Infallible;
use core::fmt::Debug;
use core::marker::PhantomData;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{self, InputPin, OutputPin};
use embedded_hal::spi::SpiBus;

type InterfaceResult<T, E> = core::result::Result<T, E>;

/// Bytes moved per full-duplex transfer when streaming a plane
const CHUNK_SIZE: usize = 64;

/// Trait for the hardware interface to an IL0373 controller
///
/// This trait abstracts over different hardware implementations,
/// allowing the [`Display`](crate::display::Display) to work with any
/// SPI + GPIO implementation that satisfies embedded-hal traits.
///
/// Every method that touches the bus returns its failure; nothing is
/// logged and dropped.
pub trait DisplayInterface {
    /// Error type for interface operations
    type Error: Debug;

    /// Put the control lines into their idle levels
    ///
    /// Reset released (high), DC low (command mode), CS deasserted (high).
    fn configure(&mut self) -> InterfaceResult<(), Self::Error>;

    /// Send one framed command
    ///
    /// Asserts CS, sends `opcode` with DC low, then the payload with DC high
    /// if one is given. CS is deasserted at the end only when `release` is set.
    #[allow(clippy::type_complexity)]
    fn command(
        &mut self,
        opcode: u8,
        payload: Option<&[u8]>,
        release: bool,
    ) -> InterfaceResult<(), Self::Error>;

    /// Stream data bytes with DC high and CS asserted
    ///
    /// CS is left asserted; finish the stream with [`release`](Self::release).
    fn send_data(&mut self, data: &[u8]) -> InterfaceResult<(), Self::Error>;

    /// Wait for the bus to drain, then deassert CS
    fn release(&mut self) -> InterfaceResult<(), Self::Error>;

    /// Pulse the reset line
    ///
    /// Low for `hold_ms`, then high for `hold_ms`. A no-op when no reset pin
    /// is wired.
    fn reset<D: DelayNs>(&mut self, delay: &mut D, hold_ms: u32)
    -> InterfaceResult<(), Self::Error>;

    /// Block until the panel reports ready
    ///
    /// # Errors
    ///
    /// Returns [`InterfaceError::Timeout`] when the busy line stays asserted
    /// past the configured timeout.
    fn busy_wait<D: DelayNs>(&mut self, delay: &mut D) -> InterfaceResult<(), Self::Error>;
}

/// Errors that can occur at the interface level
///
/// Generic over SPI and GPIO error types.
#[derive(Debug)]
pub enum InterfaceError<SpiErr, PinErr> {
    /// SPI transfer failed
    Transfer(SpiErr),
    /// GPIO pin error
    Pin(PinErr),
    /// Busy line never released
    Timeout,
}

impl<SpiErr: Debug, PinErr: Debug> core::fmt::Display for InterfaceError<SpiErr, PinErr> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Transfer(e) => write!(f, "SPI transfer error: {e:?}"),
            Self::Pin(e) => write!(f, "Pin error: {e:?}"),
            Self::Timeout => write!(f, "Timeout waiting for display"),
        }
    }
}

impl<SpiErr: Debug, PinErr: Debug> core::error::Error for InterfaceError<SpiErr, PinErr> {}

/// Default timeout for busy-wait in milliseconds
pub const DEFAULT_BUSY_TIMEOUT_MS: u32 = 30_000;

/// Default interval between busy pin polls in milliseconds
pub const DEFAULT_BUSY_POLL_MS: u32 = 10;

/// Default sleep when no busy pin is wired, in milliseconds
pub const DEFAULT_BUSY_FALLBACK_MS: u32 = 500;

/// Placeholder for an unwired reset or busy pin
///
/// Behaves as an always-idle pin. The error type parameter lets it stand in
/// next to pins that share a concrete error type.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoPin<E = Infallible>(PhantomData<E>);

impl<E> NoPin<E> {
    /// Create a placeholder pin
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

impl<E: digital::Error> digital::ErrorType for NoPin<E> {
    type Error = E;
}

impl<E: digital::Error> OutputPin for NoPin<E> {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

impl<E: digital::Error> InputPin for NoPin<E> {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(false)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(true)
    }
}

/// Hardware interface implementation for IL0373
///
/// Implements [`DisplayInterface`] for embedded-hal v1.0 SPI and GPIO traits.
///
/// ## Type Parameters
///
/// * `SPI` - SPI bus implementing [`SpiBus`]
/// * `CS` - Chip select pin implementing [`OutputPin`]
/// * `DC` - Data/Command pin implementing [`OutputPin`]
/// * `RST` - Reset pin implementing [`OutputPin`] (use [`NoPin`] when absent)
/// * `BUSY` - Busy pin implementing [`InputPin`] (use [`NoPin`] when absent)
pub struct Interface<SPI, CS, DC, RST, BUSY> {
    spi: SPI,
    /// Chip select (active low)
    cs: CS,
    /// Data/Command select (low=command, high=data)
    dc: DC,
    /// Reset (active low)
    rst: Option<RST>,
    busy: Option<BUSY>,
    busy_timeout_ms: u32,
    busy_poll_ms: u32,
    busy_fallback_ms: u32,
    /// Busy pin polarity (true = active high, false = active low)
    busy_active_high: bool,
}

impl<SPI, CS, DC, RST, BUSY> Interface<SPI, CS, DC, RST, BUSY>
where
    SPI: SpiBus,
    CS: OutputPin,
    DC: OutputPin,
    RST: OutputPin,
    BUSY: InputPin,
{
    /// Create a new Interface
    ///
    /// # Arguments
    ///
    /// * `spi` - SPI bus
    /// * `cs` - Chip select pin (output, active low)
    /// * `dc` - Data/Command pin (output, low=command, high=data)
    /// * `rst` - Reset pin, if wired
    /// * `busy` - Busy pin, if wired
    pub fn new(spi: SPI, cs: CS, dc: DC, rst: Option<RST>, busy: Option<BUSY>) -> Self {
        Self {
            spi,
            cs,
            dc,
            rst,
            busy,
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
            busy_poll_ms: DEFAULT_BUSY_POLL_MS,
            busy_fallback_ms: DEFAULT_BUSY_FALLBACK_MS,
            busy_active_high: true,
        }
    }

    /// Set the busy-wait timeout in milliseconds
    ///
    /// Default is 30,000ms (30 seconds). Set to 0 to disable timeout.
    pub fn set_busy_timeout(&mut self, timeout_ms: u32) -> &mut Self {
        self.busy_timeout_ms = timeout_ms;
        self
    }

    /// Get the current busy-wait timeout in milliseconds
    pub fn busy_timeout(&self) -> u32 {
        self.busy_timeout_ms
    }

    /// Set the busy pin poll interval in milliseconds (minimum 1)
    pub fn set_busy_poll_interval(&mut self, poll_ms: u32) -> &mut Self {
        self.busy_poll_ms = poll_ms.max(1);
        self
    }

    /// Get the busy pin poll interval in milliseconds
    pub fn busy_poll_interval(&self) -> u32 {
        self.busy_poll_ms
    }

    /// Set the sleep used in place of polling when no busy pin is wired
    pub fn set_busy_fallback(&mut self, fallback_ms: u32) -> &mut Self {
        self.busy_fallback_ms = fallback_ms;
        self
    }

    /// Get the no-busy-pin fallback sleep in milliseconds
    pub fn busy_fallback(&self) -> u32 {
        self.busy_fallback_ms
    }

    /// Set busy pin polarity
    ///
    /// Default is active-high. Set to false for active-low panels.
    pub fn set_busy_active_high(&mut self, active_high: bool) -> &mut Self {
        self.busy_active_high = active_high;
        self
    }

    /// Get busy pin polarity (true = active high)
    pub fn busy_active_high(&self) -> bool {
        self.busy_active_high
    }

    /// Release the bus and pins
    pub fn release_parts(self) -> (SPI, CS, DC, Option<RST>, Option<BUSY>) {
        (self.spi, self.cs, self.dc, self.rst, self.busy)
    }
}

impl<SPI, CS, DC, RST, BUSY, PinErr> Interface<SPI, CS, DC, RST, BUSY>
where
    SPI: SpiBus,
    CS: OutputPin<Error = PinErr>,
    DC: OutputPin<Error = PinErr>,
{
    /// Full-duplex transfer of `data`, discarding what the panel clocks back
    fn transfer(&mut self, data: &[u8]) -> InterfaceResult<(), InterfaceError<SPI::Error, PinErr>> {
        let mut scratch = [0u8; CHUNK_SIZE];
        for chunk in data.chunks(CHUNK_SIZE) {
            let words = &mut scratch[..chunk.len()];
            words.copy_from_slice(chunk);
            self.spi
                .transfer_in_place(words)
                .map_err(InterfaceError::Transfer)?;
        }
        Ok(())
    }
}

impl<SPI, CS, DC, RST, BUSY, PinErr> DisplayInterface for Interface<SPI, CS, DC, RST, BUSY>
where
    SPI: SpiBus,
    SPI::Error: Debug,
    CS: OutputPin<Error = PinErr>,
    DC: OutputPin<Error = PinErr>,
    RST: OutputPin<Error = PinErr>,
    BUSY: InputPin<Error = PinErr>,
    PinErr: Debug,
{
    type Error = InterfaceError<SPI::Error, PinErr>;

    fn configure(&mut self) -> InterfaceResult<(), Self::Error> {
        if let Some(rst) = self.rst.as_mut() {
            rst.set_high().map_err(InterfaceError::Pin)?;
        }
        self.dc.set_low().map_err(InterfaceError::Pin)?;
        self.cs.set_high().map_err(InterfaceError::Pin)?;
        Ok(())
    }

    fn command(
        &mut self,
        opcode: u8,
        payload: Option<&[u8]>,
        release: bool,
    ) -> InterfaceResult<(), Self::Error> {
        self.cs.set_low().map_err(InterfaceError::Pin)?;
        self.dc.set_low().map_err(InterfaceError::Pin)?;
        self.transfer(&[opcode])?;
        if let Some(payload) = payload {
            self.dc.set_high().map_err(InterfaceError::Pin)?;
            self.transfer(payload)?;
        }
        if release {
            self.release()?;
        }
        Ok(())
    }

    fn send_data(&mut self, data: &[u8]) -> InterfaceResult<(), Self::Error> {
        self.cs.set_low().map_err(InterfaceError::Pin)?;
        self.dc.set_high().map_err(InterfaceError::Pin)?;
        self.transfer(data)
    }

    fn release(&mut self) -> InterfaceResult<(), Self::Error> {
        self.spi.flush().map_err(InterfaceError::Transfer)?;
        self.cs.set_high().map_err(InterfaceError::Pin)?;
        Ok(())
    }

    fn reset<D: DelayNs>(
        &mut self,
        delay: &mut D,
        hold_ms: u32,
    ) -> InterfaceResult<(), Self::Error> {
        let Some(rst) = self.rst.as_mut() else {
            return Ok(());
        };
        rst.set_low().map_err(InterfaceError::Pin)?;
        delay.delay_ms(hold_ms);
        rst.set_high().map_err(InterfaceError::Pin)?;
        delay.delay_ms(hold_ms);
        Ok(())
    }

    fn busy_wait<D: DelayNs>(&mut self, delay: &mut D) -> InterfaceResult<(), Self::Error> {
        let Some(busy) = self.busy.as_mut() else {
            log::warn!(
                "no busy pin, sleeping {} ms instead of polling",
                self.busy_fallback_ms
            );
            delay.delay_ms(self.busy_fallback_ms);
            return Ok(());
        };

        let timeout_ms = self.busy_timeout_ms;
        let mut waited_ms = 0u32;

        loop {
            let is_busy = if self.busy_active_high {
                busy.is_high()
            } else {
                busy.is_low()
            };

            if !is_busy.map_err(InterfaceError::Pin)? {
                return Ok(());
            }

            delay.delay_ms(self.busy_poll_ms);
            waited_ms = waited_ms.saturating_add(self.busy_poll_ms);
            if timeout_ms > 0 && waited_ms >= timeout_ms {
                return Err(InterfaceError::Timeout);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::rc::Rc;
    use alloc::vec;
    use alloc::vec::Vec;
    use core::cell::{Cell, RefCell};
    use embedded_hal::digital::ErrorType;
    use embedded_hal::spi::ErrorType as SpiErrorType;

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Event {
        CsLow,
        CsHigh,
        DcLow,
        DcHigh,
        RstLow,
        RstHigh,
        Transfer(Vec<u8>),
        Flush,
        Delay(u32),
    }

    type Log = Rc<RefCell<Vec<Event>>>;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct MockError;

    impl embedded_hal::digital::Error for MockError {
        fn kind(&self) -> embedded_hal::digital::ErrorKind {
            embedded_hal::digital::ErrorKind::Other
        }
    }

    impl embedded_hal::spi::Error for MockError {
        fn kind(&self) -> embedded_hal::spi::ErrorKind {
            embedded_hal::spi::ErrorKind::Other
        }
    }

    struct MockSpi {
        log: Log,
        fail: bool,
    }

    impl SpiErrorType for MockSpi {
        type Error = MockError;
    }

    impl SpiBus for MockSpi {
        fn read(&mut self, _words: &mut [u8]) -> Result<(), Self::Error> {
            Ok(())
        }

        fn write(&mut self, _words: &[u8]) -> Result<(), Self::Error> {
            Ok(())
        }

        fn transfer(&mut self, _read: &mut [u8], _write: &[u8]) -> Result<(), Self::Error> {
            Ok(())
        }

        fn transfer_in_place(&mut self, words: &mut [u8]) -> Result<(), Self::Error> {
            if self.fail {
                return Err(MockError);
            }
            self.log.borrow_mut().push(Event::Transfer(words.to_vec()));
            Ok(())
        }

        fn flush(&mut self) -> Result<(), Self::Error> {
            self.log.borrow_mut().push(Event::Flush);
            Ok(())
        }
    }

    #[derive(Clone, Copy)]
    enum Role {
        Cs,
        Dc,
        Rst,
    }

    struct MockPin {
        log: Log,
        role: Role,
    }

    impl ErrorType for MockPin {
        type Error = MockError;
    }

    impl OutputPin for MockPin {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            let event = match self.role {
                Role::Cs => Event::CsLow,
                Role::Dc => Event::DcLow,
                Role::Rst => Event::RstLow,
            };
            self.log.borrow_mut().push(event);
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Self::Error> {
            let event = match self.role {
                Role::Cs => Event::CsHigh,
                Role::Dc => Event::DcHigh,
                Role::Rst => Event::RstHigh,
            };
            self.log.borrow_mut().push(event);
            Ok(())
        }
    }

    /// Reads busy (high) for `polls` reads, then idle
    struct MockBusy {
        polls: Rc<Cell<u32>>,
        fail: bool,
    }

    impl ErrorType for MockBusy {
        type Error = MockError;
    }

    impl InputPin for MockBusy {
        fn is_high(&mut self) -> Result<bool, Self::Error> {
            if self.fail {
                return Err(MockError);
            }
            let remaining = self.polls.get();
            if remaining == 0 {
                return Ok(false);
            }
            self.polls.set(remaining - 1);
            Ok(true)
        }

        fn is_low(&mut self) -> Result<bool, Self::Error> {
            self.is_high().map(|high| !high)
        }
    }

    struct MockDelay {
        log: Log,
    }

    impl DelayNs for MockDelay {
        fn delay_ns(&mut self, ns: u32) {
            self.log.borrow_mut().push(Event::Delay(ns / 1_000_000));
        }

        fn delay_ms(&mut self, ms: u32) {
            self.log.borrow_mut().push(Event::Delay(ms));
        }
    }

    type TestInterface = Interface<MockSpi, MockPin, MockPin, MockPin, MockBusy>;

    fn interface(log: &Log, busy: Option<MockBusy>) -> TestInterface {
        let pin = |role| MockPin {
            log: Rc::clone(log),
            role,
        };
        Interface::new(
            MockSpi {
                log: Rc::clone(log),
                fail: false,
            },
            pin(Role::Cs),
            pin(Role::Dc),
            Some(pin(Role::Rst)),
            busy,
        )
    }

    fn busy_for(polls: u32) -> (MockBusy, Rc<Cell<u32>>) {
        let counter = Rc::new(Cell::new(polls));
        (
            MockBusy {
                polls: Rc::clone(&counter),
                fail: false,
            },
            counter,
        )
    }

    #[test]
    fn test_defaults() {
        let log = Log::default();
        let interface = interface(&log, None);
        assert_eq!(interface.busy_timeout(), DEFAULT_BUSY_TIMEOUT_MS);
        assert_eq!(interface.busy_poll_interval(), DEFAULT_BUSY_POLL_MS);
        assert_eq!(interface.busy_fallback(), DEFAULT_BUSY_FALLBACK_MS);
        assert!(interface.busy_active_high());
    }

    #[test]
    fn test_setters() {
        let log = Log::default();
        let mut interface = interface(&log, None);
        interface
            .set_busy_timeout(0)
            .set_busy_poll_interval(0)
            .set_busy_fallback(250)
            .set_busy_active_high(false);
        assert_eq!(interface.busy_timeout(), 0);
        assert_eq!(interface.busy_poll_interval(), 1);
        assert_eq!(interface.busy_fallback(), 250);
        assert!(!interface.busy_active_high());
    }

    #[test]
    fn test_configure_idle_levels() {
        let log = Log::default();
        let mut interface = interface(&log, None);
        interface.configure().unwrap();
        assert_eq!(
            *log.borrow(),
            vec![Event::RstHigh, Event::DcLow, Event::CsHigh]
        );
    }

    #[test]
    fn test_command_framing_with_payload() {
        let log = Log::default();
        let mut interface = interface(&log, None);
        interface.command(0x61, Some(&[0x80, 0x01, 0x28]), true).unwrap();
        assert_eq!(
            *log.borrow(),
            vec![
                Event::CsLow,
                Event::DcLow,
                Event::Transfer(vec![0x61]),
                Event::DcHigh,
                Event::Transfer(vec![0x80, 0x01, 0x28]),
                Event::Flush,
                Event::CsHigh,
            ]
        );
    }

    #[test]
    fn test_command_without_release_keeps_select() {
        let log = Log::default();
        let mut interface = interface(&log, None);
        interface.command(0x10, None, false).unwrap();
        assert_eq!(
            *log.borrow(),
            vec![Event::CsLow, Event::DcLow, Event::Transfer(vec![0x10])]
        );
    }

    #[test]
    fn test_send_data_is_chunked() {
        let log = Log::default();
        let mut interface = interface(&log, None);
        let data = vec![0xAA; CHUNK_SIZE + 3];
        interface.send_data(&data).unwrap();
        interface.release().unwrap();
        assert_eq!(
            *log.borrow(),
            vec![
                Event::CsLow,
                Event::DcHigh,
                Event::Transfer(vec![0xAA; CHUNK_SIZE]),
                Event::Transfer(vec![0xAA; 3]),
                Event::Flush,
                Event::CsHigh,
            ]
        );
    }

    #[test]
    fn test_transfer_error_is_returned() {
        let log = Log::default();
        let mut interface = interface(&log, None);
        interface.spi.fail = true;
        let result = interface.command(0x12, None, true);
        assert!(matches!(result, Err(InterfaceError::Transfer(MockError))));
        // Select stays asserted; the caller decides how to recover
        assert!(!log.borrow().contains(&Event::CsHigh));
    }

    #[test]
    fn test_reset_pulse() {
        let log = Log::default();
        let mut interface = interface(&log, None);
        let mut delay = MockDelay {
            log: Rc::clone(&log),
        };
        interface.reset(&mut delay, 100).unwrap();
        assert_eq!(
            *log.borrow(),
            vec![
                Event::RstLow,
                Event::Delay(100),
                Event::RstHigh,
                Event::Delay(100)
            ]
        );
    }

    #[test]
    fn test_reset_without_pin_is_noop() {
        let log = Log::default();
        let mut interface: Interface<_, _, _, NoPin<MockError>, MockBusy> = Interface::new(
            MockSpi {
                log: Rc::clone(&log),
                fail: false,
            },
            MockPin {
                log: Rc::clone(&log),
                role: Role::Cs,
            },
            MockPin {
                log: Rc::clone(&log),
                role: Role::Dc,
            },
            None,
            None,
        );
        let mut delay = MockDelay {
            log: Rc::clone(&log),
        };
        interface.reset(&mut delay, 100).unwrap();
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_busy_wait_polls_until_idle() {
        let log = Log::default();
        let (busy, counter) = busy_for(3);
        let mut interface = interface(&log, Some(busy));
        let mut delay = MockDelay {
            log: Rc::clone(&log),
        };
        interface.busy_wait(&mut delay).unwrap();
        assert_eq!(counter.get(), 0);
        assert_eq!(
            *log.borrow(),
            vec![Event::Delay(10), Event::Delay(10), Event::Delay(10)]
        );
    }

    #[test]
    fn test_busy_wait_active_low() {
        let log = Log::default();
        // Reads high forever, which means idle on an active-low line
        let (busy, _) = busy_for(u32::MAX);
        let mut interface = interface(&log, Some(busy));
        interface.set_busy_active_high(false);
        let mut delay = MockDelay {
            log: Rc::clone(&log),
        };
        interface.busy_wait(&mut delay).unwrap();
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_busy_wait_times_out() {
        let log = Log::default();
        let (busy, _) = busy_for(u32::MAX);
        let mut interface = interface(&log, Some(busy));
        interface.set_busy_timeout(50);
        let mut delay = MockDelay {
            log: Rc::clone(&log),
        };
        let result = interface.busy_wait(&mut delay);
        assert!(matches!(result, Err(InterfaceError::Timeout)));
        assert_eq!(log.borrow().len(), 5);
    }

    #[test]
    fn test_busy_wait_pin_error() {
        let log = Log::default();
        let mut interface = interface(
            &log,
            Some(MockBusy {
                polls: Rc::new(Cell::new(0)),
                fail: true,
            }),
        );
        let mut delay = MockDelay {
            log: Rc::clone(&log),
        };
        let result = interface.busy_wait(&mut delay);
        assert!(matches!(result, Err(InterfaceError::Pin(MockError))));
    }

    #[test]
    fn test_busy_wait_falls_back_without_pin() {
        let log = Log::default();
        let mut interface = interface(&log, None);
        interface.set_busy_fallback(400);
        let mut delay = MockDelay {
            log: Rc::clone(&log),
        };
        interface.busy_wait(&mut delay).unwrap();
        assert_eq!(*log.borrow(), vec![Event::Delay(400)]);
    }
}
