//! High-level interface for the PAJ7620U2 gesture sensor.
//!
//! [`Paj7620`] wraps the low-level register driver with the power-up
//! sequence, the identity check, and gesture decoding with settle delays.

use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::i2c::I2c;

use crate::config::Timing;
use crate::driver::RegisterDriver;
use crate::error::GestureError;
use crate::gesture::{decode_flag0, is_wave, Decoded, Gesture};
use crate::registers::{
    BANK_0, GES_PS_DET_FLAG_0, GES_PS_DET_FLAG_1, INIT_REGISTERS, PART_ID, PART_ID_HIGH,
    PART_ID_LOW,
};

/// Async driver for the PAJ7620U2.
///
/// Owns the I2C bus handle and a delay provider. Every wait the sensor
/// needs, including the settle delays after a gesture, goes through the
/// delay, so sampling is a blocking operation from the caller's point of
/// view.
///
/// # Lifecycle
///
/// 1. [`Paj7620::new()`]: constructs the driver without any I2C traffic.
/// 2. [`Paj7620::initialize()`]: identity check and configuration upload.
/// 3. [`Paj7620::gesture()`]: sample the detection flags.
///
/// Until `initialize()` succeeds, sampling returns [`Gesture::None`] without
/// touching the bus.
///
/// # Example
///
/// ```ignore
/// use paj7620_driver::{Gesture, Paj7620, DEFAULT_ADDRESS};
///
/// # async fn example(
/// #     i2c: impl embedded_hal_async::i2c::I2c,
/// #     delay: impl embedded_hal_async::delay::DelayNs,
/// # ) {
/// let mut sensor = Paj7620::new(i2c, delay, DEFAULT_ADDRESS);
/// sensor.initialize().await.unwrap();
///
/// if sensor.gesture().await == Gesture::Wave {
///     // ...
/// }
/// # }
/// ```
pub struct Paj7620<I2C, D> {
    driver: RegisterDriver<I2C>,
    delay: D,
    timing: Timing,
    /// Set to `true` after a successful `initialize()` call.
    initialized: bool,
}

impl<I2C, D> Paj7620<I2C, D>
where
    I2C: I2c,
    D: DelayNs,
{
    /// Construct an uninitialised driver with the default [`Timing`].
    ///
    /// # Arguments
    /// * `i2c`: I2C peripheral (takes ownership for exclusive access)
    /// * `delay`: delay provider used for every settle wait
    /// * `address`: 7-bit I2C device address (always 0x73)
    pub fn new(i2c: I2C, delay: D, address: u8) -> Self {
        Self {
            driver: RegisterDriver::new(i2c, address),
            delay,
            timing: Timing::default(),
            initialized: false,
        }
    }

    /// Replace the settle delays.
    pub fn with_timing(mut self, timing: Timing) -> Self {
        self.timing = timing;
        self
    }

    /// Current settle delays.
    pub fn timing(&self) -> &Timing {
        &self.timing
    }

    /// `true` once the identity check and configuration upload succeeded.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Give back the bus and delay.
    pub fn release(self) -> (I2C, D) {
        (self.driver.release(), self.delay)
    }

    // ── Initialisation ───────────────────────────────────────────────

    /// Read the 16-bit part id from bank 0.
    ///
    /// Selects bank 0 first so the read is valid regardless of which bank
    /// the device was left in.
    pub async fn part_id(&mut self) -> Result<u16, GestureError<I2C::Error>> {
        self.driver.select_bank(BANK_0).await?;
        self.delay.delay_ms(self.timing.bank_select_ms).await;
        self.driver.read_u16_split(PART_ID_LOW, PART_ID_HIGH).await
    }

    /// Verify the device identity and upload the configuration table.
    ///
    /// Safe to call again to retry or to reset the device; it is not retried
    /// automatically.
    ///
    /// # Errors
    /// * [`GestureError::IdentityMismatch`] if the part id is not `0x7620`.
    ///   No configuration register has been written.
    /// * [`GestureError::I2c`] on communication failure.
    ///
    /// On any error the driver is left uninitialised.
    pub async fn initialize(&mut self) -> Result<(), GestureError<I2C::Error>> {
        self.initialized = false;
        self.delay.delay_ms(self.timing.power_up_ms).await;

        let found = self.part_id().await?;
        if found != PART_ID {
            #[cfg(feature = "defmt")]
            defmt::error!("PAJ7620 not found: part id {=u16:#x}", found);
            return Err(GestureError::IdentityMismatch { found });
        }

        // Order matters: the table switches banks partway through.
        for &(register, value) in INIT_REGISTERS.iter() {
            self.driver.write_u8(register, value).await?;
        }

        self.driver.select_bank(BANK_0).await?;
        self.delay.delay_ms(self.timing.init_complete_ms).await;
        self.initialized = true;

        #[cfg(feature = "defmt")]
        defmt::info!("PAJ7620 initialised ({} config registers)", INIT_REGISTERS.len());
        Ok(())
    }

    // ── Gesture sampling ─────────────────────────────────────────────

    /// Sample the detection flags once and decode them.
    ///
    /// Reading the flag registers clears them on the device, so every call
    /// consumes the pending detection. After a detection the call waits the
    /// configured settle delay before returning:
    ///
    /// | Result                 | Wait                                        |
    /// |------------------------|---------------------------------------------|
    /// | `Wave`                 | `wave_settle_ms`                            |
    /// | `Forward` / `Backward` | `gesture_settle_ms` then `depth_settle_ms`  |
    /// | other directions       | `gesture_settle_ms`                         |
    /// | `None`                 | none                                        |
    ///
    /// flag0 is not read when flag1 reports a wave. A flag0 value with several
    /// bits set does not identify a gesture and yields `None`.
    ///
    /// # Errors
    /// * [`GestureError::I2c`] on communication failure.
    pub async fn read_gesture(&mut self) -> Result<Gesture, GestureError<I2C::Error>> {
        if !self.initialized {
            return Ok(Gesture::None);
        }

        let flag1 = self.driver.read_u8(GES_PS_DET_FLAG_1).await?;
        if is_wave(flag1) {
            self.delay.delay_ms(self.timing.wave_settle_ms).await;
            return Ok(Gesture::Wave);
        }

        let flag0 = self.driver.read_u8(GES_PS_DET_FLAG_0).await?;
        let gesture = match decode_flag0(flag0) {
            Decoded::Single(gesture) => gesture,
            Decoded::Ambiguous(_raw) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("Ignoring combined gesture flags {=u8:#x}", _raw);
                Gesture::None
            }
        };

        if gesture != Gesture::None {
            self.delay.delay_ms(self.timing.gesture_settle_ms).await;
        }
        if gesture.is_depth() {
            self.delay.delay_ms(self.timing.depth_settle_ms).await;
        }

        Ok(gesture)
    }

    /// Sample the current gesture, treating bus errors as "nothing detected".
    ///
    /// Returns [`Gesture::None`] without bus traffic while uninitialised.
    pub async fn gesture(&mut self) -> Gesture {
        match self.read_gesture().await {
            Ok(gesture) => gesture,
            Err(_e) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("Gesture read failed");
                Gesture::None
            }
        }
    }
}

#[cfg(feature = "embassy-time")]
impl<I2C> Paj7620<I2C, embassy_time::Delay>
where
    I2C: I2c,
{
    /// Construct a driver that waits on the Embassy timer.
    pub fn new_embassy(i2c: I2C, address: u8) -> Self {
        Self::new(i2c, embassy_time::Delay, address)
    }
}

#[cfg(test)]
mod tests {
    use embassy_futures::block_on;

    use super::*;
    use crate::mock::{MockDelay, MockI2c};
    use crate::registers::{BANK_SELECT, DEFAULT_ADDRESS, INIT_REGISTER_COUNT};

    fn sensor(i2c: MockI2c<'static>) -> Paj7620<MockI2c<'static>, MockDelay> {
        Paj7620::new(i2c, MockDelay::default(), DEFAULT_ADDRESS)
    }

    /// A sensor that has passed `initialize()`, with the recorded init
    /// traffic cleared.
    fn ready(i2c: MockI2c<'static>) -> Paj7620<MockI2c<'static>, MockDelay> {
        let mut s = sensor(i2c);
        block_on(s.initialize()).unwrap();
        s.driver.i2c_mut().writes.clear();
        s.driver.i2c_mut().reads.clear();
        s.delay.waits_ms.clear();
        s
    }

    // ── Initialisation ───────────────────────────────────────────────

    #[test]
    fn initialize_writes_table_in_declared_order() {
        let mut s = sensor(MockI2c::new());
        block_on(s.initialize()).unwrap();
        assert!(s.is_initialized());

        let (i2c, _) = s.release();
        let mut expected = vec![(BANK_SELECT, BANK_0)];
        expected.extend_from_slice(&INIT_REGISTERS);
        expected.push((BANK_SELECT, BANK_0));
        assert_eq!(i2c.writes, expected);
        assert_eq!(i2c.writes.len(), INIT_REGISTER_COUNT + 2);
        assert_eq!(i2c.bank, BANK_0);
    }

    #[test]
    fn initialize_reads_low_then_high_part_id() {
        let mut s = sensor(MockI2c::new());
        block_on(s.initialize()).unwrap();
        let (i2c, _) = s.release();
        assert_eq!(i2c.reads, vec![PART_ID_LOW, PART_ID_HIGH]);
    }

    #[test]
    fn initialize_waits_settle_delays() {
        let mut s = sensor(MockI2c::new());
        block_on(s.initialize()).unwrap();
        let (_, delay) = s.release();
        assert_eq!(delay.waits_ms, vec![100, 10, 100]);
    }

    #[test]
    fn wrong_identity_writes_no_configuration() {
        let mut s = sensor(MockI2c::with_part_id(0x7621));
        let result = block_on(s.initialize());

        assert_eq!(result, Err(GestureError::IdentityMismatch { found: 0x7621 }));
        assert!(!s.is_initialized());
        let (i2c, _) = s.release();
        // Only the bank select that precedes the identity read.
        assert_eq!(i2c.writes, vec![(BANK_SELECT, BANK_0)]);
        assert_eq!(i2c.config_writes(), 0);
    }

    #[test]
    fn failed_reinitialise_clears_initialized() {
        let mut s = sensor(MockI2c::new());
        block_on(s.initialize()).unwrap();
        s.driver.i2c_mut().part_id = 0x0000;

        assert!(block_on(s.initialize()).is_err());
        assert!(!s.is_initialized());
    }

    #[test]
    fn bus_error_during_initialize_leaves_uninitialised() {
        let mut i2c = MockI2c::new();
        i2c.fail_on = Some(0x32);
        let mut s = sensor(i2c);

        assert!(matches!(block_on(s.initialize()), Err(GestureError::I2c(_))));
        assert!(!s.is_initialized());
    }

    #[test]
    fn initialize_is_idempotent() {
        let mut s = sensor(MockI2c::new());
        block_on(s.initialize()).unwrap();
        block_on(s.initialize()).unwrap();
        assert!(s.is_initialized());
        let (i2c, _) = s.release();
        assert_eq!(i2c.writes.len(), 2 * (INIT_REGISTER_COUNT + 2));
    }

    // ── Sampling ─────────────────────────────────────────────────────

    #[test]
    fn uninitialised_sample_is_none_without_bus_traffic() {
        let mut s = sensor(MockI2c::new().script_flag0(&[0x01]));
        assert_eq!(block_on(s.gesture()), Gesture::None);
        let (i2c, delay) = s.release();
        assert!(i2c.reads.is_empty());
        assert!(i2c.writes.is_empty());
        assert!(delay.waits_ms.is_empty());
    }

    #[test]
    fn wave_skips_flag0_and_waits_one_second() {
        let mut s = ready(MockI2c::new().script_flag1(&[0x01]).script_flag0(&[0x02]));
        assert_eq!(block_on(s.gesture()), Gesture::Wave);
        let (i2c, delay) = s.release();
        assert_eq!(i2c.reads, vec![GES_PS_DET_FLAG_1]);
        assert_eq!(delay.waits_ms, vec![1000]);
    }

    #[test]
    fn directional_gesture_waits_short_settle() {
        let mut s = ready(MockI2c::new().script_flag0(&[Gesture::Right.bits() as u8]));
        assert_eq!(block_on(s.gesture()), Gesture::Right);
        let (i2c, delay) = s.release();
        assert_eq!(i2c.reads, vec![GES_PS_DET_FLAG_1, GES_PS_DET_FLAG_0]);
        assert_eq!(delay.waits_ms, vec![100]);
    }

    #[test]
    fn forward_and_backward_wait_extra_settle() {
        for g in [Gesture::Forward, Gesture::Backward] {
            let mut s = ready(MockI2c::new().script_flag0(&[g.bits() as u8]));
            assert_eq!(block_on(s.gesture()), g);
            let (_, delay) = s.release();
            assert_eq!(delay.waits_ms, vec![100, 200]);
        }
    }

    #[test]
    fn no_detection_does_not_wait() {
        let mut s = ready(MockI2c::new());
        assert_eq!(block_on(s.gesture()), Gesture::None);
        let (_, delay) = s.release();
        assert!(delay.waits_ms.is_empty());
    }

    #[test]
    fn every_single_flag0_bit_decodes() {
        for g in &Gesture::ALL[1..9] {
            let mut s = ready(MockI2c::new().script_flag0(&[g.bits() as u8]));
            assert_eq!(block_on(s.gesture()), *g);
        }
    }

    #[test]
    fn combined_flag0_bits_yield_none_without_settle() {
        let mut s = ready(MockI2c::new().script_flag0(&[0x05]));
        assert_eq!(block_on(s.gesture()), Gesture::None);
        let (_, delay) = s.release();
        assert!(delay.waits_ms.is_empty());
    }

    #[test]
    fn custom_timing_is_used() {
        let timing = Timing {
            gesture_settle_ms: 5,
            depth_settle_ms: 7,
            ..Timing::default()
        };
        let mut s = ready(MockI2c::new().script_flag0(&[Gesture::Forward.bits() as u8]))
            .with_timing(timing);
        assert_eq!(s.timing(), &timing);
        block_on(s.gesture());
        let (_, delay) = s.release();
        assert_eq!(delay.waits_ms, vec![5, 7]);
    }

    #[test]
    fn bus_error_reads_as_none() {
        let mut s = ready(MockI2c::new().script_flag0(&[0x01]));
        s.driver.i2c_mut().fail_on = Some(GES_PS_DET_FLAG_1);

        assert!(matches!(block_on(s.read_gesture()), Err(GestureError::I2c(_))));
        assert_eq!(block_on(s.gesture()), Gesture::None);
    }
}
