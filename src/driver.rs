//! Low-level PAJ7620 register driver.
//!
//! Implements single-byte register access and bank selection on top of any
//! `embedded-hal-async` I2C bus.
//!
//! This module is crate-private. Consumers interact with [`Paj7620`] in
//! `sensor.rs` instead.
//!
//! [`Paj7620`]: crate::Paj7620

use embedded_hal_async::i2c::I2c;

use crate::error::GestureError;
use crate::registers::BANK_SELECT;

/// Low-level register driver.
///
/// Owns an I2C peripheral and the device address.
pub(crate) struct RegisterDriver<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C> RegisterDriver<I2C>
where
    I2C: I2c,
{
    /// Create a new register driver.
    ///
    /// # Arguments
    /// * `i2c`: I2C peripheral (takes ownership for exclusive access)
    /// * `address`: 7-bit I2C device address (always 0x73 for the PAJ7620)
    pub fn new(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    /// Give back the I2C peripheral.
    pub fn release(self) -> I2C {
        self.i2c
    }

    #[cfg(test)]
    pub fn i2c_mut(&mut self) -> &mut I2C {
        &mut self.i2c
    }

    // ── Core protocol primitives ─────────────────────────────────────

    /// Read one byte from `register` in the currently selected bank.
    ///
    /// The register address is written and the value read back in a single
    /// `write_read` transaction.
    pub async fn read_u8(&mut self, register: u8) -> Result<u8, GestureError<I2C::Error>> {
        let mut buf = [0u8; 1];
        self.i2c.write_read(self.address, &[register], &mut buf).await?;
        Ok(buf[0])
    }

    /// Write one byte to `register` in the currently selected bank.
    pub async fn write_u8(
        &mut self,
        register: u8,
        value: u8,
    ) -> Result<(), GestureError<I2C::Error>> {
        self.i2c.write(self.address, &[register, value]).await?;
        Ok(())
    }

    // ── Typed helpers ────────────────────────────────────────────────

    /// Switch the register bank later accesses address.
    pub async fn select_bank(&mut self, bank: u8) -> Result<(), GestureError<I2C::Error>> {
        self.write_u8(BANK_SELECT, bank).await
    }

    /// Read a 16-bit value split across two byte registers.
    ///
    /// The low byte is read first, then the high byte; the result is
    /// `high << 8 | low`.
    pub async fn read_u16_split(
        &mut self,
        low: u8,
        high: u8,
    ) -> Result<u16, GestureError<I2C::Error>> {
        let lo = self.read_u8(low).await?;
        let hi = self.read_u8(high).await?;
        Ok(u16::from_le_bytes([lo, hi]))
    }
}
