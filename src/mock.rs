//! Scripted bus and delay doubles for host tests.

use std::collections::VecDeque;

use embassy_sync::blocking_mutex::raw::NoopRawMutex;
use embassy_sync::signal::Signal;
use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::i2c::{self, ErrorKind, ErrorType, I2c, Operation, SevenBitAddress};

use crate::registers::{
    BANK_SELECT, GES_PS_DET_FLAG_0, GES_PS_DET_FLAG_1, PART_ID, PART_ID_HIGH, PART_ID_LOW,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockError;

impl i2c::Error for MockError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

/// Simulated PAJ7620.
///
/// Records every register write and read. Flag registers answer from
/// scripted queues and read `0x00` once a queue is empty. When `done` is set
/// and the flag0 script runs dry, the signal fires so a watcher under test
/// can stop.
pub struct MockI2c<'a> {
    pub part_id: u16,
    pub bank: u8,
    pub writes: Vec<(u8, u8)>,
    pub reads: Vec<u8>,
    pub flag0: VecDeque<u8>,
    pub flag1: VecDeque<u8>,
    /// Fail every transaction touching this register.
    pub fail_on: Option<u8>,
    /// Per flag1 read: `true` fails that read.
    pub flag1_faults: VecDeque<bool>,
    pub done: Option<&'a Signal<NoopRawMutex, ()>>,
    pointer: u8,
}

impl<'a> MockI2c<'a> {
    pub fn new() -> Self {
        Self::with_part_id(PART_ID)
    }

    pub fn with_part_id(part_id: u16) -> Self {
        Self {
            part_id,
            bank: 0,
            writes: Vec::new(),
            reads: Vec::new(),
            flag0: VecDeque::new(),
            flag1: VecDeque::new(),
            fail_on: None,
            flag1_faults: VecDeque::new(),
            done: None,
            pointer: 0,
        }
    }

    /// Queue flag0 values, one per sample; flag1 stays clear.
    pub fn script_flag0(mut self, values: &[u8]) -> Self {
        self.flag0.extend(values.iter().copied());
        self
    }

    pub fn script_flag1(mut self, values: &[u8]) -> Self {
        self.flag1.extend(values.iter().copied());
        self
    }

    pub fn fault_flag1(mut self, faults: &[bool]) -> Self {
        self.flag1_faults.extend(faults.iter().copied());
        self
    }

    pub fn signal_when_drained(mut self, done: &'a Signal<NoopRawMutex, ()>) -> Self {
        self.done = Some(done);
        self
    }

    /// Number of reads of `register`.
    pub fn read_count(&self, register: u8) -> usize {
        self.reads.iter().filter(|&&r| r == register).count()
    }

    /// Writes excluding the bank select register.
    pub fn config_writes(&self) -> usize {
        self.writes.iter().filter(|(r, _)| *r != BANK_SELECT).count()
    }

    fn read_register(&mut self, register: u8) -> u8 {
        self.reads.push(register);
        if self.bank != 0 {
            return 0;
        }
        match register {
            PART_ID_LOW => self.part_id.to_le_bytes()[0],
            PART_ID_HIGH => self.part_id.to_le_bytes()[1],
            GES_PS_DET_FLAG_1 => self.flag1.pop_front().unwrap_or(0),
            GES_PS_DET_FLAG_0 => {
                let value = self.flag0.pop_front().unwrap_or(0);
                if self.flag0.is_empty() {
                    if let Some(done) = self.done {
                        done.signal(());
                    }
                }
                value
            }
            _ => 0,
        }
    }
}

impl ErrorType for MockI2c<'_> {
    type Error = MockError;
}

impl I2c<SevenBitAddress> for MockI2c<'_> {
    async fn transaction(
        &mut self,
        address: SevenBitAddress,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        assert_eq!(address, crate::DEFAULT_ADDRESS);
        for op in operations {
            match op {
                Operation::Write(bytes) => {
                    if Some(bytes[0]) == self.fail_on {
                        return Err(MockError);
                    }
                    match &bytes[..] {
                        [register] => {
                            if *register == GES_PS_DET_FLAG_1
                                && self.flag1_faults.pop_front().unwrap_or(false)
                            {
                                return Err(MockError);
                            }
                            self.pointer = *register;
                        }
                        [register, value] => {
                            self.writes.push((*register, *value));
                            if *register == BANK_SELECT {
                                self.bank = *value;
                            }
                        }
                        _ => panic!("unexpected {}-byte write", bytes.len()),
                    }
                }
                Operation::Read(buf) => {
                    for byte in buf.iter_mut() {
                        *byte = self.read_register(self.pointer);
                    }
                }
            }
        }
        Ok(())
    }
}

/// Delay that returns immediately and records the requested milliseconds.
#[derive(Default)]
pub struct MockDelay {
    pub waits_ms: Vec<u32>,
}

impl DelayNs for MockDelay {
    async fn delay_ns(&mut self, ns: u32) {
        self.waits_ms.push(ns / 1_000_000);
    }

    async fn delay_ms(&mut self, ms: u32) {
        self.waits_ms.push(ms);
    }
}
