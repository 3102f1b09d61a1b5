//! gesture-monitor
//!
//! PAJ7620 gesture sensor demo firmware for the Raspberry Pi Pico 2.
//!
//! 1. The sensor is initialised once at boot over I2C0.
//! 2. The gesture task registers an observer and runs the watcher loop.
//! 3. Every gesture transition is logged by name over defmt-rtt.
//!
//! If the sensor is missing at boot the watcher idles, re-checking once a
//! second; reset the board after connecting it.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::block::ImageDef;
use embassy_rp::i2c::{self, I2c};
use embassy_rp::peripherals::I2C0;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::mutex::Mutex;
use embassy_time::Delay;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use paj7620_driver::{gesture_name, is_gesture, Gesture, GestureWatcher, Paj7620, DEFAULT_ADDRESS};

// ---------------------------------------------------------------------------
// Boot block and interrupt binding
// ---------------------------------------------------------------------------

/// Tell the RP2350 Boot ROM about our application.
#[link_section = ".start_block"]
#[used]
pub static IMAGE_DEF: ImageDef = embassy_rp::block::ImageDef::secure_exe();

// Wire the I2C0 peripheral interrupt to Embassy's async handler.
bind_interrupts!(struct Irqs {
    I2C0_IRQ => i2c::InterruptHandler<I2C0>;
});

// ---------------------------------------------------------------------------
// Static storage
// ---------------------------------------------------------------------------

/// Concrete sensor type on I2C0.
type Sensor = Paj7620<I2c<'static, I2C0, i2c::Async>, Delay>;

/// Shared sensor, initialised by `main`, sampled by the gesture task.
static SENSOR: StaticCell<Mutex<CriticalSectionRawMutex, Sensor>> = StaticCell::new();

// ---------------------------------------------------------------------------
// Observers
// ---------------------------------------------------------------------------

fn log_gesture(gesture: Gesture) {
    info!("Gesture: {}", gesture_name(gesture.bits()));
}

fn log_direction(gesture: Gesture) {
    if is_gesture(gesture.bits(), Gesture::Right) {
        debug!("Swiped right");
    } else if is_gesture(gesture.bits(), Gesture::Left) {
        debug!("Swiped left");
    }
}

// ---------------------------------------------------------------------------
// Tasks
// ---------------------------------------------------------------------------

/// Thin wrapper that monomorphises the generic watcher loop so it can be
/// spawned as a concrete Embassy task.
#[embassy_executor::task]
async fn gesture_task(sensor: &'static Mutex<CriticalSectionRawMutex, Sensor>) {
    let watcher: GestureWatcher<'static, CriticalSectionRawMutex, _, _> =
        GestureWatcher::new(sensor);

    if let Err(e) = watcher.on_gesture_changed(&log_gesture) {
        error!("Observer registration failed: {}", e);
    }
    if let Err(e) = watcher.on_gesture_changed(&log_direction) {
        error!("Observer registration failed: {}", e);
    }

    info!("Gesture watcher task started");
    if let Err(e) = watcher.run(Delay).await {
        error!("Gesture watcher exited: {}", e);
    }
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_rp::init(Default::default());
    info!("gesture-monitor starting");

    // ── Pin assignments ────────────────────────────────────────────────────
    // I2C_SDA → GP20  (p.PIN_20)
    // I2C_SCL → GP21  (p.PIN_21)
    // ───────────────────────────────────────────────────────────────────────

    let i2c = I2c::new_async(
        p.I2C0,
        p.PIN_21, // SCL
        p.PIN_20, // SDA
        Irqs,
        i2c::Config::default(),
    );

    let sensor = SENSOR.init(Mutex::new(Paj7620::new_embassy(i2c, DEFAULT_ADDRESS)));

    // A missing sensor is not fatal: the watcher idles until initialised.
    match sensor.lock().await.initialize().await {
        Ok(()) => info!("PAJ7620 ready"),
        Err(e) => error!("PAJ7620 initialisation failed: {}", e),
    }

    spawner.spawn(gesture_task(sensor)).unwrap();

    info!("All tasks spawned");
}
