//! Clock task
//!
//! Drives the cooperative scheduler. Each pass runs to completion; a pass
//! that fetches and forwards an image blocks this task for the length of
//! the transfer.

use defmt::*;
use embassy_rp::gpio::Input;
use embassy_rp::i2c::{self, I2c};
use embassy_rp::peripherals::I2C0;
use embassy_rp::uart::{BufferedUart, BufferedUartTx};
use embassy_time::{Delay, Timer};

use chessclock_core::Scheduler;
use chessclock_drivers::display::Hd44780;
use chessclock_hal::Monotonic;
use chessclock_hal_rp2040::{BleBridge, EmbassyClock};

/// Pause between scheduler passes
const LOOP_PERIOD_MS: u64 = 1;

/// The scheduler wired to this board's peripherals
pub type HostScheduler = Scheduler<
    'static,
    Input<'static>,
    BufferedUart,
    BleBridge<BufferedUartTx>,
    Hd44780<I2c<'static, I2C0, i2c::Blocking>, Delay>,
>;

#[embassy_executor::task]
pub async fn clock_task(mut scheduler: HostScheduler) {
    info!("Clock task started");

    let clock = EmbassyClock;
    let mut delay = Delay;
    scheduler.start(clock.now_ms());

    loop {
        let report = scheduler.run_once(&clock, &mut delay);
        for kind in report.transitions.iter() {
            debug!("Clock transition: {:?}", kind);
        }
        if let Some(change) = report.connection {
            debug!("Connection change: {:?}", change);
        }

        Timer::after_millis(LOOP_PERIOD_MS).await;
    }
}
