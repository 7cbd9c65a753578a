//! BLE link state task
//!
//! Follows the bridge module's STATE pin and records connects and
//! disconnects for the clock task to reconcile.

use defmt::*;
use embassy_rp::gpio::Input;

use chessclock_hal_rp2040::watch_link_state;

use crate::channels::CONNECTION;

#[embassy_executor::task]
pub async fn link_state_task(mut state: Input<'static>) {
    info!("Link state task started");
    watch_link_state(&mut state, &CONNECTION).await
}
