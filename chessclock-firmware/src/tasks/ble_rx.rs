//! BLE bridge receive task
//!
//! The companion app never writes anything the clock acts on; this only
//! drains the module's replies so the UART never overruns.

use defmt::*;
use embassy_rp::uart::BufferedUartRx;
use embassy_time::Timer;
use embedded_io_async::Read;

#[embassy_executor::task]
pub async fn ble_rx_task(mut rx: BufferedUartRx) {
    info!("BLE RX task started");

    let mut buf = [0u8; 32];

    loop {
        match rx.read(&mut buf).await {
            Ok(n) => debug!("BLE module: {=[u8]:a}", &buf[..n]),
            Err(e) => {
                warn!("BLE UART read error: {:?}", e);
                Timer::after_millis(10).await;
            }
        }
    }
}
