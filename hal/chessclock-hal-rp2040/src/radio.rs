//! BLE UART bridge
//!
//! The radio is an HM-10 style module: everything written to its UART is
//! forwarded as a notification on its single characteristic, and its STATE
//! pin is high while a central is connected. The module must be configured
//! with `AT+PIO11` so STATE is steady instead of blinking while advertising.

use chessclock_core::connection::ConnectionFlags;
use chessclock_hal::{Advertiser, ConnectionEvents, NotifyChannel};
use embassy_rp::gpio::Input;
use embedded_io::Write;

#[cfg(feature = "defmt")]
use defmt::info;

/// Command that wakes the module and makes it resume advertising
const ADVERTISE_COMMAND: &[u8] = b"AT";

/// Notification channel over the bridge's UART
pub struct BleBridge<W> {
    tx: W,
    flags: &'static ConnectionFlags,
}

impl<W: Write> BleBridge<W> {
    /// Create a bridge writing to `tx`; `flags` is updated by [`watch_link_state`]
    pub fn new(tx: W, flags: &'static ConnectionFlags) -> Self {
        Self { tx, flags }
    }
}

impl<W: Write> NotifyChannel for BleBridge<W> {
    type Error = W::Error;

    fn is_connected(&self) -> bool {
        self.flags.is_connected()
    }

    fn notify(&mut self, payload: &[u8]) -> Result<(), Self::Error> {
        self.tx.write_all(payload)?;
        self.tx.flush()
    }
}

impl<W: Write> Advertiser for BleBridge<W> {
    type Error = W::Error;

    fn restart_advertising(&mut self) -> Result<(), Self::Error> {
        // Only accepted by the module while nothing is connected
        if self.flags.is_connected() {
            return Ok(());
        }
        self.tx.write_all(ADVERTISE_COMMAND)?;
        self.tx.flush()
    }
}

/// Follow the STATE pin forever and report connects and disconnects
pub async fn watch_link_state<E: ConnectionEvents>(state: &mut Input<'_>, events: &E) -> ! {
    let mut connected = state.is_high();
    report(events, connected);

    loop {
        state.wait_for_any_edge().await;
        let level = state.is_high();
        if level != connected {
            connected = level;
            report(events, connected);
        }
    }
}

fn report<E: ConnectionEvents>(events: &E, connected: bool) {
    if connected {
        #[cfg(feature = "defmt")]
        info!("BLE central connected");
        events.on_connect();
    } else {
        #[cfg(feature = "defmt")]
        info!("BLE central disconnected");
        events.on_disconnect();
    }
}
