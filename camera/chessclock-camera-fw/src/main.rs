//! Chess clock camera firmware
//!
//! Firmware for the camera peripheral (RP2040 + ArduChip camera module).
//! Waits for `SNAP` from the host controller over UART and answers with a
//! JPEG frame or an error line.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Level, Output};
use embassy_rp::peripherals::{SPI0, UART0};
use embassy_rp::spi::{self, Spi};
use embassy_rp::uart::{BufferedInterruptHandler, BufferedUart, Uart};
use embassy_time::{Delay, Timer};
use embedded_hal_bus::spi::ExclusiveDevice;
use static_cell::{ConstStaticCell, StaticCell};
use {defmt_rtt as _, panic_probe as _};

use chessclock_core::camera::{ImageCaptureServer, ServeOutcome};
use chessclock_drivers::camera::{Arducam, ArducamConfig};
use chessclock_hal::UartConfig;
use chessclock_hal_rp2040::uart::embassy_config;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

/// Largest frame this peripheral will send, matching the host's buffer
const FRAME_CAPACITY: usize = 30 * 1024;

/// Pause between polls while no command is pending
const IDLE_POLL_MS: u64 = 1;

/// Probe attempts before serving anyway; failed captures are reported to the host
const PROBE_ATTEMPTS: u32 = 5;

static FRAME: ConstStaticCell<[u8; FRAME_CAPACITY]> = ConstStaticCell::new([0; FRAME_CAPACITY]);
static TX_BUF: StaticCell<[u8; 1024]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 64]> = StaticCell::new();

type Camera = Arducam<ExclusiveDevice<Spi<'static, SPI0, spi::Blocking>, Output<'static>, Delay>, Delay>;

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Chess clock camera firmware starting...");

    let p = embassy_rp::init(Default::default());

    // ArduChip on SPI0 (GPIO18 SCK, GPIO19 MOSI, GPIO16 MISO, GPIO17 CS)
    let mut spi_config = spi::Config::default();
    spi_config.frequency = 8_000_000;
    let spi = Spi::new_blocking(p.SPI0, p.PIN_18, p.PIN_19, p.PIN_16, spi_config);
    let cs = Output::new(p.PIN_17, Level::High);
    let Ok(spi_device) = ExclusiveDevice::new(spi, cs, Delay);
    let mut camera = Arducam::new(spi_device, Delay, ArducamConfig::default());

    for attempt in 1..=PROBE_ATTEMPTS {
        match camera.probe() {
            Ok(()) => {
                info!("Camera found");
                break;
            }
            Err(e) => {
                warn!("Camera probe {} failed: {:?}", attempt, e);
                Timer::after_millis(100).await;
            }
        }
    }

    // Host link (UART0: GPIO0 TX, GPIO1 RX)
    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, embassy_config(&UartConfig::default()));
    let uart = uart.into_buffered(Irqs, TX_BUF.init([0u8; 1024]), RX_BUF.init([0u8; 64]));

    spawner.spawn(capture_task(uart, camera, FRAME.take())).unwrap();

    info!("All tasks spawned");
}

/// Serve `SNAP` requests forever
#[embassy_executor::task]
async fn capture_task(uart: BufferedUart, camera: Camera, frame: &'static mut [u8; FRAME_CAPACITY]) {
    info!("Capture task started");

    let mut server = ImageCaptureServer::new(uart, camera, frame);

    loop {
        match server.poll() {
            Ok(ServeOutcome::Idle) => Timer::after_millis(IDLE_POLL_MS).await,
            Ok(ServeOutcome::Served(size)) => info!("Sent {} byte frame", size),
            Ok(ServeOutcome::CaptureFailed(e)) => warn!("Capture failed: {:?}", e),
            Err(e) => {
                warn!("Host link error: {:?}", e);
                Timer::after_millis(10).await;
            }
        }
    }
}
