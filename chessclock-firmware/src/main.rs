//! Chess clock host controller firmware
//!
//! Main firmware binary for the RP2040-based chess clock. Runs the game
//! clock and the LCD, pulls a board image from the camera peripheral on
//! every move and forwards status and images to the companion app over a
//! BLE UART bridge.

#![no_std]
#![no_main]

extern crate alloc;

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Pull};
use embassy_rp::i2c::{self, I2c};
use embassy_rp::peripherals::{UART0, UART1};
use embassy_rp::uart::{BufferedInterruptHandler, Uart};
use embassy_time::Delay;
use embedded_alloc::LlffHeap as Heap;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use chessclock_core::{Devices, Scheduler};
use chessclock_drivers::display::{Hd44780, DEFAULT_ADDRESS};
use chessclock_hal::{Monotonic, UartConfig};
use chessclock_hal_rp2040::uart::embassy_config;
use chessclock_hal_rp2040::{BleBridge, EmbassyClock};

use crate::channels::CONNECTION;
use crate::config::CLOCK_CONFIG;

mod channels;
mod config;
mod image;
mod tasks;

// Heap allocator for the image buffer
#[global_allocator]
static HEAP: Heap = Heap::empty();

// Heap size: 48KB, enough for the default 30KB image buffer
const HEAP_SIZE: usize = 48 * 1024;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
    UART1_IRQ => BufferedInterruptHandler<UART1>;
});

// Static cells for UART buffers (must live forever)
// The camera RX buffer absorbs image bytes between polls
static CAMERA_TX_BUF: StaticCell<[u8; 64]> = StaticCell::new();
static CAMERA_RX_BUF: StaticCell<[u8; 2048]> = StaticCell::new();
static BLE_TX_BUF: StaticCell<[u8; 256]> = StaticCell::new();
static BLE_RX_BUF: StaticCell<[u8; 64]> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Chess clock firmware starting...");

    init_heap();

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = CLOCK_CONFIG;
    info!("Configuration: {}", config);
    let link = UartConfig::default();

    let worst_case_ms = link.transfer_time_ms(config.image_buffer_size as u32);
    if worst_case_ms >= config.retrieval_timeout_ms {
        warn!(
            "A full {} byte frame needs {} ms at {} baud, longer than the {} ms timeout",
            config.image_buffer_size, worst_case_ms, link.baudrate, config.retrieval_timeout_ms
        );
    }

    // Camera link (UART0: GPIO0 TX, GPIO1 RX)
    let camera = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, embassy_config(&link)).into_buffered(
        Irqs,
        CAMERA_TX_BUF.init([0u8; 64]),
        CAMERA_RX_BUF.init([0u8; 2048]),
    );
    info!("Camera link initialized");

    // BLE bridge (UART1: GPIO8 TX, GPIO9 RX, STATE on GPIO10)
    let ble = Uart::new_blocking(p.UART1, p.PIN_8, p.PIN_9, embassy_config(&link)).into_buffered(
        Irqs,
        BLE_TX_BUF.init([0u8; 256]),
        BLE_RX_BUF.init([0u8; 64]),
    );
    let (ble_tx, ble_rx) = ble.split();
    let ble_state = Input::new(p.PIN_10, Pull::Down);
    info!("BLE bridge initialized");

    // LCD (I2C0: GPIO17 SCL, GPIO16 SDA)
    let i2c = I2c::new_blocking(p.I2C0, p.PIN_17, p.PIN_16, i2c::Config::default());
    let mut lcd = Hd44780::new(i2c, Delay, DEFAULT_ADDRESS);
    if let Err(e) = lcd.init() {
        error!("Failed to initialize LCD: {:?}", e);
    }

    // Buttons are active low: reset, player 1, player 2
    let buttons = [
        Input::new(p.PIN_2, Pull::Up),
        Input::new(p.PIN_3, Pull::Up),
        Input::new(p.PIN_4, Pull::Up),
    ];

    let image_buffer = image::allocate(config.image_buffer_size);

    let scheduler = Scheduler::new(
        config,
        Devices {
            buttons,
            camera,
            radio: BleBridge::new(ble_tx, &CONNECTION),
            display: lcd,
        },
        image_buffer,
        EmbassyClock.now_ms(),
    );

    spawner.spawn(tasks::link_state_task(ble_state)).unwrap();
    spawner.spawn(tasks::ble_rx_task(ble_rx)).unwrap();
    spawner.spawn(tasks::clock_task(scheduler)).unwrap();

    info!("All tasks spawned");
}

/// Initialize the heap allocator
fn init_heap() {
    use core::mem::MaybeUninit;
    static mut HEAP_MEM: [MaybeUninit<u8>; HEAP_SIZE] = [MaybeUninit::uninit(); HEAP_SIZE];
    #[allow(static_mut_refs)]
    unsafe {
        HEAP.init(HEAP_MEM.as_ptr() as usize, HEAP_SIZE)
    }
}
