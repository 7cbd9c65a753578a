//! Embassy async tasks

pub mod ble_rx;
pub mod clock;
pub mod link_state;

pub use ble_rx::ble_rx_task;
pub use clock::clock_task;
pub use link_state::link_state_task;
