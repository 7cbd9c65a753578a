//! Clock configuration
//!
//! `CLOCK_CONFIG` is generated by the build script from clock.toml, which is
//! parsed and validated on the host so a bad file fails the build.

use chessclock_core::ClockConfig;

include!(concat!(env!("OUT_DIR"), "/clock_config.rs"));
