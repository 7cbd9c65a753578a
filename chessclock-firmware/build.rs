//! Build script for chessclock-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Parses and validates clock.toml, baking it in as `CLOCK_CONFIG`

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use chessclock_core::ClockConfig;

fn main() {
    setup_linker();
    generate_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());
    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    if env::var_os("CARGO_FEATURE_DEFMT").is_some() {
        println!("cargo:rustc-link-arg-bins=-Tdefmt.x");
    }

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Parse clock.toml and write `clock_config.rs` into OUT_DIR
fn generate_config() {
    println!("cargo:rerun-if-changed=clock.toml");

    let config_path = Path::new("clock.toml");
    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: clock.toml not found!                                    ║\n\
            ║                                                                  ║\n\
            ║  The firmware requires a clock.toml configuration file.          ║\n\
            ║  Please create one in the chessclock-firmware directory.         ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read clock.toml                                ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    let config: ClockConfig = match toml::from_str(&content) {
        Ok(config) => config,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid clock.toml                                       ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                {}\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&e.to_string())
            );
        }
    };

    if let Err(e) = config.validate() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid clock configuration                              ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            format_error_lines(e.as_str())
        );
    }

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    fs::write(out_dir.join("clock_config.rs"), render_config(&config)).unwrap();

    println!("cargo:warning=clock.toml validated successfully");
}

/// Rust source for the baked-in configuration
fn render_config(config: &ClockConfig) -> String {
    format!(
        "pub const CLOCK_CONFIG: ClockConfig = ClockConfig {{\n\
        \x20   initial_time_ms: {},\n\
        \x20   debounce_ms: {},\n\
        \x20   retrieval_timeout_ms: {},\n\
        \x20   retrieval_poll_us: {},\n\
        \x20   image_buffer_size: {},\n\
        \x20   chunk_delay_ms: {},\n\
        \x20   marker_delay_ms: {},\n\
        \x20   display_refresh_ms: {},\n\
        \x20   readvertise_delay_ms: {},\n\
        }};\n",
        config.initial_time_ms,
        config.debounce_ms,
        config.retrieval_timeout_ms,
        config.retrieval_poll_us,
        config.image_buffer_size,
        config.chunk_delay_ms,
        config.marker_delay_ms,
        config.display_refresh_ms,
        config.readvertise_delay_ms,
    )
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            // Cut on a char boundary; TOML errors quote the offending input
            let truncated = match line.char_indices().nth(61) {
                Some((end, _)) if line.chars().count() > 64 => format!("{}...", &line[..end]),
                _ => line.to_string(),
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
