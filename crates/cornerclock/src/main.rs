#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "cornerclock",
    version,
    about = "A date and time clock in the corner of every monitor"
)]
struct Cli {}

fn main() {
    let _cli = Cli::parse();
    std::process::exit(run());
}

#[cfg(windows)]
fn run() -> i32 {
    match cornerclock_windows::run() {
        Ok(()) => 0,
        Err(e) => {
            cornerclock_core::log_error!("Fatal: {e}");
            eprintln!("cornerclock: {e}");
            1
        }
    }
}

#[cfg(not(windows))]
fn run() -> i32 {
    eprintln!("cornerclock: the overlay is only available on Windows");
    1
}
