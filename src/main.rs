#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

// The binary uses the library, not duplicate modules
fn main() {
    std::process::exit(battle_map::entrypoints::native_main());
}
