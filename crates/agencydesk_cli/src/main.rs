//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `agencydesk_core` linkage without the Flutter runtime.
//! - Print the demo client pipeline with deterministic layout.

use agencydesk_core::{AppShell, NavParams, View, Workspace};

fn main() {
    println!("agencydesk_core ping={}", agencydesk_core::ping());
    println!("agencydesk_core version={}", agencydesk_core::core_version());

    let mut shell = AppShell::new(Workspace::with_demo_data());
    shell.navigate(View::Clients, NavParams::default());

    let board = shell.client_board();
    for column in &board.columns {
        println!("[{}] {}", column.key.as_str(), column.title);
        for client in &column.items {
            println!("  - {} ({})", client.company, client.name);
        }
    }
    if !board.unplaced.is_empty() {
        println!("unplaced={}", board.unplaced.len());
    }
}
