#![warn(clippy::all, rust_2018_idioms)]
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use accounts_ui::app::TOKEN_STORAGE_KEY;
use accounts_ui::state::State;

mod alloc {
    #[global_allocator]
    static MALLOC: mimalloc::MiMalloc = mimalloc::MiMalloc;
}

fn main() -> anyhow::Result<()> {
    // Log to stderr (if you run with `RUST_LOG=debug`).
    env_logger::Builder::from_env(env_logger::Env::default()).init();

    // Commands are spawned on this runtime from the UI thread.
    let runtime = tokio::runtime::Runtime::new()?;
    let _guard = runtime.enter();

    let mut state = State::from_env()?;

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1024.0, 720.0])
            .with_min_inner_size([640.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Accounts",
        native_options,
        Box::new(move |cc| {
            if let Some(token) = cc
                .storage
                .and_then(|storage| storage.get_string(TOKEN_STORAGE_KEY))
                .filter(|token| !token.is_empty())
            {
                log::info!("Using session token from storage");
                state.sign_in(token);
            }
            if state.token().is_none() {
                log::warn!("No session token available, the user list will stay empty");
            }
            Ok(Box::new(accounts_ui::AccountsApp::new(state)))
        }),
    )
    .map_err(|e| anyhow::anyhow!("eframe failed: {e}"))
}
