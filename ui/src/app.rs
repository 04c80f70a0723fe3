use accounts_business::users;

use crate::{state::State, widgets};

/// eframe storage key of the session token.
pub const TOKEN_STORAGE_KEY: &str = "token";

pub struct AccountsApp {
    state: State,
    waker_installed: bool,
}

impl AccountsApp {
    /// Called once before the first frame.
    pub fn new(state: State) -> Self {
        Self {
            state,
            waker_installed: false,
        }
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut State {
        &mut self.state
    }
}

impl eframe::App for AccountsApp {
    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if !self.waker_installed {
            let egui_ctx = ctx.clone();
            self.state.ctx.set_waker(move || egui_ctx.request_repaint());
            self.waker_installed = true;
        }

        // Apply command results before rendering
        self.state.ctx.sync_computes();
        self.state.ctx.run_computed();

        users::load_users_once(&mut self.state.ctx);

        egui::CentralPanel::default().show(ctx, |ui| {
            widgets::users_panel(&mut self.state.ctx, ui);
        });

        self.state.ctx.run_computed();
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        if let Some(token) = self.state.token() {
            storage.set_string(TOKEN_STORAGE_KEY, token.to_owned());
        }
    }
}
