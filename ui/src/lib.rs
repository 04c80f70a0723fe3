#![warn(clippy::all, rust_2018_idioms)]
//! Desktop front end of the accounts admin panel.

pub mod app;
pub mod state;
pub mod utils;
pub mod widgets;

pub use app::AccountsApp;
