//! User management screen: header, toolbar, table and dialogs.
//!
//! Widgets only read states/computes and call the flow helpers of
//! `accounts_business::users`; no network IO happens here.

mod dialogs;
mod panel;
mod table;

pub use panel::users_panel;
