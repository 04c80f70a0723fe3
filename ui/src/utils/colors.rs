//! Shared color constants for the UI.

use accounts_business::AccountType;
use egui::Color32;

/// Red color for errors.
pub const COLOR_RED: Color32 = Color32::from_rgb(220, 53, 69);

/// Muted gray for secondary text.
pub const COLOR_MUTED: Color32 = Color32::from_rgb(120, 120, 120);

/// Border color for Typora-like table style (subtle gray)
pub const TABLE_BORDER_COLOR: Color32 = Color32::from_rgb(200, 200, 200);

/// Header background color for Typora-like table style (light gray)
pub const HEADER_BG_COLOR: Color32 = Color32::from_rgb(245, 245, 245);

/// Background and text color of a role tag.
pub fn role_colors(account_type: AccountType) -> (Color32, Color32) {
    match account_type {
        AccountType::Admin => (Color32::from_rgb(219, 234, 254), Color32::from_rgb(30, 64, 175)),
        AccountType::Graphics => (Color32::from_rgb(220, 252, 231), Color32::from_rgb(22, 101, 52)),
        AccountType::Display => (Color32::from_rgb(243, 232, 255), Color32::from_rgb(107, 33, 168)),
        AccountType::Accounts => (Color32::from_rgb(254, 249, 195), Color32::from_rgb(133, 77, 14)),
        AccountType::SuperAdmin => (Color32::from_rgb(254, 226, 226), Color32::from_rgb(153, 27, 27)),
    }
}
