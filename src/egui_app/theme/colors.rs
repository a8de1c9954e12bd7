//! Color Constants
//!
//! A warm stout-and-amber palette.

use eframe::egui::Color32;

/// Main background - Stout brown
pub const BG_DARK: Color32 = Color32::from_rgb(0x1F, 0x17, 0x12);

/// Top bar background - Dark roast
pub const TOP_BAR_BG: Color32 = Color32::from_rgb(0x2B, 0x1F, 0x17);

/// Card background for list entries
pub const CARD_BG: Color32 = Color32::from_rgb(0x33, 0x26, 0x1C);

/// Card background when hovered or selected
pub const CARD_HOVER: Color32 = Color32::from_rgb(0x45, 0x33, 0x25);

/// Card border
pub const CARD_BORDER: Color32 = Color32::from_rgb(0x5A, 0x44, 0x32);

/// Accent - Amber
pub const ACCENT: Color32 = Color32::from_rgb(0xE0, 0x9A, 0x2B);

/// Accent on hover
pub const ACCENT_HOVER: Color32 = Color32::from_rgb(0xF2, 0xB2, 0x4A);

/// Text on dark backgrounds
pub const TEXT_LIGHT: Color32 = Color32::from_rgb(0xF5, 0xEA, 0xDA);

/// Secondary text color (muted)
pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(0xB0, 0x9C, 0x86);

/// Text on the amber accent
pub const TEXT_ON_ACCENT: Color32 = Color32::from_rgb(0x1F, 0x17, 0x12);

/// Live feed indicator - Green
pub const STATUS_ONLINE: Color32 = Color32::from_rgb(0x4C, 0xAF, 0x50);

/// Feed not live - Gray
pub const STATUS_OFFLINE: Color32 = Color32::from_rgb(0x9E, 0x9E, 0x9E);

/// Success color - Green
pub const SUCCESS: Color32 = Color32::from_rgb(0x4C, 0xAF, 0x50);

/// Error color - Red
pub const ERROR: Color32 = Color32::from_rgb(0xE5, 0x73, 0x73);

/// Warning color - Orange
pub const WARNING: Color32 = Color32::from_rgb(0xFF, 0xA7, 0x26);

/// Map background
pub const MAP_BG: Color32 = Color32::from_rgb(0x27, 0x2E, 0x2A);

/// Single bar marker
pub const MARKER: Color32 = Color32::from_rgb(0xE0, 0x9A, 0x2B);

/// Cluster bubble
pub const CLUSTER: Color32 = Color32::from_rgb(0xC0, 0x5A, 0x2B);
