//! Theme Module
//!
//! Color constants and frame builders for the client's amber-on-dark look.
//!
//! # Usage
//!
//! ```rust,ignore
//! use crate::egui_app::theme::{colors, styles};
//!
//! styles::apply_global_theme(ctx);
//! styles::card_frame().show(ui, |ui| {
//!     ui.colored_label(colors::TEXT_LIGHT, "The Anchor");
//! });
//! ```

pub mod colors;
pub mod styles;
