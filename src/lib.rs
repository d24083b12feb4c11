//! Natural-language diagram client.
//!
//! The crate centres on [`ui::controller::DiagramController`], which owns the
//! request lifecycle, the model selector, the notification queue and the
//! current diagram. Everything it talks to (the generation API, the renderer,
//! the clipboard, the download location and the view) is injected through the
//! traits in [`api`], [`render`], [`clipboard`] and [`export`].

pub mod api;
pub mod cli;
pub mod clipboard;
pub mod config;
pub mod error;
pub mod export;
pub mod logging;
pub mod provider;
pub mod render;
pub mod ui;
