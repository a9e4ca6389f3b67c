#![warn(missing_docs)]

//! # Themer Theming Core
//!
//! Runtime palette management for desktop applications whose UI is styled
//! through CSS custom properties. This crate keeps a small set of named
//! palettes, persists the active one across sessions, renders it as a
//! stylesheet and imports new palettes from JSON or SVG files.
//!
//! ## Overview
//!
//! - **[Palette](palette::Palette)**: The nine-colour record themes are made of
//! - **[PaletteStore](store::PaletteStore)**: The `default`, `noir` and `pale` palettes
//! - **[ThemeManager](manager::ThemeManager)**: Load, save, apply and the presets
//! - **[StyleSink](style::StyleSink)**: The generated `:root { --background: ...; }` stylesheet
//! - **[KeyValueStorage](storage::KeyValueStorage)**: Where the active palette is persisted
//! - **[parse](importer::parse)**: Turns dropped file contents into a candidate palette
//! - **[ThemerConfig](config::ThemerConfig)**: Configuration from code, TOML or the environment
//!
//! ## Quick Start
//!
//! ```rust
//! use themer_theme::manager::ThemeManager;
//! use themer_theme::storage::MemoryStorage;
//! use themer_theme::style::RecordingHost;
//!
//! let mut manager = ThemeManager::new(MemoryStorage::new());
//! manager.install(RecordingHost::new(), None);
//! manager.start().unwrap();
//!
//! manager.import(r##"{"background":"#0b0b0b","f_high":"#fafafa"}"##).unwrap();
//! assert!(manager.stylesheet().contains("--background: #0b0b0b;"));
//! assert!(manager.stylesheet().contains("--b_inv: undefined;"));
//! ```
//!
//! ## Error Handling
//!
//! Bad input never surfaces as an error: rejected candidates, unparseable
//! imports and incomplete SVG files are logged through the `log` facade and
//! leave the active palette untouched. Storage write failures are returned as
//! [ThemeError](error::ThemeError) so the host application can decide what
//! to do with them.

/// Contains the [config::ThemerConfig] struct.
pub mod config;
/// Contains the [error::ThemeError] type.
pub mod error;
/// Contains font family cycling and font size helpers.
pub mod fonts;
/// Contains the import pipeline for dropped or pasted themes.
pub mod importer;
/// Contains the [manager::ThemeManager].
pub mod manager;
/// Contains the [palette::Palette] type and the built-in palettes.
pub mod palette;
/// Contains the palette persistence adapter.
pub mod storage;
/// Contains the [store::PaletteStore].
pub mod store;
/// Contains the stylesheet sink.
pub mod style;
/// Contains SVG theme extraction.
pub mod svg;

pub use error::{ThemeError, ThemeResult};
pub use manager::{LoadNotice, ThemeManager};
pub use palette::{Palette, PaletteField, Scheme};
