#![warn(missing_docs)]

//! Runtime palette theming for desktop UIs.

pub use themer_theme as theme;
#[cfg(feature = "services")]
pub use themer_services as services;

/// A "prelude" for users of themer.
///
/// Importing this module brings into scope the types needed to install a
/// theme manager and feed it palettes.
///
/// ```rust
/// use themer::prelude::*;
/// ```
pub mod prelude {
    pub use crate::theme::config::ThemerConfig;
    pub use crate::theme::error::{ThemeError, ThemeResult};
    pub use crate::theme::fonts::BodyStyle;
    pub use crate::theme::importer::{parse, ImportInput};
    pub use crate::theme::manager::{LoadCallback, LoadNotice, ThemeManager};
    pub use crate::theme::palette::{Palette, PaletteField, Scheme};
    pub use crate::theme::storage::{KeyValueStorage, MemoryStorage};
    pub use crate::theme::store::{PaletteName, PaletteStore};
    pub use crate::theme::style::{StyleHost, StyleSink};

    #[cfg(feature = "services")]
    pub use crate::services::{DragEvent, DropHandler, DropTarget, DroppedFile, FileStorage};
}
