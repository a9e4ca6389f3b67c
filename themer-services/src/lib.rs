// SPDX-License-Identifier: LGPL-3.0-only
//! Host-side services for themer: durable storage for the active palette and
//! drag-and-drop theme import.

pub mod drop;
pub mod io_helpers;
pub mod storage;

pub use drop::{DragEvent, DropEffect, DropHandler, DropTarget, DroppedFile, FileSource, ScriptedDropTarget};
pub use storage::FileStorage;
