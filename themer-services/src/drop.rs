// SPDX-License-Identifier: LGPL-3.0-only

//! Drag-and-drop theme import.
//!
//! A [DropHandler] listens on a [DropTarget] for `dragover` and `drop`
//! events. Dropped files whose name looks like a theme are read in the
//! background on a [smol::LocalExecutor] and fed through the manager's
//! import pipeline once the read completes. Reads are not queued or
//! cancelled: when several are in flight, the last one to finish wins.

use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

use smol::{LocalExecutor, Task};
use themer_theme::error::ThemeResult;
use themer_theme::manager::ThemeManager;

use crate::io_helpers::read_file_to_string;

/// The operation a drop target advertises to the drag source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DropEffect {
    /// No drop is allowed.
    #[default]
    None,
    /// The data is copied.
    Copy,
    /// The data is moved.
    Move,
    /// The data is linked.
    Link,
}

/// Where a dropped file's contents come from.
#[derive(Debug, Clone)]
pub enum FileSource {
    /// A file on disk.
    Path(PathBuf),
    /// Contents already in memory.
    Text(String),
}

/// A file carried by a drag event.
#[derive(Debug, Clone)]
pub struct DroppedFile {
    name: Option<String>,
    source: FileSource,
}

impl DroppedFile {
    /// A file on disk, named after its final path component.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned());
        Self {
            name,
            source: FileSource::Path(path),
        }
    }

    /// A named file held in memory.
    pub fn from_text(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            source: FileSource::Text(text.into()),
        }
    }

    /// A file without a name.
    pub fn unnamed(source: FileSource) -> Self {
        Self { name: None, source }
    }

    /// The file name, if any.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Read the whole file as text.
    pub async fn read_text(&self) -> std::io::Result<String> {
        match &self.source {
            FileSource::Path(path) => read_file_to_string(path).await,
            FileSource::Text(text) => Ok(text.clone()),
        }
    }
}

/// A `dragover` or `drop` event.
#[derive(Debug, Clone, Default)]
pub struct DragEvent {
    files: Vec<DroppedFile>,
    default_prevented: bool,
    propagation_stopped: bool,
    drop_effect: DropEffect,
}

impl DragEvent {
    /// An event carrying `files`.
    pub fn new(files: Vec<DroppedFile>) -> Self {
        Self {
            files,
            ..Self::default()
        }
    }

    /// The dropped files.
    pub fn files(&self) -> &[DroppedFile] {
        &self.files
    }

    /// Suppress the host's default handling.
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    /// Stop the event from reaching other listeners.
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    /// Whether default handling was suppressed.
    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }

    /// Whether propagation was stopped.
    pub fn propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }

    /// The advertised drop effect.
    pub fn drop_effect(&self) -> DropEffect {
        self.drop_effect
    }

    /// Advertise a drop effect.
    pub fn set_drop_effect(&mut self, effect: DropEffect) {
        self.drop_effect = effect;
    }
}

/// Listener registered on a [DropTarget].
pub type DragListener = Box<dyn FnMut(&mut DragEvent)>;

/// Source of drag-and-drop events, usually the whole application window.
pub trait DropTarget {
    /// Register a `dragover` listener.
    fn add_dragover_listener(&mut self, listener: DragListener);

    /// Register a `drop` listener.
    fn add_drop_listener(&mut self, listener: DragListener);
}

/// Routes dropped theme files into a [ThemeManager].
#[derive(Clone)]
pub struct DropHandler {
    manager: Rc<RefCell<ThemeManager>>,
    executor: Rc<LocalExecutor<'static>>,
}

impl DropHandler {
    /// Create a handler that spawns file reads on `executor`.
    pub fn new(manager: Rc<RefCell<ThemeManager>>, executor: Rc<LocalExecutor<'static>>) -> Self {
        Self { manager, executor }
    }

    /// Create a handler and register it on `target`.
    pub fn attach(
        target: &mut dyn DropTarget,
        manager: Rc<RefCell<ThemeManager>>,
        executor: Rc<LocalExecutor<'static>>,
    ) -> Self {
        let handler = Self::new(manager, executor);

        let on_dragover = handler.clone();
        target.add_dragover_listener(Box::new(move |event| on_dragover.dragover(event)));

        let on_drop = handler.clone();
        target.add_drop_listener(Box::new(move |event| {
            if let Some(task) = on_drop.drop(event) {
                task.detach();
            }
        }));

        handler
    }

    /// Handle `dragover`: accept everything as a copy.
    pub fn dragover(&self, event: &mut DragEvent) {
        event.stop_propagation();
        event.prevent_default();
        event.set_drop_effect(DropEffect::Copy);
    }

    /// Handle `drop`: gate the first file and start reading it.
    ///
    /// Returns the spawned import, or `None` if the file was rejected.
    pub fn drop(&self, event: &mut DragEvent) -> Option<Task<ThemeResult<bool>>> {
        event.prevent_default();
        event.stop_propagation();

        let Some(file) = event.files().first().cloned() else {
            log::warn!("Theme: Unnamed file.");
            return None;
        };

        if let Err(e) = self.manager.borrow().check_file_name(file.name()) {
            log::warn!("Theme: {}", e);
            return None;
        }

        let manager = self.manager.clone();
        Some(self.executor.spawn(async move {
            let result = import_file(&manager, &file).await;
            if let Err(e) = &result {
                log::error!("Theme: import of {:?} failed: {}", file.name(), e);
            }
            result
        }))
    }
}

/// Read `file` and run its contents through the manager's import pipeline.
///
/// A read failure is logged and reported as `Ok(false)`; only storage write
/// failures come back as errors. The manager borrow is released before the
/// load callback runs.
pub async fn import_file(manager: &RefCell<ThemeManager>, file: &DroppedFile) -> ThemeResult<bool> {
    let text = match file.read_text().await {
        Ok(text) => text,
        Err(e) => {
            log::warn!("Theme: failed to read {:?}: {}", file.name(), e);
            return Ok(false);
        },
    };
    let notice = manager.borrow_mut().import_deferred(text)?;
    match notice {
        Some(notice) => {
            notice.notify();
            Ok(true)
        },
        None => Ok(false),
    }
}

/// A [DropTarget] that dispatches events handed to it by the caller.
#[derive(Default)]
pub struct ScriptedDropTarget {
    dragover: Vec<DragListener>,
    drop: Vec<DragListener>,
}

impl ScriptedDropTarget {
    /// Create a target with no listeners.
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver a `dragover` event to every listener.
    pub fn dispatch_dragover(&mut self, event: &mut DragEvent) {
        for listener in self.dragover.iter_mut() {
            listener(event);
        }
    }

    /// Deliver a `drop` event to every listener.
    pub fn dispatch_drop(&mut self, event: &mut DragEvent) {
        for listener in self.drop.iter_mut() {
            listener(event);
        }
    }
}

impl DropTarget for ScriptedDropTarget {
    fn add_dragover_listener(&mut self, listener: DragListener) {
        self.dragover.push(listener);
    }

    fn add_drop_listener(&mut self, listener: DragListener) {
        self.drop.push(listener);
    }
}
