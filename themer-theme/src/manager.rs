//! # Theme Manager
//!
//! [ThemeManager] owns the active palette and runs the load pipeline:
//!
//! 1. **Gate**: a candidate without a `background` is rejected with a warning.
//!    Nothing changes and the completion callback is not invoked.
//! 2. **Save**: the candidate becomes the active palette and is persisted.
//! 3. **Apply**: the stylesheet is regenerated from the candidate.
//! 4. **Notify**: the callback registered at install time is invoked.
//!
//! [ThemeManager::load_deferred] stops after step 3 and hands back a
//! [LoadNotice] instead, so a caller that shares the manager behind a
//! `RefCell` can release its borrow before the callback runs.
//!
//! Only a storage write failure leaves the pipeline as an error; everything
//! else is logged and absorbed, so the observable effect of a bad import is
//! that nothing changed.
//!
//! ## Usage
//!
//! ```rust
//! use themer_theme::manager::ThemeManager;
//! use themer_theme::palette::Scheme;
//! use themer_theme::storage::MemoryStorage;
//! use themer_theme::style::RecordingHost;
//!
//! let host = RecordingHost::new();
//! let mut manager = ThemeManager::new(MemoryStorage::new());
//! manager.install(host.clone(), None);
//! manager.start().unwrap();
//!
//! manager.invert().unwrap();
//! assert_eq!(manager.scheme(), Scheme::Pale);
//! assert!(host.last().unwrap().contains("--background: #e1e1e1;"));
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use crate::config::ThemerConfig;
use crate::error::{ThemeError, ThemeResult};
use crate::fonts::{adjust_font_size, px, BodyStyle, FontCycle};
use crate::importer::{self, ImportInput};
use crate::palette::{Palette, Scheme};
use crate::storage::{KeyValueStorage, PaletteStorage};
use crate::store::{PaletteName, PaletteStore};
use crate::style::{StyleHost, StyleSink};

/// Zero-argument callback invoked after every successful load.
pub type LoadCallback = Box<dyn FnMut()>;

/// A committed load whose callback has not run yet.
#[must_use = "the load callback only runs when the notice is delivered"]
pub struct LoadNotice {
    callback: Option<Rc<RefCell<LoadCallback>>>,
}

impl LoadNotice {
    /// Run the load callback, if one was installed.
    pub fn notify(self) {
        let Some(callback) = self.callback else {
            return;
        };
        match callback.try_borrow_mut() {
            Ok(mut callback) => (&mut **callback)(),
            Err(_) => log::warn!("Theme: load callback re-entered, skipping"),
        };
    }
}

/// Runtime theme manager.
pub struct ThemeManager {
    store: PaletteStore,
    storage: PaletteStorage,
    sink: StyleSink,
    active: Palette,
    scheme: Scheme,
    callback: Option<Rc<RefCell<LoadCallback>>>,
    fonts: FontCycle,
    body: Option<Box<dyn BodyStyle>>,
    base_font_size: i32,
    config: ThemerConfig,
}

impl ThemeManager {
    /// Create a manager with the stock configuration.
    pub fn new(storage: impl KeyValueStorage + 'static) -> Self {
        Self::with_config(ThemerConfig::default(), storage)
    }

    /// Create a manager from a configuration.
    ///
    /// Until [ThemeManager::start] runs, the active palette is the configured
    /// default and nothing has been rendered or persisted.
    pub fn with_config(config: ThemerConfig, storage: impl KeyValueStorage + 'static) -> Self {
        let store = PaletteStore::new(Some(config.default_palette.clone()));
        let active = store.default_palette().clone();
        Self {
            storage: PaletteStorage::new(Box::new(storage), config.storage_key.clone()),
            sink: StyleSink::new(),
            scheme: Scheme::of(&active),
            active,
            store,
            callback: None,
            fonts: FontCycle::new(config.fonts.clone()),
            body: None,
            base_font_size: config.base_font_size,
            config,
        }
    }

    /// Attach the stylesheet to `host` and register the load callback.
    pub fn install(&mut self, host: impl StyleHost + 'static, callback: Option<LoadCallback>) {
        log::info!("Theme: Installing..");
        self.sink.attach(Box::new(host));
        self.callback = callback.map(|callback| Rc::new(RefCell::new(callback)));
    }

    /// Attach the body style the font helpers write to.
    pub fn set_body_style(&mut self, body: impl BodyStyle + 'static) {
        self.body = Some(Box::new(body));
    }

    /// Load the persisted palette, or the default one when storage holds
    /// nothing usable.
    pub fn start(&mut self) -> ThemeResult<bool> {
        log::info!("Theme: Starting..");
        let palette = self
            .storage
            .read()
            .unwrap_or_else(|| self.store.default_palette().clone());
        self.load(Some(palette))
    }

    /// Make `palette` the active palette and persist it.
    ///
    /// The palette is recorded as active before the write, so it stays active
    /// even when the write fails.
    pub fn save(&mut self, palette: Palette) -> ThemeResult<()> {
        log::info!("Theme: Saving..");
        self.scheme = Scheme::of(&palette);
        self.active = palette;
        self.storage.write(&self.active)
    }

    /// Run the load pipeline on a candidate.
    ///
    /// Returns `Ok(false)` when the candidate was rejected. The callback runs
    /// while `self` is still borrowed; see [ThemeManager::load_deferred] for
    /// callbacks that reach back into a shared manager.
    pub fn load(&mut self, candidate: Option<Palette>) -> ThemeResult<bool> {
        self.load_with_fallback(candidate, None)
    }

    /// Run the load pipeline with an explicit fallback.
    ///
    /// The fallback (noir when `None`) is reported alongside a rejection but
    /// is not loaded in place of the candidate.
    pub fn load_with_fallback(
        &mut self,
        candidate: Option<Palette>,
        fallback: Option<&Palette>,
    ) -> ThemeResult<bool> {
        match self.commit(candidate, fallback)? {
            Some(notice) => {
                notice.notify();
                Ok(true)
            },
            None => Ok(false),
        }
    }

    /// Gate, save and apply a candidate, leaving the callback to the caller.
    ///
    /// Returns `None` when the candidate was rejected.
    pub fn load_deferred(&mut self, candidate: Option<Palette>) -> ThemeResult<Option<LoadNotice>> {
        self.commit(candidate, None)
    }

    fn commit(
        &mut self,
        candidate: Option<Palette>,
        fallback: Option<&Palette>,
    ) -> ThemeResult<Option<LoadNotice>> {
        let palette = match check_candidate(candidate) {
            Ok(palette) => palette,
            Err(e) => {
                let fallback = fallback.unwrap_or_else(|| self.store.noir());
                log::warn!(
                    "Theme: {} (fallback {:?} not applied)",
                    e,
                    fallback.background.as_deref().unwrap_or_default()
                );
                return Ok(None);
            },
        };

        self.save(palette)?;
        self.sink.render(&self.active);

        Ok(Some(LoadNotice {
            callback: self.callback.clone(),
        }))
    }

    /// Render `palette` into the stylesheet without touching the active
    /// palette or storage.
    pub fn apply(&mut self, palette: &Palette) {
        self.sink.render(palette);
    }

    /// Parse raw input and load the result.
    pub fn import(&mut self, input: impl Into<ImportInput>) -> ThemeResult<bool> {
        let candidate = importer::parse(input);
        self.load(candidate)
    }

    /// Parse raw input and commit the result like [ThemeManager::load_deferred].
    pub fn import_deferred(&mut self, input: impl Into<ImportInput>) -> ThemeResult<Option<LoadNotice>> {
        let candidate = importer::parse(input);
        self.load_deferred(candidate)
    }

    /// Load a palette from the store.
    pub fn load_preset(&mut self, name: PaletteName) -> ThemeResult<bool> {
        let palette = self.store.get(name).clone();
        self.load(Some(palette))
    }

    /// Load a palette from the store by its string name. Unknown names are
    /// logged and ignored.
    pub fn load_named(&mut self, name: &str) -> ThemeResult<bool> {
        match name.parse::<PaletteName>() {
            Ok(name) => self.load_preset(name),
            Err(e) => {
                log::warn!("Theme: {}", e);
                Ok(false)
            },
        }
    }

    /// Load the default palette.
    pub fn reset(&mut self) -> ThemeResult<bool> {
        self.load_preset(PaletteName::Default)
    }

    /// Load the noir palette.
    pub fn noir(&mut self) -> ThemeResult<bool> {
        self.load_preset(PaletteName::Noir)
    }

    /// Load the pale palette.
    pub fn pale(&mut self) -> ThemeResult<bool> {
        self.load_preset(PaletteName::Pale)
    }

    /// Toggle between noir and pale. Any other palette inverts to noir.
    pub fn invert(&mut self) -> ThemeResult<bool> {
        match self.scheme.inverted() {
            Scheme::Pale => self.pale(),
            _ => self.noir(),
        }
    }

    /// Reject a dropped file name that is missing or does not look like a theme.
    pub fn check_file_name(&self, name: Option<&str>) -> ThemeResult<()> {
        match name {
            None | Some("") => Err(ThemeError::UnnamedFile),
            Some(name) if self.config.accepts_file_name(name) => Ok(()),
            Some(name) => Err(ThemeError::rejected_file(name)),
        }
    }

    /// Advance to the next font family and apply it.
    pub fn next_font(&mut self) -> &str {
        self.fonts.next();
        self.write_font_family();
        self.fonts.current()
    }

    /// Step back to the previous font family and apply it.
    pub fn previous_font(&mut self) -> &str {
        self.fonts.previous();
        self.write_font_family();
        self.fonts.current()
    }

    /// Grow the body font size by one pixel.
    pub fn increase_font_size(&mut self) -> Option<i32> {
        self.body
            .as_deref_mut()
            .and_then(|body| adjust_font_size(body, 1))
    }

    /// Shrink the body font size by one pixel. There is no lower bound.
    pub fn decrease_font_size(&mut self) -> Option<i32> {
        self.body
            .as_deref_mut()
            .and_then(|body| adjust_font_size(body, -1))
    }

    /// Set the body font size back to the configured base size.
    pub fn reset_font_size(&mut self) {
        let size = px(self.base_font_size);
        match self.body.as_mut() {
            Some(body) => body.set_font_size(&size),
            None => log::debug!("No body style attached"),
        }
    }

    fn write_font_family(&mut self) {
        let family = self.fonts.current();
        match self.body.as_mut() {
            Some(body) => body.set_font_family(family),
            None => log::debug!("No body style attached"),
        }
    }

    /// The active palette.
    pub fn active(&self) -> &Palette {
        &self.active
    }

    /// The scheme of the active palette.
    pub fn scheme(&self) -> Scheme {
        self.scheme
    }

    /// The current stylesheet text.
    pub fn stylesheet(&self) -> &str {
        self.sink.content()
    }

    /// The palette store.
    pub fn store(&self) -> &PaletteStore {
        &self.store
    }

    /// The font cycle.
    pub fn fonts(&self) -> &FontCycle {
        &self.fonts
    }

    /// The configuration this manager was built from.
    pub fn config(&self) -> &ThemerConfig {
        &self.config
    }
}

fn check_candidate(candidate: Option<Palette>) -> ThemeResult<Palette> {
    match candidate {
        None => Err(ThemeError::not_a_theme("nothing to load")),
        Some(palette) if !palette.is_valid() => {
            Err(ThemeError::not_a_theme("missing background"))
        },
        Some(palette) => Ok(palette),
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::fonts::MemoryBodyStyle;
    use crate::palette::PaletteField;
    use crate::storage::MemoryStorage;
    use crate::style::RecordingHost;

    struct FullStorage;

    impl KeyValueStorage for FullStorage {
        fn get_item(&self, _key: &str) -> ThemeResult<Option<String>> {
            Ok(None)
        }

        fn set_item(&mut self, key: &str, _value: &str) -> ThemeResult<()> {
            Err(ThemeError::storage_write(
                key,
                std::io::Error::new(std::io::ErrorKind::Other, "quota exceeded"),
            ))
        }
    }

    fn installed(storage: MemoryStorage) -> (ThemeManager, RecordingHost, Rc<Cell<usize>>) {
        let host = RecordingHost::new();
        let calls = Rc::new(Cell::new(0));
        let counter = calls.clone();
        let mut manager = ThemeManager::new(storage);
        manager.install(
            host.clone(),
            Some(Box::new(move || counter.set(counter.get() + 1))),
        );
        (manager, host, calls)
    }

    fn custom() -> Palette {
        Palette::from_values([
            "#101820", "#f2aa4c", "#c0c0c0", "#808080", "#000", "#333", "#444", "#555", "#fff",
        ])
    }

    #[test]
    fn test_load_valid_palette() {
        let storage = MemoryStorage::new();
        let (mut manager, host, calls) = installed(storage.clone());

        assert!(manager.load(Some(custom())).unwrap());
        assert_eq!(manager.active(), &custom());
        assert_eq!(storage.item("theme").unwrap(), custom().to_json().unwrap());
        for field in PaletteField::ALL {
            let line = format!("--{}: {};", field.name(), custom().get(field).unwrap());
            assert!(host.last().unwrap().contains(&line), "missing {line}");
        }
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_load_rejects_without_side_effects() {
        let storage = MemoryStorage::new();
        let (mut manager, host, calls) = installed(storage.clone());
        manager.pale().unwrap();
        let css = manager.stylesheet().to_string();
        let updates = host.len();

        assert!(!manager.load(None).unwrap());
        assert!(!manager.load(Some(Palette::default())).unwrap());
        assert!(!manager
            .load_with_fallback(Some(Palette::default()), Some(&Palette::noir()))
            .unwrap());

        assert_eq!(manager.active(), &Palette::pale());
        assert_eq!(manager.stylesheet(), css);
        assert_eq!(host.len(), updates);
        assert_eq!(storage.item("theme").unwrap(), Palette::pale().to_json().unwrap());
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_start_round_trip() {
        let storage = MemoryStorage::new();
        let (mut first, _, _) = installed(storage.clone());
        first.save(custom()).unwrap();

        let (mut second, host, calls) = installed(storage);
        assert!(second.start().unwrap());
        assert_eq!(second.active(), &custom());
        assert!(host.last().unwrap().contains("--f_high: #f2aa4c;"));
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_start_falls_back_to_default() {
        for raw in [None, Some("{oops"), Some(r##"{"f_high":"#fff"}"##)] {
            let storage = match raw {
                Some(raw) => MemoryStorage::with_item("theme", raw),
                None => MemoryStorage::new(),
            };
            let config = ThemerConfig::new().with_default_palette(custom());
            let mut manager = ThemeManager::with_config(config, storage.clone());
            assert!(manager.start().unwrap());
            assert_eq!(manager.active(), &custom());
            assert_eq!(storage.item("theme").unwrap(), custom().to_json().unwrap());
        }
    }

    #[test]
    fn test_invert_toggles() {
        let (mut manager, _, _) = installed(MemoryStorage::new());
        manager.noir().unwrap();
        manager.invert().unwrap();
        assert_eq!(manager.active(), &Palette::pale());
        manager.invert().unwrap();
        assert_eq!(manager.active(), &Palette::noir());
    }

    #[test]
    fn test_invert_toggles_from_pale() {
        let (mut manager, _, calls) = installed(MemoryStorage::new());
        manager.pale().unwrap();
        manager.invert().unwrap();
        assert_eq!(manager.active(), &Palette::noir());
        assert_eq!(manager.scheme(), Scheme::Noir);
        manager.invert().unwrap();
        assert_eq!(manager.active(), &Palette::pale());
        assert_eq!(calls.get(), 3);
    }

    #[test]
    fn test_deferred_load_waits_for_notify() {
        let storage = MemoryStorage::new();
        let (mut manager, host, calls) = installed(storage.clone());

        let notice = manager.load_deferred(Some(custom())).unwrap().unwrap();
        assert_eq!(manager.active(), &custom());
        assert!(host.last().unwrap().contains("--background: #101820;"));
        assert_eq!(storage.item("theme").unwrap(), custom().to_json().unwrap());
        assert_eq!(calls.get(), 0);

        notice.notify();
        assert_eq!(calls.get(), 1);

        assert!(manager.import_deferred("not a theme").unwrap().is_none());
        assert_eq!(manager.active(), &custom());
    }

    #[test]
    fn test_callback_can_read_shared_manager() {
        let manager = Rc::new(RefCell::new(ThemeManager::new(MemoryStorage::new())));
        let seen = Rc::new(RefCell::new(None));
        let weak = Rc::downgrade(&manager);
        let sink = seen.clone();
        manager.borrow_mut().install(
            RecordingHost::new(),
            Some(Box::new(move || {
                if let Some(manager) = weak.upgrade() {
                    *sink.borrow_mut() = manager.borrow().active().background.clone();
                }
            })),
        );

        let notice = manager.borrow_mut().load_deferred(Some(Palette::pale())).unwrap();
        notice.unwrap().notify();
        assert_eq!(seen.borrow().as_deref(), Some("#e1e1e1"));
    }

    #[test]
    fn test_invert_from_lookalike_custom() {
        let (mut manager, _, _) = installed(MemoryStorage::new());
        let lookalike = Palette::pale().with(PaletteField::Background, "#222");
        manager.load(Some(lookalike)).unwrap();
        assert_eq!(manager.scheme(), Scheme::Custom);

        manager.invert().unwrap();
        assert_eq!(manager.active(), &Palette::noir());
    }

    #[test]
    fn test_presets_and_named_loads() {
        let config = ThemerConfig::new().with_default_palette(custom());
        let mut manager = ThemeManager::with_config(config, MemoryStorage::new());

        manager.pale().unwrap();
        assert_eq!(manager.scheme(), Scheme::Pale);
        manager.reset().unwrap();
        assert_eq!(manager.active(), &custom());
        assert!(manager.load_named("noir").unwrap());
        assert_eq!(manager.active(), &Palette::noir());
        assert!(!manager.load_named("sepia").unwrap());
        assert_eq!(manager.active(), &Palette::noir());
    }

    #[test]
    fn test_apply_does_not_persist() {
        let storage = MemoryStorage::new();
        let (mut manager, _, calls) = installed(storage.clone());
        manager.apply(&Palette::pale());
        assert!(manager.stylesheet().contains("#e1e1e1"));
        assert!(storage.item("theme").is_none());
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn test_import_text() {
        let (mut manager, _, _) = installed(MemoryStorage::new());
        assert!(manager.import(Palette::pale().to_svg()).unwrap());
        assert_eq!(manager.active(), &Palette::pale());
        assert!(!manager.import("<svg/>").unwrap());
        assert_eq!(manager.active(), &Palette::pale());
    }

    #[test]
    fn test_storage_failure_propagates() {
        let mut manager = ThemeManager::new(FullStorage);
        let err = manager.noir().unwrap_err();
        assert!(matches!(err, ThemeError::StorageWrite { .. }));
        assert_eq!(manager.active(), &Palette::noir());
    }

    #[test]
    fn test_check_file_name() {
        let manager = ThemeManager::new(MemoryStorage::new());
        assert!(manager.check_file_name(Some("theme.svg")).is_ok());
        assert!(manager.check_file_name(Some("dark.thm")).is_ok());
        assert!(matches!(
            manager.check_file_name(Some("notes.txt")),
            Err(ThemeError::RejectedFile { .. })
        ));
        assert!(matches!(manager.check_file_name(None), Err(ThemeError::UnnamedFile)));
        assert!(matches!(manager.check_file_name(Some("")), Err(ThemeError::UnnamedFile)));
    }

    #[test]
    fn test_font_helpers() {
        let body = MemoryBodyStyle::default();
        let mut manager = ThemeManager::new(MemoryStorage::new());
        manager.set_body_style(body.clone());

        assert_eq!(manager.next_font(), "custom_serif");
        assert_eq!(body.font_family().as_deref(), Some("custom_serif"));
        assert_eq!(manager.previous_font(), "input_mono_regular");
        assert_eq!(manager.previous_font(), "custom_sans_serif");

        assert_eq!(manager.increase_font_size(), Some(13));
        assert_eq!(manager.decrease_font_size(), Some(12));
        assert_eq!(manager.decrease_font_size(), Some(11));
        manager.reset_font_size();
        assert_eq!(body.font_size(), "12px");
    }

    #[test]
    fn test_increase_font_size_at_limit() {
        let body = MemoryBodyStyle::new(px(i32::MAX));
        let mut manager = ThemeManager::new(MemoryStorage::new());
        manager.set_body_style(body.clone());

        assert_eq!(manager.increase_font_size(), None);
        assert_eq!(body.font_size(), px(i32::MAX));
    }

    #[test]
    fn test_font_helpers_without_body() {
        let mut manager = ThemeManager::new(MemoryStorage::new());
        assert_eq!(manager.next_font(), "custom_serif");
        assert_eq!(manager.increase_font_size(), None);
        manager.reset_font_size();
    }
}
