use std::cell::RefCell;
use std::rc::Rc;

use smol::LocalExecutor;
use themer::prelude::*;

/// Prints every stylesheet the manager produces.
struct PrintHost;

impl StyleHost for PrintHost {
    fn set_style_text(&mut self, css: &str) {
        println!("{}", css);
    }
}

fn main() {
    env_logger::init();

    let paths: Vec<String> = std::env::args().skip(1).collect();
    if paths.is_empty() {
        eprintln!("usage: theme_drop <theme.svg|theme.thm>...");
        std::process::exit(2);
    }

    let mut manager =
        ThemeManager::with_config(ThemerConfig::from_env_or_default(), MemoryStorage::new());
    manager.install(PrintHost, Some(Box::new(|| log::info!("Theme loaded"))));
    for (name, palette) in manager.store().iter() {
        log::info!(
            "Preset {}: background {}",
            name,
            palette.background.as_deref().unwrap_or("undefined")
        );
    }
    if let Err(e) = manager.start() {
        log::error!("Failed to start theme: {}", e);
        std::process::exit(1);
    }

    let manager = Rc::new(RefCell::new(manager));
    let executor = Rc::new(LocalExecutor::new());
    let handler = DropHandler::new(manager.clone(), executor.clone());

    let mut imports = Vec::new();
    for path in paths {
        let mut over = DragEvent::default();
        handler.dragover(&mut over);

        let mut event = DragEvent::new(vec![DroppedFile::from_path(&path)]);
        if let Some(task) = handler.drop(&mut event) {
            imports.push((path, task));
        }
    }

    smol::block_on(executor.run(async {
        for (path, task) in imports {
            match task.await {
                Ok(true) => log::info!("Imported {}", path),
                Ok(false) => log::warn!("{} is not a usable theme", path),
                Err(e) => log::error!("Importing {} failed: {}", path, e),
            }
        }
    }));

    log::info!("Active palette: {:?}", manager.borrow().active());
}
