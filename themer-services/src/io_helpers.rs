// SPDX-License-Identifier: MIT OR Apache-2.0

//! Async I/O helpers using smol::unblock for non-blocking file operations

use std::io;
use std::path::Path;

/// Read the entire contents of a file into a string asynchronously.
///
/// This function uses `smol::unblock` to execute `std::fs::read_to_string` without blocking
/// the event loop the drop handler runs on.
pub async fn read_file_to_string(path: &Path) -> io::Result<String> {
    let path = path.to_path_buf();
    smol::unblock(move || std::fs::read_to_string(path)).await
}

/// Write a string to a file, creating parent directories as needed.
pub fn write_file_creating_dirs(path: &Path, contents: &str) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, contents)
}
