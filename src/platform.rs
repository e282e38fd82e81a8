//! Platform-specific configuration

use anyhow::{Context, Result};
use crossterm::event::KeyModifiers;
use std::process::{Command, Stdio};

/// Platform-appropriate modifier for copy/save shortcuts
/// - macOS: SUPER (Cmd key)
/// - Linux/Windows: CONTROL (Ctrl key)
#[cfg(target_os = "macos")]
pub const COPY_MODIFIER: KeyModifiers = KeyModifiers::SUPER;

#[cfg(not(target_os = "macos"))]
pub const COPY_MODIFIER: KeyModifiers = KeyModifiers::CONTROL;

/// Save shortcut display for form help text
#[cfg(target_os = "macos")]
pub const SAVE_SHORTCUT: &str = "Cmd+S";

#[cfg(not(target_os = "macos"))]
pub const SAVE_SHORTCUT: &str = "Ctrl+S";

#[cfg(target_os = "macos")]
const OPENER: &str = "open";
#[cfg(target_os = "windows")]
const OPENER: &str = "explorer";
#[cfg(not(any(target_os = "macos", target_os = "windows")))]
const OPENER: &str = "xdg-open";

/// Hand a URL to the OS default handler (browser, mail client, ...).
///
/// Fire-and-forget: the child is detached and its output discarded so it
/// cannot scribble over the alternate screen.
pub fn open_url(url: &str) -> Result<()> {
    Command::new(OPENER)
        .arg(url)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .with_context(|| format!("Failed to open {url}"))?;
    Ok(())
}
