use std::io::{self, Write};

use crate::platform::PlatformError;

const APP_NAME: &str = "hydroflow";

/// Delivers a titled message to the user outside the terminal.
pub trait Notifier {
    fn notify(&mut self, title: &str, body: &str) -> Result<(), PlatformError>;
}

/// Native desktop notification (D-Bus, Notification Center or toast).
pub struct DesktopNotifier;

impl Notifier for DesktopNotifier {
    fn notify(&mut self, title: &str, body: &str) -> Result<(), PlatformError> {
        notify_rust::Notification::new()
            .appname(APP_NAME)
            .summary(title)
            .body(body)
            .show()
            .map(|_| ())
            .map_err(|e| PlatformError::Desktop(e.to_string()))
    }
}

/// Terminal bell, used when no desktop notification could be shown.
pub fn ring_bell<W: Write>(out: &mut W) -> io::Result<()> {
    out.write_all(b"\x07")?;
    out.flush()
}
