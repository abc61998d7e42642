// Author: Dustin Pilgrim
// License: MIT
//
// Desktop notifications via org.freedesktop.Notifications.

use std::collections::HashMap;
use std::path::Path;

use zbus::zvariant::Value;
use zbus::{Connection, Proxy};

const DEST: &str = "org.freedesktop.Notifications";
const PATH: &str = "/org/freedesktop/Notifications";
const IFACE: &str = "org.freedesktop.Notifications";

const APP_NAME: &str = "Shotmark";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: Kind,
    pub summary: &'static str,
    pub body: String,
}

impl Notification {
    pub fn saved(path: &Path) -> Self {
        Self {
            kind: Kind::Info,
            summary: "Screenshot saved",
            body: path.display().to_string(),
        }
    }

    pub fn copied() -> Self {
        Self {
            kind: Kind::Info,
            summary: "Screenshot copied",
            body: "The selection is on the clipboard".into(),
        }
    }

    pub fn failed(message: &str) -> Self {
        Self {
            kind: Kind::Error,
            summary: "Screenshot failed",
            body: message.to_string(),
        }
    }

    // freedesktop urgency: 0=low, 1=normal, 2=critical
    fn urgency(&self) -> u8 {
        match self.kind {
            Kind::Info => 1,
            Kind::Error => 2,
        }
    }

    fn icon(&self) -> &'static str {
        match self.kind {
            Kind::Info => "camera-photo",
            Kind::Error => "dialog-error",
        }
    }

    fn timeout_ms(&self) -> i32 {
        match self.kind {
            Kind::Info => 2500,
            Kind::Error => 6000,
        }
    }

    /// Blocking send on the session bus.
    pub fn send(&self) -> Result<(), String> {
        zbus::block_on(async {
            let conn = Connection::session()
                .await
                .map_err(|e| format!("notify: dbus session connect: {e}"))?;

            let proxy = Proxy::new(&conn, DEST, PATH, IFACE)
                .await
                .map_err(|e| format!("notify: proxy: {e}"))?;

            let mut hints: HashMap<&str, Value<'_>> = HashMap::new();
            hints.insert("urgency", Value::from(self.urgency()));

            // Notify(app_name, replaces_id, app_icon, summary, body, actions, hints, expire_timeout)
            let _: u32 = proxy
                .call(
                    "Notify",
                    &(
                        APP_NAME,
                        0u32,
                        self.icon(),
                        self.summary,
                        self.body.as_str(),
                        Vec::<&str>::new(),
                        hints,
                        self.timeout_ms(),
                    ),
                )
                .await
                .map_err(|e| format!("notify: call Notify: {e}"))?;

            Ok(())
        })
    }
}
