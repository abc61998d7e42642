// Author: Dustin Pilgrim
// License: MIT
//
// Screen pixels for a session.
//
// The live source is xdg-desktop-portal (org.freedesktop.portal.Screenshot):
// we call Screenshot(), wait for the Request::Response signal and load the
// file:// URI it hands back. A fixed image can stand in for the portal
// (config `screen_image` or `--screen-image`), which is also what tests use.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use async_io::Timer;
use eventline::debug;
use futures_util::{StreamExt, future::Either, future::select};
use image::RgbaImage;
use url::Url;
use zbus::zvariant::{OwnedObjectPath, OwnedValue, Value};
use zbus::{Connection, Proxy};

const PORTAL_DEST: &str = "org.freedesktop.portal.Desktop";
const SCREENSHOT_IFACE: &str = "org.freedesktop.portal.Screenshot";
const REQUEST_IFACE: &str = "org.freedesktop.portal.Request";
const PORTAL_PATH: &str = "/org/freedesktop/portal/desktop";

const PORTAL_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenSource {
    Portal,
    File(PathBuf),
}

impl ScreenSource {
    pub fn from_option(path: Option<PathBuf>) -> Self {
        match path {
            Some(p) if !p.as_os_str().is_empty() => ScreenSource::File(p),
            _ => ScreenSource::Portal,
        }
    }
}

/// Grab the whole screen as RGBA.
pub fn grab(source: &ScreenSource) -> Result<RgbaImage, String> {
    let path = match source {
        ScreenSource::Portal => capture_portal_screenshot_path()?,
        ScreenSource::File(p) => p.clone(),
    };
    debug!("screen source={}", path.display());
    load_rgba(&path)
}

fn load_rgba(path: &Path) -> Result<RgbaImage, String> {
    let img = image::open(path).map_err(|e| format!("open screenshot {}: {e}", path.display()))?;
    Ok(img.to_rgba8())
}

/// Call portal Screenshot() and return the file it wrote.
fn capture_portal_screenshot_path() -> Result<PathBuf, String> {
    zbus::block_on(async {
        let conn = Connection::session()
            .await
            .map_err(|e| format!("dbus session connect: {e}"))?;

        let screenshot = Proxy::new(&conn, PORTAL_DEST, PORTAL_PATH, SCREENSHOT_IFACE)
            .await
            .map_err(|e| format!("proxy screenshot: {e}"))?;

        let token = new_handle_token();
        let mut options: HashMap<&str, Value<'_>> = HashMap::new();
        options.insert("handle_token", Value::from(token.as_str()));
        options.insert("interactive", Value::from(false));

        let parent_window = "";

        let request_path: OwnedObjectPath = screenshot
            .call("Screenshot", &(parent_window, options))
            .await
            .map_err(|e| format!("portal Screenshot() call failed: {e}"))?;

        let request = Proxy::new(&conn, PORTAL_DEST, request_path, REQUEST_IFACE)
            .await
            .map_err(|e| format!("proxy request: {e}"))?;

        let mut stream = request
            .receive_signal("Response")
            .await
            .map_err(|e| format!("receive Response signal: {e}"))?;

        let next = stream.next();
        let timeout = Timer::after(PORTAL_TIMEOUT);

        match select(next, timeout).await {
            Either::Left((Some(msg), _)) => {
                let (response, results): (u32, HashMap<String, OwnedValue>) = msg
                    .body()
                    .deserialize()
                    .map_err(|e| format!("signal decode: {e}"))?;

                if response != 0 {
                    return Err(format!("portal screenshot failed (response={response})"));
                }

                let uri: &str = results
                    .get("uri")
                    .ok_or_else(|| "portal response missing 'uri'".to_string())?
                    .downcast_ref::<&str>()
                    .map_err(|e| format!("'uri' had unexpected type: {e}"))?;

                uri_to_path(uri)
            }
            Either::Left((None, _)) => Err("portal signal stream ended unexpectedly".into()),
            Either::Right((_, _)) => Err("portal request timed out waiting for Response".into()),
        }
    })
}

fn uri_to_path(uri: &str) -> Result<PathBuf, String> {
    let url = Url::parse(uri).map_err(|e| format!("bad uri {uri}: {e}"))?;
    if url.scheme() != "file" {
        return Err(format!("unexpected uri scheme: {uri}"));
    }
    url.to_file_path().map_err(|_| format!("uri is not a local path: {uri}"))
}

fn new_handle_token() -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    format!("shotmark_{now}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_uris_are_percent_decoded() {
        let p = uri_to_path("file:///home/me/Screenshot%20from%20today.png").unwrap();
        assert_eq!(p, PathBuf::from("/home/me/Screenshot from today.png"));
    }

    #[test]
    fn non_file_uris_are_rejected() {
        assert!(uri_to_path("https://example.com/a.png").is_err());
        assert!(uri_to_path("not a uri").is_err());
    }

    #[test]
    fn empty_path_means_portal() {
        assert_eq!(ScreenSource::from_option(None), ScreenSource::Portal);
        assert_eq!(ScreenSource::from_option(Some(PathBuf::new())), ScreenSource::Portal);
        assert_eq!(
            ScreenSource::from_option(Some(PathBuf::from("/tmp/s.png"))),
            ScreenSource::File(PathBuf::from("/tmp/s.png"))
        );
    }

    #[test]
    fn file_source_loads_rgba() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("screen.png");
        RgbaImage::from_pixel(8, 4, image::Rgba([1, 2, 3, 255])).save(&path).unwrap();

        let img = grab(&ScreenSource::File(path)).unwrap();
        assert_eq!(img.dimensions(), (8, 4));
        assert_eq!(img.get_pixel(0, 0).0, [1, 2, 3, 255]);
    }
}
