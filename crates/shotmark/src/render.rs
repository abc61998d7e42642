// Author: Dustin Pilgrim
// License: MIT

use std::path::PathBuf;

use eventline::{debug, info};
use image::RgbaImage;

use shotmark_core::export::{render_frame, save_image, section_pixels};
use shotmark_core::{Effect, FontBook, Rect, Shot, ShotConfig};

use crate::script;

#[derive(Debug, Clone)]
pub struct RenderJob {
    pub screen: PathBuf,
    pub script: PathBuf,
    pub out: PathBuf,
    pub font: Option<PathBuf>,
    /// Whole overlay instead of the exported selection.
    pub frame: bool,
}

pub fn run(job: &RenderJob) -> Result<(), String> {
    let screen = image::open(&job.screen)
        .map_err(|e| format!("open {}: {e}", job.screen.display()))?
        .to_rgba8();

    let src = std::fs::read_to_string(&job.script)
        .map_err(|e| format!("read {}: {e}", job.script.display()))?;

    let fonts = match &job.font {
        Some(p) => FontBook::load(p).map_err(|e| e.to_string())?,
        None => FontBook::discover(None),
    };

    let img = replay(&screen, &src, &fonts, job.frame)?;
    save_image(&img, &job.out).map_err(|e| e.to_string())
}

/// Run `script` over a fresh session on `screen` and return the pixels.
pub fn replay(screen: &RgbaImage, script: &str, fonts: &FontBook, frame: bool) -> Result<RgbaImage, String> {
    let steps = script::parse(script)?;

    let area = Rect::new(0, 0, screen.width() as i32, screen.height() as i32);
    let mut shot = Shot::new(ShotConfig::default(), area);
    shot.show(true, &mut |_| {});

    for step in &steps {
        step.apply(&mut shot, &mut |effect| log_effect(&effect));
    }
    info!(
        "replayed {} steps: mode={} annotations={}",
        steps.len(),
        shot.mode(),
        shot.history().len()
    );

    if frame {
        return render_frame(&shot, screen, fonts).map_err(|e| e.to_string());
    }

    section_pixels(&shot, screen, fonts)
        .map_err(|e| e.to_string())?
        .ok_or_else(|| "script left no selection to export".to_string())
}

fn log_effect(effect: &Effect) {
    match effect {
        Effect::SaveToFile | Effect::CopyToClipboard | Effect::Quit => {
            debug!("offline render ignores {:?}", effect)
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use image::Rgba;

    const SELECT: &str = "down 20 10\ndrag 120 70\nup 120 70\n";

    fn screen() -> RgbaImage {
        RgbaImage::from_pixel(200, 100, Rgba([40, 80, 120, 255]))
    }

    #[test]
    fn selection_script_exports_the_interior() {
        let img = replay(&screen(), SELECT, &FontBook::empty(), false).unwrap();
        assert_eq!(img.dimensions(), (96, 56));
    }

    #[test]
    fn frame_keeps_screen_size() {
        let img = replay(&screen(), SELECT, &FontBook::empty(), true).unwrap();
        assert_eq!(img.dimensions(), (200, 100));
        // outside the selection the mask darkens the screen
        assert!(img.get_pixel(5, 95).0[2] < 120);
    }

    #[test]
    fn annotations_are_burned_in() {
        let script = format!("{SELECT}tool rect\nsize 4\ndown 40 30\ndrag 80 50\nup 80 50\n");
        let img = replay(&screen(), &script, &FontBook::empty(), false).unwrap();

        let edge = img.get_pixel(18, 28).0;
        assert!(edge[0] > 200 && edge[1] < 60, "edge pixel {edge:?}");
    }

    #[test]
    fn empty_script_has_nothing_to_export() {
        let err = replay(&screen(), "# nothing\n", &FontBook::empty(), false).unwrap_err();
        assert!(err.contains("no selection"), "{err}");
    }

    #[test]
    fn run_writes_the_output_file() {
        let dir = tempfile::tempdir().unwrap();
        let screen_path = dir.path().join("screen.png");
        screen().save(&screen_path).unwrap();
        let script_path = dir.path().join("events.txt");
        std::fs::write(&script_path, SELECT).unwrap();

        let job = RenderJob {
            screen: screen_path,
            script: script_path,
            out: dir.path().join("out/shot.png"),
            font: None,
            frame: false,
        };
        run(&job).unwrap();

        let out = image::open(&job.out).unwrap();
        assert_eq!((out.width(), out.height()), (96, 56));
    }
}
