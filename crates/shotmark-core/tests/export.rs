// Author: Dustin Pilgrim
// License: MIT

use image::{Rgba, RgbaImage};
use shotmark_core::export::{render_frame, save_section, section_pixels};
use shotmark_core::{FontBook, InputEvent, PenKind, PointerEvent, Rect, Shot, ShotConfig, ShotError};

fn screen() -> RgbaImage {
    RgbaImage::from_pixel(200, 100, Rgba([40, 80, 120, 255]))
}

fn selected_shot() -> Shot {
    let mut s = Shot::new(ShotConfig::default(), Rect::new(0, 0, 200, 100));
    s.show(true, &mut |_| {});
    s.dispatch(&InputEvent::PointerDown(PointerEvent::primary(20, 10)));
    s.dispatch(&InputEvent::PointerMove(PointerEvent::primary(120, 70)));
    s.dispatch(&InputEvent::PointerUp(PointerEvent::primary(120, 70)));
    s
}

#[test]
fn no_selection_exports_nothing() {
    let s = Shot::new(ShotConfig::default(), Rect::new(0, 0, 200, 100));
    let out = section_pixels(&s, &screen(), &FontBook::empty()).unwrap();
    assert!(out.is_none());
}

#[test]
fn export_is_cropped_to_selection_interior() {
    let s = selected_shot();
    let img = section_pixels(&s, &screen(), &FontBook::empty()).unwrap().unwrap();

    // (20,10)-(120,70) minus a 2px border
    assert_eq!(img.dimensions(), (96, 56));
    assert_eq!(img.get_pixel(10, 10).0, [40, 80, 120, 255]);
}

#[test]
fn export_includes_annotations_but_no_chrome() {
    let mut s = selected_shot();
    s.set_pen_size(4);
    s.select_tool(Some(PenKind::Rectangle), &mut |_| {});
    s.dispatch(&InputEvent::PointerDown(PointerEvent::primary(40, 30)));
    s.dispatch(&InputEvent::PointerMove(PointerEvent::primary(80, 50)));
    s.dispatch(&InputEvent::PointerUp(PointerEvent::primary(80, 50)));

    let img = section_pixels(&s, &screen(), &FontBook::empty()).unwrap().unwrap();

    // rectangle edge at x=40 lands at x=18 in the crop, drawn in pen red
    let edge = img.get_pixel(18, 28).0;
    assert!(edge[0] > 200 && edge[1] < 60, "edge pixel {edge:?}");
    // interior of the drawn rectangle is untouched screen
    assert_eq!(img.get_pixel(38, 28).0, [40, 80, 120, 255]);
}

#[test]
fn frame_masks_outside_selection() {
    let s = selected_shot();
    let frame = render_frame(&s, &screen(), &FontBook::empty()).unwrap();

    // below the info label, inside the border
    let inside = frame.get_pixel(60, 66).0;
    let outside = frame.get_pixel(180, 90).0;
    assert_eq!(inside, [40, 80, 120, 255]);
    assert!(outside[2] < inside[2], "mask should darken {outside:?}");
}

#[test]
fn save_section_writes_png() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("shot.png");

    save_section(&selected_shot(), &screen(), &FontBook::empty(), &path).unwrap();

    let back = image::open(&path).unwrap().to_rgba8();
    assert_eq!(back.dimensions(), (96, 56));
}

#[test]
fn save_without_selection_fails() {
    let dir = tempfile::tempdir().unwrap();
    let s = Shot::new(ShotConfig::default(), Rect::new(0, 0, 200, 100));
    let err = save_section(&s, &screen(), &FontBook::empty(), &dir.path().join("x.png")).unwrap_err();
    assert!(matches!(err, ShotError::NoSelection));
}
