// Author: Dustin Pilgrim
// License: MIT

//! The capture-mode state machine.
//!
//! `Shot` owns the selection, the live pen and the history. Pointer and key
//! events come in through `handle`; everything the outside world has to do in
//! response (repaint, move the toolbar, export) goes out through `emit`.

use eventline::debug;

use crate::config::ShotConfig;
use crate::effect::Effect;
use crate::geometry::{Bounds, Point, PointF, Rect};
use crate::history::History;
use crate::input::{Button, InputEvent, Key, KeyEvent, PointerEvent};
use crate::layout::{self, Placement, INFO_RADIUS};
use crate::mode::Mode;
use crate::pen::{Pen, PenKind, PenStyle, MAX_PEN_SIZE};
use crate::render::{Canvas, DrawCommand};
use crate::section::Section;
use crate::shortcuts::{self, Command};
use crate::zone::{CursorGlyph, CursorZone};
use crate::colour::Colour;

/// Contents of the open text-entry popup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEntry {
    pub at: Point,
    pub buffer: String,
}

#[derive(Debug, Clone)]
pub struct Shot {
    config: ShotConfig,
    screen: Rect,
    mode: Mode,
    section: Section,
    zone: CursorZone,
    move_start: Point,
    move_end: Point,
    pen: Option<Pen>,
    style: PenStyle,
    history: History,
    text_entry: Option<TextEntry>,
    visible: bool,
}

impl Shot {
    pub fn new(config: ShotConfig, screen: Rect) -> Self {
        let section = Section::new(config.section_border, config.section_colour);
        let style = config.pen.clone();
        Self {
            config,
            screen,
            mode: Mode::Normal,
            section,
            zone: CursorZone::Outer,
            move_start: Point::default(),
            move_end: Point::default(),
            pen: None,
            style,
            history: History::new(),
            text_entry: None,
            visible: false,
        }
    }

    pub fn config(&self) -> &ShotConfig {
        &self.config
    }

    pub fn screen(&self) -> Rect {
        self.screen
    }

    pub fn set_screen(&mut self, screen: Rect) {
        self.screen = screen;
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn section(&self) -> &Section {
        &self.section
    }

    pub fn zone(&self) -> CursorZone {
        self.zone
    }

    pub fn pen(&self) -> Option<&Pen> {
        self.pen.as_ref()
    }

    pub fn style(&self) -> &PenStyle {
        &self.style
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn text_entry(&self) -> Option<&TextEntry> {
        self.text_entry.as_ref()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn inner_bounds(&self) -> Bounds {
        self.section.inner(self.screen)
    }

    pub fn has_visible_section(&self) -> bool {
        self.section.is_visible(self.screen)
    }

    /// Screen area that gets exported, or `None` without a visible selection.
    pub fn section_bounds(&self) -> Option<Rect> {
        let inner = self.inner_bounds();
        inner.is_visible().then(|| inner.to_rect())
    }

    // ---------------------------------------------------------------------
    // lifecycle
    // ---------------------------------------------------------------------

    /// Bring the overlay up. `clean` drops the selection and all annotations.
    pub fn show(&mut self, clean: bool, emit: &mut dyn FnMut(Effect)) {
        if clean {
            self.move_end = self.move_start;
            self.section.clear();
            self.pen = None;
            self.history.clear();
            self.text_entry = None;
            self.zone = CursorZone::Outer;
            self.mode = Mode::Normal;
        }
        self.visible = true;
        debug!("show clean={} mode={}", clean, self.mode);

        emit(Effect::Repaint);
        self.show_toolbar(emit);
    }

    pub fn hide(&mut self, emit: &mut dyn FnMut(Effect)) {
        self.close_text_entry(emit);
        self.visible = false;
        emit(Effect::HideToolbar);
        emit(Effect::Hide);
    }

    // ---------------------------------------------------------------------
    // events
    // ---------------------------------------------------------------------

    pub fn handle(&mut self, ev: &InputEvent, emit: &mut dyn FnMut(Effect)) {
        match ev {
            InputEvent::PointerDown(p) => self.on_pointer_down(p, emit),
            InputEvent::PointerMove(p) => self.on_pointer_move(p, emit),
            InputEvent::PointerUp(p) => self.on_pointer_up(p, emit),
            InputEvent::KeyPress(k) => self.on_key(k, emit),
        }
    }

    /// `handle` with the effects collected.
    pub fn dispatch(&mut self, ev: &InputEvent) -> Vec<Effect> {
        let mut out = Vec::new();
        self.handle(ev, &mut |e| out.push(e));
        out
    }

    pub fn on_pointer_down(&mut self, ev: &PointerEvent, emit: &mut dyn FnMut(Effect)) {
        if ev.button != Button::Primary {
            return;
        }

        if ev.double_click {
            if self.has_visible_section() {
                emit(Effect::CopyToClipboard);
                self.hide(emit);
            } else {
                emit(Effect::Quit);
            }
            return;
        }

        let p = self.screen.clamp(ev.point);
        self.move_start = p;
        self.move_end = p;

        match self.mode {
            Mode::Normal => {
                self.zone = self.section.zone_at(p, self.screen, self.config.anchor_border);
                match self.zone {
                    CursorZone::Outer => {
                        self.mode = Mode::Drawing;
                        self.section.start_at(p);
                        emit(Effect::Repaint);
                    }
                    CursorZone::Inner => self.mode = Mode::Moving,
                    _ => self.mode = Mode::Resizing,
                }
                emit(Effect::HideToolbar);
            }
            Mode::Annotating | Mode::AnnotatingText => self.annotate_press(p, emit),
            Mode::Drawing | Mode::Moving | Mode::Resizing | Mode::Frozen => {}
        }
    }

    pub fn on_pointer_move(&mut self, ev: &PointerEvent, emit: &mut dyn FnMut(Effect)) {
        let p = self.screen.clamp(ev.point);

        if ev.button != Button::Primary {
            self.zone = self.section.zone_at(p, self.screen, self.config.anchor_border);
            let glyph = self.refresh_cursor();
            emit(Effect::SetCursor(glyph));
            return;
        }

        match self.mode {
            Mode::Drawing => {
                if p != self.move_end {
                    self.move_end = p;
                    let (s, e) = (self.move_start, self.move_end);
                    self.section.set_corners(s.x, s.y, e.x, e.y);
                }
            }
            Mode::Moving => {
                let (dx, dy) = (p.x - self.move_start.x, p.y - self.move_start.y);
                self.move_section(dx, dy);
            }
            Mode::Resizing => {
                self.zone = self.section.resize(self.zone, p);
                let glyph = self.refresh_cursor();
                emit(Effect::SetCursor(glyph));
            }
            Mode::Annotating => {
                if let Some(pen) = self.pen.as_mut() {
                    if pen.kind() != PenKind::Text {
                        pen.save_track(p);
                    }
                }
            }
            Mode::Normal | Mode::AnnotatingText | Mode::Frozen => {}
        }

        if !matches!(self.mode, Mode::Normal | Mode::Frozen) {
            emit(Effect::Repaint);
        }
    }

    pub fn on_pointer_up(&mut self, ev: &PointerEvent, emit: &mut dyn FnMut(Effect)) {
        if ev.button != Button::Primary {
            return;
        }

        match self.mode {
            mode if mode.is_dragging() => {
                self.mode = Mode::Normal;
                self.show_toolbar(emit);
            }
            Mode::Annotating => {
                let Some(pen) = self.pen.as_mut() else {
                    return;
                };
                if pen.kind() == PenKind::Text {
                    return;
                }
                pen.end = self.screen.clamp(ev.point);
                self.history.push(pen.clone());
                pen.reset();
                debug!("committed {:?}, history={}", self.history.last().map(|p| p.kind()), self.history.len());
                emit(Effect::Repaint);
            }
            _ => {}
        }
    }

    pub fn on_key(&mut self, ev: &KeyEvent, emit: &mut dyn FnMut(Effect)) {
        if self.mode == Mode::AnnotatingText && self.edit_text(ev, emit) {
            return;
        }

        let Some(cmd) = shortcuts::command_for(ev) else {
            return;
        };

        match cmd {
            Command::ToggleSquare => {
                if let Some(pen) = self.pen.as_mut() {
                    pen.square = !pen.square;
                    emit(Effect::Repaint);
                }
            }
            Command::Nudge { dx, dy } => {
                if self.mode == Mode::Frozen {
                    return;
                }
                self.move_section(dx, dy);
                emit(Effect::Repaint);
                self.show_toolbar(emit);
            }
            Command::Grow { dx, dy } => {
                if self.mode == Mode::Frozen || !self.section.grow(dx, dy) {
                    return;
                }
                emit(Effect::Repaint);
                self.show_toolbar(emit);
            }
            Command::SaveToFile => {
                if self.has_visible_section() {
                    emit(Effect::SaveToFile);
                }
            }
            Command::CopyAndHide => {
                if self.has_visible_section() {
                    emit(Effect::CopyToClipboard);
                }
                self.hide(emit);
            }
            Command::SelectAll => {
                if self.mode == Mode::Frozen {
                    return;
                }
                self.section.select_all(self.screen);
                emit(Effect::Repaint);
                self.show_toolbar(emit);
            }
            Command::Undo => self.undo(emit),
            Command::Quit => emit(Effect::Quit),
        }
    }

    fn move_section(&mut self, dx: i32, dy: i32) {
        self.section.translate(dx, dy);
        self.move_start = self.move_start.offset(dx, dy);
        self.move_end = self.move_end.offset(dx, dy);
    }

    /// Cursor glyph for the current zone and mode.
    ///
    /// Frozen with nothing left to undo falls back to Normal, so the user
    /// can adjust the selection again.
    fn refresh_cursor(&mut self) -> CursorGlyph {
        match self.mode {
            Mode::Frozen if self.history.is_empty() => {
                self.mode = Mode::Normal;
                self.zone.glyph()
            }
            Mode::Frozen => CursorGlyph::Default,
            Mode::Annotating | Mode::AnnotatingText => match (&self.pen, self.zone) {
                (Some(pen), CursorZone::Inner) => pen.kind().edit_glyph(),
                _ => CursorGlyph::Default,
            },
            _ => self.zone.glyph(),
        }
    }

    fn show_toolbar(&self, emit: &mut dyn FnMut(Effect)) {
        if let Some(placement) = self.toolbar_placement() {
            emit(Effect::ShowToolbar(placement));
        }
    }

    pub fn toolbar_placement(&self) -> Option<Placement> {
        if !self.has_visible_section() {
            return None;
        }
        Some(layout::place_toolbar(
            self.inner_bounds(),
            self.screen,
            self.reach(),
            self.config.toolbar_size,
            self.config.editor_size,
        ))
    }

    fn reach(&self) -> i32 {
        self.section.border.max(self.config.anchor_border)
    }

    // ---------------------------------------------------------------------
    // tools
    // ---------------------------------------------------------------------

    /// Pick a tool (`Some`) or put the current one down (`None`).
    pub fn select_tool(&mut self, kind: Option<PenKind>, emit: &mut dyn FnMut(Effect)) {
        self.close_text_entry(emit);

        match kind {
            Some(kind) => {
                if !self.has_visible_section() {
                    return;
                }
                self.pen = Some(Pen::with_style(kind, &self.style));
                self.mode = Mode::Annotating;
            }
            None => {
                if self.pen.take().is_some() {
                    self.mode = Mode::Frozen;
                } else if self.mode.is_annotating() {
                    self.mode = Mode::Normal;
                }
            }
        }
        debug!("tool={:?} mode={}", kind, self.mode);

        let glyph = self.refresh_cursor();
        emit(Effect::SetCursor(glyph));
        emit(Effect::Repaint);
    }

    pub fn set_pen_size(&mut self, size: i32) {
        let size = size.clamp(1, MAX_PEN_SIZE);
        self.style.size = size;
        if let Some(pen) = self.pen.as_mut() {
            if pen.kind() != PenKind::Text {
                pen.size = size;
            }
        }
    }

    pub fn set_pen_colour(&mut self, colour: Colour) {
        self.style.colour = colour;
        if let Some(pen) = self.pen.as_mut() {
            pen.colour = colour;
        }
    }

    pub fn set_pen_font(&mut self, font: &str) {
        self.style.font = font.to_string();
        if let Some(pen) = self.pen.as_mut() {
            pen.set_font(font);
        }
    }

    pub fn undo(&mut self, emit: &mut dyn FnMut(Effect)) {
        if self.history.undo().is_some() {
            debug!("undo, history={}", self.history.len());
        }
        emit(Effect::Repaint);
    }

    // ---------------------------------------------------------------------
    // text tool
    // ---------------------------------------------------------------------

    fn annotate_press(&mut self, p: Point, emit: &mut dyn FnMut(Effect)) {
        let inside = self.inner_bounds().contains_strict(p);
        let Some(pen) = self.pen.as_mut() else {
            return;
        };

        if pen.kind() != PenKind::Text {
            pen.begin(p);
            return;
        }

        if !inside {
            self.close_text_entry(emit);
            return;
        }

        let pending = self
            .text_entry
            .as_ref()
            .is_some_and(|t| !t.buffer.is_empty());
        if pending {
            self.commit_text(emit);
            return;
        }

        // Clicking elsewhere inside with an empty popup moves it.
        if self.text_entry.take().is_some() {
            emit(Effect::CloseTextInput);
        }

        pen.begin(p);
        let font = pen.font().unwrap_or(&self.style.font).to_string();
        let colour = pen.colour;
        self.text_entry = Some(TextEntry {
            at: p,
            buffer: String::new(),
        });
        self.mode = Mode::AnnotatingText;
        emit(Effect::OpenTextInput { at: p, font, colour });
    }

    /// Feed typed text into the open popup. Ignored when none is open.
    pub fn insert_text(&mut self, text: &str) {
        if let Some(entry) = self.text_entry.as_mut() {
            entry.buffer.push_str(text);
        }
    }

    /// Enter commits, Escape cancels, Backspace edits. Arrow keys belong to
    /// the popup while it is open. Returns false for keys it does not consume.
    fn edit_text(&mut self, ev: &KeyEvent, emit: &mut dyn FnMut(Effect)) -> bool {
        let Some(entry) = self.text_entry.as_mut() else {
            return false;
        };

        match ev.key {
            Key::Char(c) if !ev.modifiers.ctrl => {
                entry.buffer.push(c);
                true
            }
            Key::Backspace => {
                entry.buffer.pop();
                true
            }
            Key::Enter => {
                self.commit_text(emit);
                true
            }
            Key::Escape => {
                self.close_text_entry(emit);
                true
            }
            Key::Up | Key::Down | Key::Left | Key::Right => true,
            _ => false,
        }
    }

    /// Push the typed text into history as a Text entry and close the popup.
    pub fn commit_text(&mut self, emit: &mut dyn FnMut(Effect)) {
        let text = match self.text_entry.as_ref() {
            Some(entry) if !entry.buffer.is_empty() => entry.buffer.clone(),
            _ => return,
        };
        let Some(pen) = self.pen.as_mut() else {
            return;
        };
        if pen.kind() != PenKind::Text {
            return;
        }

        pen.set_content(Some(text));
        self.history.push(pen.clone());
        pen.set_content(None);
        debug!("committed text, history={}", self.history.len());

        self.close_text_entry(emit);
        emit(Effect::Repaint);
    }

    fn close_text_entry(&mut self, emit: &mut dyn FnMut(Effect)) {
        if self.text_entry.take().is_some() {
            emit(Effect::CloseTextInput);
        }
        if self.mode == Mode::AnnotatingText {
            self.mode = Mode::Annotating;
        }
    }

    // ---------------------------------------------------------------------
    // rendering
    // ---------------------------------------------------------------------

    /// One full frame: screen, section interior, annotations, mask,
    /// border, handles, info label.
    pub fn render(&self, canvas: &mut dyn Canvas) {
        canvas.draw(DrawCommand::PaintScreen);

        if self.section.is_empty() {
            canvas.draw(DrawCommand::FillRect {
                rect: self.screen,
                colour: self.config.mask_fill(),
            });
            return;
        }

        canvas.draw(DrawCommand::ClearRect {
            rect: self.section.rect(),
        });
        self.draw_doodle(canvas);
        self.draw_mask(canvas);

        let c = self.section.corners();
        canvas.draw(DrawCommand::StrokeRect {
            from: PointF::new(c.x0 as f32, c.y0 as f32),
            to: PointF::new(c.x1 as f32, c.y1 as f32),
            width: self.section.border as f32,
            colour: self.section.colour,
        });

        self.draw_anchors(canvas);
        self.draw_info(canvas);
    }

    /// History oldest first, then the live pen on top.
    pub fn draw_doodle(&self, canvas: &mut dyn Canvas) {
        for pen in self.history.iter() {
            pen.draw_track(canvas);
        }
        if let Some(pen) = &self.pen {
            pen.draw_track(canvas);
        }
    }

    /// What gets exported: the screen with annotations, no chrome.
    pub fn render_export(&self, canvas: &mut dyn Canvas) {
        canvas.draw(DrawCommand::PaintScreen);
        self.draw_doodle(canvas);
    }

    fn draw_mask(&self, canvas: &mut dyn Canvas) {
        let s = self.screen;
        let b = self.inner_bounds();
        let colour = self.config.mask_fill();

        let bands = [
            Rect::new(s.x, s.y, s.w, b.y0 - s.y),
            Rect::new(s.x, b.y1, s.w, s.bottom() - b.y1),
            Rect::new(s.x, b.y0, b.x0 - s.x, b.height()),
            Rect::new(b.x1, b.y0, s.right() - b.x1, b.height()),
        ];
        for rect in bands.into_iter().filter(|r| !r.is_empty()) {
            canvas.draw(DrawCommand::FillRect { rect, colour });
        }
    }

    fn draw_anchors(&self, canvas: &mut dyn Canvas) {
        let a = self.config.anchor_border;
        if a <= 0 {
            return;
        }
        let r = a as f32 / 2.0;
        for sq in self.section.anchors(self.screen, a) {
            canvas.draw(DrawCommand::FillCircle {
                centre: PointF::new(sq.x as f32 + r, sq.y as f32 + r),
                radius: r,
                colour: self.section.colour,
            });
        }
    }

    fn draw_info(&self, canvas: &mut dyn Canvas) {
        if self.mode.is_annotating() || self.mode == Mode::Frozen {
            return;
        }
        let inner = self.inner_bounds();
        let rect = layout::info_label_rect(inner, self.screen, self.section.border, self.reach());

        canvas.draw(DrawCommand::FillRoundRect {
            rect,
            radius: INFO_RADIUS as f32,
            colour: self.config.info_fill(),
        });
        canvas.draw(DrawCommand::DrawText {
            origin: PointF::new(
                (rect.x + INFO_RADIUS) as f32,
                rect.y as f32 + INFO_RADIUS as f32 / 3.0,
            ),
            font: self.style.font.clone(),
            text: layout::info_label_text(inner),
            colour: Colour::WHITE,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Modifiers;

    const SCREEN: Rect = Rect::new(0, 0, 1920, 1080);

    fn shot() -> Shot {
        let mut s = Shot::new(ShotConfig::default(), SCREEN);
        s.show(true, &mut |_| {});
        s
    }

    fn drag(s: &mut Shot, from: (i32, i32), to: (i32, i32)) -> Vec<Effect> {
        let mut out = Vec::new();
        out.extend(s.dispatch(&InputEvent::PointerDown(PointerEvent::primary(from.0, from.1))));
        out.extend(s.dispatch(&InputEvent::PointerMove(PointerEvent::primary(to.0, to.1))));
        out.extend(s.dispatch(&InputEvent::PointerUp(PointerEvent::primary(to.0, to.1))));
        out
    }

    fn key(s: &mut Shot, ev: KeyEvent) -> Vec<Effect> {
        s.dispatch(&InputEvent::KeyPress(ev))
    }

    #[test]
    fn drag_out_selection_in_any_direction() {
        for (from, to) in [((100, 100), (400, 300)), ((400, 300), (100, 100)), ((400, 100), (100, 300))] {
            let mut s = shot();
            let effects = drag(&mut s, from, to);
            assert_eq!(s.section().rect(), Rect::new(100, 100, 300, 200));
            assert_eq!(s.mode(), Mode::Normal);
            assert!(effects.iter().any(|e| matches!(e, Effect::ShowToolbar(_))));
        }
    }

    #[test]
    fn press_inside_moves_selection() {
        let mut s = shot();
        drag(&mut s, (100, 100), (400, 300));

        s.dispatch(&InputEvent::PointerDown(PointerEvent::primary(200, 200)));
        assert_eq!(s.mode(), Mode::Moving);
        s.dispatch(&InputEvent::PointerMove(PointerEvent::primary(210, 205)));
        s.dispatch(&InputEvent::PointerMove(PointerEvent::primary(220, 210)));
        s.dispatch(&InputEvent::PointerUp(PointerEvent::primary(220, 210)));

        assert_eq!(s.section().rect(), Rect::new(120, 110, 300, 200));
        assert_eq!(s.mode(), Mode::Normal);
    }

    #[test]
    fn resizing_through_the_opposite_corner_renumbers_zone() {
        let mut s = shot();
        drag(&mut s, (100, 100), (400, 300));

        s.dispatch(&InputEvent::PointerDown(PointerEvent::primary(398, 298)));
        assert_eq!(s.mode(), Mode::Resizing);
        assert_eq!(s.zone(), CursorZone::RightBottom);

        let effects = s.dispatch(&InputEvent::PointerMove(PointerEvent::primary(50, 60)));
        assert_eq!(s.zone(), CursorZone::LeftTop);
        assert!(effects.contains(&Effect::SetCursor(CursorGlyph::TopLeftCorner)));
        assert_eq!(s.section().rect(), Rect::new(50, 60, 50, 40));
    }

    #[test]
    fn hover_updates_zone_and_cursor() {
        let mut s = shot();
        drag(&mut s, (100, 100), (400, 300));
        let effects = s.dispatch(&InputEvent::PointerMove(PointerEvent::hover(250, 200)));
        assert_eq!(s.zone(), CursorZone::Inner);
        assert_eq!(effects, vec![Effect::SetCursor(CursorGlyph::Move)]);
    }

    #[test]
    fn double_click_exports_or_quits() {
        let mut s = shot();
        assert_eq!(s.dispatch(&InputEvent::PointerDown(PointerEvent::double(5, 5))), vec![Effect::Quit]);

        drag(&mut s, (100, 100), (400, 300));
        let effects = s.dispatch(&InputEvent::PointerDown(PointerEvent::double(200, 200)));
        assert_eq!(effects.first(), Some(&Effect::CopyToClipboard));
        assert_eq!(effects.last(), Some(&Effect::Hide));
        assert!(!s.is_visible());
    }

    #[test]
    fn secondary_button_is_ignored() {
        let mut s = shot();
        let mut ev = PointerEvent::primary(10, 10);
        ev.button = Button::Secondary;
        assert!(s.dispatch(&InputEvent::PointerDown(ev)).is_empty());
        assert_eq!(s.mode(), Mode::Normal);
    }

    #[test]
    fn arrows_nudge_and_ctrl_arrows_grow() {
        let mut s = shot();
        drag(&mut s, (100, 100), (400, 300));

        key(&mut s, KeyEvent::plain(Key::Right));
        key(&mut s, KeyEvent::plain(Key::Up));
        assert_eq!(s.section().rect(), Rect::new(101, 99, 300, 200));

        key(&mut s, KeyEvent::ctrl(Key::Left));
        key(&mut s, KeyEvent::ctrl(Key::Down));
        assert_eq!(s.section().rect(), Rect::new(101, 99, 299, 201));
    }

    #[test]
    fn ctrl_a_selects_whole_screen() {
        let mut s = shot();
        key(&mut s, KeyEvent::ctrl(Key::Char('a')));
        assert_eq!(s.section_bounds(), Some(SCREEN));
    }

    #[test]
    fn save_needs_visible_selection() {
        let mut s = shot();
        assert!(key(&mut s, KeyEvent::ctrl(Key::Char('s'))).is_empty());
        drag(&mut s, (100, 100), (400, 300));
        assert_eq!(key(&mut s, KeyEvent::ctrl(Key::Char('s'))), vec![Effect::SaveToFile]);
    }

    #[test]
    fn ctrl_toggles_square_on_live_pen() {
        let mut s = shot();
        drag(&mut s, (100, 100), (400, 300));
        s.select_tool(Some(PenKind::Ellipse), &mut |_| {});
        key(
            &mut s,
            KeyEvent {
                key: Key::Control,
                modifiers: Modifiers::CTRL,
            },
        );
        assert!(s.pen().is_some_and(|p| p.square));
    }

    #[test]
    fn tool_needs_visible_selection() {
        let mut s = shot();
        s.select_tool(Some(PenKind::Rectangle), &mut |_| {});
        assert!(s.pen().is_none());
        assert_eq!(s.mode(), Mode::Normal);
    }

    #[test]
    fn deselecting_tool_freezes_until_history_is_empty() {
        let mut s = shot();
        drag(&mut s, (100, 100), (400, 300));
        s.select_tool(Some(PenKind::Arrow), &mut |_| {});
        drag(&mut s, (150, 150), (300, 250));
        s.select_tool(None, &mut |_| {});
        assert_eq!(s.mode(), Mode::Frozen);

        // frozen ignores nudges and reports the default cursor
        key(&mut s, KeyEvent::plain(Key::Left));
        assert_eq!(s.section().rect(), Rect::new(100, 100, 300, 200));
        let effects = s.dispatch(&InputEvent::PointerMove(PointerEvent::hover(250, 200)));
        assert_eq!(effects, vec![Effect::SetCursor(CursorGlyph::Default)]);

        key(&mut s, KeyEvent::ctrl(Key::Char('z')));
        s.dispatch(&InputEvent::PointerMove(PointerEvent::hover(250, 200)));
        assert_eq!(s.mode(), Mode::Normal);
    }

    #[test]
    fn annotating_cursor_uses_tool_glyph_inside() {
        let mut s = shot();
        drag(&mut s, (100, 100), (400, 300));
        s.select_tool(Some(PenKind::Line), &mut |_| {});
        let inside = s.dispatch(&InputEvent::PointerMove(PointerEvent::hover(250, 200)));
        assert_eq!(inside, vec![Effect::SetCursor(CursorGlyph::Pencil)]);
        let outside = s.dispatch(&InputEvent::PointerMove(PointerEvent::hover(900, 900)));
        assert_eq!(outside, vec![Effect::SetCursor(CursorGlyph::Default)]);
    }

    #[test]
    fn escape_closes_text_popup_without_commit() {
        let mut s = shot();
        drag(&mut s, (100, 100), (400, 300));
        s.select_tool(Some(PenKind::Text), &mut |_| {});
        s.dispatch(&InputEvent::PointerDown(PointerEvent::primary(200, 200)));
        key(&mut s, KeyEvent::plain(Key::Char('x')));

        let effects = key(&mut s, KeyEvent::plain(Key::Escape));
        assert_eq!(effects, vec![Effect::CloseTextInput]);
        assert!(s.history().is_empty());
        assert_eq!(s.mode(), Mode::Annotating);
    }

    #[test]
    fn click_outside_closes_text_popup() {
        let mut s = shot();
        drag(&mut s, (100, 100), (400, 300));
        s.select_tool(Some(PenKind::Text), &mut |_| {});
        s.dispatch(&InputEvent::PointerDown(PointerEvent::primary(200, 200)));
        assert_eq!(s.mode(), Mode::AnnotatingText);

        let effects = s.dispatch(&InputEvent::PointerDown(PointerEvent::primary(800, 800)));
        assert_eq!(effects, vec![Effect::CloseTextInput]);
        assert!(s.text_entry().is_none());
    }

    #[test]
    fn second_click_with_empty_popup_moves_it() {
        let mut s = shot();
        drag(&mut s, (100, 100), (400, 300));
        s.select_tool(Some(PenKind::Text), &mut |_| {});
        s.dispatch(&InputEvent::PointerDown(PointerEvent::primary(200, 200)));

        let effects = s.dispatch(&InputEvent::PointerDown(PointerEvent::primary(250, 260)));
        assert_eq!(effects.len(), 2);
        assert_eq!(effects[0], Effect::CloseTextInput);
        assert!(matches!(effects[1], Effect::OpenTextInput { at, .. } if at == Point::new(250, 260)));
        assert_eq!(s.text_entry().map(|t| t.at), Some(Point::new(250, 260)));
        assert_eq!(s.mode(), Mode::AnnotatingText);
    }

    #[test]
    fn arrow_keys_stay_in_text_popup() {
        let mut s = shot();
        drag(&mut s, (100, 100), (400, 300));
        s.select_tool(Some(PenKind::Text), &mut |_| {});
        s.dispatch(&InputEvent::PointerDown(PointerEvent::primary(200, 200)));

        for ev in [KeyEvent::plain(Key::Left), KeyEvent::ctrl(Key::Down)] {
            assert!(key(&mut s, ev).is_empty());
        }
        assert_eq!(s.section().rect(), Rect::new(100, 100, 300, 200));
        assert_eq!(s.mode(), Mode::AnnotatingText);
    }

    #[test]
    fn pen_size_is_capped() {
        let mut s = shot();
        s.set_pen_size(i32::MAX);
        assert_eq!(s.style().size, MAX_PEN_SIZE);
        s.set_pen_size(-5);
        assert_eq!(s.style().size, 1);
    }

    #[test]
    fn frame_order_is_screen_interior_doodle_mask_border_handles() {
        let mut s = shot();
        drag(&mut s, (100, 100), (400, 300));
        s.select_tool(Some(PenKind::Rectangle), &mut |_| {});
        s.dispatch(&InputEvent::PointerDown(PointerEvent::primary(150, 150)));
        s.dispatch(&InputEvent::PointerMove(PointerEvent::primary(200, 200)));

        let mut cmds: Vec<DrawCommand> = Vec::new();
        s.render(&mut cmds);

        assert_eq!(cmds[0], DrawCommand::PaintScreen);
        assert_eq!(cmds[1], DrawCommand::ClearRect { rect: Rect::new(100, 100, 300, 200) });
        assert!(matches!(cmds[2], DrawCommand::StrokeRect { width, .. } if width == 2.0));
        assert!(cmds[3..7].iter().all(|c| matches!(c, DrawCommand::FillRect { .. })));
        assert!(matches!(cmds[7], DrawCommand::StrokeRect { .. }));
        assert!(cmds[8..16].iter().all(|c| matches!(c, DrawCommand::FillCircle { .. })));
        // annotating: no info label
        assert_eq!(cmds.len(), 16);
    }

    #[test]
    fn empty_section_renders_only_mask() {
        let s = shot();
        let mut cmds: Vec<DrawCommand> = Vec::new();
        s.render(&mut cmds);
        assert_eq!(cmds.len(), 2);
        assert!(matches!(cmds[1], DrawCommand::FillRect { rect, .. } if rect == SCREEN));
    }

    #[test]
    fn show_clean_drops_everything() {
        let mut s = shot();
        drag(&mut s, (100, 100), (400, 300));
        s.select_tool(Some(PenKind::Rectangle), &mut |_| {});
        drag(&mut s, (150, 150), (300, 250));
        s.hide(&mut |_| {});

        s.show(false, &mut |_| {});
        assert_eq!(s.history().len(), 1);

        s.show(true, &mut |_| {});
        assert!(s.history().is_empty());
        assert!(s.section().is_empty());
        assert!(s.pen().is_none());
        assert_eq!(s.mode(), Mode::Normal);
    }
}
