//! Scripted host with no window
//!
//! Events are queued from code and handed to the stage on the next poll, in
//! the order they were queued. Device state (held keys, pointer position and
//! buttons) changes only when an event is drained, the same way a real window
//! system reports it.
//!
//! ```
//! use gametails::core::MouseButton;
//! use gametails::host::HeadlessHost;
//! use gametails::math::point;
//!
//! let mut host = HeadlessHost::new(400, 300);
//! host.move_mouse(point(20, 20))
//!     .press_mouse(MouseButton::Left)
//!     .release_mouse(MouseButton::Left)
//!     .quit();
//! assert_eq!(host.pending(), 4);
//! ```

use std::collections::VecDeque;

use tracing::debug;

use super::Host;
use crate::core::{
    Event, GameError, Key, KeyEvent, KeyboardState, MouseButton, MouseButtonEvent, MouseButtons,
    MouseMoveEvent, PointerState, ResizeEvent, Result, WindowConfig,
};
use crate::math::{Color, Offset, Point, Size};

/// In-memory drawable surface
///
/// Only tracks its size and the last fill colour; there is no pixel storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    size: Size,
    fill: Color,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            size: Size::new(width, height),
            fill: Color::BLACK,
        }
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn fill(&mut self, color: Color) {
        self.fill = color;
    }

    pub fn fill_color(&self) -> Color {
        self.fill
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.size = Size::new(width, height);
    }
}

/// Host whose events are injected by the caller
#[derive(Debug)]
pub struct HeadlessHost {
    canvas: Canvas,
    queue: VecDeque<Event>,

    // state seen by the stage, updated as events drain
    keyboard: KeyboardState,
    pointer_pos: Point,
    pointer_rel: Offset,
    buttons: MouseButtons,

    // state at the tail of the queue, used to build scripted events
    script_keys: KeyboardState,
    script_pos: Point,
    script_buttons: MouseButtons,
}

impl HeadlessHost {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            canvas: Canvas::new(width, height),
            queue: VecDeque::new(),
            keyboard: KeyboardState::new(),
            pointer_pos: Point::origin(),
            pointer_rel: Offset::zeros(),
            buttons: MouseButtons::default(),
            script_keys: KeyboardState::new(),
            script_pos: Point::origin(),
            script_buttons: MouseButtons::default(),
        }
    }

    /// Create a host sized by a window configuration
    ///
    /// Fails the same way a real display would for an invalid configuration.
    pub fn open(config: &WindowConfig) -> Result<Self> {
        config
            .validate()
            .map_err(|e| GameError::Initialization(e.to_string()))?;
        debug!(
            width = config.width,
            height = config.height,
            title = %config.title,
            "Headless host opened"
        );
        Ok(Self::new(config.width, config.height))
    }

    /// Queue a raw event
    pub fn push(&mut self, event: Event) -> &mut Self {
        match &event {
            Event::KeyDown(e) => self.script_keys.set(e.key, true),
            Event::KeyUp(e) => self.script_keys.set(e.key, false),
            Event::MouseMove(e) => self.script_pos = e.pos,
            Event::MouseDown(e) => {
                self.script_pos = e.pos;
                self.script_buttons.set(e.button, true);
            }
            Event::MouseUp(e) => {
                self.script_pos = e.pos;
                self.script_buttons.set(e.button, false);
            }
            _ => {}
        }
        self.queue.push_back(event);
        self
    }

    /// Queue a pointer move to `pos`, with `rel` measured from the previous
    /// scripted position
    pub fn move_mouse(&mut self, pos: Point) -> &mut Self {
        let rel = pos - self.script_pos;
        let buttons = self.script_buttons;
        self.push(Event::MouseMove(MouseMoveEvent::new(pos, rel, buttons)))
    }

    /// Queue a button press at the current scripted position
    pub fn press_mouse(&mut self, button: MouseButton) -> &mut Self {
        let pos = self.script_pos;
        self.push(Event::MouseDown(MouseButtonEvent::new(pos, button)))
    }

    /// Queue a button release at the current scripted position
    pub fn release_mouse(&mut self, button: MouseButton) -> &mut Self {
        let pos = self.script_pos;
        self.push(Event::MouseUp(MouseButtonEvent::new(pos, button)))
    }

    pub fn press_key(&mut self, key: Key) -> &mut Self {
        let mut keys = self.script_keys.clone();
        keys.set(key, true);
        let modifiers = keys.modifiers();
        self.push(Event::KeyDown(KeyEvent::new(key, modifiers)))
    }

    pub fn release_key(&mut self, key: Key) -> &mut Self {
        let modifiers = self.script_keys.modifiers();
        self.push(Event::KeyUp(KeyEvent::new(key, modifiers)))
    }

    pub fn resize(&mut self, width: u32, height: u32) -> &mut Self {
        self.push(Event::Resize(ResizeEvent::new(width, height)))
    }

    pub fn quit(&mut self) -> &mut Self {
        self.push(Event::Quit)
    }

    /// Number of queued events not yet polled
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    fn apply(&mut self, event: &Event) {
        match event {
            Event::KeyDown(e) => self.keyboard.set(e.key, true),
            Event::KeyUp(e) => self.keyboard.set(e.key, false),
            Event::MouseMove(e) => {
                self.pointer_rel += e.pos - self.pointer_pos;
                self.pointer_pos = e.pos;
            }
            Event::MouseDown(e) => self.buttons.set(e.button, true),
            Event::MouseUp(e) => self.buttons.set(e.button, false),
            Event::Resize(e) => self.canvas.resize(e.width, e.height),
            Event::Quit | Event::Focus(_) => {}
        }
    }
}

impl Host for HeadlessHost {
    type Surface = Canvas;

    fn poll_events(&mut self, out: &mut Vec<Event>) -> Result<()> {
        while let Some(event) = self.queue.pop_front() {
            self.apply(&event);
            out.push(event);
        }
        Ok(())
    }

    fn keyboard(&self) -> KeyboardState {
        self.keyboard.clone()
    }

    fn pointer(&mut self) -> PointerState {
        let rel = std::mem::replace(&mut self.pointer_rel, Offset::zeros());
        PointerState {
            pos: self.pointer_pos,
            rel,
            buttons: self.buttons,
        }
    }

    fn surface(&self) -> &Canvas {
        &self.canvas
    }

    fn surface_mut(&mut self) -> &mut Canvas {
        &mut self.canvas
    }

    fn backend_name(&self) -> &str {
        "headless"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::KeyMods;
    use crate::math::point;

    #[test]
    fn test_poll_drains_in_order() {
        let mut host = HeadlessHost::new(100, 100);
        host.move_mouse(point(5, 5)).quit();

        let mut events = Vec::new();
        host.poll_events(&mut events).unwrap();
        assert_eq!(events.len(), 2);
        assert!(matches!(events[0], Event::MouseMove(_)));
        assert_eq!(events[1], Event::Quit);
        assert_eq!(host.pending(), 0);
    }

    #[test]
    fn test_device_state_follows_drain() {
        let mut host = HeadlessHost::new(100, 100);
        host.press_key(Key::LCtrl).press_key(Key::C);

        // nothing polled yet
        assert!(!host.keyboard().is_down(Key::C));

        let mut events = Vec::new();
        host.poll_events(&mut events).unwrap();
        assert!(host.keyboard().is_down(Key::C));
        assert_eq!(host.keyboard().modifiers(), KeyMods::LCTRL);

        match &events[1] {
            Event::KeyDown(e) => assert_eq!(e.modifiers, KeyMods::LCTRL),
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[test]
    fn test_pointer_rel_resets() {
        let mut host = HeadlessHost::new(100, 100);
        host.move_mouse(point(10, 0)).move_mouse(point(15, 5));

        let mut events = Vec::new();
        host.poll_events(&mut events).unwrap();

        match &events[1] {
            Event::MouseMove(e) => assert_eq!(e.rel, Offset::new(5, 5)),
            other => panic!("unexpected event {:?}", other),
        }

        let pointer = host.pointer();
        assert_eq!(pointer.pos, point(15, 5));
        assert_eq!(pointer.rel, Offset::new(15, 5));
        assert_eq!(host.pointer().rel, Offset::zeros());
    }

    #[test]
    fn test_buttons_and_resize() {
        let mut host = HeadlessHost::new(100, 100);
        host.press_mouse(MouseButton::Left).resize(300, 200);

        let mut events = Vec::new();
        host.poll_events(&mut events).unwrap();
        assert!(host.pointer().buttons.left);
        assert_eq!(host.surface().size(), Size::new(300, 200));
    }

    #[test]
    fn test_open_rejects_empty_window() {
        let config = WindowConfig::new((0, 300), "broken");
        let err = HeadlessHost::open(&config).unwrap_err();
        assert!(matches!(err, GameError::Initialization(_)));
    }
}
