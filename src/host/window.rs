//! winit window host
//!
//! Opens a single window and pumps the winit event loop without blocking
//! (`EventLoopExtPumpEvents`), so the stage keeps control of its own loop.
//! Window events are translated into [`crate::core::Event`]; anything without
//! a counterpart (redraw requests, IME, touch, ...) is dropped here.
//!
//! winit only allows one event loop per process, created on the main thread.

use std::time::Duration;

use tracing::{debug, info, trace};
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, Event as WinitEvent, WindowEvent};
use winit::event_loop::EventLoop;
use winit::keyboard::{KeyCode, NativeKeyCode, PhysicalKey};
use winit::platform::pump_events::{EventLoopExtPumpEvents, PumpStatus};
use winit::window::{Fullscreen, Window, WindowBuilder};

use super::Host;
use crate::core::{
    DisplayFlags, Event, FocusEvent, FocusState, GameError, Key, KeyEvent, KeyboardState,
    MouseButton, MouseButtonEvent, MouseButtons, MouseMoveEvent, PointerState, ResizeEvent,
    Result, WindowConfig,
};
use crate::math::{Offset, Point};

/// Host backed by a real winit window
pub struct WinitHost {
    event_loop: EventLoop<()>,
    window: Window,
    devices: DeviceState,
    exited: bool,
}

impl WinitHost {
    /// Create the event loop and the window
    ///
    /// Returns `GameError::Initialization` if the display cannot be opened.
    pub fn open(config: &WindowConfig) -> Result<Self> {
        config
            .validate()
            .map_err(|e| GameError::Initialization(e.to_string()))?;

        let event_loop = EventLoop::new().map_err(|e| {
            GameError::Initialization(format!("Failed to create event loop: {}", e))
        })?;

        let flags = config.flags;
        let mut builder = WindowBuilder::new()
            .with_title(config.title.clone())
            .with_inner_size(PhysicalSize::new(config.width, config.height))
            .with_resizable(flags.contains(DisplayFlags::RESIZABLE))
            .with_decorations(!flags.contains(DisplayFlags::NOFRAME));

        if flags.contains(DisplayFlags::FULLSCREEN) {
            builder = builder.with_fullscreen(Some(Fullscreen::Borderless(None)));
        }

        let window = builder.build(&event_loop).map_err(|e| {
            GameError::Initialization(format!("Failed to create window: {}", e))
        })?;

        let hints = flags & (DisplayFlags::DOUBLEBUF | DisplayFlags::HWSURFACE | DisplayFlags::OPENGL);
        if !hints.is_empty() || config.depth != 0 {
            debug!(
                hints = ?hints,
                depth = config.depth,
                "Display hints recorded, not applied"
            );
        }

        info!(
            width = config.width,
            height = config.height,
            title = %config.title,
            "Window created"
        );

        Ok(Self {
            event_loop,
            window,
            devices: DeviceState::default(),
            exited: false,
        })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }
}

impl Host for WinitHost {
    type Surface = Window;

    fn poll_events(&mut self, out: &mut Vec<Event>) -> Result<()> {
        if self.exited {
            return Ok(());
        }

        let window_id = self.window.id();
        let devices = &mut self.devices;
        let status = self
            .event_loop
            .pump_events(Some(Duration::ZERO), |event, _target| {
                if let WinitEvent::WindowEvent { window_id: id, event } = event {
                    if id == window_id {
                        devices.translate(event, out);
                    }
                }
            });

        if let PumpStatus::Exit(code) = status {
            debug!(code, "Event loop exited");
            self.exited = true;
            if !out.iter().any(|e| matches!(e, Event::Quit)) {
                out.push(Event::Quit);
            }
        }

        Ok(())
    }

    fn keyboard(&self) -> KeyboardState {
        self.devices.keyboard.clone()
    }

    fn pointer(&mut self) -> PointerState {
        self.devices.take_pointer()
    }

    fn surface(&self) -> &Window {
        &self.window
    }

    fn surface_mut(&mut self) -> &mut Window {
        &mut self.window
    }

    fn backend_name(&self) -> &str {
        "winit"
    }
}

/// Keyboard and pointer state rebuilt from the window's event stream
#[derive(Debug, Default)]
struct DeviceState {
    keyboard: KeyboardState,
    pointer_pos: Option<Point>,
    pointer_rel: Offset,
    buttons: MouseButtons,
}

impl DeviceState {
    fn translate(&mut self, event: WindowEvent, out: &mut Vec<Event>) {
        match event {
            WindowEvent::CloseRequested => out.push(Event::Quit),
            WindowEvent::Focused(gain) => {
                if !gain {
                    // releases are not reported while unfocused
                    self.keyboard.clear();
                }
                out.push(Event::Focus(FocusEvent::new(gain, FocusState::Input)));
            }
            WindowEvent::CursorEntered { .. } => {
                out.push(Event::Focus(FocusEvent::new(true, FocusState::Mouse)));
            }
            WindowEvent::CursorLeft { .. } => {
                out.push(Event::Focus(FocusEvent::new(false, FocusState::Mouse)));
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if event.repeat {
                    return;
                }
                let key = key_from_physical(event.physical_key);
                match event.state {
                    ElementState::Pressed => {
                        self.keyboard.set(key, true);
                        let mut key_event = KeyEvent::new(key, self.keyboard.modifiers());
                        key_event.text = event.text.map(|t| t.to_string());
                        out.push(Event::KeyDown(key_event));
                    }
                    ElementState::Released => {
                        self.keyboard.set(key, false);
                        out.push(Event::KeyUp(KeyEvent::new(key, self.keyboard.modifiers())));
                    }
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                let pos = Point::new(position.x.round() as i32, position.y.round() as i32);
                let rel = match self.pointer_pos {
                    Some(last) => pos - last,
                    None => Offset::zeros(),
                };
                self.pointer_pos = Some(pos);
                self.pointer_rel += rel;
                out.push(Event::MouseMove(MouseMoveEvent::new(pos, rel, self.buttons)));
            }
            WindowEvent::MouseInput { state, button, .. } => {
                let button = button_from_winit(button);
                let pos = self.pointer_pos.unwrap_or_else(Point::origin);
                match state {
                    ElementState::Pressed => {
                        self.buttons.set(button, true);
                        out.push(Event::MouseDown(MouseButtonEvent::new(pos, button)));
                    }
                    ElementState::Released => {
                        self.buttons.set(button, false);
                        out.push(Event::MouseUp(MouseButtonEvent::new(pos, button)));
                    }
                }
            }
            WindowEvent::Resized(size) => {
                out.push(Event::Resize(ResizeEvent::new(size.width, size.height)));
            }
            other => trace!(event = ?other, "Ignored window event"),
        }
    }

    fn take_pointer(&mut self) -> PointerState {
        PointerState {
            pos: self.pointer_pos.unwrap_or_else(Point::origin),
            rel: std::mem::replace(&mut self.pointer_rel, Offset::zeros()),
            buttons: self.buttons,
        }
    }
}

fn button_from_winit(button: winit::event::MouseButton) -> MouseButton {
    match button {
        winit::event::MouseButton::Left => MouseButton::Left,
        winit::event::MouseButton::Right => MouseButton::Right,
        winit::event::MouseButton::Middle => MouseButton::Middle,
        winit::event::MouseButton::Back => MouseButton::Back,
        winit::event::MouseButton::Forward => MouseButton::Forward,
        winit::event::MouseButton::Other(n) => MouseButton::Other(n),
    }
}

fn key_from_physical(key: PhysicalKey) -> Key {
    match key {
        PhysicalKey::Code(code) => key_from_code(code),
        PhysicalKey::Unidentified(native) => match native {
            NativeKeyCode::Android(code) | NativeKeyCode::Xkb(code) => Key::Other(code),
            NativeKeyCode::MacOS(code) | NativeKeyCode::Windows(code) => Key::Other(code as u32),
            _ => Key::Unknown,
        },
    }
}

/// Map a winit physical key code to [`Key`]
pub fn key_from_code(code: KeyCode) -> Key {
    match code {
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Tab => Key::Tab,
        KeyCode::NumpadClear => Key::Clear,
        KeyCode::Enter => Key::Return,
        KeyCode::Pause => Key::Pause,
        KeyCode::Escape => Key::Escape,
        KeyCode::Space => Key::Space,
        KeyCode::Delete => Key::Delete,
        KeyCode::Insert => Key::Insert,
        KeyCode::Home => Key::Home,
        KeyCode::End => Key::End,
        KeyCode::PageUp => Key::PageUp,
        KeyCode::PageDown => Key::PageDown,

        KeyCode::Quote => Key::Quote,
        KeyCode::Comma => Key::Comma,
        KeyCode::Minus => Key::Minus,
        KeyCode::Period => Key::Period,
        KeyCode::Slash => Key::Slash,
        KeyCode::Semicolon => Key::Semicolon,
        KeyCode::Equal => Key::Equals,
        KeyCode::BracketLeft => Key::LeftBracket,
        KeyCode::Backslash => Key::Backslash,
        KeyCode::BracketRight => Key::RightBracket,
        KeyCode::Backquote => Key::Backquote,

        KeyCode::Digit0 => Key::Num0,
        KeyCode::Digit1 => Key::Num1,
        KeyCode::Digit2 => Key::Num2,
        KeyCode::Digit3 => Key::Num3,
        KeyCode::Digit4 => Key::Num4,
        KeyCode::Digit5 => Key::Num5,
        KeyCode::Digit6 => Key::Num6,
        KeyCode::Digit7 => Key::Num7,
        KeyCode::Digit8 => Key::Num8,
        KeyCode::Digit9 => Key::Num9,

        KeyCode::KeyA => Key::A,
        KeyCode::KeyB => Key::B,
        KeyCode::KeyC => Key::C,
        KeyCode::KeyD => Key::D,
        KeyCode::KeyE => Key::E,
        KeyCode::KeyF => Key::F,
        KeyCode::KeyG => Key::G,
        KeyCode::KeyH => Key::H,
        KeyCode::KeyI => Key::I,
        KeyCode::KeyJ => Key::J,
        KeyCode::KeyK => Key::K,
        KeyCode::KeyL => Key::L,
        KeyCode::KeyM => Key::M,
        KeyCode::KeyN => Key::N,
        KeyCode::KeyO => Key::O,
        KeyCode::KeyP => Key::P,
        KeyCode::KeyQ => Key::Q,
        KeyCode::KeyR => Key::R,
        KeyCode::KeyS => Key::S,
        KeyCode::KeyT => Key::T,
        KeyCode::KeyU => Key::U,
        KeyCode::KeyV => Key::V,
        KeyCode::KeyW => Key::W,
        KeyCode::KeyX => Key::X,
        KeyCode::KeyY => Key::Y,
        KeyCode::KeyZ => Key::Z,

        KeyCode::Numpad0 => Key::Kp0,
        KeyCode::Numpad1 => Key::Kp1,
        KeyCode::Numpad2 => Key::Kp2,
        KeyCode::Numpad3 => Key::Kp3,
        KeyCode::Numpad4 => Key::Kp4,
        KeyCode::Numpad5 => Key::Kp5,
        KeyCode::Numpad6 => Key::Kp6,
        KeyCode::Numpad7 => Key::Kp7,
        KeyCode::Numpad8 => Key::Kp8,
        KeyCode::Numpad9 => Key::Kp9,
        KeyCode::NumpadDecimal => Key::KpPeriod,
        KeyCode::NumpadDivide => Key::KpDivide,
        KeyCode::NumpadMultiply => Key::KpMultiply,
        KeyCode::NumpadSubtract => Key::KpMinus,
        KeyCode::NumpadAdd => Key::KpPlus,
        KeyCode::NumpadEnter => Key::KpEnter,
        KeyCode::NumpadEqual => Key::KpEquals,

        KeyCode::ArrowUp => Key::Up,
        KeyCode::ArrowDown => Key::Down,
        KeyCode::ArrowRight => Key::Right,
        KeyCode::ArrowLeft => Key::Left,

        KeyCode::F1 => Key::F1,
        KeyCode::F2 => Key::F2,
        KeyCode::F3 => Key::F3,
        KeyCode::F4 => Key::F4,
        KeyCode::F5 => Key::F5,
        KeyCode::F6 => Key::F6,
        KeyCode::F7 => Key::F7,
        KeyCode::F8 => Key::F8,
        KeyCode::F9 => Key::F9,
        KeyCode::F10 => Key::F10,
        KeyCode::F11 => Key::F11,
        KeyCode::F12 => Key::F12,
        KeyCode::F13 => Key::F13,
        KeyCode::F14 => Key::F14,
        KeyCode::F15 => Key::F15,

        KeyCode::NumLock => Key::NumLock,
        KeyCode::CapsLock => Key::CapsLock,
        KeyCode::ScrollLock => Key::ScrollLock,

        KeyCode::ShiftLeft => Key::LShift,
        KeyCode::ShiftRight => Key::RShift,
        KeyCode::ControlLeft => Key::LCtrl,
        KeyCode::ControlRight => Key::RCtrl,
        KeyCode::AltLeft => Key::LAlt,
        KeyCode::AltRight => Key::RAlt,
        KeyCode::SuperLeft => Key::LSuper,
        KeyCode::SuperRight => Key::RSuper,

        KeyCode::Help => Key::Help,
        KeyCode::PrintScreen => Key::Print,
        KeyCode::ContextMenu => Key::Menu,
        KeyCode::Power => Key::Power,

        _ => Key::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::KeyMods;
    use crate::math::point;
    use winit::dpi::PhysicalPosition;
    use winit::event::DeviceId;

    fn device() -> DeviceId {
        // SAFETY: only used as an opaque tag in synthetic events
        unsafe { DeviceId::dummy() }
    }

    #[test]
    fn test_key_mapping() {
        assert_eq!(key_from_code(KeyCode::KeyW), Key::W);
        assert_eq!(key_from_code(KeyCode::Digit7), Key::Num7);
        assert_eq!(key_from_code(KeyCode::NumpadEnter), Key::KpEnter);
        assert_eq!(key_from_code(KeyCode::SuperLeft), Key::LSuper);
        assert_eq!(key_from_code(KeyCode::F24), Key::Unknown);
        assert_eq!(
            key_from_physical(PhysicalKey::Unidentified(NativeKeyCode::Xkb(42))),
            Key::Other(42)
        );
    }

    #[test]
    fn test_cursor_motion() {
        let mut devices = DeviceState::default();
        let mut out = Vec::new();

        for (x, y) in [(10.0, 10.0), (13.4, 8.0)] {
            devices.translate(
                WindowEvent::CursorMoved {
                    device_id: device(),
                    position: PhysicalPosition::new(x, y),
                },
                &mut out,
            );
        }

        // first sample has no previous position to measure from
        assert_eq!(
            out[0],
            Event::MouseMove(MouseMoveEvent::new(point(10, 10), Offset::zeros(), MouseButtons::default()))
        );
        assert_eq!(
            out[1],
            Event::MouseMove(MouseMoveEvent::new(point(13, 8), Offset::new(3, -2), MouseButtons::default()))
        );

        let pointer = devices.take_pointer();
        assert_eq!(pointer.pos, point(13, 8));
        assert_eq!(pointer.rel, Offset::new(3, -2));
        assert_eq!(devices.take_pointer().rel, Offset::zeros());
    }

    #[test]
    fn test_mouse_buttons_and_window_events() {
        let mut devices = DeviceState::default();
        let mut out = Vec::new();

        devices.translate(
            WindowEvent::MouseInput {
                device_id: device(),
                state: ElementState::Pressed,
                button: winit::event::MouseButton::Left,
            },
            &mut out,
        );
        assert!(devices.buttons.left);

        devices.translate(WindowEvent::Resized(PhysicalSize::new(800, 600)), &mut out);
        devices.translate(WindowEvent::Focused(false), &mut out);
        devices.translate(WindowEvent::CloseRequested, &mut out);

        assert_eq!(
            out,
            vec![
                Event::MouseDown(MouseButtonEvent::new(point(0, 0), MouseButton::Left)),
                Event::Resize(ResizeEvent::new(800, 600)),
                Event::Focus(FocusEvent::new(false, FocusState::Input)),
                Event::Quit,
            ]
        );
    }

    #[test]
    fn test_focus_loss_releases_keys() {
        let mut devices = DeviceState::default();
        devices.keyboard.set(Key::LShift, true);
        devices.translate(WindowEvent::Focused(false), &mut Vec::new());
        assert_eq!(devices.keyboard.modifiers(), KeyMods::empty());
    }
}
