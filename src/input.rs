//! Browser-agnostic input events. The web layer translates DOM events into
//! these so the games never see `web_sys` types.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
}

impl Key {
    /// Map a `KeyboardEvent.key` value; anything but the arrows is ignored.
    pub fn from_dom(key: &str) -> Option<Key> {
        match key {
            "ArrowUp" => Some(Key::Up),
            "ArrowDown" => Some(Key::Down),
            "ArrowLeft" => Some(Key::Left),
            "ArrowRight" => Some(Key::Right),
            _ => None,
        }
    }
}

/// Pointer coordinates are canvas-local pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    KeyDown(Key),
    KeyUp(Key),
    Click { x: f64, y: f64 },
    PointerDown { x: f64, y: f64 },
    PointerMove { x: f64, y: f64 },
    PointerUp { x: f64, y: f64 },
}

/// Where a listener is attached.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Target {
    Document,
    Canvas,
}

/// DOM event type a session subscribes to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventType {
    KeyDown,
    KeyUp,
    Click,
    MouseDown,
    MouseMove,
    MouseUp,
}

impl EventType {
    pub fn dom_name(self) -> &'static str {
        match self {
            EventType::KeyDown => "keydown",
            EventType::KeyUp => "keyup",
            EventType::Click => "click",
            EventType::MouseDown => "mousedown",
            EventType::MouseMove => "mousemove",
            EventType::MouseUp => "mouseup",
        }
    }

    pub fn is_keyboard(self) -> bool {
        matches!(self, EventType::KeyDown | EventType::KeyUp)
    }
}

/// One listener a session needs registered while it is active.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Binding {
    pub target: Target,
    pub event: EventType,
}

impl Binding {
    pub const fn new(target: Target, event: EventType) -> Self {
        Self { target, event }
    }

    /// Build the game-level event for a key press/release on this binding.
    pub fn key_event(&self, key: &str) -> Option<InputEvent> {
        let key = Key::from_dom(key)?;
        match self.event {
            EventType::KeyDown => Some(InputEvent::KeyDown(key)),
            EventType::KeyUp => Some(InputEvent::KeyUp(key)),
            _ => None,
        }
    }

    /// Build the game-level event for a pointer event on this binding.
    pub fn pointer_event(&self, x: f64, y: f64) -> Option<InputEvent> {
        match self.event {
            EventType::Click => Some(InputEvent::Click { x, y }),
            EventType::MouseDown => Some(InputEvent::PointerDown { x, y }),
            EventType::MouseMove => Some(InputEvent::PointerMove { x, y }),
            EventType::MouseUp => Some(InputEvent::PointerUp { x, y }),
            EventType::KeyDown | EventType::KeyUp => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_arrow_keys_map() {
        assert_eq!(Key::from_dom("ArrowLeft"), Some(Key::Left));
        assert_eq!(Key::from_dom("a"), None);
        assert_eq!(Key::from_dom("Escape"), None);
    }

    #[test]
    fn bindings_translate_by_event_type() {
        let down = Binding::new(Target::Document, EventType::KeyDown);
        assert_eq!(down.key_event("ArrowUp"), Some(InputEvent::KeyDown(Key::Up)));
        assert_eq!(down.pointer_event(1.0, 2.0), None);

        let click = Binding::new(Target::Canvas, EventType::Click);
        assert_eq!(click.pointer_event(3.0, 4.0), Some(InputEvent::Click { x: 3.0, y: 4.0 }));
        assert_eq!(click.key_event("ArrowUp"), None);
    }
}
