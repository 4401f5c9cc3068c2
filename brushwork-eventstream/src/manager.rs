use std::rc::Rc;

use tracing::{debug, trace};

use crate::pointer::{PointerEvent, PointerEventKind, PointerSource};
use crate::stream::{PointerStream, PointerStreamConfig};
use crate::window::{ElementState, MouseButton, TouchPhase, WindowEvent};

/// Translates window events into element-relative pointer events for one
/// interactive element and dispatches them to registered handlers.
///
/// Only the primary (left) mouse button and a single touch point take part in
/// gestures. Positions are translated by the element's origin, and when the
/// element's size is known, leaving its bounds ends the gesture like a DOM
/// `mouseleave` would.
pub struct PointerEventManager {
    streams: Vec<PointerStream>,
    element_origin: [f64; 2],
    element_size: Option<[f64; 2]>,
    // Track current cursor position, in window coordinates
    current_cursor_position: Option<[f64; 2]>,
    cursor_inside: bool,
    active_touch: Option<u64>,
}

impl PointerEventManager {
    pub fn new() -> Self {
        Self {
            streams: Vec::new(),
            element_origin: [0.0, 0.0],
            element_size: None,
            current_cursor_position: None,
            cursor_inside: false,
            active_touch: None,
        }
    }

    /// Position of the element's top-left corner in window coordinates
    pub fn with_element_origin(mut self, origin: [f64; 2]) -> Self {
        self.element_origin = origin;
        self
    }

    pub fn with_element_size(mut self, size: [f64; 2]) -> Self {
        self.element_size = Some(size);
        self
    }

    /// Register a new event handler with the given configuration
    pub fn register_handler<F>(&mut self, config: PointerStreamConfig, handler: F)
    where
        F: Fn(&PointerEvent) + 'static,
    {
        self.streams.push(PointerStream::new(config, Rc::new(handler)));
    }

    fn to_element(&self, position: [f64; 2]) -> [f64; 2] {
        [
            position[0] - self.element_origin[0],
            position[1] - self.element_origin[1],
        ]
    }

    fn contains(&self, element_position: [f64; 2]) -> bool {
        match self.element_size {
            Some([width, height]) => {
                (0.0..=width).contains(&element_position[0])
                    && (0.0..=height).contains(&element_position[1])
            }
            None => true,
        }
    }

    /// Convert a window event into the pointer event the element would receive
    pub fn translate(&mut self, event: &WindowEvent) -> Option<PointerEvent> {
        match event {
            WindowEvent::CursorMoved(moved) => {
                self.current_cursor_position = Some(moved.position);
                let position = self.to_element(moved.position);
                let inside = self.contains(position);
                let was_inside = std::mem::replace(&mut self.cursor_inside, inside);
                match (was_inside, inside) {
                    (_, true) => Some(mouse_event(PointerEventKind::Move, position)),
                    (true, false) => Some(mouse_event(PointerEventKind::Leave, position)),
                    (false, false) => None,
                }
            }
            WindowEvent::CursorEntered => None,
            WindowEvent::CursorLeft => {
                let was_inside = std::mem::replace(&mut self.cursor_inside, false);
                let position = self.current_cursor_position?;
                was_inside.then(|| mouse_event(PointerEventKind::Leave, self.to_element(position)))
            }
            WindowEvent::MouseInput(input) => {
                if input.button != MouseButton::Left {
                    trace!("Ignoring {:?} button input", input.button);
                    return None;
                }
                let Some(position) = self.current_cursor_position else {
                    debug!("Dropping mouse input received before any cursor position");
                    return None;
                };
                let position = self.to_element(position);
                if !self.contains(position) {
                    return None;
                }
                let kind = match input.state {
                    ElementState::Pressed => PointerEventKind::Down,
                    ElementState::Released => PointerEventKind::Up,
                };
                Some(mouse_event(kind, position))
            }
            WindowEvent::Touch(touch) => {
                let position = self.to_element(touch.position);
                match touch.phase {
                    TouchPhase::Started => {
                        if self.active_touch.is_some() {
                            trace!("Ignoring additional touch point {}", touch.id);
                            return None;
                        }
                        if !self.contains(position) {
                            return None;
                        }
                        self.active_touch = Some(touch.id);
                        Some(PointerEvent::touch(PointerEventKind::Down, position[0], position[1]))
                    }
                    TouchPhase::Moved => (self.active_touch == Some(touch.id)).then(|| {
                        PointerEvent::touch(PointerEventKind::Move, position[0], position[1])
                    }),
                    TouchPhase::Ended | TouchPhase::Cancelled => {
                        if self.active_touch != Some(touch.id) {
                            return None;
                        }
                        self.active_touch = None;
                        Some(PointerEvent::touch(PointerEventKind::Up, position[0], position[1]))
                    }
                }
            }
        }
    }

    /// Translate the window event and pass the result to every matching handler,
    /// in registration order, until a consuming stream handles it
    pub fn dispatch_event(&mut self, event: &WindowEvent) -> Option<PointerEvent> {
        let pointer_event = self.translate(event)?;

        for stream in &self.streams {
            if stream.matches_event(&pointer_event) {
                (stream.handler)(&pointer_event);

                if stream.config.consume {
                    break;
                }
            }
        }

        Some(pointer_event)
    }
}

impl Default for PointerEventManager {
    fn default() -> Self {
        Self::new()
    }
}

fn mouse_event(kind: PointerEventKind, position: [f64; 2]) -> PointerEvent {
    PointerEvent {
        kind,
        position,
        source: PointerSource::Mouse,
        prevent_default: false,
    }
}
