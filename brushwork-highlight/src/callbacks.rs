use std::fmt::Debug;
use std::rc::Rc;

use brushwork_eventstream::PointerEvent;

use crate::selection::Selection;

pub type GestureStartCallback = Rc<dyn Fn(&PointerEvent)>;
pub type SelectionCallback = Rc<dyn Fn(&Selection)>;
/// Receives `None` when the finished selection was empty
pub type SelectionEndCallback = Rc<dyn Fn(Option<&Selection>)>;

/// Host callbacks, all optional. Each is invoked synchronously from the call
/// that caused it.
#[derive(Clone, Default)]
pub struct HighlightCallbacks {
    pub on_brush_start: Option<GestureStartCallback>,
    pub on_brush: Option<SelectionCallback>,
    pub on_brush_end: Option<SelectionEndCallback>,
    pub on_drag_start: Option<GestureStartCallback>,
    pub on_drag: Option<SelectionCallback>,
    pub on_drag_end: Option<SelectionEndCallback>,
}

impl HighlightCallbacks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_brush_start(mut self, callback: impl Fn(&PointerEvent) + 'static) -> Self {
        self.on_brush_start = Some(Rc::new(callback));
        self
    }

    pub fn on_brush(mut self, callback: impl Fn(&Selection) + 'static) -> Self {
        self.on_brush = Some(Rc::new(callback));
        self
    }

    pub fn on_brush_end(mut self, callback: impl Fn(Option<&Selection>) + 'static) -> Self {
        self.on_brush_end = Some(Rc::new(callback));
        self
    }

    pub fn on_drag_start(mut self, callback: impl Fn(&PointerEvent) + 'static) -> Self {
        self.on_drag_start = Some(Rc::new(callback));
        self
    }

    pub fn on_drag(mut self, callback: impl Fn(&Selection) + 'static) -> Self {
        self.on_drag = Some(Rc::new(callback));
        self
    }

    pub fn on_drag_end(mut self, callback: impl Fn(Option<&Selection>) + 'static) -> Self {
        self.on_drag_end = Some(Rc::new(callback));
        self
    }

    pub(crate) fn notify(&self, notifications: Vec<Notification>) {
        for notification in notifications {
            match notification {
                Notification::BrushStart(event) => {
                    if let Some(callback) = &self.on_brush_start {
                        callback(&event);
                    }
                }
                Notification::Brush(selection) => {
                    if let Some(callback) = &self.on_brush {
                        callback(&selection);
                    }
                }
                Notification::BrushEnd(selection) => {
                    if let Some(callback) = &self.on_brush_end {
                        callback(selection.as_ref());
                    }
                }
                Notification::DragStart(event) => {
                    if let Some(callback) = &self.on_drag_start {
                        callback(&event);
                    }
                }
                Notification::Drag(selection) => {
                    if let Some(callback) = &self.on_drag {
                        callback(&selection);
                    }
                }
                Notification::DragEnd(selection) => {
                    if let Some(callback) = &self.on_drag_end {
                        callback(selection.as_ref());
                    }
                }
            }
        }
    }
}

impl Debug for HighlightCallbacks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HighlightCallbacks")
            .field("on_brush_start", &self.on_brush_start.is_some())
            .field("on_brush", &self.on_brush.is_some())
            .field("on_brush_end", &self.on_brush_end.is_some())
            .field("on_drag_start", &self.on_drag_start.is_some())
            .field("on_drag", &self.on_drag.is_some())
            .field("on_drag_end", &self.on_drag_end.is_some())
            .finish()
    }
}

/// A callback invocation recorded while the engine state is borrowed
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Notification {
    BrushStart(PointerEvent),
    Brush(Selection),
    BrushEnd(Option<Selection>),
    DragStart(PointerEvent),
    Drag(Selection),
    DragEnd(Option<Selection>),
}
