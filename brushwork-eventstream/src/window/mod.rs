#[cfg(feature = "winit_support")]
mod winit;

/// Native window events, in logical window coordinates
#[derive(Debug, Clone, PartialEq)]
pub enum WindowEvent {
    MouseInput(WindowMouseInput),
    CursorMoved(WindowCursorMoved),
    CursorEntered,
    CursorLeft,
    Touch(WindowTouch),
}

#[derive(Debug, Clone, PartialEq)]
pub struct WindowMouseInput {
    pub state: ElementState,
    pub button: MouseButton,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WindowCursorMoved {
    pub position: [f64; 2],
}

/// A touch point. Like a DOM touch's page coordinates, the position is
/// relative to the window rather than to the element being touched.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowTouch {
    pub id: u64,
    pub phase: TouchPhase,
    pub position: [f64; 2],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchPhase {
    Started,
    Moved,
    Ended,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementState {
    Pressed,
    Released,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Back,
    Forward,
    Other(u16),
}
