/// Pointer gesture events delivered to interactive overlays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerEventKind {
    Down,
    Move,
    Up,
    Leave,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerSource {
    Mouse,
    Touch,
}

/// A pointer event in element-relative coordinates
#[derive(Debug, Clone, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerEventKind,
    pub position: [f64; 2],
    pub source: PointerSource,
    /// The platform's default handling (e.g. emulated mouse events after a
    /// touch) should be suppressed for this event
    pub prevent_default: bool,
}

impl PointerEvent {
    pub fn mouse(kind: PointerEventKind, x: f64, y: f64) -> Self {
        Self {
            kind,
            position: [x, y],
            source: PointerSource::Mouse,
            prevent_default: false,
        }
    }

    pub fn touch(kind: PointerEventKind, x: f64, y: f64) -> Self {
        Self {
            kind,
            position: [x, y],
            source: PointerSource::Touch,
            prevent_default: matches!(kind, PointerEventKind::Up | PointerEventKind::Leave),
        }
    }
}
