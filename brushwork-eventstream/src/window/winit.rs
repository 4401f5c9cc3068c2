use super::*;
use ::winit::event::{
    ElementState as WinitElementState, MouseButton as WinitMouseButton,
    TouchPhase as WinitTouchPhase, WindowEvent as WinitEvent,
};

impl WindowEvent {
    /// Convert a winit WindowEvent into a brushwork WindowEvent
    ///
    /// Window events use logical coordinates, so the window's scale factor is
    /// required for the conversion. Events that play no part in pointer
    /// interaction convert to `None`.
    pub fn from_winit_event(event: &WinitEvent, scale: f64) -> Option<Self> {
        match event {
            WinitEvent::CursorMoved { position, .. } => {
                Some(Self::CursorMoved(WindowCursorMoved {
                    position: [position.x / scale, position.y / scale],
                }))
            }

            WinitEvent::CursorEntered { .. } => Some(Self::CursorEntered),

            WinitEvent::CursorLeft { .. } => Some(Self::CursorLeft),

            WinitEvent::MouseInput { state, button, .. } => {
                Some(Self::MouseInput(WindowMouseInput {
                    state: match state {
                        WinitElementState::Pressed => ElementState::Pressed,
                        WinitElementState::Released => ElementState::Released,
                    },
                    button: match button {
                        WinitMouseButton::Left => MouseButton::Left,
                        WinitMouseButton::Right => MouseButton::Right,
                        WinitMouseButton::Middle => MouseButton::Middle,
                        WinitMouseButton::Back => MouseButton::Back,
                        WinitMouseButton::Forward => MouseButton::Forward,
                        WinitMouseButton::Other(val) => MouseButton::Other(*val),
                    },
                }))
            }

            WinitEvent::Touch(touch) => Some(Self::Touch(WindowTouch {
                id: touch.id,
                phase: match touch.phase {
                    WinitTouchPhase::Started => TouchPhase::Started,
                    WinitTouchPhase::Moved => TouchPhase::Moved,
                    WinitTouchPhase::Ended => TouchPhase::Ended,
                    WinitTouchPhase::Cancelled => TouchPhase::Cancelled,
                },
                position: [touch.location.x / scale, touch.location.y / scale],
            })),

            _ => None,
        }
    }
}
