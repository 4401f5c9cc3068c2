pub mod manager;
pub mod pointer;
pub mod stream;
pub mod window;

pub use manager::PointerEventManager;
pub use pointer::{PointerEvent, PointerEventKind, PointerSource};
pub use stream::{PointerStreamConfig, PointerStreamFilter};
pub use window::{
    ElementState, MouseButton, TouchPhase, WindowCursorMoved, WindowEvent, WindowMouseInput,
    WindowTouch,
};
