use std::cell::RefCell;
use std::rc::{Rc, Weak};

use brushwork_eventstream::{PointerEvent, PointerEventKind, PointerEventManager, PointerStreamConfig};
use brushwork_scales::ScaleAdapter;
use tracing::{debug, trace, warn};

use crate::callbacks::{HighlightCallbacks, Notification};
use crate::config::{EndCallbackPolicy, HighlightConfig};
use crate::convert::{
    area_to_rect, check_scales, full_extent_rect, rect_to_selection, ConversionOptions,
};
use crate::error::HighlightError;
use crate::geometry::PixelRect;
use crate::render::HighlightRenderPlan;
use crate::selection::{HighlightArea, Selection};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GestureMode {
    #[default]
    Idle,
    Brushing,
    Dragging,
}

struct HighlightState {
    config: HighlightConfig,
    scales: Rc<dyn ScaleAdapter>,
    callbacks: HighlightCallbacks,
    mode: GestureMode,
    // Pointer position at gesture start
    anchor: [f64; 2],
    current: PixelRect,
    committed: Option<PixelRect>,
    // Last area applied through `set_controlled_area` while it is still shown
    controlled_area: Option<HighlightArea>,
}

type Update<T> = Result<(T, Vec<Notification>), HighlightError>;

impl HighlightState {
    fn convert(&self, rect: &PixelRect, options: ConversionOptions) -> Result<Selection, HighlightError> {
        rect_to_selection(rect, &self.config, self.scales.as_ref(), options)
    }

    fn is_degenerate(&self, rect: &PixelRect) -> bool {
        rect.is_degenerate(self.config.enable_x, self.config.enable_y)
    }

    fn is_outside_committed(&self, x: f64, y: f64) -> bool {
        let Some(committed) = &self.committed else {
            return true;
        };
        let outside_x = !committed.contains_x(x);
        let outside_y = !committed.contains_y(y);
        match (self.config.enable_x, self.config.enable_y) {
            (true, true) => outside_x || outside_y,
            (true, false) => outside_x,
            (false, true) => outside_y,
            (false, false) => true,
        }
    }

    /// Rectangle spanned by the anchor and `(x, y)`. Disabled axes span the
    /// whole hit target.
    fn brush_rect(&self, x: f64, y: f64) -> PixelRect {
        let [anchor_x, anchor_y] = self.anchor;
        let config = &self.config;
        PixelRect {
            top: if config.enable_y { y.min(anchor_y) } else { 0.0 },
            right: if config.enable_x {
                x.max(anchor_x)
            } else {
                config.touch_width()
            },
            bottom: if config.enable_y {
                y.max(anchor_y)
            } else {
                config.touch_height()
            },
            left: if config.enable_x { x.min(anchor_x) } else { 0.0 },
        }
    }

    fn drag_rect(&self, origin: &PixelRect, x: f64, y: f64) -> PixelRect {
        let [anchor_x, anchor_y] = self.anchor;
        let dx = if self.config.enable_x { x - anchor_x } else { 0.0 };
        let dy = if self.config.enable_y { y - anchor_y } else { 0.0 };
        origin.translate(dx, dy)
    }

    fn pointer_down(&mut self, event: &PointerEvent) -> Vec<Notification> {
        let [x, y] = event.position;
        self.anchor = [x, y];

        match self.committed {
            Some(committed) if self.config.drag && !self.is_outside_committed(x, y) => {
                debug!("Drag started at ({x}, {y})");
                self.mode = GestureMode::Dragging;
                self.current = committed;
                vec![Notification::DragStart(event.clone())]
            }
            _ => {
                debug!("Brush started at ({x}, {y})");
                self.mode = GestureMode::Brushing;
                self.current = PixelRect::at_point(x, y);
                vec![Notification::BrushStart(event.clone())]
            }
        }
    }

    fn pointer_move(&mut self, event: &PointerEvent) -> Update<()> {
        let [x, y] = event.position;
        match self.mode {
            GestureMode::Idle => Ok(((), vec![])),
            GestureMode::Brushing => {
                let rect = self.brush_rect(x, y);
                let selection = self.convert(&rect, ConversionOptions::GESTURE)?;
                trace!("Brushing {rect:?}");
                self.current = rect;
                Ok(((), vec![Notification::Brush(selection)]))
            }
            GestureMode::Dragging => {
                let Some(origin) = self.committed else {
                    return Ok(((), vec![]));
                };
                let rect = self.drag_rect(&origin, x, y);
                let selection = self.convert(&rect, ConversionOptions::GESTURE)?;
                trace!("Dragging {rect:?}");
                self.current = rect;
                Ok(((), vec![Notification::Drag(selection)]))
            }
        }
    }

    fn pointer_up(&mut self) -> Update<()> {
        let mode = self.mode;
        if mode == GestureMode::Idle {
            return Ok(((), vec![]));
        }

        let rect = self.current;
        let empty = self.is_degenerate(&rect);
        let selection = if empty {
            None
        } else {
            match self.convert(&rect, ConversionOptions::GESTURE) {
                Ok(selection) => Some(selection),
                Err(err) => {
                    self.abort_gesture();
                    return Err(err);
                }
            }
        };

        self.mode = GestureMode::Idle;
        self.controlled_area = None;
        match (mode, empty) {
            (_, false) => self.committed = Some(rect),
            (GestureMode::Dragging, true) => {
                // keep the previous selection in place
                if let Some(committed) = self.committed {
                    self.current = committed;
                }
            }
            (_, true) => {
                self.committed = None;
                if !self.config.drag {
                    self.current = PixelRect::ZERO;
                }
            }
        }
        debug!("{mode:?} finished with {rect:?} (empty: {empty})");

        let (brush_end, drag_end) = match self.config.end_callbacks {
            EndCallbackPolicy::ActiveGesture => {
                (mode == GestureMode::Brushing, mode == GestureMode::Dragging)
            }
            EndCallbackPolicy::Legacy => (mode == GestureMode::Brushing, self.config.drag),
        };
        let mut notifications = Vec::new();
        if brush_end {
            notifications.push(Notification::BrushEnd(selection));
        }
        if drag_end {
            notifications.push(Notification::DragEnd(selection));
        }
        Ok(((), notifications))
    }

    /// Programmatic updates take precedence over a gesture in progress
    fn cancel_gesture(&mut self) {
        if self.mode != GestureMode::Idle {
            debug!("Cancelling {:?} gesture", self.mode);
            self.mode = GestureMode::Idle;
        }
    }

    /// Drop a gesture whose selection could not be converted. The committed
    /// rectangle is left as the host last saw it.
    fn abort_gesture(&mut self) {
        debug!("Aborting {:?} gesture", self.mode);
        self.mode = GestureMode::Idle;
        self.current = self.committed.unwrap_or(PixelRect::ZERO);
    }

    fn reset(&mut self) -> Vec<Notification> {
        self.cancel_gesture();
        self.current = PixelRect::ZERO;
        self.committed = None;
        self.controlled_area = None;
        vec![Notification::BrushEnd(None)]
    }

    fn apply_rect(&mut self, rect: PixelRect) -> Update<Option<Selection>> {
        let empty = self.is_degenerate(&rect);
        let selection = if empty {
            None
        } else {
            Some(self.convert(&rect, ConversionOptions::PROGRAMMATIC)?)
        };

        self.cancel_gesture();
        self.current = rect;
        self.committed = (!empty).then_some(rect);
        self.controlled_area = None;
        debug!("Highlight set to {rect:?} (empty: {empty})");
        Ok((selection, vec![Notification::BrushEnd(selection)]))
    }

    fn highlight_all(&mut self) -> Update<Option<Selection>> {
        let rect = full_extent_rect(&self.config);
        self.apply_rect(rect)
    }

    fn set_highlight_area(&mut self, area: &HighlightArea) -> Update<Option<Selection>> {
        let rect = area_to_rect(area, &self.config, self.scales.as_ref())?;
        self.apply_rect(rect)
    }

    fn set_controlled_area(&mut self, area: Option<&HighlightArea>) -> Update<bool> {
        let Some(area) = area else {
            return Ok((false, vec![]));
        };
        if self.controlled_area.as_ref() == Some(area) {
            return Ok((false, vec![]));
        }
        let (_, notifications) = self.set_highlight_area(area)?;
        self.controlled_area = Some(*area);
        Ok((true, notifications))
    }
}

/// Run an update against the shared state, then invoke the resulting
/// callbacks once the borrow has been released.
fn run<T>(
    state: &RefCell<HighlightState>,
    update: impl FnOnce(&mut HighlightState) -> Update<T>,
) -> Result<T, HighlightError> {
    let (value, notifications, callbacks) = {
        let mut state = state.borrow_mut();
        let (value, notifications) = update(&mut state)?;
        (value, notifications, state.callbacks.clone())
    };
    callbacks.notify(notifications);
    Ok(value)
}

fn notify_after(
    state: &RefCell<HighlightState>,
    update: impl FnOnce(&mut HighlightState) -> Vec<Notification>,
) {
    let (notifications, callbacks) = {
        let mut state = state.borrow_mut();
        (update(&mut state), state.callbacks.clone())
    };
    callbacks.notify(notifications);
}

fn handle_pointer_event(
    state: &RefCell<HighlightState>,
    event: &PointerEvent,
) -> Result<(), HighlightError> {
    match event.kind {
        PointerEventKind::Down => {
            notify_after(state, |state| state.pointer_down(event));
            Ok(())
        }
        PointerEventKind::Move => run(state, |state| state.pointer_move(event)),
        PointerEventKind::Up | PointerEventKind::Leave => run(state, |state| state.pointer_up()),
    }
}

/// Brush and drag interaction for a rectangular chart overlay.
///
/// The engine turns pointer gestures into a pixel rectangle, converts it to a
/// data-space [`Selection`] through the chart's scales and reports it to the
/// host through [`HighlightCallbacks`].
pub struct HighlightEngine {
    state: Rc<RefCell<HighlightState>>,
}

impl HighlightEngine {
    pub fn new(
        config: HighlightConfig,
        scales: Rc<dyn ScaleAdapter>,
        callbacks: HighlightCallbacks,
    ) -> Result<Self, HighlightError> {
        config.validate()?;
        check_scales(&config, scales.as_ref())?;
        Ok(Self {
            state: Rc::new(RefCell::new(HighlightState {
                config,
                scales,
                callbacks,
                mode: GestureMode::Idle,
                anchor: [0.0, 0.0],
                current: PixelRect::ZERO,
                committed: None,
                controlled_area: None,
            })),
        })
    }

    /// Feed an element-relative pointer event. Leave ends a gesture like up.
    pub fn handle_pointer_event(&self, event: &PointerEvent) -> Result<(), HighlightError> {
        handle_pointer_event(&self.state, event)
    }

    pub fn pointer_down(&self, event: &PointerEvent) {
        notify_after(&self.state, |state| state.pointer_down(event));
    }

    pub fn pointer_move(&self, event: &PointerEvent) -> Result<(), HighlightError> {
        run(&self.state, |state| state.pointer_move(event))
    }

    pub fn pointer_up(&self, _event: &PointerEvent) -> Result<(), HighlightError> {
        run(&self.state, |state| state.pointer_up())
    }

    /// Clear the selection and report `None` to `on_brush_end`
    pub fn reset(&self) {
        notify_after(&self.state, |state| state.reset());
    }

    /// Select the whole plot
    pub fn highlight_all(&self) -> Result<Option<Selection>, HighlightError> {
        run(&self.state, |state| state.highlight_all())
    }

    /// Select a data-space area. Absent edges extend to the plot's edge.
    pub fn set_highlight_area(&self, area: &HighlightArea) -> Result<Option<Selection>, HighlightError> {
        run(&self.state, |state| state.set_highlight_area(area))
    }

    /// Apply a host-controlled area if it differs from the last one applied.
    /// Returns whether the area was applied.
    pub fn set_controlled_area(&self, area: Option<&HighlightArea>) -> Result<bool, HighlightError> {
        run(&self.state, |state| state.set_controlled_area(area))
    }

    /// Replace the configuration, e.g. after the host chart is re-laid out.
    /// Any gesture in progress is cancelled.
    pub fn update_config(&self, config: HighlightConfig) -> Result<(), HighlightError> {
        config.validate()?;
        let mut state = self.state.borrow_mut();
        check_scales(&config, state.scales.as_ref())?;
        state.cancel_gesture();
        state.config = config;
        Ok(())
    }

    pub fn config(&self) -> HighlightConfig {
        self.state.borrow().config.clone()
    }

    pub fn mode(&self) -> GestureMode {
        self.state.borrow().mode
    }

    pub fn current_rect(&self) -> PixelRect {
        self.state.borrow().current
    }

    pub fn committed_rect(&self) -> Option<PixelRect> {
        self.state.borrow().committed
    }

    /// Handle for driving the overlay from the host
    pub fn control(&self) -> HighlightControl {
        HighlightControl {
            state: Rc::downgrade(&self.state),
        }
    }

    #[tracing::instrument(skip_all)]
    pub fn render_plan(&self) -> Result<HighlightRenderPlan, HighlightError> {
        let state = self.state.borrow();
        HighlightRenderPlan::try_new(&state.config, state.scales.as_ref(), &state.current)
    }

    /// Route the manager's pointer events into this engine
    pub fn connect(&self, manager: &mut PointerEventManager) {
        let control = self.control();
        manager.register_handler(PointerStreamConfig::all(), move |event| {
            if let Err(err) = control.handle_pointer_event(event) {
                warn!("Failed to handle {:?} event: {err}", event.kind);
            }
        });
    }
}

/// Cloneable handle to a [`HighlightEngine`].
///
/// The handle does not keep the engine alive, so it can be captured by the
/// engine's own callbacks. Calls made after the engine is dropped fail with
/// [`HighlightError::EngineDropped`].
#[derive(Clone)]
pub struct HighlightControl {
    state: Weak<RefCell<HighlightState>>,
}

impl HighlightControl {
    fn state(&self) -> Result<Rc<RefCell<HighlightState>>, HighlightError> {
        self.state.upgrade().ok_or(HighlightError::EngineDropped)
    }

    pub fn reset(&self) -> Result<(), HighlightError> {
        let state = self.state()?;
        notify_after(&state, |state| state.reset());
        Ok(())
    }

    pub fn highlight_all(&self) -> Result<Option<Selection>, HighlightError> {
        let state = self.state()?;
        run(&state, |state| state.highlight_all())
    }

    pub fn set_highlight_area(&self, area: &HighlightArea) -> Result<Option<Selection>, HighlightError> {
        let state = self.state()?;
        run(&state, |state| state.set_highlight_area(area))
    }

    pub fn handle_pointer_event(&self, event: &PointerEvent) -> Result<(), HighlightError> {
        let state = self.state()?;
        handle_pointer_event(&state, event)
    }
}

impl std::fmt::Debug for HighlightControl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HighlightControl")
            .field("attached", &(self.state.strong_count() > 0))
            .finish()
    }
}
