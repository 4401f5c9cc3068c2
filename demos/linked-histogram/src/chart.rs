use std::cell::RefCell;
use std::fmt::Write;
use std::rc::Rc;

use anyhow::Context;
use brushwork_eventstream::{
    ElementState, MouseButton, PointerEventManager, WindowCursorMoved, WindowEvent,
    WindowMouseInput,
};
use brushwork_highlight::{
    Geometry, HighlightArea, HighlightCallbacks, HighlightConfig, HighlightControl,
    HighlightEngine, Selection,
};
use brushwork_scales::numeric::linear::{LinearNumericScale, LinearNumericScaleConfig};
use brushwork_scales::numeric::ContinuousNumericScale;
use brushwork_scales::temporal::{from_millis, interval, TimeScale, TimeScaleConfig};
use brushwork_scales::StaticScales;
use rand::Rng;
use tracing::info;

use crate::data::{DemoData, NUM_MONTHS};
use crate::histogram::{generate_histogram, span_selected, HistogramBin};

pub const CHART_WIDTH: f64 = 800.0;
pub const CHART_HEIGHT: f64 = 150.0;
pub const HIGHLIGHT_COLOR: &str = "#829AE3";

// Default chart margins
const MARGIN_LEFT: f64 = 40.0;
const MARGIN_RIGHT: f64 = 10.0;
const MARGIN_TOP: f64 = 10.0;
const MARGIN_BOTTOM: f64 = 40.0;

/// State derived from the current selection
#[derive(Debug, Clone, Default)]
pub struct LinkedState {
    pub histogram: Vec<HistogramBin>,
    pub selection_start: Option<f64>,
    pub selection_end: Option<f64>,
}

impl LinkedState {
    fn update(&mut self, data: &DemoData, area: Option<&Selection>) {
        self.histogram = generate_histogram(&data.raw_data, area, &data.times);
        self.selection_start = area.and_then(|area| area.left);
        self.selection_end = area.and_then(|area| area.right);
    }

    fn selection(&self) -> Option<Selection> {
        Some(Selection {
            left: Some(self.selection_start?),
            right: Some(self.selection_end?),
            ..Default::default()
        })
    }
}

/// Monthly bar chart whose highlight drives a histogram of the selected
/// months
pub struct LinkedChart {
    data: Rc<DemoData>,
    state: Rc<RefCell<LinkedState>>,
    engine: HighlightEngine,
    control: HighlightControl,
    manager: PointerEventManager,
    counter: usize,
}

impl LinkedChart {
    pub fn default_config() -> HighlightConfig {
        let geometry = Geometry::new(
            CHART_WIDTH - MARGIN_LEFT - MARGIN_RIGHT,
            CHART_HEIGHT - MARGIN_TOP - MARGIN_BOTTOM,
        )
        .with_margins(MARGIN_LEFT, MARGIN_RIGHT, MARGIN_TOP, MARGIN_BOTTOM);
        HighlightConfig {
            color: HIGHLIGHT_COLOR.to_string(),
            ..HighlightConfig::new(geometry)
                .with_axes(true, false)
                .with_drag(true)
        }
    }

    /// Time scale over the month boundaries, padded by a tenth of the span on
    /// each side
    fn x_scale(data: &DemoData, geometry: &Geometry) -> anyhow::Result<TimeScale> {
        let (first, last) = match (data.times.first(), data.times.last()) {
            (Some(first), Some(last)) => (*first, *last),
            _ => anyhow::bail!("No month boundaries"),
        };
        let padding = (last - first) * 0.1;
        let domain_start = from_millis(first - padding).context("Invalid x domain start")?;
        let domain_end = from_millis(last + padding).context("Invalid x domain end")?;

        Ok(TimeScale::new(&TimeScaleConfig {
            domain: (domain_start, domain_end),
            range: (0.0, geometry.inner_width),
            clamp: false,
            range_offset: None,
        }))
    }

    fn y_scale(data: &DemoData, geometry: &Geometry) -> LinearNumericScale {
        LinearNumericScale::new(&LinearNumericScaleConfig {
            domain: (0.0, data.max_bar_height()),
            range: (geometry.inner_height, 0.0),
            ..Default::default()
        })
    }

    fn scales(data: &DemoData, geometry: &Geometry) -> anyhow::Result<StaticScales> {
        Ok(StaticScales::new(
            Self::x_scale(data, geometry)?,
            Self::y_scale(data, geometry),
        ))
    }

    pub fn new(data: DemoData, config: HighlightConfig) -> anyhow::Result<Self> {
        let data = Rc::new(data);
        let scales = Rc::new(Self::scales(&data, &config.geometry)?);

        let mut state = LinkedState::default();
        state.update(&data, None);
        let state = Rc::new(RefCell::new(state));

        let on_update = {
            let data = data.clone();
            let state = state.clone();
            move |area: Option<&Selection>| state.borrow_mut().update(&data, area)
        };
        let on_drag = on_update.clone();
        let callbacks = HighlightCallbacks::new()
            .on_brush_end(on_update)
            .on_drag(move |area| on_drag(Some(area)));

        let engine = HighlightEngine::new(config, scales, callbacks)?;
        let control = engine.control();

        let mut manager =
            PointerEventManager::new().with_element_size([CHART_WIDTH, CHART_HEIGHT]);
        engine.connect(&mut manager);

        Ok(Self {
            data,
            state,
            engine,
            control,
            manager,
            counter: 0,
        })
    }

    pub fn data(&self) -> &DemoData {
        &self.data
    }

    pub fn state(&self) -> LinkedState {
        self.state.borrow().clone()
    }

    /// Highlight the next month in turn. Returns the month's label.
    pub fn highlight_next_month(&mut self) -> anyhow::Result<String> {
        let times = &self.data.times;
        let area = HighlightArea {
            left: Some(times[self.counter]),
            right: Some(times[(self.counter + 1).min(NUM_MONTHS)]),
            ..Default::default()
        };
        let label = month_label(times[self.counter]);
        self.engine.set_controlled_area(Some(&area))?;
        self.counter = (self.counter + 1) % NUM_MONTHS;
        Ok(label)
    }

    /// Request a random y range. The overlay only brushes along x, so the
    /// resulting selection covers the whole time axis.
    pub fn highlight_random_y_range<R: Rng>(&mut self, rng: &mut R) -> anyhow::Result<HighlightArea> {
        let bottom = (rng.gen::<f64>() * 7.0).ceil();
        let top = (rng.gen::<f64>() * 7.0).ceil().max(bottom + 1.0);
        let area = HighlightArea::y(bottom, top);
        self.engine.set_controlled_area(Some(&area))?;
        Ok(area)
    }

    pub fn clear(&mut self) -> anyhow::Result<()> {
        self.control.reset()?;
        self.counter = 0;
        Ok(())
    }

    pub fn highlight_everything(&self) -> anyhow::Result<()> {
        self.control.highlight_all()?;
        Ok(())
    }

    /// Press at `from`, move to `to` and release, in chart pixel coordinates
    /// at mid height. Brushes, or drags when pressing inside the highlight.
    pub fn gesture(&mut self, from: f64, to: f64) {
        let y = CHART_HEIGHT / 2.0;
        let button = |state: ElementState| {
            WindowEvent::MouseInput(WindowMouseInput {
                state,
                button: MouseButton::Left,
            })
        };
        let cursor = |x: f64| WindowEvent::CursorMoved(WindowCursorMoved { position: [x, y] });

        info!("Pointer gesture from {from} to {to}");
        for event in [
            cursor(from),
            button(ElementState::Pressed),
            cursor(to),
            button(ElementState::Released),
        ] {
            self.manager.dispatch_event(&event);
        }
    }

    /// Chart x pixel of a timestamp, including the left margin
    pub fn pixel_for(&self, millis: f64) -> f64 {
        let geometry = self.engine.config().geometry;
        match Self::x_scale(&self.data, &geometry) {
            Ok(x) => x.scale(millis) + geometry.margin_left,
            Err(_) => f64::NAN,
        }
    }

    /// Month ticks along the x axis as `(label, chart x pixel)`
    pub fn x_ticks(&self) -> anyhow::Result<Vec<(String, f64)>> {
        let geometry = self.engine.config().geometry;
        let x = Self::x_scale(&self.data, &geometry)?;
        Ok(x.interval_ticks(interval::month().as_ref(), 1)
            .iter()
            .map(|tick| {
                (
                    tick.format("%b").to_string(),
                    x.scale_datetime(tick) + geometry.margin_left,
                )
            })
            .collect())
    }

    /// Bar height ticks along the y axis as `(value, chart y pixel)`
    pub fn y_ticks(&self) -> Vec<(f64, f64)> {
        let geometry = self.engine.config().geometry;
        let y = Self::y_scale(&self.data, &geometry);
        y.ticks(Some(5.0))
            .into_iter()
            .map(|tick| (tick, y.scale(tick) + geometry.margin_top))
            .collect()
    }

    /// Bars with both edges inside the selection
    pub fn selected_bars(&self) -> Vec<bool> {
        let selection = self.state.borrow().selection();
        self.data
            .time_data
            .iter()
            .map(|bar| match &selection {
                Some(selection) => span_selected(selection, bar.x0, bar.x),
                None => false,
            })
            .collect()
    }

    pub fn report(&self) -> anyhow::Result<String> {
        let state = self.state();
        let mut out = String::new();

        let format_time = |millis: Option<f64>| match millis.and_then(from_millis) {
            Some(date) => date.format("%a, %d %b %Y %H:%M:%S GMT").to_string(),
            None => "none".to_string(),
        };
        writeln!(out, "selectionStart: {}", format_time(state.selection_start))?;
        writeln!(out, "selectionEnd:   {}", format_time(state.selection_end))?;

        let bars = self
            .data
            .time_data
            .iter()
            .zip(self.selected_bars())
            .map(|(bar, selected)| {
                format!(
                    "{}{}",
                    month_label(bar.x0),
                    if selected { "*" } else { "" }
                )
            })
            .collect::<Vec<_>>();
        writeln!(out, "months:         {}", bars.join(" "))?;

        let x_ticks = self
            .x_ticks()?
            .iter()
            .map(|(label, px)| format!("{label}@{px:.0}"))
            .collect::<Vec<_>>();
        writeln!(out, "x axis:         {}", x_ticks.join(" "))?;
        let y_ticks = self
            .y_ticks()
            .iter()
            .map(|(value, px)| format!("{value}@{px:.0}"))
            .collect::<Vec<_>>();
        writeln!(out, "y axis:         {}", y_ticks.join(" "))?;

        let plan = self.engine.render_plan()?;
        writeln!(
            out,
            "highlight:      x={:.1} width={:.1}",
            plan.highlight.x, plan.highlight.width
        )?;

        let mut top = state.histogram.clone();
        top.sort_by(|a, b| b.y.total_cmp(&a.y));
        let top = top
            .iter()
            .take(5)
            .map(|bin| format!("{}={:.2}%", bin.x, bin.y))
            .collect::<Vec<_>>();
        writeln!(
            out,
            "histogram:      {} bins, largest {}",
            state.histogram.len(),
            top.join(", ")
        )?;
        Ok(out)
    }
}

fn month_label(millis: f64) -> String {
    from_millis(millis)
        .map(|date| date.format("%b").to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::assert_approx_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn chart() -> LinkedChart {
        let data = DemoData::generate(&mut StdRng::seed_from_u64(3)).unwrap();
        LinkedChart::new(data, LinkedChart::default_config()).unwrap()
    }

    #[test]
    fn test_initial_histogram_covers_all_months() {
        let chart = chart();
        let state = chart.state();
        assert_eq!(state.histogram.len(), 100);
        assert_approx_eq!(
            f64,
            state.histogram.iter().map(|bin| bin.y).sum::<f64>(),
            100.0,
            epsilon = 1e-9
        );
        assert_eq!(state.selection_start, None);
        assert!(chart.selected_bars().iter().all(|selected| !selected));
    }

    #[test]
    fn test_highlight_months_in_turn() {
        let mut chart = chart();
        assert_eq!(chart.highlight_next_month().unwrap(), "Jan");
        assert_eq!(chart.highlight_next_month().unwrap(), "Feb");

        let state = chart.state();
        let times = &chart.data().times;
        assert_approx_eq!(f64, state.selection_start.unwrap(), times[1], epsilon = 1.0);
        assert_approx_eq!(f64, state.selection_end.unwrap(), times[2], epsilon = 1.0);

        let selected = chart.selected_bars();
        assert_eq!(selected.iter().filter(|s| **s).count(), 1);
        assert!(selected[1]);
    }

    #[test]
    fn test_brush_then_drag_between_months() {
        let mut chart = chart();
        let times = chart.data().times.clone();

        chart.gesture(chart.pixel_for(times[2]) - 2.0, chart.pixel_for(times[5]) + 2.0);
        let selected = chart.selected_bars();
        assert_eq!(
            selected.iter().enumerate().filter(|(_, s)| **s).map(|(i, _)| i).collect::<Vec<_>>(),
            vec![2, 3, 4]
        );

        // drag the highlight one month to the right
        let from = chart.pixel_for(times[3]);
        let to = from + (chart.pixel_for(times[6]) - chart.pixel_for(times[5]));
        chart.gesture(from, to);
        assert!(chart.selected_bars()[5]);
        assert!(!chart.selected_bars()[2]);
    }

    #[test]
    fn test_clear_and_highlight_everything() {
        let mut chart = chart();
        chart.highlight_next_month().unwrap();
        chart.clear().unwrap();
        assert_eq!(chart.state().selection_start, None);
        assert_eq!(chart.state().histogram.len(), 100);
        // counter restarts at January
        assert_eq!(chart.highlight_next_month().unwrap(), "Jan");

        chart.highlight_everything().unwrap();
        assert!(chart.selected_bars().iter().all(|selected| *selected));
    }

    #[test]
    fn test_same_month_again_after_clear() {
        let mut chart = chart();
        assert_eq!(chart.highlight_next_month().unwrap(), "Jan");
        chart.clear().unwrap();
        assert!(chart.selected_bars().iter().all(|selected| !selected));

        assert_eq!(chart.highlight_next_month().unwrap(), "Jan");
        let times = &chart.data().times;
        assert_approx_eq!(f64, chart.state().selection_start.unwrap(), times[0], epsilon = 1.0);
        let selected = chart.selected_bars();
        assert!(selected[0]);
        assert_eq!(selected.iter().filter(|s| **s).count(), 1);
    }

    #[test]
    fn test_random_y_range_spans_time_axis() {
        let mut chart = chart();
        let mut rng = StdRng::seed_from_u64(3);
        let area = chart.highlight_random_y_range(&mut rng).unwrap();
        assert!(area.top.unwrap() > area.bottom.unwrap());
        assert!(chart.selected_bars().iter().all(|selected| *selected));
    }

    #[test]
    fn test_axis_ticks() {
        let chart = chart();
        let x_ticks = chart.x_ticks().unwrap();
        let labels: Vec<_> = x_ticks.iter().map(|(label, _)| label.as_str()).collect();
        // the padded domain runs from late 2017 to early 2019
        assert!(labels.windows(2).any(|pair| pair == ["Jan", "Feb"]));
        assert!(x_ticks.windows(2).all(|pair| pair[0].1 < pair[1].1));
        assert!(x_ticks
            .iter()
            .all(|(_, px)| (MARGIN_LEFT..=CHART_WIDTH - MARGIN_RIGHT).contains(px)));

        let y_ticks = chart.y_ticks();
        assert_eq!(y_ticks.first().map(|tick| tick.0), Some(0.0));
        assert_approx_eq!(f64, y_ticks[0].1, CHART_HEIGHT - MARGIN_BOTTOM);
    }

    #[test]
    fn test_report_mentions_selection() {
        let mut chart = chart();
        chart.highlight_next_month().unwrap();
        let report = chart.report().unwrap();
        assert!(report.contains("selectionStart: Mon, 01 Jan 2018"));
        assert!(report.contains("Jan*"));
    }
}
