//! Headless replay of pointer traces
//!
//! [`ReplayEventLoop`] feeds a fixed list of events to the handler and then
//! returns, standing in for a real windowing backend. [`run`] wires a
//! [`CardSelector`] to it and records what happened after every input event.

use std::cell::{Cell, RefCell};

use anyhow::Result;
use cardfan_core::Size;
use cardfan_platform::{
    ControlFlow, Cursor, Event, EventLoop, InputEvent, MouseEvent, PlatformError, TouchEvent,
    Window, WindowEvent,
};
use cardfan_selector::{CardSelector, InteractionMode, SelectorConfig};
use serde::Serialize;
use tracing::debug;

use crate::trace::Trace;

/// Upper bound on frames spent waiting for springs after the trace ends
const MAX_SETTLE_FRAMES: u32 = 10_000;

// ============================================================================
// Headless platform
// ============================================================================

/// Window stand-in that records cursor and redraw requests
#[derive(Debug)]
pub struct ReplayWindow {
    size: Cell<Size>,
    cursor: Cell<Cursor>,
    redraws: Cell<u32>,
    cursor_history: RefCell<Vec<Cursor>>,
}

impl ReplayWindow {
    pub fn new(size: Size) -> Self {
        Self {
            size: Cell::new(size),
            cursor: Cell::new(Cursor::Default),
            redraws: Cell::new(0),
            cursor_history: RefCell::new(Vec::new()),
        }
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor.get()
    }

    pub fn redraw_count(&self) -> u32 {
        self.redraws.get()
    }

    pub fn cursor_history(&self) -> Vec<Cursor> {
        self.cursor_history.borrow().clone()
    }
}

impl Window for ReplayWindow {
    fn logical_size(&self) -> (f32, f32) {
        let size = self.size.get();
        (size.width, size.height)
    }

    fn scale_factor(&self) -> f64 {
        1.0
    }

    fn set_cursor(&self, cursor: Cursor) {
        self.cursor.set(cursor);
        self.cursor_history.borrow_mut().push(cursor);
    }

    fn request_redraw(&self) {
        self.redraws.set(self.redraws.get() + 1);
    }
}

/// Event loop that plays back a recorded event list
pub struct ReplayEventLoop {
    events: Vec<Event>,
    window: ReplayWindow,
}

impl ReplayEventLoop {
    pub fn new(events: Vec<Event>, viewport: Size) -> Self {
        Self {
            events,
            window: ReplayWindow::new(viewport),
        }
    }

    /// Run, then hand the window back for inspection
    pub fn run_returning<F>(self, mut handler: F) -> ReplayWindow
    where
        F: FnMut(Event, &ReplayWindow) -> ControlFlow,
    {
        for event in self.events {
            if let Event::Window(WindowEvent::Resized { width, height }) = event {
                self.window.size.set(Size::new(width, height));
            }
            if handler(event, &self.window) == ControlFlow::Exit {
                debug!("replay stopped by handler");
                break;
            }
        }
        self.window
    }
}

impl EventLoop for ReplayEventLoop {
    type Window = ReplayWindow;

    fn run<F>(self, handler: F) -> Result<(), PlatformError>
    where
        F: FnMut(Event, &Self::Window) -> ControlFlow,
    {
        self.run_returning(handler);
        Ok(())
    }
}

// ============================================================================
// Report
// ============================================================================

#[derive(Debug, Serialize)]
pub struct ReplayReport {
    pub cards: usize,
    pub steps: Vec<StepReport>,
    /// Frame ticks contained in the trace
    pub trace_frames: u32,
    /// Extra frames needed after the trace for every spring to come to rest
    pub settle_frames: u32,
    pub settled: bool,
    pub redraws: u32,
    pub final_state: StateReport,
}

#[derive(Debug, Serialize)]
pub struct StepReport {
    pub event: String,
    pub state: StateReport,
}

#[derive(Debug, Serialize)]
pub struct StateReport {
    pub mode: String,
    pub pressed: i64,
    pub dragged: i64,
    pub drag_offset: [f32; 2],
    pub cursor: String,
    pub cards: Vec<CardReport>,
}

#[derive(Debug, Serialize)]
pub struct CardReport {
    pub index: usize,
    pub id: u64,
    pub translate: [f32; 2],
    pub z: i32,
}

fn snapshot(selector: &CardSelector) -> StateReport {
    let state = selector.state();
    let (mode, pressed, dragged, offset) = state.with(|s| {
        (
            s.mode(),
            s.pressed_index_raw(),
            s.dragged_index_raw(),
            s.drag_offset(),
        )
    });

    StateReport {
        mode: mode_name(mode).to_string(),
        pressed,
        dragged,
        drag_offset: [offset.x, offset.y],
        cursor: format!("{:?}", selector.cursor()),
        cards: selector
            .cards()
            .iter()
            .zip(selector.transforms())
            .map(|(card, t)| CardReport {
                index: card.index(),
                id: card.data().id,
                translate: [t.translate.x, t.translate.y],
                z: t.z_index,
            })
            .collect(),
    }
}

fn mode_name(mode: InteractionMode) -> &'static str {
    match mode {
        InteractionMode::Idle => "idle",
        InteractionMode::Hover => "hover",
        InteractionMode::Dragging => "dragging",
    }
}

fn describe(event: &InputEvent) -> String {
    match event {
        InputEvent::Mouse(mouse) => match mouse {
            MouseEvent::ButtonPressed { x, y, .. } => format!("down ({:.1}, {:.1})", x, y),
            MouseEvent::Moved { x, y } => format!("move ({:.1}, {:.1})", x, y),
            MouseEvent::ButtonReleased { x, y, .. } => format!("up ({:.1}, {:.1})", x, y),
            MouseEvent::Entered => "enter".to_string(),
            MouseEvent::Left => "leave".to_string(),
        },
        InputEvent::Touch(touch) => match touch {
            TouchEvent::Started { id, x, y, .. } => {
                format!("touch {} down ({:.1}, {:.1})", id, x, y)
            }
            TouchEvent::Moved { id, x, y, .. } => {
                format!("touch {} move ({:.1}, {:.1})", id, x, y)
            }
            TouchEvent::Ended { id, x, y } => format!("touch {} up ({:.1}, {:.1})", id, x, y),
            TouchEvent::Cancelled { id } => format!("touch {} cancel", id),
        },
    }
}

// ============================================================================
// Driver
// ============================================================================

/// Replay `trace` through a fresh selector
pub fn run(trace: &Trace, config: SelectorConfig, fps: f32) -> Result<ReplayReport> {
    if !(fps.is_finite() && fps > 0.0) {
        anyhow::bail!("fps must be a positive number, got {}", fps);
    }

    let viewport: Size = trace.viewport.into();
    let mut selector = CardSelector::new(trace.cards.clone(), config, viewport)?;
    let events = trace.to_events(selector.layout(), fps);
    debug!(events = events.len(), cards = trace.cards.len(), "replaying trace");

    let mut steps = Vec::new();
    let mut trace_frames = 0;
    let mut resize_error = None;

    let window = ReplayEventLoop::new(events, viewport).run_returning(|event, window| {
        match event {
            Event::Input(input) => {
                selector.handle_input(&input);
                if let Some(cursor) = selector.take_cursor_change() {
                    window.set_cursor(cursor);
                }
                window.request_redraw();
                steps.push(StepReport {
                    event: describe(&input),
                    state: snapshot(&selector),
                });
            }
            Event::Frame { dt } => {
                trace_frames += 1;
                if selector.frame(dt) {
                    window.request_redraw();
                }
            }
            Event::Window(WindowEvent::Resized { width, height }) => {
                if let Err(err) = selector.set_viewport(Size::new(width, height)) {
                    resize_error = Some(err);
                    return ControlFlow::Exit;
                }
                if let Some(cursor) = selector.take_cursor_change() {
                    window.set_cursor(cursor);
                }
            }
            Event::Window(WindowEvent::CloseRequested) => return ControlFlow::Exit,
            Event::Window(WindowEvent::Focused(false)) => {
                selector.cancel();
            }
            Event::Window(WindowEvent::Focused(true)) => {}
        }
        ControlFlow::Continue
    });

    if let Some(err) = resize_error {
        return Err(err.into());
    }

    let dt = 1.0 / fps;
    let mut settle_frames = 0;
    while selector.is_animating() && settle_frames < MAX_SETTLE_FRAMES {
        selector.frame(dt);
        settle_frames += 1;
    }
    let settled = !selector.is_animating();
    if !settled {
        tracing::warn!(frames = settle_frames, "springs still moving after settle limit");
    }

    Ok(ReplayReport {
        cards: selector.card_count(),
        steps,
        trace_frames,
        settle_frames,
        settled,
        redraws: window.redraw_count(),
        final_state: snapshot(&selector),
    })
}

/// Human-readable report
pub fn format_text(report: &ReplayReport) -> String {
    let mut out = String::new();
    for (i, step) in report.steps.iter().enumerate() {
        out.push_str(&format!("[{:>3}] {}\n", i, step.event));
        out.push_str(&format_state(&step.state));
    }
    out.push_str(&format!(
        "trace frames: {}, settle frames: {}{}, redraws: {}\n",
        report.trace_frames,
        report.settle_frames,
        if report.settled { "" } else { " (not settled)" },
        report.redraws
    ));
    out.push_str("final:\n");
    out.push_str(&format_state(&report.final_state));
    out
}

fn format_state(state: &StateReport) -> String {
    let mut out = format!(
        "      mode={} pressed={} dragged={} offset=({:.2}, {:.2}) cursor={}\n",
        state.mode,
        state.pressed,
        state.dragged,
        state.drag_offset[0],
        state.drag_offset[1],
        state.cursor
    );
    for card in &state.cards {
        out.push_str(&format!(
            "        #{} id={} translate=({:.2}, {:.2}) z={}\n",
            card.index, card.id, card.translate[0], card.translate[1], card.z
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRACE: &str = r#"
        viewport = { width = 400.0, height = 800.0 }
        cards = [
            { id = 1, title = "A" },
            { id = 2, title = "B" },
            { id = 3, title = "C" },
            { id = 4, title = "D" },
            { id = 5, title = "E" },
        ]

        [[events]]
        kind = "down"
        x = 85.0
        y = 0.0

        [[events]]
        kind = "frame"
        count = 10

        [[events]]
        kind = "move"
        x = 85.0
        y = 15.0

        [[events]]
        kind = "move"
        x = 100.0
        y = 30.0

        [[events]]
        kind = "up"
        x = 100.0
        y = 30.0
    "#;

    #[test]
    fn test_replay_scenario() {
        let trace = Trace::parse(TRACE).unwrap();
        let report = run(&trace, SelectorConfig::default(), 60.0).unwrap();

        assert_eq!(report.cards, 5);
        assert_eq!(report.steps.len(), 4);
        assert_eq!(report.trace_frames, 10);

        let down = &report.steps[0].state;
        assert_eq!(down.mode, "hover");
        assert_eq!(down.pressed, 2);
        assert_eq!(down.cursor, "Pointer");

        let drag = &report.steps[1].state;
        assert_eq!(drag.mode, "dragging");
        assert_eq!(drag.pressed, -1);
        assert_eq!(drag.dragged, 2);
        assert_eq!(drag.drag_offset, [0.0, 0.0]);

        let moved = &report.steps[2].state;
        assert_eq!(moved.drag_offset, [15.0, 15.0]);
        assert_eq!(moved.cards[2].z, 1000);

        let up = &report.steps[3].state;
        assert_eq!(up.dragged, -1);
        assert_eq!(up.cursor, "Default");

        assert!(report.settled);
        assert!(report.settle_frames > 0);
        assert_eq!(report.final_state.drag_offset, [0.0, 0.0]);
        assert!(report
            .final_state
            .cards
            .iter()
            .all(|c| c.translate == [0.0, 0.0]));
    }

    #[test]
    fn test_text_and_json_output() {
        let trace = Trace::parse(TRACE).unwrap();
        let report = run(&trace, SelectorConfig::default(), 60.0).unwrap();

        let text = format_text(&report);
        assert!(text.contains("[  0] down (245.0, 356.0)"));
        assert!(text.contains("mode=dragging pressed=-1 dragged=2"));

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["steps"][2]["state"]["drag_offset"][0], 15.0);
        assert_eq!(json["final_state"]["mode"], "idle");
    }

    #[test]
    fn test_window_records_cursor_changes() {
        let trace = Trace::parse(TRACE).unwrap();
        let selector_config = SelectorConfig::default();
        let viewport: Size = trace.viewport.into();
        let mut selector =
            CardSelector::new(trace.cards.clone(), selector_config, viewport).unwrap();
        let events = trace.to_events(selector.layout(), 60.0);

        let window = ReplayEventLoop::new(events, viewport).run_returning(|event, window| {
            if let Event::Input(input) = event {
                selector.handle_input(&input);
                if let Some(cursor) = selector.take_cursor_change() {
                    window.set_cursor(cursor);
                }
            }
            ControlFlow::Continue
        });

        assert_eq!(
            window.cursor_history(),
            vec![Cursor::Pointer, Cursor::Grabbing, Cursor::Default]
        );
        assert_eq!(window.cursor(), Cursor::Default);
    }

    #[test]
    fn test_event_loop_stops_on_exit() {
        let events = vec![
            Event::Frame { dt: 0.016 },
            Event::Window(WindowEvent::CloseRequested),
            Event::Frame { dt: 0.016 },
        ];
        let mut seen = 0;
        let result = ReplayEventLoop::new(events, Size::new(100.0, 100.0)).run(|event, _| {
            seen += 1;
            match event {
                Event::Window(WindowEvent::CloseRequested) => ControlFlow::Exit,
                _ => ControlFlow::Continue,
            }
        });
        assert!(result.is_ok());
        assert_eq!(seen, 2);
    }

    #[test]
    fn test_resize_mid_drag_cancels() {
        let trace = Trace::parse(
            r#"
            cards = [ { id = 1, title = "A" }, { id = 2, title = "B" }, { id = 3, title = "C" } ]

            [[events]]
            kind = "down"
            x = 45.0
            y = 0.0

            [[events]]
            kind = "move"
            x = 45.0
            y = 20.0

            [[events]]
            kind = "move"
            x = 50.0
            y = 25.0

            [[events]]
            kind = "resize"
            x = 800.0
            y = 800.0

            [[events]]
            kind = "move"
            x = 50.0
            y = 25.0
            "#,
        )
        .unwrap();
        let report = run(&trace, SelectorConfig::default(), 60.0).unwrap();

        assert_eq!(report.steps.len(), 4);
        assert_eq!(report.steps[2].state.drag_offset, [5.0, 5.0]);

        let after = &report.steps[3].state;
        assert_eq!(after.mode, "idle");
        assert_eq!(after.dragged, -1);
        assert_eq!(after.cursor, "Default");

        assert!(report.settled);
        assert_eq!(report.final_state.drag_offset, [0.0, 0.0]);
    }

    #[test]
    fn test_rejects_bad_fps() {
        let trace = Trace::parse(TRACE).unwrap();
        assert!(run(&trace, SelectorConfig::default(), 0.0).is_err());
    }
}
