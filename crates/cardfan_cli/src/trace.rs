//! Pointer trace files
//!
//! A trace is a TOML document describing a viewport, a card list and a list of
//! pointer events to replay:
//!
//! ```toml
//! viewport = { width = 400.0, height = 800.0 }
//! cards = [ { id = 1, title = "A" }, { id = 2, title = "B" } ]
//!
//! [[events]]
//! kind = "down"      # down | move | up | cancel | leave | frame | resize
//! x = 85.0
//! y = 10.0
//!
//! [[events]]
//! kind = "frame"
//! count = 30
//! ```
//!
//! Positions are strip-local unless the event sets `window = true`. Setting
//! `touch = <id>` sends the event as a touch instead of the left mouse button.
//! A `resize` event reads `x` and `y` as the new viewport width and height.

use anyhow::{Context, Result};
use cardfan_core::{Point, Size};
use cardfan_platform::{
    Event, InputEvent, MouseButton, MouseEvent, TouchEvent, WindowConfig, WindowEvent,
};
use cardfan_selector::{CardData, SelectorLayout};
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize)]
pub struct Trace {
    #[serde(default)]
    pub viewport: Viewport,
    #[serde(default)]
    pub cards: Vec<CardData>,
    #[serde(default)]
    pub events: Vec<TraceEvent>,
}

#[derive(Clone, Copy, Debug, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        let window = WindowConfig::default();
        Self {
            width: window.width as f32,
            height: window.height as f32,
        }
    }
}

impl From<Viewport> for Size {
    fn from(v: Viewport) -> Self {
        Size::new(v.width, v.height)
    }
}

#[derive(Debug, Deserialize)]
pub struct TraceEvent {
    pub kind: String,
    #[serde(default)]
    pub x: f32,
    #[serde(default)]
    pub y: f32,
    #[serde(default = "default_count")]
    pub count: u32,
    #[serde(default)]
    pub window: bool,
    #[serde(default)]
    pub touch: Option<u64>,
}

fn default_count() -> u32 {
    1
}

/// Recognized event kinds
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TraceKind {
    Down,
    Move,
    Up,
    Cancel,
    Leave,
    Frame,
    Resize,
}

impl TraceKind {
    pub fn parse(kind: &str) -> Option<Self> {
        match kind.trim().to_ascii_lowercase().as_str() {
            "down" => Some(TraceKind::Down),
            "move" => Some(TraceKind::Move),
            "up" => Some(TraceKind::Up),
            "cancel" => Some(TraceKind::Cancel),
            "leave" => Some(TraceKind::Leave),
            "frame" => Some(TraceKind::Frame),
            "resize" => Some(TraceKind::Resize),
            _ => None,
        }
    }
}

impl Trace {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Expand the trace into platform events
    ///
    /// Unknown kinds are skipped with a warning. Each `frame` entry expands to
    /// `count` frame ticks of `1 / fps` seconds.
    pub fn to_events(&self, layout: &SelectorLayout, fps: f32) -> Vec<Event> {
        let dt = 1.0 / fps;
        let mut out = Vec::with_capacity(self.events.len());

        for (i, event) in self.events.iter().enumerate() {
            let Some(kind) = TraceKind::parse(&event.kind) else {
                tracing::warn!(index = i, kind = %event.kind, "unknown trace event skipped");
                continue;
            };

            let local = Point::new(event.x, event.y);
            let p = if event.window {
                local
            } else {
                layout.to_window(local)
            };

            match kind {
                TraceKind::Frame => {
                    out.extend((0..event.count).map(|_| Event::Frame { dt }));
                }
                TraceKind::Resize => out.push(Event::Window(WindowEvent::Resized {
                    width: event.x,
                    height: event.y,
                })),
                _ => out.push(Event::Input(input_event(kind, p, event.touch))),
            }
        }
        out
    }
}

fn input_event(kind: TraceKind, p: Point, touch: Option<u64>) -> InputEvent {
    match (kind, touch) {
        (TraceKind::Down, None) => InputEvent::Mouse(MouseEvent::ButtonPressed {
            button: MouseButton::Left,
            x: p.x,
            y: p.y,
        }),
        (TraceKind::Move, None) => InputEvent::Mouse(MouseEvent::Moved { x: p.x, y: p.y }),
        (TraceKind::Up, None) => InputEvent::Mouse(MouseEvent::ButtonReleased {
            button: MouseButton::Left,
            x: p.x,
            y: p.y,
        }),
        (TraceKind::Down, Some(id)) => InputEvent::Touch(TouchEvent::Started {
            id,
            x: p.x,
            y: p.y,
            pressure: 1.0,
        }),
        (TraceKind::Move, Some(id)) => InputEvent::Touch(TouchEvent::Moved {
            id,
            x: p.x,
            y: p.y,
            pressure: 1.0,
        }),
        (TraceKind::Up, Some(id)) => InputEvent::Touch(TouchEvent::Ended { id, x: p.x, y: p.y }),
        (TraceKind::Cancel, Some(id)) => InputEvent::Touch(TouchEvent::Cancelled { id }),
        // A mouse has no cancel of its own; leaving the window is the closest
        (TraceKind::Cancel, None)
        | (TraceKind::Leave, _)
        | (TraceKind::Frame, _)
        | (TraceKind::Resize, _) => InputEvent::Mouse(MouseEvent::Left),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cardfan_selector::SelectorConfig;

    const SAMPLE: &str = r#"
        viewport = { width = 400.0, height = 800.0 }
        cards = [ { id = 1, title = "A" }, { id = 2, title = "B" } ]

        [[events]]
        kind = "down"
        x = 85.0
        y = 10.0

        [[events]]
        kind = "frame"
        count = 3

        [[events]]
        kind = "wiggle"

        [[events]]
        kind = "move"
        x = 5.0
        y = 5.0
        window = true

        [[events]]
        kind = "cancel"
        touch = 4
    "#;

    fn layout() -> SelectorLayout {
        SelectorLayout::new(&SelectorConfig::default(), Size::new(400.0, 800.0)).unwrap()
    }

    #[test]
    fn test_parse_sample() {
        let trace = Trace::parse(SAMPLE).unwrap();
        assert_eq!(trace.cards.len(), 2);
        assert_eq!(trace.cards[1].title, "B");
        assert_eq!(trace.events.len(), 5);
        assert_eq!(trace.events[0].count, 1);
        assert_eq!(trace.events[1].count, 3);
    }

    #[test]
    fn test_events_expand_and_convert() {
        let trace = Trace::parse(SAMPLE).unwrap();
        let events = trace.to_events(&layout(), 60.0);

        // down + 3 frames + move + cancel; the unknown kind is dropped
        assert_eq!(events.len(), 6);
        assert_eq!(
            events[0],
            Event::Input(InputEvent::Mouse(MouseEvent::ButtonPressed {
                button: MouseButton::Left,
                x: 245.0,
                y: 366.0,
            }))
        );
        assert_eq!(events[1], Event::Frame { dt: 1.0 / 60.0 });
        assert_eq!(
            events[4],
            Event::Input(InputEvent::Mouse(MouseEvent::Moved { x: 5.0, y: 5.0 }))
        );
        assert_eq!(
            events[5],
            Event::Input(InputEvent::Touch(TouchEvent::Cancelled { id: 4 }))
        );
    }

    #[test]
    fn test_resize_is_a_window_event() {
        let trace = Trace::parse(
            r#"
            [[events]]
            kind = "resize"
            x = 800.0
            y = 600.0
            "#,
        )
        .unwrap();
        assert_eq!(
            trace.to_events(&layout(), 60.0),
            vec![Event::Window(WindowEvent::Resized {
                width: 800.0,
                height: 600.0,
            })]
        );
    }

    #[test]
    fn test_kind_parse_is_case_insensitive() {
        assert_eq!(TraceKind::parse("DOWN"), Some(TraceKind::Down));
        assert_eq!(TraceKind::parse(" leave "), Some(TraceKind::Leave));
        assert_eq!(TraceKind::parse("tap"), None);
    }

    #[test]
    fn test_empty_trace_uses_default_viewport() {
        let trace = Trace::parse("").unwrap();
        assert_eq!(trace.viewport.width, 400.0);
        assert!(trace.cards.is_empty());
        assert!(trace.events.is_empty());
    }
}
