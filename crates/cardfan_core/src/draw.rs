//! Draw Context - retained drawing API
//!
//! The `DrawContext` trait is the seam between widgets and whatever turns
//! shapes into pixels. Widgets describe a frame through it, and a backend (GPU,
//! terminal, or the [`RecordingContext`] used headlessly and in tests) decides
//! what to do with the commands.
//!
//! # Example
//!
//! ```rust
//! use cardfan_core::draw::{DrawContext, RecordingContext, Transform};
//! use cardfan_core::layer::{Color, CornerRadius, Rect, Size};
//!
//! let mut ctx = RecordingContext::new(Size::new(400.0, 800.0));
//! ctx.push_transform(Transform::translate(10.0, 20.0));
//! ctx.fill_rect(
//!     Rect::new(0.0, 0.0, 80.0, 88.0),
//!     CornerRadius::uniform(8.0),
//!     Color::WHITE.into(),
//! );
//! ctx.pop_transform();
//! assert_eq!(ctx.commands().len(), 3);
//! ```

use crate::layer::{Affine2D, Brush, Color, CornerRadius, Point, Rect, Shadow, Size, Vec2};

// ─────────────────────────────────────────────────────────────────────────────
// Transform Types
// ─────────────────────────────────────────────────────────────────────────────

/// A 2D transform pushed onto the draw stack
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Transform(pub Affine2D);

impl Transform {
    /// The identity transform
    pub fn identity() -> Self {
        Transform(Affine2D::IDENTITY)
    }

    /// Create a 2D translation
    pub fn translate(x: f32, y: f32) -> Self {
        Transform(Affine2D::translation(x, y))
    }

    /// Create a 2D scale around the origin (0, 0)
    pub fn scale(sx: f32, sy: f32) -> Self {
        Transform(Affine2D::scale(sx, sy))
    }

    /// Compose: apply `other` first, then `self`
    pub fn then(&self, other: &Transform) -> Transform {
        Transform(self.0.then(&other.0))
    }

    /// Translation component
    pub fn translation(&self) -> Vec2 {
        self.0.translation_part()
    }

    pub fn apply(&self, point: Point) -> Point {
        self.0.transform_point(point)
    }
}

impl From<Affine2D> for Transform {
    fn from(t: Affine2D) -> Self {
        Transform(t)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Text
// ─────────────────────────────────────────────────────────────────────────────

/// Font weight
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FontWeight {
    Light,
    #[default]
    Regular,
    Medium,
    Bold,
}

/// Horizontal text alignment relative to the draw origin
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Vertical text anchor relative to the draw origin
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextBaseline {
    Top,
    Middle,
    #[default]
    Alphabetic,
    Bottom,
}

/// Text style configuration
#[derive(Clone, Debug, PartialEq)]
pub struct TextStyle {
    /// Font family name
    pub family: String,
    /// Font size in pixels
    pub size: f32,
    /// Font weight
    pub weight: FontWeight,
    /// Text color
    pub color: Color,
    /// Text alignment
    pub align: TextAlign,
    /// Text baseline
    pub baseline: TextBaseline,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            family: "system-ui".to_string(),
            size: 14.0,
            weight: FontWeight::Regular,
            color: Color::BLACK,
            align: TextAlign::Left,
            baseline: TextBaseline::Alphabetic,
        }
    }
}

impl TextStyle {
    /// Create a new text style with font size
    pub fn new(size: f32) -> Self {
        Self {
            size,
            ..Default::default()
        }
    }

    /// Set text color
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Set font weight
    pub fn with_weight(mut self, weight: FontWeight) -> Self {
        self.weight = weight;
        self
    }

    /// Center the text on the draw origin in both directions
    pub fn centered(mut self) -> Self {
        self.align = TextAlign::Center;
        self.baseline = TextBaseline::Middle;
        self
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Draw Context
// ─────────────────────────────────────────────────────────────────────────────

/// Unified drawing interface
pub trait DrawContext {
    /// Push a transform onto the stack
    fn push_transform(&mut self, transform: Transform);

    /// Pop the top transform from the stack
    fn pop_transform(&mut self);

    /// Get the current combined transform
    fn current_transform(&self) -> Transform;

    /// Push an opacity value (multiplied with parent)
    fn push_opacity(&mut self, opacity: f32);

    /// Pop the top opacity from the stack
    fn pop_opacity(&mut self);

    /// Fill a rectangle
    fn fill_rect(&mut self, rect: Rect, corner_radius: CornerRadius, brush: Brush);

    /// Draw a drop shadow behind a rounded rectangle
    fn draw_shadow(&mut self, rect: Rect, corner_radius: CornerRadius, shadow: Shadow);

    /// Draw a single line of text
    fn draw_text(&mut self, text: &str, origin: Point, style: &TextStyle);

    /// Viewport size in logical pixels
    fn viewport_size(&self) -> Size;
}

// ─────────────────────────────────────────────────────────────────────────────
// Recording Draw Context
// ─────────────────────────────────────────────────────────────────────────────

/// A draw command that can be recorded and replayed
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    // State
    PushTransform(Transform),
    PopTransform,
    PushOpacity(f32),
    PopOpacity,

    // 2D Drawing
    FillRect {
        rect: Rect,
        corner_radius: CornerRadius,
        brush: Brush,
    },
    DrawShadow {
        rect: Rect,
        corner_radius: CornerRadius,
        shadow: Shadow,
    },
    DrawText {
        text: String,
        origin: Point,
        style: TextStyle,
    },
}

/// A draw context that records commands for later execution
#[derive(Debug, Default)]
pub struct RecordingContext {
    commands: Vec<DrawCommand>,
    transform_stack: Vec<Transform>,
    opacity_stack: Vec<f32>,
    viewport: Size,
}

impl RecordingContext {
    /// Create a new recording context
    pub fn new(viewport: Size) -> Self {
        Self {
            commands: Vec::new(),
            transform_stack: vec![Transform::identity()],
            opacity_stack: vec![1.0],
            viewport,
        }
    }

    /// Get the recorded commands
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Take the recorded commands
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Clear all recorded commands
    pub fn clear(&mut self) {
        self.commands.clear();
        self.transform_stack = vec![Transform::identity()];
        self.opacity_stack = vec![1.0];
    }

    /// Current multiplied opacity
    pub fn current_opacity(&self) -> f32 {
        self.opacity_stack.last().copied().unwrap_or(1.0)
    }
}

impl DrawContext for RecordingContext {
    fn push_transform(&mut self, transform: Transform) {
        self.commands.push(DrawCommand::PushTransform(transform));
        let combined = self.current_transform().then(&transform);
        self.transform_stack.push(combined);
    }

    fn pop_transform(&mut self) {
        self.commands.push(DrawCommand::PopTransform);
        if self.transform_stack.len() > 1 {
            self.transform_stack.pop();
        } else {
            tracing::warn!("RecordingContext: pop_transform on empty stack");
        }
    }

    fn current_transform(&self) -> Transform {
        self.transform_stack.last().copied().unwrap_or_default()
    }

    fn push_opacity(&mut self, opacity: f32) {
        self.commands.push(DrawCommand::PushOpacity(opacity));
        let combined = self.current_opacity() * opacity;
        self.opacity_stack.push(combined);
    }

    fn pop_opacity(&mut self) {
        self.commands.push(DrawCommand::PopOpacity);
        if self.opacity_stack.len() > 1 {
            self.opacity_stack.pop();
        }
    }

    fn fill_rect(&mut self, rect: Rect, corner_radius: CornerRadius, brush: Brush) {
        self.commands.push(DrawCommand::FillRect {
            rect,
            corner_radius,
            brush,
        });
    }

    fn draw_shadow(&mut self, rect: Rect, corner_radius: CornerRadius, shadow: Shadow) {
        self.commands.push(DrawCommand::DrawShadow {
            rect,
            corner_radius,
            shadow,
        });
    }

    fn draw_text(&mut self, text: &str, origin: Point, style: &TextStyle) {
        self.commands.push(DrawCommand::DrawText {
            text: text.to_string(),
            origin,
            style: style.clone(),
        });
    }

    fn viewport_size(&self) -> Size {
        self.viewport
    }
}
