//! Card drawing

use cardfan_core::{
    Brush, Color, CornerRadius, DrawContext, FontWeight, Rect, Shadow, TextStyle, Transform,
};

use crate::card::CardTransform;

/// Visual style shared by every card
#[derive(Clone, Debug, PartialEq)]
pub struct CardStyle {
    pub background: Brush,
    pub corner_radius: CornerRadius,
    pub shadow: Shadow,
    pub title: TextStyle,
}

impl Default for CardStyle {
    fn default() -> Self {
        Self {
            background: Color::WHITE.into(),
            corner_radius: CornerRadius::uniform(8.0),
            shadow: Shadow::new(0.0, 2.0, 3.84, Color::BLACK.with_alpha(0.25)),
            title: TextStyle::new(18.0)
                .with_weight(FontWeight::Bold)
                .with_color(Color::BLACK)
                .centered(),
        }
    }
}

/// Everything needed to draw one card, as plain values
#[derive(Clone, Debug, PartialEq)]
pub struct CardFrame {
    pub index: usize,
    pub id: u64,
    pub title: String,
    /// Rest rectangle in window coordinates
    pub rest: Rect,
    pub transform: CardTransform,
}

impl CardFrame {
    /// Where the card currently appears, in window coordinates
    pub fn bounds(&self) -> Rect {
        let t = self.transform.translate;
        self.rest.offset(t.x, t.y)
    }
}

/// Draw one card: shadow, body, then centered title
pub fn draw_card(ctx: &mut dyn DrawContext, frame: &CardFrame, style: &CardStyle) {
    let t = frame.transform.translate;
    ctx.push_transform(Transform::translate(t.x, t.y));
    ctx.draw_shadow(frame.rest, style.corner_radius, style.shadow);
    ctx.fill_rect(frame.rest, style.corner_radius, style.background);
    ctx.draw_text(&frame.title, frame.rest.center(), &style.title);
    ctx.pop_transform();
}

/// Draw cards in the given order
pub fn draw_cards(ctx: &mut dyn DrawContext, frames: &[CardFrame], style: &CardStyle) {
    for frame in frames {
        draw_card(ctx, frame, style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cardfan_core::{DrawCommand, Point, RecordingContext, Size, Vec2};

    #[test]
    fn test_draw_card_commands() {
        let frame = CardFrame {
            index: 1,
            id: 7,
            title: "Seven".to_string(),
            rest: Rect::new(200.0, 356.0, 80.0, 88.0),
            transform: CardTransform {
                translate: Vec2::new(0.0, -30.0),
                z_index: 1,
            },
        };
        assert_eq!(frame.bounds(), Rect::new(200.0, 326.0, 80.0, 88.0));

        let mut ctx = RecordingContext::new(Size::new(400.0, 800.0));
        draw_card(&mut ctx, &frame, &CardStyle::default());

        let commands = ctx.commands();
        assert_eq!(commands.len(), 5);
        assert_eq!(
            commands[0],
            DrawCommand::PushTransform(Transform::translate(0.0, -30.0))
        );
        assert!(matches!(commands[1], DrawCommand::DrawShadow { .. }));
        assert!(matches!(commands[2], DrawCommand::FillRect { .. }));
        match &commands[3] {
            DrawCommand::DrawText { text, origin, style } => {
                assert_eq!(text, "Seven");
                assert_eq!(*origin, Point::new(240.0, 400.0));
                assert_eq!(style.size, 18.0);
                assert_eq!(style.weight, FontWeight::Bold);
            }
            other => panic!("expected text, got {:?}", other),
        }
        assert_eq!(commands[4], DrawCommand::PopTransform);
    }
}
