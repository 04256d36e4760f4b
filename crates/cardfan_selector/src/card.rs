//! Card leaf
//!
//! A card reads the shared interaction state and derives its own transform.
//! It owns only its lift spring; nothing flows back to the selector.

use cardfan_animation::{AnimatedValue, SchedulerHandle};
use cardfan_core::{Shared, Vec2};
use serde::{Deserialize, Serialize};

use crate::config::SelectorConfig;
use crate::state::InteractionState;

/// Immutable card record supplied by the caller
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardData {
    pub id: u64,
    pub title: String,
}

impl CardData {
    pub fn new(id: u64, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
        }
    }
}

/// Render transform of one card, relative to its rest position
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CardTransform {
    pub translate: Vec2,
    pub z_index: i32,
}

/// One card in the strip
#[derive(Debug)]
pub struct Card {
    index: usize,
    data: CardData,
    state: Shared<InteractionState>,
    lift: AnimatedValue,
    lift_distance: f32,
    dragged_z_index: i32,
}

impl Card {
    pub fn new(
        index: usize,
        data: CardData,
        state: Shared<InteractionState>,
        scheduler: SchedulerHandle,
        config: &SelectorConfig,
        card_count: usize,
    ) -> Self {
        // Above every index in the strip, even past the configured value
        let dragged_z_index = config
            .dragged_z_index
            .max(i32::try_from(card_count).unwrap_or(i32::MAX));
        Self {
            index,
            data,
            state,
            lift: AnimatedValue::new(scheduler, 0.0, config.lift_spring),
            lift_distance: config.lift_distance,
            dragged_z_index,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn data(&self) -> &CardData {
        &self.data
    }

    /// Current value of the hover lift spring
    pub fn lift(&self) -> f32 {
        self.lift.get()
    }

    pub fn is_lift_animating(&self) -> bool {
        self.lift.is_animating()
    }

    /// Derive this frame's transform from the shared state
    ///
    /// Retargets the lift spring when the pressed card changed; the spring keeps
    /// its velocity, so a card swept past mid-rise turns around smoothly.
    pub fn transform(&mut self) -> CardTransform {
        let index = self.index;
        let (pressed, dragged, offset) = self
            .state
            .with(|s| (s.is_pressed(index), s.is_dragged(index), s.drag_offset()));

        let raw_lift = if pressed { -self.lift_distance } else { 0.0 };
        if self.lift.target() != raw_lift {
            self.lift.set_target(raw_lift);
        }

        let mut translate = Vec2::new(0.0, self.lift.get());
        if dragged {
            translate += Vec2::new(offset.x, offset.y + raw_lift);
        }

        CardTransform {
            translate,
            z_index: if dragged {
                self.dragged_z_index
            } else {
                index as i32
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cardfan_animation::AnimationScheduler;
    use cardfan_core::Point;

    const FRAME: f32 = 1.0 / 60.0;

    fn card(index: usize, scheduler: &AnimationScheduler) -> (Card, Shared<InteractionState>) {
        let config = SelectorConfig::default();
        let state = Shared::new(InteractionState::new(
            scheduler.handle(),
            config.release_spring,
        ));
        let card = Card::new(
            index,
            CardData::new(index as u64, "card"),
            state.clone(),
            scheduler.handle(),
            &config,
            index + 1,
        );
        (card, state)
    }

    #[test]
    fn test_rest_transform() {
        let scheduler = AnimationScheduler::new();
        let (mut card, _state) = card(3, &scheduler);
        assert_eq!(
            card.transform(),
            CardTransform {
                translate: Vec2::ZERO,
                z_index: 3,
            }
        );
    }

    #[test]
    fn test_lift_is_animated() {
        let scheduler = AnimationScheduler::new();
        let (mut card, state) = card(2, &scheduler);
        state.update(|s| s.begin(2, Point::new(85.0, 0.0)));

        // Target set but nothing has moved yet
        assert_eq!(card.transform().translate.y, 0.0);

        scheduler.tick(FRAME);
        let first = card.transform().translate.y;
        assert!(first < 0.0 && first > -30.0);

        for _ in 0..5 {
            scheduler.tick(FRAME);
        }
        let later = card.transform().translate.y;
        assert!(later < first);

        for _ in 0..600 {
            scheduler.tick(FRAME);
        }
        assert_eq!(card.transform().translate.y, -30.0);
        assert!(!card.is_lift_animating());
    }

    #[test]
    fn test_dragged_card_follows_offset() {
        let scheduler = AnimationScheduler::new();
        let (mut card, state) = card(2, &scheduler);
        state.update(|s| {
            s.begin(2, Point::new(85.0, 0.0));
            s.start_drag(Point::new(85.0, 15.0));
            s.drag_to(Point::new(100.0, 30.0));
        });

        let transform = card.transform();
        assert_eq!(transform.z_index, 1000);
        // Not pressed any more, so no raw lift on top of the offset
        assert_eq!(transform.translate, Vec2::new(15.0, 15.0));
    }

    #[test]
    fn test_dragged_z_index_exceeds_strip_length() {
        let scheduler = AnimationScheduler::new();
        let config = SelectorConfig::default();
        let state = Shared::new(InteractionState::new(
            scheduler.handle(),
            config.release_spring,
        ));
        let mut card = Card::new(
            0,
            CardData::new(1, "first"),
            state.clone(),
            scheduler.handle(),
            &config,
            1500,
        );
        state.update(|s| {
            s.begin(0, Point::ZERO);
            s.start_drag(Point::new(0.0, 20.0));
        });
        assert_eq!(card.transform().z_index, 1500);
    }

    #[test]
    fn test_lift_retarget_keeps_velocity() {
        let scheduler = AnimationScheduler::new();
        let (mut card, state) = card(0, &scheduler);
        state.update(|s| s.begin(0, Point::ZERO));
        card.transform();
        for _ in 0..4 {
            scheduler.tick(FRAME);
        }
        let mid = card.lift();

        state.update(|s| {
            s.hover(1);
        });
        card.transform();
        scheduler.tick(FRAME);

        // Still travelling upward for a moment after the target flips back to 0
        assert!(card.lift() < mid);
    }
}
