//! Card selector container
//!
//! Owns the interaction state, the pan recognizer and one [`Card`] per record.
//! Input is routed through [`CardSelector::handle_input`] (window coordinates)
//! or straight into the pan callbacks (strip-local coordinates). Each frame the
//! host calls [`CardSelector::frame`] and then draws with
//! [`CardSelector::render`].
//!
//! ```rust
//! use cardfan_core::{Point, Size, Vec2};
//! use cardfan_selector::{CardData, CardSelector, SelectorConfig};
//!
//! let cards = (1..=5).map(|i| CardData::new(i, format!("Card {}", i))).collect();
//! let mut selector =
//!     CardSelector::new(cards, SelectorConfig::default(), Size::new(400.0, 800.0)).unwrap();
//!
//! selector.pan_begin(Point::new(85.0, 0.0));
//! assert_eq!(selector.pressed_index(), Some(2));
//!
//! selector.pan_update(Point::new(85.0, 15.0), Vec2::new(0.0, 15.0));
//! assert_eq!(selector.dragged_index(), Some(2));
//! ```

use cardfan_animation::AnimationScheduler;
use cardfan_core::{DrawContext, Point, Shared, Size, Vec2};
use cardfan_platform::{Cursor, InputEvent};
use tracing::{debug, trace};

use crate::card::{Card, CardData, CardTransform};
use crate::config::SelectorConfig;
use crate::error::Result;
use crate::gesture::{PanEvent, PanGesture};
use crate::layout::SelectorLayout;
use crate::render::{draw_cards, CardFrame, CardStyle};
use crate::state::{InteractionMode, InteractionState};

/// A horizontal strip of overlapping cards with hover-lift and drag-out
pub struct CardSelector {
    config: SelectorConfig,
    layout: SelectorLayout,
    style: CardStyle,
    scheduler: AnimationScheduler,
    state: Shared<InteractionState>,
    cards: Vec<Card>,
    transforms: Vec<CardTransform>,
    gesture: PanGesture,
    cursor: Cursor,
    pending_cursor: Option<Cursor>,
}

impl CardSelector {
    /// Build a selector for `cards` laid out in `viewport`
    pub fn new(cards: Vec<CardData>, config: SelectorConfig, viewport: Size) -> Result<Self> {
        config.validate()?;
        let layout = SelectorLayout::new(&config, viewport)?;
        let scheduler = AnimationScheduler::new();
        let state = Shared::new(InteractionState::new(
            scheduler.handle(),
            config.release_spring,
        ));

        let mut selector = Self {
            config,
            layout,
            style: CardStyle::default(),
            scheduler,
            state,
            cards: Vec::new(),
            transforms: Vec::new(),
            gesture: PanGesture::new(),
            cursor: Cursor::Default,
            pending_cursor: None,
        };
        selector.set_cards(cards);
        Ok(selector)
    }

    /// Replace the card list
    ///
    /// Any running gesture is cancelled and the state returns to neutral.
    pub fn set_cards(&mut self, cards: Vec<CardData>) {
        if self.gesture.cancel().is_some() {
            debug!("card list replaced during a gesture; gesture cancelled");
        }
        self.state.update(|s| s.reset());

        for (i, card) in cards.iter().enumerate() {
            if cards[..i].iter().any(|other| other.id == card.id) {
                debug!(id = card.id, index = i, "duplicate card id");
            }
        }

        let handle = self.scheduler.handle();
        let count = cards.len();
        self.cards = cards
            .into_iter()
            .enumerate()
            .map(|(i, data)| {
                Card::new(i, data, self.state.clone(), handle.clone(), &self.config, count)
            })
            .collect();
        debug!(count = self.cards.len(), "cards set");

        self.refresh();
        self.sync_cursor();
    }

    /// Re-layout for a new viewport size
    ///
    /// A gesture running across a layout change is cancelled; its strip-local
    /// origin no longer matches the new strip.
    pub fn set_viewport(&mut self, viewport: Size) -> Result<()> {
        let layout = SelectorLayout::new(&self.config, viewport)?;
        if layout == self.layout {
            return Ok(());
        }
        self.layout = layout;
        debug!(width = viewport.width, height = viewport.height, "viewport resized");

        let had_touches = self.gesture.cancel().is_some();
        if had_touches || self.mode() != InteractionMode::Idle {
            debug!("viewport resized during a gesture; gesture cancelled");
            self.pan_finalize(true);
        }
        Ok(())
    }

    pub fn set_style(&mut self, style: CardStyle) {
        self.style = style;
    }

    pub fn config(&self) -> &SelectorConfig {
        &self.config
    }

    pub fn layout(&self) -> &SelectorLayout {
        &self.layout
    }

    pub fn style(&self) -> &CardStyle {
        &self.style
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn card_count(&self) -> usize {
        self.cards.len()
    }

    /// Another handle to the shared interaction state
    pub fn state(&self) -> Shared<InteractionState> {
        self.state.clone()
    }

    pub fn scheduler(&self) -> &AnimationScheduler {
        &self.scheduler
    }

    pub fn mode(&self) -> InteractionMode {
        self.state.with(|s| s.mode())
    }

    pub fn pressed_index(&self) -> Option<usize> {
        self.state.with(|s| s.pressed_index())
    }

    pub fn dragged_index(&self) -> Option<usize> {
        self.state.with(|s| s.dragged_index())
    }

    pub fn drag_offset(&self) -> Vec2 {
        self.state.with(|s| s.drag_offset())
    }

    /// Transforms computed at the last state change or frame, by card index
    pub fn transforms(&self) -> &[CardTransform] {
        &self.transforms
    }

    // =========================================================================
    // Input
    // =========================================================================

    /// Feed a platform input event (window coordinates)
    ///
    /// Returns `true` if the interaction state changed.
    pub fn handle_input(&mut self, event: &InputEvent) -> bool {
        let layout = &self.layout;
        let enabled = !self.cards.is_empty();
        let Some(pan) = self
            .gesture
            .process(event, |p| enabled && layout.hit_band().contains(p))
        else {
            return false;
        };

        let layout = self.layout;
        match pan {
            PanEvent::Begin(sample) => self.pan_begin(layout.to_local(sample.position)),
            PanEvent::Update(sample) => {
                self.pan_update(layout.to_local(sample.position), sample.translation)
            }
            PanEvent::Finalize { cancelled, .. } => self.pan_finalize(cancelled),
        }
    }

    /// Pan began at a strip-local position
    pub fn pan_begin(&mut self, position: Point) -> bool {
        let Some(index) = self.layout.index_at(position.x, self.cards.len()) else {
            debug!("pan ignored: no cards");
            return false;
        };

        self.state.update(|s| s.begin(index, position));
        debug!(index, x = position.x, y = position.y, "pan begin");
        self.after_change();
        true
    }

    /// Pan moved to a strip-local position; `translation` is the travel since begin
    pub fn pan_update(&mut self, position: Point, translation: Vec2) -> bool {
        let threshold = self.config.drag_threshold;
        let count = self.cards.len();
        let step = self.layout.step();

        let changed = self.state.update(|s| match s.mode() {
            InteractionMode::Idle => false,
            InteractionMode::Dragging => {
                s.drag_to(position);
                trace!(offset = ?s.drag_offset(), "drag");
                true
            }
            InteractionMode::Hover if translation.y.abs() > threshold => {
                match s.start_drag(position) {
                    Some(index) => debug!(index, "drag start"),
                    None => debug!("drag start without a pressed card"),
                }
                true
            }
            InteractionMode::Hover => match crate::layout::index_at(position.x, step, count) {
                Some(index) => {
                    let moved = s.hover(index);
                    if moved {
                        trace!(index, "hover");
                    }
                    moved
                }
                None => false,
            },
        });

        if changed {
            self.after_change();
        }
        changed
    }

    /// Pan ended or was cancelled
    pub fn pan_finalize(&mut self, cancelled: bool) -> bool {
        let was_active = self.mode() != InteractionMode::Idle;
        self.state.update(|s| s.finish());
        debug!(cancelled, "pan finalize");
        self.after_change();
        was_active
    }

    /// Abort any running gesture, as if the platform cancelled it
    pub fn cancel(&mut self) -> bool {
        match self.gesture.cancel() {
            Some(_) => self.pan_finalize(true),
            None => false,
        }
    }

    // =========================================================================
    // Cursor
    // =========================================================================

    /// Cursor matching the current interaction mode
    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Cursor change since the last call, if any
    pub fn take_cursor_change(&mut self) -> Option<Cursor> {
        self.pending_cursor.take()
    }

    fn sync_cursor(&mut self) {
        let wanted = match self.mode() {
            InteractionMode::Idle => Cursor::Default,
            InteractionMode::Hover => Cursor::Pointer,
            InteractionMode::Dragging => Cursor::Grabbing,
        };
        if wanted != self.cursor {
            self.cursor = wanted;
            self.pending_cursor = Some(wanted);
        }
    }

    // =========================================================================
    // Frame
    // =========================================================================

    /// Advance animations by `dt` seconds and recompute card transforms
    ///
    /// Returns `true` while any spring is still moving.
    pub fn frame(&mut self, dt: f32) -> bool {
        self.scheduler.tick(dt);
        self.refresh();
        let animating = self.scheduler.has_active_animations();
        trace!(dt, animating, "frame");
        animating
    }

    /// Whether any spring is still moving
    pub fn is_animating(&self) -> bool {
        self.scheduler.has_active_animations()
    }

    /// Card draw data in paint order (ascending z, ties by index)
    pub fn card_frames(&self) -> Vec<CardFrame> {
        let mut frames: Vec<CardFrame> = self
            .cards
            .iter()
            .zip(&self.transforms)
            .map(|(card, transform)| CardFrame {
                index: card.index(),
                id: card.data().id,
                title: card.data().title.clone(),
                rest: self.layout.card_rect(card.index()),
                transform: *transform,
            })
            .collect();
        // Stable, so equal z keeps index order
        frames.sort_by_key(|f| f.transform.z_index);
        frames
    }

    /// Draw every card
    pub fn render(&self, ctx: &mut dyn DrawContext) {
        draw_cards(ctx, &self.card_frames(), &self.style);
    }

    fn after_change(&mut self) {
        self.refresh();
        self.sync_cursor();
    }

    fn refresh(&mut self) {
        self.transforms = self.cards.iter_mut().map(Card::transform).collect();
    }
}

impl std::fmt::Debug for CardSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CardSelector")
            .field("cards", &self.cards.len())
            .field("mode", &self.mode())
            .field("pressed", &self.pressed_index())
            .field("dragged", &self.dragged_index())
            .field("cursor", &self.cursor)
            .finish()
    }
}
