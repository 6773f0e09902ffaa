//! The item position model: the single source of truth rendered each frame.

use crate::types::CardId;

/// Per-card layout scalars, owned exclusively by the stack.
///
/// `position` is the current frame-interpolated value; `target` is the goal
/// of an in-flight animation; `origin` is the value captured when that
/// animation started, so interpolation is `lerp(origin, target, ease(t))`
/// rather than frame-rate-dependent accumulative stepping.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Card {
    pub id: CardId,
    pub position: f32,
    pub target: f32,
    pub origin: f32,
    pub alpha: f32,
}

impl Card {
    fn new(id: CardId) -> Self {
        Self {
            id,
            position: 0.0,
            target: 0.0,
            origin: 0.0,
            alpha: 1.0,
        }
    }
}

/// Ordered sequence of cards. Index order is contiguous `0..len` and is the
/// draw order; reordering is remove-then-reinsert, which preserves that.
#[derive(Clone, Debug, Default)]
pub struct PositionModel {
    cards: Vec<Card>,
    next_id: CardId,
}

impl PositionModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn get(&self, index: usize) -> Option<&Card> {
        self.cards.get(index)
    }

    pub(crate) fn get_mut(&mut self, index: usize) -> Option<&mut Card> {
        self.cards.get_mut(index)
    }

    pub(crate) fn cards_mut(&mut self) -> &mut [Card] {
        &mut self.cards
    }

    /// Declarative resize: grows or shrinks to `count`, invoking `on_add`
    /// with `(index, id)` for every newly created card.
    pub fn populate(&mut self, count: usize, mut on_add: impl FnMut(usize, CardId)) {
        self.cards.truncate(count);
        while self.cards.len() < count {
            let index = self.cards.len();
            let id = self.alloc_id();
            self.cards.push(Card::new(id));
            on_add(index, id);
        }
    }

    /// Appends one card; returns its `(index, id)`.
    pub fn append(&mut self) -> (usize, CardId) {
        let index = self.cards.len();
        let id = self.alloc_id();
        self.cards.push(Card::new(id));
        (index, id)
    }

    /// Moves the card at `from` to `to`, shifting everything in between.
    /// Out-of-range indexes are ignored.
    pub fn move_card(&mut self, from: usize, to: usize) {
        if from == to || from >= self.cards.len() || to >= self.cards.len() {
            return;
        }
        let card = self.cards.remove(from);
        self.cards.insert(to, card);
    }

    /// Snapshots every card's current position into its `origin`, ahead of
    /// starting an animation toward `target`.
    pub fn capture_origins(&mut self) {
        for card in &mut self.cards {
            card.origin = card.position;
        }
    }

    /// Jumps every card to its target (animation settled).
    pub fn settle(&mut self) {
        for card in &mut self.cards {
            card.position = card.target;
        }
    }

    fn alloc_id(&mut self) -> CardId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}
