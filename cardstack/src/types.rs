/// Stable identity of a card, assigned when the card is created.
///
/// Indexes are reassigned on reorder; ids are not.
pub type CardId = u64;

/// The stack's current mode. Exactly one state is active at a time.
///
/// `ListToSingle` and `SingleToList` are transitional: each is driven by a
/// terminating animator and always settles into a stable state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum State {
    Intro,
    List,
    ListToSingle,
    Single,
    SingleToList,
    Edit,
}

impl State {
    /// Returns `true` for states that are settled (no terminating animator
    /// is required to leave them).
    pub fn is_stable(self) -> bool {
        matches!(self, Self::List | Self::Single | Self::Edit)
    }
}

/// An immutable per-tick placement command for one card.
///
/// The engine never hands out references into its position model; render
/// layers receive these values and apply them however they like.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RenderCommand {
    pub index: usize,
    pub id: CardId,
    /// Vertical offset in container coordinates (camera already applied).
    pub offset: f32,
    pub alpha: f32,
    /// Draw order; higher draws on top. Matches the index order except for
    /// a card being drag-reordered, which is lifted above everything.
    pub elevation: u32,
}
