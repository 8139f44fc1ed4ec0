use crate::{Extent, TableInstanceId};

/// An opaque handle for a per-instance resize subscription.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResizeSubscription(pub u64);

/// The display-environment capabilities the engine needs.
///
/// Implemented by the presentation collaborator. Elements are addressed by the derived
/// string identifiers the engine hands out (see [`crate::element_id`]); the engine never
/// holds on to an element across events.
pub trait Host {
    type Element;

    /// Resolves an identifier to a live element, or `None` if it is not attached.
    fn lookup(&self, id: &str) -> Option<Self::Element>;

    fn measure(&self, element: &Self::Element) -> Extent;

    fn focus(&mut self, element: &Self::Element);

    /// Current scroll offset of a scroll container.
    fn scroll_top(&self, element: &Self::Element) -> u64;

    /// Moves a scroll container. The host must not synthesize a scroll notification for
    /// this call; the engine applies the new offset itself.
    fn set_scroll_top(&mut self, element: &Self::Element, offset: u64);

    /// Registers `instance` for resize notifications.
    fn subscribe_resize(&mut self, instance: TableInstanceId) -> ResizeSubscription;

    /// Releases a subscription returned by [`Host::subscribe_resize`].
    fn release_resize(&mut self, subscription: ResizeSubscription);
}
