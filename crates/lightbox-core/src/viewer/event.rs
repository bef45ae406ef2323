use crate::geometry::Point;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Escape,
    Other,
}

/// Raw input delivered to the viewer by its host.
///
/// Pointer positions are relative to the overlay's image area.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ViewerEvent {
    /// The explicit close control was activated.
    CloseButton,
    /// A click on the overlay outside the image.
    Backdrop,
    /// A click on the displayed image itself.
    ImageClick,
    Key(Key),
    /// One discrete wheel step. Positive `delta` zooms out.
    Wheel { delta: f32, pointer: Point },
    PointerDown(Point),
    PointerMove(Point),
    PointerUp,
    DoubleClick,
}
