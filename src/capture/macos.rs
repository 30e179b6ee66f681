use crate::pointer::PointerCoordinate;
use objc2_app_kit::NSEvent;

/// Current pointer location (macOS)
///
/// Location is in global screen coordinates with the origin at the bottom
/// left of the main display, as AppKit reports it.
pub fn read_cursor_position() -> Option<PointerCoordinate> {
    let pos = unsafe { NSEvent::mouseLocation() };
    Some(PointerCoordinate::new(pos.x, pos.y))
}
