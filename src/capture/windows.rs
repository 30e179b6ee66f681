use crate::pointer::PointerCoordinate;
use windows::Win32::Foundation::POINT;
use windows::Win32::UI::WindowsAndMessaging::GetCursorPos;

/// Current pointer location (Windows), in virtual-screen pixels
pub fn read_cursor_position() -> Option<PointerCoordinate> {
    let mut point = POINT::default();
    if let Err(e) = unsafe { GetCursorPos(&mut point) } {
        tracing::trace!("GetCursorPos failed: {}", e);
        return None;
    }
    Some(PointerCoordinate::new(point.x as f64, point.y as f64))
}
