//! Global mouse button and cursor sampling.
//!
//! The overlay is click-through most of the time, so it never receives native
//! button messages. Instead the button state is read from the system every
//! polling tick, independent of which window has focus.

use crate::model::Point;

/// Level-triggered snapshot of the three mouse buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ButtonSample {
    pub primary: bool,
    pub secondary: bool,
    pub tertiary: bool,
}

impl ButtonSample {
    pub const RELEASED: ButtonSample = ButtonSample {
        primary: false,
        secondary: false,
        tertiary: false,
    };

    /// Interpret a `GetAsyncKeyState` result: the high bit marks the key as
    /// currently down.
    pub fn pressed_from_key_state(state: i16) -> bool {
        (state as u16 & 0x8000) != 0
    }
}

pub trait InputSource {
    /// Current button state. Query failures read as released.
    fn sample(&self) -> ButtonSample;

    /// Cursor position in physical screen pixels, if it could be queried.
    fn cursor_position(&self) -> Option<Point>;
}

/// Input source for platforms without a global button query. Every button
/// reads as released, which leaves the overlay idle.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullInput;

impl InputSource for NullInput {
    fn sample(&self) -> ButtonSample {
        ButtonSample::RELEASED
    }

    fn cursor_position(&self) -> Option<Point> {
        None
    }
}

#[cfg(windows)]
mod platform {
    use super::{ButtonSample, InputSource};
    use crate::model::Point;
    use windows::Win32::Foundation::POINT;
    use windows::Win32::UI::Input::KeyboardAndMouse::{
        GetAsyncKeyState, VIRTUAL_KEY, VK_LBUTTON, VK_MBUTTON, VK_RBUTTON,
    };
    use windows::Win32::UI::WindowsAndMessaging::GetCursorPos;

    #[derive(Debug, Default, Clone, Copy)]
    pub struct Win32Input;

    fn is_down(key: VIRTUAL_KEY) -> bool {
        let state = unsafe { GetAsyncKeyState(key.0 as i32) };
        ButtonSample::pressed_from_key_state(state)
    }

    impl InputSource for Win32Input {
        fn sample(&self) -> ButtonSample {
            ButtonSample {
                primary: is_down(VK_LBUTTON),
                secondary: is_down(VK_RBUTTON),
                tertiary: is_down(VK_MBUTTON),
            }
        }

        fn cursor_position(&self) -> Option<Point> {
            let mut point = POINT::default();
            unsafe {
                if GetCursorPos(&mut point).is_ok() {
                    Some(Point::new(point.x as f32, point.y as f32))
                } else {
                    tracing::warn!("GetCursorPos failed; skipping tick");
                    None
                }
            }
        }
    }
}

#[cfg(windows)]
pub use platform::Win32Input;

/// The global input source for the current platform.
pub fn system_input() -> Box<dyn InputSource> {
    #[cfg(windows)]
    {
        Box::new(Win32Input)
    }

    #[cfg(not(windows))]
    {
        tracing::warn!(
            "mouse-driven drag, draw and dismiss are Windows-only; \
             only the Escape key is handled on this platform"
        );
        Box::new(NullInput)
    }
}
