//! Switching the overlay between click-through and click-capturing.

use eframe::egui;

/// `WS_EX_LAYERED`: per-pixel alpha composition.
pub const EX_STYLE_LAYERED: u32 = 0x0008_0000;
/// `WS_EX_TRANSPARENT`: hit testing falls through to the windows below.
pub const EX_STYLE_TRANSPARENT: u32 = 0x0000_0020;

pub trait InputPenetration {
    /// `true` lets pointer input pass through to whatever is underneath,
    /// `false` makes the overlay absorb it. Failures are logged and ignored.
    fn set_penetration(&mut self, enabled: bool);
}

/// Compute the extended window style for the requested penetration mode.
///
/// Enabling sets both the layered and transparent bits. Disabling clears only
/// the transparent bit so the window keeps rendering translucently.
pub fn penetration_ex_style(current: u32, enabled: bool) -> u32 {
    if enabled {
        current | EX_STYLE_LAYERED | EX_STYLE_TRANSPARENT
    } else {
        current & !EX_STYLE_TRANSPARENT
    }
}

/// Read/write access to a window's extended style word.
pub trait ExStyleStore {
    fn read(&self) -> Option<u32>;
    fn write(&mut self, style: u32) -> bool;
}

/// Penetration controller that edits extended style flags in place.
#[derive(Debug)]
pub struct StyleFlagPenetration<S> {
    store: S,
}

impl<S: ExStyleStore> StyleFlagPenetration<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

impl<S: ExStyleStore> InputPenetration for StyleFlagPenetration<S> {
    fn set_penetration(&mut self, enabled: bool) {
        let Some(current) = self.store.read() else {
            tracing::warn!(enabled, "unable to read window style; penetration unchanged");
            return;
        };
        let next = penetration_ex_style(current, enabled);
        if next == current {
            return;
        }
        if self.store.write(next) {
            tracing::debug!(enabled, style = next, "penetration updated");
        } else {
            tracing::warn!(enabled, "failed to update window style");
        }
    }
}

/// Fallback controller that asks the windowing backend to toggle hit testing.
/// Used where no native handle is available yet.
#[derive(Debug, Default)]
pub struct ViewportPenetration {
    applied: Option<bool>,
    pending: Option<bool>,
}

impl ViewportPenetration {
    pub fn new(initial: bool) -> Self {
        Self {
            applied: Some(initial),
            pending: None,
        }
    }

    pub fn applied(&self) -> Option<bool> {
        self.pending.or(self.applied)
    }

    /// Send the queued change, if any, to the viewport.
    pub fn flush(&mut self, ctx: &egui::Context) {
        if let Some(enabled) = self.pending.take() {
            ctx.send_viewport_cmd(egui::ViewportCommand::MousePassthrough(enabled));
            self.applied = Some(enabled);
        }
    }
}

impl InputPenetration for ViewportPenetration {
    fn set_penetration(&mut self, enabled: bool) {
        if self.applied() == Some(enabled) {
            return;
        }
        self.pending = Some(enabled);
    }
}

#[cfg(windows)]
mod platform {
    use super::ExStyleStore;
    use windows::Win32::Foundation::HWND;
    use windows::Win32::UI::WindowsAndMessaging::{
        GetWindowLongPtrW, SetWindowLongPtrW, GWL_EXSTYLE,
    };

    /// Extended style word of a native window.
    #[derive(Debug, Clone, Copy)]
    pub struct HwndExStyle {
        hwnd: HWND,
    }

    impl HwndExStyle {
        pub fn new(hwnd: HWND) -> Self {
            Self { hwnd }
        }
    }

    impl ExStyleStore for HwndExStyle {
        fn read(&self) -> Option<u32> {
            let style = unsafe { GetWindowLongPtrW(self.hwnd, GWL_EXSTYLE) };
            // A live overlay window always carries at least the topmost bit.
            (style != 0).then_some(style as u32)
        }

        fn write(&mut self, style: u32) -> bool {
            unsafe {
                SetWindowLongPtrW(self.hwnd, GWL_EXSTYLE, style as isize);
            }
            self.read() == Some(style)
        }
    }

    pub type Win32Penetration = super::StyleFlagPenetration<HwndExStyle>;

    pub fn win32_penetration(hwnd: HWND) -> Win32Penetration {
        super::StyleFlagPenetration::new(HwndExStyle::new(hwnd))
    }

    #[cfg(test)]
    mod windows_tests {
        use super::super::{EX_STYLE_LAYERED, EX_STYLE_TRANSPARENT};
        use windows::Win32::UI::WindowsAndMessaging::{WS_EX_LAYERED, WS_EX_TRANSPARENT};

        #[test]
        fn style_constants_match_win32() {
            assert_eq!(EX_STYLE_LAYERED, WS_EX_LAYERED.0);
            assert_eq!(EX_STYLE_TRANSPARENT, WS_EX_TRANSPARENT.0);
        }
    }
}

#[cfg(windows)]
pub use platform::{win32_penetration, HwndExStyle, Win32Penetration};

#[cfg(test)]
mod tests {
    use super::*;

    const TOPMOST: u32 = 0x0000_0008;

    #[derive(Debug, Default)]
    struct MemoryStyle {
        style: Option<u32>,
        writes: usize,
    }

    impl ExStyleStore for MemoryStyle {
        fn read(&self) -> Option<u32> {
            self.style
        }

        fn write(&mut self, style: u32) -> bool {
            self.writes += 1;
            self.style = Some(style);
            true
        }
    }

    #[test]
    fn enabling_sets_layered_and_transparent() {
        let style = penetration_ex_style(TOPMOST, true);
        assert_eq!(style, TOPMOST | EX_STYLE_LAYERED | EX_STYLE_TRANSPARENT);
    }

    #[test]
    fn disabling_keeps_layered_bit() {
        let style = penetration_ex_style(TOPMOST | EX_STYLE_LAYERED | EX_STYLE_TRANSPARENT, false);
        assert_eq!(style, TOPMOST | EX_STYLE_LAYERED);
    }

    #[test]
    fn repeated_calls_do_not_rewrite_style() {
        let mut controller = StyleFlagPenetration::new(MemoryStyle {
            style: Some(TOPMOST),
            writes: 0,
        });
        controller.set_penetration(true);
        controller.set_penetration(true);
        assert_eq!(controller.store().writes, 1);

        controller.set_penetration(false);
        let after_first = controller.store().style;
        controller.set_penetration(false);
        assert_eq!(controller.store().style, after_first);
        assert_eq!(controller.store().writes, 2);
    }

    #[test]
    fn unreadable_style_is_left_alone() {
        let mut controller = StyleFlagPenetration::new(MemoryStyle::default());
        controller.set_penetration(true);
        assert_eq!(controller.store().writes, 0);
        assert_eq!(controller.store().style, None);
    }

    #[test]
    fn viewport_controller_queues_only_changes() {
        let mut controller = ViewportPenetration::new(true);
        controller.set_penetration(true);
        assert_eq!(controller.pending, None);
        controller.set_penetration(false);
        assert_eq!(controller.pending, Some(false));
        assert_eq!(controller.applied(), Some(false));
    }
}
