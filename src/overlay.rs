use crate::config::OverlayConfig;
use crate::input::{system_input, InputSource};
use crate::interaction::{Effect, Effects, InteractionState, TickInput};
use crate::model::Point;
use crate::render;
use crate::scheduler::PollTimer;
use crate::transparency::{InputPenetration, ViewportPenetration};
use anyhow::{anyhow, Context};
use eframe::egui;
use std::time::Instant;

#[cfg(windows)]
use crate::transparency::Win32Penetration;

pub const WINDOW_TITLE: &str = "Crosshair Overlay";

/// Viewport for the overlay: borderless, translucent, topmost, hidden from the
/// taskbar and click-through until the user grabs it.
pub fn native_options(config: &OverlayConfig) -> eframe::NativeOptions {
    eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(WINDOW_TITLE)
            .with_inner_size([config.width, config.height])
            .with_position([config.position.x, config.position.y])
            .with_decorations(false)
            .with_transparent(true)
            .with_resizable(false)
            .with_always_on_top()
            .with_taskbar(false)
            .with_mouse_passthrough(true),
        ..Default::default()
    }
}

/// Create the overlay window and run it until it is dismissed.
pub fn create_overlay(config: OverlayConfig) -> anyhow::Result<()> {
    config.validate().context("invalid overlay configuration")?;
    tracing::info!(
        width = config.width,
        height = config.height,
        poll_ms = config.poll_interval_ms,
        "starting overlay"
    );
    let options = native_options(&config);
    eframe::run_native(
        WINDOW_TITLE,
        options,
        Box::new(move |_cc| Box::new(OverlayApp::new(config, system_input()))),
    )
    .map_err(|err| anyhow!("failed to create overlay window: {err}"))?;
    tracing::info!("overlay closed");
    Ok(())
}

pub struct OverlayApp {
    config: OverlayConfig,
    state: InteractionState,
    input: Box<dyn InputSource>,
    timer: PollTimer,
    window_pos: Point,
    viewport_penetration: ViewportPenetration,
    #[cfg(windows)]
    native_penetration: Option<Win32Penetration>,
    alive: bool,
}

impl OverlayApp {
    pub fn new(config: OverlayConfig, input: Box<dyn InputSource>) -> Self {
        Self {
            timer: PollTimer::new(config.poll_interval()),
            window_pos: config.position,
            state: InteractionState::new(),
            input,
            viewport_penetration: ViewportPenetration::new(true),
            #[cfg(windows)]
            native_penetration: None,
            alive: true,
            config,
        }
    }

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    fn penetration(&mut self) -> &mut dyn InputPenetration {
        #[cfg(windows)]
        if let Some(native) = self.native_penetration.as_mut() {
            return native;
        }
        &mut self.viewport_penetration
    }

    #[cfg(windows)]
    fn bind_native_window(&mut self, frame: &eframe::Frame) {
        use raw_window_handle::{HasWindowHandle, RawWindowHandle};
        use windows::Win32::Foundation::HWND;

        if self.native_penetration.is_some() {
            return;
        }
        let hwnd = frame
            .window_handle()
            .ok()
            .and_then(|handle| match handle.as_raw() {
                RawWindowHandle::Win32(handle) => {
                    Some(HWND(handle.hwnd.get() as *mut core::ffi::c_void))
                }
                _ => None,
            });
        if let Some(hwnd) = hwnd {
            tracing::debug!("bound native window handle");
            let mut native = crate::transparency::win32_penetration(hwnd);
            native.set_penetration(!self.state.is_dragging());
            self.native_penetration = Some(native);
        }
    }

    fn current_window_pos(&self, ctx: &egui::Context) -> Point {
        ctx.input(|i| i.viewport().outer_rect)
            .map(|rect| Point::new(rect.min.x, rect.min.y))
            .unwrap_or(self.window_pos)
    }

    fn poll(&mut self, ctx: &egui::Context, now: Instant) {
        if !self.timer.due(now) {
            return;
        }
        let buttons = self.input.sample();
        let Some(cursor) = self.input.cursor_position() else {
            // Without a cursor the drag/draw steps cannot run, but a held
            // dismiss button still counts.
            if buttons.secondary {
                let effects = self.state.dismiss();
                self.apply(ctx, effects);
            }
            return;
        };
        let input = TickInput {
            buttons,
            cursor: cursor.to_points(ctx.pixels_per_point()),
            window_pos: self.current_window_pos(ctx),
            now,
        };
        let effects = self.state.tick(input);
        self.apply(ctx, effects);
    }

    /// Returns `true` when Escape was pressed this frame and exit was requested.
    fn handle_escape(&mut self, ctx: &egui::Context) -> bool {
        if !ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            return false;
        }
        let effects = self.state.escape();
        self.apply(ctx, effects);
        true
    }

    fn apply(&mut self, ctx: &egui::Context, effects: Effects) {
        for effect in effects {
            match effect {
                Effect::MoveWindow(pos) => {
                    self.window_pos = pos;
                    ctx.send_viewport_cmd(egui::ViewportCommand::OuterPosition(pos.into()));
                }
                Effect::SetPenetration(enabled) => self.penetration().set_penetration(enabled),
                Effect::Repaint => ctx.request_repaint(),
                Effect::Terminate => {
                    if self.alive {
                        self.alive = false;
                        self.timer.stop();
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                }
            }
        }
        self.viewport_penetration.flush(ctx);
    }
}

impl eframe::App for OverlayApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if !self.alive {
            return;
        }
        #[cfg(windows)]
        self.bind_native_window(_frame);

        if self.handle_escape(ctx) {
            return;
        }

        let now = Instant::now();
        self.poll(ctx, now);

        let painter = ctx.layer_painter(egui::LayerId::background());
        render::paint(&painter, ctx.screen_rect(), &self.state, now, &self.config);

        if self.alive {
            ctx.request_repaint_after(self.timer.remaining(Instant::now()));
        }
    }

    fn clear_color(&self, _visuals: &egui::Visuals) -> [f32; 4] {
        [0.0, 0.0, 0.0, 0.0]
    }
}
