use std::sync::mpsc::Receiver;
use std::time::{Duration, Instant};

use eframe::egui;

use crate::capture::{Combo, InputCaptureSession};
use crate::dedup::EchoFilter;
use crate::overlay::Overlay;
use crate::settings::Settings;

/// The overlay window. Everything here runs on the UI thread: draining the
/// combo mailbox, the text-composition channel, the display state machine
/// and the paint itself.
pub struct OverlayApp {
    rx: Receiver<Combo>,
    // Held for its lifetime; dropping the app removes the hook.
    _session: InputCaptureSession,
    overlay: Overlay,
    echo: EchoFilter,
    settings: Settings,
    visible_applied: bool,
    topmost_applied: bool,
    positioned: bool,
}

impl OverlayApp {
    pub fn new(rx: Receiver<Combo>, session: InputCaptureSession, settings: Settings) -> Self {
        let overlay = Overlay::new(settings.overlay_config());
        let echo = EchoFilter::new(settings.dedup_window());
        Self {
            rx,
            _session: session,
            overlay,
            echo,
            settings,
            visible_applied: false,
            topmost_applied: false,
            positioned: false,
        }
    }

    /// Stretch the bar across the primary monitor, a little above the
    /// bottom edge. Runs once the monitor size is known.
    fn position_window(&mut self, ctx: &egui::Context) {
        if self.positioned {
            return;
        }
        if let Some(monitor) = ctx.input(|i| i.viewport().monitor_size) {
            let height = self.settings.overlay_height;
            let y = (monitor.y - height - self.settings.bottom_margin).max(0.0);
            ctx.send_viewport_cmd(egui::ViewportCommand::InnerSize(egui::vec2(
                monitor.x, height,
            )));
            ctx.send_viewport_cmd(egui::ViewportCommand::OuterPosition(egui::pos2(0.0, y)));
            self.positioned = true;
        }
    }

    fn drain_inputs(&mut self, ctx: &egui::Context, now: Instant) {
        while let Ok(combo) = self.rx.try_recv() {
            self.echo.observe(combo.echo, combo.at);
            self.overlay.present(&combo.label, now);
        }

        let texts: Vec<String> = ctx.input(|i| {
            i.events
                .iter()
                .filter_map(|event| match event {
                    egui::Event::Text(text) => Some(text.clone()),
                    _ => None,
                })
                .collect()
        });
        for text in texts {
            if self.echo.admit(&text, now) {
                self.overlay.present(&text, now);
            } else {
                tracing::debug!("suppressed text-channel echo");
            }
        }
    }

    fn apply_window_state(&mut self, ctx: &egui::Context) {
        let visible = self.overlay.visible();
        if visible != self.visible_applied {
            ctx.send_viewport_cmd(egui::ViewportCommand::Visible(visible));
            if visible {
                // Focusing on show is what makes the text channel live.
                ctx.send_viewport_cmd(egui::ViewportCommand::Focus);
            }
            self.visible_applied = visible;
        }

        let topmost = self.overlay.topmost();
        if topmost != self.topmost_applied {
            let level = if topmost {
                egui::viewport::WindowLevel::AlwaysOnTop
            } else {
                egui::viewport::WindowLevel::Normal
            };
            ctx.send_viewport_cmd(egui::ViewportCommand::WindowLevel(level));
            self.topmost_applied = topmost;
        }
    }
}

impl eframe::App for OverlayApp {
    fn clear_color(&self, _visuals: &egui::Visuals) -> [f32; 4] {
        egui::Rgba::TRANSPARENT.to_array()
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();

        self.position_window(ctx);
        self.drain_inputs(ctx, now);
        self.overlay.tick(now);
        self.apply_window_state(ctx);

        let opacity = self.overlay.opacity(now);
        let dy = self.overlay.slide_offset(now);

        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| {
                if !self.overlay.visible() || self.overlay.text().is_empty() {
                    return;
                }
                let rect = ui.max_rect().translate(egui::vec2(0.0, dy));
                let bg = egui::Color32::from_black_alpha((opacity * 160.0) as u8);
                ui.painter()
                    .rect_filled(rect, egui::Rounding::same(12.0), bg);
                let color =
                    egui::Color32::from_white_alpha((opacity * 255.0).clamp(0.0, 255.0) as u8);
                ui.painter().text(
                    rect.center(),
                    egui::Align2::CENTER_CENTER,
                    self.overlay.text(),
                    egui::FontId::proportional(self.settings.font_size),
                    color,
                );
            });

        if self.overlay.animating(now) {
            ctx.request_repaint_after(Duration::from_millis(16));
        } else if let Some(deadline) = self.overlay.next_deadline(now) {
            ctx.request_repaint_after(deadline.saturating_duration_since(now));
        }
    }
}
