use std::path::Path;
use std::sync::Arc;

use eframe::egui;

use screenkey::capture::{CaptureState, InputCaptureSession, WakeFn};
use screenkey::gui::OverlayApp;
use screenkey::logging;
use screenkey::settings::Settings;

fn main() -> anyhow::Result<()> {
    let settings_path = Settings::default_path();
    let settings = Settings::load(&settings_path.to_string_lossy())?;
    logging::init(
        settings.debug_logging,
        settings.log_file.as_deref().map(Path::new),
    );

    let (tx, rx) = std::sync::mpsc::channel();

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, settings.overlay_height])
            .with_decorations(false)
            .with_transparent(true)
            .with_resizable(false)
            .with_visible(false)
            .with_taskbar(false),
        ..Default::default()
    };

    let settings_for_app = settings.clone();
    eframe::run_native(
        "ScreenKey",
        native_options,
        Box::new(move |cc| {
            // The hook thread nudges the UI awake after each mailbox post,
            // so the overlay never has to poll while idle.
            let wake_ctx = cc.egui_ctx.clone();
            let wake: WakeFn = Arc::new(move || wake_ctx.request_repaint());
            let mut session = InputCaptureSession::new(CaptureState::with_wake(tx, wake));
            if let Err(err) = session.start() {
                tracing::warn!("{err}; continuing without keystroke capture");
            }
            Box::new(OverlayApp::new(rx, session, settings_for_app))
        }),
    )
    .map_err(|err| anyhow::anyhow!("failed to run overlay window: {err}"))?;

    Ok(())
}
