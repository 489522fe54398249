#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    use std::path::PathBuf;

    use anyhow::Context;
    use simview_protocol::ViewConfig;
    use simview_ui::ViewerApp;

    env_logger::init();

    // Optional scene snapshot to load before the first frame. With no
    // transport attached this is the only way to get shapes on screen.
    let preload = match std::env::args().nth(1) {
        Some(arg) => {
            let path = PathBuf::from(arg);
            Some(
                std::fs::read(&path)
                    .with_context(|| format!("reading scene file {}", path.display()))?,
            )
        }
        None => None,
    };

    let native_options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([800.0, 600.0])
            .with_title("simview"),
        ..Default::default()
    };

    eframe::run_native(
        "simview",
        native_options,
        Box::new(move |cc| {
            let app = ViewerApp::new(cc, ViewConfig::default());
            if let Some(snapshot) = preload {
                app.feed().push(snapshot);
            }
            Ok(Box::new(app))
        }),
    )
    .map_err(|e| anyhow::anyhow!("eframe exited with error: {e}"))
}

#[cfg(target_arch = "wasm32")]
fn main() {}
