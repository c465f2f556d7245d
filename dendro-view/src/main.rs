//! Application entry point for the dendrogram viewer.
//!
//! This binary sets up logging and eframe/egui, and delegates all
//! interactive logic and rendering to [`Viewer`] from the `viewer` module.

mod viewer;

use viewer::Viewer;

/// Starts the native eframe application.
///
/// Installs a `tracing` subscriber printing INFO and above, then opens the
/// main window titled `"Neurite Dendrogram"`.
///
/// ### Returns
/// - `Ok(())` if the application runs to completion without errors.
/// - `Err` if eframe fails to create the native window or event loop.
fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let options = eframe::NativeOptions::default();

    eframe::run_native(
        "Neurite Dendrogram",
        options,
        Box::new(|_cc| Ok(Box::new(Viewer::new()))),
    )
}
