/**
 * Barhop Desktop Client - Main Entry Point
 *
 * Loads configuration, restores the saved session and runs the eframe app.
 */
use barhop::egui_app::theme::styles;
use barhop::egui_app::{views, AppState, Config};
use eframe::egui;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file if present
    dotenv::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&env_filter))
        .init();

    let config = Config::load()?;
    tracing::info!("Using backend {}", config.server_url());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([800.0, 600.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Barhop",
        options,
        Box::new(move |cc| {
            styles::apply_global_theme(&cc.egui_ctx);
            Ok(Box::new(BarhopApp {
                state: AppState::new(config),
            }))
        }),
    )?;
    Ok(())
}

struct BarhopApp {
    state: AppState,
}

impl eframe::App for BarhopApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.state.update();

        views::render_top_bar(ctx, &mut self.state);
        views::render_notices(ctx, &self.state);
        views::render_main_panel(ctx, &mut self.state);

        // Background results arrive without input events.
        ctx.request_repaint_after(std::time::Duration::from_millis(100));
    }
}
