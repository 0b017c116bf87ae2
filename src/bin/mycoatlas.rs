use eframe::{egui, NativeOptions};
use mycoatlas::{about, app};
use std::env;

fn main() -> eframe::Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();
    if args.iter().any(|a| a == "--version" || a == "-V") {
        println!("{}", about::version_cli_text());
        return Ok(());
    }

    let options = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 720.0])
            .with_min_inner_size([760.0, 520.0]),

        ..Default::default()
    };

    eframe::run_native(
        "MycoAtlas",
        options,
        Box::new(|_cc| Ok(Box::new(app::MycoAtlasApp::new()))),
    )
}
