use crosshair_overlay::{create_overlay, logging, OverlayConfig};

const CONFIG_PATH: &str = "overlay.json";

fn main() -> anyhow::Result<()> {
    let config = OverlayConfig::load(CONFIG_PATH)?;
    logging::init(config.debug_logging, config.log_file.clone());
    create_overlay(config)
}
