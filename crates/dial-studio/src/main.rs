use dial_engine::logging::{init_logging, LoggingConfig};
use dial_face::prelude::*;

/// Semicolon-separated color overrides, e.g.
/// `DIAL_STYLE="hourHandColor=#336699; centerDotColor=#FFA500"`.
const STYLE_ENV: &str = "DIAL_STYLE";

fn main() -> anyhow::Result<()> {
    init_logging(LoggingConfig::default());

    ClockApp::new()
        .title("Dial")
        .size(480.0, 480.0)
        .style(load_style())
        .run()
}

/// Default style plus any overrides from the environment.
///
/// A malformed override is logged and ignored as a whole.
fn load_style() -> FaceStyle {
    let mut style = FaceStyle::default();

    let Ok(overrides) = std::env::var(STYLE_ENV) else {
        return style;
    };

    if let Err(e) = style.apply_overrides(&overrides) {
        log::warn!("ignoring {STYLE_ENV}: {e}");
    } else {
        log::info!("style overrides applied from {STYLE_ENV}");
    }
    style
}
