//! Font registration for the `ab_glyph` text path, which does not discover OS
//! fonts on its own.

use crate::error::Error;
use log::{debug, warn};
use plotters::style::FontStyle;
use std::path::PathBuf;
use std::sync::OnceLock;

/// Environment variable naming a `.ttf` file to use instead of the bundled font.
pub const FONT_ENV: &str = "WDI_AGRI_FONT";

/// DejaVu Sans, shipped with the crate so charts render on machines without
/// system fonts.
static BUNDLED_FONT: &[u8] = include_bytes!("../../assets/DejaVuSans.ttf");

static REGISTERED: OnceLock<bool> = OnceLock::new();

/// Register a "sans-serif" font once per process: the file named by
/// [`FONT_ENV`] when it is set and usable, the bundled font otherwise.
pub fn ensure_fonts_registered() -> Result<(), Error> {
    let ok = *REGISTERED.get_or_init(|| {
        if let Some(bytes) = override_font_bytes() {
            if plotters::style::register_font("sans-serif", FontStyle::Normal, bytes).is_ok() {
                return true;
            }
            warn!("{FONT_ENV} is not a usable TrueType font; using the bundled font");
        }
        plotters::style::register_font("sans-serif", FontStyle::Normal, BUNDLED_FONT).is_ok()
    });
    if ok { Ok(()) } else { Err(Error::FontUnavailable) }
}

fn override_font_bytes() -> Option<&'static [u8]> {
    let path = PathBuf::from(std::env::var_os(FONT_ENV)?);
    match std::fs::read(&path) {
        Ok(bytes) => {
            debug!("using font {}", path.display());
            // Registered fonts live for the rest of the process.
            Some(&*Box::leak(bytes.into_boxed_slice()))
        }
        Err(e) => {
            warn!("cannot read {} ({e}); using the bundled font", path.display());
            None
        }
    }
}
