use std::io::Cursor;

use crate::canvas::model::ContentId;
use crate::foundation::error::{TessellaError, TessellaResult};

/// Host seam for asynchronous aspect-ratio measurement.
///
/// `begin` must not block: the host starts the network fetch / image decode on its own
/// schedule and reports the outcome through
/// [`AspectRatioCache::complete_measurement`](crate::ratio::cache::AspectRatioCache::complete_measurement)
/// on a later pass. The cache's in-flight set guarantees at most one outstanding measurement
/// per content id.
pub trait RatioMeasurer {
    /// Begin one asynchronous measurement of the image at `url` for `id`.
    fn begin(&mut self, id: &ContentId, url: &str);
}

/// Measure a width/height ratio from encoded image bytes.
///
/// Only the header is inspected; the pixel data is not decoded. For hosts that fetch image
/// bytes themselves before calling
/// [`complete_measurement`](crate::ratio::cache::AspectRatioCache::complete_measurement).
pub fn ratio_from_image_bytes(bytes: &[u8]) -> TessellaResult<f64> {
    let reader = image::ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| TessellaError::measure(format!("failed to sniff image format: {e}")))?;
    let (w, h) = reader
        .into_dimensions()
        .map_err(|e| TessellaError::measure(format!("failed to read image dimensions: {e}")))?;
    if w == 0 || h == 0 {
        return Err(TessellaError::measure("image has a zero dimension"));
    }
    Ok(f64::from(w) / f64::from(h))
}
