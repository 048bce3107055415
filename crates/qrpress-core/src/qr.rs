//! QR code generation backed by the `qrcode` encoder.
//!
//! Produces square grayscale PNG images at an exact requested pixel size.
//! Error correction is fixed at level M; size validation against service
//! limits happens in the HTTP layer before this service is invoked.

use image::{
    codecs::png::PngEncoder,
    imageops::{self, FilterType},
    ExtendedColorType, ImageBuffer, ImageEncoder, Luma,
};
use qrcode::{EcLevel, QrCode};

use crate::error::{QrError, Result};

/// Stateless QR code generator.
///
/// Safe for unbounded concurrent use; one instance is constructed at
/// startup and shared by value through the router state.
#[derive(Debug, Clone, Copy, Default)]
pub struct QrService;

impl QrService {
    /// Creates a new QR service.
    pub fn new() -> Self {
        Self
    }

    /// Renders `data` as a `size`x`size` pixel PNG.
    ///
    /// Output is deterministic: identical input always yields
    /// byte-identical PNG bytes.
    ///
    /// # Errors
    ///
    /// Returns [`QrError::EmptyData`] for an empty payload,
    /// [`QrError::Encode`] when the payload does not fit any QR version,
    /// and [`QrError::Png`] when PNG serialization fails.
    pub fn generate(&self, data: &[u8], size: u32) -> Result<Vec<u8>> {
        if data.is_empty() {
            return Err(QrError::EmptyData);
        }

        let code = QrCode::with_error_correction_level(data, EcLevel::M)?;

        // The renderer scales whole modules, so the image lands on a
        // module boundary at or above the requested size.
        let rendered: ImageBuffer<Luma<u8>, Vec<u8>> =
            code.render::<Luma<u8>>().quiet_zone(true).min_dimensions(size, size).build();

        let image = if rendered.width() == size && rendered.height() == size {
            rendered
        } else {
            imageops::resize(&rendered, size, size, FilterType::Nearest)
        };

        let mut png = Vec::new();
        PngEncoder::new(&mut png).write_image(
            image.as_raw(),
            size,
            size,
            ExtendedColorType::L8,
        )?;

        Ok(png)
    }
}
