//! QR payload extraction from slip photos.

use bytes::Bytes;

/// Result of one decode attempt. Both arms are expected outcomes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeOutcome {
    /// A QR code was found; verify by payload.
    Payload(String),
    /// No readable QR code; verify by uploading the image.
    RawImage(Bytes),
}

/// Finds the first readable QR code in an encoded image (JPEG/PNG).
pub fn decode_qr(image_bytes: &[u8]) -> Option<String> {
    let image = match image::load_from_memory(image_bytes) {
        Ok(image) => image.to_luma8(),
        Err(e) => {
            log::debug!("Slip image could not be loaded: {}", e);
            return None;
        }
    };

    let (width, height) = image.dimensions();
    let mut prepared = rqrr::PreparedImage::prepare_from_greyscale(width as usize, height as usize, |x, y| {
        image.get_pixel(x as u32, y as u32).0[0]
    });

    prepared.detect_grids().into_iter().find_map(|grid| match grid.decode() {
        Ok((_, content)) if !content.trim().is_empty() => Some(content),
        Ok(_) => None,
        Err(e) => {
            log::debug!("QR grid found but not decodable: {}", e);
            None
        }
    })
}

/// Decodes off the async executor and classifies the result.
pub async fn decode_slip(image_bytes: Bytes) -> DecodeOutcome {
    let input = image_bytes.clone();
    match tokio::task::spawn_blocking(move || decode_qr(&input)).await {
        Ok(Some(payload)) => DecodeOutcome::Payload(payload),
        Ok(None) => DecodeOutcome::RawImage(image_bytes),
        Err(e) => {
            log::warn!("QR decode task failed: {}", e);
            DecodeOutcome::RawImage(image_bytes)
        }
    }
}
