//! Loading image objects from source references.

use crate::shapes::{Image, ImageFormat};
use base64::{Engine, engine::general_purpose::STANDARD};
use kurbo::Point;
use std::future::Future;
use std::io::Cursor;
use std::path::Path;
use std::pin::Pin;
use thiserror::Error;

/// Image loading errors.
#[derive(Debug, Error)]
pub enum ImageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Decode error: {0}")]
    Decode(#[from] image::ImageError),
    #[error("Unsupported image format")]
    UnsupportedFormat,
    #[error("Invalid data URL: {0}")]
    InvalidDataUrl(String),
    #[error("Unsupported image source: {0}")]
    UnsupportedSource(String),
}

/// Result type for image loading.
pub type ImageResult<T> = Result<T, ImageError>;

/// Boxed future for loading operations. Not `Send`: loads are driven on the
/// host's UI thread.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Turns a source reference into an image object.
pub trait ImageLoader {
    /// Load the image behind `source`.
    fn load(&self, source: &str) -> BoxFuture<'_, ImageResult<Image>>;
}

/// Loads `data:` URLs, `file://` URLs and plain filesystem paths.
#[derive(Debug, Default, Clone, Copy)]
pub struct SourceImageLoader;

impl SourceImageLoader {
    pub fn new() -> Self {
        Self
    }

    fn read_source(source: &str) -> ImageResult<Vec<u8>> {
        if let Some(rest) = source.strip_prefix("data:") {
            return decode_data_url(rest);
        }
        if let Some(path) = source.strip_prefix("file://") {
            return Ok(std::fs::read(path)?);
        }
        if source.contains("://") {
            return Err(ImageError::UnsupportedSource(source.to_string()));
        }
        Ok(std::fs::read(Path::new(source))?)
    }
}

impl ImageLoader for SourceImageLoader {
    fn load(&self, source: &str) -> BoxFuture<'_, ImageResult<Image>> {
        let source = source.to_string();
        Box::pin(async move {
            let data = Self::read_source(&source)?;
            image_from_bytes(&data)
        })
    }
}

/// Decode the part of a data URL after `data:`. Only base64 payloads are
/// accepted.
fn decode_data_url(rest: &str) -> ImageResult<Vec<u8>> {
    let (meta, payload) = rest
        .split_once(',')
        .ok_or_else(|| ImageError::InvalidDataUrl("missing ','".to_string()))?;
    if !meta.ends_with(";base64") {
        return Err(ImageError::InvalidDataUrl(
            "only base64 payloads are supported".to_string(),
        ));
    }
    STANDARD
        .decode(payload.trim())
        .map_err(|e| ImageError::InvalidDataUrl(e.to_string()))
}

/// Build an image object at the origin, at its natural pixel size.
pub fn image_from_bytes(data: &[u8]) -> ImageResult<Image> {
    let format = ImageFormat::from_magic_bytes(data).ok_or(ImageError::UnsupportedFormat)?;
    let (width, height) = image::ImageReader::new(Cursor::new(data))
        .with_guessed_format()?
        .into_dimensions()?;
    Ok(Image::new(Point::ZERO, data, width, height, format))
}
