use crate::error::UploadError;
use crate::models::upload::{ImageKind, UploadedImage};
use std::path::Path;
use tokio::io::AsyncReadExt;
use tracing::{debug, info};

/// Enough leading bytes for `image::guess_format` to recognize any accepted type
const SNIFF_LEN: u64 = 32;

/// Validate raw upload bytes against the accepted types and size limit
pub fn validate_upload(
    file_name: &str,
    bytes: Vec<u8>,
    max_bytes: u64,
) -> Result<UploadedImage, UploadError> {
    let kind = detect_kind(file_name, &bytes).ok_or_else(|| UploadError::NotAnImage {
        file_name: file_name.to_string(),
    })?;

    let size = bytes.len() as u64;
    if size > max_bytes {
        return Err(UploadError::TooLarge {
            size,
            max: max_bytes,
        });
    }

    debug!(file_name, mime = kind.mime_type(), size, "upload accepted");

    Ok(UploadedImage {
        file_name: file_name.to_string(),
        kind,
        bytes,
    })
}

/// Read an image from disk and validate it
pub async fn read_upload(path: &Path, max_bytes: u64) -> Result<UploadedImage, UploadError> {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    // Oversized files are classified from their leading bytes only
    let size = tokio::fs::metadata(path).await?.len();
    if size > max_bytes {
        let mut head = Vec::with_capacity(SNIFF_LEN as usize);
        tokio::fs::File::open(path)
            .await?
            .take(SNIFF_LEN)
            .read_to_end(&mut head)
            .await?;

        if detect_kind(&file_name, &head).is_none() {
            return Err(UploadError::NotAnImage { file_name });
        }
        return Err(UploadError::TooLarge {
            size,
            max: max_bytes,
        });
    }

    let bytes = tokio::fs::read(path).await?;
    info!(path = %path.display(), size, "read upload");

    validate_upload(&file_name, bytes, max_bytes)
}

/// Media type from a recognized file extension, else sniffed from the content
fn detect_kind(file_name: &str, bytes: &[u8]) -> Option<ImageKind> {
    ImageKind::from_extension(Path::new(file_name)).or_else(|| {
        image::guess_format(bytes)
            .ok()
            .and_then(ImageKind::from_format)
    })
}
