//! Text acquisition: turns a [`Submission`] into a [`NormalizedContract`].

mod error;
mod pdf;

pub use error::{AcquireError, ExtractionError};
pub use pdf::{PdfExtractor, PdfTextExtractor};

use std::sync::Arc;

use clausecheck_core::{NormalizedContract, Submission};
use tracing::info;

/// Acquire contract text from a submission.
///
/// Text submissions pass through verbatim. PDF submissions are decoded on the
/// blocking pool; each page's text is followed by a newline, in page order.
/// Fails with [`AcquireError::EmptyInput`] when the result is blank.
pub async fn acquire(
    submission: Submission,
    extractor: Arc<dyn PdfExtractor>,
) -> Result<NormalizedContract, AcquireError> {
    let text = match submission {
        Submission::Text { body } => body,
        Submission::Pdf {
            bytes,
            declared_name,
        } => {
            info!(file = %declared_name, size = bytes.len(), "extracting PDF text");
            let pages = tokio::task::spawn_blocking(move || extractor.extract_pages(&bytes))
                .await
                .map_err(|e| ExtractionError::PdfParsing(format!("extraction task failed: {e}")))??;
            let text = join_pages(pages)?;
            info!(chars = text.chars().count(), "PDF text extraction complete");
            text
        }
    };
    normalize(text)
}

/// Concatenate page texts in order, each followed by a newline.
pub fn join_pages(pages: Vec<String>) -> Result<String, ExtractionError> {
    if pages.is_empty() {
        return Err(ExtractionError::NoPages);
    }
    let mut text = String::with_capacity(pages.iter().map(|p| p.len() + 1).sum());
    for page in pages {
        text.push_str(&page);
        text.push('\n');
    }
    Ok(text)
}

fn normalize(text: String) -> Result<NormalizedContract, AcquireError> {
    if text.trim().is_empty() {
        return Err(AcquireError::EmptyInput);
    }
    Ok(NormalizedContract { text })
}
