use thiserror::Error;

/// The submitted document could not be turned into text.
#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error("No file uploaded")]
    MissingSubmission,

    #[error("Failed to parse PDF file. Please ensure it is a valid PDF: {0}")]
    PdfParsing(String),

    #[error("PDF document has no pages")]
    NoPages,
}

#[derive(Error, Debug)]
pub enum AcquireError {
    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    #[error("No contract text found in request")]
    EmptyInput,
}
