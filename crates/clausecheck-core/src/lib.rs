pub mod analysis;
pub mod contract;
pub mod text;

pub use analysis::{AnalysisResult, CLAUSE_CATEGORIES, ClauseFinding, ClauseStatus};
pub use contract::{AgreementRecord, NewAgreement, NormalizedContract, Submission};
pub use text::{COMPARE_CHAR_LIMIT, IDENTIFY_CHAR_LIMIT, truncate_chars};
