//! Analysis run outcome

mod result;

pub use result::AnalysisResult;
