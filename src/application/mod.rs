pub mod normalizer;
pub mod screener;

pub use normalizer::{ParseError, normalize};
pub use screener::{AnalyzeOutcome, AnalyzeRequest, ChatAnswer, ScreenError, Screener};
