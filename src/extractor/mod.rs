pub mod models;
pub mod options;
pub mod traits;
pub mod ytdlp;

pub use models::VideoInfo;
pub use options::{EngineOptions, OptionValue};
pub use traits::Extractor;
pub use ytdlp::YtDlpExtractor;
