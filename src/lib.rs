pub mod archive;
pub mod cli;
pub mod extract;
pub mod markdown;
pub mod page;
pub mod session;
pub mod utils;

pub use archive::{ArchiveBuilder, PageLocation};
pub use extract::{DiffRecord, Extractor};
pub use page::html::HtmlPage;
pub use page::DiffPage;
pub use session::ExportSession;
