// Shared utilities module
pub mod errors;
pub mod etag;
pub mod logging;
pub mod paths;

pub use errors::*;
pub use etag::*;
pub use logging::*;
pub use paths::*;
