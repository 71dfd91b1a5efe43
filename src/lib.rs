// svg-icons-ssr - SVG icons as virtual modules for server-side rendering
// Exposes the icon sprite markup and the icon names without a build step

pub mod config;
pub mod core;
pub mod plugins;
pub mod server;
pub mod utils;

pub use crate::config::{ScanOptions, SvgIconsSsrConfig};
pub use crate::core::models::{VirtualModule, MARKUP_MODULE_ID, NAMES_MODULE_ID};
pub use crate::plugins::SvgIconsSsrPlugin;
pub use crate::utils::{Result, SvgIconsError};
