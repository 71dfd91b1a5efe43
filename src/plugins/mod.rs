// Built-in plugins

pub mod svg_icons_ssr;

pub use svg_icons_ssr::SvgIconsSsrPlugin;
