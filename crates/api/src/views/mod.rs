//! Server-rendered HTML pages and SVG charts.

pub mod charts;
pub mod format;
pub mod pages;
