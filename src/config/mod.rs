// src/config/mod.rs

pub mod consts;
pub mod options;

pub use options::{AppOptions, CountMode, EntryOptions, EntryOrder, ExportOptions, ScrapeOptions};
