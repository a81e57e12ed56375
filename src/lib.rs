// src/lib.rs

//! Navi: incremental crawler for recently edited Notion content.

pub mod error;
pub mod models;
pub mod pipeline;
pub mod render;
pub mod services;
pub mod source;
pub mod utils;
