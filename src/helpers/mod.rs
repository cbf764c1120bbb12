//! Helper functions shared by the block renderers and page chrome

mod html;

pub use html::*;
