//! Request model for the `classify` call.

pub mod accept_language;
pub mod classify_options;
pub mod image_data;

pub use accept_language::{AcceptLanguage, UnknownLanguage};
pub use classify_options::{ClassifyOptions, ClassifyOptionsBuilder};
pub use image_data::ImageData;
