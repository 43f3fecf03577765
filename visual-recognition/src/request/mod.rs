//! Mapping of [`ClassifyOptions`](crate::model::ClassifyOptions) onto the
//! service's multipart `classify` request.

pub mod classify_form;

pub use classify_form::{ClassifyForm, ImagePart};
