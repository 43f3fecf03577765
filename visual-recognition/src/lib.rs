//! Options, builder and request mapping for the Visual Recognition v3
//! `classify` call.
//!
//! ```
//! use visual_recognition::model::{AcceptLanguage, ClassifyOptions};
//! use visual_recognition::request::ClassifyForm;
//!
//! # fn main() -> visual_recognition::error_handler::Result<()> {
//! let opts = ClassifyOptions::builder()
//!     .url("https://example.com/fruitbowl.jpg")
//!     .add_owner("IBM".to_string())?
//!     .add_owner("me".to_string())?
//!     .accept_language(AcceptLanguage::Es)
//!     .build();
//!
//! let form = ClassifyForm::from_options(&opts)?;
//! assert_eq!(form.field("owners"), Some("IBM,me"));
//! # Ok(()) }
//! ```

pub mod config;
pub mod error_handler;
pub mod model;
pub mod request;
pub mod telemetry;

pub use error_handler::{Result, VisualRecognitionError};
pub use model::{AcceptLanguage, ClassifyOptions, ClassifyOptionsBuilder, ImageData};
