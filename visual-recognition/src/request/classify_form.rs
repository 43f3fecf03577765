//! Wire shape of `POST {endpoint}/v3/classify`.
//!
//! - `images_file` → multipart file part (filename + content type)
//! - `url`, `threshold`, `parameters` → text fields
//! - `owners`, `classifier_ids` → comma-joined text fields
//! - `accept_language` → `Accept-Language` header
//! - API version → `version` query parameter
//!
//! Nothing is dropped or reconciled: when both `url` and `images_file` are
//! present, both are sent.

use reqwest::header::ACCEPT_LANGUAGE;
use reqwest::multipart::{Form, Part};
use serde::Serialize;
use tracing::{debug, instrument};

use crate::config::service_config::ServiceConfig;
use crate::error_handler::Result;
use crate::model::ClassifyOptions;

/// Content type used when the caller did not set one.
pub const DEFAULT_IMAGE_CONTENT_TYPE: &str = "application/octet-stream";

/// The file part of the form.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImagePart {
    pub filename: Option<String>,
    pub content_type: String,
    /// Dry-run output shows only the byte count, as `len`.
    #[serde(rename = "len", serialize_with = "serialize_len")]
    pub bytes: Vec<u8>,
}

/// Encoded classify request, independent of the HTTP client.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassifyForm {
    /// Value of the `Accept-Language` header.
    pub accept_language: Option<String>,
    /// Text fields in send order.
    pub fields: Vec<(&'static str, String)>,
    pub images_file: Option<ImagePart>,
}

impl ClassifyForm {
    /// Maps options onto the form.
    ///
    /// Drains the image stream, so a second call on the same options (or any
    /// options sharing that stream) yields an empty file part.
    ///
    /// # Errors
    /// [`VisualRecognitionError::ImageRead`](crate::error_handler::VisualRecognitionError::ImageRead)
    /// if the image stream fails.
    #[instrument(skip_all)]
    pub fn from_options(opts: &ClassifyOptions) -> Result<Self> {
        let images_file = match opts.images_file() {
            Some(data) => {
                let bytes = data.read_all()?;
                Some(ImagePart {
                    filename: opts.images_filename().map(str::to_string),
                    content_type: opts
                        .images_file_content_type()
                        .unwrap_or(DEFAULT_IMAGE_CONTENT_TYPE)
                        .to_string(),
                    bytes,
                })
            }
            None => None,
        };

        let mut fields = Vec::new();
        if let Some(url) = opts.url() {
            fields.push(("url", url.to_string()));
        }
        if let Some(threshold) = opts.threshold() {
            fields.push(("threshold", format_threshold(threshold)));
        }
        if let Some(owners) = opts.owners() {
            fields.push(("owners", owners.join(",")));
        }
        if let Some(ids) = opts.classifier_ids() {
            fields.push(("classifier_ids", ids.join(",")));
        }
        #[allow(deprecated)]
        let legacy = opts.parameters();
        if let Some(parameters) = legacy {
            fields.push(("parameters", parameters.to_string()));
        }

        debug!(
            fields = fields.len(),
            image_bytes = images_file.as_ref().map(|p| p.bytes.len()),
            accept_language = ?opts.accept_language(),
            "classify form encoded"
        );

        Ok(Self {
            accept_language: opts.accept_language().map(str::to_string),
            fields,
            images_file,
        })
    }

    /// First text field named `name`.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Converts into a `reqwest` multipart form.
    ///
    /// # Errors
    /// [`VisualRecognitionError::HttpTransport`](crate::error_handler::VisualRecognitionError::HttpTransport)
    /// if the image content type is not a valid MIME type.
    pub fn into_multipart(self) -> Result<Form> {
        let mut form = Form::new();
        if let Some(image) = self.images_file {
            let mut part = Part::bytes(image.bytes);
            if let Some(name) = image.filename {
                part = part.file_name(name);
            }
            form = form.part("images_file", part.mime_str(&image.content_type)?);
        }
        for (name, value) in self.fields {
            form = form.text(name, value);
        }
        Ok(form)
    }

    /// Prepares (but does not send) the classify request.
    ///
    /// # Errors
    /// Same as [`Self::into_multipart`].
    pub fn into_request(
        self,
        client: &reqwest::Client,
        cfg: &ServiceConfig,
    ) -> Result<reqwest::RequestBuilder> {
        let url = cfg.classify_url();
        debug!("POST {}", url);

        let mut req = client
            .post(url)
            .query(&[("version", cfg.version.as_str())]);
        if let Some(lang) = &self.accept_language {
            req = req.header(ACCEPT_LANGUAGE, lang.as_str());
        }
        Ok(req.multipart(self.into_multipart()?))
    }
}

fn serialize_len<S>(bytes: &[u8], serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_u64(bytes.len() as u64)
}

/// Whole numbers keep one decimal (`0.0`, `1.0`); others use the shortest form.
fn format_threshold(threshold: f32) -> String {
    if threshold.is_finite() && threshold.fract() == 0.0 {
        format!("{threshold:.1}")
    } else {
        threshold.to_string()
    }
}
