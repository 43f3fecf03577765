//! Options for a single `classify` call.
//!
//! [`ClassifyOptions`] is frozen once built. Everything is set through
//! [`ClassifyOptionsBuilder`], either starting empty via
//! [`ClassifyOptions::builder`] or copied from an existing instance via
//! [`ClassifyOptions::new_builder`].
//!
//! No field is required. An empty options value is valid and lets the service
//! pick its defaults (built-in `default` classifier, English class names).
//!
//! Cross-field conflicts are not resolved here: `url` together with
//! `images_file`, or `owners` together with `classifier_ids`, are forwarded
//! as given and the service decides (`classifier_ids` overrides `owners`).
//!
//! # Examples
//!
//! ```
//! use visual_recognition::model::ClassifyOptions;
//!
//! # fn main() -> visual_recognition::error_handler::Result<()> {
//! let opts = ClassifyOptions::builder()
//!     .add_classifier_id("default".to_string())?
//!     .add_classifier_id("food".to_string())?
//!     .threshold(0.5)
//!     .build();
//!
//! assert_eq!(opts.classifier_ids(), Some(&["default".to_string(), "food".to_string()][..]));
//! assert_eq!(opts.owners(), None);
//! # Ok(()) }
//! ```

use std::fs::File;
use std::path::Path;

use tracing::debug;

use crate::error_handler::{Result, VisualRecognitionError, require_present};
use crate::model::image_data::ImageData;

/// Parameters of one classification request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassifyOptions {
    images_file: Option<ImageData>,
    images_filename: Option<String>,
    images_file_content_type: Option<String>,
    accept_language: Option<String>,
    url: Option<String>,
    threshold: Option<f32>,
    owners: Option<Vec<String>>,
    classifier_ids: Option<Vec<String>>,
    parameters: Option<String>,
}

/// Mutable accumulator for [`ClassifyOptions`].
///
/// Setters take `&mut self` and return `&mut Self` so calls chain; the two
/// fallible ones return `Result<&mut Self>` and leave the builder untouched
/// on error.
#[derive(Debug, Clone, Default)]
pub struct ClassifyOptionsBuilder {
    images_file: Option<ImageData>,
    images_filename: Option<String>,
    images_file_content_type: Option<String>,
    accept_language: Option<String>,
    url: Option<String>,
    threshold: Option<f32>,
    owners: Option<Vec<String>>,
    classifier_ids: Option<Vec<String>>,
    parameters: Option<String>,
}

impl ClassifyOptionsBuilder {
    /// Empty builder; equivalent to [`ClassifyOptions::builder`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshots the current values into a new [`ClassifyOptions`].
    ///
    /// Never fails and may be called repeatedly. Sequences are cloned, so
    /// later builder mutations do not leak into already built values. The
    /// image stream is shared, not copied.
    pub fn build(&self) -> ClassifyOptions {
        ClassifyOptions {
            images_file: self.images_file.clone(),
            images_filename: self.images_filename.clone(),
            images_file_content_type: self.images_file_content_type.clone(),
            accept_language: self.accept_language.clone(),
            url: self.url.clone(),
            threshold: self.threshold,
            owners: self.owners.clone(),
            classifier_ids: self.classifier_ids.clone(),
            parameters: self.parameters.clone(),
        }
    }

    /// Appends one owner (`IBM`, `me`). Order is kept, duplicates are kept,
    /// and any string (including an empty one) is appended as given.
    ///
    /// Accepts a `String` or an `Option<String>`.
    ///
    /// # Errors
    /// [`VisualRecognitionError::InvalidArgument`] if `owner` is `None`.
    pub fn add_owner(&mut self, owner: impl Into<Option<String>>) -> Result<&mut Self> {
        let owner = require_present(owner.into(), "owner cannot be null")?;
        self.owners.get_or_insert_with(Vec::new).push(owner);
        Ok(self)
    }

    /// Appends one classifier ID (`default`, `food`, `explicit`, or a custom ID).
    ///
    /// # Errors
    /// [`VisualRecognitionError::InvalidArgument`] if `classifier_id` is `None`.
    pub fn add_classifier_id(
        &mut self,
        classifier_id: impl Into<Option<String>>,
    ) -> Result<&mut Self> {
        let classifier_id = require_present(classifier_id.into(), "classifier_id cannot be null")?;
        self.classifier_ids
            .get_or_insert_with(Vec::new)
            .push(classifier_id);
        Ok(self)
    }

    /// Replaces the owners, including any added with [`Self::add_owner`].
    pub fn owners<I, S>(&mut self, owners: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.owners = Some(owners.into_iter().map(Into::into).collect());
        self
    }

    /// Replaces the classifier IDs, including any added with [`Self::add_classifier_id`].
    pub fn classifier_ids<I, S>(&mut self, classifier_ids: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.classifier_ids = Some(classifier_ids.into_iter().map(Into::into).collect());
        self
    }

    /// Attaches a caller-supplied image stream.
    pub fn images_file(&mut self, images_file: ImageData) -> &mut Self {
        self.images_file = Some(images_file);
        self
    }

    /// Opens `path` for reading and uses it as the image stream.
    ///
    /// Also sets `images_filename` to the file's base name. The file stays
    /// open until the last options value sharing it is dropped.
    ///
    /// # Errors
    /// [`VisualRecognitionError::FileNotFound`] if the path cannot be opened
    /// or is not a regular file (e.g. a directory). The builder is unchanged.
    pub fn images_file_path(&mut self, path: impl AsRef<Path>) -> Result<&mut Self> {
        let path = path.as_ref();
        let not_found = |source| VisualRecognitionError::FileNotFound {
            path: path.to_path_buf(),
            source,
        };
        let file = File::open(path).map_err(not_found)?;
        if !file.metadata().map_err(not_found)?.is_file() {
            return Err(not_found(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "not a regular file",
            )));
        }
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned());

        debug!(path = %path.display(), filename = ?filename, "opened image file");

        self.images_file = Some(ImageData::from_reader(file));
        self.images_filename = filename;
        Ok(self)
    }

    /// Filename sent with the image part.
    pub fn images_filename(&mut self, images_filename: impl Into<String>) -> &mut Self {
        self.images_filename = Some(images_filename.into());
        self
    }

    /// MIME type of the image part (e.g. `image/jpeg`, `application/zip`).
    pub fn images_file_content_type(&mut self, content_type: impl Into<String>) -> &mut Self {
        self.images_file_content_type = Some(content_type.into());
        self
    }

    /// Language for class names. Unknown tags are passed through verbatim.
    pub fn accept_language(&mut self, accept_language: impl Into<String>) -> &mut Self {
        self.accept_language = Some(accept_language.into());
        self
    }

    pub fn url(&mut self, url: impl Into<String>) -> &mut Self {
        self.url = Some(url.into());
        self
    }

    pub fn threshold(&mut self, threshold: f32) -> &mut Self {
        self.threshold = Some(threshold);
        self
    }

    /// Legacy JSON parameter blob, sent as-is.
    #[deprecated(note = "replaced by the top-level url, threshold, owners and classifier_ids")]
    pub fn parameters(&mut self, parameters: impl Into<String>) -> &mut Self {
        self.parameters = Some(parameters.into());
        self
    }
}

impl ClassifyOptions {
    /// Empty builder.
    pub fn builder() -> ClassifyOptionsBuilder {
        ClassifyOptionsBuilder::default()
    }

    /// Builder pre-populated with every field of `self`.
    pub fn new_builder(&self) -> ClassifyOptionsBuilder {
        ClassifyOptionsBuilder {
            images_file: self.images_file.clone(),
            images_filename: self.images_filename.clone(),
            images_file_content_type: self.images_file_content_type.clone(),
            accept_language: self.accept_language.clone(),
            url: self.url.clone(),
            threshold: self.threshold,
            owners: self.owners.clone(),
            classifier_ids: self.classifier_ids.clone(),
            parameters: self.parameters.clone(),
        }
    }

    /// An image file (`.jpg`, `.png`) or `.zip` file with images.
    ///
    /// Maximum image size is 10 MB; include no more than 20 images and limit
    /// the `.zip` file to 100 MB. Images can also be passed with [`Self::url`].
    pub fn images_file(&self) -> Option<&ImageData> {
        self.images_file.as_ref()
    }

    /// The filename for [`Self::images_file`].
    pub fn images_filename(&self) -> Option<&str> {
        self.images_filename.as_deref()
    }

    /// The content type of [`Self::images_file`].
    pub fn images_file_content_type(&self) -> Option<&str> {
        self.images_file_content_type.as_deref()
    }

    /// The language of the output class names.
    ///
    /// Only the built-in classifiers are translated. The response may not be
    /// in this language when it is unsupported or has no translation.
    pub fn accept_language(&self) -> Option<&str> {
        self.accept_language.as_deref()
    }

    /// The URL of an image to analyze (`.jpg` or `.png`, at most 10 MB).
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    /// Minimum score a class must have to be returned. `0.0` returns all classes.
    pub fn threshold(&self) -> Option<f32> {
        self.threshold
    }

    /// Categories of classifiers to apply: `IBM` for the built-in `default`
    /// classifier, `me` for custom classifiers, or both.
    ///
    /// Ignored by the service when [`Self::classifier_ids`] is non-empty.
    pub fn owners(&self) -> Option<&[String]> {
        self.owners.as_deref()
    }

    /// Which classifiers to apply. Overrides [`Self::owners`].
    ///
    /// Built-in IDs needing no training: `default`, `food`, `explicit`.
    /// The `default` classifier is used when both this and owners are empty.
    pub fn classifier_ids(&self) -> Option<&[String]> {
        self.classifier_ids.as_deref()
    }

    #[deprecated(note = "replaced by the top-level url, threshold, owners and classifier_ids")]
    pub fn parameters(&self) -> Option<&str> {
        self.parameters.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn strings(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    #[allow(deprecated)]
    fn empty_builder_leaves_everything_unset() {
        let opts = ClassifyOptions::builder().build();
        assert!(opts.images_file().is_none());
        assert_eq!(opts.images_filename(), None);
        assert_eq!(opts.images_file_content_type(), None);
        assert_eq!(opts.accept_language(), None);
        assert_eq!(opts.url(), None);
        assert_eq!(opts.threshold(), None);
        assert_eq!(opts.owners(), None);
        assert_eq!(opts.classifier_ids(), None);
        assert_eq!(opts.parameters(), None);
        assert_eq!(opts, ClassifyOptions::default());
    }

    #[test]
    fn classifier_ids_and_threshold() {
        let opts = ClassifyOptions::builder()
            .add_classifier_id("default".to_string())
            .unwrap()
            .add_classifier_id("food".to_string())
            .unwrap()
            .threshold(0.5)
            .build();

        assert_eq!(opts.classifier_ids(), Some(&strings(&["default", "food"])[..]));
        assert_eq!(opts.threshold(), Some(0.5));
        assert_eq!(opts.owners(), None);
        assert_eq!(opts.url(), None);
    }

    #[test]
    fn add_owner_keeps_order_and_duplicates() {
        let mut b = ClassifyOptions::builder();
        for owner in ["me", "IBM", "me"] {
            b.add_owner(owner.to_string()).unwrap();
        }
        assert_eq!(b.build().owners(), Some(&strings(&["me", "IBM", "me"])[..]));
    }

    #[test]
    fn list_setters_replace_added_entries() {
        let mut b = ClassifyOptions::builder();
        b.add_owner("me".to_string())
            .unwrap()
            .add_owner("IBM".to_string())
            .unwrap();
        b.owners(["IBM"]);
        b.add_classifier_id("food".to_string()).unwrap();
        b.classifier_ids(Vec::<String>::new());

        let opts = b.build();
        assert_eq!(opts.owners(), Some(&strings(&["IBM"])[..]));
        assert_eq!(opts.classifier_ids(), Some(&[][..]));
    }

    #[test]
    fn absent_entries_are_rejected_without_side_effects() {
        let mut b = ClassifyOptions::builder();
        b.add_owner("IBM".to_string()).unwrap();

        let err = b.add_owner(None).unwrap_err();
        assert!(matches!(err, VisualRecognitionError::InvalidArgument(_)));
        let err = b.add_classifier_id(None).unwrap_err();
        assert!(matches!(err, VisualRecognitionError::InvalidArgument(_)));

        let opts = b.build();
        assert_eq!(opts.owners(), Some(&strings(&["IBM"])[..]));
        assert_eq!(opts.classifier_ids(), None);
    }

    #[test]
    fn blank_entries_are_appended_as_given() {
        let mut b = ClassifyOptions::builder();
        b.add_owner(String::new()).unwrap();
        b.add_owner(Some("me".to_string())).unwrap();
        b.add_classifier_id(" ".to_string()).unwrap();

        let opts = b.build();
        assert_eq!(opts.owners(), Some(&strings(&["", "me"])[..]));
        assert_eq!(opts.classifier_ids(), Some(&strings(&[" "])[..]));
    }

    #[test]
    #[allow(deprecated)]
    fn new_builder_round_trips_every_field() {
        let original = ClassifyOptions::builder()
            .images_file(ImageData::from_bytes(vec![1, 2, 3]))
            .images_filename("cat.jpg")
            .images_file_content_type("image/jpeg")
            .accept_language("ja")
            .url("https://example.com/cat.jpg")
            .threshold(0.0)
            .owners(["IBM", "me"])
            .classifier_ids(["default"])
            .parameters(r#"{"threshold":0.6}"#)
            .build();

        let copy = original.new_builder().build();
        assert_eq!(copy, original);
        assert!(copy.images_file().unwrap().ptr_eq(original.images_file().unwrap()));
        assert_eq!(copy.threshold(), Some(0.0));
        assert_eq!(copy.parameters(), Some(r#"{"threshold":0.6}"#));
    }

    #[test]
    fn new_builder_does_not_touch_source() {
        let original = ClassifyOptions::builder().url("https://a").build();
        let changed = original.new_builder().url("https://b").build();
        assert_eq!(original.url(), Some("https://a"));
        assert_eq!(changed.url(), Some("https://b"));
    }

    #[test]
    fn build_snapshots_are_independent() {
        let mut b = ClassifyOptions::builder();
        b.add_owner("IBM".to_string()).unwrap();
        let first = b.build();
        b.add_owner("me".to_string()).unwrap();
        let second = b.build();

        assert_eq!(first.owners(), Some(&strings(&["IBM"])[..]));
        assert_eq!(second.owners(), Some(&strings(&["IBM", "me"])[..]));
    }

    #[test]
    fn conflicting_fields_are_kept_as_given() {
        let opts = ClassifyOptions::builder()
            .url("https://example.com/dog.png")
            .images_file(ImageData::from_bytes(b"png".to_vec()))
            .owners(["IBM"])
            .classifier_ids(["food"])
            .accept_language("tlh")
            .build();
        assert!(opts.url().is_some() && opts.images_file().is_some());
        assert!(opts.owners().is_some() && opts.classifier_ids().is_some());
        assert_eq!(opts.accept_language(), Some("tlh"));
    }

    #[test]
    fn image_from_file_sets_base_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cat.jpg");
        let mut f = File::create(&path).unwrap();
        f.write_all(b"\xFF\xD8\xFFjpeg-bytes").unwrap();
        drop(f);

        let opts = ClassifyOptions::builder()
            .images_file_path(&path)
            .unwrap()
            .build();

        assert_eq!(opts.images_filename(), Some("cat.jpg"));
        let bytes = opts.images_file().unwrap().read_all().unwrap();
        assert_eq!(bytes, b"\xFF\xD8\xFFjpeg-bytes");
    }

    #[test]
    fn image_from_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.jpg");

        let mut b = ClassifyOptions::builder();
        let err = b.images_file_path(&missing).unwrap_err();
        match err {
            VisualRecognitionError::FileNotFound { path, .. } => assert_eq!(path, missing),
            other => panic!("unexpected error: {other}"),
        }
        let opts = b.build();
        assert!(opts.images_file().is_none());
        assert_eq!(opts.images_filename(), None);
    }

    #[test]
    fn image_from_directory_fails() {
        let dir = tempfile::tempdir().unwrap();

        let mut b = ClassifyOptions::builder();
        let err = b.images_file_path(dir.path()).unwrap_err();
        match err {
            VisualRecognitionError::FileNotFound { path, .. } => assert_eq!(path, dir.path()),
            other => panic!("unexpected error: {other}"),
        }
        let opts = b.build();
        assert!(opts.images_file().is_none());
        assert_eq!(opts.images_filename(), None);
    }

    #[test]
    fn built_options_are_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ClassifyOptions>();
    }
}
