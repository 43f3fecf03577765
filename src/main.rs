//! Dry-run client: builds classify options from `CLASSIFY_*` environment
//! variables, maps them onto the service request and prints the form as JSON.
//! Nothing is sent over the network.
//!
//! - `CLASSIFY_IMAGE`           = path to an image or zip file
//! - `CLASSIFY_IMAGE_TYPE`      = MIME type of that file
//! - `CLASSIFY_URL`             = remote image URL
//! - `CLASSIFY_OWNERS`          = comma-separated owners (`IBM,me`)
//! - `CLASSIFY_CLASSIFIER_IDS`  = comma-separated classifier IDs
//! - `CLASSIFY_THRESHOLD`       = minimum score (f32)
//! - `CLASSIFY_ACCEPT_LANGUAGE` = language of class names

use anyhow::Context;
use tracing::{Level, info, warn};
use tracing_subscriber::{Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};
use visual_recognition::{
    ClassifyOptions, ClassifyOptionsBuilder, config::default_config::config_from_env,
    error_handler::env_opt, request::ClassifyForm, telemetry,
};

fn main() -> anyhow::Result<()> {
    let dotenv = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(telemetry::env_filter_with_level("info", Level::DEBUG))
        .with(telemetry::layer())
        .with(
            fmt::layer()
                .with_target(false)
                .with_filter(tracing_subscriber::filter::filter_fn(|meta| {
                    !telemetry::is_library_target(meta.target())
                })),
        )
        .init();

    if let Err(err) = dotenv {
        warn!("no .env loaded: {err}");
    }

    let cfg = config_from_env().context("loading service config")?;
    let opts = options_from_env()?.build();
    if let Some(lang) = opts.accept_language() {
        if lang.parse::<visual_recognition::AcceptLanguage>().is_err() {
            warn!(lang, "accept-language is not a documented tag; passing it through");
        }
    }

    let form = ClassifyForm::from_options(&opts).context("encoding classify form")?;
    let json = serde_json::to_string_pretty(&form)?;

    let client = cfg.http_client()?;
    let request = form
        .into_request(&client, &cfg)?
        .build()
        .context("preparing classify request")?;
    info!(method = %request.method(), url = %request.url(), "classify request prepared");

    println!("{json}");
    Ok(())
}

fn options_from_env() -> anyhow::Result<ClassifyOptionsBuilder> {
    let mut builder = ClassifyOptions::builder();

    if let Some(path) = env_opt("CLASSIFY_IMAGE") {
        builder.images_file_path(&path)?;
    }
    if let Some(content_type) = env_opt("CLASSIFY_IMAGE_TYPE") {
        builder.images_file_content_type(content_type);
    }
    if let Some(url) = env_opt("CLASSIFY_URL") {
        builder.url(url);
    }
    for owner in list("CLASSIFY_OWNERS") {
        builder.add_owner(owner)?;
    }
    for id in list("CLASSIFY_CLASSIFIER_IDS") {
        builder.add_classifier_id(id)?;
    }
    if let Some(raw) = env_opt("CLASSIFY_THRESHOLD") {
        let threshold = raw
            .trim()
            .parse::<f32>()
            .with_context(|| format!("CLASSIFY_THRESHOLD={raw} is not a number"))?;
        builder.threshold(threshold);
    }
    if let Some(lang) = env_opt("CLASSIFY_ACCEPT_LANGUAGE") {
        builder.accept_language(lang);
    }

    Ok(builder)
}

fn list(var: &str) -> Vec<String> {
    env_opt(var)
        .map(|v| {
            v.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}
