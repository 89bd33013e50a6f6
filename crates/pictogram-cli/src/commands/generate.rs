use std::path::Path;

use anyhow::Result;
use pictogram_core::generation::{GenerationResult, IconSource, ResolveRequest};
use pictogram_core::svg::{primary_path_data, recolor_for_display};
use serde::Serialize;
use tracing::warn;

use super::context::{build_resolver, load_config, open_history};
use super::output::{print_json, report_error};

pub struct GenerateOptions {
    pub json: bool,
    pub for_display: bool,
    pub record_history: bool,
}

/// JSON shape printed by `generate --json` and `ai --json`.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateOutput<'a> {
    #[serde(flatten)]
    result: &'a GenerationResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<String>,
    from_pattern: bool,
    from_iconify: bool,
}

impl<'a> GenerateOutput<'a> {
    fn new(result: &'a GenerationResult) -> Self {
        Self {
            result,
            path: primary_path_data(&result.svg),
            from_pattern: result.source == IconSource::Pattern,
            from_iconify: result.source == IconSource::Iconify,
        }
    }
}

fn request(prompt: &str, style: Option<String>) -> ResolveRequest {
    let request = ResolveRequest::new(prompt);
    match style {
        Some(style) => request.with_style(style),
        None => request,
    }
}

pub async fn run(
    base_dir: Option<&Path>,
    prompt: &str,
    style: Option<String>,
    options: GenerateOptions,
) -> Result<()> {
    let config = load_config(base_dir)?;
    let resolver = build_resolver(base_dir, &config).await?;

    let mut result = resolver
        .resolve(&request(prompt, style))
        .await
        .map_err(|err| report_error(err, options.json))?;

    if options.record_history {
        let history = open_history(base_dir, &config).await?;
        if let Err(err) = history.add(prompt, &result.svg).await {
            warn!("[CLI] Failed to record history: {}", err);
        }
    }

    if options.for_display {
        result.svg = recolor_for_display(&result.svg);
    }
    print_result(&result, options.json)
}

pub async fn run_ai(
    base_dir: Option<&Path>,
    prompt: &str,
    style: Option<String>,
    json: bool,
) -> Result<()> {
    let config = load_config(base_dir)?;
    let resolver = build_resolver(base_dir, &config).await?;
    let result = resolver
        .generate_with_ai(&request(prompt, style))
        .await
        .map_err(|err| report_error(err, json))?;
    print_result(&result, json)
}

pub fn print_result(result: &GenerationResult, json: bool) -> Result<()> {
    if json {
        print_json(&GenerateOutput::new(result))
    } else {
        println!("{}", result.svg);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_flags_and_path() {
        let result = GenerationResult::new(
            "<svg>\n  <path d=\"M0 0h4\" />\n</svg>",
            IconSource::Pattern,
        );
        let value = serde_json::to_value(GenerateOutput::new(&result)).unwrap();
        assert_eq!(value["source"], "pattern");
        assert_eq!(value["path"], "M0 0h4");
        assert_eq!(value["fromPattern"], true);
        assert_eq!(value["fromIconify"], false);
    }
}
