//! Command handlers for CLI operations
//!
//! This module implements the handlers for all CLI commands:
//! - features: List the feature catalogue
//! - run: Run a feature and render the narrative and chart
//! - request: Show the request a run would send
//! - doctor: Validate configuration and credential
//!
//! The CLI is a presentation layer: it rejects empty input before the
//! orchestrator is involved and picks the chart style from the feature.

use anyhow::Result;
use serde_json::json;

use crate::config::Config;
use crate::features::{lookup, Feature, StyleLabel};
use crate::orchestrator::{InvocationState, ResponseOrchestrator};
use crate::secrets::Credential;
use sdk::errors::EngineError;
use sdk::types::{FeatureResult, SeriesPoint};

/// Output format for command results
#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    /// Human-readable text output
    Text,
    /// JSON output for machine consumption
    Json,
}

/// Chart used to display a feature's series
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Radar,
    RadialGauge,
    Area,
    Line,
}

impl ChartKind {
    /// Chosen by feature, never by the shape of the returned series
    pub fn for_feature(feature: Feature) -> Self {
        match feature {
            Feature::StrategicOracle => ChartKind::Radar,
            Feature::EthicalMirror => ChartKind::RadialGauge,
            Feature::SentimentSymphony => ChartKind::Area,
            _ => ChartKind::Line,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ChartKind::Radar => "radar",
            ChartKind::RadialGauge => "gauge",
            ChartKind::Area => "area",
            ChartKind::Line => "line",
        }
    }
}

const BAR_WIDTH: usize = 30;

fn bar(value: f64, max: f64) -> String {
    if max <= 0.0 || !value.is_finite() {
        return String::new();
    }
    let filled = ((value.max(0.0) / max) * BAR_WIDTH as f64).round() as usize;
    "█".repeat(filled.min(BAR_WIDTH))
}

/// Render a series as text rows, one per point
pub fn render_series(kind: ChartKind, series: &[SeriesPoint]) -> Vec<String> {
    let max = match kind {
        // Radar and gauge values are scored 0-100
        ChartKind::Radar | ChartKind::RadialGauge => 100.0,
        ChartKind::Area | ChartKind::Line => series
            .iter()
            .flat_map(|p| std::iter::once(p.value).chain(p.prediction))
            .fold(0.0_f64, f64::max),
    };
    let width = series.iter().map(|p| p.name.chars().count()).max().unwrap_or(0);

    series
        .iter()
        .map(|point| {
            let mut row = format!(
                "  {:<width$}  {:>6.1} {}",
                point.name,
                point.value,
                bar(point.value, max),
                width = width
            );
            match kind {
                ChartKind::Radar => {
                    if let Some(full) = point.full_mark {
                        row.push_str(&format!(" /{}", full));
                    }
                }
                ChartKind::RadialGauge => {
                    if let Some(fill) = &point.fill {
                        row.push_str(&format!(" ({})", fill));
                    }
                }
                ChartKind::Area => {
                    if let Some(sentiment) = point.sentiment {
                        row.push_str(&format!(" sentiment {:.1}", sentiment));
                    }
                }
                ChartKind::Line => {
                    if let Some(prediction) = point.prediction {
                        row.push_str(&format!(" → {:.1}", prediction));
                    }
                }
            }
            row
        })
        .collect()
}

/// Reject blank text before any request is built
fn require_text(text: &str) -> Result<(), EngineError> {
    if text.trim().is_empty() {
        return Err(EngineError::InvalidInput("text must not be empty".to_string()));
    }
    Ok(())
}

/// List the feature catalogue
pub fn handle_features(format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => {
            println!("Available features:");
            println!();
            for feature in Feature::ALL {
                let chart = if lookup(feature).is_structured() {
                    ChartKind::for_feature(feature).label()
                } else {
                    "-"
                };
                println!(
                    "  {:<22} {:<10} chart: {}",
                    feature.id(),
                    feature.group(),
                    chart
                );
            }
        }
        OutputFormat::Json => {
            let output: Vec<_> = Feature::ALL
                .iter()
                .map(|&feature| {
                    let structured = lookup(feature).is_structured();
                    json!({
                        "id": feature.id(),
                        "group": feature.group().to_string(),
                        "structured": structured,
                        "chart": structured.then(|| ChartKind::for_feature(feature).label()),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }
    Ok(())
}

/// Run a feature against text and print the result
pub async fn handle_run(
    feature: &str,
    text: &str,
    style: &str,
    config: &Config,
    format: OutputFormat,
) -> Result<()> {
    let feature: Feature = feature.parse()?;
    let style = StyleLabel::new(style)?;
    require_text(text)?;

    let orchestrator = ResponseOrchestrator::from_config(config)?;

    let mut state = InvocationState::default();
    state.begin(feature);
    if let OutputFormat::Text = format {
        println!("Painting {} in the style of {}...", feature, style);
        println!();
    }

    let outcome = orchestrator.try_generate(feature, text, &style).await;
    if let Err(e) = &outcome {
        tracing::error!(%feature, "Generation failed: {}", e);
    }
    state.complete(outcome, orchestrator.placeholder());

    let (status, result) = match &state {
        InvocationState::Succeeded(result) => ("succeeded", result),
        InvocationState::Failed(result) => ("failed", result),
        _ => return Err(anyhow::anyhow!("invocation did not settle")),
    };

    match format {
        OutputFormat::Text => print_result(feature, result),
        OutputFormat::Json => {
            let output = json!({
                "status": status,
                "provider": orchestrator.provider_name(),
                "feature": feature,
                "style": style,
                "result": result,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}

fn print_result(feature: Feature, result: &FeatureResult) {
    println!("{}", result.narrative);

    if let Some(series) = result.series.as_deref().filter(|s| !s.is_empty()) {
        let kind = ChartKind::for_feature(feature);
        println!();
        println!("Chart ({}):", kind.label());
        for row in render_series(kind, series) {
            println!("{}", row);
        }
    }
}

/// Print the request a run would send
pub fn handle_request(feature: &str, text: &str, style: &str, format: OutputFormat) -> Result<()> {
    let feature: Feature = feature.parse()?;
    let style = StyleLabel::new(style)?;
    require_text(text)?;

    let request = crate::orchestrator::request::build_request(lookup(feature), text, &style);

    match format {
        OutputFormat::Text => {
            println!("Feature:            {}", feature);
            println!("System instruction: {}", request.system_instruction);
            println!("Content:            {}", request.content);
            match &request.schema {
                Some(schema) => println!(
                    "Response schema:    {}",
                    serde_json::to_string_pretty(schema)?
                ),
                None => println!("Response schema:    (free text)"),
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&request)?);
        }
    }
    Ok(())
}

/// Validate configuration and credential
pub fn handle_doctor(config: &Config, format: OutputFormat) -> Result<()> {
    let mut issues = Vec::new();
    let mut checks: Vec<(&str, String)> = Vec::new();

    // Config is already validated when loaded
    checks.push(("Configuration", "Valid".to_string()));

    match Config::default_config_path() {
        Ok(path) => checks.push(("Config path", path.display().to_string())),
        Err(e) => issues.push(e.to_string()),
    }

    checks.push(("Model", config.llm.gemini.model.clone()));
    checks.push(("Endpoint", config.llm.gemini.base_url.clone()));

    let key_var = &config.llm.gemini.api_key_env;
    if Credential::is_present(key_var) {
        checks.push(("API key", format!("Set (${})", key_var)));
    } else {
        checks.push(("API key", format!("Missing (${})", key_var)));
        issues.push(format!(
            "Environment variable {} is not set. Export your Gemini API key to run features.",
            key_var
        ));
    }

    match config.orchestrator.timeout_secs {
        Some(secs) => checks.push(("Call deadline", format!("{}s", secs))),
        None => checks.push(("Call deadline", "None".to_string())),
    }

    match format {
        OutputFormat::Text => {
            println!("Atelier Diagnostics");
            println!("===================");
            println!();

            for (check, status) in &checks {
                println!("  {:<16} {}", format!("{}:", check), status);
            }

            println!();

            if issues.is_empty() {
                println!("✓ All checks passed!");
            } else {
                println!("⚠ Issues found:");
                println!();
                for (i, issue) in issues.iter().enumerate() {
                    println!("  {}. {}", i + 1, issue);
                }
            }
        }
        OutputFormat::Json => {
            let output = json!({
                "checks": checks.iter().map(|(name, status)| {
                    json!({
                        "name": name,
                        "status": status
                    })
                }).collect::<Vec<_>>(),
                "issues": issues,
                "healthy": issues.is_empty()
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}
