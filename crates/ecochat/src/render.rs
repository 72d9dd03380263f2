// SPDX-FileCopyrightText: 2026 Ecochat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Terminal rendering for chat usage, the model catalog, and the dashboard.
//!
//! Every function returns a `String` so output can be tested without a TTY.
//! Number formatting happens here and nowhere else.

use std::fmt::Write;

use colored::Colorize;
use ecochat_core::insights::{Equivalents, Overview, TimelinePoint};
use ecochat_core::{Provider, UsageRecord};
use ecochat_insights::{
    DashboardSnapshot, EfficiencyTier, HeatmapCell, ModelCard, heatmap_alpha, heatmap_hue,
};
use strum::IntoEnumIterator;

/// Width of the longest timeline bar, in characters.
const BAR_WIDTH: usize = 30;

/// One-line usage summary shown after each reply.
pub fn format_usage(usage: &UsageRecord) -> String {
    let mut line = format!(
        "{} in / {} out tokens · €{:.4} · {:.3} gCO₂e",
        usage.input_tokens, usage.output_tokens, usage.cost_eur, usage.est_co2e_g
    );
    if usage.est_kwh > 0.0 {
        let _ = write!(line, " · {:.5} kWh", usage.est_kwh);
    }
    line
}

/// The model catalog, marking `current` and disabled entries.
pub fn render_catalog(provider: Option<Provider>, current: Option<&str>) -> String {
    let mut out = String::new();
    let providers = match provider {
        Some(p) => vec![p],
        None => Provider::iter().collect(),
    };
    for p in providers {
        let _ = writeln!(out, "{}", p.to_string().bold());
        for entry in p.models() {
            let marker = if Some(entry.id) == current { "*" } else { " " };
            if entry.enabled {
                let _ = writeln!(out, "  {marker} {:<28} {}", entry.id, entry.label);
            } else {
                let _ = writeln!(
                    out,
                    "  {marker} {:<28} {}",
                    entry.id.dimmed(),
                    format!("{} (disabled)", entry.label).dimmed()
                );
            }
        }
    }
    out
}

/// Full dashboard for a snapshot.
pub fn render_dashboard(snapshot: &DashboardSnapshot, color: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} ({}, loaded {})",
        "ecochat insights".bold().green(),
        snapshot.granularity,
        snapshot.loaded_at.format("%Y-%m-%d %H:%M UTC")
    );
    out.push('\n');
    render_overview(&mut out, &snapshot.overview);
    render_equivalents(&mut out, &snapshot.equivalents);
    render_timeline(&mut out, &snapshot.timeline);
    render_models(&mut out, &snapshot.models);
    render_heatmap(&mut out, &snapshot.heatmap, color);
    render_recommendations(&mut out, &snapshot.recommendations);
    out
}

fn section(out: &mut String, title: &str) {
    let _ = writeln!(out, "{}", title.bold());
}

fn render_overview(out: &mut String, overview: &Overview) {
    section(out, "Overview");
    let _ = writeln!(out, "  requests        {}", overview.total_requests);
    if let Some(tokens) = overview.total_tokens {
        let _ = writeln!(out, "  tokens          {tokens}");
    }
    let _ = writeln!(out, "  carbon          {:.2} gCO₂e", overview.total_carbon_gco2eq);
    let _ = writeln!(out, "  energy          {:.4} kWh", overview.total_energy_kwh);
    let _ = writeln!(
        out,
        "  per request     {:.3} gCO₂e",
        overview.avg_carbon_per_request
    );
    if let Some(range) = &overview.date_range {
        let _ = writeln!(out, "  period          {} → {}", range.start, range.end);
    }
    out.push('\n');
}

fn render_equivalents(out: &mut String, eq: &Equivalents) {
    section(out, "Equivalent to");
    let _ = writeln!(out, "  {:.1} hours of streaming video", eq.netflix_hours);
    let _ = writeln!(out, "  {:.0} emails sent", eq.emails_sent);
    let _ = writeln!(out, "  {:.2} km by car", eq.km_car);
    let _ = writeln!(out, "  {:.1} smartphone charges", eq.smartphone_charges);
    let _ = writeln!(out, "  {:.3} trees to absorb it for a year", eq.trees_needed);
    out.push('\n');
}

fn render_timeline(out: &mut String, timeline: &[TimelinePoint]) {
    section(out, "Timeline");
    if timeline.is_empty() {
        let _ = writeln!(out, "  {}", "no data".dimmed());
        out.push('\n');
        return;
    }
    let max = timeline
        .iter()
        .map(|p| p.carbon_gco2eq)
        .fold(0.0_f64, f64::max);
    for point in timeline {
        let bar_len = if max > 0.0 {
            ((point.carbon_gco2eq / max) * BAR_WIDTH as f64).round() as usize
        } else {
            0
        };
        let _ = writeln!(
            out,
            "  {:<16} {:<width$} {:>8.2} gCO₂e  {:>4} req",
            point.date,
            "█".repeat(bar_len),
            point.carbon_gco2eq,
            point.requests,
            width = BAR_WIDTH
        );
    }
    out.push('\n');
}

fn tier_badge(tier: EfficiencyTier) -> String {
    let text = tier.to_string();
    match tier {
        EfficiencyTier::Excellent => text.green().to_string(),
        EfficiencyTier::Good => text.yellow().to_string(),
        EfficiencyTier::Poor => text.red().to_string(),
    }
}

fn render_models(out: &mut String, models: &[ModelCard]) {
    section(out, "Models");
    if models.is_empty() {
        let _ = writeln!(out, "  {}", "no data".dimmed());
    }
    for card in models {
        let _ = writeln!(
            out,
            "  {:<22} {:>3}/100 {:<10} {:>6} req  {:>8.3} gCO₂e/1k tok",
            card.label,
            card.stat.efficiency_score,
            tier_badge(card.tier),
            card.stat.requests,
            card.stat.carbon_per_1k_tokens
        );
    }
    out.push('\n');
}

/// RGB for an HSL colour with fixed saturation and lightness.
fn hue_to_rgb(hue: f64) -> (u8, u8, u8) {
    let (s, l) = (0.7, 0.5);
    let c = (1.0 - (2.0 * l - 1.0_f64).abs()) * s;
    let h = (hue.rem_euclid(360.0)) / 60.0;
    let x = c * (1.0 - (h % 2.0 - 1.0).abs());
    let (r, g, b) = match h as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let m = l - c / 2.0;
    let to_byte = |v: f64| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
    (to_byte(r), to_byte(g), to_byte(b))
}

/// Shade glyph for terminals without colour.
fn shade(normalized: f64) -> char {
    match normalized {
        n if n >= 0.75 => '█',
        n if n >= 0.5 => '▓',
        n if n >= 0.25 => '▒',
        _ => '░',
    }
}

fn heat_glyph(cell: &HeatmapCell, color: bool) -> String {
    if !color {
        return shade(cell.normalized_intensity).to_string();
    }
    let (r, g, b) = hue_to_rgb(heatmap_hue(cell.normalized_intensity));
    let alpha = heatmap_alpha(cell.normalized_intensity);
    let dim = |v: u8| (f64::from(v) * alpha).round() as u8;
    "█".truecolor(dim(r), dim(g), dim(b)).to_string()
}

fn render_heatmap(out: &mut String, cells: &[HeatmapCell], color: bool) {
    section(out, "Carbon intensity by hour");
    let mut row = String::from("  ");
    for hour in 0..24u8 {
        match cells.iter().find(|c| c.hour == hour) {
            Some(cell) => row.push_str(&heat_glyph(cell, color)),
            None => row.push('·'),
        }
    }
    let _ = writeln!(out, "{row}");
    let _ = writeln!(out, "  0     6     12    18   23");
    if let Some(peak) = cells
        .iter()
        .max_by(|a, b| a.intensity.total_cmp(&b.intensity))
        .filter(|c| c.intensity > 0.0)
    {
        let _ = writeln!(
            out,
            "  peak {:02}:00 ({:.3} gCO₂e per request)",
            peak.hour, peak.intensity
        );
    }
    out.push('\n');
}

fn render_recommendations(out: &mut String, recommendations: &serde_json::Value) {
    section(out, "Recommendations");
    match recommendations {
        serde_json::Value::Null => {
            let _ = writeln!(out, "  {}", "none".dimmed());
        }
        serde_json::Value::String(s) => {
            let _ = writeln!(out, "  {s}");
        }
        serde_json::Value::Array(items) => {
            for item in items {
                let _ = writeln!(out, "  • {}", display_value(item));
            }
        }
        serde_json::Value::Object(map) => {
            for (key, value) in map {
                match value {
                    serde_json::Value::Array(items) => {
                        let _ = writeln!(out, "  {key}:");
                        for item in items {
                            let _ = writeln!(out, "    • {}", display_value(item));
                        }
                    }
                    other => {
                        let _ = writeln!(out, "  {key}: {}", display_value(other));
                    }
                }
            }
        }
        other => {
            let _ = writeln!(out, "  {other}");
        }
    }
}

fn display_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use ecochat_core::Granularity;
    use ecochat_insights::normalize_heatmap;
    use ecochat_test_utils::fixtures;

    fn snapshot() -> DashboardSnapshot {
        DashboardSnapshot {
            granularity: Granularity::Day,
            overview: fixtures::overview(),
            timeline: fixtures::timeline(),
            models: fixtures::models().into_iter().map(ModelCard::from_stat).collect(),
            heatmap: normalize_heatmap(&fixtures::heatmap()),
            equivalents: fixtures::equivalents(),
            recommendations: fixtures::recommendations(),
            loaded_at: Utc::now(),
        }
    }

    #[test]
    fn usage_line_shows_all_figures() {
        let usage = UsageRecord {
            input_tokens: 12,
            output_tokens: 34,
            cost_eur: 0.00021,
            est_co2e_g: 0.4567,
            est_kwh: 0.0012,
        };
        let line = format_usage(&usage);
        assert_eq!(
            line,
            "12 in / 34 out tokens · €0.0002 · 0.457 gCO₂e · 0.00120 kWh"
        );
    }

    #[test]
    fn usage_line_omits_missing_energy() {
        let line = format_usage(&UsageRecord::default());
        assert!(!line.contains("kWh"));
    }

    #[test]
    fn catalog_marks_current_and_disabled() {
        let out = render_catalog(Some(Provider::OpenAi), Some("openai:gpt-4o"));
        assert!(out.contains("* openai:gpt-4o "), "got:\n{out}");
        assert!(out.contains("(disabled)"));
        assert!(!out.contains("mistral"));
    }

    #[test]
    fn catalog_lists_every_provider_by_default() {
        let out = render_catalog(None, None);
        for p in Provider::iter() {
            assert!(out.contains(&p.to_string()));
        }
    }

    #[test]
    fn dashboard_plain_contains_every_section() {
        let out = render_dashboard(&snapshot(), false);
        for heading in [
            "Overview",
            "Equivalent to",
            "Timeline",
            "Models",
            "Carbon intensity by hour",
            "Recommendations",
        ] {
            assert!(out.contains(heading), "missing {heading}:\n{out}");
        }
        assert!(out.contains("gpt-4o-mini"));
        assert!(out.contains("Prefer smaller models"));
        assert!(out.contains("peak 18:00"));
    }

    #[test]
    fn plain_heatmap_uses_shades_and_gaps() {
        let mut out = String::new();
        render_heatmap(&mut out, &normalize_heatmap(&fixtures::heatmap()), false);
        let row = out.lines().nth(1).unwrap().trim_start();
        let glyphs: Vec<char> = row.chars().collect();
        assert_eq!(glyphs.len(), 24);
        assert_eq!(glyphs[8], '▒');
        assert_eq!(glyphs[12], '▓');
        assert_eq!(glyphs[18], '█');
        assert_eq!(glyphs[0], '·');
    }

    #[test]
    fn hue_endpoints_map_to_green_and_red() {
        let (r, g, _) = hue_to_rgb(heatmap_hue(0.0));
        assert!(g > r);
        let (r, g, _) = hue_to_rgb(heatmap_hue(1.0));
        assert!(r > g);
    }

    #[test]
    fn empty_timeline_says_no_data() {
        let mut out = String::new();
        render_timeline(&mut out, &[]);
        assert!(out.contains("no data"));
    }
}
