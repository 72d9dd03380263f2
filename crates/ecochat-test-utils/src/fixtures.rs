// SPDX-FileCopyrightText: 2026 Ecochat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Sample analytics payloads shaped like the gateway's responses.

use ecochat_core::insights::{
    DateRange, Equivalents, HourlyIntensity, ModelStat, Overview, Recommendations, TimelinePoint,
};

pub fn overview() -> Overview {
    Overview {
        total_carbon_gco2eq: 42.5,
        total_energy_kwh: 0.12,
        total_requests: 17,
        avg_carbon_per_request: 2.5,
        total_tokens: Some(12_400),
        date_range: Some(DateRange {
            start: "2026-10-01T08:00:00".into(),
            end: "2026-10-17T18:30:00".into(),
        }),
    }
}

pub fn timeline() -> Vec<TimelinePoint> {
    vec![
        TimelinePoint {
            date: "2026-10-15".into(),
            carbon_gco2eq: 10.0,
            requests: 4,
            energy_kwh: 0.03,
        },
        TimelinePoint {
            date: "2026-10-16".into(),
            carbon_gco2eq: 32.5,
            requests: 13,
            energy_kwh: 0.09,
        },
    ]
}

pub fn model_stat(model: &str, efficiency_score: u8) -> ModelStat {
    ModelStat {
        model: model.into(),
        requests: 5,
        total_carbon_gco2eq: 3.0,
        carbon_per_1k_tokens: 0.4,
        total_tokens: 7_500,
        efficiency_score,
        total_energy_kwh: 0.01,
        avg_carbon_per_request: 0.6,
    }
}

pub fn models() -> Vec<ModelStat> {
    vec![
        model_stat("openai:gpt-4o-mini", 92),
        model_stat("mistral:open-mistral-7b", 65),
        model_stat("llama-free", 40),
    ]
}

pub fn hour(hour: u8, intensity: f64) -> HourlyIntensity {
    HourlyIntensity {
        hour,
        carbon_gco2eq: intensity * 2.0,
        requests: 2,
        intensity,
    }
}

/// Three hours with intensities 10, 20 and 40.
pub fn heatmap() -> Vec<HourlyIntensity> {
    vec![hour(8, 10.0), hour(12, 20.0), hour(18, 40.0)]
}

pub fn equivalents() -> Equivalents {
    Equivalents {
        netflix_hours: 0.7,
        emails_sent: 10.6,
        km_car: 0.2,
        smartphone_charges: 5.2,
        trees_needed: 0.002,
    }
}

pub fn recommendations() -> Recommendations {
    serde_json::json!({
        "tips": ["Prefer smaller models for short questions."],
        "best_model": "openai:gpt-4o-mini"
    })
}
