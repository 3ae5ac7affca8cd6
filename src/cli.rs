//! One-shot CLI prediction.
//!
//! `cardio predict '[v1, ..., v12]'` loads the artifacts, scores the
//! positional vector, and prints one line of JSON to stdout. Every failure,
//! including artifact load failure, prints `{"error": ...}` and yields a
//! non-zero exit code. The positional contract requires all 12 values in
//! canonical order; no defaulting happens on this path.

use std::process::ExitCode;

use serde_json::{json, Value};

use crate::artifacts::Artifacts;
use crate::config::AppConfig;
use crate::features::vectorize_positional;
use crate::scorer::Scorer;

/// Run one prediction and print the result. Returns the process exit code.
pub fn run_predict(config: &AppConfig, values_json: &str) -> ExitCode {
    match predict_line(config, values_json) {
        Ok(line) => {
            println!("{line}");
            ExitCode::SUCCESS
        }
        Err(message) => {
            println!("{}", json!({ "error": message }));
            ExitCode::FAILURE
        }
    }
}

fn predict_line(config: &AppConfig, values_json: &str) -> Result<String, String> {
    let artifacts = Artifacts::load(&config.artifacts).map_err(|e| e.to_string())?;
    let scorer = Scorer::new(&artifacts);

    let values: Vec<Value> = serde_json::from_str(values_json).map_err(|e| e.to_string())?;
    let features = vectorize_positional(&values).map_err(|e| e.to_string())?;

    let prediction = scorer.score(&features).map_err(|e| e.to_string())?;

    let output = json!({
        "probability": prediction.probability,
        "risk_level": prediction.risk_level,
        "debug_info": {
            "input_values": prediction.features,
            "scaled_values": vec![prediction.scaled_features],
        },
    });
    serde_json::to_string(&output).map_err(|e| e.to_string())
}
