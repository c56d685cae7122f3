//! Aggregate summary rendering

use serde_json::json;

use starlog_journal::Pipeline;

/// Render the session's aggregate views as pretty JSON.
///
/// Works from owned snapshots only; the pipeline's live state is never
/// exposed to the output path.
pub fn render(pipeline: &Pipeline) -> String {
    let stats = pipeline.stats();
    let signals = pipeline.signals().snapshot();
    let samples = pipeline.organics().all_consolidated();

    let completed = samples.iter().filter(|sample| sample.is_complete()).count();

    let summary = json!({
        "session": pipeline.session(),
        "stats": stats,
        "signals": {
            "distinct": signals.len(),
            "records": signals,
        },
        "organic_samples": {
            "keys": samples.len(),
            "completed": completed,
            "records": samples,
        },
    });

    serde_json::to_string_pretty(&summary).unwrap_or_else(|_| "{}".to_string())
}
