use super::window::TimeSeriesWindow;
use crate::error::{Error, Result};
use serde_json::json;
use std::fs::File;
use std::io::Write;
use std::path::Path;

pub fn export_to_csv(window: &TimeSeriesWindow, path: &Path) -> Result<()> {
    let mut file = File::create(path)?;

    writeln!(file, "timestamp,label,current_cpu,predicted_cpu")?;

    for dp in window.buffer().get_all() {
        writeln!(
            file,
            "{},{},{:.2},{:.2}",
            dp.timestamp.to_rfc3339(),
            dp.value.label,
            dp.value.current,
            dp.value.predicted
        )?;
    }

    Ok(())
}

pub fn export_to_json(window: &TimeSeriesWindow, path: &Path) -> Result<()> {
    let points: Vec<_> = window.buffer().get_all().iter()
        .map(|dp| json!({
            "timestamp": dp.timestamp.to_rfc3339(),
            "label": dp.value.label,
            "current_cpu": dp.value.current,
            "predicted_cpu": dp.value.predicted,
        }))
        .collect();

    let output = json!({
        "capacity": window.capacity(),
        "points": points,
    });

    let json_str = serde_json::to_string_pretty(&output)
        .map_err(|e| Error::Export(format!("Failed to serialize JSON: {}", e)))?;

    let mut file = File::create(path)?;
    file.write_all(json_str.as_bytes())?;

    Ok(())
}

pub fn export_history(window: &TimeSeriesWindow, path: &Path) -> Result<()> {
    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if is_json {
        export_to_json(window, path)
    } else {
        export_to_csv(window, path)
    }
}
