use crate::report::SummaryData;

/// Unbounded scores are written as `"inf"`/`"-inf"` strings, see
/// [`crate::model::float_repr`].
pub fn render_summary_json(data: &SummaryData) -> Result<String, serde_json::Error> {
    let mut out = serde_json::to_string_pretty(data)?;
    out.push('\n');
    Ok(out)
}
