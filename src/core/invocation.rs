use crate::domain::model::PipelineReport;
use crate::utils::error::Result;
use serde::Serialize;
use serde_json::{json, Value};

/// What the hosted function hands back to its trigger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvocationResponse {
    pub status_code: u16,
    pub body: String,
}

pub fn invocation_response(report: &PipelineReport, input: Value) -> Result<InvocationResponse> {
    let body = serde_json::to_string_pretty(&json!({
        "message": format!("{} products available", report.available.len()),
        "input": input,
    }))?;

    Ok(InvocationResponse {
        status_code: 200,
        body,
    })
}
