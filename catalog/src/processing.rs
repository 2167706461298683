//! Tool Processor — simulated single-shot processing
//!
//! Waits a fixed delay and returns canned output chosen by the tool's output
//! kind. Always succeeds once input validation passes. This is where a real
//! task queue would plug in.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::ProcessError;
use crate::model::{OutputKind, ToolRecord};

pub const DEFAULT_DELAY_MS: u64 = 2000;

const TEXT_OUTPUT: &str = "Here is a summary of your text:\n\nThis is a concise summary of the input text that highlights the key points while maintaining the core message. The summary is about 25% of the original length.";

const CODE_OUTPUT: &str = "function fibonacci(n) {\n  if (n <= 1) return n;\n  return fibonacci(n - 1) + fibonacci(n - 2);\n}\n\n// Example usage\nconst result = fibonacci(10);\nconsole.log(result); // 55";

const DEFAULT_OUTPUT: &str = "Processing complete! You can download the result below.";

/// User input for a tool run
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProcessInput {
    #[serde(default)]
    pub input: String,
    #[serde(default)]
    pub file_name: Option<String>,
}

impl ProcessInput {
    pub fn is_empty(&self) -> bool {
        self.input.trim().is_empty()
            && self.file_name.as_deref().map_or(true, |f| f.trim().is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessOutput {
    pub tool_id: String,
    pub output_kind: OutputKind,
    pub output: String,
    pub elapsed_ms: u64,
}

pub struct ToolProcessor {
    delay: Duration,
}

impl ToolProcessor {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Run the simulated processing for one tool
    pub async fn process(
        &self,
        tool: &ToolRecord,
        input: ProcessInput,
    ) -> Result<ProcessOutput, ProcessError> {
        if !tool.is_active() {
            return Err(ProcessError::Inactive(tool.id.clone()));
        }
        if input.is_empty() {
            return Err(ProcessError::EmptyInput);
        }

        let started = Instant::now();
        tokio::time::sleep(self.delay).await;

        let output = canned_output(tool.output_kind).to_string();
        let elapsed_ms = started.elapsed().as_millis() as u64;
        info!("Processed tool {} ({:?}) in {elapsed_ms}ms", tool.id, tool.output_kind);

        Ok(ProcessOutput {
            tool_id: tool.id.clone(),
            output_kind: tool.output_kind,
            output,
            elapsed_ms,
        })
    }
}

impl Default for ToolProcessor {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEFAULT_DELAY_MS))
    }
}

fn canned_output(kind: OutputKind) -> &'static str {
    match kind {
        OutputKind::Text => TEXT_OUTPUT,
        OutputKind::Code => CODE_OUTPUT,
        _ => DEFAULT_OUTPUT,
    }
}
