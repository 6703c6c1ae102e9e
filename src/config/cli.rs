use crate::config::consts::{GENERATOR_OUTPUT_CAP, GENERATOR_TIMEOUT};
use crate::domain::ports::CsvGenerator;
use crate::utils::error::{Result, SyllabusError};
use async_trait::async_trait;
use std::path::Path;
use std::time::Duration;
use tokio::process::Command;

/// Runs a configured external command to regenerate a CSV snapshot:
/// `<program> <args..> <year> <output_dir>`. Bounded by a wall-clock timeout
/// and an output-size cap; exceeding either is a failure, not a hang.
pub struct CommandGenerator {
    program: String,
    args: Vec<String>,
    timeout: Duration,
    output_cap: usize,
}

impl CommandGenerator {
    /// `command` is the program followed by its fixed arguments. Returns None
    /// when the command is empty, meaning no generator is configured.
    pub fn from_command(command: &[String]) -> Option<Self> {
        let (program, args) = command.split_first()?;
        Some(Self {
            program: program.clone(),
            args: args.to_vec(),
            timeout: GENERATOR_TIMEOUT,
            output_cap: GENERATOR_OUTPUT_CAP,
        })
    }

    #[cfg(test)]
    pub fn with_limits(mut self, timeout: Duration, output_cap: usize) -> Self {
        self.timeout = timeout;
        self.output_cap = output_cap;
        self
    }
}

#[async_trait]
impl CsvGenerator for CommandGenerator {
    async fn generate(&self, year: &str, output_dir: &Path) -> Result<()> {
        tracing::info!(
            "running CSV generator: {} {:?} {} {}",
            self.program,
            self.args,
            year,
            output_dir.display()
        );

        let child = Command::new(&self.program)
            .args(&self.args)
            .arg(year)
            .arg(output_dir)
            .kill_on_drop(true)
            .output();

        let output = tokio::time::timeout(self.timeout, child)
            .await
            .map_err(|_| {
                SyllabusError::generator(format!(
                    "timed out after {} seconds",
                    self.timeout.as_secs()
                ))
            })??;

        if output.stdout.len() + output.stderr.len() > self.output_cap {
            return Err(SyllabusError::generator(format!(
                "output exceeded {} bytes",
                self.output_cap
            )));
        }

        if !output.status.success() {
            return Err(SyllabusError::generator(format!(
                "exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        Ok(())
    }
}
