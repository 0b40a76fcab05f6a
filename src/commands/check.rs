use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::{error, info, LevelFilter};
use simplelog::{Config, WriteLogger};

use crate::gate::{check_quality_gate, wait_for_pending_tasks};
use crate::sonar::client::SonarClient;
use crate::sonar::config::{CheckSettings, GateConfig};
use crate::sonar::traits::SonarApi;

/// Result of a run, mapped onto the process exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckOutcome {
    Passed,
    Failed,
    InvalidArguments,
}

impl CheckOutcome {
    pub fn exit_code(self) -> i32 {
        match self {
            CheckOutcome::Passed => 0,
            CheckOutcome::Failed => 1,
            CheckOutcome::InvalidArguments => 255,
        }
    }
}

/// Wait for SonarQube to finish analysing a project, then check its Quality Gate.
#[derive(Parser, Debug, Default)]
#[clap(name = "sonar-qualitygate", bin_name = "sonar-qualitygate", version, about)]
pub struct CheckCommand {
    /// Sonar server address to use for API calls [default: http://localhost:9000/]
    #[clap(long, env = "SONAR_HOST_URL")]
    pub server: Option<String>,

    /// Sonar project (value from sonar.projectKey) to check the Quality Gate of
    #[clap(long, env = "SONAR_PROJECT_KEY")]
    pub project: Option<String>,

    /// User token; the user needs Browse permission on the project
    #[clap(long, env = "SONAR_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Seconds to wait for pending tasks to finish [default: 300]
    #[clap(long)]
    pub timeout: Option<u64>,

    /// Seconds between two task status requests [default: 1]
    #[clap(long, alias = "refresh_period")]
    pub refresh_period: Option<u64>,

    /// Configuration file [default: ~/.config/sonar-qualitygate/config.toml]
    #[clap(short, long)]
    pub file: Option<String>,
}

impl CheckCommand {
    pub async fn run(&self) -> Result<CheckOutcome> {
        // setup logging
        if let Ok(log_level) = std::env::var("SONAR_QUALITYGATE_LOG") {
            setup_logging(&log_level)?;
        }

        let mut stdout = std::io::stdout();
        let outcome = self.execute(&mut stdout).await?;
        info!("Finished with {outcome:?}");
        Ok(outcome)
    }

    pub async fn execute<W: Write>(&self, out: &mut W) -> Result<CheckOutcome> {
        writeln!(out, "Running SonarQube Quality Gate checker!")?;

        let path = self.file.as_ref().map(PathBuf::from);
        let file_config = match GateConfig::from_file(path.as_ref()) {
            Ok(config) => config,
            Err(e) => {
                error!("Configuration error: {e:#}");
                writeln!(out, "Configuration Error: {e:#}")?;
                return Ok(CheckOutcome::InvalidArguments);
            }
        };

        let settings = match self.as_config().merge(file_config).resolve() {
            Ok(settings) => settings,
            Err(e) => {
                error!("Invalid arguments: {e}");
                writeln!(out, "{e}")?;
                return Ok(CheckOutcome::InvalidArguments);
            }
        };
        info!("Resolved settings: {settings:?}");

        let client = match SonarClient::new(&settings.server) {
            Ok(client) => client,
            Err(e) => {
                error!("Failed to build HTTP client: {e}");
                writeln!(out, "Failed to set up the HTTP client: {e}")?;
                return Ok(CheckOutcome::Failed);
            }
        };

        run_check(&client, &settings, out).await
    }

    fn as_config(&self) -> GateConfig {
        GateConfig {
            server: self.server.clone(),
            project: self.project.clone(),
            token: self.token.clone(),
            timeout: self.timeout,
            refresh_period: self.refresh_period,
            ..GateConfig::default()
        }
    }
}

/// Wait for pending tasks, then read the Quality Gate. The gate is only queried
/// once the Compute Engine has no pending work for the project.
pub async fn run_check<C, W>(client: &C, settings: &CheckSettings, out: &mut W) -> Result<CheckOutcome>
where
    C: SonarApi + ?Sized,
    W: Write,
{
    let project_key = settings.project_key.as_str();
    writeln!(out, "Checking if any tasks are running for the provided project...")?;

    if let Err(e) = wait_for_pending_tasks(client, project_key, settings.poll, out).await {
        error!("Waiting for pending tasks of {project_key} failed: {e}");
        writeln!(out, "\nFailed to wait for project {project_key} to run out of tasks!\n")?;
        return Ok(CheckOutcome::Failed);
    }

    writeln!(out, "\nAll tasks on project {project_key} are finished!\n")?;
    writeln!(out, "Checking Quality Gate status of the project...")?;

    let verdict = check_quality_gate(client, project_key, out)
        .await
        .context("Failed to report the Quality Gate status")?;
    if verdict.is_passed() {
        Ok(CheckOutcome::Passed)
    } else {
        Ok(CheckOutcome::Failed)
    }
}

fn setup_logging(log_level: &str) -> Result<()> {
    // Get the XDG state directory for logs
    let log_dir = crate::get_state_dir()
        .context("Could not determine a state directory for log files")?
        .join("logs");

    // Create the log directory if it doesn't exist
    std::fs::create_dir_all(&log_dir)?;

    let log_file_path = log_dir.join(format!(
        "sonar-qualitygate-{}.log",
        chrono::Local::now().format("%Y%m%d%H%M%S")
    ));

    let log_level = match log_level.to_lowercase().as_str() {
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        "warn" => LevelFilter::Warn,
        "error" => LevelFilter::Error,
        _ => LevelFilter::Info,
    };

    WriteLogger::init(log_level, Config::default(), File::create(&log_file_path)?)?;

    // Log the file location so users know where to find it
    info!("Logging to: {}", log_file_path.display());

    Ok(())
}
