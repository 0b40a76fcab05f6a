use std::io::Write;
use std::time::Duration;

use log::{debug, error, info};

use crate::sonar::config::PollSettings;
use crate::sonar::error::SonarError;
use crate::sonar::traits::ActivityOperations;

/// Poll the Compute Engine until no task of `project_key` is pending or in progress.
///
/// The server is queried at least once. Between queries the task sleeps for the
/// refresh period; once the accumulated sleep reaches the timeout the wait fails
/// with [`SonarError::Timeout`], so the wall-clock overrun is at most one refresh
/// period. Any request or decode error ends the wait immediately.
pub async fn wait_for_pending_tasks<C, W>(
    client: &C,
    project_key: &str,
    poll: PollSettings,
    out: &mut W,
) -> Result<(), SonarError>
where
    C: ActivityOperations + ?Sized,
    W: Write,
{
    writeln!(out, "\nWaiting for pending tasks to finish...")?;
    let mut elapsed = Duration::ZERO;

    loop {
        let activity = match client.list_unfinished_tasks(project_key).await {
            Ok(activity) => activity,
            Err(e) => {
                error!("Activity request for {project_key} failed: {e}");
                writeln!(out, "\nFailed to perform SonarQube API request for activities!")?;
                writeln!(out, "Error: {e}")?;
                return Err(e);
            }
        };

        write!(
            out,
            "\r{} pending tasks remaining for {project_key} component...",
            activity.len()
        )?;
        out.flush()?;

        if activity.is_empty() {
            info!("No pending tasks for {project_key} after {elapsed:?}");
            return Ok(());
        }

        tokio::time::sleep(poll.refresh_period).await;
        elapsed += poll.refresh_period;
        debug!("{} tasks pending, waited {elapsed:?} of {:?}", activity.len(), poll.timeout);

        if elapsed >= poll.timeout {
            writeln!(out, "\nTimeout reached!")?;
            return Err(SonarError::Timeout {
                seconds: poll.timeout.as_secs(),
            });
        }
    }
}
