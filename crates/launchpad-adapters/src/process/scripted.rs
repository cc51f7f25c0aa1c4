//! Scripted command runner for testing.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use launchpad_core::application::ApplicationError;
use launchpad_core::application::ports::{CommandOutput, CommandRequest, CommandRunner};

/// Test double that replays pre-scripted outcomes in order.
///
/// Every received request is recorded for later assertions. When the script
/// runs dry, further invocations succeed with empty output — tests that care
/// about call counts assert on [`Self::calls`] instead.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRunner {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Debug, Default)]
struct Inner {
    script: VecDeque<Result<CommandOutput, ApplicationError>>,
    calls: Vec<CommandRequest>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful outcome.
    pub fn push_ok(&self) -> &Self {
        self.inner
            .lock()
            .unwrap()
            .script
            .push_back(Ok(CommandOutput::default()));
        self
    }

    /// Queue a successful outcome with specific stdout.
    pub fn push_ok_with_output(&self, stdout: impl Into<String>) -> &Self {
        self.inner.lock().unwrap().script.push_back(Ok(CommandOutput {
            stdout: stdout.into(),
            stderr: String::new(),
        }));
        self
    }

    /// Queue a failure outcome.
    pub fn push_err(&self, error: ApplicationError) -> &Self {
        self.inner.lock().unwrap().script.push_back(Err(error));
        self
    }

    /// Requests received so far, in order.
    pub fn calls(&self) -> Vec<CommandRequest> {
        self.inner.lock().unwrap().calls.clone()
    }
}

impl CommandRunner for ScriptedRunner {
    fn run(&self, request: &CommandRequest) -> Result<CommandOutput, ApplicationError> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(request.clone());
        inner
            .script
            .pop_front()
            .unwrap_or_else(|| Ok(CommandOutput::default()))
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use std::time::Duration;

    fn any_request() -> CommandRequest {
        CommandRequest::new("npm", ["install"], Path::new("."), Duration::from_secs(1))
    }

    #[test]
    fn outcomes_replay_in_order() {
        let runner = ScriptedRunner::new();
        runner.push_ok_with_output("first");
        runner.push_err(ApplicationError::InstallFailed {
            command: "npm install".into(),
            exit_code: Some(1),
            stderr: "boom".into(),
        });

        assert_eq!(runner.run(&any_request()).unwrap().stdout, "first");
        assert!(runner.run(&any_request()).is_err());
        // Script exhausted: defaults to success.
        assert!(runner.run(&any_request()).is_ok());
    }

    #[test]
    fn calls_are_recorded() {
        let runner = ScriptedRunner::new();
        runner.run(&any_request()).unwrap();
        runner.run(&any_request()).unwrap();

        let calls = runner.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].program, "npm");
    }
}
