//! The `pycheck check` command.
//!
//! Runs the requested scope checks, then both capability probes, and prints
//! either result lines or a sanitized JSON report.

use crate::capability::{
    probe_filesystem_access_with, probe_secure_transport, CapabilityResult, CapabilityStatus,
    InterpreterTransport, SystemStorage,
};
use crate::check::{CheckOutcome, Scope};
use crate::cli::args::CheckArgs;
use crate::error::Result;
use crate::report::{Report, Sanitizer};
use crate::ui::{StatusKind, UserInterface};

use super::context::{CheckParts, RunContext};
use super::dispatcher::{Command, CommandResult};

/// The check command implementation.
pub struct CheckCommand<'a> {
    context: &'a RunContext,
    args: CheckArgs,
}

impl<'a> CheckCommand<'a> {
    /// Create a new check command.
    pub fn new(context: &'a RunContext, args: CheckArgs) -> Self {
        Self { context, args }
    }

    fn run_checks(&self, ui: &mut dyn UserInterface) -> Result<Vec<(Scope, CheckOutcome)>> {
        let parts = CheckParts::new(self.context);
        let checker = parts.checker(&self.context.config.skip);

        let mut outcomes = Vec::new();
        for scope in self.args.scopes() {
            let mut spinner = ui.start_spinner(spinner_message(scope));
            let outcome = checker.check(scope);
            spinner.finish_and_clear();
            outcomes.push((scope, outcome?));
        }
        Ok(outcomes)
    }

    fn run_probes(&self) -> Vec<CapabilityResult> {
        let storage = SystemStorage::new(self.context.config.scratch_dir.clone());
        let transport = InterpreterTransport::new(&self.context.interpreter);
        vec![
            probe_filesystem_access_with(&storage),
            probe_secure_transport(&transport),
        ]
    }
}

impl Command for CheckCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let checks = self.run_checks(ui)?;
        let capabilities = self.run_probes();

        let python = if self.args.json {
            self.context
                .interpreter
                .describe()
                .map_err(|e| tracing::debug!("no platform description: {}", e))
                .ok()
        } else {
            None
        };
        let report = Report::new(python, &checks, &capabilities, self.args.strict);

        if self.args.json {
            let value = report
                .to_json(&Sanitizer::for_current_user())
                .map_err(anyhow::Error::from)?;
            let text = serde_json::to_string_pretty(&value).map_err(anyhow::Error::from)?;
            ui.message(&text);
        } else {
            show_results(ui, &checks, &capabilities);
        }

        Ok(CommandResult::from_exit_code(report.exit_code))
    }
}

fn spinner_message(scope: Scope) -> &'static str {
    match scope {
        Scope::All => "Importing installed packages...",
        _ => "Importing standard library modules...",
    }
}

/// Print check results followed by capability results.
pub fn show_results(
    ui: &mut dyn UserInterface,
    checks: &[(Scope, CheckOutcome)],
    capabilities: &[CapabilityResult],
) {
    for (scope, outcome) in checks {
        let kind = if outcome.is_passing() {
            StatusKind::Success
        } else {
            StatusKind::Failed
        };
        ui.result_line(kind, &format!("{}: {}", scope, outcome));
    }

    for capability in capabilities {
        let kind = match capability.status {
            CapabilityStatus::Ok => StatusKind::Success,
            CapabilityStatus::Warn => StatusKind::Warning,
            CapabilityStatus::Fail => StatusKind::Failed,
        };
        ui.result_line(kind, &capability.to_string());
    }
}
