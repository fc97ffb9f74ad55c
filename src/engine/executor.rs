//! Update execution - runs a plan's calls in order, stopping at the first
//! failure

use anyhow::{Context, Result};
use ctclient::Client;

use super::planner::{Action, ApiCall, UpdatePlan};

/// Summary of execution results
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ExecuteSummary {
    pub patched: usize,
    pub added: usize,
    pub removed: usize,
    pub moved: usize,
}

impl ExecuteSummary {
    pub fn total_changes(&self) -> usize {
        self.patched + self.added + self.removed + self.moved
    }

    fn record(&mut self, action: Action) {
        match action {
            Action::Patch => self.patched += 1,
            Action::Add => self.added += 1,
            Action::Remove => self.removed += 1,
            Action::Move => self.moved += 1,
        }
    }
}

fn send(client: &Client, call: &ApiCall) -> ctclient::Result<()> {
    match call.action {
        Action::Patch => client.patch(&call.path, &call.body),
        Action::Add | Action::Move => client.post(&call.path, &call.body).map(drop),
        Action::Remove => client.delete(&call.path, Some(&call.body)),
    }
}

/// Execute every call of the plan
///
/// The first failing call aborts the run; its error carries the call's
/// diagnostic summary. Calls that already ran are not rolled back.
pub fn execute(client: &Client, plan: &UpdatePlan) -> Result<ExecuteSummary> {
    let mut summary = ExecuteSummary::default();

    for (i, call) in plan.calls.iter().enumerate() {
        log::info!(
            "[{}/{}] {} {}",
            i + 1,
            plan.len(),
            call.method(),
            call.path
        );
        send(client, call).with_context(|| call.summary.clone())?;
        summary.record(call.action);
    }

    Ok(summary)
}
