//! One-shot subcommands.

use std::io::Write;
use std::process::ExitCode;

use ppetrack_infra::{InitRequest, RecordStore, ServiceError, Tracker};

use crate::args::Commands;
use crate::render;

/// How a one-shot command ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Done,
    /// The operation was refused or failed; the reason went to stderr.
    Failed,
}

impl From<Outcome> for ExitCode {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Done => ExitCode::SUCCESS,
            Outcome::Failed => ExitCode::FAILURE,
        }
    }
}

/// Run a non-interactive command, printing results to `out` and operator
/// errors to `err`.
///
/// Operation failures are reported and mapped to [`Outcome::Failed`]; only
/// broken output streams surface as `Err`.
pub fn execute<S: RecordStore>(
    tracker: &Tracker<S>,
    command: Commands,
    out: &mut impl Write,
    err: &mut impl Write,
) -> anyhow::Result<Outcome> {
    let outcome: Result<std::io::Result<()>, ServiceError> = match command {
        Commands::Init {
            suppliers,
            hospitals,
        } => tracker
            .initialize(&InitRequest {
                suppliers,
                hospitals,
            })
            .map(|outcome| render::init_outcome(out, &outcome)),
        Commands::Adjust {
            item,
            quantity,
            direction,
        } => tracker
            .inventory()
            .adjust_quantity(&item, quantity, direction)
            .map(|updated| render::adjusted(out, &updated)),
        Commands::Distribute {
            item,
            quantity,
            hospital,
        } => tracker
            .dispatch(&item, quantity, &hospital)
            .map(|dispatched| render::dispatched(out, &dispatched)),
        Commands::Inventory => tracker
            .reports()
            .inventory_listing()
            .map(|lines| render::inventory(out, &lines)),
        Commands::Search { item } => tracker
            .distribution()
            .search_by_item(&item)
            .map(|totals| render::distribution_totals(out, &item, &totals)),
        Commands::SupplierReport => tracker
            .reports()
            .supplier_report()
            .map(|report| render::supplier_report(out, &report)),
        Commands::HospitalReport => tracker
            .reports()
            .hospital_report()
            .map(|report| render::hospital_report(out, &report)),
        Commands::MonthlyReport { month } => match tracker.reports().monthly_report(&month) {
            Ok(never) => match never {},
            Err(e) => Err(ServiceError::Domain(e)),
        },
        Commands::Shell => anyhow::bail!("the shell cannot run as a one-shot command"),
    };

    match outcome {
        Ok(written) => {
            written?;
            Ok(Outcome::Done)
        }
        Err(e) => {
            if e.is_io() {
                tracing::error!(error = %e, "record store failure");
            }
            writeln!(err, "{}", render::failure_message(&e))?;
            Ok(Outcome::Failed)
        }
    }
}
