//! Command-line commands and their JSON output.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use getitdone_recurrence::model::DaySummary;
use getitdone_service::store::TaskRepository;
use getitdone_service::task::TaskService;
use serde::Serialize;


/// Query recurring and one-off tasks from a get-it-done dataset.
#[derive(Debug, Parser)]
#[command(name = "getitdone", version)]
pub struct Cli {
    /// Query to run.
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Every occurrence due on one date.
    Day {
        /// Date as YYYY-MM-DD.
        date: NaiveDate,
    },
    /// Per-day counts for a calendar month.
    Month {
        year: i32,
        /// Month number, 1-12.
        #[arg(value_parser = clap::value_parser!(u32).range(1..=12))]
        month: u32,
    },
}

#[derive(Debug, Serialize)]
struct MonthOutput {
    summaries: BTreeMap<NaiveDate, DaySummary>,
}

impl Command {
    /// ## Summary
    /// Runs the command for `user` and renders its result as pretty JSON.
    ///
    /// ## Errors
    /// Propagates service errors, including an invalid month.
    pub async fn run<R: TaskRepository>(
        self,
        service: &TaskService<R>,
        user: &str,
    ) -> anyhow::Result<String> {
        let json = match self {
            Self::Day { date } => {
                serde_json::to_string_pretty(&service.day_view(user, date).await?)?
            }
            Self::Month { year, month } => serde_json::to_string_pretty(&MonthOutput {
                summaries: service.month_summary(user, year, month).await?,
            })?,
        };
        Ok(json)
    }
}
