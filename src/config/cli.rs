use crate::core::costing::CostFilter;
use crate::domain::model::Role;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use chrono::NaiveDate;
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "event-planner")]
#[command(about = "Associate participants and logistics with events and derive costs")]
pub struct CliConfig {
    #[arg(long, default_value = "./data")]
    pub data_path: String,

    #[arg(long, help = "TOML seed file applied through the association service")]
    pub seed_file: Option<String>,

    #[arg(long, help = "Participant last name selecting events for cost recomputation")]
    pub last_name: Option<String>,

    #[arg(long, help = "Participant first name selecting events for cost recomputation")]
    pub first_name: Option<String>,

    #[arg(long, default_value = "organizer")]
    pub role: Role,

    #[arg(long, help = "Logistics report range start (YYYY-MM-DD)")]
    pub from: Option<NaiveDate>,

    #[arg(long, help = "Logistics report range end (YYYY-MM-DD)")]
    pub to: Option<NaiveDate>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    /// Cost recomputation runs only when both name parts are given.
    pub fn cost_filter(&self) -> Option<CostFilter> {
        match (&self.last_name, &self.first_name) {
            (Some(last), Some(first)) => Some(CostFilter::new(last, first, self.role)),
            _ => None,
        }
    }

    /// Logistics report runs only when both bounds are given.
    pub fn report_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        match (self.from, self.to) {
            (Some(from), Some(to)) => Some((from, to)),
            _ => None,
        }
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("data_path", &self.data_path)?;

        if let Some(seed) = &self.seed_file {
            validation::validate_path("seed_file", seed)?;
        }
        if let Some(last) = &self.last_name {
            validation::validate_non_empty_string("last_name", last)?;
        }
        if let Some(first) = &self.first_name {
            validation::validate_non_empty_string("first_name", first)?;
        }
        if let (Some(from), Some(to)) = (self.from, self.to) {
            validation::validate_date_order("from/to", from, to)?;
        }

        Ok(())
    }
}
