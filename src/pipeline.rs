//! Pipeline Module
//! Runs Loader → Cleaner → Enricher → Aggregator once and returns the dashboard tables.

use crate::config::DashboardConfig;
use crate::data::{CountryCodeMap, DataCleaner, DataLoader, Enricher, SurveyColumn};
use crate::error::Result;
use crate::stats::{Aggregator, BoxSummary, DistributionCalculator, Histogram, SummaryRow};
use polars::prelude::*;
use serde::{Deserialize, Serialize};

/// Named summary tables handed to the presentation layer. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardTables {
    pub record_count: usize,
    /// Mean salary_in_usd by company location, ascending.
    pub salary_by_location: Vec<SummaryRow>,
    /// Mean salary_in_usd by employee residence, ascending.
    pub salary_by_country: Vec<SummaryRow>,
    /// Best paid job titles by mean salary_in_usd, ascending.
    pub salary_by_job_top: Vec<SummaryRow>,
    /// Response counts by company location with rare locations bucketed.
    pub responses_by_location: Vec<SummaryRow>,
    pub other_location_count: usize,
    /// Response counts by employee residence, descending.
    pub responses_by_country: Vec<SummaryRow>,
    pub salary_by_experience: Vec<BoxSummary>,
    pub salary_by_remote: Vec<BoxSummary>,
    pub salary_histogram: Histogram,
}

pub struct Pipeline;

impl Pipeline {
    /// Load the configured CSV and country map, then build every table.
    pub fn run(config: &DashboardConfig) -> Result<DashboardTables> {
        config.validate()?;

        let countries = match &config.country_map_path {
            Some(path) => CountryCodeMap::from_csv(path)?,
            None => CountryCodeMap::builtin(),
        };
        let raw = DataLoader::new(config.data_path.clone()).load()?;

        Self::run_frame(&raw, &countries, config)
    }

    /// Build every table from an already loaded, still text-typed frame.
    pub fn run_frame(
        raw: &DataFrame,
        countries: &CountryCodeMap,
        config: &DashboardConfig,
    ) -> Result<DashboardTables> {
        let enriched = Self::prepare(raw, countries, config)?;
        let tables = Self::aggregate(&enriched, config)?;

        tracing::info!(
            records = tables.record_count,
            locations = tables.salary_by_location.len(),
            countries = tables.salary_by_country.len(),
            other_locations = tables.other_location_count,
            "Dashboard tables ready"
        );
        Ok(tables)
    }

    /// Clean and enrich, returning the record-level table.
    pub fn prepare(
        raw: &DataFrame,
        countries: &CountryCodeMap,
        config: &DashboardConfig,
    ) -> Result<DataFrame> {
        let cleaned = DataCleaner::new(config.sentinel.clone()).clean(raw)?;
        Enricher::new(countries, config.unknown_label.clone()).enrich(&cleaned)
    }

    fn aggregate(df: &DataFrame, config: &DashboardConfig) -> Result<DashboardTables> {
        let usd = SurveyColumn::SalaryInUsd.name();
        let location = SurveyColumn::CompanyLocation.name();
        let residence = SurveyColumn::EmployeeResidence.name();

        let salary_by_location = Aggregator::mean_by_group(df, location, usd)?;
        let salary_by_country = Aggregator::mean_by_group(df, residence, usd)?;
        let salary_by_job = Aggregator::mean_by_group(df, SurveyColumn::JobTitle.name(), usd)?;
        let salary_by_job_top = Aggregator::top_n(&salary_by_job, config.top_jobs);

        let location_counts = Aggregator::count_by_group(df, location)?;
        let bucketed = Aggregator::bucket_long_tail(
            &location_counts,
            config.other_threshold,
            &config.other_label,
        )?;
        let responses_by_country = Aggregator::count_by_group(df, residence)?;

        let salary_by_experience = DistributionCalculator::box_summary_by_group(
            df,
            SurveyColumn::ExperienceLevel.name(),
            usd,
        )?;
        let salary_by_remote =
            DistributionCalculator::box_summary_by_group(df, SurveyColumn::RemoteRatio.name(), usd)?;
        let salary_histogram = DistributionCalculator::histogram(df, usd, config.histogram_bins)?;

        Ok(DashboardTables {
            record_count: df.height(),
            salary_by_location,
            salary_by_country,
            salary_by_job_top,
            responses_by_location: bucketed.rows,
            other_location_count: bucketed.merged,
            responses_by_country,
            salary_by_experience,
            salary_by_remote,
            salary_histogram,
        })
    }
}
