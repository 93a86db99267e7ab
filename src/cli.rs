use chrono::NaiveDate;
use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "vacancy-scraper")]
#[command(about = "Collect vacancies from djinni.co and work.ua into dated tables")]
pub struct Cli {
    /// Keep rows in memory instead of writing to PostgreSQL
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Day whose tables are read and written (defaults to today)
    #[arg(long, global = true)]
    pub date: Option<NaiveDate>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Collect vacancy links from every djinni listing page
    DjinniLinks,

    /// Collect djinni vacancies from the links stored for the day
    DjinniVacancies,

    /// Collect links, then vacancies
    Djinni,

    /// Probe work.ua region codes for city pages
    WorkUaCities,

    /// Replace the day's work.ua category list
    WorkUaCategories,

    /// Collect work.ua listing cards for each city and category
    WorkUaVacancies {
        #[arg(long = "city", default_value = "kyiv")]
        cities: Vec<String>,

        #[arg(long = "category", default_value = "it")]
        categories: Vec<String>,
    },
}
