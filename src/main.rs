//! Ratings and guide tooling for the course wiki.
//!
//! The `update` command refreshes the instructor ratings file the site reads
//! at build time; the remaining commands expose the same presentation logic
//! the site uses (rating colors, instructor ordering, guide titles).

mod color;
mod config;
mod constants;
mod error;
mod fetcher;
mod frontmatter;
mod guides;
mod loader;
mod models;
mod overrides;
mod quickview;
mod updater;

use clap::Parser;
use config::{Cli, Command, DataArgs, Settings, UpdateArgs};
use error::Result;
use fetcher::RmpClient;
use std::path::Path;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use updater::RatingsUpdater;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wiki_ratings=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Update(args) => update(args).await,
        Command::Color { rating } => {
            let color = color::color_for(rating);
            println!("light: {}", color.light);
            println!("dark:  {}", color.dark);
            Ok(())
        }
        Command::Instructors { course, data } => instructors(&course, &data),
        Command::GuideTitle { path, guides_dir } => {
            println!("{}", guides::guide_title(&absolute(&guides_dir)?, &path));
            Ok(())
        }
        Command::Guides { guides_dir } => {
            let guides_dir = absolute(&guides_dir)?;
            let entries = guides::list_guides(&guides_dir);
            for entry in &entries {
                println!("/guides/{}\t{}", entry.url_path, entry.title);
            }
            println!("{} guides", entries.len());
            Ok(())
        }
    }
}

/// Rebuild the ratings file from scratch
async fn update(args: UpdateArgs) -> Result<()> {
    let settings = Settings::from_args(args)?;

    println!("Starting ratings update...");

    let catalog = loader::load_catalog(&settings.courses)?;
    let instructors = loader::collect_instructors(&catalog);
    println!("Found {} unique instructors.", instructors.len());

    let client = RmpClient::new(settings.service)?;
    let updater = RatingsUpdater::new(client, settings.overrides, settings.delay);
    let mapping = updater.build_mapping(&instructors).await;

    loader::write_ratings(&settings.output, &mapping)?;

    println!(
        "Resolved {} of {} instructors",
        mapping.len(),
        instructors.len()
    );
    println!("Saved ratings to {}", settings.output.display());

    Ok(())
}

/// Print a course's instructors the way the quick view lists them
fn instructors(course_id: &str, data: &DataArgs) -> Result<()> {
    let catalog = loader::load_catalog(&data.courses)?;
    let ratings = loader::load_ratings(&data.output)?;

    let course = loader::find_course(&catalog, course_id)?;

    println!(
        "{} {}",
        course.id,
        course.title.as_deref().unwrap_or_default()
    );

    let names = course.instructors.clone().unwrap_or_default();
    if names.is_empty() {
        println!("No instructors listed.");
    }
    for link in quickview::rank_instructors(&names, &ratings) {
        let mut line = link.label();
        if let Some(title) = link.title() {
            line.push_str(&format!(" [{}]", title));
        }
        if let Some(color) = &link.color {
            line.push_str(&format!(" light={} dark={}", color.light, color.dark));
        }
        if let Some(url) = link.profile_url() {
            line.push_str(&format!(" {}", url));
        }
        println!("  {}", line);
    }

    if let Some(description) = &course.description {
        println!("\n{}", quickview::truncate_description(description));
    }

    Ok(())
}

fn absolute(path: &Path) -> Result<std::path::PathBuf> {
    Ok(std::path::absolute(path)?)
}
