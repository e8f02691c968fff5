use crate::constants::{DEFAULT_AUTH, DEFAULT_ENDPOINT, DEFAULT_SCHOOL_ID, POLITENESS_DELAY};
use crate::error::{Error, Result};
use crate::fetcher::ServiceConfig;
use crate::overrides::OverrideTable;
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "wiki-ratings", about = "Instructor ratings and guide tooling for the course wiki")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Fetch ratings for every catalog instructor and rewrite the ratings file
    Update(UpdateArgs),
    /// Print the light/dark colors for a rating
    Color {
        rating: f64,
    },
    /// Show a course's instructors, best rated first
    Instructors {
        /// Course id as it appears in the catalog
        course: String,
        #[command(flatten)]
        data: DataArgs,
    },
    /// Print the page title for a guide URL path
    GuideTitle {
        path: String,
        #[arg(long, default_value = "data/guides")]
        guides_dir: PathBuf,
    },
    /// List every guide with its title
    Guides {
        #[arg(long, default_value = "data/guides")]
        guides_dir: PathBuf,
    },
}

#[derive(Args, Debug, Clone)]
pub struct DataArgs {
    /// Course catalog JSON
    #[arg(long, default_value = "data/courses.json")]
    pub courses: PathBuf,

    /// Ratings file read by the site
    #[arg(long, default_value = "data/rmp-ratings.json")]
    pub output: PathBuf,
}

#[derive(Args, Debug, Clone)]
pub struct UpdateArgs {
    #[command(flatten)]
    pub data: DataArgs,

    /// GraphQL endpoint of the ratings service
    #[arg(long, env = "RMP_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Encoded institution id searches are scoped to
    #[arg(long, env = "RMP_SCHOOL_ID", default_value = DEFAULT_SCHOOL_ID)]
    pub school_id: String,

    /// Authorization header sent with every request
    #[arg(long, env = "RMP_AUTH", default_value = DEFAULT_AUTH, hide_env_values = true)]
    pub auth: String,

    /// Pause between instructors, in milliseconds
    #[arg(long, env = "RMP_DELAY_MS")]
    pub delay_ms: Option<u64>,

    /// TOML file with [names] and [ids] override tables
    #[arg(long, env = "RMP_OVERRIDES")]
    pub overrides: Option<PathBuf>,
}

/// Everything `update` needs, validated
#[derive(Debug)]
pub struct Settings {
    pub service: ServiceConfig,
    pub courses: PathBuf,
    pub output: PathBuf,
    pub delay: Duration,
    pub overrides: OverrideTable,
}

impl Settings {
    pub fn from_args(args: UpdateArgs) -> Result<Self> {
        if args.endpoint.trim().is_empty() {
            return Err(Error::Config("endpoint must not be empty".to_string()));
        }
        if args.school_id.trim().is_empty() {
            return Err(Error::Config("school id must not be empty".to_string()));
        }

        let overrides = match &args.overrides {
            Some(path) => load_overrides(path)?,
            None => OverrideTable::builtin(),
        };

        Ok(Settings {
            service: ServiceConfig {
                endpoint: args.endpoint,
                school_id: args.school_id,
                auth: args.auth,
            },
            courses: args.data.courses,
            output: args.data.output,
            delay: args
                .delay_ms
                .map(Duration::from_millis)
                .unwrap_or(POLITENESS_DELAY),
            overrides,
        })
    }
}

fn load_overrides(path: &Path) -> Result<OverrideTable> {
    if !path.exists() {
        return Err(Error::Config(format!(
            "override file not found: {}",
            path.display()
        )));
    }
    OverrideTable::load(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> UpdateArgs {
        let cli = Cli::try_parse_from(std::iter::once("wiki-ratings").chain(args.iter().copied()))
            .unwrap();
        match cli.command {
            Command::Update(args) => args,
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_update_defaults() {
        let settings = Settings::from_args(parse(&["update"])).unwrap();
        assert_eq!(settings.courses, PathBuf::from("data/courses.json"));
        assert_eq!(settings.output, PathBuf::from("data/rmp-ratings.json"));
        assert_eq!(settings.delay, POLITENESS_DELAY);
        assert_eq!(
            settings.overrides.resolve_known_id("Donald Bonidie"),
            Some("141380")
        );
    }

    #[test]
    fn test_update_flags() {
        let settings = Settings::from_args(parse(&[
            "update",
            "--school-id",
            "U2Nob29sLTE=",
            "--delay-ms",
            "0",
            "--output",
            "out/ratings.json",
        ]))
        .unwrap();
        assert_eq!(settings.service.school_id, "U2Nob29sLTE=");
        assert!(settings.delay.is_zero());
        assert_eq!(settings.output, PathBuf::from("out/ratings.json"));
    }

    #[test]
    fn test_missing_override_file() {
        let err = Settings::from_args(parse(&["update", "--overrides", "/nonexistent/o.toml"]))
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_empty_school_id_rejected() {
        let err = Settings::from_args(parse(&["update", "--school-id", " "])).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
