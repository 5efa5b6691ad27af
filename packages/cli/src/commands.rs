//! Subcommand implementations.

use std::path::{Path, PathBuf};

use turnout_map_country_models::MatchDiagnostics;
use turnout_map_join::JoinedDataset;
use turnout_map_names::{AliasError, AliasTable};
use turnout_map_presentation::{ChartData, turnout_label};
use turnout_map_source::{SourceError, SourceLoader, SourceLocations};

use crate::config::ConfigError;

/// File name of the styled map output.
pub const MAP_FILE: &str = "map.geojson";

/// File name of the chart output.
pub const CHART_FILE: &str = "chart.json";

/// Errors that abort a run.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    /// The configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// An input could not be loaded.
    #[error(transparent)]
    Source(#[from] SourceError),

    /// The configured aliases are invalid.
    #[error("Invalid aliases: {0}")]
    Alias(#[from] AliasError),

    /// An output could not be serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// An output could not be written.
    #[error("Failed to write {path}: {source}")]
    Write {
        /// The output path.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },
}

/// Loads all inputs and joins them.
///
/// # Errors
///
/// * If any input fails to load
pub async fn load_dataset(
    aliases: AliasTable,
    locations: &SourceLocations,
) -> Result<JoinedDataset, CommandError> {
    let loader = SourceLoader::new()?;
    let loaded = loader.load_all(locations).await?;

    Ok(JoinedDataset::join(
        aliases,
        loaded.boundaries,
        &loaded.turnout.rows,
        &loaded.classification,
    ))
}

/// Writes the styled map and chart data into `out_dir`.
///
/// # Errors
///
/// * If the output directory or a file cannot be written
/// * If an output cannot be serialized
pub async fn generate(dataset: &JoinedDataset, out_dir: &Path) -> Result<(), CommandError> {
    tokio::fs::create_dir_all(out_dir)
        .await
        .map_err(|source| CommandError::Write {
            path: out_dir.to_path_buf(),
            source,
        })?;

    let collection = turnout_map_presentation::styled_collection(dataset);
    write_output(&out_dir.join(MAP_FILE), serde_json::to_string(&collection)?).await?;

    let chart = ChartData::from_dataset(dataset);
    write_output(&out_dir.join(CHART_FILE), serde_json::to_string_pretty(&chart)?).await?;

    print_diagnostics(dataset.match_diagnostics());

    Ok(())
}

async fn write_output(path: &Path, contents: String) -> Result<(), CommandError> {
    let len = contents.len();
    tokio::fs::write(path, contents)
        .await
        .map_err(|source| CommandError::Write {
            path: path.to_path_buf(),
            source,
        })?;
    log::info!("Wrote {} ({len} bytes)", path.display());
    Ok(())
}

/// Prints match rates and every feature or turnout row left unmatched.
pub fn diagnostics(dataset: &JoinedDataset) {
    print_diagnostics(dataset.match_diagnostics());

    let unmatched: Vec<_> = dataset.unmatched_features().collect();
    if !unmatched.is_empty() {
        println!();
        println!("{:<40} {:<8} PARTY", "FEATURE", "TURNOUT");
        println!("{}", "-".repeat(56));
        for feature in unmatched {
            println!(
                "{:<40} {:<8} {}",
                feature.canonical_name,
                yes_no(feature.turnout_matched),
                yes_no(feature.party_matched)
            );
        }
    }

    let orphans: Vec<&str> = dataset
        .turnout_entries()
        .map(|(name, _)| name)
        .filter(|name| {
            !dataset
                .features()
                .iter()
                .any(|f| f.canonical_name == *name)
        })
        .collect();

    if !orphans.is_empty() {
        println!();
        println!("Turnout rows with no boundary ({}):", orphans.len());
        for name in orphans {
            println!("  {name}");
        }
    }
}

/// Prints the joined values for one country.
pub fn lookup(dataset: &JoinedDataset, name: &str) {
    let canonical = dataset.resolve_canonical_name(name);
    let turnout = dataset.lookup_turnout(&canonical);
    let classification = dataset.lookup_classification(&canonical, name);

    println!("Canonical name: {canonical}");
    println!("Party system:   {classification}");
    println!("Turnout:        {}", turnout_label(turnout.percentage));
    println!(
        "Year:           {}",
        turnout
            .year
            .map_or_else(|| "N/A".to_string(), |y| y.to_string())
    );
}

fn print_diagnostics(diagnostics: MatchDiagnostics) {
    println!("{diagnostics}");
}

const fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}

#[cfg(test)]
mod tests {
    use super::*;
    use turnout_map_source::Location;

    fn write_fixture(dir: &Path, name: &str, contents: &str) -> Location {
        let path = dir.join(name);
        std::fs::write(&path, contents).unwrap();
        Location::Path(path)
    }

    fn fixtures(dir: &Path) -> SourceLocations {
        std::fs::create_dir_all(dir).unwrap();
        SourceLocations {
            classification: write_fixture(
                dir,
                "party_system.json",
                r#"{ "FRANCE": "multi-party", "RUSSIA": "dominant-party" }"#,
            ),
            turnout: write_fixture(
                dir,
                "turnout.csv",
                "country\tVoterTurnout_ParliamentaryVotingTurnoutPct\t\
                 VoterTurnout_ParliamentaryTurnoutDataYear\n\
                 France\t67.8\t2024\n\
                 Russian Federation\t51.7\t2021\n",
            ),
            boundaries: write_fixture(
                dir,
                "countries.geojson",
                r#"{
                    "type": "FeatureCollection",
                    "features": [
                        { "type": "Feature", "geometry": null,
                          "properties": { "ADMIN": "France" } },
                        { "type": "Feature", "geometry": null,
                          "properties": { "NAME": "Russia" } },
                        { "type": "Feature", "geometry": null,
                          "properties": { "NAME": "Peru" } }
                    ]
                }"#,
            ),
        }
    }

    #[tokio::test]
    async fn generate_writes_map_and_chart() {
        let tmp = std::env::temp_dir().join("turnout_map_cli_generate");
        let _ = std::fs::remove_dir_all(&tmp);
        let locations = fixtures(&tmp.join("data"));
        let out_dir = tmp.join("out");

        let dataset = load_dataset(AliasTable::default(), &locations)
            .await
            .unwrap();
        assert_eq!(
            dataset.match_diagnostics(),
            MatchDiagnostics {
                turnout_matched: 2,
                party_matched: 2,
                total: 3,
            }
        );

        generate(&dataset, &out_dir).await.unwrap();

        let map: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(out_dir.join(MAP_FILE)).unwrap())
                .unwrap();
        assert_eq!(map["type"], "FeatureCollection");
        assert_eq!(map["features"].as_array().map(Vec::len), Some(3));
        assert_eq!(map["features"][1]["properties"]["canonicalName"], "RUSSIA");
        assert_eq!(map["features"][1]["properties"]["turnoutYear"], 2021);

        let chart: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(out_dir.join(CHART_FILE)).unwrap())
                .unwrap();
        assert_eq!(chart["labels"], serde_json::json!(["multi-party", "dominant-party"]));
        assert_eq!(chart["averages"], serde_json::json!([67.8, 51.7]));

        let _ = std::fs::remove_dir_all(&tmp);
    }

    #[tokio::test]
    async fn missing_turnout_aborts_before_writing() {
        let tmp = std::env::temp_dir().join("turnout_map_cli_missing_turnout");
        let _ = std::fs::remove_dir_all(&tmp);
        let mut locations = fixtures(&tmp.join("data"));
        locations.turnout = Location::Path(tmp.join("data").join("absent.csv"));
        let out_dir = tmp.join("out");

        let result = match load_dataset(AliasTable::default(), &locations).await {
            Ok(dataset) => generate(&dataset, &out_dir).await,
            Err(e) => Err(e),
        };

        assert!(matches!(result, Err(CommandError::Source(_))));
        assert!(!out_dir.join(MAP_FILE).exists());
        assert!(!out_dir.join(CHART_FILE).exists());

        let _ = std::fs::remove_dir_all(&tmp);
    }
}
