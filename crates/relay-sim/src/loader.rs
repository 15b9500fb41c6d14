//! Scenario loading from JSON.

use crate::{Result, Scenario};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::info;

pub fn load_scenario(path: &Path) -> Result<Scenario> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let scenario: Scenario = serde_json::from_reader(reader)?;
    scenario.validate()?;

    info!(
        "Loaded scenario '{}': {} vessels, {} ground stations, {} links",
        scenario.name,
        scenario.vessels.len(),
        scenario.ground_stations.len(),
        scenario.links.len()
    );

    Ok(scenario)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SimError;
    use std::io::Write;

    fn write_temp(contents: &str) -> std::path::PathBuf {
        let mut path = std::env::temp_dir();
        path.push(format!("relay-sim-scenario-{}.json", std::process::id()));
        let mut file = File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_loads_and_validates() {
        let path = write_temp(
            r#"{
                "name": "two node",
                "ground_stations": [
                    { "id": "GS-DSN", "name": "Deep Space Network", "relay_power": 100000.0 }
                ],
                "vessels": [
                    {
                        "id": "VSL-01",
                        "name": "Hermes",
                        "transmit_power": 500.0,
                        "environment": { "base_rate_mb_s": 10.0 },
                        "science_queue_mb": 25.0
                    }
                ],
                "links": [
                    { "a": "VSL-01", "b": "GS-DSN", "strength": 0.8, "distance_m": 1.0e9 }
                ]
            }"#,
        );

        let scenario = load_scenario(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(scenario.vessels.len(), 1);
        // Unspecified environment fields come from the defaults
        assert!(scenario.vessels[0].environment.powered);
        assert_eq!(scenario.vessels[0].environment.base_rate_mb_s, 10.0);
        assert_eq!(scenario.vessels[0].science_queue_mb, 25.0);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = load_scenario(Path::new("/nonexistent/scenario.json"));
        assert!(matches!(result, Err(SimError::Io(_))));
    }
}
