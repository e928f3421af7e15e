//! CLI command implementations
//!
//! Per BOOT.md these commands follow a strict sequence: load and validate
//! configuration, open the proof chain, then drive the twin. No subsystem
//! starts on a partially valid configuration.

use std::io::BufRead;
use std::path::Path;
use std::sync::Arc;

use chrono::Utc;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use uuid::Uuid;

use crate::config::{Config, StorageMode};
use crate::observability::{log_event_with_fields, Event, MetricsRegistry};
use crate::proof::{verify_chain_file, ChainWriter};
use crate::telemetry::{PhysicalSnapshot, SnapshotReader};
use crate::twin::ConsciousTwin;

use super::args::{Cli, Command};
use super::errors::{CliError, CliResult};
use super::io::{write_line, write_state};

/// Parse arguments and dispatch
pub fn run() -> CliResult<()> {
    run_command(Cli::parse_args())
}

/// Dispatch a parsed command
pub fn run_command(cli: Cli) -> CliResult<()> {
    match cli.command {
        Command::Init { config } => init(&config),
        Command::Run { config, input } => run_loop(&config, input.as_deref()),
        Command::Simulate {
            config,
            ticks,
            seed,
        } => simulate(&config, ticks, seed),
        Command::Verify { config } => verify(&config),
    }
}

/// Load and validate the configuration, logging the outcome
fn load_config(path: &Path) -> CliResult<Config> {
    let config = Config::load(path)?;
    let theories = config
        .consciousness
        .theories
        .iter()
        .map(|t| t.as_str())
        .collect::<Vec<_>>()
        .join(",");
    log_event_with_fields(
        Event::ConfigLoaded,
        &[
            ("config", &path.display().to_string()),
            ("twin", &config.twin.name),
            ("physical_id", &config.twin.physical_id),
            ("theories", &theories),
        ],
    );
    Ok(config)
}

/// Open the proof chain according to the configuration
fn open_chain(config: &Config) -> CliResult<ChainWriter> {
    let writer = if !config.proof_chain.enabled {
        ChainWriter::disabled(&config.twin.name)
    } else {
        match config.proof_chain.storage {
            StorageMode::Memory => ChainWriter::in_memory(&config.twin.name),
            StorageMode::File => {
                let path = config
                    .chain_path()
                    .ok_or_else(|| CliError::config_error("proof_chain.path is missing"))?;
                ChainWriter::open_file(&config.twin.name, path)
                    .map_err(|e| CliError::run_failed(e.to_string()))?
            }
        }
    };

    let mode = match (config.proof_chain.enabled, config.proof_chain.storage) {
        (false, _) => "disabled",
        (true, StorageMode::Memory) => "memory",
        (true, StorageMode::File) => "file",
    };
    log_event_with_fields(
        Event::ChainOpened,
        &[
            ("mode", mode),
            ("next_sequence", &writer.next_sequence().to_string()),
        ],
    );

    Ok(writer)
}

/// `init`: validate config and prepare the chain directory
pub fn init(config_path: &Path) -> CliResult<()> {
    let config = load_config(config_path)?;

    if config.proof_chain.storage == StorageMode::File {
        let path = config
            .chain_path()
            .ok_or_else(|| CliError::config_error("proof_chain.path is missing"))?;
        if path.exists() {
            return Err(CliError::already_initialized(path.display().to_string()));
        }
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
    }

    log_event_with_fields(
        Event::InitComplete,
        &[("config", &config_path.display().to_string())],
    );
    Ok(())
}

/// `run`: stream snapshots through the twin, one state line per snapshot
pub fn run_loop(config_path: &Path, input: Option<&Path>) -> CliResult<()> {
    let config = load_config(config_path)?;
    let chain = open_chain(&config)?;
    let metrics = Arc::new(MetricsRegistry::new());
    let mut twin = ConsciousTwin::new(&config, chain, Arc::clone(&metrics));

    let run_id = Uuid::new_v4().to_string();
    let source = input.map(|p| p.display().to_string()).unwrap_or_else(|| "-".into());
    log_event_with_fields(
        Event::RunStart,
        &[("run_id", &run_id), ("source", &source), ("twin", twin.twin_id())],
    );

    match input {
        Some(path) => drive(&mut twin, SnapshotReader::from_path(path)?)?,
        None => drive(&mut twin, SnapshotReader::from_stdin())?,
    }

    let snapshot = metrics.snapshot();
    let fields = snapshot.to_fields();
    let mut refs: Vec<(&str, &str)> = fields.iter().map(|(k, v)| (*k, v.as_str())).collect();
    refs.push(("run_id", &run_id));
    log_event_with_fields(Event::RunComplete, &refs);

    Ok(())
}

fn drive<R: BufRead>(twin: &mut ConsciousTwin, mut reader: SnapshotReader<R>) -> CliResult<()> {
    while let Some(snapshot) = reader.read_next()? {
        let state = twin.sync(snapshot)?;
        write_state(&state)?;
    }
    Ok(())
}

/// `simulate`: drive the twin with seeded synthetic telemetry
pub fn simulate(config_path: &Path, ticks: u64, seed: u64) -> CliResult<()> {
    let config = load_config(config_path)?;
    let chain = open_chain(&config)?;
    let metrics = Arc::new(MetricsRegistry::new());
    let mut twin = ConsciousTwin::new(&config, chain, metrics);

    log_event_with_fields(
        Event::SimulateStart,
        &[("ticks", &ticks.to_string()), ("seed", &seed.to_string())],
    );

    write_line(&"=".repeat(65))?;
    write_line(&format!("{} - simulation", twin.twin_id()))?;
    write_line(&"=".repeat(65))?;
    write_line("")?;

    let mut rng = StdRng::seed_from_u64(seed);
    for tick in 0..ticks {
        let snapshot = synthetic_snapshot(&config.twin.physical_id, tick, &mut rng);
        let state = twin.sync(snapshot)?;
        write_line(&format!(
            "  T={:2} | {:18} | Score: {:.4} | Sync: {:.3} | Anomalies: {}",
            tick,
            state.consciousness_level.as_str(),
            state.consciousness_score,
            state.sync_accuracy,
            state.anomalies_detected
        ))?;
    }

    write_line("")?;
    let appended = twin.chain().next_sequence() - 1;
    write_line(&format!("Proof chain: {} records", appended))?;
    if let Some(head) = twin.chain().head_hash() {
        write_line(&format!("Latest proof: {}...", &head[..32]))?;
    }

    log_event_with_fields(Event::SimulateComplete, &[("records", &appended.to_string())]);
    Ok(())
}

/// Synthetic robot-arm telemetry: slow thermal drift, decaying positional
/// accuracy and health, noisy torque readings.
fn synthetic_snapshot(physical_id: &str, tick: u64, rng: &mut StdRng) -> PhysicalSnapshot {
    let t = tick as f64;
    PhysicalSnapshot::new(physical_id, Utc::now().to_rfc3339())
        .with_sensor("temperature", 25.0 + rng.gen::<f64>() * 5.0 + t * 0.3)
        .with_sensor("vibration", 0.1 + rng.gen::<f64>() * 0.3)
        .with_sensor("current", 2.5 + rng.gen::<f64>() * 1.0)
        .with_sensor("torque_j1", 10.0 + rng.gen::<f64>() * 5.0)
        .with_sensor("torque_j2", 8.0 + rng.gen::<f64>() * 4.0)
        .with_sensor(
            "position_accuracy",
            (0.99 - t * 0.02 - rng.gen::<f64>() * 0.05).max(0.1),
        )
        .with_actuator("joint_1", rng.gen())
        .with_actuator("joint_2", rng.gen())
        .with_health((1.0 - t * 0.03).max(0.3))
}

/// `verify`: check the durable chain and exit non-zero on corruption
pub fn verify(config_path: &Path) -> CliResult<()> {
    let config = load_config(config_path)?;

    if config.proof_chain.storage != StorageMode::File {
        return Err(CliError::config_error(
            "verify requires proof_chain.storage = file",
        ));
    }
    let path = config
        .chain_path()
        .ok_or_else(|| CliError::config_error("proof_chain.path is missing"))?;

    let metrics = MetricsRegistry::new();
    metrics.increment_verify_runs();

    log_event_with_fields(Event::VerifyStart, &[("chain", &path.display().to_string())]);

    match verify_chain_file(path) {
        Ok(summary) => {
            let records = summary.records.to_string();
            let head = summary.head_hash.unwrap_or_default();
            log_event_with_fields(
                Event::VerifyComplete,
                &[("records", &records), ("head_hash", &head)],
            );
            write_line(&format!("chain ok: {} records", records))?;
            Ok(())
        }
        Err(e) => {
            metrics.increment_verify_failures();
            if e.is_fatal() {
                log_event_with_fields(
                    Event::ChainCorruption,
                    &[("chain", &path.display().to_string())],
                );
            }
            Err(CliError::verify_failed(e.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    fn write_config(dir: &Path, chain_path: &Path) -> std::path::PathBuf {
        let config_path = dir.join("oriontwin.yaml");
        let mut file = std::fs::File::create(&config_path).unwrap();
        write!(
            file,
            r#"
twin:
  name: DT-01
  physical_id: dev-01
  sync_rate_hz: 10
consciousness:
  measurement_rate_hz: 10
proof_chain:
  enabled: true
  algorithm: sha256
  storage: file
  path: {}
"#,
            chain_path.display()
        )
        .unwrap();
        config_path
    }

    fn write_telemetry(dir: &Path, lines: &[&str]) -> std::path::PathBuf {
        let path = dir.join("telemetry.jsonl");
        let mut file = std::fs::File::create(&path).unwrap();
        for line in lines {
            writeln!(file, "{}", line).unwrap();
        }
        path
    }

    #[test]
    fn test_init_then_run_then_verify() {
        let dir = tempfile::TempDir::new().unwrap();
        let chain_path = dir.path().join("data").join("chain.log");
        let config_path = write_config(dir.path(), &chain_path);

        init(&config_path).unwrap();
        assert!(chain_path.parent().unwrap().exists());

        let input = write_telemetry(
            dir.path(),
            &[
                r#"{"device_id": "dev-01", "timestamp": "t1", "sensors": {"a": 1.0}}"#,
                r#"{"device_id": "dev-01", "timestamp": "t2", "sensors": {"a": 1.1}}"#,
            ],
        );
        run_loop(&config_path, Some(&input)).unwrap();

        verify(&config_path).unwrap();
    }

    #[test]
    fn test_init_twice_fails() {
        let dir = tempfile::TempDir::new().unwrap();
        let chain_path = dir.path().join("chain.log");
        let config_path = write_config(dir.path(), &chain_path);

        init(&config_path).unwrap();
        std::fs::write(&chain_path, "").unwrap();

        let err = init(&config_path).unwrap_err();
        assert_eq!(err.code_str(), "ORION_CLI_ALREADY_INITIALIZED");
    }

    #[test]
    fn test_run_rejects_wrong_device() {
        let dir = tempfile::TempDir::new().unwrap();
        let chain_path = dir.path().join("chain.log");
        let config_path = write_config(dir.path(), &chain_path);

        let input = write_telemetry(
            dir.path(),
            &[r#"{"device_id": "intruder", "timestamp": "t1"}"#],
        );
        let err = run_loop(&config_path, Some(&input)).unwrap_err();
        assert!(format!("{}", err).contains("ORION_TWIN_DEVICE_MISMATCH"));
    }

    #[test]
    fn test_verify_detects_tampering() {
        let dir = tempfile::TempDir::new().unwrap();
        let chain_path = dir.path().join("chain.log");
        let config_path = write_config(dir.path(), &chain_path);

        let input = write_telemetry(
            dir.path(),
            &[r#"{"device_id": "dev-01", "timestamp": "t1", "sensors": {"a": 0.25}}"#],
        );
        run_loop(&config_path, Some(&input)).unwrap();

        let content = std::fs::read_to_string(&chain_path).unwrap();
        std::fs::write(&chain_path, content.replace("\"anomalies\":0", "\"anomalies\":9")).unwrap();

        let err = verify(&config_path).unwrap_err();
        assert_eq!(err.code_str(), "ORION_CLI_VERIFY_FAILED");
        assert!(format!("{}", err).contains("ORION_CHAIN_CORRUPTION"));
    }

    #[test]
    fn test_verify_requires_file_storage() {
        let dir = tempfile::TempDir::new().unwrap();
        let config_path = dir.path().join("oriontwin.yaml");
        std::fs::write(
            &config_path,
            r#"
twin:
  name: DT-01
  physical_id: dev-01
  sync_rate_hz: 10
consciousness:
  measurement_rate_hz: 10
"#,
        )
        .unwrap();

        let err = verify(&config_path).unwrap_err();
        assert_eq!(err.code_str(), "ORION_CLI_CONFIG_ERROR");
    }

    #[test]
    fn test_simulate_appends_records() {
        let dir = tempfile::TempDir::new().unwrap();
        let chain_path = dir.path().join("chain.log");
        let config_path = write_config(dir.path(), &chain_path);

        simulate(&config_path, 5, 42).unwrap();
        verify(&config_path).unwrap();

        let records = crate::proof::read_chain_file(&chain_path).unwrap();
        assert_eq!(records.len(), 5);
    }
}
