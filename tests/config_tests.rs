// Tests for layered configuration loading

use anyhow::Result;
use meeting_cost::Config;
use std::fs;
use std::time::Duration;
use tempfile::TempDir;

#[test]
fn test_defaults_without_file() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let missing = temp_dir.path().join("does-not-exist");

    let cfg = Config::load(missing.to_str().unwrap())?;

    assert_eq!(cfg.service.name, "meeting-cost");
    assert_eq!(cfg.http_addr(), "127.0.0.1:3030");
    assert_eq!(cfg.meeting.participants, 8);
    assert_eq!(cfg.meeting.annual_salary, 85_000.0);
    assert_eq!(cfg.timer.tick_interval_ms, 1000);

    Ok(())
}

#[test]
fn test_file_overrides_defaults() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("meeting-cost.toml");
    fs::write(
        &path,
        r#"
[service.http]
port = 8088

[meeting]
participants = 12
annual_salary = 120000.0

[timer]
tick_interval_ms = 250
"#,
    )?;

    let cfg = Config::load(path.to_str().unwrap())?;

    assert_eq!(cfg.service.http.port, 8088);
    assert_eq!(cfg.service.http.bind, "127.0.0.1");
    assert_eq!(cfg.meeting.participants, 12);

    let timer = cfg.timer_config();
    assert_eq!(timer.participants, 12);
    assert_eq!(timer.annual_salary, 120_000.0);
    assert_eq!(timer.tick_interval, Duration::from_millis(250));
    assert!(timer.meeting_id.starts_with("meeting-"));

    Ok(())
}

#[test]
fn test_invalid_file_is_an_error() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("broken.toml");
    fs::write(&path, "[meeting]\nparticipants = \"lots\"\n")?;

    assert!(Config::load(path.to_str().unwrap()).is_err());
    Ok(())
}

#[test]
fn test_repository_config_loads() -> Result<()> {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/config/meeting-cost");
    let cfg = Config::load(path)?;

    assert_eq!(cfg.meeting.participants, 8);
    assert_eq!(cfg.timer.tick_interval_ms, 1000);
    Ok(())
}
