use anyhow::{Context, Result};
use insta_cmd::assert_cmd_snapshot;
use serde_json::Value;

use crate::CliTest;

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    assert_cmd_snapshot!(test.init_command(), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Created .resrefactorrc.json

    ----- stderr -----
    ");

    let content = test.read_file(".resrefactorrc.json")?;
    let parsed: Value = serde_json::from_str(&content).context("Config should be valid JSON")?;
    assert!(parsed.get("includes").is_some());
    assert!(parsed.get("resourceFile").is_some());
    assert_eq!(parsed["ambientImports"], true);
    assert!(test.root().join(".resrefactorrc.json").exists());

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::with_file(".resrefactorrc.json", "{}")?;

    assert_cmd_snapshot!(test.init_command(), @r"
    success: false
    exit_code: 1
    ----- stdout -----

    ----- stderr -----
    Error: .resrefactorrc.json already exists
    ");
    assert_eq!(test.read_file(".resrefactorrc.json")?, "{}");

    Ok(())
}
