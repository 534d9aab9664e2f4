use schema_sampler::adapters::{Repl, SchemaSession};
use schema_sampler::config::ExportSettings;
use schema_sampler::domain::FieldId;
use serde_json::json;
use std::fs;
use std::io::Cursor;
use tempfile::TempDir;

fn run_script(script: &str, export: ExportSettings) -> anyhow::Result<(SchemaSession, String)> {
    let mut output = Vec::new();
    let session = Repl::new(
        Cursor::new(script.to_string()),
        &mut output,
        SchemaSession::default(),
        export,
    )
    .run()?;
    Ok((session, String::from_utf8(output)?))
}

/// Ids are random, so scripts are built one command at a time from the session state
fn root_id(session: &SchemaSession, index: usize) -> FieldId {
    session.tree().roots()[index].id.clone()
}

#[test]
fn test_empty_session() -> anyhow::Result<()> {
    let (session, output) = run_script("tree\nstats\nquit\n", ExportSettings::default())?;

    assert!(session.tree().is_empty());
    assert!(output.contains("No fields defined"));
    assert!(output.contains("Total Fields: 0"));
    Ok(())
}

#[test]
fn test_build_and_preview() -> anyhow::Result<()> {
    let (session, _) = run_script("add\nadd\n", ExportSettings::default())?;
    let first = root_id(&session, 0);
    let second = root_id(&session, 1);

    // Replay the same adds so the ids line up, then edit through the loop
    let mut output = Vec::new();
    let script = format!(
        "name {first} age\ntype {first} number\nname {second} user name\n\
         value {first} 30\npreview\n"
    );
    let session = Repl::new(
        Cursor::new(script),
        &mut output,
        session,
        ExportSettings::default(),
    )
    .run()?;
    let output = String::from_utf8(output)?;

    assert!(output.contains("warning: Field name must be valid"));
    assert_eq!(
        session.preview(),
        json!({"age": 30, "user name": "sample string"})
    );
    assert!(output.contains("\"age\": 30"));
    Ok(())
}

#[test]
fn test_errors_do_not_end_session() -> anyhow::Result<()> {
    let script = "frobnicate\nrm field_missing\ntype\nadd\n";
    let (session, output) = run_script(script, ExportSettings::default())?;

    assert!(output.contains("error: Unknown command: frobnicate"));
    assert!(output.contains("error: Field not found: field_missing"));
    assert!(output.contains("error: Usage: type <id> <type>"));
    assert_eq!(session.tree().len(), 1);
    Ok(())
}

#[test]
fn test_copy_and_export() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let export = ExportSettings {
        file_name: "schema.json".to_string(),
        directory: temp_dir.path().to_path_buf(),
    };

    let (session, output) = run_script("copy\nexport\n", export.clone())?;
    assert!(session.tree().is_empty());
    assert!(output.contains("{}\n[ok] Copied"));
    assert!(output.contains("[ok] Schema exported"));
    assert_eq!(fs::read_to_string(temp_dir.path().join("schema.json"))?, "{}");

    let missing = temp_dir.path().join("missing");
    let (_, output) = run_script(&format!("export {}\n", missing.display()), export)?;
    assert!(output.contains("[failed] Export failed"));
    Ok(())
}
