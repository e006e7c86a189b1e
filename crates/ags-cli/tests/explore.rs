//! Integration tests for the interactive explorer.

use std::fs;
use std::io::Cursor;
use std::path::Path;

use ags_cli::explore::{ExploreCommand, Explorer};
use ags_ingest::{LoadOptions, Loader};
use ags_session::{LoadFailurePolicy, Session, SessionConfig, ViewState};
use tempfile::TempDir;

const SITE: &str = r#""GROUP","PROJ"
"HEADING","PROJ_ID","PROJ_NAME"
"UNIT","",""
"TYPE","ID","X"
"DATA","121415","Harbour Road"

"GROUP","LOCA"
"HEADING","LOCA_ID","LOCA_TYPE"
"UNIT","",""
"TYPE","ID","PA"
"DATA","BH1","CP"
"DATA","BH2","RC"
"#;

fn write_file(dir: &Path, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).expect("write fixture");
    path
}

fn run_script(session: Session, script: &str) -> (Explorer<Vec<u8>>, String) {
    let mut explorer = Explorer::new(session, Vec::new());
    explorer.run(Cursor::new(script)).expect("run");
    let header = explorer.session().projection().header_label;
    (explorer, header)
}

fn output(explorer: Explorer<Vec<u8>>) -> String {
    String::from_utf8(explorer.into_output()).expect("utf-8")
}

#[test]
fn load_reports_progress_and_table_count() {
    let dir = TempDir::new().expect("tempdir");
    let site = write_file(dir.path(), "site.ags", SITE);

    let (explorer, header) = run_script(
        Session::default(),
        &format!("load {}\nselect LOCA\n", site.display()),
    );
    assert_eq!(header, "Showing LOCA • 2 rows • 3 columns");

    let out = output(explorer);
    assert!(out.contains("Reading AGS4 file...\nSuccessfully loaded 2 tables\n"));
    assert!(out.contains("2 rows × 3 columns"));
}

#[test]
fn load_returns_with_the_result_applied() {
    let dir = TempDir::new().expect("tempdir");
    let site = write_file(dir.path(), "site.ags", SITE);

    let mut explorer = Explorer::new(Session::default(), Vec::new());
    explorer.load(&site).expect("load");

    assert!(!explorer.session().is_loading());
    assert_eq!(explorer.session().store().keys(), vec!["PROJ", "LOCA"]);
    assert_eq!(explorer.session().selection().get(), Some("PROJ"));
}

#[test]
fn failed_load_prints_error_and_clears_tables() {
    let dir = TempDir::new().expect("tempdir");
    let site = write_file(dir.path(), "site.ags", SITE);
    let broken = write_file(dir.path(), "broken.ags", "\"DATA\",\"BH1\"\n");

    let mut explorer = Explorer::new(Session::default(), Vec::new());
    explorer.load(&site).expect("load");
    explorer.load(&broken).expect("load");

    assert_eq!(explorer.session().projection().state, ViewState::NoFileLoaded);
    let out = output(explorer);
    assert!(out.contains("Error reading AGS file: "));
}

#[test]
fn failed_load_can_keep_the_previous_tables() {
    let dir = TempDir::new().expect("tempdir");
    let site = write_file(dir.path(), "site.ags", SITE);
    let notes = write_file(dir.path(), "notes.txt", "hello");

    let session = Session::new(
        Loader::ags4(LoadOptions::default()),
        SessionConfig {
            load_failure_policy: LoadFailurePolicy::KeepPrevious,
            ..SessionConfig::default()
        },
    );
    let mut explorer = Explorer::new(session, Vec::new());
    explorer.load(&site).expect("load");
    explorer.load(&notes).expect("load");

    assert_eq!(explorer.session().store().keys(), vec!["PROJ", "LOCA"]);
    let out = output(explorer);
    assert!(out.contains("Error reading AGS file: unsupported file type: notes.txt"));
}

#[test]
fn invalid_selection_is_reported_without_changing_state() {
    let dir = TempDir::new().expect("tempdir");
    let site = write_file(dir.path(), "site.ags", SITE);

    let (explorer, header) = run_script(
        Session::default(),
        &format!("load {}\nselect GEOL\n", site.display()),
    );
    assert_eq!(header, "Showing PROJ • 1 rows • 3 columns");
    assert_eq!(explorer.session().selection().get(), Some("PROJ"));

    let out = output(explorer);
    assert!(out.contains(
        "error: invalid selection 'GEOL': available tables are [PROJ, LOCA]"
    ));
}

#[test]
fn export_writes_the_active_table() {
    let dir = TempDir::new().expect("tempdir");
    let site = write_file(dir.path(), "site.ags", SITE);
    let target = dir.path().join("loca.csv");

    let mut explorer = Explorer::new(Session::default(), Vec::new());
    explorer.load(&site).expect("load");
    explorer
        .execute(ExploreCommand::Select("LOCA".to_string()))
        .expect("select");
    explorer
        .execute(ExploreCommand::Export(Some(target.clone())))
        .expect("export");

    let csv = fs::read_to_string(&target).expect("read export");
    insta::assert_snapshot!(csv, @r"
    HEADING,LOCA_ID,LOCA_TYPE
    UNIT,,
    TYPE,ID,PA
    DATA,BH1,CP
    DATA,BH2,RC
    ");
    let out = output(explorer);
    assert!(out.contains(&format!("Exported LOCA to {}", target.display())));
}

#[test]
fn export_is_unavailable_without_a_file() {
    let dir = TempDir::new().expect("tempdir");
    let target = dir.path().join("out.csv");

    let mut explorer = Explorer::new(Session::default(), Vec::new());
    explorer
        .execute(ExploreCommand::Export(Some(target.clone())))
        .expect("export");

    assert!(!target.exists());
    let out = output(explorer);
    assert_eq!(out, "Export unavailable: No file uploaded\n");
}

#[test]
fn show_and_tables_describe_empty_state() {
    let (explorer, _) = run_script(Session::default(), "tables\nshow\nquit\nshow\n");
    let out = output(explorer);
    assert_eq!(
        out.matches("No file uploaded\nPlease upload an AGS4 file to begin exploring")
            .count(),
        2
    );
}

#[test]
fn tables_lists_every_group() {
    let dir = TempDir::new().expect("tempdir");
    let site = write_file(dir.path(), "site.ags", SITE);

    let (explorer, _) = run_script(
        Session::default(),
        &format!("load {}\ntables\n", site.display()),
    );
    let out = output(explorer);
    assert!(out.contains("PROJ"));
    assert!(out.contains("LOCA"));
    assert!(out.contains("Columns"));
}

#[test]
fn unknown_commands_do_not_stop_the_explorer() {
    let (explorer, _) = run_script(Session::default(), "frobnicate\nhelp\n");
    let out = output(explorer);
    assert!(out.contains("error: unknown command 'frobnicate'"));
    assert!(out.contains("select NAME"));
}
