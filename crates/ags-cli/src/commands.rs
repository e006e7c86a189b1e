use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, info_span};

use ags_cli::explore::{Explorer, default_export_path};
use ags_cli::render::{render_view, tables_json, tables_table};
use ags_ingest::Loader;
use ags_session::{GridOptions, Session, SessionConfig};

use crate::cli::{ExploreArgs, ExportArgs, LoadArgs, ShowArgs, TablesArgs};

pub fn run_tables(args: &TablesArgs) -> Result<()> {
    let session = open_session(&args.file, &args.load, SessionConfig::default())?;
    if args.json {
        let json = tables_json(session.store());
        println!("{}", serde_json::to_string_pretty(&json)?);
    } else if session.store().is_empty() {
        println!("{}", render_view(&session.projection()));
    } else {
        println!(
            "{}",
            tables_table(session.store(), session.selection().get())
        );
    }
    Ok(())
}

pub fn run_show(args: &ShowArgs) -> Result<()> {
    let config = SessionConfig {
        grid: GridOptions {
            max_rows: args.max_rows,
        },
        ..SessionConfig::default()
    };
    let mut session = open_session(&args.file, &args.load, config)?;
    select_table(&mut session, args.table.as_deref())?;
    println!("{}", render_view(&session.projection()));
    Ok(())
}

pub fn run_export(args: &ExportArgs) -> Result<()> {
    let mut session = open_session(&args.file, &args.load, SessionConfig::default())?;
    select_table(&mut session, args.table.as_deref())?;
    let export = session.export().context("nothing to export")?;

    match args.output.as_deref() {
        Some(path) if path == Path::new("-") => {
            let mut stdout = io::stdout().lock();
            export.write_to(&mut stdout)?;
            stdout.flush()?;
        }
        output => {
            let path = output.map_or_else(
                || default_export_path(export.file_name()),
                Path::to_path_buf,
            );
            let file =
                File::create(&path).with_context(|| format!("create {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            let bytes = export.write_to(&mut writer)?;
            writer
                .flush()
                .with_context(|| format!("write {}", path.display()))?;
            println!(
                "Exported {} to {} ({bytes} bytes)",
                export.table_name(),
                path.display()
            );
        }
    }
    Ok(())
}

pub fn run_explore(args: &ExploreArgs) -> Result<()> {
    let mut session = Session::new(Loader::ags4(args.load.options()), args.session_config());
    session.subscribe(|view| {
        debug!(
            state = ?view.state,
            tables = view.table_names.len(),
            active = ?view.active_name,
            "view updated"
        );
    });

    let mut explorer = Explorer::new(session, io::stdout().lock());
    if let Some(file) = &args.file {
        explorer.load(file)?;
    }
    explorer.run(io::stdin().lock())
}

fn open_session(file: &Path, load: &LoadArgs, config: SessionConfig) -> Result<Session> {
    let span = info_span!("open", file = %file.display());
    let _guard = span.enter();
    let mut session = Session::new(Loader::ags4(load.options()), config);
    session
        .upload_path(file)
        .with_context(|| format!("read {}", file.display()))?;
    Ok(session)
}

/// Selects `table` when given; otherwise keeps the first table.
fn select_table(session: &mut Session, table: Option<&str>) -> Result<()> {
    if let Some(name) = table {
        session.select(name)?;
    }
    Ok(())
}
