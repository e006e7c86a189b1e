//! Interactive explorer reading commands line by line.

use std::fs::File;
use std::io::{BufRead, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use tracing::debug;

use ags_session::Session;

use crate::render::{render_view, tables_table};

const PROMPT: &str = "ags> ";

const HELP: &str = "\
commands:
  load PATH      read an AGS4 file, replacing the current tables
  tables         list the tables of the loaded file
  select NAME    make NAME the active table
  show           print the active table
  export [PATH]  write the active table as CSV (default: <TABLE>.csv)
  help           show this message
  quit           leave the explorer";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExploreCommand {
    Load(PathBuf),
    Tables,
    Select(String),
    Show,
    Export(Option<PathBuf>),
    Help,
    Quit,
}

/// Parses one input line; blank lines yield `None`.
pub fn parse_command(line: &str) -> Result<Option<ExploreCommand>> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };
    let command = match (verb, rest) {
        ("load", "") => bail!("usage: load PATH"),
        ("load", path) => ExploreCommand::Load(PathBuf::from(path)),
        ("tables", "") => ExploreCommand::Tables,
        ("select", "") => bail!("usage: select NAME"),
        ("select", name) => ExploreCommand::Select(name.to_string()),
        ("show", "") => ExploreCommand::Show,
        ("export", "") => ExploreCommand::Export(None),
        ("export", path) => ExploreCommand::Export(Some(PathBuf::from(path))),
        ("help" | "?", "") => ExploreCommand::Help,
        ("quit" | "exit", "") => ExploreCommand::Quit,
        _ => bail!("unknown command '{line}', type 'help' for a list"),
    };
    Ok(Some(command))
}

/// Destination used when an export names no path: the table's CSV file name
/// in the current directory. Directory parts of the table name are dropped.
pub fn default_export_path(file_name: &str) -> PathBuf {
    Path::new(file_name)
        .file_name()
        .map_or_else(|| PathBuf::from("export.csv"), PathBuf::from)
}

pub struct Explorer<W> {
    session: Session,
    out: W,
}

impl<W: Write> Explorer<W> {
    pub fn new(session: Session, out: W) -> Self {
        Self { session, out }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// Reads commands until `quit` or end of input.
    pub fn run<R: BufRead>(&mut self, input: R) -> Result<()> {
        write!(self.out, "{PROMPT}")?;
        self.out.flush()?;
        for line in input.lines() {
            let line = line.context("read command")?;
            match parse_command(&line) {
                Ok(Some(command)) => {
                    if !self.execute(command)? {
                        return Ok(());
                    }
                }
                Ok(None) => {}
                Err(error) => writeln!(self.out, "error: {error}")?,
            }
            write!(self.out, "{PROMPT}")?;
            self.out.flush()?;
        }
        writeln!(self.out)?;
        Ok(())
    }

    /// Runs one command; returns `false` once the explorer should stop.
    pub fn execute(&mut self, command: ExploreCommand) -> Result<bool> {
        debug!(?command, "explorer command");
        match command {
            ExploreCommand::Load(path) => self.load(&path)?,
            ExploreCommand::Tables => self.tables()?,
            ExploreCommand::Select(name) => {
                if let Err(error) = self.session.select(&name) {
                    writeln!(self.out, "error: {error}")?;
                } else {
                    writeln!(self.out, "{}", self.session.projection().summary_label)?;
                }
            }
            ExploreCommand::Show => {
                writeln!(self.out, "{}", render_view(&self.session.projection()))?;
            }
            ExploreCommand::Export(path) => self.export(path)?,
            ExploreCommand::Help => writeln!(self.out, "{HELP}")?,
            ExploreCommand::Quit => return Ok(false),
        }
        Ok(true)
    }

    /// Loads `path` on the background worker, reporting progress and outcome.
    ///
    /// Blocks until the worker finishes, so the next command always sees the
    /// result of this load.
    pub fn load(&mut self, path: &Path) -> Result<()> {
        if let Err(error) = self.session.start_upload_path(path) {
            writeln!(self.out, "error: {error}")?;
            return Ok(());
        }
        writeln!(self.out, "Reading AGS4 file...")?;
        match self.session.wait_background() {
            Some(Ok(tables)) => writeln!(self.out, "Successfully loaded {tables} tables")?,
            Some(Err(error)) => writeln!(self.out, "Error reading AGS file: {error}")?,
            None => {}
        }
        Ok(())
    }

    fn tables(&mut self) -> Result<()> {
        let view = self.session.projection();
        if view.table_names.is_empty() {
            writeln!(self.out, "{}\n{}", view.state.title(), view.state.hint())?;
            return Ok(());
        }
        let table = tables_table(self.session.store(), view.active_name.as_deref());
        writeln!(self.out, "{table}")?;
        Ok(())
    }

    fn export(&mut self, path: Option<PathBuf>) -> Result<()> {
        let view = self.session.projection();
        if !view.can_export() {
            writeln!(self.out, "Export unavailable: {}", view.state.title())?;
            return Ok(());
        }
        let export = self.session.export()?;
        let path = path.unwrap_or_else(|| default_export_path(export.file_name()));
        let file =
            File::create(&path).with_context(|| format!("create {}", path.display()))?;
        let mut writer = BufWriter::new(file);
        let bytes = export.write_to(&mut writer)?;
        writer
            .flush()
            .with_context(|| format!("write {}", path.display()))?;
        writeln!(
            self.out,
            "Exported {} to {} ({bytes} bytes)",
            export.table_name(),
            path.display()
        )?;
        Ok(())
    }
}
