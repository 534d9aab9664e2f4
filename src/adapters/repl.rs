//! Line-oriented front end for a [`SchemaSession`]
//!
//! Bad input and refused edits are printed and the loop keeps going; only a
//! failing output stream ends the session early.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;
use tracing::info;

use super::error::SessionResult;
use super::export::{deliver, FileSink, WriterSink};
use super::notifier::{ConsoleNotifier, Notification, Notifier};
use super::session::SchemaSession;
use crate::config::ExportSettings;
use crate::domain::{is_valid_name, Field, FieldId, FieldTree, FieldType, UnknownFieldType};

pub const HELP: &str = "\
Commands:
  add [parent]          add an unnamed String field (under a Nested parent if given)
  name <id> <name>      rename a field
  type <id> <type>      change a field's type
  value <id> <raw>      set a value override (blank clears it)
  clear <id>            remove a value override
  rm <id>               delete a field and its children
  tree                  show the fields with their ids
  preview               show the sample JSON document
  stats                 show field counts and nesting depth
  copy                  print the JSON document for copying
  export [dir]          write the JSON document to a file
  types                 list available field types
  help                  show this help
  quit                  leave the session";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Add { parent: Option<FieldId> },
    Name { id: FieldId, name: String },
    Type { id: FieldId, field_type: FieldType },
    Value { id: FieldId, raw: String },
    Clear { id: FieldId },
    Remove { id: FieldId },
    Tree,
    Preview,
    Stats,
    Copy,
    Export { directory: Option<PathBuf> },
    Types,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Unknown command: {0} (type `help` for a list)")]
    UnknownCommand(String),

    #[error("Usage: {0}")]
    Usage(&'static str),

    #[error(transparent)]
    UnknownType(#[from] UnknownFieldType),
}

/// Split off the first whitespace-delimited word; the rest keeps its inner spacing
fn split_word(s: &str) -> (&str, &str) {
    let s = s.trim_start();
    match s.find(char::is_whitespace) {
        Some(i) => (&s[..i], s[i..].trim_start()),
        None => (s, ""),
    }
}

fn required_id(word: &str, usage: &'static str) -> Result<FieldId, ParseError> {
    if word.is_empty() {
        Err(ParseError::Usage(usage))
    } else {
        Ok(FieldId::from(word))
    }
}

impl ReplCommand {
    /// Parse one input line; blank lines yield `None`
    pub fn parse(line: &str) -> Result<Option<Self>, ParseError> {
        let line = line.trim_end_matches(['\r', '\n']);
        let (verb, rest) = split_word(line);
        if verb.is_empty() {
            return Ok(None);
        }

        let command = match verb.to_ascii_lowercase().as_str() {
            "add" => {
                let (parent, _) = split_word(rest);
                ReplCommand::Add {
                    parent: (!parent.is_empty()).then(|| FieldId::from(parent)),
                }
            }
            "name" => {
                let (id, name) = split_word(rest);
                ReplCommand::Name {
                    id: required_id(id, "name <id> <name>")?,
                    name: name.to_string(),
                }
            }
            "type" => {
                let (id, type_name) = split_word(rest);
                let id = required_id(id, "type <id> <type>")?;
                if type_name.is_empty() {
                    return Err(ParseError::Usage("type <id> <type>"));
                }
                ReplCommand::Type {
                    id,
                    field_type: FieldType::from_str(type_name)?,
                }
            }
            "value" => {
                let (id, raw) = split_word(rest);
                ReplCommand::Value {
                    id: required_id(id, "value <id> <raw>")?,
                    raw: raw.to_string(),
                }
            }
            "clear" => ReplCommand::Clear {
                id: required_id(split_word(rest).0, "clear <id>")?,
            },
            "rm" | "remove" | "delete" => ReplCommand::Remove {
                id: required_id(split_word(rest).0, "rm <id>")?,
            },
            "tree" | "ls" => ReplCommand::Tree,
            "preview" | "show" => ReplCommand::Preview,
            "stats" => ReplCommand::Stats,
            "copy" => ReplCommand::Copy,
            "export" => {
                let (dir, _) = split_word(rest);
                ReplCommand::Export {
                    directory: (!dir.is_empty()).then(|| PathBuf::from(dir)),
                }
            }
            "types" => ReplCommand::Types,
            "help" | "?" => ReplCommand::Help,
            "quit" | "exit" => ReplCommand::Quit,
            other => return Err(ParseError::UnknownCommand(other.to_string())),
        };

        Ok(Some(command))
    }
}

/// Indented listing of the forest with ids, types and overrides
pub fn outline(tree: &FieldTree) -> String {
    fn walk(fields: &[Field], depth: usize, lines: &mut Vec<String>) {
        for field in fields {
            let name = if field.is_named() {
                field.name.as_str()
            } else {
                "<unnamed>"
            };
            let indent = "  ".repeat(depth);
            let mut line = format!("{}{}  {}: {}", indent, field.id, name, field.field_type);
            if let Some(value) = &field.value {
                line.push_str(&format!(" = {}", value.to_json()));
            }
            if field.is_named() && !is_valid_name(&field.name) {
                line.push_str("  (!) invalid name");
            }
            lines.push(line);
            walk(field.children(), depth + 1, lines);
        }
    }

    if tree.is_empty() {
        return "No fields defined. Use `add` to create one.".to_string();
    }
    let mut lines = Vec::new();
    walk(tree.roots(), 0, &mut lines);
    lines.join("\n")
}

pub struct Repl<R, W> {
    input: R,
    output: W,
    session: SchemaSession,
    export: ExportSettings,
}

impl<R: BufRead, W: Write> Repl<R, W> {
    pub fn new(input: R, output: W, session: SchemaSession, export: ExportSettings) -> Self {
        Self {
            input,
            output,
            session,
            export,
        }
    }

    /// Run until `quit` or end of input; returns the final session
    pub fn run(mut self) -> io::Result<SchemaSession> {
        writeln!(self.output, "schema-sampler: type `help` for commands")?;
        let mut line = String::new();

        loop {
            write!(self.output, "> ")?;
            self.output.flush()?;

            line.clear();
            if self.input.read_line(&mut line)? == 0 {
                break;
            }

            match ReplCommand::parse(&line) {
                Ok(None) => continue,
                Ok(Some(ReplCommand::Quit)) => break,
                Ok(Some(command)) => self.execute(command)?,
                Err(e) => writeln!(self.output, "error: {}", e)?,
            }
        }

        info!(fields = self.session.tree().iter().count(), "Session finished");
        Ok(self.session)
    }

    fn execute(&mut self, command: ReplCommand) -> io::Result<()> {
        let result: SessionResult<Option<String>> = match command {
            ReplCommand::Add { parent } => self
                .session
                .add_field(parent.as_ref())
                .map(|id| Some(format!("added {}", id))),
            ReplCommand::Name { id, name } => self
                .session
                .rename(&id, &name)
                .map(|check| check.warning().map(|w| format!("warning: {}", w))),
            ReplCommand::Type { id, field_type } => {
                self.session.retype(&id, field_type).map(|_| None)
            }
            ReplCommand::Value { id, raw } => self.session.set_value(&id, &raw).map(|_| None),
            ReplCommand::Clear { id } => self.session.clear_value(&id).map(|_| None),
            ReplCommand::Remove { id } => self.session.remove(&id).map(|_| None),
            ReplCommand::Tree => Ok(Some(outline(self.session.tree()))),
            ReplCommand::Preview => self.session.render().map(Some),
            ReplCommand::Stats => Ok(Some(self.session.stats().to_string())),
            ReplCommand::Types => Ok(Some(
                self.session
                    .profile()
                    .types()
                    .iter()
                    .map(|t| t.label())
                    .collect::<Vec<_>>()
                    .join(", "),
            )),
            ReplCommand::Help => Ok(Some(HELP.to_string())),
            ReplCommand::Copy => return self.copy(),
            ReplCommand::Export { directory } => return self.export(directory),
            ReplCommand::Quit => Ok(None),
        };

        match result {
            Ok(Some(text)) => writeln!(self.output, "{}", text),
            Ok(None) => Ok(()),
            Err(e) => writeln!(self.output, "error: {}", e),
        }
    }

    fn copy(&mut self) -> io::Result<()> {
        let document = match self.session.document(&self.export.file_name) {
            Ok(document) => document,
            Err(e) => return writeln!(self.output, "error: {}", e),
        };

        let mut notices: Vec<Notification> = Vec::new();
        deliver(&document, &mut WriterSink::new(&mut self.output), &mut notices);
        self.announce(notices);
        Ok(())
    }

    fn export(&mut self, directory: Option<PathBuf>) -> io::Result<()> {
        let document = match self.session.document(&self.export.file_name) {
            Ok(document) => document,
            Err(e) => return writeln!(self.output, "error: {}", e),
        };

        let directory = directory.unwrap_or_else(|| self.export.directory.clone());
        let mut notices: Vec<Notification> = Vec::new();
        deliver(&document, &mut FileSink::new(directory), &mut notices);
        self.announce(notices);
        Ok(())
    }

    fn announce(&mut self, notices: Vec<Notification>) {
        let mut console = ConsoleNotifier::new(&mut self.output);
        for notice in notices {
            console.notify(notice);
        }
    }
}
