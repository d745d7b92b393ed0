// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Decode command - decode container records with a PARAMDEF schema.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, ValueEnum};
use serde_json::{json, Map, Value};
use tracing::{debug, warn};

use crate::common::{container_file_name, csv_cell, field_filter, hex_bytes, Result, Settings};
use paramcodec::names::NameList;
use paramcodec::schema::load_paramdef;
use paramcodec::{
    display_label, format_value, DecodedRecord, DirectoryNameSource, DirectorySchemaProvider,
    FieldType, GameVariant, NameCache, ParamContainer, ParamError, ParamSchema, SchemaProvider,
};

/// Output layout of decoded records.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// One block per record, one line per field
    #[default]
    Text,
    /// JSON array of records
    Json,
    /// CSV with one row per record
    Csv,
}

/// Decode container records with a PARAMDEF schema.
#[derive(Args, Clone, Debug)]
pub struct DecodeCmd {
    /// Input container
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Game the container belongs to (DS2S, DS3, BB, SDT, ER)
    #[arg(long)]
    game: Option<GameVariant>,

    /// Root of the Paramdex layout (<root>/<game>/Defs, <root>/<game>/Names)
    #[arg(long, value_name = "DIR")]
    paramdex: Option<PathBuf>,

    /// PARAMDEF document to use instead of the Paramdex lookup
    #[arg(long, value_name = "XML")]
    schema: Option<PathBuf>,

    /// Label records with names from the game's name lists
    #[arg(long)]
    names: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Only show fields whose internal name matches this regex
    #[arg(long, value_name = "REGEX")]
    fields: Option<String>,

    /// Show raw values instead of applying display formats; includes padding
    #[arg(long)]
    raw: bool,

    /// Decode records on this many worker threads
    #[arg(short, long)]
    jobs: Option<usize>,
}

/// One output row.
struct Row {
    id: i64,
    label: Option<String>,
    cells: Vec<Cell>,
}

struct Cell {
    /// Internal field name, used as the JSON key
    key: String,
    /// Display name, used by the text layout
    title: String,
    value: Value,
}

impl DecodeCmd {
    pub fn run(self, settings: &Settings) -> Result<()> {
        let settings = settings.merge(Settings {
            paramdex_root: self.paramdex.clone(),
            game: self.game,
            jobs: self.jobs,
        });

        let container = ParamContainer::open(&self.input)?;
        let file_name = container_file_name(&self.input);
        debug!(
            file = %file_name,
            struct_type = %container.struct_type_name,
            records = container.record_count(),
            "opened container"
        );

        let names = self.load_names(&settings, &file_name)?;
        let schema = self.find_schema(&settings, &container)?;

        let (columns, rows, failures) = match &schema {
            Some(schema) => self.decode_rows(&settings, &container, schema, names.as_deref())?,
            None => {
                warn!(
                    struct_type = %container.struct_type_name,
                    "no schema available, showing raw payloads"
                );
                raw_rows(&container, names.as_deref())
            }
        };

        match self.format {
            OutputFormat::Text => print_text(&rows),
            OutputFormat::Json => print_json(&rows)?,
            OutputFormat::Csv => print_csv(&columns, &rows),
        }

        if failures > 0 {
            anyhow::bail!(
                "{failures} of {} records could not be decoded",
                container.record_count()
            );
        }
        Ok(())
    }

    fn find_schema(
        &self,
        settings: &Settings,
        container: &ParamContainer,
    ) -> Result<Option<Arc<ParamSchema>>> {
        if let Some(path) = &self.schema {
            return Ok(Some(Arc::new(load_paramdef(path)?)));
        }
        match (&settings.paramdex_root, settings.game) {
            (Some(root), Some(game)) => {
                let provider = DirectorySchemaProvider::new(root);
                Ok(provider.find_schema(game, &container.struct_type_name)?)
            }
            (Some(_), None) => {
                warn!("--paramdex given without --game, skipping schema lookup");
                Ok(None)
            }
            _ => Ok(None),
        }
    }

    fn load_names(&self, settings: &Settings, file_name: &str) -> Result<Option<Arc<NameList>>> {
        if !self.names {
            return Ok(None);
        }
        let (Some(root), Some(game)) = (&settings.paramdex_root, settings.game) else {
            anyhow::bail!("--names requires --paramdex and --game");
        };
        let source = DirectoryNameSource::new(root);
        let cache = NameCache::new();
        Ok(Some(cache.names(&source, game, file_name)?))
    }

    fn decode_rows(
        &self,
        settings: &Settings,
        container: &ParamContainer,
        schema: &ParamSchema,
        names: Option<&NameList>,
    ) -> Result<(Vec<String>, Vec<Row>, usize)> {
        let filter = field_filter(self.fields.as_deref())?;
        let selected: Vec<usize> = schema
            .fields
            .iter()
            .enumerate()
            .filter(|(_, f)| self.raw || f.field_type != FieldType::Dummy8)
            .filter(|(_, f)| filter.as_ref().map_or(true, |re| re.is_match(&f.internal_name)))
            .map(|(i, _)| i)
            .collect();
        let columns = selected
            .iter()
            .map(|&i| schema.fields[i].internal_name.clone())
            .collect();

        let results = match settings.jobs {
            Some(jobs) if jobs > 1 => {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(jobs)
                    .thread_name(|index| format!("param-decode-{index}"))
                    .build()
                    .map_err(|e| anyhow::anyhow!("Failed to create thread pool: {e}"))?;
                pool.install(|| container.decode_parallel(schema))
            }
            _ => container.decode_each(schema),
        };

        let mut rows = Vec::with_capacity(results.len());
        let mut failures = 0;
        for result in results {
            match result {
                Ok(record) => rows.push(self.record_row(schema, &selected, &record, names)?),
                Err(err) => {
                    failures += 1;
                    report_record_error(&err);
                }
            }
        }
        Ok((columns, rows, failures))
    }

    fn record_row(
        &self,
        schema: &ParamSchema,
        selected: &[usize],
        record: &DecodedRecord,
        names: Option<&NameList>,
    ) -> Result<Row> {
        let mut cells = Vec::with_capacity(selected.len());
        for &index in selected {
            let field = &schema.fields[index];
            let value = &record.values[index];
            let cell = if self.raw {
                value.to_json()
            } else {
                Value::String(format_value(value, &field.display_format)?)
            };
            cells.push(Cell {
                key: field.internal_name.clone(),
                title: field.display_name.clone(),
                value: cell,
            });
        }
        Ok(Row {
            id: record.id,
            label: names.and_then(|n| n.get(&record.id).cloned()),
            cells,
        })
    }
}

fn raw_rows(container: &ParamContainer, names: Option<&NameList>) -> (Vec<String>, Vec<Row>, usize) {
    let rows = container
        .records
        .iter()
        .map(|record| Row {
            id: record.id,
            label: names.and_then(|n| n.get(&record.id).cloned()),
            cells: vec![Cell {
                key: "raw".to_string(),
                title: "raw".to_string(),
                value: Value::String(hex_bytes(&record.raw_data)),
            }],
        })
        .collect();
    (vec!["raw".to_string()], rows, 0)
}

fn report_record_error(err: &ParamError) {
    let fields = err
        .log_fields()
        .into_iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join(" ");
    warn!(details = %fields, "{err}");
    eprintln!("Skipping record: {err}");
}

fn print_text(rows: &[Row]) {
    for row in rows {
        match row.label.as_deref() {
            Some(name) if !name.is_empty() => println!("[{}] {name}", row.id),
            _ => println!("[{}]", row.id),
        }
        for cell in &row.cells {
            match &cell.value {
                Value::String(s) => println!("  {} = {s}", cell.title),
                other => println!("  {} = {other}", cell.title),
            }
        }
    }
}

fn print_json(rows: &[Row]) -> Result<()> {
    let records: Vec<Value> = rows
        .iter()
        .map(|row| {
            let fields: Map<String, Value> = row
                .cells
                .iter()
                .map(|cell| (cell.key.clone(), cell.value.clone()))
                .collect();
            json!({
                "id": row.id,
                "name": row.label,
                "fields": fields,
            })
        })
        .collect();
    println!("{}", serde_json::to_string_pretty(&records)?);
    Ok(())
}

fn print_csv(columns: &[String], rows: &[Row]) {
    let mut header = vec!["id".to_string(), "name".to_string()];
    header.extend(columns.iter().map(|c| csv_cell(c)));
    println!("{}", header.join(","));

    for row in rows {
        let mut line = vec![
            row.id.to_string(),
            csv_cell(&display_label(row.id, row.label.as_deref())),
        ];
        line.extend(row.cells.iter().map(|cell| match &cell.value {
            Value::String(s) => csv_cell(s),
            other => csv_cell(&other.to_string()),
        }));
        println!("{}", line.join(","));
    }
}
