//! CLI argument definitions for `acad`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use acad_core::DimensionChain;
use acad_model::{Dimension, ModelError, OptionValue, Selection};

#[derive(Parser)]
#[command(
    name = "acad",
    version,
    about = "Inspect academic exam catalogs and their cascading filters",
    long_about = "Flatten nested exam catalogs into paths, list the valid options of a\n\
                  filter dimension for a partial selection, and reconcile selections\n\
                  that are no longer reachable."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print the flattened paths of a catalog file.
    Flatten(FlattenArgs),

    /// List the valid options of one dimension for a selection.
    Options(OptionsArgs),

    /// Reset the parts of a selection the catalog no longer supports.
    Reconcile(ReconcileArgs),

    /// Load every catalog list from the API and report what failed.
    Fetch(FetchArgs),
}

#[derive(Parser)]
pub struct FlattenArgs {
    /// Nested exam catalog as returned by the catalog endpoint.
    #[arg(value_name = "CATALOG_JSON")]
    pub catalog: PathBuf,

    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: OutputFormatArg,
}

#[derive(Parser)]
pub struct OptionsArgs {
    #[arg(value_name = "CATALOG_JSON")]
    pub catalog: PathBuf,

    /// Dimension to enumerate (examType, source, modalidad, nivel, especialidad, year).
    #[arg(long = "dimension", short = 'd')]
    pub dimension: Dimension,

    #[command(flatten)]
    pub selection: SelectionArgs,

    #[arg(long = "format", value_enum, default_value = "plain")]
    pub format: ReportFormatArg,
}

#[derive(Parser)]
pub struct ReconcileArgs {
    #[arg(value_name = "CATALOG_JSON")]
    pub catalog: PathBuf,

    #[command(flatten)]
    pub selection: SelectionArgs,

    #[arg(long = "format", value_enum, default_value = "plain")]
    pub format: ReportFormatArg,
}

#[derive(Parser)]
pub struct FetchArgs {
    /// Store configuration (TOML) with the API base URL.
    #[arg(long = "config", value_name = "STORE_TOML")]
    pub config: PathBuf,
}

/// A partial selection given on the command line.
#[derive(Args, Debug, Default, Clone)]
pub struct SelectionArgs {
    #[arg(long = "exam-type", value_name = "ID")]
    pub exam_type: Option<u32>,

    #[arg(long = "source", value_name = "ID")]
    pub source: Option<u32>,

    #[arg(long = "modalidad", value_name = "ID")]
    pub modalidad: Option<u32>,

    #[arg(long = "nivel", value_name = "ID")]
    pub nivel: Option<u32>,

    #[arg(long = "especialidad", value_name = "ID")]
    pub especialidad: Option<u32>,

    #[arg(long = "year", value_name = "YEAR")]
    pub year: Option<String>,

    /// Dimensions the form filters on: full, exam, academic, or a comma list.
    #[arg(long = "chain", default_value = "full")]
    pub chain: DimensionChain,
}

impl SelectionArgs {
    pub fn to_selection(&self) -> Result<Selection, ModelError> {
        let ids = [
            (Dimension::ExamType, self.exam_type),
            (Dimension::Source, self.source),
            (Dimension::Modalidad, self.modalidad),
            (Dimension::Nivel, self.nivel),
            (Dimension::Especialidad, self.especialidad),
        ];
        let mut selection = Selection::new();
        for (dimension, value) in ids {
            if let Some(id) = value {
                selection.set(dimension, OptionValue::Id(id))?;
            }
        }
        if let Some(year) = &self.year {
            selection.set(Dimension::Year, OptionValue::parse(Dimension::Year, year)?)?;
        }
        Ok(selection)
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormatArg {
    Table,
    Plain,
    Json,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ReportFormatArg {
    Plain,
    Json,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
