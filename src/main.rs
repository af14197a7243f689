use std::collections::BTreeSet;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use archscope::config::{discover_config, load_config_from_path, ConfigFile};
use archscope::database::{
    foreign_keys_from_json, import_foreign_keys, import_tables, tables_from_json,
};
use archscope::export::{export, ExportData, ExportFormat};
use archscope::graph::{FilterType, ProjectId, Projects};
use archscope::parser::{parse_deps, parse_projects};
use archscope::storage::Storage;

#[derive(Parser)]
#[command(name = "archscope")]
#[command(author = "Zachary Woods <143150513+zach-fau@users.noreply.github.com>")]
#[command(version)]
#[command(about = "Normalized module dependency graphs from Gradle reports and database schemas", long_about = None)]
struct Cli {
    /// Log debug output to stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List module names from `gradle projects` output
    Projects {
        /// File holding the report
        file: PathBuf,
    },
    /// Build the dependency graph and export it
    Graph(GraphArgs),
}

#[derive(Args)]
struct GraphArgs {
    /// Root identifier for Gradle modules (defaults to the working directory)
    #[arg(short, long)]
    root: Option<String>,

    /// `gradle <module>:dependencies` output file (repeatable)
    #[arg(long = "report", value_name = "FILE")]
    reports: Vec<PathBuf>,

    /// JSON array of table rows
    #[arg(long, value_name = "FILE")]
    tables: Option<PathBuf>,

    /// JSON array of foreign key rows
    #[arg(long, value_name = "FILE")]
    foreign_keys: Option<PathBuf>,

    /// Output format: json, csv, dot
    #[arg(short, long)]
    format: Option<ExportFormat>,

    /// Leave external dependencies out of the output
    #[arg(long)]
    exclude_external: bool,

    /// Show shortened project names
    #[arg(long)]
    simple_names: bool,

    /// Abort on the first malformed report instead of skipping it
    #[arg(long)]
    strict: bool,

    /// Persist every project below this directory
    #[arg(long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Config file (defaults to ./archscope.config.yml when present)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Write output to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Projects { file } => list_projects(&file),
        Commands::Graph(args) => build_graph(args),
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn list_projects(file: &Path) -> Result<()> {
    let content = read_file(file)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    for name in parse_projects(&content) {
        writeln!(out, "{}", name)?;
    }

    Ok(())
}

fn load_config(args: &GraphArgs) -> Result<ConfigFile> {
    let config = match &args.config {
        Some(path) => Some(load_config_from_path(path)?),
        None => discover_config(&std::env::current_dir()?)?,
    };
    Ok(config.unwrap_or_default())
}

/// Projects an import pass changed, grouped by what needs rewriting.
#[derive(Default)]
struct Changed {
    /// Touched by a Gradle report: every file
    modules: BTreeSet<ProjectId>,
    /// Imported tables: basic info and size
    tables: BTreeSet<ProjectId>,
    /// Foreign key sources: dependencies
    dependents: BTreeSet<ProjectId>,
}

impl Changed {
    /// Writes the files of every changed project; returns how many were written.
    fn store(&self, storage: &Storage, projects: &mut Projects) -> Result<usize> {
        let mut written = 0;

        for &id in &self.modules {
            storage.write_project(projects, id)?;
            written += 3;
        }
        for &id in self.tables.difference(&self.modules) {
            storage.write_basic_info(projects, id)?;
            storage.write_size(projects, id)?;
            written += 2;
        }
        for &id in self.dependents.difference(&self.modules) {
            storage.write_deps(projects, id)?;
            written += 1;
        }

        Ok(written)
    }
}

fn build_graph(args: GraphArgs) -> Result<()> {
    let config = load_config(&args)?;

    let root = match args.root.clone().or_else(|| config.root.clone()) {
        Some(root) => root,
        None => std::env::current_dir()?.display().to_string(),
    };

    let mut projects = Projects::new();
    let mut changed = Changed::default();

    for report in &args.reports {
        let content = read_file(report)?;
        match parse_deps(&mut projects, &content, &root) {
            Ok(summary) => {
                info!(
                    report = %report.display(),
                    edges = summary.edges,
                    "parsed dependency report"
                );
                changed.modules.extend(summary.projects);
            }
            Err(e) if !args.strict => {
                warn!(report = %report.display(), error = %e, "skipping malformed report")
            }
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to parse {}", report.display()))
            }
        }
    }

    if let Some(path) = &args.tables {
        let tables = tables_from_json(&read_file(path)?)
            .with_context(|| format!("Failed to parse tables from {}", path.display()))?;
        changed.tables.extend(import_tables(&mut projects, &tables)?);
    }

    if let Some(path) = &args.foreign_keys {
        let fks = foreign_keys_from_json(&read_file(path)?)
            .with_context(|| format!("Failed to parse foreign keys from {}", path.display()))?;
        changed.dependents.extend(import_foreign_keys(&mut projects, &fks)?);
    }

    if projects.is_empty() {
        bail!("Nothing to export: pass at least one --report, --tables or --foreign-keys file");
    }

    config.apply_project_settings(&mut projects);

    if let Some(dir) = &args.data_dir {
        let written = changed.store(&Storage::new(dir), &mut projects)?;
        info!(dir = %dir.display(), files = written, "stored changed projects");
    }

    let format = match args.format {
        Some(format) => format,
        None => config.export_format()?.unwrap_or_default(),
    };
    let filter = if args.exclude_external || config.exclude_external.unwrap_or(false) {
        FilterType::ExcludeExternal
    } else {
        FilterType::All
    };
    let simple_names = args.simple_names || config.simple_names.unwrap_or(false);

    let data = ExportData::new(&projects, filter, simple_names);

    match &args.output {
        Some(path) => {
            let mut file = fs::File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            export(format, &data, &mut file)?;
        }
        None => {
            let stdout = io::stdout();
            export(format, &data, &mut stdout.lock())?;
        }
    }

    Ok(())
}
