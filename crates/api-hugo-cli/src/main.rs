use anyhow::{Context, Result, bail};
use api_hugo_config::{DocumenterConfig, LogLevel, NewlineKind as ConfigNewlineKind};
use api_hugo_engine::{
    ApiModel, Documenter, LogSink, NewlineKind, PageWriter, RenderOptions,
};
use clap::Parser;
use std::path::PathBuf;

/// Generates Hugo documentation pages from API Extractor `.api.json` files.
///
/// Each file holds one package as a tree of items tagged by `kind`, with
/// camelCase fields. Doc comments are read as an already parsed `docComment`
/// node tree (summary, remarks, params and other sections as typed nodes) and
/// signatures as `excerpt` token lists. Raw TSDoc text is not parsed.
#[derive(Debug, Parser)]
#[command(name = "api-hugo", version, about)]
struct Args {
    /// Directory containing the `*.api.json` files
    #[arg(short, long, default_value = "./api")]
    input: PathBuf,

    /// Directory the Markdown pages are written to
    #[arg(short, long, default_value = "./api-md")]
    output: PathBuf,

    /// Config file; defaults to `api-documenter.toml` in the current directory
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Empty the output directory before writing
    #[arg(long)]
    clean: bool,

    /// Report skipped packages and other progress
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config_path = args
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from(DocumenterConfig::FILENAME));
    let config = match DocumenterConfig::load_from_path(&config_path)? {
        Some(config) => config,
        None if args.config.is_some() => {
            bail!("Config file not found: {}", config_path.display())
        }
        None => DocumenterConfig::default(),
    };

    let verbose = args.verbose || config.log_level == LogLevel::Verbose;
    init_logging(config.log_level, verbose);

    let mut model = ApiModel::load_directory(&args.input)
        .with_context(|| format!("Failed to load API model from {}", args.input.display()))?;
    let sink = LogSink;
    model.report_skipped(&sink);
    model.apply_inherit_doc(&sink);

    let options = RenderOptions {
        uri_root: config.uri_root.clone(),
        variable_table_threshold: config.variable_table_threshold,
        output_file_name_suffix: config.output_file_name_suffix.clone(),
        package_prefixes: config.package_prefixes(),
        verbose,
    };
    let output = Documenter::new(&model, options).run(&sink);

    let writer = PageWriter::new(&args.output, newline_kind(config.newline_kind));
    if args.clean {
        log::info!("Cleaning {}", args.output.display());
        writer.clean()?;
    }
    for page in &output.pages {
        writer.write(page)?;
    }

    log::info!(
        "Wrote {} pages to {}",
        output.pages.len(),
        writer.output_root().display()
    );

    if !output.failures.is_empty() {
        bail!("{} pages could not be generated", output.failures.len());
    }
    Ok(())
}

fn init_logging(level: LogLevel, verbose: bool) {
    let filter = match level {
        _ if verbose => log::LevelFilter::Debug,
        LogLevel::Error => log::LevelFilter::Error,
        LogLevel::Verbose => log::LevelFilter::Debug,
        LogLevel::Info => log::LevelFilter::Info,
    };
    env_logger::Builder::new()
        .filter_level(filter)
        .parse_default_env()
        .init();
}

fn newline_kind(kind: ConfigNewlineKind) -> NewlineKind {
    match kind {
        ConfigNewlineKind::Crlf => NewlineKind::CrLf,
        ConfigNewlineKind::Lf => NewlineKind::Lf,
        ConfigNewlineKind::Os => NewlineKind::Os,
    }
}
