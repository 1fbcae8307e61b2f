//! narraflow CLI - narrative pagination tool

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use narraflow::{
    to_json, to_outline, AdapterRegistry, FlowOutput, FlowPolicy, JsonFormat, Narraflow,
    TableBlockExtractor, TableGrid, TextNormalizer,
};

#[derive(Parser)]
#[command(name = "narraflow")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Flow LLM narrative into paginated page, slide and document layouts", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Lay out narrative files for an output format
    Render {
        /// Input text files ("-" reads stdin)
        #[arg(value_name = "FILE", required = true)]
        inputs: Vec<PathBuf>,

        /// Output format name or extension (pdf, slides, pptx, document, docx)
        #[arg(short, long, default_value = "pdf", env = "NARRAFLOW_FORMAT")]
        format: String,

        /// JSON file overriding fields of the format's flow policy
        #[arg(long, value_name = "FILE")]
        policy: Option<PathBuf>,

        /// What to write for each input
        #[arg(long, value_enum, default_value = "outline")]
        emit: Emit,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Output file, or directory when several inputs are given
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },

    /// Print the parsed content blocks as JSON
    Blocks {
        /// Input text file ("-" reads stdin)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Show the cleaned text and the tables recovered from it
    Extract {
        /// Input text file ("-" reads stdin)
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// List the available output formats
    Formats,

    /// Show version information
    Version,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Emit {
    /// Plain-text page outline
    Outline,
    /// Placed instructions as JSON
    Json,
    /// Page and block statistics
    Stats,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Render {
            inputs,
            format,
            policy,
            emit,
            compact,
            output,
        } => cmd_render(
            &inputs,
            &format,
            policy.as_deref(),
            emit,
            json_format(compact),
            output.as_deref(),
        ),
        Commands::Blocks { input, compact } => cmd_blocks(&input, json_format(compact)),
        Commands::Extract { input } => cmd_extract(&input),
        Commands::Formats => {
            cmd_formats();
            Ok(())
        }
        Commands::Version => {
            cmd_version();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn json_format(compact: bool) -> JsonFormat {
    if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    }
}

fn read_input(path: &Path) -> narraflow::Result<String> {
    if path.as_os_str() == "-" {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        Ok(text)
    } else {
        Ok(fs::read_to_string(path)?)
    }
}

fn load_policy(
    path: &Path,
    base: &FlowPolicy,
) -> Result<FlowPolicy, Box<dyn std::error::Error>> {
    base.load_overrides(path)
        .map_err(|e| format!("Policy file {}: {}", path.display(), e).into())
}

fn emit_output(
    output: &FlowOutput,
    emit: Emit,
    format: JsonFormat,
) -> Result<String, Box<dyn std::error::Error>> {
    Ok(match emit {
        Emit::Outline => to_outline(output),
        Emit::Json => to_json(output, format)?,
        Emit::Stats => match format {
            JsonFormat::Pretty => serde_json::to_string_pretty(&output.stats)?,
            JsonFormat::Compact => serde_json::to_string(&output.stats)?,
        },
    })
}

fn output_name(input: &Path, emit: Emit) -> String {
    let stem = input.file_stem().unwrap_or_default().to_string_lossy();
    match emit {
        Emit::Outline => format!("{}.outline.txt", stem),
        Emit::Json => format!("{}.flow.json", stem),
        Emit::Stats => format!("{}.stats.json", stem),
    }
}

fn cmd_render(
    inputs: &[PathBuf],
    format: &str,
    policy: Option<&Path>,
    emit: Emit,
    json: JsonFormat,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let registry = AdapterRegistry::with_defaults();
    let adapter = registry.resolve(format)?;

    let mut pipeline = Narraflow::for_adapter(adapter.as_ref());
    if let Some(path) = policy {
        pipeline = pipeline.with_policy(load_policy(path, &adapter.policy())?);
    }
    log::debug!("rendering {} input(s) as {}", inputs.len(), adapter.name());

    let texts = inputs
        .iter()
        .map(|path| read_input(path))
        .collect::<Result<Vec<_>, _>>()?;

    if let [text] = texts.as_slice() {
        let result = pipeline.render(text)?;
        let rendered = emit_output(&result, emit, json)?;
        if let Some(path) = output {
            fs::write(path, &rendered)?;
            println!("{} {}", "Saved to".green(), path.display());
        } else {
            println!("{}", rendered);
        }
        return Ok(());
    }

    let output_dir = output
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."));
    fs::create_dir_all(&output_dir)?;

    let pb = ProgressBar::new(inputs.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );
    pb.set_message("Laying out...");

    let results = pipeline.render_batch(&texts);

    let mut failed = 0;
    for (input, result) in inputs.iter().zip(results) {
        pb.set_message(input.display().to_string());
        match result {
            Ok(flow) => {
                let name = output_name(input, emit);
                fs::write(output_dir.join(&name), emit_output(&flow, emit, json)?)?;
                pb.println(format!(
                    "  {} {} ({} pages)",
                    "├─".dimmed(),
                    name,
                    flow.page_count
                ));
            }
            Err(e) => {
                failed += 1;
                pb.println(format!("  {} {}: {}", "├─".dimmed(), input.display(), e));
            }
        }
        pb.inc(1);
    }

    pb.finish_with_message("Done!");

    if failed > 0 {
        return Err(format!("{} of {} inputs failed", failed, inputs.len()).into());
    }
    Ok(())
}

fn cmd_blocks(input: &Path, format: JsonFormat) -> Result<(), Box<dyn std::error::Error>> {
    let text = read_input(input)?;
    let blocks = Narraflow::new().blocks(&text);

    let json = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(&blocks)?,
        JsonFormat::Compact => serde_json::to_string(&blocks)?,
    };
    println!("{}", json);

    Ok(())
}

fn cmd_extract(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let text = read_input(input)?;
    let normalized = TextNormalizer::default().process(&text);
    let (cleaned, grids) = TableBlockExtractor::new().extract(&normalized);

    println!("{}", "Cleaned Text".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}", cleaned.trim_end());

    println!();
    println!("{} ({})", "Tables".cyan().bold(), grids.len());
    println!("{}", "─".repeat(40).dimmed());

    for (i, grid) in grids.iter().enumerate() {
        println!(
            "{}: {} rows x {} columns",
            format!("Table {}", i + 1).bold(),
            grid.row_count(),
            grid.column_count()
        );
        println!("{}", indented_rows(grid));
    }

    Ok(())
}

fn indented_rows(grid: &TableGrid) -> String {
    grid.plain_text()
        .lines()
        .map(|line| format!("  {}", line))
        .collect::<Vec<_>>()
        .join("\n")
}

fn cmd_formats() {
    let registry = AdapterRegistry::with_defaults();

    println!("{}", "Output Formats".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    for adapter in registry.adapters() {
        println!(
            "{:<10} {:<12} {}",
            adapter.name().bold(),
            adapter.supported_extensions().join(", "),
            adapter.description().dimmed()
        );
    }
}

fn cmd_version() {
    println!("{} {}", "narraflow".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Narrative pagination tool");
    println!();
    println!("License: MIT");
}

#[cfg(test)]
mod tests {
    use super::*;
    use narraflow::adapters::SlideDeckAdapter;
    use narraflow::FormatAdapter;

    #[test]
    fn test_output_name() {
        let input = Path::new("reports/q3.txt");
        assert_eq!(output_name(input, Emit::Outline), "q3.outline.txt");
        assert_eq!(output_name(input, Emit::Json), "q3.flow.json");
        assert_eq!(output_name(input, Emit::Stats), "q3.stats.json");
    }

    #[test]
    fn test_load_policy_partial() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("policy.json");
        fs::write(&path, r#"{"page_height": 600.0, "max_items_per_page": 5}"#).unwrap();

        let policy = load_policy(&path, &FlowPolicy::default()).unwrap();
        assert_eq!(policy.page_height, 600.0);
        assert_eq!(policy.max_items_per_page, Some(5));
    }

    #[test]
    fn test_load_policy_keeps_adapter_settings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("policy.json");
        fs::write(&path, r#"{"max_items_per_page": 5, "margins": {"top": 20.0}}"#).unwrap();

        let base = SlideDeckAdapter::new().policy();
        let policy = load_policy(&path, &base).unwrap();
        assert_eq!(policy.page_height, 405.0);
        assert_eq!(policy.max_rows_per_table_page, Some(14));
        assert!(policy.range_notes);
        assert_eq!(policy.max_items_per_page, Some(5));
        assert_eq!(policy.margins.top, 20.0);
        assert_eq!(policy.margins.left, base.margins.left);
    }

    #[test]
    fn test_load_policy_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("policy.json");
        fs::write(&path, r#"{"page_height": 10.0}"#).unwrap();
        assert!(load_policy(&path, &FlowPolicy::default()).is_err());
        assert!(load_policy(&dir.path().join("missing.json"), &FlowPolicy::default()).is_err());
    }

    #[test]
    fn test_indented_rows() {
        let (_, grids) = TableBlockExtractor::new().extract(r#"[["Q","Sales"],["Q1","10"]]"#);
        assert_eq!(indented_rows(&grids[0]), "  Q\tSales\n  Q1\t10");
    }

    #[test]
    fn test_emit_stats() {
        let output = Narraflow::new().render("# Title\nBody").unwrap();
        let json = emit_output(&output, Emit::Stats, JsonFormat::Compact).unwrap();
        assert!(json.contains("\"heading_count\":1"));
    }
}
