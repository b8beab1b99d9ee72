mod config;
mod logging;
mod test_runner;

use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use codespan_reporting::files::SimpleFiles;
use codespan_reporting::term;
use codespan_reporting::term::termcolor::{ColorChoice, StandardStream};
use tracing::{debug, info};

use converter::{Converter, SourceDocument};
use guide::RenderWarning;

use crate::config::{Overrides, ProjectConfig, Settings};

const SUBCOMMANDS: &[&str] = &["build", "test", "help"];
const TOP_LEVEL_FLAGS: &[&str] = &["-h", "--help", "-V", "--version"];

#[derive(Parser)]
#[command(name = "txt2guide", version, about = "Convert text files into an AmigaGuide document")]
struct Cli {
    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Convert a directory of text files into one guide
    Build(BuildArgs),

    /// Run .test.txt conversion tests
    Test(TestArgs),
}

#[derive(clap::Args)]
struct BuildArgs {
    /// Directory containing the source documents (default: current directory)
    input: Option<PathBuf>,

    /// Output guide file (default: output.guide in the current directory)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Document that becomes the MAIN node (case-insensitive)
    #[arg(short, long)]
    main: Option<String>,

    /// Extension of the source documents
    #[arg(short, long)]
    extension: Option<String>,

    /// Name written into the @database header (default: output file name)
    #[arg(long)]
    database: Option<String>,

    /// Convert but don't write the output file
    #[arg(long)]
    check: bool,

    /// List the nodes of the converted guide
    #[arg(long)]
    list_nodes: bool,

    /// Only log warnings and errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Log debug output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(clap::Args)]
struct TestArgs {
    /// Path to a .test.txt file or directory containing them
    path: PathBuf,

    /// Run only tests in these categories (subfolder names). Repeatable.
    #[arg(short, long)]
    category: Vec<String>,

    /// List available categories and exit
    #[arg(long)]
    list_categories: bool,
}

/// `txt2guide docs` is short for `txt2guide build docs`, and a bare
/// `txt2guide` builds the current directory.
fn with_default_subcommand(mut args: Vec<String>) -> Vec<String> {
    let first_pos = args.iter().skip(1).find(|a| !a.starts_with('-'));
    let top_level = args.iter().skip(1).any(|a| TOP_LEVEL_FLAGS.contains(&a.as_str()));
    let inject = match first_pos {
        Some(pos) => !SUBCOMMANDS.contains(&pos.as_str()),
        None => !top_level,
    };
    if inject {
        args.insert(1.min(args.len()), "build".to_string());
    }
    args
}

fn main() {
    let args = with_default_subcommand(std::env::args().collect());
    let cli = Cli::parse_from(&args);

    match cli.command {
        Command::Build(build_args) => do_build(build_args, cli.no_color),
        Command::Test(test_args) => {
            if test_args.list_categories {
                test_runner::list_categories(&test_args.path);
                return;
            }
            let exit_code = test_runner::run_tests(&test_args.path, cli.no_color, &test_args.category);
            process::exit(exit_code);
        }
    }
}

fn do_build(args: BuildArgs, no_color: bool) {
    logging::init(args.quiet, args.verbose, no_color);

    let cwd = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(e) => fail(&format!("cannot determine current directory: {}", e)),
    };
    let input = args.input.clone().unwrap_or_else(|| cwd.clone());

    let config = match ProjectConfig::load(&input) {
        Ok(config) => config,
        Err(e) => fail(&e),
    };
    let settings = Settings::resolve(
        input,
        &cwd,
        config,
        Overrides {
            output: args.output,
            main: args.main,
            extension: args.extension,
            database: args.database,
        },
    );
    debug!(
        input = %settings.input.display(),
        output = %settings.output.display(),
        main = %settings.main,
        extension = %settings.extension,
        "resolved settings"
    );

    let sources = match converter::discover_sources(&settings.input, &settings.extension) {
        Ok(sources) => sources,
        Err(e) => fail(&e.to_string()),
    };

    let conversion = Converter::new(settings.database.clone())
        .with_main(settings.main.clone())
        .convert(&sources);

    emit_warnings(&sources, &conversion.warnings, no_color);

    if args.list_nodes {
        for node in conversion.database.nodes() {
            println!("{} \"{}\"", node.name(), node.title);
        }
    }

    if args.check {
        info!(
            documents = sources.len(),
            nodes = conversion.database.len(),
            warnings = conversion.warnings.len(),
            "check passed, nothing written"
        );
        return;
    }

    if let Err(e) = converter::save(&conversion.database, &settings.output) {
        fail(&e.to_string());
    }
}

fn fail(message: &str) -> ! {
    eprintln!("error: {}", message);
    process::exit(1);
}

fn emit_warnings(sources: &[SourceDocument], warnings: &[RenderWarning], no_color: bool) {
    if warnings.is_empty() {
        return;
    }

    let color_choice = if no_color {
        ColorChoice::Never
    } else {
        ColorChoice::Auto
    };

    // file ids are positions in `sources`, which is also the order they are added here
    let mut files = SimpleFiles::new();
    for source in sources {
        files.add(display_name(source), source.text.clone());
    }

    let writer = StandardStream::stderr(color_choice);
    let config = term::Config::default();
    for warning in warnings {
        let diagnostic = warning.to_diagnostic();
        let _ = term::emit_to_write_style(&mut writer.lock(), &config, &files, &diagnostic);
    }
}

fn display_name(source: &SourceDocument) -> String {
    source
        .path
        .as_deref()
        .map(Path::display)
        .map(|p| p.to_string())
        .unwrap_or_else(|| source.label())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_directory_means_build() {
        assert_eq!(
            with_default_subcommand(args(&["txt2guide", "docs", "-o", "x.guide"])),
            args(&["txt2guide", "build", "docs", "-o", "x.guide"])
        );
    }

    #[test]
    fn no_arguments_builds() {
        assert_eq!(
            with_default_subcommand(args(&["txt2guide"])),
            args(&["txt2guide", "build"])
        );
        assert_eq!(
            with_default_subcommand(args(&["txt2guide", "--check"])),
            args(&["txt2guide", "build", "--check"])
        );
    }

    #[test]
    fn explicit_subcommands_and_help_are_kept() {
        let test = args(&["txt2guide", "test", "cases"]);
        assert_eq!(with_default_subcommand(test.clone()), test);
        let help = args(&["txt2guide", "--help"]);
        assert_eq!(with_default_subcommand(help.clone()), help);
    }

    #[test]
    fn cli_parses() {
        let cli = Cli::parse_from(with_default_subcommand(args(&[
            "txt2guide", "docs", "--main", "index", "--check",
        ])));
        match cli.command {
            Command::Build(build) => {
                assert_eq!(build.input, Some(PathBuf::from("docs")));
                assert_eq!(build.main.as_deref(), Some("index"));
                assert!(build.check);
            }
            Command::Test(_) => panic!("expected build"),
        }
    }
}
