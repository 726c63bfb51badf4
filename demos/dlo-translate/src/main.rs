use std::io::{IsTerminal, Write};
use std::path::PathBuf;
use std::process::exit;

use ariadne::{ColorGenerator, Label, Report, ReportKind, Source};
use clap::Parser as ClapParser;
use dloformal::pretty::PrettyAxiom;
use dlocore::prelude::*;
use dloprog::utils::Diagnostic;
use log::{LevelFilter, Log, Metadata, Record};
use termcolor::{ColorChoice, StandardStream};

#[derive(ClapParser)]
#[command(
    version,
    about = "Translate a while-program into axioms over a discrete linear order"
)]
pub struct Arguments {
    /// Path to the input file
    input: Option<String>,

    /// Inline program source, used instead of an input file
    #[arg(short, long, conflicts_with = "input")]
    expr: Option<String>,

    /// Configuration file (defaults to $DLO_CONFIG_PATH, then the user configuration directory)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the normalized flow chain before the records
    #[arg(long)]
    flow: bool,

    /// Disable colored output
    #[arg(long)]
    plain: bool,

    /// Increase logging verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

struct StderrLogger {
    level: LevelFilter,
}

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!(
                "[{} {:<5} {}] {}",
                chrono::Local::now().format("%H:%M:%S%.3f"),
                record.level(),
                record.target(),
                record.args()
            );
        }
    }

    fn flush(&self) {}
}

fn init_logger(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    let logger: &'static StderrLogger = Box::leak(Box::new(StderrLogger { level }));
    if log::set_logger(logger).is_ok() {
        log::set_max_level(level);
    }
}

fn report(file: &str, source: &str, diagnostics: &[Diagnostic]) {
    let mut colors = ColorGenerator::new();
    let a = colors.next();

    for diagnostic in diagnostics {
        let (kind, label) = if diagnostic.kind.is_lexical() {
            (ReportKind::Warning, "This character was skipped")
        } else {
            (ReportKind::Error, "The error occurred here")
        };
        let span = (file.to_string(), diagnostic.span());

        let printed = Report::build(kind, span.clone())
            .with_message(&diagnostic.message)
            .with_label(Label::new(span).with_message(label).with_color(a))
            .finish()
            .eprint((file.to_string(), Source::from(source)));
        if printed.is_err() {
            eprintln!("{diagnostic}");
        }
    }
}

fn color_choice(args: &Arguments, mode: ColorMode) -> ColorChoice {
    if args.plain {
        return ColorChoice::Never;
    }
    match mode {
        ColorMode::Always => ColorChoice::Always,
        ColorMode::Never => ColorChoice::Never,
        ColorMode::Auto if std::io::stdout().is_terminal() => ColorChoice::Auto,
        ColorMode::Auto => ColorChoice::Never,
    }
}

fn main() {
    let args = Arguments::parse();
    init_logger(args.verbose);

    let config = match TranslateConfig::load_or_default(args.config.as_deref()) {
        Ok(config) => config,
        Err(error) => {
            eprintln!("Error: {error}");
            exit(2);
        }
    };

    let (file, source) = match (&args.input, &args.expr) {
        (_, Some(expr)) => ("<expr>".to_string(), expr.clone()),
        (Some(path), None) => match std::fs::read_to_string(path) {
            Ok(source) => (path.clone(), source),
            Err(error) => {
                eprintln!("Failed to read {path}: {error}");
                exit(2);
            }
        },
        (None, None) => {
            eprintln!("No program given: pass an input file or --expr");
            exit(2);
        }
    };

    let translator = Translator::new(config);
    let translation = match translator.translate_source(&source) {
        Ok(translation) => translation,
        Err(DloError::Parse(dloprog::utils::Error::Syntax { diagnostics })) => {
            eprintln!("Failed to parse program from {file}:");
            report(&file, &source, &diagnostics);
            exit(1);
        }
        Err(error) => {
            eprintln!("Error: {error}");
            exit(1);
        }
    };
    report(&file, &source, &translation.skipped);

    if args.flow {
        println!("{}", normalize(&translation.program.root));
    }

    let mut stdout = StandardStream::stdout(color_choice(&args, translator.config().color));
    let width = translator.config().width;
    for (position, record) in translation.records.iter().enumerate() {
        let written = write!(stdout, "{:>4}. ", position + 1)
            .and_then(|_| record.pretty_render_to(width, &mut stdout))
            .and_then(|_| writeln!(stdout));
        if let Err(error) = written {
            eprintln!("Failed to write output: {error}");
            exit(1);
        }
    }
}
