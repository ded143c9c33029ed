use clap::{Parser, Subcommand};
use qr_detector::tools::{batch_limit_from_env, dataset_iter, dataset_root_from_env, hex_preview};
use qr_detector::{DetectorConfig, QrDetector, QrResult, TextEncoding};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "qrtool", version, about = "Read QR codes from images")]
struct Cli {
    /// Log internal errors verbosely
    #[arg(long, global = true, env = "QR_DEBUG")]
    debug: bool,

    /// Text encoding used to print payloads
    #[arg(long, global = true, default_value = "utf-8")]
    encoding: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Read QR codes from a single image
    Detect {
        #[arg(long)]
        image: PathBuf,
    },
    /// Read QR codes from every image under a directory
    Batch {
        #[arg(long)]
        root: Option<PathBuf>,
        #[arg(long)]
        limit: Option<usize>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    let encoding = match TextEncoding::for_label(&cli.encoding) {
        Ok(encoding) => encoding,
        Err(err) => {
            eprintln!("{}", err);
            return ExitCode::FAILURE;
        }
    };
    let config = DetectorConfig::from_env().with_debug(cli.debug);
    let detector = QrDetector::with_config(config);

    match cli.command {
        Command::Detect { image } => detect_cmd(&detector, &image, encoding),
        Command::Batch { root, limit } => batch_cmd(&detector, root, limit),
    }
}

fn init_tracing(debug: bool) {
    let default = if debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn detect_cmd(detector: &QrDetector, image: &Path, encoding: TextEncoding) -> ExitCode {
    match detector.read_from_file(image) {
        Ok(results) => {
            println!("Image: {}", image.display());
            println!("Found {} QR codes", results.len());
            for (i, qr) in results.iter().enumerate() {
                println!(
                    "  QR {}: version={}, error_correction={:?}, mask={}, content={}",
                    i,
                    qr.version(),
                    qr.ec_level(),
                    qr.mask(),
                    render(qr, encoding)
                );
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("Failed to read {}: {}", image.display(), err);
            ExitCode::FAILURE
        }
    }
}

fn batch_cmd(detector: &QrDetector, root: Option<PathBuf>, limit: Option<usize>) -> ExitCode {
    let root = root.unwrap_or_else(dataset_root_from_env);
    let limit = limit.or_else(batch_limit_from_env);
    let images: Vec<PathBuf> = dataset_iter(&root, limit).collect();

    if images.is_empty() {
        eprintln!("No images found under {}", root.display());
        return ExitCode::FAILURE;
    }

    let start = Instant::now();
    let outcomes = detector.read_from_files(&images);
    let elapsed = start.elapsed();

    let mut with_codes = 0usize;
    let mut errors = 0usize;
    for (path, outcome) in &outcomes {
        match outcome {
            Ok(results) => {
                if !results.is_empty() {
                    with_codes += 1;
                }
                println!("{}: {} QR codes", path.display(), results.len());
            }
            Err(err) => {
                errors += 1;
                println!("{}: error: {}", path.display(), err);
            }
        }
    }

    println!(
        "Files: {}  with QR: {}  errors: {}  time: {:.2?}",
        outcomes.len(),
        with_codes,
        errors,
        elapsed
    );
    ExitCode::SUCCESS
}

fn render(qr: &QrResult, encoding: TextEncoding) -> String {
    match qr.decode_with(encoding) {
        Ok(text) => text,
        Err(_) => format!("<{} bytes: {}>", qr.data().len(), hex_preview(qr.data(), 32)),
    }
}
