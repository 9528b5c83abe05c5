use mann::config::LoggingConfig;
use mann::kdtree::{read_points, KdTree, Point, ReadPolicy};
use mann::{CliArgs, MannConfig, OutputFormat, OutputFormatter, Result};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use tracing::{info, Level};

fn main() {
    if let Err(e) = run() {
        eprintln!("{}", OutputFormatter::format_error(&e.to_string()));
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args = CliArgs::parse_args();
    args.validate()?;

    // 生成默认配置文件
    if args.generate_config {
        let config = MannConfig::default();
        config.save_to_file(&args.config)?;
        println!("✅ Generated default configuration: {}", args.config);
        return Ok(());
    }

    // 加载配置
    let mut config = MannConfig::from_file(&args.config)?;

    // 命令行参数覆盖配置文件
    if let Some(bucket_size) = args.bucket_size {
        config.tree.bucket_size = bucket_size;
    }
    if args.strict {
        config.input.policy = ReadPolicy::Strict;
    }
    if let Some(log_level) = args.log_level.clone() {
        config.logging.level = log_level;
    }

    config.validate()?;
    init_logging(&config.logging)?;

    info!("📦 Version: {}", env!("CARGO_PKG_VERSION"));

    let reader: Box<dyn BufRead> = match &args.input {
        Some(path) => {
            info!("📖 Reading points from {}", path.display());
            Box::new(BufReader::new(File::open(path)?))
        }
        None => {
            info!("📖 Reading points from stdin");
            Box::new(io::stdin().lock())
        }
    };

    let output = match args.dim {
        1 => bounds::<1>(reader, &config, args.format)?,
        2 => bounds::<2>(reader, &config, args.format)?,
        3 => bounds::<3>(reader, &config, args.format)?,
        4 => bounds::<4>(reader, &config, args.format)?,
        dim => return Err(format!("Unsupported dimension {}", dim).into()),
    };

    println!("{}", output);
    Ok(())
}

fn bounds<const D: usize>(
    reader: impl BufRead,
    config: &MannConfig,
    format: OutputFormat,
) -> Result<String> {
    let points: Vec<Point<f64, D>> = read_points(reader, config.input.policy)?;
    info!("Read {} points", points.len());

    let tree = KdTree::from_config(&points, &config.tree)?;
    Ok(OutputFormatter::render(&tree, format)?)
}

/// 初始化日志系统
fn init_logging(config: &LoggingConfig) -> Result<()> {
    use tracing_subscriber::filter::LevelFilter;
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let filter = match config.level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };

    match config.output.as_str() {
        "stdout" => {
            tracing_subscriber::registry()
                .with(tracing_subscriber::fmt::layer().with_target(false))
                .with(LevelFilter::from_level(filter))
                .init();
        }
        "file" => {
            let log_file = config
                .log_file
                .as_ref()
                .ok_or("Log output is 'file' but log_file path is not specified")?;

            // 确保日志目录存在
            if let Some(parent) = log_file.parent() {
                std::fs::create_dir_all(parent)?;
            }

            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(log_file)?;

            tracing_subscriber::registry()
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_writer(std::sync::Mutex::new(file))
                        .with_ansi(false)
                        .with_target(false),
                )
                .with(LevelFilter::from_level(filter))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_writer(io::stderr)
                        .with_target(false),
                )
                .with(LevelFilter::from_level(filter))
                .init();
        }
    }

    Ok(())
}
