use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// 支持的点维度
pub const SUPPORTED_DIMENSIONS: [usize; 4] = [1, 2, 3, 4];

/// 输出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// 彩色文本
    Text,
    /// JSON 树摘要
    Json,
}

#[derive(Parser, Debug)]
#[command(
    name = "mann-bounds",
    version,
    about = "Compute the bounding box of a point set",
    long_about = "mann-bounds reads one point per line (whitespace-separated coordinates) from a file or stdin,\nbuilds a kd-tree over the points and prints its root bounding box."
)]
pub struct CliArgs {
    /// Input file, one point per line (reads stdin when omitted)
    pub input: Option<PathBuf>,

    /// 配置文件路径
    #[arg(short, long, default_value = "mann.toml")]
    pub config: String,

    /// 生成默认配置文件并退出
    #[arg(long)]
    pub generate_config: bool,

    /// Number of coordinates per point
    #[arg(short, long, default_value_t = 2)]
    pub dim: usize,

    /// Leaf bucket size (overrides config file)
    #[arg(short, long)]
    pub bucket_size: Option<usize>,

    /// Reject lines whose coordinate count differs from the dimension
    #[arg(long)]
    pub strict: bool,

    /// Log level (overrides config file)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

impl CliArgs {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn validate(&self) -> Result<(), String> {
        if !SUPPORTED_DIMENSIONS.contains(&self.dim) {
            return Err(format!(
                "Unsupported dimension {}. Must be one of: {:?}",
                self.dim, SUPPORTED_DIMENSIONS
            ));
        }

        if self.bucket_size == Some(0) {
            return Err("Bucket size must be greater than 0".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = CliArgs::parse_from(["mann-bounds"]);
        assert_eq!(args.dim, 2);
        assert_eq!(args.format, OutputFormat::Text);
        assert!(args.input.is_none());
        assert!(!args.strict);
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_overrides() {
        let args = CliArgs::parse_from([
            "mann-bounds",
            "points.txt",
            "--dim",
            "3",
            "-b",
            "8",
            "--strict",
            "--format",
            "json",
        ]);
        assert_eq!(args.input, Some(PathBuf::from("points.txt")));
        assert_eq!(args.dim, 3);
        assert_eq!(args.bucket_size, Some(8));
        assert!(args.strict);
        assert_eq!(args.format, OutputFormat::Json);
    }

    #[test]
    fn test_validation() {
        let args = CliArgs::parse_from(["mann-bounds", "--dim", "7"]);
        assert!(args.validate().is_err());

        let args = CliArgs::parse_from(["mann-bounds", "-b", "0"]);
        assert!(args.validate().is_err());
    }
}
