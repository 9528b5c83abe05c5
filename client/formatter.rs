use crate::client::cli_args::OutputFormat;
use crate::kdtree::{KdTree, Scalar};
use colored::*;
use serde::Serialize;

pub struct OutputFormatter;

impl OutputFormatter {
    /// 按指定格式输出树的根包围矩形
    pub fn render<T, const D: usize>(
        tree: &KdTree<'_, T, D>,
        format: OutputFormat,
    ) -> Result<String, serde_json::Error>
    where
        T: Scalar + Serialize,
    {
        match format {
            OutputFormat::Text => Ok(Self::format_tree(tree)),
            OutputFormat::Json => tree.export_to_json(),
        }
    }

    pub fn format_tree<T: Scalar, const D: usize>(tree: &KdTree<'_, T, D>) -> String {
        let header = format!(
            "{}D, {} points, bucket size {}, {}",
            D,
            tree.len(),
            tree.bucket_size(),
            tree.state()
        );

        let Some(bounds) = tree.bounds() else {
            return format!("{} ({})", "(empty point set)".yellow(), header);
        };

        let extents = bounds
            .dimension_lengths()
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join(" ");

        let longest = bounds
            .longest_axis()
            .map_or_else(|| "-".to_string(), |axis| axis.to_string());

        format!(
            "{} ({})\n  lower_left:   {}\n  upper_right:  {}\n  extents:      {}\n  longest axis: {}",
            "bounds".green(),
            header,
            bounds.lower_left().to_string().cyan(),
            bounds.upper_right().to_string().cyan(),
            extents,
            longest.blue()
        )
    }

    pub fn format_error(err: &str) -> String {
        format!("(error) {}", err.red())
    }
}
