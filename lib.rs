//! # mann 近似最近邻搜索的几何基础
//!
//! 提供固定维度的点、最小包围矩形，以及 kd-tree 的骨架结构。
//!
//! ## 使用示例
//!
//! ```rust
//! use mann::{KdTree, Point};
//!
//! let points = vec![
//!     Point::new([1.5, 3.2]),
//!     Point::new([4.0, 2.0]),
//!     Point::new([0.0, 1.0]),
//! ];
//!
//! let tree = KdTree::new(&points);
//! let bounds = tree.bounds().unwrap();
//! assert_eq!(bounds.lower_left(), &Point::new([0.0, 1.0]));
//! assert_eq!(bounds.upper_right(), &Point::new([4.0, 3.2]));
//! ```

pub mod client;
pub mod config;
pub mod kdtree;

use std::error::Error;

// 重新导出主要的公共接口
pub use kdtree::{
    read_points, KdNode, KdTree, NodeId, Point, PointError, PointReader, ReadPolicy, Rectangle,
    Scalar, TreeError, TreeState, TreeSummary,
};

// 重新导出常用类型，便于二进制文件使用
pub use client::{CliArgs, OutputFormat, OutputFormatter};
pub use config::MannConfig;

pub type Result<T> = std::result::Result<T, Box<dyn Error + Send + Sync>>;
