pub mod node;
pub mod point;
pub mod reader;
pub mod rectangle;
#[allow(clippy::module_inception)]
pub mod kdtree;

// 重新导出主要类型
pub use kdtree::{KdTree, TreeError, TreeState, TreeSummary};
pub use node::{KdNode, NodeId};
pub use point::{Point, PointError, Scalar};
pub use reader::{read_points, PointReader, ReadPolicy};
pub use rectangle::Rectangle;
