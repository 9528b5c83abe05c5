use crate::config::TreeConfig;
use crate::kdtree::node::{KdNode, NodeId};
use crate::kdtree::point::{Point, Scalar};
use crate::kdtree::rectangle::Rectangle;
use derive_more::Display;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// 默认桶大小：每个叶子最多一个点
pub const DEFAULT_BUCKET_SIZE: usize = 1;

/// kd-tree构建错误类型
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    #[error("Bucket size must be at least 1, got {0}")]
    InvalidBucketSize(usize),
}

/// 树的状态，构建完成后不再变化
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TreeState {
    /// 输入点集为空：没有包围矩形，也没有根节点
    #[display(fmt = "empty")]
    Empty,
    /// 已计算根包围矩形
    #[display(fmt = "root bounded")]
    RootBounded,
}

/// 用于JSON导出的树摘要
#[derive(Debug, Clone, Serialize)]
pub struct TreeSummary<T, const D: usize> {
    pub dimension: usize,
    pub bucket_size: usize,
    pub point_count: usize,
    pub state: TreeState,
    pub bounds: Option<Rectangle<T, D>>,
}

/// kd-tree骨架
///
/// 借用外部持有的点集，不复制也不修改它。生命周期 `'a` 保证树不会比点集活得更久，
/// 且在树存在期间点集无法被修改。
///
/// 构建时只做一件事：点集非空时计算根包围矩形。递归分割和查询尚未实现，
/// `bucket_size` 仅作为保留参数保存。
#[derive(Debug, Clone)]
pub struct KdTree<'a, T = f64, const D: usize = 2> {
    /// 被索引的点集
    points: &'a [Point<T, D>],
    /// 叶子桶大小
    bucket_size: usize,
    /// 根包围矩形（点集为空时为None）
    bounds: Option<Rectangle<T, D>>,
    /// 节点数组
    nodes: Vec<KdNode<T>>,
    /// 根节点
    root: Option<NodeId>,
}

impl<'a, T: Scalar, const D: usize> KdTree<'a, T, D> {
    /// 使用默认桶大小创建kd-tree
    pub fn new(points: &'a [Point<T, D>]) -> Self {
        Self::build(points, DEFAULT_BUCKET_SIZE)
    }

    /// 使用指定桶大小创建kd-tree，桶大小必须为正数
    pub fn with_bucket_size(points: &'a [Point<T, D>], bucket_size: usize) -> Result<Self, TreeError> {
        if bucket_size == 0 {
            return Err(TreeError::InvalidBucketSize(bucket_size));
        }
        Ok(Self::build(points, bucket_size))
    }

    pub fn from_config(points: &'a [Point<T, D>], config: &TreeConfig) -> Result<Self, TreeError> {
        Self::with_bucket_size(points, config.bucket_size)
    }

    fn build(points: &'a [Point<T, D>], bucket_size: usize) -> Self {
        let mut tree = KdTree {
            points,
            bucket_size,
            bounds: None,
            nodes: Vec::new(),
            root: None,
        };

        if points.is_empty() {
            debug!(dimension = D, bucket_size, "empty point set, tree left unbounded");
            return tree;
        }

        tree.compute_root_bounds();
        tree
    }

    fn compute_root_bounds(&mut self) {
        let mut bounds = Rectangle::default();
        bounds.compute_enclosing(self.points);
        debug!(
            points = self.points.len(),
            dimension = D,
            bucket_size = self.bucket_size,
            lower_left = %bounds.lower_left(),
            upper_right = %bounds.upper_right(),
            "computed root bounds"
        );
        self.bounds = Some(bounds);
    }

    pub fn state(&self) -> TreeState {
        if self.bounds.is_some() {
            TreeState::RootBounded
        } else {
            TreeState::Empty
        }
    }

    /// 检查树是否为空
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// 被索引的点数量
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn points(&self) -> &'a [Point<T, D>] {
        self.points
    }

    /// 根包围矩形
    pub fn bounds(&self) -> Option<&Rectangle<T, D>> {
        self.bounds.as_ref()
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn node(&self, id: NodeId) -> Option<&KdNode<T>> {
        self.nodes.get(id.index())
    }

    pub fn nodes(&self) -> &[KdNode<T>] {
        &self.nodes
    }

    /// 点的维度
    pub fn dimension(&self) -> usize {
        D
    }

    pub fn bucket_size(&self) -> usize {
        self.bucket_size
    }

    pub fn summary(&self) -> TreeSummary<T, D> {
        TreeSummary {
            dimension: D,
            bucket_size: self.bucket_size,
            point_count: self.points.len(),
            state: self.state(),
            bounds: self.bounds,
        }
    }

    /// 导出树摘要为JSON格式
    pub fn export_to_json(&self) -> Result<String, serde_json::Error>
    where
        T: Serialize,
    {
        serde_json::to_string_pretty(&self.summary())
    }
}
