use serde::{Deserialize, Serialize};

/// 节点在树的节点数组中的位置
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// kd-tree节点
///
/// 节点存放在树持有的数组中，子节点通过 [`NodeId`] 引用：
/// - Leaf：保存落入该桶的点在原始点集中的下标
/// - Internal：保存分割轴、分割值以及左右子节点
///
/// 当前的树只计算根包围矩形，不会创建任何节点。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum KdNode<T = f64> {
    Leaf {
        indices: Vec<usize>,
    },
    Internal {
        split_axis: usize,
        split_value: T,
        left: NodeId,
        right: NodeId,
    },
}

impl<T: Copy> KdNode<T> {
    pub fn leaf(indices: Vec<usize>) -> Self {
        KdNode::Leaf { indices }
    }

    pub fn internal(split_axis: usize, split_value: T, left: NodeId, right: NodeId) -> Self {
        KdNode::Internal {
            split_axis,
            split_value,
            left,
            right,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, KdNode::Leaf { .. })
    }

    /// 叶子节点中点的下标（内部节点返回None）
    pub fn indices(&self) -> Option<&[usize]> {
        match self {
            KdNode::Leaf { indices } => Some(indices),
            KdNode::Internal { .. } => None,
        }
    }

    /// 内部节点的左右子节点
    pub fn children(&self) -> Option<(NodeId, NodeId)> {
        match self {
            KdNode::Leaf { .. } => None,
            KdNode::Internal { left, right, .. } => Some((*left, *right)),
        }
    }

    /// 内部节点的分割轴和分割值
    pub fn split(&self) -> Option<(usize, T)> {
        match self {
            KdNode::Leaf { .. } => None,
            KdNode::Internal {
                split_axis,
                split_value,
                ..
            } => Some((*split_axis, *split_value)),
        }
    }
}
