use crate::kdtree::point::{Point, Scalar};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// 轴对齐的最小包围矩形
///
/// `lower_left` 保存每个轴上的最小值，`upper_right` 保存每个轴上的最大值。
/// 在输入点集为空时两者保持零值。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(bound(
    serialize = "T: Serialize",
    deserialize = "T: Scalar + Deserialize<'de>"
))]
pub struct Rectangle<T = f64, const D: usize = 2> {
    lower_left: Point<T, D>,
    upper_right: Point<T, D>,
}

impl<T: Scalar, const D: usize> Default for Rectangle<T, D> {
    fn default() -> Self {
        Rectangle {
            lower_left: Point::origin(),
            upper_right: Point::origin(),
        }
    }
}

impl<T: Scalar, const D: usize> Rectangle<T, D> {
    /// 计算点集的最小包围矩形，点集为空时返回 `None`
    pub fn enclosing<'p, I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'p Point<T, D>>,
        T: 'p,
    {
        let mut iter = points.into_iter().peekable();
        iter.peek()?;

        let mut rect = Self::default();
        rect.compute_enclosing(iter);
        Some(rect)
    }

    /// 用点集重新计算包围矩形
    ///
    /// 单次扫描，每个轴独立取最小值和最大值，复杂度 O(N·D)。
    /// 点集为空时保持原有边界不变。
    pub fn compute_enclosing<'p, I>(&mut self, points: I)
    where
        I: IntoIterator<Item = &'p Point<T, D>>,
        T: 'p,
    {
        let mut iter = points.into_iter();
        let Some(first) = iter.next() else {
            trace!("empty point set, bounds unchanged");
            return;
        };

        let mut lower = *first;
        let mut upper = *first;
        let mut count = 1usize;

        for point in iter {
            for ((lo, hi), &v) in lower.iter_mut().zip(upper.iter_mut()).zip(point.iter()) {
                // 严格比较：相等时保留先出现的值
                if v < *lo {
                    *lo = v;
                }
                if v > *hi {
                    *hi = v;
                }
            }
            count += 1;
        }

        self.lower_left = lower;
        self.upper_right = upper;
        trace!(points = count, dimension = D, "computed enclosing rectangle");
    }

    pub fn lower_left(&self) -> &Point<T, D> {
        &self.lower_left
    }

    pub fn upper_right(&self) -> &Point<T, D> {
        &self.upper_right
    }

    /// 每个轴上的边长 `upper_right[i] - lower_left[i]`
    pub fn dimension_lengths(&self) -> [T; D] {
        std::array::from_fn(|axis| self.upper_right[axis] - self.lower_left[axis])
    }

    /// 边长最大的轴，有多个时取最小的轴序号
    pub fn longest_axis(&self) -> Option<usize> {
        let lengths = self.dimension_lengths();
        (0..D).reduce(|best, axis| {
            if lengths[axis] > lengths[best] {
                axis
            } else {
                best
            }
        })
    }

    /// 判断闭区间矩形是否包含一个点
    pub fn contains(&self, point: &Point<T, D>) -> bool {
        point
            .iter()
            .zip(self.lower_left.iter().zip(self.upper_right.iter()))
            .all(|(v, (lo, hi))| lo <= v && v <= hi)
    }
}
