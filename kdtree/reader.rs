use crate::kdtree::point::{Point, PointError, Scalar};
use serde::{Deserialize, Serialize};
use std::io::BufRead;
use std::marker::PhantomData;

/// 文本行解析策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadPolicy {
    /// 宽松：缺失的尾部坐标补零，多余的记号忽略
    #[default]
    Lenient,
    /// 严格：每行必须恰好包含维度个坐标
    Strict,
}

/// 逐行读取点的迭代器
///
/// 每次 `next()` 读取一行；流结束时返回 `None`，其余错误以
/// [`PointError::Line`] 的形式携带行号返回。
///
/// # 示例
///
/// ```
/// use mann::{Point, PointReader};
/// use std::io::Cursor;
///
/// let input = Cursor::new("1.5 3.2\n4 2\n");
/// let points: Vec<Point<f64, 2>> = PointReader::<_, f64, 2>::new(input)
///     .collect::<Result<_, _>>()
///     .unwrap();
/// assert_eq!(points.len(), 2);
/// ```
#[derive(Debug)]
pub struct PointReader<R, T = f64, const D: usize = 2> {
    reader: R,
    policy: ReadPolicy,
    lines_read: usize,
    finished: bool,
    _marker: PhantomData<fn() -> Point<T, D>>,
}

impl<R: BufRead, T: Scalar, const D: usize> PointReader<R, T, D> {
    pub fn new(reader: R) -> Self {
        Self::with_policy(reader, ReadPolicy::Lenient)
    }

    pub fn with_policy(reader: R, policy: ReadPolicy) -> Self {
        PointReader {
            reader,
            policy,
            lines_read: 0,
            finished: false,
            _marker: PhantomData,
        }
    }

    /// 已消费的行数
    pub fn lines_read(&self) -> usize {
        self.lines_read
    }

    pub fn policy(&self) -> ReadPolicy {
        self.policy
    }

    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl<R: BufRead, T: Scalar, const D: usize> Iterator for PointReader<R, T, D> {
    type Item = Result<Point<T, D>, PointError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        match Point::read_with_policy(&mut self.reader, self.policy) {
            Ok(point) => {
                self.lines_read += 1;
                Some(Ok(point))
            }
            Err(PointError::EmptyStream) => {
                self.finished = true;
                None
            }
            Err(err) => {
                // IO 错误后流的状态不可知，不再继续读取
                if matches!(err, PointError::Io(_)) {
                    self.finished = true;
                }
                self.lines_read += 1;
                Some(Err(PointError::Line {
                    line: self.lines_read,
                    source: Box::new(err),
                }))
            }
        }
    }
}

/// 读取整个流中的所有点，遇到第一个错误即返回
pub fn read_points<R, T, const D: usize>(
    reader: R,
    policy: ReadPolicy,
) -> Result<Vec<Point<T, D>>, PointError>
where
    R: BufRead,
    T: Scalar,
{
    PointReader::with_policy(reader, policy).collect()
}
