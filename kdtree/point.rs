use crate::kdtree::reader::ReadPolicy;
use serde::de::{self, Deserialize, Deserializer};
use serde::{Serialize, Serializer};
use std::fmt::{self, Debug, Display};
use std::io::BufRead;
use std::ops::{Index, IndexMut, Sub};
use std::str::FromStr;

/// 点操作错误类型
#[derive(Debug, thiserror::Error)]
pub enum PointError {
    #[error("Number of elements and dimensions must match: expected {expected}, found {found}")]
    DimensionMismatch { expected: usize, found: usize },
    #[error("Empty stream")]
    EmptyStream,
    #[error("Index {index} out of range for dimension {dimension}")]
    IndexOutOfRange { index: usize, dimension: usize },
    #[error("Invalid coordinate '{token}' at position {index}")]
    Parse { index: usize, token: String },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Line {line}: {source}")]
    Line {
        line: usize,
        source: Box<PointError>,
    },
}

/// 坐标数值类型
///
/// 任何可复制、可比较、可从文本解析且支持减法的数值类型都满足该约束，
/// 例如 `f64`、`f32`、`i32`。
pub trait Scalar:
    Copy + Default + PartialOrd + Debug + Display + FromStr + Sub<Output = Self>
{
}

impl<T> Scalar for T where
    T: Copy + Default + PartialOrd + Debug + Display + FromStr + Sub<Output = T>
{
}

/// 固定维度的点
///
/// 维度 `D` 是类型的一部分：不同维度的点属于不同类型，无法相互比较。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point<T = f64, const D: usize = 2> {
    elements: [T; D],
}

impl<T: Scalar, const D: usize> Point<T, D> {
    /// 从定长数组创建点
    pub fn new(elements: [T; D]) -> Self {
        Point { elements }
    }

    /// 所有坐标均为零值的点
    pub fn origin() -> Self {
        Point {
            elements: [T::default(); D],
        }
    }

    /// 从切片创建点，长度必须恰好等于维度
    pub fn from_slice(values: &[T]) -> Result<Self, PointError> {
        if values.len() != D {
            return Err(PointError::DimensionMismatch {
                expected: D,
                found: values.len(),
            });
        }

        let mut point = Self::origin();
        point.elements.copy_from_slice(values);
        Ok(point)
    }

    /// 从文本流读取一行，使用宽松解析策略
    pub fn read_from<R: BufRead + ?Sized>(reader: &mut R) -> Result<Self, PointError> {
        Self::read_with_policy(reader, ReadPolicy::Lenient)
    }

    /// 从文本流读取恰好一行并解析为点
    ///
    /// 流中没有剩余行时返回 [`PointError::EmptyStream`]。
    pub fn read_with_policy<R: BufRead + ?Sized>(
        reader: &mut R,
        policy: ReadPolicy,
    ) -> Result<Self, PointError> {
        let mut line = String::new();
        if reader.read_line(&mut line)? == 0 {
            return Err(PointError::EmptyStream);
        }
        Self::parse_line(&line, policy)
    }

    /// 解析一行以空白分隔的坐标
    ///
    /// - `Lenient`：最多读取 `D` 个坐标，缺失的尾部坐标保持零值，多余的记号被忽略
    /// - `Strict`：记号数量必须恰好等于 `D`
    ///
    /// 两种策略下，无法解析的记号都会返回 [`PointError::Parse`]。
    pub fn parse_line(line: &str, policy: ReadPolicy) -> Result<Self, PointError> {
        let mut point = Self::origin();
        let mut found = 0;

        for token in line.split_whitespace() {
            if found < D {
                point.elements[found] = token.parse().map_err(|_| PointError::Parse {
                    index: found,
                    token: token.to_string(),
                })?;
            } else if policy == ReadPolicy::Lenient {
                break;
            }
            found += 1;
        }

        if policy == ReadPolicy::Strict && found != D {
            return Err(PointError::DimensionMismatch { expected: D, found });
        }

        Ok(point)
    }

    /// 带边界检查的坐标访问
    pub fn at(&self, index: usize) -> Result<T, PointError> {
        self.elements
            .get(index)
            .copied()
            .ok_or(PointError::IndexOutOfRange {
                index,
                dimension: D,
            })
    }

    /// 带边界检查的坐标写入
    pub fn set(&mut self, index: usize, value: T) -> Result<(), PointError> {
        match self.elements.get_mut(index) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(PointError::IndexOutOfRange {
                index,
                dimension: D,
            }),
        }
    }
}

impl<T, const D: usize> Point<T, D> {
    /// 点的维度
    pub const fn dimension() -> usize {
        D
    }

    pub const fn len(&self) -> usize {
        D
    }

    pub const fn is_empty(&self) -> bool {
        D == 0
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.elements.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.elements.get_mut(index)
    }

    pub fn coords(&self) -> &[T; D] {
        &self.elements
    }

    pub fn into_inner(self) -> [T; D] {
        self.elements
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.elements.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.elements.iter_mut()
    }
}

impl<T: Scalar, const D: usize> Default for Point<T, D> {
    fn default() -> Self {
        Self::origin()
    }
}

impl<T, const D: usize> From<[T; D]> for Point<T, D> {
    fn from(elements: [T; D]) -> Self {
        Point { elements }
    }
}

impl<T: Scalar, const D: usize> TryFrom<&[T]> for Point<T, D> {
    type Error = PointError;

    fn try_from(values: &[T]) -> Result<Self, Self::Error> {
        Self::from_slice(values)
    }
}

impl<T: Scalar, const D: usize> TryFrom<Vec<T>> for Point<T, D> {
    type Error = PointError;

    fn try_from(values: Vec<T>) -> Result<Self, Self::Error> {
        Self::from_slice(&values)
    }
}

impl<T: Scalar, const D: usize> FromStr for Point<T, D> {
    type Err = PointError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_line(s, ReadPolicy::Lenient)
    }
}

impl<T, const D: usize> Index<usize> for Point<T, D> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.elements[index]
    }
}

impl<T, const D: usize> IndexMut<usize> for Point<T, D> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.elements[index]
    }
}

impl<'a, T, const D: usize> IntoIterator for &'a Point<T, D> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}

/// 输出格式：`(x y ...)`，不带换行
impl<T: Display, const D: usize> Display for Point<T, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for (i, e) in self.elements.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", e)?;
        }
        f.write_str(")")
    }
}

// serde 不支持任意长度的常量泛型数组，这里按坐标序列手动实现
impl<T: Serialize, const D: usize> Serialize for Point<T, D> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.elements.iter())
    }
}

impl<'de, T, const D: usize> Deserialize<'de> for Point<T, D>
where
    T: Scalar + Deserialize<'de>,
{
    fn deserialize<De: Deserializer<'de>>(deserializer: De) -> Result<Self, De::Error> {
        let values = Vec::<T>::deserialize(deserializer)?;
        Self::from_slice(&values).map_err(|_| {
            let expected = format!("a sequence of {} coordinates", D);
            de::Error::invalid_length(values.len(), &expected.as_str())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    type Point2d = Point<f64, 2>;

    #[test]
    fn test_point_init() {
        let mut p = Point2d::from_slice(&[1.0, 2.0]).unwrap();
        assert_eq!(p[0], 1.0);
        assert_eq!(p[1], 2.0);

        let p2 = Point2d::new([3.0, 4.0]);
        p[0] = 3.0;
        p[1] = 4.0;
        assert_eq!(p, p2);
    }

    #[test]
    fn test_dimension_mismatch() {
        for values in [&[][..], &[1.0][..], &[3.0, 4.0, 2.3][..]] {
            match Point2d::from_slice(values) {
                Err(PointError::DimensionMismatch { expected, found }) => {
                    assert_eq!(expected, 2);
                    assert_eq!(found, values.len());
                }
                other => panic!("expected DimensionMismatch, got {:?}", other),
            }
        }

        assert!(Point2d::try_from(vec![1.0, 2.0]).is_ok());
        assert!(Point2d::try_from(vec![1.0, 2.0, 3.0]).is_err());
    }

    #[test]
    fn test_values_read_back_exactly() {
        let values = [0.1, -1e300, f64::MIN_POSITIVE, 123456.789];
        let p = Point::<f64, 4>::from_slice(&values).unwrap();
        for (i, v) in values.iter().enumerate() {
            assert_eq!(p.at(i).unwrap(), *v);
        }
        assert_eq!(p.into_inner(), values);
    }

    #[test]
    fn test_checked_access() {
        let mut p = Point2d::new([1.0, 2.0]);
        assert!(matches!(
            p.at(2),
            Err(PointError::IndexOutOfRange {
                index: 2,
                dimension: 2
            })
        ));
        assert!(p.get(5).is_none());
        assert!(p.set(2, 9.0).is_err());

        p.set(1, 9.0).unwrap();
        assert_eq!(p[1], 9.0);
        *p.get_mut(0).unwrap() = -1.0;
        assert_eq!(p.coords(), &[-1.0, 9.0]);
    }

    #[test]
    #[should_panic]
    fn test_unchecked_index_panics() {
        let p = Point2d::new([1.0, 2.0]);
        let _ = p[2];
    }

    #[test]
    fn test_size() {
        assert_eq!(Point2d::dimension(), 2);
        assert_eq!(Point::<i32, 5>::dimension(), 5);
        assert_eq!(Point2d::origin().len(), 2);
    }

    #[test]
    fn test_point_from_stream() {
        let mut input = Cursor::new("1.5 3.2\n4 2");

        let p = Point2d::read_from(&mut input).unwrap();
        assert_eq!(p, Point2d::new([1.5, 3.2]));

        let p2 = Point2d::read_from(&mut input).unwrap();
        assert_eq!(p2, Point2d::new([4.0, 2.0]));

        assert!(matches!(
            Point2d::read_from(&mut input),
            Err(PointError::EmptyStream)
        ));

        let mut empty = Cursor::new("");
        assert!(matches!(
            Point2d::read_from(&mut empty),
            Err(PointError::EmptyStream)
        ));
    }

    #[test]
    fn test_tab_separated_line() {
        let p: Point2d = "-0.297462\t0.176102".parse().unwrap();
        assert_eq!(p, Point2d::new([-0.297462, 0.176102]));
    }

    #[test]
    fn test_lenient_short_line_defaults_to_zero() {
        let p = Point::<f64, 3>::parse_line("7.5\n", ReadPolicy::Lenient).unwrap();
        assert_eq!(p, Point::new([7.5, 0.0, 0.0]));

        let blank = Point2d::parse_line("\n", ReadPolicy::Lenient).unwrap();
        assert_eq!(blank, Point2d::origin());

        // 多余的记号被忽略
        let extra = Point2d::parse_line("1 2 3 oops", ReadPolicy::Lenient).unwrap();
        assert_eq!(extra, Point2d::new([1.0, 2.0]));
    }

    #[test]
    fn test_strict_requires_exact_count() {
        assert!(matches!(
            Point::<f64, 3>::parse_line("1 2", ReadPolicy::Strict),
            Err(PointError::DimensionMismatch {
                expected: 3,
                found: 2
            })
        ));
        assert!(matches!(
            Point2d::parse_line("1 2 3", ReadPolicy::Strict),
            Err(PointError::DimensionMismatch {
                expected: 2,
                found: 3
            })
        ));
        assert!(Point2d::parse_line("1 2\r\n", ReadPolicy::Strict).is_ok());
    }

    #[test]
    fn test_parse_error_reports_token() {
        match Point2d::parse_line("1.0 abc", ReadPolicy::Lenient) {
            Err(PointError::Parse { index, token }) => {
                assert_eq!(index, 1);
                assert_eq!(token, "abc");
            }
            other => panic!("expected Parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_integer_points() {
        let p: Point<i32, 3> = "1 -2 3".parse().unwrap();
        assert_eq!(p, Point::new([1, -2, 3]));
        assert!("1 2.5 3".parse::<Point<i32, 3>>().is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(Point2d::new([1.5, 3.2]).to_string(), "(1.5 3.2)");
        assert_eq!(Point::new([4.0, 2.0, -1.0]).to_string(), "(4 2 -1)");
    }

    #[test]
    fn test_raw_stream_read_inverts_coordinates() {
        let p = Point::<f64, 3>::new([0.25, -8.0, 1e-3]);
        let raw = p.iter().map(|v| v.to_string()).collect::<Vec<_>>().join(" ");
        let parsed: Point<f64, 3> = raw.parse().unwrap();
        assert_eq!(parsed, p);

        // 显示格式带括号，不会被重新解析
        assert!(p.to_string().parse::<Point<f64, 3>>().is_err());
    }

    #[test]
    fn test_serde_json() {
        let p = Point2d::new([1.5, -2.0]);
        let json = serde_json::to_string(&p).unwrap();
        assert_eq!(json, "[1.5,-2.0]");

        let back: Point2d = serde_json::from_str(&json).unwrap();
        assert_eq!(back, p);

        let err = serde_json::from_str::<Point2d>("[1.0,2.0,3.0]").unwrap_err();
        assert!(err.to_string().contains("a sequence of 2 coordinates"));
    }

    #[test]
    fn test_swap_in_vec() {
        let mut points = vec![
            Point2d::new([1.5, 3.2]),
            Point2d::new([4.0, 2.0]),
            Point2d::new([0.0, 1.0]),
        ];
        points.swap(0, 2);
        assert_eq!(points[0][1], 1.0);
        assert_eq!(points[2][0], 1.5);
    }
}
