//! Single-column sorting.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::row::RowField;
use super::value::{CellValue, collation_key};

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SortDirection {
    #[default]
    #[serde(rename = "asc")]
    Ascending,
    #[serde(rename = "desc")]
    Descending,
}

impl SortDirection {
    /// The other direction.
    #[must_use]
    pub const fn reversed(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    /// Short name used in query strings.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Ascending => "asc",
            Self::Descending => "desc",
        }
    }

    /// Header indicator glyph.
    #[must_use]
    pub const fn arrow(&self) -> &'static str {
        match self {
            Self::Ascending => "▲",
            Self::Descending => "▼",
        }
    }

    /// Apply this direction to an ascending ordering.
    #[must_use]
    pub const fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Ascending => ordering,
            Self::Descending => ordering.reverse(),
        }
    }
}

impl std::str::FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(Self::Ascending),
            "desc" | "descending" => Ok(Self::Descending),
            _ => Err(format!("invalid sort direction: {s}")),
        }
    }
}

/// The active sort: which column, which way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec<F> {
    pub field: F,
    pub direction: SortDirection,
}

/// Sort state of a table. `None` keeps rows in their input order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortState<F: RowField> {
    spec: Option<SortSpec<F>>,
}

impl<F: RowField> Default for SortState<F> {
    fn default() -> Self {
        Self { spec: None }
    }
}

impl<F: RowField> SortState<F> {
    /// Header click: ascending on a new column, flip on the current one.
    pub fn toggle(&mut self, field: F) {
        let direction = match &self.spec {
            Some(spec) if spec.field == field => spec.direction.reversed(),
            _ => SortDirection::Ascending,
        };
        self.spec = Some(SortSpec { field, direction });
    }

    /// Sort by `field` in an explicit direction.
    pub fn set(&mut self, field: F, direction: SortDirection) {
        self.spec = Some(SortSpec { field, direction });
    }

    /// Back to input order.
    pub fn clear(&mut self) {
        self.spec = None;
    }

    /// The active sort, if any.
    #[must_use]
    pub const fn spec(&self) -> Option<&SortSpec<F>> {
        self.spec.as_ref()
    }

    /// Direction `field` is sorted in, if it is the sort column.
    #[must_use]
    pub fn direction_of(&self, field: &F) -> Option<SortDirection> {
        self.spec
            .as_ref()
            .filter(|spec| &spec.field == field)
            .map(|spec| spec.direction)
    }
}

/// Ascending comparison of two cells.
///
/// Cells with a numeric reading compare numerically and order before cells
/// without one, in every column. The rest compare by [`collation_key`], so
/// case and diacritics do not affect order. The two groups never interleave,
/// which keeps the ordering total when a text column mixes `"10"` and `"5x"`.
/// A `number` column therefore lists its non-numeric cells last.
#[must_use]
pub fn compare_cells(a: &CellValue, b: &CellValue) -> Ordering {
    match (a.as_number(), b.as_number()) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => collation_key(&a.display_string()).cmp(&collation_key(&b.display_string())),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_cycle() {
        let mut sort: SortState<String> = SortState::default();
        assert!(sort.spec().is_none());

        sort.toggle("name".to_string());
        assert_eq!(sort.direction_of(&"name".to_string()), Some(SortDirection::Ascending));
        sort.toggle("name".to_string());
        assert_eq!(sort.direction_of(&"name".to_string()), Some(SortDirection::Descending));
        sort.toggle("name".to_string());
        assert_eq!(sort.direction_of(&"name".to_string()), Some(SortDirection::Ascending));

        sort.toggle("name".to_string());
        sort.toggle("price".to_string());
        assert_eq!(sort.direction_of(&"price".to_string()), Some(SortDirection::Ascending));
        assert_eq!(sort.direction_of(&"name".to_string()), None);

        sort.clear();
        assert!(sort.spec().is_none());
    }

    #[test]
    fn test_numeric_not_lexical() {
        let ten = CellValue::from(10);
        let two = CellValue::from(2);
        assert_eq!(compare_cells(&two, &ten), Ordering::Less);
        // numeric text compares numerically
        assert_eq!(
            compare_cells(&CellValue::from("10"), &CellValue::from("2")),
            Ordering::Greater
        );
    }

    #[test]
    fn test_text_is_case_insensitive() {
        assert_eq!(
            compare_cells(&CellValue::from("alice"), &CellValue::from("Bob")),
            Ordering::Less
        );
        assert_eq!(
            compare_cells(&CellValue::from(" bob"), &CellValue::from("BOB ")),
            Ordering::Equal
        );
    }

    #[test]
    fn test_non_numbers_sort_after_numbers() {
        assert_eq!(
            compare_cells(&CellValue::from(5), &CellValue::Null),
            Ordering::Less
        );
        assert_eq!(
            compare_cells(&CellValue::from("n/a"), &CellValue::from(5)),
            Ordering::Greater
        );
    }

    #[test]
    fn test_mixed_text_column_sorts_without_cycles() {
        // "9" < "10" numerically while "10" < "5x" < "9" as text
        let mut cells: Vec<CellValue> = (0..400)
            .rev()
            .map(|n| {
                if n % 3 == 0 {
                    CellValue::from(format!("{n}x"))
                } else {
                    CellValue::from(n.to_string())
                }
            })
            .collect();
        cells.push(CellValue::Null);
        cells.push(CellValue::from("10"));
        cells.push(CellValue::from("9"));
        cells.push(CellValue::from("5x"));

        cells.sort_by(compare_cells);

        let first_text = cells.iter().position(|c| c.as_number().is_none()).unwrap();
        let (numbers, text) = cells.split_at(first_text);
        assert!(numbers.iter().all(|c| c.as_number().is_some()));
        assert!(text.iter().all(|c| c.as_number().is_none()));
        for pair in cells.windows(2) {
            if let [a, b] = pair {
                assert_ne!(compare_cells(a, b), Ordering::Greater);
            }
        }
        assert_eq!(cells.first(), Some(&CellValue::from("1")));
    }

    #[test]
    fn test_direction_parse_and_apply() {
        assert_eq!("DESC".parse::<SortDirection>(), Ok(SortDirection::Descending));
        assert!("up".parse::<SortDirection>().is_err());
        assert_eq!(
            SortDirection::Descending.apply(Ordering::Less),
            Ordering::Greater
        );
        assert_eq!(SortDirection::Descending.apply(Ordering::Equal), Ordering::Equal);
    }
}
