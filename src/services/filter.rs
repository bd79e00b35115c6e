//! Query filters over the expense collection
//!
//! Filters never modify their input; they return the matching expenses in
//! their original order.

use chrono::NaiveDate;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Category, Expense};

/// Expenses dated within `[start, end]`; either bound may be open
pub fn by_date_range(
    records: &[Expense],
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> LedgerResult<Vec<Expense>> {
    check_range(start, end)?;
    Ok(records
        .iter()
        .filter(|e| in_range(e.date, start, end))
        .cloned()
        .collect())
}

/// Expenses in the named category (name or menu number)
pub fn by_category(records: &[Expense], name: &str) -> LedgerResult<Vec<Expense>> {
    let category: Category = name
        .parse()
        .map_err(|e: crate::models::UnknownCategory| LedgerError::Validation(e.to_string()))?;

    Ok(records
        .iter()
        .filter(|e| e.category == category)
        .cloned()
        .collect())
}

/// Expenses whose description contains `keyword`, ignoring case
pub fn by_description_keyword(records: &[Expense], keyword: &str) -> Vec<Expense> {
    let needle = keyword.to_lowercase();
    records
        .iter()
        .filter(|e| e.description.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

fn check_range(start: Option<NaiveDate>, end: Option<NaiveDate>) -> LedgerResult<()> {
    match (start, end) {
        (Some(s), Some(e)) if s > e => Err(LedgerError::Validation(format!(
            "Start date {} is after end date {}",
            s, e
        ))),
        _ => Ok(()),
    }
}

fn in_range(date: NaiveDate, start: Option<NaiveDate>, end: Option<NaiveDate>) -> bool {
    start.map_or(true, |s| date >= s) && end.map_or(true, |e| date <= e)
}

/// Options for filtering expenses; all set criteria must match
#[derive(Debug, Clone, Default)]
pub struct ExpenseFilter {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub category: Option<Category>,
    /// Case-insensitive substring of the description
    pub keyword: Option<String>,
    /// Maximum number of expenses to return
    pub limit: Option<usize>,
}

impl ExpenseFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn since(mut self, start: NaiveDate) -> Self {
        self.start_date = Some(start);
        self
    }

    pub fn until(mut self, end: NaiveDate) -> Self {
        self.end_date = Some(end);
        self
    }

    pub fn date_range(self, start: NaiveDate, end: NaiveDate) -> Self {
        self.since(start).until(end)
    }

    pub fn category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keyword = Some(keyword.into());
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.start_date.is_none()
            && self.end_date.is_none()
            && self.category.is_none()
            && self.keyword.is_none()
            && self.limit.is_none()
    }

    /// Check one expense against the criteria (ignores `limit`)
    pub fn matches(&self, expense: &Expense) -> bool {
        if !in_range(expense.date, self.start_date, self.end_date) {
            return false;
        }
        if let Some(category) = self.category {
            if expense.category != category {
                return false;
            }
        }
        if let Some(keyword) = &self.keyword {
            if !expense
                .description
                .to_lowercase()
                .contains(&keyword.to_lowercase())
            {
                return false;
            }
        }
        true
    }

    /// Select matching expenses in order, up to `limit`
    pub fn apply(&self, records: &[Expense]) -> LedgerResult<Vec<Expense>> {
        check_range(self.start_date, self.end_date)?;

        let matching = records.iter().filter(|e| self.matches(e)).cloned();
        Ok(match self.limit {
            Some(limit) => matching.take(limit).collect(),
            None => matching.collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExpenseId, Money};

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn expense(seq: u32, day: &str, description: &str, category: Category) -> Expense {
        Expense {
            id: ExpenseId::from_sequence(seq).unwrap(),
            date: date(day),
            description: description.to_string(),
            category,
            amount: Money::from_cents(1000),
        }
    }

    fn sample() -> Vec<Expense> {
        vec![
            expense(1, "2025-01-01", "Coffee with team", Category::FoodAndDining),
            expense(2, "2025-01-15", "Metro card", Category::Transportation),
            expense(3, "2025-01-31", "COFFEE beans", Category::Groceries),
            expense(4, "2025-02-01", "Movie", Category::Entertainment),
        ]
    }

    fn ids(records: &[Expense]) -> Vec<u32> {
        records.iter().map(|e| e.id.sequence()).collect()
    }

    #[test]
    fn test_date_range_inclusive() {
        let records = sample();
        let found = by_date_range(&records, Some(date("2025-01-15")), Some(date("2025-01-31"))).unwrap();
        assert_eq!(ids(&found), vec![2, 3]);
    }

    #[test]
    fn test_date_range_open_bounds() {
        let records = sample();
        assert_eq!(ids(&by_date_range(&records, None, Some(date("2025-01-15"))).unwrap()), vec![1, 2]);
        assert_eq!(ids(&by_date_range(&records, Some(date("2025-01-31")), None).unwrap()), vec![3, 4]);
        assert_eq!(by_date_range(&records, None, None).unwrap().len(), 4);
    }

    #[test]
    fn test_inverted_range_rejected() {
        let err = by_date_range(&sample(), Some(date("2025-02-01")), Some(date("2025-01-01")))
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_by_category() {
        let records = sample();
        assert_eq!(ids(&by_category(&records, "groceries").unwrap()), vec![3]);
        assert_eq!(ids(&by_category(&records, "2").unwrap()), vec![2]);
        assert!(by_category(&records, "Healthcare").unwrap().is_empty());
        assert!(by_category(&records, "Pets").unwrap_err().is_validation());
    }

    #[test]
    fn test_keyword_case_insensitive() {
        let records = sample();
        assert_eq!(ids(&by_description_keyword(&records, "coffee")), vec![1, 3]);
        assert!(by_description_keyword(&records, "rent").is_empty());
    }

    #[test]
    fn test_filter_combines_criteria() {
        let records = sample();

        let filter = ExpenseFilter::new()
            .date_range(date("2025-01-01"), date("2025-01-31"))
            .keyword("Coffee");
        assert_eq!(ids(&filter.apply(&records).unwrap()), vec![1, 3]);

        let filter = filter.category(Category::Groceries);
        assert_eq!(ids(&filter.apply(&records).unwrap()), vec![3]);
    }

    #[test]
    fn test_filter_limit_and_input_untouched() {
        let records = sample();
        let before = records.clone();

        let found = ExpenseFilter::new().limit(2).apply(&records).unwrap();
        assert_eq!(ids(&found), vec![1, 2]);
        assert_eq!(records, before);
        assert!(ExpenseFilter::new().is_empty());
    }
}
