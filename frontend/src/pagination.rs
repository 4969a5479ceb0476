use crate::models::Expense;

pub const ITEMS_PER_PAGE: usize = 5;

pub fn total_pages(count: usize) -> usize {
    count.div_ceil(ITEMS_PER_PAGE)
}

/// Pulls a cursor back into `[1, total_pages]`. An empty list rests at 1.
pub fn clamp_page(page: usize, count: usize) -> usize {
    page.clamp(1, total_pages(count).max(1))
}

pub fn shift_page(page: usize, delta: isize) -> usize {
    page.saturating_add_signed(delta)
}

/// What the expense table shows for one cursor position.
#[derive(Debug, PartialEq)]
pub struct PageView<'a> {
    pub rows: &'a [Expense],
    /// Zero when there is nothing to show.
    pub page: usize,
    pub total_pages: usize,
    pub has_prev: bool,
    pub has_next: bool,
}

impl PageView<'_> {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn label(&self) -> String {
        format!("Page {} of {}", self.page, self.total_pages)
    }
}

/// Table row key. Saved expenses key by id; a row the server sent without
/// one falls back to its position on the page.
pub fn row_key(index: usize, expense: &Expense) -> String {
    match expense.id {
        Some(id) => format!("id-{id}"),
        None => format!("row-{index}"),
    }
}

pub fn paginate(expenses: &[Expense], page: usize) -> PageView<'_> {
    if expenses.is_empty() {
        return PageView {
            rows: &[],
            page: 0,
            total_pages: 0,
            has_prev: false,
            has_next: false,
        };
    }

    let total = total_pages(expenses.len());
    let page = clamp_page(page, expenses.len());
    let start = (page - 1) * ITEMS_PER_PAGE;
    let end = (start + ITEMS_PER_PAGE).min(expenses.len());

    PageView {
        rows: &expenses[start..end],
        page,
        total_pages: total,
        has_prev: page > 1,
        has_next: page < total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn expenses(n: usize) -> Vec<Expense> {
        (0..n)
            .map(|i| Expense {
                id: Some(i as i64),
                amount: 1.0 + i as f64,
                description: format!("item {i}"),
                category: "misc".to_string(),
                date: NaiveDate::from_ymd_opt(2024, 1, 1)
                    .unwrap()
                    .and_hms_opt(0, 0, 0)
                    .unwrap(),
            })
            .collect()
    }

    #[test]
    fn empty_list_has_no_pages() {
        let view = paginate(&[], 3);
        assert!(view.is_empty());
        assert_eq!(view.label(), "Page 0 of 0");
        assert!(!view.has_prev);
        assert!(!view.has_next);
    }

    #[test]
    fn never_more_than_five_rows() {
        let list = expenses(23);
        for page in 1..=total_pages(list.len()) {
            assert!(paginate(&list, page).rows.len() <= ITEMS_PER_PAGE);
        }
    }

    #[test]
    fn rows_match_slice_indices() {
        let list = expenses(12);
        let view = paginate(&list, 2);
        let ids: Vec<_> = view.rows.iter().filter_map(|e| e.id).collect();
        assert_eq!(ids, vec![5, 6, 7, 8, 9]);

        let last = paginate(&list, 3);
        let ids: Vec<_> = last.rows.iter().filter_map(|e| e.id).collect();
        assert_eq!(ids, vec![10, 11]);
        assert_eq!(last.label(), "Page 3 of 3");
    }

    #[test]
    fn nav_flags_on_first_middle_and_last_page() {
        let list = expenses(11);
        let first = paginate(&list, 1);
        assert!(!first.has_prev && first.has_next);
        let middle = paginate(&list, 2);
        assert!(middle.has_prev && middle.has_next);
        let last = paginate(&list, 3);
        assert!(last.has_prev && !last.has_next);
    }

    #[test]
    fn single_page_disables_both_controls() {
        let list = expenses(5);
        let view = paginate(&list, 1);
        assert_eq!(view.label(), "Page 1 of 1");
        assert!(!view.has_prev && !view.has_next);
    }

    #[test]
    fn cursor_past_the_end_is_pulled_back() {
        let list = expenses(6);
        let view = paginate(&list, 9);
        assert_eq!(view.page, 2);
        assert_eq!(view.rows.len(), 1);
        assert_eq!(clamp_page(9, 6), 2);
    }

    #[test]
    fn cursor_below_one_is_pushed_up() {
        assert_eq!(clamp_page(0, 6), 1);
        assert_eq!(paginate(&expenses(6), 0).page, 1);
    }

    #[test]
    fn clamp_on_empty_rests_at_one() {
        assert_eq!(clamp_page(4, 0), 1);
    }

    #[test]
    fn shift_does_not_underflow() {
        assert_eq!(shift_page(1, -1), 0);
        assert_eq!(shift_page(0, -1), 0);
        assert_eq!(shift_page(2, 1), 3);
    }

    #[test]
    fn row_keys_stay_unique_without_ids() {
        let mut list = expenses(3);
        for expense in &mut list {
            expense.id = None;
        }
        list[2].id = Some(0);

        let keys: Vec<_> = list
            .iter()
            .enumerate()
            .map(|(index, expense)| row_key(index, expense))
            .collect();
        assert_eq!(keys, vec!["row-0", "row-1", "id-0"]);
    }
}
