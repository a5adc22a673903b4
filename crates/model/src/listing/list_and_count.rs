use crate::listing::entry::ListingEntry;

/// Paging summary of one listing call, derived from the entries it returned.
///
/// The catalog only puts authoritative totals and the end-of-records flag on
/// the last row of a batch, so those are read from the last entry rather
/// than computed from the number of entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListAndCount {
    pub count_total: u64,
    /// Running count through the last entry of this page.
    pub count_this_page: u64,
    /// Running count of the first entry of this page (1-based).
    pub offset_start: u64,
    pub end_of_records: bool,
    pub entries: Vec<ListingEntry>,
}

impl ListAndCount {
    pub fn from_entries(entries: Vec<ListingEntry>) -> Self {
        let (Some(first), Some(last)) = (entries.first(), entries.last()) else {
            return ListAndCount {
                end_of_records: true,
                ..Default::default()
            };
        };

        ListAndCount {
            count_total: last.total_records,
            count_this_page: last.row_count_so_far,
            offset_start: first.row_count_so_far,
            end_of_records: last.is_last_row_overall,
            entries,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::entry::ListingKind;

    fn entry(count: u64, last: bool, total: u64) -> ListingEntry {
        let mut e = ListingEntry::new(ListingKind::Collection, "/z", &format!("c{count}"));
        e.row_count_so_far = count;
        e.is_last_row_overall = last;
        e.total_records = total;
        e
    }

    #[test]
    fn test_values_come_from_first_and_last_entries() {
        // Only the last entry carries the flag and the total.
        let lc = ListAndCount::from_entries(vec![
            entry(6, false, 0),
            entry(7, false, 0),
            entry(8, true, 8),
        ]);

        assert_eq!(lc.offset_start, 6);
        assert_eq!(lc.count_this_page, 8);
        assert_eq!(lc.count_total, 8);
        assert!(lc.end_of_records);
    }

    #[test]
    fn test_short_page_without_flag_is_not_end() {
        let lc = ListAndCount::from_entries(vec![entry(1, false, 0)]);
        assert!(!lc.end_of_records);
        assert_eq!(lc.count_total, 0);
    }

    #[test]
    fn test_empty() {
        let lc = ListAndCount::from_entries(Vec::new());
        assert!(lc.is_empty());
        assert!(lc.end_of_records);
        assert_eq!(lc.count_this_page, 0);
    }
}
