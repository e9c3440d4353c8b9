use crate::models::{Fast, HistoryPage};

#[derive(Debug, Clone, Copy)]
pub struct PageRequest {
    pub page: u32,
    pub generation: u64,
}

#[derive(Debug, Default)]
pub struct HistoryController {
    page: u32,
    total_pages: u32,
    entries: Vec<Fast>,
    pending_delete: Option<u64>,
    generation: u64,
    in_flight: bool,
    loaded: bool,
}

impl HistoryController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn entries(&self) -> &[Fast] {
        &self.entries
    }

    pub fn loaded(&self) -> bool {
        self.loaded
    }

    pub fn begin_load(&mut self) -> Option<PageRequest> {
        if self.in_flight {
            return None;
        }
        self.in_flight = true;
        self.generation += 1;
        Some(PageRequest {
            page: self.page + 1,
            generation: self.generation,
        })
    }

    pub fn apply_page(&mut self, request: PageRequest, result: HistoryPage) -> Option<usize> {
        if request.generation != self.generation {
            return None;
        }
        self.in_flight = false;
        self.loaded = true;
        self.page = request.page;
        self.total_pages = result.total_pages;
        let appended = result.fasts.len();
        self.entries.extend(result.fasts);
        Some(appended)
    }

    pub fn fail_load(&mut self, request: PageRequest) {
        if request.generation == self.generation {
            self.in_flight = false;
        }
    }

    pub fn is_empty(&self) -> bool {
        self.loaded && self.entries.is_empty()
    }

    pub fn has_more(&self) -> bool {
        self.loaded && self.page < self.total_pages
    }

    pub fn request_delete(&mut self, id: u64) -> bool {
        if self.pending_delete.is_some() || !self.entries.iter().any(|fast| fast.id == id) {
            return false;
        }
        self.pending_delete = Some(id);
        true
    }

    pub fn pending_delete(&self) -> Option<u64> {
        self.pending_delete
    }

    pub fn confirm_delete(&mut self) -> Option<u64> {
        self.pending_delete.take()
    }

    pub fn decline_delete(&mut self) {
        self.pending_delete = None;
    }

    pub fn remove(&mut self, id: u64) -> bool {
        match self.entries.iter().position(|fast| fast.id == id) {
            Some(index) => {
                self.entries.remove(index);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn fast(id: u64) -> Fast {
        Fast {
            id,
            started_at: Utc.with_ymd_and_hms(2026, 1, 5, 8, 0, 0).unwrap(),
            ended_at: Some(Utc.with_ymd_and_hms(2026, 1, 6, 0, 30, 0).unwrap()),
            target_hours: 16,
            duration_seconds: Some(16 * 3600 + 30 * 60),
            completed: true,
        }
    }

    fn page_of(ids: &[u64], total_pages: u32) -> HistoryPage {
        HistoryPage {
            fasts: ids.iter().copied().map(fast).collect(),
            page: 0,
            total_pages,
            total: ids.len() as u64,
        }
    }

    #[test]
    fn empty_first_page_shows_the_empty_state() {
        let mut history = HistoryController::new();
        let request = history.begin_load().unwrap();
        assert_eq!(request.page, 1);

        history.apply_page(request, page_of(&[], 0));
        assert!(history.is_empty());
        assert!(!history.has_more());
    }

    #[test]
    fn first_page_with_records_never_shows_the_empty_state() {
        let mut history = HistoryController::new();
        let request = history.begin_load().unwrap();
        history.apply_page(request, page_of(&[1, 2], 5));

        assert!(!history.is_empty());
        assert!(history.has_more());
        assert_eq!(history.page(), 1);
        assert_eq!(history.total_pages(), 5);
    }

    #[test]
    fn load_more_appends_and_hides_the_control_on_the_last_page() {
        let mut history = HistoryController::new();
        let first = history.begin_load().unwrap();
        history.apply_page(first, page_of(&[1, 2], 2));
        assert!(history.has_more());

        let second = history.begin_load().unwrap();
        assert_eq!(second.page, 2);
        let appended = history.apply_page(second, page_of(&[3], 2)).unwrap();
        assert_eq!(appended, 1);
        assert_eq!(history.entries().len(), 3);
        assert!(!history.has_more());
    }

    #[test]
    fn second_load_while_in_flight_is_debounced() {
        let mut history = HistoryController::new();
        let request = history.begin_load().unwrap();
        assert!(history.begin_load().is_none());

        history.apply_page(request, page_of(&[1], 1));
        assert!(history.begin_load().is_some());
    }

    #[test]
    fn stale_responses_are_discarded() {
        let mut history = HistoryController::new();
        let stale = history.begin_load().unwrap();
        history.fail_load(stale);

        let fresh = history.begin_load().unwrap();
        assert!(history.apply_page(stale, page_of(&[9], 3)).is_none());
        assert!(history.entries().is_empty());

        history.apply_page(fresh, page_of(&[1], 1)).unwrap();
        assert_eq!(history.entries().len(), 1);
    }

    #[test]
    fn failed_load_keeps_the_cursor_in_place() {
        let mut history = HistoryController::new();
        let first = history.begin_load().unwrap();
        history.apply_page(first, page_of(&[1], 3));

        let second = history.begin_load().unwrap();
        assert_eq!(second.page, 2);
        history.fail_load(second);

        let retry = history.begin_load().unwrap();
        assert_eq!(retry.page, 2);
    }

    #[test]
    fn delete_removes_exactly_one_entry_and_keeps_bookkeeping() {
        let mut history = HistoryController::new();
        let request = history.begin_load().unwrap();
        history.apply_page(request, page_of(&[1, 2, 3], 4));

        assert!(history.request_delete(2));
        assert_eq!(history.confirm_delete(), Some(2));
        assert!(history.remove(2));
        assert_eq!(history.entries().len(), 2);
        assert_eq!(history.page(), 1);
        assert_eq!(history.total_pages(), 4);
        assert!(!history.remove(2));
    }

    #[test]
    fn declined_delete_keeps_the_entry() {
        let mut history = HistoryController::new();
        let request = history.begin_load().unwrap();
        history.apply_page(request, page_of(&[7], 1));

        assert!(history.request_delete(7));
        history.decline_delete();
        assert_eq!(history.pending_delete(), None);
        assert_eq!(history.entries().len(), 1);
    }

    #[test]
    fn delete_requires_a_known_id() {
        let mut history = HistoryController::new();
        let request = history.begin_load().unwrap();
        history.apply_page(request, page_of(&[1], 1));

        assert!(!history.request_delete(99));
        assert!(history.request_delete(1));
        assert!(!history.request_delete(1));
    }
}
