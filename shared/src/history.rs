//! Movement-history view state
//!
//! The contracts the history display must uphold regardless of UI
//! framework: fixed page size, page reset on any filter change,
//! stale-response suppression for overlapping in-flight queries, and
//! last-good data preserved when a read fails.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{MovementFilters, MovementKind, MovementRow};

/// Fixed history page size
pub const PAGE_SIZE: u32 = 50;

/// Total pages for a match count; at least 1 even when the count is 0.
pub fn total_pages(total: i64, page_size: u32) -> u32 {
    if total <= 0 {
        return 1;
    }
    let pages = (total as u64).div_ceil(u64::from(page_size));
    pages.try_into().unwrap_or(u32::MAX)
}

/// Row offset of a 1-indexed page.
pub fn page_offset(page: u32, page_size: u32) -> i64 {
    i64::from(page.max(1) - 1) * i64::from(page_size)
}

/// Filter + pagination state for the history display
///
/// Every filter mutation resets pagination to page 1; an out-of-date page
/// against a narrower filter would silently show nothing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistoryState {
    filters: MovementFilters,
    page: u32,
}

impl HistoryState {
    pub fn new() -> Self {
        Self {
            filters: MovementFilters::default(),
            page: 1,
        }
    }

    pub fn filters(&self) -> &MovementFilters {
        &self.filters
    }

    pub fn page(&self) -> u32 {
        self.page.max(1)
    }

    pub fn set_page(&mut self, page: u32) {
        self.page = page.max(1);
    }

    pub fn set_kind(&mut self, kind: Option<MovementKind>) {
        self.filters.kind = kind;
        self.page = 1;
    }

    pub fn set_warehouse(&mut self, warehouse_id: Option<Uuid>) {
        self.filters.warehouse_id = warehouse_id;
        self.page = 1;
    }

    pub fn set_vintage(&mut self, vintage: Option<i32>) {
        self.filters.vintage = vintage;
        self.page = 1;
    }

    pub fn set_lot_code(&mut self, lot_code: Option<String>) {
        self.filters.lot_code = lot_code;
        self.page = 1;
    }

    pub fn set_size_label(&mut self, size_label: Option<String>) {
        self.filters.size_label = size_label;
        self.page = 1;
    }

    pub fn set_search(&mut self, search: Option<String>) {
        self.filters.search = search;
        self.page = 1;
    }

    pub fn clear_filters(&mut self) {
        self.filters = MovementFilters::default();
        self.page = 1;
    }
}

/// Ticket identifying one issued history query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket(u64);

/// Stale-response suppression for overlapping in-flight queries
///
/// There is no explicit cancellation of in-flight reads; responses are
/// keyed to the latest issued request, and anything older is dropped. An
/// out-of-order response must never overwrite newer, already-displayed
/// results.
#[derive(Debug, Clone, Default)]
pub struct QuerySequencer {
    latest: u64,
}

impl QuerySequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new outgoing request; older tickets become stale.
    pub fn issue(&mut self) -> RequestTicket {
        self.latest += 1;
        RequestTicket(self.latest)
    }

    pub fn is_current(&self, ticket: RequestTicket) -> bool {
        ticket.0 == self.latest
    }
}

/// Displayed history: rows, match count, and read-error state
///
/// A failed read leaves the previously displayed rows intact and marks the
/// view with the error instead of silently clearing valid data.
#[derive(Debug, Clone, Default)]
pub struct LogView {
    rows: Vec<MovementRow>,
    total: i64,
    error: Option<String>,
    sequencer: QuerySequencer,
}

impl LogView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> &[MovementRow] {
        &self.rows
    }

    pub fn total(&self) -> i64 {
        self.total
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Register an outgoing query for this view.
    pub fn begin_request(&mut self) -> RequestTicket {
        self.sequencer.issue()
    }

    /// Apply a successful response; ignored (returns false) if a newer
    /// request has been issued since.
    pub fn apply_success(
        &mut self,
        ticket: RequestTicket,
        rows: Vec<MovementRow>,
        total: i64,
    ) -> bool {
        if !self.sequencer.is_current(ticket) {
            return false;
        }
        self.rows = rows;
        self.total = total;
        self.error = None;
        true
    }

    /// Apply a failed response; keeps last-good rows and total. Ignored if
    /// a newer request has been issued since.
    pub fn apply_error(&mut self, ticket: RequestTicket, message: impl Into<String>) -> bool {
        if !self.sequencer.is_current(ticket) {
            return false;
        }
        self.error = Some(message.into());
        true
    }
}
