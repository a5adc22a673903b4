use crate::{
    catalog::object_stat::ObjectStat,
    listing::{entry::ListingKind, list_and_count::ListAndCount},
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// How a collection's children are paged.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[non_exhaustive]
pub enum PagingStyle {
    /// Collections and data objects are paged as two separate streams,
    /// collections first.
    #[default]
    SplitCollectionsAndFiles,
}

/// Where a paging session currently is, derived from the stream states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PagerState {
    ListingCollections,
    ListingDataObjects,
    Done,
}

impl fmt::Display for PagerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PagerState::ListingCollections => write!(f, "listing_collections"),
            PagerState::ListingDataObjects => write!(f, "listing_data_objects"),
            PagerState::Done => write!(f, "done"),
        }
    }
}

/// Paging state of one result stream.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct StreamState {
    /// 0-based offset the next page of this stream starts at.
    pub offset: u64,

    /// Entries returned for this stream by the most recent page.
    pub count: usize,

    /// `None` until a batch reports a total or the count query has run.
    pub total_records: Option<u64>,

    pub complete: bool,
}

impl StreamState {
    /// Folds a freshly fetched page into the stream state.
    pub fn record_page(&mut self, page: &ListAndCount) {
        if page.is_empty() {
            self.count = 0;
            self.complete = true;
            if self.total_records.is_none() {
                self.total_records = Some(self.offset);
            }
            return;
        }

        self.offset = self.offset.max(page.count_this_page);
        self.count = page.entries.len();
        self.complete = page.end_of_records;
        if page.count_total > 0 {
            self.total_records = Some(page.count_total);
        }
    }

    /// True when no batch has reported a total and no count was cached yet.
    pub fn needs_total_count(&self) -> bool {
        self.total_records.is_none()
    }

    pub fn total_records_or_zero(&self) -> u64 {
        self.total_records.unwrap_or(0)
    }
}

/// The state a caller keeps between pages of one collection listing.
///
/// Not synchronized: a descriptor is mutated through `&mut` by one pager call
/// at a time. Share it across threads only behind the caller's own lock.
/// It serializes verbatim, so it can be stored between requests.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PagingDescriptor {
    pub parent_absolute_path: String,
    pub object_stat: ObjectStat,
    pub paging_style: PagingStyle,
    pub page_size_utilized: usize,
    pub collections: StreamState,
    pub data_objects: StreamState,
}

impl PagingDescriptor {
    pub fn new(object_stat: ObjectStat, paging_style: PagingStyle, page_size: usize) -> Self {
        PagingDescriptor {
            parent_absolute_path: object_stat.absolute_path.clone(),
            object_stat,
            paging_style,
            page_size_utilized: page_size,
            collections: StreamState::default(),
            data_objects: StreamState::default(),
        }
    }

    pub fn state(&self) -> PagerState {
        if !self.collections.complete {
            PagerState::ListingCollections
        } else if !self.data_objects.complete {
            PagerState::ListingDataObjects
        } else {
            PagerState::Done
        }
    }

    pub fn has_more(&self) -> bool {
        self.state() != PagerState::Done
    }

    /// Sum of both stream totals, counting unknown totals as 0.
    pub fn total_records(&self) -> u64 {
        self.collections.total_records_or_zero() + self.data_objects.total_records_or_zero()
    }

    pub fn stream(&self, kind: ListingKind) -> &StreamState {
        match kind {
            ListingKind::Collection => &self.collections,
            ListingKind::DataObject => &self.data_objects,
        }
    }

    pub fn stream_mut(&mut self, kind: ListingKind) -> &mut StreamState {
        match kind {
            ListingKind::Collection => &mut self.collections,
            ListingKind::DataObject => &mut self.data_objects,
        }
    }
}
