//! Pages the children of a collection as one forward cursor over two
//! server-side streams: collections first, then data objects.
//!
//! The current state is never stored; it is derived from the descriptor's
//! stream completion flags:
//!
//! ```text
//! ListingCollections --collections complete--> ListingDataObjects --data objects complete--> Done
//! ```
//!
//! Entering `ListingDataObjects` fetches the first data-objects page right
//! away, so the page that finishes the collections is topped up with data
//! objects.

use crate::error::PagerError;
use connectors::{listing::CollectionListing, protocol::transport::PathResolver};
use engine_config::settings::ClientSettings;
use model::{
    listing::{
        entry::{ListingEntry, ListingKind},
        list_and_count::ListAndCount,
    },
    pagination::{
        descriptor::{PagerState, PagingDescriptor, PagingStyle},
        listing::PagingAwareListing,
    },
};
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Clone)]
pub struct CollectionPager {
    listing: CollectionListing,
    resolver: Arc<dyn PathResolver>,
    paging_style: PagingStyle,
}

impl CollectionPager {
    pub fn new(
        listing: CollectionListing,
        resolver: Arc<dyn PathResolver>,
        settings: &ClientSettings,
    ) -> Self {
        Self {
            listing,
            resolver,
            paging_style: settings.paging_style,
        }
    }

    /// Starts browsing `path`. The returned listing carries the descriptor to
    /// pass to [`retrieve_next_page`](Self::retrieve_next_page).
    pub async fn retrieve_first_page(&self, path: &str) -> Result<PagingAwareListing, PagerError> {
        let stat = self.resolver.resolve_object_stat(path).await?;
        if !stat.is_collection() {
            return Err(PagerError::NotACollection(path.to_string()));
        }

        info!(object_type = %stat.object_type, "Starting collection listing");
        let mut descriptor =
            PagingDescriptor::new(stat, self.paging_style, self.listing.page_size());
        let entries = self.advance(&mut descriptor).await?;
        Ok(PagingAwareListing::new(descriptor, entries))
    }

    /// Fetches the page after the one `descriptor` last produced and updates
    /// it in place.
    pub async fn retrieve_next_page(
        &self,
        descriptor: &mut PagingDescriptor,
    ) -> Result<PagingAwareListing, PagerError> {
        let entries = self.advance(descriptor).await?;
        Ok(PagingAwareListing::new(descriptor.clone(), entries))
    }

    /// Runs one page step against a copy of `descriptor`. The caller's
    /// descriptor only moves once every request of the step has succeeded,
    /// so a failed call can be retried without skipping entries.
    async fn advance(
        &self,
        descriptor: &mut PagingDescriptor,
    ) -> Result<Vec<ListingEntry>, PagerError> {
        let mut working = descriptor.clone();
        let entries = self.step(&mut working).await?;
        *descriptor = working;
        Ok(entries)
    }

    async fn step(
        &self,
        descriptor: &mut PagingDescriptor,
    ) -> Result<Vec<ListingEntry>, PagerError> {
        let state = descriptor.state();
        debug!(state = %state, "Advancing pager");

        match state {
            PagerState::ListingCollections => {
                let mut entries = self.fetch_page(descriptor, ListingKind::Collection).await?;
                if descriptor.state() == PagerState::ListingDataObjects {
                    entries.extend(self.enter_data_objects(descriptor).await?);
                }
                Ok(entries)
            }
            PagerState::ListingDataObjects => {
                self.fetch_page(descriptor, ListingKind::DataObject).await
            }
            PagerState::Done => Err(PagerError::NoMorePaging),
        }
    }

    /// Transition action into `ListingDataObjects`.
    async fn enter_data_objects(
        &self,
        descriptor: &mut PagingDescriptor,
    ) -> Result<Vec<ListingEntry>, PagerError> {
        debug!(
            collections = descriptor.collections.total_records_or_zero(),
            "Collections complete, peeking at data objects"
        );
        self.fetch_page(descriptor, ListingKind::DataObject).await
    }

    /// Fetches the next page of one stream and folds it into the descriptor.
    async fn fetch_page(
        &self,
        descriptor: &mut PagingDescriptor,
        kind: ListingKind,
    ) -> Result<Vec<ListingEntry>, PagerError> {
        let offset = descriptor.stream(kind).offset;
        let stat = &descriptor.object_stat;
        let entries = match kind {
            ListingKind::Collection => {
                self.listing
                    .list_collections_under_path(stat, offset)
                    .await?
            }
            ListingKind::DataObject => {
                self.listing
                    .list_data_objects_under_path(stat, offset)
                    .await?
            }
        };

        let page = ListAndCount::from_entries(entries);
        let stream = descriptor.stream_mut(kind);
        stream.record_page(&page);
        let needs_count = !page.is_empty() && stream.needs_total_count();

        debug!(
            kind = %kind,
            offset_start = page.offset_start,
            count_this_page = page.count_this_page,
            end_of_records = page.end_of_records,
            "Fetched page"
        );

        if needs_count {
            let total = self
                .listing
                .count_under_path(&descriptor.object_stat, kind)
                .await?;
            descriptor.stream_mut(kind).total_records = Some(total);
        }

        Ok(page.entries)
    }
}
