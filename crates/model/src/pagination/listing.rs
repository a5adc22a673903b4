use crate::{
    listing::entry::{ListingEntry, ListingKind},
    pagination::descriptor::PagingDescriptor,
};
use serde::{Deserialize, Serialize};

/// The result of every pager call: the updated descriptor and the merged
/// entries of the current page, collections first.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PagingAwareListing {
    pub descriptor: PagingDescriptor,
    pub entries: Vec<ListingEntry>,
}

impl PagingAwareListing {
    pub fn new(descriptor: PagingDescriptor, entries: Vec<ListingEntry>) -> Self {
        PagingAwareListing {
            descriptor,
            entries,
        }
    }

    pub fn collections(&self) -> impl Iterator<Item = &ListingEntry> {
        self.of_kind(ListingKind::Collection)
    }

    pub fn data_objects(&self) -> impl Iterator<Item = &ListingEntry> {
        self.of_kind(ListingKind::DataObject)
    }

    pub fn has_more(&self) -> bool {
        self.descriptor.has_more()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn of_kind(&self, kind: ListingKind) -> impl Iterator<Item = &ListingEntry> {
        self.entries.iter().filter(move |e| e.kind == kind)
    }
}
