#![allow(dead_code)]

use connectors::{
    genquery::executor::GenQueryExecutor, listing::CollectionListing, protocol::transport::shared,
};
use engine_config::settings::ClientSettings;
use engine_core::pager::CollectionPager;
use std::sync::Arc;
use utils::MockCatalog;

pub mod integration;
pub mod utils;

/// Settings for a client talking to the mock's home zone with `page_size`
/// rows per batch.
fn settings(page_size: usize) -> ClientSettings {
    ClientSettings {
        max_rows: page_size,
        home_zone: utils::HOME_ZONE.to_string(),
        ..ClientSettings::default()
    }
}

fn executor_for(catalog: &MockCatalog) -> GenQueryExecutor {
    GenQueryExecutor::new(shared(catalog.clone()))
}

/// A pager wired to `catalog` as both transport and path resolver.
fn pager_for(catalog: &MockCatalog, settings: &ClientSettings) -> CollectionPager {
    let listing = CollectionListing::new(executor_for(catalog), settings);
    CollectionPager::new(listing, Arc::new(catalog.clone()), settings)
}
