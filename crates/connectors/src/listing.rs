//! Listing primitives: one page of the collections or data objects directly
//! under a collection, and the count queries used when the server does not
//! report totals.

use crate::{
    error::{ExecutionError, QueryError},
    genquery::{
        batch::{CloseBehavior, ResultBatch},
        executor::GenQueryExecutor,
    },
};
use engine_config::settings::ClientSettings;
use model::{
    catalog::object_stat::ObjectStat,
    core::utils::{leaf_name, parse_catalog_timestamp, zone_from_path},
    listing::entry::{ListingEntry, ListingKind},
};
use planner::query::{
    ast::{
        column::CatalogColumn,
        operator::{Aggregate, ConditionOperator, Literal, OrderDir},
        options::QueryOptions,
        spec::QuerySpec,
    },
    builder::spec::QuerySpecBuilder,
};
use tracing::debug;

const ROOT_PATH: &str = "/";

const COLLECTION_COLUMNS: [CatalogColumn; 6] = [
    CatalogColumn::CollName,
    CatalogColumn::CollId,
    CatalogColumn::CollOwnerName,
    CatalogColumn::CollOwnerZone,
    CatalogColumn::CollCreateTime,
    CatalogColumn::CollModifyTime,
];

const DATA_OBJECT_COLUMNS: [CatalogColumn; 7] = [
    CatalogColumn::DataName,
    CatalogColumn::DataId,
    CatalogColumn::DataSize,
    CatalogColumn::DataOwnerName,
    CatalogColumn::DataOwnerZone,
    CatalogColumn::DataCreateTime,
    CatalogColumn::DataModifyTime,
];

/// Issues the listing queries behind the pager. Every query is auto-closed,
/// so no server cursor outlives a call.
#[derive(Clone)]
pub struct CollectionListing {
    executor: GenQueryExecutor,
    page_size: usize,
    home_zone: String,
    options: QueryOptions,
}

impl CollectionListing {
    pub fn new(executor: GenQueryExecutor, settings: &ClientSettings) -> Self {
        Self {
            executor,
            page_size: settings.max_rows,
            home_zone: settings.home_zone.clone(),
            options: settings.query_options(),
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Collections whose parent is `stat`, ordered by name, starting at the
    /// 0-based `offset`.
    pub async fn list_collections_under_path(
        &self,
        stat: &ObjectStat,
        offset: u64,
    ) -> Result<Vec<ListingEntry>, QueryError> {
        let parent = stat.canonical_path();
        let mut builder = QuerySpecBuilder::new()
            .add_selects(COLLECTION_COLUMNS)
            .add_condition(
                CatalogColumn::CollParentName,
                ConditionOperator::Equal,
                Literal::single(parent),
            )
            .add_order_by(CatalogColumn::CollName, OrderDir::Asc)
            .with_option(self.options);

        // The root collection is recorded as its own parent.
        if parent == ROOT_PATH {
            builder = builder.add_condition(
                CatalogColumn::CollName,
                ConditionOperator::NotEqual,
                Literal::single(ROOT_PATH),
            );
        }

        let spec = builder.build(self.page_size)?;
        let batch = self.run(&spec, stat, offset).await?;
        debug!(
            kind = %ListingKind::Collection,
            offset,
            rows = batch.len(),
            "Listed page"
        );

        (0..batch.len())
            .map(|row| collection_entry(&batch, row, stat))
            .collect()
    }

    /// Data objects in `stat`, ordered by name, starting at the 0-based
    /// `offset`.
    pub async fn list_data_objects_under_path(
        &self,
        stat: &ObjectStat,
        offset: u64,
    ) -> Result<Vec<ListingEntry>, QueryError> {
        let spec = QuerySpecBuilder::new()
            .add_selects(DATA_OBJECT_COLUMNS)
            .add_condition(
                CatalogColumn::CollName,
                ConditionOperator::Equal,
                Literal::single(stat.canonical_path()),
            )
            .add_order_by(CatalogColumn::DataName, OrderDir::Asc)
            .with_option(self.options)
            .build(self.page_size)?;

        let batch = self.run(&spec, stat, offset).await?;
        debug!(
            kind = %ListingKind::DataObject,
            offset,
            rows = batch.len(),
            "Listed page"
        );

        (0..batch.len())
            .map(|row| data_object_entry(&batch, row, stat))
            .collect()
    }

    /// Number of children of `kind` under `stat`, via a count aggregate.
    pub async fn count_under_path(
        &self,
        stat: &ObjectStat,
        kind: ListingKind,
    ) -> Result<u64, QueryError> {
        let (counted, parent_column) = match kind {
            ListingKind::Collection => (CatalogColumn::CollId, CatalogColumn::CollParentName),
            ListingKind::DataObject => (CatalogColumn::DataId, CatalogColumn::CollName),
        };

        let mut builder = QuerySpecBuilder::new()
            .add_select_aggregate(counted, Aggregate::Count)
            .add_condition(
                parent_column,
                ConditionOperator::Equal,
                Literal::single(stat.canonical_path()),
            );
        if kind == ListingKind::Collection && stat.canonical_path() == ROOT_PATH {
            builder = builder.add_condition(
                CatalogColumn::CollName,
                ConditionOperator::NotEqual,
                Literal::single(ROOT_PATH),
            );
        }

        let batch = self.run(&builder.build(1)?, stat, 0).await?;
        let count = match batch.rows().first().and_then(|row| row.get(0)) {
            Some(raw) => parse_number(raw, "count")?,
            None => 0,
        };

        debug!(kind = %kind, count, "Counted children");
        Ok(count)
    }

    async fn run(
        &self,
        spec: &QuerySpec,
        stat: &ObjectStat,
        offset: u64,
    ) -> Result<ResultBatch, QueryError> {
        let zone = self.zone_for(stat.canonical_path());
        self.executor
            .execute_spec(spec, offset, CloseBehavior::AutoClose, zone)
            .await
    }

    /// Paths outside the home zone are routed to the zone that owns them.
    fn zone_for<'a>(&self, path: &'a str) -> Option<&'a str> {
        zone_from_path(path).filter(|zone| *zone != self.home_zone)
    }
}

fn collection_entry(
    batch: &ResultBatch,
    row: usize,
    stat: &ObjectStat,
) -> Result<ListingEntry, QueryError> {
    let value = |column: CatalogColumn| batch.value(row, &column).unwrap_or_default();

    let mut entry = ListingEntry::new(
        ListingKind::Collection,
        &stat.absolute_path,
        leaf_name(value(CatalogColumn::CollName)),
    );
    entry.id = parse_number(value(CatalogColumn::CollId), "COLL_ID")?;
    entry.owner_name = value(CatalogColumn::CollOwnerName).to_string();
    entry.owner_zone = value(CatalogColumn::CollOwnerZone).to_string();
    entry.created_at = parse_catalog_timestamp(value(CatalogColumn::CollCreateTime));
    entry.modified_at = parse_catalog_timestamp(value(CatalogColumn::CollModifyTime));
    apply_paging(&mut entry, batch, row);
    Ok(entry)
}

fn data_object_entry(
    batch: &ResultBatch,
    row: usize,
    stat: &ObjectStat,
) -> Result<ListingEntry, QueryError> {
    let value = |column: CatalogColumn| batch.value(row, &column).unwrap_or_default();

    let mut entry = ListingEntry::new(
        ListingKind::DataObject,
        &stat.absolute_path,
        value(CatalogColumn::DataName),
    );
    entry.id = parse_number(value(CatalogColumn::DataId), "D_DATA_ID")?;
    entry.data_size = parse_number(value(CatalogColumn::DataSize), "DATA_SIZE")?;
    entry.owner_name = value(CatalogColumn::DataOwnerName).to_string();
    entry.owner_zone = value(CatalogColumn::DataOwnerZone).to_string();
    entry.created_at = parse_catalog_timestamp(value(CatalogColumn::DataCreateTime));
    entry.modified_at = parse_catalog_timestamp(value(CatalogColumn::DataModifyTime));
    apply_paging(&mut entry, batch, row);
    Ok(entry)
}

fn apply_paging(entry: &mut ListingEntry, batch: &ResultBatch, row: usize) {
    if let Some(result_row) = batch.rows().get(row) {
        entry.row_count_so_far = result_row.row_count_so_far;
        entry.is_last_row_overall = result_row.is_last_row_overall;
        entry.total_records = result_row.total_records;
    }
}

fn parse_number(raw: &str, column: &str) -> Result<u64, QueryError> {
    if raw.is_empty() {
        return Ok(0);
    }
    raw.trim().parse::<u64>().map_err(|_| {
        ExecutionError::MalformedResponse(format!("{column} is not a number: '{raw}'")).into()
    })
}
