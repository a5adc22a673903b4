//! An in-memory catalog server. It answers general queries the way a real
//! server does (offsets, totals on request, terminal-row flags, cursors
//! for queries that are not auto-closed) and resolves paths to object stats.

use async_trait::async_trait;
use connectors::{
    error::{ResolveError, TransportError},
    protocol::{
        message::{ApiRequest, ApiResponse, CAT_NO_ROWS_FOUND, GenQueryInp, GenQueryOut, SqlResult},
        transport::{CatalogTransport, PathResolver},
    },
};
use model::{
    catalog::object_stat::{ObjectStat, SpecialType},
    core::utils::{join_path, parent_path},
    listing::entry::ListingKind,
    records::batch::TerminalRowFlags,
};
use planner::query::{
    ast::{
        operator::{Aggregate, ConditionOperator, Literal, OrderDir},
        options::QueryOptions,
    },
    renderer::literal::parse_predicate,
    translator::WireCondition,
};
use std::{
    cmp::Ordering,
    collections::{BTreeMap, HashMap, HashSet},
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

pub const HOME_ZONE: &str = "tempZone";
pub const OWNER: &str = "rods";

/// Status the mock returns for a cursor it does not know.
pub const UNKNOWN_CURSOR: i32 = -130_000;

/// Status the mock returns for condition operators it does not evaluate.
pub const UNSUPPORTED_CONDITION: i32 = -816_000;

const CREATE_TIME: &str = "01700000000";
const MODIFY_TIME: &str = "01700000100";

type Attributes = HashMap<u32, String>;

#[derive(Debug, Clone)]
struct MockDataObject {
    parent: String,
    name: String,
    id: u64,
    size: u64,
}

#[derive(Default)]
struct CatalogState {
    /// Collection path to id.
    collections: BTreeMap<String, u64>,
    data_objects: Vec<MockDataObject>,
    /// Linked collection path to its target.
    links: HashMap<String, String>,
    omit_terminal_flags: bool,
    /// Queries for this kind of child fail at the transport.
    failing: Option<ListingKind>,
    requests: Vec<GenQueryInp>,
    open_cursors: HashSet<u64>,
    next_cursor: u64,
    next_id: u64,
}

/// Cheap to clone: clones share one catalog, so a test can keep a handle
/// for assertions after giving one to the client.
#[derive(Clone, Default)]
pub struct MockCatalog {
    state: Arc<Mutex<CatalogState>>,
}

impl MockCatalog {
    /// A catalog holding the root collection, the home zone and its `home`
    /// collection.
    pub fn new() -> Self {
        let catalog = Self::default();
        {
            let mut state = catalog.state();
            state.next_id = 10_000;
            state.next_cursor = 1;
        }
        catalog
            .with_collection("/")
            .with_collection(&format!("/{HOME_ZONE}"))
            .with_collection(&format!("/{HOME_ZONE}/home"))
    }

    pub fn with_collection(self, path: &str) -> Self {
        {
            let mut state = self.state();
            let id = state.allocate_id();
            state.collections.insert(path.to_string(), id);
        }
        self
    }

    /// Adds `count` sub-collections `name_prefix{i}` under `parent`.
    pub fn with_collections(self, parent: &str, name_prefix: &str, count: usize) -> Self {
        (0..count).fold(self, |catalog, i| {
            catalog.with_collection(&join_path(parent, &format!("{name_prefix}{i:03}")))
        })
    }

    pub fn with_data_object(self, parent: &str, name: &str, size: u64) -> Self {
        {
            let mut state = self.state();
            let id = state.allocate_id();
            state.data_objects.push(MockDataObject {
                parent: parent.to_string(),
                name: name.to_string(),
                id,
                size,
            });
        }
        self
    }

    /// Adds `count` data objects `name_prefix{i}.dat` under `parent`.
    pub fn with_data_objects(self, parent: &str, name_prefix: &str, count: usize) -> Self {
        (0..count).fold(self, |catalog, i| {
            catalog.with_data_object(parent, &format!("{name_prefix}{i:03}.dat"), 100 + i as u64)
        })
    }

    /// Registers `path` as a linked collection pointing at `target`.
    pub fn with_link(self, path: &str, target: &str) -> Self {
        self.state()
            .links
            .insert(path.to_string(), target.to_string());
        self
    }

    /// Drops the terminal-row flags from every response, as servers that do
    /// not report paging metadata do.
    pub fn without_terminal_flags(self) -> Self {
        self.state().omit_terminal_flags = true;
        self
    }

    /// Makes every query for children of `kind` fail until
    /// [`recover`](Self::recover) is called. Takes `&self` so a test can
    /// flip it through its handle while the client holds a clone.
    pub fn fail_queries_for(&self, kind: ListingKind) {
        self.state().failing = Some(kind);
    }

    pub fn recover(&self) {
        self.state().failing = None;
    }

    pub fn requests(&self) -> Vec<GenQueryInp> {
        self.state().requests.clone()
    }

    pub fn request_count(&self) -> usize {
        self.state().requests.len()
    }

    /// Count-aggregate queries issued for children of `kind`.
    pub fn count_queries(&self, kind: ListingKind) -> usize {
        self.state()
            .requests
            .iter()
            .filter(|r| is_count_query(r) && query_kind(r) == kind)
            .count()
    }

    /// Row queries issued for children of `kind`, cursor closes excluded.
    pub fn page_queries(&self, kind: ListingKind) -> usize {
        self.state()
            .requests
            .iter()
            .filter(|r| r.max_rows > 0 && !is_count_query(r) && query_kind(r) == kind)
            .count()
    }

    pub fn open_cursors(&self) -> usize {
        self.state().open_cursors.len()
    }

    fn state(&self) -> MutexGuard<'_, CatalogState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl CatalogState {
    fn allocate_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    fn answer(&mut self, inp: &GenQueryInp) -> ApiResponse {
        if inp.max_rows == 0 {
            return if self.open_cursors.remove(&inp.continue_index) {
                ApiResponse::GenQuery(GenQueryOut::default())
            } else {
                unknown_cursor(inp.continue_index)
            };
        }
        if inp.continue_index != 0 && !self.open_cursors.remove(&inp.continue_index) {
            return unknown_cursor(inp.continue_index);
        }

        let mut matched = Vec::new();
        for attributes in self.candidates(query_kind(inp)) {
            match matches_all(&attributes, &inp.conditions) {
                Ok(true) => matched.push(attributes),
                Ok(false) => {}
                Err(response) => return response,
            }
        }

        if is_count_query(inp) {
            return self.respond(inp, vec![vec![matched.len().to_string()]], 0, 1);
        }

        sort_rows(&mut matched, inp);
        let total = matched.len();
        let start = inp.partial_start_index as usize;
        let page = matched
            .iter()
            .skip(start)
            .take(inp.max_rows)
            .map(|attributes| {
                inp.selects
                    .iter()
                    .map(|s| attributes.get(&s.column_id).cloned().unwrap_or_default())
                    .collect()
            })
            .collect::<Vec<Vec<String>>>();

        self.respond(inp, page, start, total)
    }

    fn respond(
        &mut self,
        inp: &GenQueryInp,
        rows: Vec<Vec<String>>,
        start: usize,
        total: usize,
    ) -> ApiResponse {
        if rows.is_empty() {
            return ApiResponse::Error {
                code: CAT_NO_ROWS_FOUND,
                message: "CAT_NO_ROWS_FOUND".to_string(),
            };
        }

        let so_far = start + rows.len();
        let is_last = so_far >= total;
        let reported_total = if inp.options.contains(QueryOptions::RETURN_TOTAL_ROW_COUNT) {
            total as u64
        } else {
            0
        };

        let continue_index = if inp.options.contains(QueryOptions::AUTO_CLOSE) || is_last {
            0
        } else {
            let cursor = self.next_cursor;
            self.next_cursor += 1;
            self.open_cursors.insert(cursor);
            cursor
        };

        let sql_results = inp
            .selects
            .iter()
            .enumerate()
            .map(|(position, select)| SqlResult {
                attribute_index: select.column_id,
                values: rows.iter().map(|row| row[position].clone()).collect(),
            })
            .collect::<Vec<_>>();

        ApiResponse::GenQuery(GenQueryOut {
            row_count: rows.len(),
            attribute_count: sql_results.len(),
            continue_index,
            total_row_count: reported_total,
            sql_results,
            terminal_row: (!self.omit_terminal_flags).then_some(TerminalRowFlags {
                row_count_so_far: so_far as u64,
                total_records: reported_total,
                is_last_row_overall: is_last,
            }),
        })
    }

    fn candidates(&self, kind: ListingKind) -> Vec<Attributes> {
        match kind {
            ListingKind::Collection => self
                .collections
                .iter()
                .map(|(path, id)| {
                    HashMap::from([
                        (500, id.to_string()),
                        (501, path.clone()),
                        (502, parent_path(path).to_string()),
                        (503, OWNER.to_string()),
                        (504, HOME_ZONE.to_string()),
                        (508, CREATE_TIME.to_string()),
                        (509, MODIFY_TIME.to_string()),
                    ])
                })
                .collect(),
            ListingKind::DataObject => self
                .data_objects
                .iter()
                .map(|object| {
                    HashMap::from([
                        (401, object.id.to_string()),
                        (403, object.name.clone()),
                        (407, object.size.to_string()),
                        (411, OWNER.to_string()),
                        (412, HOME_ZONE.to_string()),
                        (419, CREATE_TIME.to_string()),
                        (420, MODIFY_TIME.to_string()),
                        (501, object.parent.clone()),
                    ])
                })
                .collect(),
        }
    }

    fn resolve(&self, path: &str) -> Option<ObjectStat> {
        if let Some(target) = self.links.get(path) {
            let mut stat = ObjectStat::collection(path);
            stat.special_type = SpecialType::LinkedCollection;
            stat.object_path = target.clone();
            return Some(stat);
        }
        if let Some(id) = self.collections.get(path) {
            let mut stat = ObjectStat::collection(path);
            stat.id = *id;
            stat.owner_name = OWNER.to_string();
            stat.owner_zone = HOME_ZONE.to_string();
            return Some(stat);
        }
        self.data_objects
            .iter()
            .find(|object| join_path(&object.parent, &object.name) == path)
            .map(|object| {
                let mut stat = ObjectStat::data_object(path, object.size);
                stat.id = object.id;
                stat
            })
    }
}

#[async_trait]
impl CatalogTransport for MockCatalog {
    async fn send_and_receive(
        &mut self,
        request: ApiRequest,
    ) -> Result<ApiResponse, TransportError> {
        let ApiRequest::GenQuery(inp) = request;
        let mut state = self.state();
        if state.failing == Some(query_kind(&inp)) {
            return Err(TransportError::ConnectionClosed);
        }
        let response = state.answer(&inp);
        state.requests.push(inp);
        Ok(response)
    }
}

#[async_trait]
impl PathResolver for MockCatalog {
    async fn resolve_object_stat(&self, path: &str) -> Result<ObjectStat, ResolveError> {
        self.state()
            .resolve(path)
            .ok_or_else(|| ResolveError::NotFound(path.to_string()))
    }
}

fn query_kind(inp: &GenQueryInp) -> ListingKind {
    match inp.selects.first().map(|s| s.column_id) {
        Some(id) if (500..600).contains(&id) => ListingKind::Collection,
        _ => ListingKind::DataObject,
    }
}

fn is_count_query(inp: &GenQueryInp) -> bool {
    inp.selects
        .iter()
        .any(|s| s.select_flag == Aggregate::Count.select_flag())
}

fn matches_all(attributes: &Attributes, conditions: &[WireCondition]) -> Result<bool, ApiResponse> {
    for condition in conditions {
        let value = attributes
            .get(&condition.column_id)
            .map(String::as_str)
            .unwrap_or_default();
        let (operator, literal) = parse_predicate(&condition.predicate).map_err(|err| {
            ApiResponse::Error {
                code: UNSUPPORTED_CONDITION,
                message: err.to_string(),
            }
        })?;

        let matched = match (operator, &literal) {
            (ConditionOperator::Equal, Literal::Single(expected)) => value == expected,
            (ConditionOperator::NotEqual, Literal::Single(expected)) => value != expected,
            (ConditionOperator::Like, Literal::Single(pattern)) => like(value, pattern),
            (ConditionOperator::In, Literal::List(values)) => values.iter().any(|v| v == value),
            _ => {
                return Err(ApiResponse::Error {
                    code: UNSUPPORTED_CONDITION,
                    message: format!("mock cannot evaluate {operator}"),
                });
            }
        };
        if !matched {
            return Ok(false);
        }
    }
    Ok(true)
}

/// `%` wildcards at either end only.
fn like(value: &str, pattern: &str) -> bool {
    match (pattern.strip_prefix('%'), pattern.strip_suffix('%')) {
        (Some(rest), _) if rest.ends_with('%') => value.contains(&rest[..rest.len() - 1]),
        (Some(suffix), _) => value.ends_with(suffix),
        (None, Some(prefix)) => value.starts_with(prefix),
        (None, None) => value == pattern,
    }
}

fn sort_rows(rows: &mut [Attributes], inp: &GenQueryInp) {
    rows.sort_by(|a, b| {
        inp.order_by
            .iter()
            .map(|order| {
                let ordering = a.get(&order.column_id).cmp(&b.get(&order.column_id));
                match order.direction {
                    OrderDir::Asc => ordering,
                    OrderDir::Desc => ordering.reverse(),
                }
            })
            .find(|ordering| *ordering != Ordering::Equal)
            .unwrap_or(Ordering::Equal)
    });
}

fn unknown_cursor(index: u64) -> ApiResponse {
    ApiResponse::Error {
        code: UNKNOWN_CURSOR,
        message: format!("no open cursor {index}"),
    }
}
