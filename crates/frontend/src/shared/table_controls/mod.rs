//! Table controls: the state and derived props every list page is built on.
//!
//! A list page declares a [`TableControlConfig`] (columns, filter categories,
//! sortable columns, feature flags), gets a [`TableControlsHandle`] from
//! [`use_table_control_state`], turns the state into [`HubRequestParams`] for
//! the fetch, and renders from the helpers returned by
//! [`derive_table_controls`] / [`derive_local_table_controls`].
//!
//! Everything except `handle` is plain synchronous Rust with no browser access,
//! so it is unit-tested natively.
//!
//! [`HubRequestParams`]: contracts::shared::hub::HubRequestParams

pub mod columns;
pub mod config;
pub mod expansion;
pub mod filter;
pub mod handle;
pub mod hub_request_params;
pub mod pagination;
pub mod persistence;
pub mod props;
pub mod sort;
pub mod state;

pub use columns::ColumnState;
pub use config::{
    ColumnDef, ExpandableVariant, ItemAccessors, PersistTarget, TableControlConfig,
};
pub use expansion::ExpansionState;
pub use filter::{
    FilterCategory, FilterChip, FilterSelectOption, FilterType, FilterValue,
    FILTER_TEXT_CATEGORY_KEY,
};
pub use handle::{use_hub_table, use_local_table, use_table_control_state, TableControlsHandle};
pub use hub_request_params::{
    get_hub_request_params, query_key, serialize_filters_for_hub, serialize_request_params_for_hub,
    to_query_string,
};
pub use pagination::{PageState, PaginationProps};
pub use props::{
    derive_local_table_controls, derive_table_controls, th_props, AriaSort, CompoundExpandProps,
    DerivationInput, RowProps, SnapshotRow, TableControls, TableSnapshot, TableSummary, TdProps,
    ThProps,
};
pub use sort::{ActiveSort, SortValue};
pub use state::TableControlState;

use thiserror::Error;

/// Misuse of a table's setters against its configuration
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableControlError {
    #[error("{0} is not enabled for this table")]
    FeatureDisabled(&'static str),

    #[error("Unknown filter category: {0}")]
    UnknownFilterCategory(String),

    #[error("Filter category {category} does not accept a {kind} value")]
    FilterKindMismatch { category: String, kind: &'static str },

    #[error("Invalid filter value for {0}")]
    InvalidFilterValue(String),

    #[error("Unknown column: {0}")]
    UnknownColumn(String),

    #[error("Column {0} is not sortable")]
    NotSortable(String),

    #[error("At least one column must stay visible")]
    LastVisibleColumn,

    #[error("Page size must be greater than zero")]
    ZeroPageSize,

    #[error("Page {0} is out of range")]
    PageOutOfRange(usize),
}
