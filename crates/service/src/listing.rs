//! Shared list parameters and query helpers.
//!
//! Every list endpoint takes the same search / sort / window parameters.
//! Query-string names are accepted in camelCase and PascalCase.

use sea_orm::sea_query::{BinOper, Expr, Func, SimpleExpr};
use sea_orm::{ColumnTrait, Condition, QuerySelect};
use serde::{Deserialize, Deserializer};

/// Largest `LIMIT`/`OFFSET` accepted by both postgres (`bigint`) and sqlite.
pub const MAX_TAKE: u64 = i64::MAX as u64;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
    #[serde(default, alias = "SearchText")]
    pub search_text: Option<String>,
    #[serde(default, alias = "SortBy")]
    pub sort_by: Option<String>,
    #[serde(default, alias = "Skip", deserialize_with = "empty_as_none")]
    pub skip: Option<u64>,
    #[serde(default, alias = "Take", deserialize_with = "empty_as_none")]
    pub take: Option<u64>,
}

impl ListParams {
    /// Search text when present and non-empty.
    pub fn search(&self) -> Option<&str> {
        self.search_text.as_deref().filter(|s| !s.is_empty())
    }

    pub fn sort<K: SortKey>(&self) -> Option<K> {
        self.sort_by.as_deref().and_then(K::parse)
    }
}

/// Numeric query values where an empty string means "not given".
fn empty_as_none<'de, D>(de: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(de)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => s
            .parse::<u64>()
            .map(Some)
            .map_err(|_| serde::de::Error::custom(format!("expected a non-negative integer, got {s:?}"))),
    }
}

/// Sortable fields of one resource.
pub trait SortKey: Sized + Copy + 'static {
    const ALL: &'static [Self];

    /// Field name as accepted in `sortBy` and shown in table headers.
    fn name(&self) -> &'static str;

    fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        Self::ALL.iter().copied().find(|k| k.name().eq_ignore_ascii_case(raw))
    }
}

/// `lower(col) LIKE lower('%text%') ESCAPE '\'`.
///
/// Both sides are folded by the database so case handling follows its
/// `lower()`; LIKE metacharacters in `text` match literally.
pub fn contains_ci<C: ColumnTrait>(col: C, text: &str) -> SimpleExpr {
    let pattern = SimpleExpr::Binary(
        Box::new(Func::lower(Expr::val(like_pattern(text))).into()),
        BinOper::Escape,
        Box::new(SimpleExpr::Constant('\\'.into())),
    );
    Expr::expr(Func::lower(Expr::col((col.entity_name(), col)))).binary(BinOper::Like, pattern)
}

fn like_pattern(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len() + 2);
    escaped.push('%');
    for ch in text.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped.push('%');
    escaped
}

/// Match `text` against any of `cols`.
pub fn search_any<C: ColumnTrait>(cols: &[C], text: &str) -> Condition {
    cols.iter()
        .fold(Condition::any(), |cond, col| cond.add(contains_ci(*col, text)))
}

/// Apply skip/take. Skip defaults to 0 and take to unlimited; both are
/// capped at [`MAX_TAKE`].
pub fn window<Q: QuerySelect>(query: Q, params: &ListParams) -> Q {
    let skip = params.skip.unwrap_or(0).min(MAX_TAKE);
    let take = params.take.map(|t| t.min(MAX_TAKE));
    match (skip, take) {
        (0, None) => query,
        (0, Some(take)) => query.limit(take),
        // sqlite rejects OFFSET without LIMIT
        (skip, take) => query.offset(skip).limit(take.unwrap_or(MAX_TAKE)),
    }
}
