//! Server-rendered list tables.
//!
//! Pages are Handlebars templates; `{{ }}` output is HTML-escaped by the
//! engine. Sortable headers link back to the same page with `sortBy` set and
//! the pager moves `skip` by one page of `take` rows.

use handlebars::{Handlebars, RenderError, TemplateError};
use serde::Serialize;
use service::ListParams;
use url::form_urlencoded;

const HEAD: &str = r#"<!DOCTYPE html>
<html><head><meta charset="utf-8"><title>{{title}}</title><style>
body{font-family:sans-serif;margin:2rem}
h1{text-align:center}
table{border-collapse:collapse;width:100%}
th{background:#42a5f5;color:#fff;text-align:left}
th a{color:#fff}
th,td{padding:.4rem .6rem;border-bottom:1px solid #ddd}
nav a,.pager a{margin-right:1rem}
</style></head><body><nav><a href="/customers">Customers</a><a href="/employees">Employees</a><a href="/suppliers">Suppliers</a></nav>
"#;

const FOOT: &str = "</body></html>\n";

const INDEX: &str = r#"{{> head}}<h1>{{title}}</h1>
<ul><li><a href="/customers">Customers</a></li><li><a href="/employees">Employees</a></li><li><a href="/suppliers">Suppliers</a></li></ul>
{{> foot}}"#;

const ERROR: &str = r#"{{> head}}<h1>{{title}}</h1><p>{{detail}}</p>
{{> foot}}"#;

const TABLE: &str = r#"{{> head}}<h1>{{title}}</h1>
<form method="get" action="{{path}}"><input type="search" name="searchText" value="{{search}}" placeholder="Search">{{#each hidden}}<input type="hidden" name="{{name}}" value="{{value}}">{{/each}}<button type="submit">Search</button></form>
<table><thead><tr>{{#each headers}}<th>{{#if href}}<a href="{{href}}">{{label}}</a>{{else}}{{label}}{{/if}}</th>{{/each}}</tr></thead>
<tbody>{{#each rows}}<tr>{{#each this}}<td>{{this}}</td>{{/each}}</tr>{{/each}}</tbody></table>
<div class="pager">{{#if pager.previous}}<a href="{{pager.previous}}">Previous</a>{{/if}}<span>{{pager.label}}</span>{{#if pager.next}}<a href="{{pager.next}}">Next</a>{{/if}}</div>
{{> foot}}"#;

pub struct Column {
    pub label: &'static str,
    /// `sortBy` value when the column is sortable.
    pub sort: Option<&'static str>,
}

impl Column {
    pub const fn plain(label: &'static str) -> Self {
        Self { label, sort: None }
    }

    pub const fn sortable(label: &'static str, sort: &'static str) -> Self {
        Self { label, sort: Some(sort) }
    }
}

pub struct TablePage<'a> {
    pub title: &'a str,
    pub path: &'a str,
    pub columns: &'a [Column],
    pub rows: Vec<Vec<String>>,
    pub params: &'a ListParams,
    /// Filters beyond `ListParams` that every link and the search form carry.
    pub extra: Vec<(&'static str, String)>,
}

#[derive(Serialize)]
struct Message<'a> {
    title: &'a str,
    detail: &'a str,
}

#[derive(Serialize)]
struct TableView<'a> {
    title: &'a str,
    path: &'a str,
    search: &'a str,
    hidden: Vec<Hidden<'a>>,
    headers: Vec<Header>,
    rows: &'a [Vec<String>],
    pager: Pager,
}

#[derive(Serialize)]
struct Hidden<'a> {
    name: &'a str,
    value: String,
}

#[derive(Serialize)]
struct Header {
    label: &'static str,
    href: Option<String>,
}

#[derive(Serialize)]
struct Pager {
    previous: Option<String>,
    label: String,
    next: Option<String>,
}

/// Compiled page templates.
pub struct Pages {
    handlebars: Handlebars<'static>,
}

impl Pages {
    pub fn new() -> Result<Self, TemplateError> {
        let mut handlebars = Handlebars::new();
        handlebars.set_strict_mode(false);
        handlebars.register_partial("head", HEAD)?;
        handlebars.register_partial("foot", FOOT)?;
        handlebars.register_template_string("index", INDEX)?;
        handlebars.register_template_string("error", ERROR)?;
        handlebars.register_template_string("table", TABLE)?;
        Ok(Self { handlebars })
    }

    pub fn index(&self) -> Result<String, RenderError> {
        self.handlebars.render("index", &Message { title: "Backoffice", detail: "" })
    }

    pub fn error(&self, title: &str, detail: &str) -> Result<String, RenderError> {
        self.handlebars.render("error", &Message { title, detail })
    }

    pub fn table(&self, page: &TablePage<'_>) -> Result<String, RenderError> {
        self.handlebars.render("table", &page.view())
    }
}

/// Query string for `extra` then `params`, leaving out unset values.
pub fn query_string(params: &ListParams, extra: &[(&'static str, String)]) -> String {
    let mut qs = form_urlencoded::Serializer::new(String::new());
    for (name, value) in extra.iter().filter(|(_, v)| !v.is_empty()) {
        qs.append_pair(name, value);
    }
    if let Some(s) = params.search() {
        qs.append_pair("searchText", s);
    }
    if let Some(s) = params.sort_by.as_deref().filter(|s| !s.is_empty()) {
        qs.append_pair("sortBy", s);
    }
    if let Some(skip) = params.skip.filter(|s| *s > 0) {
        qs.append_pair("skip", &skip.to_string());
    }
    if let Some(take) = params.take {
        qs.append_pair("take", &take.to_string());
    }
    qs.finish()
}

impl TablePage<'_> {
    fn href(&self, params: &ListParams) -> String {
        let qs = query_string(params, &self.extra);
        if qs.is_empty() {
            self.path.to_string()
        } else {
            format!("{}?{qs}", self.path)
        }
    }

    fn view(&self) -> TableView<'_> {
        let mut hidden: Vec<Hidden<'_>> = self
            .extra
            .iter()
            .filter(|(_, v)| !v.is_empty())
            .map(|(name, value)| Hidden { name: *name, value: value.clone() })
            .collect();
        if let Some(sort) = self.params.sort_by.as_deref().filter(|s| !s.is_empty()) {
            hidden.push(Hidden { name: "sortBy", value: sort.to_string() });
        }
        if let Some(take) = self.params.take {
            hidden.push(Hidden { name: "take", value: take.to_string() });
        }

        let headers = self
            .columns
            .iter()
            .map(|col| Header {
                label: col.label,
                href: col.sort.map(|sort| {
                    self.href(&ListParams { sort_by: Some(sort.to_string()), skip: None, ..self.params.clone() })
                }),
            })
            .collect();

        TableView {
            title: self.title,
            path: self.path,
            search: self.params.search().unwrap_or_default(),
            hidden,
            headers,
            rows: &self.rows,
            pager: self.pager(),
        }
    }

    fn pager(&self) -> Pager {
        let skip = self.params.skip.unwrap_or(0);
        let shown = self.rows.len() as u64;
        let Some(take) = self.params.take.filter(|t| *t > 0) else {
            return Pager { previous: None, label: format!("{shown} rows"), next: None };
        };
        let previous = (skip > 0)
            .then(|| self.href(&ListParams { skip: Some(skip.saturating_sub(take)), ..self.params.clone() }));
        let next = (shown == take)
            .then(|| self.href(&ListParams { skip: Some(skip.saturating_add(take)), ..self.params.clone() }));
        let label = if shown == 0 { "No rows".to_string() } else { format!("Rows {}-{}", skip.saturating_add(1), skip.saturating_add(shown)) };
        Pager { previous, label, next }
    }
}
