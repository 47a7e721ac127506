//! JSON/XML selection for the customers list.
//!
//! `format=xml` (or `format=json`) in the query string wins; otherwise an
//! `Accept` header naming XML but not JSON selects XML. JSON is the default.

use axum::http::{header, HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use service::customers::CustomerListItem;

use crate::errors::JsonApiError;

pub const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="utf-8"?>"#;

const XML_ROOT: &str = "ArrayOfCustomersListQueryResponse";
const XSI_NS: &str = "http://www.w3.org/2001/XMLSchema-instance";
const XSD_NS: &str = "http://www.w3.org/2001/XMLSchema";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResponseFormat {
    Json,
    Xml,
}

#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct FormatParam {
    /// `xml` or `json`
    #[serde(default, alias = "Format")]
    pub format: Option<String>,
}

impl ResponseFormat {
    pub fn select(param: &FormatParam, headers: &HeaderMap) -> Self {
        match param.format.as_deref().map(str::trim) {
            Some(f) if f.eq_ignore_ascii_case("xml") => return ResponseFormat::Xml,
            Some(f) if f.eq_ignore_ascii_case("json") => return ResponseFormat::Json,
            _ => {}
        }
        let accept = headers
            .get(header::ACCEPT)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();
        let wants_xml = accept.contains("application/xml") || accept.contains("text/xml");
        if wants_xml && !accept.contains("application/json") {
            ResponseFormat::Xml
        } else {
            ResponseFormat::Json
        }
    }
}

#[derive(Serialize)]
struct CustomersXml<'a> {
    #[serde(rename = "@xmlns:xsi")]
    xsi: &'static str,
    #[serde(rename = "@xmlns:xsd")]
    xsd: &'static str,
    #[serde(rename = "CustomersListQueryResponse")]
    customers: Vec<CustomerXml<'a>>,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct CustomerXml<'a> {
    id: i32,
    name: &'a str,
    address: &'a str,
    email: &'a str,
    phone: &'a str,
    iban: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    customer_category: Option<CategoryXml<'a>>,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct CategoryXml<'a> {
    code: &'a str,
    description: &'a str,
}

/// `<ArrayOfCustomersListQueryResponse><CustomersListQueryResponse><Id>..</Id>...`
/// with declaration and the XML schema namespaces on the root.
pub fn customers_to_xml(items: &[CustomerListItem]) -> Result<String, JsonApiError> {
    let doc = CustomersXml {
        xsi: XSI_NS,
        xsd: XSD_NS,
        customers: items
            .iter()
            .map(|c| CustomerXml {
                id: c.id,
                name: &c.name,
                address: &c.address,
                email: &c.email,
                phone: &c.phone,
                iban: &c.iban,
                customer_category: c.customer_category.as_ref().map(|cat| CategoryXml {
                    code: &cat.code,
                    description: &cat.description,
                }),
            })
            .collect(),
    };
    let body = quick_xml::se::to_string_with_root(XML_ROOT, &doc)
        .map_err(|e| JsonApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "XML Export Failed", Some(e.to_string())))?;
    Ok(format!("{XML_DECLARATION}{body}"))
}

pub struct Xml(pub String);

impl IntoResponse for Xml {
    fn into_response(self) -> Response {
        (
            [(header::CONTENT_TYPE, HeaderValue::from_static("application/xml; charset=utf-8"))],
            self.0,
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use service::lookup::CodeDescription;

    fn item(id: i32, name: &str, category: Option<(&str, &str)>) -> CustomerListItem {
        CustomerListItem {
            id,
            name: name.into(),
            address: "Main St 1".into(),
            email: format!("{}@example.test", name.to_lowercase()),
            phone: "555".into(),
            iban: "IT00".into(),
            customer_category: category.map(|(code, description)| CodeDescription {
                code: code.into(),
                description: description.into(),
            }),
        }
    }

    fn headers(accept: &str) -> HeaderMap {
        let mut h = HeaderMap::new();
        h.insert(header::ACCEPT, HeaderValue::from_str(accept).unwrap());
        h
    }

    #[test]
    fn format_param_beats_accept_header() {
        let p = FormatParam { format: Some("XML".into()) };
        assert_eq!(ResponseFormat::select(&p, &headers("application/json")), ResponseFormat::Xml);
        let p = FormatParam { format: Some("json".into()) };
        assert_eq!(ResponseFormat::select(&p, &headers("application/xml")), ResponseFormat::Json);
    }

    #[test]
    fn accept_header_selects_xml_only_without_json() {
        let none = FormatParam::default();
        assert_eq!(ResponseFormat::select(&none, &headers("application/xml")), ResponseFormat::Xml);
        assert_eq!(ResponseFormat::select(&none, &headers("application/json, application/xml")), ResponseFormat::Json);
        assert_eq!(ResponseFormat::select(&none, &HeaderMap::new()), ResponseFormat::Json);
    }

    #[test]
    fn xml_uses_pascal_case_elements_and_omits_missing_category() {
        let xml = customers_to_xml(&[item(1, "Acme", Some(("GOLD", "Gold"))), item(2, "Globex", None)]).unwrap();
        assert!(xml.starts_with(XML_DECLARATION));
        assert!(xml.contains(r#"<ArrayOfCustomersListQueryResponse xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" xmlns:xsd="http://www.w3.org/2001/XMLSchema">"#));
        assert!(xml.contains("<CustomersListQueryResponse><Id>1</Id><Name>Acme</Name>"));
        assert!(xml.ends_with("</ArrayOfCustomersListQueryResponse>"));
        assert!(xml.contains("<CustomerCategory><Code>GOLD</Code><Description>Gold</Description></CustomerCategory>"));
        let globex = &xml[xml.find("<Id>2</Id>").unwrap()..];
        assert!(!globex.contains("<CustomerCategory>"));
    }

    #[test]
    fn empty_list_still_has_root() {
        let xml = customers_to_xml(&[]).unwrap();
        assert!(xml.starts_with(&format!("{XML_DECLARATION}<ArrayOfCustomersListQueryResponse ")));
        assert!(!xml.contains("<CustomersListQueryResponse>"));
    }

    #[test]
    fn xml_escapes_markup_in_values() {
        let xml = customers_to_xml(&[item(7, "Smith & <Sons>", None)]).unwrap();
        assert!(xml.contains("<Name>Smith &amp; &lt;Sons"));
        assert!(!xml.contains("<Sons>"));
    }
}
