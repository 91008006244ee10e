//! XML-RPC `methodResponse` parsing.
//!
//! Every response carries a status envelope (`code`, `msg`, `runtime`);
//! record-listing calls additionally carry a `resData.record` array of
//! per-record structs. Parsing is a stateless, single-shot transformation
//! over an already-materialized body; a fresh document is parsed per call.
//!
//! The parser is deliberately lenient about *missing* envelope members
//! (absent `code` reads as 0, absent `msg` as the empty string) but strict
//! about documents that do not parse at all, and about record entries whose
//! `type` is not a known DNS record type.

use roxmltree::{Document, Node};

use dyninwx_core::error::{Error, Result};
use dyninwx_core::types::{NameServerRecord, RecordId, RecordType};

/// Status envelope present in every API response
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
    /// API result code; 1000 is the provider's success code
    pub code: i64,
    /// Human-readable result message
    pub message: String,
    /// Server-side processing time in seconds
    pub runtime_seconds: f64,
}

impl Envelope {
    /// Result code the API uses for a completed command
    pub const SUCCESS_CODE: i64 = 1000;

    pub fn is_success(&self) -> bool {
        self.code == Self::SUCCESS_CODE
    }
}

/// Parse the status envelope out of a response body.
///
/// The document is parsed with DOCTYPE declarations rejected, so hostile
/// responses cannot smuggle entity expansions. Malformed XML yields
/// [`Error::ParseFailure`]; a well-formed document merely missing the
/// expected members yields default values instead.
pub fn parse_envelope(xml: &str) -> Result<Envelope> {
    let document = Document::parse(xml).map_err(Error::parse_failure)?;
    Ok(extract_envelope(&document))
}

/// Parse the envelope plus the `resData.record` array of a listing call.
///
/// Records whose `id` is the sentinel 0 are dropped silently. A record
/// with an unknown `type` fails the whole call; no partial record lists
/// are produced.
pub fn parse_record_list(xml: &str) -> Result<(Envelope, Vec<NameServerRecord>)> {
    let document = Document::parse(xml).map_err(Error::parse_failure)?;
    let envelope = extract_envelope(&document);

    let mut records = Vec::new();
    if let Some(data) = record_array_data(&document) {
        for value in data
            .children()
            .filter(|child| child.is_element() && child.has_tag_name("value"))
        {
            let Some(record_struct) = child_element(value, "struct") else {
                continue;
            };
            if let Some(record) = extract_record(record_struct)? {
                records.push(record);
            }
        }
    }

    Ok((envelope, records))
}

fn extract_envelope(document: &Document) -> Envelope {
    let status = response_struct(document);

    Envelope {
        code: status
            .and_then(|node| member_value_text(node, "code"))
            .and_then(|text| text.trim().parse().ok())
            .unwrap_or(0),
        message: status
            .and_then(|node| member_value_text(node, "msg"))
            .map(|text| text.trim().to_string())
            .unwrap_or_default(),
        runtime_seconds: status
            .and_then(|node| member_value_text(node, "runtime"))
            .and_then(|text| text.trim().parse().ok())
            .unwrap_or(0.0),
    }
}

fn extract_record(record: Node<'_, '_>) -> Result<Option<NameServerRecord>> {
    let id = RecordId(
        member_value_text(record, "id")
            .and_then(|text| text.trim().parse().ok())
            .unwrap_or(0),
    );

    // Sentinel entries are treated as absent, not as errors.
    if id.is_sentinel() {
        return Ok(None);
    }

    let record_type: RecordType = member_value_text(record, "type")
        .map(str::trim)
        .unwrap_or_default()
        .parse()?;

    Ok(Some(NameServerRecord {
        id,
        name: member_value_text(record, "name")
            .map(|text| text.trim().to_string())
            .unwrap_or_default(),
        record_type,
        content: member_value_text(record, "content")
            .map(|text| text.trim().to_string())
            .unwrap_or_default(),
        ttl_seconds: member_value_text(record, "ttl")
            .and_then(|text| text.trim().parse().ok())
            .unwrap_or(0),
        prio: member_value_text(record, "prio")
            .and_then(|text| text.trim().parse().ok())
            .unwrap_or(0),
    }))
}

/// The top-level response struct: `methodResponse/params/param/value/struct`.
fn response_struct<'a>(document: &'a Document<'_>) -> Option<Node<'a, 'a>> {
    let params = child_element(document.root_element(), "params")?;
    let param = child_element(params, "param")?;
    let value = child_element(param, "value")?;
    child_element(value, "struct")
}

/// The `data` node of `resData`'s `record` array.
fn record_array_data<'a>(document: &'a Document<'_>) -> Option<Node<'a, 'a>> {
    let response = response_struct(document)?;
    let res_data = member_value_element(response, "resData")?;
    let record = member_value_element(res_data, "record")?;
    if !record.has_tag_name("array") {
        return None;
    }
    child_element(record, "data")
}

fn child_element<'a>(node: Node<'a, 'a>, name: &str) -> Option<Node<'a, 'a>> {
    node.children()
        .find(|child| child.is_element() && child.has_tag_name(name))
}

/// Find a struct member by name and return the element inside its value.
fn member_value_element<'a>(struct_node: Node<'a, 'a>, name: &str) -> Option<Node<'a, 'a>> {
    struct_node
        .children()
        .filter(|child| child.is_element() && child.has_tag_name("member"))
        .find(|member| {
            child_element(*member, "name")
                .and_then(|n| n.text())
                .map(str::trim)
                == Some(name)
        })
        .and_then(|member| child_element(member, "value"))
        .and_then(|value| value.children().find(Node::is_element))
}

/// Find a struct member by name and return its typed value text.
fn member_value_text<'a>(struct_node: Node<'a, 'a>, name: &str) -> Option<&'a str> {
    member_value_element(struct_node, name).and_then(|element| element.text())
}
