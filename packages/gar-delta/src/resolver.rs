//! Download service lookup.
//!
//! The service answers with an XML document describing the latest registry
//! release. The delta archive URL sits in the `GarXMLDeltaURL` element, in
//! the default namespace of the response.

use reqwest::blocking::Client;
use roxmltree::Document;

use crate::config::DELTA_URL_ELEMENT;
use crate::error::{DeltaError, Result};
use crate::http::{bytes_to_string, get_checked};
use crate::xml::{collect_text, find_in_default_namespace, strip_bom};

/// Query the download service and return the delta archive URL.
pub fn resolve_delta_url(client: &Client, service_url: &str) -> Result<String> {
    tracing::info!(url = service_url, "Querying download service");

    let bytes = get_checked(client, service_url)
        .and_then(|response| response.bytes())
        .map_err(|source| DeltaError::Resolution {
            url: service_url.to_string(),
            source,
        })?;
    let body = bytes_to_string(&bytes, "download service response");

    let delta_url = parse_delta_url(&body, service_url)?;
    tracing::info!(url = %delta_url, "Resolved delta archive URL");
    Ok(delta_url)
}

/// Extract the delta archive URL from a service response.
///
/// `service_url` is only used for error context.
pub fn parse_delta_url(xml: &str, service_url: &str) -> Result<String> {
    let doc = Document::parse(strip_bom(xml)).map_err(|source| DeltaError::ResolutionXml {
        url: service_url.to_string(),
        source,
    })?;

    find_in_default_namespace(&doc, DELTA_URL_ELEMENT)
        .map(collect_text)
        .filter(|url| !url.is_empty())
        .ok_or_else(|| DeltaError::MissingDeltaUrl {
            url: service_url.to_string(),
            element: DELTA_URL_ELEMENT,
        })
}
