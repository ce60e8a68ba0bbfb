//! Origin allow-list validation.

use std::sync::LazyLock;

use easyadmin_common::Origin;
use regex::Regex;

use crate::schema::{ClientConfig, HostConfig};

/// `scheme://host[:port]` with no path, query, fragment or trailing slash.
static ORIGIN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z][a-z0-9+.\-]*://(\[[0-9a-fA-F:]+\]|[A-Za-z0-9.\-]+)(:[0-9]{1,5})?$")
        .expect("origin regex must compile")
});

/// Whether `origin` is a well-formed tuple origin or the opaque `"null"`.
pub fn is_valid_origin(origin: &Origin) -> bool {
    match origin {
        Origin::Opaque => true,
        Origin::Tuple(s) => ORIGIN_RE.is_match(s),
    }
}

pub(super) fn validate_host_origins(errors: &mut Vec<String>, host: &HostConfig) {
    if host.origin.is_opaque() || !is_valid_origin(&host.origin) {
        errors.push(format!("host.origin = {:?} is not a valid origin", host.origin.as_str()));
    }

    if host.allowed_origins.is_empty() {
        errors.push("host.allowed_origins is empty".into());
    }

    for origin in &host.allowed_origins {
        if !is_valid_origin(origin) {
            errors.push(format!(
                "host.allowed_origins entry {:?} is not a valid origin",
                origin.as_str()
            ));
        }
    }
}

pub(super) fn validate_client_origins(errors: &mut Vec<String>, client: &ClientConfig) {
    if !is_valid_origin(&client.origin) {
        errors.push(format!(
            "client.origin = {:?} is not a valid origin",
            client.origin.as_str()
        ));
    }

    // Requests can only be addressed to a concrete origin.
    if client.host_origin.is_opaque() || !is_valid_origin(&client.host_origin) {
        errors.push(format!(
            "client.host_origin = {:?} is not a valid origin",
            client.host_origin.as_str()
        ));
    }
}
