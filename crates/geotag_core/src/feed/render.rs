//! GeoRSS / W3C geo markup.
//!
//! # Invariants
//! - Private records render as an empty string.
//! - Public records render exactly one `georss:point` and one
//!   `geo:lat`/`geo:long` pair, even when coordinates are missing.

use crate::feed::escape::escape_feed_text;
use crate::model::geo::GeoRecord;

/// GeoRSS namespace URI.
pub const GEORSS_NAMESPACE: &str = "http://www.georss.org/georss";
/// W3C basic geo (WGS84 lat/long) namespace URI.
pub const W3C_GEO_NAMESPACE: &str = "http://www.w3.org/2003/01/geo/wgs84_pos#";

const NAMESPACE_DECLARATION: &str = concat!(
    "xmlns:georss=\"http://www.georss.org/georss\" ",
    "xmlns:geo=\"http://www.w3.org/2003/01/geo/wgs84_pos#\" "
);

/// Namespace attributes inserted into the feed root element start tag.
///
/// Ends with a space so hosts can append further attributes directly.
pub fn render_namespace_declaration() -> &'static str {
    NAMESPACE_DECLARATION
}

/// Renders the per-item markup for `record`.
pub fn render_geo_record(record: &GeoRecord) -> String {
    if !record.is_public {
        return String::new();
    }

    let latitude = escape_feed_text(&format_coordinate(record.latitude));
    let longitude = escape_feed_text(&format_coordinate(record.longitude));

    format!(
        "\t<georss:point>{latitude} {longitude}</georss:point>\n\
         \t\t<geo:lat>{latitude}</geo:lat>\n\
         \t\t<geo:long>{longitude}</geo:long>\n"
    )
}

/// Shortest decimal form of a coordinate, empty when absent.
pub fn format_coordinate(value: Option<f64>) -> String {
    value.map(|value| value.to_string()).unwrap_or_default()
}
