//! List Blobs response rendering
//!
//! Produces the `EnumerationResults` document returned by
//! `GET /{container}?restype=container&comp=list`.

use crate::store::StoredBlob;
use chrono::{DateTime, Utc};
use quick_xml::escape::escape;
use std::fmt::Write;

/// Format a timestamp the way the Blob service does (RFC 1123, always GMT)
pub fn format_http_date(timestamp: &DateTime<Utc>) -> String {
    timestamp.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

/// Weak ETag derived from the last-modified time
pub fn etag_for(blob: &StoredBlob) -> String {
    format!("\"0x{:X}\"", blob.last_modified.timestamp_micros())
}

/// Render an `EnumerationResults` document
pub fn render_enumeration_results(
    service_endpoint: &str,
    container: &str,
    prefix: Option<&str>,
    blobs: &[(String, StoredBlob)],
) -> String {
    let mut xml = String::from("<?xml version=\"1.0\" encoding=\"utf-8\"?>");
    let _ = write!(
        xml,
        "<EnumerationResults ServiceEndpoint=\"{}\" ContainerName=\"{}\">",
        escape(service_endpoint),
        escape(container)
    );
    if let Some(prefix) = prefix {
        let _ = write!(xml, "<Prefix>{}</Prefix>", escape(prefix));
    }
    xml.push_str("<Blobs>");
    for (name, blob) in blobs {
        let _ = write!(
            xml,
            "<Blob><Name>{}</Name><Properties>\
             <Creation-Time>{}</Creation-Time>\
             <Last-Modified>{}</Last-Modified>\
             <Etag>{}</Etag>\
             <Content-Length>{}</Content-Length>\
             <Content-Type>{}</Content-Type>\
             <BlobType>BlockBlob</BlobType>\
             <AccessTier>Hot</AccessTier>\
             <LeaseStatus>unlocked</LeaseStatus>\
             <LeaseState>available</LeaseState>\
             </Properties><Metadata /></Blob>",
            escape(name),
            format_http_date(&blob.last_modified),
            format_http_date(&blob.last_modified),
            etag_for(blob),
            blob.size(),
            escape(&blob.content_type),
        );
    }
    xml.push_str("</Blobs><NextMarker /></EnumerationResults>");
    xml
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Bytes;
    use chrono::TimeZone;

    #[test]
    fn test_format_http_date() {
        let ts = Utc.with_ymd_and_hms(2025, 1, 27, 10, 0, 0).unwrap();
        assert_eq!(format_http_date(&ts), "Mon, 27 Jan 2025 10:00:00 GMT");
    }

    #[test]
    fn test_render_contains_blob_properties() {
        let blob = StoredBlob {
            data: Bytes::from_static(b"12345"),
            content_type: "application/vnd.android.package-archive".to_string(),
            last_modified: Utc.with_ymd_and_hms(2025, 1, 27, 10, 0, 0).unwrap(),
        };
        let xml = render_enumeration_results(
            "http://127.0.0.1:10000/devstoreaccount1",
            "birdid-apk",
            None,
            &[("app & co.apk".to_string(), blob)],
        );
        assert!(xml.contains("ContainerName=\"birdid-apk\""));
        assert!(xml.contains("<Name>app &amp; co.apk</Name>"));
        assert!(xml.contains("<Last-Modified>Mon, 27 Jan 2025 10:00:00 GMT</Last-Modified>"));
        assert!(xml.contains("<Content-Length>5</Content-Length>"));
        assert!(xml.ends_with("<NextMarker /></EnumerationResults>"));
    }
}
