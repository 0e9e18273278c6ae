//! Record identity for collections the backend does not expose ids for
//!
//! Only books and reviews carry an `id` field. Every other record is
//! identified by the last segment of its `_links.self.href`.

use serde::Deserialize;

#[derive(Debug, Default, Clone, Deserialize)]
pub(crate) struct Links {
    #[serde(rename = "self")]
    self_link: Option<Link>,
}

#[derive(Debug, Clone, Deserialize)]
struct Link {
    href: String,
}

/// The explicit `id` when present, otherwise the one in the self link.
pub(crate) fn record_id(id: Option<i64>, links: Option<&Links>) -> Result<i64, String> {
    if let Some(id) = id {
        return Ok(id);
    }

    let href = links
        .and_then(|links| links.self_link.as_ref())
        .map(|link| link.href.as_str())
        .ok_or_else(|| "record has neither `id` nor `_links.self.href`".to_string())?;

    // Templated links end in `{?projection}`
    let path = href.split(['{', '?', '#']).next().unwrap_or_default();
    path.trim_end_matches('/')
        .rsplit('/')
        .next()
        .and_then(|segment| segment.parse::<i64>().ok())
        .ok_or_else(|| format!("no record id in self link '{}'", href))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn links(href: &str) -> Links {
        serde_json::from_value(serde_json::json!({ "self": { "href": href } })).unwrap()
    }

    #[test]
    fn test_explicit_id_wins() {
        let links = links("http://localhost:8080/api/messages/3");
        assert_eq!(record_id(Some(8), Some(&links)), Ok(8));
    }

    #[test]
    fn test_id_from_self_link() {
        assert_eq!(record_id(None, Some(&links("http://localhost:8080/api/messages/3"))), Ok(3));
        assert_eq!(record_id(None, Some(&links("/api/histories/41/"))), Ok(41));
        assert_eq!(
            record_id(None, Some(&links("http://localhost:8080/api/histories/7{?projection}"))),
            Ok(7)
        );
    }

    #[test]
    fn test_missing_or_unusable_link() {
        assert!(record_id(None, None).is_err());
        assert!(record_id(None, Some(&Links::default())).is_err());
        assert!(record_id(None, Some(&links("http://localhost:8080/api/messages/search"))).is_err());
    }
}
