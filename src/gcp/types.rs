//! Wire types for the Compute Engine and Cloud Storage list endpoints

use crate::inventory::{BucketRecord, InstanceRecord, Zone};
use serde::{Deserialize, Deserializer};

/// Common shape of `zones.list`, `instances.list` and `buckets.list`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListResponse<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
    #[serde(default)]
    pub next_page_token: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ZoneItem {
    pub name: String,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InstanceItem {
    pub name: String,
    /// uint64 sent as a decimal string
    #[serde(default, deserialize_with = "u64_from_string_or_number")]
    pub id: u64,
    /// Full zone URL
    #[serde(default)]
    pub zone: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BucketItem {
    pub name: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum U64Repr {
    Number(u64),
    String(String),
}

fn u64_from_string_or_number<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    match U64Repr::deserialize(deserializer)? {
        U64Repr::Number(n) => Ok(n),
        U64Repr::String(s) => s.parse().map_err(serde::de::Error::custom),
    }
}

/// Extract short name from GCP resource URL
/// e.g., "https://www.googleapis.com/compute/v1/projects/my-project/zones/us-central1-a" -> "us-central1-a"
pub fn extract_short_name(url: &str) -> &str {
    url.rsplit('/').next().unwrap_or(url)
}

impl From<ZoneItem> for Zone {
    fn from(item: ZoneItem) -> Self {
        Zone::new(item.name)
    }
}

impl From<InstanceItem> for InstanceRecord {
    fn from(item: InstanceItem) -> Self {
        let zone = item
            .zone
            .as_deref()
            .map(extract_short_name)
            .unwrap_or_default()
            .to_string();
        InstanceRecord {
            name: item.name,
            id: item.id,
            zone,
        }
    }
}

impl From<BucketItem> for BucketRecord {
    fn from(item: BucketItem) -> Self {
        BucketRecord::new(item.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_instance_id_from_string() {
        let page: ListResponse<InstanceItem> = serde_json::from_value(json!({
            "kind": "compute#instanceList",
            "items": [
                {
                    "name": "web-1",
                    "id": "18446744073709551615",
                    "zone": "https://www.googleapis.com/compute/v1/projects/demo/zones/z2"
                },
                {"name": "web-2", "id": 42}
            ],
            "nextPageToken": "abc"
        }))
        .unwrap();

        assert_eq!(page.items[0].id, u64::MAX);
        assert_eq!(page.items[1].id, 42);
        assert_eq!(page.next_page_token.as_deref(), Some("abc"));

        let record = InstanceRecord::from(page.items[0].clone());
        assert_eq!(record.zone, "z2");
    }

    #[test]
    fn test_missing_items_is_empty_page() {
        let page: ListResponse<ZoneItem> =
            serde_json::from_value(json!({"kind": "compute#zoneList"})).unwrap();
        assert!(page.items.is_empty());
        assert!(page.next_page_token.is_none());
    }

    #[test]
    fn test_bad_id_is_rejected() {
        let result: Result<InstanceItem, _> =
            serde_json::from_value(json!({"name": "x", "id": "not-a-number"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_extract_short_name() {
        assert_eq!(extract_short_name("projects/p/zones/us-east1-b"), "us-east1-b");
        assert_eq!(extract_short_name("plain"), "plain");
    }
}
