use serde::{Deserialize, Deserializer, Serialize};
use utoipa::{IntoParams, ToSchema};

fn deserialize_optional_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.is_empty() => Ok(None),
        Some(s) => s.parse::<i64>().map(Some).map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// Query parameters shared by the paginated-search listings.
///
/// `page` is 1-based; `limit` is clamped server-side so a client cannot
/// request an unbounded page.
#[derive(Debug, Clone, Default, Deserialize, ToSchema, IntoParams)]
pub struct SearchParams {
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub page: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub limit: Option<i64>,
    pub search: Option<String>,
}

impl SearchParams {
    pub fn page(&self) -> i64 {
        self.page.unwrap_or(1).max(1)
    }

    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(10).clamp(1, 100)
    }

    pub fn offset(&self) -> i64 {
        (self.page() - 1) * self.limit()
    }

    /// The search term, or `None` when absent or blank (blank matches all).
    pub fn search(&self) -> Option<&str> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginationMeta {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub pages: i64,
}

impl PaginationMeta {
    pub fn new(page: i64, limit: i64, total: i64) -> Self {
        let pages = if total == 0 {
            0
        } else {
            (total + limit - 1) / limit
        };
        Self {
            page,
            limit,
            total,
            pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = SearchParams::default();
        assert_eq!(params.page(), 1);
        assert_eq!(params.limit(), 10);
        assert_eq!(params.offset(), 0);
        assert_eq!(params.search(), None);
    }

    #[test]
    fn test_offset_from_page() {
        let params = SearchParams {
            page: Some(3),
            limit: Some(20),
            search: None,
        };
        assert_eq!(params.offset(), 40);
    }

    #[test]
    fn test_page_minimum_is_one() {
        let params = SearchParams {
            page: Some(0),
            limit: None,
            search: None,
        };
        assert_eq!(params.page(), 1);

        let params = SearchParams {
            page: Some(-5),
            limit: None,
            search: None,
        };
        assert_eq!(params.page(), 1);
        assert_eq!(params.offset(), 0);
    }

    #[test]
    fn test_limit_is_clamped() {
        let cases = vec![
            (Some(1), 1),
            (Some(50), 50),
            (Some(100), 100),
            (Some(1000), 100),
            (Some(0), 1),
            (Some(-1), 1),
            (None, 10),
        ];

        for (input, expected) in cases {
            let params = SearchParams {
                page: None,
                limit: input,
                search: None,
            };
            assert_eq!(params.limit(), expected);
        }
    }

    #[test]
    fn test_blank_search_matches_all() {
        let params = SearchParams {
            page: None,
            limit: None,
            search: Some("   ".to_string()),
        };
        assert_eq!(params.search(), None);

        let params = SearchParams {
            page: None,
            limit: None,
            search: Some(" rust ".to_string()),
        };
        assert_eq!(params.search(), Some("rust"));
    }

    #[test]
    fn test_deserialize_string_values() {
        let json = r#"{"page":"2","limit":"25","search":"data"}"#;
        let params: SearchParams = serde_json::from_str(json).unwrap();
        assert_eq!(params.page(), 2);
        assert_eq!(params.limit(), 25);
        assert_eq!(params.search(), Some("data"));
    }

    #[test]
    fn test_deserialize_empty_strings() {
        let json = r#"{"page":"","limit":""}"#;
        let params: SearchParams = serde_json::from_str(json).unwrap();
        assert_eq!(params.page(), 1);
        assert_eq!(params.limit(), 10);
    }

    #[test]
    fn test_deserialize_missing_fields() {
        let params: SearchParams = serde_json::from_str("{}").unwrap();
        assert_eq!(params.page(), 1);
        assert_eq!(params.limit(), 10);
        assert_eq!(params.search(), None);
    }

    #[test]
    fn test_pages_is_ceiling_of_total_over_limit() {
        assert_eq!(PaginationMeta::new(1, 10, 0).pages, 0);
        assert_eq!(PaginationMeta::new(1, 10, 1).pages, 1);
        assert_eq!(PaginationMeta::new(1, 10, 10).pages, 1);
        assert_eq!(PaginationMeta::new(1, 10, 11).pages, 2);
        assert_eq!(PaginationMeta::new(1, 10, 95).pages, 10);
    }

    #[test]
    fn test_meta_serialize() {
        let meta = PaginationMeta::new(3, 20, 100);
        let serialized = serde_json::to_string(&meta).unwrap();
        assert!(serialized.contains(r#""page":3"#));
        assert!(serialized.contains(r#""limit":20"#));
        assert!(serialized.contains(r#""total":100"#));
        assert!(serialized.contains(r#""pages":5"#));
    }
}
