// Core data structures for the piaofang harvester

use serde::{Deserialize, Serialize};
use serde_json::Value;
use indexmap::IndexMap;

/// Label/value pairs read from the page, keyed by the site's own labels
///
/// Keys keep the order their labels first appear on the page.
pub type LabelMap = IndexMap<String, String>;

/// Company names grouped under their section heading, in page order
pub type CompanyMap = IndexMap<String, Vec<String>>;

/// One harvested movie page
///
/// Every facet is always present; an absent source fragment yields the
/// facet's empty value. Field order is the serialized document order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct MovieRecord {
    #[serde(rename = "movie_title")]
    pub title: String,
    pub basic_info: LabelMap,
    pub rating_info: RatingInfo,
    pub box_office_series: Vec<BoxOfficePoint>,
    pub schedule_series: Vec<SchedulePoint>,
    pub pre_release_wish_series: Vec<WishPoint>,
    pub persona_data: LabelMap,
    pub cast_info: CastInfo,
    pub companies: CompanyMap,
    pub technical_specs: LabelMap,
    pub marketing_events: Vec<MarketingEvent>,
}

/// Scoring block; each field is independently optional
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct RatingInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating_count: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wish_count: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub imdb_score: Option<String>,
}

impl RatingInfo {
    /// Number of sub-fields present
    pub fn len(&self) -> usize {
        [
            &self.rating,
            &self.rating_count,
            &self.wish_count,
            &self.imdb_score,
        ]
        .iter()
        .filter(|f| f.is_some())
        .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Daily box office, actual against forecast
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxOfficePoint {
    pub date: String,
    #[serde(rename = "box_office_real")]
    pub actual: Value,
    #[serde(rename = "box_office_forecast")]
    pub forecast: Value,
}

/// Daily screening count
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchedulePoint {
    pub date: String,
    #[serde(rename = "schedule_count")]
    pub count: Value,
}

/// Daily "want to see" count before release
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WishPoint {
    /// `None` when the point carries no `xValue`
    pub date: Option<String>,
    pub wish_count: Value,
}

/// One entry of the marketing timeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketingEvent {
    pub time: String,
    pub event: String,
    #[serde(default)]
    pub tag: String,
}

/// Cast and crew bucket a person image falls into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Director,
    Writer,
    Performer,
}

impl Role {
    /// Label marker identifying directors
    pub const DIRECTOR_MARKER: &'static str = "导演";
    /// Label marker identifying writers
    pub const WRITER_MARKER: &'static str = "编剧";

    /// Classify a role label by substring
    ///
    /// The director marker is checked first, then the writer marker;
    /// anything else, including an empty label, is a performer.
    pub fn classify(label: &str) -> Self {
        if label.contains(Self::DIRECTOR_MARKER) {
            Self::Director
        } else if label.contains(Self::WRITER_MARKER) {
            Self::Writer
        } else {
            Self::Performer
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Director => "director",
            Self::Writer => "writer",
            Self::Performer => "performer",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Names grouped into the three fixed role buckets, in document order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct CastInfo {
    pub director: Vec<String>,
    pub performer: Vec<String>,
    pub writer: Vec<String>,
}

impl CastInfo {
    pub fn push(&mut self, role: Role, name: String) {
        self.bucket_mut(role).push(name);
    }

    pub fn bucket(&self, role: Role) -> &[String] {
        match role {
            Role::Director => &self.director,
            Role::Writer => &self.writer,
            Role::Performer => &self.performer,
        }
    }

    fn bucket_mut(&mut self, role: Role) -> &mut Vec<String> {
        match role {
            Role::Director => &mut self.director,
            Role::Writer => &mut self.writer,
            Role::Performer => &mut self.performer,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.director.is_empty() && self.performer.is_empty() && self.writer.is_empty()
    }
}

/// A movie page queued for harvesting
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageTarget {
    pub url: String,
    /// Persistence key, the numeric token ending the address
    pub movie_id: String,
}

/// Where a page is in its harvest cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PageState {
    Pending,
    Fetched,
    Assembled,
    Persisted,
    Failed,
}

impl PageState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Persisted | Self::Failed)
    }
}

/// Statistics for one harvest run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HarvestStats {
    /// Pages handed to the driver
    pub discovered: usize,
    /// Records written
    pub persisted: usize,
    /// Pages that ended in `Failed`
    pub failed: usize,
}

impl HarvestStats {
    pub fn new(discovered: usize) -> Self {
        Self {
            discovered,
            ..Default::default()
        }
    }

    pub fn record(&mut self, state: PageState) {
        match state {
            PageState::Persisted => self.persisted += 1,
            PageState::Failed => self.failed += 1,
            _ => {}
        }
    }

    /// Fraction of discovered pages persisted (0.0 - 1.0)
    pub fn success_rate(&self) -> f64 {
        if self.discovered == 0 {
            0.0
        } else {
            self.persisted as f64 / self.discovered as f64
        }
    }
}

impl std::fmt::Display for HarvestStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} pages: {} persisted, {} failed",
            self.discovered, self.persisted, self.failed
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_classify() {
        assert_eq!(Role::classify("导演"), Role::Director);
        assert_eq!(Role::classify("编剧"), Role::Writer);
        assert_eq!(Role::classify("主演"), Role::Performer);
        assert_eq!(Role::classify(""), Role::Performer);
    }

    #[test]
    fn test_role_classify_director_takes_priority() {
        assert_eq!(Role::classify("导演 / 编剧"), Role::Director);
        assert_eq!(Role::classify("编剧 / 导演"), Role::Director);
    }

    #[test]
    fn test_cast_info_push() {
        let mut cast = CastInfo::default();
        cast.push(Role::Director, "郭帆".to_string());
        cast.push(Role::Performer, "吴京".to_string());
        cast.push(Role::Performer, "刘德华".to_string());

        assert_eq!(cast.bucket(Role::Director), ["郭帆"]);
        assert_eq!(cast.bucket(Role::Performer), ["吴京", "刘德华"]);
        assert!(cast.bucket(Role::Writer).is_empty());
        assert!(!cast.is_empty());
    }

    #[test]
    fn test_rating_info_len() {
        let mut rating = RatingInfo::default();
        assert!(rating.is_empty());
        rating.rating = Some("9.1".into());
        rating.imdb_score = Some("7.9".into());
        assert_eq!(rating.len(), 2);
    }

    #[test]
    fn test_empty_record_serializes_every_facet() {
        let json = serde_json::to_value(MovieRecord::default()).unwrap();
        let obj = json.as_object().unwrap();

        assert_eq!(obj.len(), 11);
        assert_eq!(obj["movie_title"], "");
        assert_eq!(obj["rating_info"], serde_json::json!({}));
        assert_eq!(
            obj["cast_info"],
            serde_json::json!({"director": [], "performer": [], "writer": []})
        );
        assert_eq!(obj["marketing_events"], serde_json::json!([]));
    }

    #[test]
    fn test_record_field_order() {
        let json = serde_json::to_string(&MovieRecord::default()).unwrap();
        let keys = [
            "movie_title",
            "basic_info",
            "rating_info",
            "box_office_series",
            "schedule_series",
            "pre_release_wish_series",
            "persona_data",
            "cast_info",
            "companies",
            "technical_specs",
            "marketing_events",
        ];
        let positions: Vec<usize> = keys.iter().map(|k| json.find(k).unwrap()).collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_series_point_keys() {
        let point = BoxOfficePoint {
            date: "2024-02-10".into(),
            actual: serde_json::json!(12.5),
            forecast: serde_json::json!(13),
        };
        let json = serde_json::to_value(&point).unwrap();
        assert_eq!(json["box_office_real"], 12.5);
        assert_eq!(json["box_office_forecast"], 13);
    }

    #[test]
    fn test_harvest_stats() {
        let mut stats = HarvestStats::new(4);
        stats.record(PageState::Persisted);
        stats.record(PageState::Failed);
        stats.record(PageState::Persisted);
        stats.record(PageState::Fetched);

        assert_eq!(stats.persisted, 2);
        assert_eq!(stats.failed, 1);
        assert_eq!(stats.success_rate(), 0.5);
        assert_eq!(stats.to_string(), "4 pages: 2 persisted, 1 failed");
    }

    #[test]
    fn test_page_state_terminal() {
        assert!(PageState::Persisted.is_terminal());
        assert!(PageState::Failed.is_terminal());
        assert!(!PageState::Assembled.is_terminal());
    }
}
