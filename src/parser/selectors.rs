//! CSS selectors for movie detail pages and the rankings page
//!
//! Every selector is compiled once. The markup is server-rendered and shared
//! across movies, so a single layout is targeted.

use lazy_static::lazy_static;
use scraper::Selector;

// Helper macro to parse selectors safely at compile time
macro_rules! parse_selector {
    ($s:expr) => {
        Selector::parse($s).expect(concat!("Invalid CSS selector: ", $s))
    };
}

lazy_static! {
    // Embedded payload carrier
    pub static ref PAGE_DATA: Selector =
        parse_selector!(r#"script#pageData[type="application/json"]"#);

    // Title
    pub static ref TITLE: Selector = parse_selector!("h1.nav-header");

    // Label/value blocks (basic info and technical specs)
    pub static ref INFO_DETAIL_COL: Selector = parse_selector!("div.info-detail-col");
    pub static ref INFO_DETAIL_TITLE: Selector = parse_selector!("p.info-detail-title");
    pub static ref INFO_DETAIL_CONTENT: Selector = parse_selector!("p.info-detail-content");
    pub static ref TECHNICAL_ROW: Selector =
        parse_selector!("section.technical-section div.info-detail-row");

    // Rating block
    pub static ref SCORE_BLOCK: Selector = parse_selector!("div.score-block-content");
    pub static ref RATING_NUM: Selector = parse_selector!("span.rating-num");
    pub static ref SCORE_COUNT: Selector = parse_selector!("p.detail-score-count");
    pub static ref WISH_COUNT: Selector = parse_selector!("p.detail-wish-count");
    pub static ref OTHER_SCORE: Selector = parse_selector!("p.detail-other-score");

    // Audience persona
    pub static ref PERSONA_SECTION: Selector = parse_selector!("section.persona-section");
    pub static ref PERSONA_ITEM: Selector =
        parse_selector!("div.persona-line-item, div.persona-block.hotarea div.persona-item");
    pub static ref PERSONA_KEY: Selector = parse_selector!("div.persona-item-key");
    pub static ref PERSONA_VALUE: Selector = parse_selector!("div.persona-item-value");

    // Cast and crew
    pub static ref CAST_STRIP: Selector = parse_selector!("div.navBar + div img");
    pub static ref CAST_IMAGE: Selector = parse_selector!("div.sections section img");

    // Production companies
    pub static ref COMPANY_GROUP: Selector =
        parse_selector!("div.topboard-panel ~ div.section-group div.section-group section");
    pub static ref COMPANY_HEADING: Selector = parse_selector!("h2");
    pub static ref COMPANY_HEADING_FALLBACK: Selector = parse_selector!("p");
    pub static ref IMAGE: Selector = parse_selector!("img");

    // Marketing timeline
    pub static ref TRACE_ITEM: Selector =
        parse_selector!("section.marketing-section div.trace-item");
    pub static ref TRACE_DATE: Selector = parse_selector!("span.date-str");
    pub static ref TRACE_NAME: Selector = parse_selector!("span.trace-name");
    pub static ref TRACE_TAG: Selector = parse_selector!("span.trace-tip em");

    // Rankings page
    pub static ref RANKING_ROW: Selector = parse_selector!("div#ranks-list ul.row");
}
