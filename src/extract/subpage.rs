use crate::constants::{LABEL_FOUNDED_YEAR, LABEL_STAGE, LABEL_TOTAL_RAISED};
use crate::types::CompanyDetails;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};

static OVERVIEW_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"[data-test="overview-kpi"]"#).unwrap());
static DESCRIPTION_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"[data-test="description"]"#).unwrap());
// The site has shipped two class names for the header block
static WEBSITE_PARENT_SELECTORS: Lazy<[Selector; 2]> = Lazy::new(|| {
    [
        Selector::parse(".Header_companyBasicInfo__oWTSL").unwrap(),
        Selector::parse(".Header_basic_info__AJ16J").unwrap(),
    ]
});
static H2_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("h2").unwrap());
static SPAN_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("span").unwrap());
static LINK_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("a").unwrap());

fn element_text(element: ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Value shown next to the `label` heading in the overview section
fn overview_value(overview: Option<ElementRef>, label: &str) -> Option<String> {
    let title = overview?
        .select(&H2_SELECTOR)
        .find(|h2| element_text(*h2) == label)?;
    let parent = title.parent().and_then(ElementRef::wrap)?;
    parent.select(&SPAN_SELECTOR).next().map(element_text)
}

fn website(document: &Html) -> Option<String> {
    let parent = WEBSITE_PARENT_SELECTORS
        .iter()
        .find_map(|selector| document.select(selector).next())?;
    parent
        .select(&LINK_SELECTOR)
        .next()
        .and_then(|a| a.value().attr("href"))
        .map(str::to_string)
}

/// Extract the company details from a company page.
///
/// Anything missing from the page is left as `None`.
pub fn parse_subpage(html: &str) -> CompanyDetails {
    let document = Html::parse_document(html);
    let overview = document.select(&OVERVIEW_SELECTOR).next();

    CompanyDetails {
        founded_year: overview_value(overview, LABEL_FOUNDED_YEAR),
        total_raised: overview_value(overview, LABEL_TOTAL_RAISED),
        financial_stage: overview_value(overview, LABEL_STAGE),
        website: website(&document),
        description: document
            .select(&DESCRIPTION_SELECTOR)
            .next()
            .map(element_text),
    }
}
