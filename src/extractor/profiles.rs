// Page shapes of the slot catalog site.

use anyhow::Result;

use super::{ExtractionProfile, KeyStyle, LinkMode, PropertyTable, RankPattern};

/// `<select name="ucountry">` on the best-slots page; one record (`iso`) per option.
pub fn country_selector() -> Result<ExtractionProfile> {
    ExtractionProfile::new("country_selector", "select[name=ucountry] option")?
        .attr("iso", None, "value")
}

/// A `div.slotCard` from a provider listing or a per-country best-slots page.
pub fn listing_card() -> Result<ExtractionProfile> {
    let props = PropertyTable::new("div.propTable", "div.propTableLine")?
        .keys(KeyStyle::Snake);
    Ok(ExtractionProfile::new("listing_card", "div.slotCard")?
        .text("name", Some("a.slotCardName"))?
        .attr("thumbnail", Some("div.slotCardImage img"), "data-src")?
        .attr("url", Some("div.slotCardImage a"), "href")?
        .properties(props))
}

/// Listing card plus its position badge.
pub fn ranked_listing_card() -> Result<ExtractionProfile> {
    listing_card()?.rank("rank", Some(".slotCardRank"), RankPattern::standard()?)
}

/// Provider page; needs at least one labelled attribute row, else the page is not a provider page.
pub fn provider_detail() -> Result<ExtractionProfile> {
    let props = PropertyTable::new("div.provFormalAttr table", "tr")?
        .cells("th.propLeft", "td.propRight")?
        .links(LinkMode::Pair)
        .keys(KeyStyle::Lower);
    Ok(ExtractionProfile::new("provider_detail", "html")?
        .anchored("div.provFormalAttr table tr th.propLeft ~ td.propRight")?
        .attr("logo", Some("div.provider-page-scr img"), "src")?
        .properties(props))
}

/// Game page; a bare heading (challenge or error page) is not enough.
pub fn game_detail() -> Result<ExtractionProfile> {
    let props = PropertyTable::new("table.slotAttrTable", "tr")?
        .cells("td.propLeft, th.propLeft", "td.propRight")?
        .links(LinkMode::Text)
        .keys(KeyStyle::Snake);
    Ok(ExtractionProfile::new("game_detail", "html")?
        .anchored("table.slotAttrTable tr td.propRight")?
        .text("title", Some("h1"))?
        .properties(props)
        .rank("rank", Some("div.slotRank"), RankPattern::standard()?)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor::{extract_html, text_field, FieldValue};

    const LISTING: &str = r#"
        <div class="slotCard">
          <div class="slotCardImage"><a href="/en/slots/Sweet-Bonanza"><img data-src="/img/sweet.webp"></a></div>
          <a class="slotCardName" href="/en/slots/Sweet-Bonanza">Sweet Bonanza</a>
          <div class="propTable">
            <div class="propTableLine"><span>RTP:</span> <span>96.48%</span></div>
            <div class="propTableLine"><span>Max Win:</span> <span>x21100</span></div>
            <div class="propTableLine">Volatility</div>
          </div>
        </div>
        <div class="slotCard">
          <a class="slotCardName">Gates of Olympus</a>
        </div>
    "#;

    #[test]
    fn listing_cards_read_scalar_and_property_fields() {
        let recs = extract_html(LISTING, &listing_card().unwrap());
        assert_eq!(recs.len(), 2);
        let first = &recs[0];
        assert_eq!(text_field(first, "name"), Some("Sweet Bonanza"));
        assert_eq!(text_field(first, "thumbnail"), Some("/img/sweet.webp"));
        assert_eq!(text_field(first, "url"), Some("/en/slots/Sweet-Bonanza"));
        assert_eq!(text_field(first, "rtp"), Some("96.48%"));
        assert_eq!(text_field(first, "max_win"), Some("x21100"));
        assert!(!first.contains_key("volatility"));
        // card without image block keeps its name only
        assert_eq!(recs[1].len(), 1);
    }

    #[test]
    fn ranked_cards_pick_up_badge() {
        let html = r#"
            <div class="slotCard"><span class="slotCardRank">Rank 1</span><a class="slotCardName">A</a></div>
            <div class="slotCard"><span class="slotCardRank">New</span><a class="slotCardName">B</a></div>
        "#;
        let recs = extract_html(html, &ranked_listing_card().unwrap());
        assert_eq!(recs[0]["rank"], FieldValue::Int(1));
        assert!(!recs[1].contains_key("rank"));
    }

    #[test]
    fn country_options_skip_placeholder() {
        let html = r#"
            <select name="ucountry"><option value="">All</option><option value="AT">Austria</option><option value="CA">Canada</option></select>
            <select name="lang"><option value="en">English</option></select>
        "#;
        let isos: Vec<_> = extract_html(html, &country_selector().unwrap())
            .iter()
            .filter_map(|r| text_field(r, "iso").map(str::to_owned))
            .collect();
        assert_eq!(isos, vec!["AT", "CA"]);
    }

    #[test]
    fn provider_page_reads_logo_and_link_pairs() {
        let html = r#"
            <div class="provider-page-scr"><img src="/logos/netent.png"></div>
            <div class="provFormalAttr"><table>
              <tr><th class="propLeft">Founded:</th><td class="propRight">1996</td></tr>
              <tr><th class="propLeft">Site:</th><td class="propRight"><a href="https://netent.com">netent.com</a></td></tr>
            </table></div>
        "#;
        let recs = extract_html(html, &provider_detail().unwrap());
        assert_eq!(recs.len(), 1);
        let rec = &recs[0];
        assert_eq!(rec.keys().collect::<Vec<_>>(), vec!["logo", "founded", "site"]);
        assert_eq!(rec["site"], FieldValue::Link { text: "netent.com".into(), href: "https://netent.com".into() });
    }

    #[test]
    fn provider_page_without_attribute_table_is_skipped() {
        let html = r#"<div class="provider-page-scr"><img src="/logos/x.png"></div>"#;
        assert!(extract_html(html, &provider_detail().unwrap()).is_empty());
    }

    #[test]
    fn provider_table_without_labelled_rows_is_skipped() {
        let html = r#"
            <div class="provider-page-scr"><img src="/logos/x.png"></div>
            <div class="provFormalAttr"><table>
              <tr><td>Founded: 1996</td></tr>
              <tr><th class="propLeft">Site:</th></tr>
            </table></div>
        "#;
        assert!(extract_html(html, &provider_detail().unwrap()).is_empty());
    }

    #[test]
    fn heading_only_page_is_not_a_game() {
        let html = r#"<h1>Just a moment...</h1><p>Checking your browser</p>"#;
        assert!(extract_html(html, &game_detail().unwrap()).is_empty());
        let empty_table = r#"<h1>Book of Dead</h1><table class="slotAttrTable"></table>"#;
        assert!(extract_html(empty_table, &game_detail().unwrap()).is_empty());
    }

    #[test]
    fn game_detail_reads_title_props_and_rank() {
        let html = r#"
            <h1>Book of Dead</h1>
            <div class="slotRank">Rank: #15</div>
            <table class="slotAttrTable">
              <tr><td class="propLeft">Provider:</td><td class="propRight"><a href="/en/soft/Play-n-GO">Play'n GO</a></td></tr>
              <tr><td class="propLeft">Release Date:</td><td class="propRight">2016-01-20</td></tr>
            </table>
        "#;
        let recs = extract_html(html, &game_detail().unwrap());
        let rec = &recs[0];
        assert_eq!(text_field(rec, "title"), Some("Book of Dead"));
        assert_eq!(rec["provider"], FieldValue::Text("Play'n GO".into()));
        assert_eq!(text_field(rec, "release_date"), Some("2016-01-20"));
        assert_eq!(rec["rank"], FieldValue::Int(15));
    }
}
