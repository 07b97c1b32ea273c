//! Pipeline integration tests
//!
//! Runs whole documents through the extractor and checks the recovered items.

use newsdigest::extract::{LinkTier, SectionConvention};
use newsdigest::utils::error::ExtractError;
use newsdigest::NewsCategory;

use super::fixtures::{
    answer_envelope, far_url_digest, LEGACY_DIGEST, MIXED_DIGEST, PROSE_TWO_URLS,
    STRUCTURED_DIGEST,
};
use crate::common::{assert_item_invariants, extract, extractor, titles};

// ============================================================================
// Layouts
// ============================================================================

#[test]
fn test_structured_digest() {
    let extraction = extract(STRUCTURED_DIGEST);

    assert_eq!(extraction.len(), 4);
    assert_eq!(
        titles(&extraction, NewsCategory::Technology),
        vec!["量子コンピュータの商用化", "Open-source model release"]
    );

    let merger = &extraction.select(NewsCategory::Business, 5)[0];
    assert_eq!(merger.summary, "地方銀行の再編が進む。");
    assert_eq!(merger.business_insight, "金融サービスの選択肢が変化する。");
    assert_eq!(merger.url, "https://biz.example.com/merger");

    assert!(extraction
        .report
        .sections
        .iter()
        .all(|s| s.convention == SectionConvention::Delimited));
    assert!(extraction.report.link_tiers.iter().all(|t| *t == LinkTier::Tagged));
    assert!(extraction.report.issues.is_empty());
}

#[test]
fn test_legacy_digest_counts_bullets() {
    let extraction = extract(LEGACY_DIGEST);

    assert_eq!(
        titles(&extraction, NewsCategory::Technology),
        vec!["生成AIの企業導入が加速", "半導体の供給が回復"]
    );
    assert_eq!(
        titles(&extraction, NewsCategory::Business),
        vec!["日銀が政策金利を据え置き", "円相場が小幅に反発"]
    );
    assert_eq!(titles(&extraction, NewsCategory::Politics), vec!["日米首脳会談が開催"]);

    let yen = &extraction.select(NewsCategory::Business, 5)[1];
    assert_eq!(yen.summary, "輸出企業の収益見通しが改善。");
    assert_eq!(yen.business_insight, "為替ヘッジの見直し時期。");
    assert_eq!(yen.url, "https://biz.example.com/yen");
}

#[test]
fn test_last_item_does_not_bleed_into_next_section() {
    let extraction = extract(LEGACY_DIGEST);
    let chips = &extraction.select(NewsCategory::Technology, 5)[1];

    assert!(!chips.business_insight.contains("日銀"));
    assert!(!chips.summary.contains("経済・ビジネス"));
    assert_eq!(chips.url, "https://tech.example.com/chips");

    let mixed = extract(MIXED_DIGEST);
    let chipmaker = &mixed.select(NewsCategory::Technology, 5)[0];
    assert_eq!(chipmaker.summary, "Data-center demand drove growth.");
    assert_eq!(chipmaker.url, "https://tech.example.com/chipmaker");
}

#[test]
fn test_mixed_conventions() {
    let extraction = extract(MIXED_DIGEST);
    let conventions: Vec<_> = extraction
        .report
        .sections
        .iter()
        .map(|s| (s.category, s.convention))
        .collect();

    assert_eq!(
        conventions,
        vec![
            (NewsCategory::Technology, SectionConvention::Bare),
            (NewsCategory::Business, SectionConvention::Colon),
            (NewsCategory::Politics, SectionConvention::NewsHeading),
        ]
    );
    assert_eq!(titles(&extraction, NewsCategory::Politics), vec!["Parliament passes privacy bill"]);
    assert!(extraction.report.issues.contains(&ExtractError::MalformedBlock {
        category: NewsCategory::Politics,
        field: "summary",
    }));
}

#[test]
fn test_numbered_structured_items() {
    let document = "=== TECHNOLOGY ===
1. TITLE: 量子計算
   SUMMARY: 商用化が始まった。
   INSIGHT: 創薬での活用が進む。
   URL: https://tech.example.com/quantum
2. TITLE: 新型AIチップ
   SUMMARY: 消費電力を半減した。
   INSIGHT: 推論コストが下がる。
   URL: https://tech.example.com/chip
=== TECHNOLOGY ===
";
    let extraction = extract(document);

    assert_eq!(
        titles(&extraction, NewsCategory::Technology),
        vec!["量子計算", "新型AIチップ"]
    );
    let quantum = &extraction.items[0];
    assert_eq!(quantum.summary, "商用化が始まった。");
    assert_eq!(quantum.url, "https://tech.example.com/quantum");
    assert_eq!(extraction.report.link_tiers, vec![LinkTier::Tagged, LinkTier::Tagged]);
    assert!(extraction.report.issues.is_empty());
}

#[test]
fn test_grouping_by_category() {
    let extraction = extract(LEGACY_DIGEST);
    let groups = extraction.by_category();

    let counts: Vec<(NewsCategory, usize)> = groups
        .iter()
        .map(|(category, items)| (*category, items.len()))
        .collect();
    assert_eq!(
        counts,
        vec![
            (NewsCategory::Business, 2),
            (NewsCategory::Technology, 2),
            (NewsCategory::Politics, 1),
        ]
    );
}

// ============================================================================
// Link resolution
// ============================================================================

#[test]
fn test_tagged_link_dominates() {
    let document = "【テクノロジー】\n◾️ 新製品発表 https://tech.example.com/teaser\n◎概要：詳細は後日。\n【URL】https://tech.example.com/launch";
    let extraction = extract(document);

    assert_eq!(extraction.items[0].url, "https://tech.example.com/launch");
    assert_eq!(extraction.report.link_tiers, vec![LinkTier::Tagged]);
}

#[test]
fn test_url_on_line_after_tag() {
    let document = "【テクノロジー】\n◾️ 新製品発表\n◎概要：前回の記事 https://tech.example.com/old を参照。\n【URL】\nhttps://tech.example.com/launch";
    let extraction = extract(document);

    assert_eq!(extraction.items[0].url, "https://tech.example.com/launch");
    assert_eq!(extraction.report.link_tiers, vec![LinkTier::Tagged]);
}

#[test]
fn test_title_keyword_finds_reference_list_link() {
    let filler = "。".repeat(6000);
    let document = format!(
        "【テクノロジー】\n◾️ Apple unveils new chips\n◎概要：新型チップを発表した。\n◾️ 半導体の供給が回復\n◎概要：{filler}\n参考: Apple unveils の発表資料 https://tech.example.com/apple\n"
    );
    let extraction = extract(&document);

    assert_eq!(extraction.len(), 2);
    assert_eq!(extraction.items[0].title, "Apple unveils new chips");
    assert_eq!(extraction.items[0].url, "https://tech.example.com/apple");
    assert_eq!(
        extraction.report.link_tiers,
        vec![LinkTier::TitleKeywordProximity, LinkTier::InBlock]
    );
}

#[test]
fn test_far_url_is_recovered() {
    let document = far_url_digest();
    let extraction = extract(&document);

    let business = &extraction.select(NewsCategory::Business, 5)[0];
    assert_eq!(business.title, "物流大手が新拠点を開設");
    assert_eq!(business.url, "https://pol.example.com/doc");
    assert_eq!(extraction.report.link_tiers[0], LinkTier::DocumentProximity);
}

// ============================================================================
// Degraded paths
// ============================================================================

#[test]
fn test_prose_with_two_urls() {
    let extraction = extract(PROSE_TWO_URLS);

    assert_eq!(extraction.len(), 2);
    assert!(extraction.report.document_scan);
    assert_eq!(extraction.report.issues, vec![ExtractError::NoSectionsRecognized]);
    assert_eq!(extraction.items[0].url, "https://markets.example.com/rally");
    assert_eq!(
        extraction.items[1].title,
        "Lawmakers approved a new package of semiconductor subsidies this week."
    );
    assert_eq!(extraction.items[1].category, NewsCategory::Politics);
    assert!(extraction.items.iter().all(|item| item.source.ends_with("(Fallback)")));
}

#[test]
fn test_empty_and_whitespace_input() {
    assert!(extract("").is_empty());
    assert!(extract("   \n\t\n").is_empty());
}

#[test]
fn test_envelope_extraction() {
    let extraction = extractor()
        .extract_envelope(&answer_envelope(LEGACY_DIGEST))
        .unwrap();
    assert_eq!(extraction.len(), 5);

    let raw = serde_json::to_string(&answer_envelope(STRUCTURED_DIGEST)).unwrap();
    assert_eq!(extractor().extract_envelope_str(&raw).unwrap().len(), 4);

    assert!(extractor().extract_envelope_str("not json").is_err());
}

// ============================================================================
// Properties over the fixtures
// ============================================================================

#[test]
fn test_idempotent_over_fixtures() {
    let far = far_url_digest();
    for document in [LEGACY_DIGEST, STRUCTURED_DIGEST, MIXED_DIGEST, PROSE_TWO_URLS, far.as_str()] {
        let first = extract(document);
        let second = extract(document);

        assert_eq!(first.len(), second.len());
        for (a, b) in first.items.iter().zip(&second.items) {
            assert!(a.same_content(b), "{a:?} != {b:?}");
        }
        assert_eq!(first.report, second.report);
    }
}

#[test]
fn test_item_invariants_over_fixtures() {
    for document in [LEGACY_DIGEST, STRUCTURED_DIGEST, MIXED_DIGEST, PROSE_TWO_URLS] {
        let extraction = extract(document);
        for item in &extraction.items {
            assert_item_invariants(item);
            assert!(!item.url.is_empty());
        }
    }
}

#[test]
fn test_ids_are_unique_within_run() {
    let extraction = extract(LEGACY_DIGEST);
    let mut ids: Vec<_> = extraction.items.iter().map(|item| item.id.clone()).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), extraction.len());
}
