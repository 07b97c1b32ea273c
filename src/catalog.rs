//! Static fallback catalog
//!
//! Pre-written items served when the upstream call fails or yields nothing
//! usable for a category.

use chrono::Utc;

use crate::models::{NewsCategory, NewsItem};

pub const CATALOG_URL: &str = "https://example.com/fallback-news";
pub const CATALOG_SOURCE: &str = "Fallback News";

struct Entry {
    title: &'static str,
    summary: &'static str,
    insight: &'static str,
}

const BUSINESS: &[Entry] = &[
    Entry {
        title: "経済指標の動向と市場への影響",
        summary: "最新の経済指標が発表され、市場に大きな影響を与えています。GDP成長率、失業率、インフレ率などの主要指標の動向を分析し、今後の経済見通しについて考察します。",
        insight: "企業は経済指標の動向を注視し、投資戦略や事業計画の見直しを検討する必要があります。特に金利動向は資金調達コストに直結するため、慎重な対応が求められます。",
    },
    Entry {
        title: "グローバルサプライチェーンの再構築",
        summary: "地政学的リスクの高まりにより、企業はサプライチェーンの多様化と再構築を進めています。リスク分散とコスト最適化のバランスを図る新たな戦略が求められています。",
        insight: "サプライチェーンの再構築は短期的にはコスト増加を伴いますが、長期的には事業の持続可能性向上に寄与します。戦略的パートナーシップの構築が重要です。",
    },
];

const TECHNOLOGY: &[Entry] = &[
    Entry {
        title: "AI技術の進歩とビジネス応用",
        summary: "人工知能技術が急速に発展し、様々な業界での実用化が進んでいます。機械学習、自然言語処理、画像認識などの技術が企業の業務効率化に大きく貢献しています。",
        insight: "AI技術の導入により、企業は業務の自動化と効率化を実現できます。ただし、適切なデータ管理とセキュリティ対策が不可欠です。",
    },
    Entry {
        title: "クラウドコンピューティングの普及",
        summary: "クラウドサービスの利用が企業のデジタル変革を加速させています。スケーラビリティ、コスト効率、セキュリティの向上により、多くの企業がクラウド移行を進めています。",
        insight: "クラウド移行は初期投資を要しますが、長期的には運用コストの削減と柔軟性の向上をもたらします。段階的な移行戦略が推奨されます。",
    },
];

const POLITICS: &[Entry] = &[
    Entry {
        title: "国際政治情勢と経済への影響",
        summary: "国際政治の動向が世界経済に大きな影響を与えています。貿易政策、外交関係、地政学的リスクの変化が企業の戦略決定に重要な要素となっています。",
        insight: "企業は国際政治情勢の変化に敏感に対応し、リスク管理と機会創出の両面から戦略を検討する必要があります。多様化と柔軟性が鍵となります。",
    },
    Entry {
        title: "規制環境の変化と企業対応",
        summary: "各国の規制環境が急速に変化しており、企業は新たなコンプライアンス要件に対応する必要があります。環境規制、データ保護法、労働法などの変更が企業戦略に影響を与えています。",
        insight: "規制対応は単なるコストではなく、競争優位性を構築する機会でもあります。早期対応により市場での信頼性向上が期待できます。",
    },
];

fn entries(category: NewsCategory) -> &'static [Entry] {
    match category {
        NewsCategory::Business => BUSINESS,
        NewsCategory::Technology => TECHNOLOGY,
        NewsCategory::Politics => POLITICS,
    }
}

/// Catalog items for a category, at most `limit`
pub fn fallback_news(category: NewsCategory, limit: usize) -> Vec<NewsItem> {
    let timestamp = Utc::now();

    entries(category)
        .iter()
        .take(limit)
        .enumerate()
        .map(|(i, entry)| NewsItem {
            id: format!("fallback-{}-{}", category.as_str(), i + 1),
            title: entry.title.to_string(),
            summary: entry.summary.to_string(),
            business_insight: entry.insight.to_string(),
            url: CATALOG_URL.to_string(),
            timestamp,
            category,
            source: CATALOG_SOURCE.to_string(),
        })
        .collect()
}
