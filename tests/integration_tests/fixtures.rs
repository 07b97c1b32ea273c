//! Test fixtures for integration tests
//!
//! Sample digest documents in the layouts the upstream model produces.

/// Bracketed sections with decorative, plain and numbered bullets
pub const LEGACY_DIGEST: &str = "本日の主要ニュースをお届けします。

【テクノロジー】
◾️ **生成AIの企業導入が加速**
◎概要：大手企業の半数が生成AIを業務に導入した。
◎ビジネス的示唆：早期導入企業は生産性で優位に立つ。
【URL】https://tech.example.com/ai-adoption

◾️ **半導体の供給が回復**
◎概要：主要メーカーの生産が平常に戻った。
◎ビジネス的示唆：調達リードタイムの短縮が見込まれる。
【URL】https://tech.example.com/chips

【経済・ビジネス】
• 日銀が政策金利を据え置き
◎概要：市場予想通りの決定となった。
◎ビジネス的示唆：借入コストは当面安定する。
【URL】https://biz.example.com/boj

• 円相場が小幅に反発
◎概要：輸出企業の収益見通しが改善。
◎ビジネス的示唆：為替ヘッジの見直し時期。
【URL】https://biz.example.com/yen

【政治・国際関係】
1. 日米首脳会談が開催
◎概要：経済安全保障で協力を確認した。
◎ビジネス的示唆：サプライチェーン再編の追い風。
【URL】https://pol.example.com/summit
";

/// Delimited sections with TITLE/SUMMARY/INSIGHT/URL blocks
pub const STRUCTURED_DIGEST: &str = "=== TECHNOLOGY ===
TITLE: 量子コンピュータの商用化
SUMMARY: 国内初の商用機が稼働した。
INSIGHT: 創薬分野での活用が期待される。
URL: https://tech.example.com/quantum

TITLE: Open-source model release
SUMMARY: A new open model tops benchmarks.
INSIGHT: Lower inference costs for startups.
URL: https://tech.example.com/open-model
=== TECHNOLOGY ===

=== BUSINESS ===
TITLE: 大手銀行が統合を発表
SUMMARY: 地方銀行の再編が進む。
INSIGHT: 金融サービスの選択肢が変化する。
URL: https://biz.example.com/merger
=== BUSINESS ===

=== POLITICS ===
TITLE: 予算案が衆院を通過
SUMMARY: 過去最大規模の予算となった。
INSIGHT: 公共投資関連の受注が増える見通し。
URL: https://pol.example.com/budget
=== POLITICS ===
";

/// Markdown heading, colon label and NEWS heading in one document
pub const MIXED_DIGEST: &str = "## Technology
- Chipmaker posts record revenue
  Summary: Data-center demand drove growth.
  https://tech.example.com/chipmaker
Business:
- Retail sales slow in spring
  Summary: Consumers cut discretionary spending.
  https://biz.example.com/retail
POLITICS NEWS
- Parliament passes privacy bill
  https://pol.example.com/privacy
";

/// No category markers, two links
pub const PROSE_TWO_URLS: &str = "Global markets rallied after the central bank signaled a pause in rate hikes.
https://markets.example.com/rally
Lawmakers approved a new package of semiconductor subsidies this week.
https://government.example.com/subsidies
";

/// A section whose only link sits in a later section, far from the title
pub fn far_url_digest() -> String {
    let filler = "。".repeat(6000);
    format!(
        "【経済】\n• 物流大手が新拠点を開設\n◎概要：自動倉庫を導入した。\n【政治】\n{filler}\n• 参考資料 https://pol.example.com/doc\n"
    )
}

/// Chat API response envelope around a document
pub fn answer_envelope(document: &str) -> serde_json::Value {
    serde_json::json!({
        "event": "message",
        "conversation_id": "c-1",
        "answer": document,
    })
}
