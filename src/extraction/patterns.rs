// src/extraction/patterns.rs
// Ranked rule table for place-name recognition. Precedence is explicit in
// each rule's base confidence, not in registry order, so the table stays
// independently testable.

use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};

use crate::models::core::RecognizerKind;

/// Curated closed list of well-known cities and landmarks. Matched
/// case-insensitively as whole words; longer names are tried before their
/// prefixes so "New York City" beats "New York".
pub const GAZETTEER: [&str; 78] = [
    "New York City",
    "New York",
    "NYC",
    "Los Angeles",
    "San Francisco",
    "Chicago",
    "Miami",
    "Seattle",
    "Boston",
    "Las Vegas",
    "Toronto",
    "Vancouver",
    "Mexico City",
    "Rio de Janeiro",
    "São Paulo",
    "Buenos Aires",
    "London",
    "Paris",
    "Berlin",
    "Munich",
    "München",
    "Rome",
    "Madrid",
    "Barcelona",
    "Lisbon",
    "Amsterdam",
    "Vienna",
    "Prague",
    "Athens",
    "Istanbul",
    "Dubai",
    "Cairo",
    "Cape Town",
    "Marrakech",
    "Mumbai",
    "Delhi",
    "Bangkok",
    "Singapore",
    "Hong Kong",
    "Tokyo",
    "東京",
    "Kyoto",
    "京都",
    "Osaka",
    "Seoul",
    "서울",
    "Busan",
    "부산",
    "Beijing",
    "北京",
    "Shanghai",
    "上海",
    "Taipei",
    "Hanoi",
    "Hà Nội",
    "Sài Gòn",
    "Ho Chi Minh City",
    "Sydney",
    "Melbourne",
    "Auckland",
    "Bali",
    "Phuket",
    "Santorini",
    "Reykjavik",
    "Central Park",
    "Times Square",
    "Golden Gate Bridge",
    "Statue of Liberty",
    "Niagara Falls",
    "Grand Canyon",
    "Yosemite",
    "Yellowstone",
    "Eiffel Tower",
    "Big Ben",
    "Colosseum",
    "Taj Mahal",
    "Machu Picchu",
    "Mount Fuji",
];

/// One recognizer: a compiled pattern with the class tag and base confidence
/// the extractor stamps on its matches.
pub struct PatternRule {
    pub kind: RecognizerKind,
    pub base_confidence: f64,
    regex: Regex,
}

impl PatternRule {
    fn new(kind: RecognizerKind, base_confidence: f64, pattern: &str, case_insensitive: bool) -> Self {
        let regex = RegexBuilder::new(pattern)
            .case_insensitive(case_insensitive)
            .build()
            .expect("built-in recognizer pattern must compile");
        Self {
            kind,
            base_confidence,
            regex,
        }
    }

    /// Yield the raw text span for every match: capture group 1 when the
    /// pattern defines one, the whole match otherwise.
    pub fn matches<'t>(&'t self, text: &'t str) -> impl Iterator<Item = &'t str> + 't {
        self.regex.captures_iter(text).filter_map(|caps| {
            caps.get(1)
                .or_else(|| caps.get(0))
                .map(|m| m.as_str())
        })
    }
}

fn gazetteer_pattern() -> String {
    // Alternation sorted longest-first so the leftmost match prefers the
    // most specific name.
    let mut names: Vec<&str> = GAZETTEER.to_vec();
    names.sort_by_key(|n| std::cmp::Reverse(n.chars().count()));
    let escaped: Vec<String> = names.iter().map(|n| regex::escape(n)).collect();
    format!(r"\b(?:{})\b", escaped.join("|"))
}

static REGISTRY: Lazy<Vec<PatternRule>> = Lazy::new(|| {
    vec![
        // 1. Explicit location marker (glyph or keyword) followed by free
        //    text in any script, up to the end of line or a social token.
        PatternRule::new(
            RecognizerKind::MarkerPrefixed,
            0.95,
            r"(?:📍|🗺️|🧭|\b(?i:location|address|place)\s*:)\s*([^\r\n#@]{3,100})",
            false,
        ),
        // 2. "City, Region" two-part proper-noun pattern.
        PatternRule::new(
            RecognizerKind::CityRegion,
            0.88,
            r"\b([\p{Lu}][\p{L}'’.\-]*(?:\s+[\p{Lu}][\p{L}'’.\-]*){0,3},\s*[\p{Lu}][\p{L}'’.\-]*(?:\s+[\p{Lu}][\p{L}'’.\-]*){0,3})\b",
            false,
        ),
        // 3. Closed gazetteer of major cities and landmarks.
        PatternRule::new(RecognizerKind::Gazetteer, 0.92, &gazetteer_pattern(), true),
        // 4. Proper noun(s) followed by a typed place suffix.
        PatternRule::new(
            RecognizerKind::TypedSuffix,
            0.88,
            r"\b((?:[\p{Lu}][\p{L}'’\-]*\s+){1,4}(?:Beach|Museum|Tower|Park|Hotel|Resort|Street|Avenue|Boulevard|Bridge|Castle|Cathedral|Church|Temple|Shrine|Market|Square|Palace|Garden|Gardens|Station|Airport|Island|Bay|Harbor|Harbour|Pier|Plaza|Mall|University|College|Library|Stadium|Arena|Gallery|Zoo|Aquarium|Falls|Lake|River|Mountain|Canyon|Valley|Trail|Fort|Lighthouse))\b",
            false,
        ),
        // 5. Preposition-governed mention. Keyword case folded by hand so the
        //    captured name can still require an initial capital (or any CJK /
        //    Hangul / Kana character, which carry no case).
        PatternRule::new(
            RecognizerKind::Preposition,
            0.78,
            r"\b(?:[Aa]t|[Nn]ear|[Vv]isiting|[Ee]xploring)\s+([\p{Lu}\p{Han}\p{Hangul}\p{Hiragana}\p{Katakana}][\p{L}\p{N}'’.\-]*(?:\s+[\p{Lu}\p{Han}\p{Hangul}\p{Hiragana}\p{Katakana}][\p{L}\p{N}'’.\-]*){0,3})",
            false,
        ),
        // 6. Numbered street address.
        PatternRule::new(
            RecognizerKind::StreetAddress,
            0.83,
            r"\b(\d{1,5}\s+(?:[\p{Lu}][\p{L}'’\-]*\s+){1,3}(?:Street|St|Avenue|Ave|Boulevard|Blvd|Road|Rd|Lane|Ln|Drive|Dr|Court|Ct|Way|Place|Pl)\b\.?)",
            false,
        ),
        // 7. Hashtag / @-mention token that could be a place name.
        PatternRule::new(
            RecognizerKind::SocialTag,
            0.70,
            r"[#@]([\p{L}][\p{L}\p{N}_]{1,40})",
            false,
        ),
        // 8. Generic multi-word Title-Case run, lowest-precision fallback.
        PatternRule::new(
            RecognizerKind::TitleCaseRun,
            0.65,
            r"\b([\p{Lu}][\p{L}'’\-]+(?:\s[\p{Lu}][\p{L}'’\-]+){1,5})\b",
            false,
        ),
    ]
});

/// The ranked rule table, compiled once per process.
pub fn registry() -> &'static [PatternRule] {
    &REGISTRY
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(kind: RecognizerKind) -> &'static PatternRule {
        registry().iter().find(|r| r.kind == kind).unwrap()
    }

    #[test]
    fn registry_covers_all_recognizer_classes() {
        assert_eq!(registry().len(), 8);
        // Confidence encodes precedence: markers highest, fallback lowest.
        let marker = rule(RecognizerKind::MarkerPrefixed).base_confidence;
        let fallback = rule(RecognizerKind::TitleCaseRun).base_confidence;
        for r in registry() {
            assert!(r.base_confidence <= marker);
            assert!(r.base_confidence >= fallback);
        }
    }

    #[test]
    fn marker_rule_captures_after_glyph_and_keyword() {
        let r = rule(RecognizerKind::MarkerPrefixed);
        let spans: Vec<&str> = r.matches("📍 Central Park, just visited! #NYC").collect();
        assert_eq!(spans, vec!["Central Park, just visited! "]);

        let spans: Vec<&str> = r.matches("location: Trevi Fountain").collect();
        assert_eq!(spans, vec!["Trevi Fountain"]);
    }

    #[test]
    fn marker_keywords_require_a_word_boundary() {
        let r = rule(RecognizerKind::MarkerPrefixed);
        assert_eq!(r.matches("Relocation: Main Office").count(), 0);
        assert_eq!(r.matches("Dislocation: something painful").count(), 0);

        let spans: Vec<&str> = r.matches("Location: Main Office").collect();
        assert_eq!(spans, vec!["Main Office"]);
    }

    #[test]
    fn marker_rule_keeps_non_latin_scripts() {
        let r = rule(RecognizerKind::MarkerPrefixed);
        let spans: Vec<&str> = r.matches("📍 東京タワーで夜景を見た").collect();
        assert_eq!(spans.len(), 1);
        assert!(spans[0].contains("東京タワー"));
    }

    #[test]
    fn gazetteer_matches_case_insensitively_and_prefers_longer_names() {
        let r = rule(RecognizerKind::Gazetteer);
        let spans: Vec<&str> = r.matches("weekend in new york city!").collect();
        assert_eq!(spans, vec!["new york city"]);

        let spans: Vec<&str> = r.matches("서울 is beautiful in spring").collect();
        assert_eq!(spans, vec!["서울"]);
    }

    #[test]
    fn city_region_rule_needs_both_halves_capitalized() {
        let r = rule(RecognizerKind::CityRegion);
        let spans: Vec<&str> = r.matches("Flying to Portland, Oregon tomorrow").collect();
        assert_eq!(spans, vec!["Portland, Oregon"]);
        assert_eq!(r.matches("portland, oregon").count(), 0);
    }

    #[test]
    fn typed_suffix_rule_matches_proper_noun_plus_suffix() {
        let r = rule(RecognizerKind::TypedSuffix);
        let spans: Vec<&str> = r.matches("Lunch near Bondi Beach was great").collect();
        assert_eq!(spans, vec!["Bondi Beach"]);
        assert_eq!(r.matches("the beach was great").count(), 0);
    }

    #[test]
    fn street_address_rule_matches_numbered_addresses() {
        let r = rule(RecognizerKind::StreetAddress);
        let spans: Vec<&str> = r.matches("meet at 221 Baker Street at noon").collect();
        assert_eq!(spans, vec!["221 Baker Street"]);
    }

    #[test]
    fn social_tag_rule_strips_the_sigil() {
        let r = rule(RecognizerKind::SocialTag);
        let spans: Vec<&str> = r.matches("#Santorini sunset @GoldenGate").collect();
        assert_eq!(spans, vec!["Santorini", "GoldenGate"]);
    }

    #[test]
    fn title_case_rule_requires_two_to_six_tokens() {
        let r = rule(RecognizerKind::TitleCaseRun);
        let spans: Vec<&str> = r.matches("We walked around Piazza San Marco today").collect();
        assert!(spans.contains(&"Piazza San Marco"));
        assert_eq!(r.matches("just lowercase words here").count(), 0);
    }

    #[test]
    fn preposition_rule_accepts_cased_and_caseless_scripts() {
        let r = rule(RecognizerKind::Preposition);
        let spans: Vec<&str> = r.matches("visiting Lake Bled next week").collect();
        assert_eq!(spans, vec!["Lake Bled"]);

        let spans: Vec<&str> = r.matches("near 서울역 tonight").collect();
        assert_eq!(spans, vec!["서울역"]);
        // Lowercase names are not place-like for this rule.
        assert_eq!(r.matches("at home with friends").count(), 0);
    }
}
