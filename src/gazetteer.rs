//! Static lookup tables used to expand a place query into geocoding trials.

use std::collections::HashMap;
use std::sync::LazyLock;

/// Suffix appended to short queries to steer the geocoder towards the city.
pub const CITY_SUFFIX: &str = "市";

/// Endings of Japanese administrative unit names.
pub const ADMIN_SUFFIXES: &[&str] = &["市", "区", "町", "村", "郡", "都", "道", "府", "県"];

// Landmarks, abbreviations and nicknames mapped to a name the geocoder knows.
// ASCII keys are lowercase.
const ALIASES: &[(&str, &str)] = &[
    ("usj", "此花区"),
    ("ユニバ", "此花区"),
    ("ユニバーサル・スタジオ・ジャパン", "此花区"),
    ("tdl", "浦安市"),
    ("tds", "浦安市"),
    ("tdr", "浦安市"),
    ("ディズニー", "浦安市"),
    ("東京ディズニーランド", "浦安市"),
    ("東京ディズニーシー", "浦安市"),
    ("舞浜", "浦安市"),
    ("浦安", "浦安市"),
    ("スカイツリー", "墨田区"),
    ("東京スカイツリー", "墨田区"),
    ("東京タワー", "港区"),
    ("渋谷", "渋谷区"),
    ("新宿", "新宿区"),
    ("池袋", "豊島区"),
    ("秋葉原", "千代田区"),
    ("アキバ", "千代田区"),
    ("羽田", "大田区"),
    ("羽田空港", "大田区"),
    ("hnd", "大田区"),
    ("成田空港", "成田市"),
    ("nrt", "成田市"),
    ("関空", "泉佐野市"),
    ("関西空港", "泉佐野市"),
    ("kix", "泉佐野市"),
    ("伊丹空港", "豊中市"),
    ("梅田", "大阪市"),
    ("難波", "大阪市"),
    ("なんば", "大阪市"),
    ("ミナミ", "大阪市"),
    ("キタ", "大阪市"),
    ("道頓堀", "大阪市"),
    ("通天閣", "大阪市"),
    ("大阪城", "大阪市"),
    ("甲子園", "西宮市"),
    ("金閣寺", "京都市"),
    ("清水寺", "京都市"),
    ("嵐山", "京都市"),
    ("伏見稲荷", "京都市"),
    ("奈良公園", "奈良市"),
    ("東大寺", "奈良市"),
    ("三宮", "神戸市"),
    ("天神", "福岡市"),
    ("中洲", "福岡市"),
    ("博多", "福岡市"),
    ("すすきの", "札幌市"),
    ("ハウステンボス", "佐世保市"),
    ("宮島", "廿日市市"),
    ("厳島神社", "廿日市市"),
    ("美ら海水族館", "本部町"),
    ("国際通り", "那覇市"),
    ("富士山", "富士吉田市"),
    ("名駅", "名古屋市"),
    ("栄", "名古屋市"),
];

// Japanese names with the romanized spelling the geocoder also indexes.
const ROMANIZATIONS: &[(&str, &str)] = &[
    ("東京", "Tokyo"),
    ("大阪", "Osaka"),
    ("京都", "Kyoto"),
    ("札幌", "Sapporo"),
    ("名古屋", "Nagoya"),
    ("福岡", "Fukuoka"),
    ("横浜", "Yokohama"),
    ("神戸", "Kobe"),
    ("仙台", "Sendai"),
    ("広島", "Hiroshima"),
    ("那覇", "Naha"),
    ("沖縄", "Okinawa"),
    ("北海道", "Hokkaido"),
    ("奈良", "Nara"),
    ("金沢", "Kanazawa"),
    ("鹿児島", "Kagoshima"),
    ("熊本", "Kumamoto"),
    ("長崎", "Nagasaki"),
    ("新潟", "Niigata"),
    ("静岡", "Shizuoka"),
    ("岡山", "Okayama"),
    ("松山", "Matsuyama"),
    ("高松", "Takamatsu"),
    ("函館", "Hakodate"),
    ("青森", "Aomori"),
    ("盛岡", "Morioka"),
    ("秋田", "Akita"),
    ("山形", "Yamagata"),
    ("福島", "Fukushima"),
    ("宇都宮", "Utsunomiya"),
    ("千葉", "Chiba"),
    ("さいたま", "Saitama"),
    ("岐阜", "Gifu"),
    ("和歌山", "Wakayama"),
    ("大津", "Otsu"),
    ("姫路", "Himeji"),
    ("大分", "Oita"),
    ("宮崎", "Miyazaki"),
    ("佐賀", "Saga"),
    ("博多", "Hakata"),
];

static ALIAS_TABLE: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| ALIASES.iter().copied().collect());

static ROMANIZATION_TABLE: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| ROMANIZATIONS.iter().copied().collect());

fn table_key(query: &str) -> String {
    query.trim().to_lowercase()
}

/// Geocodable substitute for a known alias, landmark or abbreviation.
pub fn alias(query: &str) -> Option<&'static str> {
    ALIAS_TABLE.get(table_key(query).as_str()).copied()
}

/// Romanized spelling of a known Japanese place name.
pub fn romanize(query: &str) -> Option<&'static str> {
    ROMANIZATION_TABLE.get(table_key(query).as_str()).copied()
}

/// Whether the query already ends in an administrative unit such as `市` or `県`.
pub fn has_admin_suffix(query: &str) -> bool {
    ADMIN_SUFFIXES.iter().any(|suffix| query.ends_with(suffix))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alias_lookup_ignores_ascii_case_and_padding() {
        assert_eq!(alias("USJ"), Some("此花区"));
        assert_eq!(alias(" usj "), Some("此花区"));
        assert_eq!(alias("東京ディズニーランド"), Some("浦安市"));
        assert_eq!(alias("大阪"), None);
    }

    #[test]
    fn romanization_lookup() {
        assert_eq!(romanize("大阪"), Some("Osaka"));
        assert_eq!(romanize("札幌"), Some("Sapporo"));
        assert_eq!(romanize("大阪市"), None);
    }

    #[test]
    fn admin_suffix_detection() {
        assert!(has_admin_suffix("京都市"));
        assert!(has_admin_suffix("大阪府"));
        assert!(has_admin_suffix("北海道"));
        assert!(!has_admin_suffix("札幌"));
        assert!(!has_admin_suffix("USJ"));
    }

    #[test]
    fn tables_have_no_empty_entries() {
        for (key, value) in ALIASES.iter().chain(ROMANIZATIONS) {
            assert!(!key.is_empty() && !value.is_empty());
            assert_eq!(*key, key.to_lowercase(), "alias keys are stored lowercase");
        }
        assert_eq!(ALIAS_TABLE.len(), ALIASES.len(), "duplicate alias key");
        assert_eq!(ROMANIZATION_TABLE.len(), ROMANIZATIONS.len());
    }
}
