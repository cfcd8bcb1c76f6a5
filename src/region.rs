//! Dialect clusters keyed by first-level administrative region.

use std::collections::HashMap;
use std::sync::LazyLock;

use serde::Serialize;

/// A group of prefectures sharing one set of comment templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RegionKey {
    /// Standard Japanese; used for every unmapped region.
    Standard,
    Hokkaido,
    Tohoku,
    Nagoya,
    Kansai,
    Hiroshima,
    Hakata,
    Okinawa,
}

// Prefecture names as returned for `language=ja`, plus the romanized spellings returned
// for other languages.
const PREFECTURES: &[(RegionKey, &[&str])] = &[
    (RegionKey::Hokkaido, &["北海道", "hokkaido"]),
    (
        RegionKey::Tohoku,
        &[
            "青森県", "岩手県", "宮城県", "秋田県", "山形県", "福島県", "aomori", "iwate",
            "miyagi", "akita", "yamagata", "fukushima",
        ],
    ),
    (RegionKey::Nagoya, &["愛知県", "岐阜県", "aichi", "gifu"]),
    (
        RegionKey::Kansai,
        &[
            "大阪府", "京都府", "兵庫県", "奈良県", "和歌山県", "滋賀県", "osaka", "ōsaka",
            "kyoto", "kyōto", "hyogo", "hyōgo", "nara", "wakayama", "shiga",
        ],
    ),
    (
        RegionKey::Hiroshima,
        &[
            "広島県", "岡山県", "山口県", "鳥取県", "島根県", "hiroshima", "okayama",
            "yamaguchi", "tottori", "shimane",
        ],
    ),
    (
        RegionKey::Hakata,
        &[
            "福岡県", "佐賀県", "長崎県", "熊本県", "大分県", "宮崎県", "鹿児島県", "fukuoka",
            "saga", "nagasaki", "kumamoto", "oita", "ōita", "miyazaki", "kagoshima",
        ],
    ),
    (RegionKey::Okinawa, &["沖縄県", "okinawa"]),
];

static REGION_TABLE: LazyLock<HashMap<&'static str, RegionKey>> = LazyLock::new(|| {
    PREFECTURES
        .iter()
        .flat_map(|&(key, names)| names.iter().map(move |&name| (name, key)))
        .collect()
});

impl RegionKey {
    /// Cluster used when a region is unknown or has no templates of its own.
    pub const NEUTRAL: RegionKey = RegionKey::Standard;

    pub const ALL: [RegionKey; 8] = [
        RegionKey::Standard,
        RegionKey::Hokkaido,
        RegionKey::Tohoku,
        RegionKey::Nagoya,
        RegionKey::Kansai,
        RegionKey::Hiroshima,
        RegionKey::Hakata,
        RegionKey::Okinawa,
    ];

    /// Map an admin1 name to its dialect cluster.
    ///
    /// Romanized names match case-insensitively, with or without a trailing
    /// "Prefecture" / "-fu" / "-ken".
    pub fn from_admin1(admin1: Option<&str>) -> Self {
        let Some(name) = admin1.map(str::trim).filter(|n| !n.is_empty()) else {
            return Self::NEUTRAL;
        };
        let lowered = name.to_lowercase();
        let bare = lowered
            .trim_end_matches(" prefecture")
            .trim_end_matches("-fu")
            .trim_end_matches("-ken");
        REGION_TABLE
            .get(name)
            .or_else(|| REGION_TABLE.get(bare))
            .copied()
            .unwrap_or(Self::NEUTRAL)
    }
}
