//! Built-in comment sentences.
//!
//! Each cluster covers only the combinations it has something to say about; the
//! synthesizer falls back to the standard cluster and then to the per-sky sentences.

use crate::classify::{Sky, TemperatureBand, TimeOfDay};
use crate::commentary::TemplateBank;
use crate::region::RegionKey;

use RegionKey::*;
use Sky::*;
use TemperatureBand::*;
use TimeOfDay::*;

/// Used when no layer of the bank has a sentence.
pub const SAFE_COMMENT: &str = "天気の変化に気をつけて、よい一日をお過ごしください。";

/// Used for the thunder hazard when the bank has no clause for it.
pub const SAFE_THUNDER_CLAUSE: &str = "雷にも注意してください。";

/// Cosmetic suffixes occasionally appended to a comment.
pub const DECORATIONS: &[&str] = &["♪", "☆", "✨", "(^^)", "( ´ ▽ ` )"];

const ANY_TEMP: &[TemperatureBand] = &TemperatureBand::ALL;
const ANY_TIME: &[TimeOfDay] = &TimeOfDay::ALL;
const DAYLIGHT: &[TimeOfDay] = &[Morning, Day, Evening];
const MILD: &[TemperatureBand] = &[Cool, Warm];
const CHILLY: &[TemperatureBand] = &[Cold, Cool];

struct Entry {
    region: RegionKey,
    sky: Sky,
    temperatures: &'static [TemperatureBand],
    times: &'static [TimeOfDay],
    sentences: &'static [&'static str],
}

const fn entry(
    region: RegionKey,
    sky: Sky,
    temperatures: &'static [TemperatureBand],
    times: &'static [TimeOfDay],
    sentences: &'static [&'static str],
) -> Entry {
    Entry {
        region,
        sky,
        temperatures,
        times,
        sentences,
    }
}

const ENTRIES: &[Entry] = &[
    // Standard
    entry(
        Standard,
        Clear,
        &[Hot],
        DAYLIGHT,
        &[
            "よく晴れて暑くなりそうです。こまめに水分補給を。",
            "日差しが強いです。帽子や日焼け止めがあると安心です。",
        ],
    ),
    entry(
        Standard,
        Clear,
        &[Warm],
        DAYLIGHT,
        &[
            "過ごしやすい晴れ空です。お出かけ日和ですね。",
            "さわやかな晴れです。洗濯物もよく乾きそうです。",
        ],
    ),
    entry(
        Standard,
        Clear,
        &[Cool],
        DAYLIGHT,
        &["晴れていますが少しひんやり。羽織るものがあると安心です。"],
    ),
    entry(
        Standard,
        Clear,
        &[Cold],
        DAYLIGHT,
        &["晴れていても冷え込みます。暖かくしてお出かけください。"],
    ),
    entry(Standard, Clear, ANY_TEMP, &[Night], &["星がきれいに見えそうな夜です。"]),
    entry(
        Standard,
        Clear,
        CHILLY,
        &[Night],
        &["雲の少ない夜です。放射冷却で冷えやすいのでご注意を。"],
    ),
    entry(
        Standard,
        Clear,
        &[Hot],
        &[Night],
        &["寝苦しい熱帯夜になりそうです。寝る前の水分補給を忘れずに。"],
    ),
    entry(
        Standard,
        Cloudy,
        ANY_TEMP,
        ANY_TIME,
        &[
            "雲の多い空模様です。急な天気の変化に注意しましょう。",
            "すっきりしない空ですが、雨の心配は少なそうです。",
        ],
    ),
    entry(Standard, Cloudy, &[Hot], DAYLIGHT, &["曇りでも蒸し暑いです。熱中症に気をつけて。"]),
    entry(
        Standard,
        Rain,
        ANY_TEMP,
        ANY_TIME,
        &["雨が降りそうです。傘を忘れずに。", "雨の予報です。折りたたみ傘があると安心です。"],
    ),
    entry(Standard, Rain, &[Cold], ANY_TIME, &["冷たい雨になりそうです。体を冷やさないように。"]),
    entry(
        Standard,
        Rain,
        ANY_TEMP,
        &[Evening, Night],
        &["帰り道は雨に注意。足元に気をつけてください。"],
    ),
    entry(
        Standard,
        Snow,
        CHILLY,
        ANY_TIME,
        &[
            "雪の予報です。路面の凍結に注意してください。",
            "雪が降りそうです。滑りにくい靴がおすすめです。",
        ],
    ),
    entry(Standard, Windy, ANY_TEMP, ANY_TIME, &["風が強くなりそうです。飛ばされやすい物に注意。"]),
    entry(
        Standard,
        Thunder,
        ANY_TEMP,
        ANY_TIME,
        &["雷雨の恐れがあります。できるだけ屋内で過ごしましょう。"],
    ),
    // Kansai
    entry(
        Kansai,
        Rain,
        ANY_TEMP,
        ANY_TIME,
        &[
            "雨降ってるで。傘持って行きや〜。",
            "今日は雨やから傘忘れたらアカンで！",
            "しとしと雨やなぁ。折りたたみ傘でもええから持っとき。",
        ],
    ),
    entry(Kansai, Rain, &[Hot], ANY_TIME, &["蒸し暑い雨やなぁ。傘とタオル両方いるで。"]),
    entry(Kansai, Rain, &[Cold], ANY_TIME, &["冷たい雨やで。傘さして、あったかくしときや。"]),
    entry(
        Kansai,
        Clear,
        &[Hot],
        DAYLIGHT,
        &[
            "めっちゃ晴れてるやん！暑いから水分とりや〜。",
            "日差しキツいで。日傘か帽子あったほうがええわ。",
        ],
    ),
    entry(
        Kansai,
        Clear,
        MILD,
        DAYLIGHT,
        &["ええ天気やなぁ。ちょっと散歩でも行ってき！", "気持ちええ晴れやで。洗濯日和やわ。"],
    ),
    entry(Kansai, Clear, &[Cold], DAYLIGHT, &["晴れてるけど寒いで。上着一枚持っとき。"]),
    entry(Kansai, Clear, ANY_TEMP, &[Night], &["よう晴れた夜やな。星見えるかもしれんで。"]),
    entry(
        Kansai,
        Cloudy,
        ANY_TEMP,
        ANY_TIME,
        &[
            "曇りやけど、まあ降らんやろ。たぶんな。",
            "どんよりしとるなぁ。念のため空模様は気にしといてや。",
        ],
    ),
    entry(Kansai, Cloudy, &[Cold], ANY_TIME, &["どんよりして寒いなぁ。あったかくしときや。"]),
    entry(Kansai, Snow, ANY_TEMP, ANY_TIME, &["雪やで！足元滑るから気ぃつけや。"]),
    entry(Kansai, Windy, ANY_TEMP, ANY_TIME, &["風強いで。帽子飛ばされんように気ぃつけや。"]),
    entry(Kansai, Thunder, ANY_TEMP, ANY_TIME, &["雷鳴っとるで！外出はほどほどにしとき。"]),
    // Hokkaido
    entry(
        Hokkaido,
        Snow,
        ANY_TEMP,
        ANY_TIME,
        &[
            "なまら雪降ってるっしょ。滑らんように気をつけてね。",
            "雪かき大変だべさ。無理しないでね。",
        ],
    ),
    entry(Hokkaido, Clear, CHILLY, ANY_TIME, &["晴れてるけどしばれるわ〜。手袋忘れんでね。"]),
    entry(Hokkaido, Clear, &[Warm, Hot], DAYLIGHT, &["なまらいい天気だべさ！"]),
    entry(
        Hokkaido,
        Rain,
        ANY_TEMP,
        ANY_TIME,
        &["雨降ってきそうだべ。傘持ってったほうがいいっしょ。"],
    ),
    entry(Hokkaido, Cloudy, ANY_TEMP, ANY_TIME, &["曇ってるねぇ。降らなきゃいいっしょ。"]),
    entry(Hokkaido, Windy, &[Cold], ANY_TIME, &["風強いっしょ。吹雪かないといいけどね。"]),
    // Tohoku
    entry(Tohoku, Snow, ANY_TEMP, ANY_TIME, &["雪だべ。足元さ気ぃつけてけろ。"]),
    entry(Tohoku, Rain, ANY_TEMP, ANY_TIME, &["雨降るべ。傘っこ持ってげ。"]),
    entry(Tohoku, Clear, MILD, DAYLIGHT, &["いい天気だなや。"]),
    entry(Tohoku, Cloudy, &[Cold], ANY_TIME, &["寒ぐなるがら、あったかぐしてけろ。"]),
    // Nagoya
    entry(Nagoya, Clear, &[Hot], DAYLIGHT, &["でら暑いがや！水分とりゃあよ。"]),
    entry(Nagoya, Rain, ANY_TEMP, ANY_TIME, &["雨だがや。傘持ってきゃあよ。"]),
    entry(Nagoya, Cloudy, ANY_TEMP, DAYLIGHT, &["曇っとるがね。降らんとええけどなぁ。"]),
    // Hiroshima
    entry(Hiroshima, Rain, ANY_TEMP, ANY_TIME, &["雨じゃけぇ、傘持って行きんさい。"]),
    entry(Hiroshima, Clear, MILD, DAYLIGHT, &["ええ天気じゃのう！"]),
    entry(Hiroshima, Clear, &[Hot], DAYLIGHT, &["ぶち暑いけぇ、水分とりんさいよ。"]),
    // Hakata
    entry(Hakata, Rain, ANY_TEMP, ANY_TIME, &["雨降りよるけん、傘持っていきんしゃい。"]),
    entry(Hakata, Clear, &[Warm, Hot], DAYLIGHT, &["よか天気ばい！"]),
    entry(Hakata, Windy, ANY_TEMP, ANY_TIME, &["風の強かけん気をつけてね。"]),
    // Okinawa
    entry(Okinawa, Clear, &[Hot], DAYLIGHT, &["でーじ暑いさぁ。日焼けに気をつけてね〜。"]),
    entry(Okinawa, Clear, MILD, ANY_TIME, &["いい天気さぁ。海がきれいだはずよ〜。"]),
    entry(Okinawa, Rain, ANY_TEMP, ANY_TIME, &["雨さぁ。傘持っていきよ〜。でも、なんくるないさ。"]),
    entry(Okinawa, Windy, ANY_TEMP, ANY_TIME, &["風が強いさぁ。台風じゃないといいね。"]),
    entry(Okinawa, Cloudy, ANY_TEMP, ANY_TIME, &["曇りだけど、なんくるないさ〜。"]),
];

const GENERIC: &[(Sky, &[&str])] = &[
    (Clear, &["晴れの予報です。"]),
    (Cloudy, &["曇りの予報です。"]),
    (Rain, &["雨の予報です。傘があると安心です。"]),
    (Snow, &["雪の予報です。足元に注意してください。"]),
    (Thunder, &["雷雨の予報です。屋内で過ごすのが安全です。"]),
    (Windy, &["風が強い予報です。"]),
];

const THUNDER_CLAUSES: &[(RegionKey, &[&str])] = &[
    (Standard, &["雷にも注意してください。", "雷鳴が聞こえたら建物の中へ避難しましょう。"]),
    (Kansai, &["ゴロゴロ言うたら建物の中入りや！", "雷もあるかもしれんから気ぃつけや。"]),
    (Hokkaido, &["雷も鳴るかもしれないから気をつけてね。"]),
    (Hiroshima, &["雷も鳴るかもしれんけぇ、気ぃつけんさいよ。"]),
    (Hakata, &["雷も鳴りそうやけん気をつけてね。"]),
    (Okinawa, &["雷もあるかもさぁ、気をつけてよ〜。"]),
];

/// Expand the authored entries into a bank.
pub(crate) fn builtin_bank() -> TemplateBank {
    let mut bank = TemplateBank::default();
    for entry in ENTRIES {
        for &temperature in entry.temperatures {
            for &time_of_day in entry.times {
                bank = bank.with_sentences(
                    (entry.region, entry.sky, temperature, time_of_day),
                    entry.sentences.iter().copied(),
                );
            }
        }
    }
    for &(sky, sentences) in GENERIC {
        bank = bank.with_generic(sky, sentences.iter().copied());
    }
    for &(region, clauses) in THUNDER_CLAUSES {
        bank = bank.with_thunder_clauses(region, clauses.iter().copied());
    }
    bank
}
