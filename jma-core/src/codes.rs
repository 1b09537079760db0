//! Static weather-code tables: one emoji icon and one Japanese label per
//! JMA telop code the app knows about.

/// Emoji icon for a weather code. Unknown codes map to `❓`.
pub fn weather_icon(code: &str) -> &'static str {
    match code {
        "100" => "☀️",
        "101" => "🌤️",
        "102" => "🌦️",
        "110" => "☀️☁️",
        "111" => "🌧️☀️",
        "112" => "🌧️❄️",
        "114" => "❄️☀️",
        "200" => "☁️",
        "201" => "🌤️",
        "202" => "☁️🌧️",
        "203" => "☁️❄️",
        "204" => "☁️❄️⚡️",
        "205" => "☁️❄️",
        "206" => "🌧️☁️",
        "207" => "☁️🌧️❄️",
        "211" => "❄️☀️",
        "212" => "❄️☁️",
        "214" => "☁️🌧️",
        "218" => "☁️❄️",
        "270" => "❄️☁️",
        "300" => "🌧️",
        "302" => "❄️",
        "313" => "❄️🌧️",
        "314" => "🌧️→❄️",
        "317" => "🌧️❄️☁️",
        "400" => "❄️",
        "402" => "❄️☁️",
        "413" => "❄️→🌧️",
        "500" => "⛈️",
        _ => "❓",
    }
}

/// Japanese label for a weather code, when the table knows it.
pub fn weather_text(code: &str) -> Option<&'static str> {
    let text = match code {
        "100" => "晴れ",
        "101" => "晴れ時々曇り",
        "102" => "晴れ時々雨",
        "110" => "晴れのち時々曇り",
        "111" => "雨時々晴れ",
        "112" => "雨時々雪",
        "114" => "雪時々晴れ",
        "200" => "曇り",
        "201" => "曇り時々晴れ",
        "202" => "曇り時々雨",
        "203" => "曇り時々雪",
        "204" => "曇り時々雪で雷を伴う",
        "205" => "曇り時々雪",
        "206" => "雨時々曇り",
        "207" => "曇り時々雨か雪",
        "211" => "雪時々晴れ",
        "212" => "雪時々曇り",
        "214" => "曇り後雨",
        "218" => "曇り時々雪",
        "270" => "雪時々曇り",
        "300" => "雨",
        "302" => "雪",
        "313" => "雪のち雨",
        "314" => "雨のち雪",
        "317" => "雨か雪のち曇り",
        "400" => "雪",
        "402" => "雪時々曇り",
        "413" => "雪のち雨",
        "500" => "雷雨",
        _ => return None,
    };
    Some(text)
}

/// Label for display: the table entry, or the unknown-code fallback.
pub fn describe(code: &str) -> String {
    match weather_text(code) {
        Some(text) => text.to_string(),
        None => format!("不明な天気 (コード: {code})"),
    }
}
