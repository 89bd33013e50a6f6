//! Built-in icon catalog.
//!
//! Two immutable tables are loaded once per process:
//!
//! - **patterns**: complete pictograms keyed by keywords, scanned top to bottom
//!   by the pattern matcher. Declaration order is load-bearing: when two
//!   patterns share a keyword, the earlier one wins.
//! - **index**: metadata of icons available on the remote icon index, used by
//!   the relevance search. Ties in score keep this order.

use once_cell::sync::Lazy;

use super::model::{IconIndexEntry, IconPattern};

/// Name of the pattern returned when every strategy fails.
pub const FALLBACK_PATTERN_NAME: &str = "info";

type PatternRow = (&'static str, &'static [&'static str], &'static str);
type IndexRow = (
    &'static str,
    &'static str,
    &'static str,
    &'static [&'static str],
);

const BUILTIN_PATTERNS: &[PatternRow] = &[
    (
        "mail",
        &["メール", "mail", "email", "envelope", "message"],
        r#"<svg viewBox="0 0 24 24" width="24" height="24" xmlns="http://www.w3.org/2000/svg"><path d="M4 4h16c1.1 0 2 .9 2 2v12c0 1.1-.9 2-2 2H4c-1.1 0-2-.9-2-2V6c0-1.1.9-2 2-2z" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round"/><path d="M22 6l-10 7L2 6" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round"/></svg>"#,
    ),
    (
        "home",
        &["ホーム", "home", "house", "家"],
        r#"<svg viewBox="0 0 24 24" width="24" height="24" xmlns="http://www.w3.org/2000/svg"><path d="M3 9l9-7 9 7v11a2 2 0 0 1-2 2H5a2 2 0 0 1-2-2z" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round"/><path d="M9 22V12h6v10" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round"/></svg>"#,
    ),
    (
        "settings",
        &["設定", "settings", "gear", "cog", "config"],
        r#"<svg viewBox="0 0 24 24" width="24" height="24" xmlns="http://www.w3.org/2000/svg"><circle cx="12" cy="12" r="3" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round"/><path d="M12 1v6m0 6v6m4.22-10.22l4.24-4.24M6.34 6.34L2.1 2.1m12.12 12.12l4.24 4.24M6.34 17.66l-4.24 4.24M1 12h6m6 0h6" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round"/></svg>"#,
    ),
    (
        "user",
        &["ユーザー", "user", "person", "account", "profile"],
        r#"<svg viewBox="0 0 24 24" width="24" height="24" xmlns="http://www.w3.org/2000/svg"><path d="M20 21v-2a4 4 0 0 0-4-4H8a4 4 0 0 0-4 4v2" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round"/><circle cx="12" cy="7" r="4" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round"/></svg>"#,
    ),
    (
        "search",
        &["検索", "search", "find", "magnifying glass"],
        r#"<svg viewBox="0 0 24 24" width="24" height="24" xmlns="http://www.w3.org/2000/svg"><circle cx="11" cy="11" r="8" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round"/><path d="m21 21-4.35-4.35" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round"/></svg>"#,
    ),
    (
        "menu",
        &["メニュー", "menu", "hamburger", "navigation"],
        r#"<svg viewBox="0 0 24 24" width="24" height="24" xmlns="http://www.w3.org/2000/svg"><path d="M3 12h18M3 6h18M3 18h18" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round"/></svg>"#,
    ),
    (
        "close",
        &["閉じる", "close", "x", "cancel", "×"],
        r#"<svg viewBox="0 0 24 24" width="24" height="24" xmlns="http://www.w3.org/2000/svg"><path d="M18 6L6 18M6 6l12 12" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round"/></svg>"#,
    ),
    (
        "check",
        &["チェック", "check", "done", "complete", "✓"],
        r#"<svg viewBox="0 0 24 24" width="24" height="24" xmlns="http://www.w3.org/2000/svg"><path d="M20 6L9 17l-5-5" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round"/></svg>"#,
    ),
    (
        "arrow-left",
        &["左矢印", "arrow left", "back", "←"],
        r#"<svg viewBox="0 0 24 24" width="24" height="24" xmlns="http://www.w3.org/2000/svg"><path d="M19 12H5m7-7l-7 7 7 7" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round"/></svg>"#,
    ),
    (
        "arrow-right",
        &["右矢印", "arrow right", "forward", "→"],
        r#"<svg viewBox="0 0 24 24" width="24" height="24" xmlns="http://www.w3.org/2000/svg"><path d="M5 12h14m-7-7l7 7-7 7" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round"/></svg>"#,
    ),
    (
        "download",
        &["ダウンロード", "download", "save", "↓"],
        r#"<svg viewBox="0 0 24 24" width="24" height="24" xmlns="http://www.w3.org/2000/svg"><path d="M21 15v4a2 2 0 0 1-2 2H5a2 2 0 0 1-2-2v-4m4-5l5 5 5-5m-5 5V3" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round"/></svg>"#,
    ),
    (
        "upload",
        &["アップロード", "upload", "import", "↑"],
        r#"<svg viewBox="0 0 24 24" width="24" height="24" xmlns="http://www.w3.org/2000/svg"><path d="M21 15v4a2 2 0 0 1-2 2H5a2 2 0 0 1-2-2v-4m14-7l-5-5-5 5m5-5v12" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round"/></svg>"#,
    ),
    (
        "heart",
        &["ハート", "heart", "love", "favorite", "♥"],
        r#"<svg viewBox="0 0 24 24" width="24" height="24" xmlns="http://www.w3.org/2000/svg"><path d="M20.84 4.61a5.5 5.5 0 0 0-7.78 0L12 5.67l-1.06-1.06a5.5 5.5 0 0 0-7.78 7.78l1.06 1.06L12 21.23l7.78-7.78 1.06-1.06a5.5 5.5 0 0 0 0-7.78z" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round"/></svg>"#,
    ),
    (
        "star",
        &["スター", "star", "favorite", "rating", "★"],
        r#"<svg viewBox="0 0 24 24" width="24" height="24" xmlns="http://www.w3.org/2000/svg"><path d="M12 2l3.09 6.26L22 9.27l-5 4.87 1.18 6.88L12 17.77l-6.18 3.25L7 14.14 2 9.27l6.91-1.01L12 2z" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round"/></svg>"#,
    ),
    (
        "trash",
        &["ゴミ箱", "trash", "delete", "remove"],
        r#"<svg viewBox="0 0 24 24" width="24" height="24" xmlns="http://www.w3.org/2000/svg"><path d="M3 6h18m-2 0v14a2 2 0 0 1-2 2H7a2 2 0 0 1-2-2V6m3 0V4a2 2 0 0 1 2-2h4a2 2 0 0 1 2 2v2" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round"/></svg>"#,
    ),
    (
        "edit",
        &["編集", "edit", "pencil", "write"],
        r#"<svg viewBox="0 0 24 24" width="24" height="24" xmlns="http://www.w3.org/2000/svg"><path d="M11 4H4a2 2 0 0 0-2 2v14a2 2 0 0 0 2 2h14a2 2 0 0 0 2-2v-7" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round"/><path d="M18.5 2.5a2.121 2.121 0 0 1 3 3L12 15l-4 1 1-4 9.5-9.5z" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round"/></svg>"#,
    ),
    (
        "plus",
        &["プラス", "plus", "add", "new", "+"],
        r#"<svg viewBox="0 0 24 24" width="24" height="24" xmlns="http://www.w3.org/2000/svg"><path d="M12 5v14m-7-7h14" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round"/></svg>"#,
    ),
    (
        "minus",
        &["マイナス", "minus", "remove", "-"],
        r#"<svg viewBox="0 0 24 24" width="24" height="24" xmlns="http://www.w3.org/2000/svg"><path d="M5 12h14" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round"/></svg>"#,
    ),
    (
        "info",
        &["情報", "info", "information", "help"],
        r#"<svg viewBox="0 0 24 24" width="24" height="24" xmlns="http://www.w3.org/2000/svg"><circle cx="12" cy="12" r="10" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round"/><path d="M12 16v-4m0-4h.01" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round"/></svg>"#,
    ),
    (
        "alert",
        &["警告", "alert", "warning", "caution", "!"],
        r#"<svg viewBox="0 0 24 24" width="24" height="24" xmlns="http://www.w3.org/2000/svg"><path d="M10.29 3.86L1.82 18a2 2 0 0 0 1.71 3h16.94a2 2 0 0 0 1.71-3L13.71 3.86a2 2 0 0 0-3.42 0z" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round"/><path d="M12 9v4m0 4h.01" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round"/></svg>"#,
    ),
];

const BUILTIN_INDEX: &[IndexRow] = &[
    ("mail", "material-symbols", "mail-outline", &["mail", "email", "envelope", "message", "メール"]),
    ("mail", "heroicons", "envelope", &["mail", "email", "envelope"]),
    ("mail", "lucide", "mail", &["mail", "email"]),
    ("home", "material-symbols", "home", &["home", "house", "ホーム", "家"]),
    ("home", "heroicons", "home", &["home", "house"]),
    ("home", "lucide", "home", &["home"]),
    ("settings", "material-symbols", "settings", &["settings", "gear", "cog", "設定"]),
    ("settings", "heroicons", "cog-6-tooth", &["settings", "cog"]),
    ("settings", "lucide", "settings", &["settings"]),
    ("user", "material-symbols", "person", &["user", "person", "account", "ユーザー"]),
    ("user", "heroicons", "user", &["user", "person"]),
    ("user", "lucide", "user", &["user"]),
    ("search", "material-symbols", "search", &["search", "find", "magnifying", "検索"]),
    ("search", "heroicons", "magnifying-glass", &["search", "magnifying"]),
    ("search", "lucide", "search", &["search"]),
    ("menu", "material-symbols", "menu", &["menu", "hamburger", "メニュー"]),
    ("menu", "heroicons", "bars-3", &["menu", "bars"]),
    ("menu", "lucide", "menu", &["menu"]),
    ("close", "material-symbols", "close", &["close", "x", "cancel", "閉じる"]),
    ("close", "heroicons", "x-mark", &["close", "x"]),
    ("close", "lucide", "x", &["close", "x"]),
    ("check", "material-symbols", "check", &["check", "done", "checkmark", "チェック"]),
    ("check", "heroicons", "check", &["check"]),
    ("check", "lucide", "check", &["check"]),
    ("star", "material-symbols", "star", &["star", "favorite", "スター"]),
    ("star", "heroicons", "star", &["star"]),
    ("star", "lucide", "star", &["star"]),
    ("heart", "material-symbols", "favorite", &["heart", "love", "favorite", "ハート"]),
    ("heart", "heroicons", "heart", &["heart", "love"]),
    ("heart", "lucide", "heart", &["heart"]),
    ("download", "material-symbols", "download", &["download", "save", "ダウンロード"]),
    ("download", "heroicons", "arrow-down-tray", &["download", "arrow-down"]),
    ("download", "lucide", "download", &["download"]),
    ("upload", "material-symbols", "upload", &["upload", "import", "アップロード"]),
    ("upload", "heroicons", "arrow-up-tray", &["upload", "arrow-up"]),
    ("upload", "lucide", "upload", &["upload"]),
    ("delete", "material-symbols", "delete", &["delete", "trash", "remove", "削除", "ゴミ箱"]),
    ("delete", "heroicons", "trash", &["trash", "delete"]),
    ("delete", "lucide", "trash", &["trash"]),
    ("edit", "material-symbols", "edit", &["edit", "pencil", "write", "編集"]),
    ("edit", "heroicons", "pencil", &["edit", "pencil"]),
    ("edit", "lucide", "pencil", &["edit", "pencil"]),
    ("save", "material-symbols", "save", &["save", "disk", "保存"]),
    ("save", "heroicons", "folder", &["save"]),
    ("save", "lucide", "save", &["save"]),
    ("share", "material-symbols", "share", &["share", "send", "共有"]),
    ("share", "heroicons", "share", &["share"]),
    ("share", "lucide", "share", &["share"]),
    ("lock", "material-symbols", "lock", &["lock", "security", "password", "ロック"]),
    ("lock", "heroicons", "lock-closed", &["lock"]),
    ("lock", "lucide", "lock", &["lock"]),
    ("unlock", "material-symbols", "lock-open", &["unlock", "open", "アンロック"]),
    ("unlock", "heroicons", "lock-open", &["unlock", "lock-open"]),
    ("unlock", "lucide", "unlock", &["unlock"]),
    ("calendar", "material-symbols", "calendar-today", &["calendar", "date", "schedule", "カレンダー"]),
    ("calendar", "heroicons", "calendar", &["calendar"]),
    ("calendar", "lucide", "calendar", &["calendar"]),
    ("clock", "material-symbols", "schedule", &["clock", "time", "時計"]),
    ("clock", "heroicons", "clock", &["clock", "time"]),
    ("clock", "lucide", "clock", &["clock"]),
];

static BUILTIN: Lazy<IconCatalog> = Lazy::new(|| {
    let patterns = BUILTIN_PATTERNS
        .iter()
        .map(|(name, keywords, svg)| IconPattern {
            name: (*name).to_string(),
            keywords: keywords.iter().map(|k| (*k).to_string()).collect(),
            svg: (*svg).to_string(),
        })
        .collect();

    let index = BUILTIN_INDEX
        .iter()
        .map(|(category, collection, name, keywords)| IconIndexEntry {
            category: (*category).to_string(),
            collection: (*collection).to_string(),
            name: (*name).to_string(),
            keywords: keywords.iter().map(|k| (*k).to_string()).collect(),
        })
        .collect();

    IconCatalog::new(patterns, index)
});

/// Immutable catalog passed by reference into the matcher and the search.
#[derive(Debug, Clone, Default)]
pub struct IconCatalog {
    patterns: Vec<IconPattern>,
    index: Vec<IconIndexEntry>,
}

impl IconCatalog {
    /// Creates a catalog from explicit tables (tests, custom deployments).
    pub fn new(patterns: Vec<IconPattern>, index: Vec<IconIndexEntry>) -> Self {
        Self { patterns, index }
    }

    /// The catalog compiled into the binary.
    pub fn builtin() -> &'static IconCatalog {
        &BUILTIN
    }

    /// Patterns in declaration order.
    pub fn patterns(&self) -> &[IconPattern] {
        &self.patterns
    }

    /// Remote index metadata in declaration order.
    pub fn index(&self) -> &[IconIndexEntry] {
        &self.index
    }

    pub fn pattern(&self, name: &str) -> Option<&IconPattern> {
        self.patterns.iter().find(|p| p.name == name)
    }

    /// The pattern used as the terminal fallback icon.
    ///
    /// Prefers [`FALLBACK_PATTERN_NAME`], else the first declared pattern.
    pub fn fallback_pattern(&self) -> Option<&IconPattern> {
        self.pattern(FALLBACK_PATTERN_NAME)
            .or_else(|| self.patterns.first())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::svg::is_valid_svg;

    #[test]
    fn test_builtin_pattern_order_is_stable() {
        let names: Vec<&str> = IconCatalog::builtin()
            .patterns()
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(
            names,
            vec![
                "mail",
                "home",
                "settings",
                "user",
                "search",
                "menu",
                "close",
                "check",
                "arrow-left",
                "arrow-right",
                "download",
                "upload",
                "heart",
                "star",
                "trash",
                "edit",
                "plus",
                "minus",
                "info",
                "alert",
            ]
        );
    }

    #[test]
    fn test_every_builtin_pattern_is_valid_svg() {
        for pattern in IconCatalog::builtin().patterns() {
            assert!(is_valid_svg(&pattern.svg), "{} is not valid", pattern.name);
        }
    }

    #[test]
    fn test_pattern_names_are_unique() {
        let patterns = IconCatalog::builtin().patterns();
        for (i, a) in patterns.iter().enumerate() {
            assert!(
                patterns[i + 1..].iter().all(|b| b.name != a.name),
                "duplicate pattern {}",
                a.name
            );
        }
    }

    #[test]
    fn test_fallback_pattern_is_info() {
        let fallback = IconCatalog::builtin().fallback_pattern().unwrap();
        assert_eq!(fallback.name, "info");
    }

    #[test]
    fn test_fallback_pattern_without_info_uses_first() {
        let catalog = IconCatalog::new(
            vec![IconPattern {
                name: "only".to_string(),
                keywords: vec!["only".to_string()],
                svg: "<svg/>".to_string(),
            }],
            Vec::new(),
        );
        assert_eq!(catalog.fallback_pattern().unwrap().name, "only");
    }

    #[test]
    fn test_builtin_index_mail_entries() {
        let mail: Vec<(&str, &str)> = IconCatalog::builtin()
            .index()
            .iter()
            .filter(|e| e.category == "mail")
            .map(|e| (e.collection.as_str(), e.name.as_str()))
            .collect();
        assert_eq!(
            mail,
            vec![
                ("material-symbols", "mail-outline"),
                ("heroicons", "envelope"),
                ("lucide", "mail"),
            ]
        );
    }
}
