//! # Options File Codec
//!
//! Loads and dumps the line-oriented `options.txt` format: one `key:value`
//! record per line, no escaping, no quoting. Values are decoded as booleans,
//! integers, or strings, in that order.
//!
//! ## Key-code translation
//!
//! Control-binding keys (prefix `key_`) historically stored numeric key codes.
//! Since data version 1444 they store symbolic names instead
//! (`key.keyboard.w`, `key.mouse.left`, ...). The codec translates both ways:
//!
//! - On load, a numeric value under a `key_` key is replaced with its symbolic
//!   name when the code is known; unknown codes pass through unchanged.
//! - On dump, the `version` entry decides the encoding. Files without a
//!   `version`, or with one below [`NEW_KEY_CODES_VERSION`], are written with
//!   numeric codes. Symbolic names with no numeric analogue pass through
//!   verbatim; a lossless downgrade is not possible for keys the legacy
//!   encoding never had.
//!
//! Entries keep their insertion order across a load/dump round trip.

use std::collections::HashMap;
use std::sync::LazyLock;

use serde_json::Value;

use crate::error::{Error, Result};

/// An options mapping. Backed by an insertion-ordered map so that a
/// load/dump round trip preserves the original line order.
pub type Options = serde_json::Map<String, Value>;

/// First data version that stores key bindings as symbolic names.
pub const NEW_KEY_CODES_VERSION: i64 = 1444;

/// Symbolic key names and their legacy numeric codes.
///
/// Keyboard scan codes 0-220 and mouse buttons -85..-100, per
/// <https://minecraft.wiki/w/Key_codes>. Gaps in the numeric range are codes
/// the modern naming scheme never adopted (legacy Japanese layout keys,
/// `sysrq`, `apps`, `power`, `sleep`, ...).
pub const KEY_CODES: &[(&str, i64)] = &[
    ("key.keyboard.unknown", 0),
    ("key.keyboard.escape", 1),
    ("key.keyboard.keypad.1", 2),
    ("key.keyboard.keypad.2", 3),
    ("key.keyboard.keypad.3", 4),
    ("key.keyboard.keypad.4", 5),
    ("key.keyboard.keypad.5", 6),
    ("key.keyboard.keypad.6", 7),
    ("key.keyboard.keypad.7", 8),
    ("key.keyboard.keypad.8", 9),
    ("key.keyboard.keypad.9", 10),
    ("key.keyboard.keypad.0", 11),
    ("key.keyboard.keypad.subtract", 12),
    ("key.keyboard.keypad.equal", 13),
    ("key.keyboard.backspace", 14),
    ("key.keyboard.tab", 15),
    ("key.keyboard.q", 16),
    ("key.keyboard.w", 17),
    ("key.keyboard.e", 18),
    ("key.keyboard.r", 19),
    ("key.keyboard.t", 20),
    ("key.keyboard.y", 21),
    ("key.keyboard.u", 22),
    ("key.keyboard.i", 23),
    ("key.keyboard.o", 24),
    ("key.keyboard.p", 25),
    ("key.keyboard.left.bracket", 26),
    ("key.keyboard.right.bracket", 27),
    ("key.keyboard.enter", 28),
    ("key.keyboard.left.control", 29),
    ("key.keyboard.a", 30),
    ("key.keyboard.s", 31),
    ("key.keyboard.d", 32),
    ("key.keyboard.f", 33),
    ("key.keyboard.g", 34),
    ("key.keyboard.h", 35),
    ("key.keyboard.j", 36),
    ("key.keyboard.k", 37),
    ("key.keyboard.l", 38),
    ("key.keyboard.semicolon", 39),
    ("key.keyboard.apostrophe", 40),
    ("key.keyboard.grave.accent", 41),
    ("key.keyboard.left.shift", 42),
    ("key.keyboard.backslash", 43),
    ("key.keyboard.z", 44),
    ("key.keyboard.x", 45),
    ("key.keyboard.c", 46),
    ("key.keyboard.v", 47),
    ("key.keyboard.b", 48),
    ("key.keyboard.n", 49),
    ("key.keyboard.m", 50),
    ("key.keyboard.comma", 51),
    ("key.keyboard.period", 52),
    ("key.keyboard.slash", 53),
    ("key.keyboard.right.shift", 54),
    ("key.keyboard.keypad.multiply", 55),
    ("key.keyboard.left.alt", 56),
    ("key.keyboard.space", 57),
    ("key.keyboard.caps.lock", 58),
    ("key.keyboard.f1", 59),
    ("key.keyboard.f2", 60),
    ("key.keyboard.f3", 61),
    ("key.keyboard.f4", 62),
    ("key.keyboard.f5", 63),
    ("key.keyboard.f6", 64),
    ("key.keyboard.f7", 65),
    ("key.keyboard.f8", 66),
    ("key.keyboard.f9", 67),
    ("key.keyboard.f10", 68),
    ("key.keyboard.num.lock", 69),
    ("key.keyboard.scroll.lock", 70),
    ("key.keypad.7", 71),
    ("key.keypad.8", 72),
    ("key.keypad.9", 73),
    ("key.keypad.subtract", 74),
    ("key.keypad.4", 75),
    ("key.keypad.5", 76),
    ("key.keypad.6", 77),
    ("key.keypad.add", 78),
    ("key.keypad.1", 79),
    ("key.keypad.2", 80),
    ("key.keypad.3", 81),
    ("key.keypad.0", 82),
    ("key.keypad.decimal", 83),
    ("key.keyboard.f11", 87),
    ("key.keyboard.f12", 88),
    ("key.keyboard.f13", 100),
    ("key.keyboard.f14", 101),
    ("key.keyboard.f15", 102),
    // 112-151: legacy Japanese layout keys (kana, convert, yen, ...) have no
    // modern names and stay numeric.
    ("key.keypad.enter", 156),
    ("key.keyboard.right.control", 157),
    // 179: numpadcomma, unmapped.
    ("key.keypad.divide", 181),
    // 183: sysrq, unmapped.
    ("key.keyboard.right.alt", 184),
    ("key.keyboard.pause", 197),
    ("key.keyboard.home", 199),
    ("key.keyboard.up", 200),
    ("key.keyboard.page.up", 201),
    ("key.keyboard.left", 203),
    ("key.keyboard.right", 205),
    ("key.keyboard.end", 207),
    ("key.keyboard.down", 208),
    ("key.keyboard.page.down", 209),
    ("key.keyboard.insert", 210),
    ("key.keyboard.delete", 211),
    ("key.keyboard.left.win", 219),
    ("key.keyboard.right.win", 220),
    // 221-223: apps, power, sleep, unmapped.
    ("key.mouse.left", -100),
    ("key.mouse.right", -99),
    ("key.mouse.middle", -98),
    ("key.mouse.4", -97),
    ("key.mouse.5", -96),
    ("key.mouse.6", -95),
    ("key.mouse.7", -94),
    ("key.mouse.8", -93),
    ("key.mouse.9", -92),
    ("key.mouse.10", -91),
    ("key.mouse.11", -90),
    ("key.mouse.12", -89),
    ("key.mouse.13", -88),
    ("key.mouse.14", -87),
    ("key.mouse.15", -86),
    ("key.mouse.16", -85),
];

static NAME_TO_CODE: LazyLock<HashMap<&'static str, i64>> =
    LazyLock::new(|| KEY_CODES.iter().copied().collect());

static CODE_TO_NAME: LazyLock<HashMap<i64, &'static str>> =
    LazyLock::new(|| KEY_CODES.iter().map(|&(name, code)| (code, name)).collect());

/// Look up the symbolic name for a legacy numeric key code.
pub fn key_name(code: i64) -> Option<&'static str> {
    CODE_TO_NAME.get(&code).copied()
}

/// Look up the legacy numeric code for a symbolic key name.
pub fn key_code(name: &str) -> Option<i64> {
    NAME_TO_CODE.get(name).copied()
}

/// Parse options file text into an ordered mapping.
///
/// Blank lines are skipped. Each remaining line must contain a `:` separating
/// key from value; key and value are trimmed. Values decode as `true`/`false`,
/// then as integers, then fall back to strings. Numeric values of
/// `key_`-prefixed keys are translated to symbolic names when the code is
/// known.
///
/// With `remove_version` set, the `version` entry is dropped after parsing.
/// The merge engine uses this on the source side so a merge never clobbers
/// the destination's data version.
pub fn load(text: &str, remove_version: bool) -> Result<Options> {
    let mut options = Options::new();

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let (key, value) = line.split_once(':').ok_or_else(|| Error::Options {
            message: format!("line is not a key:value pair: {:?}", line),
        })?;
        let key = key.trim();
        let value = value.trim();

        let mut value = match value {
            "true" => Value::Bool(true),
            "false" => Value::Bool(false),
            other => match other.parse::<i64>() {
                Ok(n) => Value::Number(n.into()),
                Err(_) => Value::String(other.to_string()),
            },
        };

        if key.starts_with("key_") {
            if let Some(name) = value.as_i64().and_then(key_name) {
                value = Value::String(name.to_string());
            }
        }

        options.insert(key.to_string(), value);
    }

    if remove_version {
        options.remove("version");
    }

    Ok(options)
}

/// Serialize an options mapping back to options file text.
///
/// Entries are written in insertion order, joined with `\n` and without a
/// trailing newline. Booleans render lowercase; everything else via its plain
/// string form. When the mapping has no `version`, or one below
/// [`NEW_KEY_CODES_VERSION`], symbolic `key_` values are translated back to
/// their numeric codes; names missing from the table are written verbatim.
pub fn dump(options: &Options) -> String {
    let version = options.get("version").and_then(Value::as_i64);
    let is_old_version = version.is_none_or(|v| v < NEW_KEY_CODES_VERSION);

    let lines: Vec<String> = options
        .iter()
        .map(|(key, value)| {
            let rendered = match value {
                Value::String(name) if is_old_version && key.starts_with("key_") => {
                    match key_code(name) {
                        Some(code) => code.to_string(),
                        None => name.clone(),
                    }
                }
                Value::String(s) => s.clone(),
                Value::Bool(b) => b.to_string(),
                other => other.to_string(),
            };
            format!("{}:{}", key, rendered)
        })
        .collect();

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    const NEW_OPTIONS: &str = "\
version:3120
autoJump:false
key_key.attack:key.mouse.left
key_key.use:key.mouse.right
key_key.forward:key.keyboard.w
key_key.left:key.keyboard.a
key_key.back:key.keyboard.s
key_key.right:key.keyboard.d
key_key.jump:key.keyboard.space
key_key.sneak:key.keyboard.left.control
key_key.sprint:key.keyboard.left.shift
key_key.drop:key.keyboard.q
key_key.inventory:key.keyboard.e
key_key.chat:key.keyboard.unknown";

    const OLD_OPTIONS: &str = "\
version:1343
autoJump:false
key_key.attack:-100
key_key.use:-99
key_key.forward:17
key_key.left:30
key_key.back:31
key_key.right:32
key_key.jump:57
key_key.sneak:29
key_key.sprint:42
key_key.drop:16
key_key.inventory:18
key_key.chat:0";

    fn expected_bindings() -> Vec<(&'static str, &'static str)> {
        vec![
            ("key_key.attack", "key.mouse.left"),
            ("key_key.use", "key.mouse.right"),
            ("key_key.forward", "key.keyboard.w"),
            ("key_key.left", "key.keyboard.a"),
            ("key_key.back", "key.keyboard.s"),
            ("key_key.right", "key.keyboard.d"),
            ("key_key.jump", "key.keyboard.space"),
            ("key_key.sneak", "key.keyboard.left.control"),
            ("key_key.sprint", "key.keyboard.left.shift"),
            ("key_key.drop", "key.keyboard.q"),
            ("key_key.inventory", "key.keyboard.e"),
            ("key_key.chat", "key.keyboard.unknown"),
        ]
    }

    #[test]
    fn test_load_new_encoding() {
        let options = load(NEW_OPTIONS, false).unwrap();
        assert_eq!(options.get("version"), Some(&Value::from(3120)));
        assert_eq!(options.get("autoJump"), Some(&Value::Bool(false)));
        for (key, name) in expected_bindings() {
            assert_eq!(options.get(key), Some(&Value::from(name)), "key {}", key);
        }
    }

    #[test]
    fn test_load_old_encoding_translates_codes() {
        let options = load(OLD_OPTIONS, false).unwrap();
        assert_eq!(options.get("version"), Some(&Value::from(1343)));
        // Numeric codes come back as symbolic names regardless of version.
        for (key, name) in expected_bindings() {
            assert_eq!(options.get(key), Some(&Value::from(name)), "key {}", key);
        }
    }

    #[test]
    fn test_load_remove_version() {
        let options = load(NEW_OPTIONS, true).unwrap();
        assert!(!options.contains_key("version"));
        assert_eq!(options.len(), 13);
    }

    #[test]
    fn test_load_skips_blank_lines() {
        let options = load("\na:1\n\n\nb:2\n", false).unwrap();
        assert_eq!(options.len(), 2);
    }

    #[test]
    fn test_load_rejects_line_without_separator() {
        let err = load("novalue", false).unwrap_err();
        assert!(err.to_string().contains("key:value"));
    }

    #[test]
    fn test_load_unknown_code_passes_through() {
        // 183 (sysrq) is a deliberate gap in the table.
        let options = load("key_key.custom:183", false).unwrap();
        assert_eq!(options.get("key_key.custom"), Some(&Value::from(183)));
    }

    #[test]
    fn test_round_trip_new() {
        let options = load(NEW_OPTIONS, false).unwrap();
        assert_eq!(dump(&options), NEW_OPTIONS);
    }

    #[test]
    fn test_round_trip_old() {
        let options = load(OLD_OPTIONS, false).unwrap();
        assert_eq!(dump(&options), OLD_OPTIONS);
    }

    #[test]
    fn test_dump_versionless_uses_old_encoding() {
        let mut options = Options::new();
        options.insert("key_key.attack".into(), Value::from("key.mouse.left"));
        assert_eq!(dump(&options), "key_key.attack:-100");
    }

    #[test]
    fn test_dump_old_keeps_unmapped_name_verbatim() {
        // Key names introduced after 1444 have no numeric analogue; a
        // downgrade writes them as-is.
        let mut options = Options::new();
        options.insert("version".into(), Value::from(1343));
        options.insert("key_key.spyglass".into(), Value::from("key.keyboard.c2"));
        assert_eq!(dump(&options), "version:1343\nkey_key.spyglass:key.keyboard.c2");
    }

    #[test]
    fn test_dump_booleans_lowercase() {
        let mut options = Options::new();
        options.insert("autoJump".into(), Value::Bool(true));
        options.insert("fullscreen".into(), Value::Bool(false));
        assert_eq!(dump(&options), "autoJump:true\nfullscreen:false");
    }

    #[test]
    fn test_dump_preserves_insertion_order() {
        let options = load("zebra:1\napple:2\nmango:3", false).unwrap();
        assert_eq!(dump(&options), "zebra:1\napple:2\nmango:3");
    }

    #[test]
    fn test_table_is_bidirectional() {
        for &(name, code) in KEY_CODES {
            assert_eq!(key_code(name), Some(code));
            assert_eq!(key_name(code), Some(name));
        }
    }
}
