//! Versioned JSON save format
//!
//! A save file is `{ "schema": "char-page-gen", "version": 2, "payload": {...} }`
//! where the payload is the [`Document`] field for field.
//!
//! Loading accepts any numeric version and normalises older payload shapes:
//! - `stats` given as a name → value mapping instead of a list
//! - a single `memoTitle`/`memoBody` pair instead of `memoPanels`
//! - the shorter field names written by earlier editor releases
//!   (`imageText`, `itemsText`, `bodyText`, and the short theme keys)
//!
//! Migration only runs forwards; [`serialize`] always writes the current shape.

use crate::document_model::{
    Document, MemoPanel, StatEntry, Theme, ThemeSlot, DEFAULT_MEMO_TITLE, DEFAULT_SUBTITLE,
    DEFAULT_TITLE,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Number, Value};
use thiserror::Error;

/// Value of the `schema` tag
pub const SCHEMA_NAME: &str = "char-page-gen";

/// Version written by [`serialize`]
pub const SCHEMA_VERSION: u32 = 2;

/// Errors that can occur while encoding or decoding a save file
///
/// None of these leave a caller's document half-updated: decoding builds a
/// fresh [`Document`] and only hands it over once every check has passed.
#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("Schema mismatch: expected \"char-page-gen\", found {found}")]
    SchemaMismatch { found: String },

    #[error("Invalid version or payload: {0}")]
    VersionOrPayloadInvalid(String),

    #[error("Malformed JSON: {0}")]
    MalformedJson(#[source] serde_json::Error),

    #[error("Failed to encode document: {0}")]
    Encode(#[source] serde_json::Error),
}

/// A normalisation applied while loading a payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Migration {
    /// A field written under its older name was read under its current one
    RenamedField {
        from: &'static str,
        to: &'static str,
    },
    /// `stats` was a mapping and became an ordered list
    StatsFromMapping { entries: usize },
    /// `memoTitle`/`memoBody` became a single memo panel
    MemoFromLegacyFields,
    /// No memo panels were present; one empty default panel was created
    MemoPanelsDefaulted,
    /// No usable theme object was present; the default preset was used
    ThemeDefaulted,
    /// These theme slots were missing and keep the default preset's value
    ThemeSlotsDefaulted(Vec<ThemeSlot>),
    /// Sequence elements that were not objects were skipped
    DroppedElements { field: &'static str, count: usize },
}

impl std::fmt::Display for Migration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Migration::RenamedField { from, to } => write!(f, "renamed '{}' to '{}'", from, to),
            Migration::StatsFromMapping { entries } => {
                write!(f, "converted stats mapping to a list of {} rows", entries)
            }
            Migration::MemoFromLegacyFields => {
                write!(f, "converted memoTitle/memoBody to a memo panel")
            }
            Migration::MemoPanelsDefaulted => write!(f, "added a default memo panel"),
            Migration::ThemeDefaulted => write!(f, "used the default theme"),
            Migration::ThemeSlotsDefaulted(slots) => {
                let names: Vec<&str> = slots.iter().map(|s| s.key()).collect();
                write!(f, "defaulted theme slots: {}", names.join(", "))
            }
            Migration::DroppedElements { field, count } => {
                write!(f, "skipped {} non-object element(s) in '{}'", count, field)
            }
        }
    }
}

/// Result of decoding a save file
#[derive(Debug, Clone)]
pub struct Decoded {
    /// The normalised document
    pub document: Document,
    /// The `version` number found in the file
    pub source_version: Number,
    /// Normalisations applied, in the order they happened
    pub migrations: Vec<Migration>,
}

impl Decoded {
    /// Whether the file needed any normalisation
    pub fn was_migrated(&self) -> bool {
        !self.migrations.is_empty()
    }
}

#[derive(Serialize)]
struct SaveFile<'a> {
    schema: &'static str,
    version: u32,
    payload: &'a Document,
}

/// Encode a document as a pretty-printed current-version save file
///
/// # Parameters
/// * `doc` - The document to encode
///
/// # Returns
/// * `Ok(String)` - JSON text
/// * `Err(SchemaError::Encode)` - Serialization failed
pub fn serialize(doc: &Document) -> Result<String, SchemaError> {
    let file = SaveFile {
        schema: SCHEMA_NAME,
        version: SCHEMA_VERSION,
        payload: doc,
    };
    serde_json::to_string_pretty(&file).map_err(SchemaError::Encode)
}

/// Decode a save file into a document
pub fn deserialize(blob: &str) -> Result<Document, SchemaError> {
    decode(blob).map(|decoded| decoded.document)
}

/// Decode a save file into `doc`, replacing it only on success
///
/// # Returns
/// * `Ok(Vec<Migration>)` - `doc` was replaced; the normalisations applied
/// * `Err(SchemaError)` - `doc` is unchanged
pub fn load_into(doc: &mut Document, blob: &str) -> Result<Vec<Migration>, SchemaError> {
    let decoded = decode(blob)?;
    *doc = decoded.document;
    Ok(decoded.migrations)
}

/// Decode a save file and report the migrations applied
///
/// # Parameters
/// * `blob` - JSON text of a save file
///
/// # Returns
/// * `Ok(Decoded)` - The normalised document and a migration report
/// * `Err(SchemaError)` - Malformed JSON, wrong schema tag, non-numeric
///   version, or missing payload
pub fn decode(blob: &str) -> Result<Decoded, SchemaError> {
    let root: Value = serde_json::from_str(blob).map_err(SchemaError::MalformedJson)?;

    let schema = root.get("schema");
    if schema.and_then(Value::as_str) != Some(SCHEMA_NAME) {
        return Err(SchemaError::SchemaMismatch {
            found: schema.map_or_else(|| "nothing".to_string(), Value::to_string),
        });
    }

    let source_version = match root.get("version") {
        Some(Value::Number(n)) => n.clone(),
        Some(other) => {
            return Err(SchemaError::VersionOrPayloadInvalid(format!(
                "version must be a number, found {}",
                other
            )))
        }
        None => {
            return Err(SchemaError::VersionOrPayloadInvalid(
                "version is missing".to_string(),
            ))
        }
    };

    let payload = match root.get("payload") {
        None | Some(Value::Null) => {
            return Err(SchemaError::VersionOrPayloadInvalid(
                "payload is missing".to_string(),
            ))
        }
        Some(payload) => payload.clone(),
    };

    if source_version
        .as_f64()
        .is_some_and(|v| v > f64::from(SCHEMA_VERSION))
    {
        log::warn!(
            "Save file version {} is newer than {}; unknown fields are ignored",
            source_version,
            SCHEMA_VERSION
        );
    }

    let mut migrations = Vec::new();
    let document = migrate_payload(payload, &mut migrations);

    for migration in &migrations {
        log::debug!("Migration: {}", migration);
    }

    Ok(Decoded {
        document,
        source_version,
        migrations,
    })
}

/// Normalise any supported payload shape into a [`Document`]
fn migrate_payload(payload: Value, migrations: &mut Vec<Migration>) -> Document {
    let mut fields = match payload {
        Value::Object(map) => map,
        other => {
            log::warn!("Payload is not an object ({}); using defaults", other);
            Map::new()
        }
    };

    rename_legacy_fields(&mut fields, migrations);

    let title = string_field(&fields, "title").unwrap_or_else(|| DEFAULT_TITLE.to_string());
    let subtitle =
        string_field(&fields, "subtitle").unwrap_or_else(|| DEFAULT_SUBTITLE.to_string());
    let image_raw_text = string_field(&fields, "imageRawText").unwrap_or_default();

    let stats = match fields.remove("stats") {
        Some(Value::Array(items)) => decode_sequence("stats", items, migrations),
        Some(Value::Object(mapping)) => {
            let stats: Vec<StatEntry> = mapping
                .into_iter()
                .map(|(name, value)| StatEntry::new(name, loose_string(&value)))
                .collect();
            migrations.push(Migration::StatsFromMapping {
                entries: stats.len(),
            });
            stats
        }
        _ => Vec::new(),
    };

    let memo_panels = match fields.remove("memoPanels") {
        Some(Value::Array(items)) => decode_sequence("memoPanels", items, migrations),
        _ => {
            let memo_title = string_field(&fields, "memoTitle");
            let memo_body = string_field(&fields, "memoBody");
            if memo_title.is_some() || memo_body.is_some() {
                migrations.push(Migration::MemoFromLegacyFields);
                vec![MemoPanel::new(
                    memo_title.unwrap_or_else(|| DEFAULT_MEMO_TITLE.to_string()),
                    memo_body.unwrap_or_default(),
                )]
            } else {
                migrations.push(Migration::MemoPanelsDefaulted);
                vec![MemoPanel::default()]
            }
        }
    };

    let mini_sections = match fields.remove("miniSections") {
        Some(Value::Array(items)) => decode_sequence("miniSections", items, migrations),
        _ => Vec::new(),
    };

    let pulldowns = match fields.remove("pulldowns") {
        Some(Value::Array(items)) => decode_sequence("pulldowns", items, migrations),
        _ => Vec::new(),
    };

    let theme = match fields.get("theme") {
        Some(Value::Object(slots)) => {
            let (theme, missing) = overlay_theme(slots);
            if !missing.is_empty() {
                migrations.push(Migration::ThemeSlotsDefaulted(missing));
            }
            theme
        }
        _ => {
            migrations.push(Migration::ThemeDefaulted);
            Theme::default()
        }
    };

    Document {
        title,
        subtitle,
        stats,
        image_raw_text,
        memo_panels,
        mini_sections,
        pulldowns,
        theme,
    }
}

/// Move fields written under their older names to their current names
///
/// When both names are present the current one wins and the older one is
/// discarded.
fn rename_legacy_fields(fields: &mut Map<String, Value>, migrations: &mut Vec<Migration>) {
    rename_key(fields, "imageText", "imageRawText", migrations);

    if let Some(Value::Array(sections)) = fields.get_mut("miniSections") {
        for section in sections.iter_mut().filter_map(Value::as_object_mut) {
            rename_key(section, "itemsText", "itemsRawText", migrations);
        }
    }

    if let Some(Value::Array(pulldowns)) = fields.get_mut("pulldowns") {
        for pulldown in pulldowns.iter_mut().filter_map(Value::as_object_mut) {
            if !matches!(pulldown.get("children"), None | Some(Value::Array(_))) {
                pulldown.insert("children".to_string(), Value::Array(Vec::new()));
            }
            if let Some(Value::Array(children)) = pulldown.get_mut("children") {
                for child in children.iter_mut().filter_map(Value::as_object_mut) {
                    rename_key(child, "bodyText", "bodyRawText", migrations);
                }
            }
        }
    }

    if let Some(Value::Object(theme)) = fields.get_mut("theme") {
        for slot in ThemeSlot::ALL {
            if let Some(legacy) = slot.legacy_key() {
                rename_key(theme, legacy, slot.key(), migrations);
            }
        }
    }
}

fn rename_key(
    object: &mut Map<String, Value>,
    from: &'static str,
    to: &'static str,
    migrations: &mut Vec<Migration>,
) {
    let Some(value) = object.remove(from) else {
        return;
    };
    if object.contains_key(to) {
        return;
    }
    object.insert(to.to_string(), value);

    let migration = Migration::RenamedField { from, to };
    if !migrations.contains(&migration) {
        migrations.push(migration);
    }
}

/// Decode each element of a sequence
///
/// Scalar fields are taken as text, so `{"name": "DEX", "value": 9}` keeps
/// its row. Elements that are not objects are skipped.
fn decode_sequence<T: DeserializeOwned>(
    field: &'static str,
    items: Vec<Value>,
    migrations: &mut Vec<Migration>,
) -> Vec<T> {
    let mut dropped = 0;
    let decoded: Vec<T> = items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| {
            let Value::Object(mut element) = item else {
                log::warn!("Skipping {}[{}]: not an object", field, index);
                dropped += 1;
                return None;
            };
            coerce_element(field, &mut element);
            match serde_json::from_value(Value::Object(element)) {
                Ok(value) => Some(value),
                Err(e) => {
                    log::warn!("Skipping {}[{}]: {}", field, index, e);
                    dropped += 1;
                    None
                }
            }
        })
        .collect();

    if dropped > 0 {
        migrations.push(Migration::DroppedElements {
            field,
            count: dropped,
        });
    }
    decoded
}

/// Turn every non-text field of an element into text
///
/// `children` stays a list; its non-object entries are removed and its
/// objects are coerced the same way.
fn coerce_element(field: &str, element: &mut Map<String, Value>) {
    for (key, value) in element.iter_mut() {
        match value {
            Value::String(_) => {}
            Value::Array(children) if key == "children" => {
                let before = children.len();
                children.retain(Value::is_object);
                if children.len() < before {
                    log::warn!(
                        "Skipping {} non-object {}.children entries",
                        before - children.len(),
                        field
                    );
                }
                for child in children.iter_mut().filter_map(Value::as_object_mut) {
                    coerce_element(field, child);
                }
            }
            other => *other = Value::String(loose_string(other)),
        }
    }
}

/// Start from the default preset and take every string-valued known slot
fn overlay_theme(slots: &Map<String, Value>) -> (Theme, Vec<ThemeSlot>) {
    let mut theme = Theme::default();
    let mut missing = Vec::new();

    for slot in ThemeSlot::ALL {
        match slots.get(slot.key()) {
            Some(Value::String(value)) => theme.set(slot, value.as_str()),
            _ => missing.push(slot),
        }
    }

    (theme, missing)
}

fn string_field(fields: &Map<String, Value>, key: &str) -> Option<String> {
    fields.get(key).and_then(Value::as_str).map(str::to_string)
}

/// Text form of a loosely typed value (`null` becomes empty)
fn loose_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document_model::{MiniSection, Pulldown, PulldownChild};
    use serde_json::json;

    fn wrap(payload: Value) -> String {
        json!({ "schema": SCHEMA_NAME, "version": 2, "payload": payload }).to_string()
    }

    #[test]
    fn test_serialize_envelope() {
        let text = serialize(&Document::empty()).unwrap();
        let value: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["schema"], SCHEMA_NAME);
        assert_eq!(value["version"], 2);
        assert!(value["payload"]["stats"].is_array());
        assert!(value["payload"].get("imageRawText").is_some());
        assert!(text.contains('\n'), "output should be pretty-printed");
    }

    #[test]
    fn test_roundtrip_default_document() {
        let doc = Document::default();
        let decoded = decode(&serialize(&doc).unwrap()).unwrap();
        assert_eq!(decoded.document, doc);
        assert!(!decoded.was_migrated());
    }

    #[test]
    fn test_schema_mismatch() {
        let err = deserialize(r#"{ "schema": "other", "version": 2, "payload": {} }"#)
            .unwrap_err();
        assert!(matches!(err, SchemaError::SchemaMismatch { .. }));

        let err = deserialize(r#"{ "version": 2, "payload": {} }"#).unwrap_err();
        assert!(matches!(err, SchemaError::SchemaMismatch { .. }));
    }

    #[test]
    fn test_version_must_be_number() {
        let err = deserialize(r#"{ "schema": "char-page-gen", "version": "2", "payload": {} }"#)
            .unwrap_err();
        assert!(matches!(err, SchemaError::VersionOrPayloadInvalid(_)));
    }

    #[test]
    fn test_payload_required() {
        let err = deserialize(r#"{ "schema": "char-page-gen", "version": 2 }"#).unwrap_err();
        assert!(matches!(err, SchemaError::VersionOrPayloadInvalid(_)));

        let err = deserialize(r#"{ "schema": "char-page-gen", "version": 2, "payload": null }"#)
            .unwrap_err();
        assert!(matches!(err, SchemaError::VersionOrPayloadInvalid(_)));
    }

    #[test]
    fn test_malformed_json() {
        let err = deserialize("{ not json").unwrap_err();
        assert!(matches!(err, SchemaError::MalformedJson(_)));
    }

    #[test]
    fn test_empty_payload_uses_defaults() {
        let decoded = decode(&wrap(json!({}))).unwrap();
        let doc = decoded.document;
        assert_eq!(doc.title, DEFAULT_TITLE);
        assert_eq!(doc.subtitle, DEFAULT_SUBTITLE);
        assert!(doc.stats.is_empty());
        assert_eq!(doc.image_raw_text, "");
        assert_eq!(doc.memo_panels, vec![MemoPanel::default()]);
        assert!(doc.mini_sections.is_empty());
        assert!(doc.pulldowns.is_empty());
        assert_eq!(doc.theme, Theme::default());
        assert!(decoded.migrations.contains(&Migration::ThemeDefaulted));
    }

    #[test]
    fn test_non_string_title_falls_back() {
        let doc = deserialize(&wrap(json!({ "title": 5, "subtitle": "" }))).unwrap();
        assert_eq!(doc.title, DEFAULT_TITLE);
        assert_eq!(doc.subtitle, "");
    }

    #[test]
    fn test_stats_mapping_values_are_stringified() {
        let doc = deserialize(&wrap(json!({
            "stats": { "HP": 30, "Alive": true, "Note": null }
        })))
        .unwrap();
        assert_eq!(
            doc.stats,
            vec![
                StatEntry::new("HP", "30"),
                StatEntry::new("Alive", "true"),
                StatEntry::new("Note", ""),
            ]
        );
    }

    #[test]
    fn test_memo_title_only() {
        let decoded = decode(&wrap(json!({ "memoTitle": "Notes" }))).unwrap();
        assert_eq!(decoded.document.memo_panels, vec![MemoPanel::new("Notes", "")]);
        assert!(decoded
            .migrations
            .contains(&Migration::MemoFromLegacyFields));
    }

    #[test]
    fn test_memo_panels_array_wins_over_legacy_fields() {
        let doc = deserialize(&wrap(json!({
            "memoPanels": [],
            "memoTitle": "ignored"
        })))
        .unwrap();
        assert!(doc.memo_panels.is_empty());
    }

    #[test]
    fn test_older_field_names() {
        let decoded = decode(&wrap(json!({
            "imageText": "a.png\nb.png",
            "miniSections": [{ "title": "Likes", "itemsText": "tea" }],
            "pulldowns": [{
                "title": "History",
                "children": [{ "title": "Youth", "bodyText": "x\ny" }]
            }],
            "theme": { "bg": "#000", "ink": "#fff" }
        })))
        .unwrap();

        let doc = decoded.document;
        assert_eq!(doc.images(), vec!["a.png", "b.png"]);
        assert_eq!(doc.mini_sections, vec![MiniSection::new("Likes", "tea")]);
        assert_eq!(
            doc.pulldowns,
            vec![Pulldown::new(
                "History",
                vec![PulldownChild::new("Youth", "x\ny")]
            )]
        );
        assert_eq!(doc.theme.background, "#000");
        assert_eq!(doc.theme.text_color, "#fff");
        assert!(decoded.migrations.contains(&Migration::RenamedField {
            from: "imageText",
            to: "imageRawText"
        }));
    }

    #[test]
    fn test_current_name_wins_over_older_name() {
        let doc = deserialize(&wrap(json!({
            "imageRawText": "new.png",
            "imageText": "old.png"
        })))
        .unwrap();
        assert_eq!(doc.images(), vec!["new.png"]);
    }

    #[test]
    fn test_theme_missing_slot_keeps_default() {
        let decoded = decode(&wrap(json!({
            "theme": { "background": "#123456", "unknownSlot": "red" }
        })))
        .unwrap();
        let theme = &decoded.document.theme;
        assert_eq!(theme.background, "#123456");
        assert_eq!(theme.underline_color, Theme::default().underline_color);

        let missing = decoded
            .migrations
            .iter()
            .find_map(|m| match m {
                Migration::ThemeSlotsDefaulted(slots) => Some(slots.len()),
                _ => None,
            })
            .unwrap();
        assert_eq!(missing, ThemeSlot::ALL.len() - 1);
    }

    #[test]
    fn test_non_object_elements_are_skipped() {
        let decoded = decode(&wrap(json!({
            "stats": [{ "name": "STR", "value": "12" }, 7, { "name": "DEX", "value": 9 }],
            "pulldowns": [{ "title": "P", "children": "oops" }]
        })))
        .unwrap();

        assert_eq!(
            decoded.document.stats,
            vec![StatEntry::new("STR", "12"), StatEntry::new("DEX", "9")]
        );
        assert_eq!(decoded.document.pulldowns, vec![Pulldown::new("P", vec![])]);
        assert!(decoded.migrations.contains(&Migration::DroppedElements {
            field: "stats",
            count: 1
        }));
    }

    #[test]
    fn test_scalar_fields_are_kept_as_text() {
        let doc = deserialize(&wrap(json!({
            "stats": [
                { "name": "STR", "value": "12" },
                { "name": "DEX", "value": 9 },
                { "name": "LUK", "value": "3" },
                { "name": true, "value": null }
            ],
            "memoPanels": [{ "title": "A", "body": null }, { "title": "B", "body": "x" }],
            "miniSections": [{ "title": 1.5, "itemsRawText": "a" }],
            "pulldowns": [{
                "title": "P",
                "children": [{ "title": "C", "bodyRawText": 42 }, "stray", null]
            }]
        })))
        .unwrap();

        assert_eq!(
            doc.stats,
            vec![
                StatEntry::new("STR", "12"),
                StatEntry::new("DEX", "9"),
                StatEntry::new("LUK", "3"),
                StatEntry::new("true", ""),
            ]
        );
        assert_eq!(
            doc.memo_panels,
            vec![MemoPanel::new("A", ""), MemoPanel::new("B", "x")]
        );
        assert_eq!(doc.mini_sections, vec![MiniSection::new("1.5", "a")]);
        assert_eq!(
            doc.pulldowns,
            vec![Pulldown::new("P", vec![PulldownChild::new("C", "42")])]
        );
    }

    #[test]
    fn test_non_object_payload_uses_defaults() {
        let doc = deserialize(&wrap(json!(5))).unwrap();
        assert_eq!(doc.title, DEFAULT_TITLE);
        assert_eq!(doc.memo_panels, vec![MemoPanel::default()]);
    }

    #[test]
    fn test_load_into_keeps_document_on_error() {
        let mut doc = Document::default();
        doc.title = "Keep me".to_string();
        let before = doc.clone();

        assert!(load_into(&mut doc, r#"{ "schema": "nope" }"#).is_err());
        assert!(load_into(&mut doc, "[").is_err());
        assert_eq!(doc, before);

        load_into(&mut doc, &wrap(json!({ "title": "Replaced" }))).unwrap();
        assert_eq!(doc.title, "Replaced");
    }

    #[test]
    fn test_reserialize_migrated_emits_current_version() {
        let legacy = json!({
            "schema": SCHEMA_NAME,
            "version": 1,
            "payload": { "stats": { "STR": "12" }, "memoBody": "B" }
        })
        .to_string();
        let doc = deserialize(&legacy).unwrap();
        let value: Value = serde_json::from_str(&serialize(&doc).unwrap()).unwrap();
        assert_eq!(value["version"], 2);
        assert!(value["payload"]["stats"].is_array());
        assert!(value["payload"].get("memoBody").is_none());
    }
}
