//! Decoder for the filter-query (`fq`) parameter.
//!
//! Each entry has the form `[+|-]field:value`, where the value may itself
//! contain colons (`taxon:NCBITaxon:9606`) and may be wrapped in one pair of
//! double quotes. A leading `-` negates the constraint.

use ahash::AHashMap;
use log::trace;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Decoded filters: field name to value to polarity.
pub type FilterMap = AHashMap<String, AHashMap<String, bool>>;

/// A single decoded filter constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterClause {
    /// Field the constraint applies to.
    pub field: String,
    /// Value the field is constrained to, without surrounding quotes.
    pub value: String,
    /// `true` for inclusive constraints, `false` for negated ones.
    pub polarity: bool,
}

impl FilterClause {
    /// Parse one filter entry.
    ///
    /// Returns `None` for entries without a field separator.
    pub fn parse(entry: &str) -> Option<Self> {
        let (field, value) = entry.split_once(':')?;

        let (field, polarity) = if let Some(field) = field.strip_prefix('-') {
            (field, false)
        } else if let Some(field) = field.strip_prefix('+') {
            (field, true)
        } else {
            (field, true)
        };

        Some(FilterClause {
            field: field.to_string(),
            value: unquote(value).to_string(),
            polarity,
        })
    }
}

/// Strip exactly one pair of surrounding double quotes.
fn unquote(value: &str) -> &str {
    if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        &value[1..value.len() - 1]
    } else {
        value
    }
}

/// Decodes a raw `fq` parameter value.
#[derive(Debug, Clone, Copy)]
pub struct FilterDecoder<'a> {
    fq: Option<&'a Value>,
}

impl<'a> FilterDecoder<'a> {
    /// Create a decoder over the raw parameter (absent, a string, or a list of strings).
    pub fn new(fq: Option<&'a Value>) -> Self {
        FilterDecoder { fq }
    }

    /// The raw entries, normalized to a sequence.
    pub fn entries(&self) -> Vec<&'a str> {
        match self.fq {
            Some(Value::String(entry)) => vec![entry.as_str()],
            Some(Value::Array(entries)) => entries.iter().filter_map(Value::as_str).collect(),
            _ => Vec::new(),
        }
    }

    /// The decoded constraints in parameter order.
    pub fn clauses(&self) -> Vec<FilterClause> {
        self.entries()
            .into_iter()
            .filter_map(|entry| {
                let clause = FilterClause::parse(entry);
                if clause.is_none() {
                    trace!("Skipping filter entry without a field: {:?}", entry);
                }
                clause
            })
            .collect()
    }

    /// Fold the constraints into a polarity map; later entries win.
    pub fn decode(&self) -> FilterMap {
        let mut filters = FilterMap::default();
        for clause in self.clauses() {
            filters
                .entry(clause.field)
                .or_default()
                .insert(clause.value, clause.polarity);
        }
        filters
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_clause() {
        let clause = FilterClause::parse("-assigned_by:\"UniProt\"").unwrap();
        assert_eq!(clause.field, "assigned_by");
        assert_eq!(clause.value, "UniProt");
        assert!(!clause.polarity);

        let clause = FilterClause::parse("+type:protein").unwrap();
        assert_eq!(clause.field, "type");
        assert_eq!(clause.value, "protein");
        assert!(clause.polarity);

        let clause = FilterClause::parse("taxon:NCBITaxon:9606").unwrap();
        assert_eq!(clause.field, "taxon");
        assert_eq!(clause.value, "NCBITaxon:9606");
        assert!(clause.polarity);

        assert!(FilterClause::parse("no_separator").is_none());
    }

    #[test]
    fn test_unquote() {
        assert_eq!(unquote("\"GO:0008150\""), "GO:0008150");
        assert_eq!(unquote("\"\"quoted\"\""), "\"quoted\"");
        assert_eq!(unquote("\""), "\"");
        assert_eq!(unquote("\"open"), "\"open");
        assert_eq!(unquote("\"\""), "");
        assert_eq!(unquote("plain"), "plain");
    }

    #[test]
    fn test_decode_single_string() {
        let fq = json!("-assigned_by:\"UniProt\"");
        let filters = FilterDecoder::new(Some(&fq)).decode();

        assert_eq!(filters.len(), 1);
        assert!(!filters["assigned_by"]["UniProt"]);
    }

    #[test]
    fn test_decode_list() {
        let fq = json!(["taxon:NCBITaxon:9606", "+type:protein", "-type:complex"]);
        let filters = FilterDecoder::new(Some(&fq)).decode();

        assert!(filters["taxon"]["NCBITaxon:9606"]);
        assert!(filters["type"]["protein"]);
        assert!(!filters["type"]["complex"]);
    }

    #[test]
    fn test_last_entry_wins() {
        let fq = json!(["source:MGI", "-source:MGI"]);
        let filters = FilterDecoder::new(Some(&fq)).decode();

        assert_eq!(filters["source"].len(), 1);
        assert!(!filters["source"]["MGI"]);
    }

    #[test]
    fn test_absent_or_odd_parameter() {
        assert!(FilterDecoder::new(None).decode().is_empty());

        let fq = json!(42);
        assert!(FilterDecoder::new(Some(&fq)).decode().is_empty());

        let fq = json!(["bogus", 7, "a:b"]);
        let decoder = FilterDecoder::new(Some(&fq));
        assert_eq!(decoder.entries(), vec!["bogus", "a:b"]);
        assert_eq!(decoder.clauses().len(), 1);
    }
}
