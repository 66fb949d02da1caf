use crate::index::models::{Record, Result};
use regex::Regex;
use std::iter::Peekable;
use std::str::CharIndices;

/// One node of the searchData array literal. Numeric flags are kept only as
/// placeholders so element positions survive.
#[derive(Debug, Clone, PartialEq)]
enum Value {
    Str(String),
    Num,
    List(Vec<Value>),
}

/// Extract wire records from a Doxygen search-data fragment, e.g.
///
/// ```text
/// var searchData=
/// [
///   ['setorbit_12',['setOrbit',['../class_orbit.html#a3f2c',1,'AstroLib::Orbit::setOrbit()']]],
/// ];
/// ```
///
/// Files without a `searchData` assignment (Doxygen search directories mix data
/// files with driver scripts) yield an empty record set, not an error.
pub fn parse_search_data(source: &str) -> Result<Vec<Record>> {
    let header = Regex::new(r"var\s+searchData\s*=")?;
    let start = match header.find(source) {
        Some(m) => m.end(),
        None => return Ok(Vec::new()),
    };

    let mut chars = source[start..].char_indices().peekable();
    skip_ws(&mut chars);
    match chars.next() {
        Some((_, '[')) => {}
        _ => return Err("searchData assignment is not an array literal".into()),
    }
    let root = parse_list(&mut chars)?;

    let mut records = Vec::new();
    for element in &root {
        if let Some(mut batch) = records_from_element(element) {
            records.append(&mut batch);
        }
    }
    Ok(records)
}

/// Flatten one outer element into records. Shape per Doxygen:
/// `['normalizedkey_N', ['DisplayKey', [locator, flag, label], ...]]`.
/// The normalized key is a lowercase lookup aid and is ignored; the display key
/// is the case-sensitive symbol name.
fn records_from_element(element: &Value) -> Option<Vec<Record>> {
    let Value::List(fields) = element else {
        return None;
    };
    let Some(Value::List(body)) = fields.get(1) else {
        return None;
    };
    let Some(Value::Str(key)) = body.first() else {
        return None;
    };

    let mut records = Vec::new();
    for matched in &body[1..] {
        let Value::List(parts) = matched else {
            continue;
        };
        let locator = match parts.first() {
            Some(Value::Str(s)) => s.clone(),
            _ => continue,
        };
        // Label is the trailing string; older generators omit it.
        let label = match parts.iter().rev().find_map(|p| match p {
            Value::Str(s) => Some(s.as_str()),
            _ => None,
        }) {
            Some(s) if s != locator => s.to_string(),
            _ => key.clone(),
        };
        records.push(Record {
            key: key.clone(),
            label,
            locator,
        });
    }
    Some(records)
}

/// Parse list elements after the opening '[' has been consumed.
fn parse_list(chars: &mut Peekable<CharIndices>) -> Result<Vec<Value>> {
    let mut values = Vec::new();
    loop {
        skip_ws(chars);
        match chars.peek().copied() {
            Some((_, ']')) => {
                chars.next();
                return Ok(values);
            }
            Some((_, ',')) => {
                chars.next();
            }
            Some((_, '[')) => {
                chars.next();
                values.push(Value::List(parse_list(chars)?));
            }
            Some((_, '\'')) => {
                chars.next();
                values.push(Value::Str(parse_string(chars)?));
            }
            Some((_, c)) if c.is_ascii_digit() => {
                while matches!(chars.peek(), Some((_, d)) if d.is_ascii_digit()) {
                    chars.next();
                }
                values.push(Value::Num);
            }
            Some((pos, c)) => {
                return Err(format!("unexpected character '{}' at offset {}", c, pos).into())
            }
            None => return Err("unterminated array in searchData".into()),
        }
    }
}

/// Parse a single-quoted JS string after the opening quote. Handles the escape
/// sequences Doxygen emits plus its HTML entities.
fn parse_string(chars: &mut Peekable<CharIndices>) -> Result<String> {
    let mut out = String::new();
    loop {
        match chars.next() {
            Some((_, '\'')) => return Ok(decode_entities(&out)),
            Some((_, '\\')) => match chars.next() {
                Some((_, escaped)) => out.push(escaped),
                None => return Err("unterminated escape in searchData string".into()),
            },
            Some((_, c)) => out.push(c),
            None => return Err("unterminated string in searchData".into()),
        }
    }
}

fn decode_entities(s: &str) -> String {
    if !s.contains('&') {
        return s.to_string();
    }
    s.replace("&#39;", "'")
        .replace("&quot;", "\"")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

fn skip_ws(chars: &mut Peekable<CharIndices>) {
    while matches!(chars.peek(), Some((_, c)) if c.is_whitespace()) {
        chars.next();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAGMENT: &str = r#"var searchData=
[
  ['setorbit_0',['setOrbit',['../class_astro_lib_1_1_orbit.html#a3f2c',1,'AstroLib::Orbit::setOrbit()'],['../class_astro_lib_1_1_orbit.html#a77d1',1,'AstroLib::Orbit::setOrbit(double a, double e)']]],
  ['setjuliandate_1',['setJulianDate',['../class_astro_lib_1_1_julian_date.html#ab4e0',1,'AstroLib::JulianDate::setJulianDate()']]],
  ['sunsensor_2',['SunSensor',['../class_sun_sensor.html',1,'SunSensor'],['../class_sun_sensor.html#a90aa',1,'SunSensor::SunSensor()']]]
];
"#;

    #[test]
    fn parses_overloads_in_declaration_order() {
        let records = parse_search_data(FRAGMENT).unwrap();
        assert_eq!(records.len(), 5);
        assert_eq!(records[0].key, "setOrbit");
        assert_eq!(records[0].label, "AstroLib::Orbit::setOrbit()");
        assert_eq!(
            records[0].locator,
            "../class_astro_lib_1_1_orbit.html#a3f2c"
        );
        assert_eq!(
            records[1].label,
            "AstroLib::Orbit::setOrbit(double a, double e)"
        );
        assert_eq!(records[2].key, "setJulianDate");
    }

    #[test]
    fn class_page_without_anchor_keeps_plain_locator() {
        let records = parse_search_data(FRAGMENT).unwrap();
        assert_eq!(records[3].key, "SunSensor");
        assert_eq!(records[3].locator, "../class_sun_sensor.html");
        assert_eq!(records[3].label, "SunSensor");
        assert_eq!(records[4].label, "SunSensor::SunSensor()");
    }

    #[test]
    fn file_without_search_data_yields_no_records() {
        let records = parse_search_data("function init() { return 0; }").unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn decodes_escapes_and_entities() {
        let source = r"var searchData=
[
  ['op_0',['operator&lt;&lt;',['../class_matrix.html#a11',1,'Matrix::operator&lt;&lt;(std::ostream &amp;os)']]],
  ['quote_1',['it\'s',['../page.html#a22',1,'it\'s']]]
];
";
        let records = parse_search_data(source).unwrap();
        assert_eq!(records[0].key, "operator<<");
        assert_eq!(records[0].label, "Matrix::operator<<(std::ostream &os)");
        assert_eq!(records[1].key, "it's");
    }

    #[test]
    fn label_falls_back_to_key_when_match_has_locator_only() {
        let source = "var searchData=[['main_0',['main',['../main_8cpp.html#ae66']]]];";
        let records = parse_search_data(source).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].label, "main");
        assert_eq!(records[0].locator, "../main_8cpp.html#ae66");
    }

    #[test]
    fn unbalanced_literal_is_a_parse_error() {
        let source = "var searchData=[['broken_0',['broken',['../x.html'";
        assert!(parse_search_data(source).is_err());
    }
}
