//! The six-number input boundary.
//!
//! Coordinates arrive as raw strings (CLI flags or an `ax=..&ay=..` query
//! string). Missing or empty fields take the form defaults A=(0,0),
//! B=(100,0), C=(50,100); anything else is parsed as a float.

use thiserror::Error;
use tracing::warn;

use crate::geometry::{Point, Triangle};

#[derive(Debug, Error, PartialEq)]
pub enum InputError {
    #[error("invalid number for {field}: '{value}'")]
    InvalidNumber { field: &'static str, value: String },
}

/// Field names in query order with their form defaults.
const FIELDS: [(&str, f64); 6] = [
    ("ax", 0.0),
    ("ay", 0.0),
    ("bx", 100.0),
    ("by", 0.0),
    ("cx", 50.0),
    ("cy", 100.0),
];

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TriangleInput {
    pub ax: Option<String>,
    pub ay: Option<String>,
    pub bx: Option<String>,
    pub by: Option<String>,
    pub cx: Option<String>,
    pub cy: Option<String>,
}

impl TriangleInput {
    fn slot(&self, field: &str) -> Option<&Option<String>> {
        Some(match field {
            "ax" => &self.ax,
            "ay" => &self.ay,
            "bx" => &self.bx,
            "by" => &self.by,
            "cx" => &self.cx,
            "cy" => &self.cy,
            _ => return None,
        })
    }

    fn slot_mut(&mut self, field: &str) -> Option<&mut Option<String>> {
        Some(match field {
            "ax" => &mut self.ax,
            "ay" => &mut self.ay,
            "bx" => &mut self.bx,
            "by" => &mut self.by,
            "cx" => &mut self.cx,
            "cy" => &mut self.cy,
            _ => return None,
        })
    }

    /// Parse `ax=1&ay=2&...`. A leading `?` is allowed, unknown keys are
    /// ignored and the last occurrence of a key wins.
    pub fn from_query(query: &str) -> Self {
        let mut input = Self::default();
        let query = query.trim().trim_start_matches('?');
        for pair in query.split('&').filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            if let Some(slot) = input.slot_mut(&percent_decode(key)) {
                *slot = Some(percent_decode(value));
            }
        }
        input
    }

    /// Fields set in `other` replace the ones in `self`.
    pub fn overridden_by(mut self, other: TriangleInput) -> Self {
        for (field, _) in FIELDS {
            if let (Some(value), Some(slot)) = (other.slot(field).cloned().flatten(), self.slot_mut(field)) {
                *slot = Some(value);
            }
        }
        self
    }

    /// The query string the input form navigates with: every field present,
    /// blanks replaced by their defaults.
    pub fn to_query(&self) -> String {
        FIELDS
            .iter()
            .map(|&(field, default)| {
                let value = self
                    .slot(field)
                    .and_then(|v| v.as_deref())
                    .map(str::trim)
                    .filter(|v| !v.is_empty())
                    .map(str::to_string)
                    .unwrap_or_else(|| default.to_string());
                format!("{}={}", field, value)
            })
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Resolve the six values into a triangle.
    ///
    /// Unparseable values become NaN and are logged, unless `strict` is set,
    /// in which case the first one is returned as an error.
    pub fn resolve(&self, strict: bool) -> Result<Triangle, InputError> {
        let mut values = [0.0; 6];
        for (value, &(field, default)) in values.iter_mut().zip(FIELDS.iter()) {
            let raw = self.slot(field).and_then(|v| v.as_deref());
            *value = parse_coordinate(field, raw, default, strict)?;
        }
        let [ax, ay, bx, by, cx, cy] = values;
        Ok(Triangle::new(Point::new(ax, ay), Point::new(bx, by), Point::new(cx, cy)))
    }
}

fn parse_coordinate(field: &'static str, raw: Option<&str>, default: f64, strict: bool) -> Result<f64, InputError> {
    let raw = match raw.map(str::trim) {
        None | Some("") => return Ok(default),
        Some(raw) => raw,
    };
    match raw.parse::<f64>() {
        Ok(value) => Ok(value),
        Err(_) if strict => Err(InputError::InvalidNumber {
            field,
            value: raw.to_string(),
        }),
        Err(_) => {
            warn!("{} = '{}' is not a number, using NaN", field, raw);
            Ok(f64::NAN)
        }
    }
}

/// Decode `+` and `%XX` escapes of a query component.
fn percent_decode(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => out.push(b' '),
            b'%' if i + 2 < bytes.len() => {
                let hex = std::str::from_utf8(&bytes[i + 1..i + 3]).ok();
                match hex.and_then(|h| u8::from_str_radix(h, 16).ok()) {
                    Some(b) => {
                        out.push(b);
                        i += 2;
                    }
                    None => out.push(b'%'),
                }
            }
            b => out.push(b),
        }
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}
