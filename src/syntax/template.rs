//! Placeholder extraction and template expansion.
//!
//! Templates use plain `$<digits>` markers: `$1`, `$2`, ... for tab stops and
//! `$0` for the final cursor position. Braced forms like `${1:default}` are not
//! part of the template language.

use rustc_hash::FxHashMap;

use crate::base::LineCol;

/// A numbered insertion point inside a template.
///
/// `line_offset` is the zero-based line within the template and `column` is
/// the byte column just past the marker on that line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TabStop {
    pub stop: u32,
    pub line_offset: u32,
    pub column: u32,
}

impl TabStop {
    /// `$0`, the final stop.
    pub fn is_final(&self) -> bool {
        self.stop == 0
    }

    /// Position of this stop relative to the start of the template.
    pub fn relative(&self) -> LineCol {
        LineCol::new(self.line_offset, self.column)
    }

    /// Position of this stop once the template is inserted at `origin`.
    pub fn absolute(&self, origin: LineCol) -> LineCol {
        self.relative().relative_to(origin)
    }

    /// Ordering key: positive stops ascending, `$0` after all of them.
    fn sort_key(&self) -> (bool, u32) {
        (self.stop == 0, self.stop)
    }
}

/// A `$<digits>` marker found in a template.
struct Marker {
    /// Byte offset of the `$`
    start: usize,
    /// Byte offset just past the last digit
    end: usize,
    stop: u32,
}

/// Find the marker starting at `start` (which must point at a `$`).
fn marker_at(template: &str, start: usize) -> Option<Marker> {
    let digits = template.as_bytes()[start + 1..]
        .iter()
        .take_while(|b| b.is_ascii_digit())
        .count();
    if digits == 0 {
        return None;
    }
    let end = start + 1 + digits;
    // Numbers too large for u32 are left as literal text.
    let stop = template[start + 1..end].parse().ok()?;
    Some(Marker { start, end, stop })
}

/// Extract tab stops from a template in navigation order.
///
/// Every marker occurrence produces one stop, so a mirrored `$1` yields two
/// entries. Positive stops come first in ascending order, then `$0`; the sort
/// is stable so repeated numbers keep their textual order.
pub fn parse_tab_stops(template: &str) -> Vec<TabStop> {
    let bytes = template.as_bytes();
    let mut stops = Vec::new();
    let mut line = 0u32;
    let mut line_start = 0usize;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'\n' => {
                line += 1;
                line_start = i + 1;
                i += 1;
            }
            b'$' => match marker_at(template, i) {
                Some(marker) => {
                    stops.push(TabStop {
                        stop: marker.stop,
                        line_offset: line,
                        column: (marker.end - line_start) as u32,
                    });
                    i = marker.end;
                }
                None => i += 1,
            },
            _ => i += 1,
        }
    }

    stops.sort_by_key(TabStop::sort_key);
    stops
}

/// Substitute stop values into a template.
///
/// With no values the template comes back unchanged; that is the path used
/// when the host handles cursor placement on its own. Markers without a value
/// are kept as-is. The full digit run is matched, so `$10` is never mistaken
/// for `$1` followed by `0`.
pub fn expand_template<S: AsRef<str>>(template: &str, values: &FxHashMap<u32, S>) -> String {
    if values.is_empty() {
        return template.to_owned();
    }

    let mut out = String::with_capacity(template.len());
    let mut copied = 0;
    let mut i = 0;
    let bytes = template.as_bytes();

    while i < bytes.len() {
        if bytes[i] != b'$' {
            i += 1;
            continue;
        }
        let Some(marker) = marker_at(template, i) else {
            i += 1;
            continue;
        };
        if let Some(value) = values.get(&marker.stop) {
            out.push_str(&template[copied..marker.start]);
            out.push_str(value.as_ref());
            copied = marker.end;
        }
        i = marker.end;
    }

    out.push_str(&template[copied..]);
    out
}
