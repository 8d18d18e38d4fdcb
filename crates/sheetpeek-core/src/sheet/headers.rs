use calamine::Data;
use std::collections::HashMap;

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Makes labels unique the way common dataframe readers do: the second "A"
/// becomes "A.1", and a suffix that collides with an existing label is
/// suffixed again ("A", "A.1", "A" -> "A", "A.1", "A.1.1").
fn dedupe(labels: &mut [String]) {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for label in labels.iter_mut() {
        let mut col = std::mem::take(label);
        let mut cur = counts.get(&col).copied().unwrap_or(0);
        while cur > 0 {
            counts.insert(col.clone(), cur + 1);
            col = format!("{}.{}", col, cur);
            cur = counts.get(&col).copied().unwrap_or(0);
        }
        counts.insert(col.clone(), cur + 1);
        *label = col;
    }
}

/// Turns a header row into column labels.
///
/// Blank cells become `Unnamed: <index>` and repeated labels are made unique
/// with `.1`, `.2`, ... suffixes. A row with no non-blank cell has no headers.
pub fn header_labels(row: &[Data]) -> Vec<String> {
    let raw: Vec<String> = row.iter().map(cell_text).collect();
    if raw.iter().all(|s| s.trim().is_empty()) {
        return Vec::new();
    }

    let mut labels: Vec<String> = raw
        .into_iter()
        .enumerate()
        .map(|(i, s)| {
            if s.trim().is_empty() {
                format!("Unnamed: {}", i)
            } else {
                s
            }
        })
        .collect();
    dedupe(&mut labels);
    labels
}
