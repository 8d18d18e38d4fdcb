//! Canonical field mapping for sheet headers.
//!
//! Worker sheets label the same column many ways (Korean and English, with
//! and without spaces). This table resolves a header to the record field it
//! feeds, and reports which required fields a sheet lacks.

use std::collections::BTreeMap;

/// Canonical record fields in display order.
pub const FIELDS: &[&str] = &[
    "name",
    "resident_id",
    "address",
    "phone_number",
    "bank_name",
    "account_number",
    "work_date",
    "work_place",
    "daily_rate",
    "id_card_image",
    "bank_book_image",
    "license_image",
];

/// Fields a usable sheet must provide. Phone number is optional.
pub const REQUIRED_FIELDS: &[&str] = &[
    "name",
    "resident_id",
    "address",
    "bank_name",
    "account_number",
    "work_date",
    "work_place",
    "daily_rate",
    "id_card_image",
    "bank_book_image",
    "license_image",
];

const BUILTIN_ALIASES: &[(&str, &str)] = &[
    ("성명", "name"),
    ("이름", "name"),
    ("Name", "name"),
    ("주민등록번호", "resident_id"),
    ("Resident ID", "resident_id"),
    ("주소", "address"),
    ("Address", "address"),
    ("연락처", "phone_number"),
    ("Phone", "phone_number"),
    ("Phone Number", "phone_number"),
    ("전화번호", "phone_number"),
    ("은행명", "bank_name"),
    ("은행", "bank_name"),
    ("Bank Name", "bank_name"),
    ("Bank", "bank_name"),
    ("계좌번호", "account_number"),
    ("Account Number", "account_number"),
    ("날짜", "work_date"),
    ("근무일자", "work_date"),
    ("Work Date", "work_date"),
    ("Date", "work_date"),
    ("타임스탬프", "work_date"),
    ("장소", "work_place"),
    ("근무지", "work_place"),
    ("Work Place", "work_place"),
    ("Place", "work_place"),
    ("소속", "work_place"),
    ("수당", "daily_rate"),
    ("금액", "daily_rate"),
    ("Daily Rate", "daily_rate"),
    ("Amount", "daily_rate"),
    ("정산유형", "daily_rate"),
    ("신분증", "id_card_image"),
    ("신분증 사본", "id_card_image"),
    ("신분증사본", "id_card_image"),
    ("ID Card", "id_card_image"),
    ("ID Card Image", "id_card_image"),
    ("통장사본", "bank_book_image"),
    ("통장 사본", "bank_book_image"),
    ("통장", "bank_book_image"),
    ("Bank Book", "bank_book_image"),
    ("Bank Book Image", "bank_book_image"),
    ("자격증", "license_image"),
    ("자격증 사본", "license_image"),
    ("자격증사본", "license_image"),
    ("License", "license_image"),
    ("License Image", "license_image"),
];

fn squash(s: &str) -> String {
    s.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Header label -> canonical field lookup.
#[derive(Debug, Clone)]
pub struct ColumnMapping {
    exact: BTreeMap<String, String>,
    squashed: BTreeMap<String, String>,
}

impl Default for ColumnMapping {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ColumnMapping {
    /// The built-in alias table.
    pub fn builtin() -> Self {
        let mut mapping = ColumnMapping {
            exact: BTreeMap::new(),
            squashed: BTreeMap::new(),
        };
        for (label, field) in BUILTIN_ALIASES {
            mapping.insert(label, field, false);
        }
        mapping
    }

    /// Adds (or overrides) aliases, e.g. from the config file.
    pub fn with_aliases<'a, I>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = (&'a String, &'a String)>,
    {
        for (label, field) in aliases {
            self.insert(label, field, true);
        }
        self
    }

    /// Within one table the first alias wins the whitespace-insensitive form;
    /// `replace` lets a later table take it over.
    fn insert(&mut self, label: &str, field: &str, replace: bool) {
        let label = label.trim();
        self.exact.insert(label.to_string(), field.to_string());
        let key = squash(label);
        if replace {
            self.squashed.insert(key, field.to_string());
        } else {
            self.squashed
                .entry(key)
                .or_insert_with(|| field.to_string());
        }
    }

    /// Resolves a header: exact match on the trimmed label first, then a match
    /// ignoring all whitespace.
    pub fn resolve(&self, header: &str) -> Option<&str> {
        self.exact
            .get(header.trim())
            .or_else(|| self.squashed.get(&squash(header)))
            .map(String::as_str)
    }

    /// Required fields that none of `headers` resolve to, in canonical order.
    pub fn missing_fields<S: AsRef<str>>(&self, headers: &[S]) -> Vec<&'static str> {
        let present: Vec<&str> = headers
            .iter()
            .filter_map(|h| self.resolve(h.as_ref()))
            .collect();
        REQUIRED_FIELDS
            .iter()
            .copied()
            .filter(|f| !present.contains(f))
            .collect()
    }
}
