//! UI string catalogs and language helpers.

use csv::ReaderBuilder;
use std::collections::HashMap;

pub struct UiStrings {
    values: HashMap<String, String>,
    language: String,
}

impl UiStrings {
    fn from_text(csv_text: &str) -> Self {
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .from_reader(csv_text.as_bytes());

        let headers = rdr.headers().expect("Could not read ui_strings.csv headers");
        let mut languages = Self::to_vec(headers);
        let _ = languages.remove(0); // First column holds the keys

        let mut values = HashMap::new();
        for record in rdr.records().flatten() {
            let mut record = Self::to_vec(&record);
            let key = record.remove(0);
            for (lnum, t) in record.iter().enumerate() {
                let lang_key = format!("{}:{key}", languages[lnum]);
                values.insert(lang_key, t.to_owned());
            }
        }

        Self {
            values,
            language: "en".to_owned(),
        }
    }

    pub fn set_language(&mut self, language: &str) {
        self.language = language.to_string();
    }

    pub fn get(&self, key: &str) -> String {
        let key = format!("{}:{}", self.language, key);
        self.values
            .get(&key)
            .map(|s| s.to_string())
            .unwrap_or_else(|| panic!("UI string {key} not found"))
    }

    fn to_vec(record: &csv::StringRecord) -> Vec<String> {
        record.iter().map(|s| s.to_string()).collect()
    }
}

impl Default for UiStrings {
    fn default() -> Self {
        let text = include_str!("../assets/ui_strings.csv");
        Self::from_text(text)
    }
}
