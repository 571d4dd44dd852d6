pub mod airports {
    use serde::{Deserialize, Serialize};
    use serde_json::{Map, Value};
    use std::ops::Range;

    /// A single airport record, kept exactly as the dataset or client supplied it.
    ///
    /// `icao`, `iata`, `name` and `city` are the fields the service knows about, but nothing
    /// requires them to be present or to hold strings. Only a string `icao` makes a record
    /// reachable by code.
    #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct Airport {
        fields: Map<String, Value>,
    }

    impl Airport {
        pub fn new(icao: &str, iata: &str, name: &str, city: &str) -> Airport {
            let mut fields = Map::new();
            fields.insert("icao".to_string(), Value::from(icao));
            fields.insert("iata".to_string(), Value::from(iata));
            fields.insert("name".to_string(), Value::from(name));
            fields.insert("city".to_string(), Value::from(city));

            Airport { fields }
        }

        pub fn from_fields(fields: Map<String, Value>) -> Airport {
            Airport { fields }
        }

        pub fn fields(&self) -> &Map<String, Value> {
            &self.fields
        }

        pub fn field(&self, name: &str) -> Option<&Value> {
            self.fields.get(name)
        }

        /// Lookup key, `None` when the record has no `icao` or it is not a string.
        pub fn icao(&self) -> Option<&str> {
            self.text("icao")
        }

        pub fn iata(&self) -> Option<&str> {
            self.text("iata")
        }

        pub fn name(&self) -> Option<&str> {
            self.text("name")
        }

        pub fn city(&self) -> Option<&str> {
            self.text("city")
        }

        fn text(&self, name: &str) -> Option<&str> {
            self.fields.get(name).and_then(Value::as_str)
        }

        /// Overwrite every field named in `patch`, leaving the others untouched.
        pub fn apply_patch(&mut self, patch: Map<String, Value>) {
            self.fields.extend(patch);
        }
    }

    /// Raw pagination parameters as they arrive on the query string.
    ///
    /// Values are kept as strings so a missing or malformed parameter turns into an empty page
    /// rather than a rejected request.
    #[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
    pub struct PageQuery {
        pub page: Option<String>,
        #[serde(rename = "pageSize")]
        pub page_size: Option<String>,
    }

    impl PageQuery {
        pub fn new(page: usize, page_size: usize) -> PageQuery {
            PageQuery {
                page: Some(page.to_string()),
                page_size: Some(page_size.to_string()),
            }
        }

        /// Half-open index window `[(page-1)*pageSize, page*pageSize)` for this query.
        ///
        /// `None` unless both values are present positive integers and the window fits in
        /// `usize`.
        pub fn window(&self) -> Option<Range<usize>> {
            let page = positive(self.page.as_deref()?)?;
            let page_size = positive(self.page_size.as_deref()?)?;

            let min = (page - 1).checked_mul(page_size)?;
            let max = page.checked_mul(page_size)?;

            Some(min..max)
        }
    }

    fn positive(raw: &str) -> Option<usize> {
        raw.trim().parse::<usize>().ok().filter(|&value| value > 0)
    }
}
