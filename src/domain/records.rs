// Record domain models (residents, blotters, record types, search hits)
use serde::{Deserialize, Serialize};

const NOT_AVAILABLE: &str = "N/A";

/// Age as sent by the server: a number of years, or a text marker such as "N/A".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Age {
    Years(i64),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resident {
    pub id: i64,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub age: Option<Age>,
    #[serde(default)]
    pub status: Option<String>,
}

impl Resident {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn address_label(&self) -> &str {
        non_empty(self.address.as_deref()).unwrap_or(NOT_AVAILABLE)
    }

    pub fn age_label(&self) -> String {
        match &self.age {
            Some(Age::Years(years)) if *years != 0 => years.to_string(),
            Some(Age::Text(text)) if !text.is_empty() => text.clone(),
            _ => NOT_AVAILABLE.to_string(),
        }
    }

    pub fn status_label(&self) -> &str {
        non_empty(self.status.as_deref()).unwrap_or("Active")
    }

    pub fn profile_path(&self) -> String {
        format!("/residents/{}", self.id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reporter {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

/// An incident/case record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Blotter {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub case_title: String,
    #[serde(default)]
    pub reported_by: Option<Reporter>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub hearing_date: Option<String>,
}

impl Blotter {
    pub fn reporter_name(&self) -> String {
        match &self.reported_by {
            Some(reporter) => format!("{} {}", reporter.first_name, reporter.last_name),
            None => "Anonymous".to_string(),
        }
    }

    pub fn location_label(&self) -> Option<&str> {
        non_empty(self.location.as_deref())
    }
}

/// Entry of the resident selection control (`/api/residents`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResidentOption {
    pub id: i64,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub address: Option<String>,
}

impl ResidentOption {
    pub fn label(&self) -> String {
        format!(
            "{} {} - {}",
            self.first_name,
            self.last_name,
            self.address.as_deref().unwrap_or_default()
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordType {
    pub value: String,
    pub label: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResults {
    #[serde(default)]
    pub residents: Vec<ResidentHit>,
    #[serde(default)]
    pub blotters: Vec<BlotterHit>,
}

impl SearchResults {
    pub fn len(&self) -> usize {
        self.residents.len() + self.blotters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResidentHit {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlotterHit {
    pub id: i64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub status: Option<String>,
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resident(json: &str) -> Resident {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_resident_fallbacks() {
        let r = resident(r#"{"id": 7, "first_name": "Ana", "last_name": "Cruz", "age": "N/A", "status": ""}"#);
        assert_eq!(r.full_name(), "Ana Cruz");
        assert_eq!(r.address_label(), "N/A");
        assert_eq!(r.age_label(), "N/A");
        assert_eq!(r.status_label(), "Active");
        assert_eq!(r.profile_path(), "/residents/7");

        let r = resident(r#"{"id": 8, "first_name": "Ben", "last_name": "Reyes", "address": "Purok 2", "age": 41, "status": "Inactive"}"#);
        assert_eq!(r.address_label(), "Purok 2");
        assert_eq!(r.age_label(), "41");
        assert_eq!(r.status_label(), "Inactive");
    }

    #[test]
    fn test_zero_age_is_not_available() {
        let r = resident(r#"{"id": 1, "first_name": "A", "last_name": "B", "age": 0}"#);
        assert_eq!(r.age_label(), "N/A");
    }

    #[test]
    fn test_blotter_reporter_name() {
        let b: Blotter = serde_json::from_str(
            r#"{"case_title": "Noise", "reported_by": {"first_name": "Lito", "last_name": "Santos"}, "location": ""}"#,
        )
        .unwrap();
        assert_eq!(b.reporter_name(), "Lito Santos");
        assert_eq!(b.location_label(), None);

        let anonymous: Blotter = serde_json::from_str(r#"{"case_title": "Theft", "reported_by": null}"#).unwrap();
        assert_eq!(anonymous.reporter_name(), "Anonymous");
    }

    #[test]
    fn test_resident_option_label() {
        let option = ResidentOption {
            id: 3,
            first_name: "Maria".to_string(),
            last_name: "Dela Cruz".to_string(),
            address: Some("Purok 5".to_string()),
        };
        assert_eq!(option.label(), "Maria Dela Cruz - Purok 5");
    }

    #[test]
    fn test_search_results_tolerate_missing_keys() {
        let results: SearchResults =
            serde_json::from_str(r#"{"residents": [{"id": 1, "name": "Ana Cruz", "type": "resident"}]}"#).unwrap();
        assert_eq!(results.len(), 1);
        assert!(results.blotters.is_empty());

        let empty: SearchResults = serde_json::from_str(r#"{"results": []}"#).unwrap();
        assert!(empty.is_empty());
    }
}
