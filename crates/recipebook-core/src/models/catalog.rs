use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct Season {
    #[serde(rename = "SeasonID")]
    pub id: i64,
    #[serde(rename = "Season")]
    pub name: String,
    #[serde(rename = "Description", default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct Celebration {
    #[serde(rename = "CelebrationID")]
    pub id: i64,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Description", default)]
    pub description: Option<String>,
    #[serde(rename = "Status", default)]
    pub status: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct Ethnicity {
    #[serde(rename = "EthnicityID")]
    pub id: i64,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Description", default)]
    pub description: Option<String>,
    #[serde(rename = "Status", default)]
    pub status: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_seasons() {
        let json = r#"[{"SeasonID": 1, "Season": "Summer", "Description": "Hot days"}, {"SeasonID": 2, "Season": "Ramadan"}]"#;
        let seasons: Vec<Season> = serde_json::from_str(json).expect("Failed to parse seasons JSON");
        assert_eq!(seasons.len(), 2);
        assert_eq!(seasons[0].name, "Summer");
        assert_eq!(seasons[1].description, None);
    }

    #[test]
    fn test_parse_celebration_ignores_nested_recipes() {
        let json = r#"{"CelebrationID": 5, "Name": "Eid", "Description": "Feast", "Recipes": [], "Status": "approved", "SubmittedBy": 1}"#;
        let celebration: Celebration = serde_json::from_str(json).expect("Failed to parse celebration JSON");
        assert_eq!(celebration.id, 5);
        assert_eq!(celebration.status.as_deref(), Some("approved"));
    }
}
