//! The two shapes this tool works with.
use rowguard::{Model, Validate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An inbound payload. Keys are lowercase, the capitalized spelling is accepted too. Missing
/// keys and `null` decode to zero values and are reported by validation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default, rename_all = "lowercase")]
#[validate(rename_all = "PascalCase")]
pub struct Person {
    #[serde(alias = "Name", deserialize_with = "rowguard::json::null_as_default")]
    #[validate(required)]
    pub name: String,
    #[serde(alias = "Gender", deserialize_with = "rowguard::json::null_as_default")]
    #[validate(required, one_of("male", "female"))]
    pub gender: String,
    #[serde(alias = "Age", deserialize_with = "rowguard::json::null_as_default")]
    #[validate(required, min = 1, max = 100)]
    pub age: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Model)]
#[rowguard(insert = "InsertForm")]
pub struct Form {
    #[rowguard(primary_key, auto_increment, not_null)]
    pub id: i64,
    #[rowguard(size = 255, not_null, default_value = "<NAME>", unique)]
    pub name: String,
}

impl fmt::Display for Form {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t{}", self.id, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rowguard::schema::create_table;
    use rowguard::validate::Rule;
    use rowguard::TableMeta;

    #[test]
    fn test_person_rules() {
        let p = Person {
            name: "Ada".to_string(),
            gender: "female".to_string(),
            age: 101,
        };
        let errors = p.validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors.field("Age").map(|v| &v.rule),
            Some(&Rule::Range {
                min: Some(1),
                max: Some(100)
            })
        );
        assert_eq!(Person::default().validate().unwrap_err().len(), 3);
    }

    #[test]
    fn test_form_table() {
        assert_eq!(Form::table_name(), "form");
        assert_eq!(Form::primary_key(), "id");
        let ddl = create_table::<Form>();
        assert!(ddl.contains("\"id\" INTEGER PRIMARY KEY AUTOINCREMENT NOT NULL"));
        assert!(ddl.contains("DEFAULT '<NAME>' UNIQUE"));
    }

    #[test]
    fn test_form_display() {
        let form = Form {
            id: 7,
            name: "<NAME>".to_string(),
        };
        assert_eq!(form.to_string(), "7\t<NAME>");
    }
}
