use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use rowguard::validate::ValidationErrors;
use rowguard::Error;
use serde_json::json;
use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

use crate::schema::Person;

#[derive(Parser, Debug)]
pub struct Check {
    /// JSON file holding a Person. Reads stdin when omitted.
    path: Option<PathBuf>,

    /// Print the result as JSON on stdout.
    #[arg(long)]
    json: bool,
}

#[derive(Debug)]
pub enum Outcome {
    Valid(Person),
    Invalid(ValidationErrors),
    Malformed(String),
}

impl Outcome {
    fn is_valid(&self) -> bool {
        matches!(self, Outcome::Valid(_))
    }

    fn to_json(&self) -> serde_json::Value {
        match self {
            Outcome::Valid(person) => json!({ "valid": true, "person": person }),
            Outcome::Invalid(errors) => json!({ "valid": false, "violations": errors }),
            Outcome::Malformed(message) => json!({ "valid": false, "error": message }),
        }
    }
}

pub fn evaluate(payload: &str) -> Result<Outcome> {
    match rowguard::json::from_str::<Person>(payload) {
        Ok(person) => Ok(Outcome::Valid(person)),
        Err(Error::ValidationError(errors)) => Ok(Outcome::Invalid(errors)),
        Err(Error::JsonError(e)) => Ok(Outcome::Malformed(e.to_string())),
        Err(e) => Err(e.into()),
    }
}

impl Check {
    fn read_payload(&self) -> Result<String> {
        match &self.path {
            Some(path) => Ok(std::fs::read_to_string(path)?),
            None => {
                let mut buf = String::new();
                std::io::stdin().read_to_string(&mut buf)?;
                Ok(buf)
            }
        }
    }

    pub fn run(self) -> Result<ExitCode> {
        let payload = self.read_payload()?;
        let outcome = evaluate(&payload)?;
        if self.json {
            println!("{}", serde_json::to_string_pretty(&outcome.to_json())?);
        } else {
            match &outcome {
                Outcome::Valid(_) => println!("{}", "OK".green()),
                Outcome::Invalid(errors) => {
                    for violation in errors {
                        println!("{} {}", "INVALID".red(), violation);
                    }
                }
                Outcome::Malformed(message) => println!("{} {}", "MALFORMED".red(), message),
            }
        }
        Ok(if outcome.is_valid() {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_valid_payload() {
        let outcome = evaluate(r#"{"name": "Ada", "gender": "female", "age": 36}"#).unwrap();
        assert_matches!(outcome, Outcome::Valid(ref p) if p.age == 36);
        let value = outcome.to_json();
        assert_eq!(value["valid"], true);
        assert_eq!(value["person"]["name"], "Ada");
    }

    #[test]
    fn test_invalid_payload() {
        let outcome = evaluate(r#"{"Name": "Ada", "Gender": "robot"}"#).unwrap();
        let Outcome::Invalid(errors) = &outcome else {
            panic!("expected violations, got {outcome:?}");
        };
        let fields = errors.iter().map(|v| v.field).collect::<Vec<_>>();
        assert_eq!(fields, ["Gender", "Age"]);

        let value = outcome.to_json();
        assert_eq!(value["valid"], false);
        assert_eq!(value["violations"][0]["field"], "Gender");
        assert_eq!(value["violations"][0]["rule"], "one_of");
        assert_eq!(value["violations"][1]["rule"], "required");
    }

    #[test]
    fn test_null_is_a_violation() {
        let outcome = evaluate(r#"{"name": null, "gender": "male", "age": 30}"#).unwrap();
        assert_matches!(outcome, Outcome::Invalid(ref errors) if errors.len() == 1 && errors.field("Name").is_some());
    }

    #[test]
    fn test_malformed_payload() {
        assert_matches!(evaluate(r#"{"age": "old"}"#).unwrap(), Outcome::Malformed(_));
        assert_matches!(evaluate("not json").unwrap(), Outcome::Malformed(_));
    }
}
