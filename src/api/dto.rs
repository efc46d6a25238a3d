//! Request bodies and query parameters
//!
//! Bodies are read as loose JSON and checked field by field, so one response
//! can report every problem at once. Properties outside a body's field list are
//! rejected rather than ignored.

use crate::domain::calendar::parse_iso_date;
use crate::domain::errors::{MedtrackError, ValidationErrors};
use crate::domain::assignment::too_many_days_message;
use crate::domain::{
    NewAssignment, NewMedication, NewPatient, TreatmentTiming, MAX_NUMBER_OF_DAYS,
};
use crate::domain::Result;
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::str::FromStr;

/// Field-by-field reader over a JSON object body
struct BodyFields {
    map: Map<String, Value>,
    errors: ValidationErrors,
}

impl BodyFields {
    fn new(body: Value, allowed: &[&str]) -> Result<Self> {
        let map = match body {
            Value::Object(map) => map,
            _ => {
                return Err(MedtrackError::invalid_field(
                    "body",
                    "Request body must be a JSON object",
                ))
            }
        };

        let mut errors = ValidationErrors::new();
        for key in map.keys() {
            if !allowed.contains(&key.as_str()) {
                errors.push(key.clone(), format!("property {key} should not exist"));
            }
        }

        Ok(Self { map, errors })
    }

    fn present(&mut self, field: &str, label: &str) -> Option<&Value> {
        match self.map.get(field) {
            None | Some(Value::Null) => {
                self.errors.push(field, format!("{label} is required"));
                None
            }
            Some(value) => Some(value),
        }
    }

    fn integer(&mut self, field: &str, label: &str) -> Option<i64> {
        let value = self.present(field, label)?;
        let parsed = match value {
            Value::Number(n) => n.as_i64().or_else(|| {
                n.as_f64()
                    .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
                    .map(|f| f as i64)
            }),
            _ => None,
        };

        if parsed.is_none() {
            self.errors.push(field, format!("{label} must be an integer"));
        }
        parsed
    }

    fn id<T: TryFrom<i64, Error = String>>(&mut self, field: &str, label: &str) -> Option<T> {
        let raw = self.integer(field, label)?;
        match T::try_from(raw) {
            Ok(id) => Some(id),
            Err(message) => {
                self.errors.push(field, message);
                None
            }
        }
    }

    fn date(&mut self, field: &str, label: &str) -> Option<NaiveDate> {
        let value = self.present(field, label)?;
        let parsed = value.as_str().and_then(parse_iso_date);

        if parsed.is_none() {
            self.errors
                .push(field, format!("{label} needs to be a valid ISO date string"));
        }
        parsed
    }

    fn text(&mut self, field: &str, label: &str) -> Option<String> {
        let text = self.present(field, label)?.as_str().map(str::to_string);
        match text {
            Some(s) if !s.trim().is_empty() => Some(s),
            Some(_) => {
                self.errors.push(field, format!("{label} is required"));
                None
            }
            None => {
                self.errors.push(field, format!("{label} must be String Value"));
                None
            }
        }
    }

    fn number_of_days(&mut self) -> Option<i64> {
        let days = self.integer("numberOfDays", "Number Of Days")?;
        if days < 1 {
            self.errors
                .push("numberOfDays", "Number Of Days must be at least 1");
            return None;
        }
        if days > MAX_NUMBER_OF_DAYS {
            self.errors.push("numberOfDays", too_many_days_message());
            return None;
        }
        Some(days)
    }

    fn timing(&mut self) -> Option<TreatmentTiming> {
        let start_date = self.date("startDate", "Start Date");
        let number_of_days = self.number_of_days();

        match TreatmentTiming::new(start_date?, number_of_days?) {
            Ok(timing) => Some(timing),
            Err(MedtrackError::Validation(errors)) => {
                for error in errors.fields() {
                    self.errors.push(error.field.clone(), error.message.clone());
                }
                None
            }
            Err(other) => {
                self.errors.push("numberOfDays", other.to_string());
                None
            }
        }
    }

    /// Return the built value if no field failed
    fn finish<T>(self, value: Option<T>) -> Result<T> {
        self.errors.into_result()?;
        value.ok_or_else(|| MedtrackError::invalid_field("body", "Invalid request body"))
    }
}

/// Body of `POST /assignment/create-assignment`
pub fn parse_create_assignment(body: Value) -> Result<NewAssignment> {
    let mut fields = BodyFields::new(
        body,
        &["patientId", "medicationId", "startDate", "numberOfDays"],
    )?;

    let patient_id = fields.id("patientId", "Patient Id");
    let medication_id = fields.id("medicationId", "Medication Id");
    let timing = fields.timing();

    let built = match (patient_id, medication_id, timing) {
        (Some(patient_id), Some(medication_id), Some(timing)) => Some(NewAssignment {
            patient_id,
            medication_id,
            timing,
        }),
        _ => None,
    };
    fields.finish(built)
}

/// Body of `PUT /assignment/assignment-update`
///
/// Only the timing may be sent; `patientId` and `medicationId` are rejected
/// like any other unknown property.
pub fn parse_update_assignment(body: Value) -> Result<TreatmentTiming> {
    let mut fields = BodyFields::new(body, &["startDate", "numberOfDays"])?;
    let timing = fields.timing();
    fields.finish(timing)
}

/// Body of `POST /assignment/patient-remaining-days`
pub fn parse_patient_identity(body: Value) -> Result<(String, NaiveDate)> {
    let mut fields = BodyFields::new(body, &["name", "dateOfBirth"])?;
    let name = fields.text("name", "Name");
    let date_of_birth = fields.date("dateOfBirth", "Date Of birth");

    let built = name.zip(date_of_birth);
    fields.finish(built)
}

/// Body of the patient create and update endpoints
pub fn parse_patient(body: Value) -> Result<NewPatient> {
    let (name, date_of_birth) = parse_patient_identity(body)?;
    Ok(NewPatient {
        name,
        date_of_birth,
    })
}

/// Body of the medication create and update endpoints
pub fn parse_medication(body: Value) -> Result<NewMedication> {
    let mut fields = BodyFields::new(body, &["name", "dosage", "frequency"])?;
    let name = fields.text("name", "Name");
    let dosage = fields.text("dosage", "Dosage");
    let frequency = fields.text("frequency", "Frequency");

    let built = match (name, dosage, frequency) {
        (Some(name), Some(dosage), Some(frequency)) => Some(NewMedication {
            name,
            dosage,
            frequency,
        }),
        _ => None,
    };
    fields.finish(built)
}

/// `?id=` query parameter
#[derive(Debug, Default, Deserialize)]
pub struct IdQuery {
    pub id: Option<String>,
}

impl IdQuery {
    /// Parse the id into a typed identifier
    pub fn parse<T: FromStr<Err = String>>(&self) -> Result<T> {
        let raw = self
            .id
            .as_deref()
            .ok_or_else(|| MedtrackError::invalid_field("id", "id is required"))?;
        raw.parse::<T>()
            .map_err(|message| MedtrackError::invalid_field("id", message))
    }
}
