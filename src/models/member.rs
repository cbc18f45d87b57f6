use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;

use super::validation::{FieldErrors, PayloadReader};

/// A fitness-center customer record.
///
/// Field order is the serialized order: `member_id, name, email,
/// phone_number, credit_card`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Member {
    pub member_id: i32,
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub credit_card: String,
}

/// Validated body of a member create or update request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberInput {
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub credit_card: String,
}

impl MemberInput {
    pub const FIELDS: [&'static str; 4] = ["name", "email", "phone_number", "credit_card"];
}

pub fn validate_member(payload: &Value) -> Result<MemberInput, FieldErrors> {
    let mut reader = PayloadReader::new(payload)?;

    let name = reader.string("name");
    let email = reader.string("email");
    let phone_number = reader.string("phone_number");
    let credit_card = reader.string("credit_card");
    reader.reject_unknown(&MemberInput::FIELDS);
    reader.finish()?;

    match (name, email, phone_number, credit_card) {
        (Some(name), Some(email), Some(phone_number), Some(credit_card)) => Ok(MemberInput {
            name,
            email,
            phone_number,
            credit_card,
        }),
        // finish() only succeeds when every field was read
        _ => Err(FieldErrors::schema("Incomplete member payload.")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::validation::{MISSING_FIELD, UNKNOWN_FIELD};
    use assert_matches::assert_matches;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn payload() -> Value {
        json!({
            "name": "Ada Lovelace",
            "email": "ada@example.com",
            "phone_number": "555-0100",
            "credit_card": "4111111111111111"
        })
    }

    #[test]
    fn test_valid_member() {
        let input = validate_member(&payload()).unwrap();
        assert_eq!(input.name, "Ada Lovelace");
        assert_eq!(input.phone_number, "555-0100");
    }

    #[test]
    fn test_each_missing_field_is_named() {
        for field in MemberInput::FIELDS {
            let mut body = payload();
            body.as_object_mut().unwrap().remove(field);

            let errors = validate_member(&body).unwrap_err();
            assert_eq!(errors.messages(field), &[MISSING_FIELD.to_string()], "field {}", field);
            assert_eq!(errors.fields().count(), 1);
        }
    }

    #[test]
    fn test_member_id_is_not_accepted() {
        let mut body = payload();
        body["member_id"] = json!(10);

        let errors = validate_member(&body).unwrap_err();
        assert_eq!(errors.messages("member_id"), &[UNKNOWN_FIELD.to_string()]);
    }

    #[test]
    fn test_wrong_type() {
        let mut body = payload();
        body["credit_card"] = json!(4111111111111111u64);

        assert_matches!(validate_member(&body), Err(errors) if errors.contains("credit_card"));
    }

    #[test]
    fn test_serialized_field_order() {
        let member = Member {
            member_id: 1,
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            phone_number: "555-0100".to_string(),
            credit_card: "4111".to_string(),
        };

        let rendered = serde_json::to_string(&member).unwrap();
        assert_eq!(
            rendered,
            r#"{"member_id":1,"name":"Ada","email":"ada@example.com","phone_number":"555-0100","credit_card":"4111"}"#
        );
    }
}
