//! # Organization Schema
//!
//! Organizations carry far fewer rules than datasets: identity, slug,
//! title, and the membership list the notification fan-out walks to find
//! someone to tell about a broken dataset. A single pass produces error
//! alerts only.

use std::sync::LazyLock;

use curator_core::Alerts;
use curator_convert::{
    empty_to_absent, input_to_email, pipe, require, strukt, type_check, uniform_seq, Context,
    Converter, UnlistedPolicy, ValueKind,
};
use serde_json::Value;

use crate::fragments::{json_to_markdown, json_to_name, json_to_title, json_to_uuid};

/// The organization schema: one pass, error severity.
pub static ORGANIZATION_SCHEMA: LazyLock<Converter> = LazyLock::new(|| {
    pipe([
        type_check(ValueKind::Object),
        strukt(
            [
                ("id", pipe([json_to_uuid(), require()])),
                ("name", pipe([json_to_name(), require()])),
                ("title", pipe([json_to_title(), require()])),
                ("description", json_to_markdown()),
                ("public_service", type_check(ValueKind::Boolean)),
                (
                    "users",
                    pipe([
                        type_check(ValueKind::Array),
                        uniform_seq(pipe([
                            type_check(ValueKind::Object),
                            strukt(
                                [
                                    ("id", pipe([json_to_uuid(), require()])),
                                    ("email", input_to_email()),
                                ],
                                UnlistedPolicy::Keep,
                            ),
                            require(),
                        ])),
                        empty_to_absent(),
                    ]),
                ),
            ],
            UnlistedPolicy::Keep,
        ),
    ])
});

/// Validate an organization record.
pub fn check_organization(organization: &Value) -> Alerts {
    let outcome = ORGANIZATION_SCHEMA.apply(organization.clone(), &Context::new());
    Alerts::errors(outcome.error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn complete_organization_is_clean() {
        let org = json!({
            "id": "123e4567-e89b-12d3-a456-426614174000",
            "name": "premier-ministre",
            "title": "Premier Ministre",
            "public_service": true,
            "users": [
                {"id": "123e4567-e89b-12d3-a456-426614174001", "email": "user@example.org"},
            ],
        });
        assert!(check_organization(&org).is_empty());
    }

    #[test]
    fn missing_identity_is_flagged() {
        let org = json!({"title": "Premier Ministre"});
        let alerts = check_organization(&org);
        let error = alerts.error.unwrap();
        assert_eq!(error.get("id").unwrap().as_leaf(), Some("Missing value"));
        assert_eq!(error.get("name").unwrap().as_leaf(), Some("Missing value"));
    }

    #[test]
    fn bad_user_email_is_keyed_by_index() {
        let org = json!({
            "id": "123e4567-e89b-12d3-a456-426614174000",
            "name": "premier-ministre",
            "title": "Premier Ministre",
            "users": [
                {"id": "123e4567-e89b-12d3-a456-426614174001", "email": "user@example.org"},
                {"id": "123e4567-e89b-12d3-a456-426614174002", "email": "not-an-email"},
            ],
        });
        let alerts = check_organization(&org);
        let error = alerts.error.unwrap();
        let users = error.get("users").unwrap();
        assert!(users.get_index(0).is_none());
        assert_eq!(
            users.get_index(1).unwrap().get("email").unwrap().as_leaf(),
            Some("Invalid email address"),
        );
    }
}
