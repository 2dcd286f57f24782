//! Contact Service - Pure business logic without HTTP layer
//!
//! Ordering and age projection are plain functions over already-loaded
//! contacts; the async functions at the bottom wire them to a
//! [`ContactRepository`] for the HTTP handlers.

use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde_json::Value;

use crate::domain::{Contact, ContactProjection, ContactRepository, DomainError, NewContact};

const BIRTHDATE_FORMAT: &str = "%Y-%m-%d";

/// Supported orderings for `GET /contacts/order`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderKey {
    Asc,
    Desc,
    AgeAsc,
    AgeDes,
}

impl FromStr for OrderKey {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(OrderKey::Asc),
            "desc" => Ok(OrderKey::Desc),
            "age-asc" => Ok(OrderKey::AgeAsc),
            "age-des" => Ok(OrderKey::AgeDes),
            other => Err(DomainError::InvalidOrderKey(other.to_string())),
        }
    }
}

/// Completed years between `birthdate` and `today`.
///
/// A Feb 29 birthday counts as reached on Mar 1 in non-leap years. Birthdates
/// after `today` give a negative age.
pub fn age_on(birthdate: &str, today: NaiveDate) -> Result<i32, DomainError> {
    let invalid = || DomainError::InvalidDateFormat(birthdate.to_string());

    // chrono accepts single-digit fields, a signed year and leading spaces
    if !is_iso_date_shape(birthdate) {
        return Err(invalid());
    }
    let born = NaiveDate::parse_from_str(birthdate, BIRTHDATE_FORMAT).map_err(|_| invalid())?;

    let mut years = today.year() - born.year();
    if (today.month(), today.day()) < (born.month(), born.day()) {
        years -= 1;
    }
    Ok(years)
}

/// Exactly `DDDD-DD-DD` in ASCII digits
fn is_iso_date_shape(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

/// Sort contacts by `order` and project each one with its computed age.
///
/// The key is validated before anything else. A single malformed birthdate
/// fails the whole call. Sorts are stable; `age-des` is the ascending age
/// order reversed as a whole, so ties come out in reverse input order.
pub fn project(
    contacts: &[Contact],
    order: &str,
    today: NaiveDate,
) -> Result<Vec<ContactProjection>, DomainError> {
    let order = order.parse::<OrderKey>()?;

    let mut aged = contacts
        .iter()
        .map(|c| age_on(&c.birthdate, today).map(|age| (c, age)))
        .collect::<Result<Vec<_>, _>>()?;

    match order {
        OrderKey::Asc => aged.sort_by(|a, b| a.0.name.cmp(&b.0.name)),
        OrderKey::Desc => {
            aged.sort_by(|a, b| a.0.name.cmp(&b.0.name));
            aged.reverse();
        }
        OrderKey::AgeAsc => aged.sort_by_key(|(_, age)| *age),
        OrderKey::AgeDes => {
            aged.sort_by_key(|(_, age)| *age);
            aged.reverse();
        }
    }

    Ok(aged
        .into_iter()
        .map(|(c, age)| ContactProjection {
            id: c.id,
            name: c.name.clone(),
            document: c.document,
            email: c.email.clone(),
            age: format!("{} años", age),
        })
        .collect())
}

/// Decoded `POST /contacts` body
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactPayload {
    Single(NewContact),
    Batch(Vec<NewContact>),
}

impl ContactPayload {
    /// Arrays are tried first, then objects; any other JSON shape is rejected.
    pub fn from_value(value: Value) -> Result<Self, DomainError> {
        match value {
            Value::Array(_) => serde_json::from_value(value)
                .map(ContactPayload::Batch)
                .map_err(|e| DomainError::Validation(e.to_string())),
            Value::Object(_) => serde_json::from_value(value)
                .map(ContactPayload::Single)
                .map_err(|e| DomainError::Validation(e.to_string())),
            _ => Err(DomainError::UnsupportedPayloadShape),
        }
    }
}

/// Records returned by a create request, mirroring the payload shape
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Created {
    Single(Contact),
    Batch(Vec<Contact>),
}

/// List all contacts unordered
pub async fn list_contacts(repo: &dyn ContactRepository) -> Result<Vec<Contact>, DomainError> {
    let contacts = repo.find_all().await?;
    tracing::debug!("Listed {} contacts", contacts.len());
    Ok(contacts)
}

/// Get a single contact by ID
pub async fn get_contact(repo: &dyn ContactRepository, id: i64) -> Result<Contact, DomainError> {
    repo.find_by_id(id).await?.ok_or(DomainError::NotFound)
}

/// Load every contact and project it in the requested order
pub async fn ordered_contacts(
    repo: &dyn ContactRepository,
    order: &str,
    today: NaiveDate,
) -> Result<Vec<ContactProjection>, DomainError> {
    // Reject a bad key before touching storage
    order.parse::<OrderKey>()?;

    let contacts = repo.find_all().await?;
    let projected = project(&contacts, order, today)?;
    tracing::info!(order, count = projected.len(), "Projected ordered contacts");
    Ok(projected)
}

/// Save one contact or a batch, depending on the payload shape
pub async fn create_contacts(
    repo: &dyn ContactRepository,
    payload: ContactPayload,
) -> Result<Created, DomainError> {
    match payload {
        ContactPayload::Single(contact) => {
            let saved = repo.save(contact).await?;
            tracing::info!(id = saved.id, "Contact created");
            Ok(Created::Single(saved))
        }
        ContactPayload::Batch(contacts) => {
            let saved = repo.save_all(contacts).await?;
            tracing::info!(count = saved.len(), "Contacts created in batch");
            Ok(Created::Batch(saved))
        }
    }
}

/// Replace an existing contact
pub async fn update_contact(
    repo: &dyn ContactRepository,
    id: i64,
    contact: NewContact,
) -> Result<Contact, DomainError> {
    let updated = repo.update(id, contact).await?;
    tracing::info!(id, "Contact updated");
    Ok(updated)
}

/// Delete a contact
pub async fn delete_contact(repo: &dyn ContactRepository, id: i64) -> Result<(), DomainError> {
    repo.delete(id).await?;
    tracing::info!(id, "Contact deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    fn contact(id: i64, name: &str, birthdate: &str) -> Contact {
        Contact {
            id,
            name: name.to_string(),
            document: 1000 + id as i32,
            email: format!("{}@example.com", name.to_lowercase()),
            birthdate: birthdate.to_string(),
        }
    }

    fn names(projected: &[ContactProjection]) -> Vec<&str> {
        projected.iter().map(|p| p.name.as_str()).collect()
    }

    #[test]
    fn test_order_key_parsing() {
        assert_eq!("asc".parse::<OrderKey>().unwrap(), OrderKey::Asc);
        assert_eq!("desc".parse::<OrderKey>().unwrap(), OrderKey::Desc);
        assert_eq!("age-asc".parse::<OrderKey>().unwrap(), OrderKey::AgeAsc);
        assert_eq!("age-des".parse::<OrderKey>().unwrap(), OrderKey::AgeDes);
        assert!(matches!(
            "age-desc".parse::<OrderKey>(),
            Err(DomainError::InvalidOrderKey(k)) if k == "age-desc"
        ));
        assert!("ASC".parse::<OrderKey>().is_err());
    }

    #[test]
    fn test_age_counts_completed_years() {
        assert_eq!(age_on("1990-06-15", today()).unwrap(), 34);
        assert_eq!(age_on("1990-06-16", today()).unwrap(), 33);
        assert_eq!(age_on("1990-06-14", today()).unwrap(), 34);
        assert_eq!(age_on("2024-06-15", today()).unwrap(), 0);
    }

    #[test]
    fn test_age_leap_day_birthdays() {
        let feb_28 = NaiveDate::from_ymd_opt(2023, 2, 28).unwrap();
        let mar_1 = NaiveDate::from_ymd_opt(2023, 3, 1).unwrap();
        assert_eq!(age_on("2000-02-29", feb_28).unwrap(), 22);
        assert_eq!(age_on("2000-02-29", mar_1).unwrap(), 23);

        let leap_day = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        assert_eq!(age_on("2000-02-29", leap_day).unwrap(), 24);
    }

    #[test]
    fn test_age_future_birthdate_is_negative() {
        assert_eq!(age_on("2026-06-14", today()).unwrap(), -2);
    }

    #[test]
    fn test_age_rejects_malformed_dates() {
        for bad in [
            "not-a-date",
            "15/06/1990",
            "1990-02-30",
            "",
            "1990-06",
            "1990-6-5",
            "1990-06-5",
            "+1990-01-01",
            " 1990-01-01",
            "1990-01-01 ",
            "12345-01-01",
            "１９９０-01-01",
        ] {
            assert!(
                matches!(age_on(bad, today()), Err(DomainError::InvalidDateFormat(_))),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn test_age_rendering() {
        let contacts = vec![contact(1, "Ana", "1990-06-15")];
        let projected = project(&contacts, "asc", today()).unwrap();
        assert_eq!(projected[0].age, "34 años");
        assert_eq!(projected[0].id, 1);
        assert_eq!(projected[0].document, 1001);
        assert_eq!(projected[0].email, "ana@example.com");
    }

    #[test]
    fn test_age_scenario_with_ties() {
        let contacts = vec![
            contact(1, "Beta", "1994-01-01"),
            contact(2, "Alpha", "1999-01-01"),
            contact(3, "Gamma", "1999-03-01"),
        ];

        let asc = project(&contacts, "age-asc", today()).unwrap();
        assert_eq!(names(&asc), ["Alpha", "Gamma", "Beta"]);

        let des = project(&contacts, "age-des", today()).unwrap();
        assert_eq!(names(&des), ["Beta", "Gamma", "Alpha"]);
    }

    #[test]
    fn test_age_des_is_exact_reverse_of_age_asc() {
        let contacts = vec![
            contact(1, "D", "1980-05-05"),
            contact(2, "B", "1990-01-01"),
            contact(3, "A", "1980-07-07"),
            contact(4, "C", "1990-02-02"),
            contact(5, "E", "2001-12-31"),
        ];

        let asc = project(&contacts, "age-asc", today()).unwrap();
        let mut des = project(&contacts, "age-des", today()).unwrap();
        des.reverse();
        assert_eq!(asc, des);

        let ages: Vec<i32> = contacts
            .iter()
            .map(|c| age_on(&c.birthdate, today()).unwrap())
            .collect();
        assert!(ages.iter().any(|a| ages.iter().filter(|b| *b == a).count() > 1));
        let asc_ages: Vec<&str> = asc.iter().map(|p| p.age.as_str()).collect();
        assert_eq!(asc_ages, ["22 años", "34 años", "34 años", "43 años", "44 años"]);
    }

    #[test]
    fn test_name_ordering_is_case_sensitive() {
        let contacts = vec![
            contact(1, "beta", "1990-01-01"),
            contact(2, "Alpha", "1990-01-01"),
            contact(3, "Beta", "1990-01-01"),
        ];
        let asc = project(&contacts, "asc", today()).unwrap();
        assert_eq!(names(&asc), ["Alpha", "Beta", "beta"]);
    }

    #[test]
    fn test_desc_with_name_ties_reverses_ascending_output() {
        // Tied names keep input order under "asc" and come out reversed
        // under "desc", so "desc" is not a stable descending sort.
        let contacts = vec![
            contact(1, "Sam", "1990-01-01"),
            contact(2, "Ana", "1990-01-01"),
            contact(3, "Sam", "1985-01-01"),
        ];

        let asc = project(&contacts, "asc", today()).unwrap();
        let asc_ids: Vec<i64> = asc.iter().map(|p| p.id).collect();
        assert_eq!(asc_ids, [2, 1, 3]);

        let desc = project(&contacts, "desc", today()).unwrap();
        let desc_ids: Vec<i64> = desc.iter().map(|p| p.id).collect();
        assert_eq!(desc_ids, [3, 1, 2]);
    }

    #[test]
    fn test_every_order_keeps_all_ids() {
        let contacts = vec![
            contact(1, "Zoe", "1970-01-01"),
            contact(2, "Yan", "2000-01-01"),
            contact(3, "Xia", "1985-01-01"),
        ];
        for order in ["asc", "desc", "age-asc", "age-des"] {
            let mut ids: Vec<i64> = project(&contacts, order, today())
                .unwrap()
                .iter()
                .map(|p| p.id)
                .collect();
            ids.sort();
            assert_eq!(ids, [1, 2, 3], "order {order}");
        }
    }

    #[test]
    fn test_invalid_order_key_wins_over_bad_dates() {
        let contacts = vec![contact(1, "Ana", "not-a-date")];
        let err = project(&contacts, "xyz", today()).unwrap_err();
        assert!(matches!(err, DomainError::InvalidOrderKey(k) if k == "xyz"));
    }

    #[test]
    fn test_malformed_birthdate_fails_whole_projection() {
        let contacts = vec![
            contact(1, "Ana", "1990-01-01"),
            contact(2, "Bob", "not-a-date"),
            contact(3, "Cid", "1980-01-01"),
        ];
        for order in ["asc", "desc", "age-asc", "age-des"] {
            let err = project(&contacts, order, today()).unwrap_err();
            assert!(matches!(err, DomainError::InvalidDateFormat(ref d) if d == "not-a-date"));
        }
    }

    #[test]
    fn test_empty_input() {
        assert!(project(&[], "age-des", today()).unwrap().is_empty());
    }

    #[test]
    fn test_payload_single_object() {
        let payload = ContactPayload::from_value(json!({
            "id": 99,
            "name": "Ana",
            "document": 123,
            "email": "ana@example.com",
            "birthdate": "1990-01-01"
        }))
        .unwrap();

        assert_eq!(
            payload,
            ContactPayload::Single(NewContact {
                name: "Ana".to_string(),
                document: 123,
                email: "ana@example.com".to_string(),
                birthdate: "1990-01-01".to_string(),
            })
        );
    }

    #[test]
    fn test_payload_array() {
        let payload = ContactPayload::from_value(json!([
            {"name": "Ana", "document": 1, "email": "a@x.com", "birthdate": "1990-01-01"},
            {"name": "Bob", "document": 2, "email": "b@x.com", "birthdate": "1991-01-01"}
        ]))
        .unwrap();

        match payload {
            ContactPayload::Batch(contacts) => {
                assert_eq!(contacts.len(), 2);
                assert_eq!(contacts[1].name, "Bob");
            }
            other => panic!("expected batch, got {other:?}"),
        }
    }

    #[test]
    fn test_payload_unsupported_shapes() {
        for value in [json!("contact"), json!(42), json!(true), Value::Null] {
            assert!(matches!(
                ContactPayload::from_value(value),
                Err(DomainError::UnsupportedPayloadShape)
            ));
        }
    }

    #[test]
    fn test_payload_field_type_errors() {
        let err = ContactPayload::from_value(json!({
            "name": "Ana",
            "document": "not-a-number",
            "email": "ana@example.com",
            "birthdate": "1990-01-01"
        }))
        .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        let err = ContactPayload::from_value(json!([{"name": "Ana"}])).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }
}
