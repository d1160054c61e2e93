//! Unit tests for identity value objects.

use crate::identity::domain::{EmailAddress, IdentityDomainError, Session, User, UserId};
use mockable::DefaultClock;
use rstest::rstest;

#[rstest]
#[case("Alice@Example.COM", "alice@example.com")]
#[case("  bob@team.example.org ", "bob@team.example.org")]
fn email_address_is_normalized(#[case] raw: &str, #[case] expected: &str) {
    let email = EmailAddress::new(raw).expect("valid email");
    assert_eq!(email.as_str(), expected);
}

#[rstest]
#[case("")]
#[case("no-at-sign")]
#[case("@example.com")]
#[case("alice@")]
#[case("alice@localhost")]
#[case("alice@@example.com")]
#[case("al ice@example.com")]
#[case("alice@example..com")]
fn email_address_rejects_malformed_values(#[case] raw: &str) {
    assert_eq!(
        EmailAddress::new(raw),
        Err(IdentityDomainError::InvalidEmail(raw.to_owned()))
    );
}

#[rstest]
#[case("")]
#[case("   ")]
fn user_id_rejects_blank_values(#[case] raw: &str) {
    assert_eq!(UserId::new(raw), Err(IdentityDomainError::EmptyUserId));
}

#[test]
fn user_id_rejects_overlong_values() {
    let raw = "u".repeat(UserId::MAX_LENGTH + 1);
    assert!(matches!(
        UserId::new(raw),
        Err(IdentityDomainError::UserIdTooLong { max, .. }) if max == UserId::MAX_LENGTH
    ));
}

#[test]
fn generated_user_ids_are_distinct() {
    assert_ne!(UserId::generate(), UserId::generate());
}

#[test]
fn user_id_deserialization_validates() {
    let parsed: Result<UserId, _> = serde_json::from_str(r#""   ""#);
    assert!(parsed.is_err());
    let valid: UserId = serde_json::from_str(r#""clx1""#).expect("valid user id");
    assert_eq!(valid.as_str(), "clx1");
}

#[test]
fn register_rejects_blank_name() {
    let email = EmailAddress::new("alice@example.com").expect("valid email");
    let result = User::register("  ", email, None, &DefaultClock);
    assert_eq!(result, Err(IdentityDomainError::EmptyName));
}

#[test]
fn register_drops_blank_image() {
    let email = EmailAddress::new("alice@example.com").expect("valid email");
    let user = User::register("Alice", email, Some(" ".to_owned()), &DefaultClock)
        .expect("valid registration");
    assert_eq!(user.image(), None);
    assert_eq!(user.name(), Some("Alice"));
}

#[test]
fn session_from_user_copies_profile() {
    let email = EmailAddress::new("alice@example.com").expect("valid email");
    let user = User::register(
        "Alice",
        email,
        Some("https://img.example.com/a.png".to_owned()),
        &DefaultClock,
    )
    .expect("valid registration");

    let session = Session::from(&user);

    assert_eq!(session.user_id(), user.id());
    assert_eq!(session.name(), Some("Alice"));
    assert_eq!(session.email(), Some("alice@example.com"));
    assert_eq!(session.image(), Some("https://img.example.com/a.png"));
}
