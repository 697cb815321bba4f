//! Run against a local Postgres with `cargo test -- --ignored`
//! (DATABASE_URL defaults to port 5433).

mod common;

use chrono::NaiveDate;
use chrono::Utc;
use common::TestDb;
use contacts_service::contact::errors::ContactError;
use contacts_service::contact::models::Birthday;
use contacts_service::contact::models::BirthdayWindow;
use contacts_service::contact::models::Contact;
use contacts_service::contact::models::ContactFilter;
use contacts_service::contact::models::ContactId;
use contacts_service::contact::models::PersonName;
use contacts_service::contact::models::PhoneNumber;
use contacts_service::contact::ports::ContactRepository;
use contacts_service::domain::health::HealthCheck;
use contacts_service::domain::user::models::EmailAddress;
use contacts_service::domain::user::models::User;
use contacts_service::domain::user::models::UserId;
use contacts_service::domain::user::models::UserRole;
use contacts_service::domain::user::models::Username;
use contacts_service::repositories::PostgresContactRepository;
use contacts_service::repositories::PostgresUserRepository;
use contacts_service::user::errors::UserError;
use contacts_service::user::ports::UserRepository;

fn user(username: &str, email: &str) -> User {
    User {
        id: UserId::new(),
        username: Username::new(username.to_string()).unwrap(),
        email: EmailAddress::new(email.to_string()).unwrap(),
        password_hash: "$2b$04$hash".to_string(),
        role: UserRole::User,
        confirmed: false,
        avatar: None,
        created_at: Utc::now(),
    }
}

fn contact(owner: &User, first_name: &str, email: &str, birthday: &str) -> Contact {
    Contact {
        id: ContactId::new(),
        owner_id: owner.id,
        first_name: PersonName::new(first_name.to_string()).unwrap(),
        last_name: PersonName::new("Example".to_string()).unwrap(),
        email: EmailAddress::new(email.to_string()).unwrap(),
        phone: PhoneNumber::new("555-0100".to_string()).unwrap(),
        birthday: Birthday::parse(birthday).unwrap(),
        created_at: Utc::now(),
    }
}

#[tokio::test]
#[ignore]
async fn test_user_repository_round_trip() {
    let db = TestDb::new().await;
    let repository = PostgresUserRepository::new(db.pool.clone());

    repository.ping().await.expect("Database should be reachable");

    let created = repository
        .create(user("nicola", "nicola@example.com"))
        .await
        .unwrap();

    let by_username = repository.find_by_username("nicola").await.unwrap();
    assert_eq!(by_username.map(|u| u.id), Some(created.id));
    assert!(repository
        .find_by_email("nobody@example.com")
        .await
        .unwrap()
        .is_none());

    let confirmed = repository
        .set_confirmed(&created.email)
        .await
        .unwrap()
        .unwrap();
    assert!(confirmed.confirmed);

    let updated = repository
        .set_password_hash(&created.id, "$2b$04$other".to_string())
        .await
        .unwrap();
    assert_eq!(updated.password_hash, "$2b$04$other");

    let with_avatar = repository
        .set_avatar(&created.email, "http://localhost/avatars/nicola.png".to_string())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(
        with_avatar.avatar.as_deref(),
        Some("http://localhost/avatars/nicola.png")
    );
}

#[tokio::test]
#[ignore]
async fn test_user_repository_maps_unique_violations() {
    let db = TestDb::new().await;
    let repository = PostgresUserRepository::new(db.pool.clone());

    repository
        .create(user("nicola", "nicola@example.com"))
        .await
        .unwrap();

    let duplicate_username = repository
        .create(user("nicola", "other@example.com"))
        .await;
    assert!(matches!(
        duplicate_username,
        Err(UserError::UsernameAlreadyExists(_))
    ));

    let duplicate_email = repository
        .create(user("other", "nicola@example.com"))
        .await;
    assert!(matches!(duplicate_email, Err(UserError::EmailAlreadyExists(_))));
}

#[tokio::test]
#[ignore]
async fn test_contact_repository_filters() {
    let db = TestDb::new().await;
    let users = PostgresUserRepository::new(db.pool.clone());
    let contacts = PostgresContactRepository::new(db.pool.clone());

    let owner = users
        .create(user("nicola", "nicola@example.com"))
        .await
        .unwrap();
    let stranger = users
        .create(user("stranger", "stranger@example.com"))
        .await
        .unwrap();

    contacts
        .create(contact(&owner, "Winter", "winter@example.com", "1990-12-30"))
        .await
        .unwrap();
    contacts
        .create(contact(&owner, "NewYear", "newyear@example.com", "1985-01-03"))
        .await
        .unwrap();
    contacts
        .create(contact(&owner, "Summer", "summer@example.com", "1970-06-15"))
        .await
        .unwrap();
    contacts
        .create(contact(&stranger, "Hidden", "hidden@example.com", "1990-12-30"))
        .await
        .unwrap();

    let all = contacts
        .list(&owner.id, &ContactFilter::default())
        .await
        .unwrap();
    assert_eq!(all.len(), 3);

    let search = ContactFilter {
        search: Some("SUMMER".to_string()),
        ..ContactFilter::default()
    };
    let found = contacts.list(&owner.id, &search).await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].first_name.as_str(), "Summer");

    let today = NaiveDate::from_ymd_opt(2024, 12, 28).unwrap();
    let window = ContactFilter {
        birthdays: Some(BirthdayWindow::starting(today, 7)),
        ..ContactFilter::default()
    };
    let upcoming = contacts.list(&owner.id, &window).await.unwrap();
    let names: Vec<&str> = upcoming.iter().map(|c| c.first_name.as_str()).collect();
    assert_eq!(names, vec!["Winter", "NewYear"]);

    let paged = ContactFilter {
        offset: Some(1),
        limit: Some(1),
        ..ContactFilter::default()
    };
    assert_eq!(contacts.list(&owner.id, &paged).await.unwrap().len(), 1);
}

#[tokio::test]
#[ignore]
async fn test_contact_repository_write_paths() {
    let db = TestDb::new().await;
    let users = PostgresUserRepository::new(db.pool.clone());
    let contacts = PostgresContactRepository::new(db.pool.clone());

    let owner = users
        .create(user("nicola", "nicola@example.com"))
        .await
        .unwrap();
    let mut ada = contacts
        .create(contact(&owner, "Ada", "ada@example.com", "1815-12-10"))
        .await
        .unwrap();

    let duplicate = contacts
        .create(contact(&owner, "Ada", "ada@example.com", "1815-12-10"))
        .await;
    assert!(matches!(duplicate, Err(ContactError::EmailAlreadyExists(_))));

    ada.phone = PhoneNumber::new("+44 20 7946 0000".to_string()).unwrap();
    contacts.update(ada.clone()).await.unwrap();
    let stored = contacts
        .find_by_id(&owner.id, &ada.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.phone.as_str(), "+44 20 7946 0000");
    assert!(contacts
        .find_by_email(&owner.id, &ada.email)
        .await
        .unwrap()
        .is_some());

    contacts.delete(&owner.id, &ada.id).await.unwrap();
    assert!(matches!(
        contacts.delete(&owner.id, &ada.id).await,
        Err(ContactError::NotFound(_))
    ));
}
