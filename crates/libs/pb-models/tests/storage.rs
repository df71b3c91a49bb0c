use pb_models::{
    phone::{Phone, PhoneCreate},
    user::{User, UserCreate},
};
use serial_test::serial;

use common::DBTestContext;

mod common;

fn alice() -> UserCreate {
    UserCreate {
        login: String::from("alice"),
        password: String::from("$argon2id$not-a-real-hash"),
        name: String::from("Alice"),
        age: 30,
    }
}

fn phone_for(user_id: i64, number: &str) -> PhoneCreate {
    PhoneCreate {
        user_id,
        phone: String::from(number),
        description: String::from("mobile"),
        is_fax: false,
    }
}

#[test]
#[serial]
fn test_user_round_trip() {
    let Some(ctx) = DBTestContext::from_env() else {
        return;
    };

    let user = alice().save(&ctx.db).unwrap();
    assert!(user.id >= 1);

    let by_login = User::fetch_by_login("alice", &ctx.db).unwrap().unwrap();
    assert_eq!(by_login, user);

    let by_name = User::fetch_by_name("Alice", &ctx.db).unwrap().unwrap();
    assert_eq!(by_name.id, user.id);

    let by_id = User::fetch_by_id(user.id, &ctx.db).unwrap().unwrap();
    assert_eq!(by_id.login, "alice");

    assert!(User::fetch_by_login("bob", &ctx.db).unwrap().is_none());
}

#[test]
#[serial]
fn test_login_is_unique() {
    let Some(ctx) = DBTestContext::from_env() else {
        return;
    };

    alice().save(&ctx.db).unwrap();
    assert!(alice().save(&ctx.db).is_err());
}

#[test]
#[serial]
fn test_phone_lifecycle() {
    let Some(ctx) = DBTestContext::from_env() else {
        return;
    };

    let user = alice().save(&ctx.db).unwrap();
    let mobile = phone_for(user.id, "+998901234567").save(&ctx.db).unwrap();
    let office = phone_for(user.id, "+998711112233").save(&ctx.db).unwrap();

    let found = Phone::fetch_all_with_number("90123", &ctx.db).unwrap();
    assert_eq!(found, vec![mobile.clone()]);

    let all = Phone::fetch_all_with_number("+998", &ctx.db).unwrap();
    assert_eq!(all.len(), 2);

    let mut updated = office.clone();
    updated.description = String::from("office fax");
    updated.is_fax = true;
    assert_eq!(updated.update(&ctx.db).unwrap(), 1);
    assert_eq!(
        Phone::fetch_by_id(office.id, &ctx.db).unwrap().unwrap(),
        updated
    );

    assert!(Phone::delete(mobile.id, &ctx.db).unwrap());
    assert!(!Phone::delete(mobile.id, &ctx.db).unwrap());
    assert!(Phone::fetch_by_id(mobile.id, &ctx.db).unwrap().is_none());
}

#[test]
#[serial]
fn test_search_treats_wildcards_literally() {
    let Some(ctx) = DBTestContext::from_env() else {
        return;
    };

    let user = alice().save(&ctx.db).unwrap();
    phone_for(user.id, "+998901234567").save(&ctx.db).unwrap();

    assert!(Phone::fetch_all_with_number("%", &ctx.db).unwrap().is_empty());
    assert!(Phone::fetch_all_with_number("9_1", &ctx.db).unwrap().is_empty());
}
