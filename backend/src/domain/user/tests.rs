//! Tests for username and password policies.

use super::*;
use rstest::rstest;

#[rstest]
#[case("a")]
#[case("_hidden")]
#[case("ada.lovelace")]
#[case("user_01.ops")]
#[case("123456789012345678901234567890")]
fn accepts_valid_usernames(#[case] raw: &str) {
    let username = Username::new(raw).expect("valid username");
    assert_eq!(username.as_str(), raw);
}

#[rstest]
#[case("")]
#[case(".ada")]
#[case("ada.")]
#[case("ada..lovelace")]
#[case("ada lovelace")]
#[case("ada-lovelace")]
#[case("élodie")]
#[case("1234567890123456789012345678901")]
fn rejects_invalid_usernames(#[case] raw: &str) {
    assert_eq!(
        Username::new(raw),
        Err(UserValidationError::InvalidUsername)
    );
}

#[rstest]
#[case("Passw0rd")]
#[case("correct Horse 9")]
#[case("ABCdef123!@#")]
fn accepts_strong_passwords(#[case] raw: &str) {
    let password = NewPassword::new(raw).expect("strong password");
    assert_eq!(password.expose(), raw);
}

#[rstest]
#[case("Pa5s")]
#[case("password1")]
#[case("PASSWORD1")]
#[case("Password")]
#[case("Passw0rd\nsecond")]
fn rejects_weak_passwords(#[case] raw: &str) {
    assert_eq!(
        NewPassword::new(raw),
        Err(UserValidationError::InvalidPassword)
    );
}

#[rstest]
fn unchecked_password_bypasses_policy() {
    assert_eq!(NewPassword::unchecked("admin").expose(), "admin");
}

#[rstest]
fn debug_output_hides_secrets() {
    let password = NewPassword::unchecked("hunter2");
    let hash = PasswordHash::new("$argon2id$v=19$secret");
    assert!(!format!("{password:?}").contains("hunter2"));
    assert!(!format!("{hash:?}").contains("secret"));
}

#[rstest]
fn validation_messages_match_api_wording() {
    assert_eq!(
        UserValidationError::InvalidUsername.to_string(),
        "Username is invalid"
    );
    assert_eq!(
        UserValidationError::InvalidPassword.to_string(),
        "Password is invalid"
    );
}
