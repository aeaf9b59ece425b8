//! Sign-in and registration forms.
//!
//! Every field is required and the age must be a positive whole number.
//! Invalid input is rejected at the prompt, so nothing reaches the network
//! until the form is complete.

use anyhow::{Result, bail};
use inquire::validator::Validation;
use inquire::{CustomType, CustomUserError, Password, Select, Text};

use crate::api::{LoginData, RegisterData};
use crate::i18n::Translations;

const REQUIRED_MESSAGE: &str = "This field is required";

/// Which form the user picked on the welcome screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthChoice {
    Login,
    Register,
}

/// Returns the trimmed value, or `None` when it is blank.
pub fn required(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

/// Parses an age as a positive integer.
pub fn parse_age(value: &str) -> Option<u32> {
    value.trim().parse().ok().filter(|age| *age > 0)
}

/// Builds login credentials, or `None` if a field is blank.
///
/// The username is trimmed; the password is sent as typed.
pub fn login_data(username: &str, password: &str) -> Option<LoginData> {
    let username = required(username)?;
    required(password)?;
    Some(LoginData {
        username: username.to_string(),
        password: password.to_string(),
    })
}

/// Builds registration details, or `None` if a field is blank or the age
/// is not a positive integer.
pub fn register_data(
    name: &str,
    age: &str,
    username: &str,
    email: &str,
    password: &str,
) -> Option<RegisterData> {
    required(password)?;
    Some(RegisterData {
        name: required(name)?.to_string(),
        age: parse_age(age)?,
        username: required(username)?.to_string(),
        email: required(email)?.to_string(),
        password: password.to_string(),
    })
}

#[allow(clippy::unnecessary_wraps)]
fn required_validator(input: &str) -> Result<Validation, CustomUserError> {
    if required(input).is_some() {
        Ok(Validation::Valid)
    } else {
        Ok(Validation::Invalid(REQUIRED_MESSAGE.into()))
    }
}

pub fn choose_auth(t: &Translations) -> Result<AuthChoice> {
    let choice = Select::new(t.auth.welcome, vec![t.auth.login, t.auth.register]).prompt()?;
    if choice == t.auth.register {
        Ok(AuthChoice::Register)
    } else {
        Ok(AuthChoice::Login)
    }
}

/// Prompts for credentials. A username given up front is not asked again.
pub fn login_form(t: &Translations, username: Option<&str>) -> Result<LoginData> {
    println!("{}", crate::ui::Style::header(t.auth.login_title));

    let username = match username {
        Some(username) => username.to_string(),
        None => Text::new(&format!("{}:", t.auth.username))
            .with_validator(required_validator)
            .prompt()?,
    };
    let password = Password::new(&format!("{}:", t.auth.password))
        .without_confirmation()
        .with_validator(required_validator)
        .prompt()?;

    match login_data(&username, &password) {
        Some(data) => Ok(data),
        None => bail!("{}: {REQUIRED_MESSAGE}", t.auth.username),
    }
}

pub fn register_form(t: &Translations) -> Result<RegisterData> {
    println!("{}", crate::ui::Style::header(t.auth.register_title));

    let name = Text::new(&format!("{}:", t.auth.name))
        .with_validator(required_validator)
        .prompt()?;
    let age = CustomType::<u32>::new(&format!("{}:", t.auth.age))
        .with_parser(&|input: &str| parse_age(input).ok_or(()))
        .with_error_message("Please enter a positive whole number")
        .prompt()?;
    let username = Text::new(&format!("{}:", t.auth.username))
        .with_validator(required_validator)
        .prompt()?;
    let email = Text::new(&format!("{}:", t.auth.email))
        .with_validator(required_validator)
        .prompt()?;
    let password = Password::new(&format!("{}:", t.auth.password))
        .with_validator(required_validator)
        .prompt()?;

    match register_data(&name, &age.to_string(), &username, &email, &password) {
        Some(data) => Ok(data),
        None => bail!("{REQUIRED_MESSAGE}"),
    }
}
