use crate::state::{LoginForm, PasswordForm, RegisterForm, TransactionForm};
use moneymap_ledger::{parse_date, Amount, NewTransaction};
use secrecy::SecretString;

pub const FILL_ALL_FIELDS: &str = "Please fill in all fields";
pub const ENTER_EMAIL: &str = "Please enter your email";
pub const ENTER_VALID_EMAIL: &str = "Please enter a valid email";
pub const PASSWORDS_DO_NOT_MATCH: &str = "Passwords do not match";
pub const ENTER_NEW_PASSWORD: &str = "Please enter a new password";

/// Validated sign-in credentials
pub fn validate_login(form: &LoginForm) -> Result<(String, SecretString), String> {
    let email = form.email.trim();
    if email.is_empty() || form.password.is_empty() {
        return Err(FILL_ALL_FIELDS.to_string());
    }
    Ok((email.to_string(), SecretString::from(form.password.clone())))
}

pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: SecretString,
}

pub fn validate_registration(form: &RegisterForm) -> Result<Registration, String> {
    let name = form.name.trim();
    let email = form.email.trim();
    if name.is_empty() || email.is_empty() || form.password.is_empty() || form.confirm.is_empty()
    {
        return Err(FILL_ALL_FIELDS.to_string());
    }
    if form.password != form.confirm {
        return Err(PASSWORDS_DO_NOT_MATCH.to_string());
    }

    Ok(Registration {
        name: name.to_string(),
        email: email.to_string(),
        password: SecretString::from(form.password.clone()),
    })
}

/// Email for the Google prompt, which needs something that looks like an
/// address
pub fn validate_google_email(email: &str) -> Result<String, String> {
    let email = email.trim();
    if email.is_empty() {
        return Err(ENTER_EMAIL.to_string());
    }
    if !email.contains('@') {
        return Err(ENTER_VALID_EMAIL.to_string());
    }
    Ok(email.to_string())
}

pub fn validate_reset_email(email: &str) -> Result<String, String> {
    let email = email.trim();
    if email.is_empty() {
        return Err(ENTER_EMAIL.to_string());
    }
    Ok(email.to_string())
}

/// Parse the raw form fields into a transaction draft
pub fn validate_transaction_form(form: &TransactionForm) -> Result<NewTransaction, String> {
    if form.description.trim().is_empty() || form.amount.trim().is_empty() {
        return Err(FILL_ALL_FIELDS.to_string());
    }

    let amount = Amount::parse(&form.amount).map_err(|e| e.to_string())?;
    let date = parse_date(&form.date).map_err(|e| e.to_string())?;

    let draft = NewTransaction::new(form.description.trim(), amount, date)
        .kind(form.kind)
        .category(form.category);
    draft.validate().map_err(|e| e.to_string())?;

    Ok(draft)
}

pub fn validate_password_change(form: &PasswordForm) -> Result<(), String> {
    if form.new_password.is_empty() {
        return Err(ENTER_NEW_PASSWORD.to_string());
    }
    if form.new_password != form.confirm {
        return Err(PASSWORDS_DO_NOT_MATCH.to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use moneymap_ledger::{Category, TransactionKind};
    use secrecy::ExposeSecret;

    fn transaction_form(description: &str, amount: &str) -> TransactionForm {
        let mut form = TransactionForm::new(NaiveDate::from_ymd_opt(2025, 7, 25).unwrap());
        form.description = description.to_string();
        form.amount = amount.to_string();
        form
    }

    #[test]
    fn test_login_requires_both_fields() {
        let mut form = LoginForm {
            email: "jane@example.com".to_string(),
            ..Default::default()
        };
        assert_eq!(validate_login(&form).unwrap_err(), FILL_ALL_FIELDS);

        form.password = "hunter2".to_string();
        let (email, password) = validate_login(&form).unwrap();
        assert_eq!(email, "jane@example.com");
        assert_eq!(password.expose_secret(), "hunter2");
    }

    #[test]
    fn test_registration_checks_confirmation() {
        let mut form = RegisterForm {
            name: "Jane".to_string(),
            email: "jane@example.com".to_string(),
            password: "secret".to_string(),
            confirm: "other".to_string(),
            ..Default::default()
        };
        assert_eq!(
            validate_registration(&form).err().unwrap(),
            PASSWORDS_DO_NOT_MATCH
        );

        form.confirm = "secret".to_string();
        let registration = validate_registration(&form).unwrap();
        assert_eq!(registration.name, "Jane");

        form.name = "  ".to_string();
        assert_eq!(validate_registration(&form).err().unwrap(), FILL_ALL_FIELDS);
    }

    #[test]
    fn test_google_email_needs_at_sign() {
        assert_eq!(validate_google_email("").unwrap_err(), ENTER_EMAIL);
        assert_eq!(validate_google_email("jane").unwrap_err(), ENTER_VALID_EMAIL);
        assert_eq!(
            validate_google_email(" jane@example.com ").unwrap(),
            "jane@example.com"
        );
    }

    #[test]
    fn test_reset_email_only_needs_content() {
        assert_eq!(validate_reset_email("   ").unwrap_err(), ENTER_EMAIL);
        assert_eq!(validate_reset_email("jane").unwrap(), "jane");
    }

    #[test]
    fn test_transaction_form_builds_draft() {
        let mut form = transaction_form(" Groceries ", "42.5");
        form.kind = TransactionKind::Income;
        form.category = Category::Salary;

        let draft = validate_transaction_form(&form).unwrap();
        assert_eq!(draft.description, "Groceries");
        assert_eq!(draft.amount, Amount::from_cents(4250));
        assert_eq!(draft.kind, TransactionKind::Income);
        assert_eq!(draft.category, Category::Salary);
        assert_eq!(draft.date, NaiveDate::from_ymd_opt(2025, 7, 25).unwrap());
    }

    #[test]
    fn test_transaction_form_rejects_bad_input() {
        assert_eq!(
            validate_transaction_form(&transaction_form("", "10")).unwrap_err(),
            FILL_ALL_FIELDS
        );
        assert_eq!(
            validate_transaction_form(&transaction_form("Coffee", "abc")).unwrap_err(),
            "Invalid amount: abc"
        );
        assert_eq!(
            validate_transaction_form(&transaction_form("Coffee", "-4")).unwrap_err(),
            "Amount must be greater than zero"
        );
        assert_eq!(
            validate_transaction_form(&transaction_form("Coffee", "10000000000.01")).unwrap_err(),
            "Amount cannot exceed 10000000000.00"
        );
        assert!(validate_transaction_form(&transaction_form("Coffee", "10000000000")).is_ok());

        let mut form = transaction_form("Coffee", "4");
        form.date = "25/07/2025".to_string();
        assert_eq!(
            validate_transaction_form(&form).unwrap_err(),
            "Invalid date: 25/07/2025"
        );
    }

    #[test]
    fn test_password_change() {
        let mut form = PasswordForm::default();
        assert_eq!(
            validate_password_change(&form).unwrap_err(),
            ENTER_NEW_PASSWORD
        );

        form.new_password = "new".to_string();
        form.confirm = "old".to_string();
        assert_eq!(
            validate_password_change(&form).unwrap_err(),
            PASSWORDS_DO_NOT_MATCH
        );

        form.confirm = "new".to_string();
        assert!(validate_password_change(&form).is_ok());
    }
}
