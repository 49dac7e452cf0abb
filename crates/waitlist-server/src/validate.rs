//! Signup validation and normalization.
//!
//! All field rules run independently so a rejection reports every
//! violation at once. The single exception is the honeypot: a filled
//! honeypot rejects the whole submission with one generic violation,
//! revealing nothing about the other fields.

use crate::api::SignupRequest;
use serde::Serialize;
use signup_store::{SignupDraft, Waitlist};
use std::collections::BTreeMap;

/// Domains of known disposable/temporary email providers.
pub const DISPOSABLE_EMAIL_DOMAINS: [&str; 12] = [
    "tempmail.com",
    "10minutemail.com",
    "guerrillamail.com",
    "mailinator.com",
    "throwaway.email",
    "temp-mail.org",
    "fakeinbox.com",
    "trashmail.com",
    "yopmail.com",
    "emailondeck.com",
    "getnada.com",
    "maildrop.cc",
];

/// Key for violations that apply to the submission as a whole.
pub const FORM_ERRORS_KEY: &str = "form";

/// Maximum length for name fields.
const NAME_MAX_LEN: usize = 50;

pub const BOT_DETECTED_MESSAGE: &str = "Bot detected. Please try again.";
pub const INVALID_EMAIL_MESSAGE: &str = "Invalid email format";
pub const DISPOSABLE_EMAIL_MESSAGE: &str =
    "Please use a permanent email address, not a temporary/disposable one.";
pub const DUPLICATE_EMAIL_MESSAGE: &str = "This email is already registered on our waitlist.";
pub const INVALID_PHONE_MESSAGE: &str =
    "Phone number must be exactly 10 digits (format: 555-123-4567)";
pub const DUPLICATE_PHONE_MESSAGE: &str =
    "This phone number is already registered on our waitlist.";
pub const DUPLICATE_PAIR_MESSAGE: &str =
    "You have already signed up with this email and phone number.";

/// Violations keyed by field name, with [`FORM_ERRORS_KEY`] for
/// whole-submission violations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors {
    errors: BTreeMap<String, Vec<String>>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a violation against a field.
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.errors
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    /// Record a whole-submission violation.
    pub fn add_form(&mut self, message: impl Into<String>) {
        self.add(FORM_ERRORS_KEY, message);
    }

    /// A single-field violation set.
    pub fn single(field: &str, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    /// A violation set with only a whole-submission entry.
    pub fn form_only(message: impl Into<String>) -> Self {
        Self::single(FORM_ERRORS_KEY, message)
    }

    pub fn duplicate_email() -> Self {
        Self::single("email", DUPLICATE_EMAIL_MESSAGE)
    }

    pub fn duplicate_phone() -> Self {
        Self::single("phone", DUPLICATE_PHONE_MESSAGE)
    }

    pub fn duplicate_pair() -> Self {
        Self::form_only(DUPLICATE_PAIR_MESSAGE)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Violations for one field, if any.
    pub fn get(&self, field: &str) -> Option<&Vec<String>> {
        self.errors.get(field)
    }

    pub fn into_map(self) -> BTreeMap<String, Vec<String>> {
        self.errors
    }
}

/// Validate a raw submission against the waitlist's current state.
///
/// Returns a normalized draft ready for [`Waitlist::create`], or every
/// violation found. The duplicate checks here are advisory early
/// rejections; `create` re-checks under its write lock.
pub fn validate_signup(
    request: &SignupRequest,
    waitlist: &Waitlist,
) -> Result<SignupDraft, FieldErrors> {
    // Honeypot: real users never see this field, so any value means a bot.
    // Reject without reporting on the other fields.
    if !request.website.trim().is_empty() {
        return Err(FieldErrors::form_only(BOT_DETECTED_MESSAGE));
    }

    let mut errors = FieldErrors::new();

    let first_name = validate_name(&request.first_name, "first_name", &mut errors);
    let last_name = validate_name(&request.last_name, "last_name", &mut errors);

    let email = match normalize_email(&request.email) {
        Ok(email) => {
            if let Some(domain) = email.rsplit('@').next() {
                if DISPOSABLE_EMAIL_DOMAINS.contains(&domain) {
                    errors.add("email", DISPOSABLE_EMAIL_MESSAGE);
                }
            }
            if waitlist.email_exists(&email) {
                errors.add("email", DUPLICATE_EMAIL_MESSAGE);
            }
            Some(email)
        }
        Err(message) => {
            errors.add("email", message);
            None
        }
    };

    let phone = match normalize_phone(&request.phone) {
        Ok(phone) => {
            if waitlist.phone_exists(&phone) {
                errors.add("phone", DUPLICATE_PHONE_MESSAGE);
            }
            Some(phone)
        }
        Err(message) => {
            errors.add("phone", message);
            None
        }
    };

    // Pair check only when both fields normalized individually.
    if let (Some(email), Some(phone)) = (&email, &phone) {
        if waitlist.pair_exists(email, phone) {
            errors.add_form(DUPLICATE_PAIR_MESSAGE);
        }
    }

    match (first_name, last_name, email, phone) {
        (Some(first_name), Some(last_name), Some(email), Some(phone)) if errors.is_empty() => {
            Ok(SignupDraft {
                first_name,
                last_name,
                email,
                phone,
                marketing_consent: request.marketing_consent,
            })
        }
        _ => Err(errors),
    }
}

fn validate_name(raw: &str, field: &str, errors: &mut FieldErrors) -> Option<String> {
    let name = raw.trim();
    if name.is_empty() {
        errors.add(field, "This field is required.");
        return None;
    }
    if name.chars().count() > NAME_MAX_LEN {
        errors.add(field, format!("Must be {} characters or fewer.", NAME_MAX_LEN));
        return None;
    }
    Some(name.to_string())
}

/// Lowercase and syntax-check an email address.
///
/// Split on the last `@` so a quoted local part containing `@` still
/// yields the real domain. Missing `@` is a violation, not a panic.
pub fn normalize_email(raw: &str) -> Result<String, &'static str> {
    let email = raw.trim().to_lowercase();

    let Some((local, domain)) = email.rsplit_once('@') else {
        return Err(INVALID_EMAIL_MESSAGE);
    };

    if local.is_empty() || domain.is_empty() {
        return Err(INVALID_EMAIL_MESSAGE);
    }
    if !domain.contains('.') || domain.starts_with('.') || domain.ends_with('.') {
        return Err(INVALID_EMAIL_MESSAGE);
    }
    if email.chars().any(char::is_whitespace) {
        return Err(INVALID_EMAIL_MESSAGE);
    }

    Ok(email)
}

/// Normalize a phone number to `ddd-ddd-dddd`.
///
/// Strips every non-digit; anything other than exactly 10 remaining
/// digits is a violation.
pub fn normalize_phone(raw: &str) -> Result<String, &'static str> {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();

    if digits.len() != 10 {
        return Err(INVALID_PHONE_MESSAGE);
    }

    Ok(format!("{}-{}-{}", &digits[..3], &digits[3..6], &digits[6..]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use signup_store::SignupDraft;

    fn request(email: &str, phone: &str) -> SignupRequest {
        SignupRequest {
            first_name: "John".into(),
            last_name: "Doe".into(),
            email: email.into(),
            phone: phone.into(),
            marketing_consent: false,
            website: String::new(),
        }
    }

    fn seeded_waitlist() -> Waitlist {
        let mut waitlist = Waitlist::new();
        waitlist
            .create(SignupDraft {
                first_name: "Jane".into(),
                last_name: "Smith".into(),
                email: "jane@example.com".into(),
                phone: "987-654-3210".into(),
                marketing_consent: false,
            })
            .unwrap();
        waitlist
    }

    #[test]
    fn test_valid_submission() {
        let waitlist = Waitlist::new();
        let draft = validate_signup(&request("JOHN@Example.com", "(123) 456-7890"), &waitlist)
            .unwrap();

        assert_eq!(draft.email, "john@example.com");
        assert_eq!(draft.phone, "123-456-7890");
        assert_eq!(draft.first_name, "John");
        assert!(!draft.marketing_consent);
    }

    #[test]
    fn test_honeypot_rejects_everything() {
        let waitlist = Waitlist::new();
        let mut req = request("john@example.com", "1234567890");
        req.website = "https://spam.example".into();

        let errors = validate_signup(&req, &waitlist).unwrap_err();
        assert_eq!(errors, FieldErrors::form_only(BOT_DETECTED_MESSAGE));
    }

    #[test]
    fn test_honeypot_hides_other_violations() {
        let waitlist = Waitlist::new();
        let mut req = request("not-an-email", "123");
        req.website = "x".into();

        let errors = validate_signup(&req, &waitlist).unwrap_err();
        // Only the bot violation, nothing about email or phone.
        assert!(errors.get("email").is_none());
        assert!(errors.get("phone").is_none());
        assert!(errors.get(FORM_ERRORS_KEY).is_some());
    }

    #[test]
    fn test_invalid_email_formats() {
        for raw in ["not-an-email", "@example.com", "john@", "john@nodot", "jo hn@example.com"] {
            assert_eq!(normalize_email(raw), Err(INVALID_EMAIL_MESSAGE), "input: {raw}");
        }
    }

    #[test]
    fn test_email_splits_on_last_at() {
        // The domain is whatever follows the final @.
        assert_eq!(normalize_email("\"odd@local\"@example.com"), Ok("\"odd@local\"@example.com".into()));
        assert_eq!(normalize_email("a@b@nodot"), Err(INVALID_EMAIL_MESSAGE));
    }

    #[test]
    fn test_disposable_domain_blocked() {
        let waitlist = Waitlist::new();
        let errors = validate_signup(&request("Test@Mailinator.COM", "1234567890"), &waitlist)
            .unwrap_err();
        assert_eq!(
            errors.get("email"),
            Some(&vec![DISPOSABLE_EMAIL_MESSAGE.to_string()])
        );
    }

    #[test]
    fn test_phone_normalization() {
        assert_eq!(normalize_phone("(123) 456-7890"), Ok("123-456-7890".into()));
        assert_eq!(normalize_phone("1234567890"), Ok("123-456-7890".into()));
        assert_eq!(normalize_phone("123.456.7890"), Ok("123-456-7890".into()));
        assert_eq!(normalize_phone("12345"), Err(INVALID_PHONE_MESSAGE));
        assert_eq!(normalize_phone("1234567890123"), Err(INVALID_PHONE_MESSAGE));
        assert_eq!(normalize_phone(""), Err(INVALID_PHONE_MESSAGE));
    }

    #[test]
    fn test_duplicate_email_detected() {
        let waitlist = seeded_waitlist();
        let errors = validate_signup(&request("JANE@example.com", "1234567890"), &waitlist)
            .unwrap_err();
        assert_eq!(
            errors.get("email"),
            Some(&vec![DUPLICATE_EMAIL_MESSAGE.to_string()])
        );
    }

    #[test]
    fn test_duplicate_phone_detected() {
        let waitlist = seeded_waitlist();
        let errors = validate_signup(&request("john@example.com", "987-654-3210"), &waitlist)
            .unwrap_err();
        assert_eq!(
            errors.get("phone"),
            Some(&vec![DUPLICATE_PHONE_MESSAGE.to_string()])
        );
    }

    #[test]
    fn test_duplicate_pair_reported_with_field_duplicates() {
        let waitlist = seeded_waitlist();
        let errors = validate_signup(&request("jane@example.com", "9876543210"), &waitlist)
            .unwrap_err();

        assert!(errors.get("email").is_some());
        assert!(errors.get("phone").is_some());
        assert_eq!(
            errors.get(FORM_ERRORS_KEY),
            Some(&vec![DUPLICATE_PAIR_MESSAGE.to_string()])
        );
    }

    #[test]
    fn test_all_violations_reported_together() {
        let waitlist = Waitlist::new();
        let mut req = request("bad-email", "123");
        req.first_name = "".into();
        req.last_name = "x".repeat(51);

        let errors = validate_signup(&req, &waitlist).unwrap_err();
        assert!(errors.get("first_name").is_some());
        assert!(errors.get("last_name").is_some());
        assert!(errors.get("email").is_some());
        assert!(errors.get("phone").is_some());
    }

    #[test]
    fn test_rejection_is_idempotent() {
        let waitlist = seeded_waitlist();
        let req = request("jane@example.com", "12345");

        let first = validate_signup(&req, &waitlist).unwrap_err();
        let second = validate_signup(&req, &waitlist).unwrap_err();
        assert_eq!(first, second);
        assert_eq!(waitlist.count(), 1);
    }

    #[test]
    fn test_names_trimmed_and_bounded() {
        let waitlist = Waitlist::new();
        let mut req = request("john@example.com", "1234567890");
        req.first_name = "  John  ".into();

        let draft = validate_signup(&req, &waitlist).unwrap();
        assert_eq!(draft.first_name, "John");

        let mut req = request("john2@example.com", "1234567891");
        req.first_name = "x".repeat(50);
        assert!(validate_signup(&req, &waitlist).is_ok());
    }
}
