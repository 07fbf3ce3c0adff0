use serde::Deserialize;
use validator::Validate;

use crate::domain::types::{AdminEmail, OtpCode};
use crate::forms::FormError;

#[derive(Debug, Deserialize, Validate)]
/// First login step: the address the code is mailed to.
pub struct LoginForm {
    #[validate(email)]
    pub email: String,
}

#[derive(Debug, Deserialize, Validate)]
/// Second login step: the code from the email.
pub struct VerifyCodeForm {
    #[validate(length(min = 6, max = 10))]
    pub code: String,
}

impl TryFrom<LoginForm> for AdminEmail {
    type Error = FormError;

    fn try_from(form: LoginForm) -> Result<Self, Self::Error> {
        let email = form.email.trim().to_string();
        let form = LoginForm { email };
        form.validate()?;
        AdminEmail::new(form.email).map_err(|_| FormError::InvalidEmail)
    }
}

impl TryFrom<VerifyCodeForm> for OtpCode {
    type Error = FormError;

    fn try_from(form: VerifyCodeForm) -> Result<Self, Self::Error> {
        OtpCode::new(form.code).map_err(|_| FormError::InvalidCode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_form_normalizes_email() {
        let form = LoginForm {
            email: "  Staff@Example.com ".into(),
        };
        let email = AdminEmail::try_from(form).unwrap();
        assert_eq!(email.as_str(), "staff@example.com");
    }

    #[test]
    fn login_form_rejects_invalid_email() {
        let form = LoginForm {
            email: "staff".into(),
        };
        assert!(matches!(
            AdminEmail::try_from(form),
            Err(FormError::Validation(_))
        ));
    }

    #[test]
    fn verify_form_requires_digits() {
        let ok = VerifyCodeForm {
            code: " 12345678 ".into(),
        };
        assert_eq!(OtpCode::try_from(ok).unwrap().as_str(), "12345678");

        let bad = VerifyCodeForm {
            code: "12e456".into(),
        };
        assert!(matches!(OtpCode::try_from(bad), Err(FormError::InvalidCode)));
    }
}
