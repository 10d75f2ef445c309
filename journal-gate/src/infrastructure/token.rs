use chrono::Utc;
use jsonwebtoken::{DecodingKey, Validation, decode, decode_header};
use serde::Deserialize;

use super::verifier::VerifyError;

/// Допуск на расхождение часов с API, секунд.
const EXP_LEEWAY_SECONDS: i64 = 10;

#[derive(Debug, Deserialize)]
struct Claims {
    exp: Option<i64>,
}

/// Локальная проверка токена: формат JWT и срок `exp`, если он указан.
///
/// Подпись не проверяется: секрет есть только у API, подлинность токена
/// подтверждает запрос профиля.
pub(crate) fn check_structure(token: &str) -> Result<(), VerifyError> {
    decode_header(token).map_err(|_| VerifyError::Malformed)?;

    let mut validation = Validation::default();
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.required_spec_claims.clear();

    let data = decode::<Claims>(token, &DecodingKey::from_secret(&[]), &validation)
        .map_err(|_| VerifyError::Malformed)?;

    match data.claims.exp {
        Some(exp) if exp + EXP_LEEWAY_SECONDS < Utc::now().timestamp() => Err(VerifyError::Expired),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use jsonwebtoken::{EncodingKey, Header, encode};
    use serde_json::json;

    use super::*;

    fn token_with(claims: serde_json::Value) -> String {
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"api-only-secret"),
        )
        .expect("token must encode")
    }

    #[test]
    fn accepts_unexpired_token_without_knowing_secret() {
        let exp = (Utc::now() + Duration::hours(1)).timestamp();
        let token = token_with(json!({"userId": "u1", "role": "Admin", "exp": exp}));
        assert!(check_structure(&token).is_ok());
    }

    #[test]
    fn accepts_token_without_exp() {
        let token = token_with(json!({"userId": "u1"}));
        assert!(check_structure(&token).is_ok());
    }

    #[test]
    fn rejects_expired_token() {
        let exp = (Utc::now() - Duration::hours(1)).timestamp();
        let token = token_with(json!({"userId": "u1", "exp": exp}));
        assert!(matches!(check_structure(&token), Err(VerifyError::Expired)));
    }

    #[test]
    fn rejects_garbage() {
        assert!(matches!(check_structure("not-a-jwt"), Err(VerifyError::Malformed)));
        assert!(matches!(check_structure("a.b.c"), Err(VerifyError::Malformed)));
    }
}
